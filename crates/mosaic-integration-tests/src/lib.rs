//! Cross-crate tests for the Mosaic workspace.
//!
//! Everything lives under `tests/`; each file builds as its own binary so
//! the allocation-counting harness can install a global allocator without
//! affecting the others.
