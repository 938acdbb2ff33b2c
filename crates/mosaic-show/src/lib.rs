//! Mosaic Show
//!
//! Runs cellular automata on a tiled LED panel wall.
//!
//! # Architecture
//!
//! - **Config**: [`ShowConfig`] from JSON plus `MOSAIC_*` environment overrides
//! - **Scheduler**: owns the running automaton and rotates kinds on a timer
//! - **Frame loop**: ticks the scheduler, drives the title overlay, sleeps
//! - **Calibration**: test patterns for checking panel order and rotation
//!
//! # Usage
//!
//! ```ignore
//! let config = ShowConfig::from_env()?;
//! let mapper = config.mapper()?;
//! let mut scheduler = Scheduler::from_config(&config)?;
//! let mut frame_loop = FrameLoop::new(LoopOptions::from_config(&config), NoOverlay);
//! let mut rng = config.rng();
//! frame_loop.run(&mut scheduler, &mut display, &mapper, &mut rng).await;
//! ```

pub mod calibration;
pub mod config;
mod error;
pub mod frame_loop;
pub mod scheduler;

pub use calibration::{run_calibration, TestPattern};
pub use config::{PreviewConfig, ShowConfig};
pub use error::{Error, Result};
pub use frame_loop::{FrameLoop, LoopOptions, LoopStats, NoOverlay, Overlay};
pub use scheduler::{Scheduler, Tick};
