//! Mosaic Panel Mapping
//!
//! Maps a unified logical canvas onto a chain of tiled LED panels.
//!
//! # Addressing Model
//!
//! Applications draw into a logical canvas of
//! `columns × panel_width` by `rows × panel_height` pixels. The hardware sees
//! the same pixels in **chain order**: the sequence in which panels receive
//! data along the shared data line, each panel possibly mounted rotated.
//!
//! Mapping a logical pixel is a pure function of a small static table:
//!
//! 1. Find the logical panel containing the pixel and the local offset in it
//! 2. Look up that panel's [`PanelConfig`] (falling back to the first entry)
//! 3. Rotate the local offset by the panel's mounting [`Rotation`]
//! 4. Translate by the physical panel's origin ([`PhysicalLayout`])
//!
//! # Toroidal Grids
//!
//! The [`Torus`] helpers give every cell of a wrapped grid a full neighbor
//! set with no boundary special-casing. All automata built on top of this
//! crate use them for neighbor arithmetic.

mod error;
mod geometry;
mod mapper;
mod rotation;
mod torus;

pub use error::{Error, Result};
pub use geometry::{PanelConfig, PanelGeometry, PanelOffset, PhysicalLayout, Pixel};
pub use mapper::{PanelMapper, QUAD_180_TABLE};
pub use rotation::Rotation;
pub use torus::{Torus, MAX_RADIUS, MOORE_OFFSETS};

/// Panel edge length of the reference installation, in pixels.
pub const DEFAULT_PANEL_SIZE: u16 = 64;

/// Number of quarter turns a panel can be mounted with.
pub const ROTATION_COUNT: u8 = 4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_installation_is_128_square() {
        let mapper = PanelMapper::quad_180(DEFAULT_PANEL_SIZE, DEFAULT_PANEL_SIZE).unwrap();
        assert_eq!(mapper.geometry().canvas_width(), 128);
        assert_eq!(mapper.geometry().canvas_height(), 128);
        assert_eq!(mapper.panels().len(), 4);
    }
}
