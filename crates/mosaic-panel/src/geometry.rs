//! Canvas geometry and the per-panel configuration table.

use crate::{Error, Result, Rotation};

/// A pixel position, logical or physical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pixel {
    /// Column
    pub x: u16,
    /// Row
    pub y: u16,
}

impl Pixel {
    /// Top-left corner.
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    /// Create a new pixel position.
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Pixel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Panel size and how panels are arranged into the logical grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PanelGeometry {
    /// Width of one panel in pixels
    pub panel_width: u16,
    /// Height of one panel in pixels
    pub panel_height: u16,
    /// Panels per logical row
    pub columns: u16,
    /// Panels per logical column
    pub rows: u16,
}

impl PanelGeometry {
    /// Create a geometry. Call [`validate`](Self::validate) before use.
    pub const fn new(panel_width: u16, panel_height: u16, columns: u16, rows: u16) -> Self {
        Self {
            panel_width,
            panel_height,
            columns,
            rows,
        }
    }

    /// Logical canvas width in pixels.
    pub const fn canvas_width(&self) -> u16 {
        self.panel_width * self.columns
    }

    /// Logical canvas height in pixels.
    pub const fn canvas_height(&self) -> u16 {
        self.panel_height * self.rows
    }

    /// Number of panel slots in the logical grid.
    pub const fn panel_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// Number of logical pixels.
    pub const fn pixel_count(&self) -> usize {
        self.canvas_width() as usize * self.canvas_height() as usize
    }

    /// Check that every dimension is non-zero and the canvas fits in `u16`.
    pub fn validate(&self) -> Result<()> {
        if self.panel_width == 0 || self.panel_height == 0 || self.columns == 0 || self.rows == 0 {
            return Err(Error::InvalidGeometry(format!(
                "zero dimension in {}x{} panels, {}x{} grid",
                self.panel_width, self.panel_height, self.columns, self.rows
            )));
        }
        let width = self.panel_width as u32 * self.columns as u32;
        let height = self.panel_height as u32 * self.rows as u32;
        if width > u16::MAX as u32 || height > u16::MAX as u32 {
            return Err(Error::InvalidGeometry(format!(
                "canvas {width}x{height} exceeds 16-bit addressing"
            )));
        }
        Ok(())
    }
}

impl Default for PanelGeometry {
    /// Four 64×64 panels in a 2×2 grid.
    fn default() -> Self {
        Self::new(crate::DEFAULT_PANEL_SIZE, crate::DEFAULT_PANEL_SIZE, 2, 2)
    }
}

/// One physical panel: where it sits logically, where it is in the chain,
/// and how it is mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PanelConfig {
    /// Index into the logical grid (row-major)
    pub logical_position: u8,
    /// Index along the data chain
    pub physical_position: u8,
    /// Mounting rotation
    #[cfg_attr(feature = "serde", serde(default))]
    pub rotation: Rotation,
}

impl PanelConfig {
    /// Create a table entry.
    pub const fn new(logical_position: u8, physical_position: u8, rotation: Rotation) -> Self {
        Self {
            logical_position,
            physical_position,
            rotation,
        }
    }
}

/// Explicit pixel origin of one chain position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PanelOffset {
    /// Chain position this origin belongs to
    pub physical_position: u8,
    /// Horizontal origin in physical pixels
    pub x: u16,
    /// Vertical origin in physical pixels
    pub y: u16,
}

/// How a chain position translates into a physical pixel origin.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", rename_all = "snake_case")
)]
pub enum PhysicalLayout {
    /// Row-major chain: position `p` sits at column `p % columns`, row `p / columns`.
    #[default]
    Chain,
    /// Irregular chains (e.g. an L-shaped run): one explicit origin per position.
    OffsetTable {
        /// Origins keyed by physical position
        offsets: Vec<PanelOffset>,
    },
}

impl PhysicalLayout {
    /// Pixel origin of a chain position, or `None` when an offset table lacks it.
    pub fn origin(&self, physical_position: u8, geometry: &PanelGeometry) -> Option<(u32, u32)> {
        match self {
            Self::Chain => {
                let p = physical_position as u32;
                let columns = geometry.columns as u32;
                Some((
                    (p % columns) * geometry.panel_width as u32,
                    (p / columns) * geometry.panel_height as u32,
                ))
            }
            Self::OffsetTable { offsets } => offsets
                .iter()
                .find(|o| o.physical_position == physical_position)
                .map(|o| (o.x as u32, o.y as u32)),
        }
    }
}
