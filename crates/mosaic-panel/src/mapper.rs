//! Logical-to-physical pixel mapping.

use std::collections::HashSet;

use crate::{Error, PanelConfig, PanelGeometry, PhysicalLayout, Pixel, Result, Rotation};

/// Panel table of the 2×2 installation used by [`PanelMapper::quad_180`].
pub const QUAD_180_TABLE: [PanelConfig; 4] = [
    PanelConfig::new(0, 1, Rotation::Deg180),
    PanelConfig::new(1, 2, Rotation::Deg180),
    PanelConfig::new(2, 0, Rotation::Deg180),
    PanelConfig::new(3, 3, Rotation::Deg180),
];

/// A validated panel table entry with its resolved physical origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    config: PanelConfig,
    origin: Pixel,
}

/// Translates logical canvas pixels into physical chain pixels.
///
/// Immutable once built. All validation happens in [`PanelMapper::new`];
/// [`PanelMapper::map`] is a total function over the canvas and never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelMapper {
    geometry: PanelGeometry,
    layout: PhysicalLayout,
    entries: Vec<Entry>,
    /// Entry index per logical panel, 0 where the table has no entry.
    routes: Vec<usize>,
}

impl PanelMapper {
    /// Build a mapper from a geometry, a panel table and a physical layout.
    pub fn new(geometry: PanelGeometry, panels: &[PanelConfig], layout: PhysicalLayout) -> Result<Self> {
        geometry.validate()?;
        if panels.is_empty() {
            return Err(Error::EmptyTable);
        }

        let mut logical_seen = HashSet::new();
        let mut physical_seen = HashSet::new();
        let mut entries = Vec::with_capacity(panels.len());

        for config in panels {
            if !logical_seen.insert(config.logical_position) {
                return Err(Error::DuplicateLogical(config.logical_position));
            }
            if !physical_seen.insert(config.physical_position) {
                return Err(Error::DuplicatePhysical(config.physical_position));
            }
            if config.rotation.is_sideways() && geometry.panel_width != geometry.panel_height {
                return Err(Error::InvalidGeometry(format!(
                    "logical panel {} rotated {} on non-square {}x{} panels",
                    config.logical_position, config.rotation, geometry.panel_width, geometry.panel_height
                )));
            }

            let (x, y) = layout
                .origin(config.physical_position, &geometry)
                .ok_or(Error::MissingOffset(config.physical_position))?;
            if x + geometry.panel_width as u32 > u16::MAX as u32
                || y + geometry.panel_height as u32 > u16::MAX as u32
            {
                return Err(Error::InvalidGeometry(format!(
                    "physical position {} lands outside 16-bit addressing",
                    config.physical_position
                )));
            }

            entries.push(Entry {
                config: *config,
                origin: Pixel::new(x as u16, y as u16),
            });
        }

        let routes = (0..geometry.panel_count())
            .map(|logical| {
                entries
                    .iter()
                    .position(|e| e.config.logical_position as usize == logical)
                    .unwrap_or(0)
            })
            .collect();

        Ok(Self {
            geometry,
            layout,
            entries,
            routes,
        })
    }

    /// Mapper that leaves every pixel where it is.
    pub fn identity(geometry: PanelGeometry) -> Result<Self> {
        let count = geometry.panel_count();
        if count > u8::MAX as usize + 1 {
            return Err(Error::InvalidGeometry(format!("{count} panels exceed the 8-bit table index")));
        }
        let panels: Vec<_> = (0..count)
            .map(|p| PanelConfig::new(p as u8, p as u8, Rotation::Deg0))
            .collect();
        Self::new(geometry, &panels, PhysicalLayout::Chain)
    }

    /// The 2×2 installation: chain runs bottom-left, top-left, top-right,
    /// bottom-right, and every panel hangs upside down.
    pub fn quad_180(panel_width: u16, panel_height: u16) -> Result<Self> {
        let geometry = PanelGeometry::new(panel_width, panel_height, 2, 2);
        Self::new(geometry, &QUAD_180_TABLE, PhysicalLayout::Chain)
    }

    /// Canvas and panel dimensions.
    pub fn geometry(&self) -> &PanelGeometry {
        &self.geometry
    }

    /// Physical layout in use.
    pub fn layout(&self) -> &PhysicalLayout {
        &self.layout
    }

    /// Logical canvas width.
    pub fn width(&self) -> u16 {
        self.geometry.canvas_width()
    }

    /// Logical canvas height.
    pub fn height(&self) -> u16 {
        self.geometry.canvas_height()
    }

    /// The validated panel table, in configuration order.
    pub fn panels(&self) -> Vec<PanelConfig> {
        self.entries.iter().map(|e| e.config).collect()
    }

    /// Find the entry for a logical panel by linear scan.
    ///
    /// Returns `None` on a miss; [`map`](Self::map) substitutes the first entry.
    pub fn lookup(&self, logical_panel: usize) -> Option<&PanelConfig> {
        self.entries
            .iter()
            .map(|e| &e.config)
            .find(|c| c.logical_position as usize == logical_panel)
    }

    /// Smallest physical frame (width, height) that holds every panel.
    pub fn physical_extent(&self) -> (u16, u16) {
        self.entries.iter().fold((0, 0), |(w, h), e| {
            (
                w.max(e.origin.x + self.geometry.panel_width),
                h.max(e.origin.y + self.geometry.panel_height),
            )
        })
    }

    /// Map a logical pixel to its physical position.
    ///
    /// Inputs outside the canvas are the caller's responsibility.
    #[inline]
    pub fn map(&self, x: u16, y: u16) -> Pixel {
        let g = &self.geometry;
        let panel_col = (x / g.panel_width) as usize;
        let panel_row = (y / g.panel_height) as usize;
        let logical_panel = panel_row * g.columns as usize + panel_col;
        let local = Pixel::new(x % g.panel_width, y % g.panel_height);

        let entry = &self.entries[self.routes.get(logical_panel).copied().unwrap_or(0)];
        let rotated = entry.config.rotation.apply(local, g.panel_width, g.panel_height);

        Pixel::new(entry.origin.x + rotated.x, entry.origin.y + rotated.y)
    }
}
