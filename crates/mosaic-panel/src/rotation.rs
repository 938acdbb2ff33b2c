//! Panel mounting rotation.
//!
//! A panel mounted upside down or sideways still scans its pixels in its own
//! native order, so local coordinates must be rotated before they reach the
//! chain. Rotations are clockwise quarter turns.

use crate::{Error, Pixel, ROTATION_COUNT};

/// Clockwise mounting rotation of a single panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u16", into = "u16")
)]
pub enum Rotation {
    /// Mounted upright
    #[default]
    Deg0,
    /// 90° clockwise
    Deg90,
    /// Upside down
    Deg180,
    /// 270° clockwise
    Deg270,
}

impl Rotation {
    /// All rotations in quarter-turn order.
    pub const ALL: [Self; ROTATION_COUNT as usize] =
        [Self::Deg0, Self::Deg90, Self::Deg180, Self::Deg270];

    /// Build from a number of clockwise quarter turns (0-3).
    pub fn from_quarter_turns(turns: u8) -> Result<Self, Error> {
        Self::ALL
            .get(turns as usize)
            .copied()
            .ok_or(Error::InvalidRotation(turns as u16))
    }

    /// Number of clockwise quarter turns.
    pub const fn quarter_turns(&self) -> u8 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 1,
            Self::Deg180 => 2,
            Self::Deg270 => 3,
        }
    }

    /// Rotation in degrees.
    pub const fn degrees(&self) -> u16 {
        self.quarter_turns() as u16 * 90
    }

    /// The rotation obtained by applying `self` and then `other`.
    pub fn then(self, other: Self) -> Self {
        Self::ALL[((self.quarter_turns() + other.quarter_turns()) % ROTATION_COUNT) as usize]
    }

    /// Whether the rotation swaps the panel's axes (90° and 270°).
    pub const fn is_sideways(&self) -> bool {
        matches!(self, Self::Deg90 | Self::Deg270)
    }

    /// Rotate a panel-local coordinate.
    ///
    /// Sideways rotations require a square panel; [`PanelMapper`](crate::PanelMapper)
    /// rejects tables that combine them with non-square panels.
    #[inline]
    pub fn apply(&self, local: Pixel, panel_width: u16, panel_height: u16) -> Pixel {
        match self {
            Self::Deg0 => local,
            Self::Deg90 => Pixel::new(panel_width - 1 - local.y, local.x),
            Self::Deg180 => Pixel::new(panel_width - 1 - local.x, panel_height - 1 - local.y),
            Self::Deg270 => Pixel::new(local.y, panel_height - 1 - local.x),
        }
    }
}

impl TryFrom<u16> for Rotation {
    type Error = Error;

    /// Parse a rotation given in degrees.
    fn try_from(degrees: u16) -> Result<Self, Error> {
        match degrees {
            0 => Ok(Self::Deg0),
            90 => Ok(Self::Deg90),
            180 => Ok(Self::Deg180),
            270 => Ok(Self::Deg270),
            other => Err(Error::InvalidRotation(other)),
        }
    }
}

impl From<Rotation> for u16 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

impl std::fmt::Display for Rotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}
