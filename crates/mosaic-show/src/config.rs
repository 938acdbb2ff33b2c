//! Show configuration.
//!
//! Loaded from an optional JSON file named by `MOSAIC_CONFIG`, then
//! overridden field by field from the environment.

use std::path::Path;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use mosaic_automata::AutomatonKind;
use mosaic_panel::{PanelConfig, PanelGeometry, PanelMapper, PhysicalLayout, QUAD_180_TABLE};

use crate::{Error, Result};

/// Environment variable naming a JSON config file.
pub const CONFIG_VAR: &str = "MOSAIC_CONFIG";

/// Terminal preview settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Draw frames to the terminal
    pub enabled: bool,
    /// Draw every n-th presented frame
    pub every: u32,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self { enabled: false, every: 4 }
    }
}

/// Everything the runner needs to start a show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowConfig {
    /// Panel size and grid
    pub geometry: PanelGeometry,
    /// One entry per physical panel
    pub panels: Vec<PanelConfig>,
    /// How chain positions become pixel origins
    pub layout: PhysicalLayout,
    /// Seconds each automaton runs before the next one takes over
    pub run_secs: u64,
    /// Milliseconds between frames
    pub frame_ms: u64,
    /// Kinds the scheduler may pick
    pub automata: Vec<AutomatonKind>,
    /// Fixed RNG seed; entropy when absent
    pub seed: Option<u64>,
    /// Frames the title overlay stays up after a switch (0 disables it)
    pub title_frames: u32,
    /// Run the calibration sequence before the first automaton
    pub calibrate: bool,
    /// Frames each static calibration pattern is held
    pub calibration_hold_frames: u32,
    /// Terminal preview
    pub preview: PreviewConfig,
    /// Stop after this many frames
    pub max_frames: Option<u64>,
}

impl Default for ShowConfig {
    fn default() -> Self {
        Self {
            geometry: PanelGeometry::default(),
            panels: QUAD_180_TABLE.to_vec(),
            layout: PhysicalLayout::Chain,
            run_secs: 30,
            frame_ms: 50,
            automata: AutomatonKind::ALL.to_vec(),
            seed: None,
            title_frames: 40,
            calibrate: false,
            calibration_hold_frames: 60,
            preview: PreviewConfig::default(),
            max_frames: None,
        }
    }
}

impl ShowConfig {
    /// Load the file named by `MOSAIC_CONFIG` (if set), then apply
    /// environment overrides and validate.
    pub fn from_env() -> Result<Self> {
        let mut config = match std::env::var(CONFIG_VAR) {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON config file. Missing fields take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Parse JSON text. Missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Apply `MOSAIC_*` overrides read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("MOSAIC_RUN_SECS") {
            self.run_secs = parse_var("MOSAIC_RUN_SECS", &v)?;
        }
        if let Some(v) = lookup("MOSAIC_FRAME_MS") {
            self.frame_ms = parse_var("MOSAIC_FRAME_MS", &v)?;
        }
        if let Some(v) = lookup("MOSAIC_SEED") {
            self.seed = Some(parse_var("MOSAIC_SEED", &v)?);
        }
        if let Some(v) = lookup("MOSAIC_CALIBRATE") {
            self.calibrate = parse_flag("MOSAIC_CALIBRATE", &v)?;
        }
        if let Some(v) = lookup("MOSAIC_PREVIEW") {
            self.preview.enabled = parse_flag("MOSAIC_PREVIEW", &v)?;
        }
        if let Some(v) = lookup("MOSAIC_MAX_FRAMES") {
            self.max_frames = Some(parse_var("MOSAIC_MAX_FRAMES", &v)?);
        }
        Ok(())
    }

    /// Check values that would make the show meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.frame_ms == 0 {
            return Err(Error::InvalidConfig("frame_ms must be at least 1".into()));
        }
        if self.run_secs == 0 {
            return Err(Error::InvalidConfig("run_secs must be at least 1".into()));
        }
        if self.automata.is_empty() {
            return Err(Error::InvalidConfig("no automata enabled".into()));
        }
        if self.preview.every == 0 {
            return Err(Error::InvalidConfig("preview.every must be at least 1".into()));
        }
        self.mapper()?;
        Ok(())
    }

    /// Build the panel mapper described by this config.
    pub fn mapper(&self) -> Result<PanelMapper> {
        Ok(PanelMapper::new(self.geometry, &self.panels, self.layout.clone())?)
    }

    pub fn run_duration(&self) -> Duration {
        Duration::from_secs(self.run_secs)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }

    /// Seeded RNG when a seed is configured, entropy otherwise.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, value: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| Error::InvalidConfig(format!("{key}={value}: {e}")))
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(Error::InvalidConfig(format!("{key}={value}: expected a boolean"))),
    }
}
