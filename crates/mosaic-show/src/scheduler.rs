//! Automaton rotation.
//!
//! The scheduler owns the single "current automaton" slot. When the slot is
//! empty or the running automaton has outlived its run duration, the old
//! instance is dropped, a new kind is drawn uniformly from the enabled set
//! (never the previous kind while an alternative exists), constructed and
//! initialized. Otherwise the current automaton is stepped once.

use std::time::{Duration, Instant};

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{info, warn};

use mosaic_automata::{Automaton, AutomatonKind, Canvas, Display};

use crate::{Error, Result, ShowConfig};

/// What one scheduler tick did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tick {
    /// A new automaton was installed; nothing was drawn this frame.
    Switched { kind: AutomatonKind, name: String },
    /// The current automaton advanced and presented one frame.
    Stepped,
    /// No automaton could be constructed; the next tick retries.
    Idle,
}

/// Picks, owns and steps the running automaton.
#[derive(Debug)]
pub struct Scheduler {
    width: usize,
    height: usize,
    enabled: Vec<AutomatonKind>,
    run_duration: Duration,
    current: Option<Automaton>,
    last_kind: Option<AutomatonKind>,
    switched_at: Option<Instant>,
    switches: u64,
    failures: u64,
}

impl Scheduler {
    /// Create an idle scheduler for a `width`×`height` canvas.
    ///
    /// Duplicate kinds in `enabled` are ignored.
    pub fn new(width: usize, height: usize, enabled: &[AutomatonKind], run_duration: Duration) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidConfig(format!("canvas {width}x{height} is empty")));
        }
        let mut kinds: Vec<AutomatonKind> = Vec::with_capacity(enabled.len());
        for kind in enabled {
            if !kinds.contains(kind) {
                kinds.push(*kind);
            }
        }
        if kinds.is_empty() {
            return Err(Error::InvalidConfig("no automata enabled".into()));
        }

        Ok(Self {
            width,
            height,
            enabled: kinds,
            run_duration,
            current: None,
            last_kind: None,
            switched_at: None,
            switches: 0,
            failures: 0,
        })
    }

    /// Scheduler sized to the configured canvas.
    pub fn from_config(config: &ShowConfig) -> Result<Self> {
        Self::new(
            config.geometry.canvas_width() as usize,
            config.geometry.canvas_height() as usize,
            &config.automata,
            config.run_duration(),
        )
    }

    /// Kinds eligible for the next switch.
    pub fn candidates(&self) -> Vec<AutomatonKind> {
        match self.last_kind {
            Some(last) if self.enabled.len() > 1 => self.enabled.iter().copied().filter(|k| *k != last).collect(),
            _ => self.enabled.clone(),
        }
    }

    /// Draw the next kind uniformly from [`candidates`](Self::candidates).
    pub fn select_next<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<AutomatonKind> {
        self.candidates().choose(rng).copied()
    }

    /// Whether the slot is empty or the current automaton has run its course.
    pub fn is_due(&self, now: Instant) -> bool {
        match (&self.current, self.switched_at) {
            (Some(_), Some(at)) => now.saturating_duration_since(at) > self.run_duration,
            _ => true,
        }
    }

    /// Replace the current automaton with a freshly initialized one.
    ///
    /// The old instance is dropped before anything new is allocated.
    /// Candidates that fail to construct are skipped in random order.
    /// Returns the new automaton's name, or `None` when every candidate
    /// failed and the slot was left empty.
    pub fn switch<R: Rng + ?Sized>(&mut self, now: Instant, rng: &mut R) -> Option<String> {
        self.current = None;

        let mut candidates = self.candidates();
        candidates.shuffle(rng);
        for kind in candidates {
            match self.install(kind, now, rng) {
                Ok(name) => return Some(name),
                Err(e) => {
                    self.failures += 1;
                    warn!(%kind, error = %e, "automaton construction failed");
                }
            }
        }

        // Nothing to repeat any more, so the retry may consider every kind.
        self.last_kind = None;
        self.switched_at = None;
        warn!(enabled = self.enabled.len(), "no automaton could be started");
        None
    }

    /// Replace the current automaton with one of a specific kind.
    pub fn switch_to<R: Rng + ?Sized>(&mut self, kind: AutomatonKind, now: Instant, rng: &mut R) -> Result<String> {
        self.current = None;
        self.install(kind, now, rng).map_err(|e| {
            self.failures += 1;
            self.switched_at = None;
            e
        })
    }

    fn install<R: Rng + ?Sized>(&mut self, kind: AutomatonKind, now: Instant, rng: &mut R) -> Result<String> {
        let mut automaton = Automaton::create(kind, self.width, self.height, rng)?;
        automaton.init(rng);
        let name = automaton.name();
        info!(%kind, name = %name, switch = self.switches + 1, "automaton started");

        self.current = Some(automaton);
        self.last_kind = Some(kind);
        self.switched_at = Some(now);
        self.switches += 1;
        Ok(name)
    }

    /// Run one frame: switch when due, otherwise step the current automaton.
    pub fn tick<R, D>(&mut self, now: Instant, rng: &mut R, canvas: &mut Canvas<'_, D>) -> Tick
    where
        R: Rng + ?Sized,
        D: Display + ?Sized,
    {
        if self.is_due(now) {
            return match self.switch(now, rng) {
                Some(name) => Tick::Switched {
                    kind: self.last_kind.unwrap_or(self.enabled[0]),
                    name,
                },
                None => Tick::Idle,
            };
        }
        match self.current.as_mut() {
            Some(automaton) => {
                automaton.step(rng, canvas);
                Tick::Stepped
            }
            None => Tick::Idle,
        }
    }

    pub fn current(&self) -> Option<&Automaton> {
        self.current.as_ref()
    }

    pub fn last_kind(&self) -> Option<AutomatonKind> {
        self.last_kind
    }

    pub fn enabled(&self) -> &[AutomatonKind] {
        &self.enabled
    }

    pub fn run_duration(&self) -> Duration {
        self.run_duration
    }

    /// Successful switches so far.
    pub fn switches(&self) -> u64 {
        self.switches
    }

    /// Constructions that failed so far.
    pub fn failures(&self) -> u64 {
        self.failures
    }

    pub fn canvas_size(&self) -> (usize, usize) {
        (self.width, self.height)
    }
}
