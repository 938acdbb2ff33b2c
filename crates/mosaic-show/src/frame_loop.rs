//! The frame loop.
//!
//! One cooperative loop drives everything: tick the scheduler, keep the
//! title overlay in sync, sleep for the frame interval. `tokio::time::sleep`
//! is the only suspension point, so the loop can be cancelled between
//! frames by dropping its future.

use std::time::{Duration, Instant};

use rand::Rng;
use tracing::{debug, info};

use mosaic_automata::{Canvas, Display};
use mosaic_panel::PanelMapper;

use crate::scheduler::{Scheduler, Tick};
use crate::ShowConfig;

/// Frames between periodic statistics log lines.
pub const STATS_EVERY: u64 = 600;

/// Receives the title of each newly started automaton.
pub trait Overlay {
    /// Show `title` on top of subsequent frames.
    fn show_title(&mut self, title: &str);

    /// Remove the title.
    fn hide_title(&mut self);
}

/// Overlay that ignores titles.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOverlay;

impl Overlay for NoOverlay {
    fn show_title(&mut self, _title: &str) {}

    fn hide_title(&mut self) {}
}

/// Loop timing and limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopOptions {
    /// Sleep between frames
    pub frame_interval: Duration,
    /// Frames a title stays up after a switch (0 disables titles)
    pub title_frames: u32,
    /// Stop after this many frames
    pub max_frames: Option<u64>,
    /// Log statistics every this many frames (0 disables)
    pub stats_every: u64,
}

impl LoopOptions {
    pub fn from_config(config: &ShowConfig) -> Self {
        Self {
            frame_interval: config.frame_interval(),
            title_frames: config.title_frames,
            max_frames: config.max_frames,
            stats_every: STATS_EVERY,
        }
    }
}

impl Default for LoopOptions {
    fn default() -> Self {
        Self::from_config(&ShowConfig::default())
    }
}

/// Counters collected by the frame loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    /// Loop iterations
    pub frames: u64,
    /// Frames that stepped an automaton
    pub stepped: u64,
    /// Frames that installed a new automaton
    pub switches: u64,
    /// Frames with an empty slot
    pub idle: u64,
    /// Time spent inside frames, excluding sleeps
    pub busy: Duration,
}

impl LoopStats {
    /// Mean time per frame spent working.
    pub fn mean_frame_time(&self) -> Duration {
        match u32::try_from(self.frames) {
            Ok(0) => Duration::ZERO,
            Ok(n) => self.busy / n,
            Err(_) => Duration::ZERO,
        }
    }
}

/// Drives a [`Scheduler`] against a display.
#[derive(Debug)]
pub struct FrameLoop<O> {
    options: LoopOptions,
    overlay: O,
    title_remaining: u32,
    stats: LoopStats,
}

impl<O: Overlay> FrameLoop<O> {
    pub fn new(options: LoopOptions, overlay: O) -> Self {
        Self {
            options,
            overlay,
            title_remaining: 0,
            stats: LoopStats::default(),
        }
    }

    /// Run one frame at `now` without sleeping.
    pub fn frame<R, D>(
        &mut self,
        now: Instant,
        scheduler: &mut Scheduler,
        display: &mut D,
        mapper: &PanelMapper,
        rng: &mut R,
    ) -> Tick
    where
        R: Rng + ?Sized,
        D: Display + ?Sized,
    {
        let started = Instant::now();
        let tick = {
            let mut canvas = Canvas::new(display, mapper);
            scheduler.tick(now, rng, &mut canvas)
        };

        match &tick {
            Tick::Switched { kind, name } => {
                self.stats.switches += 1;
                info!(%kind, title = %name, "now showing");
                if self.options.title_frames > 0 {
                    self.overlay.show_title(name);
                    self.title_remaining = self.options.title_frames;
                } else if self.title_remaining > 0 {
                    self.overlay.hide_title();
                    self.title_remaining = 0;
                }
            }
            Tick::Stepped => {
                self.stats.stepped += 1;
                if self.title_remaining > 0 {
                    self.title_remaining -= 1;
                    if self.title_remaining == 0 {
                        self.overlay.hide_title();
                    }
                }
            }
            Tick::Idle => {
                self.stats.idle += 1;
                debug!("frame skipped, no automaton running");
            }
        }

        self.stats.frames += 1;
        self.stats.busy += started.elapsed();

        if self.options.stats_every > 0 && self.stats.frames % self.options.stats_every == 0 {
            info!(
                frames = self.stats.frames,
                switches = self.stats.switches,
                idle = self.stats.idle,
                failures = scheduler.failures(),
                mean_frame_us = self.stats.mean_frame_time().as_micros() as u64,
                "frame statistics"
            );
        }
        tick
    }

    /// Run frames until the frame limit is reached (forever without one).
    pub async fn run<R, D>(&mut self, scheduler: &mut Scheduler, display: &mut D, mapper: &PanelMapper, rng: &mut R)
    where
        R: Rng + ?Sized,
        D: Display + ?Sized,
    {
        while !self.finished() {
            self.frame(Instant::now(), scheduler, display, mapper, rng);
            tokio::time::sleep(self.options.frame_interval).await;
        }
        info!(frames = self.stats.frames, switches = self.stats.switches, "frame limit reached");
    }

    /// Whether the frame limit has been reached.
    pub fn finished(&self) -> bool {
        self.options.max_frames.is_some_and(|max| self.stats.frames >= max)
    }

    pub fn stats(&self) -> LoopStats {
        self.stats
    }

    pub fn options(&self) -> &LoopOptions {
        &self.options
    }

    pub fn overlay(&self) -> &O {
        &self.overlay
    }

    /// Frames left before the current title is hidden.
    pub fn title_remaining(&self) -> u32 {
        self.title_remaining
    }
}
