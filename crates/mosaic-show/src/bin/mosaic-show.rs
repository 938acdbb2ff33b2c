//! Mosaic Show binary
//!
//! Runs the automaton rotation headless, optionally previewing frames in a
//! 24-bit color terminal.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use crossterm::{
    cursor, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{BeginSynchronizedUpdate, Clear, ClearType, EndSynchronizedUpdate},
};

use mosaic_automata::{unpack_rgb565, Display, FrameBuffer, PackedColor};
use mosaic_show::{run_calibration, FrameLoop, LoopOptions, Overlay, PreviewConfig, Scheduler, ShowConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Title slot shared between the frame loop and the terminal preview.
#[derive(Debug, Clone, Default)]
struct SharedTitle(Rc<RefCell<Option<String>>>);

impl SharedTitle {
    fn get(&self) -> Option<String> {
        self.0.borrow().clone()
    }
}

impl Overlay for SharedTitle {
    fn show_title(&mut self, title: &str) {
        *self.0.borrow_mut() = Some(title.to_string());
    }

    fn hide_title(&mut self) {
        *self.0.borrow_mut() = None;
    }
}

/// Frame buffer that also paints every n-th presented frame to stdout
/// with half-block characters (two pixel rows per text line).
struct TerminalPreview {
    frame: FrameBuffer,
    settings: PreviewConfig,
    title: SharedTitle,
    cleared: bool,
}

impl TerminalPreview {
    fn new(frame: FrameBuffer, settings: PreviewConfig, title: SharedTitle) -> Self {
        Self {
            frame,
            settings,
            title,
            cleared: false,
        }
    }

    /// Queue the front buffer and title onto `out`.
    fn paint<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let (w, h) = (self.frame.width() as usize, self.frame.height() as usize);
        let front = self.frame.front();
        let color = |packed: PackedColor| {
            let (r, g, b) = unpack_rgb565(packed);
            Color::Rgb { r, g, b }
        };

        queue!(out, BeginSynchronizedUpdate, cursor::MoveTo(0, 0))?;
        for y in (0..h).step_by(2) {
            for x in 0..w {
                let top = color(front[y * w + x]);
                let bottom = if y + 1 < h { color(front[(y + 1) * w + x]) } else { Color::Black };
                queue!(out, SetForegroundColor(top), SetBackgroundColor(bottom), Print('\u{2580}'))?;
            }
            queue!(out, ResetColor, Print("\r\n"))?;
        }
        queue!(out, Clear(ClearType::CurrentLine))?;
        if let Some(title) = self.title.get() {
            queue!(out, Print(title))?;
        }
        queue!(out, EndSynchronizedUpdate)?;
        out.flush()
    }

    fn clear_once<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        if !self.cleared {
            queue!(out, Clear(ClearType::All))?;
            self.cleared = true;
        }
        Ok(())
    }

    fn draw(&mut self) {
        let mut stdout = io::stdout().lock();
        if let Err(e) = self.clear_once(&mut stdout).and_then(|()| self.paint(&mut stdout)) {
            tracing::debug!(error = %e, "preview write failed");
        }
    }
}

impl Display for TerminalPreview {
    fn width(&self) -> u16 {
        self.frame.width()
    }

    fn height(&self) -> u16 {
        self.frame.height()
    }

    fn set_pixel(&mut self, x: u16, y: u16, color: PackedColor) {
        self.frame.set_pixel(x, y, color);
    }

    fn present(&mut self) {
        self.frame.present();
        if self.settings.enabled && self.frame.presents() % self.settings.every.max(1) as u64 == 0 {
            self.draw();
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mosaic_show=info,mosaic_automata=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ShowConfig::from_env()?;
    let mapper = config.mapper()?;
    let (physical_width, physical_height) = mapper.physical_extent();

    tracing::info!(
        width = mapper.width(),
        height = mapper.height(),
        panels = config.panels.len(),
        run_secs = config.run_secs,
        frame_ms = config.frame_ms,
        seed = ?config.seed,
        "Starting Mosaic Show"
    );

    let mut rng = config.rng();
    let title = SharedTitle::default();
    let mut display = TerminalPreview::new(
        FrameBuffer::new(physical_width, physical_height),
        config.preview.clone(),
        title.clone(),
    );
    let mut scheduler = Scheduler::from_config(&config)?;
    let mut frame_loop = FrameLoop::new(LoopOptions::from_config(&config), title);

    tokio::select! {
        _ = async {
            if config.calibrate {
                run_calibration(&mut display, &mapper, config.calibration_hold_frames, config.frame_interval()).await;
            }
            frame_loop.run(&mut scheduler, &mut display, &mapper, &mut rng).await;
        } => {}
        result = tokio::signal::ctrl_c() => {
            result?;
            tracing::info!("Interrupted");
        }
    }

    let stats = frame_loop.stats();
    tracing::info!(
        frames = stats.frames,
        switches = stats.switches,
        failures = scheduler.failures(),
        mean_frame_us = stats.mean_frame_time().as_micros() as u64,
        "Show stopped"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mosaic_automata::pack_rgb565;

    #[test]
    fn preview_packs_two_rows_per_line() {
        let mut preview = TerminalPreview::new(FrameBuffer::new(2, 3), PreviewConfig::default(), SharedTitle::default());
        preview.set_pixel(0, 0, pack_rgb565(255, 0, 0));
        preview.set_pixel(0, 1, pack_rgb565(0, 0, 255));
        preview.present();

        let mut out = Vec::new();
        preview.paint(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches('\u{2580}').count(), 4);
        assert!(text.contains("\x1b[38;2;255;0;0m\x1b[48;2;0;0;255m\u{2580}"));
    }

    #[test]
    fn title_follows_overlay() {
        let mut title = SharedTitle::default();
        let preview = TerminalPreview::new(FrameBuffer::new(2, 2), PreviewConfig::default(), title.clone());
        let painted = |preview: &TerminalPreview| {
            let mut out = Vec::new();
            preview.paint(&mut out).unwrap();
            String::from_utf8(out).unwrap()
        };

        title.show_title("Brian's Brain");
        assert!(painted(&preview).contains("Brian's Brain"));
        title.hide_title();
        assert!(!painted(&preview).contains("Brian's Brain"));
    }
}
