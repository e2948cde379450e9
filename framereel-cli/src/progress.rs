// ============================================================================
// framereel-cli/src/progress.rs
// ============================================================================
//
// PROGRESS REPORTING: Terminal progress bar for the batch loop
//
// Implements the core ProgressReporter trait. On a terminal, each prefix gets
// an indicatif line redrawn in place that shows the core's own bar text, so
// the cells and counter follow FrameProgress exactly. Otherwise the same text
// is logged at debug level.
//
// The bar being drawn is registered globally so the log writers can clear it
// before printing a record and redraw it afterwards.

use framereel_core::progress::{FrameProgress, ProgressReporter};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::Mutex;

/// Bar currently drawn on stderr, if any.
static ACTIVE_BAR: Mutex<Option<ProgressBar>> = Mutex::new(None);

fn set_active_bar(bar: Option<ProgressBar>) {
    if let Ok(mut active) = ACTIVE_BAR.lock() {
        *active = bar;
    }
}

/// Runs `f` with the active bar (if any) hidden, then redraws the bar.
///
/// Everything that writes to stderr while a batch is running goes through
/// here.
pub fn suspend_bar<R>(f: impl FnOnce() -> R) -> R {
    let bar = ACTIVE_BAR.lock().ok().and_then(|active| active.clone());
    match bar {
        Some(bar) => bar.suspend(f),
        None => f(),
    }
}

/// Progress reporter for interactive and non-interactive runs.
pub struct TerminalProgress {
    interactive: bool,
    bar: Option<ProgressBar>,
}

impl TerminalProgress {
    /// Draws bars only when stderr is a terminal.
    pub fn new() -> Self {
        Self::with_interactive(console::Term::stderr().is_term())
    }

    pub fn with_interactive(interactive: bool) -> Self {
        Self {
            interactive,
            bar: None,
        }
    }

    fn style() -> ProgressStyle {
        ProgressStyle::with_template("{prefix} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
    }
}

impl Default for TerminalProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for TerminalProgress {
    fn on_prefix_start(&mut self, prefix: &str, frames: u64) {
        if !self.interactive {
            return;
        }
        // Counter runs 0..=end-start, one less than the frame count.
        let bar = ProgressBar::with_draw_target(
            Some(frames.saturating_sub(1)),
            ProgressDrawTarget::stderr(),
        );
        bar.set_style(Self::style());
        bar.set_prefix(prefix.to_string());
        set_active_bar(Some(bar.clone()));
        self.bar = Some(bar);
    }

    fn on_frame(&mut self, progress: &FrameProgress) {
        match &self.bar {
            Some(bar) => {
                bar.set_length(u64::from(progress.total()));
                bar.set_position(u64::from(progress.done()));
                bar.set_message(progress.bar_line());
            }
            None => log::debug!("{} {}", progress.prefix, progress.bar_line()),
        }
    }

    fn on_prefix_done(&mut self, _prefix: &str) {
        if let Some(bar) = self.bar.take() {
            set_active_bar(None);
            bar.finish();
        }
    }
}
