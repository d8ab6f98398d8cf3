//! Busy indicator wrapper.
//!
//! Thin shell over an indicatif spinner. The spinner owns its own animation
//! thread; this wrapper only flips visibility and text, which is all the
//! lifecycle controller ever asks of it. Cloning shares the underlying
//! spinner, so the signal listener can hide the same indicator the merge
//! loop drives.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget};

/// Spinner animation tick interval.
const TICK_INTERVAL: Duration = Duration::from_millis(120);

/// Shared busy indicator.
#[derive(Clone)]
pub struct Indicator {
    bar: ProgressBar,
}

impl Indicator {
    /// Create an indicator, initially hidden, drawing to stderr when shown.
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_draw_target(ProgressDrawTarget::hidden());
        Self { bar }
    }

    /// Show the spinner with the given text. Re-showing is a no-op churn.
    pub fn show(&self, text: &'static str) {
        if self.bar.is_hidden() {
            self.bar.set_draw_target(ProgressDrawTarget::stderr());
            self.bar.enable_steady_tick(TICK_INTERVAL);
        }
        self.bar.set_message(text);
    }

    /// Hide the spinner.
    pub fn hide(&self) {
        if !self.bar.is_hidden() {
            self.bar.disable_steady_tick();
            self.bar.set_draw_target(ProgressDrawTarget::hidden());
        }
    }

    /// Whether the spinner is currently drawn.
    pub fn visible(&self) -> bool {
        !self.bar.is_hidden()
    }

    /// Stop the spinner and leave a final status line on screen.
    pub fn finish(&self, message: &'static str) {
        self.bar.set_draw_target(ProgressDrawTarget::stderr());
        self.bar.finish_with_message(message);
    }
}

impl Default for Indicator {
    fn default() -> Self {
        Self::new()
    }
}
