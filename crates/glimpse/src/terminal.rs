//! Terminal width detection.
//!
//! Width detection is typically handled automatically by the presentation
//! modes. Use [`set_width_detector`] to override detection for testing.
//!
//! ```rust
//! use glimpse::{set_width_detector, terminal_width, reset_width_detector};
//!
//! set_width_detector(|| Some(120));
//! assert_eq!(terminal_width(), 120);
//!
//! // No terminal: fall back to 80 columns
//! set_width_detector(|| None);
//! assert_eq!(terminal_width(), 80);
//!
//! reset_width_detector();
//! ```

use once_cell::sync::Lazy;
use std::sync::{Mutex, PoisonError};

/// Width used when no terminal is attached.
pub const DEFAULT_WIDTH: usize = 80;

type WidthDetector = fn() -> Option<usize>;

static WIDTH_DETECTOR: Lazy<Mutex<WidthDetector>> =
    Lazy::new(|| Mutex::new(default_width_detector));

/// Overrides the function used to detect the terminal width.
pub fn set_width_detector(detector: WidthDetector) {
    let mut guard = WIDTH_DETECTOR
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    *guard = detector;
}

/// Restores detection through the real terminal.
pub fn reset_width_detector() {
    set_width_detector(default_width_detector);
}

/// Current terminal width in columns, or [`DEFAULT_WIDTH`].
pub fn terminal_width() -> usize {
    let detector = *WIDTH_DETECTOR
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    detector().filter(|w| *w > 0).unwrap_or(DEFAULT_WIDTH)
}

fn default_width_detector() -> Option<usize> {
    terminal_size::terminal_size().map(|(w, _)| w.0 as usize)
}
