use std::time::Duration;

use crate::display::GrayFrame;

/// Display sink - shows 8-bit single-channel frames under a window name
pub trait DisplaySink {
    /// Present a frame in the named window, creating the window if needed
    fn show(&mut self, window_name: &str, frame: &GrayFrame<'_>)
        -> Result<(), Box<dyn std::error::Error>>;

    /// Give the backend a chance to refresh, returning after at most `timeout`
    fn poll(&mut self, timeout: Duration) -> Result<(), Box<dyn std::error::Error>>;

    /// Whether the named window is still open. Sinks without windows stay open.
    fn is_open(&self, _window_name: &str) -> bool {
        true
    }
}
