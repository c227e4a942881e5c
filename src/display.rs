use std::collections::{HashMap, HashSet};
use std::time::Duration;

use crate::traits::DisplaySink;

/// Borrowed 8-bit single-channel image, row-major, `len = rows * cols`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrayFrame<'a> {
    pub rows: usize,
    pub cols: usize,
    pub pixels: &'a [u8],
}

impl<'a> GrayFrame<'a> {
    pub fn new(rows: usize, cols: usize, pixels: &'a [u8]) -> Self {
        debug_assert_eq!(pixels.len(), rows * cols);
        Self { rows, cols, pixels }
    }

    /// Total number of pixels
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Pixels of row `r`
    pub fn row(&self, r: usize) -> Option<&'a [u8]> {
        if r >= self.rows {
            return None;
        }
        let start = r * self.cols;
        self.pixels.get(start..start + self.cols)
    }
}

/// Owned copy of the last frame shown in a window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedFrame {
    pub rows: usize,
    pub cols: usize,
    pub pixels: Vec<u8>,
}

/// In-memory sink that keeps the latest frame per window.
///
/// Used for headless runs and in tests in place of a real window.
#[derive(Debug, Default)]
pub struct RecordingSink {
    frames: HashMap<String, RecordedFrame>,
    closed: HashSet<String>,
    show_count: usize,
    poll_count: usize,
    polled: Duration,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest frame shown under `window_name`
    pub fn frame(&self, window_name: &str) -> Option<&RecordedFrame> {
        self.frames.get(window_name)
    }

    pub fn window_names(&self) -> impl Iterator<Item = &str> {
        self.frames.keys().map(String::as_str)
    }

    pub fn show_count(&self) -> usize {
        self.show_count
    }

    pub fn poll_count(&self) -> usize {
        self.poll_count
    }

    /// Sum of all poll timeouts requested so far
    pub fn polled(&self) -> Duration {
        self.polled
    }

    /// Mark a window as closed, as if the user dismissed it
    pub fn close(&mut self, window_name: &str) {
        self.closed.insert(window_name.to_string());
    }
}

impl DisplaySink for RecordingSink {
    fn show(
        &mut self,
        window_name: &str,
        frame: &GrayFrame<'_>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if self.closed.contains(window_name) {
            return Err(format!("window '{}' is closed", window_name).into());
        }

        self.show_count += 1;
        self.frames.insert(
            window_name.to_string(),
            RecordedFrame {
                rows: frame.rows,
                cols: frame.cols,
                pixels: frame.pixels.to_vec(),
            },
        );
        Ok(())
    }

    fn poll(&mut self, timeout: Duration) -> Result<(), Box<dyn std::error::Error>> {
        self.poll_count += 1;
        self.polled += timeout;
        Ok(())
    }

    fn is_open(&self, window_name: &str) -> bool {
        !self.closed.contains(window_name)
    }
}
