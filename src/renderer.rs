use std::time::Duration;

use crate::display::GrayFrame;
use crate::error::Result;
use crate::grid::HeightGrid;
use crate::math;
use crate::traits::DisplaySink;

/// How long the sink is allowed to refresh after each frame
pub const DISPLAY_POLL_INTERVAL: Duration = Duration::from_millis(10);

impl HeightGrid {
    /// Rebuild the render buffer from the current cells.
    ///
    /// Known heights are stretched linearly onto 0..=255 using the range of
    /// non-`UNKNOWN` cells. Unknown cells, and every cell of an empty or flat
    /// range, render as 0. Cells are never modified.
    pub fn render(&mut self) -> Result<&[u8]> {
        let storage = self.storage_mut("render")?;
        let range = math::normalize_into(&storage.cells, &mut storage.render);
        log::debug!("rendered {} cells, range {:?}", storage.cells.len(), range);
        Ok(storage.render.as_slice())
    }

    /// Most recently rendered buffer as an image of `width` rows and
    /// `height` columns
    pub fn frame(&self) -> Result<GrayFrame<'_>> {
        let storage = self.storage("frame")?;
        Ok(GrayFrame::new(self.width(), self.height(), &storage.render))
    }

    /// Render and hand the frame to `sink` under `window_name`, then let the
    /// sink refresh for [`DISPLAY_POLL_INTERVAL`].
    ///
    /// Sink failures are logged and swallowed; only grid state errors
    /// propagate.
    pub fn display(&mut self, sink: &mut dyn DisplaySink, window_name: &str) -> Result<()> {
        self.render()?;
        let frame = self.frame()?;

        if let Err(e) = sink.show(window_name, &frame) {
            log::warn!("failed to show '{}': {}", window_name, e);
        }
        if let Err(e) = sink.poll(DISPLAY_POLL_INTERVAL) {
            log::warn!("display poll failed: {}", e);
        }

        Ok(())
    }
}
