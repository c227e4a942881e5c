use std::fmt;

use crate::error::Result;
use crate::grid::HeightGrid;
use crate::math;

/// Dimensions and plain min/max of a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSummary {
    pub width: usize,
    pub height: usize,
    /// `None` when the grid holds no cells
    pub min: Option<u32>,
    pub max: Option<u32>,
}

impl fmt::Display for GridSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "height grid info:")?;
        writeln!(f, "size_x = {} | size_y = {}", self.width, self.height)?;
        match (self.min, self.max) {
            (Some(min), Some(max)) => write!(f, "min = {} | max = {}", min, max),
            _ => write!(f, "min = - | max = - (no cells)"),
        }
    }
}

impl HeightGrid {
    /// Report dimensions and min/max to the log.
    ///
    /// Unlike rendering, this scan does not skip `UNKNOWN`: a grid with any
    /// unknown cell reports `u32::MAX` as its max.
    pub fn summary(&self) -> Result<GridSummary> {
        let range = math::plain_range(&self.storage("summary")?.cells);
        let summary = GridSummary {
            width: self.width(),
            height: self.height(),
            min: range.map(|(lo, _)| lo),
            max: range.map(|(_, hi)| hi),
        };

        for line in summary.to_string().lines() {
            log::info!("{}", line);
        }

        Ok(summary)
    }
}
