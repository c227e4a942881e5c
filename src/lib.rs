pub mod cli;
pub mod core;
pub mod diagnostics;
pub mod display;
pub mod error;
pub mod grid;
pub mod math;
pub mod renderer;
pub mod scenes;
pub mod traits;

pub use diagnostics::GridSummary;
pub use display::{GrayFrame, RecordingSink};
pub use error::{HeightGridError, Result};
pub use grid::{HeightGrid, UNKNOWN};
pub use math::HeightRange;
pub use renderer::DISPLAY_POLL_INTERVAL;
