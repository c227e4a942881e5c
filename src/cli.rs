// cli.rs - Command-line interface configuration
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "height-grid")]
#[command(about = "Height grid viewer", long_about = None)]
pub struct Cli {
    /// Cells along x (rows of the rendered image)
    #[arg(long, default_value_t = 128)]
    pub width: usize,

    /// Cells along y (columns of the rendered image)
    #[arg(long, default_value_t = 128)]
    pub height: usize,

    /// Fill every cell with this value instead of generating a basin
    #[arg(long)]
    pub fill: Option<u32>,

    /// Share of the basin covered by unknown cells
    #[arg(long, default_value_t = 0.1)]
    pub unknown: f32,

    /// Window the grid is shown in
    #[arg(long = "window-name", default_value = "height grid")]
    pub window_name: String,

    /// Frames to show; 0 keeps going until the window is closed
    #[arg(long, default_value_t = 0)]
    pub frames: u64,

    /// Render into memory instead of opening a window
    #[arg(long = "headless", default_value = "false")]
    pub headless: bool,
}

impl Cli {
    /// Frame budget, if any. Runs without a window always stop, whether
    /// `--headless` was asked for or no display could be opened.
    pub fn frame_limit(&self, windowed: bool) -> Option<u64> {
        match (self.frames, windowed) {
            (0, false) => Some(1),
            (0, true) => None,
            (n, _) => Some(n),
        }
    }
}
