use anyhow::{Context, Result};
use clap::Parser;
use std::time::Instant;

use height_grid::cli::Cli;
use height_grid::display::RecordingSink;
use height_grid::scenes::BasinScene;
use height_grid::traits::DisplaySink;
use height_grid::HeightGrid;

/// Open the display sink, and report whether it shows real windows
fn open_sink(cli: &Cli) -> (Box<dyn DisplaySink>, bool) {
    if cli.headless {
        return (Box::new(RecordingSink::new()), false);
    }

    #[cfg(any(target_os = "windows", target_os = "macos", target_os = "linux"))]
    match height_grid::core::WindowSink::new() {
        Ok(sink) => return (Box::new(sink), true),
        Err(e) => log::warn!("no display available ({}), running headless", e),
    }

    (Box::new(RecordingSink::new()), false)
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut grid = HeightGrid::with_size(cli.width, cli.height)
        .with_context(|| format!("failed to allocate {}x{} grid", cli.width, cli.height))?;

    let scene = BasinScene {
        unknown_fraction: cli.unknown,
        ..Default::default()
    };
    match cli.fill {
        Some(value) => grid.fill(value)?,
        None => scene.write(&mut grid, 0.0)?,
    }

    println!("{}", grid.summary()?);

    let (mut sink, windowed) = open_sink(&cli);
    let limit = cli.frame_limit(windowed);
    let start = Instant::now();
    let mut shown = 0u64;

    while limit.map_or(true, |n| shown < n) && sink.is_open(&cli.window_name) {
        if cli.fill.is_none() {
            scene.write(&mut grid, start.elapsed().as_secs_f32())?;
        }
        grid.display(sink.as_mut(), &cli.window_name)
            .context("failed to display grid")?;
        shown += 1;
    }

    println!("Shown {} frames in {:.2}s", shown, start.elapsed().as_secs_f32());
    println!("{}", grid.summary()?);

    Ok(())
}
