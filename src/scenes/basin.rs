use glam::Vec2;
use std::f32::consts::{PI, TAU};

use crate::error::Result;
use crate::grid::{HeightGrid, UNKNOWN};

/// Concentric ripples around a drifting center, with a disk of `UNKNOWN`
/// cells standing in for an unexplored area
#[derive(Debug, Clone, Copy)]
pub struct BasinScene {
    /// Lowest height written
    pub base: u32,
    /// Peak-to-trough height of the ripples
    pub amplitude: u32,
    /// Ripple wavelength in cells
    pub wavelength: f32,
    /// Share of the grid area covered by the unknown disk
    pub unknown_fraction: f32,
}

impl Default for BasinScene {
    fn default() -> Self {
        Self {
            base: 1000,
            amplitude: 500,
            wavelength: 24.0,
            unknown_fraction: 0.1,
        }
    }
}

impl BasinScene {
    /// Overwrite every cell of `grid` with the scene at `time` seconds
    pub fn write(&self, grid: &mut HeightGrid, time: f32) -> Result<()> {
        let (width, height) = (grid.width(), grid.height());
        let cells = grid.cells_mut()?;
        if cells.is_empty() {
            return Ok(());
        }

        let extent = Vec2::new(width as f32, height as f32);
        let drift = Vec2::new(time.cos(), time.sin()) * extent.min_element() * 0.15;
        let center = extent * 0.5 + drift;

        let hole_center = extent * Vec2::new(0.8, 0.2);
        let hole_area = self.unknown_fraction.clamp(0.0, 1.0) * extent.x * extent.y;
        let hole_radius = (hole_area / PI).sqrt();
        let wavelength = self.wavelength.max(f32::EPSILON);

        for (x, column) in cells.chunks_mut(height).enumerate() {
            for (y, cell) in column.iter_mut().enumerate() {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);

                *cell = if p.distance(hole_center) < hole_radius {
                    UNKNOWN
                } else {
                    let phase = p.distance(center) / wavelength * TAU - time;
                    let wave = phase.sin() * 0.5 + 0.5;
                    self.base.saturating_add((wave * self.amplitude as f32) as u32)
                };
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::HeightRange;

    #[test]
    fn test_basin_without_hole_has_no_unknown() {
        let mut grid = HeightGrid::with_size(32, 24).unwrap();
        let scene = BasinScene {
            unknown_fraction: 0.0,
            ..Default::default()
        };
        scene.write(&mut grid, 0.0).unwrap();

        let cells = grid.cells().unwrap();
        assert!(cells.iter().all(|&v| v != UNKNOWN));
        assert!(cells.iter().all(|&v| (1000..=1500).contains(&v)));
    }

    #[test]
    fn test_basin_hole_marks_unknown() {
        let mut grid = HeightGrid::with_size(64, 64).unwrap();
        BasinScene::default().write(&mut grid, 0.0).unwrap();

        let unknown = grid.cells().unwrap().iter().filter(|&&v| v == UNKNOWN).count();
        let share = unknown as f32 / grid.len() as f32;
        assert!(share > 0.05 && share < 0.15, "unknown share {}", share);
        assert!(matches!(grid.known_range().unwrap(), HeightRange::Span { .. }));
    }

    #[test]
    fn test_basin_on_empty_grid() {
        let mut grid = HeightGrid::with_size(0, 0).unwrap();
        assert!(BasinScene::default().write(&mut grid, 1.0).is_ok());

        let mut unallocated = HeightGrid::new();
        assert!(BasinScene::default().write(&mut unallocated, 1.0).is_err());
    }
}
