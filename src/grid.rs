use std::fmt;

use crate::error::{HeightGridError, Result};
use crate::math::{self, HeightRange};

/// Cell value meaning "no data at this cell"
pub const UNKNOWN: u32 = u32::MAX;

/// Cell and render buffers, allocated and released together
#[derive(Clone)]
pub(crate) struct Storage {
    pub(crate) cells: Vec<u32>,
    pub(crate) render: Vec<u8>,
}

impl Storage {
    /// Allocate both buffers for `width * height` cells.
    ///
    /// Fresh cells hold `UNKNOWN` and fresh render bytes hold 0.
    fn allocate(width: usize, height: usize) -> Result<Self> {
        let count = width
            .checked_mul(height)
            .ok_or_else(|| HeightGridError::overflow(width, height))?;

        let mut cells = Vec::new();
        cells
            .try_reserve_exact(count)
            .map_err(|e| HeightGridError::reserve(width, height, e))?;
        cells.resize(count, UNKNOWN);

        let mut render = Vec::new();
        render
            .try_reserve_exact(count)
            .map_err(|e| HeightGridError::reserve(width, height, e))?;
        render.resize(count, 0);

        Ok(Self { cells, render })
    }
}

/// Fixed-size 2D grid of `u32` heights with a grayscale render buffer.
///
/// Cells are stored with x as the major index: `index(x, y) = x * height + y`.
/// A rendered frame therefore has `width` rows of `height` columns.
///
/// The grid is either Unallocated (no buffers; only `resize` is valid) or
/// Allocated. `fill`, rendering, `summary` and cell access on an Unallocated
/// grid return [`HeightGridError::InvalidState`].
#[derive(Clone, Default)]
pub struct HeightGrid {
    width: usize,
    height: usize,
    storage: Option<Storage>,
}

impl HeightGrid {
    /// Create a 0x0 grid without backing storage
    pub fn new() -> Self {
        Self {
            width: 0,
            height: 0,
            storage: None,
        }
    }

    /// Create a grid of `width * height` cells, all `UNKNOWN`
    pub fn with_size(width: usize, height: usize) -> Result<Self> {
        let mut grid = Self::new();
        grid.resize(width, height)?;
        Ok(grid)
    }

    /// Create a grid with every cell set to `value`
    pub fn filled(width: usize, height: usize, value: u32) -> Result<Self> {
        let mut grid = Self::with_size(width, height)?;
        grid.fill(value)?;
        Ok(grid)
    }

    /// Replace the storage with fresh buffers of the new size.
    ///
    /// Content is never preserved, even when the dimensions are unchanged.
    /// On failure the grid is left Unallocated with zero dimensions.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<()> {
        self.release();

        match Storage::allocate(width, height) {
            Ok(storage) => {
                log::debug!("allocated {}x{} height grid", width, height);
                self.width = width;
                self.height = height;
                self.storage = Some(storage);
                Ok(())
            }
            Err(e) => {
                self.width = 0;
                self.height = 0;
                Err(e)
            }
        }
    }

    /// Free both buffers. Dimensions are kept but no cell can be read
    /// until the next `resize`.
    pub fn release(&mut self) {
        self.storage = None;
    }

    /// Write `value` into every cell
    pub fn fill(&mut self, value: u32) -> Result<()> {
        self.storage_mut("fill")?.cells.fill(value);
        Ok(())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_allocated(&self) -> bool {
        self.storage.is_some()
    }

    /// Number of cells held; 0 when Unallocated
    pub fn len(&self) -> usize {
        self.storage.as_ref().map_or(0, |s| s.cells.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flat index of cell (x, y)
    pub fn index(&self, x: usize, y: usize) -> Result<usize> {
        self.storage("index")?;
        if x >= self.width || y >= self.height {
            return Err(HeightGridError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(x * self.height + y)
    }

    pub fn get(&self, x: usize, y: usize) -> Result<u32> {
        let idx = self.index(x, y)?;
        let cells = &self.storage("get")?.cells;
        Ok(cells[idx])
    }

    pub fn set(&mut self, x: usize, y: usize, value: u32) -> Result<()> {
        let idx = self.index(x, y)?;
        self.storage_mut("set")?.cells[idx] = value;
        Ok(())
    }

    /// All cells in storage order
    pub fn cells(&self) -> Result<&[u32]> {
        Ok(self.storage("cells")?.cells.as_slice())
    }

    /// Mutable view of all cells, for external population
    pub fn cells_mut(&mut self) -> Result<&mut [u32]> {
        Ok(self.storage_mut("cells_mut")?.cells.as_mut_slice())
    }

    /// Range of known heights, the one used for normalization
    pub fn known_range(&self) -> Result<HeightRange> {
        Ok(math::known_range(&self.storage("known_range")?.cells))
    }

    pub(crate) fn storage(&self, op: &'static str) -> Result<&Storage> {
        self.storage
            .as_ref()
            .ok_or(HeightGridError::InvalidState(op))
    }

    pub(crate) fn storage_mut(&mut self, op: &'static str) -> Result<&mut Storage> {
        self.storage
            .as_mut()
            .ok_or(HeightGridError::InvalidState(op))
    }
}

impl fmt::Debug for HeightGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeightGrid")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("allocated", &self.is_allocated())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_unallocated() {
        let grid = HeightGrid::new();
        assert_eq!(grid.width(), 0);
        assert_eq!(grid.height(), 0);
        assert!(!grid.is_allocated());
        assert!(grid.is_empty());
    }

    #[test]
    fn test_with_size_starts_unknown() {
        let grid = HeightGrid::with_size(3, 4).unwrap();
        assert_eq!(grid.len(), 12);
        assert!(grid.cells().unwrap().iter().all(|&v| v == UNKNOWN));
    }

    #[test]
    fn test_index_is_x_major() {
        let grid = HeightGrid::with_size(3, 4).unwrap();
        assert_eq!(grid.index(0, 0).unwrap(), 0);
        assert_eq!(grid.index(0, 1).unwrap(), 1);
        assert_eq!(grid.index(1, 0).unwrap(), 4);
        assert_eq!(grid.index(2, 3).unwrap(), 11);
    }

    #[test]
    fn test_index_out_of_bounds() {
        let grid = HeightGrid::with_size(3, 4).unwrap();
        assert!(matches!(
            grid.index(3, 0),
            Err(HeightGridError::OutOfBounds { x: 3, y: 0, .. })
        ));
        assert!(grid.index(0, 4).is_err());
    }

    #[test]
    fn test_set_then_get() {
        let mut grid = HeightGrid::filled(2, 2, 1).unwrap();
        grid.set(1, 0, 42).unwrap();
        assert_eq!(grid.get(1, 0).unwrap(), 42);
        assert_eq!(grid.cells().unwrap(), &[1, 1, 42, 1]);
    }

    #[test]
    fn test_overflowing_size_fails_and_stays_unallocated() {
        let mut grid = HeightGrid::filled(2, 2, 5).unwrap();
        let err = grid.resize(usize::MAX, 2).unwrap_err();

        assert!(matches!(err, HeightGridError::Allocation { .. }));
        assert!(!grid.is_allocated());
        assert_eq!(grid.width(), 0);
        assert_eq!(grid.height(), 0);
    }

    #[test]
    fn test_oversized_reserve_fails() {
        // Fits in usize but not in an allocation
        let result = HeightGrid::with_size(usize::MAX / 4, 2);
        assert!(matches!(result, Err(HeightGridError::Allocation { .. })));
    }

    #[test]
    fn test_release_keeps_dimensions() {
        let mut grid = HeightGrid::filled(5, 6, 9).unwrap();
        grid.release();

        assert!(!grid.is_allocated());
        assert_eq!(grid.width(), 5);
        assert_eq!(grid.height(), 6);
        assert!(matches!(
            grid.cells(),
            Err(HeightGridError::InvalidState(_))
        ));
    }

    #[test]
    fn test_index_on_released_grid_is_invalid_state() {
        let mut grid = HeightGrid::with_size(3, 4).unwrap();
        grid.release();

        assert!(matches!(
            grid.index(1, 1),
            Err(HeightGridError::InvalidState(_))
        ));
        assert!(matches!(
            HeightGrid::new().index(0, 0),
            Err(HeightGridError::InvalidState(_))
        ));
    }

    #[test]
    fn test_debug_omits_cells() {
        let grid = HeightGrid::with_size(2, 3).unwrap();
        let s = format!("{:?}", grid);
        assert!(s.contains("HeightGrid"));
        assert!(s.contains("allocated: true"));
    }
}
