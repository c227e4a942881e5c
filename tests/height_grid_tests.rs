use height_grid::{HeightGrid, HeightGridError, UNKNOWN};

#[cfg(test)]
mod lifecycle_tests {
    use super::*;

    #[test]
    fn test_empty_grid_has_no_storage() {
        let mut grid = HeightGrid::new();
        assert!(!grid.is_allocated());
        assert_eq!(grid.len(), 0);

        assert!(matches!(grid.fill(1), Err(HeightGridError::InvalidState(_))));
        assert!(matches!(grid.summary(), Err(HeightGridError::InvalidState(_))));
        assert!(matches!(grid.get(0, 0), Err(HeightGridError::InvalidState(_))));
        assert!(matches!(grid.set(0, 0, 1), Err(HeightGridError::InvalidState(_))));
    }

    #[test]
    fn test_zero_sized_grid_is_allocated_but_holds_nothing() {
        let mut grid = HeightGrid::with_size(0, 0).unwrap();
        assert!(grid.is_allocated());
        assert!(grid.is_empty());

        grid.fill(9).unwrap();
        assert!(grid.render().unwrap().is_empty());
        assert!(grid.cells().unwrap().is_empty());
    }

    #[test]
    fn test_zero_width_grid() {
        let grid = HeightGrid::filled(0, 7, 3).unwrap();
        assert_eq!(grid.len(), 0);
        assert_eq!(grid.height(), 7);
    }

    #[test]
    fn test_resize_changes_cell_count() {
        let mut grid = HeightGrid::filled(2, 2, 1).unwrap();
        grid.resize(3, 5).unwrap();

        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 5);
        assert_eq!(grid.len(), 15);
        assert_eq!(grid.render().unwrap().len(), 15);
    }

    #[test]
    fn test_resize_never_carries_values_over() {
        let mut grid = HeightGrid::filled(4, 4, 1234).unwrap();
        grid.resize(8, 8).unwrap();
        assert!(grid.cells().unwrap().iter().all(|&v| v != 1234));

        // Same dimensions still discard content
        let mut grid = HeightGrid::filled(4, 4, 1234).unwrap();
        grid.resize(4, 4).unwrap();
        assert!(grid.cells().unwrap().iter().all(|&v| v == UNKNOWN));
    }

    #[test]
    fn test_resize_revives_released_grid() {
        let mut grid = HeightGrid::filled(2, 3, 8).unwrap();
        grid.release();
        assert!(grid.fill(1).is_err());

        grid.resize(2, 3).unwrap();
        grid.fill(1).unwrap();
        assert!(grid.cells().unwrap().iter().all(|&v| v == 1));
    }

    #[test]
    fn test_failed_resize_leaves_grid_unallocated() {
        let mut grid = HeightGrid::filled(3, 3, 2).unwrap();
        let err = grid.resize(usize::MAX, usize::MAX).unwrap_err();

        assert!(matches!(err, HeightGridError::Allocation { .. }));
        assert!(err.to_string().contains("allocation"));
        assert!(!grid.is_allocated());
        assert_eq!((grid.width(), grid.height()), (0, 0));
    }
}

#[cfg(test)]
mod fill_tests {
    use super::*;

    #[test]
    fn test_fill_covers_every_cell() {
        let mut grid = HeightGrid::with_size(7, 5).unwrap();
        grid.fill(77).unwrap();
        assert!(grid.cells().unwrap().iter().all(|&v| v == 77));
    }

    #[test]
    fn test_fill_overwrites_prior_content() {
        let mut grid = HeightGrid::filled(3, 3, 5).unwrap();
        grid.set(1, 1, UNKNOWN).unwrap();
        grid.set(2, 0, 99).unwrap();

        grid.fill(6).unwrap();
        assert_eq!(grid.cells().unwrap(), &[6; 9]);
    }

    #[test]
    fn test_fill_with_unknown() {
        let mut grid = HeightGrid::filled(2, 2, 0).unwrap();
        grid.fill(UNKNOWN).unwrap();
        assert!(grid.cells().unwrap().iter().all(|&v| v == UNKNOWN));
    }
}

#[cfg(test)]
mod summary_tests {
    use super::*;

    #[test]
    fn test_filled_grid_reports_fill_value() {
        for (w, h, v) in [(1, 1, 0), (3, 2, 17), (16, 9, 40_000), (5, 5, UNKNOWN)] {
            let summary = HeightGrid::filled(w, h, v).unwrap().summary().unwrap();
            assert_eq!((summary.width, summary.height), (w, h));
            assert_eq!(summary.min, Some(v));
            assert_eq!(summary.max, Some(v));
        }
    }

    #[test]
    fn test_summary_scans_sentinel_but_render_does_not() {
        let mut grid = HeightGrid::filled(2, 2, 100).unwrap();
        grid.cells_mut().unwrap()[3] = UNKNOWN;
        grid.cells_mut().unwrap()[0] = 50;

        let summary = grid.summary().unwrap();
        assert_eq!(summary.min, Some(50));
        assert_eq!(summary.max, Some(UNKNOWN));

        let range = grid.known_range().unwrap();
        assert_eq!(range.min(), Some(50));
        assert_eq!(range.max(), Some(100));
    }

    #[test]
    fn test_summary_does_not_modify_cells() {
        let mut grid = HeightGrid::filled(2, 2, 4).unwrap();
        grid.set(0, 1, 8).unwrap();
        let before = grid.cells().unwrap().to_vec();

        grid.summary().unwrap();
        assert_eq!(grid.cells().unwrap(), before.as_slice());
    }
}
