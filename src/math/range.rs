use crate::grid::UNKNOWN;

/// Range of known heights found by a sentinel-aware scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeightRange {
    /// No cell holds a known height
    Empty,
    /// All known cells hold the same height
    Flat(u32),
    /// Distinct known heights, `min < max`
    Span { min: u32, max: u32 },
}

impl HeightRange {
    pub fn min(&self) -> Option<u32> {
        match *self {
            HeightRange::Empty => None,
            HeightRange::Flat(v) => Some(v),
            HeightRange::Span { min, .. } => Some(min),
        }
    }

    pub fn max(&self) -> Option<u32> {
        match *self {
            HeightRange::Empty => None,
            HeightRange::Flat(v) => Some(v),
            HeightRange::Span { max, .. } => Some(max),
        }
    }
}

/// Min/max over every cell that is not `UNKNOWN`
pub fn known_range(cells: &[u32]) -> HeightRange {
    let bounds = cells
        .iter()
        .copied()
        .filter(|&v| v != UNKNOWN)
        .fold(None, |acc: Option<(u32, u32)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        });

    match bounds {
        None => HeightRange::Empty,
        Some((lo, hi)) if lo == hi => HeightRange::Flat(lo),
        Some((min, max)) => HeightRange::Span { min, max },
    }
}

/// Min/max over every cell, sentinel included. Seeded from the first cell.
pub fn plain_range(cells: &[u32]) -> Option<(u32, u32)> {
    let (&first, rest) = cells.split_first()?;
    Some(
        rest.iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
    )
}

/// Stretch known heights linearly onto 0..=255.
///
/// `out` must be as long as `cells`. Unknown cells and empty or flat ranges
/// produce 0.
pub fn normalize_into(cells: &[u32], out: &mut [u8]) -> HeightRange {
    debug_assert_eq!(cells.len(), out.len());

    let range = known_range(cells);
    let HeightRange::Span { min, max } = range else {
        out.fill(0);
        return range;
    };

    let amplitude = (max - min) as f64;
    for (dst, &v) in out.iter_mut().zip(cells) {
        *dst = if v == UNKNOWN {
            0
        } else {
            ((v - min) as f64 * 255.0 / amplitude) as u8
        };
    }

    range
}
