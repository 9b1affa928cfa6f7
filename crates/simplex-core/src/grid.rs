//! Grid dimensions and the flat-index addressing used by every buffer.
//! Storage is row-major: cell `(x, y)` lives at `y * width + x`.
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridDims {
    pub width: usize,
    pub height: usize,
}

impl GridDims {
    /// Reject grids with a zero dimension.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::EmptyGrid { width, height });
        }
        Ok(Self { width, height })
    }

    #[inline]
    pub fn cells(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    pub fn index_of(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Inverse of [`index_of`](Self::index_of).
    ///
    /// The row is `(index - x) / width`. Dividing by the height here instead
    /// shears the image whenever the grid is not square.
    #[inline]
    pub fn coords_of(&self, index: usize) -> (usize, usize) {
        let x = index % self.width;
        let y = (index - x) / self.width;
        (x, y)
    }

    #[inline]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Split `0..cells` into `workers` contiguous ranges of `cells / workers`
    /// cells each. The last range also takes the remainder.
    ///
    /// `workers` is clamped to `1..=cells` so no range is empty.
    pub fn partition(&self, workers: usize) -> Vec<Range<usize>> {
        let cells = self.cells();
        let n = workers.clamp(1, cells.max(1));
        let batch = cells / n;
        (0..n)
            .map(|i| {
                let start = i * batch;
                let end = if i + 1 == n { cells } else { start + batch };
                start..end
            })
            .collect()
    }
}
