//! Parallel evaluation of a fractal field over a fixed grid.
//!
//! The flat cell range is cut into one contiguous chunk per worker. Each worker
//! owns its chunk and a local min/max; the only shared state is the global
//! [`FieldStats`] behind a single mutex, touched once per worker after its
//! chunk is done. Nothing is returned until every worker has joined.
use std::num::NonZeroUsize;
use std::sync::{Mutex, PoisonError};

use rayon::ThreadPoolBuilder;
use tracing::debug;

use crate::error::Result;
use crate::fractal::Composition;
use crate::grid::GridDims;
use crate::params::NoiseParams;

/// Row-major scalar grid, one `f32` per cell.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField {
    data: Vec<f32>,
    dims: GridDims,
}

impl ScalarField {
    pub fn zeroed(dims: GridDims) -> Self {
        Self { data: vec![0.0; dims.cells()], dims }
    }

    #[inline]
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[self.dims.index_of(x, y)]
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Extrema by a plain sequential scan.
    pub fn scan_stats(&self) -> FieldStats {
        let mut stats = FieldStats::EMPTY;
        for &v in &self.data {
            stats.observe(v);
        }
        stats
    }
}

/// Running minimum and maximum of a set of cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldStats {
    pub min: f32,
    pub max: f32,
}

impl FieldStats {
    /// Identity for [`merge`](Self::merge).
    pub const EMPTY: FieldStats = FieldStats { min: f32::INFINITY, max: f32::NEG_INFINITY };

    #[inline]
    pub fn observe(&mut self, v: f32) {
        if v < self.min {
            self.min = v;
        }
        if v > self.max {
            self.max = v;
        }
    }

    #[inline]
    pub fn merge(&mut self, other: FieldStats) {
        if other.min < self.min {
            self.min = other.min;
        }
        if other.max > self.max {
            self.max = other.max;
        }
    }

    #[inline]
    pub fn range(&self) -> f32 {
        self.max - self.min
    }
}

impl Default for FieldStats {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Fills a grid with a fractal composition using a fresh worker pool per call.
#[derive(Debug, Clone)]
pub struct FieldComputer {
    dims: GridDims,
    workers: usize,
    composition: Composition,
}

impl FieldComputer {
    /// One worker per available core.
    pub fn new(dims: GridDims) -> Self {
        let workers = std::thread::available_parallelism().map_or(1, NonZeroUsize::get);
        Self { dims, workers, composition: Composition::Turbulence }
    }

    /// Fix the worker count. Zero is treated as one.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn with_composition(mut self, composition: Composition) -> Self {
        self.composition = composition;
        self
    }

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Evaluate every cell at its integer grid coordinates and reduce the
    /// global extrema.
    pub fn compute(&self, params: &NoiseParams) -> Result<(ScalarField, FieldStats)> {
        let dims = self.dims;
        let composition = self.composition;
        let params = *params;
        let ranges = dims.partition(self.workers);

        debug!(
            workers = ranges.len(),
            batch = ranges[0].len(),
            cells = dims.cells(),
            "partitioned field"
        );

        let mut field = ScalarField::zeroed(dims);
        let global = Mutex::new(FieldStats::EMPTY);

        // Threads live for this call only and are joined when the pool drops.
        let pool = ThreadPoolBuilder::new()
            .num_threads(ranges.len())
            .thread_name(|i| format!("field-worker-{i}"))
            .build()?;

        pool.scope(|s| {
            let mut rest: &mut [f32] = &mut field.data;
            for range in ranges {
                let (chunk, tail) = std::mem::take(&mut rest).split_at_mut(range.len());
                rest = tail;
                let global = &global;
                s.spawn(move |_| {
                    let mut local = FieldStats::EMPTY;
                    for (offset, cell) in chunk.iter_mut().enumerate() {
                        let (x, y) = dims.coords_of(range.start + offset);
                        let v = composition.sample(x as f32, y as f32, &params);
                        *cell = v;
                        local.observe(v);
                    }
                    global.lock().unwrap_or_else(PoisonError::into_inner).merge(local);
                });
            }
        });

        let stats = global.into_inner().unwrap_or_else(PoisonError::into_inner);
        Ok((field, stats))
    }
}
