//! Recompute orchestrator: field, then gradient mapping, into one reused
//! pixel buffer.
//!
//! The input layer decides when to call [`FieldPipeline::render`]; the
//! renderer reads [`FieldPipeline::pixels`] afterwards. Every call rebuilds
//! the field from scratch.
use std::time::Instant;

use tracing::info;

use crate::config::SessionConfig;
use crate::error::Result;
use crate::field::{FieldComputer, FieldStats};
use crate::gradient::Gradient;
use crate::grid::GridDims;
use crate::params::NoiseParams;
use crate::pixels::{rescale_and_draw, PixelBuffer};

pub struct FieldPipeline {
    computer: FieldComputer,
    gradient: Gradient,
    pixels: PixelBuffer,
    last_stats: Option<FieldStats>,
}

impl FieldPipeline {
    /// Pipeline over `dims` with an opaque pixel buffer.
    pub fn new(dims: GridDims, gradient: Gradient) -> Self {
        Self::with_computer(FieldComputer::new(dims), gradient)
    }

    pub fn with_computer(computer: FieldComputer, gradient: Gradient) -> Self {
        let pixels = PixelBuffer::opaque(computer.dims());
        Self { computer, gradient, pixels, last_stats: None }
    }

    pub fn from_config(cfg: &SessionConfig) -> Result<Self> {
        let mut computer = FieldComputer::new(cfg.dims()?).with_composition(cfg.composition);
        if let Some(n) = cfg.workers {
            computer = computer.with_workers(n);
        }
        Ok(Self::with_computer(computer, cfg.palette.gradient()))
    }

    /// Recompute the whole field for `params` and redraw every pixel.
    pub fn render(&mut self, params: &NoiseParams) -> Result<FieldStats> {
        let start = Instant::now();
        let (field, stats) = self.computer.compute(params)?;
        let field_ms = start.elapsed().as_secs_f64() * 1000.0;

        rescale_and_draw(&field, stats, &self.gradient, &mut self.pixels)?;

        info!(
            field_ms,
            min = stats.min,
            max = stats.max,
            octaves = params.octaves,
            "field recomputed"
        );
        self.last_stats = Some(stats);
        Ok(stats)
    }

    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    pub fn into_pixels(self) -> PixelBuffer {
        self.pixels
    }

    pub fn last_stats(&self) -> Option<FieldStats> {
        self.last_stats
    }

    pub fn dims(&self) -> GridDims {
        self.computer.dims()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{Direction, Knob};
    use crate::pixels::CHANNELS;

    fn small_params() -> NoiseParams {
        NoiseParams { frequency: 0.1, lacunarity: 2.0, gain: 0.5, octaves: 2 }
    }

    fn small_pipeline(workers: usize) -> FieldPipeline {
        let cfg = SessionConfig {
            width: 4,
            height: 4,
            workers: Some(workers),
            ..SessionConfig::default()
        };
        FieldPipeline::from_config(&cfg).unwrap()
    }

    #[test]
    fn four_by_four_buffer_is_reproducible() {
        let mut reference = small_pipeline(1);
        let stats = reference.render(&small_params()).unwrap();
        let expected = reference.pixels().clone();
        assert_eq!(expected.as_bytes().len(), 16 * CHANNELS);
        assert!(stats.min <= stats.max);

        for _ in 0..3 {
            let mut again = small_pipeline(1);
            again.render(&small_params()).unwrap();
            assert_eq!(again.pixels(), &expected);
        }
        for workers in [2, 3, 4, 8, 16, 32] {
            let mut p = small_pipeline(workers);
            assert_eq!(p.render(&small_params()).unwrap(), stats, "{workers} workers");
            assert_eq!(p.pixels(), &expected, "{workers} workers");
        }
    }

    #[test]
    fn four_by_four_alpha_stays_opaque() {
        let mut p = small_pipeline(3);
        p.render(&small_params()).unwrap();
        assert!(p.pixels().as_bytes().chunks_exact(CHANNELS).all(|px| px[3] == 255));
    }

    #[test]
    fn minimum_cell_takes_first_gradient_entry() {
        let mut p = small_pipeline(2);
        p.render(&small_params()).unwrap();
        let g = SessionConfig::default().palette.gradient();
        let first = g.get(0);
        let px = p.pixels().as_bytes();
        // The minimum cell always rescales to exactly 0.
        assert!(px.chunks_exact(CHANNELS).any(|c| c[..3] == [first.r, first.g, first.b]));
    }

    #[test]
    fn rerender_overwrites_previous_image() {
        let mut p = small_pipeline(2);
        p.render(&small_params()).unwrap();
        let nudged = small_params().nudged(Knob::Frequency, Direction::Up);
        p.render(&nudged).unwrap();

        let mut fresh = small_pipeline(2);
        fresh.render(&nudged).unwrap();
        assert_eq!(p.pixels(), fresh.pixels());
        assert_eq!(p.last_stats(), fresh.last_stats());
    }

    #[test]
    fn empty_config_is_rejected() {
        let cfg = SessionConfig { width: 0, ..SessionConfig::default() };
        assert!(FieldPipeline::from_config(&cfg).is_err());
    }
}
