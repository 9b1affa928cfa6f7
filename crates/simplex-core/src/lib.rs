//! Deterministic 2D simplex noise, fractal composition, parallel field
//! evaluation and gradient mapping into an RGBA pixel buffer.
pub mod config;
pub mod error;
pub mod field;
pub mod fractal;
pub mod gradient;
pub mod grid;
pub mod params;
pub mod perm;
pub mod pipeline;
pub mod pixels;
pub mod simplex;

pub use config::{Palette, SessionConfig};
pub use error::{Error, Result};
pub use field::{FieldComputer, FieldStats, ScalarField};
pub use fractal::{fbm2, turbulence, Composition};
pub use gradient::{Color, Gradient};
pub use grid::GridDims;
pub use params::{Direction, Knob, NoiseParams};
pub use pipeline::FieldPipeline;
pub use pixels::{rescale_and_draw, PixelBuffer, Rescale};
pub use simplex::snoise2;
