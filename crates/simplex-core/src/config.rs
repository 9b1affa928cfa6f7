//! Session constants: grid size, starting parameters, palette.
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::fractal::Composition;
use crate::gradient::{Color, Gradient};
use crate::grid::GridDims;
use crate::params::NoiseParams;

/// Control colours for the gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Palette {
    Linear { from: Color, to: Color },
    Dual { c1: Color, c2: Color, c3: Color, c4: Color },
}

impl Default for Palette {
    /// Deep blue through sky blue, then green to white.
    fn default() -> Self {
        Palette::Dual {
            c1: Color::new(0, 0, 175),
            c2: Color::new(80, 160, 244),
            c3: Color::new(12, 192, 75),
            c4: Color::new(255, 255, 255),
        }
    }
}

impl Palette {
    pub fn gradient(&self) -> Gradient {
        match *self {
            Palette::Linear { from, to } => Gradient::linear(from, to),
            Palette::Dual { c1, c2, c3, c4 } => Gradient::dual(c1, c2, c3, c4),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub width: usize,
    pub height: usize,
    pub params: NoiseParams,
    pub palette: Palette,
    pub composition: Composition,
    /// Worker count; `None` uses every available core.
    pub workers: Option<usize>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            params: NoiseParams::default(),
            palette: Palette::default(),
            composition: Composition::Turbulence,
            workers: None,
        }
    }
}

impl SessionConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        let cfg: SessionConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        self.dims().map(|_| ())
    }

    pub fn dims(&self) -> Result<GridDims> {
        GridDims::new(self.width, self.height)
    }
}
