//! 256-entry colour ramps built from control colours.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Per-channel interpolation, truncated back to a byte.
    pub fn lerp(self, other: Color, pct: f32) -> Color {
        Color {
            r: lerp(self.r, other.r, pct),
            g: lerp(self.g, other.g, pct),
            b: lerp(self.b, other.b, pct),
        }
    }
}

#[inline]
fn lerp(a: u8, b: u8, pct: f32) -> u8 {
    (a as f32 + pct * (b as f32 - a as f32)) as u8
}

pub const GRADIENT_LEN: usize = 256;

/// Exactly 256 colours, indexed by a rescaled field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gradient([Color; GRADIENT_LEN]);

impl Gradient {
    fn build(f: impl Fn(f32) -> Color) -> Self {
        let mut ramp = [Color::default(); GRADIENT_LEN];
        for (i, c) in ramp.iter_mut().enumerate() {
            *c = f(i as f32 / 255.0);
        }
        Gradient(ramp)
    }

    /// Straight ramp from `from` at index 0 to `to` at index 255.
    pub fn linear(from: Color, to: Color) -> Self {
        Self::build(|pct| from.lerp(to, pct))
    }

    /// Two-part ramp: `c1 -> c2` over the lower half, then `c3 -> c4` over the
    /// upper half.
    ///
    /// The upper half blends with `pct * 1.5 - 0.5`, so it starts a quarter of
    /// the way into `c3 -> c4` and ends exactly on `c4`. The jump at the
    /// midpoint is part of the look.
    pub fn dual(c1: Color, c2: Color, c3: Color, c4: Color) -> Self {
        Self::build(|pct| {
            if pct < 0.5 {
                c1.lerp(c2, pct * 2.0)
            } else {
                c3.lerp(c4, pct * 1.5 - 0.5)
            }
        })
    }

    #[inline]
    pub fn get(&self, index: u8) -> Color {
        self.0[index as usize]
    }

    pub fn colors(&self) -> &[Color; GRADIENT_LEN] {
        &self.0
    }
}
