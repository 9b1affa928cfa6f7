//! Fractal composition of simplex octaves.
//!
//! Both strategies sum `octaves` samples; after each one the frequency is
//! multiplied by `lacunarity` and the amplitude by `gain`. Amplitude starts
//! at 1.
use serde::{Deserialize, Serialize};

use crate::params::NoiseParams;
use crate::simplex::snoise2;

/// Turbulence: sum of absolute amplitude-scaled octaves. Never negative.
pub fn turbulence(
    x: f32,
    y: f32,
    mut frequency: f32,
    lacunarity: f32,
    gain: f32,
    octaves: u32,
) -> f32 {
    let mut sum = 0.0f32;
    let mut amplitude = 1.0f32;
    for _ in 0..octaves {
        sum += (snoise2(x * frequency, y * frequency) * amplitude).abs();
        frequency *= lacunarity;
        amplitude *= gain;
    }
    sum
}

/// Fractal Brownian motion: the same loop with signed octaves.
pub fn fbm2(
    x: f32,
    y: f32,
    mut frequency: f32,
    lacunarity: f32,
    gain: f32,
    octaves: u32,
) -> f32 {
    let mut sum = 0.0f32;
    let mut amplitude = 1.0f32;
    for _ in 0..octaves {
        sum += snoise2(x * frequency, y * frequency) * amplitude;
        frequency *= lacunarity;
        amplitude *= gain;
    }
    sum
}

/// Which fractal sum fills a field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Composition {
    #[default]
    Turbulence,
    Fbm,
}

impl Composition {
    #[inline]
    pub fn sample(self, x: f32, y: f32, p: &NoiseParams) -> f32 {
        match self {
            Composition::Turbulence => {
                turbulence(x, y, p.frequency, p.lacunarity, p.gain, p.octaves)
            }
            Composition::Fbm => fbm2(x, y, p.frequency, p.lacunarity, p.gain, p.octaves),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const POINTS: [(f32, f32); 6] = [
        (0.0, 0.0),
        (13.0, 7.0),
        (123.0, 456.0),
        (799.0, 599.0),
        (-42.5, 17.25),
        (3.3, -9.1),
    ];

    #[test]
    fn single_octave_turbulence_is_abs_noise() {
        for &(x, y) in &POINTS {
            for f in [0.01f32, 0.1, 1.7] {
                let t = turbulence(x, y, f, 2.0, 0.5, 1);
                assert_eq!(t.to_bits(), snoise2(x * f, y * f).abs().to_bits(), "({x}, {y}) f={f}");
            }
        }
    }

    #[test]
    fn doubling_octaves_never_decreases_turbulence() {
        for &(x, y) in &POINTS {
            for octaves in [1u32, 2, 3, 4] {
                let lo = turbulence(x, y, 0.05, 3.0, 0.2, octaves);
                let hi = turbulence(x, y, 0.05, 3.0, 0.2, octaves * 2);
                assert!(hi >= lo, "({x}, {y}) octaves {octaves}: {hi} < {lo}");
            }
        }
    }

    #[test]
    fn turbulence_stays_non_negative_with_negative_gain() {
        for &(x, y) in &POINTS {
            assert!(turbulence(x, y, 0.07, 2.0, -0.6, 5) >= 0.0);
        }
    }

    #[test]
    fn deep_octave_counts_stay_finite() {
        use crate::params::{Direction, Knob};
        let mut p = NoiseParams::default();
        for _ in 0..37 {
            p.nudge(Knob::Octaves, Direction::Up);
        }
        assert_eq!(p.octaves, 40);
        // Frequency passes 1e16 around here, and overflows to infinity by 120.
        for octaves in [p.octaves, 120] {
            for &(x, y) in &POINTS {
                let t = turbulence(x, y, p.frequency, p.lacunarity, p.gain, octaves);
                let f = fbm2(x, y, p.frequency, p.lacunarity, p.gain, octaves);
                assert!(t.is_finite() && t >= 0.0, "turbulence({x}, {y}) octaves {octaves} = {t}");
                assert!(f.is_finite(), "fbm2({x}, {y}) octaves {octaves} = {f}");
            }
        }
    }

    #[test]
    fn zero_octaves_sum_to_zero() {
        assert_eq!(turbulence(5.0, 5.0, 0.1, 2.0, 0.5, 0), 0.0);
        assert_eq!(fbm2(5.0, 5.0, 0.1, 2.0, 0.5, 0), 0.0);
    }

    #[test]
    fn fbm_reaches_negative_values() {
        let any_negative =
            (0..200).any(|k| fbm2(k as f32 * 1.37, k as f32 * 0.61, 0.3, 2.0, 0.5, 3) < 0.0);
        assert!(any_negative);
    }

    #[test]
    fn turbulence_bounds_abs_fbm() {
        for &(x, y) in &POINTS {
            let t = turbulence(x, y, 0.05, 2.0, 0.5, 4);
            let f = fbm2(x, y, 0.05, 2.0, 0.5, 4);
            assert!(t + 1e-7 >= f.abs());
        }
    }

    #[test]
    fn composition_dispatches_to_strategy() {
        let p = NoiseParams { frequency: 0.1, lacunarity: 2.0, gain: 0.5, octaves: 3 };
        assert_relative_eq!(
            Composition::Turbulence.sample(4.0, 9.0, &p),
            turbulence(4.0, 9.0, 0.1, 2.0, 0.5, 3)
        );
        assert_relative_eq!(
            Composition::Fbm.sample(4.0, 9.0, &p),
            fbm2(4.0, 9.0, 0.1, 2.0, 0.5, 3)
        );
    }
}
