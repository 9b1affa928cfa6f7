use serde::{Deserialize, Serialize};

/// Parameter vector for one fractal field.
/// Changing any field means recomputing the whole field and image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseParams {
    /// Base sampling frequency in noise units per grid cell.
    pub frequency: f32,
    /// Per-octave frequency multiplier.
    pub lacunarity: f32,
    /// Per-octave amplitude multiplier.
    pub gain: f32,
    pub octaves: u32,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            frequency: 0.01,
            lacunarity: 3.0,
            gain: 0.2,
            octaves: 3,
        }
    }
}

/// One tweakable parameter, as bound to a key by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Knob {
    Octaves,
    Frequency,
    Gain,
    Lacunarity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    #[inline]
    fn sign(self) -> f32 {
        match self {
            Direction::Up => 1.0,
            Direction::Down => -1.0,
        }
    }
}

impl Knob {
    /// Step applied per key press.
    pub fn step(self) -> f32 {
        match self {
            Knob::Octaves => 1.0,
            Knob::Frequency => 0.001,
            Knob::Gain => 0.1,
            Knob::Lacunarity => 0.001,
        }
    }
}

impl NoiseParams {
    /// Move one knob by a single step. Octaves saturate at zero; the float
    /// knobs are left unclamped.
    pub fn nudge(&mut self, knob: Knob, dir: Direction) {
        let delta = knob.step() * dir.sign();
        match knob {
            Knob::Octaves => {
                self.octaves = match dir {
                    Direction::Up => self.octaves.saturating_add(1),
                    Direction::Down => self.octaves.saturating_sub(1),
                }
            }
            Knob::Frequency => self.frequency += delta,
            Knob::Gain => self.gain += delta,
            Knob::Lacunarity => self.lacunarity += delta,
        }
    }

    /// Copy with one knob nudged.
    pub fn nudged(mut self, knob: Knob, dir: Direction) -> Self {
        self.nudge(knob, dir);
        self
    }
}
