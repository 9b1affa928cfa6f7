//! Flat RGBA pixel buffer and the rescale-and-draw pass.
//!
//! Four bytes per cell in R, G, B, A order. Drawing writes the first three and
//! never touches alpha, so callers decide what A holds.
use crate::error::{Error, Result};
use crate::field::{FieldStats, ScalarField};
use crate::gradient::{Color, Gradient};
use crate::grid::GridDims;

pub const CHANNELS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    bytes: Vec<u8>,
    dims: GridDims,
}

impl PixelBuffer {
    /// All bytes zero, including alpha.
    pub fn new(dims: GridDims) -> Self {
        Self { bytes: vec![0; dims.cells() * CHANNELS], dims }
    }

    /// Zeroed colour with alpha pre-set to 255.
    pub fn opaque(dims: GridDims) -> Self {
        let mut buf = Self::new(dims);
        for px in buf.bytes.chunks_exact_mut(CHANNELS) {
            px[3] = u8::MAX;
        }
        buf
    }

    /// Wrap caller-owned bytes, e.g. a texture staging buffer.
    pub fn from_bytes(dims: GridDims, bytes: Vec<u8>) -> Result<Self> {
        let expected = dims.cells() * CHANNELS;
        if bytes.len() != expected {
            return Err(Error::BufferSize { expected, actual: bytes.len() });
        }
        Ok(Self { bytes, dims })
    }

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Write one cell's colour. Coordinates outside the grid are ignored.
    pub fn set_pixel(&mut self, x: usize, y: usize, c: Color) {
        if !self.dims.contains(x, y) {
            return;
        }
        self.write(self.dims.index_of(x, y), c);
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if !self.dims.contains(x, y) {
            return None;
        }
        let p = self.dims.index_of(x, y) * CHANNELS;
        Some([self.bytes[p], self.bytes[p + 1], self.bytes[p + 2], self.bytes[p + 3]])
    }

    #[inline]
    fn write(&mut self, cell: usize, c: Color) {
        let p = cell * CHANNELS;
        self.bytes[p] = c.r;
        self.bytes[p + 1] = c.g;
        self.bytes[p + 2] = c.b;
    }
}

/// Linear map from field values onto gradient indices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rescale {
    pub scale: f32,
    pub offset: f32,
}

impl Rescale {
    /// `scale = 255 / (max - min)`, `offset = min * scale`.
    pub fn from_stats(stats: FieldStats) -> Self {
        let scale = 255.0 / stats.range();
        Self { scale, offset: stats.min * scale }
    }

    /// Gradient slot for `v`, truncated and clamped to `0..=255`.
    ///
    /// A flat or empty field has no usable scale and lands on slot 0.
    #[inline]
    pub fn index(&self, v: f32) -> u8 {
        if !self.scale.is_finite() {
            return 0;
        }
        let scaled = v * self.scale - self.offset;
        // `as` saturates and sends NaN to 0.
        (scaled as i32).clamp(0, 255) as u8
    }
}

/// Map every field cell through `gradient` into `pixels`.
///
/// Runs on the calling thread and must only see the final, fully reduced
/// stats; rescaling per chunk would leave seams.
pub fn rescale_and_draw(
    field: &ScalarField,
    stats: FieldStats,
    gradient: &Gradient,
    pixels: &mut PixelBuffer,
) -> Result<()> {
    let expected = pixels.dims.cells();
    let actual = field.dims().cells();
    if actual != expected {
        return Err(Error::FieldSize { expected, actual });
    }
    let rescale = Rescale::from_stats(stats);
    for (i, &v) in field.as_slice().iter().enumerate() {
        pixels.write(i, gradient.get(rescale.index(v)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldComputer;
    use crate::params::NoiseParams;

    fn grey() -> Gradient {
        Gradient::linear(Color::new(0, 0, 0), Color::new(255, 255, 255))
    }

    #[test]
    fn opaque_sets_only_alpha() {
        let buf = PixelBuffer::opaque(GridDims::new(3, 2).unwrap());
        for px in buf.as_bytes().chunks_exact(CHANNELS) {
            assert_eq!(px, &[0, 0, 0, 255]);
        }
    }

    #[test]
    fn from_bytes_checks_length() {
        let dims = GridDims::new(2, 2).unwrap();
        assert!(PixelBuffer::from_bytes(dims, vec![0; 16]).is_ok());
        assert!(matches!(
            PixelBuffer::from_bytes(dims, vec![0; 15]),
            Err(Error::BufferSize { expected: 16, actual: 15 })
        ));
    }

    #[test]
    fn set_pixel_ignores_out_of_bounds() {
        let dims = GridDims::new(4, 3).unwrap();
        let mut buf = PixelBuffer::new(dims);
        buf.set_pixel(3, 2, Color::new(1, 2, 3));
        buf.set_pixel(4, 0, Color::new(9, 9, 9));
        buf.set_pixel(0, 3, Color::new(9, 9, 9));
        assert_eq!(buf.pixel(3, 2), Some([1, 2, 3, 0]));
        assert_eq!(buf.as_bytes().iter().map(|&b| b as u32).sum::<u32>(), 6);
        assert_eq!(buf.pixel(4, 0), None);
    }

    #[test]
    fn rescale_maps_extrema_to_ends() {
        let r = Rescale::from_stats(FieldStats { min: 0.25, max: 0.75 });
        assert_eq!(r.index(0.25), 0);
        assert_eq!(r.index(0.75), 255);
        assert_eq!(r.index(-10.0), 0);
        assert_eq!(r.index(10.0), 255);
        assert_eq!(r.index(f32::NAN), 0);
    }

    #[test]
    fn flat_field_maps_to_first_entry() {
        let r = Rescale::from_stats(FieldStats { min: 0.5, max: 0.5 });
        assert_eq!(r.index(0.5), 0);
        let r = Rescale::from_stats(FieldStats::EMPTY);
        assert_eq!(r.index(0.0), 0);
    }

    #[test]
    fn draw_leaves_alpha_untouched() {
        let dims = GridDims::new(8, 6).unwrap();
        let (field, stats) = FieldComputer::new(dims)
            .with_workers(2)
            .compute(&NoiseParams::default())
            .unwrap();
        let mut bytes = vec![0u8; dims.cells() * CHANNELS];
        for (i, px) in bytes.chunks_exact_mut(CHANNELS).enumerate() {
            px[3] = i as u8;
        }
        let mut buf = PixelBuffer::from_bytes(dims, bytes).unwrap();
        rescale_and_draw(&field, stats, &grey(), &mut buf).unwrap();
        for (i, px) in buf.as_bytes().chunks_exact(CHANNELS).enumerate() {
            assert_eq!(px[3], i as u8);
        }
    }

    #[test]
    fn drawn_indices_span_the_gradient() {
        let dims = GridDims::new(50, 30).unwrap();
        let (field, stats) = FieldComputer::new(dims).compute(&NoiseParams::default()).unwrap();
        let r = Rescale::from_stats(stats);
        let indices: Vec<u8> = field.as_slice().iter().map(|&v| r.index(v)).collect();
        assert_eq!(indices.iter().copied().min(), Some(0));
        // The maximum rescales to 255 up to one ulp of rounding.
        assert!(indices.iter().copied().max() >= Some(254));

        let gradient = grey();
        let mut buf = PixelBuffer::new(dims);
        rescale_and_draw(&field, stats, &gradient, &mut buf).unwrap();
        for (i, &idx) in indices.iter().enumerate() {
            let c = gradient.get(idx);
            assert_eq!(&buf.as_bytes()[i * CHANNELS..i * CHANNELS + 3], &[c.r, c.g, c.b]);
        }
    }

    #[test]
    fn draw_rejects_mismatched_buffer() {
        let (field, stats) = FieldComputer::new(GridDims::new(4, 4).unwrap())
            .compute(&NoiseParams::default())
            .unwrap();
        let mut buf = PixelBuffer::opaque(GridDims::new(4, 5).unwrap());
        let before = buf.clone();
        let err = rescale_and_draw(&field, stats, &grey(), &mut buf).unwrap_err();
        assert!(matches!(err, Error::FieldSize { expected: 20, actual: 16 }), "{err}");
        assert_eq!(err.to_string(), "field has 16 cells, grid needs 20");
        assert_eq!(buf, before);
    }
}
