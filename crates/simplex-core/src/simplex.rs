//! 2D simplex noise over the fixed permutation table.
//!
//! Single precision throughout so the output is bit-for-bit stable across
//! runs. The raw corner sum is returned without rescaling; in practice it
//! stays well inside [-1, 1].
use crate::perm::PERM;

/// Skew factor, (sqrt(3) - 1) / 2.
pub const F2: f32 = 0.366025403;
/// Unskew factor, (3 - sqrt(3)) / 6.
pub const G2: f32 = 0.211324865;

/// Floor toward negative infinity via truncation.
///
/// Out-of-range inputs saturate at the `i64` bounds instead of overflowing.
#[inline]
pub fn fast_floor(x: f32) -> i64 {
    let t = x as i64;
    if t as f32 <= x {
        t
    } else {
        t.saturating_sub(1)
    }
}

/// Dot product of one of eight gradient directions with `(x, y)`.
///
/// The low three bits of `hash` pick the direction: bit 2 swaps which axis is
/// doubled, bits 0 and 1 flip the signs.
#[inline]
pub fn grad2(hash: u8, x: f32, y: f32) -> f32 {
    let h = hash & 7;
    let (mut u, mut v) = if h < 4 { (x, 2.0 * y) } else { (y, 2.0 * x) };
    if h & 1 != 0 {
        u = -u;
    }
    if h & 2 != 0 {
        v = -v;
    }
    u + v
}

#[inline]
fn corner(t: f32, hash: u8, x: f32, y: f32) -> f32 {
    // NaN falloff (from an infinite input) contributes nothing.
    if t >= 0.0 {
        let t2 = t * t;
        t2 * t2 * grad2(hash, x, y)
    } else {
        0.0
    }
}

/// Evaluate simplex noise at `(x, y)`. Pure: no hidden state.
pub fn snoise2(x: f32, y: f32) -> f32 {
    // Skew into simplex space to find the containing cell. Far-out inputs
    // saturate `i`/`j`; only their low byte reaches the hash, so the sum wraps.
    let s = (x + y) * F2;
    let i = fast_floor(x + s);
    let j = fast_floor(y + s);

    let t = i.wrapping_add(j) as f32 * G2;
    let x0 = x - (i as f32 - t);
    let y0 = y - (j as f32 - t);

    // Lower triangle (0,0)->(1,0)->(1,1) or upper (0,0)->(0,1)->(1,1).
    let (i1, j1): (u8, u8) = if x0 > y0 { (1, 0) } else { (0, 1) };

    let x1 = x0 - i1 as f32 + G2;
    let y1 = y0 - j1 as f32 + G2;
    let x2 = x0 - 1.0 + 2.0 * G2;
    let y2 = y0 - 1.0 + 2.0 * G2;

    // Truncation to u8 aliases the lattice every 256 cells.
    let ii = i as u8;
    let jj = j as u8;

    let n0 = corner(0.5 - x0 * x0 - y0 * y0, PERM.hash(ii, jj, 0, 0), x0, y0);
    let n1 = corner(0.5 - x1 * x1 - y1 * y1, PERM.hash(ii, jj, i1, j1), x1, y1);
    let n2 = corner(0.5 - x2 * x2 - y2 * y2, PERM.hash(ii, jj, 1, 1), x2, y2);

    n0 + n1 + n2
}
