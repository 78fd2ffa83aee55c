//! Conversion between BGR and 8-bit HSV.
//!
//! HSV uses the common 8-bit packing: hue is stored as degrees / 2 so the
//! full wheel spans 0..180, saturation and value span 0..255. The forward
//! transform uses fixed-point reciprocal tables; the inverse goes through
//! `f32` and rounds back to 8 bits.

use crate::buffer::CHANNELS;

/// Which encoding a working buffer currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    /// Blue-green-red, the storage encoding.
    Bgr,
    /// Hue-saturation-value, used for perceptual adjustments.
    Hsv,
}

/// Number of hue steps covering the full wheel.
pub const HUE_RANGE: i32 = 180;

const HSV_SHIFT: u32 = 12;
const HSV_ROUND: i32 = 1 << (HSV_SHIFT - 1);

/// `round((255 << 12) / v)` for each possible value.
const SAT_DIV: [i32; 256] = build_sat_div();
/// `round((180 << 12) / (6 * diff))` for each possible chroma.
const HUE_DIV: [i32; 256] = build_hue_div();

const fn build_sat_div() -> [i32; 256] {
    let mut table = [0i32; 256];
    let mut i = 1;
    while i < 256 {
        let num = 255 << HSV_SHIFT;
        table[i] = (2 * num + i as i32) / (2 * i as i32);
        i += 1;
    }
    table
}

const fn build_hue_div() -> [i32; 256] {
    let mut table = [0i32; 256];
    let mut i = 1;
    while i < 256 {
        let num = HUE_RANGE << HSV_SHIFT;
        let den = 6 * i as i32;
        table[i] = (2 * num + den) / (2 * den);
        i += 1;
    }
    table
}

/// Convert one BGR pixel to `[h, s, v]`.
#[inline]
pub fn bgr_to_hsv(b: u8, g: u8, r: u8) -> [u8; 3] {
    let (b, g, r) = (b as i32, g as i32, r as i32);
    let v = b.max(g).max(r);
    let diff = v - b.min(g).min(r);

    let s = (diff * SAT_DIV[v as usize] + HSV_ROUND) >> HSV_SHIFT;

    let h = if v == r {
        g - b
    } else if v == g {
        b - r + 2 * diff
    } else {
        r - g + 4 * diff
    };
    let mut h = (h * HUE_DIV[diff as usize] + HSV_ROUND) >> HSV_SHIFT;
    if h < 0 {
        h += HUE_RANGE;
    }

    [h as u8, s as u8, v as u8]
}

/// Convert one `[h, s, v]` pixel back to BGR.
#[inline]
pub fn hsv_to_bgr(h: u8, s: u8, v: u8) -> [u8; 3] {
    let v = v as f32 / 255.0;
    if s == 0 {
        let gray = to_u8(v);
        return [gray, gray, gray];
    }
    let s = s as f32 / 255.0;

    let mut h = h as f32 * (6.0 / HUE_RANGE as f32);
    while h >= 6.0 {
        h -= 6.0;
    }
    let mut sector = h.floor() as usize;
    let mut frac = h - sector as f32;
    if sector >= 6 {
        sector = 0;
        frac = 0.0;
    }

    let tab = [
        v,
        v * (1.0 - s),
        v * (1.0 - s * frac),
        v * (1.0 - s * (1.0 - frac)),
    ];
    // Indices into `tab` for (b, g, r) per 60° sector.
    const SECTORS: [[usize; 3]; 6] = [[1, 3, 0], [1, 0, 2], [3, 0, 1], [0, 2, 1], [0, 1, 3], [2, 1, 0]];
    let [bi, gi, ri] = SECTORS[sector];
    [to_u8(tab[bi]), to_u8(tab[gi]), to_u8(tab[ri])]
}

#[inline]
fn to_u8(x: f32) -> u8 {
    (x * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Convert a packed BGR buffer to HSV in place.
pub fn bgr_to_hsv_in_place(pixels: &mut [u8]) {
    for chunk in pixels.chunks_exact_mut(CHANNELS) {
        let hsv = bgr_to_hsv(chunk[0], chunk[1], chunk[2]);
        chunk.copy_from_slice(&hsv);
    }
}

/// Convert a packed HSV buffer to BGR in place.
pub fn hsv_to_bgr_in_place(pixels: &mut [u8]) {
    for chunk in pixels.chunks_exact_mut(CHANNELS) {
        let bgr = hsv_to_bgr(chunk[0], chunk[1], chunk[2]);
        chunk.copy_from_slice(&bgr);
    }
}
