//! Adjustments applied in HSV space.
//!
//! Buffers passed here hold packed `[h, s, v]` triples as produced by
//! [`crate::color::bgr_to_hsv_in_place`].
//!
//! ## Order
//! 1. Hue rotation
//! 2. Saturation
//! 3. Brightness (value)
//!
//! Equalization also runs here, on the value channel only.

use crate::buffer::CHANNELS;
use crate::clahe::clahe;
use crate::color::HUE_RANGE;
use crate::histogram::equalize_channel;
use crate::params::EqualizeMode;

/// Index of the hue channel in an HSV triple.
pub const HUE: usize = 0;
/// Index of the saturation channel in an HSV triple.
pub const SATURATION: usize = 1;
/// Index of the value channel in an HSV triple.
pub const VALUE: usize = 2;

/// Apply hue, saturation and brightness deltas to HSV pixels in place.
///
/// Each delta of exactly 0 is skipped.
pub fn adjust_hsv(hsv: &mut [u8], hue: i32, saturation: i32, brightness: i32) {
    if hue != 0 {
        rotate_hue(hsv, hue);
    }
    if saturation != 0 {
        add_saturating(hsv, SATURATION, saturation);
    }
    if brightness != 0 {
        add_saturating(hsv, VALUE, brightness);
    }
}

/// Rotate the hue channel by `delta` half-degrees.
///
/// The sum is formed in `i32` and wrapped once: +180 if negative, -180 if
/// above 180. A sum of exactly 180 is kept.
pub fn rotate_hue(hsv: &mut [u8], delta: i32) {
    for chunk in hsv.chunks_exact_mut(CHANNELS) {
        chunk[HUE] = wrap_hue(chunk[HUE] as i32 + delta);
    }
}

#[inline]
fn wrap_hue(h: i32) -> u8 {
    let h = if h < 0 {
        h + HUE_RANGE
    } else if h > HUE_RANGE {
        h - HUE_RANGE
    } else {
        h
    };
    debug_assert!((0..=HUE_RANGE).contains(&h), "hue {h} outside wheel after wrap");
    h as u8
}

/// Add `delta` to one channel, clamping to `[0, 255]`.
pub fn add_saturating(pixels: &mut [u8], channel: usize, delta: i32) {
    debug_assert!(channel < CHANNELS);
    for chunk in pixels.chunks_exact_mut(CHANNELS) {
        chunk[channel] = (chunk[channel] as i32 + delta).clamp(0, 255) as u8;
    }
}

/// Equalize the value channel of HSV pixels in place.
pub fn equalize_value(hsv: &mut [u8], width: usize, height: usize, mode: EqualizeMode) {
    match mode {
        EqualizeMode::None => {}
        EqualizeMode::HistogramEq => equalize_channel(hsv, VALUE),
        _ => {
            let Some(clip_limit) = mode.clip_limit() else {
                return;
            };
            let plane: Vec<u8> = hsv.chunks_exact(CHANNELS).map(|p| p[VALUE]).collect();
            let equalized = clahe(&plane, width, height, clip_limit);
            for (chunk, v) in hsv.chunks_exact_mut(CHANNELS).zip(equalized) {
                chunk[VALUE] = v;
            }
        }
    }
}
