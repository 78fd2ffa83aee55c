//! Binarization and inversion of BGR pixels.

use imageproc::contrast::otsu_level;

use crate::buffer::{BgrImage, CHANNELS};
use crate::luminance::to_gray_image;

/// Threshold value that disables binarization.
pub const THRESHOLD_OFF: i32 = 255;
/// Threshold value that selects the level automatically.
pub const THRESHOLD_AUTO: i32 = 0;

/// Binarize every channel independently: values at or above `level` become
/// 255, everything else 0.
pub fn threshold_channels(pixels: &mut [u8], level: u8) {
    for value in pixels.iter_mut() {
        *value = if *value >= level { 255 } else { 0 };
    }
}

/// Binarize the luminance of `image` at the level maximizing between-class
/// variance (Otsu's method), writing the result to all three channels.
///
/// Returns the selected level; luminance strictly above it becomes white.
///
/// # Panics
/// Panics if the pixel buffer length does not match the dimensions.
pub fn auto_threshold(image: &mut BgrImage) -> u8 {
    let gray = to_gray_image(image);
    let level = otsu_level(&gray);
    for (chunk, &y) in image.pixels.chunks_exact_mut(CHANNELS).zip(gray.as_raw()) {
        let v = if y > level { 255 } else { 0 };
        chunk.fill(v);
    }
    level
}

/// Bitwise complement of every channel.
pub fn invert(pixels: &mut [u8]) {
    for value in pixels.iter_mut() {
        *value = !*value;
    }
}
