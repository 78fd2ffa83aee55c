//! Single-channel histograms and global histogram equalization.

use crate::buffer::CHANNELS;
use crate::lut::ToneLut;

/// Number of bins for 8-bit data.
pub const BINS: usize = 256;

/// Compute the histogram of one channel of packed 3-channel pixels.
///
/// # Performance
/// Single pass, O(n) in the number of pixels, constant memory (1KB for bins).
pub fn channel_histogram(pixels: &[u8], channel: usize) -> [u32; BINS] {
    debug_assert!(channel < CHANNELS);
    let mut hist = [0u32; BINS];
    for chunk in pixels.chunks_exact(CHANNELS) {
        hist[chunk[channel] as usize] += 1;
    }
    hist
}

/// Build the equalization table for a histogram.
///
/// The lowest populated level maps to 0 and the cumulative count is spread
/// linearly over the remaining levels. A histogram with a single populated
/// level (or none) yields the identity table.
pub fn equalization_lut(hist: &[u32; BINS]) -> ToneLut {
    let total: u64 = hist.iter().map(|&c| c as u64).sum();
    let Some(first) = hist.iter().position(|&c| c > 0) else {
        return ToneLut::identity();
    };
    if hist[first] as u64 == total {
        return ToneLut::identity();
    }

    let scale = 255.0 / (total - hist[first] as u64) as f32;
    // Levels up to and including the first populated one map to 0.
    let mut lut = ToneLut { lut: [0; BINS] };
    let mut sum = 0u64;
    for i in first + 1..BINS {
        sum += hist[i] as u64;
        lut.lut[i] = (sum as f32 * scale).round_ties_even().clamp(0.0, 255.0) as u8;
    }
    lut
}

/// Equalize one channel of packed 3-channel pixels in place.
pub fn equalize_channel(pixels: &mut [u8], channel: usize) {
    let hist = channel_histogram(pixels, channel);
    equalization_lut(&hist).apply_channel(pixels, channel);
}
