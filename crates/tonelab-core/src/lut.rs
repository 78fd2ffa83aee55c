//! 256-entry lookup tables for 8-bit tone mapping.
//!
//! Gamma and the linear lift/window ramps are built once per pipeline run and
//! applied by table lookup, so per-pixel cost is a single index.

use crate::buffer::CHANNELS;

// ============================================================================
// LUT Type
// ============================================================================

/// Pre-computed 256-entry lookup table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToneLut {
    /// LUT values: lut[input] = output
    pub lut: [u8; 256],
}

impl ToneLut {
    /// Create identity LUT (no change).
    pub fn identity() -> Self {
        let mut lut = [0u8; 256];
        for (i, lut_value) in lut.iter_mut().enumerate() {
            *lut_value = i as u8;
        }
        Self { lut }
    }

    /// Check if this LUT is identity.
    pub fn is_identity(&self) -> bool {
        self.lut.iter().enumerate().all(|(i, &v)| v == i as u8)
    }

    /// Gamma correction table: `round((i / 255)^(1 / gamma) * 255)`.
    ///
    /// `gamma` must be positive.
    pub fn gamma(gamma: f64) -> Self {
        debug_assert!(gamma > 0.0, "gamma must be positive, got {gamma}");
        let inverse = 1.0 / gamma;
        let mut lut = [0u8; 256];
        for (i, lut_value) in lut.iter_mut().enumerate() {
            let y = (i as f64 / 255.0).powf(inverse) * 255.0;
            *lut_value = y.round().clamp(0.0, 255.0) as u8;
        }
        Self { lut }
    }

    /// Linear ramp that pulls the low end up by `low` levels and the high end
    /// down by `high` levels.
    ///
    /// The ramp runs through two anchors. A non-negative `low` maps input
    /// `low` to 0; a negative one maps input 0 to `-low`. Likewise a
    /// non-negative `high` maps input `255 - high` to 255 and a negative one
    /// maps input 255 to `255 + high`. Outputs are clamped to `[0, 255]` and
    /// truncated. When the anchors meet or cross the ramp collapses into a
    /// step at the low anchor.
    pub fn lift(low: i32, high: i32) -> Self {
        let (x1, y1) = if low >= 0 { (low, 0) } else { (0, -low) };
        let (x2, y2) = if high >= 0 { (255 - high, 255) } else { (255, 255 + high) };

        let mut lut = [0u8; 256];
        if x2 <= x1 {
            for (i, lut_value) in lut.iter_mut().enumerate() {
                let y = if (i as i32) < x1 { y1 } else { y2 };
                *lut_value = y.clamp(0, 255) as u8;
            }
            return Self { lut };
        }

        let (x1, y1, x2, y2) = (x1 as f64, y1 as f64, x2 as f64, y2 as f64);
        for (i, lut_value) in lut.iter_mut().enumerate() {
            let x = i as f64;
            let y = (x * (y1 - y2) + x1 * y2 - y1 * x2) / (x1 - x2);
            *lut_value = y.clamp(0.0, 255.0) as u8;
        }
        Self { lut }
    }

    /// Map a single value.
    #[inline]
    pub fn map(&self, value: u8) -> u8 {
        self.lut[value as usize]
    }

    /// Apply this LUT to every channel of packed pixels in place.
    pub fn apply(&self, pixels: &mut [u8]) {
        for value in pixels.iter_mut() {
            *value = self.lut[*value as usize];
        }
    }

    /// Apply this LUT to one channel of packed 3-channel pixels in place.
    pub fn apply_channel(&self, pixels: &mut [u8], channel: usize) {
        debug_assert!(channel < CHANNELS);
        for chunk in pixels.chunks_exact_mut(CHANNELS) {
            chunk[channel] = self.lut[chunk[channel] as usize];
        }
    }
}

impl Default for ToneLut {
    fn default() -> Self {
        Self::identity()
    }
}

/// Ramp for the shadows control (percent, -100 to 100).
pub fn shadows_lut(shadows: i32) -> ToneLut {
    ToneLut::lift(percent_to_levels(shadows), 0)
}

/// Ramp for the highlights control (percent, -100 to 100).
pub fn highlights_lut(highlights: i32) -> ToneLut {
    ToneLut::lift(0, percent_to_levels(highlights))
}

/// Ramp restricting contrast to a window of `width` levels centered on `sweep`.
pub fn window_lut(sweep: i32, width: i32) -> ToneLut {
    let radius = width / 2;
    let low = (sweep - radius).max(0);
    let high = 255 - (sweep + radius).min(255);
    ToneLut::lift(low, high)
}

/// Percent of the 8-bit range, truncated toward zero.
fn percent_to_levels(percent: i32) -> i32 {
    percent * 255 / 100
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: ramps with non-negative anchors never decrease.
        #[test]
        fn prop_lift_monotonic(low in 0i32..=255, high in 0i32..=255) {
            let lut = ToneLut::lift(low, high);
            prop_assert!(lut.lut.windows(2).all(|w| w[0] <= w[1]));
        }

        /// Property: every window setting yields a non-decreasing ramp.
        #[test]
        fn prop_window_monotonic(sweep in 0i32..=255, width in 0i32..=254) {
            let lut = window_lut(sweep, width);
            prop_assert!(lut.lut.windows(2).all(|w| w[0] <= w[1]));
        }

        /// Property: gamma tables keep the endpoints fixed.
        #[test]
        fn prop_gamma_endpoints(slider in 1i32..=50) {
            let lut = ToneLut::gamma(slider as f64 / 10.0);
            prop_assert_eq!(lut.map(0), 0);
            prop_assert_eq!(lut.map(255), 255);
        }
    }
}
