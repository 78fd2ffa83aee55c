//! Luminance calculation using ITU-R BT.601 coefficients.
//!
//! The grayscale conversion feeding automatic thresholding uses 14-bit
//! fixed-point weights so results are exact integers.

use crate::buffer::{BgrImage, CHANNELS};

const GRAY_SHIFT: u32 = 14;
// BT.601 weights 0.299, 0.587 and 0.114 as round(coefficient * 2^14)
const R2Y: u32 = 4899;
const G2Y: u32 = 9617;
const B2Y: u32 = 1868;

/// Calculate luminance from u8 BGR values (0 to 255).
#[inline]
pub fn luminance_u8(b: u8, g: u8, r: u8) -> u8 {
    let y = b as u32 * B2Y + g as u32 * G2Y + r as u32 * R2Y + (1 << (GRAY_SHIFT - 1));
    (y >> GRAY_SHIFT) as u8
}

/// Convert a BGR image to a single-channel luminance image.
///
/// # Panics
/// Panics if the pixel buffer length does not match the dimensions.
pub fn to_gray_image(image: &BgrImage) -> image::GrayImage {
    assert!(
        image.is_well_formed(),
        "Pixel data size mismatch for {}x{} image: {} bytes",
        image.width,
        image.height,
        image.pixels.len()
    );
    let gray: Vec<u8> = image
        .pixels
        .chunks_exact(CHANNELS)
        .map(|p| luminance_u8(p[0], p[1], p[2]))
        .collect();
    image::GrayImage::from_raw(image.width, image.height, gray)
        .expect("one luminance sample per pixel")
}

#[cfg(test)]
mod tests {
    use super::*;

    const LUMINANCE_R: f32 = 0.299;
    const LUMINANCE_G: f32 = 0.587;
    const LUMINANCE_B: f32 = 0.114;

    #[test]
    fn test_fixed_point_weights_sum() {
        assert_eq!(R2Y + G2Y + B2Y, 1 << GRAY_SHIFT);
        let sum = LUMINANCE_R + LUMINANCE_G + LUMINANCE_B;
        assert!((sum - 1.0).abs() < 1e-6, "Coefficients should sum to 1.0");
    }

    #[test]
    fn test_luminance_gray_preserves_value() {
        for v in 0..=255u8 {
            assert_eq!(luminance_u8(v, v, v), v);
        }
    }

    #[test]
    fn test_luminance_primaries() {
        // 0.299 * 255 ≈ 76.2
        assert_eq!(luminance_u8(0, 0, 255), 76);
        // 0.587 * 255 ≈ 149.7
        assert_eq!(luminance_u8(0, 255, 0), 150);
        // 0.114 * 255 ≈ 29.1
        assert_eq!(luminance_u8(255, 0, 0), 29);
    }

    #[test]
    fn test_fixed_point_matches_float() {
        for b in [0u8, 64, 128, 192, 255] {
            for g in [0u8, 64, 128, 192, 255] {
                for r in [0u8, 64, 128, 192, 255] {
                    let expected = LUMINANCE_B * b as f32 + LUMINANCE_G * g as f32 + LUMINANCE_R * r as f32;
                    let lum = luminance_u8(b, g, r);
                    assert!(
                        (lum as f32 - expected).abs() <= 1.0,
                        "fixed-point and float luminance should match for ({}, {}, {})",
                        b,
                        g,
                        r
                    );
                }
            }
        }
    }

    #[test]
    fn test_to_gray_image_dimensions() {
        let img = BgrImage::filled(4, 3, [255, 0, 0]);
        let gray = to_gray_image(&img);
        assert_eq!(gray.dimensions(), (4, 3));
        assert!(gray.as_raw().iter().all(|&v| v == 29));
    }

    #[test]
    #[should_panic(expected = "Pixel data size mismatch")]
    fn test_to_gray_image_rejects_short_buffer() {
        let img = BgrImage {
            width: 4,
            height: 4,
            pixels: vec![200; 9],
        };
        to_gray_image(&img);
    }
}
