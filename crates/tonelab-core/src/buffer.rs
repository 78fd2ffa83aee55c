//! Packed 8-bit BGR image buffer.
//!
//! Pixels are stored in blue-green-red order, the storage and display encoding
//! the pipeline works in. Conversions to and from the `image` crate's RGB
//! buffers swap the channel order.

use thiserror::Error;

/// Number of channels per pixel.
pub const CHANNELS: usize = 3;

/// Error types for image construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImageError {
    /// The pixel buffer length does not match `width * height * 3`.
    #[error("Pixel buffer size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// Width or height is zero.
    #[error("Image dimensions must be non-zero, got {width}x{height}")]
    EmptyDimensions { width: u32, height: u32 },
}

/// An image with BGR pixel data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BgrImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// BGR pixel data in row-major order (3 bytes per pixel).
    pub pixels: Vec<u8>,
}

impl BgrImage {
    /// Create a new BgrImage, validating the buffer length.
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, ImageError> {
        if width == 0 || height == 0 {
            return Err(ImageError::EmptyDimensions { width, height });
        }
        let expected = buffer_len(width, height);
        if pixels.len() != expected {
            return Err(ImageError::SizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create an image where every pixel has the same BGR value.
    pub fn filled(width: u32, height: u32, bgr: [u8; 3]) -> Self {
        let count = width as usize * height as usize;
        let mut pixels = Vec::with_capacity(count * CHANNELS);
        for _ in 0..count {
            pixels.extend_from_slice(&bgr);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a BgrImage from an image::RgbImage.
    pub fn from_rgb_image(img: &image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        let mut pixels = img.as_raw().clone();
        swap_red_blue(&mut pixels);
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Convert to an image::RgbImage.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        let mut pixels = self.pixels.clone();
        swap_red_blue(&mut pixels);
        image::RgbImage::from_raw(self.width, self.height, pixels)
    }

    /// BGR triple at (x, y).
    ///
    /// # Panics
    /// Panics if the coordinates are out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        let i = (y as usize * self.width as usize + x as usize) * CHANNELS;
        [self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]]
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Whether the buffer length agrees with the dimensions.
    pub(crate) fn is_well_formed(&self) -> bool {
        self.pixels.len() == buffer_len(self.width, self.height)
    }
}

fn buffer_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * CHANNELS
}

fn swap_red_blue(pixels: &mut [u8]) {
    for chunk in pixels.chunks_exact_mut(CHANNELS) {
        chunk.swap(0, 2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_valid() {
        let img = BgrImage::from_raw(2, 1, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(img.pixel_count(), 2);
        assert_eq!(img.pixel(1, 0), [4, 5, 6]);
        assert!(img.is_well_formed());
    }

    #[test]
    fn test_from_raw_size_mismatch() {
        let err = BgrImage::from_raw(2, 2, vec![0; 5]).unwrap_err();
        assert_eq!(
            err,
            ImageError::SizeMismatch {
                expected: 12,
                actual: 5
            }
        );
        assert_eq!(
            err.to_string(),
            "Pixel buffer size mismatch: expected 12 bytes, got 5"
        );
    }

    #[test]
    fn test_from_raw_empty_dimensions() {
        let err = BgrImage::from_raw(0, 4, vec![]).unwrap_err();
        assert_eq!(err, ImageError::EmptyDimensions { width: 0, height: 4 });
    }

    #[test]
    fn test_filled() {
        let img = BgrImage::filled(3, 2, [10, 20, 30]);
        assert_eq!(img.pixels.len(), 18);
        assert!(img.pixels.chunks_exact(3).all(|p| p == [10, 20, 30]));
    }

    #[test]
    fn test_rgb_conversion_swaps_channels() {
        let rgb = image::RgbImage::from_raw(1, 1, vec![255, 128, 0]).unwrap();
        let bgr = BgrImage::from_rgb_image(&rgb);
        assert_eq!(bgr.pixels, vec![0, 128, 255]);

        let back = bgr.to_rgb_image().unwrap();
        assert_eq!(back.as_raw(), rgb.as_raw());
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_pixel_out_of_bounds() {
        BgrImage::filled(1, 1, [0, 0, 0]).pixel(1, 0);
    }
}
