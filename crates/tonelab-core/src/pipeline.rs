//! The adjustment pipeline.
//!
//! ```text
//! HSV -> Gamma -> Shadows -> Highlights -> Window -> Equalize -> Threshold -> Invert
//! ```
//!
//! Every run starts from a copy of the source image and visits the stages in
//! this fixed order, skipping those whose controls are at their no-op value.
//! Later stages see the cumulative effect of earlier ones. The working buffer
//! carries a [`ColorSpace`] tag and is converted only when the next stage
//! needs the other encoding.

use tracing::{debug, trace};

use crate::adjustments::{adjust_hsv, equalize_value};
use crate::buffer::BgrImage;
use crate::color::{bgr_to_hsv_in_place, hsv_to_bgr_in_place, ColorSpace};
use crate::lut::{highlights_lut, shadows_lut, window_lut, ToneLut};
use crate::params::{EqualizeMode, ParameterSet};
use crate::threshold::{auto_threshold, invert, threshold_channels, THRESHOLD_AUTO, THRESHOLD_OFF};

/// One step of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Hue rotation, saturation and brightness.
    Hsv,
    Gamma,
    Shadows,
    Highlights,
    /// Sweep/width contrast window.
    Window,
    Equalize,
    Threshold,
    Invert,
}

impl Stage {
    /// Stages in execution order.
    pub const ORDER: [Stage; 8] = [
        Stage::Hsv,
        Stage::Gamma,
        Stage::Shadows,
        Stage::Highlights,
        Stage::Window,
        Stage::Equalize,
        Stage::Threshold,
        Stage::Invert,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Stage::Hsv => "hsv",
            Stage::Gamma => "gamma",
            Stage::Shadows => "shadows",
            Stage::Highlights => "highlights",
            Stage::Window => "window",
            Stage::Equalize => "equalize",
            Stage::Threshold => "threshold",
            Stage::Invert => "invert",
        }
    }

    /// Whether this stage changes anything for `params`.
    pub fn is_active(self, params: &ParameterSet) -> bool {
        match self {
            Stage::Hsv => params.needs_hsv(),
            // Unreachable for slider values >= 1, kept as a guard.
            Stage::Gamma => params.gamma_value() != 0.0,
            Stage::Shadows => params.shadows != 0,
            Stage::Highlights => params.highlights != 0,
            Stage::Window => params.width < 255,
            Stage::Equalize => params.equalize != EqualizeMode::None,
            Stage::Threshold => params.threshold < THRESHOLD_OFF,
            Stage::Invert => params.invert,
        }
    }

    /// Encoding the working buffer must hold when this stage runs.
    pub fn color_space(self) -> ColorSpace {
        match self {
            Stage::Hsv | Stage::Equalize => ColorSpace::Hsv,
            _ => ColorSpace::Bgr,
        }
    }

    fn run(self, work: &mut Working, params: &ParameterSet) {
        let pixels = &mut work.image.pixels;
        match self {
            Stage::Hsv => {
                debug!(
                    hue = params.hue,
                    saturation = params.saturation,
                    brightness = params.brightness,
                    "hsv"
                );
                adjust_hsv(pixels, params.hue, params.saturation, params.brightness);
            }
            Stage::Gamma => {
                debug!(gamma = params.gamma_value(), "gamma");
                ToneLut::gamma(params.gamma_value()).apply(pixels);
            }
            Stage::Shadows => {
                debug!(shadows = params.shadows, "shadows");
                shadows_lut(params.shadows).apply(pixels);
            }
            Stage::Highlights => {
                debug!(highlights = params.highlights, "highlights");
                highlights_lut(params.highlights).apply(pixels);
            }
            Stage::Window => {
                debug!(sweep = params.sweep, width = params.width, "window");
                window_lut(params.sweep, params.width).apply(pixels);
            }
            Stage::Equalize => {
                debug!(mode = params.equalize.label(), "equalize");
                let (width, height) = (work.image.width as usize, work.image.height as usize);
                equalize_value(pixels, width, height, params.equalize);
            }
            Stage::Threshold => {
                if params.threshold == THRESHOLD_AUTO {
                    let level = auto_threshold(&mut work.image);
                    debug!(level, "threshold (auto)");
                } else {
                    debug!(level = params.threshold, "threshold");
                    threshold_channels(pixels, params.threshold as u8);
                }
            }
            Stage::Invert => {
                debug!("invert");
                invert(pixels);
            }
        }
    }
}

/// Working copy of the image and the encoding it currently holds.
struct Working {
    image: BgrImage,
    space: ColorSpace,
}

impl Working {
    fn new(source: &BgrImage) -> Self {
        Self {
            image: source.clone(),
            space: ColorSpace::Bgr,
        }
    }

    fn convert_to(&mut self, space: ColorSpace) {
        if self.space == space {
            return;
        }
        trace!(from = ?self.space, to = ?space, "color conversion");
        match space {
            ColorSpace::Hsv => bgr_to_hsv_in_place(&mut self.image.pixels),
            ColorSpace::Bgr => hsv_to_bgr_in_place(&mut self.image.pixels),
        }
        self.space = space;
    }

    fn finish(mut self) -> BgrImage {
        self.convert_to(ColorSpace::Bgr);
        self.image
    }
}

/// Stages that will run for `params`, in execution order.
pub fn active_stages(params: &ParameterSet) -> Vec<Stage> {
    Stage::ORDER
        .into_iter()
        .filter(|stage| stage.is_active(params))
        .collect()
}

/// Produce the adjusted image for `params`.
///
/// `source` is never modified; the result has the same dimensions. Parameters
/// are expected to be within their declared ranges.
///
/// # Panics
/// Panics if the pixel buffer length does not match the dimensions.
pub fn apply(source: &BgrImage, params: &ParameterSet) -> BgrImage {
    assert!(
        source.is_well_formed(),
        "Pixel data size mismatch for {}x{} image: {} bytes",
        source.width,
        source.height,
        source.pixels.len()
    );

    let stages = active_stages(params);
    debug!(
        width = source.width,
        height = source.height,
        stages = stages.len(),
        "applying adjustments"
    );

    let mut work = Working::new(source);
    for stage in stages {
        work.convert_to(stage.color_space());
        stage.run(&mut work, params);
    }
    work.finish()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn image_strategy() -> impl Strategy<Value = BgrImage> {
        (1u32..=12, 1u32..=12).prop_flat_map(|(w, h)| {
            proptest::collection::vec(any::<u8>(), (w * h * 3) as usize)
                .prop_map(move |pixels| BgrImage { width: w, height: h, pixels })
        })
    }

    fn params_strategy() -> impl Strategy<Value = ParameterSet> {
        (
            (-255i32..=255, -255i32..=255, 0i32..=180, 1i32..=50),
            (-100i32..=100, -100i32..=100, 0i32..=255, 0i32..=255),
            (0u8..6, 0i32..=255, any::<bool>()),
        )
            .prop_map(
                |(
                    (brightness, saturation, hue, gamma),
                    (shadows, highlights, sweep, width),
                    (eq, threshold, invert),
                )| ParameterSet {
                    brightness,
                    saturation,
                    hue,
                    gamma,
                    shadows,
                    highlights,
                    sweep,
                    width,
                    equalize: EqualizeMode::ALL[eq as usize],
                    threshold,
                    invert,
                },
            )
    }

    proptest! {
        /// Property: default parameters never change an image.
        #[test]
        fn prop_identity(image in image_strategy()) {
            prop_assert_eq!(apply(&image, &ParameterSet::default()), image);
        }

        /// Property: output dimensions always match input.
        #[test]
        fn prop_dimensions_preserved(image in image_strategy(), params in params_strategy()) {
            let result = apply(&image, &params);
            prop_assert_eq!(result.width, image.width);
            prop_assert_eq!(result.height, image.height);
            prop_assert_eq!(result.pixels.len(), image.pixels.len());
        }

        /// Property: the same inputs always give the same output.
        #[test]
        fn prop_deterministic(image in image_strategy(), params in params_strategy()) {
            prop_assert_eq!(apply(&image, &params), apply(&image, &params));
        }
    }
}
