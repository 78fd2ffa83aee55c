//! Pipeline WASM bindings.

use crate::params::ParameterSet;
use crate::types::JsBgrImage;
use tonelab_core::{ImageError, ParameterError};
use wasm_bindgen::prelude::*;

/// Errors surfaced to JavaScript by `apply_adjustments`.
#[derive(Debug)]
pub(crate) enum AdjustError {
    Image(ImageError),
    Parameter(ParameterError),
}

impl From<AdjustError> for JsValue {
    fn from(err: AdjustError) -> Self {
        let message = match err {
            AdjustError::Image(e) => e.to_string(),
            AdjustError::Parameter(e) => e.to_string(),
        };
        JsValue::from_str(&message)
    }
}

/// Validate inputs and run the pipeline.
pub(crate) fn try_apply(
    image: &JsBgrImage,
    params: &ParameterSet,
) -> Result<JsBgrImage, AdjustError> {
    params.inner().validate().map_err(AdjustError::Parameter)?;
    let source = image.to_core().map_err(AdjustError::Image)?;
    let result = tonelab_core::apply(&source, params.inner());
    Ok(JsBgrImage::from_core(result))
}

/// Apply all adjustments to an image.
///
/// Always works from the image passed in, so callers should pass the
/// original source rather than a previously adjusted result.
///
/// # Example (TypeScript)
/// ```typescript
/// const params = new ParameterSet();
/// params.gamma = 20;
/// params.threshold = 128;
///
/// const adjusted = apply_adjustments(sourceImage, params);
/// const pixels = adjusted.pixels();
/// ```
#[wasm_bindgen]
pub fn apply_adjustments(image: &JsBgrImage, params: &ParameterSet) -> Result<JsBgrImage, JsValue> {
    Ok(try_apply(image, params)?)
}
