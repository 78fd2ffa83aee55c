//! Parameter set WASM bindings.
//!
//! The control surface keeps one `ParameterSet`, updates fields as controls
//! move, and hands it to `apply_adjustments` on every change.

use tonelab_core::{EqualizeMode, ParameterError, PARAMETER_SPECS};
use wasm_bindgen::prelude::*;

/// Adjustment parameters wrapper for JavaScript
#[wasm_bindgen]
pub struct ParameterSet {
    inner: tonelab_core::ParameterSet,
}

#[wasm_bindgen]
impl ParameterSet {
    /// Create a parameter set with default values
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: tonelab_core::ParameterSet::new(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn brightness(&self) -> i32 {
        self.inner.brightness
    }

    #[wasm_bindgen(setter)]
    pub fn set_brightness(&mut self, value: i32) {
        self.inner.brightness = value;
    }

    #[wasm_bindgen(getter)]
    pub fn saturation(&self) -> i32 {
        self.inner.saturation
    }

    #[wasm_bindgen(setter)]
    pub fn set_saturation(&mut self, value: i32) {
        self.inner.saturation = value;
    }

    #[wasm_bindgen(getter)]
    pub fn hue(&self) -> i32 {
        self.inner.hue
    }

    #[wasm_bindgen(setter)]
    pub fn set_hue(&mut self, value: i32) {
        self.inner.hue = value;
    }

    /// Gamma slider value (1 to 50, 10 = neutral)
    #[wasm_bindgen(getter)]
    pub fn gamma(&self) -> i32 {
        self.inner.gamma
    }

    #[wasm_bindgen(setter)]
    pub fn set_gamma(&mut self, value: i32) {
        self.inner.gamma = value;
    }

    #[wasm_bindgen(getter)]
    pub fn shadows(&self) -> i32 {
        self.inner.shadows
    }

    #[wasm_bindgen(setter)]
    pub fn set_shadows(&mut self, value: i32) {
        self.inner.shadows = value;
    }

    #[wasm_bindgen(getter)]
    pub fn highlights(&self) -> i32 {
        self.inner.highlights
    }

    #[wasm_bindgen(setter)]
    pub fn set_highlights(&mut self, value: i32) {
        self.inner.highlights = value;
    }

    #[wasm_bindgen(getter)]
    pub fn sweep(&self) -> i32 {
        self.inner.sweep
    }

    #[wasm_bindgen(setter)]
    pub fn set_sweep(&mut self, value: i32) {
        self.inner.sweep = value;
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> i32 {
        self.inner.width
    }

    #[wasm_bindgen(setter)]
    pub fn set_width(&mut self, value: i32) {
        self.inner.width = value;
    }

    /// Equalization mode as a menu index (0 = none, 1 = histogram, 2-5 = CLAHE)
    #[wasm_bindgen(getter)]
    pub fn equalize(&self) -> u8 {
        self.inner.equalize.index()
    }

    /// Set equalization mode by menu index. Unknown indices are rejected and
    /// leave the current mode unchanged.
    pub fn set_equalize(&mut self, value: u8) -> Result<(), JsValue> {
        self.try_set_equalize(value)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Threshold (0 = automatic, 255 = off)
    #[wasm_bindgen(getter)]
    pub fn threshold(&self) -> i32 {
        self.inner.threshold
    }

    #[wasm_bindgen(setter)]
    pub fn set_threshold(&mut self, value: i32) {
        self.inner.threshold = value;
    }

    #[wasm_bindgen(getter)]
    pub fn invert(&self) -> bool {
        self.inner.invert
    }

    #[wasm_bindgen(setter)]
    pub fn set_invert(&mut self, value: bool) {
        self.inner.invert = value;
    }

    /// Restore every control to its default
    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// Check if all parameters are at default values
    pub fn is_default(&self) -> bool {
        self.inner.is_default()
    }

    /// Check every value against its range
    pub fn validate(&self) -> Result<(), JsValue> {
        self.inner
            .validate()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Serialize to JSON for storage
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Deserialize from JSON
    pub fn from_json(value: JsValue) -> Result<ParameterSet, JsValue> {
        let inner: tonelab_core::ParameterSet =
            serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { inner })
    }
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self::new()
    }
}

impl ParameterSet {
    pub(crate) fn inner(&self) -> &tonelab_core::ParameterSet {
        &self.inner
    }

    pub(crate) fn try_set_equalize(&mut self, value: u8) -> Result<(), ParameterError> {
        self.inner.equalize = EqualizeMode::from_index(value)?;
        Ok(())
    }
}

/// Range, default and step sizes for every numeric control.
#[wasm_bindgen]
pub fn parameter_specs() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&PARAMETER_SPECS).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Labels of the equalization modes in menu order.
#[wasm_bindgen]
pub fn equalize_labels() -> Vec<String> {
    EqualizeMode::ALL
        .iter()
        .map(|mode| mode.label().to_string())
        .collect()
}
