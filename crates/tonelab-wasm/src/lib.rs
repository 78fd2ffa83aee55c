//! Tonelab WASM - WebAssembly bindings for Tonelab
//!
//! This crate exposes the tonelab-core pipeline to JavaScript/TypeScript
//! control surfaces.
//!
//! # Module Structure
//!
//! - `params` - Parameter set with per-control getters/setters and reset
//! - `types` - WASM-compatible wrapper for BGR image data
//! - `adjust` - Pipeline entry point
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsBgrImage, ParameterSet, apply_adjustments } from '@tonelab/wasm';
//!
//! await init();
//!
//! const source = new JsBgrImage(width, height, bgrPixels);
//! const params = new ParameterSet();
//! slider.oninput = () => {
//!   params.brightness = slider.value;
//!   viewer.showProcessed(apply_adjustments(source, params));
//! };
//! ```

use wasm_bindgen::prelude::*;

mod adjust;
mod params;
mod types;

pub use adjust::apply_adjustments;
pub use params::{equalize_labels, parameter_specs, ParameterSet};
pub use types::JsBgrImage;

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
