//! Tonelab Core - Tone adjustment pipeline
//!
//! This crate turns a source BGR image and a [`ParameterSet`] into an adjusted
//! image by running a fixed sequence of per-pixel stages: hue/saturation/
//! brightness, gamma, shadow and highlight lift, a sweep/width contrast
//! window, histogram equalization, thresholding and inversion.
//!
//! [`apply`] is a pure function. It never modifies the source image and keeps
//! no state between calls, so a control surface can simply call it again with
//! a fresh snapshot whenever a control changes.

pub mod adjustments;
pub mod buffer;
pub mod clahe;
pub mod color;
pub mod histogram;
pub mod lut;
pub mod luminance;
pub mod params;
pub mod pipeline;
pub mod threshold;

pub use buffer::{BgrImage, ImageError};
pub use color::ColorSpace;
pub use lut::ToneLut;
pub use params::{EqualizeMode, ParameterError, ParameterSet, ParameterSpec, PARAMETER_SPECS};
pub use pipeline::{active_stages, apply, Stage};
