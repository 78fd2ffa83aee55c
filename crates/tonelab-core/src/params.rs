//! Adjustment parameters and their control descriptors.
//!
//! A [`ParameterSet`] is a snapshot of every control value, taken fresh for
//! each pipeline run. Each numeric field has a [`ParameterSpec`] giving its
//! inclusive range, default, and the step sizes a control surface should use.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a parameter value is outside its declared range.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParameterError {
    /// A numeric field lies outside `[min, max]`.
    #[error("{name} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        name: &'static str,
        value: i32,
        min: i32,
        max: i32,
    },

    /// The equalization index does not name a mode.
    #[error("Unknown equalization mode index: {0}")]
    UnknownEqualizeMode(u8),
}

/// Histogram equalization mode applied to the value channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EqualizeMode {
    /// No equalization.
    #[default]
    None,
    /// Global histogram equalization.
    HistogramEq,
    /// CLAHE with clip limit 2.
    ClaheWeak,
    /// CLAHE with clip limit 10.
    ClaheMedium,
    /// CLAHE with clip limit 20.
    ClaheStrong,
    /// CLAHE with clip limit 40.
    ClaheExtreme,
}

impl EqualizeMode {
    /// All modes in menu order.
    pub const ALL: [EqualizeMode; 6] = [
        EqualizeMode::None,
        EqualizeMode::HistogramEq,
        EqualizeMode::ClaheWeak,
        EqualizeMode::ClaheMedium,
        EqualizeMode::ClaheStrong,
        EqualizeMode::ClaheExtreme,
    ];

    /// Mode for a menu index (0 = none ... 5 = extreme CLAHE).
    pub fn from_index(index: u8) -> Result<Self, ParameterError> {
        Self::ALL
            .get(index as usize)
            .copied()
            .ok_or(ParameterError::UnknownEqualizeMode(index))
    }

    /// Menu index of this mode.
    pub fn index(self) -> u8 {
        self as u8
    }

    /// CLAHE clip limit, or `None` for the non-adaptive modes.
    pub fn clip_limit(self) -> Option<f64> {
        match self {
            EqualizeMode::None | EqualizeMode::HistogramEq => None,
            EqualizeMode::ClaheWeak => Some(2.0),
            EqualizeMode::ClaheMedium => Some(10.0),
            EqualizeMode::ClaheStrong => Some(20.0),
            EqualizeMode::ClaheExtreme => Some(40.0),
        }
    }

    /// Human readable label.
    pub fn label(self) -> &'static str {
        match self {
            EqualizeMode::None => "No equalization",
            EqualizeMode::HistogramEq => "Histogram EQ",
            EqualizeMode::ClaheWeak => "Weak CLAHE",
            EqualizeMode::ClaheMedium => "Medium CLAHE",
            EqualizeMode::ClaheStrong => "Strong CLAHE",
            EqualizeMode::ClaheExtreme => "Extreme CLAHE",
        }
    }
}

/// Descriptor for a numeric control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterSpec {
    pub name: &'static str,
    pub min: i32,
    pub max: i32,
    pub default: i32,
    /// Single step increment.
    pub step: i32,
    /// Interval between tick marks.
    pub ticks: i32,
    pub unit: Option<&'static str>,
}

impl ParameterSpec {
    const fn new(name: &'static str, min: i32, max: i32, default: i32, step: i32, ticks: i32) -> Self {
        Self {
            name,
            min,
            max,
            default,
            step,
            ticks,
            unit: None,
        }
    }

    const fn with_unit(mut self, unit: &'static str) -> Self {
        self.unit = Some(unit);
        self
    }

    /// Check `value` against the inclusive range.
    pub fn check(&self, value: i32) -> Result<(), ParameterError> {
        if (self.min..=self.max).contains(&value) {
            Ok(())
        } else {
            Err(ParameterError::OutOfRange {
                name: self.name,
                value,
                min: self.min,
                max: self.max,
            })
        }
    }
}

pub const BRIGHTNESS: ParameterSpec = ParameterSpec::new("brightness", -255, 255, 0, 8, 16);
pub const SATURATION: ParameterSpec = ParameterSpec::new("saturation", -255, 255, 0, 8, 16);
pub const HUE: ParameterSpec = ParameterSpec::new("hue", 0, 180, 0, 5, 10).with_unit("°");
/// Gamma slider; the effective exponent is the slider value divided by 10.
pub const GAMMA: ParameterSpec = ParameterSpec::new("gamma", 1, 50, 10, 1, 10);
pub const SHADOWS: ParameterSpec = ParameterSpec::new("shadows", -100, 100, 0, 2, 10).with_unit("%");
pub const HIGHLIGHTS: ParameterSpec =
    ParameterSpec::new("highlights", -100, 100, 0, 2, 10).with_unit("%");
pub const SWEEP: ParameterSpec = ParameterSpec::new("sweep", 0, 255, 127, 2, 8);
pub const WIDTH: ParameterSpec = ParameterSpec::new("width", 0, 255, 255, 2, 8);
pub const THRESHOLD: ParameterSpec = ParameterSpec::new("threshold", 0, 255, 255, 1, 16);

/// Descriptors for every numeric field, in control-surface order.
pub const PARAMETER_SPECS: [ParameterSpec; 9] = [
    BRIGHTNESS, SATURATION, HUE, GAMMA, SHADOWS, HIGHLIGHTS, SWEEP, WIDTH, THRESHOLD,
];

/// Snapshot of all adjustment controls.
///
/// The default value of every field is a no-op, so `ParameterSet::default()`
/// leaves an image unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParameterSet {
    /// Added to the value channel (-255 to 255)
    pub brightness: i32,
    /// Added to the saturation channel (-255 to 255)
    pub saturation: i32,
    /// Hue rotation in half-degrees (0 to 180)
    pub hue: i32,
    /// Gamma slider (1 to 50, divided by 10)
    pub gamma: i32,
    /// Shadow lift in percent (-100 to 100)
    pub shadows: i32,
    /// Highlight pull in percent (-100 to 100)
    pub highlights: i32,
    /// Center of the contrast window (0 to 255)
    pub sweep: i32,
    /// Width of the contrast window (0 to 255, 255 disables)
    pub width: i32,
    pub equalize: EqualizeMode,
    /// Binarization level (0 = automatic, 255 = off)
    pub threshold: i32,
    pub invert: bool,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            brightness: BRIGHTNESS.default,
            saturation: SATURATION.default,
            hue: HUE.default,
            gamma: GAMMA.default,
            shadows: SHADOWS.default,
            highlights: HIGHLIGHTS.default,
            sweep: SWEEP.default,
            width: WIDTH.default,
            equalize: EqualizeMode::None,
            threshold: THRESHOLD.default,
            invert: false,
        }
    }
}

impl ParameterSet {
    /// Create a parameter set with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore every field to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Check if all values are at their defaults
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Effective gamma exponent (slider / 10).
    pub fn gamma_value(&self) -> f64 {
        f64::from(self.gamma) / 10.0
    }

    /// Whether any stage working in HSV space is active.
    pub fn needs_hsv(&self) -> bool {
        self.brightness != 0 || self.saturation != 0 || self.hue != 0
    }

    /// Check every numeric field against its declared range.
    pub fn validate(&self) -> Result<(), ParameterError> {
        let values = [
            self.brightness,
            self.saturation,
            self.hue,
            self.gamma,
            self.shadows,
            self.highlights,
            self.sweep,
            self.width,
            self.threshold,
        ];
        PARAMETER_SPECS
            .iter()
            .zip(values)
            .try_for_each(|(spec, value)| spec.check(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_specs() {
        let params = ParameterSet::new();
        assert!(params.is_default());
        assert_eq!(params.gamma, 10);
        assert_eq!(params.sweep, 127);
        assert_eq!(params.width, 255);
        assert_eq!(params.threshold, 255);
        assert!((params.gamma_value() - 1.0).abs() < f64::EPSILON);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_reset_restores_every_field() {
        let mut params = ParameterSet {
            brightness: 40,
            saturation: -10,
            hue: 90,
            gamma: 25,
            shadows: 20,
            highlights: -30,
            sweep: 60,
            width: 100,
            equalize: EqualizeMode::ClaheStrong,
            threshold: 0,
            invert: true,
        };
        assert!(!params.is_default());
        params.reset();
        assert_eq!(params, ParameterSet::default());
    }

    #[test]
    fn test_validate_out_of_range() {
        let mut params = ParameterSet::default();
        params.gamma = 0;
        assert_eq!(
            params.validate(),
            Err(ParameterError::OutOfRange {
                name: "gamma",
                value: 0,
                min: 1,
                max: 50
            })
        );

        params.gamma = 10;
        params.hue = 181;
        let err = params.validate().unwrap_err();
        assert_eq!(err.to_string(), "hue = 181 is outside [0, 180]");
    }

    #[test]
    fn test_validate_bounds_inclusive() {
        let params = ParameterSet {
            brightness: -255,
            saturation: 255,
            hue: 180,
            gamma: 50,
            shadows: -100,
            highlights: 100,
            sweep: 0,
            width: 0,
            threshold: 0,
            ..ParameterSet::default()
        };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_needs_hsv() {
        let mut params = ParameterSet::default();
        assert!(!params.needs_hsv());
        params.saturation = -1;
        assert!(params.needs_hsv());
    }

    #[test]
    fn test_equalize_mode_index_round_trip() {
        for (i, mode) in EqualizeMode::ALL.iter().enumerate() {
            assert_eq!(mode.index() as usize, i);
            assert_eq!(EqualizeMode::from_index(i as u8), Ok(*mode));
        }
        assert_eq!(
            EqualizeMode::from_index(6),
            Err(ParameterError::UnknownEqualizeMode(6))
        );
    }

    #[test]
    fn test_clip_limits_increase() {
        let limits: Vec<f64> = EqualizeMode::ALL
            .iter()
            .filter_map(|m| m.clip_limit())
            .collect();
        assert_eq!(limits, vec![2.0, 10.0, 20.0, 40.0]);
        assert_eq!(EqualizeMode::HistogramEq.clip_limit(), None);
    }

    #[test]
    fn test_json_missing_fields_take_defaults() {
        let params: ParameterSet =
            serde_json::from_str(r#"{"brightness": 12, "equalize": "clahe-medium"}"#).unwrap();
        assert_eq!(params.brightness, 12);
        assert_eq!(params.equalize, EqualizeMode::ClaheMedium);
        assert_eq!(params.gamma, 10);
        assert_eq!(params.threshold, 255);
    }

    #[test]
    fn test_json_field_names() {
        let json = serde_json::to_value(ParameterSet::default()).unwrap();
        assert_eq!(json["equalize"], "none");
        assert_eq!(json["sweep"], 127);
        assert_eq!(json["invert"], false);
    }

    #[test]
    fn test_spec_units() {
        assert_eq!(HUE.unit, Some("°"));
        assert_eq!(SHADOWS.unit, Some("%"));
        assert_eq!(BRIGHTNESS.unit, None);
        assert!(PARAMETER_SPECS.iter().all(|s| s.check(s.default).is_ok()));
    }
}
