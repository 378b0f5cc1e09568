//! Unit conversion and numeric input checks for the questionnaire.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::scoring::validation::{Range, AGE_RANGE, HEIGHT_CM_RANGE, WEIGHT_KG_RANGE};

const CM_PER_INCH: f64 = 2.54;
const KG_PER_LB: f64 = 0.45359237;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeightUnit {
    #[default]
    Cm,
    FtIn,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lb,
}

impl fmt::Display for HeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeightUnit::Cm => write!(f, "cm"),
            HeightUnit::FtIn => write!(f, "ft/in"),
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeightUnit::Kg => write!(f, "kg"),
            WeightUnit::Lb => write!(f, "lb"),
        }
    }
}

/// Numeric inputs the questionnaire asks for, in any supported unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericInput {
    Age,
    HeightCm,
    WeightKg,
    HeightFt,
    HeightIn,
    WeightLb,
}

impl NumericInput {
    pub fn range(&self) -> Range {
        match self {
            NumericInput::Age => AGE_RANGE,
            NumericInput::HeightCm => HEIGHT_CM_RANGE,
            NumericInput::WeightKg => WEIGHT_KG_RANGE,
            NumericInput::HeightFt => Range::new(3.0, 7.0),
            NumericInput::HeightIn => Range::new(0.0, 11.0),
            NumericInput::WeightLb => Range::new(77.0, 397.0),
        }
    }
}

/// A user-facing message when `value` is unusable for `input`, or `None`.
pub fn validate_number(input: NumericInput, value: f64) -> Option<String> {
    if value.is_nan() {
        return Some("Enter a number".to_string());
    }
    let range = input.range();
    if !range.contains(value) {
        return Some(format!("Keep it between {}–{}", range.min, range.max));
    }
    None
}

fn clamp_to(value: f64, range: Range) -> f64 {
    value.max(range.min).min(range.max)
}

/// Height in centimeters, clamped into the accepted range.
pub fn feet_inches_to_cm(feet: f64, inches: f64) -> f64 {
    let total_inches = feet * 12.0 + inches;
    clamp_to(total_inches * CM_PER_INCH, HEIGHT_CM_RANGE)
}

/// Clamp a centimeter height into the accepted range.
pub fn cm_to_cm(cm: f64) -> f64 {
    clamp_to(cm, HEIGHT_CM_RANGE)
}

/// Weight in kilograms, clamped into the accepted range.
pub fn lb_to_kg(lb: f64) -> f64 {
    clamp_to(lb * KG_PER_LB, WEIGHT_KG_RANGE)
}

/// Clamp a kilogram weight into the accepted range.
pub fn kg_to_kg(kg: f64) -> f64 {
    clamp_to(kg, WEIGHT_KG_RANGE)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Correction {
    pub corrected: f64,
    pub message: String,
}

/// Suggest a fix for an obvious height typo: a slipped decimal point
/// (1755 for 175.5) or a height typed in meters (1.75).
pub fn autocorrect_height_cm(value: f64) -> Option<Correction> {
    if HEIGHT_CM_RANGE.contains(value) {
        return None;
    }
    let corrected = if HEIGHT_CM_RANGE.contains(value / 10.0) {
        value / 10.0
    } else if HEIGHT_CM_RANGE.contains(value * 100.0) {
        (value * 100.0).round()
    } else {
        return None;
    };

    Some(Correction {
        corrected,
        message: format!("Did you mean {} cm?", corrected),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_number_in_range() {
        assert_eq!(validate_number(NumericInput::Age, 30.0), None);
        assert_eq!(validate_number(NumericInput::HeightIn, 0.0), None);
    }

    #[test]
    fn test_validate_number_out_of_range_message() {
        assert_eq!(
            validate_number(NumericInput::Age, 12.0),
            Some("Keep it between 16–90".to_string())
        );
        assert_eq!(
            validate_number(NumericInput::WeightLb, 400.0),
            Some("Keep it between 77–397".to_string())
        );
    }

    #[test]
    fn test_validate_number_nan() {
        assert_eq!(
            validate_number(NumericInput::HeightCm, f64::NAN),
            Some("Enter a number".to_string())
        );
    }

    #[test]
    fn test_feet_inches_conversion() {
        // 5'7" = 67in = 170.18cm
        assert!((feet_inches_to_cm(5.0, 7.0) - 170.18).abs() < 1e-9);
    }

    #[test]
    fn test_conversions_clamp() {
        assert_eq!(feet_inches_to_cm(3.0, 0.0), 120.0);
        assert_eq!(feet_inches_to_cm(7.0, 11.0), 210.0);
        assert_eq!(lb_to_kg(50.0), 35.0);
        assert_eq!(kg_to_kg(250.0), 180.0);
        assert_eq!(cm_to_cm(175.0), 175.0);
    }

    #[test]
    fn test_lb_to_kg() {
        assert!((lb_to_kg(154.0) - 69.853225).abs() < 1e-6);
    }

    #[test]
    fn test_autocorrect_slipped_decimal() {
        let fix = autocorrect_height_cm(1755.0).unwrap();
        assert_eq!(fix.corrected, 175.5);
        assert_eq!(fix.message, "Did you mean 175.5 cm?");
    }

    #[test]
    fn test_autocorrect_meters() {
        let fix = autocorrect_height_cm(1.75).unwrap();
        assert_eq!(fix.corrected, 175.0);
    }

    #[test]
    fn test_autocorrect_leaves_plausible_and_hopeless_values() {
        assert_eq!(autocorrect_height_cm(175.0), None);
        assert_eq!(autocorrect_height_cm(255.0), None);
        assert_eq!(autocorrect_height_cm(50.0), None);
        assert_eq!(autocorrect_height_cm(9000.0), None);
    }

    #[test]
    fn test_unit_serde_names() {
        assert_eq!(serde_json::to_string(&HeightUnit::FtIn).unwrap(), "\"ftin\"");
        assert_eq!(serde_json::to_string(&WeightUnit::Lb).unwrap(), "\"lb\"");
    }
}
