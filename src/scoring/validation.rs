use thiserror::Error;

use super::answers::{AnswerField, UserAnswers};

/// Inclusive bounds accepted for a numeric answer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

pub const AGE_RANGE: Range = Range::new(16.0, 90.0);
pub const HEIGHT_CM_RANGE: Range = Range::new(120.0, 210.0);
pub const WEIGHT_KG_RANGE: Range = Range::new(35.0, 180.0);

/// Reasons the engine refuses to score a set of answers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoreError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    InvalidRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field} is not a number")]
    NotANumber { field: &'static str },

    #[error("missing answer for {0}")]
    MissingField(&'static str),
}

fn numeric_fields(answers: &UserAnswers) -> [(AnswerField, f64, Range); 3] {
    [
        (AnswerField::Age, answers.age, AGE_RANGE),
        (AnswerField::HeightCm, answers.height_cm, HEIGHT_CM_RANGE),
        (AnswerField::WeightKg, answers.weight_kg, WEIGHT_KG_RANGE),
    ]
}

fn check_value(field: AnswerField, value: f64, range: Range) -> Result<(), ScoreError> {
    if !value.is_finite() {
        return Err(ScoreError::NotANumber {
            field: field.name(),
        });
    }
    if !range.contains(value) {
        return Err(ScoreError::InvalidRange {
            field: field.name(),
            value,
            min: range.min,
            max: range.max,
        });
    }
    Ok(())
}

/// Fail on the first numeric answer that is non-finite or out of range.
pub fn check_answers(answers: &UserAnswers) -> Result<(), ScoreError> {
    for (field, value, range) in numeric_fields(answers) {
        check_value(field, value, range)?;
    }
    Ok(())
}

/// Validate answers before scoring.
/// Returns all validation errors at once (not just the first).
///
/// Categorical answers outside their domain are not errors; they score as
/// zero impact and are only logged.
pub fn validate_answers(answers: &UserAnswers) -> Result<(), Vec<String>> {
    let errors: Vec<String> = numeric_fields(answers)
        .into_iter()
        .filter_map(|(field, value, range)| check_value(field, value, range).err())
        .map(|e| e.to_string())
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::answers::tests::healthy_answers;

    #[test]
    fn test_valid_answers() {
        assert!(validate_answers(&healthy_answers()).is_ok());
        assert!(check_answers(&healthy_answers()).is_ok());
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let mut answers = healthy_answers();
        answers.age = 16.0;
        answers.height_cm = 210.0;
        answers.weight_kg = 35.0;
        assert!(validate_answers(&answers).is_ok());
    }

    #[test]
    fn test_age_out_of_range() {
        let mut answers = healthy_answers();
        answers.age = 15.0;
        let err = check_answers(&answers).unwrap_err();
        assert_eq!(
            err,
            ScoreError::InvalidRange {
                field: "age",
                value: 15.0,
                min: 16.0,
                max: 90.0
            }
        );
        assert_eq!(err.to_string(), "age must be between 16 and 90, got 15");
    }

    #[test]
    fn test_nan_is_rejected() {
        let mut answers = healthy_answers();
        answers.weight_kg = f64::NAN;
        assert_eq!(
            check_answers(&answers).unwrap_err(),
            ScoreError::NotANumber { field: "weightKg" }
        );
    }

    #[test]
    fn test_collects_all_errors() {
        let mut answers = healthy_answers();
        answers.age = 95.0; // Error 1
        answers.height_cm = f64::INFINITY; // Error 2
        answers.weight_kg = 20.0; // Error 3
        let errors = validate_answers(&answers).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors[0].contains("age"));
        assert!(errors[1].contains("heightCm"));
        assert!(errors[2].contains("weightKg"));
    }

    #[test]
    fn test_unknown_enum_is_not_an_error() {
        let mut answers = healthy_answers();
        answers.sleep = crate::scoring::Sleep::Unknown;
        assert!(validate_answers(&answers).is_ok());
    }
}
