use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::answers::UserAnswers;
use super::rubric::{
    activity_impact, calculate_bmi, calculate_gut_score, classify_bmi, classify_gut_score,
    round_bmi, sleep_impact, stress_impact, BmiCategory, GutBand, LifestyleImpact,
};
use super::validation::{check_answers, ScoreError};

/// Metabolic age never drops more than this many years below actual age.
pub const MAX_YEARS_YOUNGER: f64 = 5.0;
/// Metabolic age never rises more than this many years above actual age.
pub const MAX_YEARS_OLDER: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GutFactor {
    pub score: u32,
    pub band: GutBand,
    pub impact: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmiFactor {
    /// BMI rounded to one decimal for display.
    pub value: f64,
    pub category: BmiCategory,
    pub impact: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Factors {
    pub gut: GutFactor,
    pub bmi: BmiFactor,
    pub sleep: LifestyleImpact,
    pub activity: LifestyleImpact,
    pub stress: LifestyleImpact,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetabolicAgeResult {
    pub actual_age: f64,
    pub metabolic_age: f64,
    pub age_difference: f64,
    /// Sum of all factor impacts before clamping.
    pub total_impact: f64,
    pub factors: Factors,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FactorContribution {
    pub label: String,       // e.g. "Gut Health", "Weight Status"
    pub description: String, // e.g. "Score: 66 (Adequate)", "BMI: 24.0 (Healthy)"
    pub impact: f64,
    pub before: f64, // Running age before this factor
    pub after: f64,  // Running age after this factor
}

impl MetabolicAgeResult {
    /// Per-factor breakdown as a running waterfall starting at the actual age.
    ///
    /// The waterfall is unclamped; `metabolic_age` may differ from the last
    /// `after` when the clamp band kicked in.
    pub fn contributions(&self) -> Vec<FactorContribution> {
        let f = &self.factors;
        let rows = [
            (
                "Gut Health",
                format!("Score: {} ({})", f.gut.score, f.gut.band),
                f.gut.impact,
            ),
            (
                "Weight Status",
                format!("BMI: {:.1} ({})", f.bmi.value, f.bmi.category),
                f.bmi.impact,
            ),
            ("Sleep Quality", f.sleep.label.clone(), f.sleep.impact),
            ("Activity Level", f.activity.label.clone(), f.activity.impact),
            ("Stress Level", f.stress.label.clone(), f.stress.impact),
        ];

        let mut running = self.actual_age;
        rows.into_iter()
            .map(|(label, description, impact)| {
                let before = running;
                running += impact;
                FactorContribution {
                    label: label.to_string(),
                    description,
                    impact,
                    before,
                    after: running,
                }
            })
            .collect()
    }

    /// True when the raw sum of impacts fell outside the clamp band.
    pub fn was_clamped(&self) -> bool {
        self.metabolic_age != self.actual_age + self.total_impact
    }
}

/// Clamp a raw metabolic age to `[actual - 5, actual + 10]`.
pub fn clamp_metabolic_age(actual_age: f64, raw: f64) -> f64 {
    raw.min(actual_age + MAX_YEARS_OLDER)
        .max(actual_age - MAX_YEARS_YOUNGER)
}

/// Score a complete set of answers.
///
/// Numeric answers are checked first; out-of-range or non-finite values are
/// rejected rather than producing a meaningless age. Categorical answers
/// outside their domain score as zero impact.
pub fn calculate_metabolic_age(answers: &UserAnswers) -> Result<MetabolicAgeResult, ScoreError> {
    check_answers(answers)?;

    let unknown = answers.unknown_fields();
    if !unknown.is_empty() {
        warn!(
            "Unrecognised answers scored as zero impact: {}",
            unknown.join(", ")
        );
    }

    let actual_age = answers.age;

    let bmi = calculate_bmi(answers.weight_kg, answers.height_cm);
    let category = classify_bmi(bmi);
    let bmi_factor = BmiFactor {
        value: round_bmi(bmi),
        category,
        impact: category.impact(),
    };
    debug!("bmi {:.3} -> {} ({:+})", bmi, category, bmi_factor.impact);

    let gut_score = calculate_gut_score(answers);
    let band = classify_gut_score(gut_score);
    let gut_factor = GutFactor {
        score: gut_score,
        band,
        impact: band.impact(),
    };
    debug!("gut score {} -> {} ({:+})", gut_score, band, gut_factor.impact);

    let sleep = sleep_impact(answers.sleep);
    let activity = activity_impact(answers.activity);
    let stress = stress_impact(answers.stress);

    let total_impact =
        bmi_factor.impact + gut_factor.impact + sleep.impact + activity.impact + stress.impact;
    let metabolic_age = clamp_metabolic_age(actual_age, actual_age + total_impact);
    debug!(
        "total impact {:+} -> metabolic age {} (actual {})",
        total_impact, metabolic_age, actual_age
    );

    Ok(MetabolicAgeResult {
        actual_age,
        metabolic_age,
        age_difference: metabolic_age - actual_age,
        total_impact,
        factors: Factors {
            gut: gut_factor,
            bmi: bmi_factor,
            sleep,
            activity,
            stress,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::answers::tests::healthy_answers;
    use crate::scoring::{
        Activity, Bloating, Bowel, Energy, Fermented, Hydration, Sensitivities, Sleep, Stress,
        Timing, Vegetables,
    };

    fn poor_gut_answers() -> UserAnswers {
        UserAnswers {
            age: 25.0,
            height_cm: 170.0,
            weight_kg: 78.0,
            bowel: Bowel::Rare,
            bloating: Bloating::Often,
            energy: Energy::Sluggish,
            sensitivities: Sensitivities::Many,
            fermented: Fermented::Rare,
            vegetables: Vegetables::Low,
            hydration: Hydration::UnderFive,
            timing: Timing::Chaotic,
            sleep: Sleep::Okay,
            activity: Activity::Somewhat,
            stress: Stress::Managing,
        }
    }

    fn average_answers() -> UserAnswers {
        UserAnswers {
            age: 40.0,
            height_cm: 170.0,
            weight_kg: 69.4,
            bowel: Bowel::Sometimes,
            bloating: Bloating::Sometimes,
            energy: Energy::Normal,
            sensitivities: Sensitivities::Few,
            fermented: Fermented::ThreeToFive,
            vegetables: Vegetables::Mid,
            hydration: Hydration::FiveToSeven,
            timing: Timing::Somewhat,
            sleep: Sleep::Great,
            activity: Activity::NotMuch,
            stress: Stress::Stressed,
        }
    }

    #[test]
    fn test_golden_healthy_25() {
        let result = calculate_metabolic_age(&healthy_answers()).unwrap();
        assert_eq!(result.factors.bmi.value, 22.0);
        assert_eq!(result.factors.bmi.category, BmiCategory::Healthy);
        assert_eq!(result.factors.gut.score, 100);
        assert_eq!(result.factors.gut.band, GutBand::High);
        assert_eq!(result.total_impact, -3.0);
        assert_eq!(result.metabolic_age, 22.0);
        assert_eq!(result.age_difference, -3.0);
    }

    #[test]
    fn test_golden_poor_gut_25() {
        let result = calculate_metabolic_age(&poor_gut_answers()).unwrap();
        assert_eq!(result.factors.bmi.value, 27.0);
        assert_eq!(result.factors.bmi.category, BmiCategory::Overweight);
        assert_eq!(result.factors.gut.score, 25);
        assert_eq!(result.factors.gut.band, GutBand::Low);
        assert_eq!(result.total_impact, 4.5);
        assert_eq!(result.metabolic_age, 29.5);
        assert_eq!(result.age_difference, 4.5);
    }

    #[test]
    fn test_golden_average_40_follows_point_table() {
        let result = calculate_metabolic_age(&average_answers()).unwrap();
        assert_eq!(result.factors.bmi.value, 24.0);
        assert_eq!(result.factors.bmi.category, BmiCategory::Healthy);
        assert_eq!(result.factors.gut.score, 66);
        assert_eq!(result.factors.gut.band, GutBand::Adequate);
        // Table sum: -0.5 sleep, +2.0 activity, +1.0 stress
        assert_eq!(result.total_impact, 2.5);
        assert_eq!(result.metabolic_age, 42.5);
        assert_eq!(result.age_difference, 2.5);
    }

    #[test]
    fn test_clamps_at_ten_years_older() {
        let mut answers = poor_gut_answers();
        answers.weight_kg = 120.0; // bmi 41.5 -> +5
        answers.sleep = Sleep::Poor;
        answers.activity = Activity::NotMuch;
        answers.stress = Stress::Overwhelmed;

        let result = calculate_metabolic_age(&answers).unwrap();
        assert_eq!(result.total_impact, 12.5);
        assert_eq!(result.metabolic_age, 35.0);
        assert_eq!(result.age_difference, 10.0);
        assert!(result.was_clamped());
    }

    #[test]
    fn test_clamp_band_both_directions() {
        assert_eq!(clamp_metabolic_age(40.0, 30.0), 35.0);
        assert_eq!(clamp_metabolic_age(40.0, 55.0), 50.0);
        assert_eq!(clamp_metabolic_age(40.0, 35.0), 35.0);
        assert_eq!(clamp_metabolic_age(40.0, 50.0), 50.0);
        assert_eq!(clamp_metabolic_age(40.0, 41.5), 41.5);
    }

    #[test]
    fn test_metabolic_age_within_clamp_band_across_inputs() {
        let mut answers = healthy_answers();
        for age in [16.0, 33.0, 90.0] {
            for weight in [35.0, 60.0, 90.0, 180.0] {
                for sleep in Sleep::ALL {
                    for activity in Activity::ALL {
                        for stress in Stress::ALL {
                            for timing in Timing::ALL {
                                answers.age = age;
                                answers.weight_kg = weight;
                                answers.sleep = *sleep;
                                answers.activity = *activity;
                                answers.stress = *stress;
                                answers.timing = *timing;
                                let r = calculate_metabolic_age(&answers).unwrap();
                                assert!(r.metabolic_age >= age - MAX_YEARS_YOUNGER);
                                assert!(r.metabolic_age <= age + MAX_YEARS_OLDER);
                                assert_eq!(r.age_difference, r.metabolic_age - age);
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_idempotent() {
        let answers = average_answers();
        let first = calculate_metabolic_age(&answers).unwrap();
        let second = calculate_metabolic_age(&answers).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            first.metabolic_age.to_bits(),
            second.metabolic_age.to_bits()
        );
    }

    #[test]
    fn test_unknown_lifestyle_answers_score_zero() {
        let mut answers = healthy_answers();
        answers.sleep = Sleep::Unknown;
        answers.activity = Activity::Unknown;
        answers.stress = Stress::Unknown;

        let result = calculate_metabolic_age(&answers).unwrap();
        assert_eq!(result.factors.sleep.label, "Unknown");
        assert_eq!(result.total_impact, -2.0);
        assert_eq!(result.metabolic_age, 23.0);
    }

    #[test]
    fn test_rejects_out_of_range_input() {
        let mut answers = healthy_answers();
        answers.height_cm = 300.0;
        assert!(matches!(
            calculate_metabolic_age(&answers),
            Err(ScoreError::InvalidRange {
                field: "heightCm",
                ..
            })
        ));
    }

    #[test]
    fn test_contributions_waterfall() {
        let result = calculate_metabolic_age(&average_answers()).unwrap();
        let rows = result.contributions();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].label, "Gut Health");
        assert_eq!(rows[0].description, "Score: 66 (Adequate)");
        assert_eq!(rows[1].description, "BMI: 24.0 (Healthy)");
        assert_eq!(rows[0].before, 40.0);
        assert_eq!(rows[4].after, result.metabolic_age);
        assert!(!result.was_clamped());
    }

    #[test]
    fn test_result_json_shape() {
        let result = calculate_metabolic_age(&healthy_answers()).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["actualAge"], 25.0);
        assert_eq!(json["metabolicAge"], 22.0);
        assert_eq!(json["ageDifference"], -3.0);
        assert_eq!(json["factors"]["gut"]["band"], "High");
        assert_eq!(json["factors"]["bmi"]["value"], 22.0);
        assert_eq!(json["factors"]["sleep"]["label"], "Great (7-9 hrs)");

        let parsed: MetabolicAgeResult = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, result);
    }
}
