//! Fixed scoring tables.
//!
//! Every threshold, point value and impact used by the engine lives here.
//! Impacts are signed years added to the actual age: negative values make
//! the metabolic age younger, positive values older.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::answers::{
    Activity, AnswerField, Bloating, Bowel, Energy, Fermented, Hydration, Sensitivities, Sleep,
    Stress, Timing, UserAnswers, Vegetables,
};

/// Upper bound of the gut score.
pub const GUT_SCORE_MAX: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    Healthy,
    Overweight,
    #[serde(rename = "Obesity I")]
    ObesityI,
    #[serde(rename = "Obesity II+")]
    ObesityII,
}

impl BmiCategory {
    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Healthy => "Healthy",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::ObesityI => "Obesity I",
            BmiCategory::ObesityII => "Obesity II+",
        }
    }

    pub fn impact(&self) -> f64 {
        match self {
            BmiCategory::Underweight => 1.0,
            BmiCategory::Healthy => 0.0,
            BmiCategory::Overweight => 1.0,
            BmiCategory::ObesityI => 3.0,
            BmiCategory::ObesityII => 5.0,
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// BMI bands as exclusive upper bounds, checked low to high.
/// Anything at or above the last bound is Obesity II+.
const BMI_BANDS: [(f64, BmiCategory); 4] = [
    (18.5, BmiCategory::Underweight),
    (25.0, BmiCategory::Healthy),
    (30.0, BmiCategory::Overweight),
    (35.0, BmiCategory::ObesityI),
];

/// Body mass index from weight in kilograms and height in centimeters.
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// Classify an unrounded BMI value. First matching band wins.
pub fn classify_bmi(bmi: f64) -> BmiCategory {
    BMI_BANDS
        .iter()
        .find(|(upper, _)| bmi < *upper)
        .map(|(_, category)| *category)
        .unwrap_or(BmiCategory::ObesityII)
}

/// Round to one decimal, half away from zero.
pub fn round_bmi(bmi: f64) -> f64 {
    (bmi * 10.0).round() / 10.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GutBand {
    High,
    Adequate,
    Low,
}

impl GutBand {
    pub fn label(&self) -> &'static str {
        match self {
            GutBand::High => "High",
            GutBand::Adequate => "Adequate",
            GutBand::Low => "Low",
        }
    }

    pub fn impact(&self) -> f64 {
        match self {
            GutBand::High => -2.0,
            GutBand::Adequate => 0.0,
            GutBand::Low => 2.0,
        }
    }
}

impl fmt::Display for GutBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a gut score, high to low. First match wins.
pub fn classify_gut_score(score: u32) -> GutBand {
    if score >= 80 {
        GutBand::High
    } else if score >= 50 {
        GutBand::Adequate
    } else {
        GutBand::Low
    }
}

/// Points a categorical answer contributes to the gut score.
pub trait GutPoints {
    /// Best possible points for this question.
    const MAX: u32;

    fn points(&self) -> u32;
}

impl GutPoints for Bowel {
    const MAX: u32 = 15;

    fn points(&self) -> u32 {
        match self {
            Bowel::Daily => 15,
            Bowel::Sometimes => 10,
            Bowel::Rare => 5,
            Bowel::Unknown => 0,
        }
    }
}

impl GutPoints for Bloating {
    const MAX: u32 = 15;

    fn points(&self) -> u32 {
        match self {
            Bloating::Never => 15,
            Bloating::Sometimes => 10,
            Bloating::Often => 5,
            Bloating::Unknown => 0,
        }
    }
}

impl GutPoints for Energy {
    const MAX: u32 = 10;

    fn points(&self) -> u32 {
        match self {
            Energy::Energized => 10,
            Energy::Normal => 7,
            Energy::Sluggish => 3,
            Energy::Unknown => 0,
        }
    }
}

impl GutPoints for Sensitivities {
    const MAX: u32 = 10;

    fn points(&self) -> u32 {
        match self {
            Sensitivities::None => 10,
            Sensitivities::Few => 7,
            Sensitivities::Many => 3,
            Sensitivities::Unknown => 0,
        }
    }
}

impl GutPoints for Fermented {
    const MAX: u32 = 15;

    fn points(&self) -> u32 {
        match self {
            Fermented::Daily => 15,
            Fermented::ThreeToFive => 12,
            Fermented::OneToTwo => 8,
            Fermented::Rare => 3,
            Fermented::Unknown => 0,
        }
    }
}

impl GutPoints for Vegetables {
    const MAX: u32 = 20;

    fn points(&self) -> u32 {
        match self {
            Vegetables::High => 20,
            Vegetables::Mid => 12,
            Vegetables::Low => 5,
            Vegetables::Unknown => 0,
        }
    }
}

impl GutPoints for Hydration {
    const MAX: u32 = 5;

    fn points(&self) -> u32 {
        match self {
            Hydration::EightPlus => 5,
            Hydration::FiveToSeven => 3,
            Hydration::UnderFive => 1,
            Hydration::Unknown => 0,
        }
    }
}

impl GutPoints for Timing {
    const MAX: u32 = 10;

    fn points(&self) -> u32 {
        match self {
            Timing::Regular => 10,
            Timing::Somewhat => 5,
            Timing::Chaotic | Timing::Unknown => 0,
        }
    }
}

/// One question's share of the gut score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GutComponent {
    pub field: AnswerField,
    pub points: u32,
    pub max: u32,
}

fn component<T: GutPoints>(field: AnswerField, answer: &T) -> GutComponent {
    GutComponent {
        field,
        points: answer.points(),
        max: T::MAX,
    }
}

/// Per-question gut points, in questionnaire order.
pub fn gut_components(answers: &UserAnswers) -> [GutComponent; 8] {
    [
        component(AnswerField::Bowel, &answers.bowel),
        component(AnswerField::Bloating, &answers.bloating),
        component(AnswerField::Energy, &answers.energy),
        component(AnswerField::Sensitivities, &answers.sensitivities),
        component(AnswerField::Fermented, &answers.fermented),
        component(AnswerField::Vegetables, &answers.vegetables),
        component(AnswerField::Hydration, &answers.hydration),
        component(AnswerField::Timing, &answers.timing),
    ]
}

/// Sum of the eight gut questions, capped at [`GUT_SCORE_MAX`].
pub fn calculate_gut_score(answers: &UserAnswers) -> u32 {
    let total: u32 = gut_components(answers).iter().map(|c| c.points).sum();
    total.min(GUT_SCORE_MAX)
}

/// A labelled impact from a fixed lookup table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifestyleImpact {
    pub label: String,
    pub impact: f64,
}

impl LifestyleImpact {
    fn new(label: &str, impact: f64) -> Self {
        Self {
            label: label.to_string(),
            impact,
        }
    }

    fn unknown() -> Self {
        Self::new("Unknown", 0.0)
    }
}

pub fn sleep_impact(sleep: Sleep) -> LifestyleImpact {
    match sleep {
        Sleep::Great => LifestyleImpact::new("Great (7-9 hrs)", -0.5),
        Sleep::Okay => LifestyleImpact::new("Okay (5-7 hrs)", 0.5),
        Sleep::Poor => LifestyleImpact::new("Poor (<5 or >10 hrs)", 1.5),
        Sleep::Unknown => LifestyleImpact::unknown(),
    }
}

pub fn activity_impact(activity: Activity) -> LifestyleImpact {
    match activity {
        Activity::VeryActive => LifestyleImpact::new("Very Active", -0.5),
        Activity::Somewhat => LifestyleImpact::new("Somewhat Active", 0.5),
        Activity::NotMuch => LifestyleImpact::new("Not Much", 2.0),
        Activity::Unknown => LifestyleImpact::unknown(),
    }
}

pub fn stress_impact(stress: Stress) -> LifestyleImpact {
    match stress {
        Stress::Calm => LifestyleImpact::new("Calm & Peaceful", 0.0),
        Stress::Managing => LifestyleImpact::new("Managing Okay", 0.5),
        Stress::Stressed => LifestyleImpact::new("Pretty Stressed", 1.0),
        Stress::Overwhelmed => LifestyleImpact::new("Overwhelmed", 2.0),
        Stress::Unknown => LifestyleImpact::unknown(),
    }
}
