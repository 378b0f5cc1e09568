pub mod answers;
pub mod engine;
pub mod rubric;
pub mod validation;

pub use answers::*;
pub use engine::{
    calculate_metabolic_age, clamp_metabolic_age, BmiFactor, FactorContribution, Factors,
    GutFactor, MetabolicAgeResult,
};
pub use rubric::{
    activity_impact, calculate_bmi, calculate_gut_score, classify_bmi, classify_gut_score,
    sleep_impact, stress_impact, BmiCategory, GutBand, GutPoints, LifestyleImpact,
};
pub use validation::{validate_answers, ScoreError};
