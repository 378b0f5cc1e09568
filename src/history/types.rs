use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring::{BmiCategory, GutBand, MetabolicAgeResult, UserAnswers};

pub const HISTORY_VERSION: u32 = 1;

/// Flat view of a result, as stored in history and sent to the webhook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResults {
    pub actual_age: f64,
    pub metabolic_age: f64,
    pub age_difference: f64,
    pub bmi: f64,
    pub bmi_category: BmiCategory,
    pub gut_score: u32,
    pub gut_band: GutBand,
    pub gut_impact: f64,
    pub bmi_impact: f64,
    pub sleep_impact: f64,
    pub activity_impact: f64,
    pub stress_impact: f64,
}

impl From<&MetabolicAgeResult> for SubmissionResults {
    fn from(result: &MetabolicAgeResult) -> Self {
        let f = &result.factors;
        Self {
            actual_age: result.actual_age,
            metabolic_age: result.metabolic_age,
            age_difference: result.age_difference,
            bmi: f.bmi.value,
            bmi_category: f.bmi.category,
            gut_score: f.gut.score,
            gut_band: f.gut.band,
            gut_impact: f.gut.impact,
            bmi_impact: f.bmi.impact,
            sleep_impact: f.sleep.impact,
            activity_impact: f.activity.impact,
            stress_impact: f.stress.impact,
        }
    }
}

/// One completed questionnaire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub user_data: UserAnswers,
    pub results: SubmissionResults,
}

impl HistoryEntry {
    pub fn new(
        answers: &UserAnswers,
        result: &MetabolicAgeResult,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            timestamp,
            user_data: answers.clone(),
            results: SubmissionResults::from(result),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryState {
    pub version: u32,
    #[serde(default)]
    pub entries: Vec<HistoryEntry>,
}

impl Default for HistoryState {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryState {
    /// Create a new empty history with the current version
    pub fn new() -> Self {
        Self {
            version: HISTORY_VERSION,
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
