use serde::Serialize;
use std::collections::BTreeMap;

use super::types::HistoryEntry;

/// Aggregates over every stored questionnaire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryStats {
    pub total_responses: usize,
    pub average_age: f64,
    pub average_metabolic_age: f64,
    pub average_age_difference: f64,
    pub average_gut_score: f64,
    pub gut_band_distribution: BTreeMap<String, usize>,
    pub bmi_category_distribution: BTreeMap<String, usize>,
    pub sleep_distribution: BTreeMap<String, usize>,
    pub activity_distribution: BTreeMap<String, usize>,
    pub stress_distribution: BTreeMap<String, usize>,
}

fn average(entries: &[HistoryEntry], value: impl Fn(&HistoryEntry) -> f64) -> f64 {
    entries.iter().map(value).sum::<f64>() / entries.len() as f64
}

fn count(map: &mut BTreeMap<String, usize>, key: impl Into<String>) {
    *map.entry(key.into()).or_insert(0) += 1;
}

/// Compute statistics, or `None` when there is nothing stored yet.
pub fn compute_stats(entries: &[HistoryEntry]) -> Option<HistoryStats> {
    if entries.is_empty() {
        return None;
    }

    let mut stats = HistoryStats {
        total_responses: entries.len(),
        average_age: average(entries, |e| e.user_data.age),
        average_metabolic_age: average(entries, |e| e.results.metabolic_age),
        average_age_difference: average(entries, |e| e.results.age_difference),
        average_gut_score: average(entries, |e| e.results.gut_score as f64),
        gut_band_distribution: BTreeMap::new(),
        bmi_category_distribution: BTreeMap::new(),
        sleep_distribution: BTreeMap::new(),
        activity_distribution: BTreeMap::new(),
        stress_distribution: BTreeMap::new(),
    };

    for entry in entries {
        count(&mut stats.gut_band_distribution, entry.results.gut_band.label());
        count(
            &mut stats.bmi_category_distribution,
            entry.results.bmi_category.label(),
        );
        count(&mut stats.sleep_distribution, entry.user_data.sleep.as_str());
        count(&mut stats.activity_distribution, entry.user_data.activity.as_str());
        count(&mut stats.stress_distribution, entry.user_data.stress.as_str());
    }

    Some(stats)
}
