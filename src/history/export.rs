use chrono::SecondsFormat;

use super::types::HistoryEntry;

pub const CSV_HEADERS: [&str; 27] = [
    "Timestamp",
    "Age",
    "Height (cm)",
    "Weight (kg)",
    "BMI",
    "Bowel",
    "Bloating",
    "Energy",
    "Sensitivities",
    "Fermented",
    "Vegetables",
    "Hydration",
    "Timing",
    "Sleep",
    "Activity",
    "Stress",
    "Actual Age",
    "Metabolic Age",
    "Age Difference",
    "Gut Score",
    "Gut Band",
    "Gut Impact",
    "BMI Category",
    "BMI Impact",
    "Sleep Impact",
    "Activity Impact",
    "Stress Impact",
];

/// Default export file name for a given day, e.g. `metabolic-age-data-2025-03-14.csv`.
pub fn export_file_name(date: chrono::NaiveDate) -> String {
    format!("metabolic-age-data-{}.csv", date.format("%Y-%m-%d"))
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn csv_row(entry: &HistoryEntry) -> [String; 27] {
    let a = &entry.user_data;
    let r = &entry.results;
    [
        entry.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
        a.age.to_string(),
        a.height_cm.to_string(),
        a.weight_kg.to_string(),
        r.bmi.to_string(),
        a.bowel.to_string(),
        a.bloating.to_string(),
        a.energy.to_string(),
        a.sensitivities.to_string(),
        a.fermented.to_string(),
        a.vegetables.to_string(),
        a.hydration.to_string(),
        a.timing.to_string(),
        a.sleep.to_string(),
        a.activity.to_string(),
        a.stress.to_string(),
        r.actual_age.to_string(),
        r.metabolic_age.to_string(),
        r.age_difference.to_string(),
        r.gut_score.to_string(),
        r.gut_band.to_string(),
        r.gut_impact.to_string(),
        r.bmi_category.to_string(),
        r.bmi_impact.to_string(),
        r.sleep_impact.to_string(),
        r.activity_impact.to_string(),
        r.stress_impact.to_string(),
    ]
}

/// Render entries as CSV: a header row, then one row per entry.
/// Every field is quoted.
pub fn to_csv(entries: &[HistoryEntry]) -> String {
    let header = CSV_HEADERS
        .iter()
        .map(|h| quote(h))
        .collect::<Vec<_>>()
        .join(",");

    std::iter::once(header)
        .chain(entries.iter().map(|entry| {
            csv_row(entry)
                .iter()
                .map(|field| quote(field))
                .collect::<Vec<_>>()
                .join(",")
        }))
        .collect::<Vec<_>>()
        .join("\n")
}
