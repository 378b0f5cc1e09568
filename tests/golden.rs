use metabolic_age::history::{
    compute_stats, load_history, to_csv, HistoryStore, ResultSink, CSV_HEADERS,
};
use metabolic_age::scoring::{
    calculate_metabolic_age, validate_answers, BmiCategory, GutBand, Sleep, UserAnswers,
};

const HEALTHY_JSON: &str = r#"{
  "age": 25, "heightCm": 170, "weightKg": 63.5,
  "bowel": "daily", "bloating": "never", "energy": "energized",
  "sensitivities": "none", "fermented": "daily", "vegetables": "high",
  "hydration": "eightPlus", "timing": "regular",
  "sleep": "great", "activity": "veryActive", "stress": "calm"
}"#;

const POOR_GUT_YAML: &str = "\
age: 25
heightCm: 170
weightKg: 78
bowel: rare
bloating: often
energy: sluggish
sensitivities: many
fermented: rare
vegetables: low
hydration: underFive
timing: chaotic
sleep: okay
activity: somewhat
stress: managing
";

const AVERAGE_YAML: &str = "\
age: 40
heightCm: 170
weightKg: 69.4
bowel: sometimes
bloating: sometimes
energy: normal
sensitivities: few
fermented: 3to5
vegetables: mid
hydration: fiveToSeven
timing: somewhat
sleep: great
activity: notMuch
stress: stressed
";

fn parse(text: &str) -> UserAnswers {
    serde_saphyr::from_str(text).unwrap()
}

#[test]
fn healthy_json_scores_three_years_younger() {
    let answers = parse(HEALTHY_JSON);
    assert!(validate_answers(&answers).is_ok());

    let result = calculate_metabolic_age(&answers).unwrap();
    assert_eq!(result.factors.bmi.category, BmiCategory::Healthy);
    assert_eq!(result.factors.gut.score, 100);
    assert_eq!(result.factors.gut.band, GutBand::High);
    assert_eq!(result.metabolic_age, 22.0);
    assert_eq!(result.age_difference, -3.0);
}

#[test]
fn poor_gut_yaml_scores_older() {
    let result = calculate_metabolic_age(&parse(POOR_GUT_YAML)).unwrap();
    assert_eq!(result.factors.bmi.category, BmiCategory::Overweight);
    assert_eq!(result.factors.gut.score, 25);
    assert_eq!(result.factors.gut.band, GutBand::Low);
    assert_eq!(result.metabolic_age, 29.5);
    assert_eq!(result.age_difference, 4.5);
}

#[test]
fn average_profile_follows_point_table() {
    let result = calculate_metabolic_age(&parse(AVERAGE_YAML)).unwrap();
    assert_eq!(result.factors.gut.score, 66);
    assert_eq!(result.factors.gut.band, GutBand::Adequate);
    assert_eq!(result.metabolic_age, 42.5);
}

#[test]
fn unrecognised_choice_scores_as_unknown() {
    let text = HEALTHY_JSON.replace("\"great\"", "\"sometimes\"");
    let answers = parse(&text);
    assert_eq!(answers.sleep, Sleep::Unknown);
    assert_eq!(answers.unknown_fields(), vec!["sleep"]);

    let result = calculate_metabolic_age(&answers).unwrap();
    assert_eq!(result.factors.sleep.impact, 0.0);
    assert_eq!(result.metabolic_age, 22.5);
}

#[test]
fn out_of_range_answers_report_every_problem() {
    let mut answers = parse(HEALTHY_JSON);
    answers.age = 12.0;
    answers.weight_kg = f64::NAN;

    let errors = validate_answers(&answers).unwrap_err();
    assert_eq!(errors.len(), 2);
    assert!(calculate_metabolic_age(&answers).is_err());
}

#[test]
fn stored_results_feed_stats_and_csv() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("history.json");
    let mut store = HistoryStore::new(&path);

    for text in [HEALTHY_JSON, POOR_GUT_YAML] {
        let answers = parse(text);
        let result = calculate_metabolic_age(&answers).unwrap();
        store.record(&answers, &result).unwrap();
    }

    let state = load_history(&path).unwrap();
    assert_eq!(state.len(), 2);

    let stats = compute_stats(&state.entries).unwrap();
    assert_eq!(stats.total_responses, 2);
    assert_eq!(stats.average_metabolic_age, 25.75);
    assert_eq!(stats.gut_band_distribution.get("High"), Some(&1));
    assert_eq!(stats.gut_band_distribution.get("Low"), Some(&1));

    let csv = to_csv(&state.entries);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("\"Timestamp\",\"Age\""));
    assert_eq!(lines[1].split("\",\"").count(), CSV_HEADERS.len());
    assert!(lines[1].contains("\"eightPlus\""));
    assert!(lines[2].contains("\"Overweight\""));
}
