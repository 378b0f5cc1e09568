use owo_colors::OwoColorize;
use std::collections::BTreeMap;
use std::io::IsTerminal;

use crate::history::HistoryStats;
use crate::scoring::{FactorContribution, MetabolicAgeResult};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Whole years for display, rounding halves away from zero.
pub fn format_years(age: f64) -> String {
    format!("{}", age.round() as i64)
}

/// Signed impact with one decimal: "+1.5", "-0.5", "0".
pub fn format_impact(impact: f64) -> String {
    if impact == 0.0 {
        "0".to_string()
    } else {
        let text = format!("{:+.1}", impact);
        text.strip_suffix(".0").map(str::to_string).unwrap_or(text)
    }
}

/// One-line comparison against the actual age.
pub fn format_comparison(age_difference: f64) -> String {
    let years = age_difference.abs().round() as i64;
    let unit = if years == 1 { "year" } else { "years" };
    if years == 0 {
        "Same as your actual age".to_string()
    } else if age_difference > 0.0 {
        format!("+{} {} older than your actual age", years, unit)
    } else {
        format!("{} {} younger than your actual age, great job!", years, unit)
    }
}

fn paint_impact(text: &str, impact: f64, use_colors: bool) -> String {
    if !use_colors {
        return text.to_string();
    }
    if impact > 0.0 {
        text.red().to_string()
    } else if impact < 0.0 {
        text.green().to_string()
    } else {
        text.dimmed().to_string()
    }
}

fn format_factor_line(row: &FactorContribution, use_colors: bool) -> String {
    let impact = format!("{:>5} yrs", format_impact(row.impact));
    let label = format!("{:<15}", row.label);
    let label = if use_colors {
        label.bold().to_string()
    } else {
        label
    };
    format!(
        "  {} {}  {}",
        label,
        paint_impact(&impact, row.impact, use_colors),
        row.description
    )
}

/// Full result: headline, per-factor lines and the calculation waterfall.
pub fn format_result(result: &MetabolicAgeResult, use_colors: bool) -> String {
    let rows = result.contributions();
    let mut lines = Vec::new();

    let headline = format!("Metabolic Age: {}", format_years(result.metabolic_age));
    lines.push(if use_colors {
        headline.bold().to_string()
    } else {
        headline
    });
    lines.push(paint_impact(
        &format_comparison(result.age_difference),
        result.age_difference,
        use_colors,
    ));
    lines.push(String::new());

    lines.push("Factors".to_string());
    lines.extend(rows.iter().map(|row| format_factor_line(row, use_colors)));
    lines.push(String::new());

    lines.push("Calculation Breakdown".to_string());
    lines.push(format!(
        "  {:<22}{:>6}",
        "Your Age",
        format_years(result.actual_age)
    ));
    for row in &rows {
        lines.push(format!(
            "  {:<22}{:>6}",
            format!("{} Impact", row.label),
            format_impact(row.impact)
        ));
    }
    if result.was_clamped() {
        lines.push(format!(
            "  {:<22}{:>6}",
            "Capped at",
            format_impact(result.age_difference)
        ));
    }
    lines.push(format!(
        "  {:<22}{:>6}",
        "Metabolic Age",
        format_years(result.metabolic_age)
    ));

    lines.join("\n")
}

/// Tab-separated values for scripting (no headers, no colors)
/// Columns: metabolic age, age difference, gut score, gut band, bmi, bmi category
pub fn format_tsv(result: &MetabolicAgeResult) -> String {
    let f = &result.factors;
    format!(
        "{}\t{}\t{}\t{}\t{}\t{}",
        result.metabolic_age, result.age_difference, f.gut.score, f.gut.band, f.bmi.value, f.bmi.category
    )
}

fn format_distribution(name: &str, counts: &BTreeMap<String, usize>) -> String {
    let parts: Vec<String> = counts
        .iter()
        .map(|(key, n)| format!("{} {}", key, n))
        .collect();
    format!("  {:<14}{}", name, parts.join(", "))
}

/// Summary of stored history.
pub fn format_stats(stats: Option<&HistoryStats>, use_colors: bool) -> String {
    let Some(stats) = stats else {
        return "No data collected yet.".to_string();
    };

    let title = format!("{} responses", stats.total_responses);
    let mut lines = vec![if use_colors {
        title.bold().to_string()
    } else {
        title
    }];
    lines.push(format!("  Average age:             {:.1}", stats.average_age));
    lines.push(format!(
        "  Average metabolic age:   {:.1}",
        stats.average_metabolic_age
    ));
    lines.push(format!(
        "  Average age difference:  {:+.1}",
        stats.average_age_difference
    ));
    lines.push(format!("  Average gut score:       {:.1}", stats.average_gut_score));
    lines.push(String::new());
    lines.push(format_distribution("Gut band", &stats.gut_band_distribution));
    lines.push(format_distribution("BMI", &stats.bmi_category_distribution));
    lines.push(format_distribution("Sleep", &stats.sleep_distribution));
    lines.push(format_distribution("Activity", &stats.activity_distribution));
    lines.push(format_distribution("Stress", &stats.stress_distribution));
    lines.join("\n")
}
