//! Conversational feedback shown between questions.

use crate::scoring::{
    Activity, AnswerField, Bloating, Bowel, Energy, Fermented, Hydration, PartialAnswers,
    Sensitivities, Sleep, Stress, Timing, Vegetables,
};

/// Answers needed before a preview is worth showing.
const PREVIEW_MIN_ANSWERS: usize = 5;

struct AckRule {
    when: fn(&PartialAnswers) -> bool,
    say: &'static str,
}

/// Cross-answer observations, checked in order. First match wins.
const ACK_RULES: &[AckRule] = &[
    AckRule {
        when: |a| a.hydration == Some(Hydration::EightPlus) && a.bloating == Some(Bloating::Often),
        say: "Hydration looks solid. Since you still feel bloated often, we'll check meal timing and fermented foods next.",
    },
    AckRule {
        when: |a| a.fermented == Some(Fermented::Daily) && a.bloating == Some(Bloating::Often),
        say: "Daily curd/ferments + frequent bloating could mean sensitivity; we'll look at timing and fiber balance.",
    },
    AckRule {
        // Sleep not yet answered also counts as "not great"
        when: |a| a.activity == Some(Activity::NotMuch) && a.sleep != Some(Sleep::Great),
        say: "Low activity can worsen sleep quality. A short walk after dinner often helps.",
    },
    AckRule {
        when: |a| a.vegetables == Some(Vegetables::Low) && a.bloating == Some(Bloating::Often),
        say: "Low fiber intake can contribute to bloating. More vegetables might help with regularity.",
    },
    AckRule {
        when: |a| a.timing == Some(Timing::Chaotic) && a.energy == Some(Energy::Sluggish),
        say: "Irregular meal times can affect energy levels. Consistent timing helps your body's rhythm.",
    },
    AckRule {
        when: |a| a.stress == Some(Stress::Overwhelmed) && a.sleep == Some(Sleep::Poor),
        say: "High stress often impacts sleep. Managing stress can significantly improve your metabolic age.",
    },
    AckRule {
        when: |a| {
            a.sensitivities == Some(Sensitivities::Many) && a.fermented == Some(Fermented::Rare)
        },
        say: "Many sensitivities + no fermented foods might mean gut imbalance. Probiotics could help.",
    },
    AckRule {
        when: |a| a.bowel == Some(Bowel::Rare) && a.hydration == Some(Hydration::UnderFive),
        say: "Irregular bowel movements + low hydration often go together. More water can help.",
    },
    AckRule {
        when: |a| a.energy == Some(Energy::Energized) && a.vegetables == Some(Vegetables::High),
        say: "Great energy + high veggie intake suggests good gut health!",
    },
    AckRule {
        when: |a| a.sleep == Some(Sleep::Great) && a.activity == Some(Activity::VeryActive),
        say: "Excellent sleep + high activity: you're doing great for your metabolic age!",
    },
];

fn default_ack(step: AnswerField) -> &'static str {
    match step {
        AnswerField::Bowel => "Regularity matters for gut health.",
        AnswerField::Bloating => "Bloating patterns help us understand your digestive health.",
        AnswerField::Energy => "Energy levels after meals tell us about your metabolism.",
        AnswerField::Sensitivities => "Food sensitivities can impact gut health significantly.",
        AnswerField::Fermented => "Fermented foods are great for gut bacteria diversity.",
        AnswerField::Vegetables => "Fiber from vegetables supports healthy digestion.",
        AnswerField::Hydration => "Proper hydration is crucial for all body functions.",
        AnswerField::Timing => "Meal timing affects your body's natural rhythms.",
        AnswerField::Sleep => "Quality sleep is essential for metabolic health.",
        AnswerField::Activity => "Regular movement keeps your metabolism active.",
        AnswerField::Stress => "Stress management is key to overall health.",
        AnswerField::Age | AnswerField::HeightCm | AnswerField::WeightKg => {
            "Thanks for that information."
        }
    }
}

/// Acknowledgement to show right after `step` was answered.
pub fn smart_acknowledgement(answers: &PartialAnswers, step: AnswerField) -> &'static str {
    ACK_RULES
        .iter()
        .find(|rule| (rule.when)(answers))
        .map(|rule| rule.say)
        .unwrap_or_else(|| default_ack(step))
}

/// Names the biggest negative factors so far.
///
/// Returns `None` until enough questions have been answered.
pub fn metabolic_age_preview(answers: &PartialAnswers) -> Option<String> {
    if answers.answered_count() < PREVIEW_MIN_ANSWERS {
        return None;
    }

    let flags = [
        (answers.bowel == Some(Bowel::Rare), "irregular bowel movements"),
        (answers.bloating == Some(Bloating::Often), "frequent bloating"),
        (answers.energy == Some(Energy::Sluggish), "low energy after meals"),
        (answers.vegetables == Some(Vegetables::Low), "low vegetable intake"),
        (answers.hydration == Some(Hydration::UnderFive), "low hydration"),
        (answers.sleep == Some(Sleep::Poor), "poor sleep quality"),
        (answers.activity == Some(Activity::NotMuch), "low activity level"),
        (answers.stress == Some(Stress::Overwhelmed), "high stress levels"),
    ];
    let factors: Vec<&str> = flags
        .iter()
        .filter(|(hit, _)| *hit)
        .map(|(_, name)| *name)
        .collect();

    let summary = match factors.as_slice() {
        [] => return Some("Your lifestyle factors look pretty good so far!".to_string()),
        [one] => one.to_string(),
        [first, second] => format!("{} and {}", first, second),
        [first, second, ..] => format!("{}, {} and others", first, second),
    };

    Some(format!(
        "Right now the biggest factors look like: {}.",
        summary
    ))
}
