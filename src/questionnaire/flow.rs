//! The question sequence.

use crate::scoring::AnswerField;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceOption {
    /// Wire value stored in the answers.
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// Free numeric entry; the unit depends on configuration.
    Number,
    Choice(&'static [ChoiceOption]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub field: AnswerField,
    pub prompt: &'static str,
    pub kind: StepKind,
}

const fn opt(value: &'static str, label: &'static str) -> ChoiceOption {
    ChoiceOption { value, label }
}

pub const INTRO: &str =
    "Hi! Let's work out your metabolic age. It takes about two minutes: a few numbers, then some quick questions about digestion, sleep, movement and stress.";

pub const FLOW: &[Step] = &[
    Step {
        field: AnswerField::Age,
        prompt: "First up, how old are you?",
        kind: StepKind::Number,
    },
    Step {
        field: AnswerField::HeightCm,
        prompt: "How tall are you?",
        kind: StepKind::Number,
    },
    Step {
        field: AnswerField::WeightKg,
        prompt: "And how much do you weigh?",
        kind: StepKind::Number,
    },
    Step {
        field: AnswerField::Bowel,
        prompt: "How regular are your bowel movements?",
        kind: StepKind::Choice(&[
            opt("daily", "Every day"),
            opt("sometimes", "Most days"),
            opt("rare", "A few times a week or less"),
        ]),
    },
    Step {
        field: AnswerField::Bloating,
        prompt: "How often do you feel bloated after eating?",
        kind: StepKind::Choice(&[
            opt("never", "Rarely or never"),
            opt("sometimes", "Sometimes"),
            opt("often", "Often"),
        ]),
    },
    Step {
        field: AnswerField::Energy,
        prompt: "How do you usually feel after a meal?",
        kind: StepKind::Choice(&[
            opt("energized", "Energized"),
            opt("normal", "Normal"),
            opt("sluggish", "Sluggish or sleepy"),
        ]),
    },
    Step {
        field: AnswerField::Sensitivities,
        prompt: "Any foods that don't agree with you?",
        kind: StepKind::Choice(&[
            opt("none", "None that I know of"),
            opt("few", "One or two"),
            opt("many", "Quite a few"),
        ]),
    },
    Step {
        field: AnswerField::Fermented,
        prompt: "How often do you eat fermented foods like curd, kimchi or kefir?",
        kind: StepKind::Choice(&[
            opt("daily", "Daily"),
            opt("3to5", "3-5 times a week"),
            opt("1to2", "1-2 times a week"),
            opt("rare", "Rarely"),
        ]),
    },
    Step {
        field: AnswerField::Vegetables,
        prompt: "How many servings of vegetables do you eat on a typical day?",
        kind: StepKind::Choice(&[
            opt("high", "4 or more"),
            opt("mid", "2-3"),
            opt("low", "1 or fewer"),
        ]),
    },
    Step {
        field: AnswerField::Hydration,
        prompt: "How many glasses of water do you drink a day?",
        kind: StepKind::Choice(&[
            opt("eightPlus", "8 or more"),
            opt("fiveToSeven", "5-7"),
            opt("underFive", "Fewer than 5"),
        ]),
    },
    Step {
        field: AnswerField::Timing,
        prompt: "How regular are your meal times?",
        kind: StepKind::Choice(&[
            opt("regular", "Pretty regular"),
            opt("somewhat", "Somewhat regular"),
            opt("chaotic", "All over the place"),
        ]),
    },
    Step {
        field: AnswerField::Sleep,
        prompt: "How would you rate your sleep?",
        kind: StepKind::Choice(&[
            opt("great", "Great (7-9 hrs)"),
            opt("okay", "Okay (5-7 hrs)"),
            opt("poor", "Poor (<5 or >10 hrs)"),
        ]),
    },
    Step {
        field: AnswerField::Activity,
        prompt: "How active are you during a normal week?",
        kind: StepKind::Choice(&[
            opt("veryActive", "Very active"),
            opt("somewhat", "Somewhat active"),
            opt("notMuch", "Not much"),
        ]),
    },
    Step {
        field: AnswerField::Stress,
        prompt: "Last one: how are your stress levels lately?",
        kind: StepKind::Choice(&[
            opt("calm", "Calm & peaceful"),
            opt("managing", "Managing okay"),
            opt("stressed", "Pretty stressed"),
            opt("overwhelmed", "Overwhelmed"),
        ]),
    },
];

/// Pick an option by its 1-based number or by its wire value.
pub fn match_option(options: &[ChoiceOption], input: &str) -> Option<ChoiceOption> {
    let input = input.trim();
    if let Ok(n) = input.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| options.get(i)).copied();
    }
    options
        .iter()
        .find(|o| o.value.eq_ignore_ascii_case(input))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{
        Activity, Bloating, Bowel, Energy, Fermented, Hydration, Sensitivities, Sleep, Stress,
        Timing, Vegetables,
    };

    #[test]
    fn test_flow_covers_every_field_in_order() {
        let fields: Vec<AnswerField> = FLOW.iter().map(|s| s.field).collect();
        assert_eq!(fields, AnswerField::ALL.to_vec());
    }

    #[test]
    fn test_numeric_fields_are_number_steps() {
        for step in FLOW {
            assert_eq!(
                step.field.is_numeric(),
                step.kind == StepKind::Number,
                "{}",
                step.field
            );
        }
    }

    fn wire_values(field: AnswerField) -> Vec<&'static str> {
        match field {
            AnswerField::Bowel => Bowel::ALL.iter().map(|v| v.as_str()).collect(),
            AnswerField::Bloating => Bloating::ALL.iter().map(|v| v.as_str()).collect(),
            AnswerField::Energy => Energy::ALL.iter().map(|v| v.as_str()).collect(),
            AnswerField::Sensitivities => Sensitivities::ALL.iter().map(|v| v.as_str()).collect(),
            AnswerField::Fermented => Fermented::ALL.iter().map(|v| v.as_str()).collect(),
            AnswerField::Vegetables => Vegetables::ALL.iter().map(|v| v.as_str()).collect(),
            AnswerField::Hydration => Hydration::ALL.iter().map(|v| v.as_str()).collect(),
            AnswerField::Timing => Timing::ALL.iter().map(|v| v.as_str()).collect(),
            AnswerField::Sleep => Sleep::ALL.iter().map(|v| v.as_str()).collect(),
            AnswerField::Activity => Activity::ALL.iter().map(|v| v.as_str()).collect(),
            AnswerField::Stress => Stress::ALL.iter().map(|v| v.as_str()).collect(),
            _ => Vec::new(),
        }
    }

    #[test]
    fn test_choice_options_match_answer_domains() {
        for step in FLOW {
            if let StepKind::Choice(options) = step.kind {
                let values: Vec<&str> = options.iter().map(|o| o.value).collect();
                assert_eq!(values, wire_values(step.field), "{}", step.field);
            }
        }
    }

    #[test]
    fn test_match_option_by_number_and_value() {
        let StepKind::Choice(options) = FLOW[7].kind else {
            panic!("fermented step should be a choice");
        };
        assert_eq!(match_option(options, "2").unwrap().value, "3to5");
        assert_eq!(match_option(options, "1to2").unwrap().value, "1to2");
        assert_eq!(match_option(options, " RARE ").unwrap().value, "rare");
        assert!(match_option(options, "0").is_none());
        assert!(match_option(options, "5").is_none());
        assert!(match_option(options, "weekly").is_none());
    }
}
