use serde::{Deserialize, Serialize};
use std::fmt;

use super::validation::ScoreError;

/// Declares a closed answer enum with its wire names and an `Unknown`
/// fallback that absorbs any value outside the declared domain.
macro_rules! answer_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
            /// Value outside the declared domain. Scores as zero impact.
            #[serde(rename = "unknown", other)]
            Unknown,
        }

        impl $name {
            /// Every in-domain value, in questionnaire order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                    $name::Unknown => "unknown",
                }
            }

            /// Parse a wire name. Anything unrecognised becomes `Unknown`.
            pub fn from_wire(s: &str) -> Self {
                match s.trim() {
                    $($wire => $name::$variant,)+
                    _ => $name::Unknown,
                }
            }

            pub fn is_unknown(&self) -> bool {
                matches!(self, $name::Unknown)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

answer_enum!(
    /// How often bowel movements happen.
    Bowel { Daily => "daily", Sometimes => "sometimes", Rare => "rare" }
);
answer_enum!(
    Bloating { Never => "never", Sometimes => "sometimes", Often => "often" }
);
answer_enum!(
    /// Energy level after meals.
    Energy { Energized => "energized", Normal => "normal", Sluggish => "sluggish" }
);
answer_enum!(
    Sensitivities { None => "none", Few => "few", Many => "many" }
);
answer_enum!(
    /// Fermented food servings per week.
    Fermented {
        Daily => "daily",
        ThreeToFive => "3to5",
        OneToTwo => "1to2",
        Rare => "rare",
    }
);
answer_enum!(
    Vegetables { High => "high", Mid => "mid", Low => "low" }
);
answer_enum!(
    /// Glasses of water per day.
    Hydration {
        EightPlus => "eightPlus",
        FiveToSeven => "fiveToSeven",
        UnderFive => "underFive",
    }
);
answer_enum!(
    /// Meal timing regularity.
    Timing { Regular => "regular", Somewhat => "somewhat", Chaotic => "chaotic" }
);
answer_enum!(
    Sleep { Great => "great", Okay => "okay", Poor => "poor" }
);
answer_enum!(
    Activity { VeryActive => "veryActive", Somewhat => "somewhat", NotMuch => "notMuch" }
);
answer_enum!(
    Stress {
        Calm => "calm",
        Managing => "managing",
        Stressed => "stressed",
        Overwhelmed => "overwhelmed",
    }
);

/// A complete set of questionnaire answers.
///
/// Numeric fields are expected to be range-checked by the caller, but
/// [`crate::scoring::calculate_metabolic_age`] re-checks them and refuses
/// to score out-of-range or non-finite values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAnswers {
    pub age: f64,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub bowel: Bowel,
    pub bloating: Bloating,
    pub energy: Energy,
    pub sensitivities: Sensitivities,
    pub fermented: Fermented,
    pub vegetables: Vegetables,
    pub hydration: Hydration,
    pub timing: Timing,
    pub sleep: Sleep,
    pub activity: Activity,
    pub stress: Stress,
}

impl UserAnswers {
    /// Wire names of every categorical field that fell back to `Unknown`.
    pub fn unknown_fields(&self) -> Vec<&'static str> {
        let checks = [
            (AnswerField::Bowel, self.bowel.is_unknown()),
            (AnswerField::Bloating, self.bloating.is_unknown()),
            (AnswerField::Energy, self.energy.is_unknown()),
            (AnswerField::Sensitivities, self.sensitivities.is_unknown()),
            (AnswerField::Fermented, self.fermented.is_unknown()),
            (AnswerField::Vegetables, self.vegetables.is_unknown()),
            (AnswerField::Hydration, self.hydration.is_unknown()),
            (AnswerField::Timing, self.timing.is_unknown()),
            (AnswerField::Sleep, self.sleep.is_unknown()),
            (AnswerField::Activity, self.activity.is_unknown()),
            (AnswerField::Stress, self.stress.is_unknown()),
        ];
        checks
            .into_iter()
            .filter(|(_, unknown)| *unknown)
            .map(|(field, _)| field.name())
            .collect()
    }
}

/// Every field a questionnaire collects, in the order it is asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnswerField {
    Age,
    HeightCm,
    WeightKg,
    Bowel,
    Bloating,
    Energy,
    Sensitivities,
    Fermented,
    Vegetables,
    Hydration,
    Timing,
    Sleep,
    Activity,
    Stress,
}

impl AnswerField {
    pub const ALL: [AnswerField; 14] = [
        AnswerField::Age,
        AnswerField::HeightCm,
        AnswerField::WeightKg,
        AnswerField::Bowel,
        AnswerField::Bloating,
        AnswerField::Energy,
        AnswerField::Sensitivities,
        AnswerField::Fermented,
        AnswerField::Vegetables,
        AnswerField::Hydration,
        AnswerField::Timing,
        AnswerField::Sleep,
        AnswerField::Activity,
        AnswerField::Stress,
    ];

    /// Wire name, matching the serialized `UserAnswers` key.
    pub fn name(&self) -> &'static str {
        match self {
            AnswerField::Age => "age",
            AnswerField::HeightCm => "heightCm",
            AnswerField::WeightKg => "weightKg",
            AnswerField::Bowel => "bowel",
            AnswerField::Bloating => "bloating",
            AnswerField::Energy => "energy",
            AnswerField::Sensitivities => "sensitivities",
            AnswerField::Fermented => "fermented",
            AnswerField::Vegetables => "vegetables",
            AnswerField::Hydration => "hydration",
            AnswerField::Timing => "timing",
            AnswerField::Sleep => "sleep",
            AnswerField::Activity => "activity",
            AnswerField::Stress => "stress",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            AnswerField::Age | AnswerField::HeightCm | AnswerField::WeightKg
        )
    }
}

impl fmt::Display for AnswerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Answers collected so far while the questionnaire is in progress.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialAnswers {
    pub age: Option<f64>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub bowel: Option<Bowel>,
    pub bloating: Option<Bloating>,
    pub energy: Option<Energy>,
    pub sensitivities: Option<Sensitivities>,
    pub fermented: Option<Fermented>,
    pub vegetables: Option<Vegetables>,
    pub hydration: Option<Hydration>,
    pub timing: Option<Timing>,
    pub sleep: Option<Sleep>,
    pub activity: Option<Activity>,
    pub stress: Option<Stress>,
}

impl PartialAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a numeric answer. Ignored for categorical fields.
    pub fn set_number(&mut self, field: AnswerField, value: f64) {
        match field {
            AnswerField::Age => self.age = Some(value),
            AnswerField::HeightCm => self.height_cm = Some(value),
            AnswerField::WeightKg => self.weight_kg = Some(value),
            _ => log::debug!("ignoring numeric value for categorical field {}", field),
        }
    }

    /// Store a categorical answer given its wire name. Ignored for numeric fields.
    pub fn set_choice(&mut self, field: AnswerField, wire: &str) {
        match field {
            AnswerField::Bowel => self.bowel = Some(Bowel::from_wire(wire)),
            AnswerField::Bloating => self.bloating = Some(Bloating::from_wire(wire)),
            AnswerField::Energy => self.energy = Some(Energy::from_wire(wire)),
            AnswerField::Sensitivities => {
                self.sensitivities = Some(Sensitivities::from_wire(wire))
            }
            AnswerField::Fermented => self.fermented = Some(Fermented::from_wire(wire)),
            AnswerField::Vegetables => self.vegetables = Some(Vegetables::from_wire(wire)),
            AnswerField::Hydration => self.hydration = Some(Hydration::from_wire(wire)),
            AnswerField::Timing => self.timing = Some(Timing::from_wire(wire)),
            AnswerField::Sleep => self.sleep = Some(Sleep::from_wire(wire)),
            AnswerField::Activity => self.activity = Some(Activity::from_wire(wire)),
            AnswerField::Stress => self.stress = Some(Stress::from_wire(wire)),
            _ => log::debug!("ignoring choice '{}' for numeric field {}", wire, field),
        }
    }

    pub fn is_answered(&self, field: AnswerField) -> bool {
        match field {
            AnswerField::Age => self.age.is_some(),
            AnswerField::HeightCm => self.height_cm.is_some(),
            AnswerField::WeightKg => self.weight_kg.is_some(),
            AnswerField::Bowel => self.bowel.is_some(),
            AnswerField::Bloating => self.bloating.is_some(),
            AnswerField::Energy => self.energy.is_some(),
            AnswerField::Sensitivities => self.sensitivities.is_some(),
            AnswerField::Fermented => self.fermented.is_some(),
            AnswerField::Vegetables => self.vegetables.is_some(),
            AnswerField::Hydration => self.hydration.is_some(),
            AnswerField::Timing => self.timing.is_some(),
            AnswerField::Sleep => self.sleep.is_some(),
            AnswerField::Activity => self.activity.is_some(),
            AnswerField::Stress => self.stress.is_some(),
        }
    }

    pub fn answered_count(&self) -> usize {
        AnswerField::ALL
            .iter()
            .filter(|f| self.is_answered(**f))
            .count()
    }

    /// Convert into a complete answer set.
    ///
    /// Fails with [`ScoreError::MissingField`] naming the first unanswered
    /// field in questionnaire order.
    pub fn build(&self) -> Result<UserAnswers, ScoreError> {
        fn take<T: Copy>(value: Option<T>, field: AnswerField) -> Result<T, ScoreError> {
            value.ok_or(ScoreError::MissingField(field.name()))
        }

        Ok(UserAnswers {
            age: take(self.age, AnswerField::Age)?,
            height_cm: take(self.height_cm, AnswerField::HeightCm)?,
            weight_kg: take(self.weight_kg, AnswerField::WeightKg)?,
            bowel: take(self.bowel, AnswerField::Bowel)?,
            bloating: take(self.bloating, AnswerField::Bloating)?,
            energy: take(self.energy, AnswerField::Energy)?,
            sensitivities: take(self.sensitivities, AnswerField::Sensitivities)?,
            fermented: take(self.fermented, AnswerField::Fermented)?,
            vegetables: take(self.vegetables, AnswerField::Vegetables)?,
            hydration: take(self.hydration, AnswerField::Hydration)?,
            timing: take(self.timing, AnswerField::Timing)?,
            sleep: take(self.sleep, AnswerField::Sleep)?,
            activity: take(self.activity, AnswerField::Activity)?,
            stress: take(self.stress, AnswerField::Stress)?,
        })
    }
}
