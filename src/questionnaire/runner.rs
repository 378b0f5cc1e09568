use anyhow::{bail, Context, Result};
use std::io::{BufRead, Write};

use super::flow::{match_option, ChoiceOption, Step, StepKind, FLOW, INTRO};
use crate::config::UnitsConfig;
use crate::insights::{metabolic_age_preview, smart_acknowledgement};
use crate::scoring::{AnswerField, PartialAnswers, UserAnswers};
use crate::units::{
    autocorrect_height_cm, cm_to_cm, feet_inches_to_cm, kg_to_kg, lb_to_kg, validate_number,
    HeightUnit, NumericInput, WeightUnit,
};

/// Number of answers after which the mid-flow preview is shown once.
const PREVIEW_AFTER: usize = 5;

/// Line-oriented conversation over any reader/writer pair.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{}", message).context("Failed to write output")
    }

    /// Prompt user with a message and return their trimmed input.
    pub fn prompt(&mut self, message: &str) -> Result<String> {
        write!(self.output, "{}", message).context("Failed to write output")?;
        self.output.flush().context("Failed to flush output")?;
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read input")?;
        if read == 0 {
            bail!("Input closed before the questionnaire finished");
        }
        Ok(line.trim().to_string())
    }

    /// Prompt user with a yes/no question. Returns bool based on input and default.
    pub fn prompt_yes_no(&mut self, message: &str, default_yes: bool) -> Result<bool> {
        let hint = if default_yes { "Y/n" } else { "y/N" };
        let input = self.prompt(&format!("{} [{}]: ", message, hint))?.to_lowercase();
        if input.is_empty() {
            Ok(default_yes)
        } else {
            Ok(input == "y" || input == "yes")
        }
    }

    /// Keep asking until the answer is a number inside the input's range.
    pub fn prompt_number(&mut self, message: &str, input: NumericInput) -> Result<f64> {
        loop {
            let raw = self.prompt(message)?;
            let value = raw.parse::<f64>().unwrap_or(f64::NAN);
            match validate_number(input, value) {
                None => return Ok(value),
                Some(problem) => self.say(&format!("  {}", problem))?,
            }
        }
    }

    /// Height in cm; offers a correction for obvious typos before re-asking.
    fn prompt_height_cm(&mut self) -> Result<f64> {
        loop {
            let raw = self.prompt("Height (cm): ")?;
            let value = raw.parse::<f64>().unwrap_or(f64::NAN);
            let Some(problem) = validate_number(NumericInput::HeightCm, value) else {
                return Ok(cm_to_cm(value));
            };
            if let Some(fix) = autocorrect_height_cm(value) {
                if self.prompt_yes_no(&format!("  {}", fix.message), true)? {
                    return Ok(fix.corrected);
                }
            }
            self.say(&format!("  {}", problem))?;
        }
    }

    pub fn prompt_choice(&mut self, options: &[ChoiceOption]) -> Result<ChoiceOption> {
        for (i, option) in options.iter().enumerate() {
            self.say(&format!("  {}. {}", i + 1, option.label))?;
        }
        loop {
            let raw = self.prompt(&format!("Choose 1-{}: ", options.len()))?;
            match match_option(options, &raw) {
                Some(option) => return Ok(option),
                None => self.say(&format!(
                    "  Pick a number between 1 and {}.",
                    options.len()
                ))?,
            }
        }
    }
}

fn ask_number(
    prompter: &mut Prompter<impl BufRead, impl Write>,
    field: AnswerField,
    units: &UnitsConfig,
) -> Result<f64> {
    match field {
        AnswerField::Age => prompter.prompt_number("Age (years): ", NumericInput::Age),
        AnswerField::HeightCm => match units.height {
            HeightUnit::Cm => prompter.prompt_height_cm(),
            HeightUnit::FtIn => {
                let feet = prompter.prompt_number("Feet: ", NumericInput::HeightFt)?;
                let inches = prompter.prompt_number("Inches: ", NumericInput::HeightIn)?;
                Ok(feet_inches_to_cm(feet, inches))
            }
        },
        AnswerField::WeightKg => match units.weight {
            WeightUnit::Kg => prompter
                .prompt_number("Weight (kg): ", NumericInput::WeightKg)
                .map(kg_to_kg),
            WeightUnit::Lb => prompter
                .prompt_number("Weight (lb): ", NumericInput::WeightLb)
                .map(lb_to_kg),
        },
        other => bail!("{} is not a numeric question", other),
    }
}

fn ask_step(
    prompter: &mut Prompter<impl BufRead, impl Write>,
    step: &Step,
    units: &UnitsConfig,
    answers: &mut PartialAnswers,
) -> Result<()> {
    prompter.say("")?;
    prompter.say(step.prompt)?;

    match step.kind {
        StepKind::Number => {
            let value = ask_number(prompter, step.field, units)?;
            log::debug!("{} = {}", step.field, value);
            answers.set_number(step.field, value);
        }
        StepKind::Choice(options) => {
            let option = prompter.prompt_choice(options)?;
            log::debug!("{} = {}", step.field, option.value);
            answers.set_choice(step.field, option.value);
            prompter.say(smart_acknowledgement(answers, step.field))?;
        }
    }

    if answers.answered_count() == PREVIEW_AFTER {
        if let Some(preview) = metabolic_age_preview(answers) {
            prompter.say(&preview)?;
        }
    }
    Ok(())
}

/// Walk through every question and return the complete answers.
pub fn run_questionnaire(
    prompter: &mut Prompter<impl BufRead, impl Write>,
    units: &UnitsConfig,
) -> Result<UserAnswers> {
    prompter.say(INTRO)?;

    let mut answers = PartialAnswers::new();
    for step in FLOW {
        ask_step(prompter, step, units, &mut answers)?;
    }

    Ok(answers.build()?)
}
