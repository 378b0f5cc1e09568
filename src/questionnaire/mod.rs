pub mod flow;
pub mod runner;

pub use flow::{ChoiceOption, Step, StepKind, FLOW};
pub use runner::{run_questionnaire, Prompter};
