pub mod config;
pub mod history;
pub mod insights;
pub mod output;
pub mod questionnaire;
pub mod scoring;
pub mod units;
pub mod webhook;
