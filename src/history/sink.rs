use anyhow::Result;
use chrono::Utc;
use std::path::{Path, PathBuf};

use super::storage::{load_history, save_history};
use super::types::HistoryEntry;
use crate::scoring::{MetabolicAgeResult, UserAnswers};

/// Something that keeps a record of finished questionnaires.
///
/// The scoring engine never records anything itself; callers hand each
/// result to whichever sinks they were configured with.
pub trait ResultSink {
    fn record(&mut self, answers: &UserAnswers, result: &MetabolicAgeResult) -> Result<()>;
}

/// Appends results to the JSON history file.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResultSink for HistoryStore {
    fn record(&mut self, answers: &UserAnswers, result: &MetabolicAgeResult) -> Result<()> {
        let mut state = load_history(&self.path)?;
        state.push(HistoryEntry::new(answers, result, Utc::now()));
        save_history(&self.path, &state)?;
        log::info!(
            "Stored result in {} ({} entries)",
            self.path.display(),
            state.len()
        );
        Ok(())
    }
}

/// Keeps results in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub entries: Vec<HistoryEntry>,
}

impl ResultSink for MemorySink {
    fn record(&mut self, answers: &UserAnswers, result: &MetabolicAgeResult) -> Result<()> {
        self.entries
            .push(HistoryEntry::new(answers, result, Utc::now()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::answers::tests::healthy_answers;
    use crate::scoring::calculate_metabolic_age;

    #[test]
    fn test_history_store_appends() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = HistoryStore::new(dir.path().join("history.json"));
        let answers = healthy_answers();
        let result = calculate_metabolic_age(&answers).unwrap();

        store.record(&answers, &result).unwrap();
        store.record(&answers, &result).unwrap();

        let state = load_history(store.path()).unwrap();
        assert_eq!(state.len(), 2);
        assert_eq!(state.entries[1].user_data, answers);
        assert_eq!(state.entries[1].results.metabolic_age, 22.0);
    }

    #[test]
    fn test_memory_sink_through_trait_object() {
        let answers = healthy_answers();
        let result = calculate_metabolic_age(&answers).unwrap();
        let mut sink = MemorySink::default();
        {
            let dyn_sink: &mut dyn ResultSink = &mut sink;
            dyn_sink.record(&answers, &result).unwrap();
        }
        assert_eq!(sink.entries.len(), 1);
        assert_eq!(sink.entries[0].results.gut_score, 100);
    }
}
