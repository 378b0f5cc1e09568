pub mod export;
pub mod sink;
pub mod stats;
pub mod storage;
pub mod types;

pub use export::{export_file_name, to_csv, CSV_HEADERS};
pub use sink::{HistoryStore, MemorySink, ResultSink};
pub use stats::{compute_stats, HistoryStats};
pub use storage::{clear_history, load_history, save_history};
pub use types::{HistoryEntry, HistoryState, SubmissionResults};
