use serde::Serialize;
use std::path::PathBuf;

/// Fields shared by both generation modes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub total_files_generated: usize,
    pub generated_files: Vec<PathBuf>,
    pub output_directory: PathBuf,
    /// Run start, `yyyyMMdd_HHmmss`.
    pub timestamp: String,
    pub tomorrow_date: String,
    pub starting_position8_value: u64,
    pub ending_position8_value: u64,
}

/// Outcome of one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum GenerationResult {
    SingleRow(RunSummary),
    #[serde(rename_all = "camelCase")]
    MultiRow {
        #[serde(flatten)]
        summary: RunSummary,
        rows_per_file: u32,
        total_rows: u64,
    },
}

impl GenerationResult {
    pub fn summary(&self) -> &RunSummary {
        match self {
            GenerationResult::SingleRow(summary) => summary,
            GenerationResult::MultiRow { summary, .. } => summary,
        }
    }

    pub fn rows_per_file(&self) -> u32 {
        match self {
            GenerationResult::SingleRow(_) => 1,
            GenerationResult::MultiRow { rows_per_file, .. } => *rows_per_file,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitResult {
    pub original_file_name: String,
    pub total_lines_processed: usize,
    pub generated_files: Vec<PathBuf>,
    pub output_directory: PathBuf,
    pub timestamp: String,
}
