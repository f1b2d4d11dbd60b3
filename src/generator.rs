use chrono::{Local, NaiveDateTime};
use log::info;
use std::path::{Path, PathBuf};
use std::{thread, time::Duration};

use crate::config::{Config, ThrottleConfig};
use crate::emitter::FileEmitter;
use crate::error::GenerateError;
use crate::output_dir::{generated_file_name, OutputDirManager};
use crate::result::{GenerationResult, RunSummary};
use crate::sequence::{last_value, SequenceAllocator};
use crate::template::{render_row, LINE_ENDING};

pub(crate) const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Parameters of one generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationRequest {
    pub file_count: u32,
    pub rows_per_file: Option<u32>,
}

impl GenerationRequest {
    pub fn new(file_count: u32, rows_per_file: Option<u32>) -> Self {
        Self {
            file_count,
            rows_per_file,
        }
    }

    /// More than one row per file switches to multi-row output.
    pub fn is_multi_row(&self) -> bool {
        matches!(self.rows_per_file, Some(rows) if rows > 1)
    }

    /// Rows the run writes across all files.
    pub fn total_rows(&self) -> u64 {
        let rows_per_file = self.rows_per_file.unwrap_or(1).max(1);
        u64::from(self.file_count) * u64::from(rows_per_file)
    }

    /// Checks the bounds the engine relies on.
    pub fn validate(&self, max_file_count: u32) -> Result<(), GenerateError> {
        if self.file_count == 0 || self.file_count > max_file_count {
            return Err(GenerateError::InvalidRequest(format!(
                "Count must be between 1 and {}!",
                max_file_count
            )));
        }
        if self.rows_per_file == Some(0) {
            return Err(GenerateError::InvalidRequest(
                "Rows per file must be at least 1!".to_string(),
            ));
        }
        Ok(())
    }
}

/// State threaded through a single run.
struct RunContext {
    sequence: SequenceAllocator,
    timestamp: String,
    files: Vec<PathBuf>,
}

/// Produces `file_NNN.csv` fixtures from the record template.
pub struct FileGenerator {
    output_dir: PathBuf,
    counter_base: u64,
    throttle: ThrottleConfig,
    dir_manager: OutputDirManager,
    emitter: FileEmitter,
    dry_run: bool,
}

impl FileGenerator {
    pub fn new(output_dir: impl Into<PathBuf>, dry_run: bool) -> Self {
        let defaults = Config::default();
        Self {
            output_dir: output_dir.into(),
            counter_base: defaults.counter_base,
            throttle: defaults.throttle,
            dir_manager: OutputDirManager::new(),
            emitter: FileEmitter::default(),
            dry_run,
        }
    }

    pub fn from_config(config: &Config, dry_run: bool) -> Self {
        Self::new(config.output_dir.clone(), dry_run)
            .with_counter_base(config.counter_base)
            .with_throttle(config.throttle.clone())
    }

    pub fn with_counter_base(mut self, counter_base: u64) -> Self {
        self.counter_base = counter_base;
        self
    }

    pub fn with_throttle(mut self, throttle: ThrottleConfig) -> Self {
        self.throttle = throttle;
        self
    }

    pub fn with_emitter(mut self, emitter: FileEmitter) -> Self {
        self.emitter = emitter;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Runs generation starting now, in local time.
    pub fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, GenerateError> {
        self.generate_at(request, Local::now().naive_local())
    }

    /// Runs generation as if it started at `started`.
    pub fn generate_at(
        &self,
        request: &GenerationRequest,
        started: NaiveDateTime,
    ) -> Result<GenerationResult, GenerateError> {
        let total_rows = request.total_rows();
        if total_rows > 0 && last_value(self.counter_base, total_rows).is_none() {
            return Err(GenerateError::InvalidRequest(format!(
                "Counter base {} cannot number {} rows without overflow",
                self.counter_base, total_rows
            )));
        }

        match request.rows_per_file {
            Some(rows_per_file) if rows_per_file > 1 => {
                self.generate_multi_row(request.file_count, rows_per_file, started)
            }
            _ => self.generate_single_row(request.file_count, started),
        }
    }

    fn generate_single_row(
        &self,
        file_count: u32,
        started: NaiveDateTime,
    ) -> Result<GenerationResult, GenerateError> {
        info!("Starting CSV generation process for {} files", file_count);
        let mut ctx = self.begin_run(started)?;
        let date = ctx.sequence.current_date().to_string();

        for index in 1..=file_count {
            let counter = ctx.sequence.next();
            let content = render_row(counter, &date);
            let path = self.emit(&mut ctx, index, &content)?;

            if index <= 3 || index == file_count {
                info!(
                    "Generated file {}: {:?} with position8={}, date={}",
                    index, path, counter, date
                );
            }
        }

        info!("Successfully generated {} CSV files", ctx.files.len());
        Ok(GenerationResult::SingleRow(self.finish(ctx)))
    }

    fn generate_multi_row(
        &self,
        file_count: u32,
        rows_per_file: u32,
        started: NaiveDateTime,
    ) -> Result<GenerationResult, GenerateError> {
        info!(
            "Starting CSV generation: {} files with {} rows each",
            file_count, rows_per_file
        );
        let mut ctx = self.begin_run(started)?;
        let date = ctx.sequence.current_date().to_string();

        for index in 1..=file_count {
            let mut rows = Vec::with_capacity(rows_per_file as usize);
            let first = ctx.sequence.next();
            rows.push(render_row(first, &date));
            for _ in 1..rows_per_file {
                rows.push(render_row(ctx.sequence.next(), &date));
            }
            let path = self.emit(&mut ctx, index, &rows.join(LINE_ENDING))?;

            if index <= 3 || index == file_count {
                info!(
                    "Generated file {}: {:?} with {} rows, position8 range: {} to {}",
                    index,
                    path,
                    rows_per_file,
                    first,
                    first + (u64::from(rows_per_file) - 1)
                );
            }
        }

        let total_rows = u64::from(file_count) * u64::from(rows_per_file);
        info!(
            "Successfully generated {} CSV files with {} rows each (total: {} rows)",
            file_count, rows_per_file, total_rows
        );
        Ok(GenerationResult::MultiRow {
            summary: self.finish(ctx),
            rows_per_file,
            total_rows,
        })
    }

    fn begin_run(&self, started: NaiveDateTime) -> Result<RunContext, GenerateError> {
        if self.dry_run {
            info!("[DRY RUN] Would prepare: {:?}", self.output_dir);
        } else {
            self.dir_manager
                .prepare(&self.output_dir)
                .map_err(|source| GenerateError::DirectoryCreation {
                    path: self.output_dir.clone(),
                    source,
                })?;
        }

        Ok(RunContext {
            sequence: SequenceAllocator::new(self.counter_base, started.date()),
            timestamp: started.format(TIMESTAMP_FORMAT).to_string(),
            files: Vec::new(),
        })
    }

    fn emit(&self, ctx: &mut RunContext, index: u32, content: &str) -> Result<PathBuf, GenerateError> {
        let path = self.output_dir.join(generated_file_name(index));

        if self.dry_run {
            info!("[DRY RUN] Would write: {:?}", path);
        } else {
            self.emitter
                .write(&path, content.as_bytes())
                .map_err(|source| GenerateError::FileWrite {
                    path: path.clone(),
                    source,
                })?;
            self.pause_after(index);
        }

        ctx.files.push(path.clone());
        Ok(path)
    }

    fn pause_after(&self, index: u32) {
        if self.throttle.every > 0 && index % self.throttle.every == 0 {
            thread::sleep(Duration::from_millis(self.throttle.pause_ms));
        }
    }

    fn finish(&self, ctx: RunContext) -> RunSummary {
        let base = ctx.sequence.base();
        RunSummary {
            total_files_generated: ctx.files.len(),
            generated_files: ctx.files,
            output_directory: self.output_dir.clone(),
            timestamp: ctx.timestamp,
            tomorrow_date: ctx.sequence.current_date().to_string(),
            starting_position8_value: base,
            ending_position8_value: ctx.sequence.last_issued().unwrap_or(base),
        }
    }
}
