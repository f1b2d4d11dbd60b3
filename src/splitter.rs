use chrono::{Local, NaiveDateTime};
use log::info;
use serde::Serialize;
use std::fs;
use std::io::BufRead;
use std::path::PathBuf;

use crate::config::SplitConfig;
use crate::emitter::FileEmitter;
use crate::error::SplitError;
use crate::generator::TIMESTAMP_FORMAT;
use crate::naming::NameRenderer;
use crate::result::SplitResult;

const PREVIEW_CHARS: usize = 50;

#[derive(Serialize)]
struct NameContext<'a> {
    line: usize,
    timestamp: &'a str,
}

/// Copies every line of an input CSV into a file of its own.
pub struct LineSplitter {
    output_dir: PathBuf,
    file_name: String,
    names: NameRenderer,
    emitter: FileEmitter,
}

impl LineSplitter {
    pub fn new(config: &SplitConfig) -> Self {
        Self {
            output_dir: config.output_dir.clone(),
            file_name: config.file_name.clone(),
            names: NameRenderer::new(),
            emitter: FileEmitter::default(),
        }
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn split<R: BufRead>(&self, input: R, original_name: &str) -> Result<SplitResult, SplitError> {
        self.split_at(input, original_name, Local::now().naive_local())
    }

    pub fn split_at<R: BufRead>(
        &self,
        input: R,
        original_name: &str,
        started: NaiveDateTime,
    ) -> Result<SplitResult, SplitError> {
        info!("Starting CSV split process for file: {}", original_name);

        if !self.output_dir.exists() {
            fs::create_dir_all(&self.output_dir).map_err(|source| SplitError::DirectoryCreation {
                path: self.output_dir.clone(),
                source,
            })?;
            info!("Created output directory: {:?}", self.output_dir);
        }

        let timestamp = started.format(TIMESTAMP_FORMAT).to_string();
        let mut files = Vec::new();

        // Lines are copied as raw bytes; input need not be UTF-8.
        for (i, line) in input.split(b'\n').enumerate() {
            let number = i + 1;
            let mut line = line.map_err(|source| SplitError::Read {
                line: number,
                source,
            })?;
            if line.last() == Some(&b'\r') {
                line.pop();
            }

            let context = NameContext {
                line: number,
                timestamp: &timestamp,
            };
            let name = self
                .names
                .render(&self.file_name, &context)
                .map_err(|message| SplitError::FileName {
                    line: number,
                    message,
                })?;
            let path = self.output_dir.join(name);

            self.emitter
                .write(&path, &line)
                .map_err(|source| SplitError::FileWrite {
                    path: path.clone(),
                    source,
                })?;
            let preview: String = String::from_utf8_lossy(&line)
                .chars()
                .take(PREVIEW_CHARS)
                .collect();
            info!("Created file: {:?} with content: {}...", path, preview);
            files.push(path);
        }

        info!("Successfully split CSV into {} files", files.len());
        Ok(SplitResult {
            original_file_name: original_name.to_string(),
            total_lines_processed: files.len(),
            generated_files: files,
            output_directory: self.output_dir.clone(),
            timestamp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::LINE_ENDING;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn started() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(8, 5, 3)
            .unwrap()
    }

    fn splitter(dir: &std::path::Path) -> LineSplitter {
        LineSplitter::new(&SplitConfig::default()).with_output_dir(dir)
    }

    #[test]
    fn test_split_one_file_per_line() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("split_files");
        let input = "a,b,c\nd,e,f\r\ng,h,i";

        let result = splitter(&out)
            .split_at(input.as_bytes(), "payments.csv", started())
            .unwrap();

        assert_eq!(result.original_file_name, "payments.csv");
        assert_eq!(result.total_lines_processed, 3);
        assert_eq!(result.timestamp, "20261019_080503");
        assert_eq!(result.output_directory, out);
        assert_eq!(result.generated_files[0], out.join("line_1_20261019_080503.csv"));
        assert_eq!(result.generated_files[2], out.join("line_3_20261019_080503.csv"));

        let second = fs::read_to_string(&result.generated_files[1]).unwrap();
        assert_eq!(second, format!("d,e,f{}", LINE_ENDING));
    }

    #[test]
    fn test_split_copies_non_utf8_lines_verbatim() {
        let dir = tempdir().unwrap();
        let input: &[u8] = b"a,1\nCaf\xe9,2\r\nc,3\n";

        let result = splitter(dir.path())
            .split_at(input, "latin1.csv", started())
            .unwrap();

        assert_eq!(result.total_lines_processed, 3);
        let mut expected = b"Caf\xe9,2".to_vec();
        expected.extend_from_slice(LINE_ENDING.as_bytes());
        assert_eq!(fs::read(&result.generated_files[1]).unwrap(), expected);
        assert!(result.generated_files[2].exists());
    }

    #[test]
    fn test_split_empty_input() {
        let dir = tempdir().unwrap();
        let result = splitter(dir.path())
            .split_at("".as_bytes(), "empty.csv", started())
            .unwrap();
        assert_eq!(result.total_lines_processed, 0);
        assert!(result.generated_files.is_empty());
    }

    #[test]
    fn test_split_keeps_existing_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("file_001.csv"), "keep").unwrap();
        splitter(dir.path())
            .split_at("x".as_bytes(), "one.csv", started())
            .unwrap();
        assert!(dir.path().join("file_001.csv").exists());
    }

    #[test]
    fn test_split_custom_file_name() {
        let dir = tempdir().unwrap();
        let config = SplitConfig {
            output_dir: dir.path().to_path_buf(),
            file_name: "row-{{ line }}.csv".to_string(),
        };
        let result = LineSplitter::new(&config)
            .split_at("x\ny".as_bytes(), "two.csv", started())
            .unwrap();
        assert_eq!(result.generated_files, vec![dir.path().join("row-1.csv"), dir.path().join("row-2.csv")]);
    }

    #[test]
    fn test_split_bad_file_name_pattern() {
        let dir = tempdir().unwrap();
        let config = SplitConfig {
            output_dir: dir.path().to_path_buf(),
            file_name: "{{ unknown }}.csv".to_string(),
        };
        let err = LineSplitter::new(&config)
            .split_at("x".as_bytes(), "one.csv", started())
            .unwrap_err();
        assert!(matches!(err, SplitError::FileName { line: 1, .. }));
    }
}
