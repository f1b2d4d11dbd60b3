use log::{info, warn};
use regex::Regex;
use std::{fs, io, path::Path};

/// The regex pattern for files produced by a generation run.
const GENERATED_FILE_PATTERN: &str = r"^file_[0-9]{3,}\.csv$";

/// File name for the 1-based `index`, zero-padded to at least three digits.
pub fn generated_file_name(index: u32) -> String {
    format!("file_{:03}.csv", index)
}

/// Owns the clean-then-populate lifecycle of a generation target directory.
pub struct OutputDirManager {
    pattern: Regex,
}

impl OutputDirManager {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(GENERATED_FILE_PATTERN).expect("generated file pattern is valid"),
        }
    }

    pub fn is_generated(&self, file_name: &str) -> bool {
        self.pattern.is_match(file_name)
    }

    /// Creates `path` if missing, otherwise removes earlier generated files.
    ///
    /// Only creation failures are returned. Cleanup problems are logged and
    /// skipped, and the result reports how many files were removed.
    pub fn prepare(&self, path: &Path) -> io::Result<usize> {
        if !path.exists() {
            fs::create_dir_all(path)?;
            info!("Created output directory: {:?}", path);
            return Ok(0);
        }
        Ok(self.cleanup(path))
    }

    fn cleanup(&self, path: &Path) -> usize {
        let entries = match fs::read_dir(path) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Could not clean up existing files in {:?}: {}", path, e);
                return 0;
            }
        };

        let mut removed = 0;
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Could not read directory entry in {:?}: {}", path, e);
                    continue;
                }
            };
            let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
            let matches = entry.file_name().to_str().is_some_and(|n| self.is_generated(n));
            if !is_file || !matches {
                continue;
            }
            match fs::remove_file(entry.path()) {
                Ok(()) => removed += 1,
                Err(e) => warn!("Could not delete existing file: {:?}: {}", entry.path(), e),
            }
        }
        info!("Cleaned up {} existing CSV files in {:?}", removed, path);
        removed
    }
}

impl Default for OutputDirManager {
    fn default() -> Self {
        Self::new()
    }
}
