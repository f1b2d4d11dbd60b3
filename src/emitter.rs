use log::{error, info};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::template::LINE_ENDING;

/// One way of putting a rendered body on disk.
///
/// Implementations write `content` followed by exactly one line terminator
/// and overwrite whatever is at `path`.
pub trait WriteStrategy {
    fn name(&self) -> &'static str;
    fn write(&self, path: &Path, content: &[u8]) -> io::Result<()>;
}

/// Single `fs::write` of the whole buffer.
pub struct DirectWrite;

impl WriteStrategy for DirectWrite {
    fn name(&self) -> &'static str {
        "direct"
    }

    fn write(&self, path: &Path, content: &[u8]) -> io::Result<()> {
        let mut bytes = Vec::with_capacity(content.len() + LINE_ENDING.len());
        bytes.extend_from_slice(content);
        bytes.extend_from_slice(LINE_ENDING.as_bytes());
        fs::write(path, bytes)
    }
}

/// Streams through a `BufWriter`; the handle is dropped on every return path.
pub struct BufferedWrite;

impl WriteStrategy for BufferedWrite {
    fn name(&self) -> &'static str {
        "buffered"
    }

    fn write(&self, path: &Path, content: &[u8]) -> io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        writer.write_all(content)?;
        writer.write_all(LINE_ENDING.as_bytes())?;
        writer.flush()
    }
}

/// Writes a file with one fallback attempt when the primary strategy fails.
pub struct FileEmitter {
    primary: Box<dyn WriteStrategy>,
    fallback: Box<dyn WriteStrategy>,
}

impl FileEmitter {
    pub fn new(primary: Box<dyn WriteStrategy>, fallback: Box<dyn WriteStrategy>) -> Self {
        Self { primary, fallback }
    }

    /// Returns the fallback's error if both strategies fail.
    pub fn write(&self, path: &Path, content: &[u8]) -> io::Result<()> {
        let first = match self.primary.write(path, content) {
            Ok(()) => return Ok(()),
            Err(e) => e,
        };
        error!("Failed to create file {:?}: {}", path, first);

        match self.fallback.write(path, content) {
            Ok(()) => {
                info!(
                    "Successfully created file {:?} using {} writer",
                    path,
                    self.fallback.name()
                );
                Ok(())
            }
            Err(e) => {
                error!(
                    "Failed to create file {:?} with {} writer: {}",
                    path,
                    self.fallback.name(),
                    e
                );
                Err(e)
            }
        }
    }
}

impl Default for FileEmitter {
    fn default() -> Self {
        Self::new(Box::new(DirectWrite), Box::new(BufferedWrite))
    }
}
