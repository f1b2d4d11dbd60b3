//! Bulk CSV fixture generation from a fixed payment record, plus a
//! one-file-per-line splitter.
//!
//! Generated files are named `file_NNN.csv` and carry a running counter in
//! field 8 and the day after the run start in field 9.

pub mod config;
pub mod emitter;
pub mod error;
pub mod generator;
pub mod naming;
pub mod output_dir;
pub mod result;
pub mod sequence;
pub mod splitter;
pub mod template;

pub use config::Config;
pub use emitter::{BufferedWrite, DirectWrite, FileEmitter, WriteStrategy};
pub use error::{GenerateError, SplitError};
pub use generator::{FileGenerator, GenerationRequest};
pub use result::{GenerationResult, RunSummary, SplitResult};
pub use splitter::LineSplitter;
