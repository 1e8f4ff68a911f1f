//! Splitzip - size-bounded zip packing and extraction
//!
//! This library packs source files into one or more zip archives, each
//! kept under a caller-supplied byte budget, and extracts archives with
//! per-entry progress reporting. All presentation concerns (argument
//! parsing, progress display) live in the separate CLI crate.

pub mod collect;
pub mod config;
pub mod error;
pub mod extract;
pub mod pack;
pub mod plan;
pub mod progress;

pub use error::{Error, Result};

// Re-export commonly used types
pub use collect::{collect_dir, collect_files, SourceEntry};
pub use config::Config;
pub use extract::{extract, list, ArchiveEntry, ExtractOptions, ExtractResult};
pub use pack::{pack_dir, pack_paths, PackOptions, PackResult, WriteResult};
pub use plan::{partition, ArchivePlan, Batch};
pub use progress::{CancelToken, NoProgress, ProgressCallback, ProgressState};
