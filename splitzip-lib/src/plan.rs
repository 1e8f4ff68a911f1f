//! Partitioning source entries into size-bounded batches

use crate::collect::SourceEntry;
use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// A contiguous group of source entries destined for one output archive
#[derive(Debug, Clone, Default)]
pub struct Batch {
    pub entries: Vec<SourceEntry>,
    /// Cumulative uncompressed size of the entries
    pub size: u64,
}

impl Batch {
    fn push(&mut self, entry: SourceEntry) {
        self.size += entry.size;
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Split `entries` into batches whose cumulative size stays within `budget`.
///
/// Greedy single pass in collector order: a batch is sealed as soon as the
/// next entry would push it over the budget. A single entry larger than the
/// budget still gets a batch of its own; the budget is a soft cap, never a
/// hard rejection. With `None` the whole input collapses into one batch.
///
/// The decision uses uncompressed sizes, since compressed size is unknown
/// until write time. Known imprecision, kept on purpose.
pub fn partition(entries: Vec<SourceEntry>, budget: Option<u64>) -> Result<Vec<Batch>> {
    let Some(budget) = budget else {
        if entries.is_empty() {
            return Ok(Vec::new());
        }
        let mut batch = Batch::default();
        for entry in entries {
            batch.push(entry);
        }
        return Ok(vec![batch]);
    };

    if budget == 0 {
        return Err(Error::InvalidBudget);
    }

    let mut batches = Vec::new();
    let mut current = Batch::default();
    for entry in entries {
        if !current.is_empty() && current.size + entry.size > budget {
            debug!(entries = current.len(), size = current.size, "sealing batch");
            batches.push(std::mem::take(&mut current));
        }
        current.push(entry);
    }
    if !current.is_empty() {
        batches.push(current);
    }

    Ok(batches)
}

/// An ordered set of batches with their output archive paths, one per batch
#[derive(Debug, Clone)]
pub struct ArchivePlan {
    pub batches: Vec<Batch>,
    pub outputs: Vec<PathBuf>,
}

impl ArchivePlan {
    /// Partition `entries` and derive output names from `base`.
    ///
    /// With a budget every volume is named `<stem>_<N>.<ext>` with N
    /// starting at 1, first volume included. Without a budget the single
    /// archive keeps `base` unchanged, matching the behavior before size
    /// limits existed.
    pub fn new(entries: Vec<SourceEntry>, budget: Option<u64>, base: &Path) -> Result<Self> {
        let bounded = budget.is_some();
        let batches = partition(entries, budget)?;
        let outputs = if bounded {
            (1..=batches.len()).map(|i| volume_path(base, i)).collect()
        } else {
            batches.iter().map(|_| base.to_path_buf()).collect()
        };
        Ok(Self { batches, outputs })
    }
}

fn volume_path(base: &Path, index: usize) -> PathBuf {
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "archive".to_string());
    let name = match base.extension() {
        Some(ext) => format!("{}_{}.{}", stem, index, ext.to_string_lossy()),
        None => format!("{}_{}", stem, index),
    };
    base.with_file_name(name)
}
