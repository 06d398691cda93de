//! Atomic persistence of the best partition.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use agony_optimizer::{BestSink, Candidate};
use common_error::{AgonyError, AgonyResult};
use log::debug;
use tempfile::NamedTempFile;

/// Writes one 1-indexed cluster id per line, replacing the destination
/// atomically on every write.
///
/// Readers of the destination see either the previous partition or the new
/// one, never a partial file.
#[derive(Debug, Clone)]
pub struct PartitionWriter {
    path: PathBuf,
    writes: usize,
}

impl PartitionWriter {
    /// Create a writer for `path`. Nothing is written until the first record.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            writes: 0,
        }
    }

    /// Destination path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of partitions persisted so far.
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Persist `candidate` over the destination.
    pub fn write(&mut self, candidate: &Candidate) -> AgonyResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut file = NamedTempFile::new_in(dir)?;
        {
            let mut out = BufWriter::new(file.as_file_mut());
            for id in candidate.cluster_ids_one_based() {
                writeln!(out, "{id}")?;
            }
            out.flush()?;
        }
        file.as_file().sync_all()?;
        file.persist(&self.path)?;
        self.writes += 1;
        Ok(())
    }
}

impl BestSink for PartitionWriter {
    fn record(&mut self, best: &Candidate, fitness: u64) -> AgonyResult<()> {
        debug!("Writing partition with fitness {fitness} to {}", self.path.display());
        self.write(best)
    }
}

/// Read a written partition back as 0-indexed cluster ids.
pub fn read_partition(path: impl AsRef<Path>) -> AgonyResult<Vec<usize>> {
    let text = fs::read_to_string(path)?;
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            let id = line.trim().parse::<usize>().ok().filter(|&id| id > 0);
            id.map(|id| id - 1).ok_or_else(|| {
                AgonyError::parse(i + 1, format!("`{}` is not a cluster id", line.trim()))
            })
        })
        .collect()
}
