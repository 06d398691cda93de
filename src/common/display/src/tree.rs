//! Tree display of a partition of graphs into clusters.

use std::fmt;

/// A partition rendered as a two-level tree: clusters, then member graphs.
///
/// Cluster and graph numbers are printed 1-indexed, the same numbering the
/// partition writer uses on disk.
pub struct PartitionTree<'a> {
    title: String,
    clusters: &'a [Vec<usize>],
}

impl<'a> PartitionTree<'a> {
    /// Create a new partition tree. `clusters[c]` lists the 0-indexed graph
    /// ids assigned to cluster `c`.
    pub fn new(title: impl Into<String>, clusters: &'a [Vec<usize>]) -> Self {
        Self {
            title: title.into(),
            clusters,
        }
    }
}

impl fmt::Display for PartitionTree<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;

        for (i, members) in self.clusters.iter().enumerate() {
            let is_last = i == self.clusters.len() - 1;
            let connector = if is_last { "└─ " } else { "├─ " };
            let child_prefix = if is_last { "   " } else { "│  " };

            writeln!(f, "{connector}cluster {} ({} graphs)", i + 1, members.len())?;

            for (j, graph) in members.iter().enumerate() {
                let leaf = if j == members.len() - 1 { "└─ " } else { "├─ " };
                writeln!(f, "{child_prefix}{leaf}graph {}", graph + 1)?;
            }
        }

        Ok(())
    }
}
