//! Problem input parsing.

use std::io::BufRead;

use agony_core::Graph;
use common_error::{AgonyError, AgonyResult};
use log::debug;

/// A parsed partitioning problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemSpec {
    /// Nodes shared by every graph.
    pub node_count: usize,
    /// Number of clusters `K` to partition into.
    pub partitions: usize,
    /// Input graphs in file order.
    pub graphs: Vec<Graph>,
}

impl ProblemSpec {
    /// Render the problem back into the input format.
    pub fn to_text(&self) -> String {
        let mut text = format!(
            "{} {} {}\n",
            self.node_count,
            self.graphs.len(),
            self.partitions
        );
        for graph in &self.graphs {
            text.push_str(&graph.to_edge_list());
            text.push('\n');
        }
        text
    }
}

/// Reads problems in the line-oriented input format.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProblemReader;

impl ProblemReader {
    /// Parse a full problem. Errors carry the 1-based line they occurred on.
    pub fn read<R: BufRead>(input: R) -> AgonyResult<ProblemSpec> {
        let mut lines = input.lines();

        let header = lines
            .next()
            .transpose()?
            .ok_or_else(|| AgonyError::parse(1, "missing `N G K` header"))?;
        let (node_count, graph_count, partitions) = parse_header(&header)?;
        debug!("Reading {graph_count} graphs over {node_count} nodes, {partitions} partitions");

        let mut graphs = Vec::new();
        for index in 0..graph_count {
            let line_no = index + 2;
            let line = lines.next().transpose()?.ok_or_else(|| {
                AgonyError::parse(
                    line_no,
                    format!("expected {graph_count} graph lines, found {index}"),
                )
            })?;
            let graph = Graph::from_edge_list(node_count, &line).map_err(|err| match err {
                AgonyError::ParseError { message, .. } => AgonyError::parse(line_no, message),
                other => AgonyError::parse(line_no, other.to_string()),
            })?;
            graphs.push(graph);
        }

        Ok(ProblemSpec {
            node_count,
            partitions,
            graphs,
        })
    }

    /// Parse a problem from a string.
    pub fn read_str(text: &str) -> AgonyResult<ProblemSpec> {
        Self::read(text.as_bytes())
    }
}

fn parse_header(line: &str) -> AgonyResult<(usize, usize, usize)> {
    let values = line
        .split_whitespace()
        .map(|token| {
            token
                .parse::<usize>()
                .map_err(|_| AgonyError::parse(1, format!("`{token}` is not a count")))
        })
        .collect::<AgonyResult<Vec<_>>>()?;

    match values[..] {
        [nodes, graphs, partitions] => {
            if nodes == 0 {
                return Err(AgonyError::parse(1, "node count must be positive"));
            }
            if partitions == 0 {
                return Err(AgonyError::parse(1, "partition count must be positive"));
            }
            Ok((nodes, graphs, partitions))
        }
        _ => Err(AgonyError::parse(
            1,
            format!("expected `N G K`, found {} values", values.len()),
        )),
    }
}
