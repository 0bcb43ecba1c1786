//! Edge-list ingestion
//!
//! Format: the first non-blank line carries the node count `n`, every
//! following line one `u v weight` edge with `u, v` in `[0, n)`.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::MstError;
use crate::graph::{Graph, NodeId};

/// Reads an edge-list file into a graph with node ids `0..n`.
pub fn read_edge_list(path: &Path) -> Result<Graph, MstError> {
    let file = File::open(path).map_err(|source| MstError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let parse_error = |line: usize, message: String| MstError::Parse {
        path: path.display().to_string(),
        line,
        message,
    };

    let mut graph = Graph::new();
    let mut node_count: Option<usize> = None;

    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|source| MstError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let lineno = index + 1;

        let Some(n) = node_count else {
            let n: usize = line
                .parse()
                .map_err(|_| parse_error(lineno, format!("invalid node count {line:?}")))?;
            for label in 0..n {
                graph.add_node(label as i32, None);
            }
            node_count = Some(n);
            continue;
        };

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 3 {
            return Err(parse_error(
                lineno,
                format!("expected `u v weight`, found {} fields", fields.len()),
            ));
        }

        let endpoint = |field: &str| -> Result<NodeId, MstError> {
            let id: NodeId = field
                .parse()
                .map_err(|_| parse_error(lineno, format!("invalid node id {field:?}")))?;
            if (id as usize) >= n {
                return Err(parse_error(lineno, format!("node id {id} outside [0, {n})")));
            }
            Ok(id)
        };

        let p1 = endpoint(fields[0])?;
        let p2 = endpoint(fields[1])?;
        let weight: f64 = fields[2]
            .parse()
            .map_err(|_| parse_error(lineno, format!("invalid weight {:?}", fields[2])))?;

        graph.add_edge(p1, p2, Some(weight));
    }

    let graph = match node_count {
        Some(_) => graph,
        None => {
            return Err(parse_error(0, "empty edge-list file".to_string()));
        }
    };

    log::info!(
        "read graph with {} nodes and {} edges from {}",
        graph.node_count(),
        graph.edge_count(),
        path.display()
    );
    Ok(graph)
}
