//! Point-file ingestion and point-set graph construction

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::MstError;
use crate::graph::{Graph, NodeId, Point};

/// Reads whitespace-separated point rows with exactly `dim` columns.
///
/// Blank lines are skipped, so a trailing newline does not produce a phantom
/// point. The dimensionality is an explicit argument, never ambient state.
pub fn read_points(path: &Path, dim: usize) -> Result<Vec<Point>, MstError> {
    let file = File::open(path).map_err(|source| MstError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let mut points = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|source| MstError::Io {
            path: path.display().to_string(),
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }

        let coords = line
            .split_whitespace()
            .map(str::parse::<f64>)
            .collect::<Result<Vec<f64>, _>>()
            .map_err(|err| MstError::Parse {
                path: path.display().to_string(),
                line: index + 1,
                message: err.to_string(),
            })?;

        if coords.len() != dim {
            return Err(MstError::Parse {
                path: path.display().to_string(),
                line: index + 1,
                message: format!("expected {dim} coordinates, found {}", coords.len()),
            });
        }
        points.push(Point::new(coords));
    }

    log::info!("read {} points of dimension {dim} from {}", points.len(), path.display());
    Ok(points)
}

/// Builds the complete graph over a point set, with Euclidean edge weights.
/// Node labels are the point indices.
pub fn complete_graph_from_points(points: Vec<Point>) -> Graph {
    let mut graph = Graph::new();
    let ids: Vec<NodeId> = points
        .into_iter()
        .enumerate()
        .map(|(index, point)| graph.add_node(index as i32, Some(point)))
        .collect();

    for (i, &p1) in ids.iter().enumerate() {
        for &p2 in &ids[i + 1..] {
            graph.add_edge(p1, p2, None);
        }
    }

    log::debug!(
        "complete graph: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_graph_has_all_pairs() {
        let points = vec![
            Point::new(vec![0.0, 0.0]),
            Point::new(vec![3.0, 4.0]),
            Point::new(vec![0.0, 1.0]),
            Point::new(vec![1.0, 1.0]),
        ];
        let graph = complete_graph_from_points(points);

        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 4 * 3 / 2);

        // weights come from the Euclidean distance
        let heavy = graph
            .connected_edges(0)
            .find(|edge| edge.touches(1))
            .map(|edge| edge.weight());
        assert_eq!(heavy, Some(5.0));
    }
}
