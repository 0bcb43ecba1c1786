//! Clustering quality metrics

use std::collections::HashMap;

use rayon::prelude::*;

use super::{group_members, Clustering};
use crate::graph::{Graph, Node, NodeId, Point};

/// Intracluster variance: for each cluster, the summed distance of its
/// members to the cluster center (the componentwise mean of the member
/// points, as in the k-means update step), totalled and divided by the number
/// of nodes. Nodes without points are skipped.
pub fn intracluster_variance(graph: &Graph, clustering: &Clustering) -> f64 {
    if clustering.is_empty() {
        return 0.0;
    }

    let members = group_members(clustering);
    let mut total = 0.0;

    for nodes in members.values() {
        let points: Vec<&Point> = nodes
            .iter()
            .filter_map(|&id| graph.node(id).and_then(Node::point))
            .collect();
        let first = match points.first() {
            Some(first) => first,
            None => continue,
        };

        // cluster center, componentwise mean of the member points
        let mut center = vec![0.0; first.dim()];
        for point in &points {
            for (c, x) in center.iter_mut().zip(point.coords()) {
                *c += x;
            }
        }
        for c in &mut center {
            *c /= points.len() as f64;
        }
        let center = Point::new(center);

        total += points.iter().map(|point| point.distance(&center)).sum::<f64>();
    }

    total / clustering.len() as f64
}

/// Mean silhouette coefficient of a clustering.
///
/// Per node: `a` is the average distance to its own cluster (averaged over
/// the full cluster size, self included), `b` the smallest average distance
/// to a foreign cluster, and the coefficient is `(b - a) / max(a, b)`.
/// Clusterings larger than `parallel_threshold` nodes take the parallel path.
pub fn silhouette(graph: &Graph, clustering: &Clustering, parallel_threshold: usize) -> f64 {
    let n = clustering.len();
    if n == 0 {
        return 0.0;
    }

    let mut sizes: HashMap<NodeId, usize> = HashMap::new();
    for rep in clustering.values() {
        *sizes.entry(*rep).or_insert(0) += 1;
    }

    let total: f64 = if n < parallel_threshold {
        clustering
            .keys()
            .map(|&node| node_silhouette(graph, clustering, &sizes, node))
            .sum()
    } else {
        log::debug!("computing silhouette for {n} nodes on the parallel path");
        let nodes: Vec<NodeId> = clustering.keys().copied().collect();
        nodes
            .par_iter()
            .map(|&node| node_silhouette(graph, clustering, &sizes, node))
            .sum()
    };

    total / n as f64
}

fn node_silhouette(
    graph: &Graph,
    clustering: &Clustering,
    sizes: &HashMap<NodeId, usize>,
    node: NodeId,
) -> f64 {
    let own_rep = clustering[&node];
    let this = match graph.node(node) {
        Some(this) => this,
        None => return 0.0,
    };

    // summed distance from `node` to every cluster, own one included
    let mut dist_to: HashMap<NodeId, f64> = sizes.keys().map(|&rep| (rep, 0.0)).collect();
    for (&other, &other_rep) in clustering {
        if other == node {
            continue;
        }
        if let Some(other_node) = graph.node(other) {
            *dist_to.entry(other_rep).or_insert(0.0) += this.distance(other_node);
        }
    }

    let mut a = 0.0;
    let mut b = f64::MAX;
    for (&rep, &sum) in &dist_to {
        let average = sum / sizes[&rep] as f64;
        if rep == own_rep {
            a = average;
        } else if average < b {
            b = average;
        }
    }
    // a single cluster has no foreign neighbor to compare against
    if b == f64::MAX {
        b = 0.0;
    }

    let denominator = a.max(b);
    if denominator == 0.0 {
        return 0.0;
    }
    (b - a) / denominator
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two tight pairs far apart on a line
    fn two_pair_graph() -> (Graph, Clustering) {
        let mut graph = Graph::new();
        for x in [0.0, 1.0, 100.0, 101.0] {
            graph.add_node(0, Some(Point::new(vec![x])));
        }
        let clustering: Clustering = [(0, 0), (1, 0), (2, 2), (3, 2)].into();
        (graph, clustering)
    }

    #[test]
    fn separated_pairs_have_silhouette_near_one() {
        let (graph, clustering) = two_pair_graph();
        let score = silhouette(&graph, &clustering, 1000);
        assert!(score > 0.9, "expected near-perfect separation, got {score}");
    }

    #[test]
    fn parallel_path_matches_sequential() {
        let (graph, clustering) = two_pair_graph();
        let sequential = silhouette(&graph, &clustering, usize::MAX);
        let parallel = silhouette(&graph, &clustering, 0);
        assert!((sequential - parallel).abs() < 1e-12);
    }

    #[test]
    fn splitting_at_the_gap_reduces_variance() {
        let (graph, _) = two_pair_graph();
        let merged: Clustering = [(0, 0), (1, 0), (2, 0), (3, 0)].into();
        let split: Clustering = [(0, 0), (1, 0), (2, 2), (3, 2)].into();

        let merged_variance = intracluster_variance(&graph, &merged);
        let split_variance = intracluster_variance(&graph, &split);
        assert!(split_variance < merged_variance);
    }

    #[test]
    fn empty_clustering_is_benign() {
        let graph = Graph::new();
        let clustering = Clustering::new();
        assert_eq!(intracluster_variance(&graph, &clustering), 0.0);
        assert_eq!(silhouette(&graph, &clustering, 1000), 0.0);
    }
}
