#![allow(dead_code)]

use mst_cluster_analyzer::graph::{EdgeId, Graph, NodeId};

/// 7 nodes (labels 1..=7, ids 0..7) with two equal-weight MSTs: edge 7
/// (4--5) and edge 9 (4--7) both weigh 3 and exactly one of them can
/// complete the tree. Expected MST weight: 15.
pub fn seven_node_graph() -> (Graph, Vec<EdgeId>) {
    let edges: [(usize, usize, f64); 12] = [
        (1, 3, 6.0),
        (1, 4, 1.0),
        (2, 3, 6.0),
        (2, 5, 8.0),
        (2, 6, 4.0),
        (3, 4, 9.0),
        (3, 6, 2.0),
        (4, 5, 3.0),
        (4, 6, 3.0),
        (4, 7, 3.0),
        (5, 6, 5.0),
        (5, 7, 2.0),
    ];
    build_graph(7, &edges)
}

/// 9 nodes (labels 1..=9, ids 0..9) with a unique MST of weight 37.
pub fn nine_node_graph() -> (Graph, Vec<EdgeId>) {
    let edges: [(usize, usize, f64); 14] = [
        (1, 2, 4.0),
        (1, 8, 9.0),
        (2, 3, 8.0),
        (2, 8, 11.0),
        (3, 4, 7.0),
        (3, 6, 4.0),
        (3, 9, 2.0),
        (4, 5, 9.0),
        (4, 6, 14.0),
        (5, 6, 10.0),
        (6, 7, 2.0),
        (7, 8, 1.0),
        (7, 9, 6.0),
        (8, 9, 7.0),
    ];
    build_graph(9, &edges)
}

/// Two components: a triangle and a detached pair
pub fn disconnected_graph() -> Graph {
    let mut graph = Graph::new();
    let nodes: Vec<NodeId> = (0..5).map(|label| graph.add_node(label, None)).collect();
    graph.add_edge(nodes[0], nodes[1], Some(1.0));
    graph.add_edge(nodes[1], nodes[2], Some(2.0));
    graph.add_edge(nodes[0], nodes[2], Some(3.0));
    graph.add_edge(nodes[3], nodes[4], Some(1.0));
    graph
}

fn build_graph(n: i32, edge_spec: &[(usize, usize, f64)]) -> (Graph, Vec<EdgeId>) {
    let mut graph = Graph::new();
    let nodes: Vec<NodeId> = (1..=n).map(|label| graph.add_node(label, None)).collect();
    let edges = edge_spec
        .iter()
        .map(|&(p1, p2, weight)| graph.add_edge(nodes[p1 - 1], nodes[p2 - 1], Some(weight)))
        .collect();
    (graph, edges)
}
