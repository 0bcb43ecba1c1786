mod common;

use mst_cluster_analyzer::cluster::{cluster_count, group_members};
use mst_cluster_analyzer::cluster::kmeans::KMeans;
use mst_cluster_analyzer::cluster::metrics;
use mst_cluster_analyzer::data::complete_graph_from_points;
use mst_cluster_analyzer::graph::{Graph, Point};
use mst_cluster_analyzer::mst::{KruskalAlgorithm, MstAlgorithm};

use common::seven_node_graph;

#[test]
fn k_cut_yields_exactly_k_clusters() {
    let (graph, _) = seven_node_graph();
    let n = graph.node_count();

    for k in 1..=n {
        let mut kruskal = KruskalAlgorithm::new(&graph);
        let clustering = kruskal.clustering_by_count(k).expect("connected graph");
        assert_eq!(clustering.len(), n);
        assert_eq!(cluster_count(&clustering), k, "k = {k}");
    }
}

#[test]
fn k_one_gathers_everything_and_k_n_isolates_everything() {
    let (graph, _) = seven_node_graph();
    let mut kruskal = KruskalAlgorithm::new(&graph);

    let single = kruskal.clustering_by_count(1).expect("connected graph");
    assert_eq!(cluster_count(&single), 1);

    let isolated = kruskal
        .clustering_by_count(graph.node_count())
        .expect("connected graph");
    for (node, rep) in &isolated {
        assert_eq!(node, rep);
    }
}

#[test]
#[should_panic(expected = "outside")]
fn k_zero_violates_the_precondition() {
    let (graph, _) = seven_node_graph();
    let mut kruskal = KruskalAlgorithm::new(&graph);
    let _ = kruskal.clustering_by_count(0);
}

#[test]
#[should_panic(expected = "outside")]
fn k_above_n_violates_the_precondition() {
    let (graph, _) = seven_node_graph();
    let mut kruskal = KruskalAlgorithm::new(&graph);
    let _ = kruskal.clustering_by_count(graph.node_count() + 1);
}

#[test]
fn infinite_cutoff_keeps_every_edge() {
    let (graph, _) = seven_node_graph();
    let mut kruskal = KruskalAlgorithm::new(&graph);

    let clustering = kruskal
        .clustering_by_inconsistency(f64::INFINITY)
        .expect("connected graph");
    assert_eq!(cluster_count(&clustering), 1);
}

#[test]
fn zero_cutoff_fragments_a_path_into_singletons() {
    // a path is its own MST; with cutoff 0 every edge deviates "enough"
    let mut graph = Graph::new();
    let nodes: Vec<_> = (0..4).map(|label| graph.add_node(label, None)).collect();
    graph.add_edge(nodes[0], nodes[1], Some(1.0));
    graph.add_edge(nodes[1], nodes[2], Some(2.0));
    graph.add_edge(nodes[2], nodes[3], Some(4.0));

    let mut kruskal = KruskalAlgorithm::new(&graph);
    let clustering = kruskal
        .clustering_by_inconsistency(0.0)
        .expect("connected graph");
    assert_eq!(cluster_count(&clustering), graph.node_count());
}

#[test]
fn an_edge_without_neighbors_is_always_kept() {
    // a single edge has no other incident edges, so the prune test is
    // defined to fail even at cutoff 0
    let mut graph = Graph::new();
    let a = graph.add_node(0, None);
    let b = graph.add_node(1, None);
    graph.add_edge(a, b, Some(3.0));

    let mut kruskal = KruskalAlgorithm::new(&graph);
    let clustering = kruskal
        .clustering_by_inconsistency(0.0)
        .expect("connected graph");
    assert_eq!(cluster_count(&clustering), 1);
}

#[test]
fn mst_clustering_recovers_separated_point_groups() {
    let points = vec![
        Point::new(vec![0.0, 0.0]),
        Point::new(vec![0.0, 1.0]),
        Point::new(vec![1.0, 0.5]),
        Point::new(vec![50.0, 0.0]),
        Point::new(vec![50.0, 1.0]),
        Point::new(vec![51.0, 0.5]),
    ];
    let graph = complete_graph_from_points(points.clone());

    let mut kruskal = KruskalAlgorithm::new(&graph);
    let clustering = kruskal.clustering_by_count(2).expect("connected graph");

    let groups = group_members(&clustering);
    assert_eq!(groups.len(), 2);
    let mut sizes: Vec<usize> = groups.values().map(Vec::len).collect();
    sizes.sort_unstable();
    assert_eq!(sizes, vec![3, 3]);

    // the two tight groups are nearly perfectly separated
    let score = metrics::silhouette(&graph, &clustering, 1000);
    assert!(score > 0.9, "expected a clean split, got {score}");

    // and the k-means baseline agrees on the quality
    let mut kmeans = KMeans::new(points, 2);
    kmeans.run(100);
    let mst_variance = metrics::intracluster_variance(&graph, &clustering);
    assert!((mst_variance - kmeans.intracluster_variance()).abs() < 1e-6);
}
