use std::path::Path;
use std::time::Instant;

use anyhow::{bail, Result};
use clap::Parser;

use mst_cluster_analyzer::cluster::kmeans::KMeans;
use mst_cluster_analyzer::cluster::metrics;
use mst_cluster_analyzer::config::Config;
use mst_cluster_analyzer::data;
use mst_cluster_analyzer::graph::Graph;
use mst_cluster_analyzer::mst::{
    run_distributed, BoruvkaAlgorithm, KruskalAlgorithm, MstAlgorithm, PrimAlgorithm,
};
use mst_cluster_analyzer::storage::{self, AlgorithmRun};

#[derive(Parser, Debug)]
#[clap(
    name = "mst-cluster-analyzer",
    about = "MST construction and MST-derived clustering over weighted graphs"
)]
struct Cli {
    /// Path to an edge-list file (first line node count, then `u v w` rows)
    #[clap(long)]
    edges: Option<String>,

    /// Path to a whitespace-separated points file (a complete graph is built)
    #[clap(long, conflicts_with = "edges")]
    points: Option<String>,

    /// Point dimensionality for --points input
    #[clap(long, default_value = "2")]
    dimension: usize,

    /// Algorithm to run: kruskal, prim, boruvka, distributed or all
    #[clap(long, default_value = "all")]
    algorithm: String,

    /// Worker count for the distributed algorithm (0 = one per core)
    #[clap(long, default_value = "0")]
    workers: usize,

    /// Extract a k-cut clustering with this many clusters
    #[clap(long)]
    clusters: Option<usize>,

    /// Extract an inconsistency clustering with this cutoff
    #[clap(long)]
    cutoff: Option<f64>,

    /// Compare the k-cut clustering against the k-means baseline
    #[clap(long, requires = "clusters", requires = "points")]
    compare_kmeans: bool,

    /// Output directory for results
    #[clap(long, default_value = "mst_results")]
    output_dir: String,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    let workers = if args.workers > 0 {
        args.workers
    } else {
        num_cpus::get()
    };
    let config = Config::new(args.dimension, workers, 1000);

    // 1. Load the graph
    let (graph, points) = load_graph(&args, &config)?;
    log::info!(
        "loaded graph with {} nodes and {} edges",
        graph.node_count(),
        graph.edge_count()
    );

    // 2. Run the requested algorithms
    let mut runs = Vec::new();
    let algorithm = args.algorithm.as_str();
    let run_all = algorithm == "all";

    if run_all || algorithm == "kruskal" {
        runs.push(run_sequential("kruskal", &mut KruskalAlgorithm::new(&graph))?);
    }
    if run_all || algorithm == "prim" {
        runs.push(run_sequential("prim", &mut PrimAlgorithm::new(&graph))?);
    }
    if run_all || algorithm == "boruvka" {
        runs.push(run_sequential("boruvka", &mut BoruvkaAlgorithm::new(&graph))?);
    }
    if run_all || algorithm == "distributed" {
        runs.push(run_workers(&graph, config.workers)?);
    }
    if runs.is_empty() {
        bail!("unknown algorithm {:?}", args.algorithm);
    }

    for run in &runs {
        log::info!(
            "{}: weight {} ({} edges) in {} µs",
            run.name,
            run.weight,
            run.edge_count,
            run.micros
        );
    }

    // 3. Optional clustering extraction and quality metrics
    if args.clusters.is_some() || args.cutoff.is_some() {
        let mut kruskal = KruskalAlgorithm::new(&graph);

        if let Some(k) = args.clusters {
            let clustering = kruskal.clustering_by_count(k)?;
            let variance = metrics::intracluster_variance(&graph, &clustering);
            let score = metrics::silhouette(&graph, &clustering, config.parallel_threshold);
            log::info!(
                "k-cut clustering (k={k}): intracluster variance {variance}, silhouette {score}"
            );
            storage::save_clustering(&clustering, "clusters_kcut", &args.output_dir)?;

            if args.compare_kmeans {
                compare_with_kmeans(&points, k, variance);
            }
        }

        if let Some(cutoff) = args.cutoff {
            let clustering = kruskal.clustering_by_inconsistency(cutoff)?;
            let variance = metrics::intracluster_variance(&graph, &clustering);
            let score = metrics::silhouette(&graph, &clustering, config.parallel_threshold);
            log::info!(
                "inconsistency clustering (cutoff={cutoff}): intracluster variance {variance}, silhouette {score}"
            );
            storage::save_clustering(&clustering, "clusters_inconsistency", &args.output_dir)?;
        }
    }

    // 4. Persist run summaries
    storage::save_runs(&runs, &graph, &args.output_dir)?;
    log::info!("results saved to {}", args.output_dir);

    Ok(())
}

/// Loads the input graph and, for point input, keeps the raw points around
/// for the k-means baseline.
fn load_graph(
    args: &Cli,
    config: &Config,
) -> Result<(Graph, Vec<mst_cluster_analyzer::graph::Point>)> {
    if let Some(path) = &args.edges {
        let graph = data::read_edge_list(Path::new(path))?;
        return Ok((graph, Vec::new()));
    }
    if let Some(path) = &args.points {
        let points = data::read_points(Path::new(path), config.dimension)?;
        let graph = data::complete_graph_from_points(points.clone());
        return Ok((graph, points));
    }
    bail!("either --edges or --points is required");
}

fn run_sequential(name: &str, algorithm: &mut dyn MstAlgorithm) -> Result<AlgorithmRun> {
    let started = Instant::now();
    algorithm.compute_mst()?;
    let micros = started.elapsed().as_micros();

    let edge_count = algorithm
        .mst_graph()
        .map(Graph::edge_count)
        .unwrap_or_default();
    Ok(AlgorithmRun {
        name: name.to_string(),
        weight: algorithm.mst_weight(),
        edge_count,
        micros,
    })
}

fn run_workers(graph: &Graph, workers: usize) -> Result<AlgorithmRun> {
    let started = Instant::now();
    let outcomes = run_distributed(graph, workers);
    let micros = started.elapsed().as_micros();

    let mut first = None;
    for outcome in outcomes {
        let outcome = outcome?;
        match &first {
            None => first = Some(outcome),
            Some(reference) => {
                if reference.weight != outcome.weight || reference.edges != outcome.edges {
                    bail!(
                        "worker {} disagrees with worker {} on the MST",
                        outcome.rank,
                        reference.rank
                    );
                }
            }
        }
    }
    let reference = first.expect("at least one worker ran");

    Ok(AlgorithmRun {
        name: format!("distributed({workers})"),
        weight: reference.weight,
        edge_count: reference.edges.len(),
        micros,
    })
}

fn compare_with_kmeans(points: &[mst_cluster_analyzer::graph::Point], k: usize, mst_variance: f64) {
    let mut kmeans = KMeans::new(points.to_vec(), k);
    let iterations = kmeans.run(100);
    log::info!(
        "k-means baseline (k={k}, {iterations} iterations): intracluster variance {} (MST clustering: {mst_variance})",
        kmeans.intracluster_variance()
    );
}
