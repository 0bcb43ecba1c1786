//! Results persistence module

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;
use serde_json::{json, to_string_pretty};

use crate::cluster::{group_members, Clustering};
use crate::graph::Graph;

/// Summary of a single algorithm run
#[derive(Debug, Clone, Serialize)]
pub struct AlgorithmRun {
    pub name: String,
    pub weight: f64,
    pub edge_count: usize,
    pub micros: u128,
}

/// Save per-algorithm run summaries to `<output_dir>/runs.json`
pub fn save_runs(runs: &[AlgorithmRun], graph: &Graph, output_dir: &str) -> Result<()> {
    log::info!("saving {} run summaries to {}", runs.len(), output_dir);
    fs::create_dir_all(output_dir)?;

    let summary = json!({
        "graph": {
            "node_count": graph.node_count(),
            "edge_count": graph.edge_count(),
            "total_weight": graph.total_weight(),
        },
        "runs": runs,
    });

    let path = Path::new(output_dir).join("runs.json");
    let mut file = File::create(path)?;
    file.write_all(to_string_pretty(&summary)?.as_bytes())?;

    Ok(())
}

/// Save a clustering (sizes and members per cluster) to
/// `<output_dir>/<name>.json`
pub fn save_clustering(clustering: &Clustering, name: &str, output_dir: &str) -> Result<()> {
    fs::create_dir_all(output_dir)?;

    let mut groups: Vec<(u32, Vec<u32>)> = group_members(clustering)
        .into_iter()
        .map(|(rep, mut members)| {
            members.sort_unstable();
            (rep, members)
        })
        .collect();
    // largest first
    groups.sort_by(|a, b| b.1.len().cmp(&a.1.len()).then(a.0.cmp(&b.0)));

    let clusters_json = json!({
        "cluster_count": groups.len(),
        "clusters": groups.iter().map(|(rep, members)| {
            json!({
                "representative": rep,
                "size": members.len(),
                "members": members,
            })
        }).collect::<Vec<_>>(),
    });

    let path = Path::new(output_dir).join(format!("{name}.json"));
    let mut file = File::create(path)?;
    file.write_all(to_string_pretty(&clusters_json)?.as_bytes())?;

    log::info!("saved {} clusters to {name}.json", groups.len());
    Ok(())
}
