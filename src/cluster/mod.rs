//! Clustering interchange types and helpers

pub mod kmeans;
pub mod metrics;

use std::collections::HashMap;

use itertools::Itertools;

use crate::graph::NodeId;

/// Node -> representative mapping: the plain interchange format every
/// clustering producer and consumer agrees on.
pub type Clustering = HashMap<NodeId, NodeId>;

/// Groups a node -> representative mapping into representative -> members
pub fn group_members(clustering: &Clustering) -> HashMap<NodeId, Vec<NodeId>> {
    clustering
        .iter()
        .map(|(&node, &rep)| (rep, node))
        .into_group_map()
}

/// Number of distinct clusters in a mapping
pub fn cluster_count(clustering: &Clustering) -> usize {
    clustering.values().unique().count()
}
