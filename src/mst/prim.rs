//! Prim's algorithm

use std::collections::{BTreeSet, HashMap, HashSet};

use super::{EdgeKey, MstAlgorithm, MstCore};
use crate::error::MstError;
use crate::graph::{Graph, NodeId};

/// Prim's MST strategy: grows a tree from a starting node, always taking the
/// minimal frontier edge, and keeps exactly one best-known frontier edge per
/// unvisited node in an ordered working set.
pub struct PrimAlgorithm<'g> {
    initial: &'g Graph,
    core: MstCore,
}

impl<'g> PrimAlgorithm<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        Self {
            initial: graph,
            core: MstCore::new(),
        }
    }
}

/// Offers every edge from `from` to a still-unvisited node admitted by
/// `admit` as a frontier candidate, replacing an endpoint's best-known edge
/// only on strict improvement under the `(weight, id)` order.
///
/// Shared with the distributed variant, which admits only its own partition.
pub(super) fn improve_frontier<F>(
    graph: &Graph,
    from: NodeId,
    visited: &HashSet<NodeId>,
    best: &mut HashMap<NodeId, EdgeKey>,
    frontier: &mut BTreeSet<EdgeKey>,
    admit: F,
) where
    F: Fn(NodeId) -> bool,
{
    for edge in graph.connected_edges(from) {
        let other = match edge.other_endpoint(from) {
            Some(other) => other,
            None => continue,
        };
        if visited.contains(&other) || !admit(other) {
            continue;
        }

        let key = EdgeKey::of(edge);
        match best.get(&other).copied() {
            Some(current) if key < current => {
                frontier.remove(&current);
                best.insert(other, key);
                frontier.insert(key);
            }
            None => {
                best.insert(other, key);
                frontier.insert(key);
            }
            _ => {}
        }
    }
}

impl MstAlgorithm for PrimAlgorithm<'_> {
    fn initial_graph(&self) -> &Graph {
        self.initial
    }

    fn core(&self) -> &MstCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut MstCore {
        &mut self.core
    }

    fn compute_mst(&mut self) -> Result<(), MstError> {
        if self.is_treated() {
            return Ok(());
        }
        log::debug!("computing MST with Prim's algorithm");

        let initial = self.initial;
        self.core.begin(initial);

        let n = initial.node_count();
        let start = match initial.any_node() {
            Some(start) => start,
            None => {
                // the empty graph spans itself
                self.core.finish();
                return Ok(());
            }
        };

        let mut visited: HashSet<NodeId> = HashSet::new();
        let mut best: HashMap<NodeId, EdgeKey> = HashMap::new();
        let mut frontier: BTreeSet<EdgeKey> = BTreeSet::new();

        visited.insert(start);
        improve_frontier(initial, start, &visited, &mut best, &mut frontier, |_| true);

        while visited.len() < n {
            let min = match frontier.pop_first() {
                Some(min) => min,
                None => return Err(MstError::Disconnected),
            };
            let edge = initial
                .edge(min.edge)
                .expect("frontier edge id resolves in the initial graph");

            let (p1, p2) = edge.endpoints();
            let new_node = if visited.contains(&p1) { p2 } else { p1 };

            visited.insert(new_node);
            best.remove(&new_node);
            self.core.record(initial, min.edge);

            improve_frontier(initial, new_node, &visited, &mut best, &mut frontier, |_| true);
        }

        self.core.finish();
        log::info!(
            "Prim MST: {} edges, total weight {}",
            self.core.mst.edge_count(),
            self.core.weight
        );
        Ok(())
    }
}
