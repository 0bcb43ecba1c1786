//! Boruvka's algorithm

use std::collections::HashMap;

use super::{EdgeKey, MstAlgorithm, MstCore};
use crate::error::MstError;
use crate::graph::{Graph, NodeId, UnionFind};

/// Boruvka's MST strategy: round-based component merging. Each round scans
/// all edges once to nominate the minimal outgoing edge of every class, then
/// commits the nominations that still bridge two distinct classes.
pub struct BoruvkaAlgorithm<'g> {
    initial: &'g Graph,
    core: MstCore,
}

impl<'g> BoruvkaAlgorithm<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        Self {
            initial: graph,
            core: MstCore::new(),
        }
    }
}

impl MstAlgorithm for BoruvkaAlgorithm<'_> {
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
        log::debug!("computing MST with Boruvka's algorithm");

        let initial = self.initial;
        self.core.begin(initial);

        let mut uf = UnionFind::new(initial.node_ids());

        while uf.num_classes() > 1 {
            // nominate the minimal outgoing edge of every class
            let mut nominees: HashMap<NodeId, EdgeKey> = HashMap::new();
            for edge in initial.edges() {
                let (p1, p2) = edge.endpoints();
                let rep1 = uf.find(p1);
                let rep2 = uf.find(p2);
                if rep1 == rep2 {
                    continue;
                }

                let key = EdgeKey::of(edge);
                for rep in [rep1, rep2] {
                    match nominees.get(&rep).copied() {
                        Some(current) if key >= current => {}
                        _ => {
                            nominees.insert(rep, key);
                        }
                    }
                }
            }

            // no class has an outgoing edge left, yet more than one remains
            if nominees.is_empty() {
                return Err(MstError::Disconnected);
            }

            // commit in id order; representatives must be re-derived because a
            // neighbor's merge earlier in the round can invalidate a nomination,
            // and two classes may have nominated the same edge
            let mut pending: Vec<(NodeId, EdgeKey)> = nominees.into_iter().collect();
            pending.sort_unstable_by_key(|(rep, _)| *rep);

            for (_, key) in pending {
                let edge = initial
                    .edge(key.edge)
                    .expect("nominated edge id resolves in the initial graph");
                let (p1, p2) = edge.endpoints();
                if uf.find(p1) != uf.find(p2) {
                    self.core.record(initial, key.edge);
                    uf.union(p1, p2);
                }
            }
        }

        self.core.finish();
        log::info!(
            "Boruvka MST: {} edges, total weight {}",
            self.core.mst.edge_count(),
            self.core.weight
        );
        Ok(())
    }
}
