//! Kruskal's algorithm

use itertools::Itertools;

use super::{EdgeKey, MstAlgorithm, MstCore};
use crate::error::MstError;
use crate::graph::{Graph, UnionFind};

/// Kruskal's MST strategy: a single ascending scan over all edges, filtered
/// through a union-find so only class-bridging edges enter the tree.
pub struct KruskalAlgorithm<'g> {
    initial: &'g Graph,
    core: MstCore,
}

impl<'g> KruskalAlgorithm<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        Self {
            initial: graph,
            core: MstCore::new(),
        }
    }
}

impl MstAlgorithm for KruskalAlgorithm<'_> {
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
        log::debug!("computing MST with Kruskal's algorithm");

        let initial = self.initial;
        self.core.begin(initial);

        let queue = initial
            .edges()
            .sorted_by(|a, b| EdgeKey::of(a).cmp(&EdgeKey::of(b)));
        let mut uf = UnionFind::new(initial.node_ids());

        for edge in queue {
            if uf.num_classes() <= 1 {
                break;
            }
            let (p1, p2) = edge.endpoints();
            if uf.find(p1) != uf.find(p2) {
                self.core.record(initial, edge.id());
                uf.union(p1, p2);
            }
        }

        if uf.num_classes() > 1 {
            return Err(MstError::Disconnected);
        }

        self.core.finish();
        log::info!(
            "Kruskal MST: {} edges, total weight {}",
            self.core.mst.edge_count(),
            self.core.weight
        );
        Ok(())
    }
}
