//! MST strategies and the contract they share

pub mod boruvka;
pub mod distributed;
pub mod kruskal;
pub mod prim;

pub use boruvka::BoruvkaAlgorithm;
pub use distributed::{
    run_distributed, Collective, DistributedPrimAlgorithm, SharedMinReduction, WorkerOutcome,
};
pub use kruskal::KruskalAlgorithm;
pub use prim::PrimAlgorithm;

use std::cmp::Ordering;

use statrs::statistics::Statistics;

use crate::cluster::Clustering;
use crate::error::MstError;
use crate::graph::{Edge, EdgeId, Graph, UnionFind};

/// Ordering key for edge selection: weight first, edge id as the tie-break.
///
/// This is a total order (`total_cmp` on the weight) under which distinct
/// edges never compare equal, so every algorithm resolves weight ties the
/// same way. The distributed algorithm also uses it as its wire value: only
/// `(weight, id)` crosses the reduction, and `NONE` is the "no candidate"
/// sentinel that orders after every real key.
#[derive(Debug, Clone, Copy)]
pub struct EdgeKey {
    pub weight: f64,
    pub edge: EdgeId,
}

impl EdgeKey {
    /// "No candidate" sentinel, larger than every real key
    pub const NONE: EdgeKey = EdgeKey {
        weight: f64::INFINITY,
        edge: EdgeId::MAX,
    };

    pub fn of(edge: &Edge) -> Self {
        Self {
            weight: edge.weight(),
            edge: edge.id(),
        }
    }

    pub fn is_none(&self) -> bool {
        self.weight == f64::INFINITY && self.edge == EdgeId::MAX
    }
}

impl PartialEq for EdgeKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for EdgeKey {}

impl PartialOrd for EdgeKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EdgeKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .total_cmp(&other.weight)
            .then_with(|| self.edge.cmp(&other.edge))
    }
}

/// Accumulated result of an MST computation.
///
/// A two-state machine: untreated until a computation succeeds, treated from
/// then on. Accessors queried while untreated report zero/empty defaults.
#[derive(Debug, Default)]
pub struct MstCore {
    mst: Graph,
    weight: f64,
    treated: bool,
}

impl MstCore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Resets the accumulators and seeds the result graph with every input
    /// node, so clustering extraction and disconnection checks see the same
    /// node set no matter which strategy ran.
    pub(crate) fn begin(&mut self, initial: &Graph) {
        self.mst = Graph::new();
        self.weight = 0.0;
        self.treated = false;
        for id in initial.node_ids() {
            self.mst.adopt_node(initial, id);
        }
    }

    /// Adds a selected edge (and implicitly its endpoints) to the result.
    pub(crate) fn record(&mut self, initial: &Graph, edge: EdgeId) {
        self.mst.adopt_edge(initial, edge);
        self.weight += initial
            .edge(edge)
            .expect("recorded edge id resolves in the initial graph")
            .weight();
    }

    pub(crate) fn finish(&mut self) {
        self.treated = true;
    }

    /// k-cut clustering over the computed tree.
    ///
    /// Unions the endpoints of the `(n-1)-(k-1)` lightest MST edges under the
    /// ascending `(weight, id)` order, leaving the `k-1` heaviest edges as
    /// the implicit cut set.
    fn cluster_by_count(&self, k: usize) -> Clustering {
        let n = self.mst.node_count();
        assert!(k >= 1 && k <= n, "cluster count {k} outside [1, {n}]");

        let mut edges: Vec<&Edge> = self.mst.edges().collect();
        edges.sort_unstable_by(|a, b| EdgeKey::of(a).cmp(&EdgeKey::of(b)));

        let mut uf = UnionFind::new(self.mst.node_ids());
        for edge in edges.iter().take(n - k) {
            let (p1, p2) = edge.endpoints();
            uf.union(p1, p2);
        }

        self.mst
            .node_ids()
            .into_iter()
            .map(|id| (id, uf.find(id)))
            .collect()
    }

    /// Edge-inconsistency clustering over the computed tree.
    ///
    /// For each MST edge, pools the weights of all *other* MST edges incident
    /// to either endpoint and prunes the edge when its weight deviates from
    /// their mean by at least `cutoff` population standard deviations. An
    /// edge with no other incident edges is always kept.
    fn cluster_by_inconsistency(&self, cutoff: f64) -> Clustering {
        let mut uf = UnionFind::new(self.mst.node_ids());

        for edge in self.mst.edges() {
            let (p1, p2) = edge.endpoints();

            let others: Vec<f64> = self
                .mst
                .connected_edges(p1)
                .chain(self.mst.connected_edges(p2))
                .filter(|other| other.id() != edge.id())
                .map(Edge::weight)
                .collect();

            if others.is_empty() {
                // nothing to compare against: the prune test is defined to fail
                uf.union(p1, p2);
                continue;
            }

            let mean = Statistics::mean(&others);
            let std_dev = Statistics::population_std_dev(&others);

            if (edge.weight() - mean).abs() >= cutoff * std_dev {
                continue; // pruned: endpoints stay separate
            }
            uf.union(p1, p2);
        }

        self.mst
            .node_ids()
            .into_iter()
            .map(|id| (id, uf.find(id)))
            .collect()
    }
}

/// Capability surface shared by every MST strategy.
///
/// Strategies differ only in how `compute_mst` fills the core; the result
/// accessors and both clustering extractions are uniform. The clustering
/// extractions lazily trigger the computation when it has not run yet and
/// never recompute afterwards.
pub trait MstAlgorithm {
    /// The read-only graph the computation runs against
    fn initial_graph(&self) -> &Graph;

    fn core(&self) -> &MstCore;

    fn core_mut(&mut self) -> &mut MstCore;

    /// Computes the MST. Idempotent once the core is treated.
    fn compute_mst(&mut self) -> Result<(), MstError>;

    fn is_treated(&self) -> bool {
        self.core().treated
    }

    /// The result graph; None until a computation succeeded
    fn mst_graph(&self) -> Option<&Graph> {
        if self.is_treated() {
            Some(&self.core().mst)
        } else {
            None
        }
    }

    /// Total tree weight; 0.0 until a computation succeeded
    fn mst_weight(&self) -> f64 {
        if self.is_treated() {
            self.core().weight
        } else {
            0.0
        }
    }

    /// Runs the computation if it has not run yet
    fn ensure_treated(&mut self) -> Result<(), MstError> {
        if !self.is_treated() {
            self.compute_mst()?;
        }
        Ok(())
    }

    /// Splits the tree into `k` clusters by cutting its `k-1` heaviest edges.
    ///
    /// # Panics
    ///
    /// Panics unless `1 <= k <= n`.
    fn clustering_by_count(&mut self, k: usize) -> Result<Clustering, MstError> {
        self.ensure_treated()?;
        Ok(self.core().cluster_by_count(k))
    }

    /// Splits the tree by pruning edges inconsistent with their neighborhood.
    fn clustering_by_inconsistency(&mut self, cutoff: f64) -> Result<Clustering, MstError> {
        self.ensure_treated()?;
        Ok(self.core().cluster_by_inconsistency(cutoff))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_key_orders_by_weight_then_id() {
        let light = EdgeKey { weight: 1.0, edge: 9 };
        let heavy = EdgeKey { weight: 2.0, edge: 0 };
        let tied = EdgeKey { weight: 1.0, edge: 10 };

        assert!(light < heavy);
        assert!(light < tied);
        assert_ne!(light, tied);
        assert!(EdgeKey::NONE > heavy);
        assert!(EdgeKey::NONE.is_none());
        assert!(!light.is_none());
    }

    #[test]
    fn untreated_core_reports_empty_defaults() {
        struct Stub {
            graph: Graph,
            core: MstCore,
        }
        impl MstAlgorithm for Stub {
            fn initial_graph(&self) -> &Graph {
                &self.graph
            }
            fn core(&self) -> &MstCore {
                &self.core
            }
            fn core_mut(&mut self) -> &mut MstCore {
                &mut self.core
            }
            fn compute_mst(&mut self) -> Result<(), MstError> {
                Ok(())
            }
        }

        let stub = Stub {
            graph: Graph::new(),
            core: MstCore::new(),
        };
        assert!(!stub.is_treated());
        assert!(stub.mst_graph().is_none());
        assert_eq!(stub.mst_weight(), 0.0);
    }
}
