//! Distributed (partitioned) Prim and the collective boundary it runs on

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::{Arc, Barrier, Mutex};

use super::prim::improve_frontier;
use super::{EdgeKey, MstAlgorithm, MstCore};
use crate::error::MstError;
use crate::graph::{Edge, EdgeId, Graph, NodeId};

/// Per-round agreement primitive for the distributed algorithm: a barrier and
/// an all-reduce minimum over `(weight, edge id)` pairs.
///
/// Both calls are collective: every worker of the world must issue them in
/// lockstep, once per round. A worker that skips one deadlocks its peers, so
/// error paths must only run after the collective call returned.
pub trait Collective {
    fn rank(&self) -> usize;

    fn world_size(&self) -> usize;

    /// Blocks until every worker reached the same point
    fn barrier(&self);

    /// Contributes `local` and returns the global minimum under the
    /// `EdgeKey` order; every worker receives the identical result.
    fn allreduce_min(&self, local: EdgeKey) -> EdgeKey;
}

struct ReductionState {
    world_size: usize,
    barrier: Barrier,
    slots: Mutex<Vec<EdgeKey>>,
}

/// In-memory fan-out backend for a single process: one slot per worker and
/// two barrier phases per reduction (all contributions in place, then all
/// reads done before the next round may overwrite).
pub struct SharedMinReduction {
    rank: usize,
    shared: Arc<ReductionState>,
}

impl SharedMinReduction {
    /// Creates one handle per worker over a common reduction state
    pub fn fan_out(world_size: usize) -> Vec<SharedMinReduction> {
        assert!(world_size >= 1, "a collective needs at least one worker");
        let shared = Arc::new(ReductionState {
            world_size,
            barrier: Barrier::new(world_size),
            slots: Mutex::new(vec![EdgeKey::NONE; world_size]),
        });
        (0..world_size)
            .map(|rank| SharedMinReduction {
                rank,
                shared: Arc::clone(&shared),
            })
            .collect()
    }
}

impl Collective for SharedMinReduction {
    fn rank(&self) -> usize {
        self.rank
    }

    fn world_size(&self) -> usize {
        self.shared.world_size
    }

    fn barrier(&self) {
        self.shared.barrier.wait();
    }

    fn allreduce_min(&self, local: EdgeKey) -> EdgeKey {
        {
            let mut slots = self.shared.slots.lock().expect("reduction state poisoned");
            slots[self.rank] = local;
        }
        self.shared.barrier.wait();

        let result = {
            let slots = self.shared.slots.lock().expect("reduction state poisoned");
            slots.iter().copied().min().unwrap_or(EdgeKey::NONE)
        };
        self.shared.barrier.wait();
        result
    }
}

/// Prim partitioned by contiguous node-id ranges across cooperating workers.
///
/// Each worker tracks frontier candidates only for unvisited nodes of its own
/// partition and mirrors the tree state by re-executing the same update from
/// the reduced `(weight, id)` scalar; no other state crosses workers. The
/// graph must use the contiguous id range `[0, n)` that [`Graph::add_node`]
/// produces.
pub struct DistributedPrimAlgorithm<'g, C: Collective> {
    initial: &'g Graph,
    comm: C,
    core: MstCore,
}

impl<'g, C: Collective> DistributedPrimAlgorithm<'g, C> {
    pub fn new(graph: &'g Graph, comm: C) -> Self {
        Self {
            initial: graph,
            comm,
            core: MstCore::new(),
        }
    }

    /// This worker's half-open node-id range: sizes differ by at most one,
    /// with the first `n mod P` workers taking the extra node.
    fn partition(&self, n: usize) -> (NodeId, NodeId) {
        let world = self.comm.world_size();
        let rank = self.comm.rank();
        let base = n / world;
        let extra = n % world;

        let lo = rank * base + rank.min(extra);
        let hi = lo + base + usize::from(rank < extra);
        (lo as NodeId, hi as NodeId)
    }
}

impl<C: Collective> MstAlgorithm for DistributedPrimAlgorithm<'_, C> {
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

        let initial = self.initial;
        self.core.begin(initial);

        let n = initial.node_count();
        if n == 0 {
            self.core.finish();
            return Ok(());
        }
        assert!(
            initial.has_node(0),
            "distributed Prim requires contiguous node ids starting at 0"
        );

        let (lo, hi) = self.partition(n);
        let owns = move |id: NodeId| id >= lo && id < hi;
        log::debug!(
            "worker {}/{} owns nodes [{lo}, {hi})",
            self.comm.rank(),
            self.comm.world_size()
        );

        let start: NodeId = 0;
        let mut visited: HashSet<NodeId> = HashSet::new();
        let mut best: HashMap<NodeId, EdgeKey> = HashMap::new();
        let mut frontier: BTreeSet<EdgeKey> = BTreeSet::new();

        visited.insert(start);
        improve_frontier(initial, start, &visited, &mut best, &mut frontier, owns);

        while visited.len() < n {
            // propose the locally best frontier edge, or the sentinel
            let local = frontier.first().copied().unwrap_or(EdgeKey::NONE);

            self.comm.barrier();
            let winner = self.comm.allreduce_min(local);

            if winner.is_none() {
                // every worker reduced to the sentinel: the graph is
                // disconnected, and all of us fail after the collective
                return Err(MstError::Disconnected);
            }

            // re-derive the elected edge from the shared edge table
            let edge = initial
                .edge(winner.edge)
                .expect("reduced edge id resolves in the shared edge table");
            let (p1, p2) = edge.endpoints();
            let new_node = if visited.contains(&p1) { p2 } else { p1 };

            visited.insert(new_node);
            self.core.record(initial, winner.edge);

            // the elected node no longer needs a frontier entry; dropping it
            // from the working set too keeps a stale edge from being proposed
            // again in a later round
            if owns(new_node) {
                if let Some(stale) = best.remove(&new_node) {
                    frontier.remove(&stale);
                }
            }

            improve_frontier(initial, new_node, &visited, &mut best, &mut frontier, owns);
        }

        self.core.finish();
        if self.comm.rank() == 0 {
            log::info!(
                "distributed Prim ({} workers): {} edges, total weight {}",
                self.comm.world_size(),
                self.core.mst.edge_count(),
                self.core.weight
            );
        }
        Ok(())
    }
}

/// Outcome of one worker's fully replicated computation
#[derive(Debug, Clone)]
pub struct WorkerOutcome {
    pub rank: usize,
    pub weight: f64,
    /// Ids of the selected tree edges, ascending
    pub edges: Vec<EdgeId>,
}

/// Runs `workers` cooperating workers over scoped threads and returns every
/// worker's outcome, in rank order, for cross-checking.
pub fn run_distributed(graph: &Graph, workers: usize) -> Vec<Result<WorkerOutcome, MstError>> {
    let channels = SharedMinReduction::fan_out(workers);

    crossbeam::thread::scope(|scope| {
        let handles: Vec<_> = channels
            .into_iter()
            .map(|comm| {
                scope.spawn(move |_| {
                    let rank = comm.rank();
                    let mut algorithm = DistributedPrimAlgorithm::new(graph, comm);
                    algorithm.compute_mst()?;

                    let mst = algorithm
                        .mst_graph()
                        .expect("a successful computation leaves the core treated");
                    let mut edges: Vec<EdgeId> = mst.edges().map(Edge::id).collect();
                    edges.sort_unstable();

                    Ok(WorkerOutcome {
                        rank,
                        weight: algorithm.mst_weight(),
                        edges,
                    })
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().expect("worker thread panicked"))
            .collect()
    })
    .expect("worker scope panicked")
}
