//! Union-Find (disjoint-set) structure over node identities

use std::collections::{HashMap, HashSet};

use super::node::NodeId;

/// Disjoint-set structure with path compression and union-by-rank.
///
/// Seeded from an explicit node list; every node starts as its own singleton
/// class. The rank tie-break is fixed and non-symmetric: on equal ranks the
/// root of the first argument is attached under the root of the second, whose
/// rank is then incremented. Callers must not rely on inverting it.
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: HashMap<NodeId, NodeId>,
    rank: HashMap<NodeId, u32>,
    representatives: HashSet<NodeId>,
    num_classes: usize,
}

impl UnionFind {
    pub fn new<I>(nodes: I) -> Self
    where
        I: IntoIterator<Item = NodeId>,
    {
        let mut parent = HashMap::new();
        let mut rank = HashMap::new();
        let mut representatives = HashSet::new();

        for node in nodes {
            parent.insert(node, node);
            rank.insert(node, 1);
            representatives.insert(node);
        }

        let num_classes = parent.len();
        Self {
            parent,
            rank,
            representatives,
            num_classes,
        }
    }

    /// Parent of `node`; None for an unregistered node
    pub fn parent_of(&self, node: NodeId) -> Option<NodeId> {
        self.parent.get(&node).copied()
    }

    /// Rank of `node`; 0 for an unregistered node
    pub fn rank_of(&self, node: NodeId) -> u32 {
        self.rank.get(&node).copied().unwrap_or(0)
    }

    /// Current class representatives
    pub fn representatives(&self) -> &HashSet<NodeId> {
        &self.representatives
    }

    pub fn num_classes(&self) -> usize {
        self.num_classes
    }

    /// Class representative of `node`, repointing every node visited on the
    /// path directly at the discovered root.
    ///
    /// # Panics
    ///
    /// Panics if `node` was never registered.
    pub fn find(&mut self, node: NodeId) -> NodeId {
        let parent = *self
            .parent
            .get(&node)
            .expect("node is not part of the union-find structure");

        if parent == node {
            return node;
        }

        let root = self.find(parent);
        self.parent.insert(node, root);
        root
    }

    /// Merges the classes of `n1` and `n2`; no-op when they already share one.
    ///
    /// The lower-rank root is attached under the higher-rank root. On a rank
    /// tie the root of `n1` goes under the root of `n2` and the latter's rank
    /// is incremented. Each successful union decrements the class count by
    /// exactly one and removes the absorbed root from the representative set.
    pub fn union(&mut self, n1: NodeId, n2: NodeId) {
        let rep1 = self.find(n1);
        let rep2 = self.find(n2);

        if rep1 == rep2 {
            return;
        }
        self.num_classes -= 1;

        let r1 = self.rank_of(rep1);
        let r2 = self.rank_of(rep2);

        if r1 > r2 {
            self.parent.insert(rep2, rep1);
            self.representatives.remove(&rep2);
        } else if r2 > r1 {
            self.parent.insert(rep1, rep2);
            self.representatives.remove(&rep1);
        } else {
            self.parent.insert(rep1, rep2);
            self.representatives.remove(&rep1);
            *self.rank.entry(rep2).or_insert(1) += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn singletons(n: u32) -> UnionFind {
        UnionFind::new(0..n)
    }

    #[test]
    fn initialization_makes_every_node_its_own_class() {
        let uf = singletons(10);

        assert_eq!(uf.num_classes(), 10);
        assert_eq!(uf.parent_of(11), None);
        assert_eq!(uf.rank_of(11), 0);
        assert!(!uf.representatives().contains(&11));

        for node in 0..10 {
            assert_eq!(uf.parent_of(node), Some(node));
            assert_eq!(uf.rank_of(node), 1);
            assert!(uf.representatives().contains(&node));
        }
    }

    #[test]
    fn find_returns_the_representative() {
        let mut uf = singletons(10);

        assert_eq!(uf.find(0), 0);
        assert_ne!(uf.find(3), 4);
        assert_eq!(uf.find(9), 9);
    }

    #[test]
    fn find_is_idempotent() {
        let mut uf = singletons(4);
        uf.union(0, 1);
        uf.union(1, 2);

        let root = uf.find(0);
        assert_eq!(uf.find(root), root);

        let lone = uf.find(3);
        assert_eq!(uf.find(lone), lone);
    }

    #[test]
    fn union_follows_the_fixed_tie_break() {
        let mut uf = singletons(10);

        uf.union(0, 1);
        assert_eq!(uf.num_classes(), 9);

        // equal ranks: root of the first argument goes under the second
        assert_eq!(uf.find(0), 1);
        assert_eq!(uf.find(1), 1);
        assert_eq!(uf.rank_of(1), 2);

        uf.union(0, 2);
        assert_eq!(uf.num_classes(), 8);

        // the higher-rank root absorbs
        assert_eq!(uf.find(2), 1);
        assert_eq!(uf.rank_of(1), 2);
        assert_eq!(uf.rank_of(2), 1);

        // same-class union leaves everything unchanged
        uf.union(1, 2);
        assert_eq!(uf.num_classes(), 8);
        assert_eq!(uf.find(1), 1);
        assert_eq!(uf.find(2), 1);
        assert_eq!(uf.rank_of(1), 2);
    }

    #[test]
    fn absorbed_roots_leave_the_representative_set() {
        let mut uf = singletons(3);

        uf.union(0, 1);
        assert!(!uf.representatives().contains(&0));
        assert!(uf.representatives().contains(&1));
        assert!(uf.representatives().contains(&2));
        assert_eq!(uf.representatives().len(), uf.num_classes());
    }

    #[test]
    #[should_panic(expected = "not part of the union-find structure")]
    fn find_rejects_unregistered_nodes() {
        let mut uf = singletons(3);
        uf.find(7);
    }
}
