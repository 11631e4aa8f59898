//! Search nodes, the per-run node arena, and the frontier ordering key.

use std::cmp::Ordering;

use crate::cost::Cost;

/// Index of a node in its run's [`NodeArena`].
pub type NodeId = usize;

/// A node of the explored tree.
///
/// The predecessor is stored as the parent's arena index. Parents are always
/// created before their children, so following `parent` strictly decreases
/// the index and the chain always ends at the root.
#[derive(Debug, Clone)]
pub struct SearchNode<S, C> {
    /// Arena index (also the creation order within the run).
    pub node_id: NodeId,
    /// Parent node (`None` for the root).
    pub parent: Option<NodeId>,
    /// The problem state at this node.
    pub state: S,
    /// Tree depth (root = 0).
    pub depth: u32,
    /// Accumulated path cost from the root.
    pub g_cost: C,
    /// Heuristic estimate (zero for strategies that ignore the heuristic).
    pub h_cost: C,
    /// Monotonic push counter used as the final tie-break.
    pub creation_order: u64,
}

impl<S, C: Cost> SearchNode<S, C> {
    /// `f = g + h`.
    #[must_use]
    pub fn f_cost(&self) -> C {
        self.g_cost + self.h_cost
    }
}

/// Append-only node storage owned by a single run.
#[derive(Debug)]
pub struct NodeArena<S, C> {
    nodes: Vec<SearchNode<S, C>>,
}

impl<S, C> NodeArena<S, C> {
    #[must_use]
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Store a node built by `make`, which receives the id it will occupy.
    pub fn alloc(&mut self, make: impl FnOnce(NodeId) -> SearchNode<S, C>) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(make(id));
        id
    }

    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&SearchNode<S, C>> {
        self.nodes.get(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<S: Clone, C> NodeArena<S, C> {
    /// States from the root to `goal`, inclusive.
    #[must_use]
    pub fn reconstruct_path(&self, goal: NodeId) -> Vec<S> {
        let mut path = Vec::new();
        let mut current = self.nodes.get(goal);
        while let Some(node) = current {
            path.push(node.state.clone());
            current = node.parent.and_then(|p| self.nodes.get(p));
        }
        path.reverse();
        path
    }
}

impl<S, C> std::ops::Index<NodeId> for NodeArena<S, C> {
    type Output = SearchNode<S, C>;

    fn index(&self, id: NodeId) -> &Self::Output {
        &self.nodes[id]
    }
}

impl<S, C> Default for NodeArena<S, C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Frontier ordering key: `(primary, secondary, creation_order)`.
///
/// Lower is better on every component. States are never compared.
#[derive(Debug, Clone, Copy)]
pub struct FrontierKey<C> {
    pub primary: C,
    pub secondary: C,
    pub creation_order: u64,
}

impl<C: Cost> PartialEq for FrontierKey<C> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<C: Cost> Eq for FrontierKey<C> {}

impl<C: Cost> PartialOrd for FrontierKey<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: Cost> Ord for FrontierKey<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.primary
            .total_cmp(&other.primary)
            .then_with(|| self.secondary.total_cmp(&other.secondary))
            .then(self.creation_order.cmp(&other.creation_order))
    }
}
