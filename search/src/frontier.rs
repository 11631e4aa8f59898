//! Frontier of pending nodes.
//!
//! One type covers the three disciplines a [`Strategy`] can select. The
//! frontier stores node ids only; the nodes themselves live in the run's
//! arena. Duplicate entries for the same state are allowed: the engine prunes
//! stale ones lazily when they are popped.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use crate::cost::Cost;
use crate::node::{FrontierKey, NodeId};
use crate::strategy::{Discipline, Strategy};

/// A heap entry wrapping a node id with its ordering key.
///
/// `BinaryHeap` is a max-heap, so entries are stored as `Reverse<_>` to get
/// min-heap behaviour (lowest key first).
#[derive(Debug)]
struct FrontierEntry<C> {
    key: FrontierKey<C>,
    node: NodeId,
}

impl<C: Cost> PartialEq for FrontierEntry<C> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<C: Cost> Eq for FrontierEntry<C> {}

impl<C: Cost> PartialOrd for FrontierEntry<C> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: Cost> Ord for FrontierEntry<C> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}

#[derive(Debug)]
enum Pending<C> {
    Queue(VecDeque<NodeId>),
    Stack(Vec<NodeId>),
    Heap(BinaryHeap<Reverse<FrontierEntry<C>>>),
}

/// Strategy-ordered frontier.
#[derive(Debug)]
pub struct Frontier<C> {
    pending: Pending<C>,
    high_water: usize,
}

impl<C: Cost> Frontier<C> {
    /// Create an empty frontier with the discipline `strategy` selects.
    #[must_use]
    pub fn new(strategy: Strategy) -> Self {
        let pending = match strategy.discipline() {
            Discipline::Fifo => Pending::Queue(VecDeque::new()),
            Discipline::Lifo => Pending::Stack(Vec::new()),
            Discipline::MinHeap => Pending::Heap(BinaryHeap::new()),
        };
        Self {
            pending,
            high_water: 0,
        }
    }

    /// Add a node. FIFO and LIFO frontiers ignore `key`.
    pub fn push(&mut self, node: NodeId, key: FrontierKey<C>) {
        match &mut self.pending {
            Pending::Queue(q) => q.push_back(node),
            Pending::Stack(s) => s.push(node),
            Pending::Heap(h) => h.push(Reverse(FrontierEntry { key, node })),
        }
        self.high_water = self.high_water.max(self.len());
    }

    /// Remove the next node in discipline order (lowest key for heaps).
    pub fn pop_min(&mut self) -> Option<NodeId> {
        match &mut self.pending {
            Pending::Queue(q) => q.pop_front(),
            Pending::Stack(s) => s.pop(),
            Pending::Heap(h) => h.pop().map(|Reverse(e)| e.node),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match &self.pending {
            Pending::Queue(q) => q.len(),
            Pending::Stack(s) => s.len(),
            Pending::Heap(h) => h.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Largest size the frontier reached.
    #[must_use]
    pub fn high_water(&self) -> usize {
        self.high_water
    }
}
