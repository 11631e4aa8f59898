//! Run statistics and the optional expansion trace.
//!
//! The trace is the ordered list of expansion events of a run. It refers to
//! nodes by arena id and never embeds states, so it can be rendered to JSON
//! for any state type.

use crate::cost::Cost;
use crate::node::NodeId;

/// Aggregate counters for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes finalized and expanded.
    pub expansions: u64,
    /// Nodes created, including the root.
    pub nodes_generated: u64,
    /// Frontier pops discarded because their state was already finalized.
    pub stale_pops: u64,
    /// Successors not pushed because their state was already finalized.
    pub successors_skipped: u64,
    /// Largest frontier size observed.
    pub frontier_high_water: u64,
    /// Depth of the goal node, when one was reached.
    pub solution_depth: Option<u32>,
}

impl SearchStats {
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "expansions": self.expansions,
            "frontier_high_water": self.frontier_high_water,
            "nodes_generated": self.nodes_generated,
            "solution_depth": self.solution_depth,
            "stale_pops": self.stale_pops,
            "successors_skipped": self.successors_skipped,
        })
    }
}

/// A single pop-and-expand step.
#[derive(Debug, Clone)]
pub struct ExpandEvent<C> {
    /// Total order of expansions within the run.
    pub expansion_order: u64,
    pub node_id: NodeId,
    pub parent_id: Option<NodeId>,
    pub depth: u32,
    pub g_cost: C,
    pub h_cost: C,
    /// Children pushed onto the frontier by this expansion.
    pub children_pushed: u64,
    /// Successors dropped because they were already finalized.
    pub successors_skipped: u64,
}

/// Ordered expansion log.
#[derive(Debug, Clone)]
pub struct SearchTrace<C> {
    pub events: Vec<ExpandEvent<C>>,
}

impl<C> SearchTrace<C> {
    #[must_use]
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Ids of expanded nodes, in expansion order.
    #[must_use]
    pub fn expansion_sequence(&self) -> Vec<NodeId> {
        self.events.iter().map(|e| e.node_id).collect()
    }
}

impl<C> Default for SearchTrace<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Cost> SearchTrace<C> {
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        let events: Vec<serde_json::Value> = self
            .events
            .iter()
            .map(|e| {
                serde_json::json!({
                    "children_pushed": e.children_pushed,
                    "depth": e.depth,
                    "expansion_order": e.expansion_order,
                    "g_cost": e.g_cost.to_json(),
                    "h_cost": e.h_cost.to_json(),
                    "node_id": e.node_id,
                    "parent_id": e.parent_id,
                    "successors_skipped": e.successors_skipped,
                })
            })
            .collect();
        serde_json::Value::Array(events)
    }
}
