//! Edges
//!
//! An edge is an immutable record connecting one node's output slot to
//! another node's input slot. Edges never store the value flowing through
//! them; values live transiently in slots only. The graph stores edges in
//! an arena addressed by position, so two edges with identical endpoints
//! coexist (multigraph semantics).

use serde::{Deserialize, Serialize};

use super::node::NodeIndex;
use super::slot::SlotId;

/// A directed slot-to-slot connection between two nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub from_node: NodeIndex,
    pub from_slot: SlotId,
    pub to_node: NodeIndex,
    pub to_slot: SlotId,
}

impl Edge {
    pub fn new(
        from_node: NodeIndex,
        from_slot: SlotId,
        to_node: NodeIndex,
        to_slot: SlotId,
    ) -> Self {
        Self {
            from_node,
            from_slot,
            to_node,
            to_slot,
        }
    }
}
