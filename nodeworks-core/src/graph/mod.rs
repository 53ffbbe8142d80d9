//! Dataflow Graph
//!
//! This module implements the dataflow multigraph that Nodeworks evaluates.
//!
//! # Overview
//!
//! The graph is a directed multigraph where:
//!
//! - Nodes are pluggable computational units with fixed input/output slots
//! - Edges connect a specific output slot of one node to a specific input
//!   slot of another; parallel edges between the same pair are allowed
//!
//! Evaluation is demand driven: `compute(target)` walks the graph backward
//! from the target to enumerate every ancestor edge, then replays those
//! edges forward, running each source node and pushing its output value
//! across the edge into the destination input slot.
//!
//! # Design Decisions
//!
//! 1. Nodes are stored centrally in the graph and addressed by dense integer
//!    indices assigned in insertion order. This keeps edges plain `Copy`
//!    data and makes the topology trivially exportable.
//!
//! 2. We maintain both forward (outgoing) and reverse (incoming) adjacency
//!    lists so the backward traversal and the sink scan are both O(degree).
//!
//! 3. Edge validation happens at insertion time, not at evaluation time:
//!    an edge that names a slot its endpoint never declared is rejected
//!    immediately and leaves the graph untouched.

mod edge;
mod engine;
mod node;
mod slot;

pub use edge::Edge;
pub use engine::Graph;
pub use node::{Node, NodeCore, NodeIndex};
pub use slot::{Slot, SlotDirection, SlotId};
