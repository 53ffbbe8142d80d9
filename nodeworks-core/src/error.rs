//! Error Types
//!
//! All fallible operations in the crate return [`GraphError`]. Errors are
//! synchronous and unrecoverable by the engine itself: a construction error
//! aborts the single `add_edge` call that produced it, an evaluation error
//! aborts the whole `compute`/`compute_all` call. The engine performs no
//! retries and no rollback of slot values already written earlier in the
//! same evaluation.

use thiserror::Error;

use crate::graph::{NodeIndex, SlotDirection, SlotId};

/// Errors produced during graph construction and evaluation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// An index passed to `add_edge`/`compute` was never assigned by
    /// `add_node`.
    #[error("unknown node index {index}")]
    UnknownNode { index: NodeIndex },

    /// A referenced slot id does not exist on the node, in the given
    /// direction. `node` is `None` only for a node not yet added to a graph.
    #[error("no {direction} slot {slot} on {}", fmt_node(.node))]
    MissingSlot {
        node: Option<NodeIndex>,
        slot: SlotId,
        direction: SlotDirection,
    },

    /// A node's `verify_input` hook rejected the offered value. The value is
    /// carried pre-formatted for diagnostics.
    #[error("input slot {slot} rejected value {value}")]
    InvalidInput { slot: SlotId, value: String },

    /// A node's `compute` returned an output slot id the node never
    /// declared. This is a contract violation in the node implementation.
    #[error("compute on {} returned undeclared output slot {slot}", fmt_node(.node))]
    InvalidOutputSlot {
        node: Option<NodeIndex>,
        slot: SlotId,
    },
}

fn fmt_node(node: &Option<NodeIndex>) -> String {
    match node {
        Some(index) => format!("node {index}"),
        None => "detached node".to_owned(),
    }
}
