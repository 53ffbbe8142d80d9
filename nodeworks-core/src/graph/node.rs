//! Graph Nodes
//!
//! This module defines the capability contract every node implementation
//! fulfils, plus the shared state ([`NodeCore`]) node types embed.
//!
//! A node is a computational unit with a fixed set of input and output
//! slots and a pure compute step. The engine drives nodes exclusively
//! through the [`Node`] trait: it never knows about concrete node types,
//! and it never inspects the values moving between slots.
//!
//! Node polymorphism is a single level deep: implement [`Node`], embed a
//! [`NodeCore`] for slot storage, and provide `compute`. The two hooks
//! `verify_input` and `on_set_input` have accept-all / identity defaults
//! and can be overridden per node type.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::slot::{Slot, SlotDirection, SlotId};
use crate::error::GraphError;

/// Index of a node within a graph.
///
/// Indices are dense, assigned 0, 1, 2, … in insertion order by
/// [`Graph::add_node`](super::Graph::add_node), and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeIndex(usize);

impl NodeIndex {
    /// Get the raw index value.
    pub fn raw(&self) -> usize {
        self.0
    }
}

impl From<usize> for NodeIndex {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Shared per-node state: the assigned graph index and the two ordered slot
/// collections, fixed at construction.
///
/// Slot ids must be unique within each direction; `new` asserts this in
/// debug builds.
#[derive(Debug, Clone)]
pub struct NodeCore<V> {
    index: Option<NodeIndex>,
    inputs: SmallVec<[Slot<V>; 2]>,
    outputs: SmallVec<[Slot<V>; 2]>,
}

impl<V> NodeCore<V> {
    pub fn new(
        inputs: impl IntoIterator<Item = Slot<V>>,
        outputs: impl IntoIterator<Item = Slot<V>>,
    ) -> Self {
        let core = Self {
            index: None,
            inputs: inputs.into_iter().collect(),
            outputs: outputs.into_iter().collect(),
        };
        debug_assert!(unique_ids(&core.inputs), "duplicate input slot id");
        debug_assert!(unique_ids(&core.outputs), "duplicate output slot id");
        core
    }

    /// The graph index assigned by `add_node`, or `None` before the node is
    /// added to a graph.
    pub fn index(&self) -> Option<NodeIndex> {
        self.index
    }

    pub(crate) fn assign_index(&mut self, index: NodeIndex) {
        self.index = Some(index);
    }

    pub fn inputs(&self) -> &[Slot<V>] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[Slot<V>] {
        &self.outputs
    }

    fn slots(&self, direction: SlotDirection) -> &[Slot<V>] {
        match direction {
            SlotDirection::Input => &self.inputs,
            SlotDirection::Output => &self.outputs,
        }
    }

    fn slot_mut(&mut self, slot: SlotId, direction: SlotDirection) -> Option<&mut Slot<V>> {
        let slots = match direction {
            SlotDirection::Input => &mut self.inputs,
            SlotDirection::Output => &mut self.outputs,
        };
        slots.iter_mut().find(|s| s.id() == slot)
    }

    fn slot(&self, slot: SlotId, direction: SlotDirection) -> Option<&Slot<V>> {
        self.slots(direction).iter().find(|s| s.id() == slot)
    }
}

fn unique_ids<V>(slots: &[Slot<V>]) -> bool {
    slots
        .iter()
        .all(|a| slots.iter().filter(|b| b.id() == a.id()).count() == 1)
}

/// The capability contract every node implementation fulfils.
///
/// Implementations provide slot storage (via an embedded [`NodeCore`]) and
/// the `compute` step; everything else has a default implementation the
/// engine relies on.
///
/// `compute` must be callable repeatedly and is assumed to be pure with
/// respect to slot state. Purity is not enforced; a node with external
/// state is not guaranteed idempotent across `compute` calls.
pub trait Node<V: Clone + fmt::Debug> {
    /// Shared slot/index state.
    fn core(&self) -> &NodeCore<V>;

    /// Mutable access to the shared state.
    fn core_mut(&mut self) -> &mut NodeCore<V>;

    /// The node's compute step: read current input slot values, return new
    /// values for a subset of output slot ids. An omitted output slot keeps
    /// its previous value.
    fn compute(&mut self) -> HashMap<SlotId, V>;

    /// Validate a value offered to an input slot. Default: accept all.
    fn verify_input(&self, _slot: SlotId, _value: &V) -> bool {
        true
    }

    /// Pre-processing hook applied to an accepted input value before it is
    /// stored. Default: store the value unchanged.
    fn on_set_input(&mut self, _slot: SlotId, value: V) -> V {
        value
    }

    /// The node's input slots, in declaration order.
    fn inputs(&self) -> &[Slot<V>] {
        self.core().inputs()
    }

    /// The node's output slots, in declaration order.
    fn outputs(&self) -> &[Slot<V>] {
        self.core().outputs()
    }

    /// Current value of an input slot, if one has been stored.
    fn input_value(&self, slot: SlotId) -> Option<&V> {
        self.core().slot(slot, SlotDirection::Input)?.value()
    }

    /// Current value of an output slot, if one has been stored.
    fn output_value(&self, slot: SlotId) -> Option<&V> {
        self.core().slot(slot, SlotDirection::Output)?.value()
    }

    /// Store a value into an input slot.
    ///
    /// The value is validated by `verify_input` (rejection is
    /// [`GraphError::InvalidInput`]) and passed through `on_set_input`
    /// before being stored.
    fn set_input(&mut self, slot: SlotId, value: V) -> Result<(), GraphError> {
        if !self.verify_input(slot, &value) {
            return Err(GraphError::InvalidInput {
                slot,
                value: format!("{value:?}"),
            });
        }

        let value = self.on_set_input(slot, value);
        let node = self.core().index();
        self.core_mut()
            .slot_mut(slot, SlotDirection::Input)
            .ok_or(GraphError::MissingSlot {
                node,
                slot,
                direction: SlotDirection::Input,
            })?
            .set_value(value);
        Ok(())
    }

    /// Store a value into an output slot directly, without validation.
    /// Used by `forward`; also available to stateful node implementations.
    fn set_output(&mut self, slot: SlotId, value: V) -> Result<(), GraphError> {
        let node = self.core().index();
        self.core_mut()
            .slot_mut(slot, SlotDirection::Output)
            .ok_or(GraphError::MissingSlot {
                node,
                slot,
                direction: SlotDirection::Output,
            })?
            .set_value(value);
        Ok(())
    }

    /// Run the compute step and publish its results.
    ///
    /// Calls `compute`, writes every returned `(slot, value)` pair into the
    /// corresponding output slot, then returns the full ordered list of
    /// current output values, including slots this call left unchanged.
    ///
    /// A returned slot id the node never declared is a contract violation
    /// and fails with [`GraphError::InvalidOutputSlot`].
    fn forward(&mut self) -> Result<Vec<Option<V>>, GraphError> {
        let computed = self.compute();
        for (slot, value) in computed {
            self.set_output(slot, value)
                .map_err(|_| GraphError::InvalidOutputSlot {
                    node: self.core().index(),
                    slot,
                })?;
        }
        Ok(self
            .core()
            .outputs()
            .iter()
            .map(|s| s.value().cloned())
            .collect())
    }

    /// Membership test used by the graph during edge validation.
    fn has_slot(&self, slot: SlotId, search_outputs: bool) -> bool {
        let direction = if search_outputs {
            SlotDirection::Output
        } else {
            SlotDirection::Input
        };
        self.core().slot(slot, direction).is_some()
    }
}
