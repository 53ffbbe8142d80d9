//! Value Source Node

use std::collections::HashMap;

use crate::graph::{Node, NodeCore, Slot, SlotId};

/// A settable constant: one input slot pre-seeded with a value, one output
/// slot echoing it.
///
/// Writing to input slot 0 (directly or over an edge) changes the constant.
pub struct ValueNode {
    core: NodeCore<f64>,
}

impl ValueNode {
    pub fn new(value: f64) -> Self {
        Self {
            core: NodeCore::new([Slot::with_value(0, "val", value)], [Slot::new(0, "")]),
        }
    }
}

impl Default for ValueNode {
    fn default() -> Self {
        Self::new(99.0)
    }
}

impl Node<f64> for ValueNode {
    fn core(&self) -> &NodeCore<f64> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore<f64> {
        &mut self.core
    }

    fn compute(&mut self) -> HashMap<SlotId, f64> {
        match self.input_value(0) {
            Some(v) => HashMap::from([(0, *v)]),
            None => HashMap::new(),
        }
    }
}
