//! Sum Node

use std::collections::HashMap;

use crate::graph::{Node, NodeCore, Slot, SlotId};

/// Elementwise binary sum: output slot 0 = input `a` + input `b`.
///
/// While either input is still unset, `compute` omits the output, leaving
/// any previous sum in place.
pub struct SumNode {
    core: NodeCore<f64>,
}

impl SumNode {
    pub fn new() -> Self {
        Self {
            core: NodeCore::new([Slot::new(0, "a"), Slot::new(1, "b")], [Slot::new(0, "sum")]),
        }
    }
}

impl Default for SumNode {
    fn default() -> Self {
        Self::new()
    }
}

impl Node<f64> for SumNode {
    fn core(&self) -> &NodeCore<f64> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore<f64> {
        &mut self.core
    }

    fn compute(&mut self) -> HashMap<SlotId, f64> {
        match (self.input_value(0), self.input_value(1)) {
            (Some(a), Some(b)) => HashMap::from([(0, a + b)]),
            _ => HashMap::new(),
        }
    }
}
