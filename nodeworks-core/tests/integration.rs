//! Integration Tests for the Dataflow Engine
//!
//! These tests drive whole graphs through the public API, using the example
//! node set plus a couple of purpose-built probe nodes.

use std::collections::HashMap;

use nodeworks_core::graph::{Graph, Node, NodeCore, NodeIndex, Slot, SlotId};
use nodeworks_core::nodes::{SumNode, ValueNode};
use nodeworks_core::GraphError;

/// Emits the number of times it has run. Deliberately impure, used to
/// observe how often the engine re-runs a shared source.
struct CounterNode {
    core: NodeCore<f64>,
    runs: u32,
}

impl CounterNode {
    fn new() -> Self {
        Self {
            core: NodeCore::new([], [Slot::new(0, "runs")]),
            runs: 0,
        }
    }
}

impl Node<f64> for CounterNode {
    fn core(&self) -> &NodeCore<f64> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore<f64> {
        &mut self.core
    }

    fn compute(&mut self) -> HashMap<SlotId, f64> {
        self.runs += 1;
        HashMap::from([(0, f64::from(self.runs))])
    }
}

/// Accepts only non-negative inputs.
struct NonNegativeNode {
    core: NodeCore<f64>,
}

impl NonNegativeNode {
    fn new() -> Self {
        Self {
            core: NodeCore::new([Slot::new(0, "in")], [Slot::new(0, "out")]),
        }
    }
}

impl Node<f64> for NonNegativeNode {
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

    fn verify_input(&self, _slot: SlotId, value: &f64) -> bool {
        *value >= 0.0
    }
}

/// Returns an output slot id it never declared.
struct BrokenNode {
    core: NodeCore<f64>,
}

impl BrokenNode {
    fn new() -> Self {
        Self {
            core: NodeCore::new([], [Slot::new(0, "out")]),
        }
    }
}

impl Node<f64> for BrokenNode {
    fn core(&self) -> &NodeCore<f64> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore<f64> {
        &mut self.core
    }

    fn compute(&mut self) -> HashMap<SlotId, f64> {
        HashMap::from([(7, 1.0)])
    }
}

/// Passes its single input through unchanged.
struct PassNode {
    core: NodeCore<f64>,
}

impl PassNode {
    fn new() -> Self {
        Self {
            core: NodeCore::new([Slot::new(0, "in")], [Slot::new(0, "out")]),
        }
    }
}

impl Node<f64> for PassNode {
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

/// Two value sources feeding one sum: compute(sum) = [7].
#[test]
fn two_sources_into_one_sum() {
    let mut graph = Graph::new();
    let a = graph.add_node(ValueNode::new(3.0));
    let b = graph.add_node(ValueNode::new(4.0));
    let sum = graph.add_node(SumNode::new());

    graph.add_edge_slots(a, 0, sum, 0).unwrap();
    graph.add_edge_slots(b, 0, sum, 1).unwrap();

    assert_eq!(graph.compute(sum).unwrap(), vec![Some(7.0)]);
}

/// Three values feed three sums in a crossed pattern, feeding two final
/// sums. Every path sums correctly and compute_all returns both sinks.
#[test]
fn diamond_merge_two_level_sums() {
    let mut graph = Graph::new();
    let v1 = graph.add_node(ValueNode::new(1.0));
    let v2 = graph.add_node(ValueNode::new(2.0));
    let v3 = graph.add_node(ValueNode::new(3.0));
    let s1 = graph.add_node(SumNode::new());
    let s2 = graph.add_node(SumNode::new());
    let s3 = graph.add_node(SumNode::new());
    let s21 = graph.add_node(SumNode::new());
    let s22 = graph.add_node(SumNode::new());

    // First layer: s1 = v1+v2 = 3, s2 = v1+v3 = 4, s3 = v2+v3 = 5.
    graph.add_edge_slots(v1, 0, s1, 0).unwrap();
    graph.add_edge_slots(v2, 0, s1, 1).unwrap();
    graph.add_edge_slots(v1, 0, s2, 0).unwrap();
    graph.add_edge_slots(v3, 0, s2, 1).unwrap();
    graph.add_edge_slots(v2, 0, s3, 0).unwrap();
    graph.add_edge_slots(v3, 0, s3, 1).unwrap();

    // Second layer: s21 = s1+s2 = 7, s22 = s2+s3 = 9.
    graph.add_edge_slots(s1, 0, s21, 0).unwrap();
    graph.add_edge_slots(s2, 0, s21, 1).unwrap();
    graph.add_edge_slots(s2, 0, s22, 0).unwrap();
    graph.add_edge_slots(s3, 0, s22, 1).unwrap();

    let results = graph.compute_all().unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[&s21], vec![Some(7.0)]);
    assert_eq!(results[&s22], vec![Some(9.0)]);
}

/// Each compute_all entry equals computing that sink individually.
#[test]
fn compute_all_matches_individual_computes() {
    let mut graph = Graph::new();
    let v1 = graph.add_node(ValueNode::new(1.0));
    let v2 = graph.add_node(ValueNode::new(2.0));
    let s1 = graph.add_node(SumNode::new());
    let p = graph.add_node(PassNode::new());

    graph.add_edge_slots(v1, 0, s1, 0).unwrap();
    graph.add_edge_slots(v2, 0, s1, 1).unwrap();
    graph.add_edge(v2, p).unwrap();

    let all = graph.compute_all().unwrap();
    assert_eq!(all.len(), 2);

    for (index, outputs) in all {
        assert_eq!(graph.compute(index).unwrap(), outputs);
    }
}

/// Two parallel edges between the same slot pair are retained as distinct
/// edges; both fire, and the later application wins on the shared input.
#[test]
fn parallel_edges_both_fire_last_write_wins() {
    let mut graph = Graph::new();
    let counter = graph.add_node(CounterNode::new());
    let sink = graph.add_node(PassNode::new());

    graph.add_edge(counter, sink).unwrap();
    graph.add_edge(counter, sink).unwrap();
    assert_eq!(graph.edges().len(), 2);

    // The source runs once per parallel edge; the second application
    // overwrites the first on the shared input slot.
    assert_eq!(graph.compute(sink).unwrap(), vec![Some(2.0)]);
}

/// Repeated computes on a pure graph are idempotent.
#[test]
fn repeated_compute_is_idempotent() {
    let mut graph = Graph::new();
    let a = graph.add_node(ValueNode::new(3.0));
    let b = graph.add_node(ValueNode::new(4.0));
    let sum = graph.add_node(SumNode::new());

    graph.add_edge_slots(a, 0, sum, 0).unwrap();
    graph.add_edge_slots(b, 0, sum, 1).unwrap();

    assert_eq!(graph.compute(sum).unwrap(), graph.compute(sum).unwrap());
}

/// A value source can be re-seeded between computes through the node
/// accessor; the next compute sees the new constant.
#[test]
fn reseeding_a_source_changes_the_result() {
    let mut graph = Graph::new();
    let a = graph.add_node(ValueNode::new(3.0));
    let b = graph.add_node(ValueNode::new(4.0));
    let sum = graph.add_node(SumNode::new());

    graph.add_edge_slots(a, 0, sum, 0).unwrap();
    graph.add_edge_slots(b, 0, sum, 1).unwrap();
    assert_eq!(graph.compute(sum).unwrap(), vec![Some(7.0)]);

    graph.node_mut(a).unwrap().set_input(0, 10.0).unwrap();
    assert_eq!(graph.compute(sum).unwrap(), vec![Some(14.0)]);
}

/// Construction failures name the offending side and leave the graph
/// untouched; evaluation failures abort the whole call.
#[test]
fn error_paths() {
    let mut graph = Graph::new();
    let a = graph.add_node(ValueNode::new(1.0));
    let sum = graph.add_node(SumNode::new());

    // Sum has no output slot 5.
    let err = graph.add_edge_slots(sum, 5, a, 0).unwrap_err();
    assert!(matches!(err, GraphError::MissingSlot { slot: 5, .. }));

    // Value has no input slot 2.
    let err = graph.add_edge_slots(a, 0, a, 2).unwrap_err();
    assert!(matches!(err, GraphError::MissingSlot { slot: 2, .. }));

    // Node index never assigned.
    let err = graph.add_edge(a, NodeIndex::from(9)).unwrap_err();
    assert!(matches!(err, GraphError::UnknownNode { .. }));

    assert!(graph.edges().is_empty());

    let err = graph.compute(NodeIndex::from(9)).unwrap_err();
    assert!(matches!(err, GraphError::UnknownNode { .. }));
}

/// A node rejecting the value pushed over an edge aborts the whole compute
/// call with InvalidInput.
#[test]
fn rejected_input_aborts_compute() {
    let mut graph = Graph::new();
    let source = graph.add_node(ValueNode::new(-5.0));
    let sink = graph.add_node(NonNegativeNode::new());

    graph.add_edge(source, sink).unwrap();

    let err = graph.compute(sink).unwrap_err();
    assert!(matches!(err, GraphError::InvalidInput { slot: 0, .. }));
}

/// A contract-violating node anywhere upstream aborts compute_all with
/// InvalidOutputSlot.
#[test]
fn contract_violation_aborts_compute_all() {
    let mut graph = Graph::new();
    let broken = graph.add_node(BrokenNode::new());
    let sink = graph.add_node(PassNode::new());
    let healthy = graph.add_node(ValueNode::new(1.0));
    let other = graph.add_node(PassNode::new());

    graph.add_edge(broken, sink).unwrap();
    graph.add_edge(healthy, other).unwrap();

    let err = graph.compute_all().unwrap_err();
    assert!(matches!(err, GraphError::InvalidOutputSlot { slot: 7, .. }));
}
