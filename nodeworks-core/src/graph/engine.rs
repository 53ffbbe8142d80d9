//! Evaluation Engine
//!
//! The graph owns all nodes and edges, validates connections at add time,
//! and implements demand-driven forward evaluation.
//!
//! # Algorithm
//!
//! `compute(target)` works in two phases:
//!
//! 1. An edge-breadth-first traversal of the *reversed* graph starting at
//!    the target enumerates every edge that is an ancestor dependency of
//!    the target, direct or transitive. Each edge is visited at most once;
//!    parallel edges are distinct.
//!
//! 2. The traversal order is reversed, yielding a forward order in which
//!    every edge's source node has had its own dependencies applied before
//!    the edge itself fires. Each edge then runs its source node and pushes
//!    the value at the source output slot into the destination input slot.
//!
//! A node feeding several edges is re-run once per edge. Since `compute`
//! steps are assumed pure with respect to slot state, this changes nothing
//! observable; memoizing per-call outputs would be a valid optimization but
//! is deliberately not performed, keeping recomputation counts identical to
//! the documented behavior. The same applies across the sinks visited by
//! `compute_all`: sinks sharing ancestors recompute them independently.

use std::collections::VecDeque;
use std::fmt;

use indexmap::IndexMap;
use smallvec::SmallVec;
use tracing::{debug, trace};

use super::edge::Edge;
use super::node::{Node, NodeIndex};
use super::slot::{SlotDirection, SlotId};
use crate::error::GraphError;

/// Position of an edge in the graph's edge arena.
type EdgeIx = usize;

/// A directed dataflow multigraph of pluggable nodes.
///
/// Mutable while being built (`add_node`/`add_edge`); evaluation never
/// changes the topology, only the slot values inside nodes. All methods
/// take exclusive access, so a `Graph` is single-threaded by construction;
/// concurrent use requires external synchronization.
pub struct Graph<V: Clone + fmt::Debug> {
    nodes: Vec<Box<dyn Node<V>>>,
    edges: Vec<Edge>,
    /// Outgoing edge indices per node, parallel to `nodes`.
    outgoing: Vec<SmallVec<[EdgeIx; 4]>>,
    /// Incoming edge indices per node, parallel to `nodes`.
    incoming: Vec<SmallVec<[EdgeIx; 4]>>,
}

impl<V: Clone + fmt::Debug> Graph<V> {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            outgoing: Vec::new(),
            incoming: Vec::new(),
        }
    }

    /// Add a node, assigning it the next dense index (0, 1, 2, … in
    /// insertion order). The index is stamped into the node and returned.
    pub fn add_node<N: Node<V> + 'static>(&mut self, mut node: N) -> NodeIndex {
        let index = NodeIndex::from(self.nodes.len());
        node.core_mut().assign_index(index);
        self.nodes.push(Box::new(node));
        self.outgoing.push(SmallVec::new());
        self.incoming.push(SmallVec::new());
        index
    }

    /// Connect output slot 0 of `from` to input slot 0 of `to`.
    pub fn add_edge(&mut self, from: NodeIndex, to: NodeIndex) -> Result<(), GraphError> {
        self.add_edge_slots(from, 0, to, 0)
    }

    /// Connect a specific output slot of `from` to a specific input slot of
    /// `to`.
    ///
    /// Both endpoints are validated against the nodes' declared slots; on
    /// failure the edge set is left untouched. Parallel edges between the
    /// same pair of slots are allowed and kept distinct.
    pub fn add_edge_slots(
        &mut self,
        from: NodeIndex,
        from_slot: SlotId,
        to: NodeIndex,
        to_slot: SlotId,
    ) -> Result<(), GraphError> {
        let from_node = self.node(from).ok_or(GraphError::UnknownNode { index: from })?;
        if !from_node.has_slot(from_slot, true) {
            return Err(GraphError::MissingSlot {
                node: Some(from),
                slot: from_slot,
                direction: SlotDirection::Output,
            });
        }

        let to_node = self.node(to).ok_or(GraphError::UnknownNode { index: to })?;
        if !to_node.has_slot(to_slot, false) {
            return Err(GraphError::MissingSlot {
                node: Some(to),
                slot: to_slot,
                direction: SlotDirection::Input,
            });
        }

        let edge = Edge::new(from, from_slot, to, to_slot);
        let ix = self.edges.len();
        self.edges.push(edge);
        self.outgoing[from.raw()].push(ix);
        self.incoming[to.raw()].push(ix);
        trace!(?edge, "edge added");
        Ok(())
    }

    /// Number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// All node indices, in insertion order.
    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        (0..self.nodes.len()).map(NodeIndex::from)
    }

    /// All edges, in insertion order. Together with [`node_indices`], this
    /// is the read-only topology surface external tooling (for example a
    /// renderer) consumes.
    ///
    /// [`node_indices`]: Graph::node_indices
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Look up a node by index.
    pub fn node(&self, index: NodeIndex) -> Option<&dyn Node<V>> {
        self.nodes.get(index.raw()).map(|n| n.as_ref())
    }

    /// Look up a node by index, mutably. Useful for seeding input slots
    /// before evaluation.
    pub fn node_mut(&mut self, index: NodeIndex) -> Option<&mut (dyn Node<V> + 'static)> {
        self.nodes.get_mut(index.raw()).map(|n| n.as_mut())
    }

    /// Evaluate `target` and return its output values.
    ///
    /// Resolves the target's transitive dependencies by walking the graph
    /// backward, replays them forward (pushing values across edges into
    /// input slots), runs the target itself, and returns its full output
    /// list. A target with no incoming edges degenerates to a single
    /// [`Node::forward`] call.
    ///
    /// On error the evaluation aborts immediately; slot values written
    /// earlier in the same call are not rolled back.
    pub fn compute(&mut self, target: NodeIndex) -> Result<Vec<Option<V>>, GraphError> {
        if target.raw() >= self.nodes.len() {
            return Err(GraphError::UnknownNode { index: target });
        }

        let order = self.dependency_edges(target);
        debug!(%target, edges = order.len(), "computing node");

        for &ix in order.iter().rev() {
            let edge = self.edges[ix];
            let value = {
                let source = &mut self.nodes[edge.from_node.raw()];
                source.forward()?;
                source.output_value(edge.from_slot).cloned()
            };
            // An upstream output that never produced a value leaves the
            // downstream input untouched.
            if let Some(value) = value {
                self.nodes[edge.to_node.raw()].set_input(edge.to_slot, value)?;
            }
        }

        self.nodes[target.raw()].forward()
    }

    /// Evaluate every terminal node (zero out-degree sink) independently.
    ///
    /// Returns one entry per sink, keyed by index in index order. Sinks
    /// sharing ancestors recompute them independently; results are not
    /// deduplicated across sinks.
    pub fn compute_all(&mut self) -> Result<IndexMap<NodeIndex, Vec<Option<V>>>, GraphError> {
        let sinks: Vec<NodeIndex> = self
            .node_indices()
            .filter(|index| self.outgoing[index.raw()].is_empty())
            .collect();
        debug!(sinks = sinks.len(), "computing all terminal nodes");

        let mut results = IndexMap::with_capacity(sinks.len());
        for index in sinks {
            let outputs = self.compute(index)?;
            results.insert(index, outputs);
        }
        Ok(results)
    }

    /// Enumerate every ancestor-dependency edge of `target` in
    /// edge-breadth-first order over the reversed graph.
    ///
    /// Reversing the returned order yields a forward, dependency-respecting
    /// execution order.
    fn dependency_edges(&self, target: NodeIndex) -> Vec<EdgeIx> {
        let mut order = Vec::new();
        let mut visited = vec![false; self.edges.len()];
        let mut queue = VecDeque::from([target.raw()]);

        while let Some(node) = queue.pop_front() {
            for &ix in &self.incoming[node] {
                if !visited[ix] {
                    visited[ix] = true;
                    order.push(ix);
                    queue.push_back(self.edges[ix].from_node.raw());
                }
            }
        }
        order
    }
}

impl<V: Clone + fmt::Debug> Default for Graph<V> {
    fn default() -> Self {
        Self::new()
    }
}
