//! Nodeworks Core
//!
//! This crate provides the core engine for the Nodeworks dataflow framework.
//! It implements:
//!
//! - The node/slot/edge data model
//! - Add-time validation of slot-to-slot connections
//! - Demand-driven forward evaluation of an acyclic dataflow multigraph
//! - A small set of example nodes used to exercise the engine
//!
//! # Architecture
//!
//! The crate is organized into a few modules:
//!
//! - `graph`: the data model and the construction/evaluation engine
//! - `nodes`: example node implementations (value source, elementwise sum)
//! - `error`: the error type shared across the crate
//!
//! Node behavior is pluggable: the engine only knows the [`graph::Node`]
//! capability contract and never inspects the values flowing between slots.
//!
//! # Example
//!
//! ```rust
//! use nodeworks_core::graph::Graph;
//! use nodeworks_core::nodes::{SumNode, ValueNode};
//!
//! let mut graph = Graph::new();
//! let a = graph.add_node(ValueNode::new(3.0));
//! let b = graph.add_node(ValueNode::new(4.0));
//! let sum = graph.add_node(SumNode::new());
//!
//! graph.add_edge(a, sum).unwrap();
//! graph.add_edge_slots(b, 0, sum, 1).unwrap();
//!
//! assert_eq!(graph.compute(sum).unwrap(), vec![Some(7.0)]);
//! ```

pub mod error;
pub mod graph;
pub mod nodes;

pub use error::GraphError;
