//! Example Nodes
//!
//! A small set of reference node implementations. They exist to exercise
//! and test the engine; the engine itself has no knowledge of them, and
//! real applications are expected to ship their own node types against the
//! [`Node`](crate::graph::Node) contract.

mod sum;
mod value;

pub use sum::SumNode;
pub use value::ValueNode;
