//! digraph: a generic in-memory directed graph
//!
//! Nodes carry an identifier, a tag and a payload; edges carry a payload
//! and are recorded on both endpoints so they can be followed in either
//! direction.
//!
//! # Core Concepts
//!
//! - **Graph**: sole owner of every node, keyed by identifier
//! - **Nodes**: created and removed only through the graph; removal strips
//!   every incident edge first
//! - **Edges**: at most one per ordered pair, created with
//!   `add_connection` and removed with `remove_connection`
//! - **Traversal**: lazy depth-first walks forward or backward, with no
//!   cycle protection
//!
//! # Example
//!
//! ```
//! use digraph::{Graph, NewNode};
//!
//! # fn main() -> Result<(), digraph::GraphError> {
//! let mut graph: Graph<String, String, (), u32> = Graph::new();
//! graph.create_node(NewNode::new().identifier("a"))?;
//! graph.create_node(NewNode::new().identifier("b").connect_with("a", 2))?;
//! graph.node_mut("a")?.add_connection("a", 1)?;
//!
//! let a = graph.node("a")?;
//! let sources: Vec<_> = a.backward_edges().map(|e| e.from().as_str()).collect();
//! assert_eq!(sources, vec!["b", "a"]);
//! # Ok(())
//! # }
//! ```

pub mod bags;
mod graph;
pub mod query;

pub use graph::{
    Edge, Generate, Graph, GraphError, GraphResult, Identifier, NewNode, Node, NodeId, NodeMut,
    NodeRef,
};
pub use query::{Direction, Traverse};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
