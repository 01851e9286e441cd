//! Core graph data structures

mod builder;
mod edge;
mod engine;
mod handle;
mod node;


pub use builder::NewNode;
pub use edge::Edge;
pub use engine::{Graph, GraphError, GraphResult};
pub use handle::{NodeMut, NodeRef};
pub use node::{Generate, Identifier, Node, NodeId};
