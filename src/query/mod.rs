//! Traversal over graph adjacency
//!
//! Depth-first walks that follow edges forward or backward from a starting
//! node. Walks are lazy and keep no visited set.

mod traverse;
mod types;

pub use traverse::Traverse;
pub use types::Direction;
