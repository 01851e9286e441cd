//! Node representation and identifiers

use super::edge::Adjacency;
use crate::query::Direction;
use std::fmt;
use std::hash::Hash;
use uuid::Uuid;

/// A value that can name a node within one graph.
///
/// Identifiers are used as map keys and rendered into errors through
/// `Debug`. Every `Clone + Eq + Hash + Debug` type qualifies.
pub trait Identifier: Clone + Eq + Hash + fmt::Debug {}

impl<I: Clone + Eq + Hash + fmt::Debug> Identifier for I {}

/// An identifier type that can produce fresh values on its own
///
/// Only needed when a node is created without an explicit identifier.
pub trait Generate: Identifier {
    /// Produce a fresh, universally unique identifier
    fn generate() -> Self;
}

/// Unique identifier for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(Uuid);

impl NodeId {
    /// Create a new random NodeId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a NodeId from an existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for NodeId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Generate for NodeId {
    fn generate() -> Self {
        Self::new()
    }
}

impl Generate for Uuid {
    fn generate() -> Self {
        Uuid::new_v4()
    }
}

impl Generate for String {
    fn generate() -> Self {
        Uuid::new_v4().to_string()
    }
}

impl Generate for u128 {
    fn generate() -> Self {
        Uuid::new_v4().as_u128()
    }
}

/// A vertex in the graph
///
/// Nodes are owned by their [`Graph`](super::Graph). Adjacency is keyed by
/// neighbor identifier: the forward map holds the payload of every edge this
/// node is the source of, the backward map records which nodes point here.
/// A backward edge's payload lives in its source's forward map, so both
/// views of one edge always agree.
#[derive(Debug, Clone)]
pub struct Node<I, T = I, N = (), E = ()> {
    pub(crate) identifier: I,
    tag: T,
    data: N,
    pub(crate) forward: Adjacency<I, E>,
    pub(crate) backward: Adjacency<I, ()>,
}

impl<I, T, N, E> Node<I, T, N, E> {
    pub(crate) fn new(identifier: I, tag: T, data: N) -> Self {
        Self {
            identifier,
            tag,
            data,
            forward: Adjacency::new(),
            backward: Adjacency::new(),
        }
    }

    /// The node's identifier, unique within its graph
    pub fn identifier(&self) -> &I {
        &self.identifier
    }

    /// Display/classification label
    pub fn tag(&self) -> &T {
        &self.tag
    }

    /// Caller payload
    pub fn data(&self) -> &N {
        &self.data
    }

    pub(crate) fn tag_mut(&mut self) -> &mut T {
        &mut self.tag
    }

    pub(crate) fn data_mut(&mut self) -> &mut N {
        &mut self.data
    }

    /// Number of edges leaving this node
    pub fn out_degree(&self) -> usize {
        self.forward.len()
    }

    /// Number of edges arriving at this node
    pub fn in_degree(&self) -> usize {
        self.backward.len()
    }

    /// Consume a detached node, returning identifier, tag and payload
    pub fn into_parts(self) -> (I, T, N) {
        (self.identifier, self.tag, self.data)
    }

    /// Consume a detached node, returning its payload
    pub fn into_data(self) -> N {
        self.data
    }

    /// The `index`-th neighbor in insertion order for the given direction
    pub(crate) fn neighbor_at(&self, direction: Direction, index: usize) -> Option<&I> {
        match direction {
            Direction::Forward => self.forward.key_at(index),
            Direction::Backward => self.backward.key_at(index),
        }
    }
}

impl<I, T, N, E> fmt::Display for Node<I, T, N, E>
where
    I: fmt::Display,
    T: fmt::Display,
    N: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({}, {}, {:?})", self.tag, self.identifier, self.data)
    }
}
