//! Borrowed node handles resolved through the owning graph

use super::edge::Edge;
use super::engine::{Graph, GraphResult};
use super::node::{Identifier, Node};
use crate::query::{Direction, Traverse};
use std::borrow::Borrow;
use std::fmt::Debug;
use std::hash::Hash;
use std::ops::Deref;

/// Shared handle to a node
///
/// Dereferences to the [`Node`] and adds the views that need the rest of
/// the graph: edge iteration in both directions and traversal.
pub struct NodeRef<'g, I, T, N, E> {
    graph: &'g Graph<I, T, N, E>,
    node: &'g Node<I, T, N, E>,
}

impl<'g, I, T, N, E> NodeRef<'g, I, T, N, E> {
    pub(crate) fn new(graph: &'g Graph<I, T, N, E>, node: &'g Node<I, T, N, E>) -> Self {
        Self { graph, node }
    }

    /// The underlying node, borrowed for the graph's lifetime
    pub fn node(&self) -> &'g Node<I, T, N, E> {
        self.node
    }

    /// Outgoing edges, in the order they were added
    pub fn forward_edges(&self) -> impl Iterator<Item = Edge<'g, I, E>> + 'g {
        let node = self.node;
        node.forward
            .iter()
            .map(move |(to, data)| Edge::new(&node.identifier, to, data))
    }
}

impl<'g, I: Identifier, T, N, E> NodeRef<'g, I, T, N, E> {
    /// Incoming edges, in the order they were added
    pub fn backward_edges(&self) -> impl Iterator<Item = Edge<'g, I, E>> + 'g {
        let (graph, node) = (self.graph, self.node);
        node.backward
            .keys()
            .filter_map(move |from| graph.edge_between(from, &node.identifier))
    }

    /// Edges in the given direction
    pub fn edges(&self, direction: Direction) -> Box<dyn Iterator<Item = Edge<'g, I, E>> + 'g> {
        match direction {
            Direction::Forward => Box::new(self.forward_edges()),
            Direction::Backward => Box::new(self.backward_edges()),
        }
    }

    /// The outgoing edge to `other`, if any
    pub fn forward_edge<Q>(&self, other: &Q) -> Option<Edge<'g, I, E>>
    where
        I: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let target = self.graph.get(other)?.node();
        self.graph.edge_between(&self.node.identifier, &target.identifier)
    }

    /// The incoming edge from `other`, if any
    pub fn backward_edge<Q>(&self, other: &Q) -> Option<Edge<'g, I, E>>
    where
        I: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let source = self.graph.get(other)?.node();
        self.graph.edge_between(&source.identifier, &self.node.identifier)
    }

    /// Lazy depth-first walk over outgoing edges
    ///
    /// Never terminates on a graph with a reachable cycle.
    pub fn traverse_forward_edges(&self) -> Traverse<'g, I, T, N, E> {
        self.traverse(Direction::Forward)
    }

    /// Lazy depth-first walk over incoming edges
    ///
    /// Never terminates on a graph with a reachable cycle.
    pub fn traverse_backward_edges(&self) -> Traverse<'g, I, T, N, E> {
        self.traverse(Direction::Backward)
    }

    pub fn traverse(&self, direction: Direction) -> Traverse<'g, I, T, N, E> {
        Traverse::new(self.graph, self.node, direction)
    }
}

impl<I, T, N, E> Clone for NodeRef<'_, I, T, N, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I, T, N, E> Copy for NodeRef<'_, I, T, N, E> {}

impl<I, T, N, E> Deref for NodeRef<'_, I, T, N, E> {
    type Target = Node<I, T, N, E>;

    fn deref(&self) -> &Self::Target {
        self.node
    }
}

impl<I: Debug, T: Debug, N: Debug, E: Debug> Debug for NodeRef<'_, I, T, N, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(self.node, f)
    }
}

/// Exclusive handle to a node
///
/// Holds the graph mutably so the node cannot be removed while the handle
/// is alive; connection changes go through here or through [`Graph`].
pub struct NodeMut<'g, I, T, N, E> {
    graph: &'g mut Graph<I, T, N, E>,
    slot: usize,
}

impl<'g, I, T, N, E> NodeMut<'g, I, T, N, E> {
    pub(crate) fn new(graph: &'g mut Graph<I, T, N, E>, slot: usize) -> Self {
        Self { graph, slot }
    }

    /// Replace the tag
    pub fn set_tag(&mut self, tag: T) -> T {
        std::mem::replace(self.graph.slot_node_mut(self.slot).tag_mut(), tag)
    }

    /// Mutable access to the node payload
    pub fn data_mut(&mut self) -> &mut N {
        self.graph.slot_node_mut(self.slot).data_mut()
    }

    /// Reborrow as a shared handle
    pub fn view(&self) -> NodeRef<'_, I, T, N, E> {
        NodeRef::new(self.graph, self.graph.slot_node(self.slot))
    }

    /// Downgrade into a shared handle for the rest of the borrow
    pub fn into_ref(self) -> NodeRef<'g, I, T, N, E> {
        let graph: &'g Graph<I, T, N, E> = self.graph;
        NodeRef::new(graph, graph.slot_node(self.slot))
    }
}

impl<I: Identifier, T, N, E> NodeMut<'_, I, T, N, E> {
    /// Create the directed edge `self -> other`
    ///
    /// Fails with `EdgeAlreadyExists` if this node already has an outgoing
    /// edge to `other`; the existing edge is left untouched. The edge is
    /// recorded in this node's forward map and `other`'s backward map
    /// together.
    pub fn add_connection<Q>(&mut self, other: &Q, data: E) -> GraphResult<Edge<'_, I, E>>
    where
        I: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        let to = self.graph.locate(other)?;
        self.graph.connect(self.slot, to, data)
    }

    /// Remove the directed edge `self -> other`, returning its payload
    ///
    /// Fails with `NodesNotConnected` if there is no such edge.
    pub fn remove_connection<Q>(&mut self, other: &Q) -> GraphResult<E>
    where
        I: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        let to = self.graph.locate(other)?;
        self.graph.disconnect(self.slot, to)
    }
}

impl<I, T, N, E> Deref for NodeMut<'_, I, T, N, E> {
    type Target = Node<I, T, N, E>;

    fn deref(&self) -> &Self::Target {
        self.graph.slot_node(self.slot)
    }
}

impl<I: Debug, T: Debug, N: Debug, E: Debug> Debug for NodeMut<'_, I, T, N, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(self.graph.slot_node(self.slot), f)
    }
}
