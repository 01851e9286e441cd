//! Graph: the owning container for nodes

use super::builder::NewNode;
use super::edge::Edge;
use super::handle::{NodeMut, NodeRef};
use super::node::{Identifier, Node, NodeId};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use thiserror::Error;
use tracing::{debug, trace, warn};

/// Errors that can occur in graph operations
///
/// Identifiers are carried in their `Debug` rendering.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("Duplicate identifier: {0}")]
    DuplicateIdentifier(String),

    #[error("Node not in graph: {0}")]
    NodeNotInGraph(String),

    #[error("Nodes not connected: {from} -> {to}")]
    NodesNotConnected { from: String, to: String },

    #[error("Edge already exists: {from} -> {to}")]
    EdgeAlreadyExists { from: String, to: String },
}

/// Result type for graph operations
pub type GraphResult<T> = Result<T, GraphError>;

fn render<Q: Debug + ?Sized>(id: &Q) -> String {
    format!("{:?}", id)
}

/// A directed graph owning its nodes by identifier
///
/// Type parameters: `I` identifier, `T` tag (defaults to the identifier
/// type), `N` node payload, `E` edge payload.
///
/// Nodes live in an arena; `index` maps each identifier to its slot.
/// Adjacency stores identifiers only, so there are no references between
/// nodes and removal never leaves anything dangling.
#[derive(Debug, Clone)]
pub struct Graph<I = NodeId, T = I, N = (), E = ()> {
    nodes: Vec<Node<I, T, N, E>>,
    index: HashMap<I, usize>,
}

impl<I, T, N, E> Default for Graph<I, T, N, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I, T, N, E> Graph<I, T, N, E> {
    /// Create an empty graph
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Create an empty graph with room for `capacity` nodes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Number of nodes owned by the graph
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total number of edges
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|node| node.forward.len()).sum()
    }

    /// All identifiers, in slot order
    pub fn identifiers(&self) -> impl Iterator<Item = &I> + '_ {
        self.nodes.iter().map(|node| node.identifier())
    }

    /// All nodes, in slot order
    pub fn nodes(&self) -> impl Iterator<Item = NodeRef<'_, I, T, N, E>> + '_ {
        self.nodes.iter().map(move |node| NodeRef::new(self, node))
    }

    pub(crate) fn slot_node(&self, slot: usize) -> &Node<I, T, N, E> {
        &self.nodes[slot]
    }

    pub(crate) fn slot_node_mut(&mut self, slot: usize) -> &mut Node<I, T, N, E> {
        &mut self.nodes[slot]
    }
}

impl<I: Identifier, T, N, E> Graph<I, T, N, E> {
    /// Check whether a node with this identifier exists
    pub fn contains<Q>(&self, identifier: &Q) -> bool
    where
        I: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(identifier)
    }

    /// Look up a node, returning `None` if absent
    pub fn get<Q>(&self, identifier: &Q) -> Option<NodeRef<'_, I, T, N, E>>
    where
        I: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = *self.index.get(identifier)?;
        Some(NodeRef::new(self, &self.nodes[slot]))
    }

    /// Look up a node
    pub fn node<Q>(&self, identifier: &Q) -> GraphResult<NodeRef<'_, I, T, N, E>>
    where
        I: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        let slot = self.locate(identifier)?;
        Ok(NodeRef::new(self, &self.nodes[slot]))
    }

    /// Look up a node for mutation
    pub fn node_mut<Q>(&mut self, identifier: &Q) -> GraphResult<NodeMut<'_, I, T, N, E>>
    where
        I: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        let slot = self.locate(identifier)?;
        Ok(NodeMut::new(self, slot))
    }

    /// Create and register a node, then wire its initial connections
    ///
    /// The node is registered before any connection is made. If a
    /// connection fails, the error is returned but the node and every
    /// connection made before the failing one stay in the graph.
    pub fn create_node(&mut self, new: NewNode<I, T, N, E>) -> GraphResult<NodeMut<'_, I, T, N, E>>
    where
        T: From<I>,
    {
        let NewNode {
            tag,
            identifier,
            connections,
            data,
        } = new;

        let identifier = identifier.resolve();
        if self.index.contains_key(&identifier) {
            return Err(GraphError::DuplicateIdentifier(render(&identifier)));
        }

        let tag = tag.unwrap_or_else(|| T::from(identifier.clone()));
        let slot = self.nodes.len();
        self.nodes.push(Node::new(identifier.clone(), tag, data));
        self.index.insert(identifier.clone(), slot);
        debug!(identifier = ?identifier, connections = connections.len(), "created node");

        for (position, (target, data)) in connections.into_iter().enumerate() {
            let connected = self
                .locate(&target)
                .and_then(|to| self.connect(slot, to, data).map(|_| ()));
            if let Err(err) = connected {
                warn!(
                    identifier = ?identifier,
                    position,
                    error = %err,
                    "connection batch aborted; node and earlier connections kept"
                );
                return Err(err);
            }
        }

        Ok(NodeMut::new(self, slot))
    }

    /// Remove a node and every edge touching it
    ///
    /// Outgoing edges are removed first, then incoming ones, then the node
    /// itself. The detached node is returned with empty adjacency.
    pub fn remove_node<Q>(&mut self, identifier: &Q) -> GraphResult<Node<I, T, N, E>>
    where
        I: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        let slot = self.locate(identifier)?;
        self.detach(slot)
    }

    /// Connect `from -> to`; see [`NodeMut::add_connection`]
    pub fn add_connection<Q>(&mut self, from: &Q, to: &Q, data: E) -> GraphResult<Edge<'_, I, E>>
    where
        I: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        let from = self.locate(from)?;
        let to = self.locate(to)?;
        self.connect(from, to, data)
    }

    /// Disconnect `from -> to`; see [`NodeMut::remove_connection`]
    pub fn remove_connection<Q>(&mut self, from: &Q, to: &Q) -> GraphResult<E>
    where
        I: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        let from = self.locate(from)?;
        let to = self.locate(to)?;
        self.disconnect(from, to)
    }

    /// The edge `from -> to`, if both nodes exist and are connected
    pub fn edge<Q>(&self, from: &Q, to: &Q) -> Option<Edge<'_, I, E>>
    where
        I: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let source = &self.nodes[*self.index.get(from)?];
        let target = &self.nodes[*self.index.get(to)?];
        self.edge_between(source.identifier(), target.identifier())
    }

    /// Mutable access to the payload of the edge `from -> to`
    ///
    /// The payload is stored once, so both adjacency views observe the
    /// update.
    pub fn edge_data_mut<Q>(&mut self, from: &Q, to: &Q) -> GraphResult<&mut E>
    where
        I: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        let from = self.locate(from)?;
        let to = self.locate(to)?;
        let to_id = self.nodes[to].identifier().clone();
        let source = &mut self.nodes[from];
        let from_rendered = render(source.identifier());
        source
            .forward
            .get_mut(&to_id)
            .ok_or_else(|| GraphError::NodesNotConnected {
                from: from_rendered,
                to: render(&to_id),
            })
    }

    pub(crate) fn locate<Q>(&self, identifier: &Q) -> GraphResult<usize>
    where
        I: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        self.index
            .get(identifier)
            .copied()
            .ok_or_else(|| GraphError::NodeNotInGraph(render(identifier)))
    }

    pub(crate) fn entry(&self, identifier: &I) -> Option<&Node<I, T, N, E>> {
        self.index.get(identifier).map(|&slot| &self.nodes[slot])
    }

    pub(crate) fn edge_between(&self, from: &I, to: &I) -> Option<Edge<'_, I, E>> {
        let source = self.entry(from)?;
        let (to, data) = source.forward.get_key_value(to)?;
        Some(Edge::new(source.identifier(), to, data))
    }

    /// Insert `from -> to` into the source's forward map and the target's
    /// backward map, or neither
    pub(crate) fn connect(&mut self, from: usize, to: usize, data: E) -> GraphResult<Edge<'_, I, E>> {
        let from_id = self.nodes[from].identifier().clone();
        let to_id = self.nodes[to].identifier().clone();
        if self.nodes[from].forward.contains_key(&to_id) {
            return Err(GraphError::EdgeAlreadyExists {
                from: render(&from_id),
                to: render(&to_id),
            });
        }

        debug!(from = ?from_id, to = ?to_id, "added connection");
        self.nodes[to].backward.insert(from_id, ());
        let source = &mut self.nodes[from];
        let (to_key, data) = source.forward.insert(to_id, data);
        Ok(Edge::new(&source.identifier, to_key, data))
    }

    pub(crate) fn disconnect(&mut self, from: usize, to: usize) -> GraphResult<E> {
        let from_id = self.nodes[from].identifier().clone();
        let to_id = self.nodes[to].identifier().clone();
        let Some(data) = self.nodes[from].forward.remove(&to_id) else {
            return Err(GraphError::NodesNotConnected {
                from: render(&from_id),
                to: render(&to_id),
            });
        };
        self.nodes[to].backward.remove(&from_id);
        debug!(from = ?from_id, to = ?to_id, "removed connection");
        Ok(data)
    }

    fn detach(&mut self, slot: usize) -> GraphResult<Node<I, T, N, E>> {
        let targets: Vec<I> = self.nodes[slot].forward.keys().cloned().collect();
        for target in &targets {
            let to = self.locate(target)?;
            trace!(from = ?self.nodes[slot].identifier(), to = ?target, "cascading forward edge");
            self.disconnect(slot, to)?;
        }

        // Collected after the forward pass: a self-loop is already gone
        let sources: Vec<I> = self.nodes[slot].backward.keys().cloned().collect();
        for source in &sources {
            let from = self.locate(source)?;
            trace!(from = ?source, to = ?self.nodes[slot].identifier(), "cascading backward edge");
            self.disconnect(from, slot)?;
        }

        let node = self.nodes.swap_remove(slot);
        self.index.remove(node.identifier());
        if let Some(moved) = self.nodes.get(slot) {
            self.index.insert(moved.identifier().clone(), slot);
        }

        debug!(
            identifier = ?node.identifier(),
            outgoing = targets.len(),
            incoming = sources.len(),
            "removed node"
        );
        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestGraph = Graph<String, String, i32, u32>;

    fn named(graph: &mut TestGraph, name: &str) {
        graph
            .create_node(NewNode::with_data(0).identifier(name))
            .unwrap();
    }

    #[test]
    fn test_create_graph() {
        let graph: Graph = Graph::new();
        assert_eq!(graph.len(), 0);
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_create_node_generates_identifier() {
        let mut graph: Graph = Graph::new();
        let a = *graph.create_node(NewNode::new()).unwrap().identifier();
        let b = *graph.create_node(NewNode::new()).unwrap().identifier();

        assert_ne!(a, b);
        assert_eq!(graph.len(), 2);
        assert!(graph.contains(&a));

        // Tag falls back to the identifier
        assert_eq!(graph.node(&a).unwrap().tag(), &a);
    }

    #[test]
    fn test_create_node_keeps_explicit_tag_and_data() {
        let mut graph = TestGraph::new();
        graph
            .create_node(NewNode::with_data(42).identifier("a").tag("Alpha"))
            .unwrap();

        let node = graph.node("a").unwrap();
        assert_eq!(node.tag(), "Alpha");
        assert_eq!(*node.data(), 42);
    }

    #[test]
    fn test_duplicate_identifier_rejected() {
        let mut graph = TestGraph::new();
        named(&mut graph, "a");

        let err = graph
            .create_node(NewNode::with_data(1).identifier("a"))
            .unwrap_err();
        assert_eq!(err, GraphError::DuplicateIdentifier("\"a\"".to_string()));
        assert_eq!(graph.len(), 1);
        assert_eq!(*graph.node("a").unwrap().data(), 0);
    }

    #[test]
    fn test_lookup_missing_node() {
        let graph = TestGraph::new();
        assert!(!graph.contains("nope"));
        assert!(graph.get("nope").is_none());
        assert!(matches!(graph.node("nope"), Err(GraphError::NodeNotInGraph(_))));
    }

    #[test]
    fn test_create_node_with_connections() {
        let mut graph = TestGraph::new();
        named(&mut graph, "b");
        named(&mut graph, "c");

        graph
            .create_node(
                NewNode::with_data(0)
                    .identifier("a")
                    .connect("b")
                    .connect_with("c", 5),
            )
            .unwrap();

        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.edge("a", "b").map(|e| *e.data()), Some(0));
        assert_eq!(graph.edge("a", "c").map(|e| *e.data()), Some(5));
    }

    #[test]
    fn test_create_node_connection_failure_is_not_rolled_back() {
        let mut graph = TestGraph::new();
        named(&mut graph, "b");

        let err = graph
            .create_node(
                NewNode::with_data(0)
                    .identifier("a")
                    .connect_with("b", 1)
                    .connect_with("missing", 2)
                    .connect_with("b", 3),
            )
            .unwrap_err();

        assert_eq!(err, GraphError::NodeNotInGraph("\"missing\"".to_string()));
        assert!(graph.contains("a"));
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edge("a", "b").map(|e| *e.data()), Some(1));
    }

    #[test]
    fn test_create_node_duplicate_connection_in_batch() {
        let mut graph = TestGraph::new();
        named(&mut graph, "b");

        let err = graph
            .create_node(
                NewNode::with_data(0)
                    .identifier("a")
                    .connect_with("b", 1)
                    .connect_with("b", 2),
            )
            .unwrap_err();

        assert!(matches!(err, GraphError::EdgeAlreadyExists { .. }));
        assert_eq!(graph.edge("a", "b").map(|e| *e.data()), Some(1));
    }

    #[test]
    fn test_create_node_can_connect_to_itself() {
        let mut graph = TestGraph::new();
        graph
            .create_node(NewNode::with_data(0).identifier("a").connect_with("a", 9))
            .unwrap();

        let node = graph.node("a").unwrap();
        assert_eq!(node.out_degree(), 1);
        assert_eq!(node.in_degree(), 1);
    }

    #[test]
    fn test_add_connection_duplicate_keeps_first_data() {
        let mut graph = TestGraph::new();
        named(&mut graph, "a");
        named(&mut graph, "b");

        let edge = graph.add_connection("a", "b", 1).unwrap();
        assert_eq!(edge.endpoints(), (&"a".to_string(), &"b".to_string()));

        let err = graph.add_connection("a", "b", 2).unwrap_err();
        assert_eq!(
            err,
            GraphError::EdgeAlreadyExists {
                from: "\"a\"".to_string(),
                to: "\"b\"".to_string(),
            }
        );
        assert_eq!(graph.edge("a", "b").map(|e| *e.data()), Some(1));

        // The reverse direction is a different ordered pair
        assert!(graph.add_connection("b", "a", 2).is_ok());
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_add_connection_to_missing_node() {
        let mut graph = TestGraph::new();
        named(&mut graph, "a");

        let err = graph.add_connection("a", "ghost", 1).unwrap_err();
        assert_eq!(err, GraphError::NodeNotInGraph("\"ghost\"".to_string()));
        assert_eq!(graph.node("a").unwrap().out_degree(), 0);
    }

    #[test]
    fn test_remove_connection() {
        let mut graph = TestGraph::new();
        named(&mut graph, "a");
        named(&mut graph, "b");
        graph.add_connection("a", "b", 7).unwrap();

        assert_eq!(graph.remove_connection("a", "b"), Ok(7));
        assert!(graph.edge("a", "b").is_none());
        assert_eq!(graph.node("b").unwrap().in_degree(), 0);

        let err = graph.remove_connection("a", "b").unwrap_err();
        assert!(matches!(err, GraphError::NodesNotConnected { .. }));

        // Only the forward direction counts as connected
        graph.add_connection("b", "a", 1).unwrap();
        assert!(graph.remove_connection("a", "b").is_err());
    }

    #[test]
    fn test_edge_data_mut_is_seen_from_both_sides() {
        let mut graph = TestGraph::new();
        named(&mut graph, "a");
        named(&mut graph, "b");
        graph.add_connection("a", "b", 1).unwrap();

        *graph.edge_data_mut("a", "b").unwrap() = 11;

        let backward: Vec<u32> = graph
            .node("b")
            .unwrap()
            .backward_edges()
            .map(|e| *e.data())
            .collect();
        assert_eq!(backward, vec![11]);
        assert!(graph.edge_data_mut("b", "a").is_err());
    }

    #[test]
    fn test_remove_node_cascades() {
        let mut graph = TestGraph::new();
        for name in ["a", "b", "c"] {
            named(&mut graph, name);
        }
        graph.add_connection("a", "b", 1).unwrap();
        graph.add_connection("b", "c", 2).unwrap();
        graph.add_connection("c", "b", 3).unwrap();
        graph.add_connection("b", "b", 4).unwrap();

        let removed = graph.remove_node("b").unwrap();
        assert_eq!(removed.identifier(), "b");
        assert_eq!(removed.out_degree(), 0);
        assert_eq!(removed.in_degree(), 0);

        assert_eq!(graph.len(), 2);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.node("a").unwrap().out_degree(), 0);
        assert_eq!(graph.node("c").unwrap().in_degree(), 0);
        assert!(!graph.contains("b"));
    }

    #[test]
    fn test_remove_node_keeps_index_consistent() {
        let mut graph = TestGraph::new();
        for name in ["a", "b", "c", "d"] {
            named(&mut graph, name);
        }
        graph.add_connection("d", "c", 1).unwrap();

        // Removing an early slot moves the last node into it
        graph.remove_node("a").unwrap();
        for name in ["b", "c", "d"] {
            assert_eq!(graph.node(name).unwrap().identifier(), name);
        }
        assert_eq!(graph.edge("d", "c").map(|e| *e.data()), Some(1));

        let mut ids: Vec<_> = graph.identifiers().cloned().collect();
        ids.sort();
        assert_eq!(ids, vec!["b", "c", "d"]);
    }

    #[test]
    fn test_removed_node_hands_back_its_parts() {
        let mut graph = TestGraph::with_capacity(4);
        assert!(graph.is_empty());
        graph
            .create_node(NewNode::with_data(5).identifier("a").tag("Alpha"))
            .unwrap();
        named(&mut graph, "b");
        graph.add_connection("a", "b", 1).unwrap();

        let (identifier, tag, data) = graph.remove_node("a").unwrap().into_parts();
        assert_eq!((identifier.as_str(), tag.as_str(), data), ("a", "Alpha", 5));
        assert_eq!(graph.remove_node("b").unwrap().into_data(), 0);
        assert!(graph.is_empty());
    }

    #[test]
    fn test_integer_identifiers_without_generation() {
        let mut graph: Graph<u64, u64, (), u32> = Graph::with_capacity(3);
        graph.create_node(NewNode::named(1u64)).unwrap();
        graph
            .create_node(NewNode::named(2u64).tag(20u64).connect_with(1u64, 7))
            .unwrap();

        assert!(graph.contains(&1u64));
        assert_eq!(*graph.node(&2u64).unwrap().tag(), 20);
        assert_eq!(*graph.node(&1u64).unwrap().tag(), 1);
        assert_eq!(graph.edge(&2u64, &1).map(|e| *e.data()), Some(7));

        let err = graph.create_node(NewNode::named(1u64)).unwrap_err();
        assert_eq!(err, GraphError::DuplicateIdentifier("1".to_string()));

        graph.add_connection(&1u64, &2, 3).unwrap();
        assert_eq!(graph.remove_connection(&2u64, &1), Ok(7));
        graph.remove_node(&1u64).unwrap();
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.node(&2u64).unwrap().in_degree(), 0);
    }

    #[test]
    fn test_tuple_identifiers() {
        let mut graph: Graph<(u32, u32), (u32, u32), &str, ()> = Graph::new();
        graph
            .create_node(NewNode::named((0u32, 0u32)).data("origin"))
            .unwrap();
        graph
            .create_node(NewNode::named((0u32, 1u32)).data("north").connect((0u32, 0u32)))
            .unwrap();

        let origin = graph.node(&(0u32, 0u32)).unwrap();
        assert_eq!(*origin.data(), "origin");
        let sources: Vec<_> = origin.backward_edges().map(|e| *e.from()).collect();
        assert_eq!(sources, vec![(0u32, 1u32)]);
    }

    #[test]
    fn test_remove_missing_node() {
        let mut graph = TestGraph::new();
        named(&mut graph, "a");

        let err = graph.remove_node("b").unwrap_err();
        assert_eq!(err, GraphError::NodeNotInGraph("\"b\"".to_string()));
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            GraphError::NodeNotInGraph("\"x\"".into()).to_string(),
            "Node not in graph: \"x\""
        );
        assert_eq!(
            GraphError::EdgeAlreadyExists {
                from: "1".into(),
                to: "2".into()
            }
            .to_string(),
            "Edge already exists: 1 -> 2"
        );
    }
}
