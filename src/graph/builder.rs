//! Node creation requests

use super::node::Generate;

/// Everything [`Graph::create_node`](super::Graph::create_node) needs to
/// create one node.
///
/// A request either names its node up front ([`NewNode::named`], or
/// [`NewNode::identifier`] on any request) or leaves the identifier to be
/// generated at creation time, which needs an identifier type that
/// implements [`Generate`]. An unset tag becomes a copy of the identifier.
///
/// ```
/// use digraph::{Graph, NewNode};
///
/// let mut graph: Graph<u64, u64, (), u32> = Graph::new();
/// graph.create_node(NewNode::named(1u64)).unwrap();
/// graph
///     .create_node(NewNode::named(2u64).tag(20u64).connect_with(1u64, 3))
///     .unwrap();
///
/// assert_eq!(graph.edge_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct NewNode<I, T = I, N = (), E = ()> {
    pub(crate) tag: Option<T>,
    pub(crate) identifier: Naming<I>,
    pub(crate) connections: Vec<(I, E)>,
    pub(crate) data: N,
}

/// Where a new node's identifier comes from
#[derive(Debug, Clone)]
pub(crate) enum Naming<I> {
    Given(I),
    Generated(fn() -> I),
}

impl<I> Naming<I> {
    pub(crate) fn resolve(self) -> I {
        match self {
            Naming::Given(identifier) => identifier,
            Naming::Generated(generate) => generate(),
        }
    }
}

impl<I: Generate, T, N: Default, E> NewNode<I, T, N, E> {
    /// Start a request whose identifier is generated at creation
    pub fn new() -> Self {
        Self::with_data(N::default())
    }
}

impl<I: Generate, T, N: Default, E> Default for NewNode<I, T, N, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Generate, T, N, E> NewNode<I, T, N, E> {
    /// Start a request carrying `data` as the node payload
    pub fn with_data(data: N) -> Self {
        Self::build(Naming::Generated(I::generate), data)
    }
}

impl<I, T, N: Default, E> NewNode<I, T, N, E> {
    /// Start a request for a node with this identifier
    pub fn named(identifier: impl Into<I>) -> Self {
        Self::build(Naming::Given(identifier.into()), N::default())
    }
}

impl<I, T, N, E> NewNode<I, T, N, E> {
    fn build(identifier: Naming<I>, data: N) -> Self {
        Self {
            tag: None,
            identifier,
            connections: Vec::new(),
            data,
        }
    }

    pub fn identifier(mut self, identifier: impl Into<I>) -> Self {
        self.identifier = Naming::Given(identifier.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<T>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn data(mut self, data: N) -> Self {
        self.data = data;
        self
    }

    /// Connect to an existing node with a default edge payload
    pub fn connect(self, target: impl Into<I>) -> Self
    where
        E: Default,
    {
        self.connect_with(target, E::default())
    }

    /// Connect to an existing node with the given edge payload
    pub fn connect_with(mut self, target: impl Into<I>, data: E) -> Self {
        self.connections.push((target.into(), data));
        self
    }

    /// Append several `(target, payload)` connections
    pub fn connections(mut self, connections: impl IntoIterator<Item = (I, E)>) -> Self {
        self.connections.extend(connections);
        self
    }
}
