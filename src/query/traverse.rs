//! Depth-first edge traversal

use super::types::Direction;
use crate::graph::{Edge, Graph, Identifier, Node};

/// Lazy depth-first iterator over edges reachable from a node
///
/// Each edge is yielded before anything reachable through it, and a node's
/// edges are walked in insertion order. No visited set is kept: an edge
/// reachable along several paths is yielded once per path, and a reachable
/// cycle makes the iterator infinite. Bound it with `take` if the graph may
/// contain cycles.
pub struct Traverse<'g, I, T, N, E> {
    graph: &'g Graph<I, T, N, E>,
    direction: Direction,
    stack: Vec<Frame<'g, I, T, N, E>>,
}

/// A node on the current path and how many of its neighbors were visited
struct Frame<'g, I, T, N, E> {
    node: &'g Node<I, T, N, E>,
    cursor: usize,
}

impl<'g, I, T, N, E> Traverse<'g, I, T, N, E> {
    pub(crate) fn new(
        graph: &'g Graph<I, T, N, E>,
        start: &'g Node<I, T, N, E>,
        direction: Direction,
    ) -> Self {
        Self {
            graph,
            direction,
            stack: vec![Frame {
                node: start,
                cursor: 0,
            }],
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Number of nodes on the current path, including the start
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

impl<'g, I: Identifier, T, N, E> Iterator for Traverse<'g, I, T, N, E> {
    type Item = Edge<'g, I, E>;

    fn next(&mut self) -> Option<Self::Item> {
        let graph = self.graph;
        loop {
            let frame = self.stack.last_mut()?;
            let current = frame.node;
            let Some(neighbor) = current.neighbor_at(self.direction, frame.cursor) else {
                self.stack.pop();
                continue;
            };
            frame.cursor += 1;

            let edge = match self.direction {
                Direction::Forward => graph.edge_between(current.identifier(), neighbor),
                Direction::Backward => graph.edge_between(neighbor, current.identifier()),
            };
            if let Some(next) = graph.entry(neighbor) {
                self.stack.push(Frame {
                    node: next,
                    cursor: 0,
                });
            }
            if edge.is_some() {
                return edge;
            }
        }
    }
}
