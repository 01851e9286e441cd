//! Bag containment rules
//!
//! Builds a graph from rules of the form
//!
//! ```text
//! light red bags contain 1 bright white bag, 2 muted yellow bags.
//! faded blue bags contain no other bags.
//! ```
//!
//! Each bag is a node identified by its name; an edge `outer -> inner`
//! carries how many `inner` bags one `outer` bag holds. Two questions are
//! answered over that graph: which bags can eventually hold a given bag
//! (walk incoming edges) and how many bags a given bag holds in total
//! (weighted sum over outgoing edges).

use crate::graph::{Graph, GraphError, NewNode};
use regex_lite::Regex;
use std::collections::BTreeSet;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Bag name -> bag name, edge payload is the quantity held
pub type BagGraph = Graph<String, String, (), u64>;

/// The bag the puzzle asks about when no other target is given
pub const DEFAULT_TARGET: &str = "shiny gold";

const SUBJECT_PATTERN: &str = r"^((?:[a-zA-Z] ?)+) bags contain";
const CONTENT_PATTERN: &str = r"(\d+) ([a-zA-Z]+ [a-zA-Z]+) bags?";

/// Errors from reading rules or querying the bag graph
#[derive(Debug, Error)]
pub enum BagsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed rule on line {line}: {text}")]
    MalformedRule { line: usize, text: String },

    #[error("Bag count overflows for '{0}'")]
    Overflow(String),

    #[error("Invalid rule pattern: {0}")]
    Pattern(#[from] regex_lite::Error),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

pub type BagsResult<T> = Result<T, BagsError>;

struct RuleParser {
    subject: Regex,
    content: Regex,
}

impl RuleParser {
    fn new() -> BagsResult<Self> {
        Ok(Self {
            subject: Regex::new(SUBJECT_PATTERN)?,
            content: Regex::new(CONTENT_PATTERN)?,
        })
    }

    /// Add one rule line to the graph, creating bags on first mention
    fn apply(&self, graph: &mut BagGraph, line_number: usize, line: &str) -> BagsResult<()> {
        let malformed = || BagsError::MalformedRule {
            line: line_number,
            text: line.to_string(),
        };

        let subject = self
            .subject
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
            .ok_or_else(malformed)?;
        ensure_bag(graph, subject)?;

        for caps in self.content.captures_iter(line) {
            let (Some(count), Some(inner)) = (caps.get(1), caps.get(2)) else {
                return Err(malformed());
            };
            let count: u64 = count.as_str().parse().map_err(|_| malformed())?;
            let inner = inner.as_str();

            ensure_bag(graph, inner)?;
            graph.add_connection(subject, inner, count)?;
        }
        Ok(())
    }
}

fn ensure_bag(graph: &mut BagGraph, name: &str) -> BagsResult<()> {
    if !graph.contains(name) {
        graph.create_node(NewNode::new().identifier(name))?;
    }
    Ok(())
}

/// Parse rule text into a bag graph; blank lines are skipped
pub fn parse_rules(input: &str) -> BagsResult<BagGraph> {
    let parser = RuleParser::new()?;
    let mut graph = BagGraph::new();

    for (index, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        parser.apply(&mut graph, index + 1, line)?;
    }

    debug!(bags = graph.len(), rules = graph.edge_count(), "parsed bag rules");
    Ok(graph)
}

/// Read and parse a rules file
pub fn load_rules(path: impl AsRef<Path>) -> BagsResult<BagGraph> {
    let input = std::fs::read_to_string(path)?;
    parse_rules(&input)
}

/// Every bag that can eventually contain `target`, in name order
///
/// The graph must be acyclic along incoming edges from `target`.
pub fn containers<'g>(graph: &'g BagGraph, target: &str) -> BagsResult<BTreeSet<&'g str>> {
    let node = graph.node(target)?;
    Ok(node
        .traverse_backward_edges()
        .map(|edge| edge.from().as_str())
        .collect())
}

/// Total number of bags inside one `target` bag
///
/// Each outgoing edge contributes its quantity plus its quantity times
/// everything inside the inner bag. The graph must be acyclic along
/// outgoing edges from `target`.
pub fn contained_count(graph: &BagGraph, target: &str) -> BagsResult<u64> {
    let node = graph.node(target)?;
    let mut total: u64 = 0;
    for edge in node.forward_edges() {
        let quantity = *edge.data();
        let inner = contained_count(graph, edge.to())?;
        total = quantity
            .checked_mul(inner)
            .and_then(|nested| nested.checked_add(quantity))
            .and_then(|added| added.checked_add(total))
            .ok_or_else(|| BagsError::Overflow(target.to_string()))?;
    }
    Ok(total)
}
