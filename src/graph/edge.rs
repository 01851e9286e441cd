//! Edge views and per-node adjacency storage

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// A directed edge `from -> to` with its payload
///
/// Edges have no storage of their own: an `Edge` is a borrowed view built
/// from the adjacency maps of the two endpoints, so it cannot be used to
/// mutate the graph.
#[derive(Debug)]
pub struct Edge<'g, I, E> {
    from: &'g I,
    to: &'g I,
    data: &'g E,
}

impl<'g, I, E> Edge<'g, I, E> {
    pub(crate) fn new(from: &'g I, to: &'g I, data: &'g E) -> Self {
        Self { from, to, data }
    }

    /// Source node identifier
    pub fn from(&self) -> &'g I {
        self.from
    }

    /// Target node identifier
    pub fn to(&self) -> &'g I {
        self.to
    }

    /// Edge payload
    pub fn data(&self) -> &'g E {
        self.data
    }

    /// `(from, to)` pair
    pub fn endpoints(&self) -> (&'g I, &'g I) {
        (self.from, self.to)
    }
}

impl<I, E> Clone for Edge<'_, I, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I, E> Copy for Edge<'_, I, E> {}

impl<I: PartialEq, E: PartialEq> PartialEq for Edge<'_, I, E> {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to && self.data == other.data
    }
}

impl<I: Eq, E: Eq> Eq for Edge<'_, I, E> {}

impl<I: fmt::Display, E: fmt::Debug> fmt::Display for Edge<'_, I, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Edge({}, {}, {:?})", self.from, self.to, self.data)
    }
}

/// Insertion-ordered map from neighbor identifier to a value
///
/// Lookups go through `positions`; iteration follows `entries`, which keeps
/// the order neighbors were connected in.
#[derive(Debug, Clone)]
pub(crate) struct Adjacency<I, V> {
    entries: Vec<(I, V)>,
    positions: HashMap<I, usize>,
}

impl<I, V> Adjacency<I, V> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
            positions: HashMap::new(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn key_at(&self, index: usize) -> Option<&I> {
        self.entries.get(index).map(|(key, _)| key)
    }

    pub(crate) fn keys(&self) -> impl Iterator<Item = &I> + '_ {
        self.entries.iter().map(|(key, _)| key)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&I, &V)> + '_ {
        self.entries.iter().map(|(key, value)| (key, value))
    }
}

impl<I: Hash + Eq + Clone, V> Adjacency<I, V> {
    pub(crate) fn contains_key(&self, key: &I) -> bool {
        self.positions.contains_key(key)
    }

    pub(crate) fn get_key_value(&self, key: &I) -> Option<(&I, &V)> {
        let position = *self.positions.get(key)?;
        self.entries.get(position).map(|(key, value)| (key, value))
    }

    pub(crate) fn get_mut(&mut self, key: &I) -> Option<&mut V> {
        let position = *self.positions.get(key)?;
        self.entries.get_mut(position).map(|(_, value)| value)
    }

    /// Insert or replace; a replaced entry keeps its original position
    pub(crate) fn insert(&mut self, key: I, value: V) -> (&I, &V) {
        let position = match self.positions.get(&key) {
            Some(&position) => {
                self.entries[position].1 = value;
                position
            }
            None => {
                let position = self.entries.len();
                self.positions.insert(key.clone(), position);
                self.entries.push((key, value));
                position
            }
        };
        let (key, value) = &self.entries[position];
        (key, value)
    }

    pub(crate) fn remove(&mut self, key: &I) -> Option<V> {
        let position = self.positions.remove(key)?;
        let (_, value) = self.entries.remove(position);
        for (shifted, _) in &self.entries[position..] {
            if let Some(slot) = self.positions.get_mut(shifted) {
                *slot -= 1;
            }
        }
        Some(value)
    }
}
