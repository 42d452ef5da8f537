use std::fmt::Debug;

use num_traits::Zero;

use crate::geometry::Position;
use crate::graph_algos::{shortest_path, GraphNodeMap};


/// Search state of a single node for one shortest path run
/// A fresh state is unreachable: no distance and no path
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchState<C> {
    distance: Option<C>, // None is the unreachable sentinel
    path: Vec<Position>, // predecessors from the source, excluding the node itself
}

impl<C: Copy> SearchState<C> {

    pub fn new() -> Self {
        Self {
            distance: None,
            path: Vec::new(),
        }
    }

    pub fn distance(&self) -> Option<C> {
        self.distance
    }

    pub fn set_distance(&mut self, distance: C) {
        self.distance = Some(distance);
    }

    pub fn path(&self) -> &[Position] {
        &self.path
    }

    pub fn set_path(&mut self, path: Vec<Position>) {
        self.path = path;
    }

    pub fn is_reachable(&self) -> bool {
        self.distance.is_some()
    }
}

impl<C: Copy> Default for SearchState<C> {
    fn default() -> Self {
        Self::new()
    }
}


/// Result of one shortest path run over a graph
/// Owns all distance and predecessor data, the graph itself is left untouched
#[derive(Clone, Debug)]
pub struct ShortestPaths<C = u32> {
    sources: Vec<Position>,
    node_map: GraphNodeMap<Position, C>,
}

impl<C> ShortestPaths<C>
where
    C: Zero + Ord + Copy + Debug,
{

    pub(crate) fn new(sources: Vec<Position>, node_map: GraphNodeMap<Position, C>) -> Self {
        Self { sources, node_map }
    }

    pub fn sources(&self) -> &[Position] {
        &self.sources
    }

    /// Settled distance to `position`, None when unreachable
    pub fn distance(&self, position: &Position) -> Option<C> {
        self.node_map.get(position).map(|&(_, cost)| cost)
    }

    /// Full path from the closest source up to and including `position`
    pub fn path_to(&self, position: &Position) -> Option<Vec<Position>> {
        let index = self.node_map.get_index_of(position)?;
        shortest_path(&self.node_map, index).ok()
    }

    /// Nodes preceding `position` on its shortest path, source first
    pub fn predecessors(&self, position: &Position) -> Option<Vec<Position>> {
        self.path_to(position).map(|mut path| {
            path.pop();
            path
        })
    }

    /// Distance and predecessors of `position` packed as a [`SearchState`]
    pub fn state(&self, position: &Position) -> SearchState<C> {
        let mut state = SearchState::new();
        if let Some(distance) = self.distance(position) {
            state.set_distance(distance);
            state.set_path(self.predecessors(position).unwrap_or_default());
        }
        state
    }

    /// Number of nodes reached from the sources, sources included
    pub fn reached(&self) -> usize {
        self.node_map.len()
    }

    /// Reached positions with their distances, in discovery order
    pub fn iter(&self) -> impl Iterator<Item = (Position, C)> + '_ {
        self.node_map.iter().map(|(p, &(_, cost))| (*p, cost))
    }
}
