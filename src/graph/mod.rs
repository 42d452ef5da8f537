//! Explicit weighted graph over grid positions
//!
//! Nodes are keyed by [`Position`] and carry their own directed, weighted
//! adjacency. Shortest path queries run Dijkstra's algorithm and return a
//! [`ShortestPaths`] that owns all per-run state, so one graph can serve any
//! number of independent searches.

mod node;
mod search;

pub use node::SearchNode;
pub use search::{SearchState, ShortestPaths};

use std::{fmt::Debug, ops::Index};

use num_traits::{CheckedAdd, Zero};
use tracing::{debug, trace};

use crate::collections::FxIndexMap;
use crate::errors::{GraphError, PathPlannerError};
use crate::geometry::Position;
use crate::graph_algos::dijkstra::{dijkstra, dijkstra_nodes_multi};


#[derive(Clone, Debug)]
pub struct Graph<C = u32> {
    nodes: FxIndexMap<Position, SearchNode<C>>,
}

impl<C> Default for Graph<C> {
    fn default() -> Self {
        Self { nodes: FxIndexMap::default() }
    }
}

impl<C> Graph<C>
where
    C: Zero + CheckedAdd + Ord + Copy + Debug,
{

    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `node` unless a node with the same position already exists
    /// An existing node is kept as is, adjacency is never merged
    /// Returns true if the node was inserted
    pub fn add_node(&mut self, node: SearchNode<C>) -> bool {
        let position = node.position();
        if self.nodes.contains_key(&position) {
            trace!(%position, "node already present");
            return false;
        }
        self.nodes.insert(position, node);
        true
    }

    /// Add or overwrite the directed edge `from -> to`
    /// Both nodes must already exist and the weight must be non-negative
    pub fn add_edge(&mut self, from: Position, to: Position, weight: C) -> Result<(), GraphError> {
        if weight < C::zero() {
            return Err(GraphError::NegativeWeight { from, to });
        }
        if !self.contains(&to) {
            return Err(GraphError::NodeNotFound(to));
        }
        self.node_mut(&from)?.add_adjacency(to, weight);
        Ok(())
    }

    pub fn contains(&self, position: &Position) -> bool {
        self.nodes.contains_key(position)
    }

    pub fn node(&self, position: &Position) -> Result<&SearchNode<C>, GraphError> {
        self.nodes.get(position).ok_or(GraphError::NodeNotFound(*position))
    }

    pub fn node_mut(&mut self, position: &Position) -> Result<&mut SearchNode<C>, GraphError> {
        self.nodes.get_mut(position).ok_or(GraphError::NodeNotFound(*position))
    }

    /// Nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &SearchNode<C>> + '_ {
        self.nodes.values()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(SearchNode::degree).sum()
    }

    /// Outgoing edges of `position`, empty if the node does not exist
    /// Edges to positions that are not nodes of this graph are left out
    pub fn neighbors(&self, position: Position) -> impl Iterator<Item = (Position, C)> + '_ {
        self.nodes.get(&position)
            .into_iter()
            .flat_map(|node| node.adjacency())
            .filter(|(neighbor, _)| self.nodes.contains_key(neighbor))
    }

    /// Settle every node reachable from `source`
    pub fn shortest_paths(&self, source: Position) -> Result<ShortestPaths<C>, GraphError> {
        self.shortest_paths_from_any([source])
    }

    /// Settle every node reachable from any of `sources`
    /// Each node ends up with its distance to the closest source
    pub fn shortest_paths_from_any<S>(&self, sources: S) -> Result<ShortestPaths<C>, GraphError>
    where
        S: IntoIterator<Item = Position>,
    {
        let sources = sources.into_iter()
            .map(|source| self.node(&source).map(SearchNode::position))
            .collect::<Result<Vec<_>, _>>()?;

        let node_map = dijkstra_nodes_multi(
            sources.iter().copied(),
            |position: &Position| self.neighbors(*position),
        );
        debug!(sources = sources.len(), reached = node_map.len(), nodes = self.len(), "shortest paths settled");

        Ok(ShortestPaths::new(sources, node_map))
    }

    /// Weight of the shortest path `source -> destination`
    /// Ok(None) means no path exists, which is distinct from a zero weight
    pub fn shortest_path_weight(&self, source: Position, destination: Position) -> Result<Option<C>, GraphError> {
        self.shortest_path_weight_from_any([source], destination)
    }

    /// Weight of the cheapest path from any of `sources` to `destination`
    pub fn shortest_path_weight_from_any<S>(&self, sources: S, destination: Position) -> Result<Option<C>, GraphError>
    where
        S: IntoIterator<Item = Position>,
    {
        self.node(&destination)?;
        let paths = self.shortest_paths_from_any(sources)?;
        Ok(paths.distance(&destination))
    }

    /// Nodes on the shortest path `source -> destination`, both ends included
    /// Stops as soon as the destination is settled
    pub fn shortest_path(&self, source: Position, destination: Position) -> Result<Option<Vec<Position>>, GraphError> {
        self.node(&source)?;
        self.node(&destination)?;

        match dijkstra(source, |position: &Position| self.neighbors(*position), |position| *position == destination) {
            Ok(path) => Ok(Some(path)),
            Err(PathPlannerError::NoPathFound) => Ok(None),
        }
    }
}

/// Panics if there is no node at the position
impl<C> Index<Position> for Graph<C> {
    type Output = SearchNode<C>;

    fn index(&self, position: Position) -> &Self::Output {
        self.nodes.get(&position)
            .unwrap_or_else(|| panic!("node {position} does not exist in the graph"))
    }
}
