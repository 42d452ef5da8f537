use std::hash::{Hash, Hasher};

use num_traits::Zero;

use crate::collections::FxIndexMap;
use crate::geometry::Position;


/// Vertex of a [`Graph`](super::Graph)
/// Identified by its position alone - two nodes at the same position are the same node
/// Edges are directed: a two way connection needs an adjacency on both ends
#[derive(Clone, Debug)]
pub struct SearchNode<C = u32> {
    position: Position,
    adjacency: FxIndexMap<Position, C>, // neighbor -> edge weight
}

impl<C> SearchNode<C>
where
    C: Zero + PartialOrd + Copy,
{

    pub fn new(position: Position) -> Self {
        Self {
            position,
            adjacency: FxIndexMap::default(),
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Add or overwrite the directed edge to `neighbor`
    /// Weight must be non-negative
    pub fn add_adjacency(&mut self, neighbor: Position, weight: C) {
        debug_assert!(weight >= C::zero(), "negative edge weight");
        self.adjacency.insert(neighbor, weight);
    }

    /// Outgoing edges as (neighbor, weight)
    pub fn adjacency(&self) -> impl Iterator<Item = (Position, C)> + '_ {
        self.adjacency.iter().map(|(p, w)| (*p, *w))
    }

    pub fn weight_to(&self, neighbor: &Position) -> Option<C> {
        self.adjacency.get(neighbor).copied()
    }

    pub fn degree(&self) -> usize {
        self.adjacency.len()
    }
}

impl<C> PartialEq for SearchNode<C> {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}
impl<C> Eq for SearchNode<C> {}

impl<C> Hash for SearchNode<C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.position.hash(state);
    }
}
