use thiserror::Error;

use crate::geometry::Position;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathPlannerError {
    #[error("no path found")]
    NoPathFound, // Unable to find a path to the goal
}

/// Precondition violations when building or querying a graph
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("node {0} does not exist in the graph")]
    NodeNotFound(Position),
    #[error("edge {from} -> {to} has a negative weight")]
    NegativeWeight { from: Position, to: Position },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeightMapError {
    #[error("height map is empty")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },
    #[error("unrecognized cell {ch:?} at {position}")]
    InvalidCell { ch: char, position: Position },
    #[error("missing {0:?} marker")]
    MissingMarker(char),
    #[error("duplicate {marker:?} marker at {position}")]
    DuplicateMarker { marker: char, position: Position },
}
