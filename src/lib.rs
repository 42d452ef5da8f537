//! Weighted grid graphs, Dijkstra shortest paths and height-map traversal

mod collections;

pub mod errors;
pub mod geometry;
pub mod graph;
pub mod graph_algos;
pub mod heightmap;

pub use collections::FxIndexMap;
pub use errors::{GraphError, HeightMapError, PathPlannerError};
pub use geometry::Position;
pub use graph::{Graph, SearchNode, SearchState, ShortestPaths};
pub use heightmap::HeightMap;
