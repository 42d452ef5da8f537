//! Elevation grids and the graphs they induce
//!
//! Grids are written one row per line with `a`..`z` elevations. `S` marks the
//! start (elevation `a`) and `E` the end (elevation `z`). A step goes to an
//! orthogonal neighbor that is at most one higher, descending is unlimited.

use std::str::FromStr;

use tracing::debug;

use crate::errors::{GraphError, HeightMapError};
use crate::geometry::Position;
use crate::graph::{Graph, SearchNode};

const START_MARKER: char = 'S';
const END_MARKER: char = 'E';
const LOWEST: u8 = 0;
const HIGHEST: u8 = b'z' - b'a';

/// Weight of every step on the grid
pub const STEP_COST: u32 = 1;


/// True if a single step from `from` to `to` elevation is allowed
pub fn can_step(from: u8, to: u8) -> bool {
    to <= from.saturating_add(1)
}


#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeightMap {
    heights: Vec<Vec<u8>>, // [row][col], 0 = 'a'
    start: Position,
    end: Position,
}

impl HeightMap {

    pub fn rows(&self) -> usize {
        self.heights.len()
    }

    pub fn cols(&self) -> usize {
        self.heights.first().map_or(0, Vec::len)
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    /// Elevation at `position`, None when off the grid
    pub fn elevation(&self, position: Position) -> Option<u8> {
        let row = usize::try_from(position.row).ok()?;
        let col = usize::try_from(position.col).ok()?;
        self.heights.get(row)?.get(col).copied()
    }

    /// All grid positions, row by row
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        let cols = self.cols();
        (0..self.rows()).flat_map(move |r| (0..cols).map(move |c| Position::new(r as i32, c as i32)))
    }

    /// Every cell at the lowest elevation, the start marker included
    pub fn lowest_positions(&self) -> Vec<Position> {
        self.positions()
            .filter(|&p| self.elevation(p) == Some(LOWEST))
            .collect()
    }

    /// Neighbors reachable from `position` in a single step
    pub fn steps_from(&self, position: Position) -> impl Iterator<Item = Position> + '_ {
        let from = self.elevation(position);
        position.orthogonal_neighbors()
            .into_iter()
            .filter(move |&n| match (from, self.elevation(n)) {
                (Some(from), Some(to)) => can_step(from, to),
                _ => false,
            })
    }

    /// Graph with a node per cell and a unit edge per allowed step
    pub fn to_graph(&self) -> Result<Graph<u32>, GraphError> {
        let mut graph = Graph::new();
        for position in self.positions() {
            graph.add_node(SearchNode::new(position));
        }
        for position in self.positions() {
            for neighbor in self.steps_from(position) {
                graph.add_edge(position, neighbor, STEP_COST)?;
            }
        }
        debug!(nodes = graph.len(), edges = graph.edge_count(), "built graph from height map");
        Ok(graph)
    }

    /// Fewest steps from the start marker to the end marker
    pub fn fewest_steps(&self) -> Result<Option<u32>, GraphError> {
        self.to_graph()?.shortest_path_weight(self.start, self.end)
    }

    /// Fewest steps to the end marker from any lowest cell
    pub fn fewest_steps_from_lowest(&self) -> Result<Option<u32>, GraphError> {
        let starts = self.lowest_positions();
        debug!(candidates = starts.len(), "searching from every lowest cell");
        self.to_graph()?.shortest_path_weight_from_any(starts, self.end)
    }
}

impl FromStr for HeightMap {
    type Err = HeightMapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // blank lines around the grid are ignored, any other whitespace is an invalid cell
        let lines: Vec<&str> = s.trim_matches(|c: char| c == '\n' || c == '\r').lines().collect();
        let expected = match lines.first() {
            Some(line) if !line.is_empty() => line.chars().count(),
            _ => return Err(HeightMapError::Empty),
        };

        let mut heights = Vec::with_capacity(lines.len());
        let mut start = None;
        let mut end = None;

        for (r, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != expected {
                return Err(HeightMapError::RaggedRow { row: r, expected, found });
            }

            let mut row = Vec::with_capacity(expected);
            for (c, ch) in line.chars().enumerate() {
                let position = Position::new(r as i32, c as i32);
                let height = match ch {
                    'a'..='z' => ch as u8 - b'a',
                    START_MARKER => {
                        mark(&mut start, START_MARKER, position)?;
                        LOWEST
                    }
                    END_MARKER => {
                        mark(&mut end, END_MARKER, position)?;
                        HIGHEST
                    }
                    _ => return Err(HeightMapError::InvalidCell { ch, position }),
                };
                row.push(height);
            }
            heights.push(row);
        }

        Ok(Self {
            heights,
            start: start.ok_or(HeightMapError::MissingMarker(START_MARKER))?,
            end: end.ok_or(HeightMapError::MissingMarker(END_MARKER))?,
        })
    }
}

fn mark(slot: &mut Option<Position>, marker: char, position: Position) -> Result<(), HeightMapError> {
    if slot.is_some() {
        return Err(HeightMapError::DuplicateMarker { marker, position });
    }
    *slot = Some(position);
    Ok(())
}
