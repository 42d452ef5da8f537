use std::fmt;

use num_traits::{Num, Signed};


/// Manhattan distance
pub fn manhattan_distance<T>(x1: T, y1: T, x2: T, y2: T) -> T
where
    T: Num + Copy + Signed,
    {
    (x1 - x2).abs() + (y1 - y2).abs()
}


/// Grid coordinate - the identity of a node in a graph
/// Equality, hashing and ordering are all by (row, col)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {

    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Up, down, left and right - diagonals are not neighbors
    pub fn orthogonal_neighbors(&self) -> [Position; 4] {
        [
            Position::new(self.row - 1, self.col),
            Position::new(self.row + 1, self.col),
            Position::new(self.row, self.col - 1),
            Position::new(self.row, self.col + 1),
        ]
    }

    /// Minimum number of orthogonal steps to reach `other`
    pub fn manhattan_distance(&self, other: &Position) -> i32 {
        manhattan_distance(self.row, self.col, other.row, other.col)
    }
}

impl From<(i32, i32)> for Position {
    fn from((row, col): (i32, i32)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_position_identity_is_by_value() {
        let a = Position::new(2, 3);
        let b: Position = (2, 3).into();

        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
        assert!(!set.insert(b));
    }

    #[test]
    fn test_orthogonal_neighbors() {
        let neighbors = Position::new(0, 0).orthogonal_neighbors();

        assert_eq!(neighbors.len(), 4);
        assert!(neighbors.contains(&Position::new(-1, 0)));
        assert!(neighbors.contains(&Position::new(1, 0)));
        assert!(neighbors.contains(&Position::new(0, -1)));
        assert!(neighbors.contains(&Position::new(0, 1)));
        for n in neighbors {
            assert_eq!(n.manhattan_distance(&Position::new(0, 0)), 1);
        }
    }

    #[test]
    fn test_manhattan_distance() {
        assert_eq!(manhattan_distance(0, 0, 3, -4), 7);
        assert_eq!(Position::new(1, 1).manhattan_distance(&Position::new(4, 5)), 7);
    }

    #[test]
    fn test_display() {
        assert_eq!(Position::new(4, -1).to_string(), "(4,-1)");
    }
}
