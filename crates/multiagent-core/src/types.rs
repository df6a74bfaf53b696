//! Core type definitions for the simulation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an agent, assigned in creation order starting at 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(pub u32);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 2D cell position on a square grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn add(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Clamp each axis independently into `[0, grid_size - 1]`
    pub fn clamp(&self, grid_size: i32) -> Self {
        let max = grid_size - 1;
        Self {
            x: self.x.clamp(0, max),
            y: self.y.clamp(0, max),
        }
    }

    pub fn in_bounds(&self, grid_size: i32) -> bool {
        (0..grid_size).contains(&self.x) && (0..grid_size).contains(&self.y)
    }

    /// Chebyshev (king-move) distance to another position
    pub fn chebyshev_distance(&self, other: &Position) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// Pack an in-bounds position into a single cell index (`x * grid_size + y`)
    pub fn pack(&self, grid_size: i32) -> usize {
        self.x as usize * grid_size as usize + self.y as usize
    }

    pub fn unpack(index: usize, grid_size: i32) -> Self {
        let side = grid_size as usize;
        Self {
            x: (index / side) as i32,
            y: (index % side) as i32,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_clamp() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.clamp(10), Position::new(5, 5));

        let pos = Position::new(-1, 3);
        assert_eq!(pos.clamp(10), Position::new(0, 3));

        let pos = Position::new(10, 12);
        assert_eq!(pos.clamp(10), Position::new(9, 9));

        // A single-cell grid pins everything to the origin
        let pos = Position::new(1, -1);
        assert_eq!(pos.clamp(1), Position::new(0, 0));
    }

    #[test]
    fn test_chebyshev_distance() {
        let pos1 = Position::new(0, 0);
        let pos2 = Position::new(3, 4);
        assert_eq!(pos1.chebyshev_distance(&pos2), 4);
        assert_eq!(pos2.chebyshev_distance(&pos1), 4);
        assert_eq!(pos1.chebyshev_distance(&pos1), 0);
    }

    #[test]
    fn test_pack_unpack() {
        let grid_size = 7;
        for x in 0..grid_size {
            for y in 0..grid_size {
                let pos = Position::new(x, y);
                assert_eq!(Position::unpack(pos.pack(grid_size), grid_size), pos);
            }
        }
        assert_eq!(Position::new(2, 3).pack(7), 17);
    }

    #[test]
    fn test_pack_large_grid() {
        // grid_size^2 exceeds i32::MAX
        let grid_size = 50_000;
        let corner = Position::new(grid_size - 1, grid_size - 1);
        let index = corner.pack(grid_size);
        assert_eq!(index, 2_499_999_999);
        assert_eq!(Position::unpack(index, grid_size), corner);
    }

    #[test]
    fn test_in_bounds() {
        assert!(Position::new(0, 0).in_bounds(3));
        assert!(Position::new(2, 2).in_bounds(3));
        assert!(!Position::new(3, 0).in_bounds(3));
        assert!(!Position::new(0, -1).in_bounds(3));
    }
}
