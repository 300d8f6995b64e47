//! Cardinal exit directions of a grid node.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Error;

/// Exit direction from a node.
///
/// Encoded on the wire as integer degrees, clockwise from north.
/// Variants are ordered `North < East < South < West`, which is also the
/// order the planner relaxes neighbours in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum Direction {
    /// 0°
    North,
    /// 90°
    East,
    /// 180°
    South,
    /// 270°
    West,
}

impl Direction {
    /// All four directions in ascending order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Wire encoding in degrees.
    #[inline]
    pub fn degrees(self) -> i32 {
        match self {
            Direction::North => 0,
            Direction::East => 90,
            Direction::South => 180,
            Direction::West => 270,
        }
    }

    /// Decode from degrees. Only exact multiples in `{0, 90, 180, 270}` are valid.
    #[inline]
    pub fn from_degrees(degrees: i32) -> Option<Self> {
        match degrees {
            0 => Some(Direction::North),
            90 => Some(Direction::East),
            180 => Some(Direction::South),
            270 => Some(Direction::West),
            _ => None,
        }
    }

    /// Direction rotated by 180°.
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }
}

impl TryFrom<i32> for Direction {
    type Error = Error;

    fn try_from(degrees: i32) -> Result<Self, Self::Error> {
        Direction::from_degrees(degrees).ok_or(Error::InvalidDirection(degrees))
    }
}

impl From<Direction> for i32 {
    fn from(direction: Direction) -> Self {
        direction.degrees()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "N",
            Direction::East => "E",
            Direction::South => "S",
            Direction::West => "W",
        };
        f.write_str(name)
    }
}
