//! Shared planet fixtures for the integration tests.

#![allow(dead_code)]

use graha_map::core::{Direction, Endpoint, Node, Route, Weight};
use graha_map::planet::Planet;
use graha_map::sim::PlanetFile;

use Direction::{East, North, South, West};

pub fn ep(x: i32, y: i32, direction: Direction) -> Endpoint {
    Node::new(x, y).towards(direction)
}

fn build(paths: &[((i32, i32, Direction), (i32, i32, Direction), Weight)]) -> Planet {
    let mut planet = Planet::new();
    for &((sx, sy, sd), (ex, ey, ed), weight) in paths {
        planet.add_path(ep(sx, sy, sd), ep(ex, ey, ed), weight);
    }
    planet
}

/// Route from `(x, y, direction)` steps.
pub fn route(steps: &[(i32, i32, Direction)]) -> Route {
    steps.iter().map(|&(x, y, d)| ep(x, y, d)).collect()
}

/// ```text
///                   2,5-----4,5--+
///         +--+       |           |
///         |  |       +-------+   |
///         +-0,3------+       |   |
///            |       |       |   +
///           0,2-----2,2-3,2-4,2-5,2-----7,2
///            |      /            +       |
///         +-0,1    /             |       |
///         |  |    /              |       |
///         +-0,0-1,0-2,0----------+       |
///                    |                   |
///                    +-------------------+
/// ```
///
/// `5,2 → 7,2` is blocked.
pub fn robolab() -> Planet {
    build(&[
        ((0, 0, North), (0, 1, South), 1),
        ((0, 1, North), (0, 2, South), 1),
        ((0, 2, North), (0, 3, South), 1),
        ((0, 1, West), (0, 0, West), 1),
        ((0, 3, North), (0, 3, West), 1),
        ((0, 0, East), (1, 0, West), 1),
        ((1, 0, East), (2, 0, West), 1),
        ((1, 0, North), (2, 2, South), 1),
        ((0, 2, East), (2, 2, West), 1),
        ((0, 3, East), (2, 2, North), 1),
        ((2, 2, East), (3, 2, West), 1),
        ((3, 2, East), (4, 2, West), 1),
        ((4, 2, East), (5, 2, West), 1),
        ((2, 5, East), (4, 5, West), 3),
        ((5, 2, North), (4, 5, East), 3),
        ((2, 5, South), (4, 2, North), 6),
        ((2, 0, East), (5, 2, South), 999),
        ((7, 2, West), (5, 2, East), -1),
        ((7, 2, South), (2, 0, South), 653),
    ])
}

/// Two islands; `2,0 → 2,2` is blocked.
pub fn not_reachable() -> Planet {
    build(&[
        ((0, 0, East), (0, 1, East), 1),
        ((0, 0, West), (0, 1, West), 1),
        ((0, 3, North), (0, 3, West), 1),
        ((0, 3, East), (2, 2, North), 1),
        ((2, 0, North), (2, 2, South), -1),
    ])
}

/// ```text
///         0,2------+       +--+
///          |       |       |  |
///         0,1-----2,1-----4,1-+
///          |       |       |
///         0,0-----2,0-----4,0
///          |       |       |
///         0,-1----2,-1----4,-1
/// ```
///
/// Both paths into `0,2` are blocked.
pub fn with_loops() -> Planet {
    build(&[
        ((0, 1, East), (2, 1, West), 1),
        ((2, 1, East), (4, 1, West), 1),
        ((0, 0, East), (2, 0, West), 1),
        ((2, 0, East), (4, 0, West), 1),
        ((0, -1, East), (2, -1, West), 1),
        ((2, -1, East), (4, -1, West), 1),
        ((0, -1, North), (0, 0, South), 1),
        ((2, -1, North), (2, 0, South), 1),
        ((4, -1, North), (4, 0, South), 3),
        ((0, 0, North), (0, 1, South), 1),
        ((2, 0, North), (2, 1, South), 1),
        ((4, 0, North), (4, 1, South), 1),
        ((4, 1, North), (4, 1, East), 1),
        ((0, 1, North), (0, 2, South), -1),
        ((2, 1, North), (0, 2, East), -1),
    ])
}

/// The RoboLab planet as a mission file, starting at `0,0` facing north.
pub fn robolab_file() -> PlanetFile {
    PlanetFile::from_planet("RoboLab", ep(0, 0, North), &robolab())
}
