use crate::grid::{HEIGHT, WIDTH};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Right,
    Down,
    Left,
    Up,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
    ];

    /// (dx, dy) with y growing downward.
    pub fn delta(self) -> (i64, i64) {
        match self {
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Up => (0, -1),
        }
    }

    /// Moves `(x, y)` one cell, wrapping each axis independently.
    pub fn step(self, (x, y): (usize, usize)) -> (usize, usize) {
        let (dx, dy) = self.delta();
        (
            (x as i64 + dx).rem_euclid(WIDTH as i64) as usize,
            (y as i64 + dy).rem_euclid(HEIGHT as i64) as usize,
        )
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Up => "up",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_wrap_on_every_edge() {
        assert_eq!(Direction::Right.step((WIDTH - 1, 3)), (0, 3));
        assert_eq!(Direction::Left.step((0, 3)), (WIDTH - 1, 3));
        assert_eq!(Direction::Down.step((7, HEIGHT - 1)), (7, 0));
        assert_eq!(Direction::Up.step((7, 0)), (7, HEIGHT - 1));
    }

    #[test]
    fn interior_steps_follow_delta() {
        for dir in Direction::ALL {
            let (dx, dy) = dir.delta();
            let (x, y) = dir.step((10, 10));
            assert_eq!((x as i64 - 10, y as i64 - 10), (dx, dy));
        }
    }
}
