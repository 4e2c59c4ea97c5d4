use crate::direction::Direction;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the direction chosen by `?`.
pub trait RandomSource {
    fn next_direction(&mut self) -> Direction;
}

/// Uniform choice over the four cardinal directions.
#[derive(Clone, Debug)]
pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl Default for StdRandom {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RandomSource for StdRandom {
    fn next_direction(&mut self) -> Direction {
        Direction::ALL[self.rng.gen_range(0..Direction::ALL.len())]
    }
}

/// Replays a fixed cycle of directions; useful for deterministic runs.
#[derive(Clone, Debug)]
pub struct ScriptedRandom {
    script: Vec<Direction>,
    cursor: usize,
}

impl ScriptedRandom {
    /// An empty script always yields the default direction.
    pub fn new(script: impl IntoIterator<Item = Direction>) -> Self {
        Self {
            script: script.into_iter().collect(),
            cursor: 0,
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn next_direction(&mut self) -> Direction {
        if self.script.is_empty() {
            return Direction::default();
        }
        let dir = self.script[self.cursor % self.script.len()];
        self.cursor = self.cursor.wrapping_add(1);
        dir
    }
}

impl<T: RandomSource + ?Sized> RandomSource for Box<T> {
    fn next_direction(&mut self) -> Direction {
        (**self).next_direction()
    }
}
