use rand::prelude::*;

use super::*;

/// Uniform picker backed by a small, fast, seedable generator.
#[derive(Clone, Debug)]
pub struct RandomPicker {
    rng: SmallRng,
}

impl RandomPicker {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Seeds from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }
}

impl CellPicker for RandomPicker {
    fn pick(&mut self, (rows, cols): Coord2) -> Coord2 {
        (self.rng.random_range(0..rows), self.rng.random_range(0..cols))
    }
}
