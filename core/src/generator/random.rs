use ndarray::Array2;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::Rng;

use super::*;

/// Uniform placement by rejection sampling: draw a random cell, draw again if
/// it already holds a mine, stop once every mine is placed.
#[derive(Clone, Debug)]
pub struct RandomMineGenerator<R> {
    rng: R,
}

impl<R: Rng> RandomMineGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomMineGenerator<SmallRng> {
    /// Reproducible layouts, the same seed always yields the same mines.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }

    pub fn from_os_rng() -> Self {
        Self::new(SmallRng::from_os_rng())
    }
}

impl<R: Rng> MineGenerator for RandomMineGenerator<R> {
    fn generate(mut self, config: GameConfig) -> Result<MineLayout> {
        // terminates almost surely because at least one cell stays free
        config.validate()?;

        let mut mines: Array2<bool> = Array2::default(config.size().to_nd_index());
        let mut mines_placed: CellCount = 0;
        let mut rejected: u32 = 0;

        while mines_placed < config.mines {
            let row = self.rng.random_range(0..config.rows);
            let col = self.rng.random_range(0..config.cols);
            let cell = &mut mines[(row, col).to_nd_index()];
            if *cell {
                rejected += 1;
                continue;
            }
            *cell = true;
            mines_placed += 1;
        }

        log::debug!(
            "Placed {} mines on {}x{}, {} samples rejected",
            mines_placed,
            config.rows,
            config.cols,
            rejected
        );
        MineLayout::from_mine_mask(&mines)
    }
}
