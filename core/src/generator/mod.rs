use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Strategy for laying out the mines of a new game.
pub trait MineGenerator {
    /// Must return a layout with exactly `config.mines` mines on a
    /// `config.rows` x `config.cols` board, or fail without side effects.
    fn generate(self, config: GameConfig) -> Result<MineLayout>;
}
