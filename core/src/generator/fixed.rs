use alloc::vec::Vec;

use super::*;

/// Places mines at known coordinates, for fixtures and replays.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedMineGenerator {
    mines: Vec<Coord2>,
}

impl FixedMineGenerator {
    pub fn new(mines: impl IntoIterator<Item = Coord2>) -> Self {
        Self {
            mines: mines.into_iter().collect(),
        }
    }
}

impl MineGenerator for FixedMineGenerator {
    fn generate(self, config: GameConfig) -> Result<MineLayout> {
        config.validate()?;

        let layout = MineLayout::from_mine_coords(config.size(), &self.mines)?;
        if layout.mine_count() != config.mines {
            log::warn!(
                "Fixed layout has {} distinct mines, requested {}",
                layout.mine_count(),
                config.mines
            );
            return Err(GameError::InvalidConfiguration {
                rows: config.rows,
                cols: config.cols,
                mines: layout.mine_count(),
            });
        }
        Ok(layout)
    }
}
