use alloc::vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Lost,
    Won,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Lost | Self::Won)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::Playing
    }
}

/// One game session: the mine layout plus everything the player has done to
/// it so far.
///
/// All mutation goes through [`Board::reveal`] and [`Board::toggle_flag`].
/// Once the status is [`GameStatus::Lost`] or [`GameStatus::Won`] both become
/// no-ops. Starting over means building a new `Board`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    mine_layout: MineLayout,
    cells: Array2<CellState>,
    revealed_count: CellCount,
    flagged_count: CellCount,
    status: GameStatus,
    triggered_mine: Option<Coord2>,
}

impl Board {
    /// Validates `config` before anything is allocated, then lays out the
    /// mines with `generator`.
    pub fn new_game(config: GameConfig, generator: impl MineGenerator) -> Result<Self> {
        config.validate()?;
        let mine_layout = generator.generate(config)?;
        log::debug!(
            "New game {}x{} with {} mines",
            config.rows,
            config.cols,
            config.mines
        );
        Self::from_layout(mine_layout)
    }

    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        Self::new_game(config, RandomMineGenerator::from_seed(seed))
    }

    pub fn random(config: GameConfig) -> Result<Self> {
        Self::new_game(config, RandomMineGenerator::from_os_rng())
    }

    /// Fails with [`GameError::InvalidConfiguration`] unless the layout holds
    /// at least one mine and at least one safe cell.
    pub fn from_layout(mine_layout: MineLayout) -> Result<Self> {
        mine_layout.game_config().validate()?;

        let size = mine_layout.size();
        Ok(Self {
            mine_layout,
            cells: Array2::default(size.to_nd_index()),
            revealed_count: 0,
            flagged_count: 0,
            status: GameStatus::default(),
            triggered_mine: None,
        })
    }

    pub fn config(&self) -> GameConfig {
        self.mine_layout.game_config()
    }

    pub fn size(&self) -> Coord2 {
        self.mine_layout.size()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.status, GameStatus::Lost)
    }

    pub fn is_game_won(&self) -> bool {
        matches!(self.status, GameStatus::Won)
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn mines_total(&self) -> CellCount {
        self.mine_layout.mine_count()
    }

    /// Player-facing hint: total mines minus placed flags. Goes negative when
    /// the player places more flags than there are mines.
    pub fn mines_remaining(&self) -> i32 {
        i32::from(self.mine_layout.mine_count()) - i32::from(self.flagged_count)
    }

    /// Number of safe cells revealed so far.
    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn mine_layout(&self) -> &MineLayout {
        &self.mine_layout
    }

    pub fn cell_state(&self, coords: Coord2) -> Result<CellState> {
        let coords = self.mine_layout.validate_coords(coords)?;
        Ok(self.cells[coords.to_nd_index()])
    }

    pub fn tile_at(&self, coords: Coord2) -> Result<Tile> {
        let coords = self.mine_layout.validate_coords(coords)?;
        Ok(self.mine_layout[coords])
    }

    pub fn is_revealed(&self, coords: Coord2) -> Result<bool> {
        self.cell_state(coords).map(CellState::is_revealed)
    }

    pub fn is_flagged(&self, coords: Coord2) -> Result<bool> {
        self.cell_state(coords).map(CellState::is_flagged)
    }

    /// True when every cell without a mine has been revealed.
    pub fn is_won(&self) -> bool {
        self.revealed_count == self.mine_layout.safe_cell_count()
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.mine_layout.validate_coords(coords)?;

        if self.status.is_finished() || self.cells[coords.to_nd_index()] != CellState::Hidden {
            return Ok(RevealOutcome::NoOp);
        }

        match self.mine_layout[coords] {
            Tile::Mine => {
                self.cells[coords.to_nd_index()] = CellState::Revealed;
                self.triggered_mine = Some(coords);
                self.status = GameStatus::Lost;
                self.reveal_hidden_mines();
                log::info!("Mine hit at {:?}", coords);
                Ok(RevealOutcome::HitMine)
            }
            Tile::Clear(adjacent_mines) => {
                self.open_clear_cell(coords, adjacent_mines);

                if self.is_won() {
                    self.status = GameStatus::Won;
                    log::info!("Board cleared");
                    Ok(RevealOutcome::Won)
                } else {
                    Ok(RevealOutcome::Revealed)
                }
            }
        }
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        use CellState::*;

        let coords = self.mine_layout.validate_coords(coords)?;
        if self.status.is_finished() {
            return Ok(FlagOutcome::NoOp);
        }

        let cell = &mut self.cells[coords.to_nd_index()];
        Ok(match *cell {
            Hidden => {
                *cell = Flagged;
                self.flagged_count += 1;
                FlagOutcome::Flagged
            }
            Flagged => {
                *cell = Hidden;
                self.flagged_count -= 1;
                FlagOutcome::Unflagged
            }
            Revealed => FlagOutcome::NoOp,
        })
    }

    /// Reveals `start` and, when it has no adjacent mines, cascades through
    /// the connected zero region and its numbered border.
    fn open_clear_cell(&mut self, start: Coord2, adjacent_mines: u8) {
        self.mark_revealed(start);
        if adjacent_mines != 0 {
            return;
        }

        // a cell is marked revealed before it is pushed, so it is pushed once
        let mut pending = vec![start];
        while let Some(coords) = pending.pop() {
            for neighbor in self.mine_layout.iter_neighbors(coords) {
                if self.cells[neighbor.to_nd_index()] != CellState::Hidden {
                    continue;
                }
                // neighbours of a zero cell are never mines
                let Tile::Clear(count) = self.mine_layout[neighbor] else {
                    continue;
                };
                self.mark_revealed(neighbor);
                if count == 0 {
                    pending.push(neighbor);
                }
            }
        }

        log::debug!(
            "Cascade from {:?}, {} safe cells revealed in total",
            start,
            self.revealed_count
        );
    }

    fn mark_revealed(&mut self, coords: Coord2) {
        self.cells[coords.to_nd_index()] = CellState::Revealed;
        self.revealed_count += 1;
    }

    /// Flagged mines keep their flag, a cell is never both flagged and
    /// revealed.
    fn reveal_hidden_mines(&mut self) {
        for (cell, tile) in self.cells.iter_mut().zip(self.mine_layout.tiles().iter()) {
            if tile.is_mine() && *cell == CellState::Hidden {
                *cell = CellState::Revealed;
            }
        }
    }
}
