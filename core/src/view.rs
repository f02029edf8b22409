use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// What a front end draws for a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Open(u8),
    /// Uncovered after a loss.
    Mine,
    /// The mine that ended the game.
    Exploded,
    /// A flag on a safe cell, only shown after a loss.
    WrongFlag,
}

impl CellView {
    pub fn of(board: &Board, coords: Coord2) -> Result<Self> {
        let state = board.cell_state(coords)?;
        let tile = board.tile_at(coords)?;

        Ok(match (state, tile) {
            (CellState::Hidden, _) => Self::Hidden,
            (CellState::Flagged, Tile::Clear(_)) if board.is_game_over() => Self::WrongFlag,
            (CellState::Flagged, _) => Self::Flagged,
            (CellState::Revealed, Tile::Clear(count)) => Self::Open(count),
            (CellState::Revealed, Tile::Mine) if board.triggered_mine() == Some(coords) => {
                Self::Exploded
            }
            (CellState::Revealed, Tile::Mine) => Self::Mine,
        })
    }
}

impl GameStatus {
    /// Status line shown next to the mines counter.
    pub const fn message(self) -> &'static str {
        match self {
            Self::Playing => "Good luck!",
            Self::Lost => "BOOM! You lost!",
            Self::Won => "Congratulations! You won!",
        }
    }
}

/// Snapshot of everything a front end renders, taken after each move.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardView {
    cells: Array2<CellView>,
    mines_remaining: i32,
    status: GameStatus,
}

impl BoardView {
    pub fn capture(board: &Board) -> Self {
        let (rows, cols) = board.size();
        let mut cells = Array2::from_elem((rows as usize, cols as usize), CellView::Hidden);

        for row in 0..rows {
            for col in 0..cols {
                // coordinates come from the board's own size
                if let Ok(view) = CellView::of(board, (row, col)) {
                    cells[(row, col).to_nd_index()] = view;
                }
            }
        }

        Self {
            cells,
            mines_remaining: board.mines_remaining(),
            status: board.status(),
        }
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn cell(&self, coords: Coord2) -> Option<CellView> {
        self.cells.get(coords.to_nd_index()).copied()
    }

    pub fn cells(&self) -> &Array2<CellView> {
        &self.cells
    }

    pub fn mines_remaining(&self) -> i32 {
        self.mines_remaining
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Cells whose view differs from `previous`. A snapshot of a board with a
    /// different size counts as entirely changed.
    pub fn changes_since(&self, previous: &BoardView) -> Vec<(Coord2, CellView)> {
        let same_size = previous.cells.dim() == self.cells.dim();

        self.cells
            .indexed_iter()
            .filter(|&(index, view)| !same_size || previous.cells[index] != *view)
            .map(|((row, col), &view)| ((row as Coord, col as Coord), view))
            .collect()
    }
}
