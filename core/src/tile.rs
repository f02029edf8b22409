use serde::{Deserialize, Serialize};

/// Immutable content of a cell, fixed when the mines are laid out.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    Mine,
    /// Number of mines among the in-bounds neighbours, `0..=8`.
    Clear(u8),
}

impl Tile {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }
}

/// Canonical player-visible state stored by the engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    Hidden,
    Flagged,
    Revealed,
}

impl CellState {
    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged)
    }
}

impl Default for CellState {
    fn default() -> Self {
        Self::Hidden
    }
}
