use std::fmt;

use saper_core::{BoardView, CellView};

pub fn glyph(cell: CellView) -> char {
    match cell {
        CellView::Hidden => '#',
        CellView::Flagged => 'F',
        CellView::Open(0) => '.',
        CellView::Open(count) => char::from(b'0' + count),
        CellView::Mine => '*',
        CellView::Exploded => 'X',
        CellView::WrongFlag => 'x',
    }
}

/// Text rendering of a snapshot: counter and status line, then the grid with
/// row and column indices.
pub struct BoardText<'a>(pub &'a BoardView);

impl fmt::Display for BoardText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.0;
        let (_, cols) = view.size();

        writeln!(
            f,
            "Mines: {}   {}",
            view.mines_remaining(),
            view.status().message()
        )?;

        write!(f, "   ")?;
        for col in 0..cols {
            write!(f, "{col:>3}")?;
        }
        writeln!(f)?;

        for (row, cells) in view.cells().rows().into_iter().enumerate() {
            write!(f, "{row:>3}")?;
            for &cell in cells {
                write!(f, "{:>3}", glyph(cell))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use saper_core::{Board, MineLayout};

    fn board(size: (u8, u8), mines: &[(u8, u8)]) -> Board {
        Board::from_layout(MineLayout::from_mine_coords(size, mines).unwrap()).unwrap()
    }

    #[test]
    fn glyphs_cover_every_view() {
        assert_eq!(glyph(CellView::Open(0)), '.');
        assert_eq!(glyph(CellView::Open(3)), '3');
        assert_eq!(glyph(CellView::Open(8)), '8');
        assert_eq!(glyph(CellView::Exploded), 'X');
    }

    #[test]
    fn renders_fresh_board() {
        let view = BoardView::capture(&board((2, 3), &[(0, 0)]));

        assert_eq!(
            BoardText(&view).to_string(),
            "Mines: 1   Good luck!\n\
             \x20    0  1  2\n\
             \x20 0  #  #  #\n\
             \x20 1  #  #  #\n"
        );
    }

    #[test]
    fn renders_lost_board() {
        let mut board = board((2, 2), &[(0, 0)]);
        board.toggle_flag((1, 1)).unwrap();
        board.reveal((0, 1)).unwrap();
        board.reveal((0, 0)).unwrap();

        let text = BoardText(&BoardView::capture(&board)).to_string();

        assert!(text.starts_with("Mines: 0   BOOM! You lost!\n"));
        assert!(text.contains("  0  X  1\n"));
        assert!(text.contains("  1  #  x\n"));
    }
}
