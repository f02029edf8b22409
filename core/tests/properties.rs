use std::collections::HashSet;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use saper_core::*;

fn brute_force_count(layout: &MineLayout, (row, col): Coord2) -> u8 {
    let (rows, cols) = layout.size();
    let mut count = 0;
    for d_row in -1i16..=1 {
        for d_col in -1i16..=1 {
            if d_row == 0 && d_col == 0 {
                continue;
            }
            let r = row as i16 + d_row;
            let c = col as i16 + d_col;
            if r >= 0 && r < rows as i16 && c >= 0 && c < cols as i16 {
                if layout.contains_mine((r as Coord, c as Coord)) {
                    count += 1;
                }
            }
        }
    }
    count
}

fn all_coords(board: &Board) -> impl Iterator<Item = Coord2> {
    let (rows, cols) = board.size();
    (0..rows).flat_map(move |row| (0..cols).map(move |col| (row, col)))
}

fn assert_exclusive(board: &Board) {
    for coords in all_coords(board) {
        let revealed = board.is_revealed(coords).unwrap();
        let flagged = board.is_flagged(coords).unwrap();
        assert!(!(revealed && flagged), "{coords:?} is revealed and flagged");
    }
}

#[test]
fn mine_count_invariant_holds_for_many_configs() {
    let mut seed = 0;
    for rows in [1u8, 2, 5, 9, 16] {
        for cols in [2u8, 3, 9, 30] {
            let total = rows as CellCount * cols as CellCount;
            for mines in [1, total / 2, total - 1] {
                seed += 1;
                let config = GameConfig::new(rows, cols, mines).unwrap();
                let board = Board::with_seed(config, seed).unwrap();
                let placed = board
                    .mine_layout()
                    .tiles()
                    .iter()
                    .filter(|tile| tile.is_mine())
                    .count();

                assert_eq!(placed, mines as usize, "{config:?}");
                assert_eq!(board.mines_total(), mines);
            }
        }
    }
}

#[test]
fn adjacency_matches_brute_force() {
    let board = Board::with_seed(GameConfig::expert(), 2024).unwrap();
    let layout = board.mine_layout();
    let (rows, cols) = layout.size();

    for row in 0..rows {
        for col in 0..cols {
            match layout[(row, col)] {
                Tile::Mine => {}
                Tile::Clear(count) => {
                    assert_eq!(count, brute_force_count(layout, (row, col)), "({row}, {col})")
                }
            }
        }
    }
}

#[test]
fn reveal_is_monotonic_and_exclusive_under_random_play() {
    let mut rng = SmallRng::seed_from_u64(99);

    for game in 0..50 {
        let mut board = Board::with_seed(GameConfig::beginner(), game).unwrap();
        let mut revealed: HashSet<Coord2> = HashSet::new();

        while !board.is_finished() {
            let coords = (rng.random_range(0..9), rng.random_range(0..9));
            if rng.random_bool(0.3) {
                board.toggle_flag(coords).unwrap();
            } else {
                board.reveal(coords).unwrap();
            }

            for coords in all_coords(&board) {
                if board.is_revealed(coords).unwrap() {
                    revealed.insert(coords);
                }
            }
            for &coords in &revealed {
                assert!(board.is_revealed(coords).unwrap(), "{coords:?} was hidden again");
            }
            assert_exclusive(&board);
        }

        assert!(board.is_game_over() != board.is_game_won());
    }
}

#[test]
fn cascade_covers_zero_region_and_its_border() {
    // Mines only in the bottom-right corner, the zero region reaches every
    // numbered cell.
    //
    //   0 0 0 0 0 0
    //   0 0 0 0 0 0
    //   0 0 0 0 0 0
    //   0 0 0 1 2 2
    //   0 0 0 2 * *
    //   0 0 0 2 * *
    let mines = [(4, 4), (4, 5), (5, 4), (5, 5)];
    let config = GameConfig::new(6, 6, 4).unwrap();
    let mut board = Board::new_game(config, FixedMineGenerator::new(mines)).unwrap();

    let outcome = board.reveal((0, 0)).unwrap();

    assert_eq!(outcome, RevealOutcome::Won);
    for coords in all_coords(&board) {
        assert_eq!(
            board.is_revealed(coords).unwrap(),
            !mines.contains(&coords),
            "{coords:?}"
        );
    }
}

#[test]
fn cascade_stops_at_numbered_border() {
    // a wall of mines down column 2 splits the board
    let mines = [(0, 2), (1, 2), (2, 2), (3, 2)];
    let config = GameConfig::new(4, 6, 4).unwrap();
    let mut board = Board::new_game(config, FixedMineGenerator::new(mines)).unwrap();

    assert_eq!(board.reveal((0, 0)).unwrap(), RevealOutcome::Revealed);

    for row in 0..4 {
        assert!(board.is_revealed((row, 0)).unwrap());
        assert!(board.is_revealed((row, 1)).unwrap());
        for col in 2..6 {
            assert!(!board.is_revealed((row, col)).unwrap(), "({row}, {col})");
        }
    }
    assert_eq!(board.revealed_count(), 8);
}

#[test]
fn cascade_does_not_cross_flags() {
    let config = GameConfig::new(1, 5, 1).unwrap();
    let mut board = Board::new_game(config, FixedMineGenerator::new([(0, 4)])).unwrap();

    board.toggle_flag((0, 1)).unwrap();
    assert_eq!(board.reveal((0, 0)).unwrap(), RevealOutcome::Revealed);

    assert!(board.is_revealed((0, 0)).unwrap());
    assert!(board.is_flagged((0, 1)).unwrap());
    assert!(!board.is_revealed((0, 2)).unwrap());
    assert!(!board.is_revealed((0, 3)).unwrap());
}

#[test]
fn win_flips_on_final_reveal_only() {
    let mut board = Board::with_seed(GameConfig::beginner(), 77).unwrap();
    let safe_cells = board.mine_layout().safe_cell_count();
    let safe: Vec<Coord2> = all_coords(&board)
        .filter(|&coords| !board.mine_layout().contains_mine(coords))
        .collect();

    let mut won = 0;
    for &coords in &safe {
        // cascades open later cells ahead of the loop
        if board.is_revealed(coords).unwrap() {
            continue;
        }
        assert!(!board.is_game_won());
        assert!(!board.is_won());

        let before = board.revealed_count();
        let outcome = board.reveal(coords).unwrap();
        assert!(board.revealed_count() > before);

        if board.revealed_count() == safe_cells {
            assert_eq!(outcome, RevealOutcome::Won);
            won += 1;
        } else {
            assert_eq!(outcome, RevealOutcome::Revealed);
        }
    }

    assert_eq!(won, 1);
    assert!(board.is_game_won());
    assert!(board.is_won());
    assert_eq!(
        board.revealed_count(),
        GameConfig::beginner().total_cells() - GameConfig::beginner().mines
    );
}

#[test]
fn loss_is_terminal() {
    let mut board = Board::with_seed(GameConfig::intermediate(), 5).unwrap();
    let mines: Vec<Coord2> = board.mine_layout().iter_mines().collect();

    assert_eq!(board.reveal(mines[0]).unwrap(), RevealOutcome::HitMine);
    assert!(board.is_game_over());
    for &mine in &mines {
        assert!(board.is_revealed(mine).unwrap());
    }

    let frozen = board.clone();
    for coords in all_coords(&frozen) {
        assert_eq!(board.reveal(coords).unwrap(), RevealOutcome::NoOp);
        assert_eq!(board.toggle_flag(coords).unwrap(), FlagOutcome::NoOp);
    }
    assert_eq!(board, frozen);
}

#[test]
fn loss_keeps_flagged_mines_flagged() {
    let mines = [(0, 0), (0, 4), (3, 4)];
    let config = GameConfig::new(4, 5, 3).unwrap();
    let mut board = Board::new_game(config, FixedMineGenerator::new(mines)).unwrap();
    board.toggle_flag((3, 4)).unwrap();
    board.toggle_flag((2, 2)).unwrap();

    assert_eq!(board.reveal((0, 0)).unwrap(), RevealOutcome::HitMine);

    assert!(board.is_revealed((0, 0)).unwrap());
    assert!(board.is_revealed((0, 4)).unwrap());
    // a flagged cell is never revealed, even a mine after a loss
    assert!(board.is_flagged((3, 4)).unwrap());
    assert!(!board.is_revealed((3, 4)).unwrap());
    assert!(board.is_flagged((2, 2)).unwrap());
    assert_exclusive(&board);
    assert!(!board.is_game_won());

    let view = BoardView::capture(&board);
    assert_eq!(view.cell((0, 0)), Some(CellView::Exploded));
    assert_eq!(view.cell((0, 4)), Some(CellView::Mine));
    assert_eq!(view.cell((3, 4)), Some(CellView::Flagged));
    assert_eq!(view.cell((2, 2)), Some(CellView::WrongFlag));
}

#[test]
fn from_layout_rejects_degenerate_layouts() {
    let empty = MineLayout::from_mine_coords((2, 2), &[]).unwrap();
    let full = MineLayout::from_mine_coords((1, 2), &[(0, 0), (0, 1)]).unwrap();

    assert_eq!(
        Board::from_layout(empty),
        Err(GameError::InvalidConfiguration {
            rows: 2,
            cols: 2,
            mines: 0
        })
    );
    assert_eq!(
        Board::from_layout(full),
        Err(GameError::InvalidConfiguration {
            rows: 1,
            cols: 2,
            mines: 2
        })
    );
}

#[test]
fn flag_counter_example() {
    let mut board = Board::with_seed(GameConfig::intermediate(), 3).unwrap();

    for coords in [(0, 0), (0, 1), (0, 2)] {
        assert_eq!(board.toggle_flag(coords).unwrap(), FlagOutcome::Flagged);
    }
    assert_eq!(board.toggle_flag((0, 1)).unwrap(), FlagOutcome::Unflagged);

    assert_eq!(board.mines_remaining(), 40 - 2);
}

#[test]
fn same_seed_reproduces_layout() {
    let config = GameConfig::expert();
    let a = Board::with_seed(config, 123).unwrap();
    let b = Board::with_seed(config, 123).unwrap();

    assert_eq!(a.mine_layout(), b.mine_layout());
}

#[test]
fn injected_rng_drives_layout() {
    let config = GameConfig::beginner();
    let a = Board::new_game(config, RandomMineGenerator::new(SmallRng::seed_from_u64(8))).unwrap();
    let b = Board::new_game(config, RandomMineGenerator::new(SmallRng::seed_from_u64(8))).unwrap();

    assert_eq!(a, b);
}

#[test]
fn invalid_configurations_are_rejected() {
    for (rows, cols, mines) in [(4, 4, 16), (4, 4, 17), (4, 4, 0), (0, 4, 1)] {
        let config = GameConfig::new_unchecked(rows, cols, mines);
        assert_eq!(
            Board::with_seed(config, 0),
            Err(GameError::InvalidConfiguration { rows, cols, mines })
        );
    }
}

#[test]
fn board_round_trips_through_json() {
    let mut board = Board::with_seed(GameConfig::beginner(), 11).unwrap();
    board.toggle_flag((0, 0)).unwrap();

    let json = serde_json::to_string(&board).unwrap();
    let restored: Board = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, board);
}
