use std::io::{BufRead, Write};

use anyhow::Context;
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use saper_core::{Board, BoardView, GameConfig, RevealOutcome};

use crate::command::{Command, HELP};
use crate::render::BoardText;

/// Result of one command: whether the display must be redrawn, and the
/// terminal message to show.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Reply {
    pub updated: bool,
    pub message: Option<&'static str>,
}

/// The board currently being played, plus the last snapshot shown to the
/// player.
#[derive(Debug)]
pub struct Session {
    config: GameConfig,
    board: Board,
    view: BoardView,
}

impl Session {
    /// Without a seed one is drawn from the OS, and logged so the game can be
    /// replayed.
    pub fn start(config: GameConfig, seed: Option<u64>) -> saper_core::Result<Self> {
        let board = new_board(config, seed)?;
        let view = BoardView::capture(&board);
        Ok(Self {
            config,
            board,
            view,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn view(&self) -> &BoardView {
        &self.view
    }

    /// Applies one game command. The snapshot is only recaptured when the
    /// board actually changed.
    pub fn execute(&mut self, command: Command) -> saper_core::Result<Reply> {
        let reply = match command {
            Command::Reveal(coords) => {
                let outcome = self.board.reveal(coords)?;
                let message = match outcome {
                    RevealOutcome::HitMine => Some("You hit a mine! Try again."),
                    RevealOutcome::Won => Some("You cleared the board!"),
                    RevealOutcome::Revealed | RevealOutcome::NoOp => None,
                };
                Reply {
                    updated: outcome.has_update(),
                    message,
                }
            }
            Command::Flag(coords) => Reply {
                updated: self.board.toggle_flag(coords)?.has_update(),
                message: None,
            },
            Command::NewGame => {
                self.board = new_board(self.config, None)?;
                Reply {
                    updated: true,
                    message: None,
                }
            }
            Command::Help | Command::Quit => Reply::default(),
        };

        if reply.updated {
            self.refresh();
        } else {
            log::debug!("{:?} changed nothing", command);
        }
        Ok(reply)
    }

    fn refresh(&mut self) {
        let view = BoardView::capture(&self.board);
        let changes = view.changes_since(&self.view);
        log::debug!("{} cells changed: {:?}", changes.len(), changes);
        self.view = view;
    }
}

fn new_board(config: GameConfig, seed: Option<u64>) -> saper_core::Result<Board> {
    let seed = seed.unwrap_or_else(|| SmallRng::from_os_rng().next_u64());
    log::info!(
        "Starting {}x{} game with {} mines, seed {}",
        config.rows,
        config.cols,
        config.mines,
        seed
    );
    Board::with_seed(config, seed)
}

/// Reads commands line by line until `q` or end of input.
pub fn run(session: &mut Session, input: impl BufRead, mut output: impl Write) -> anyhow::Result<()> {
    write!(output, "{}", BoardText(session.view()))?;
    writeln!(output, "{HELP}")?;

    for line in input.lines() {
        let line = line.context("Could not read command")?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(output, "Error: {err}")?;
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => writeln!(output, "{HELP}")?,
            command => match session.execute(command) {
                Ok(reply) => {
                    if reply.updated {
                        write!(output, "{}", BoardText(session.view()))?;
                    }
                    if let Some(message) = reply.message {
                        writeln!(output, "{message}")?;
                    }
                }
                Err(err) => writeln!(output, "Error: {err}")?,
            },
        }
    }

    output.flush()?;
    Ok(())
}
