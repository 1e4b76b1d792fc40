use std::num::ParseIntError;

use thiserror::Error;

mod board;
pub mod cli;
mod command;
mod game;
mod session;

pub use board::{Board, Mark, SQUARES};
pub use command::{Command, HELP};
pub use game::{Game, Player, Status, DEFAULT_NAMES};
pub use session::Session;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid move: square {0} is already taken!")]
    CellOccupied(usize),

    #[error("invalid index: {0}!")]
    InvalidIndex(usize),

    #[error("no game has been started yet!")]
    GameNotStarted,

    #[error("the game is over, start a new one!")]
    GameAlreadyEnded,

    #[error("invalid input: {0}!")]
    InvalidInteger(ParseIntError),

    #[error("unknown command: {0}!")]
    UnknownCommand(String),

    #[error("missing argument: {0}!")]
    MissingArgument(&'static str),
}

impl Error {
    /// Moves that were refused by the rules, as opposed to bad input.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Error::CellOccupied(_) | Error::GameNotStarted | Error::GameAlreadyEnded
        )
    }
}
