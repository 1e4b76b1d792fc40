use std::fmt;

use tracing::{debug, info, warn};

use crate::{Board, Error, Mark, SQUARES};

pub const DEFAULT_NAMES: [&str; 2] = ["Player 1", "Player 2"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub mark: Mark,
}

/// What the players should be told after a transition.
///
/// The `Display` impl is the status line shown to the players.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Turn(String),
    Won(String),
    Tie,
}

impl Status {
    pub fn is_over(&self) -> bool {
        !matches!(self, Status::Turn(_))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Turn(name) => write!(f, "{}'s turn", name),
            Status::Won(name) => write!(f, "{} wins!", name),
            Status::Tie => f.write_str("It's a tie!"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Ending {
    Winner(usize),
    Tie,
}

/// Turn order and end-of-game detection for a pair of players.
///
/// Nothing can be played until [`Game::start_game`] has been called once.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Game {
    board: Board,
    players: Option<[Player; 2]>,
    current: usize,
    active: bool,
    ending: Option<Ending>,
}

impl Game {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a fresh game, whatever state the previous one was left in.
    ///
    /// The first player always plays `X`. Blank names fall back to
    /// [`DEFAULT_NAMES`].
    pub fn start_game(&mut self, name1: &str, name2: &str) -> Status {
        let names = [
            non_blank(name1, DEFAULT_NAMES[0]),
            non_blank(name2, DEFAULT_NAMES[1]),
        ];
        match self.players.as_mut() {
            Some(players) => {
                for (player, name) in players.iter_mut().zip(names) {
                    player.name = name;
                }
            }
            None => {
                let [name1, name2] = names;
                self.players = Some([
                    Player {
                        name: name1,
                        mark: Mark::X,
                    },
                    Player {
                        name: name2,
                        mark: Mark::O,
                    },
                ]);
            }
        }

        self.board.reset();
        self.current = 0;
        self.active = true;
        self.ending = None;

        let status = self.turn_status();
        info!(%status, "game started");
        status
    }

    /// Starts again with the names of the last game.
    pub fn restart(&mut self) -> Status {
        let (name1, name2) = self
            .player_names()
            .map(|(a, b)| (a.to_owned(), b.to_owned()))
            .unwrap_or_else(|| (DEFAULT_NAMES[0].to_owned(), DEFAULT_NAMES[1].to_owned()));
        self.start_game(&name1, &name2)
    }

    /// Places the current player's mark at `index` and advances the game.
    ///
    /// A rejected move leaves the game untouched.
    pub fn play_turn(&mut self, index: usize) -> Result<Status, Error> {
        let result = self.try_play_turn(index);
        if let Err(err) = &result {
            warn!(index, %err, "move rejected");
        }
        result
    }

    fn try_play_turn(&mut self, index: usize) -> Result<Status, Error> {
        if index >= SQUARES {
            return Err(Error::InvalidIndex(index));
        }
        let Some(players) = self.players.as_ref() else {
            return Err(Error::GameNotStarted);
        };
        let mark = players[self.current].mark;
        if !self.active {
            return Err(Error::GameAlreadyEnded);
        }
        if !self.board.place(index, mark)? {
            return Err(Error::CellOccupied(index));
        }
        debug!(index, %mark, "mark placed");

        // Only the mover can have completed a line.
        if self.board.has_line(mark) {
            self.finish(Ending::Winner(self.current));
        } else if self.board.is_full() {
            self.finish(Ending::Tie);
        } else {
            self.current = 1 - self.current;
        }
        Ok(self.status_or_turn())
    }

    fn finish(&mut self, ending: Ending) {
        self.active = false;
        self.ending = Some(ending);
        info!(status = %self.status_or_turn(), "game over");
    }

    pub fn player_names(&self) -> Option<(&str, &str)> {
        self.players
            .as_ref()
            .map(|[p1, p2]| (p1.name.as_str(), p2.name.as_str()))
    }

    pub fn players(&self) -> Option<&[Player; 2]> {
        self.players.as_ref()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player_index(&self) -> usize {
        self.current
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.players.as_ref().map(|players| &players[self.current])
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// `None` until the first game has been started.
    pub fn status(&self) -> Option<Status> {
        self.players.as_ref().map(|_| self.status_or_turn())
    }

    fn status_or_turn(&self) -> Status {
        match &self.ending {
            Some(Ending::Winner(index)) => Status::Won(self.name_of(*index)),
            Some(Ending::Tie) => Status::Tie,
            None => self.turn_status(),
        }
    }

    fn turn_status(&self) -> Status {
        Status::Turn(self.name_of(self.current))
    }

    fn name_of(&self, index: usize) -> String {
        self.players
            .as_ref()
            .map(|players| players[index].name.clone())
            .unwrap_or_default()
    }
}

fn non_blank(name: &str, default: &str) -> String {
    if name.trim().is_empty() {
        default.to_owned()
    } else {
        name.to_owned()
    }
}
