use sodium::{Cell, CellLoop, SodiumCtx, Stream, StreamSink};
use tracing::debug;

use crate::{Board, Error, Game, Status};

#[derive(Clone, Debug)]
enum Input {
    Start(String, String),
    Restart,
    Move(usize),
}

#[derive(Clone, Debug)]
struct Transition {
    game: Game,
    outcome: Result<Status, Error>,
}

impl Transition {
    fn apply(game: &Game, input: &Input) -> Transition {
        debug!(?input, "applying input");
        let mut game = game.clone();
        let outcome = match input {
            Input::Start(name1, name2) => Ok(game.start_game(name1, name2)),
            Input::Restart => Ok(game.restart()),
            Input::Move(index) => game.play_turn(*index),
        };
        Transition { game, outcome }
    }

    fn accepted(&self) -> Option<(Game, Status)> {
        self.outcome
            .as_ref()
            .ok()
            .map(|status| (self.game.clone(), status.clone()))
    }
}

/// A game wired up as a reactive network.
///
/// Views push input through the sinks and listen to the output streams; every
/// accepted input fires exactly one `renders` and one `messages` event, while
/// rejected input fires `errors` and leaves the game as it was.
pub struct Session {
    pub start: StreamSink<(String, String)>,
    pub restart: StreamSink<()>,
    pub moves: StreamSink<usize>,

    pub game: Cell<Game>,
    pub board: Cell<Board>,
    pub status: Cell<Option<Status>>,
    pub renders: Stream<Board>,
    pub messages: Stream<Status>,
    pub errors: Stream<Error>,
}

impl Session {
    pub fn new(ctx: &SodiumCtx) -> Session {
        ctx.transaction(|| {
            let start: StreamSink<(String, String)> = ctx.new_stream_sink();
            let restart: StreamSink<()> = ctx.new_stream_sink();
            let moves: StreamSink<usize> = ctx.new_stream_sink();

            let input_stream = start
                .stream()
                .map(|(name1, name2): &(String, String)| {
                    Input::Start(name1.clone(), name2.clone())
                })
                .or_else(&restart.stream().map(|_: &()| Input::Restart))
                .or_else(&moves.stream().map(|index: &usize| Input::Move(*index)));

            let game_cell_loop: CellLoop<Game> = ctx.new_cell_loop();
            let game_cell_fwd = game_cell_loop.cell();

            let transition_stream = input_stream
                .snapshot(&game_cell_fwd, |input: &Input, game: &Game| {
                    Transition::apply(game, input)
                });

            let accepted_stream = transition_stream
                .map(|transition: &Transition| transition.accepted())
                .filter_option();

            let game_cell = accepted_stream
                .map(|(game, _): &(Game, Status)| game.clone())
                .hold(Game::new());
            game_cell_loop.loop_(&game_cell);

            let renders = accepted_stream.map(|(game, _): &(Game, Status)| *game.board());
            let messages = accepted_stream.map(|(_, status): &(Game, Status)| status.clone());
            let errors = transition_stream
                .map(|transition: &Transition| transition.outcome.clone().err())
                .filter_option();

            let board = renders.hold(Board::new());
            let status = messages
                .map(|status: &Status| Some(status.clone()))
                .hold(None);

            Session {
                start,
                restart,
                moves,
                game: game_cell,
                board,
                status,
                renders,
                messages,
                errors,
            }
        })
    }

    pub fn start_game(&self, name1: &str, name2: &str) {
        self.start.send((name1.to_owned(), name2.to_owned()));
    }

    pub fn restart_game(&self) {
        self.restart.send(());
    }

    pub fn play_turn(&self, index: usize) {
        self.moves.send(index);
    }

    pub fn player_names(&self) -> Option<(String, String)> {
        self.game
            .sample()
            .player_names()
            .map(|(name1, name2)| (name1.to_owned(), name2.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::Mark;

    fn recorder<T: Clone + Send + Sync + 'static>(
        stream: &Stream<T>,
    ) -> (Arc<Mutex<Vec<T>>>, sodium::Listener) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let listener = stream.listen({
            let seen = seen.clone();
            move |value: &T| seen.lock().unwrap().push(value.clone())
        });
        (seen, listener)
    }

    #[test]
    fn start_renders_and_announces() {
        let ctx = SodiumCtx::new();
        let session = Session::new(&ctx);
        let (renders, _l1) = recorder(&session.renders);
        let (messages, _l2) = recorder(&session.messages);

        session.start_game("Alice", "Bob");

        assert_eq!(*renders.lock().unwrap(), vec![Board::new()]);
        assert_eq!(
            messages.lock().unwrap().last().map(ToString::to_string),
            Some("Alice's turn".to_owned())
        );
        assert_eq!(session.status.sample(), Some(Status::Turn("Alice".into())));
    }

    #[test]
    fn rejected_moves_only_fire_errors() {
        let ctx = SodiumCtx::new();
        let session = Session::new(&ctx);
        let (renders, _l1) = recorder(&session.renders);
        let (errors, _l2) = recorder(&session.errors);

        session.play_turn(0);
        session.start_game("Alice", "Bob");
        session.play_turn(4);
        session.play_turn(4);
        session.play_turn(9);

        assert_eq!(
            *errors.lock().unwrap(),
            vec![
                Error::GameNotStarted,
                Error::CellOccupied(4),
                Error::InvalidIndex(9)
            ]
        );
        assert_eq!(renders.lock().unwrap().len(), 2);
        assert_eq!(session.board.sample().get(4), Some(Mark::X));
        assert_eq!(session.game.sample().current_player_index(), 1);
    }

    #[test]
    fn restart_reuses_names() {
        let ctx = SodiumCtx::new();
        let session = Session::new(&ctx);

        session.start_game("Alice", "Bob");
        for index in [0, 3, 1, 4, 2] {
            session.play_turn(index);
        }
        assert_eq!(session.status.sample(), Some(Status::Won("Alice".into())));

        session.restart_game();
        assert_eq!(session.board.sample(), Board::new());
        assert_eq!(session.status.sample(), Some(Status::Turn("Alice".into())));
        assert_eq!(
            session.player_names(),
            Some(("Alice".to_owned(), "Bob".to_owned()))
        );
    }
}
