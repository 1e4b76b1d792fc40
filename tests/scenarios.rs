use tictactoe::{Error, Game, Mark, Status, SQUARES};

const WIN_SEQUENCES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

fn play(game: &mut Game, moves: &[usize]) -> Status {
    let mut last = None;
    for &index in moves {
        last = Some(game.play_turn(index).unwrap());
    }
    last.unwrap()
}

#[test]
fn alice_takes_the_top_row() {
    let mut game = Game::new();
    game.start_game("Alice", "Bob");
    let status = play(&mut game, &[0, 3, 1, 4, 2]);

    assert_eq!(status.to_string(), "Alice wins!");
    assert!(!game.is_active());
    let cells: Vec<&str> = game
        .board()
        .snapshot()
        .iter()
        .map(|square| square.map_or("", |mark| mark.as_str()))
        .collect();
    assert_eq!(cells, ["X", "X", "X", "O", "O", "", "", "", ""]);
}

#[test]
fn a_line_on_the_last_move_is_a_win() {
    // X ends up on 0, 2, 4, 7 and 8, closing the 0-4-8 diagonal.
    let mut game = Game::new();
    game.start_game("Alice", "Bob");
    let status = play(&mut game, &[0, 1, 2, 3, 4, 5, 7, 6, 8]);

    assert!(game.board().is_full());
    assert_eq!(status.to_string(), "Alice wins!");
}

#[test]
fn nine_moves_without_a_line_tie() {
    let mut game = Game::new();
    game.start_game("Alice", "Bob");
    let status = play(&mut game, &[0, 1, 2, 4, 3, 5, 7, 6, 8]);

    assert_eq!(status.to_string(), "It's a tie!");
    assert!(!game.is_active());
    assert_eq!(game.play_turn(0), Err(Error::GameAlreadyEnded));
}

/// Fills exactly `line` with the mover's mark while the other player drops
/// marks on squares that cannot complete a line before the mover does.
fn moves_for(line: [usize; 3], winner: usize) -> Vec<usize> {
    let others: Vec<usize> = (0..SQUARES).filter(|i| !line.contains(i)).collect();
    let mut opponent = Vec::new();
    // Pick squares for the other player that don't form a line among themselves.
    for &candidate in &others {
        if opponent.len() == 3 {
            break;
        }
        let mut trial = opponent.clone();
        trial.push(candidate);
        let makes_line = WIN_SEQUENCES
            .iter()
            .any(|seq| seq.iter().all(|i| trial.contains(i)));
        if !makes_line {
            opponent = trial;
        }
    }

    let mut moves = Vec::new();
    if winner == 0 {
        for n in 0..3 {
            moves.push(line[n]);
            if n < 2 {
                moves.push(opponent[n]);
            }
        }
    } else {
        for n in 0..3 {
            moves.push(opponent[n]);
            moves.push(line[n]);
        }
    }
    moves
}

#[test]
fn every_line_wins_for_either_player() {
    for line in WIN_SEQUENCES {
        for (winner, name, mark) in [(0, "Alice", Mark::X), (1, "Bob", Mark::O)] {
            let mut game = Game::new();
            game.start_game("Alice", "Bob");
            let status = play(&mut game, &moves_for(line, winner));

            assert_eq!(status, Status::Won(name.into()), "{:?}", line);
            assert!(!game.is_active());
            for index in line {
                assert_eq!(game.board().get(index), Some(mark));
            }
        }
    }
}

#[test]
fn alternation_follows_move_count() {
    let mut game = Game::new();
    game.start_game("Alice", "Bob");
    for (n, index) in [4, 0, 8, 2, 1, 7].into_iter().enumerate() {
        assert_eq!(game.current_player_index(), n % 2);
        game.play_turn(index).unwrap();
    }
    assert_eq!(game.current_player_index(), 0);
}

#[test]
fn new_game_after_a_win_starts_clean() {
    let mut game = Game::new();
    game.start_game("Alice", "Bob");
    play(&mut game, &[0, 3, 1, 4, 2]);

    let names = game.player_names().map(|(a, b)| (a.to_owned(), b.to_owned()));
    let (name1, name2) = names.unwrap();
    let status = game.start_game(&name1, &name2);

    assert_eq!(status.to_string(), "Alice's turn");
    assert_eq!(game.board().snapshot(), [None; SQUARES]);
    assert_eq!(game.current_player().map(|p| p.mark), Some(Mark::X));
    assert!(!game.board().has_line(Mark::X));
    assert!(!game.board().has_line(Mark::O));
}

#[test]
fn bad_moves_are_reported_not_applied() {
    let mut game = Game::new();
    assert_eq!(game.play_turn(4), Err(Error::GameNotStarted));

    game.start_game("Alice", "Bob");
    assert_eq!(game.play_turn(9), Err(Error::InvalidIndex(9)));
    assert!(!Error::InvalidIndex(9).is_rejection());

    game.play_turn(4).unwrap();
    let err = game.play_turn(4).unwrap_err();
    assert_eq!(err, Error::CellOccupied(4));
    assert!(err.is_rejection());
    assert_eq!(game.current_player_index(), 1);
}
