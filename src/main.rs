use std::io::{self, BufRead, Write};

use clap::Parser;
use sodium::SodiumCtx;
use tracing::{info, warn};

use tictactoe::{
    cli::{self, Options},
    Board, Command, Error, Session, Status, HELP,
};

fn main() -> io::Result<()> {
    let options = Options::parse();
    cli::init_tracing(options.log_file.as_ref(), "warn")?;

    let ctx = SodiumCtx::new();
    let session = Session::new(&ctx);

    let mut listeners = Vec::new();
    listeners.push(
        session
            .renders
            .listen(|board: &Board| println!("\n{}", board)),
    );
    listeners.push(
        session
            .messages
            .listen(|status: &Status| println!("{}", status)),
    );
    listeners.push(session.errors.listen(|err: &Error| println!("{}", err)));

    println!("Welcome to Tic Tac Toe! Type `help` for commands.");
    if let Some((name1, name2)) = options.names() {
        session.start_game(name1, name2);
    }

    let stdin = io::stdin().lock();
    prompt()?;
    for line in stdin.lines() {
        let line = line?;
        if line.trim().is_empty() {
            prompt()?;
            continue;
        }
        match Command::parse(&line) {
            Ok(Command::NewGame(name1, name2)) => session.start_game(&name1, &name2),
            Ok(Command::Move(index)) => session.play_turn(index),
            Ok(Command::Restart) => session.restart_game(),
            Ok(Command::Help) => println!("{}", HELP),
            Ok(Command::Quit) => break,
            Err(err) => {
                warn!(%err, line = %line.trim(), "bad input");
                println!("{}", err);
            }
        }
        prompt()?;
    }

    info!("goodbye");
    Ok(())
}

fn prompt() -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(b"> ")?;
    stdout.flush()
}
