use crate::Error;

/// One line typed at the prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    NewGame(String, String),
    Move(usize),
    Restart,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  new-game <name1> <name2>   start a game (X moves first)
  move <0-8>                 place your mark, a bare number works too
  restart                    play again with the same names
  help                       show this message
  quit                       leave";

impl Command {
    pub fn parse(line: &str) -> Result<Command, Error> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(Error::MissingArgument("command"));
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "new-game" | "new" | "start" => {
                let name1 = words.next().ok_or(Error::MissingArgument("name1"))?;
                let name2 = words.next().ok_or(Error::MissingArgument("name2"))?;
                Command::NewGame(name1.to_owned(), name2.to_owned())
            }
            "move" | "m" => {
                let index = words.next().ok_or(Error::MissingArgument("index"))?;
                Command::Move(parse_index(index)?)
            }
            "restart" => Command::Restart,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other if other.starts_with(|c: char| c.is_ascii_digit()) => {
                Command::Move(parse_index(other)?)
            }
            other => return Err(Error::UnknownCommand(other.to_owned())),
        };
        Ok(command)
    }
}

fn parse_index(word: &str) -> Result<usize, Error> {
    word.parse::<usize>().map_err(Error::InvalidInteger)
}
