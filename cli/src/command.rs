use minestake_core::{CellCount, CellIndex, GRID_SIZE, coords_to_index};
use std::str::FromStr;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Bet is kept as typed, the engine decides whether it is valid
    Start {
        bet: String,
        mines: Option<CellCount>,
    },
    Reveal(CellIndex),
    CashOut,
    Replay {
        seed: u64,
        bet: String,
        mines: CellCount,
    },
    Board,
    Balance,
    History,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command `{0}`, type `help` for a list")]
    Unknown(String),
    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),
    #[error("`{0}` is not a valid number")]
    InvalidNumber(String),
    #[error("Cell ({0}, {1}) is not on the board")]
    OffBoard(u8, u8),
    #[error("Too many arguments")]
    TooManyArguments,
}

pub const HELP: &str = "\
Commands:
  start <bet> [mines]         place a bet and deal a new board
  reveal <index>              reveal a cell by index (0-24, row by row)
  reveal <row> <col>          reveal a cell by position
  cashout                     take the current winnings
  replay <seed> <bet> <mines> play the board generated from a recorded seed
  board                       show the board
  balance                     show the balance
  history                     list finished rounds
  help                        show this list
  quit                        leave";

fn number<T: FromStr>(arg: &str) -> Result<T, CommandError> {
    arg.parse()
        .map_err(|_| CommandError::InvalidNumber(arg.to_string()))
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        use Command::*;

        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(CommandError::MissingArgument("command"));
        };
        let args: Vec<&str> = words.collect();

        let command = match (name.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("start" | "s" | "bet", []) => return Err(CommandError::MissingArgument("bet")),
            ("start" | "s" | "bet", [bet]) => Start {
                bet: bet.to_string(),
                mines: None,
            },
            ("start" | "s" | "bet", [bet, mines]) => Start {
                bet: bet.to_string(),
                mines: Some(number(mines)?),
            },
            ("reveal" | "r", []) => return Err(CommandError::MissingArgument("cell")),
            ("reveal" | "r", [index]) => Reveal(number(index)?),
            ("reveal" | "r", [row, col]) => {
                let (row, col) = (number(row)?, number(col)?);
                Reveal(coords_to_index((row, col)).ok_or(CommandError::OffBoard(row, col))?)
            }
            ("replay", [seed, bet, mines]) => Replay {
                seed: number(seed)?,
                bet: bet.to_string(),
                mines: number(mines)?,
            },
            ("replay", [_] | [_, _] | []) => {
                return Err(CommandError::MissingArgument("seed, bet and mines"));
            }
            ("cashout" | "cash" | "c", []) => CashOut,
            ("board" | "b", []) => Board,
            ("balance", []) => Balance,
            ("history" | "h", []) => History,
            ("help" | "?", []) => Help,
            ("quit" | "exit" | "q", []) => Quit,
            (
                "start" | "s" | "bet" | "reveal" | "r" | "replay" | "cashout" | "cash" | "c"
                | "board" | "b" | "balance" | "history" | "h" | "help" | "?" | "quit" | "exit"
                | "q",
                _,
            ) => return Err(CommandError::TooManyArguments),
            _ => return Err(CommandError::Unknown(name.to_string())),
        };

        if let Reveal(index) = command {
            if index >= GRID_SIZE {
                return Err(CommandError::InvalidNumber(index.to_string()));
            }
        }
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_start_with_and_without_mines() {
        assert_eq!(
            "start 50 5".parse::<Command>(),
            Ok(Command::Start {
                bet: "50".into(),
                mines: Some(5)
            })
        );
        assert_eq!(
            "S 12.5".parse::<Command>(),
            Ok(Command::Start {
                bet: "12.5".into(),
                mines: None
            })
        );
        assert_eq!(
            "start".parse::<Command>(),
            Err(CommandError::MissingArgument("bet"))
        );
    }

    #[test]
    fn reveal_accepts_index_or_position() {
        assert_eq!("reveal 7".parse::<Command>(), Ok(Command::Reveal(7)));
        assert_eq!("r 1 2".parse::<Command>(), Ok(Command::Reveal(7)));
        assert_eq!("r 4 4".parse::<Command>(), Ok(Command::Reveal(24)));
        assert_eq!(
            "r 5 0".parse::<Command>(),
            Err(CommandError::OffBoard(5, 0))
        );
        assert_eq!(
            "r x".parse::<Command>(),
            Err(CommandError::InvalidNumber("x".into()))
        );
    }

    #[test]
    fn off_board_index_is_rejected_before_the_engine() {
        assert_eq!(
            "reveal 25".parse::<Command>(),
            Err(CommandError::InvalidNumber("25".into()))
        );
    }

    #[test]
    fn parses_replay() {
        assert_eq!(
            "replay 42 10 3".parse::<Command>(),
            Ok(Command::Replay {
                seed: 42,
                bet: "10".into(),
                mines: 3
            })
        );
        assert!("replay 42".parse::<Command>().is_err());
    }

    #[test]
    fn rejects_unknown_and_extra_arguments() {
        assert_eq!(
            "dance".parse::<Command>(),
            Err(CommandError::Unknown("dance".into()))
        );
        assert_eq!(
            "cashout now".parse::<Command>(),
            Err(CommandError::TooManyArguments)
        );
        assert_eq!("".parse::<Command>(), Err(CommandError::MissingArgument("command")));
    }
}
