//! Line-oriented input parsing.
//!
//! A terminal cannot see individual key presses without raw mode, so the
//! keyboard triggers map onto lines: pressing Enter submits an empty line
//! and pressing Space then Enter submits a blank one. Both draw.

use thiserror::Error;

/// A user action decoded from one input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Start a draw.
    Draw,
    /// Clear history and cancel any spin.
    Reset,
    /// Replace the "From" bound.
    SetFrom(i32),
    /// Replace the "To" bound.
    SetTo(i32),
    /// Replace both bounds.
    SetRange(i32, i32),
    /// Cycle the backdrop mood.
    NextMood,
    /// Print the current state as JSON.
    State,
    /// Print usage.
    Help,
    /// Leave the program.
    Quit,
}

/// Why a line could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// The first word is not a known command.
    #[error("unknown command `{0}`, type `help` for the list")]
    UnknownCommand(String),

    /// An argument is not an integer.
    #[error("`{0}` is not a whole number")]
    InvalidNumber(String),

    /// A command is missing an argument.
    #[error("`{command}` expects {expected}")]
    MissingArgument {
        /// The command as typed.
        command: &'static str,
        /// Description of the missing argument.
        expected: &'static str,
    },
}

/// Usage text printed by `help`.
pub const HELP: &str = "\
Enter or Space   draw a number
from N           set the lower bound
to N             set the upper bound
range A B        set both bounds
reset | clear    clear history
mood             change the backdrop
state            print the current state as JSON
quit | exit      leave";

/// Decodes one line of input.
///
/// # Errors
///
/// Returns `InputError` when the command is unknown or its arguments are
/// missing or not integers.
pub fn parse_line(line: &str) -> Result<Action, InputError> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(Action::Draw);
    };

    match command.to_ascii_lowercase().as_str() {
        "draw" | "go" => Ok(Action::Draw),
        "reset" | "clear" => Ok(Action::Reset),
        "from" => Ok(Action::SetFrom(number(words.next(), "from", "a number")?)),
        "to" => Ok(Action::SetTo(number(words.next(), "to", "a number")?)),
        "range" => {
            let from = number(words.next(), "range", "two numbers")?;
            let to = number(words.next(), "range", "two numbers")?;
            Ok(Action::SetRange(from, to))
        }
        "mood" => Ok(Action::NextMood),
        "state" => Ok(Action::State),
        "help" | "?" => Ok(Action::Help),
        "quit" | "exit" | "q" => Ok(Action::Quit),
        _ => Err(InputError::UnknownCommand(command.to_owned())),
    }
}

fn number(
    word: Option<&str>,
    command: &'static str,
    expected: &'static str,
) -> Result<i32, InputError> {
    let word = word.ok_or(InputError::MissingArgument { command, expected })?;
    word.parse()
        .map_err(|_| InputError::InvalidNumber(word.to_owned()))
}
