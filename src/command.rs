//! Line commands read by the headless driver.
//!
//! One command per line, words separated by whitespace:
//!
//! ```text
//! tool pencil
//! add circle
//! down 110 105
//! move 200 150
//! up 200 150
//! text hello world
//! resize 1024
//! list
//! render
//! ```

#[cfg(test)]
#[path = "command_test.rs"]
mod command_test;

use std::str::FromStr;

use crate::doc::{Point, QuickShape, UnknownVariant};
use crate::input::Tool;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`")]
    Unknown(String),
    #[error("`{command}` needs {expected}")]
    MissingArgument { command: &'static str, expected: &'static str },
    #[error("`{0}` is not a number")]
    InvalidNumber(String),
    #[error(transparent)]
    Variant(#[from] UnknownVariant),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Tool(Tool),
    Add(QuickShape),
    Down(Point),
    Move(Point),
    Up(Point),
    /// Answer the last text request. Everything after the keyword is kept
    /// verbatim, inner spaces included.
    Text(String),
    Resize(f64),
    List,
    Render,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        match word {
            "" => Err(CommandError::Empty),
            "tool" => Ok(Self::Tool(required(rest, "tool", "a tool name")?.parse()?)),
            "add" => Ok(Self::Add(required(rest, "add", "a shape variant")?.parse()?)),
            "down" => Ok(Self::Down(point(rest, "down")?)),
            "move" => Ok(Self::Move(point(rest, "move")?)),
            "up" => Ok(Self::Up(point(rest, "up")?)),
            "text" => Ok(Self::Text(rest.to_owned())),
            "resize" => Ok(Self::Resize(number(required(rest, "resize", "a width")?)?)),
            "list" => Ok(Self::List),
            "render" => Ok(Self::Render),
            other => Err(CommandError::Unknown(other.to_owned())),
        }
    }
}

fn required<'a>(rest: &'a str, command: &'static str, expected: &'static str) -> Result<&'a str, CommandError> {
    if rest.is_empty() {
        Err(CommandError::MissingArgument { command, expected })
    } else {
        Ok(rest)
    }
}

fn point(rest: &str, command: &'static str) -> Result<Point, CommandError> {
    let mut words = rest.split_whitespace();
    match (words.next(), words.next()) {
        (Some(x), Some(y)) => Ok(Point::new(number(x)?, number(y)?)),
        _ => Err(CommandError::MissingArgument { command, expected: "x and y" }),
    }
}

fn number(word: &str) -> Result<f64, CommandError> {
    match word.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(CommandError::InvalidNumber(word.to_owned())),
    }
}
