//! Parsing of interactive answers.

use std::str::FromStr;

use bisector::Direction;
use thiserror::Error;

/// One line typed in response to a candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Answer {
    /// Steer the search and move on.
    Steer(Direction),
    /// Remember the current candidate as the best; ask again.
    Promote,
    /// Use this raw value as the next candidate; ask again.
    Next(f64),
    /// No opinion: move on with the bounds unchanged.
    Skip,
}

#[derive(Debug, Error, PartialEq)]
pub enum AnswerError {
    #[error("unknown answer '{0}' (try l, r, <, >, =, p, n <value>)")]
    Unknown(String),

    #[error("'n' needs a number, got '{0}'")]
    BadNumber(String),
}

impl FromStr for Answer {
    type Err = AnswerError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let answer = match word.to_ascii_lowercase().as_str() {
            "" => Answer::Skip,
            "l" | "left" => Answer::Steer(Direction::Left),
            "r" | "right" => Answer::Steer(Direction::Right),
            "<" | "lo" | "lower" => Answer::Steer(Direction::Lower),
            ">" | "hi" | "higher" => Answer::Steer(Direction::Higher),
            "=" | "d" | "done" => Answer::Steer(Direction::Done),
            "p" | "promote" => Answer::Promote,
            "n" | "next" => {
                let value = rest
                    .parse::<f64>()
                    .map_err(|_| AnswerError::BadNumber(rest.to_string()))?;
                Answer::Next(value)
            }
            _ => return Err(AnswerError::Unknown(line.to_string())),
        };
        Ok(answer)
    }
}
