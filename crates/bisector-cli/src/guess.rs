//! Interactive guessing over any line-based input.

use std::io::{BufRead, Write};

use anyhow::Context;
use bisector::{BinarySearch, StopReason};
use tracing::warn;

use crate::answer::Answer;
use crate::format_value;

/// Result of an interactive session.
#[derive(Debug, Clone, PartialEq)]
pub struct GuessOutcome {
    pub steps: usize,
    pub last: Option<f64>,
    pub best: Option<f64>,
    pub stop: Option<StopReason>,
}

/// Asks about every candidate until the run ends or the input is exhausted.
pub fn run<R, W>(
    search: &mut BinarySearch,
    mut input: R,
    mut output: W,
) -> anyhow::Result<GuessOutcome>
where
    R: BufRead,
    W: Write,
{
    let mut count = 0;
    let mut steps = search.steps();

    'steps: while let Some(step) = steps.next() {
        count += 1;
        writeln!(output, "#{} {}", step.index, format_value(step.value))?;

        loop {
            write!(output, "> ")?;
            output.flush()?;

            let mut line = String::new();
            let read = input.read_line(&mut line).context("failed to read answer")?;
            if read == 0 {
                steps.mark_done();
                break 'steps;
            }

            match line.parse::<Answer>() {
                Ok(Answer::Steer(direction)) => {
                    steps.steer(direction);
                    break;
                }
                Ok(Answer::Promote) => {
                    steps.promote();
                    writeln!(output, "best = {}", format_value(step.value))?;
                }
                Ok(Answer::Next(value)) => {
                    steps.override_next_value(value);
                }
                Ok(Answer::Skip) => break,
                Err(err) => {
                    warn!(answer = line.trim(), "unrecognised answer");
                    writeln!(output, "{err}")?;
                }
            }
        }
    }
    drop(steps);

    let outcome = GuessOutcome {
        steps: count,
        last: search.value(),
        best: search.best(),
        stop: search.stop_reason(),
    };

    match outcome.last {
        Some(last) => writeln!(output, "last = {}", format_value(last))?,
        None => writeln!(output, "no candidates")?,
    }
    if let Some(best) = outcome.best {
        writeln!(output, "best = {}", format_value(best))?;
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn session(search: &mut BinarySearch, answers: &str) -> (GuessOutcome, String) {
        let mut output = Vec::new();
        let outcome = run(search, Cursor::new(answers.to_string()), &mut output).unwrap();
        (outcome, String::from_utf8(output).unwrap())
    }

    #[test]
    fn guesses_a_number() {
        // Thinking of 37 in [0, 100].
        let mut search = BinarySearch::new(0.0, 100.0).unwrap();
        let (outcome, transcript) = session(&mut search, "<\n>\n>\n<\n>\n>\n>\n=\n");

        assert_eq!(outcome.last, Some(37.0));
        assert_eq!(outcome.steps, 8);
        assert_eq!(outcome.stop, Some(StopReason::Done));
        assert!(transcript.starts_with("#0 50\n> #1 0\n"));
        assert!(transcript.ends_with("last = 37\n"));
    }

    #[test]
    fn promote_and_retry_on_bad_input() {
        let mut search = BinarySearch::new(0.0, 100.0).unwrap();
        let (outcome, transcript) = session(&mut search, "p\nwhat\nd\n");

        assert_eq!(outcome.best, Some(50.0));
        assert_eq!(outcome.steps, 1);
        assert!(transcript.contains("unknown answer 'what'"));
        assert!(transcript.ends_with("last = 50\nbest = 50\n"));
    }

    #[test]
    fn next_value_overrides_following_candidate() {
        let mut search = BinarySearch::new(0.0, 100.0).unwrap();
        let (_, transcript) = session(&mut search, "n 90\nr\n=\n");
        assert!(transcript.contains("#1 90\n"));
    }

    #[test]
    fn end_of_input_stops() {
        let mut search = BinarySearch::new(0.0, 100.0).unwrap();
        let (outcome, _) = session(&mut search, "");
        assert_eq!(outcome.steps, 1);
        assert_eq!(outcome.last, Some(50.0));
        assert_eq!(outcome.stop, None);
    }
}
