//! `bisect` - drive a bisector search from the command line.
//!
//! ```text
//! bisect guess 1 100                 # answer l/r/</>/= for each candidate
//! bisect probe 0 1000 --target 613   # print the probe order toward 613
//! bisect probe 0 1 --float --target 0.3 --json
//! ```

mod answer;
mod args;
mod guess;
mod probe;
mod tracing_setup;

use std::io::{self, Write};

use anyhow::Context;
use clap::Parser;

use crate::args::{Cli, Command};
use crate::tracing_setup::Verbosity;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_setup::init_subscriber(Verbosity::from_flags(cli.verbose, cli.quiet));

    match cli.command {
        Command::Guess(args) => {
            let mut search = args.range.build()?;
            let stdin = io::stdin();
            guess::run(&mut search, stdin.lock(), io::stdout().lock())?;
        }
        Command::Probe(args) => {
            let mut search = args.range.build()?;
            let report = probe::probe(&mut search, args.target);

            let mut stdout = io::stdout().lock();
            if args.json {
                serde_json::to_writer_pretty(&mut stdout, &report)
                    .context("failed to write report")?;
                writeln!(stdout)?;
            } else {
                stdout.write_all(report.to_text().as_bytes())?;
            }
        }
    }
    Ok(())
}

/// Integers print without a fractional part; everything else as-is.
pub(crate) fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_value_drops_trailing_zero() {
        assert_eq!(format_value(50.0), "50");
        assert_eq!(format_value(-3.0), "-3");
        assert_eq!(format_value(0.125), "0.125");
    }
}
