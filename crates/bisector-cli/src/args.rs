//! Command-line arguments.

use anyhow::Context;
use bisector::{BinarySearch, SearchConfig};
use clap::{Args, Parser, Subcommand, ValueEnum};

/// Step through a binary search by hand, or watch one home in on a target.
#[derive(Debug, Parser)]
#[command(name = "bisect")]
#[command(version)]
#[command(about = "Step through a binary search by hand or toward a target")]
pub struct Cli {
    /// Debug-level logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Answer each candidate interactively (l/r/lower/higher/done/promote)
    Guess(GuessArgs),

    /// Drive the search toward a known target and print the trace
    Probe(ProbeArgs),
}

#[derive(Debug, Args)]
pub struct GuessArgs {
    #[command(flatten)]
    pub range: RangeArgs,
}

#[derive(Debug, Args)]
pub struct ProbeArgs {
    #[command(flatten)]
    pub range: RangeArgs,

    /// Value the comparator steers toward
    #[arg(short, long, allow_negative_numbers = true)]
    pub target: f64,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Options shared by every subcommand that builds a search.
#[derive(Debug, Args)]
pub struct RangeArgs {
    /// Left endpoint
    #[arg(allow_negative_numbers = true)]
    pub left: f64,

    /// Right endpoint (may be smaller than LEFT)
    #[arg(allow_negative_numbers = true)]
    pub right: f64,

    /// Report raw values instead of rounding to integers
    #[arg(long)]
    pub float: bool,

    /// Which candidates to try first
    #[arg(long, value_enum, default_value_t = Start::Mid)]
    pub start: Start,

    /// Split ratio between the left (0) and right (1) bound
    #[arg(long)]
    pub ratio: Option<f64>,

    /// Tolerance for floating-point equality checks
    #[arg(long)]
    pub epsilon: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Start {
    /// The stepper's pick between the endpoints
    Mid,
    /// Left endpoint, then right
    Left,
    /// Right endpoint, then left
    Right,
    /// Smaller endpoint, then larger
    Low,
    /// Larger endpoint, then smaller
    High,
}

impl RangeArgs {
    /// The declarative part of the configuration.
    pub fn config(&self) -> SearchConfig {
        SearchConfig {
            ratio: self.ratio,
            epsilon: self.epsilon,
            float: Some(self.float),
            ..SearchConfig::default()
        }
    }

    /// Builds the search described by these arguments.
    pub fn build(&self) -> anyhow::Result<BinarySearch> {
        let search = BinarySearch::with_config(self.left, self.right, &self.config())
            .with_context(|| format!("cannot search [{}, {}]", self.left, self.right))?;

        Ok(match self.start {
            Start::Mid => search.start_at_midpoint(),
            Start::Left => search.start_at_left(),
            Start::Right => search.start_at_right(),
            Start::Low => search.start_at_low(),
            Start::High => search.start_at_high(),
        })
    }
}
