//! Direction signals exchanged between the caller and a running search.
//!
//! A suspended step is resumed with at most one signal. [`Direction`] is the
//! public vocabulary; [`Decision`] lets comparator callbacks hand one back in
//! whatever shape is most natural (`()`, `Option<Direction>`, `Ordering`).

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Where the next candidate should be searched for.
///
/// `Left`/`Right` are absolute: they refer to the `left` and `right`
/// endpoints the search was built with. `Lower`/`Higher` are numeric and
/// resolve through [`BinarySearch::positive_direction`](crate::BinarySearch::positive_direction),
/// so `Lower` always narrows toward the smaller endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Continue between the left bound and the current candidate.
    Left,
    /// Continue between the current candidate and the right bound.
    Right,
    /// Continue toward the numerically smaller endpoint.
    Lower,
    /// Continue toward the numerically larger endpoint.
    Higher,
    /// Stop the run after the current step.
    Done,
}

impl Direction {
    /// Resolves a direction to an absolute signal.
    pub(crate) fn resolve(self, positive_direction: i32) -> Signal {
        match self {
            Direction::Left => Signal::Toward(Side::Left),
            Direction::Right => Signal::Toward(Side::Right),
            Direction::Lower if positive_direction > 0 => Signal::Toward(Side::Left),
            Direction::Lower => Signal::Toward(Side::Right),
            Direction::Higher if positive_direction > 0 => Signal::Toward(Side::Right),
            Direction::Higher => Signal::Toward(Side::Left),
            Direction::Done => Signal::Done,
        }
    }
}

/// Return value of a comparator callback.
///
/// `None` means "leave whatever the callback did through the control
/// methods alone". A `Some` direction overrides it.
pub trait Decision {
    /// Converts the callback result into an optional direction.
    fn into_direction(self) -> Option<Direction>;
}

impl Decision for () {
    fn into_direction(self) -> Option<Direction> {
        None
    }
}

impl Decision for Direction {
    fn into_direction(self) -> Option<Direction> {
        Some(self)
    }
}

impl Decision for Option<Direction> {
    fn into_direction(self) -> Option<Direction> {
        self
    }
}

/// An ordering describes where the answer lies relative to the candidate:
/// `Less` continues lower, `Greater` continues higher, `Equal` stops.
impl Decision for Ordering {
    fn into_direction(self) -> Option<Direction> {
        Some(match self {
            Ordering::Less => Direction::Lower,
            Ordering::Greater => Direction::Higher,
            Ordering::Equal => Direction::Done,
        })
    }
}

/// Absolute side of the live interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    pub(crate) fn other(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Pending signal for a suspended step, already resolved to a side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Signal {
    Toward(Side),
    Done,
}

/// How the first candidates of a run are primed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartPosition {
    /// Start with the stepper's pick between the bounds.
    #[default]
    Midpoint,
    /// Start with the left endpoint, then the right one.
    Left,
    /// Start with the right endpoint, then the left one.
    Right,
}

impl StartPosition {
    pub(crate) fn edge(self) -> Option<Side> {
        match self {
            StartPosition::Midpoint => None,
            StartPosition::Left => Some(Side::Left),
            StartPosition::Right => Some(Side::Right),
        }
    }
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// [`Direction::Done`] was signalled.
    Done,
    /// The requested direction pointed at a bound the candidate already sits on.
    ///
    /// This is the live bound on that side, not the original endpoint.
    BoundaryReached,
    /// The next candidate repeated the previous one within epsilon.
    Repeated,
    /// The next candidate fell outside the live bounds.
    OutOfRange,
    /// The stepper converged onto one of the live bounds.
    AtBound,
    /// The next candidate was `NaN` or infinite.
    NonFinite,
    /// The live bounds crossed.
    Crossed,
}
