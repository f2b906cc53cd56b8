//! Search builder and step driver.
//!
//! The [`BinarySearch`] struct provides a fluent builder API for configuring a
//! search and a step-by-step driver for running it. Between two steps the
//! caller steers the search with the control methods.

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::rc::Rc;

use tracing::{debug, trace};

use crate::config::{SearchConfig, DEFAULT_EPSILON, DEFAULT_RATIO};
use crate::direction::{Decision, Direction, Side, Signal, StartPosition, StopReason};
use crate::error::{Result, SearchError};
use crate::stepper::{SplitRatio, Stepper};

/// A reported candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// The candidate, rounded to an integer unless the search is floating.
    pub value: f64,
    /// The raw candidate before rounding. Bounds narrow to this value.
    pub float_value: f64,
    /// 0-based index of the step within the run.
    pub index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// No run has started since construction.
    Idle,
    /// Started, no candidate reported yet.
    Running,
    /// A candidate was reported; waiting for the caller to resume.
    Suspended,
    Finished,
}

/// Live state of one run. Replaced wholesale on restart.
#[derive(Debug, Clone)]
struct RunState {
    left: f64,
    right: f64,
    next_index: usize,
    edge: Option<Side>,
    pending: Option<Signal>,
    last_side: Option<Side>,
    previous: Option<f64>,
    value: Option<f64>,
    float_value: Option<f64>,
    index: Option<usize>,
    best: Option<f64>,
    phase: Phase,
    stop: Option<StopReason>,
}

impl RunState {
    fn new(left: f64, right: f64, start: StartPosition) -> Self {
        RunState {
            left,
            right,
            next_index: 0,
            edge: start.edge(),
            pending: None,
            last_side: None,
            previous: None,
            value: None,
            float_value: None,
            index: None,
            best: None,
            phase: Phase::Idle,
            stop: None,
        }
    }
}

/// A controllable binary search over a numeric range.
///
/// The search reports one candidate per step. After each candidate the caller
/// picks a direction (or none), and the next call computes the following
/// candidate from the narrowed bounds. A run ends on its own once no useful
/// candidate remains.
///
/// # Example
///
/// ```
/// use bisector::BinarySearch;
///
/// let mut search = BinarySearch::new(0.0, 100.0).unwrap().start_at_low();
///
/// let mut seen = Vec::new();
/// let mut steps = search.steps();
/// while let Some(step) = steps.next() {
///     seen.push(step.value);
///     if steps.is_left() {
///         steps.go_right();
///     } else {
///         steps.go_left();
///     }
/// }
///
/// assert_eq!(seen, vec![0.0, 100.0, 50.0, 25.0, 13.0, 6.0, 3.0, 2.0, 1.0]);
/// ```
pub struct BinarySearch {
    leftmost: f64,
    rightmost: f64,
    positive_direction: i32,
    start: StartPosition,
    ratio: f64,
    stepper: Option<Rc<dyn Stepper>>,
    float: bool,
    epsilon: f64,
    next_value: Option<f64>,
    run: RunState,
}

impl BinarySearch {
    /// Creates a search between `left` and `right` with default settings.
    ///
    /// `left` may be larger than `right`; "left" and "right" always refer to
    /// the endpoints as given, while "low" and "high" refer to their values.
    ///
    /// Returns an error if either endpoint is not finite.
    pub fn new(left: f64, right: f64) -> Result<Self> {
        Self::with_config(left, right, &SearchConfig::default())
    }

    /// Creates a search from a declarative configuration.
    pub fn with_config(left: f64, right: f64, config: &SearchConfig) -> Result<Self> {
        if !left.is_finite() || !right.is_finite() {
            return Err(SearchError::InvalidRange { left, right });
        }
        let ratio = match config.ratio {
            Some(ratio) => validate_ratio(ratio)?,
            None => DEFAULT_RATIO,
        };
        let epsilon = match config.epsilon {
            Some(epsilon) => validate_epsilon(epsilon)?,
            None => DEFAULT_EPSILON,
        };
        let start = config.start_position();

        Ok(BinarySearch {
            leftmost: left,
            rightmost: right,
            positive_direction: if left > right { -1 } else { 1 },
            start,
            ratio,
            stepper: config.stepper.clone(),
            float: config.is_float(),
            epsilon,
            next_value: config.next_value,
            run: RunState::new(left, right, start),
        })
    }

    /// Returns the resolved configuration of this search.
    ///
    /// Feeding it back into [`BinarySearch::with_config`] yields an
    /// equivalent search.
    pub fn config(&self) -> SearchConfig {
        SearchConfig {
            start_left: self.start == StartPosition::Left,
            start_right: self.start == StartPosition::Right,
            ratio: Some(self.ratio),
            next_value: self.next_value,
            stepper: self.stepper.clone(),
            epsilon: Some(self.epsilon),
            float: Some(self.float),
            integer: Some(!self.float),
        }
    }

    // ========================================================================
    // Configuration (call before iterating)
    // ========================================================================

    /// Replaces the stepper used once the priming steps are over.
    pub fn with_stepper(mut self, stepper: impl Stepper + 'static) -> Self {
        self.stepper = Some(Rc::new(stepper));
        self
    }

    /// Restores the default [`SplitRatio`] stepper.
    pub fn default_stepper(mut self) -> Self {
        self.stepper = None;
        self
    }

    /// Sets the ratio between the left (`0`) and right (`1`) bound used by
    /// the default stepper.
    ///
    /// Returns an error if the ratio is outside `[0, 1]`.
    pub fn split_ratio(mut self, ratio: f64) -> Result<Self> {
        self.ratio = validate_ratio(ratio)?;
        Ok(self)
    }

    /// Rounds reported values to the nearest integer (the default).
    pub fn as_integer(mut self) -> Self {
        self.float = false;
        self
    }

    /// Reports raw values without rounding.
    pub fn as_float(mut self) -> Self {
        self.float = true;
        self
    }

    /// Starts with the stepper's pick between the bounds (the default).
    pub fn start_at_midpoint(mut self) -> Self {
        self.start = StartPosition::Midpoint;
        self
    }

    /// Starts with the left endpoint, then the right one.
    pub fn start_at_left(mut self) -> Self {
        self.start = StartPosition::Left;
        self
    }

    /// Starts with the right endpoint, then the left one.
    pub fn start_at_right(mut self) -> Self {
        self.start = StartPosition::Right;
        self
    }

    /// Starts with the smaller endpoint, then the larger one.
    pub fn start_at_low(self) -> Self {
        if self.positive_direction > 0 {
            self.start_at_left()
        } else {
            self.start_at_right()
        }
    }

    /// Starts with the larger endpoint, then the smaller one.
    pub fn start_at_high(self) -> Self {
        if self.positive_direction > 0 {
            self.start_at_right()
        } else {
            self.start_at_left()
        }
    }

    /// Sets the tolerance for floating-point equality checks.
    ///
    /// Returns an error unless `epsilon` is positive and finite.
    pub fn with_epsilon(mut self, epsilon: f64) -> Result<Self> {
        self.epsilon = validate_epsilon(epsilon)?;
        Ok(self)
    }

    /// Restores [`DEFAULT_EPSILON`].
    pub fn default_epsilon(mut self) -> Self {
        self.epsilon = DEFAULT_EPSILON;
        self
    }

    // ========================================================================
    // Control (call between two steps)
    // ========================================================================

    /// Ends the run after the current step.
    pub fn mark_done(&mut self) -> &mut Self {
        self.run.pending = Some(Signal::Done);
        self
    }

    /// Records the current candidate as the best one seen.
    pub fn promote(&mut self) -> &mut Self {
        self.run.best = self.run.value;
        self
    }

    /// Continues between the left bound and the current candidate.
    pub fn go_left(&mut self) -> &mut Self {
        self.steer(Direction::Left)
    }

    /// Continues between the current candidate and the right bound.
    pub fn go_right(&mut self) -> &mut Self {
        self.steer(Direction::Right)
    }

    /// Continues below the current candidate.
    pub fn go_lower(&mut self) -> &mut Self {
        self.steer(Direction::Lower)
    }

    /// Continues above the current candidate.
    pub fn go_higher(&mut self) -> &mut Self {
        self.steer(Direction::Higher)
    }

    /// Applies a direction to the current step. The last call wins.
    pub fn steer(&mut self, direction: Direction) -> &mut Self {
        self.run.pending = Some(direction.resolve(self.positive_direction));
        self
    }

    /// Forces the raw value of the next candidate, bypassing the stepper once.
    pub fn override_next_value(&mut self, value: f64) -> &mut Self {
        self.next_value = Some(value);
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Index of the current candidate.
    pub fn index(&self) -> Option<usize> {
        self.run.index
    }

    /// Current candidate, rounded unless the search is floating.
    pub fn value(&self) -> Option<f64> {
        self.run.value
    }

    /// Current candidate before rounding.
    pub fn float_value(&self) -> Option<f64> {
        self.run.float_value
    }

    /// Last promoted candidate.
    pub fn best(&self) -> Option<f64> {
        self.run.best
    }

    /// Live bound on the left side.
    pub fn left_bound(&self) -> f64 {
        self.run.left
    }

    /// Live bound on the right side.
    pub fn right_bound(&self) -> f64 {
        self.run.right
    }

    /// The numerically smaller live bound.
    pub fn low_bound(&self) -> f64 {
        if self.positive_direction > 0 {
            self.run.left
        } else {
            self.run.right
        }
    }

    /// The numerically larger live bound.
    pub fn high_bound(&self) -> f64 {
        if self.positive_direction > 0 {
            self.run.right
        } else {
            self.run.left
        }
    }

    /// `true` if the current candidate is the original left endpoint.
    pub fn is_left(&self) -> bool {
        self.run.value.is_some_and(|v| self.approx_eq(v, self.leftmost))
    }

    /// `true` if the current candidate is the original right endpoint.
    pub fn is_right(&self) -> bool {
        self.run.value.is_some_and(|v| self.approx_eq(v, self.rightmost))
    }

    /// `true` if the current candidate is the smaller original endpoint.
    pub fn is_low(&self) -> bool {
        if self.positive_direction > 0 {
            self.is_left()
        } else {
            self.is_right()
        }
    }

    /// `true` if the current candidate is the larger original endpoint.
    pub fn is_high(&self) -> bool {
        if self.positive_direction > 0 {
            self.is_right()
        } else {
            self.is_left()
        }
    }

    /// Split ratio used by the default stepper.
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// `-1` if the left endpoint is larger than the right one, otherwise `1`.
    pub fn positive_direction(&self) -> i32 {
        self.positive_direction
    }

    /// Original left endpoint.
    pub fn leftmost(&self) -> f64 {
        self.leftmost
    }

    /// Original right endpoint.
    pub fn rightmost(&self) -> f64 {
        self.rightmost
    }

    /// Tolerance for repeated-value and bound checks.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// `false` if reported values are rounded to integers.
    pub fn is_float(&self) -> bool {
        self.float
    }

    /// Where each run places its first candidate.
    pub fn start_position(&self) -> StartPosition {
        self.start
    }

    /// Why the last run ended, or `None` while it is still going.
    pub fn stop_reason(&self) -> Option<StopReason> {
        self.run.stop
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Resets the live bounds and the run state.
    ///
    /// Configuration, including a pending [`override_next_value`](Self::override_next_value),
    /// is kept.
    pub fn restart(&mut self) -> &mut Self {
        self.run = RunState::new(self.leftmost, self.rightmost, self.start);
        self.run.phase = Phase::Running;
        debug!(
            left = self.leftmost,
            right = self.rightmost,
            start = ?self.start,
            float = self.float,
            "bisection run started"
        );
        self
    }

    /// Restarts the search and returns an iterator over its candidates.
    ///
    /// The iterator dereferences to the search, so the control methods can
    /// be called on it between two calls to `next`.
    pub fn steps(&mut self) -> Steps<'_> {
        self.restart();
        Steps { search: self }
    }

    /// Applies the pending direction and computes the next candidate.
    ///
    /// Starts a run if none was started yet. Returns `None` once the run is
    /// over; call [`restart`](Self::restart) to run again.
    pub fn next_step(&mut self) -> Option<Step> {
        match self.run.phase {
            Phase::Idle => {
                self.restart();
            }
            Phase::Running => {}
            Phase::Suspended => {
                if let Err(reason) = self.resume() {
                    self.finish(reason);
                    return None;
                }
            }
            Phase::Finished => return None,
        }

        match self.advance() {
            Ok(step) => Some(step),
            Err(reason) => {
                self.finish(reason);
                None
            }
        }
    }

    /// Runs the search with a comparator and returns the last candidate.
    ///
    /// The comparator sees every candidate and may steer through the control
    /// methods, by returning a [`Decision`], or both; a returned direction
    /// wins over a control call.
    ///
    /// # Example
    ///
    /// ```
    /// use bisector::BinarySearch;
    ///
    /// let target = 37.0_f64;
    /// let found = BinarySearch::new(0.0, 100.0)
    ///     .unwrap()
    ///     .search(|value, _index, _search| target.total_cmp(&value));
    ///
    /// assert_eq!(found, Some(37.0));
    /// ```
    pub fn search<F, D>(&mut self, comparator: F) -> Option<f64>
    where
        F: FnMut(f64, usize, &mut BinarySearch) -> D,
        D: Decision,
    {
        self.drive(comparator);
        self.run.value
    }

    /// Runs the search with a comparator and returns the promoted candidate.
    pub fn search_best<F, D>(&mut self, comparator: F) -> Option<f64>
    where
        F: FnMut(f64, usize, &mut BinarySearch) -> D,
        D: Decision,
    {
        self.drive(comparator);
        self.run.best
    }

    fn drive<F, D>(&mut self, mut comparator: F)
    where
        F: FnMut(f64, usize, &mut BinarySearch) -> D,
        D: Decision,
    {
        self.restart();
        while let Some(step) = self.next_step() {
            if let Some(direction) = comparator(step.value, step.index, self).into_direction() {
                self.steer(direction);
            }
        }
    }

    fn resume(&mut self) -> std::result::Result<(), StopReason> {
        let (Some(value), Some(raw)) = (self.run.value, self.run.float_value) else {
            return Ok(());
        };

        match self.run.pending.take() {
            None => Ok(()),
            Some(Signal::Done) => Err(StopReason::Done),
            Some(Signal::Toward(side)) => {
                // Nothing left on that side of the candidate.
                if self.approx_eq(value, self.bound(side)) {
                    return Err(StopReason::BoundaryReached);
                }
                match side {
                    Side::Left => self.run.right = raw,
                    Side::Right => self.run.left = raw,
                }
                self.run.last_side = Some(side);
                trace!(
                    side = ?side,
                    left = self.run.left,
                    right = self.run.right,
                    "bounds narrowed"
                );
                Ok(())
            }
        }
    }

    fn advance(&mut self) -> std::result::Result<Step, StopReason> {
        if self.low_bound() > self.high_bound() {
            return Err(StopReason::Crossed);
        }

        let index = self.run.next_index;
        let edge = self.run.edge;
        let primed = edge.is_some() || self.next_value.is_some();

        let raw = match (index, edge) {
            (0, Some(side)) => self.bound(side),
            _ => {
                if let Some(next) = self.next_value.take() {
                    next
                } else if let Some(side) = edge {
                    self.run.edge = None;
                    self.bound(side.other())
                } else if index == 1 {
                    // Second probe leans toward the side of the first decision.
                    self.bound(self.run.last_side.unwrap_or(Side::Right))
                } else {
                    self.step_value(index)
                }
            }
        };

        let value = if self.float { raw } else { round_half_up(raw) };

        if !value.is_finite() {
            return Err(StopReason::NonFinite);
        }
        if self.run.previous.is_some_and(|p| self.approx_eq(value, p)) {
            return Err(StopReason::Repeated);
        }
        // Bounds are narrowed to the raw value, so both must stay inside.
        let (low, high) = (self.low_bound(), self.high_bound());
        if value < low || value > high || raw < low || raw > high {
            return Err(StopReason::OutOfRange);
        }
        if !primed && index > 1 && (value == self.run.left || value == self.run.right) {
            return Err(StopReason::AtBound);
        }

        self.run.next_index = index + 1;
        self.run.previous = Some(value);
        self.run.value = Some(value);
        self.run.float_value = Some(raw);
        self.run.index = Some(index);
        self.run.pending = None;
        self.run.phase = Phase::Suspended;

        trace!(index, value, raw, "candidate");
        Ok(Step {
            value,
            float_value: raw,
            index,
        })
    }

    fn finish(&mut self, reason: StopReason) {
        self.run.phase = Phase::Finished;
        self.run.stop = Some(reason);
        debug!(
            reason = ?reason,
            steps = self.run.next_index,
            value = ?self.run.value,
            best = ?self.run.best,
            "bisection run finished"
        );
    }

    fn step_value(&self, index: usize) -> f64 {
        let (left, right) = (self.run.left, self.run.right);
        match self.stepper.as_deref() {
            Some(stepper) => stepper.next_value(left, right, index, self),
            None => SplitRatio.next_value(left, right, index, self),
        }
    }

    fn bound(&self, side: Side) -> f64 {
        match side {
            Side::Left => self.run.left,
            Side::Right => self.run.right,
        }
    }

    fn approx_eq(&self, a: f64, b: f64) -> bool {
        (a - b).abs() < self.epsilon
    }
}

/// Clones the configuration; the clone starts with a fresh run.
impl Clone for BinarySearch {
    fn clone(&self) -> Self {
        BinarySearch {
            leftmost: self.leftmost,
            rightmost: self.rightmost,
            positive_direction: self.positive_direction,
            start: self.start,
            ratio: self.ratio,
            stepper: self.stepper.clone(),
            float: self.float,
            epsilon: self.epsilon,
            next_value: self.next_value,
            run: RunState::new(self.leftmost, self.rightmost, self.start),
        }
    }
}

impl fmt::Debug for BinarySearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinarySearch")
            .field("leftmost", &self.leftmost)
            .field("rightmost", &self.rightmost)
            .field("start", &self.start)
            .field("ratio", &self.ratio)
            .field("stepper", &self.stepper.as_ref().map(|_| "<custom>"))
            .field("float", &self.float)
            .field("epsilon", &self.epsilon)
            .field("run", &self.run)
            .finish()
    }
}

/// Iterator over the candidates of a run.
///
/// Created by [`BinarySearch::steps`]. Dereferences to the search so it can
/// be steered between candidates:
///
/// ```
/// use bisector::BinarySearch;
///
/// let mut search = BinarySearch::new(1.0, 4.0).unwrap();
/// let mut steps = search.steps();
/// let first = steps.next().unwrap();
/// assert_eq!(first.value, 3.0);
///
/// steps.go_left();
/// assert_eq!(steps.next().map(|s| s.value), Some(1.0));
/// ```
///
/// Not fused: calling [`BinarySearch::restart`] through the adapter starts a
/// new run, so `next` may yield candidates again after returning `None`.
pub struct Steps<'a> {
    search: &'a mut BinarySearch,
}

impl Iterator for Steps<'_> {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        self.search.next_step()
    }
}

impl Deref for Steps<'_> {
    type Target = BinarySearch;

    fn deref(&self) -> &BinarySearch {
        self.search
    }
}

impl DerefMut for Steps<'_> {
    fn deref_mut(&mut self) -> &mut BinarySearch {
        self.search
    }
}

fn validate_ratio(ratio: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&ratio) {
        Ok(ratio)
    } else {
        Err(SearchError::InvalidRatio(ratio))
    }
}

fn validate_epsilon(epsilon: f64) -> Result<f64> {
    if epsilon.is_finite() && epsilon > 0.0 {
        Ok(epsilon)
    } else {
        Err(SearchError::NonpositiveEpsilon(epsilon))
    }
}

/// Rounds half-way cases toward positive infinity.
fn round_half_up(x: f64) -> f64 {
    let floor = x.floor();
    if x - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}
