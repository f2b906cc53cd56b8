//! Pluggable candidate selection.
//!
//! This module provides the [`Stepper`] trait, which decides the next raw
//! candidate from the live bounds once the priming steps are over.

use crate::search::BinarySearch;

/// Chooses the next raw candidate between the live bounds.
///
/// Implementations should be pure: for the same `(left, right, index)` they
/// must return the same value, otherwise two runs of the same search are not
/// reproducible. The result is expected to lie between `left` and `right`;
/// anything else (including `NaN`) ends the run instead of being reported.
///
/// Any closure with the matching signature is a stepper:
///
/// ```
/// use bisector::BinarySearch;
///
/// // Geometric mean instead of the arithmetic one.
/// let mut search = BinarySearch::new(1.0, 1024.0)
///     .unwrap()
///     .with_stepper(|left: f64, right: f64, _index: usize, _search: &BinarySearch| {
///         (left * right).sqrt()
///     });
///
/// let first = search.steps().next().unwrap();
/// assert_eq!(first.value, 32.0);
/// ```
pub trait Stepper {
    /// Returns the raw candidate for step `index`.
    ///
    /// # Parameters
    ///
    /// * `left`, `right` - The live bounds, in the orientation the search
    ///   was built with (so `left > right` for descending ranges)
    /// * `index` - The 0-based index of the step being computed
    /// * `search` - The running search, for reading configuration such as
    ///   [`BinarySearch::ratio`]
    fn next_value(&self, left: f64, right: f64, index: usize, search: &BinarySearch) -> f64;
}

impl<F> Stepper for F
where
    F: Fn(f64, f64, usize, &BinarySearch) -> f64,
{
    fn next_value(&self, left: f64, right: f64, index: usize, search: &BinarySearch) -> f64 {
        self(left, right, index, search)
    }
}

/// The default stepper: `left + (right - left) * ratio`.
///
/// With the default ratio of `0.5` this is classic bisection. Custom steppers
/// can delegate to it for the steps they do not want to handle themselves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplitRatio;

impl Stepper for SplitRatio {
    fn next_value(&self, left: f64, right: f64, _index: usize, search: &BinarySearch) -> f64 {
        left + (right - left) * search.ratio()
    }
}
