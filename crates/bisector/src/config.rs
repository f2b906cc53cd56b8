//! Declarative search configuration.
//!
//! [`SearchConfig`] is the plain-data counterpart of the builder methods on
//! [`BinarySearch`](crate::BinarySearch). Every field is optional; the
//! defaults are the ones a bare [`BinarySearch::new`](crate::BinarySearch::new)
//! uses. A config is resolved once, at construction.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::direction::StartPosition;
use crate::stepper::Stepper;

/// Default tolerance for floating-point equality checks.
pub const DEFAULT_EPSILON: f64 = f64::EPSILON * 10.0;

/// Default split ratio (classic bisection).
pub const DEFAULT_RATIO: f64 = 0.5;

/// Optional settings for a search.
///
/// # Example
///
/// ```
/// use bisector::{BinarySearch, SearchConfig};
///
/// let config: SearchConfig = serde_json::from_str(r#"{ "start_left": true, "float": true }"#).unwrap();
/// let mut search = BinarySearch::with_config(0.0, 1.0, &config).unwrap();
///
/// let first = search.steps().next().unwrap();
/// assert_eq!(first.value, 0.0);
/// ```
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Prime the run with the left endpoint, then the right one.
    /// Takes precedence over `start_right`.
    pub start_left: bool,
    /// Prime the run with the right endpoint, then the left one.
    pub start_right: bool,
    /// Split ratio for the default stepper (default `0.5`).
    pub ratio: Option<f64>,
    /// Raw value of the first non-priming candidate, used once.
    pub next_value: Option<f64>,
    /// Custom stepper (default [`SplitRatio`](crate::SplitRatio)).
    #[serde(skip)]
    pub stepper: Option<Rc<dyn Stepper>>,
    /// Tolerance for equality checks (default [`DEFAULT_EPSILON`]).
    pub epsilon: Option<f64>,
    /// Report raw values instead of rounding them. Takes precedence over `integer`.
    pub float: Option<bool>,
    /// Round reported values to the nearest integer (the default).
    pub integer: Option<bool>,
}

impl SearchConfig {
    /// Creates an empty configuration (all defaults).
    pub fn new() -> Self {
        SearchConfig::default()
    }

    pub(crate) fn start_position(&self) -> StartPosition {
        if self.start_left {
            StartPosition::Left
        } else if self.start_right {
            StartPosition::Right
        } else {
            StartPosition::Midpoint
        }
    }

    pub(crate) fn is_float(&self) -> bool {
        match (self.float, self.integer) {
            (Some(float), _) => float,
            (None, Some(integer)) => !integer,
            (None, None) => false,
        }
    }
}

impl fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchConfig")
            .field("start_left", &self.start_left)
            .field("start_right", &self.start_right)
            .field("ratio", &self.ratio)
            .field("next_value", &self.next_value)
            .field("stepper", &self.stepper.as_ref().map(|_| "<custom>"))
            .field("epsilon", &self.epsilon)
            .field("float", &self.float)
            .field("integer", &self.integer)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_defaults() {
        let config = SearchConfig::new();
        assert_eq!(config.start_position(), StartPosition::Midpoint);
        assert!(!config.is_float());
    }

    #[test]
    fn start_left_wins_over_start_right() {
        let config = SearchConfig {
            start_left: true,
            start_right: true,
            ..SearchConfig::default()
        };
        assert_eq!(config.start_position(), StartPosition::Left);

        let config = SearchConfig {
            start_right: true,
            ..SearchConfig::default()
        };
        assert_eq!(config.start_position(), StartPosition::Right);
    }

    #[test]
    fn float_wins_over_integer() {
        let config = SearchConfig {
            float: Some(false),
            integer: Some(false),
            ..SearchConfig::default()
        };
        assert!(!config.is_float());

        let config = SearchConfig {
            integer: Some(false),
            ..SearchConfig::default()
        };
        assert!(config.is_float());
    }

    #[test]
    fn deserializes_partial_json() {
        let config: SearchConfig = serde_json::from_str(r#"{ "ratio": 0.25 }"#).unwrap();
        assert_eq!(config.ratio, Some(0.25));
        assert!(config.stepper.is_none());
        assert!(!config.start_left);
    }

    #[test]
    fn debug_hides_stepper() {
        let config = SearchConfig {
            stepper: Some(Rc::new(crate::SplitRatio)),
            ..SearchConfig::default()
        };
        let debug = format!("{:?}", config);
        assert!(debug.contains("<custom>"));
    }
}
