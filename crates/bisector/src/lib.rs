//! Bisector - Controllable binary-search stepping engine.
//!
//! Bisector produces the candidates of a binary search over a numeric range
//! one at a time and lets the caller decide, after each candidate, where to
//! continue. It supports:
//!
//! - Integer (rounded) and floating candidates
//! - Midpoint, left-edge and right-edge starts
//! - Custom split ratios and fully custom steppers
//! - Tracking a promoted "best" candidate separately from the last one
//! - Manual stepping or a driving comparator callback
//!
//! # Quick Start
//!
//! ```rust
//! use bisector::{BinarySearch, Direction};
//!
//! // Smallest integer whose square exceeds 2000.
//! let mut search = BinarySearch::new(0.0, 100.0).unwrap();
//!
//! let answer = search.search_best(|value, _index, search| {
//!     if value * value > 2000.0 {
//!         search.promote();
//!         Direction::Lower
//!     } else {
//!         Direction::Higher
//!     }
//! });
//!
//! assert_eq!(answer, Some(45.0));
//! ```
//!
//! # Run Semantics
//!
//! Every run starts from the original endpoints. Each step:
//!
//! ```text
//! resume  = apply the caller's direction (narrow one bound to the raw candidate)
//! pick    = first edge | override | other edge | biased bound (step 1) | stepper
//! report  = round unless floating, stop if repeated / out of range / at a bound
//! ```
//!
//! - **Left/Right**: absolute, relative to the endpoints as given
//! - **Lower/Higher**: numeric, resolved through the range orientation
//! - **No direction**: bounds stay as they are
//!
//! A run ends without an error; [`BinarySearch::stop_reason`] tells why.

mod config;
mod direction;
mod error;
mod search;
mod stepper;

// Re-export public API
pub use config::{SearchConfig, DEFAULT_EPSILON, DEFAULT_RATIO};
pub use direction::{Decision, Direction, StartPosition, StopReason};
pub use error::{Result, SearchError};
pub use search::{BinarySearch, Step, Steps};
pub use stepper::{SplitRatio, Stepper};
