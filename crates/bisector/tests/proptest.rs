//! Property-based tests for bisector using proptest.

use bisector::{BinarySearch, Direction, Step};
use proptest::prelude::*;

// ============================================================================
// Test helpers
// ============================================================================

/// Upper bound on steps for the ranges generated below.
const STEP_LIMIT: usize = 5_000;

/// Runs a search, picking directions from `choices` (cycled), and returns
/// every reported step.
fn run_with_choices(search: &mut BinarySearch, choices: &[Direction]) -> Vec<Step> {
    let mut seen = Vec::new();
    let mut steps = search.steps();
    while let Some(step) = steps.next() {
        seen.push(step);
        if seen.len() >= STEP_LIMIT {
            break;
        }
        if !choices.is_empty() {
            steps.steer(choices[step.index % choices.len()]);
        }
    }
    seen
}

fn narrowing_direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Left),
        Just(Direction::Right),
        Just(Direction::Lower),
        Just(Direction::Higher),
    ]
}

fn start_strategy() -> impl Strategy<Value = u8> {
    0u8..5
}

fn configure(search: BinarySearch, start: u8, float: bool) -> BinarySearch {
    let search = match start {
        0 => search.start_at_midpoint(),
        1 => search.start_at_left(),
        2 => search.start_at_right(),
        3 => search.start_at_low(),
        _ => search.start_at_high(),
    };
    if float {
        search.as_float()
    } else {
        search.as_integer()
    }
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Indices start at zero and grow by one per reported step.
    #[test]
    fn index_increments_by_one(
        left in -1_000_000i64..1_000_000,
        right in -1_000_000i64..1_000_000,
        start in start_strategy(),
        choices in prop::collection::vec(narrowing_direction(), 1..8),
    ) {
        let mut search = configure(BinarySearch::new(left as f64, right as f64).unwrap(), start, false);
        let steps = run_with_choices(&mut search, &choices);

        for (expected, step) in steps.iter().enumerate() {
            prop_assert_eq!(step.index, expected);
        }
    }

    /// Every reported value stays inside the original range.
    #[test]
    fn values_stay_in_range(
        left in -1.0e6f64..1.0e6,
        right in -1.0e6f64..1.0e6,
        start in start_strategy(),
        float in any::<bool>(),
        choices in prop::collection::vec(narrowing_direction(), 1..8),
    ) {
        let mut search = configure(BinarySearch::new(left, right).unwrap(), start, float);
        let steps = run_with_choices(&mut search, &choices);

        let (low, high) = (left.min(right), left.max(right));
        for step in &steps {
            prop_assert!(step.value >= low && step.value <= high, "{} outside [{}, {}]", step.value, low, high);
        }
    }

    /// Integer runs that always narrow terminate quickly.
    #[test]
    fn integer_runs_terminate(
        left in -1_000_000i64..1_000_000,
        right in -1_000_000i64..1_000_000,
        choices in prop::collection::vec(narrowing_direction(), 1..8),
    ) {
        let mut search = BinarySearch::new(left as f64, right as f64).unwrap();
        let steps = run_with_choices(&mut search, &choices);

        prop_assert!(steps.len() < 100);
        prop_assert!(search.stop_reason().is_some());
    }

    /// Reported integer values are whole numbers; raw values are not rounded.
    #[test]
    fn integer_values_are_rounded_raw_values(
        left in -1_000i64..1_000,
        right in -1_000i64..1_000,
        choices in prop::collection::vec(narrowing_direction(), 1..8),
    ) {
        let mut search = BinarySearch::new(left as f64, right as f64).unwrap();
        for step in run_with_choices(&mut search, &choices) {
            prop_assert_eq!(step.value.fract(), 0.0);
            prop_assert!((step.value - step.float_value).abs() <= 0.5);
        }
    }

    /// A clone driven the same way reports the same values.
    #[test]
    fn clone_reproduces_values(
        left in -10_000.0f64..10_000.0,
        right in -10_000.0f64..10_000.0,
        start in start_strategy(),
        float in any::<bool>(),
        choices in prop::collection::vec(narrowing_direction(), 1..8),
    ) {
        let mut original = configure(BinarySearch::new(left, right).unwrap(), start, float);
        let mut copy = original.clone();

        let first: Vec<f64> = run_with_choices(&mut original, &choices).iter().map(|s| s.value).collect();
        let second: Vec<f64> = run_with_choices(&mut copy, &choices).iter().map(|s| s.value).collect();
        prop_assert_eq!(first, second);
    }

    /// Running the same search twice gives the same values.
    #[test]
    fn rerun_is_independent(
        left in -10_000i64..10_000,
        right in -10_000i64..10_000,
        choices in prop::collection::vec(narrowing_direction(), 1..8),
    ) {
        let mut search = BinarySearch::new(left as f64, right as f64).unwrap().start_at_low();
        let first: Vec<f64> = run_with_choices(&mut search, &choices).iter().map(|s| s.value).collect();
        let second: Vec<f64> = run_with_choices(&mut search, &choices).iter().map(|s| s.value).collect();
        prop_assert_eq!(first, second);
    }

    /// An ordering comparator finds any integer target inside the range.
    #[test]
    fn ordering_comparator_finds_integer_target(
        low in -100_000i64..100_000,
        width in 0i64..100_000,
        offset in 0.0f64..=1.0,
        descending in any::<bool>(),
    ) {
        let high = low + width;
        // `+ 0.0` turns a rounded -0.0 into 0.0 so total_cmp sees them equal.
        let target = (low as f64 + (width as f64 * offset)).round() + 0.0;
        let (left, right) = if descending { (high, low) } else { (low, high) };

        let found = BinarySearch::new(left as f64, right as f64)
            .unwrap()
            .search(|value, _index, _search| target.total_cmp(&value));
        prop_assert_eq!(found, Some(target));
    }
}
