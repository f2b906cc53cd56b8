//! Non-interactive search toward a known target.

use std::cmp::Ordering;
use std::fmt::Write as _;

use bisector::{BinarySearch, Decision, Direction, SearchConfig, StopReason};
use serde::Serialize;

use crate::format_value;

/// One visited candidate and the decision taken on it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbeStep {
    pub index: usize,
    pub value: f64,
    pub raw: f64,
    pub decision: Direction,
}

/// Everything a probe run produced.
#[derive(Debug, Serialize)]
pub struct ProbeReport {
    pub target: f64,
    pub config: SearchConfig,
    pub steps: Vec<ProbeStep>,
    pub last: Option<f64>,
    pub best: Option<f64>,
    pub stop: Option<StopReason>,
}

/// Runs `search` in comparator mode toward `target`.
///
/// Each candidate is compared against the target; the closest one seen so far
/// is promoted, so `best` is meaningful even when the target is not reachable
/// (for instance a fractional target in integer mode).
pub fn probe(search: &mut BinarySearch, target: f64) -> ProbeReport {
    let mut steps = Vec::new();
    let mut closest = f64::INFINITY;

    search.search(|value, index, search| {
        let distance = (value - target).abs();
        if distance < closest {
            closest = distance;
            search.promote();
        }

        let ordering = target.partial_cmp(&value).unwrap_or(Ordering::Equal);
        let decision = ordering.into_direction().unwrap_or(Direction::Done);
        steps.push(ProbeStep {
            index,
            value,
            raw: search.float_value().unwrap_or(value),
            decision,
        });
        decision
    });

    ProbeReport {
        target,
        config: search.config(),
        steps,
        last: search.value(),
        best: search.best(),
        stop: search.stop_reason(),
    }
}

impl ProbeReport {
    /// Plain-text rendering, one line per step plus a summary.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for step in &self.steps {
            let _ = writeln!(
                out,
                "#{:<3} {:>12}  {:?}",
                step.index,
                format_value(step.value),
                step.decision
            );
        }
        let last = self.last.map_or_else(|| "-".to_string(), format_value);
        let best = self.best.map_or_else(|| "-".to_string(), format_value);
        let _ = write!(out, "last = {last}  best = {best}");
        if let Some(stop) = self.stop {
            let _ = write!(out, "  ({stop:?})");
        }
        out.push('\n');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_reaches_integer_target() {
        let mut search = BinarySearch::new(0.0, 100.0).unwrap();
        let report = probe(&mut search, 37.0);

        let values: Vec<f64> = report.steps.iter().map(|s| s.value).collect();
        assert_eq!(values, vec![50.0, 0.0, 25.0, 38.0, 31.0, 34.0, 36.0, 37.0]);
        assert_eq!(report.last, Some(37.0));
        assert_eq!(report.best, Some(37.0));
        assert_eq!(report.stop, Some(StopReason::Done));
        assert_eq!(report.steps[3].raw, 37.5);
        assert_eq!(report.steps[0].decision, Direction::Lower);
    }

    #[test]
    fn fractional_target_keeps_closest_as_best() {
        let mut search = BinarySearch::new(0.0, 10.0).unwrap();
        let report = probe(&mut search, 6.4);

        assert_eq!(report.best, Some(6.0));
        assert_ne!(report.stop, Some(StopReason::Done));
    }

    #[test]
    fn text_and_json_rendering() {
        let mut search = BinarySearch::new(0.0, 4.0).unwrap();
        let report = probe(&mut search, 2.0);

        assert_eq!(report.to_text().lines().last(), Some("last = 2  best = 2  (Done)"));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["steps"][0]["decision"], "done");
        assert_eq!(json["stop"], "done");
        assert_eq!(json["config"]["ratio"], 0.5);
    }
}
