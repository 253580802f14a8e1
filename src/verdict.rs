//! Result interpreter: decoded judge stdout -> per-test outcomes.
//!
//! The driver harness prints one marker per hidden test case, joined by '-':
//! "1" for pass, "0" for fail. Anything else on stdout (diagnostics, blank
//! segments, compiler noise) is deliberately dropped, not reported as an
//! error. Ordering is positional and matches the harness's emit order; we do
//! not check the count against the problem's test-case list.

use crate::domain::TestOutcome;

const MARKER_DELIMITER: char = '-';

/// Split stdout on the marker delimiter and keep only exact "1"/"0" tokens,
/// in order. Empty input (e.g. a judge-side wait timeout produced no stdout)
/// yields an empty list.
pub fn interpret(decoded_stdout: &str) -> Vec<TestOutcome> {
  decoded_stdout
    .split(MARKER_DELIMITER)
    .filter_map(|token| match token {
      "1" => Some(TestOutcome::Passed),
      "0" => Some(TestOutcome::Failed),
      _ => None,
    })
    .collect()
}

/// Human-readable summary, one line per outcome, 1-based.
pub fn report_lines(outcomes: &[TestOutcome]) -> Vec<String> {
  outcomes
    .iter()
    .enumerate()
    .map(|(i, outcome)| match outcome {
      TestOutcome::Passed => format!("Test case {} passed", i + 1),
      TestOutcome::Failed => format!("Test case {} failed", i + 1),
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::TestOutcome::{Failed, Passed};

  #[test]
  fn markers_map_in_order_and_noise_is_dropped() {
    assert_eq!(interpret("1-0-1-garbage-1"), vec![Passed, Failed, Passed, Passed]);
  }

  #[test]
  fn no_markers_means_empty_not_error() {
    assert!(interpret("").is_empty());
    assert!(interpret("Traceback (most recent call last)").is_empty());
    assert!(interpret("---").is_empty());
  }

  #[test]
  fn two_case_run_reports() {
    let all_pass = report_lines(&interpret("1-1"));
    assert_eq!(all_pass, vec!["Test case 1 passed", "Test case 2 passed"]);

    let first_fails = report_lines(&interpret("0-1"));
    assert_eq!(first_fails, vec!["Test case 1 failed", "Test case 2 passed"]);
  }
}
