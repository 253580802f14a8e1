//! Score extraction from AI feedback prose.
//!
//! The feedback system prompt dictates that the reply ends with a line of the
//! form "Score is N/10". This module is the other half of that contract: a
//! fixed-grammar parse between the two markers, nothing more. Reordered or
//! missing markers fail; we do not scan for alternatives. If the prose happens
//! to contain "Score is " or "/10" earlier, extraction can latch onto the
//! wrong span; the prompt forbids that but cannot prevent it.

use crate::error::CoreError;

const FIRST_MARKER: &str = "Score is ";
const LAST_MARKER: &str = "/10";

/// Parse the integer between "Score is " and "/10". Valid scores are 0..=10.
pub fn extract_score(feedback: &str) -> Result<u8, CoreError> {
  let first = feedback
    .find(FIRST_MARKER)
    .ok_or_else(|| CoreError::ScoreFormat(format!("missing '{}' marker", FIRST_MARKER.trim_end())))?;
  let last = feedback
    .find(LAST_MARKER)
    .ok_or_else(|| CoreError::ScoreFormat(format!("missing '{}' marker", LAST_MARKER)))?;
  if first >= last {
    return Err(CoreError::ScoreFormat("markers out of order".into()));
  }

  let raw = &feedback[first + FIRST_MARKER.len()..last];
  let score: u8 = raw
    .trim()
    .parse()
    .map_err(|_| CoreError::ScoreFormat(format!("'{}' is not an integer", raw)))?;
  if score > 10 {
    return Err(CoreError::ScoreFormat(format!("{} is out of range", score)));
  }
  Ok(score)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn extracts_plain_scores() {
    assert_eq!(extract_score("Solid solution.\nScore is 7/10").unwrap(), 7);
    assert_eq!(extract_score("Perfect.\nScore is 10/10").unwrap(), 10);
    assert_eq!(extract_score("Does not compile.\nScore is 0/10").unwrap(), 0);
  }

  #[test]
  fn missing_markers_fail() {
    assert!(matches!(extract_score("Score is 7"), Err(CoreError::ScoreFormat(_))));
    assert!(matches!(extract_score("I'd say 7/10"), Err(CoreError::ScoreFormat(_))));
    assert!(matches!(extract_score("no score here"), Err(CoreError::ScoreFormat(_))));
  }

  #[test]
  fn non_numeric_between_markers_fails() {
    assert!(matches!(extract_score("Score is X/10"), Err(CoreError::ScoreFormat(_))));
    assert!(matches!(extract_score("Score is /10"), Err(CoreError::ScoreFormat(_))));
  }

  #[test]
  fn reordered_markers_fail() {
    assert!(matches!(extract_score("7/10? No. Score is good"), Err(CoreError::ScoreFormat(_))));
  }

  #[test]
  fn out_of_range_fails() {
    assert!(matches!(extract_score("Score is 99/10"), Err(CoreError::ScoreFormat(_))));
  }
}
