//! Run and submit actions, shared by the HTTP handlers.
//!
//! These are the two action boundaries of the system. Ordering inside each is
//! fixed: a run resolves the judge language before creating the submission and
//! fetches status after; a submit checks the solved guard before requesting
//! feedback and records only after a score is extracted. Any error terminates
//! the action with no partial effect; the already-solved short-circuit is a
//! normal outcome, not an error.

use tracing::{info, instrument};

use crate::compose;
use crate::domain::{FeedbackRecord, TestOutcome};
use crate::error::CoreError;
use crate::score::extract_score;
use crate::state::AppState;
use crate::verdict;

/// Outcome of one run action: per-test verdicts plus the report lines shown
/// to the user.
#[derive(Clone, Debug)]
pub struct RunReport {
  pub outcomes: Vec<TestOutcome>,
  pub lines: Vec<String>,
  pub status_id: Option<i64>,
  pub stderr: Option<String>,
}

/// Outcome of one submit action.
#[derive(Clone, Debug)]
pub enum SubmitOutcome {
  /// The problem was already solved (either at the pre-check or because a
  /// concurrent submit recorded first). No writes, no feedback call on the
  /// pre-check path.
  AlreadySolved,
  /// Feedback obtained, score extracted and recorded.
  Recorded(FeedbackRecord),
}

/// Run the session's current source against the hidden test cases.
#[instrument(level = "info", skip(state), fields(%session_id))]
pub async fn run_action(state: &AppState, session_id: &str) -> Result<RunReport, CoreError> {
  let session = state.get_session(session_id).await?;
  let problem = state.get_problem(&session.problem_id)?;

  let driver = compose::driver(problem, session.language)?;
  let composed = compose::compose(&session.source, &driver, session.language);

  let judge = state.judge.as_ref().ok_or(CoreError::NotConfigured("judge client"))?;
  let language_id = judge.resolve_language_id(session.language).await?;
  let run = judge.run(&composed, language_id).await?;

  let outcomes = verdict::interpret(&run.stdout);
  let lines = verdict::report_lines(&outcomes);
  info!(
    target: "submission",
    problem = %session.problem_id,
    token = %run.token,
    cases = outcomes.len(),
    passed = outcomes.iter().filter(|o| **o == TestOutcome::Passed).count(),
    "Run completed"
  );

  Ok(RunReport { outcomes, lines, status_id: run.status_id, stderr: run.stderr })
}

/// Submit the session's source for AI feedback and record the score, once.
#[instrument(level = "info", skip(state), fields(%session_id))]
pub async fn submit_action(state: &AppState, session_id: &str) -> Result<SubmitOutcome, CoreError> {
  let session = state.get_session(session_id).await?;

  // Fresh solved check before anything else. On a hit we skip the feedback
  // call entirely and write nothing.
  if state.progress.is_solved(&session.user_id, &session.problem_id).await {
    info!(target: "submission", user = %session.user_id, problem = %session.problem_id, "Already solved; skipping feedback");
    return Ok(SubmitOutcome::AlreadySolved);
  }

  let feedback = state
    .feedback
    .as_ref()
    .ok_or(CoreError::NotConfigured("feedback client"))?;
  let feedback_text = feedback.request_feedback(&state.prompts, &session.source).await?;
  let score = extract_score(&feedback_text)?;

  // The store re-checks under its write lock; a concurrent submit may have
  // recorded between our read and this write, in which case nothing changes.
  let recorded = state
    .progress
    .record_if_unsolved(&session.user_id, &session.problem_id, score)
    .await;
  if !recorded {
    return Ok(SubmitOutcome::AlreadySolved);
  }

  Ok(SubmitOutcome::Recorded(FeedbackRecord {
    source_snapshot: session.source,
    feedback_text,
    score,
  }))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::Language;

  fn offline_state() -> AppState {
    let mut state = AppState::new();
    state.judge = None;
    state.feedback = None;
    state
  }

  #[tokio::test]
  async fn solved_guard_short_circuits_before_feedback() {
    let state = offline_state();
    let session = state
      .create_session("u1", "two-sum", Language::Python)
      .await
      .unwrap();
    assert!(state.progress.record_if_unsolved("u1", "two-sum", 9).await);

    // No feedback client is configured: reaching the feedback call would be
    // an error, so an Ok here proves the guard fired first.
    let outcome = submit_action(&state, &session.id).await.unwrap();
    assert!(matches!(outcome, SubmitOutcome::AlreadySolved));

    // Zero writes: the original score is untouched.
    let progress = state.progress.get("u1").await;
    assert_eq!(progress.scores.get("two-sum"), Some(&9));
    assert_eq!(progress.scores.len(), 1);
  }

  #[tokio::test]
  async fn unsolved_submit_requires_the_feedback_client() {
    let state = offline_state();
    let session = state
      .create_session("u1", "two-sum", Language::Python)
      .await
      .unwrap();
    assert!(matches!(
      submit_action(&state, &session.id).await,
      Err(CoreError::NotConfigured("feedback client"))
    ));
    // A failed submit leaves state unchanged.
    assert!(!state.progress.is_solved("u1", "two-sum").await);
  }

  #[tokio::test]
  async fn second_submit_after_success_is_a_noop() {
    let state = offline_state();
    let session = state
      .create_session("u1", "reverse-string", Language::Python)
      .await
      .unwrap();

    // Stand in for a first successful submit.
    assert!(state.progress.record_if_unsolved("u1", "reverse-string", 6).await);
    let before = state.progress.get("u1").await;

    let outcome = submit_action(&state, &session.id).await.unwrap();
    assert!(matches!(outcome, SubmitOutcome::AlreadySolved));

    let after = state.progress.get("u1").await;
    assert_eq!(before.scores, after.scores);
    assert_eq!(before.solved, after.solved);
  }

  #[tokio::test]
  async fn run_without_judge_client_fails_cleanly() {
    let state = offline_state();
    let session = state
      .create_session("u1", "two-sum", Language::Cpp)
      .await
      .unwrap();
    assert!(matches!(
      run_action(&state, &session.id).await,
      Err(CoreError::NotConfigured("judge client"))
    ));
  }
}
