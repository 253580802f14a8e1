//! Error taxonomy for the run and submit actions.
//!
//! Every remote boundary gets its own variant so the action layer can report
//! what actually went wrong without string matching. Policy: errors surface at
//! the action boundary as a terminal failure of that action. No retries, no
//! partial results.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
  /// Stored boilerplate/driver (or another transport payload) failed to decode.
  #[error("malformed stored payload: {0}")]
  Decode(String),

  /// The judge's language list had no entry matching ours, or the lookup failed.
  #[error("could not resolve judge language: {0}")]
  LanguageResolution(String),

  /// Transport failure creating or fetching a judge submission.
  #[error("judge submission failed: {0}")]
  Submission(String),

  /// Network/transport failure talking to the AI evaluation endpoint.
  #[error("feedback request failed: {0}")]
  FeedbackTransport(String),

  /// The AI endpoint answered, but not in the expected shape.
  #[error("feedback response malformed: {0}")]
  FeedbackFormat(String),

  /// "Score is N/10" markers missing, reordered, or not an integer in range.
  #[error("score not found in feedback: {0}")]
  ScoreFormat(String),

  /// A required remote client has no API key configured.
  #[error("{0} is not configured (missing API key)")]
  NotConfigured(&'static str),

  /// Unknown problem or session id in a request.
  #[error("unknown {kind}: {id}")]
  UnknownId { kind: &'static str, id: String },
}
