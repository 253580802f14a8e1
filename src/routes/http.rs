//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented; action errors become a JSON error payload
//! with a status code matched to the failure class.

use std::sync::Arc;

use axum::{
  extract::{Query, State},
  http::StatusCode,
  Json,
};
use tracing::{info, instrument, warn};

use crate::error::CoreError;
use crate::logic::{run_action, submit_action, SubmitOutcome};
use crate::protocol::*;
use crate::state::AppState;

type ApiError = (StatusCode, Json<ErrorOut>);

/// Map an action-boundary error to a response. Every error is terminal for
/// its action; nothing here retries.
fn api_error(e: CoreError) -> ApiError {
  let status = match &e {
    CoreError::UnknownId { .. } => StatusCode::NOT_FOUND,
    CoreError::NotConfigured(_) => StatusCode::SERVICE_UNAVAILABLE,
    CoreError::Decode(_) => StatusCode::INTERNAL_SERVER_ERROR,
    CoreError::LanguageResolution(_)
    | CoreError::Submission(_)
    | CoreError::FeedbackTransport(_)
    | CoreError::FeedbackFormat(_)
    | CoreError::ScoreFormat(_) => StatusCode::BAD_GATEWAY,
  };
  warn!(target: "codearena_backend", %status, error = %e, "Action failed");
  (status, Json(ErrorOut { message: e.to_string() }))
}

#[instrument(level = "info")]
pub async fn http_health() -> Json<HealthOut> {
  Json(HealthOut { ok: true })
}

#[instrument(level = "info", skip(state))]
pub async fn http_list_problems(State(state): State<Arc<AppState>>) -> Json<Vec<ProblemOut>> {
  Json(state.list_problems().into_iter().map(problem_out).collect())
}

#[instrument(level = "info", skip(state), fields(%q.problem_id))]
pub async fn http_get_problem(
  State(state): State<Arc<AppState>>,
  Query(q): Query<ProblemQuery>,
) -> Result<Json<ProblemOut>, ApiError> {
  let problem = state.get_problem(&q.problem_id).map_err(api_error)?;
  Ok(Json(problem_out(problem)))
}

#[instrument(level = "info", skip(state, body), fields(%body.user_id, %body.problem_id))]
pub async fn http_create_session(
  State(state): State<Arc<AppState>>,
  Json(body): Json<SessionCreateIn>,
) -> Result<Json<SessionOut>, ApiError> {
  let session = state
    .create_session(&body.user_id, &body.problem_id, body.language)
    .await
    .map_err(api_error)?;
  Ok(Json(session_out(&session)))
}

#[instrument(level = "info", skip(state, body), fields(%body.session_id))]
pub async fn http_switch_language(
  State(state): State<Arc<AppState>>,
  Json(body): Json<LanguageSwitchIn>,
) -> Result<Json<SessionOut>, ApiError> {
  let session = state
    .switch_language(&body.session_id, body.language)
    .await
    .map_err(api_error)?;
  Ok(Json(session_out(&session)))
}

#[instrument(level = "info", skip(state, body), fields(%body.session_id, source_len = body.source.len()))]
pub async fn http_update_source(
  State(state): State<Arc<AppState>>,
  Json(body): Json<SourceUpdateIn>,
) -> Result<Json<OkOut>, ApiError> {
  state
    .update_source(&body.session_id, body.source)
    .await
    .map_err(api_error)?;
  Ok(Json(OkOut { ok: true }))
}

#[instrument(level = "info", skip(state, body), fields(%body.session_id))]
pub async fn http_run(
  State(state): State<Arc<AppState>>,
  Json(body): Json<RunIn>,
) -> Result<Json<RunOut>, ApiError> {
  let report = run_action(&state, &body.session_id).await.map_err(api_error)?;
  info!(target: "submission", session = %body.session_id, cases = report.outcomes.len(), "HTTP run served");
  Ok(Json(RunOut {
    outcomes: report.outcomes,
    lines: report.lines,
    status_id: report.status_id,
    stderr: report.stderr,
  }))
}

#[instrument(level = "info", skip(state, body), fields(%body.session_id))]
pub async fn http_submit(
  State(state): State<Arc<AppState>>,
  Json(body): Json<SubmitIn>,
) -> Result<Json<SubmitOut>, ApiError> {
  let outcome = submit_action(&state, &body.session_id).await.map_err(api_error)?;
  let out = match outcome {
    SubmitOutcome::AlreadySolved => SubmitOut::AlreadySolved,
    SubmitOutcome::Recorded(record) => SubmitOut::Recorded {
      feedback: record.feedback_text,
      score: record.score,
    },
  };
  Ok(Json(out))
}

#[instrument(level = "info", skip(state), fields(%q.user_id))]
pub async fn http_get_progress(
  State(state): State<Arc<AppState>>,
  Query(q): Query<ProgressQuery>,
) -> Json<ProgressOut> {
  let progress = state.progress.get(&q.user_id).await;
  let mut solved: Vec<String> = progress.solved.into_iter().collect();
  solved.sort();
  Json(ProgressOut { solved, scores: progress.scores })
}
