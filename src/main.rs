//! CodeArena · Coding-practice submission backend
//!
//! - Axum HTTP API for editor sessions, runs, submits, and progress
//! - Remote judge integration (Judge0-style, synchronous wait mode)
//! - Optional AI feedback integration (chat-completions endpoint)
//!
//! Important env variables:
//!   PORT              : u16 (default 3000)
//!   JUDGE_API_KEY     : enables the judge client if present
//!   JUDGE_BASE_URL    : default "https://judge0-ce.p.rapidapi.com"
//!   JUDGE_API_HOST    : default "judge0-ce.p.rapidapi.com"
//!   FEEDBACK_API_KEY  : enables the AI feedback client if present
//!   FEEDBACK_BASE_URL : default "https://api.deepseek.com"
//!   FEEDBACK_MODEL    : default "deepseek-chat"
//!   ARENA_CONFIG_PATH : path to TOML config (prompts + optional problem bank)
//!   LOG_LEVEL         : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT        : "pretty" (default) or "json"

mod telemetry;
mod util;
mod error;
mod domain;
mod config;
mod seeds;
mod compose;
mod judge;
mod verdict;
mod feedback;
mod score;
mod progress;
mod state;
mod protocol;
mod logic;
mod routes;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, instrument};

use crate::routes::build_router;
use crate::state::AppState;

#[instrument(level = "info", skip_all)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Build shared application state (problem index, progress store, clients).
  let state = Arc::new(AppState::new());

  // Build the HTTP router with routes, CORS and tracing layers.
  let app = build_router(state.clone());

  // Read port from env or default to 3000.
  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "codearena_backend", %addr, "HTTP server listening");
  axum::serve(listener, app).await?;
  Ok(())
}
