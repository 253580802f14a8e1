//! Minimal judge-service client (Judge0-style API).
//!
//! Two outbound calls per run: create a submission with server-side wait, then
//! fetch its output by token. Source and stdout cross the wire transport-encoded.
//! Calls are instrumented and log language ids, tokens, and status (not code).
//!
//! NOTE: We never log the API key. There is no client-side polling and no
//! retry; the service's own synchronous "wait" mode does the blocking, and a
//! wait timeout simply comes back with no stdout.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::domain::Language;
use crate::error::CoreError;
use crate::util::{decode_text, encode_text};

const API_KEY_HEADER: &str = "X-RapidAPI-Key";
const API_HOST_HEADER: &str = "X-RapidAPI-Host";

#[derive(Clone)]
pub struct JudgeClient {
  pub client: reqwest::Client,
  pub api_key: String,
  pub api_host: String,
  pub base_url: String,
}

/// Everything the caller needs after one run: decoded stdout plus the raw
/// status fields for logging/diagnostics.
#[derive(Clone, Debug)]
pub struct JudgeRun {
  pub token: String,
  pub stdout: String,
  pub stderr: Option<String>,
  pub status_id: Option<i64>,
}

impl JudgeClient {
  /// Construct the client if we find JUDGE_API_KEY; otherwise return None.
  pub fn from_env() -> Option<Self> {
    let api_key = std::env::var("JUDGE_API_KEY").ok()?;
    let base_url = std::env::var("JUDGE_BASE_URL")
      .unwrap_or_else(|_| "https://judge0-ce.p.rapidapi.com".into());
    let api_host = std::env::var("JUDGE_API_HOST")
      .unwrap_or_else(|_| "judge0-ce.p.rapidapi.com".into());

    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(60))
      .build()
      .ok()?;

    Some(Self { client, api_key, api_host, base_url })
  }

  /// Resolve the remote numeric id for a language by exact name match against
  /// the judge's language list.
  #[instrument(level = "info", skip(self), fields(language = lang.judge_name()))]
  pub async fn resolve_language_id(&self, lang: Language) -> Result<u64, CoreError> {
    let url = format!("{}/languages", self.base_url);
    let res = self
      .client
      .get(&url)
      .header(USER_AGENT, "codearena-backend/0.1")
      .header(API_KEY_HEADER, &self.api_key)
      .header(API_HOST_HEADER, &self.api_host)
      .send()
      .await
      .map_err(|e| CoreError::LanguageResolution(e.to_string()))?;

    if !res.status().is_success() {
      return Err(CoreError::LanguageResolution(format!("judge HTTP {}", res.status())));
    }
    let list: Vec<RemoteLanguage> = res
      .json()
      .await
      .map_err(|e| CoreError::LanguageResolution(e.to_string()))?;

    match list.iter().find(|l| l.name == lang.judge_name()) {
      Some(found) => {
        info!(target: "submission", language = %found.name, id = found.id, "Judge language resolved");
        Ok(found.id)
      }
      None => Err(CoreError::LanguageResolution(format!(
        "no judge language named '{}'",
        lang.judge_name()
      ))),
    }
  }

  /// Submit a composed program and fetch its output.
  ///
  /// The create request uses the service's synchronous wait mode, so the
  /// returned token refers to a finished submission; the follow-up fetch asks
  /// for stdout/stderr/status only. Non-idempotent: every call creates a new
  /// remote submission.
  #[instrument(level = "info", skip(self, composed), fields(source_len = composed.len()))]
  pub async fn run(&self, composed: &str, language_id: u64) -> Result<JudgeRun, CoreError> {
    let url = format!("{}/submissions?base64_encoded=true&wait=true&fields=*", self.base_url);
    let req = SubmissionCreate {
      source_code: encode_text(composed),
      language_id,
      base64_encoded: true,
    };

    let start = std::time::Instant::now();
    let res = self
      .client
      .post(&url)
      .header(USER_AGENT, "codearena-backend/0.1")
      .header(CONTENT_TYPE, "application/json")
      .header(API_KEY_HEADER, &self.api_key)
      .header(API_HOST_HEADER, &self.api_host)
      .json(&req)
      .send()
      .await
      .map_err(|e| CoreError::Submission(e.to_string()))?;

    if !res.status().is_success() {
      let status = res.status();
      let body = res.text().await.unwrap_or_default();
      error!(target: "submission", %status, body = %crate::util::trunc_for_log(&body, 200), "Judge rejected submission");
      return Err(CoreError::Submission(format!("judge HTTP {}", status)));
    }

    let created: SubmissionCreated =
      res.json().await.map_err(|e| CoreError::Submission(e.to_string()))?;
    info!(target: "submission", token = %created.token, elapsed = ?start.elapsed(), "Judge submission created");

    let status_url = format!(
      "{}/submissions/{}?base64_encoded=true&fields=stdout,stderr,status_id,language_id",
      self.base_url, created.token
    );
    let res = self
      .client
      .get(&status_url)
      .header(USER_AGENT, "codearena-backend/0.1")
      .header(API_KEY_HEADER, &self.api_key)
      .header(API_HOST_HEADER, &self.api_host)
      .send()
      .await
      .map_err(|e| CoreError::Submission(e.to_string()))?;

    if !res.status().is_success() {
      return Err(CoreError::Submission(format!("judge HTTP {}", res.status())));
    }
    let status: SubmissionStatus =
      res.json().await.map_err(|e| CoreError::Submission(e.to_string()))?;

    // A server-side wait timeout leaves stdout unset; that decodes to empty
    // output and the interpreter reports zero test markers.
    let stdout = match &status.stdout {
      Some(encoded) => decode_text(encoded)
        .map_err(|e| CoreError::Submission(format!("stdout not decodable: {}", e)))?,
      None => String::new(),
    };

    info!(
      target: "submission",
      token = %created.token,
      status_id = ?status.status_id,
      stdout_len = stdout.len(),
      has_stderr = status.stderr.is_some(),
      "Judge submission fetched"
    );

    Ok(JudgeRun {
      token: created.token,
      stdout,
      stderr: status.stderr,
      status_id: status.status_id,
    })
  }
}

// --- Judge DTOs ---

#[derive(Deserialize)]
struct RemoteLanguage {
  id: u64,
  name: String,
}

#[derive(Serialize)]
struct SubmissionCreate {
  source_code: String,
  language_id: u64,
  base64_encoded: bool,
}

#[derive(Deserialize)]
struct SubmissionCreated {
  token: String,
}

#[derive(Deserialize)]
struct SubmissionStatus {
  #[serde(default)]
  stdout: Option<String>,
  #[serde(default)]
  stderr: Option<String>,
  #[serde(default)]
  status_id: Option<i64>,
  #[serde(default)]
  #[allow(dead_code)]
  language_id: Option<u64>,
}
