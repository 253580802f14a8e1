//! Minimal AI-evaluation client (chat-completions API).
//!
//! One call shape only: a fixed rubric system turn plus the user's raw source
//! as the user turn, non-streaming, bounded response size. The full body is
//! buffered before parsing; there is no partial delivery and no cancellation
//! once the request is on the wire.
//!
//! NOTE: We never log the API key and we keep payload truncations short.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::config::Prompts;
use crate::error::CoreError;

const TEMPERATURE: f32 = 0.2;
const MAX_TOKENS: u32 = 2048;

#[derive(Clone)]
pub struct FeedbackClient {
  pub client: reqwest::Client,
  pub api_key: String,
  pub base_url: String,
  pub model: String,
}

impl FeedbackClient {
  /// Construct the client if we find FEEDBACK_API_KEY; otherwise return None.
  pub fn from_env() -> Option<Self> {
    let api_key = std::env::var("FEEDBACK_API_KEY").ok()?;
    let base_url =
      std::env::var("FEEDBACK_BASE_URL").unwrap_or_else(|_| "https://api.deepseek.com".into());
    let model = std::env::var("FEEDBACK_MODEL").unwrap_or_else(|_| "deepseek-chat".into());

    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(60))
      .build()
      .ok()?;

    Some(Self { client, api_key, base_url, model })
  }

  /// Request qualitative feedback on the user's source. The rubric prompt
  /// dictates the "Score is N/10" closing line the score extractor parses.
  #[instrument(level = "info", skip(self, prompts, source), fields(model = %self.model, source_len = source.len()))]
  pub async fn request_feedback(
    &self,
    prompts: &Prompts,
    source: &str,
  ) -> Result<String, CoreError> {
    let url = format!("{}/v1/chat/completions", self.base_url);
    let req = ChatCompletionRequest {
      model: self.model.clone(),
      messages: vec![
        ChatMessageReq { role: "system".into(), content: prompts.feedback_system.clone() },
        ChatMessageReq { role: "user".into(), content: source.into() },
      ],
      temperature: TEMPERATURE,
      max_tokens: MAX_TOKENS,
      frequency_penalty: 0.0,
      presence_penalty: 0.0,
      top_p: 1.0,
      stream: false,
    };

    let start = std::time::Instant::now();
    let res = self
      .client
      .post(&url)
      .header(USER_AGENT, "codearena-backend/0.1")
      .header(CONTENT_TYPE, "application/json")
      .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
      .json(&req)
      .send()
      .await
      .map_err(|e| CoreError::FeedbackTransport(e.to_string()))?;

    if !res.status().is_success() {
      let status = res.status();
      let body = res.text().await.unwrap_or_default();
      let msg = extract_api_error(&body).unwrap_or(body);
      return Err(CoreError::FeedbackTransport(format!("HTTP {}: {}", status, msg)));
    }

    let body: ChatCompletionResponse = res
      .json()
      .await
      .map_err(|e| CoreError::FeedbackFormat(e.to_string()))?;
    if let Some(usage) = &body.usage {
      info!(
        target: "submission",
        prompt_tokens = ?usage.prompt_tokens,
        completion_tokens = ?usage.completion_tokens,
        total_tokens = ?usage.total_tokens,
        "Feedback usage"
      );
    }

    let text = body
      .choices
      .first()
      .and_then(|c| c.message.content.clone())
      .ok_or_else(|| CoreError::FeedbackFormat("response has no message content".into()))?;

    info!(target: "submission", elapsed = ?start.elapsed(), feedback_len = text.len(), "Feedback received");
    Ok(text)
  }
}

// --- Chat DTOs ---

#[derive(Serialize)]
struct ChatCompletionRequest {
  model: String,
  messages: Vec<ChatMessageReq>,
  temperature: f32,
  max_tokens: u32,
  frequency_penalty: f32,
  presence_penalty: f32,
  top_p: f32,
  stream: bool,
}
#[derive(Serialize)]
struct ChatMessageReq { role: String, content: String }

#[derive(Deserialize)]
struct ChatCompletionResponse {
  choices: Vec<ChatChoice>,
  #[serde(default)] usage: Option<Usage>,
}
#[derive(Deserialize)]
struct ChatChoice { message: ChatMessageResp }
#[derive(Deserialize)]
struct ChatMessageResp { content: Option<String> }
#[derive(Deserialize)]
struct Usage {
  #[serde(default)] prompt_tokens: Option<u32>,
  #[serde(default)] completion_tokens: Option<u32>,
  #[serde(default)] total_tokens: Option<u32>,
}

/// Try to extract a clean error message from the provider's error body.
fn extract_api_error(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct EWrap { error: EObj }
  #[derive(Deserialize)]
  struct EObj { message: String }
  match serde_json::from_str::<EWrap>(body) {
    Ok(w) => Some(w.error.message),
    Err(_) => None,
  }
}
