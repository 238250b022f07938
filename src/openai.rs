//! Minimal OpenAI client for the grading call.
//!
//! One chat.completions request is made per submission; the reply is parsed
//! with a tolerant two-stage strategy (strict JSON, then the substring between
//! the outermost braces) because the evaluator is an untrusted text generator.
//! Calls are instrumented and log model names, latencies, and token usage
//! (not answer contents).
//!
//! NOTE: We never log the API key.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, instrument};

use crate::config::Prompts;
use crate::domain::{Feedback, GradingResult, MAX_MARKS};
use crate::util::{fill_template, trunc_for_log};

/// Grading-path failures. Neither variant is ever surfaced to the caller;
/// both are logged and recovered by the fallback grader. The split exists for
/// observability: frequent `Unavailable` means the service is degraded,
/// frequent `Malformed` means the evaluator stopped honoring the contract.
#[derive(Debug, Error)]
pub enum GradeError {
  /// Transport, HTTP, or timeout failure reaching the evaluator.
  #[error("evaluator unavailable: {0}")]
  Unavailable(String),
  /// A reply arrived but no conformant grading object could be recovered.
  #[error("malformed evaluator output: {0}")]
  Malformed(String),
}

#[derive(Clone)]
pub struct OpenAI {
  pub client: reqwest::Client,
  pub api_key: String,
  pub base_url: String,
  pub model: String,
}

impl OpenAI {
  /// Construct the client if we find OPENAI_API_KEY; otherwise return None.
  pub fn from_env() -> Option<Self> {
    let api_key = std::env::var("OPENAI_API_KEY").ok()?;
    let base_url =
      std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| "https://api.openai.com/v1".into());
    let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into());

    // The timeout doubles as the bounded wait for the grading call; hitting
    // it is treated like any other transport failure.
    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(20))
      .build()
      .ok()?;

    Some(Self { client, api_key, base_url, model })
  }

  /// Plain-text chat completion.
  #[instrument(level = "info", skip(self, system, user), fields(model = %self.model))]
  async fn chat_plain(
    &self,
    system: &str,
    user: &str,
    temperature: f32,
  ) -> Result<String, String> {
    let url = format!("{}/chat/completions", self.base_url);
    let req = ChatCompletionRequest {
      model: self.model.clone(),
      messages: vec![
        ChatMessageReq { role: "system".into(), content: system.into() },
        ChatMessageReq { role: "user".into(), content: user.into() },
      ],
      temperature,
      max_tokens: Some(600),
    };

    let res = self.client.post(&url)
      .header(USER_AGENT, "writedrill-backend/0.1")
      .header(CONTENT_TYPE, "application/json")
      .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
      .json(&req).send().await.map_err(|e| e.to_string())?;

    if !res.status().is_success() {
      let status = res.status();
      let body = res.text().await.unwrap_or_default();
      let msg = extract_openai_error(&body).unwrap_or_else(|| body);
      return Err(format!("OpenAI HTTP {}: {}", status, msg));
    }

    let body: ChatCompletionResponse = res.json().await.map_err(|e| e.to_string())?;
    if let Some(usage) = &body.usage {
      info!(prompt_tokens = ?usage.prompt_tokens, completion_tokens = ?usage.completion_tokens, total_tokens = ?usage.total_tokens, "OpenAI usage");
    }
    let text = body.choices.get(0)
      .and_then(|c| c.message.content.clone())
      .unwrap_or_default().trim().to_string();

    Ok(text)
  }

  /// One grading request for a submitted answer. Never retries.
  #[instrument(level = "info", skip(self, prompts, answer), fields(%category, answer_len = answer.len()))]
  pub async fn grade(
    &self,
    prompts: &Prompts,
    category: &str,
    answer: &str,
  ) -> Result<GradingResult, GradeError> {
    let user = fill_template(
      &prompts.grading_user_template,
      &[("category", category), ("answer", answer)],
    );

    let start = std::time::Instant::now();
    let text = self
      .chat_plain(&prompts.grading_system, &user, 0.4)
      .await
      .map_err(GradeError::Unavailable)?;
    let elapsed = start.elapsed();

    match parse_grading_reply(&text) {
      Some(g) => {
        info!(?elapsed, marks = g.marks, "Evaluator reply accepted");
        Ok(g)
      }
      None => Err(GradeError::Malformed(trunc_for_log(&text, 160))),
    }
  }
}

#[derive(Deserialize, Default)]
struct RawFeedback {
  #[serde(default)]
  strengths: String,
  #[serde(default)]
  weaknesses: String,
  #[serde(default)]
  suggestions: String,
}

#[derive(Deserialize)]
struct RawGrading {
  #[serde(default)]
  marks: Option<f64>,
  #[serde(default)]
  feedback: Option<RawFeedback>,
}

/// Two-stage tolerant parse of the evaluator's reply text.
///
/// Stage one parses the whole text as JSON; stage two retries on the
/// substring bounded by the outermost braces (models like to wrap the object
/// in prose). Returns None when no object with a numeric `marks` field can be
/// recovered. `marks` is always clamped into `[0, MAX_MARKS]` — the upstream
/// grader is never trusted to respect the bound.
pub fn parse_grading_reply(text: &str) -> Option<GradingResult> {
  let raw = serde_json::from_str::<RawGrading>(text)
    .ok()
    .or_else(|| extract_braced(text).and_then(|s| serde_json::from_str(s).ok()))?;

  let marks = raw.marks.filter(|m| m.is_finite())?;
  let marks = marks.round().clamp(0.0, MAX_MARKS as f64) as u32;
  let fb = raw.feedback.unwrap_or_default();

  Some(GradingResult {
    marks,
    max_marks: MAX_MARKS,
    feedback: Feedback {
      strengths: fb.strengths,
      weaknesses: fb.weaknesses,
      suggestions: fb.suggestions,
    },
  })
}

fn extract_braced(text: &str) -> Option<&str> {
  let start = text.find('{')?;
  let end = text.rfind('}')?;
  (end > start).then(|| &text[start..=end])
}

// --- Chat DTOs ---

#[derive(Serialize)]
struct ChatCompletionRequest {
  model: String,
  messages: Vec<ChatMessageReq>,
  temperature: f32,
  #[serde(skip_serializing_if = "Option::is_none")]
  max_tokens: Option<u32>,
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

/// Try to extract a clean error message from OpenAI error body.
fn extract_openai_error(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct EWrap { error: EObj }
  #[derive(Deserialize)]
  struct EObj { message: String }
  match serde_json::from_str::<EWrap>(body) {
    Ok(w) => Some(w.error.message),
    Err(_) => None,
  }
}
