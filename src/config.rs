//! Evaluator prompts and storage settings, optionally overridden from TOML.
//!
//! See `EvalConfig` and `Prompts` for the expected schema.

use std::path::PathBuf;

use serde::Deserialize;
use tracing::{error, info};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct EvalConfig {
  #[serde(default)]
  pub prompts: Prompts,
}

/// Prompts used for the grading call. The defaults demand the strict JSON
/// grading contract; override them in TOML only if you keep that contract,
/// since reply parsing depends on it.
#[derive(Clone, Debug, Deserialize)]
pub struct Prompts {
  pub grading_system: String,
  pub grading_user_template: String,
}

impl Default for Prompts {
  fn default() -> Self {
    Self {
      grading_system: "You are an experienced evaluator for descriptive writing tests like bank exams. \
Evaluate the student's answer fairly and objectively. \
Respond ONLY with a single JSON object and nothing else, with these keys: \
{\"marks\": <integer between 0 and 10>, \"maxMarks\": 10, \"feedback\": {\"strengths\": \"<2-3 lines>\", \"weaknesses\": \"<2-3 lines>\", \"suggestions\": \"<2-3 lines>\"}}"
        .into(),
      grading_user_template: "Category: {category}\nStudent's Answer:\n{answer}".into(),
    }
  }
}

/// Attempt to load `EvalConfig` from EVAL_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_eval_config_from_env() -> Option<EvalConfig> {
  let path = std::env::var("EVAL_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<EvalConfig>(&s) {
      Ok(cfg) => {
        info!(target: "writedrill_backend", %path, "Loaded evaluator config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "writedrill_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "writedrill_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

/// Directory holding one bank file per category (QUESTIONS_DIR, default "./questions").
pub fn questions_dir_from_env() -> PathBuf {
  std::env::var("QUESTIONS_DIR")
    .map(PathBuf::from)
    .unwrap_or_else(|_| PathBuf::from("./questions"))
}
