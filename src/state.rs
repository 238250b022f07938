//! Application state: questions directory, prompts, and the optional OpenAI
//! client.
//!
//! Banks are re-read from disk per request, so there is no shared mutable
//! state here and requests never contend for locks.

use std::path::PathBuf;

use tracing::{info, instrument, warn};

use crate::bank;
use crate::config::{load_eval_config_from_env, questions_dir_from_env, Prompts};
use crate::domain::Category;
use crate::openai::OpenAI;

#[derive(Clone)]
pub struct AppState {
    pub questions_dir: PathBuf,
    pub prompts: Prompts,
    pub openai: Option<OpenAI>,
}

impl AppState {
    /// Build state from env: load config, inventory the banks, init OpenAI.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let prompts = load_eval_config_from_env()
            .map(|c| c.prompts)
            .unwrap_or_default();
        let questions_dir = questions_dir_from_env();

        // Startup inventory. Unreadable banks are not fatal: question fetches
        // for them fail per-request and submissions lose only the
        // originality check.
        for category in Category::ALL {
            match bank::load_units(&questions_dir, category) {
                Ok(units) => {
                    info!(target: "bank", %category, units = units.len(), "Question bank loaded")
                }
                Err(_) => {
                    warn!(target: "bank", %category, dir = %questions_dir.display(), "Question bank unreadable at startup")
                }
            }
        }

        let openai = OpenAI::from_env();
        if let Some(oa) = &openai {
            info!(target: "writedrill_backend", base_url = %oa.base_url, model = %oa.model, "OpenAI grading enabled.");
        } else {
            info!(target: "writedrill_backend", "OpenAI disabled (no OPENAI_API_KEY). Fallback grading only.");
        }

        Self { questions_dir, prompts, openai }
    }
}
