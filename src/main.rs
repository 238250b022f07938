//! WriteDrill · Writing-Practice Evaluation Backend
//!
//! - Axum HTTP API (question fetch + answer submission)
//! - Optional OpenAI grading (via environment variables)
//!
//! Important env variables:
//!   PORT             : u16 (default 3000)
//!   QUESTIONS_DIR    : directory with one bank file per category (default ./questions)
//!   OPENAI_API_KEY   : enables OpenAI grading if present
//!   OPENAI_BASE_URL  : default "https://api.openai.com/v1"
//!   OPENAI_MODEL     : default "gpt-4o-mini"
//!   EVAL_CONFIG_PATH : path to TOML config (prompt overrides)
//!   LOG_LEVEL        : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT       : "pretty" (default) or "json"

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, instrument};

use writedrill_backend::routes::build_router;
use writedrill_backend::state::AppState;
use writedrill_backend::telemetry;

#[instrument(level = "info", skip_all)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Build shared application state (bank inventory, prompts, OpenAI client).
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
  info!(target: "writedrill_backend", %addr, "HTTP server listening");
  axum::serve(listener, app).await?;
  Ok(())
}
