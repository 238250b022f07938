//! HTTP endpoint handlers. These are thin wrappers that forward to the
//! evaluation pipeline; every decision lives in `logic`.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use tracing::{info, instrument};

use crate::error::ApiError;
use crate::logic::{evaluate_submission, fetch_question};
use crate::protocol::*;
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse {
    Json(HealthOut { ok: true })
}

#[instrument(level = "info", skip(state), fields(%category))]
pub async fn http_get_question(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
) -> Result<Json<QuestionOut>, ApiError> {
    let question = fetch_question(&state, &category, &mut rand::thread_rng())?;
    info!(target: "bank", %category, question_len = question.len(), "Question served");
    Ok(Json(QuestionOut { question }))
}

#[instrument(level = "info", skip(state, body), fields(%category, answer_len = body.answer.len()))]
pub async fn http_post_submit(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
    Json(body): Json<SubmitIn>,
) -> Result<Json<EvaluationOut>, ApiError> {
    let out = evaluate_submission(&state, &category, &body.answer).await?;
    info!(target: "grading", %category, marks = out.marks, max_marks = out.max_marks, "Submission evaluated");
    Ok(Json(out))
}
