//! The answer evaluation pipeline shared by the HTTP handlers.
//!
//! Two entry points:
//!   - `fetch_question`: bank load, parse, uniform random pick
//!   - `evaluate_submission`: similarity scan, one grading call, fallback,
//!     penalty composition

use rand::Rng;
use tracing::{debug, error, instrument, warn};

use crate::bank;
use crate::domain::Category;
use crate::error::ApiError;
use crate::grading::{compose, fallback_grade};
use crate::openai::GradeError;
use crate::protocol::EvaluationOut;
use crate::similarity;
use crate::state::AppState;

/// Sample one question for the requested category using the caller's rng.
/// Handlers pass `rand::thread_rng()`; tests pass a seeded rng.
#[instrument(level = "info", skip(state, rng), fields(category = %raw_category))]
pub fn fetch_question<R: Rng + ?Sized>(
  state: &AppState,
  raw_category: &str,
  rng: &mut R,
) -> Result<String, ApiError> {
  let category = Category::parse(raw_category).ok_or(ApiError::InvalidCategory)?;
  let units = bank::load_units(&state.questions_dir, category)?;
  bank::sample_question(&units, rng)
    .map(str::to_string)
    .ok_or(ApiError::NoQuestionsFound)
}

/// Evaluate a submitted answer. Always yields a well-formed evaluation unless
/// the input itself is invalid: every grading-path failure is absorbed by the
/// fallback grader.
#[instrument(level = "info", skip(state, answer), fields(category = %raw_category, answer_len = answer.len()))]
pub async fn evaluate_submission(
  state: &AppState,
  raw_category: &str,
  answer: &str,
) -> Result<EvaluationOut, ApiError> {
  if answer.trim().is_empty() {
    return Err(ApiError::EmptyAnswer);
  }

  // Originality check is best-effort: an unknown category or an unreadable
  // bank scores zero instead of failing the submission.
  let units = Category::parse(raw_category)
    .map(|c| bank::load_units(&state.questions_dir, c).unwrap_or_default())
    .unwrap_or_default();
  let best = similarity::best_match(answer, &units);
  debug!(target: "grading", score = %format!("{:.3}", best.score), units = units.len(), "Similarity scan done");

  let grading = match &state.openai {
    Some(oa) => match oa.grade(&state.prompts, raw_category, answer).await {
      Ok(g) => g,
      Err(e @ GradeError::Unavailable(_)) => {
        error!(target: "grading", error = %e, "Evaluator unreachable; using fallback grader");
        fallback_grade(answer)
      }
      Err(e @ GradeError::Malformed(_)) => {
        warn!(target: "grading", error = %e, "Evaluator broke the grading contract; using fallback grader");
        fallback_grade(answer)
      }
    },
    None => fallback_grade(answer),
  };

  let graded = compose(grading, &best);
  Ok(EvaluationOut {
    marks: graded.marks,
    max_marks: graded.max_marks,
    feedback: graded.feedback,
    user_answer: answer.to_string(),
  })
}
