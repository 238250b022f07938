//! Error taxonomy for the evaluation API.
//!
//! Only client-input and storage errors ever reach the caller; every
//! grading-path failure is logged and recovered locally by the fallback
//! grader (see `openai::GradeError`), so a submission always yields a
//! well-formed evaluation.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::protocol::ErrorOut;

#[derive(Debug, Error)]
pub enum ApiError {
  /// Requested category is outside the closed category set.
  #[error("Invalid category")]
  InvalidCategory,

  /// Submitted answer is empty or whitespace-only.
  #[error("Answer cannot be empty")]
  EmptyAnswer,

  /// The bank file parsed to zero question units.
  #[error("No questions found in file")]
  NoQuestionsFound,

  /// The bank file could not be read.
  #[error("Failed to load question")]
  StorageUnavailable,
}

impl ApiError {
  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::InvalidCategory | ApiError::EmptyAnswer => StatusCode::BAD_REQUEST,
      ApiError::NoQuestionsFound => StatusCode::NOT_FOUND,
      ApiError::StorageUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    (status, Json(ErrorOut { error: self.to_string() })).into_response()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn statuses_follow_the_taxonomy() {
    assert_eq!(ApiError::InvalidCategory.status(), StatusCode::BAD_REQUEST);
    assert_eq!(ApiError::EmptyAnswer.status(), StatusCode::BAD_REQUEST);
    assert_eq!(ApiError::NoQuestionsFound.status(), StatusCode::NOT_FOUND);
    assert_eq!(ApiError::StorageUnavailable.status(), StatusCode::INTERNAL_SERVER_ERROR);
  }
}
