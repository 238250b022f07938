//! Public request/response DTOs for the HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::domain::Feedback;

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

/// One sampled question for a category.
#[derive(Debug, Serialize)]
pub struct QuestionOut {
    pub question: String,
}

#[derive(Debug, Deserialize)]
pub struct SubmitIn {
    pub answer: String,
}

/// Externally observable result of a submission. Derived per request, never
/// stored.
#[derive(Clone, Debug, Serialize)]
pub struct EvaluationOut {
    pub marks: u32,
    #[serde(rename = "maxMarks")]
    pub max_marks: u32,
    pub feedback: Feedback,
    #[serde(rename = "userAnswer")]
    pub user_answer: String,
}

#[derive(Serialize)]
pub struct ErrorOut {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluation_out_uses_wire_field_names() {
        let out = EvaluationOut {
            marks: 3,
            max_marks: 10,
            feedback: Feedback::default(),
            user_answer: "abc".into(),
        };
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["maxMarks"], 10);
        assert_eq!(json["userAnswer"], "abc");
        assert!(json["feedback"]["strengths"].is_string());
    }
}
