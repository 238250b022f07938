//! Deterministic fallback grading and final result composition.

use crate::domain::{BestMatch, Feedback, GradingResult, MAX_MARKS};

/// One mark is earned per this many words in the fallback path.
const WORDS_PER_MARK: usize = 25;

/// Similarity above this triggers the originality penalty.
const SIMILARITY_THRESHOLD: f64 = 0.7;

/// Fraction of max marks forfeited at full similarity.
const PENALTY_SEVERITY: f64 = 0.5;

/// Content-agnostic grading used whenever the evaluator's output is
/// unavailable or non-conformant. Marks grow with word count and saturate at
/// `MAX_MARKS`, so short answers never silently score full marks.
pub fn fallback_grade(answer: &str) -> GradingResult {
  let words = answer.split_whitespace().count();
  GradingResult {
    marks: ((words / WORDS_PER_MARK) as u32).min(MAX_MARKS),
    max_marks: MAX_MARKS,
    feedback: Feedback {
      strengths: "Relevant ideas and clear expression.".into(),
      weaknesses: "Structure could be improved.".into(),
      suggestions: "Add examples and use a more formal tone.".into(),
    },
  }
}

/// Merge a grading result with the originality check.
///
/// Above the similarity threshold, `round(score × MAX_MARKS × 0.5)` marks are
/// subtracted (floored at 0) and a disclosure note with the similarity
/// percentage is appended to the weaknesses. A verbatim copy forfeits all
/// marks. Below the threshold the grading result passes through unchanged.
pub fn compose(mut grading: GradingResult, similarity: &BestMatch) -> GradingResult {
  if similarity.score > SIMILARITY_THRESHOLD {
    let penalty = if similarity.score >= 1.0 {
      MAX_MARKS
    } else {
      (similarity.score * MAX_MARKS as f64 * PENALTY_SEVERITY).round() as u32
    };
    grading.marks = grading.marks.saturating_sub(penalty);

    let pct = (similarity.score * 100.0).round() as u32;
    let note = format!(
      "Note: the answer is {pct}% similar to a source prompt; marks were reduced for lack of originality."
    );
    if grading.feedback.weaknesses.trim().is_empty() {
      grading.feedback.weaknesses = note;
    } else {
      grading.feedback.weaknesses.push(' ');
      grading.feedback.weaknesses.push_str(&note);
    }
  }

  // Upstream stages clamp their own output; re-check anyway.
  grading.marks = grading.marks.min(MAX_MARKS);
  grading
}

#[cfg(test)]
mod tests {
  use super::*;

  fn graded(marks: u32) -> GradingResult {
    GradingResult { marks, max_marks: MAX_MARKS, feedback: Feedback::default() }
  }

  #[test]
  fn fallback_marks_grow_with_word_count() {
    assert_eq!(fallback_grade("short answer right here now").marks, 0); // 5 words
    let fifty: String = std::iter::repeat("word").take(50).collect::<Vec<_>>().join(" ");
    assert_eq!(fallback_grade(&fifty).marks, 2);
  }

  #[test]
  fn fallback_marks_saturate_at_max() {
    let long: String = std::iter::repeat("word").take(400).collect::<Vec<_>>().join(" ");
    assert_eq!(fallback_grade(&long).marks, MAX_MARKS);
  }

  #[test]
  fn fallback_feedback_is_always_present() {
    let g = fallback_grade("");
    assert_eq!(g.marks, 0);
    assert_eq!(g.max_marks, MAX_MARKS);
    assert!(!g.feedback.strengths.is_empty());
    assert!(!g.feedback.weaknesses.is_empty());
    assert!(!g.feedback.suggestions.is_empty());
  }

  #[test]
  fn high_similarity_subtracts_the_penalty() {
    // round(0.9 * 10 * 0.5) = 5, so 8 -> 3.
    let out = compose(graded(8), &BestMatch { score: 0.9, unit: Some("q".into()) });
    assert_eq!(out.marks, 3);
    assert!(out.feedback.weaknesses.contains("90%"));
  }

  #[test]
  fn penalty_floors_at_zero() {
    let out = compose(graded(2), &BestMatch { score: 0.9, unit: Some("q".into()) });
    assert_eq!(out.marks, 0);
  }

  #[test]
  fn verbatim_copy_forfeits_all_marks() {
    let out = compose(graded(MAX_MARKS), &BestMatch { score: 1.0, unit: Some("q".into()) });
    assert_eq!(out.marks, 0);
    assert!(out.feedback.weaknesses.contains("100%"));
  }

  #[test]
  fn threshold_is_strict() {
    let out = compose(graded(8), &BestMatch { score: 0.7, unit: Some("q".into()) });
    assert_eq!(out.marks, 8);
    assert!(out.feedback.weaknesses.is_empty());
  }

  #[test]
  fn composer_reclamps_final_marks() {
    let out = compose(graded(10), &BestMatch { score: 0.2, unit: None });
    assert!(out.marks <= MAX_MARKS);
  }
}
