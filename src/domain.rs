//! Domain models: writing-task categories and the grading contract.

use serde::{Deserialize, Serialize};

/// Maximum marks awarded on any grading path (evaluator or fallback).
pub const MAX_MARKS: u32 = 10;

/// Closed set of writing-task categories. Each maps 1:1 to one question bank
/// file on disk; nothing outside this set is ever looked up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
  Letter,
  Essay,
  Report,
  Email,
  Comprehension,
  Situation,
  Precise,
}

impl Category {
  pub const ALL: [Category; 7] = [
    Category::Letter,
    Category::Essay,
    Category::Report,
    Category::Email,
    Category::Comprehension,
    Category::Situation,
    Category::Precise,
  ];

  /// Case-insensitive parse. Unknown names yield None (callers map that to a
  /// client error).
  pub fn parse(s: &str) -> Option<Self> {
    match s.to_ascii_lowercase().as_str() {
      "letter" => Some(Category::Letter),
      "essay" => Some(Category::Essay),
      "report" => Some(Category::Report),
      "email" => Some(Category::Email),
      "comprehension" => Some(Category::Comprehension),
      "situation" => Some(Category::Situation),
      "precise" => Some(Category::Precise),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Category::Letter => "letter",
      Category::Essay => "essay",
      Category::Report => "report",
      Category::Email => "email",
      Category::Comprehension => "comprehension",
      Category::Situation => "situation",
      Category::Precise => "precise",
    }
  }

  /// Bank file for this category, relative to the questions directory.
  pub fn file_name(&self) -> &'static str {
    match self {
      Category::Letter => "letter.txt",
      Category::Essay => "essay.txt",
      Category::Report => "report.txt",
      Category::Email => "email.txt",
      Category::Comprehension => "comprehension.txt",
      Category::Situation => "situation.txt",
      Category::Precise => "precise.txt",
    }
  }
}

impl std::fmt::Display for Category {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Three-part structured feedback every grading result must carry.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Feedback {
  pub strengths: String,
  pub weaknesses: String,
  pub suggestions: String,
}

/// The grading contract. Produced either by the evaluator adapter or by the
/// local fallback grader; downstream code never needs to know which.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GradingResult {
  pub marks: u32,
  #[serde(rename = "maxMarks")]
  pub max_marks: u32,
  pub feedback: Feedback,
}

/// Highest-scoring question unit for a submitted answer.
/// `unit` is None when the category resolved to no units at all.
#[derive(Clone, Debug, PartialEq)]
pub struct BestMatch {
  pub score: f64,
  pub unit: Option<String>,
}
