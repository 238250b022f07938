//! End-to-end tests of the evaluation pipeline with no evaluator configured:
//! bank parsing + sampling, fallback grading, and penalty composition.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use tempfile::TempDir;

use writedrill_backend::config::Prompts;
use writedrill_backend::error::ApiError;
use writedrill_backend::logic::{evaluate_submission, fetch_question};
use writedrill_backend::state::AppState;

const ESSAY_BANK: &str = "\
Write an essay on the role of rivers in early civilizations.
===QUESTION===
Write an essay about a book that changed your mind.

Explain what you believed before and after reading it.
===QUESTION===
Write an essay on the impact of remote work on cities.
";

fn state_with_banks(dir: &TempDir) -> AppState {
    std::fs::write(dir.path().join("essay.txt"), ESSAY_BANK).unwrap();
    std::fs::write(dir.path().join("letter.txt"), "Write a letter to your bank.\n\nWrite a letter to a friend abroad.\n").unwrap();
    std::fs::write(dir.path().join("report.txt"), "   \n\n  \n").unwrap();
    AppState {
        questions_dir: dir.path().to_path_buf(),
        prompts: Prompts::default(),
        openai: None,
    }
}

#[test]
fn fetch_returns_units_from_the_bank_and_covers_all_of_them() {
    let dir = TempDir::new().unwrap();
    let state = state_with_banks(&dir);

    let mut rng = StdRng::seed_from_u64(42);
    let mut seen = HashSet::new();
    for _ in 0..100 {
        let q = fetch_question(&state, "essay", &mut rng).unwrap();
        assert!(!q.trim().is_empty());
        seen.insert(q);
    }
    // Delimiter-split bank: three units, the multi-paragraph one intact.
    assert_eq!(seen.len(), 3);
    assert!(seen
        .iter()
        .any(|q| q.contains("before and after reading it")));
}

#[test]
fn fetch_rejects_unknown_categories_and_empty_banks() {
    let dir = TempDir::new().unwrap();
    let state = state_with_banks(&dir);
    let mut rng = StdRng::seed_from_u64(1);

    assert!(matches!(
        fetch_question(&state, "poetry", &mut rng),
        Err(ApiError::InvalidCategory)
    ));
    assert!(matches!(
        fetch_question(&state, "report", &mut rng),
        Err(ApiError::NoQuestionsFound)
    ));
    // No email.txt was written.
    assert!(matches!(
        fetch_question(&state, "email", &mut rng),
        Err(ApiError::StorageUnavailable)
    ));
}

#[tokio::test]
async fn short_answer_with_no_evaluator_scores_zero_with_generic_feedback() {
    let dir = TempDir::new().unwrap();
    let state = state_with_banks(&dir);

    let out = evaluate_submission(&state, "essay", "this is my short answer")
        .await
        .unwrap();
    assert_eq!(out.marks, 0);
    assert_eq!(out.max_marks, 10);
    assert!(!out.feedback.strengths.is_empty());
    assert!(!out.feedback.suggestions.is_empty());
    assert_eq!(out.user_answer, "this is my short answer");
}

#[tokio::test]
async fn copying_a_question_verbatim_forfeits_all_marks() {
    let dir = TempDir::new().unwrap();
    let state = state_with_banks(&dir);

    // 300+ words of padding would normally earn full fallback marks; make the
    // answer a verbatim copy of a bank question instead.
    let out = evaluate_submission(
        &state,
        "letter",
        "Write a letter to a friend abroad.",
    )
    .await
    .unwrap();
    assert_eq!(out.marks, 0);
    assert!(out.feedback.weaknesses.contains("100%"));
}

#[tokio::test]
async fn empty_answers_are_rejected() {
    let dir = TempDir::new().unwrap();
    let state = state_with_banks(&dir);

    assert!(matches!(
        evaluate_submission(&state, "essay", "   \n ").await,
        Err(ApiError::EmptyAnswer)
    ));
}

#[tokio::test]
async fn unknown_category_still_grades_with_zero_similarity() {
    let dir = TempDir::new().unwrap();
    let state = state_with_banks(&dir);

    // 50 words -> 2 fallback marks, no similarity penalty possible.
    let answer = ["word"; 50].join(" ");
    let out = evaluate_submission(&state, "poetry", &answer).await.unwrap();
    assert_eq!(out.marks, 2);
    assert!(!out.feedback.weaknesses.contains("similar"));
}
