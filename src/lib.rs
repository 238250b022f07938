//! WriteDrill · writing-practice evaluation backend.
//!
//! Serves prompts from per-category question banks and evaluates submitted
//! answers: lexical-similarity originality check, one schema-constrained
//! grading call to an external evaluator, deterministic fallback grading, and
//! penalty composition into the final response.

pub mod telemetry;
pub mod util;
pub mod domain;
pub mod config;
pub mod error;
pub mod bank;
pub mod similarity;
pub mod protocol;
pub mod openai;
pub mod grading;
pub mod logic;
pub mod state;
pub mod routes;
