//! Lexical similarity used as an originality signal.
//!
//! Dice coefficient over character bigrams of case-folded,
//! whitespace-normalized text. Symmetric, 1.0 for identical text, 0.0 for
//! disjoint vocabularies, and monotonic in shared substring length. Bigrams
//! are counted as a multiset so repeated fragments still contribute.

use std::collections::HashMap;

use crate::domain::BestMatch;

fn normalize(text: &str) -> Vec<char> {
  text
    .split_whitespace()
    .collect::<Vec<_>>()
    .join(" ")
    .to_lowercase()
    .chars()
    .collect()
}

fn bigram_counts(chars: &[char]) -> HashMap<(char, char), usize> {
  let mut counts = HashMap::new();
  for w in chars.windows(2) {
    *counts.entry((w[0], w[1])).or_insert(0) += 1;
  }
  counts
}

/// Dice coefficient in [0, 1].
pub fn dice_coefficient(a: &str, b: &str) -> f64 {
  let ca = normalize(a);
  let cb = normalize(b);
  if ca == cb {
    // Covers texts too short to form any bigram.
    return if ca.is_empty() { 0.0 } else { 1.0 };
  }
  if ca.len() < 2 || cb.len() < 2 {
    return 0.0;
  }

  let counts_a = bigram_counts(&ca);
  let counts_b = bigram_counts(&cb);
  let total = (ca.len() - 1) + (cb.len() - 1);
  let overlap: usize = counts_a
    .iter()
    .map(|(bg, n)| n.min(counts_b.get(bg).unwrap_or(&0)))
    .sum();

  (2.0 * overlap as f64) / total as f64
}

/// Score the answer against every unit and keep the best; ties keep the first
/// occurrence. An empty unit set scores 0.0 with no matched unit.
pub fn best_match(answer: &str, units: &[String]) -> BestMatch {
  let mut best = BestMatch { score: 0.0, unit: None };
  for unit in units {
    let score = dice_coefficient(answer, unit);
    if best.unit.is_none() || score > best.score {
      best = BestMatch { score, unit: Some(unit.clone()) };
    }
  }
  best
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn identical_text_scores_one() {
    assert_eq!(dice_coefficient("night watch", "night watch"), 1.0);
    // Case and whitespace differences do not matter.
    assert_eq!(dice_coefficient("Night  Watch", "night watch"), 1.0);
  }

  #[test]
  fn disjoint_text_scores_zero() {
    assert_eq!(dice_coefficient("aaaa", "zzzz"), 0.0);
  }

  #[test]
  fn coefficient_is_symmetric() {
    let pairs = [("write a letter", "write an email"), ("abc", "abcd"), ("", "x")];
    for (a, b) in pairs {
      assert_eq!(dice_coefficient(a, b), dice_coefficient(b, a));
    }
  }

  #[test]
  fn more_shared_text_scores_higher() {
    let unit = "describe your last holiday in detail";
    let close = dice_coefficient("describe your last holiday", unit);
    let far = dice_coefficient("describe", unit);
    assert!(close > far);
    assert!(far > 0.0);
  }

  #[test]
  fn best_match_prefers_first_on_ties() {
    let units: Vec<String> = vec!["zzzz".into(), "qqqq".into()];
    let m = best_match("aaaa", &units);
    assert_eq!(m.score, 0.0);
    assert_eq!(m.unit.as_deref(), Some("zzzz"));
  }

  #[test]
  fn best_match_finds_the_copied_unit() {
    let units: Vec<String> = vec!["write about rivers".into(), "write about mountains".into()];
    let m = best_match("write about mountains", &units);
    assert_eq!(m.score, 1.0);
    assert_eq!(m.unit.as_deref(), Some("write about mountains"));
  }

  #[test]
  fn empty_unit_set_scores_zero() {
    let m = best_match("anything", &[]);
    assert_eq!(m.score, 0.0);
    assert!(m.unit.is_none());
  }
}
