//! Two-document TF-IDF vector space and cosine similarity.
//!
//! Term weights follow the smoothed formulation: `tf * (ln((1 + n) / (1 + df)) + 1)`,
//! with each document vector L2-normalized before the dot product.

use std::collections::{BTreeMap, HashMap};

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::text::stopwords::is_english_stopword;

/// Returned by `text_similarity` when a pair cannot be vectorized.
pub const NEUTRAL_SIMILARITY: f64 = 50.0;
/// Vocabulary cap for single job-vs-resume comparisons.
pub const PAIR_MAX_FEATURES: usize = 500;
/// Vocabulary cap for the aggregate resume-vs-all-jobs comparison.
pub const AGGREGATE_MAX_FEATURES: usize = 1000;

static TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("valid regex"));

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VectorizationError {
    #[error("document is empty")]
    EmptyDocument,

    #[error("empty vocabulary; documents contain only stopwords")]
    EmptyVocabulary,
}

#[derive(Debug, Clone, Copy)]
pub struct TfidfVectorizer {
    max_features: usize,
}

impl TfidfVectorizer {
    pub fn new(max_features: usize) -> Self {
        Self { max_features }
    }

    /// Cosine similarity in `[0, 1]` between two documents, using a vocabulary
    /// fit on exactly those two documents.
    pub fn cosine_similarity(&self, a: &str, b: &str) -> Result<f64, VectorizationError> {
        if a.trim().is_empty() || b.trim().is_empty() {
            return Err(VectorizationError::EmptyDocument);
        }

        let docs = [term_counts(a), term_counts(b)];
        let vocabulary = self.vocabulary(&docs);
        if vocabulary.is_empty() {
            return Err(VectorizationError::EmptyVocabulary);
        }

        let n_docs = docs.len() as f64;
        let vectors: Vec<Vec<f64>> = docs
            .iter()
            .map(|counts| {
                let raw: Vec<f64> = vocabulary
                    .iter()
                    .map(|term| {
                        let tf = *counts.get(term.as_str()).unwrap_or(&0) as f64;
                        let df = docs.iter().filter(|d| d.contains_key(term.as_str())).count();
                        let idf = ((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0;
                        tf * idf
                    })
                    .collect();
                l2_normalize(raw)
            })
            .collect();

        let dot: f64 = vectors[0]
            .iter()
            .zip(&vectors[1])
            .map(|(x, y)| x * y)
            .sum();
        Ok(dot.clamp(0.0, 1.0))
    }

    /// Top `max_features` terms by corpus frequency, ties broken alphabetically.
    fn vocabulary(&self, docs: &[HashMap<String, usize>]) -> Vec<String> {
        let mut totals: BTreeMap<&str, usize> = BTreeMap::new();
        for doc in docs {
            for (term, count) in doc {
                *totals.entry(term.as_str()).or_insert(0) += count;
            }
        }
        let mut ranked: Vec<(&str, usize)> = totals.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
            .into_iter()
            .take(self.max_features)
            .map(|(t, _)| t.to_string())
            .collect()
    }
}

fn term_counts(text: &str) -> HashMap<String, usize> {
    let lowered = text.to_lowercase();
    let mut counts = HashMap::new();
    for m in TOKEN.find_iter(&lowered) {
        let term = m.as_str();
        if !is_english_stopword(term) {
            *counts.entry(term.to_string()).or_insert(0) += 1;
        }
    }
    counts
}

fn l2_normalize(v: Vec<f64>) -> Vec<f64> {
    let norm = v.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm == 0.0 {
        return v;
    }
    v.into_iter().map(|x| x / norm).collect()
}

/// Similarity of two texts scaled to `[0, 100]`.
/// Falls back to `NEUTRAL_SIMILARITY` when the pair cannot be vectorized.
pub fn text_similarity(a: &str, b: &str) -> f64 {
    match TfidfVectorizer::new(PAIR_MAX_FEATURES).cosine_similarity(a, b) {
        Ok(sim) => (sim * 100.0).clamp(0.0, 100.0),
        Err(e) => {
            tracing::debug!("text_similarity degraded to neutral: {e}");
            NEUTRAL_SIMILARITY
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_texts_score_maximum() {
        let text = "product manager roadmap analytics stakeholder";
        let score = text_similarity(text, text);
        assert!((score - 100.0).abs() < 1e-6, "Score was {score}");
    }

    #[test]
    fn test_identical_beats_unrelated() {
        let a = "rust backend engineer distributed systems";
        let b = "watercolor painting gallery exhibition";
        let same = text_similarity(a, a);
        let different = text_similarity(a, b);
        assert!(same > different);
        assert!(different.abs() < 1e-9, "Score was {different}");
    }

    #[test]
    fn test_partial_overlap_is_between_bounds() {
        let score = text_similarity("python sql analytics", "sql dashboards tableau");
        assert!(score > 0.0 && score < 100.0, "Score was {score}");
    }

    #[test]
    fn test_empty_text_returns_neutral() {
        assert_eq!(text_similarity("", "anything here"), NEUTRAL_SIMILARITY);
        assert_eq!(text_similarity("anything here", "   "), NEUTRAL_SIMILARITY);
    }

    #[test]
    fn test_stopword_only_text_returns_neutral() {
        assert_eq!(text_similarity("the and of", "with which"), NEUTRAL_SIMILARITY);
    }

    #[test]
    fn test_cosine_reports_empty_vocabulary() {
        let v = TfidfVectorizer::new(10);
        assert_eq!(
            v.cosine_similarity("the a", "of an"),
            Err(VectorizationError::EmptyVocabulary)
        );
    }

    #[test]
    fn test_max_features_caps_vocabulary() {
        let v = TfidfVectorizer::new(1);
        // Only "sql" (highest corpus frequency) survives, present in both documents.
        let sim = v
            .cosine_similarity("sql sql python", "sql sql tableau")
            .unwrap();
        assert!((sim - 1.0).abs() < 1e-9);
    }
}
