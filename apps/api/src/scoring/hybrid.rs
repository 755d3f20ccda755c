use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::scoring::tfidf::{TfidfVectorizer, AGGREGATE_MAX_FEATURES};
use crate::text::KeywordExtractor;

pub const MAX_MISSING_KEYWORDS: usize = 12;

/// Blend between the keyword-overlap and semantic sub-scores.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HybridWeights {
    pub keyword: f64,
    pub semantic: f64,
}

impl Default for HybridWeights {
    fn default() -> Self {
        Self {
            keyword: 0.5,
            semantic: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AtsStatus {
    Excellent,
    Good,
    Fair,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
}

impl AtsStatus {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Self::Excellent
        } else if score >= 60.0 {
            Self::Good
        } else if score >= 40.0 {
            Self::Fair
        } else {
            Self::NeedsImprovement
        }
    }
}

/// Aggregate resume-vs-jobs report. Recomputed every request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreReport {
    pub ats_score: f64,
    pub missing_keywords: Vec<String>,
    pub status: AtsStatus,
}

/// Optional inputs to `hybrid_score`.
#[derive(Debug, Default, Clone)]
pub struct HybridOptions<'a> {
    pub required_skills: Option<&'a BTreeSet<String>>,
    pub skill_weights: Option<&'a HashMap<String, f64>>,
    pub weights: HybridWeights,
}

/// Blends keyword overlap and TF-IDF similarity between a resume and
/// the combined text of `job_texts`.
///
/// Returns `(score, missing_keywords)` where score is in `[0, 100]` rounded to one
/// decimal and `missing_keywords` is the sorted set difference (required − resume),
/// truncated to `MAX_MISSING_KEYWORDS`.
pub fn hybrid_score(
    extractor: &dyn KeywordExtractor,
    resume_text: &str,
    job_texts: &[String],
    options: HybridOptions<'_>,
) -> (f64, Vec<String>) {
    if job_texts.is_empty() {
        return (0.0, vec![]);
    }

    let combined = job_texts.join(" ");

    let derived;
    let required = match options.required_skills {
        Some(skills) => skills,
        None => {
            derived = extractor.extract_keywords(&combined);
            &derived
        }
    };
    let resume_skills = extractor.extract_keywords(resume_text);

    let weight_of = |term: &str| -> f64 {
        options
            .skill_weights
            .and_then(|w| w.get(term))
            .copied()
            .unwrap_or(1.0)
    };

    let keyword_score = if required.is_empty() {
        0.0
    } else {
        let total: f64 = required.iter().map(|t| weight_of(t)).sum();
        let matched: f64 = required
            .iter()
            .filter(|t| resume_skills.contains(*t))
            .map(|t| weight_of(t))
            .sum();
        if total > 0.0 {
            100.0 * matched / total
        } else {
            0.0
        }
    };

    let semantic_score = match TfidfVectorizer::new(AGGREGATE_MAX_FEATURES)
        .cosine_similarity(resume_text, &combined)
    {
        Ok(sim) => sim * 100.0,
        Err(e) => {
            debug!("Semantic sub-score unavailable ({e}); using 0");
            0.0
        }
    };

    let blended = options.weights.keyword * keyword_score + options.weights.semantic * semantic_score;
    let score = round_one_decimal(blended.clamp(0.0, 100.0));

    // BTreeSet iteration is already ascending.
    let missing: Vec<String> = required
        .iter()
        .filter(|t| !resume_skills.contains(*t))
        .take(MAX_MISSING_KEYWORDS)
        .cloned()
        .collect();

    (score, missing)
}

/// Runs `hybrid_score` with default options and attaches the status label.
pub fn score_report(
    extractor: &dyn KeywordExtractor,
    resume_text: &str,
    job_texts: &[String],
    weights: HybridWeights,
) -> ScoreReport {
    let (ats_score, missing_keywords) = hybrid_score(
        extractor,
        resume_text,
        job_texts,
        HybridOptions {
            weights,
            ..Default::default()
        },
    );
    ScoreReport {
        ats_score,
        missing_keywords,
        status: AtsStatus::from_score(ats_score),
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
