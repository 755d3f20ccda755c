// Relevance scoring: pairwise TF-IDF similarity and the hybrid ATS score.

pub mod hybrid;
pub mod tfidf;

pub use hybrid::{score_report, AtsStatus, HybridWeights, ScoreReport};
pub use tfidf::text_similarity;
