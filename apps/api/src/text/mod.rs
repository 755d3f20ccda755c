// Text utilities shared by scoring, ranking and the provider adapters.

pub mod keywords;
pub mod normalize;
pub mod stopwords;

pub use keywords::{build_keyword_extractor, KeywordExtractor};
pub use normalize::{normalize, split_terms};
