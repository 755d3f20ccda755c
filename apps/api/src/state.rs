use std::sync::Arc;

use crate::config::Config;
use crate::profile::ProfileStore;
use crate::providers::JobSearch;
use crate::text::KeywordExtractor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Keyword strategy chosen once at startup (lexicon or stopword fallback).
    pub extractor: Arc<dyn KeywordExtractor>,
    /// Job search capability. Default: `JobFetcher` over the configured providers.
    pub jobs: Arc<dyn JobSearch>,
    pub profiles: Arc<ProfileStore>,
}
