// Provider Adapter: upstream job-search clients, record normalization and the
// retry/fallback state machine that turns them into canonical `Job`s.

pub mod adzuna;
pub mod demo;
pub mod fetcher;
pub mod normalize;
pub mod rapidapi;
pub mod retry;
pub mod transport;

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use fetcher::JobFetcher;

/// Canonical, provider-agnostic job listing. Missing fields are empty strings;
/// a missing apply link is `#`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub apply_link: String,
}

impl Job {
    /// Case-insensitive (title, company, location) identity used for deduplication.
    pub fn dedupe_key(&self) -> (String, String, String) {
        (
            self.title.trim().to_lowercase(),
            self.company.trim().to_lowercase(),
            self.location.trim().to_lowercase(),
        )
    }

    /// Title, company, location and description joined for scoring.
    pub fn full_text(&self) -> String {
        [&self.title, &self.company, &self.location, &self.description]
            .iter()
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    Day,
    #[default]
    Week,
    Month,
}

impl TimeWindow {
    pub fn max_days_old(self) -> u32 {
        match self {
            Self::Day => 1,
            Self::Week => 7,
            Self::Month => 30,
        }
    }
}

impl FromStr for TimeWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            other => Err(format!(
                "time_filter must be one of day, week, month (got '{other}')"
            )),
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        };
        f.write_str(s)
    }
}

/// One search attempt. Built per ranking attempt, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub keyword: String,
    pub location: String,
    pub time_window: TimeWindow,
}

impl SearchQuery {
    pub fn new(keyword: impl Into<String>, location: impl Into<String>, time_window: TimeWindow) -> Self {
        Self {
            keyword: keyword.into(),
            location: location.into(),
            time_window,
        }
    }

    pub fn with_keyword(&self, keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            ..self.clone()
        }
    }
}

/// Where a batch of fetched jobs came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobSource {
    Live,
    Demo,
}

/// Result of one `JobSearch::fetch_jobs` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedJobs {
    pub jobs: Vec<Job>,
    pub source: JobSource,
}

impl FetchedJobs {
    pub fn live(jobs: Vec<Job>) -> Self {
        Self {
            jobs,
            source: JobSource::Live,
        }
    }

    pub fn demo(jobs: Vec<Job>) -> Self {
        Self {
            jobs,
            source: JobSource::Demo,
        }
    }

    /// True when a provider actually returned listings. Demo data never counts.
    pub fn found_live(&self) -> bool {
        self.source == JobSource::Live && !self.jobs.is_empty()
    }
}

/// The job search capability consumed by the ranker and handlers.
///
/// Never fails: total failure is an empty live batch, or a demo batch in demo
/// mode. Carried in `AppState` as `Arc<dyn JobSearch>`.
#[async_trait]
pub trait JobSearch: Send + Sync {
    async fn fetch_jobs(&self, query: &SearchQuery) -> FetchedJobs;
}
