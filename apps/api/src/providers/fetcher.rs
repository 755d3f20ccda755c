//! Provider state machine behind `JobSearch`.
//!
//! Per call:
//! 1. Primary provider (if configured): one request; non-empty results win.
//! 2. Secondary provider: up to `RetryPolicy::max_attempts` attempts against the
//!    time-windowed endpoint. An empty 200 tries the alternate keyword parameter
//!    names before giving up; 429 honors `Retry-After`; other failures back off.
//! 3. Keyword broadening: one request per candidate keyword, accumulating
//!    deduplicated results until at least `BROADEN_TARGET` are collected.
//! 4. Total failure: demo jobs (tagged `JobSource::Demo`) in demo mode,
//!    otherwise nothing.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::config::Config;
use crate::providers::adzuna::AdzunaClient;
use crate::providers::demo::demo_jobs;
use crate::providers::normalize::JobCollector;
use crate::providers::rapidapi::{RapidApiClient, ALTERNATE_KEYWORD_PARAMS, KEYWORD_PARAM};
use crate::providers::retry::{RetryPolicy, RetryReason};
use crate::providers::transport::HttpTransport;
use crate::providers::{FetchedJobs, Job, JobSearch, SearchQuery};
use crate::text::split_terms;

/// Upper bound on jobs returned by one fetch.
pub const MAX_RESULTS: usize = 15;
/// Broadening stops once this many jobs have been collected.
pub const BROADEN_TARGET: usize = 10;
/// Last-resort broadening keyword.
pub const FALLBACK_KEYWORD: &str = "intern";

pub struct JobFetcher {
    primary: Option<AdzunaClient>,
    secondary: Option<RapidApiClient>,
    retry: RetryPolicy,
    demo_mode: bool,
}

impl JobFetcher {
    pub fn new(
        primary: Option<AdzunaClient>,
        secondary: Option<RapidApiClient>,
        retry: RetryPolicy,
        demo_mode: bool,
    ) -> Self {
        Self {
            primary,
            secondary,
            retry,
            demo_mode,
        }
    }

    /// Wires whichever providers have credentials in `config`.
    pub fn from_config(config: &Config, transport: Arc<dyn HttpTransport>) -> Self {
        let primary = match (&config.adzuna_app_id, &config.adzuna_app_key) {
            (Some(id), Some(key)) => Some(AdzunaClient::new(
                id.clone(),
                key.clone(),
                config.adzuna_country.clone(),
                transport.clone(),
            )),
            _ => {
                warn!("Adzuna credentials not found; primary provider disabled");
                None
            }
        };
        let secondary = match &config.rapidapi_key {
            Some(key) => Some(RapidApiClient::new(
                key.clone(),
                config.rapidapi_host.clone(),
                transport,
            )),
            None => {
                warn!("RapidAPI key not found; secondary provider disabled");
                None
            }
        };
        Self::new(primary, secondary, RetryPolicy::default(), config.demo_mode)
    }

    async fn try_primary(&self, query: &SearchQuery) -> Option<Vec<Job>> {
        let client = self.primary.as_ref()?;
        match client.search(query).await {
            Ok(jobs) if !jobs.is_empty() => {
                info!("Primary provider returned {} jobs", jobs.len());
                Some(truncate(jobs))
            }
            Ok(_) => {
                info!("Primary provider returned no jobs for '{}'", query.keyword);
                None
            }
            Err(e) => {
                warn!("Primary provider failed: {e}");
                None
            }
        }
    }

    async fn try_secondary(&self, client: &RapidApiClient, query: &SearchQuery) -> Option<Vec<Job>> {
        let request = client.request(query, KEYWORD_PARAM);

        for attempt in 0..self.retry.max_attempts {
            let reason = match client.send(&request).await {
                Ok(response) if response.is_success() => {
                    match RapidApiClient::parse_jobs(&response) {
                        Ok(jobs) if !jobs.is_empty() => {
                            info!(
                                "Secondary provider returned {} jobs on attempt {}",
                                jobs.len(),
                                attempt + 1
                            );
                            return Some(truncate(jobs));
                        }
                        Ok(_) => return self.try_alternate_params(client, query).await,
                        Err(e) => {
                            warn!("Secondary provider sent malformed body: {e}");
                            RetryReason::Failed
                        }
                    }
                }
                Ok(response) if response.is_rate_limited() => RetryReason::RateLimited {
                    retry_after: response.retry_after,
                },
                Ok(response) => {
                    warn!("Secondary provider returned status {}", response.status);
                    RetryReason::Failed
                }
                Err(e) => {
                    warn!("Secondary provider request failed: {e}");
                    RetryReason::Failed
                }
            };

            if attempt + 1 < self.retry.max_attempts {
                let delay = self.retry.delay_for(attempt, reason);
                warn!(
                    "Secondary attempt {}/{} unsuccessful ({:?}), retrying in {}ms",
                    attempt + 1,
                    self.retry.max_attempts,
                    reason,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }
        }

        warn!(
            "Secondary provider exhausted {} attempts for '{}'",
            self.retry.max_attempts, query.keyword
        );
        None
    }

    async fn try_alternate_params(
        &self,
        client: &RapidApiClient,
        query: &SearchQuery,
    ) -> Option<Vec<Job>> {
        for param in ALTERNATE_KEYWORD_PARAMS {
            let request = client.request(query, param);
            let Ok(response) = client.send(&request).await else {
                continue;
            };
            if !response.is_success() {
                continue;
            }
            if let Ok(jobs) = RapidApiClient::parse_jobs(&response) {
                if !jobs.is_empty() {
                    info!("Secondary provider matched using '{param}' parameter");
                    return Some(truncate(jobs));
                }
            }
        }
        info!("No alternate keyword parameter produced results");
        None
    }

    async fn broaden(&self, client: &RapidApiClient, query: &SearchQuery) -> Vec<Job> {
        let mut collector = JobCollector::new();

        for keyword in broadening_candidates(&query.keyword) {
            let request = client.request(&query.with_keyword(keyword.as_str()), KEYWORD_PARAM);
            match client.send(&request).await {
                Ok(response) if response.is_success() => {
                    if let Ok(jobs) = RapidApiClient::parse_jobs(&response) {
                        let added = collector.extend(jobs);
                        info!("Broadened search '{keyword}' added {added} jobs");
                    }
                }
                Ok(response) => warn!("Broadened search '{keyword}' got status {}", response.status),
                Err(e) => warn!("Broadened search '{keyword}' failed: {e}"),
            }
            if collector.len() >= BROADEN_TARGET {
                break;
            }
        }

        prefer_titled(collector.into_jobs())
    }

    fn total_failure(&self) -> FetchedJobs {
        if self.demo_mode {
            warn!("All providers failed; serving demo jobs");
            FetchedJobs::demo(demo_jobs())
        } else {
            warn!("All providers failed; returning no jobs");
            FetchedJobs::live(vec![])
        }
    }
}

#[async_trait]
impl JobSearch for JobFetcher {
    async fn fetch_jobs(&self, query: &SearchQuery) -> FetchedJobs {
        if let Some(jobs) = self.try_primary(query).await {
            return FetchedJobs::live(jobs);
        }

        if let Some(client) = &self.secondary {
            if let Some(jobs) = self.try_secondary(client, query).await {
                return FetchedJobs::live(jobs);
            }
            let broadened = self.broaden(client, query).await;
            if !broadened.is_empty() {
                return FetchedJobs::live(broadened);
            }
        }

        self.total_failure()
    }
}

/// Original keyword, each of its tokens, its first token, then `"intern"`;
/// deduplicated case-insensitively, empties dropped.
pub fn broadening_candidates(keyword: &str) -> Vec<String> {
    let tokens = split_terms(keyword);
    let mut candidates = vec![keyword.trim().to_string()];
    candidates.extend(tokens.iter().cloned());
    if let Some(first) = tokens.first() {
        candidates.push(first.clone());
    }
    candidates.push(FALLBACK_KEYWORD.to_string());

    let mut seen = std::collections::HashSet::new();
    candidates
        .into_iter()
        .filter(|c| !c.is_empty() && seen.insert(c.to_lowercase()))
        .collect()
}

/// Titled jobs first (stable), capped at `MAX_RESULTS`.
fn prefer_titled(jobs: Vec<Job>) -> Vec<Job> {
    let (titled, untitled): (Vec<Job>, Vec<Job>) =
        jobs.into_iter().partition(|j| !j.title.trim().is_empty());
    truncate(titled.into_iter().chain(untitled).collect())
}

fn truncate(mut jobs: Vec<Job>) -> Vec<Job> {
    jobs.truncate(MAX_RESULTS);
    jobs
}
