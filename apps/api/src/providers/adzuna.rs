//! Primary provider: Adzuna job search (`/v1/api/jobs/{country}/search/1`).

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::providers::normalize::{extract_records, normalize_records};
use crate::providers::transport::{HttpTransport, ProviderError, ProviderRequest};
use crate::providers::{Job, SearchQuery};

const BASE_URL: &str = "https://api.adzuna.com/v1/api/jobs";
const RESULTS_PER_PAGE: u32 = 20;
const TIMEOUT: Duration = Duration::from_secs(20);

/// Terms marking a listing as internship-relevant, checked against title,
/// description prefix and company name.
const INTERNSHIP_TERMS: &[&str] = &[
    "intern",
    "internship",
    "trainee",
    "graduate",
    "entry level",
    "student",
    "apprentice",
];
const DESCRIPTION_PREFIX_CHARS: usize = 300;

#[derive(Clone)]
pub struct AdzunaClient {
    app_id: String,
    app_key: String,
    country: String,
    transport: Arc<dyn HttpTransport>,
}

impl AdzunaClient {
    pub fn new(
        app_id: String,
        app_key: String,
        country: String,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            app_id,
            app_key,
            country,
            transport,
        }
    }

    pub fn request(&self, query: &SearchQuery) -> ProviderRequest {
        ProviderRequest::get(format!("{BASE_URL}/{}/search/1", self.country), TIMEOUT)
            .query("app_id", &self.app_id)
            .query("app_key", &self.app_key)
            .query("results_per_page", RESULTS_PER_PAGE)
            .query("what", &query.keyword)
            .query("where", &query.location)
            .query("max_days_old", query.time_window.max_days_old())
            .query("sort_by", "relevance")
    }

    /// One search request. Results are normalized, deduplicated and ordered with
    /// internship-relevant listings first.
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<Job>, ProviderError> {
        info!(
            "Searching Adzuna for '{}' in {} ({})",
            query.keyword, query.location, query.time_window
        );
        let response = self.transport.get(&self.request(query)).await?;
        debug!("Adzuna responded with status {}", response.status);

        if !response.is_success() {
            return Err(ProviderError::Status {
                status: response.status,
                body: response.body.chars().take(200).collect(),
            });
        }

        let body = response.json()?;
        let jobs = normalize_records(&extract_records(&body));
        Ok(prioritize_internships(jobs))
    }
}

/// Scores a listing: +3 per term in the title, else +2 if in the description
/// prefix, else +1 if in the company name.
pub fn internship_relevance(job: &Job) -> u32 {
    let title = job.title.to_lowercase();
    let description: String = job
        .description
        .to_lowercase()
        .chars()
        .take(DESCRIPTION_PREFIX_CHARS)
        .collect();
    let company = job.company.to_lowercase();

    INTERNSHIP_TERMS
        .iter()
        .map(|term| {
            if title.contains(term) {
                3
            } else if description.contains(term) {
                2
            } else if company.contains(term) {
                1
            } else {
                0
            }
        })
        .sum()
}

/// Moves internship-relevant listings to the front, highest score first.
/// If nothing scores, the provider's order is kept.
pub fn prioritize_internships(jobs: Vec<Job>) -> Vec<Job> {
    let (mut relevant, rest): (Vec<(u32, Job)>, Vec<(u32, Job)>) = jobs
        .into_iter()
        .map(|j| (internship_relevance(&j), j))
        .partition(|(score, _)| *score > 0);

    if relevant.is_empty() {
        return rest.into_iter().map(|(_, j)| j).collect();
    }

    relevant.sort_by(|a, b| b.0.cmp(&a.0));
    relevant
        .into_iter()
        .chain(rest)
        .map(|(_, j)| j)
        .collect()
}
