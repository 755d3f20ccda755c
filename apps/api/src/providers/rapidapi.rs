//! Secondary provider: RapidAPI-hosted internships search with one endpoint per
//! posting-age window.

use std::sync::Arc;
use std::time::Duration;

use crate::providers::normalize::{extract_records, normalize_records};
use crate::providers::transport::{HttpTransport, ProviderError, ProviderRequest, ProviderResponse};
use crate::providers::{Job, SearchQuery, TimeWindow};

const TIMEOUT: Duration = Duration::from_secs(15);
const RESULT_LIMIT: u32 = 20;

pub const DEFAULT_HOST: &str = "internships-api.p.rapidapi.com";
pub const KEYWORD_PARAM: &str = "keyword";
/// Parameter names some deployments accept instead of `keyword`.
pub const ALTERNATE_KEYWORD_PARAMS: &[&str] = &["query", "search", "title", "position"];

#[derive(Clone)]
pub struct RapidApiClient {
    api_key: String,
    host: String,
    transport: Arc<dyn HttpTransport>,
}

impl RapidApiClient {
    pub fn new(api_key: String, host: String, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            api_key,
            host,
            transport,
        }
    }

    pub fn endpoint(&self, window: TimeWindow) -> String {
        let path = match window {
            TimeWindow::Day => "active-jb-24h",
            TimeWindow::Week => "active-jb-7d",
            TimeWindow::Month => "active-jb-30d",
        };
        format!("https://{}/{path}", self.host)
    }

    /// Builds a request carrying the keyword under `keyword_param`.
    pub fn request(&self, query: &SearchQuery, keyword_param: &str) -> ProviderRequest {
        ProviderRequest::get(self.endpoint(query.time_window), TIMEOUT)
            .query(keyword_param, &query.keyword)
            .query("location", &query.location)
            .query("limit", RESULT_LIMIT)
            .header("x-rapidapi-key", &self.api_key)
            .header("x-rapidapi-host", &self.host)
    }

    pub async fn send(&self, request: &ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        self.transport.get(request).await
    }

    /// Normalized, deduplicated jobs from a 200 response body.
    pub fn parse_jobs(response: &ProviderResponse) -> Result<Vec<Job>, ProviderError> {
        let body = response.json()?;
        Ok(normalize_records(&extract_records(&body)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::transport::testing::ScriptedTransport;

    fn client() -> RapidApiClient {
        RapidApiClient::new(
            "secret".into(),
            DEFAULT_HOST.into(),
            Arc::new(ScriptedTransport::new(ProviderResponse::ok("[]"))),
        )
    }

    #[test]
    fn test_endpoint_per_window() {
        let c = client();
        assert!(c.endpoint(TimeWindow::Day).ends_with("/active-jb-24h"));
        assert!(c.endpoint(TimeWindow::Week).ends_with("/active-jb-7d"));
        assert!(c.endpoint(TimeWindow::Month).ends_with("/active-jb-30d"));
    }

    #[test]
    fn test_request_uses_given_keyword_param() {
        let req = client().request(
            &SearchQuery::new("sql", "india", TimeWindow::Week),
            "position",
        );
        assert_eq!(req.query_value("position"), Some("sql"));
        assert_eq!(req.query_value("keyword"), None);
        assert!(req
            .headers
            .iter()
            .any(|(k, v)| k == "x-rapidapi-key" && v == "secret"));
    }

    #[test]
    fn test_parse_jobs_accepts_bare_array() {
        let resp = ProviderResponse::ok(
            r#"[{"title": "Intern", "organization": "Acme", "locations_derived": ["Delhi"], "url": "https://a"}]"#,
        );
        let jobs = RapidApiClient::parse_jobs(&resp).unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].company, "Acme");
        assert_eq!(jobs[0].location, "Delhi");
    }

    #[test]
    fn test_parse_jobs_rejects_malformed_body() {
        let resp = ProviderResponse::ok("<html>");
        assert!(matches!(
            RapidApiClient::parse_jobs(&resp),
            Err(ProviderError::Parse(_))
        ));
    }
}
