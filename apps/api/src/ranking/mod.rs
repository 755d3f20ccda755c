// Recommendation Ranker: search trace, provider iteration, domain/location
// filtering and the final ordering of recommended internships.

pub mod form;
pub mod handlers;
pub mod job_file;
pub mod search_trace;

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::time::Instant;
use tracing::{info, warn};

use crate::providers::demo::demo_jobs;
use crate::providers::{FetchedJobs, Job, JobSearch, SearchQuery, TimeWindow};
use crate::scoring::{score_report, text_similarity, AtsStatus, HybridWeights, ScoreReport};
use crate::state::AppState;
use crate::text::{normalize, split_terms, KeywordExtractor};

use search_trace::build_search_trace;

pub const MAX_RECOMMENDATIONS: usize = 10;

/// Boosts and thresholds applied on top of the similarity scores.
#[derive(Debug, Clone, Copy)]
pub struct RankingWeights {
    pub hybrid: HybridWeights,
    pub domain_boost: i64,
    pub location_boost: i64,
    pub skill_boost: i64,
    /// Jobs whose final score falls below this are dropped.
    pub noise_floor: i64,
}

impl RankingWeights {
    /// Similarity plus the per-hit domain and location boosts and the flat
    /// skill boost.
    pub fn final_score(
        &self,
        match_percent: i64,
        domain_hits: i64,
        location_hits: i64,
        mentions_skill: bool,
    ) -> i64 {
        let skill_bonus = if mentions_skill { self.skill_boost } else { 0 };
        match_percent
            + self.domain_boost * domain_hits
            + self.location_boost * location_hits
            + skill_bonus
    }

    pub fn clears_noise_floor(&self, final_score: i64) -> bool {
        final_score >= self.noise_floor
    }
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            hybrid: HybridWeights::default(),
            domain_boost: 25,
            location_boost: 20,
            skill_boost: 5,
            noise_floor: 5,
        }
    }
}

/// What the candidate submitted, after extraction and `profile_data` merge.
#[derive(Debug, Clone, Default)]
pub struct CandidateProfile {
    pub resume_text: String,
    pub skills: String,
    pub education: String,
    pub location: String,
    pub domain: Option<String>,
    pub time_window: TimeWindow,
}

impl CandidateProfile {
    /// Skills, education and resume joined and normalized; this is the text
    /// every job is scored against.
    pub fn scoring_text(&self) -> String {
        let resume = normalize(&self.resume_text);
        let parts: Vec<&str> = [self.skills.as_str(), self.education.as_str(), resume.as_str()]
            .into_iter()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();
        normalize(&parts.join(" "))
    }

    fn domain_hint(&self) -> Option<&str> {
        self.domain.as_deref().map(str::trim).filter(|d| !d.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Recommendation {
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub apply_link: String,
    /// Integer percentage label, e.g. `"42%"`.
    pub match_percent: String,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub ats_score: f64,
    pub status: AtsStatus,
    pub missing_keywords: Vec<String>,
    pub recommendations: Vec<Recommendation>,
    pub effective_search_keyword: Option<String>,
    pub search_trace: Vec<String>,
    pub used_dummy_jobs_for_scoring: bool,
}

#[derive(Debug, Serialize)]
pub struct SuppliedJobsResponse {
    pub ats_score: f64,
    pub status: AtsStatus,
    pub missing_keywords: Vec<String>,
    pub recommendations: Vec<Recommendation>,
    pub parsed_count: usize,
}

/// Ranking output before it is attached to a response envelope.
#[derive(Debug)]
pub struct RankedJobs {
    pub report: ScoreReport,
    pub recommendations: Vec<Recommendation>,
}

/// Per-request scoring state for one job. Never leaves this module.
struct ScoredJob {
    job: Job,
    text: String,
    domain_hits: i64,
    location_hits: i64,
    match_percent: i64,
    final_score: i64,
}

pub struct Ranker {
    jobs: Arc<dyn JobSearch>,
    extractor: Arc<dyn KeywordExtractor>,
    weights: RankingWeights,
    demo_mode: bool,
    search_deadline: Duration,
}

impl Ranker {
    pub fn new(
        jobs: Arc<dyn JobSearch>,
        extractor: Arc<dyn KeywordExtractor>,
        weights: RankingWeights,
        demo_mode: bool,
        search_deadline: Duration,
    ) -> Self {
        Self {
            jobs,
            extractor,
            weights,
            demo_mode,
            search_deadline,
        }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(
            state.jobs.clone(),
            state.extractor.clone(),
            state.config.ranking,
            state.config.demo_mode,
            Duration::from_secs(state.config.search_deadline_secs),
        )
    }

    /// Live pipeline: walk the search trace, then rank whatever it produced.
    pub async fn recommend(&self, profile: &CandidateProfile) -> RecommendationResponse {
        let search_trace = build_search_trace(&profile.skills, profile.domain_hint());
        let (found, effective_search_keyword) = self.search(&search_trace, profile).await;

        let used_dummy_jobs_for_scoring = found.is_empty();
        let jobs = if used_dummy_jobs_for_scoring {
            info!("Search trace exhausted without results; scoring against demo jobs");
            demo_jobs()
        } else {
            found
        };

        let ranked = self.rank(jobs, profile);
        let recommendations = if used_dummy_jobs_for_scoring && !self.demo_mode {
            vec![]
        } else {
            ranked.recommendations
        };

        RecommendationResponse {
            ats_score: ranked.report.ats_score,
            status: ranked.report.status,
            missing_keywords: ranked.report.missing_keywords,
            recommendations,
            effective_search_keyword,
            search_trace,
            used_dummy_jobs_for_scoring,
        }
    }

    /// Upload pipeline: rank jobs the caller supplied, no providers involved.
    pub fn rank_supplied(&self, jobs: Vec<Job>, profile: &CandidateProfile) -> SuppliedJobsResponse {
        let parsed_count = jobs.len();
        let ranked = self.rank(jobs, profile);
        SuppliedJobsResponse {
            ats_score: ranked.report.ats_score,
            status: ranked.report.status,
            missing_keywords: ranked.report.missing_keywords,
            recommendations: ranked.recommendations,
            parsed_count,
        }
    }

    /// Tries each trace candidate until one yields live jobs or the deadline
    /// passes. Demo batches count as nothing found.
    async fn search(
        &self,
        trace: &[String],
        profile: &CandidateProfile,
    ) -> (Vec<Job>, Option<String>) {
        let deadline = Instant::now() + self.search_deadline;

        for keyword in trace {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                warn!("Search deadline reached before trying '{keyword}'");
                break;
            }

            let query = SearchQuery::new(keyword.as_str(), profile.location.as_str(), profile.time_window);
            match tokio::time::timeout(remaining, self.jobs.fetch_jobs(&query)).await {
                Ok(fetched) if fetched.found_live() => {
                    info!("Search keyword '{keyword}' returned {} jobs", fetched.jobs.len());
                    return (fetched.jobs, Some(keyword.clone()));
                }
                Ok(FetchedJobs { source, .. }) => {
                    info!("Search keyword '{keyword}' returned no live jobs ({source:?})")
                }
                Err(_) => {
                    warn!("Search deadline reached while trying '{keyword}'");
                    break;
                }
            }
        }

        (vec![], None)
    }

    /// Filters, scores and orders `jobs` against the candidate profile.
    pub fn rank(&self, jobs: Vec<Job>, profile: &CandidateProfile) -> RankedJobs {
        let candidate_text = profile.scoring_text();
        let domain_tokens = match_tokens(profile.domain_hint().unwrap_or(profile.skills.as_str()));
        let location_tokens = match_tokens(&profile.location);
        let skill_phrases = skill_phrases(&profile.skills);

        let mut scored: Vec<ScoredJob> = jobs
            .into_iter()
            .map(|job| {
                let text = normalize(&job.full_text());
                ScoredJob {
                    domain_hits: count_hits(&text, &domain_tokens),
                    location_hits: count_hits(&text, &location_tokens),
                    match_percent: 0,
                    final_score: 0,
                    job,
                    text,
                }
            })
            .collect();

        scored = filter_by_domain(scored);
        scored.sort_by(|a, b| b.location_hits.cmp(&a.location_hits));

        let job_texts: Vec<String> = scored.iter().map(|s| s.text.clone()).collect();
        let report = score_report(
            self.extractor.as_ref(),
            &candidate_text,
            &job_texts,
            self.weights.hybrid,
        );

        for s in &mut scored {
            s.match_percent = text_similarity(&candidate_text, &s.text).round() as i64;
            s.final_score = self.weights.final_score(
                s.match_percent,
                s.domain_hits,
                s.location_hits,
                mentions_skill(&s.text, &skill_phrases),
            );
        }

        scored.retain(|s| self.weights.clears_noise_floor(s.final_score));
        scored.sort_by(|a, b| {
            b.final_score
                .cmp(&a.final_score)
                .then(b.match_percent.cmp(&a.match_percent))
        });
        // Location count is the decisive ordering; the score order above only
        // breaks ties within the same count.
        scored.sort_by(|a, b| b.location_hits.cmp(&a.location_hits));
        scored.truncate(MAX_RECOMMENDATIONS);

        let recommendations = scored
            .into_iter()
            .map(|s| Recommendation {
                match_percent: format!("{}%", s.match_percent),
                title: s.job.title,
                company: s.job.company,
                location: s.job.location,
                description: s.job.description,
                apply_link: s.job.apply_link,
            })
            .collect();

        RankedJobs {
            report,
            recommendations,
        }
    }
}

/// Terms used for containment checks; single characters match too much.
fn match_tokens(raw: &str) -> Vec<String> {
    split_terms(&normalize(raw))
        .into_iter()
        .filter(|t| t.chars().count() > 1)
        .collect()
}

/// Comma-separated skills, normalized like job text so "Node.js" becomes
/// "nodejs" and "C++" becomes "c".
fn skill_phrases(skills: &str) -> Vec<String> {
    skills
        .split(',')
        .map(normalize)
        .filter(|p| !p.is_empty())
        .collect()
}

/// Substring match, except single-character phrases which must be a whole word.
fn mentions_skill(text: &str, phrases: &[String]) -> bool {
    phrases.iter().any(|p| {
        if p.chars().count() > 1 {
            text.contains(p.as_str())
        } else {
            text.split(' ').any(|word| word == p)
        }
    })
}

fn count_hits(text: &str, tokens: &[String]) -> i64 {
    tokens.iter().filter(|t| text.contains(t.as_str())).count() as i64
}

/// ≥3 domain matches: keep only those. 1–2: matches first, rest after.
/// None: unchanged.
fn filter_by_domain(scored: Vec<ScoredJob>) -> Vec<ScoredJob> {
    let (matched, rest): (Vec<ScoredJob>, Vec<ScoredJob>) =
        scored.into_iter().partition(|s| s.domain_hits > 0);
    match matched.len() {
        0 => rest,
        n if n >= 3 => matched,
        _ => matched.into_iter().chain(rest).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::keywords::StopwordKeywordExtractor;
    use async_trait::async_trait;
    use std::sync::Mutex;

    fn job(title: &str, company: &str, location: &str, description: &str) -> Job {
        Job {
            title: title.into(),
            company: company.into(),
            location: location.into(),
            description: description.into(),
            apply_link: "#".into(),
        }
    }

    /// Returns `jobs` for the first query whose keyword is in `answers`.
    struct StubSearch {
        answers: Vec<(String, Vec<Job>)>,
        seen: Mutex<Vec<String>>,
        delay: Option<Duration>,
    }

    impl StubSearch {
        fn new(answers: Vec<(&str, Vec<Job>)>) -> Self {
            Self {
                answers: answers
                    .into_iter()
                    .map(|(k, jobs)| (k.to_string(), jobs))
                    .collect(),
                seen: Mutex::new(vec![]),
                delay: None,
            }
        }
    }

    #[async_trait]
    impl JobSearch for StubSearch {
        async fn fetch_jobs(&self, query: &SearchQuery) -> FetchedJobs {
            self.seen.lock().unwrap().push(query.keyword.clone());
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            FetchedJobs::live(
                self.answers
                    .iter()
                    .find(|(k, _)| *k == query.keyword)
                    .map(|(_, jobs)| jobs.clone())
                    .unwrap_or_default(),
            )
        }
    }

    fn ranker(search: Arc<dyn JobSearch>, demo_mode: bool) -> Ranker {
        Ranker::new(
            search,
            Arc::new(StopwordKeywordExtractor),
            RankingWeights::default(),
            demo_mode,
            Duration::from_secs(60),
        )
    }

    fn weighted_ranker(weights: RankingWeights) -> Ranker {
        Ranker::new(
            Arc::new(StubSearch::new(vec![])),
            Arc::new(StopwordKeywordExtractor),
            weights,
            false,
            Duration::from_secs(60),
        )
    }

    fn titles(ranked: &RankedJobs) -> Vec<&str> {
        ranked.recommendations.iter().map(|r| r.title.as_str()).collect()
    }

    fn product_profile() -> CandidateProfile {
        CandidateProfile {
            resume_text: "Product manager with SQL and Agile experience".into(),
            skills: "Product Management, SQL".into(),
            location: "bangalore".into(),
            domain: Some("product".into()),
            ..Default::default()
        }
    }

    fn product_jobs() -> Vec<Job> {
        vec![
            job("Product Intern", "Acme", "Bangalore", "Own the product roadmap with SQL"),
            job("Product Analyst Intern", "Beta", "Bangalore, Karnataka", "Product analytics"),
            job("Associate Product Manager Intern", "Gamma", "Bangalore", "Agile product work"),
            job("Marketing Intern", "Delta", "Mumbai", "Social media campaigns"),
            job("Sales Intern", "Epsilon", "Delhi", "Cold calling"),
        ]
    }

    #[test]
    fn test_scoring_text_joins_and_normalizes() {
        let profile = CandidateProfile {
            resume_text: "Built APIs!".into(),
            skills: "Rust, SQL".into(),
            education: "B.Tech".into(),
            ..Default::default()
        };
        assert_eq!(profile.scoring_text(), "rust sql btech built apis");
    }

    #[tokio::test]
    async fn test_product_domain_end_to_end() {
        let search = Arc::new(StubSearch::new(vec![("product", product_jobs())]));
        let response = ranker(search.clone(), false)
            .recommend(&product_profile())
            .await;

        assert_eq!(response.effective_search_keyword.as_deref(), Some("product"));
        assert_eq!(&response.search_trace[..4], &["product", "product management", "product manager", "pm"]);
        assert!(!response.used_dummy_jobs_for_scoring);
        assert_eq!(response.recommendations.len(), 3);
        for rec in &response.recommendations {
            assert!(rec.title.contains("Product"));
            assert!(rec.location.contains("Bangalore"));
        }
        assert!(!response.missing_keywords.contains(&"sql".to_string()));
        assert!(!response.missing_keywords.contains(&"product".to_string()));
        assert_eq!(*search.seen.lock().unwrap(), vec!["product"]);
    }

    #[tokio::test]
    async fn test_trace_walks_until_results() {
        let search = Arc::new(StubSearch::new(vec![("pm", product_jobs())]));
        let response = ranker(search.clone(), false)
            .recommend(&product_profile())
            .await;
        assert_eq!(response.effective_search_keyword.as_deref(), Some("pm"));
        assert_eq!(
            *search.seen.lock().unwrap(),
            vec!["product", "product management", "product manager", "pm"]
        );
    }

    #[tokio::test]
    async fn test_empty_trace_scores_against_demo_jobs_but_hides_them() {
        let search = Arc::new(StubSearch::new(vec![]));
        let response = ranker(search.clone(), false)
            .recommend(&product_profile())
            .await;
        assert!(response.used_dummy_jobs_for_scoring);
        assert!(response.effective_search_keyword.is_none());
        assert!(response.recommendations.is_empty());
        assert!(response.ats_score > 0.0);
        assert_eq!(search.seen.lock().unwrap().len(), response.search_trace.len());
    }

    #[tokio::test]
    async fn test_demo_mode_shows_demo_recommendations() {
        let response = ranker(Arc::new(StubSearch::new(vec![])), true)
            .recommend(&product_profile())
            .await;
        assert!(response.used_dummy_jobs_for_scoring);
        assert!(!response.recommendations.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_demo_batches_do_not_end_the_trace_walk() {
        use crate::providers::retry::RetryPolicy;
        use crate::providers::JobFetcher;

        let fetcher = Arc::new(JobFetcher::new(None, None, RetryPolicy::default(), true));
        let response = ranker(fetcher, true).recommend(&product_profile()).await;

        assert!(response.used_dummy_jobs_for_scoring);
        assert!(response.effective_search_keyword.is_none());
        assert!(!response.recommendations.is_empty());
    }

    #[tokio::test]
    async fn test_demo_batch_is_skipped_for_later_live_results() {
        struct DemoThenLive(Mutex<Vec<String>>);

        #[async_trait]
        impl JobSearch for DemoThenLive {
            async fn fetch_jobs(&self, query: &SearchQuery) -> FetchedJobs {
                self.0.lock().unwrap().push(query.keyword.clone());
                if query.keyword == "pm" {
                    FetchedJobs::live(product_jobs())
                } else {
                    FetchedJobs::demo(demo_jobs())
                }
            }
        }

        let search = Arc::new(DemoThenLive(Mutex::new(vec![])));
        let response = ranker(search.clone(), true)
            .recommend(&product_profile())
            .await;

        assert_eq!(response.effective_search_keyword.as_deref(), Some("pm"));
        assert!(!response.used_dummy_jobs_for_scoring);
        assert_eq!(search.0.lock().unwrap().len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_skips_remaining_candidates() {
        let mut stub = StubSearch::new(vec![("intern", product_jobs())]);
        stub.delay = Some(Duration::from_secs(40));
        let search = Arc::new(stub);
        let response = ranker(search.clone(), false)
            .recommend(&product_profile())
            .await;
        // 60s budget: the first call finishes at 40s, the second times out.
        assert_eq!(search.seen.lock().unwrap().len(), 2);
        assert!(response.used_dummy_jobs_for_scoring);
    }

    #[test]
    fn test_location_count_decides_final_order() {
        let profile = CandidateProfile {
            resume_text: "machine learning python pandas".into(),
            skills: "python".into(),
            location: "pune".into(),
            ..Default::default()
        };
        let jobs = vec![
            job("ML Intern", "A", "Delhi", "machine learning python pandas"),
            job("Python Intern", "B", "Pune", "python scripting"),
        ];
        let ranked = ranker(Arc::new(StubSearch::new(vec![])), false).rank(jobs, &profile);
        assert_eq!(ranked.recommendations[0].location, "Pune");
        assert_eq!(ranked.recommendations.len(), 2);
    }

    #[test]
    fn test_few_domain_matches_are_promoted_not_filtered() {
        let jobs = vec![
            job("Sales Intern", "A", "", "sales calls and design"),
            job("Ops Intern", "B", "", "operations"),
            job("Finance Intern", "C", "", "finance"),
        ];
        let scored: Vec<ScoredJob> = jobs
            .into_iter()
            .map(|j| {
                let text = normalize(&j.full_text());
                ScoredJob {
                    domain_hits: count_hits(&text, &match_tokens("design")),
                    location_hits: 0,
                    match_percent: 0,
                    final_score: 0,
                    job: j,
                    text,
                }
            })
            .collect();
        let filtered = filter_by_domain(scored);
        assert_eq!(filtered.len(), 3);
        assert_eq!(filtered[0].job.title, "Sales Intern");
    }

    #[test]
    fn test_many_domain_matches_drop_the_rest() {
        let profile = CandidateProfile {
            resume_text: "python pandas".into(),
            domain: Some("design".into()),
            ..Default::default()
        };
        let data_job = job("Data Intern", "D", "", "python pandas");
        let design_jobs = vec![
            job("Design Intern", "A", "", "figma mockups"),
            job("UX Design Intern", "B", "", "wireframes"),
            job("Graphic Design Intern", "C", "", "illustrator"),
        ];

        // Two domain matches: the similar non-domain job survives.
        let mut jobs = design_jobs[..2].to_vec();
        jobs.push(data_job.clone());
        let ranked = ranker(Arc::new(StubSearch::new(vec![])), false).rank(jobs, &profile);
        assert!(titles(&ranked).contains(&"Data Intern"));

        // Three domain matches: only they remain.
        let mut jobs = design_jobs.clone();
        jobs.push(data_job);
        let ranked = ranker(Arc::new(StubSearch::new(vec![])), false).rank(jobs, &profile);
        assert_eq!(ranked.recommendations.len(), 3);
        assert!(!titles(&ranked).contains(&"Data Intern"));
    }

    #[test]
    fn test_boosts_add_to_match_percent() {
        let weights = RankingWeights::default();
        assert_eq!(weights.final_score(10, 0, 0, false), 10);
        assert_eq!(weights.final_score(10, 1, 0, false), 35);
        assert_eq!(weights.final_score(10, 0, 1, false), 30);
        assert_eq!(weights.final_score(10, 0, 0, true), 15);
        assert_eq!(weights.final_score(10, 2, 3, true), 10 + 50 + 60 + 5);
    }

    #[test]
    fn test_domain_boost_outranks_higher_similarity() {
        // The non-domain job repeats "figma" and scores about 80% against
        // the resume; the design job scores about 58% plus the domain boost.
        let profile = CandidateProfile {
            resume_text: "figma prototyping".into(),
            domain: Some("design".into()),
            ..Default::default()
        };
        let jobs = || {
            vec![
                job("Figma Intern", "A", "", "figma prototyping"),
                job("Design Intern", "B", "", "figma prototyping"),
            ]
        };
        let ranked = ranker(Arc::new(StubSearch::new(vec![])), false).rank(jobs(), &profile);
        assert_eq!(titles(&ranked), vec!["Design Intern", "Figma Intern"]);

        let no_domain_boost = RankingWeights {
            domain_boost: 0,
            ..Default::default()
        };
        let ranked = weighted_ranker(no_domain_boost).rank(jobs(), &profile);
        assert_eq!(titles(&ranked), vec!["Figma Intern", "Design Intern"]);
    }

    #[test]
    fn test_location_boost_keeps_unrelated_local_job() {
        let profile = CandidateProfile {
            resume_text: "watercolor".into(),
            location: "pune".into(),
            ..Default::default()
        };
        let jobs = vec![
            job("Kubernetes Intern", "A", "Delhi", "terraform"),
            job("Golang Intern", "B", "Pune", "microservices"),
        ];
        let ranked = ranker(Arc::new(StubSearch::new(vec![])), false).rank(jobs, &profile);
        assert_eq!(titles(&ranked), vec!["Golang Intern"]);
        assert_eq!(ranked.recommendations[0].match_percent, "0%");
    }

    #[test]
    fn test_noise_floor_is_inclusive() {
        let profile = CandidateProfile {
            resume_text: "watercolor".into(),
            location: "pune".into(),
            ..Default::default()
        };
        let jobs = || vec![job("Golang Intern", "B", "Pune", "microservices")];

        // Similarity is 0, so the final score is exactly the location boost.
        let at_floor = RankingWeights {
            location_boost: 5,
            ..Default::default()
        };
        assert_eq!(weighted_ranker(at_floor).rank(jobs(), &profile).recommendations.len(), 1);

        let below_floor = RankingWeights {
            location_boost: 4,
            ..Default::default()
        };
        assert!(weighted_ranker(below_floor).rank(jobs(), &profile).recommendations.is_empty());

        let weights = RankingWeights::default();
        assert!(weights.clears_noise_floor(5));
        assert!(!weights.clears_noise_floor(4));
    }

    #[test]
    fn test_skill_phrases_match_normalized_text() {
        let phrases = skill_phrases("Node.js, C++ , ,SQL");
        assert_eq!(phrases, vec!["nodejs", "c", "sql"]);

        assert!(mentions_skill(&normalize("Backend services in Node.js"), &phrases[..1]));
        assert!(mentions_skill(&normalize("Embedded C++ firmware"), &phrases[1..2]));
        assert!(!mentions_skill(&normalize("Cloud computing"), &phrases[1..2]));
        assert!(mentions_skill(&normalize("MySQL admin"), &phrases[2..]));
    }

    #[test]
    fn test_punctuated_skill_earns_skill_boost() {
        let profile = CandidateProfile {
            resume_text: "watercolor".into(),
            skills: "C++".into(),
            ..Default::default()
        };
        // Only the skill boost applies: similarity 0, no location, and the
        // single-character domain token is ignored.
        let jobs = vec![
            job("Firmware Intern", "A", "", "Embedded C++ drivers"),
            job("Cloud Intern", "B", "", "cloud computing"),
        ];
        let ranked = ranker(Arc::new(StubSearch::new(vec![])), false).rank(jobs, &profile);
        assert_eq!(titles(&ranked), vec!["Firmware Intern"]);
    }

    #[test]
    fn test_noise_floor_drops_unrelated_jobs() {
        let profile = CandidateProfile {
            resume_text: "watercolor painting".into(),
            ..Default::default()
        };
        let jobs = vec![job("Kubernetes Intern", "A", "", "terraform golang")];
        let ranked = ranker(Arc::new(StubSearch::new(vec![])), false).rank(jobs, &profile);
        assert!(ranked.recommendations.is_empty());
        assert_eq!(ranked.report.status, AtsStatus::NeedsImprovement);
    }

    #[test]
    fn test_recommendations_capped() {
        let profile = CandidateProfile {
            resume_text: "python data".into(),
            skills: "python".into(),
            ..Default::default()
        };
        let jobs: Vec<Job> = (0..15)
            .map(|i| job(&format!("Python Intern {i}"), "Co", "", "python data"))
            .collect();
        let ranked = ranker(Arc::new(StubSearch::new(vec![])), false).rank(jobs, &profile);
        assert_eq!(ranked.recommendations.len(), MAX_RECOMMENDATIONS);
        assert!(ranked.recommendations[0].match_percent.ends_with('%'));
    }

    #[test]
    fn test_rank_supplied_reports_parsed_count() {
        let profile = CandidateProfile {
            resume_text: "gardening".into(),
            ..Default::default()
        };
        let jobs = vec![
            job("Quant Intern", "A", "", "stochastic calculus"),
            job("Chip Intern", "B", "", "verilog fpga"),
        ];
        let response = ranker(Arc::new(StubSearch::new(vec![])), false).rank_supplied(jobs, &profile);
        assert_eq!(response.parsed_count, 2);
        assert!(response.ats_score < 40.0);
    }
}
