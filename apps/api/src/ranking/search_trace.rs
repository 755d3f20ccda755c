use std::collections::HashSet;

use crate::providers::fetcher::FALLBACK_KEYWORD;
use crate::text::split_terms;

/// Domain hint → search phrasings tried in order.
const DOMAIN_SYNONYMS: &[(&str, &[&str])] = &[
    (
        "product",
        &["product", "product management", "product manager", "pm"],
    ),
    (
        "data",
        &["data", "data analyst", "data science", "analytics"],
    ),
    (
        "software",
        &["software", "software engineer", "software developer", "sde"],
    ),
    (
        "marketing",
        &["marketing", "digital marketing", "growth", "brand"],
    ),
    ("finance", &["finance", "financial analyst", "accounting"]),
    ("design", &["design", "ui ux", "product design", "graphic design"]),
    (
        "business",
        &["business", "business analyst", "business development", "strategy"],
    ),
    ("hr", &["hr", "human resources", "talent acquisition", "recruitment"]),
    (
        "operations",
        &["operations", "operations management", "supply chain"],
    ),
    ("consulting", &["consulting", "management consulting", "strategy"]),
];

/// Phrasings for a domain hint; unknown domains map to themselves.
pub fn domain_synonyms(domain: &str) -> Vec<String> {
    let key = domain.trim().to_lowercase();
    DOMAIN_SYNONYMS
        .iter()
        .find(|(d, _)| *d == key)
        .map(|(_, syns)| syns.iter().map(|s| s.to_string()).collect())
        .unwrap_or_else(|| vec![key])
}

/// Ordered candidate queries for one recommendation request.
///
/// With a domain: its synonyms, then `"<domain> <first skill>"`. Without one:
/// every skill token. Both end with the raw skills string and `"intern"`.
/// Duplicates (case-insensitive) and blanks are dropped.
pub fn build_search_trace(skills: &str, domain: Option<&str>) -> Vec<String> {
    let skill_tokens = split_terms(skills);
    let mut candidates: Vec<String> = Vec::new();

    match domain.map(str::trim).filter(|d| !d.is_empty()) {
        Some(domain) => {
            candidates.extend(domain_synonyms(domain));
            if let Some(first) = skill_tokens.first() {
                if !first.eq_ignore_ascii_case(domain) {
                    candidates.push(format!("{} {first}", domain.to_lowercase()));
                }
            }
        }
        None => candidates.extend(skill_tokens.iter().cloned()),
    }

    candidates.push(skills.trim().to_string());
    candidates.push(FALLBACK_KEYWORD.to_string());

    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|c| !c.is_empty() && seen.insert(c.to_lowercase()))
        .collect()
}
