use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::providers::rapidapi::DEFAULT_HOST;
use crate::ranking::RankingWeights;

/// Application configuration loaded from environment variables.
/// Provider credentials are optional; a provider without them is skipped.
#[derive(Debug, Clone)]
pub struct Config {
    pub adzuna_app_id: Option<String>,
    pub adzuna_app_key: Option<String>,
    pub adzuna_country: String,
    pub rapidapi_key: Option<String>,
    pub rapidapi_host: String,
    /// Permits placeholder listings when live providers yield nothing.
    pub demo_mode: bool,
    pub default_location: String,
    pub keyword_lexicon_path: Option<PathBuf>,
    /// Overall budget for the provider phase of one recommendation request.
    pub search_deadline_secs: u64,
    pub ranking: RankingWeights,
    pub port: u16,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            adzuna_app_id: None,
            adzuna_app_key: None,
            adzuna_country: "in".to_string(),
            rapidapi_key: None,
            rapidapi_host: DEFAULT_HOST.to_string(),
            demo_mode: false,
            default_location: "india".to_string(),
            keyword_lexicon_path: None,
            search_deadline_secs: 60,
            ranking: RankingWeights::default(),
            port: 7000,
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            adzuna_app_id: optional_env("ADZUNA_APP_ID"),
            adzuna_app_key: optional_env("ADZUNA_APP_KEY"),
            adzuna_country: optional_env("ADZUNA_COUNTRY").unwrap_or(defaults.adzuna_country),
            rapidapi_key: optional_env("RAPIDAPI_KEY"),
            rapidapi_host: optional_env("RAPIDAPI_HOST").unwrap_or(defaults.rapidapi_host),
            demo_mode: optional_env("DEMO_MODE")
                .map(|v| parse_bool(&v))
                .transpose()
                .context("DEMO_MODE must be a boolean (true/false/1/0)")?
                .unwrap_or(defaults.demo_mode),
            default_location: optional_env("DEFAULT_LOCATION")
                .unwrap_or(defaults.default_location),
            keyword_lexicon_path: optional_env("KEYWORD_LEXICON_PATH").map(PathBuf::from),
            search_deadline_secs: parse_env("SEARCH_DEADLINE_SECS", defaults.search_deadline_secs)?,
            ranking: RankingWeights {
                domain_boost: parse_env("DOMAIN_BOOST", defaults.ranking.domain_boost)?,
                location_boost: parse_env("LOCATION_BOOST", defaults.ranking.location_boost)?,
                skill_boost: parse_env("SKILL_BOOST", defaults.ranking.skill_boost)?,
                noise_floor: parse_env("NOISE_FLOOR", defaults.ranking.noise_floor)?,
                hybrid: defaults.ranking.hybrid,
            },
            port: parse_env("PORT", defaults.port)?,
            rust_log: optional_env("RUST_LOG").unwrap_or(defaults.rust_log),
        })
    }
}

/// Unset and blank variables are both treated as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has invalid value '{raw}'")),
        None => Ok(default),
    }
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("'{other}' is not a boolean"),
    }
}
