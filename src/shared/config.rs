//! Runtime configuration
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file. Every setting has a default so a bare `anicollect` invocation works
//! against the public catalog.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Url;

use crate::shared::errors::{AppError, AppResult};

pub const DEFAULT_CATALOG_API_URL: &str = "https://shikimori.one/api/graphql";
pub const DEFAULT_CATALOG_SITE_URL: &str = "https://shikimori.one";
pub const DEFAULT_ENRICHMENT_API_URL: &str = "https://kodikapi.com/search";
pub const DEFAULT_PLAYER_HOST: &str = "//kodik.info";
pub const DEFAULT_DESTINATION_API_URL: &str = "http://localhost:8080/db/anime";
pub const DEFAULT_ASSET_BASE_URL: &str = "https://s3.ru1.storage.beget.cloud/anime-assets";
pub const DEFAULT_CHECKPOINT_PATH: &str = "anilibria_temp_data.json";
pub const DEFAULT_FANDUB_TOKEN: &str = "AniLibria";
pub const DEFAULT_START_ID: i64 = 6001;
pub const DEFAULT_END_ID: i64 = 7000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_REQUESTS_PER_SECOND: f64 = 5.0;
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub catalog_api_url: Url,
    /// Site root used to absolutize relative media paths from the catalog
    pub catalog_site_url: Url,
    pub enrichment_api_url: Url,
    pub enrichment_token: String,
    /// Protocol-relative player host, e.g. `//kodik.info`
    pub player_host: String,
    pub destination_api_url: Url,
    pub asset_base_url: Url,
    pub checkpoint_path: PathBuf,
    pub fandub_token: String,
    pub default_start_id: i64,
    pub default_end_id: i64,
    pub http_timeout: Duration,
    /// `0` disables pacing of catalog requests
    pub catalog_requests_per_second: f64,
    pub user_agent: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_api_url: static_url(DEFAULT_CATALOG_API_URL),
            catalog_site_url: static_url(DEFAULT_CATALOG_SITE_URL),
            enrichment_api_url: static_url(DEFAULT_ENRICHMENT_API_URL),
            enrichment_token: String::new(),
            player_host: DEFAULT_PLAYER_HOST.to_string(),
            destination_api_url: static_url(DEFAULT_DESTINATION_API_URL),
            asset_base_url: static_url(DEFAULT_ASSET_BASE_URL),
            checkpoint_path: PathBuf::from(DEFAULT_CHECKPOINT_PATH),
            fandub_token: DEFAULT_FANDUB_TOKEN.to_string(),
            default_start_id: DEFAULT_START_ID,
            default_end_id: DEFAULT_END_ID,
            http_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            catalog_requests_per_second: DEFAULT_REQUESTS_PER_SECOND,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl AppConfig {
    /// Load `.env` (if any) and read the environment
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup; unset keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let url = |key: &str, fallback: Url| -> AppResult<Url> {
            match get(key) {
                Some(raw) => parse_url(key, &raw),
                None => Ok(fallback),
            }
        };

        let timeout_secs = parse_or(get("HTTP_TIMEOUT_SECS"), "HTTP_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        let rps: f64 = parse_or(
            get("CATALOG_REQUESTS_PER_SECOND"),
            "CATALOG_REQUESTS_PER_SECOND",
            DEFAULT_REQUESTS_PER_SECOND,
        )?;
        if !rps.is_finite() || rps < 0.0 {
            return Err(AppError::ConfigError(format!(
                "CATALOG_REQUESTS_PER_SECOND must be a non-negative number, got {}",
                rps
            )));
        }
        if rps > 0.0 && Duration::try_from_secs_f64(1.0 / rps).is_err() {
            return Err(AppError::ConfigError(format!(
                "CATALOG_REQUESTS_PER_SECOND is too small to pace with, got {:e}",
                rps
            )));
        }

        let player_host = get("PLAYER_HOST").unwrap_or(defaults.player_host);
        if !player_host.starts_with("//") {
            return Err(AppError::ConfigError(format!(
                "PLAYER_HOST must be protocol-relative (start with //), got '{}'",
                player_host
            )));
        }

        Ok(Self {
            catalog_api_url: url("CATALOG_API_URL", defaults.catalog_api_url)?,
            catalog_site_url: url("CATALOG_SITE_URL", defaults.catalog_site_url)?,
            enrichment_api_url: url("ENRICHMENT_API_URL", defaults.enrichment_api_url)?,
            enrichment_token: get("ENRICHMENT_TOKEN").unwrap_or(defaults.enrichment_token),
            player_host: player_host.trim_end_matches('/').to_string(),
            destination_api_url: url("DESTINATION_API_URL", defaults.destination_api_url)?,
            asset_base_url: url("ASSET_BASE_URL", defaults.asset_base_url)?,
            checkpoint_path: get("CHECKPOINT_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.checkpoint_path),
            fandub_token: get("FANDUB_TOKEN").unwrap_or(defaults.fandub_token),
            default_start_id: parse_or(get("DEFAULT_START_ID"), "DEFAULT_START_ID", DEFAULT_START_ID)?,
            default_end_id: parse_or(get("DEFAULT_END_ID"), "DEFAULT_END_ID", DEFAULT_END_ID)?,
            http_timeout: Duration::from_secs(timeout_secs),
            catalog_requests_per_second: rps,
            user_agent: get("USER_AGENT").unwrap_or(defaults.user_agent),
        })
    }
}

fn parse_url(key: &str, raw: &str) -> AppResult<Url> {
    Url::parse(raw.trim())
        .map_err(|e| AppError::ConfigError(format!("{} is not a valid URL ({}): {}", key, raw, e)))
}

fn parse_or<T>(raw: Option<String>, key: &str, fallback: T) -> AppResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|e| AppError::ConfigError(format!("{} has invalid value '{}': {}", key, value, e))),
        None => Ok(fallback),
    }
}

// Only used with the compile-time constants above.
fn static_url(raw: &'static str) -> Url {
    Url::parse(raw).unwrap_or_else(|e| panic!("built-in URL {} is invalid: {}", raw, e))
}
