//! Service configuration loaded from environment variables.
//!
//! Every value has a default so the server starts without any setup; the
//! platform credentials default to `YOUR_…` placeholders, which the search
//! library treats as unset and answers from scraping fallbacks instead.

use anyhow::{Context, Result};
use dotenvy::dotenv;
use lookalike_search::{Credentials, Endpoints, SearchConfig};
use std::env;

/// Placeholder shipped for `YOUTUBE_API_KEY`.
pub const YOUTUBE_KEY_PLACEHOLDER: &str = "YOUR_YOUTUBE_API_KEY";
/// Placeholder shipped for `FACEBOOK_ACCESS_TOKEN`.
pub const FACEBOOK_TOKEN_PLACEHOLDER: &str = "YOUR_FACEBOOK_ACCESS_TOKEN";
/// Placeholder shipped for `TWITTER_BEARER_TOKEN`.
pub const TWITTER_TOKEN_PLACEHOLDER: &str = "YOUR_TWITTER_BEARER_TOKEN";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub credentials: Credentials,
    pub scraping_enabled: bool,
    pub exhaustive_fallbacks: bool,
    pub timeout_seconds: u64,
    pub invidious_base_url: String,
    pub nitter_base_url: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        let endpoints = Endpoints::default();
        Self {
            host: "0.0.0.0".to_owned(),
            port: 8080,
            credentials: Credentials {
                youtube_api_key: Some(YOUTUBE_KEY_PLACEHOLDER.to_owned()),
                facebook_access_token: Some(FACEBOOK_TOKEN_PLACEHOLDER.to_owned()),
                twitter_bearer_token: Some(TWITTER_TOKEN_PLACEHOLDER.to_owned()),
            },
            scraping_enabled: true,
            exhaustive_fallbacks: false,
            timeout_seconds: 10,
            invidious_base_url: endpoints.invidious,
            nitter_base_url: endpoints.nitter,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Unset or blank variables fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let port = match var("LOOKALIKE_PORT") {
            Some(raw) => raw.parse().context("LOOKALIKE_PORT must be a valid port number")?,
            None => defaults.port,
        };
        let timeout_seconds = match var("LOOKALIKE_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse()
                .context("LOOKALIKE_TIMEOUT_SECS must be a whole number of seconds")?,
            None => defaults.timeout_seconds,
        };
        let scraping_enabled = match var("LOOKALIKE_ENABLE_SCRAPING") {
            Some(raw) => parse_flag(&raw).context("LOOKALIKE_ENABLE_SCRAPING must be true or false")?,
            None => defaults.scraping_enabled,
        };
        let exhaustive_fallbacks = match var("LOOKALIKE_EXHAUSTIVE_FALLBACKS") {
            Some(raw) => {
                parse_flag(&raw).context("LOOKALIKE_EXHAUSTIVE_FALLBACKS must be true or false")?
            }
            None => defaults.exhaustive_fallbacks,
        };

        Ok(Self {
            host: var("LOOKALIKE_HOST").unwrap_or(defaults.host),
            port,
            credentials: Credentials {
                youtube_api_key: var("YOUTUBE_API_KEY").or(defaults.credentials.youtube_api_key),
                facebook_access_token: var("FACEBOOK_ACCESS_TOKEN")
                    .or(defaults.credentials.facebook_access_token),
                twitter_bearer_token: var("TWITTER_BEARER_TOKEN")
                    .or(defaults.credentials.twitter_bearer_token),
            },
            scraping_enabled,
            exhaustive_fallbacks,
            timeout_seconds,
            invidious_base_url: var("INVIDIOUS_BASE_URL").unwrap_or(defaults.invidious_base_url),
            nitter_base_url: var("NITTER_BASE_URL").unwrap_or(defaults.nitter_base_url),
        })
    }

    /// Address the HTTP listener binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The per-search configuration handed to the search library.
    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            credentials: self.credentials.clone(),
            endpoints: Endpoints {
                invidious: self.invidious_base_url.clone(),
                nitter: self.nitter_base_url.clone(),
                ..Endpoints::default()
            },
            timeout_seconds: self.timeout_seconds,
            scraping_enabled: self.scraping_enabled,
            exhaustive_fallbacks: self.exhaustive_fallbacks,
            user_agent: None,
        }
    }
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("unrecognised boolean {other:?}"),
    }
}
