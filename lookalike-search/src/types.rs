//! Core types: platforms, acquisition sources, candidate accounts, requests.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::error::SearchError;

/// Default number of accounts returned per search.
pub const DEFAULT_LIMIT: usize = 10;
/// Upper bound on `limit`; the platform APIs cap a single page at 50.
pub const MAX_LIMIT: usize = 50;
/// Default fixed delay between upstream requests.
pub const DEFAULT_THROTTLE: Duration = Duration::from_millis(1500);
/// Default minimum similarity for a name or handle to count as a match.
pub const DEFAULT_THRESHOLD: f64 = 0.7;

/// Platforms that can be searched for lookalike accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Video platform; accounts are channels.
    YouTube,
    /// Social network; accounts are pages.
    Facebook,
    /// Microblogging service; accounts are user profiles.
    Twitter,
}

impl Platform {
    /// Returns the lowercase name used in routes and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::YouTube => "youtube",
            Self::Facebook => "facebook",
            Self::Twitter => "twitter",
        }
    }

    /// Returns the acquisition sources for this platform in priority order.
    ///
    /// The first entry is always the official API; the rest are scraping
    /// fallbacks.
    pub fn chain(&self) -> &'static [SourceKind] {
        match self {
            Self::YouTube => &[
                SourceKind::YouTubeApi,
                SourceKind::YouTubeResultsPage,
                SourceKind::Invidious,
            ],
            Self::Facebook => &[SourceKind::FacebookGraph, SourceKind::FacebookMobilePage],
            Self::Twitter => &[SourceKind::TwitterApi, SourceKind::Nitter],
        }
    }

    /// Returns all supported platforms.
    pub fn all() -> &'static [Platform] {
        &[Self::YouTube, Self::Facebook, Self::Twitter]
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single method of acquiring candidate accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceKind {
    /// YouTube Data API v3 channel search.
    #[serde(rename = "youtube-api")]
    YouTubeApi,
    /// youtube.com search results page (embedded `ytInitialData`).
    #[serde(rename = "youtube-results-page")]
    YouTubeResultsPage,
    /// Invidious mirror search API.
    #[serde(rename = "invidious")]
    Invidious,
    /// Facebook Graph API page search.
    #[serde(rename = "facebook-graph")]
    FacebookGraph,
    /// mbasic.facebook.com page search markup.
    #[serde(rename = "facebook-mobile-page")]
    FacebookMobilePage,
    /// Twitter API user search.
    #[serde(rename = "twitter-api")]
    TwitterApi,
    /// Nitter mirror user search markup.
    #[serde(rename = "nitter")]
    Nitter,
}

impl SourceKind {
    /// Returns the stable name used in logs, errors, and JSON output.
    pub fn name(&self) -> &'static str {
        match self {
            Self::YouTubeApi => "youtube-api",
            Self::YouTubeResultsPage => "youtube-results-page",
            Self::Invidious => "invidious",
            Self::FacebookGraph => "facebook-graph",
            Self::FacebookMobilePage => "facebook-mobile-page",
            Self::TwitterApi => "twitter-api",
            Self::Nitter => "nitter",
        }
    }

    /// Whether this is an official, credentialed API rather than a scraper.
    #[cfg(test)]
    pub(crate) fn is_official_api(&self) -> bool {
        matches!(
            self,
            Self::YouTubeApi | Self::FacebookGraph | Self::TwitterApi
        )
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An account or page returned by one acquisition source.
///
/// Constructed once at the source boundary from a typed upstream payload
/// and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateAccount {
    /// Display name of the account or page.
    pub name: String,
    /// Handle or username, without a leading `@`, when the source exposes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    /// Bio, about text, or channel description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Canonical profile URL; the identity used for deduplication.
    pub url: String,
    /// Which source produced this candidate.
    pub source: SourceKind,
}

impl CandidateAccount {
    /// Create a candidate with only the required fields set.
    pub fn new(name: impl Into<String>, url: impl Into<String>, source: SourceKind) -> Self {
        Self {
            name: name.into(),
            handle: None,
            description: None,
            url: url.into(),
            source,
        }
    }

    /// Set the handle, stripping a leading `@` and ignoring blank values.
    pub fn with_handle(mut self, handle: impl AsRef<str>) -> Self {
        let handle = handle.as_ref().trim().trim_start_matches('@');
        self.handle = (!handle.is_empty()).then(|| handle.to_string());
        self
    }

    /// Set the description, ignoring blank values.
    pub fn with_description(mut self, description: impl AsRef<str>) -> Self {
        let description = description.as_ref().trim();
        self.description = (!description.is_empty()).then(|| description.to_string());
        self
    }
}

/// A candidate that passed the inclusion rule, with the score that admitted it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedAccount {
    /// The underlying candidate.
    #[serde(flatten)]
    pub account: CandidateAccount,
    /// Best similarity of name or handle against the keyword, in `[0, 1]`.
    pub similarity: f64,
}

/// Per-call search parameters.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// The brand or person name to look for.
    pub keyword: String,
    /// Maximum number of accounts to request upstream and return.
    pub limit: usize,
    /// Fixed delay between upstream requests.
    pub throttle: Duration,
    /// Minimum similarity (inclusive) for a name or handle match.
    pub threshold: f64,
}

impl SearchRequest {
    /// Create a request for `keyword` with default tuning.
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            limit: DEFAULT_LIMIT,
            throttle: DEFAULT_THROTTLE,
            threshold: DEFAULT_THRESHOLD,
        }
    }

    /// Override the result limit.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Override the throttle interval.
    pub fn with_throttle(mut self, throttle: Duration) -> Self {
        self.throttle = throttle;
        self
    }

    /// Override the similarity threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// The keyword with surrounding whitespace removed.
    pub fn trimmed_keyword(&self) -> &str {
        self.keyword.trim()
    }

    /// The limit clamped to what a single upstream page can return.
    pub fn upstream_limit(&self) -> usize {
        self.limit.min(MAX_LIMIT)
    }

    /// Validates this request.
    ///
    /// Checks:
    /// - `keyword` must not be blank
    /// - `limit` must be greater than 0
    /// - `threshold` must be a finite number in `[0, 1]`
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.trimmed_keyword().is_empty() {
            return Err(SearchError::Config("keyword must not be empty".into()));
        }
        if self.limit == 0 {
            return Err(SearchError::Config("limit must be greater than 0".into()));
        }
        if !self.threshold.is_finite() || !(0.0..=1.0).contains(&self.threshold) {
            return Err(SearchError::Config(
                "fuzzy threshold must be between 0 and 1".into(),
            ));
        }
        Ok(())
    }
}
