//! Search configuration with sensible defaults.
//!
//! [`SearchConfig`] carries credentials, upstream base URLs, timeouts and
//! fallback toggles. It is built once by the caller and passed explicitly
//! into every search; nothing here is read from the process environment.

use url::Url;

use crate::error::SearchError;
use crate::types::SourceKind;

/// Prefix of the placeholder credentials shipped as defaults.
///
/// A credential that still starts with this prefix is treated as unset.
pub const PLACEHOLDER_PREFIX: &str = "YOUR_";

/// Credentials for the official platform APIs.
#[derive(Clone, Default)]
pub struct Credentials {
    /// YouTube Data API v3 key (sent as the `key` query parameter).
    pub youtube_api_key: Option<String>,
    /// Facebook Graph API access token.
    pub facebook_access_token: Option<String>,
    /// Twitter API bearer token.
    pub twitter_bearer_token: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn state(value: &Option<String>) -> &'static str {
            match usable(value.as_deref()) {
                Some(_) => "<set>",
                None => "<unset>",
            }
        }
        f.debug_struct("Credentials")
            .field("youtube_api_key", &state(&self.youtube_api_key))
            .field("facebook_access_token", &state(&self.facebook_access_token))
            .field("twitter_bearer_token", &state(&self.twitter_bearer_token))
            .finish()
    }
}

/// Base URLs of every upstream the sources talk to.
///
/// Overridable so mirrors can be swapped and tests can point at stub servers.
#[derive(Debug, Clone)]
pub struct Endpoints {
    /// YouTube Data API v3 root.
    pub youtube_api: String,
    /// youtube.com web root.
    pub youtube_web: String,
    /// Invidious instance root.
    pub invidious: String,
    /// Graph API root including the version segment.
    pub facebook_graph: String,
    /// mbasic.facebook.com web root.
    pub facebook_web: String,
    /// Twitter API root.
    pub twitter_api: String,
    /// Nitter instance root.
    pub nitter: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            youtube_api: "https://www.googleapis.com/youtube/v3".into(),
            youtube_web: "https://www.youtube.com".into(),
            invidious: "https://yewtu.be".into(),
            facebook_graph: "https://graph.facebook.com/v19.0".into(),
            facebook_web: "https://mbasic.facebook.com".into(),
            twitter_api: "https://api.twitter.com".into(),
            nitter: "https://nitter.net".into(),
        }
    }
}

impl Endpoints {
    /// Point every upstream at paths under a single root URL.
    pub fn all_at(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            youtube_api: format!("{base}/youtube/v3"),
            youtube_web: format!("{base}/youtube-web"),
            invidious: format!("{base}/invidious"),
            facebook_graph: format!("{base}/graph"),
            facebook_web: format!("{base}/mbasic"),
            twitter_api: format!("{base}/twitter"),
            nitter: format!("{base}/nitter"),
        }
    }

    /// Returns the base URL a given source talks to.
    pub fn base_for(&self, source: SourceKind) -> &str {
        match source {
            SourceKind::YouTubeApi => &self.youtube_api,
            SourceKind::YouTubeResultsPage => &self.youtube_web,
            SourceKind::Invidious => &self.invidious,
            SourceKind::FacebookGraph => &self.facebook_graph,
            SourceKind::FacebookMobilePage => &self.facebook_web,
            SourceKind::TwitterApi => &self.twitter_api,
            SourceKind::Nitter => &self.nitter,
        }
    }

    /// Join a path onto the base URL of `source`.
    pub fn url(&self, source: SourceKind, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_for(source).trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Configuration shared by every search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Official API credentials.
    pub credentials: Credentials,
    /// Upstream base URLs.
    pub endpoints: Endpoints,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
    /// When `false`, only the official API of each platform is queried.
    pub scraping_enabled: bool,
    /// When `true`, every fallback runs and results are merged instead of
    /// stopping at the first fallback that yields matches.
    pub exhaustive_fallbacks: bool,
    /// Custom User-Agent string. If `None`, rotates through a built-in list
    /// of realistic browser User-Agents.
    pub user_agent: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            credentials: Credentials::default(),
            endpoints: Endpoints::default(),
            timeout_seconds: 10,
            scraping_enabled: true,
            exhaustive_fallbacks: false,
            user_agent: None,
        }
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `timeout_seconds` must be greater than 0
    /// - every endpoint must be an absolute http(s) URL
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        for source in [
            SourceKind::YouTubeApi,
            SourceKind::YouTubeResultsPage,
            SourceKind::Invidious,
            SourceKind::FacebookGraph,
            SourceKind::FacebookMobilePage,
            SourceKind::TwitterApi,
            SourceKind::Nitter,
        ] {
            let base = self.endpoints.base_for(source);
            let parsed = Url::parse(base)
                .map_err(|e| SearchError::Config(format!("invalid {source} endpoint: {e}")))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(SearchError::Config(format!(
                    "{source} endpoint must use http or https"
                )));
            }
        }
        Ok(())
    }

    /// Returns the credential an official API source needs.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::MissingCredential`] if the credential is unset,
    /// blank, or still a placeholder, and for sources that take none.
    pub fn credential_for(&self, source: SourceKind) -> Result<&str, SearchError> {
        let value = match source {
            SourceKind::YouTubeApi => self.credentials.youtube_api_key.as_deref(),
            SourceKind::FacebookGraph => self.credentials.facebook_access_token.as_deref(),
            SourceKind::TwitterApi => self.credentials.twitter_bearer_token.as_deref(),
            _ => None,
        };
        usable(value).ok_or(SearchError::MissingCredential(source))
    }
}

fn usable(value: Option<&str>) -> Option<&str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.starts_with(PLACEHOLDER_PREFIX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sensible_values() {
        let config = SearchConfig::default();
        assert_eq!(config.timeout_seconds, 10);
        assert!(config.scraping_enabled);
        assert!(!config.exhaustive_fallbacks);
        assert!(config.user_agent.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = SearchConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_seconds"));
    }

    #[test]
    fn relative_endpoint_rejected() {
        let mut config = SearchConfig::default();
        config.endpoints.nitter = "nitter.net".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("nitter"));
    }

    #[test]
    fn non_http_endpoint_rejected() {
        let mut config = SearchConfig::default();
        config.endpoints.invidious = "ftp://mirror.example".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("http"));
    }

    #[test]
    fn placeholder_credential_is_missing() {
        let config = SearchConfig {
            credentials: Credentials {
                youtube_api_key: Some("YOUR_YOUTUBE_API_KEY".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            config.credential_for(SourceKind::YouTubeApi),
            Err(SearchError::MissingCredential(SourceKind::YouTubeApi))
        ));
    }

    #[test]
    fn real_credential_is_trimmed() {
        let config = SearchConfig {
            credentials: Credentials {
                twitter_bearer_token: Some("  abc123 ".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(config.credential_for(SourceKind::TwitterApi).ok(), Some("abc123"));
    }

    #[test]
    fn scrapers_have_no_credential() {
        let config = SearchConfig::default();
        assert!(config.credential_for(SourceKind::Nitter).is_err());
    }

    #[test]
    fn debug_never_prints_secrets() {
        let credentials = Credentials {
            facebook_access_token: Some("secret-token".into()),
            ..Default::default()
        };
        let printed = format!("{credentials:?}");
        assert!(!printed.contains("secret-token"));
        assert!(printed.contains("<set>"));
    }

    #[test]
    fn endpoint_url_joins_single_slash() {
        let mut endpoints = Endpoints::default();
        endpoints.nitter = "https://nitter.example/".into();
        assert_eq!(
            endpoints.url(SourceKind::Nitter, "/search"),
            "https://nitter.example/search"
        );
    }

    #[test]
    fn all_at_points_every_source_at_one_server() {
        let endpoints = Endpoints::all_at("http://127.0.0.1:9999/");
        assert_eq!(endpoints.youtube_api, "http://127.0.0.1:9999/youtube/v3");
        assert_eq!(endpoints.nitter, "http://127.0.0.1:9999/nitter");
        let config = SearchConfig {
            endpoints,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
