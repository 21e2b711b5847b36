//! # lookalike-search
//!
//! Find accounts on social platforms whose name, handle, or bio closely
//! matches a keyword, to flag potential impersonation.
//!
//! ## Design
//!
//! - One fixed source chain per platform: official API first, then
//!   scraping fallbacks (the platform's own markup, then a third-party mirror)
//! - Fallbacks only run when the API yields no matching candidates
//! - Candidates match when their name or handle reaches a similarity
//!   threshold (normalised Levenshtein), or their bio mentions the keyword
//! - Results are deduplicated by canonical profile URL, first occurrence wins
//! - Fixed throttle delays between upstream requests; no adaptive backoff
//! - Sequential per search; no state is shared between searches
//!
//! ## Security
//!
//! - Credentials are never logged or included in error messages
//! - Keywords are logged only at trace level
//! - No network listeners; the HTTP surface lives in the `lookalike` crate

pub mod config;
pub mod error;
pub mod http;
pub mod orchestrator;
pub mod source;
pub mod sources;
pub mod types;

pub use config::{Credentials, Endpoints, SearchConfig};
pub use error::{Result, SearchError};
pub use orchestrator::scoring::similarity;
pub use source::CandidateSource;
pub use types::{CandidateAccount, MatchedAccount, Platform, SearchRequest, SourceKind};

/// Search one platform for accounts resembling `request.keyword`.
///
/// Runs the platform's source chain (API, then scraping fallbacks),
/// keeps matching candidates, deduplicates by profile URL, and returns at
/// most `request.limit` accounts. Upstream failures never surface here:
/// if every source fails the result is simply empty.
///
/// # Errors
///
/// Returns [`SearchError::Config`] if `request` or `config` is invalid, or
/// [`SearchError::Http`] if the HTTP client cannot be constructed.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> lookalike_search::Result<()> {
/// use lookalike_search::{Platform, SearchConfig, SearchRequest};
///
/// let request = SearchRequest::new("acme");
/// let accounts = lookalike_search::search(Platform::Twitter, &request, &SearchConfig::default()).await?;
/// for matched in &accounts {
///     println!("{} ({:.2}): {}", matched.account.name, matched.similarity, matched.account.url);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search(
    platform: Platform,
    request: &SearchRequest,
    config: &SearchConfig,
) -> Result<Vec<MatchedAccount>> {
    request.validate()?;
    config.validate()?;
    tracing::trace!(%platform, keyword = request.trimmed_keyword(), "search requested");

    let client = http::build_client(config)?;
    Ok(orchestrator::search::orchestrate_search(platform, &client, request, config).await)
}
