//! Candidate source implementations.
//!
//! Each module provides a struct implementing [`CandidateSource`] for one
//! upstream. [`SourceKind`] itself also implements the trait by dispatching
//! to the concrete source, so a platform chain is simply
//! [`crate::types::Platform::chain`].

pub mod facebook_graph;
pub mod facebook_page;
pub mod invidious;
pub mod nitter;
pub mod twitter_api;
pub mod youtube_api;
pub mod youtube_page;

pub use facebook_graph::FacebookGraphSource;
pub use facebook_page::FacebookPageSource;
pub use invidious::InvidiousSource;
pub use nitter::NitterSource;
pub use twitter_api::TwitterApiSource;
pub use youtube_api::YouTubeApiSource;
pub use youtube_page::YouTubePageSource;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::source::CandidateSource;
use crate::types::{CandidateAccount, SearchRequest, SourceKind};

impl CandidateSource for SourceKind {
    async fn fetch(
        &self,
        client: &reqwest::Client,
        request: &SearchRequest,
        config: &SearchConfig,
    ) -> Result<Vec<CandidateAccount>, SearchError> {
        match self {
            SourceKind::YouTubeApi => YouTubeApiSource.fetch(client, request, config).await,
            SourceKind::YouTubeResultsPage => {
                YouTubePageSource.fetch(client, request, config).await
            }
            SourceKind::Invidious => InvidiousSource.fetch(client, request, config).await,
            SourceKind::FacebookGraph => FacebookGraphSource.fetch(client, request, config).await,
            SourceKind::FacebookMobilePage => {
                FacebookPageSource.fetch(client, request, config).await
            }
            SourceKind::TwitterApi => TwitterApiSource.fetch(client, request, config).await,
            SourceKind::Nitter => NitterSource.fetch(client, request, config).await,
        }
    }

    fn kind(&self) -> SourceKind {
        *self
    }
}

/// Collapse runs of whitespace into single spaces and trim the ends.
pub(crate) fn squash_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
