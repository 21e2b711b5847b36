//! Search orchestrator: fallback chain, keyword matching, dedup.
//!
//! This module runs a platform's sources in priority order, scores every
//! candidate against the keyword, and merges the matches into one result
//! set without duplicate profile URLs.

pub mod dedup;
pub mod scoring;
pub mod search;
pub mod url_normalize;
