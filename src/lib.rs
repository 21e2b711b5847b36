//! lookalike: an HTTP service that looks up accounts impersonating a brand
//! or person on YouTube, Facebook and Twitter.
//!
//! The search itself lives in the `lookalike-search` crate; this crate adds
//! environment configuration, the axum router and error-to-response mapping.

pub mod config;
pub mod error;
pub mod server;

pub use config::ServiceConfig;
pub use error::ApiError;
pub use server::{router, serve};
