//! External metadata client for The Movie Database (TMDB).
//!
//! This crate provides a small async client used to enrich catalog titles
//! with posters, scores, trending lists and reviews. It handles:
//! - Building requests with the API key and a per-request timeout
//! - One retry on transport failures and 5xx responses
//! - Decoding TMDB's JSON into owned result types
//! - Absorbing every failure into `None` at the public boundary
//!
//! ## Example Usage
//! ```ignore
//! use metadata_client::{TmdbClient, TmdbConfig};
//!
//! let client = TmdbClient::new(TmdbConfig::with_api_key(key))?;
//! if let Some(details) = client.search_title("The Haunting of Hill House").await {
//!     let reviews = client.get_reviews(details.id).await.unwrap_or_default();
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::TmdbClient;
pub use config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, TmdbConfig};
pub use error::{MetadataError, Result};
pub use types::{IMAGE_BASE_URL, Review, TitleDetails, TitleSummary};
