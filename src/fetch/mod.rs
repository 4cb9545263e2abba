//! Fetching sub-search results
//!
//! This module defines the async `Fetcher` seam the engine dispatches
//! through, plus the HTTP-backed maps implementation:
//! - Building HTTP clients with proper user agent strings
//! - Fetching the search-results page for one grid point
//! - Per-field, absent-tolerant extraction of business cards

mod client;
mod maps;

pub use client::build_http_client;
pub use maps::MapsFetcher;

use crate::geo::GeoPoint;
use crate::places::Place;
use async_trait::async_trait;
use thiserror::Error;

/// One unit of dispatch: a sub-search at a single grid point
///
/// Created by the scheduler from a grid point and the parent query, owned
/// exclusively by the worker executing it, and dropped when the worker
/// completes or times out.
#[derive(Debug, Clone)]
pub struct SearchTask {
    pub center: GeoPoint,
    pub query: String,
    pub radius_km: f64,
}

/// Errors a fetch attempt can report for a single task
///
/// These never abort a run; the engine records them and moves on.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Failed to build search URL: {0}")]
    Url(String),
}

/// Result type alias for fetch operations
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// External capability that turns one search task into zero or more places
///
/// Implementations must be safe to invoke concurrently from independent
/// tasks, with no shared mutable state assumed between invocations. An
/// empty result is success, not an error: it means nothing was found at
/// that sub-search.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, task: &SearchTask) -> FetchResult<Vec<Place>>;
}
