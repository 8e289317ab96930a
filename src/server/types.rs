//! Shared server state and request parameter types.

use std::sync::Arc;

use serde::Deserialize;

use crate::config::Config;
use crate::error_handling::RequestStats;
use crate::rate_limiter::FixedWindowLimiter;
use crate::storage::BookStore;

/// State shared by every handler.
///
/// Owns the process-wide catalogue, limiter and statistics; handlers receive
/// it through axum's `State` extractor instead of reaching for globals.
#[derive(Clone)]
pub struct AppState {
    /// The catalogue
    pub books: Arc<BookStore>,
    /// Limiter shared by every route group
    pub limiter: FixedWindowLimiter,
    /// Per-outcome request counters
    pub stats: Arc<RequestStats>,
    /// Page size used when `limit` is absent
    pub page_size: usize,
}

impl AppState {
    /// Wraps the store and starts with empty statistics.
    pub fn new(books: BookStore, limiter: FixedWindowLimiter, page_size: usize) -> Self {
        AppState {
            books: Arc::new(books),
            limiter,
            stats: Arc::new(RequestStats::new()),
            page_size,
        }
    }

    /// State seeded with `config.seed_books` placeholder books.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            BookStore::with_placeholder_books(config.seed_books),
            FixedWindowLimiter::new(config.rate_limit, config.rate_window),
            config.page_size,
        )
    }
}

/// Query string of `GET /api/books`.
///
/// Kept as raw strings so malformed numbers become a 400 with the usual JSON
/// body rather than axum's plain-text rejection.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Exact author to filter by; empty counts as absent
    pub author: Option<String>,
    /// 1-based page number
    pub page: Option<String>,
    /// Books per page
    pub limit: Option<String>,
}
