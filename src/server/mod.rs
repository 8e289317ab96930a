//! HTTP server for the book catalogue.
//!
//! Routes:
//! - `GET /api/books` - list, filter by author, or paginate
//! - `POST /api/books` - create a book
//! - `PUT /api/books/{id}` - partially update a book
//! - `DELETE /api/books/{id}` - delete a book
//!
//! Each route group is wrapped by the per-client rate limiter. Unsupported
//! verbs get a 405; unknown paths and non-integer ids get a 404. None of
//! these are counted.

mod handlers;
mod types;

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{rejection::PathRejection, Path, Request, State},
    middleware::{from_fn, from_fn_with_state, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, put},
    Router,
};
use tokio::net::TcpListener;

use crate::error_handling::{ApiError, RequestOutcome, RequestStats};
use crate::rate_limiter::{enforce_rate_limit, RateLimitGuard, RouteGroup};
use handlers::{
    create_book, delete_book, list_books, method_not_allowed, not_found, update_book,
};
pub use types::{AppState, ListParams};

/// Builds the application router.
///
/// The router expects `ConnectInfo<SocketAddr>` to be available, which
/// [`start_server`] provides; tests can supply it with
/// `axum::extract::connect_info::MockConnectInfo`.
pub fn build_router(state: AppState) -> Router {
    let collection = get(list_books)
        .post(create_book)
        .route_layer(from_fn_with_state(
            RateLimitGuard::new(state.limiter.clone(), RouteGroup::Collection),
            enforce_rate_limit,
        ))
        .fallback(method_not_allowed);

    let item = put(update_book)
        .route_layer(from_fn_with_state(
            RateLimitGuard::new(state.limiter.clone(), RouteGroup::Update),
            enforce_rate_limit,
        ))
        .merge(delete(delete_book).route_layer(from_fn_with_state(
            RateLimitGuard::new(state.limiter.clone(), RouteGroup::Delete),
            enforce_rate_limit,
        )))
        .fallback(method_not_allowed)
        .layer(from_fn(require_integer_id));

    Router::new()
        .route("/api/books", collection)
        .route("/api/books/:id", item)
        .fallback(not_found)
        .layer(from_fn_with_state(Arc::clone(&state.stats), record_outcome))
        .with_state(state)
}

/// Serves the API on `listener` until `shutdown` resolves.
pub async fn start_server<F>(
    listener: TcpListener,
    state: AppState,
    shutdown: F,
) -> Result<(), anyhow::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_router(state);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown)
    .await
    .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}

/// Answers `404 Not Found` for an `{id}` segment that is not an integer.
///
/// Runs outside the rate-limit layers, so such paths behave like unknown
/// paths and never spend quota.
async fn require_integer_id(
    id: Result<Path<u64>, PathRejection>,
    request: Request,
    next: Next,
) -> Response {
    if id.is_err() {
        return ApiError::NotFound.into_response();
    }
    next.run(request).await
}

/// Counts every finished request by status class.
async fn record_outcome(
    State(stats): State<Arc<RequestStats>>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;
    stats.record(RequestOutcome::from_status(response.status().as_u16()));
    response
}
