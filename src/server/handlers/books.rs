//! Catalogue handlers.
//!
//! Every handler here sits behind the rate-limit middleware, so by the time
//! one runs the client's request has already been counted.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde_json::{Map, Value};

use super::super::types::{AppState, ListParams};
use crate::config::DEFAULT_PAGE;
use crate::error_handling::ApiError;
use crate::storage::{Book, BookPatch, NewBook};

type JsonObject = Map<String, Value>;

/// `GET /api/books`
///
/// A non-empty `author` returns every book by exactly that author and ignores
/// pagination. Otherwise returns page `page` (default 1) of `limit` books
/// (default: configured page size). A zero `page` or `limit` returns the
/// whole catalogue; a page past the end is an empty list.
pub async fn list_books(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<Book>>, ApiError> {
    let Query(params) = params.map_err(|rejection| {
        log::debug!("Rejected list query: {}", rejection);
        ApiError::InvalidPagination
    })?;

    if let Some(author) = params.author.as_deref().filter(|a| !a.is_empty()) {
        return Ok(Json(state.books.by_author(author).await));
    }

    let page = parse_count(params.page.as_deref(), DEFAULT_PAGE)?;
    let limit = parse_count(params.limit.as_deref(), state.page_size)?;
    if page == 0 || limit == 0 {
        return Ok(Json(state.books.all().await));
    }

    Ok(Json(state.books.page(page, limit).await))
}

/// `POST /api/books`
pub async fn create_book(
    State(state): State<AppState>,
    body: Result<Json<JsonObject>, JsonRejection>,
) -> Result<(StatusCode, Json<Book>), ApiError> {
    let new_book = NewBook::try_from(json_object(body)?)?;
    let book = state.books.insert(new_book).await;
    log::info!("Created book {}", book.id);
    Ok((StatusCode::CREATED, Json(book)))
}

/// `PUT /api/books/{id}`
///
/// The id is looked up before the body is validated, so an unknown id is a
/// bare 404 even when the body is also invalid.
pub async fn update_book(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
    body: Result<Json<JsonObject>, JsonRejection>,
) -> Result<Json<Book>, ApiError> {
    let Path(id) = id.map_err(|_| ApiError::NotFound)?;
    if !state.books.contains(id).await {
        return Err(ApiError::UpdateTargetMissing(id));
    }

    let patch = BookPatch::try_from(json_object(body)?)?;
    // The book may have been deleted since the lookup above
    let book = state
        .books
        .update(id, patch)
        .await
        .ok_or(ApiError::UpdateTargetMissing(id))?;
    log::info!("Updated book {}", id);
    Ok(Json(book))
}

/// `DELETE /api/books/{id}`
pub async fn delete_book(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<Book>, ApiError> {
    let Path(id) = id.map_err(|_| ApiError::NotFound)?;
    let book = state
        .books
        .remove(id)
        .await
        .ok_or(ApiError::BookNotFound(id))?;
    log::info!("Deleted book {}", id);
    Ok(Json(book))
}

fn json_object(body: Result<Json<JsonObject>, JsonRejection>) -> Result<JsonObject, ApiError> {
    body.map(|Json(object)| object).map_err(|rejection| {
        log::debug!("Rejected book body: {}", rejection);
        ApiError::InvalidBookData
    })
}

fn parse_count(raw: Option<&str>, default: usize) -> Result<usize, ApiError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ApiError::InvalidPagination),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_count_default() {
        assert_eq!(parse_count(None, 10), Ok(10));
    }

    #[test]
    fn test_parse_count_values() {
        assert_eq!(parse_count(Some("3"), 10), Ok(3));
        assert_eq!(parse_count(Some(" 7 "), 10), Ok(7));
        assert_eq!(parse_count(Some("0"), 10), Ok(0));
    }

    #[test]
    fn test_parse_count_rejects_garbage() {
        assert_eq!(parse_count(Some("two"), 10), Err(ApiError::InvalidPagination));
        assert_eq!(parse_count(Some("-1"), 10), Err(ApiError::InvalidPagination));
        assert_eq!(parse_count(Some(""), 10), Err(ApiError::InvalidPagination));
    }
}
