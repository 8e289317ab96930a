//! Mapping of [`ApiError`] onto HTTP responses.

use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use super::types::ApiError;
use crate::config::HEADER_RETRY_AFTER;
use crate::rate_limiter::ceil_secs;

impl ApiError {
    /// Status code sent for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidBookData | ApiError::InvalidPagination => StatusCode::BAD_REQUEST,
            ApiError::BookNotFound(_) | ApiError::UpdateTargetMissing(_) | ApiError::NotFound => {
                StatusCode::NOT_FOUND
            }
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::TooManyRequests { .. } => StatusCode::TOO_MANY_REQUESTS,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        // PUT on a missing id answers with a bare 404
        if let ApiError::UpdateTargetMissing(_) = self {
            return status.into_response();
        }

        let mut response = (status, Json(json!({ "error": self.to_string() }))).into_response();
        if let ApiError::TooManyRequests { retry_after } = self {
            response.headers_mut().insert(
                HEADER_RETRY_AFTER,
                HeaderValue::from(ceil_secs(retry_after)),
            );
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use std::time::Duration;

    async fn body_string(response: Response) -> String {
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body should be readable")
            .to_bytes();
        String::from_utf8(bytes.to_vec()).expect("body should be UTF-8")
    }

    #[tokio::test]
    async fn test_book_not_found_body() {
        let response = ApiError::BookNotFound(99999).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_string(response).await,
            r#"{"error":"Book with ID:99999 not Found"}"#
        );
    }

    #[tokio::test]
    async fn test_update_target_missing_has_empty_body() {
        let response = ApiError::UpdateTargetMissing(7).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_string(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_too_many_requests_body() {
        let response = ApiError::TooManyRequests {
            retry_after: Duration::from_millis(11_400),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()[HEADER_RETRY_AFTER], "12");
        assert_eq!(
            body_string(response).await,
            r#"{"error":"Too Many Requests"}"#
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::InvalidBookData.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::InvalidPagination.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::MethodNotAllowed.status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
    }
}
