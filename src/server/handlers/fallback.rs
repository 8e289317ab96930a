//! Responses for requests that match no handler.

use crate::error_handling::ApiError;

/// Unknown path.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Known path, unsupported verb. Not rate limited.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
