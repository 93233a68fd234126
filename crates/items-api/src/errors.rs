use http::StatusCode;
use items_core::{CoreError, NewItemError};

use crate::response::{ApiResponse, json_response};

/// API error types with JSON responses.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing body, malformed body, or missing fields.
    #[error(transparent)]
    Invalid(#[from] NewItemError),
    /// Any failure talking to the item store.
    #[error("Internal server error")]
    Store(#[from] CoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Invalid(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ApiError> for ApiResponse {
    fn from(err: ApiError) -> Self {
        let status = err.status();
        let body = match &err {
            ApiError::Invalid(reason) => serde_json::json!({ "error": reason.to_string() }),
            ApiError::Store(source) => {
                tracing::error!("Core error: {source}");
                serde_json::json!({
                    "error": err.to_string(),
                    "message": source.to_string(),
                })
            }
        };

        json_response(status, &body)
    }
}
