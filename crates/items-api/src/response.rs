use http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    CONTENT_TYPE,
};
use http::{HeaderName, HeaderValue, Response, StatusCode};
use serde::Serialize;
use tracing::error;

/// Response produced by both handlers; the body is always JSON text.
pub type ApiResponse = Response<String>;

/// Headers permitting cross-origin calls from any origin.
pub const CORS_HEADERS: [(HeaderName, &str); 3] = [
    (ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
    (ACCESS_CONTROL_ALLOW_METHODS, "GET, POST, PUT, DELETE, OPTIONS"),
    (ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type, Authorization"),
];

/// Serialize `payload` as a JSON response carrying the CORS headers.
///
/// A payload that fails to serialize turns into a 500 rather than a
/// success response with a broken body.
pub fn json_response<T: Serialize>(status: StatusCode, payload: &T) -> ApiResponse {
    match serde_json::to_string(payload) {
        Ok(body) => with_headers(status, body),
        Err(e) => {
            error!(error = %e, "failed to serialize response body");
            let body = serde_json::json!({
                "error": "Internal server error",
                "message": e.to_string(),
            });
            with_headers(StatusCode::INTERNAL_SERVER_ERROR, body.to_string())
        }
    }
}

fn with_headers(status: StatusCode, body: String) -> ApiResponse {
    let mut response = Response::new(body);
    *response.status_mut() = status;

    let headers = response.headers_mut();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    for (name, value) in CORS_HEADERS {
        headers.insert(name, HeaderValue::from_static(value));
    }

    response
}
