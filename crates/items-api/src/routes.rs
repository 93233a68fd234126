use std::time::Duration;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderName, HeaderValue};
use axum::routing::get;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use items_core::ItemStore;

use crate::handlers;
use crate::response::{ApiResponse, CORS_HEADERS};
use crate::state::AppState;

/// Matches the Lambda function timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Serve both handlers over plain HTTP for local runs.
///
/// Responses produced outside the handlers (unknown route, timeout, body
/// limit) still get the CORS headers.
pub fn router<S>(store: S) -> Router
where
    S: ItemStore + Clone + 'static,
{
    let [origin, methods, headers] = CORS_HEADERS;

    Router::new()
        .route("/items", get(list_items_route::<S>).post(create_item_route::<S>))
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(cors_header(origin))
        .layer(cors_header(methods))
        .layer(cors_header(headers))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { store })
}

fn cors_header((name, value): (HeaderName, &'static str)) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::if_not_present(name, HeaderValue::from_static(value))
}

async fn create_item_route<S>(State(state): State<AppState<S>>, body: Bytes) -> ApiResponse
where
    S: ItemStore + Clone + 'static,
{
    handlers::create_item(&state.store, &body).await
}

async fn list_items_route<S>(State(state): State<AppState<S>>) -> ApiResponse
where
    S: ItemStore + Clone + 'static,
{
    handlers::list_items(&state.store).await
}
