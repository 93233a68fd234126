//! Lambda entry points for the item catalog.
//!
//! Each binary builds its [`DynamoStore`] once and hands it by reference to
//! every invocation. `lambda_http` turns the API Gateway event into a
//! request, decoding base64 bodies on the way in.

use items_api::{ApiResponse, handlers};
use items_core::{Config, DynamoStore, ItemStore};
use lambda_http::{Body, Error, Request, Response};
use tracing::info;

/// Build the store from `TABLE_NAME` and the default AWS configuration.
pub async fn store_from_env() -> Result<DynamoStore, Error> {
    let config = Config::from_env()?;
    let table = config.require_table_name()?;
    info!(table, "using DynamoDB item store");
    Ok(DynamoStore::new(table).await)
}

/// `POST /items` invocation. Never returns `Err`: every failure is already
/// shaped into the response.
pub async fn create_item_handler<S: ItemStore>(
    store: &S,
    event: Request,
) -> Result<Response<Body>, Error> {
    Ok(into_lambda(handlers::create_item(store, event.body()).await))
}

/// `GET /items` invocation. The request is not inspected.
pub async fn list_items_handler<S: ItemStore>(
    store: &S,
    _event: Request,
) -> Result<Response<Body>, Error> {
    Ok(into_lambda(handlers::list_items(store).await))
}

fn into_lambda(response: ApiResponse) -> Response<Body> {
    response.map(Body::from)
}
