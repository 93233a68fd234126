use items_api::init_tracing;
use items_lambda::{list_items_handler, store_from_env};
use lambda_http::{Error, run, service_fn};

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();
    let store = store_from_env().await?;

    run(service_fn(|event| list_items_handler(&store, event))).await
}
