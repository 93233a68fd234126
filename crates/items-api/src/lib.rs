pub mod errors;
pub mod handlers;
pub mod response;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod state;
pub mod telemetry;

pub use errors::ApiError;
pub use response::{ApiResponse, json_response};
#[cfg(feature = "server")]
pub use routes::router;
pub use telemetry::init_tracing;
