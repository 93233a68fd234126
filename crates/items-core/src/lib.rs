pub mod config;
pub mod db;
pub mod error;
pub mod model;
pub mod store;

pub use config::Config;
pub use db::DynamoStore;
pub use error::{ConfigError, CoreError};
pub use model::{Item, NewItem, NewItemError, sort_newest_first};
pub use store::{ItemStore, MemoryStore, ScanOutput};
