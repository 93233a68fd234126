use std::net::SocketAddr;

use crate::error::ConfigError;

/// DynamoDB table holding the items.
pub const TABLE_NAME_VAR: &str = "TABLE_NAME";

/// Listen address for the local HTTP adapter.
pub const BIND_ADDR_VAR: &str = "BIND_ADDR";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Runtime configuration, read once at process start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Table name, if one was configured.
    pub table_name: Option<String>,
    /// Only used by the local HTTP adapter.
    pub bind_addr: SocketAddr,
}

impl Config {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let table_name = lookup(TABLE_NAME_VAR).filter(|t| !t.trim().is_empty());

        let bind_addr = lookup(BIND_ADDR_VAR)
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                name: BIND_ADDR_VAR,
                reason: e.to_string(),
            })?;

        Ok(Self {
            table_name,
            bind_addr,
        })
    }

    /// The table name, or an error if `TABLE_NAME` was not set.
    pub fn require_table_name(&self) -> Result<&str, ConfigError> {
        self.table_name
            .as_deref()
            .ok_or(ConfigError::Missing(TABLE_NAME_VAR))
    }
}
