use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, RwLock};

use crate::error::CoreError;
use crate::model::Item;

/// Result of a full, unfiltered read of the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOutput {
    /// Items in whatever order the store returned them.
    pub items: Vec<Item>,
    /// Number of items the store reports as returned.
    pub count: usize,
    /// Number of records examined, when the store distinguishes it.
    pub scanned_count: Option<usize>,
}

/// Durable mapping from item id to item record.
///
/// One round trip per call, no retries. Implementations are built once per
/// process and shared by reference across invocations.
pub trait ItemStore: Send + Sync {
    /// Insert a new item keyed by `item.id`. Never overwrites.
    fn put(&self, item: &Item) -> impl Future<Output = Result<(), CoreError>> + Send;

    /// Read every stored item.
    fn scan_all(&self) -> impl Future<Output = Result<ScanOutput, CoreError>> + Send;
}

/// Process-local store for running without DynamoDB.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: Arc<RwLock<HashMap<String, Item>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ItemStore for MemoryStore {
    async fn put(&self, item: &Item) -> Result<(), CoreError> {
        let mut items = self
            .items
            .write()
            .map_err(|_| CoreError::Unavailable("memory store lock poisoned".to_string()))?;

        if items.contains_key(&item.id) {
            return Err(CoreError::Unavailable(format!(
                "item {} already exists",
                item.id
            )));
        }

        items.insert(item.id.clone(), item.clone());
        Ok(())
    }

    async fn scan_all(&self) -> Result<ScanOutput, CoreError> {
        let items: Vec<Item> = self
            .items
            .read()
            .map_err(|_| CoreError::Unavailable("memory store lock poisoned".to_string()))?
            .values()
            .cloned()
            .collect();

        Ok(ScanOutput {
            count: items.len(),
            items,
            scanned_count: None,
        })
    }
}
