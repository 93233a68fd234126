use std::collections::HashMap;

use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;

use crate::error::CoreError;
use crate::model::Item;
use crate::store::{ItemStore, ScanOutput};

type Record = HashMap<String, AttributeValue>;

/// DynamoDB client wrapper for item storage.
#[derive(Clone)]
pub struct DynamoStore {
    client: Client,
    table_name: String,
}

impl DynamoStore {
    /// Create a new `DynamoStore` by loading AWS configuration from the
    /// environment and constructing a DynamoDB client.
    pub async fn new(table_name: impl Into<String>) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest()).load().await;
        Self::from_client(Client::new(&config), table_name)
    }

    /// Wrap an already-configured client.
    pub fn from_client(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// The DynamoDB table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

impl ItemStore for DynamoStore {
    async fn put(&self, item: &Item) -> Result<(), CoreError> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(to_record(item)?))
            // ids are fresh, so this only fires on a generator collision
            .condition_expression("attribute_not_exists(id)")
            .send()
            .await
            .map_err(aws_sdk_dynamodb::Error::from)?;

        Ok(())
    }

    /// Follows `LastEvaluatedKey` until the table is exhausted. A table that
    /// fits in one 1 MB page costs a single `Scan` request.
    async fn scan_all(&self) -> Result<ScanOutput, CoreError> {
        let mut pages = self
            .client
            .scan()
            .table_name(&self.table_name)
            .into_paginator()
            .send();

        let mut scan = ScanOutput {
            scanned_count: Some(0),
            ..ScanOutput::default()
        };

        while let Some(page) = pages.next().await {
            let page = page.map_err(aws_sdk_dynamodb::Error::from)?;
            let items = from_records(page.items.unwrap_or_default())?;
            add_page(&mut scan, items, page.count, page.scanned_count);
        }

        Ok(scan)
    }
}

fn to_record(item: &Item) -> Result<Record, CoreError> {
    Ok(serde_dynamo::to_item(item)?)
}

fn from_records(records: Vec<Record>) -> Result<Vec<Item>, CoreError> {
    Ok(serde_dynamo::from_items(records)?)
}

/// Fold one scan page into the running totals. DynamoDB reports counts as
/// `i32`; a negative value counts as zero.
fn add_page(scan: &mut ScanOutput, items: Vec<Item>, count: i32, scanned_count: i32) {
    scan.items.extend(items);
    scan.count += usize::try_from(count).unwrap_or_default();
    scan.scanned_count = Some(
        scan.scanned_count.unwrap_or_default() + usize::try_from(scanned_count).unwrap_or_default(),
    );
}
