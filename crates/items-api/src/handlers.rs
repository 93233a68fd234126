use http::StatusCode;
use serde::Serialize;
use tracing::{info, instrument};

use items_core::{Item, ItemStore, NewItem, NewItemError, sort_newest_first};

use crate::errors::ApiError;
use crate::response::{ApiResponse, json_response};

#[derive(Serialize)]
pub struct CreateItemResponse {
    pub message: &'static str,
    pub item: Item,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItemsResponse {
    pub items: Vec<Item>,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scanned_count: Option<usize>,
}

/// POST /items
///
/// Validates the raw body, stamps a fresh id and `createdAt`, and writes the
/// item once. Returns 201 with the stored item echoed back. A body that is
/// not UTF-8 is malformed input.
#[instrument(skip_all)]
pub async fn create_item<S: ItemStore>(store: &S, body: &[u8]) -> ApiResponse {
    let created = match std::str::from_utf8(body) {
        Ok(text) => insert_item(store, Some(text)).await,
        Err(_) => Err(NewItemError::MalformedInput.into()),
    };

    match created {
        Ok(item) => json_response(
            StatusCode::CREATED,
            &CreateItemResponse {
                message: "Item created successfully",
                item,
            },
        ),
        Err(e) => e.into(),
    }
}

async fn insert_item<S: ItemStore>(store: &S, body: Option<&str>) -> Result<Item, ApiError> {
    let new_item = NewItem::from_body(body)?;
    let item = Item::create(new_item);

    store.put(&item).await?;

    info!(item_id = %item.id, "item created");
    Ok(item)
}

/// GET /items
///
/// Returns every stored item, newest first.
#[instrument(skip_all)]
pub async fn list_items<S: ItemStore>(store: &S) -> ApiResponse {
    match scan_items(store).await {
        Ok(listing) => json_response(StatusCode::OK, &listing),
        Err(e) => e.into(),
    }
}

async fn scan_items<S: ItemStore>(store: &S) -> Result<ListItemsResponse, ApiError> {
    let scan = store.scan_all().await?;

    let mut items = scan.items;
    sort_newest_first(&mut items);

    info!(count = scan.count, scanned_count = ?scan.scanned_count, "items listed");

    Ok(ListItemsResponse {
        items,
        count: scan.count,
        scanned_count: scan.scanned_count.filter(|&n| n > 0),
    })
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, SubsecRound, TimeZone, Utc};
    use items_core::{CoreError, MemoryStore, ScanOutput};
    use serde_json::{Value, json};

    use super::*;

    /// Store whose every call fails.
    struct FailingStore;

    impl ItemStore for FailingStore {
        async fn put(&self, _item: &Item) -> Result<(), CoreError> {
            Err(CoreError::Unavailable("ProvisionedThroughputExceeded".into()))
        }

        async fn scan_all(&self) -> Result<ScanOutput, CoreError> {
            Err(CoreError::Unavailable("connection timed out".into()))
        }
    }

    /// Store returning a fixed scan result.
    struct FixedStore(ScanOutput);

    impl ItemStore for FixedStore {
        async fn put(&self, _item: &Item) -> Result<(), CoreError> {
            Ok(())
        }

        async fn scan_all(&self) -> Result<ScanOutput, CoreError> {
            Ok(self.0.clone())
        }
    }

    fn body_of(resp: &ApiResponse) -> Value {
        serde_json::from_str(resp.body()).unwrap()
    }

    async fn post(store: &impl ItemStore, body: Value) -> ApiResponse {
        create_item(store, body.to_string().as_bytes()).await
    }

    // -- create_item --

    #[tokio::test]
    async fn creates_item() {
        let store = MemoryStore::new();
        let started = Utc::now().trunc_subsecs(3);

        let resp = post(&store, json!({"name": "widget", "description": "small"})).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body = body_of(&resp);
        assert_eq!(body["message"], "Item created successfully");
        assert_eq!(body["item"]["name"], "widget");
        assert_eq!(body["item"]["description"], "small");
        assert!(!body["item"]["id"].as_str().unwrap().is_empty());

        let created_at = body["item"]["createdAt"].as_str().unwrap();
        let created_at = chrono::DateTime::parse_from_rfc3339(created_at).unwrap();
        assert!(created_at >= started);

        let stored = store.scan_all().await.unwrap();
        assert_eq!(stored.count, 1);
        assert_eq!(stored.items[0].id, body["item"]["id"]);
    }

    #[tokio::test]
    async fn ignores_caller_supplied_id_and_timestamp() {
        let store = MemoryStore::new();
        let resp = post(
            &store,
            json!({
                "id": "mine",
                "name": "n",
                "description": "d",
                "createdAt": "2000-01-01T00:00:00.000Z"
            }),
        )
        .await;

        let item = &body_of(&resp)["item"];
        assert_ne!(item["id"], "mine");
        assert_ne!(item["createdAt"], "2000-01-01T00:00:00.000Z");
    }

    #[tokio::test]
    async fn trims_name() {
        let store = MemoryStore::new();
        post(&store, json!({"name": "  A  ", "description": "B"})).await;

        let stored = store.scan_all().await.unwrap();
        assert_eq!(stored.items[0].name, "A");
        assert_eq!(stored.items[0].description, "B");
    }

    #[tokio::test]
    async fn missing_body() {
        let store = MemoryStore::new();
        let resp = create_item(&store, b"").await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_of(&resp), json!({"error": "Request body is required"}));
        assert_eq!(store.scan_all().await.unwrap().count, 0);
    }

    #[tokio::test]
    async fn missing_description() {
        let store = MemoryStore::new();
        let resp = post(&store, json!({"name": "X"})).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_of(&resp),
            json!({"error": "name and description are required fields"})
        );
    }

    #[tokio::test]
    async fn malformed_body() {
        let store = MemoryStore::new();
        let resp = create_item(&store, b"name=X").await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_of(&resp),
            json!({"error": "Request body must be a valid JSON object"})
        );
    }

    #[tokio::test]
    async fn non_utf8_body_is_malformed() {
        let store = MemoryStore::new();
        let resp = create_item(&store, &[0x7b, 0xff, 0xfe, 0x7d]).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_of(&resp),
            json!({"error": "Request body must be a valid JSON object"})
        );
        assert_eq!(store.scan_all().await.unwrap().count, 0);
    }

    #[tokio::test]
    async fn create_store_failure() {
        let resp = post(&FailingStore, json!({"name": "n", "description": "d"})).await;
        let body = body_of(&resp);

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");
        assert!(
            body["message"]
                .as_str()
                .unwrap()
                .contains("ProvisionedThroughputExceeded")
        );
    }

    #[tokio::test]
    async fn error_responses_carry_cors_headers() {
        let resp = create_item(&FailingStore, b"").await;
        assert_eq!(resp.headers()["access-control-allow-origin"], "*");
    }

    // -- list_items --

    #[tokio::test]
    async fn lists_empty_store() {
        let resp = list_items(&MemoryStore::new()).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_of(&resp), json!({"items": [], "count": 0}));
    }

    #[tokio::test]
    async fn lists_newest_first() {
        let store = MemoryStore::new();
        let base = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        for (name, minutes) in [("middle", 5), ("oldest", 0), ("newest", 10)] {
            let new_item = NewItem::new(name, "d").unwrap();
            let item = Item::create_at(new_item, base + Duration::minutes(minutes));
            store.put(&item).await.unwrap();
        }

        let resp = list_items(&store).await;
        let body = body_of(&resp);

        let names: Vec<&str> = body["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["newest", "middle", "oldest"]);
        assert_eq!(body["count"], 3);
        assert!(body.get("scannedCount").is_none());
    }

    #[tokio::test]
    async fn repeated_lists_return_same_set() {
        let store = MemoryStore::new();
        for name in ["a", "b", "c"] {
            post(&store, json!({"name": name, "description": "d"})).await;
        }

        let ids = |resp: &ApiResponse| {
            let mut ids: Vec<String> = body_of(resp)["items"]
                .as_array()
                .unwrap()
                .iter()
                .map(|i| i["id"].as_str().unwrap().to_string())
                .collect();
            ids.sort();
            ids
        };

        let first = list_items(&store).await;
        let second = list_items(&store).await;
        assert_eq!(ids(&first), ids(&second));
        assert_eq!(ids(&first).len(), 3);
    }

    #[tokio::test]
    async fn reports_scanned_count() {
        let store = FixedStore(ScanOutput {
            items: Vec::new(),
            count: 0,
            scanned_count: Some(4),
        });

        let body = body_of(&list_items(&store).await);
        assert_eq!(body, json!({"items": [], "count": 0, "scannedCount": 4}));
    }

    #[tokio::test]
    async fn omits_zero_scanned_count() {
        let store = FixedStore(ScanOutput {
            items: Vec::new(),
            count: 0,
            scanned_count: Some(0),
        });

        let body = body_of(&list_items(&store).await);
        assert_eq!(body, json!({"items": [], "count": 0}));
    }

    #[tokio::test]
    async fn list_store_failure() {
        let resp = list_items(&FailingStore).await;
        let body = body_of(&resp);

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");
        assert!(body["message"].as_str().unwrap().contains("connection timed out"));
        assert!(body.get("items").is_none());
    }
}
