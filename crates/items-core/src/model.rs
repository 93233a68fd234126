use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// NewItem
// ---------------------------------------------------------------------------

/// A validated create request: both fields trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    name: String,
    description: String,
}

impl NewItem {
    /// Create a new `NewItem` after trimming and validation.
    pub fn new(name: impl AsRef<str>, description: impl AsRef<str>) -> Result<Self, NewItemError> {
        let name = name.as_ref().trim();
        let description = description.as_ref().trim();

        if name.is_empty() || description.is_empty() {
            return Err(NewItemError::MissingFields);
        }

        Ok(Self {
            name: name.to_string(),
            description: description.to_string(),
        })
    }

    /// Validate a raw request body.
    ///
    /// Checks run in order and the first failure wins: the body must be
    /// present and non-empty, it must be a JSON object, and the object must
    /// carry `name` and `description` as non-blank strings.
    pub fn from_body(body: Option<&str>) -> Result<Self, NewItemError> {
        let body = match body {
            Some(b) if !b.is_empty() => b,
            _ => return Err(NewItemError::MissingBody),
        };

        let value: Value = serde_json::from_str(body).map_err(|e| {
            tracing::debug!(error = %e, "request body is not valid JSON");
            NewItemError::MalformedInput
        })?;

        let Value::Object(fields) = value else {
            return Err(NewItemError::MalformedInput);
        };

        let field = |key: &str| fields.get(key).and_then(Value::as_str).unwrap_or_default();

        Self::new(field("name"), field("description"))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Errors that can occur when validating a create request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NewItemError {
    #[error("Request body is required")]
    MissingBody,

    #[error("Request body must be a valid JSON object")]
    MalformedInput,

    #[error("name and description are required fields")]
    MissingFields,
}

// ---------------------------------------------------------------------------
// Item
// ---------------------------------------------------------------------------

/// A catalog item stored in DynamoDB, keyed by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Server-generated identifier (UUID v4).
    pub id: String,

    pub name: String,

    pub description: String,

    /// Creation time, serialized as ISO-8601 UTC with millisecond precision.
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
}

impl Item {
    /// Stamp a fresh id and the current time onto a validated request.
    pub fn create(new_item: NewItem) -> Self {
        Self::create_at(new_item, Utc::now())
    }

    /// Like [`Item::create`], with an explicit creation time.
    ///
    /// The time is truncated to milliseconds so the value held in memory is
    /// the same one that round-trips through storage.
    pub fn create_at(new_item: NewItem, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: new_item.name,
            description: new_item.description,
            created_at: created_at.trunc_subsecs(3),
        }
    }
}

/// Sort items newest first. Equal timestamps keep their relative order.
pub fn sort_newest_first(items: &mut [Item]) {
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

/// `2024-05-01T12:00:00.123Z` on the wire, any RFC 3339 offset accepted on read.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
