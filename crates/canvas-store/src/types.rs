//! Data API request and response bodies.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use canvas_models::ObjectId;

/// Body of a Data API action request.
///
/// Every action posts the same envelope; which payload fields are present
/// depends on the action (`filter`/`sort`/`limit` for reads, `document`
/// for inserts, `filter`/`update`/`upsert` for updates).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRequest {
    pub data_source: String,
    pub database: String,
    pub collection: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub update: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub upsert: Option<bool>,
}

impl ActionRequest {
    /// Bare envelope for a collection; callers fill in the payload.
    pub fn new(
        data_source: impl Into<String>,
        database: impl Into<String>,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            data_source: data_source.into(),
            database: database.into(),
            collection: collection.into(),
            filter: None,
            sort: None,
            limit: None,
            document: None,
            update: None,
            upsert: None,
        }
    }
}

/// Response body of a `find` action.
#[derive(Debug, Clone, Deserialize)]
pub struct FindResponse<T> {
    pub documents: Vec<T>,
}

/// Response body of a `findOne` action. A miss is `document: null`,
/// not an error.
#[derive(Debug, Clone, Deserialize)]
pub struct FindOneResponse<T> {
    pub document: Option<T>,
}

/// Write acknowledgement of an `insertOne` action.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOneResult {
    /// Store-generated id of the new document.
    pub inserted_id: Value,
}

/// Write acknowledgement of an `updateOne` action.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub matched_count: u64,
    pub modified_count: u64,

    /// Present only when `upsert: true` created a new document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upserted_id: Option<Value>,
}

/// Write acknowledgement of a `deleteOne` action. Deleting a missing
/// document reports `deleted_count: 0` rather than failing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub deleted_count: u64,
}

/// Filter matching a document by its id.
///
/// Request bodies are interpreted as extended JSON, so the id must be
/// wrapped as `$oid` to match an ObjectId rather than a plain string.
pub fn id_filter(id: &ObjectId) -> Value {
    json!({ "_id": { "$oid": id.as_str() } })
}

/// Filter matching documents by exact equality on one field.
pub fn field_filter(field: &str, value: &str) -> Value {
    json!({ field: value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_request_skips_absent_payload() {
        let req = ActionRequest::new("Cluster0", "CareerCanvas", "jobs");
        let wire = serde_json::to_value(&req).unwrap();

        assert_eq!(wire["dataSource"], "Cluster0");
        assert_eq!(wire["database"], "CareerCanvas");
        assert!(wire.get("filter").is_none());
        assert!(wire.get("upsert").is_none());
    }

    #[test]
    fn test_id_filter_uses_extended_json() {
        let id = ObjectId::parse("65b2f0c4a1d2e3f4a5b6c7d8").unwrap();
        assert_eq!(
            id_filter(&id),
            json!({"_id": {"$oid": "65b2f0c4a1d2e3f4a5b6c7d8"}})
        );
    }

    #[test]
    fn test_update_result_omits_absent_upsert_id() {
        let result = UpdateResult {
            matched_count: 1,
            modified_count: 1,
            upserted_id: None,
        };
        let wire = serde_json::to_value(&result).unwrap();
        assert!(wire.get("upsertedId").is_none());
    }
}
