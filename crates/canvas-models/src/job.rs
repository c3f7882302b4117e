//! Job posting models.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::object_id::ObjectId;

/// A job posting document.
///
/// Clients submit jobs as free-form JSON; every field beyond the id is
/// optional and stored as supplied. Unknown fields are preserved through
/// the flattened `extra` map rather than dropped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    /// Store-assigned id, absent on insert.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Owner email. Every identity-scoped job operation compares this
    /// against the caller's verified identity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Category label used by the public browse endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<String>,

    /// Price bounds arrive as whatever the client form produced (number
    /// or string) and are stored verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<Value>,

    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Whitelisted field set accepted by the job update endpoint.
///
/// Only these six fields ever reach the store's update document; owner
/// email and id are immutable through this path. Absent fields are left
/// untouched on the stored document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<Value>,
}

impl JobUpdate {
    /// True when no whitelisted field was supplied.
    pub fn is_empty(&self) -> bool {
        self.categories.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.title.is_none()
            && self.description.is_none()
            && self.deadline.is_none()
    }
}
