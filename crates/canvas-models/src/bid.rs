//! Bid models and status transitions.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::object_id::ObjectId;

/// A bid placed by a bidder against a posted job.
///
/// `bidder_email` identifies who placed the bid; `buyer_email` is the job
/// owner, the only identity allowed to move the bid's status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bid {
    /// Store-assigned id, absent on insert.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bidder_email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_num: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<Value>,

    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Known bid statuses in lifecycle order.
///
/// The wire keeps both the label and a numeric rank (`statusNum`) so the
/// frontend can sort bids by progress without string comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BidStatus {
    #[default]
    Pending,
    InProgress,
    Rejected,
    Completed,
}

impl BidStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BidStatus::Pending => "pending",
            BidStatus::InProgress => "in_progress",
            BidStatus::Rejected => "rejected",
            BidStatus::Completed => "completed",
        }
    }

    /// Numeric rank stored alongside the label.
    pub fn status_num(&self) -> i32 {
        match self {
            BidStatus::Pending => 0,
            BidStatus::InProgress => 1,
            BidStatus::Rejected => 2,
            BidStatus::Completed => 3,
        }
    }

    /// Parse a status label, falling back to `Pending` for unknown input.
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "in_progress" | "in progress" => Self::InProgress,
            "rejected" => Self::Rejected,
            "completed" | "complete" => Self::Completed,
            _ => Self::Pending,
        }
    }
}

impl fmt::Display for BidStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payload accepted by the bid status endpoint.
///
/// The status label is stored as supplied; when the caller omits
/// `statusNum`, the rank of the recognized label is filled in so the two
/// fields cannot drift apart.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidStatusUpdate {
    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_num: Option<i32>,
}

impl BidStatusUpdate {
    /// Resolve the effective numeric rank for this update.
    pub fn effective_status_num(&self) -> i32 {
        self.status_num
            .unwrap_or_else(|| BidStatus::from_str_or_default(&self.status).status_num())
    }
}
