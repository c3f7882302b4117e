//! Allow-listed sorting for caller-supplied sort parameters.
//!
//! The public bid-sorting endpoint takes `sortField` and `sortOrder` as
//! query strings. Raw strings never reach the store: the field is resolved
//! through this enum and unknown values degrade to the default.

use serde_json::{json, Value};

/// Supported sort fields for bid queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BidSortField {
    /// Sort by the numeric status rank (default)
    #[default]
    StatusNum,
    /// Sort by the status label
    Status,
    /// Sort by bid price
    Price,
    /// Sort by deadline
    Deadline,
}

impl BidSortField {
    /// Parse from string, returning default if unknown.
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "status" => Self::Status,
            "statusnum" | "status_num" => Self::StatusNum,
            "price" => Self::Price,
            "deadline" => Self::Deadline,
            _ => Self::StatusNum,
        }
    }

    /// Get the stored field name for this sort field.
    pub const fn field_name(&self) -> &'static str {
        match self {
            Self::StatusNum => "statusNum",
            Self::Status => "status",
            Self::Price => "price",
            Self::Deadline => "deadline",
        }
    }
}

/// Sort direction for queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// Parse from string, returning default if unknown.
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "desc" | "descending" | "-1" => Self::Descending,
            _ => Self::Ascending,
        }
    }

    /// Numeric direction understood by the store.
    pub const fn as_i32(&self) -> i32 {
        match self {
            Self::Ascending => 1,
            Self::Descending => -1,
        }
    }
}

/// Complete sort configuration.
#[derive(Debug, Clone, Default)]
pub struct SortSpec {
    pub field: BidSortField,
    pub direction: SortDirection,
}

impl SortSpec {
    /// Create from query-string parameters with validation.
    pub fn from_params(field: Option<&str>, direction: Option<&str>) -> Self {
        Self {
            field: field.map(BidSortField::from_str_or_default).unwrap_or_default(),
            direction: direction
                .map(SortDirection::from_str_or_default)
                .unwrap_or_default(),
        }
    }

    /// Render the sort document sent to the store.
    pub fn to_document(&self) -> Value {
        json!({ self.field.field_name(): self.direction.as_i32() })
    }
}
