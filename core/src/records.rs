//! Rows persisted by the lookup store.

use crate::types::{MobileNumber, NOT_AVAILABLE};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The most recent lookup for a number. One row per number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedRecord {
    pub number: MobileNumber,
    pub operator: String,
    pub circle: String,
    pub owner_name: String,
    pub owner_address: String,
    pub tracked_at: DateTime<Utc>,
}

/// Append-only report against a number. The number need not be tracked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Complaint {
    /// None until the store assigns one.
    pub id: Option<i64>,
    pub number: MobileNumber,
    pub reporter_name: String,
    pub complaint_text: String,
    pub owner_name: Option<String>,
    pub owner_address: Option<String>,
    pub reported_at: DateTime<Utc>,
}

impl Complaint {
    pub fn carries_owner_info(&self) -> bool {
        self.owner_name.is_some() || self.owner_address.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerInfo {
    pub name: String,
    pub address: String,
}

impl OwnerInfo {
    pub fn not_available() -> Self {
        Self {
            name: NOT_AVAILABLE.to_string(),
            address: NOT_AVAILABLE.to_string(),
        }
    }
}

impl Default for OwnerInfo {
    fn default() -> Self {
        Self::not_available()
    }
}
