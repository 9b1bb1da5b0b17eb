//! Core data models for reporting
//!
//! Transactions and categories are owned by the persistence layer and are
//! read-only inputs here. Timestamps are absolute UTC epoch milliseconds;
//! amounts are non-negative magnitudes in currency minor units.

use chrono::{DateTime, Datelike, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::types::{CategoryType, RecordStatus};

/// A single recorded income or expense movement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique transaction identifier
    pub id: String,
    /// Owning user identifier
    pub user_id: String,
    /// Referenced category identifier
    pub category_id: String,
    /// Magnitude in currency minor units; sign comes from the category type
    pub amount: i64,
    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Absolute UTC instant of the transaction, epoch milliseconds
    pub transaction_date: i64,
    /// Soft-delete status
    pub status: RecordStatus,
    /// Creation timestamp, epoch milliseconds
    pub creation_date: i64,
    /// Last update timestamp, epoch milliseconds
    pub last_update_date: i64,
}

impl Transaction {
    /// Check whether the record is visible to reporting
    pub fn is_active(&self) -> bool {
        self.status == RecordStatus::Active
    }

    /// Get the transaction instant as a UTC datetime
    pub fn date_utc(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.transaction_date).single()
    }

    /// Get the UTC calendar year of the transaction
    ///
    /// Activity periods are reported in absolute UTC terms, without any
    /// client offset correction.
    pub fn utc_year(&self) -> Option<i32> {
        self.date_utc().map(|dt| dt.year())
    }
}

/// A user-defined income or expense category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique category identifier
    pub id: String,
    /// Owning user identifier
    pub user_id: String,
    /// Display name
    pub name: String,
    /// Display icon identifier
    pub icon: String,
    /// Income or expense classification
    #[serde(rename = "type")]
    pub category_type: CategoryType,
    /// Soft-delete status
    pub status: RecordStatus,
    /// Creation timestamp, epoch milliseconds
    pub creation_date: i64,
    /// Last update timestamp, epoch milliseconds
    pub last_update_date: i64,
}

impl Category {
    /// Check whether the record is visible to reporting
    pub fn is_active(&self) -> bool {
        self.status == RecordStatus::Active
    }

    /// Check whether amounts booked against this category count as income
    pub fn is_income(&self) -> bool {
        self.category_type == CategoryType::Income
    }
}

// ==================== Tests ====================
