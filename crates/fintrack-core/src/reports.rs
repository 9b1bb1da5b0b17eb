//! Report structures for API responses
//!
//! All derived values are created fresh per request and discarded after
//! serialization; none of them is ever persisted.

use serde::{Deserialize, Serialize};

use super::models::Category;
use super::types::Timeframe;

/// Accumulated balance of one report bucket
///
/// Both fields are non-negative sums in the same minor-unit domain as
/// transaction amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Balance {
    /// Summed income amounts
    pub income: i64,
    /// Summed expense amounts
    pub expense: i64,
}

impl Balance {
    /// Add an amount on the income or expense side
    pub fn credit(&mut self, is_income: bool, amount: i64) {
        if is_income {
            self.income += amount;
        } else {
            self.expense += amount;
        }
    }

    /// Net movement (income minus expense)
    pub fn net(&self) -> i64 {
        self.income - self.expense
    }
}

/// One time bucket of a balance history report
///
/// `day` is present only for day-granularity buckets (month timeframe);
/// `month` is 0-based.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryDataRecord {
    /// Calendar year of the bucket
    pub year: i32,
    /// Calendar month of the bucket, 0-11
    pub month: u32,
    /// Day of month, 1-based; only for day-granularity buckets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
    /// Aggregated balance of the bucket
    pub balance: Balance,
}

/// Summed amount attached to a category summary row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountSum {
    /// Total amount in minor units
    pub amount: i64,
}

/// Per-category total over a queried date range
///
/// Only categories with at least one matching transaction appear in a
/// report; the result is sparse, not a full category enumeration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    /// The full category the total belongs to
    pub category: Category,
    /// Running total of matching transaction amounts
    pub sum: AmountSum,
}

// ==================== Query Parameters ====================

/// Parameters of a time-bucketed summary request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeframeQuery {
    /// Bucket granularity
    pub timeframe: Timeframe,
    /// Calendar year to report on
    pub year: i32,
    /// Calendar month, 0-11; required for the month timeframe
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    /// Client UTC offset in milliseconds (local minus UTC; UTC-5 is -18000000)
    #[serde(default)]
    pub client_offset_ms: i64,
}

/// Parameters of a category summary request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodQuery {
    /// Inclusive range start, epoch milliseconds
    pub start_date: i64,
    /// Inclusive range end, epoch milliseconds
    pub end_date: i64,
}

// ==================== Tests ====================
