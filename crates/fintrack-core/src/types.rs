//! Basic types for the reporting engine

use serde::{Deserialize, Serialize};

/// Category type enumeration
///
/// The economic sign of a transaction is determined entirely by its
/// category's type, never by the sign of the stored amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CategoryType {
    /// Money coming in (salary, dividends)
    Income,
    /// Money going out (food, transport)
    Expense,
}

impl std::str::FromStr for CategoryType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "INCOME" => Ok(CategoryType::Income),
            "EXPENSE" => Ok(CategoryType::Expense),
            _ => Err(format!("Invalid category type: {}", s)),
        }
    }
}

impl std::fmt::Display for CategoryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryType::Income => write!(f, "INCOME"),
            CategoryType::Expense => write!(f, "EXPENSE"),
        }
    }
}

/// Soft-delete status shared by transactions and categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordStatus {
    /// Record is visible to reporting
    Active,
    /// Record is soft-deleted
    Deleted,
}

impl Default for RecordStatus {
    fn default() -> Self {
        RecordStatus::Active
    }
}

impl std::str::FromStr for RecordStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ACTIVE" => Ok(RecordStatus::Active),
            "DELETED" => Ok(RecordStatus::Deleted),
            _ => Err(format!("Invalid record status: {}", s)),
        }
    }
}

impl std::fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordStatus::Active => write!(f, "ACTIVE"),
            RecordStatus::Deleted => write!(f, "DELETED"),
        }
    }
}

/// Timeframe granularity selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    /// One calendar month, bucketed by day
    Month,
    /// One calendar year, bucketed by month
    Year,
}

impl std::str::FromStr for Timeframe {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "month" => Ok(Timeframe::Month),
            "year" => Ok(Timeframe::Year),
            _ => Err(format!("Invalid timeframe: {}", s)),
        }
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Timeframe::Month => write!(f, "month"),
            Timeframe::Year => write!(f, "year"),
        }
    }
}

// ==================== Tests ====================
