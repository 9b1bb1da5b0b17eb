//! Reporting and time-bucketed aggregation engine
//!
//! Converts a flat, unordered collection of categorized income/expense
//! transactions into calendar-aligned financial summaries:
//! - yearly activity periods ([`ReportsService::transaction_periods`])
//! - time-bucketed balance histories under arbitrary client UTC offsets
//!   ([`ReportsService::timeframe_summary`])
//! - category-ranked totals over a date range
//!   ([`ReportsService::category_summary`])
//!
//! Persistence is consumed through the [`store`] collaborator traits; this
//! crate performs no I/O of its own beyond those calls.

pub mod error;
pub mod models;
pub mod reports;
pub mod service;
pub mod store;
pub mod time;
pub mod types;
pub mod validate;

pub use error::{CoreError, ErrorCode, ErrorSeverity};
pub use models::{Category, Transaction};
pub use reports::{AmountSum, Balance, CategorySummary, HistoryDataRecord, PeriodQuery, TimeframeQuery};
pub use service::ReportsService;
pub use store::{CategoryStore, CategoryStoreRef, TransactionStore, TransactionStoreRef};
pub use time::{LocalCalendarFields, TimeframeResolution};
pub use types::{CategoryType, RecordStatus, Timeframe};
