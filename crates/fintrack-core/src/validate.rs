//! Pure validation rules for report requests
//!
//! Transport-level schema validation happens in the caller; these rules
//! are the engine's defensive boundary so clearly invalid parameters fail
//! loudly instead of producing silently wrong aggregates. Each rule is a
//! pure function; errors carry the report operation they were checked for.

use super::error::CoreError;
use super::reports::{PeriodQuery, TimeframeQuery};
use super::types::Timeframe;

/// Smallest calendar year accepted for timeframe reports
pub const MIN_YEAR: i32 = 1;
/// Largest calendar year accepted for timeframe reports
pub const MAX_YEAR: i32 = 9999;

/// The report operation a rule was evaluated for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportOperation {
    /// Distinct activity years of a user
    TransactionPeriods,
    /// Time-bucketed balance history
    TimeframeSummary,
    /// Category-ranked totals over a range
    CategorySummary,
}

impl std::fmt::Display for ReportOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportOperation::TransactionPeriods => write!(f, "transaction_periods"),
            ReportOperation::TimeframeSummary => write!(f, "timeframe_summary"),
            ReportOperation::CategorySummary => write!(f, "category_summary"),
        }
    }
}

fn fail(operation: ReportOperation, message: String) -> CoreError {
    CoreError::ValidationError {
        message: format!("{}: {}", operation, message),
    }
}

/// Reject empty user identifiers
pub fn validate_user_id(operation: ReportOperation, user_id: &str) -> Result<(), CoreError> {
    if user_id.trim().is_empty() {
        return Err(fail(operation, "User id must not be empty".to_string()));
    }
    Ok(())
}

/// Validate a timeframe summary query
///
/// `max_offset_ms` bounds the accepted client offset (configured in whole
/// hours; real-world offsets stay within UTC-12..UTC+14).
pub fn validate_timeframe_query(
    query: &TimeframeQuery,
    max_offset_ms: i64,
) -> Result<(), CoreError> {
    let operation = ReportOperation::TimeframeSummary;

    if query.year < MIN_YEAR || query.year > MAX_YEAR {
        return Err(fail(operation, format!("Year out of range: {}", query.year)));
    }

    match (query.timeframe, query.month) {
        (Timeframe::Month, None) => {
            return Err(fail(operation, "Month timeframe requires a month".to_string()));
        }
        (_, Some(month)) if month > 11 => {
            return Err(fail(operation, format!("Month out of range 0-11: {}", month)));
        }
        _ => {}
    }

    if query.client_offset_ms.abs() > max_offset_ms {
        return Err(fail(
            operation,
            format!("Client offset out of range: {} ms", query.client_offset_ms),
        ));
    }

    Ok(())
}

/// Validate a category summary range: the end must not precede the start
pub fn validate_period_query(query: &PeriodQuery) -> Result<(), CoreError> {
    if query.end_date < query.start_date {
        return Err(fail(
            ReportOperation::CategorySummary,
            format!(
                "End date {} precedes start date {}",
                query.end_date, query.start_date
            ),
        ));
    }
    Ok(())
}

// ==================== Tests ====================
