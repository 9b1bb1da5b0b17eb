//! Timeframe resolution and timezone-corrected calendar math
//!
//! The client offset is defined as local-minus-UTC in milliseconds
//! (UTC-5 is -18000000, UTC+2 is +7200000). Window boundaries subtract
//! the offset from a UTC midnight so they land on the client's local
//! midnight; calendar-field extraction adds the offset to an instant and
//! reads plain UTC fields from the shifted value. Host timezone
//! configuration never enters the computation.

use chrono::{Datelike, NaiveDate, TimeZone, Utc};

use super::error::CoreError;
use super::reports::{Balance, HistoryDataRecord, TimeframeQuery};
use super::types::Timeframe;

/// Calendar fields of an instant in the client's local calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalCalendarFields {
    /// Local calendar year
    pub year: i32,
    /// Local calendar month, 0-11
    pub month: u32,
    /// Local day of month, 1-based
    pub day: u32,
}

/// Extract the local calendar fields of a UTC instant
///
/// Pure function of the instant and the client offset; this is the single
/// place where bucket classification touches timezone arithmetic.
pub fn local_calendar_fields(
    instant_ms: i64,
    client_offset_ms: i64,
) -> Result<LocalCalendarFields, CoreError> {
    let shifted = instant_ms
        .checked_add(client_offset_ms)
        .ok_or_else(|| out_of_range(instant_ms))?;
    let dt = Utc
        .timestamp_millis_opt(shifted)
        .single()
        .ok_or_else(|| out_of_range(instant_ms))?;

    Ok(LocalCalendarFields {
        year: dt.year(),
        month: dt.month0(),
        day: dt.day(),
    })
}

/// Number of days in a calendar month (0-based), accounting for leap years
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let (next_year, next_month) = if month == 11 {
        (year + 1, 0)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month + 1, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
}

/// UTC midnight of a calendar date as epoch milliseconds (0-based month)
fn utc_midnight_ms(year: i32, month: u32, day: u32) -> Option<i64> {
    let date = NaiveDate::from_ymd_opt(year, month + 1, day)?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis())
}

fn out_of_range(instant_ms: i64) -> CoreError {
    CoreError::InternalError {
        message: format!("Instant out of calendar range: {}", instant_ms),
    }
}

fn unrepresentable(year: i32, month: u32) -> CoreError {
    CoreError::BadRequest {
        message: format!("Unrepresentable calendar date: year {} month {}", year, month),
    }
}

/// Resolved absolute boundaries and bucket layout of a timeframe request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeframeResolution {
    /// Inclusive window start, epoch milliseconds
    pub start_date: i64,
    /// Inclusive window end, epoch milliseconds
    pub end_date: i64,
    /// Number of buckets (12 months, or days in the month)
    pub bucket_count: usize,
    /// True for the year timeframe
    pub is_yearly: bool,
    /// Requested calendar year
    pub year: i32,
    /// Requested calendar month, 0-11; present for the month timeframe
    pub month: Option<u32>,
    /// Client offset the window was aligned with
    pub client_offset_ms: i64,
}

impl TimeframeResolution {
    /// Resolve a timeframe query into absolute window boundaries
    ///
    /// Deterministic and free of I/O. Range validation happens in
    /// [`crate::validate`]; dates chrono cannot represent still error here
    /// rather than panic.
    pub fn resolve(query: &TimeframeQuery) -> Result<Self, CoreError> {
        let offset = query.client_offset_ms;

        match query.timeframe {
            Timeframe::Year => {
                let start = utc_midnight_ms(query.year, 0, 1)
                    .ok_or_else(|| unrepresentable(query.year, 0))?;
                let next = utc_midnight_ms(query.year + 1, 0, 1)
                    .ok_or_else(|| unrepresentable(query.year + 1, 0))?;

                Ok(Self {
                    start_date: start - offset,
                    end_date: next - 1 - offset,
                    bucket_count: 12,
                    is_yearly: true,
                    year: query.year,
                    month: None,
                    client_offset_ms: offset,
                })
            }
            Timeframe::Month => {
                let month = query.month.ok_or_else(|| CoreError::BadRequest {
                    message: "Month timeframe requires a month".to_string(),
                })?;
                let start = utc_midnight_ms(query.year, month, 1)
                    .ok_or_else(|| unrepresentable(query.year, month))?;
                let (next_year, next_month) = if month == 11 {
                    (query.year + 1, 0)
                } else {
                    (query.year, month + 1)
                };
                let next = utc_midnight_ms(next_year, next_month, 1)
                    .ok_or_else(|| unrepresentable(next_year, next_month))?;
                let bucket_count = days_in_month(query.year, month)
                    .ok_or_else(|| unrepresentable(query.year, month))?;

                Ok(Self {
                    start_date: start - offset,
                    end_date: next - 1 - offset,
                    bucket_count: bucket_count as usize,
                    is_yearly: false,
                    year: query.year,
                    month: Some(month),
                    client_offset_ms: offset,
                })
            }
        }
    }

    /// Classify a transaction instant into its bucket index
    ///
    /// Returns `Ok(None)` when the corrected local date falls outside the
    /// requested window; the caller decides whether to warn or fail.
    pub fn bucket_index(&self, transaction_date: i64) -> Result<Option<usize>, CoreError> {
        let fields = local_calendar_fields(transaction_date, self.client_offset_ms)?;

        let index = if self.is_yearly {
            if fields.year != self.year {
                return Ok(None);
            }
            fields.month as usize
        } else {
            if fields.year != self.year || Some(fields.month) != self.month {
                return Ok(None);
            }
            (fields.day - 1) as usize
        };

        if index < self.bucket_count {
            Ok(Some(index))
        } else {
            Ok(None)
        }
    }

    /// Pre-populated zero-balance buckets in natural index order
    ///
    /// Daily buckets carry `day = index + 1`; monthly buckets carry
    /// `month = index` and no day. Buckets are never omitted.
    pub fn empty_buckets(&self) -> Vec<HistoryDataRecord> {
        (0..self.bucket_count)
            .map(|index| HistoryDataRecord {
                year: self.year,
                month: if self.is_yearly {
                    index as u32
                } else {
                    self.month.unwrap_or(0)
                },
                day: if self.is_yearly {
                    None
                } else {
                    Some(index as u32 + 1)
                },
                balance: Balance::default(),
            })
            .collect()
    }
}

// ==================== Tests ====================
