//! Month-grid window arithmetic for calendar views.
//!
//! A month view renders a fixed 6x7 grid, so the visible window is always
//! exactly 42 calendar days regardless of how the month aligns to week
//! boundaries.

use chrono::{DateTime, Datelike, Days, NaiveDate, Weekday};
use chrono_tz::Tz;

use almanac_core::error::{CoreError, CoreResult};

use crate::calendar::localize;

/// Day cells a month view renders: 6 rows of 7 columns.
pub const GRID_CELLS: u64 = 42;

/// ## Summary
/// Computes the 42-day display window for `(year, month)`: local midnight of
/// the first grid cell and local midnight of the last one. The window starts
/// on `week_start` at or before the first of the month and ends
/// `GRID_CELLS - 1` days later.
///
/// ## Errors
/// Returns an error when `month` is outside `1..=12`, when the date range
/// leaves chrono's representable span, or when a window edge falls into a
/// nonexistent local time.
pub fn month_grid(
    year: i32,
    month: u32,
    week_start: Weekday,
    tz: Tz,
) -> CoreResult<(DateTime<Tz>, DateTime<Tz>)> {
    let first_of_month = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| CoreError::InvalidInput(format!("invalid month: {year}-{month:02}")))?;

    // Days to walk back from the first of the month to the configured week start.
    let offset = (7 + first_of_month.weekday().num_days_from_monday()
        - week_start.num_days_from_monday())
        % 7;

    let grid_start = first_of_month
        .checked_sub_days(Days::new(u64::from(offset)))
        .ok_or(CoreError::InvariantViolation("grid start out of range"))?;
    let grid_end = grid_start
        .checked_add_days(Days::new(GRID_CELLS - 1))
        .ok_or(CoreError::InvariantViolation("grid end out of range"))?;

    Ok((
        localize(grid_start.and_time(chrono::NaiveTime::MIN), tz)?,
        localize(grid_end.and_time(chrono::NaiveTime::MIN), tz)?,
    ))
}

/// Month rollover towards the past: January wraps to December of the
/// previous year.
#[must_use]
pub const fn prev_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

/// Month rollover towards the future: December wraps to January of the
/// next year.
#[must_use]
pub const fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

/// ## Summary
/// Merges the grid windows of the previous, current, and next month into the
/// single contiguous range a calendar view must query. Adjacent month grids
/// overlap or abut, so min-start/max-end never leaves a hole.
///
/// ## Errors
/// Returns an error under the same conditions as [`month_grid`].
pub fn overall_range(
    year: i32,
    month: u32,
    week_start: Weekday,
    tz: Tz,
) -> CoreResult<(DateTime<Tz>, DateTime<Tz>)> {
    let (current_start, current_end) = month_grid(year, month, week_start, tz)?;

    let (prev_year, prev_month) = prev_month(year, month);
    let (prev_start, prev_end) = month_grid(prev_year, prev_month, week_start, tz)?;

    let (next_year, next_month) = next_month(year, month);
    let (next_start, next_end) = month_grid(next_year, next_month, week_start, tz)?;

    Ok((
        prev_start.min(current_start).min(next_start),
        prev_end.max(current_end).max(next_end),
    ))
}
