//! Calendar-grid arithmetic and recurrence expansion.

pub mod grid;
pub mod recurrence;

use chrono::{DateTime, NaiveDateTime};
use chrono_tz::Tz;

use almanac_core::error::{CoreError, CoreResult};

/// ## Summary
/// Attaches a timezone to a wall-clock datetime. Ambiguous local times (the
/// repeated hour when clocks fall back) resolve to the earlier offset.
///
/// ## Errors
/// Returns an error for local times that do not exist in `tz` (the skipped
/// hour when clocks spring forward).
pub fn localize(naive: NaiveDateTime, tz: Tz) -> CoreResult<DateTime<Tz>> {
    match naive.and_local_timezone(tz) {
        chrono::LocalResult::Single(instant) => Ok(instant),
        chrono::LocalResult::Ambiguous(earlier, _) => Ok(earlier),
        chrono::LocalResult::None => Err(CoreError::InvalidInput(format!(
            "local time {naive} does not exist in {tz}"
        ))),
    }
}
