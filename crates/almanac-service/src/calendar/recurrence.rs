//! Expansion of an event template into concrete occurrences.
//!
//! The template's time-of-day is fixed; only the date walks forward, stepped
//! by the recurrence cadence, until the outer bound. Monthly and yearly steps
//! are cumulative offsets from the template date, so the day-of-month clamp
//! never propagates: Jan 31 becomes Feb 28/29 and then Mar 31 again.

use chrono::{DateTime, Days, Months, NaiveDate};
use chrono_tz::Tz;

use almanac_core::error::CoreError;
use almanac_core::types::RecurrenceKind;

use crate::calendar::localize;
use crate::error::{ServiceError, ServiceResult};

/// Ceiling policy for a single expansion. Configured, not hard-coded; see
/// `expansion.max_occurrences` in the settings.
#[derive(Debug, Clone, Copy)]
pub struct ExpansionLimit {
    pub max_occurrences: usize,
}

impl From<&almanac_core::config::ExpansionConfig> for ExpansionLimit {
    fn from(config: &almanac_core::config::ExpansionConfig) -> Self {
        Self {
            max_occurrences: config.max_occurrences,
        }
    }
}

/// ## Summary
/// Adds calendar months to a date, clamping the day to the last valid day of
/// the target month (Jan 31 + 1 month = Feb 28, or Feb 29 in leap years).
#[must_use]
pub fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}

/// ## Summary
/// Expands a template occurrence into the ordered occurrence sequence for
/// its recurrence cadence, one occurrence per step, while the step date is
/// on or before `until`.
///
/// `kind = None` is the defined degenerate branch for a template without a
/// recognized cadence: exactly the template occurrence is produced.
///
/// Pure with respect to its inputs: identical arguments yield an identical
/// sequence.
///
/// ## Errors
/// Returns `InvalidInterval` when the template violates `start < end`,
/// `UnboundedExpansion` when the sequence would exceed the limit, and an
/// input error when a generated wall-clock time does not exist in the
/// template's timezone.
pub fn expand(
    template_start: DateTime<Tz>,
    template_end: DateTime<Tz>,
    kind: Option<RecurrenceKind>,
    until: NaiveDate,
    limit: ExpansionLimit,
) -> ServiceResult<Vec<(DateTime<Tz>, DateTime<Tz>)>> {
    if template_start >= template_end {
        return Err(ServiceError::InvalidInterval(format!(
            "template start {template_start} is not before end {template_end}"
        )));
    }

    let tz = template_start.timezone();
    let anchor = template_start.date_naive();
    let start_time = template_start.time();
    let end_time = template_end.time();

    let mut occurrences = Vec::new();
    let mut current = anchor;
    let mut months_elapsed: u32 = 0;

    while current <= until {
        if occurrences.len() >= limit.max_occurrences {
            return Err(ServiceError::UnboundedExpansion {
                limit: limit.max_occurrences,
            });
        }

        occurrences.push((
            localize(current.and_time(start_time), tz)?,
            localize(current.and_time(end_time), tz)?,
        ));

        let Some(kind) = kind else {
            // No recognized cadence: the template occurrence stands alone.
            break;
        };

        let next = match kind {
            RecurrenceKind::Daily => current.checked_add_days(Days::new(1)),
            RecurrenceKind::Weekly => current.checked_add_days(Days::new(7)),
            RecurrenceKind::Monthly => {
                months_elapsed += 1;
                add_months(anchor, months_elapsed)
            }
            RecurrenceKind::Yearly => {
                months_elapsed += 12;
                add_months(anchor, months_elapsed)
            }
        };
        current = next.ok_or(CoreError::InvariantViolation(
            "date overflow during recurrence expansion",
        ))?;
    }

    Ok(occurrences)
}
