//! End-to-end tests for the event service against the in-memory store.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc, Weekday};
use uuid::Uuid;

use almanac_db::store::memory::MemoryEventStore;
use almanac_service::calendar::recurrence::ExpansionLimit;
use almanac_service::clock::Clock;
use almanac_service::error::ServiceError;
use almanac_service::event::{CreateEvent, EventService};

/// Clock pinned to a known instant.
#[derive(Debug, Clone, Copy)]
struct FixedClock(DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

fn frozen_at(year: i32, month: u32, day: u32) -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap())
}

fn service(clock: FixedClock) -> EventService<MemoryEventStore, FixedClock> {
    EventService::new(
        MemoryEventStore::new(),
        clock,
        chrono_tz::UTC,
        Weekday::Mon,
        ExpansionLimit {
            max_occurrences: 1000,
        },
    )
}

fn request(
    name: &str,
    recurrence: &str,
    start_date: (i32, u32, u32),
    start_time: (u32, u32),
    end_date: (i32, u32, u32),
    end_time: (u32, u32),
) -> CreateEvent {
    CreateEvent {
        name: name.to_string(),
        description: "integration fixture".to_string(),
        recurrence: recurrence.to_string(),
        start_date: NaiveDate::from_ymd_opt(start_date.0, start_date.1, start_date.2).unwrap(),
        start_time: NaiveTime::from_hms_opt(start_time.0, start_time.1, 0).unwrap(),
        end_date: NaiveDate::from_ymd_opt(end_date.0, end_date.1, end_date.2).unwrap(),
        end_time: NaiveTime::from_hms_opt(end_time.0, end_time.1, 0).unwrap(),
    }
}

#[test_log::test(tokio::test)]
async fn test_daily_event_creates_bounded_occurrences() {
    let service = service(frozen_at(2025, 1, 1));
    let owner = Uuid::new_v4();

    let input = request(
        "morning shift",
        "DAILY",
        (2025, 1, 5),
        (10, 0),
        (2025, 1, 7),
        (18, 0),
    );
    let event = service.create_event(owner, &input).await.expect("creates");

    let found = service
        .event_by_name(owner, "morning shift")
        .await
        .expect("found");
    assert_eq!(found.event.id, event.id);
    assert_eq!(found.occurrences.len(), 3);

    let template_duration = found.occurrences[0].end - found.occurrences[0].start;
    for (index, occurrence) in found.occurrences.iter().enumerate() {
        let day = 5 + u32::try_from(index).unwrap();
        assert_eq!(
            occurrence.start,
            Utc.with_ymd_and_hms(2025, 1, day, 10, 0, 0).unwrap()
        );
        assert_eq!(occurrence.end - occurrence.start, template_duration);
    }
    assert!(
        found
            .occurrences
            .windows(2)
            .all(|pair| pair[0].start < pair[1].start)
    );
}

#[test_log::test(tokio::test)]
async fn test_weekly_event_skips_to_week_steps() {
    let service = service(frozen_at(2025, 1, 1));
    let owner = Uuid::new_v4();

    let input = request(
        "team sync",
        "WEEKLY",
        (2025, 1, 5),
        (9, 0),
        (2025, 1, 20),
        (10, 0),
    );
    service.create_event(owner, &input).await.expect("creates");

    let found = service.event_by_name(owner, "team sync").await.expect("found");
    let days: Vec<u32> = found
        .occurrences
        .iter()
        .map(|occurrence| {
            use chrono::Datelike;
            occurrence.start.day()
        })
        .collect();
    assert_eq!(days, vec![5, 12, 19]);
}

#[test_log::test(tokio::test)]
async fn test_unknown_recurrence_kind_rejected_first() {
    let service = service(frozen_at(2025, 1, 1));
    let owner = Uuid::new_v4();

    // Interval is inverted too; the kind check must win.
    let input = request(
        "bad kind",
        "HOURLY",
        (2025, 1, 5),
        (18, 0),
        (2025, 1, 5),
        (10, 0),
    );
    let err = service.create_event(owner, &input).await.expect_err("rejected");
    assert!(matches!(err, ServiceError::InvalidRecurrenceKind(_)));
    assert!(service.list_events(owner).await.expect("lists").is_empty());
}

#[test_log::test(tokio::test)]
async fn test_overlong_description_persists_nothing() {
    let service = service(frozen_at(2025, 1, 1));
    let owner = Uuid::new_v4();

    let mut input = request(
        "wordy",
        "DAILY",
        (2025, 1, 5),
        (10, 0),
        (2025, 1, 5),
        (11, 0),
    );
    input.description = "x".repeat(1001);

    let err = service.create_event(owner, &input).await.expect_err("rejected");
    assert!(matches!(err, ServiceError::ValidationError(_)));
    assert!(service.list_events(owner).await.expect("lists").is_empty());

    // Exactly at the bound is still fine.
    input.description = "x".repeat(1000);
    service.create_event(owner, &input).await.expect("creates at the bound");
}

#[test_log::test(tokio::test)]
async fn test_inverted_interval_persists_nothing() {
    let service = service(frozen_at(2025, 1, 1));
    let owner = Uuid::new_v4();

    let input = request(
        "backwards",
        "DAILY",
        (2025, 1, 5),
        (18, 0),
        (2025, 1, 5),
        (10, 0),
    );
    let err = service.create_event(owner, &input).await.expect_err("rejected");
    assert!(matches!(err, ServiceError::InvalidInterval(_)));
    assert!(service.list_events(owner).await.expect("lists").is_empty());
}

#[test_log::test(tokio::test)]
async fn test_past_start_rejected_against_injected_clock() {
    let service = service(frozen_at(2025, 6, 1));
    let owner = Uuid::new_v4();

    let input = request(
        "yesterday",
        "DAILY",
        (2025, 5, 30),
        (10, 0),
        (2025, 5, 30),
        (11, 0),
    );
    let err = service.create_event(owner, &input).await.expect_err("rejected");
    assert!(matches!(err, ServiceError::PastStart));
}

#[test_log::test(tokio::test)]
async fn test_duplicate_name_scoped_to_owner() {
    let service = service(frozen_at(2025, 1, 1));
    let owner_a = Uuid::new_v4();
    let owner_b = Uuid::new_v4();

    let input = request(
        "review",
        "WEEKLY",
        (2025, 2, 3),
        (14, 0),
        (2025, 2, 24),
        (15, 0),
    );
    service.create_event(owner_a, &input).await.expect("first creates");

    let err = service
        .create_event(owner_a, &input)
        .await
        .expect_err("same owner rejected");
    assert!(matches!(err, ServiceError::DuplicateName(_)));

    service
        .create_event(owner_b, &input)
        .await
        .expect("other owner may reuse the name");
}

#[test_log::test(tokio::test)]
async fn test_expansion_ceiling_rejects_before_writing() {
    let service = EventService::new(
        MemoryEventStore::new(),
        frozen_at(2025, 1, 1),
        chrono_tz::UTC,
        Weekday::Mon,
        ExpansionLimit { max_occurrences: 5 },
    );
    let owner = Uuid::new_v4();

    let input = request(
        "every day for a year",
        "DAILY",
        (2025, 2, 1),
        (8, 0),
        (2026, 2, 1),
        (9, 0),
    );
    let err = service.create_event(owner, &input).await.expect_err("rejected");
    assert!(matches!(err, ServiceError::UnboundedExpansion { limit: 5 }));
    assert!(service.list_events(owner).await.expect("lists").is_empty());
}

#[test_log::test(tokio::test)]
async fn test_month_view_includes_adjacent_month_spill() {
    let service = service(frozen_at(2025, 1, 1));
    let owner = Uuid::new_v4();

    // Lands inside the December grid that a January view peeks into.
    let december = request(
        "december",
        "DAILY",
        (2025, 12, 2),
        (10, 0),
        (2025, 12, 2),
        (11, 0),
    );
    // Well outside any grid around January.
    let may = request("may", "DAILY", (2026, 5, 10), (10, 0), (2026, 5, 10), (11, 0));
    service.create_event(owner, &december).await.expect("creates");
    service.create_event(owner, &may).await.expect("creates");

    let visible = service
        .month_events(owner, 2026, 1)
        .await
        .expect("query succeeds");
    let names: Vec<_> = visible.iter().map(|found| found.event.name.as_str()).collect();
    assert_eq!(names, vec!["december"]);
}

#[test_log::test(tokio::test)]
async fn test_event_on_date_lookup() {
    let service = service(frozen_at(2025, 1, 1));
    let owner = Uuid::new_v4();

    let input = request(
        "housewarming",
        "YEARLY",
        (2025, 3, 8),
        (17, 0),
        (2027, 3, 8),
        (21, 0),
    );
    service.create_event(owner, &input).await.expect("creates");

    let found = service
        .event_on_date(owner, 8, 3, 2026)
        .await
        .expect("found on the yearly step");
    assert_eq!(found.event.name, "housewarming");

    let missing = service.event_on_date(owner, 9, 3, 2026).await;
    assert!(matches!(missing, Err(ServiceError::NotFound(_))));
}

#[test_log::test(tokio::test)]
async fn test_delete_removes_event_and_occurrences() {
    let service = service(frozen_at(2025, 1, 1));
    let owner = Uuid::new_v4();

    let input = request(
        "short lived",
        "DAILY",
        (2025, 4, 1),
        (10, 0),
        (2025, 4, 3),
        (11, 0),
    );
    let event = service.create_event(owner, &input).await.expect("creates");

    service.delete_event(owner, event.id).await.expect("deletes");

    let lookup = service.event_by_name(owner, "short lived").await;
    assert!(matches!(lookup, Err(ServiceError::NotFound(_))));
    let by_date = service.event_on_date(owner, 2, 4, 2025).await;
    assert!(matches!(by_date, Err(ServiceError::NotFound(_))));

    let again = service.delete_event(owner, event.id).await;
    assert!(matches!(again, Err(ServiceError::NotFound(_))));
}
