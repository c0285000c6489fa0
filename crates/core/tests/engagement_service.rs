//! Integration tests for the engagement service
//!
//! Exercise the full logger + accessor surface against in-memory mock
//! repositories, with the clock pinned through the `_at` seams.

mod support;

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use haven_core::engagement::ports::StateRepository;
use haven_core::EngagementService;
use haven_domain::types::{ActivityKind, KindExtras, SessionInput};
use haven_domain::HavenError;
use support::repositories::{FailingStateRepository, MockStateRepository};

fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).single().expect("valid timestamp")
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn minutes(amount: u32) -> SessionInput {
    SessionInput { minutes: amount, ..SessionInput::default() }
}

fn breathing(amount: u32, exercise: &str) -> SessionInput {
    SessionInput {
        minutes: amount,
        exercise: Some(exercise.to_string()),
        ..SessionInput::default()
    }
}

fn focus(score: u32) -> SessionInput {
    SessionInput { minutes: 3, score: Some(score), ..SessionInput::default() }
}

fn service_with_mock() -> (EngagementService, Arc<MockStateRepository>) {
    let repo = Arc::new(MockStateRepository::new());
    let service = EngagementService::load(Arc::clone(&repo) as Arc<dyn StateRepository>)
        .expect("service loads from empty mock");
    (service, repo)
}

#[test]
fn first_log_starts_streak_at_one() {
    let (service, _repo) = service_with_mock();

    service
        .log_activity_at(ActivityKind::Breathing, &minutes(5), at(2024, 3, 4, 9))
        .expect("log succeeds");

    let stats = service.activity_stats(ActivityKind::Breathing).expect("tracked kind");
    assert_eq!(stats.streak, 1);
    assert_eq!(stats.best_streak, 1);
    assert_eq!(stats.sessions, 1);
    assert_eq!(stats.total_minutes, 5);
    assert_eq!(service.daily_streak(), 1);
}

#[test]
fn consecutive_day_extends_streak_and_tracks_favorite() {
    let (service, _repo) = service_with_mock();

    service
        .log_activity_at(ActivityKind::Breathing, &breathing(5, "Box Breathing"), at(2024, 3, 4, 9))
        .expect("day one log");
    service
        .log_activity_at(ActivityKind::Breathing, &breathing(5, "Box Breathing"), at(2024, 3, 5, 9))
        .expect("day two log");

    let stats = service.activity_stats(ActivityKind::Breathing).expect("tracked kind");
    assert_eq!(stats.streak, 2);
    assert_eq!(stats.best_streak, 2);
    assert_eq!(stats.extras, KindExtras::Practice {
        favorite_exercise: Some("Box Breathing".to_string())
    });
}

#[test]
fn same_day_log_leaves_streak_unchanged() {
    let (service, _repo) = service_with_mock();

    service
        .log_activity_at(ActivityKind::Meditation, &minutes(10), at(2024, 3, 4, 9))
        .expect("morning log");
    service
        .log_activity_at(ActivityKind::Meditation, &minutes(10), at(2024, 3, 4, 21))
        .expect("evening log");

    let stats = service.activity_stats(ActivityKind::Meditation).expect("tracked kind");
    assert_eq!(stats.streak, 1);
    assert_eq!(stats.sessions, 2);
    assert_eq!(stats.total_minutes, 20);
    assert_eq!(service.daily_streak(), 1);
}

#[test]
fn gap_resets_streak_and_archives_previous() {
    let (service, _repo) = service_with_mock();

    for day in 4..7 {
        service
            .log_activity_at(ActivityKind::Journaling, &minutes(5), at(2024, 3, day, 9))
            .expect("streak log");
    }
    service
        .log_activity_at(ActivityKind::Journaling, &minutes(5), at(2024, 3, 20, 9))
        .expect("log after gap");

    let stats = service.activity_stats(ActivityKind::Journaling).expect("tracked kind");
    assert_eq!(stats.streak, 1);
    assert_eq!(stats.last_streak, 3);
    assert_eq!(stats.best_streak, 3);
}

#[test]
fn mood_updates_global_records_but_has_no_streak_fields() {
    let (service, _repo) = service_with_mock();

    service
        .log_activity_at(ActivityKind::Mood, &SessionInput {
            category: Some("calm".to_string()),
            ..SessionInput::default()
        }, at(2024, 3, 4, 9))
        .expect("mood log");

    let mood = service.mood_stats();
    assert_eq!(mood.entries, 1);
    assert_eq!(mood.history.len(), 1);
    assert!(service.activity_stats(ActivityKind::Mood).is_none());

    // Mood still counts toward the global records
    let overall = service.overall_stats();
    assert_eq!(overall.total_sessions, 1);
    assert_eq!(overall.last_activity, Some(ActivityKind::Mood));
    assert_eq!(service.daily_streak(), 1);
}

#[test]
fn focus_scores_track_high_and_total() {
    let (service, _repo) = service_with_mock();

    service
        .log_activity_at(ActivityKind::Focus, &focus(50), at(2024, 3, 4, 9))
        .expect("first game");
    service
        .log_activity_at(ActivityKind::Focus, &focus(80), at(2024, 3, 4, 10))
        .expect("second game");

    let stats = service.activity_stats(ActivityKind::Focus).expect("tracked kind");
    assert_eq!(stats.extras, KindExtras::Focus { high_score: 80, total_score: 130 });
}

#[test]
fn journal_kinds_count_entries() {
    let (service, _repo) = service_with_mock();

    service
        .log_activity_at(ActivityKind::Gratitude, &minutes(2), at(2024, 3, 4, 9))
        .expect("gratitude entry");
    service
        .log_activity_at(ActivityKind::Gratitude, &minutes(3), at(2024, 3, 4, 20))
        .expect("second entry");

    let stats = service.activity_stats(ActivityKind::Gratitude).expect("tracked kind");
    assert_eq!(stats.extras, KindExtras::Journal { total_entries: 2 });
}

#[test]
fn counters_never_decrease_across_mixed_logging() {
    let (service, _repo) = service_with_mock();
    let mut watermark = (0, 0);

    let days = [4, 5, 5, 8, 9, 12];
    for (index, day) in days.into_iter().enumerate() {
        let kind = ActivityKind::TRACKED[index % ActivityKind::TRACKED.len()];
        service
            .log_activity_at(kind, &minutes(5), at(2024, 3, day, 9))
            .expect("log succeeds");

        let overall = service.overall_stats();
        assert!(overall.total_minutes >= watermark.0);
        assert!(overall.total_sessions > watermark.1);
        watermark = (overall.total_minutes, overall.total_sessions);
    }

    let overall = service.overall_stats();
    assert_eq!(overall.total_sessions, 6);
    assert_eq!(overall.active_days.len(), 5);
}

#[test]
fn week_summary_has_seven_buckets_and_conserves_minutes() {
    let (service, _repo) = service_with_mock();

    // 2024-03-03 is a Sunday; all three entries fall in that week
    service
        .log_activity_at(ActivityKind::Breathing, &minutes(5), at(2024, 3, 3, 9))
        .expect("sunday log");
    service
        .log_activity_at(ActivityKind::Focus, &focus(40), at(2024, 3, 5, 9))
        .expect("tuesday log");
    service
        .log_activity_at(ActivityKind::Mood, &minutes(0), at(2024, 3, 5, 10))
        .expect("tuesday mood");

    let summary = service.week_summary_at(date(2024, 3, 6));

    assert_eq!(summary.week_start, date(2024, 3, 3));
    assert_eq!(summary.days.len(), 7);
    assert_eq!(summary.total_minutes(), 8);

    let tuesday = &summary.days[2];
    assert_eq!(tuesday.date, date(2024, 3, 5));
    assert_eq!(tuesday.minutes, 3);
    assert_eq!(tuesday.sessions, 2);
}

#[test]
fn week_summary_excludes_entries_outside_the_week() {
    let (service, _repo) = service_with_mock();

    service
        .log_activity_at(ActivityKind::Breathing, &minutes(30), at(2024, 2, 20, 9))
        .expect("old log");
    service
        .log_activity_at(ActivityKind::Breathing, &minutes(5), at(2024, 3, 4, 9))
        .expect("current-week log");

    let summary = service.week_summary_at(date(2024, 3, 4));
    assert_eq!(summary.total_minutes(), 5);
}

#[test]
fn suggestion_prefers_a_kind_not_done_today() {
    let (service, _repo) = service_with_mock();

    for kind in [
        ActivityKind::Breathing,
        ActivityKind::Meditation,
        ActivityKind::Focus,
        ActivityKind::Gratitude,
    ] {
        service
            .log_activity_at(kind, &minutes(5), at(2024, 3, 4, 9))
            .expect("log succeeds");
    }

    let suggestion = service.suggested_activity_on(date(2024, 3, 4));
    assert_eq!(suggestion, ActivityKind::Journaling);
}

#[test]
fn suggestion_never_returns_mood() {
    let (service, _repo) = service_with_mock();

    service
        .log_activity_at(ActivityKind::Mood, &minutes(0), at(2024, 3, 4, 9))
        .expect("mood log");

    for _ in 0..50 {
        assert_ne!(service.suggested_activity_on(date(2024, 3, 4)), ActivityKind::Mood);
    }
}

#[test]
fn suggestion_falls_back_to_least_practised_kind() {
    let (service, _repo) = service_with_mock();

    // Give journaling a history, then complete every kind today
    service
        .log_activity_at(ActivityKind::Journaling, &minutes(5), at(2024, 3, 1, 9))
        .expect("earlier log");
    for kind in ActivityKind::TRACKED {
        service
            .log_activity_at(kind, &minutes(5), at(2024, 3, 4, 9))
            .expect("log succeeds");
    }

    // Everything is done today; breathing is first among the least practised
    let suggestion = service.suggested_activity_on(date(2024, 3, 4));
    assert_eq!(suggestion, ActivityKind::Breathing);
}

#[test]
fn reset_restores_default_shapes() {
    let (service, repo) = service_with_mock();

    service
        .log_activity_at(ActivityKind::Focus, &focus(50), at(2024, 3, 4, 9))
        .expect("log succeeds");
    service.reset_all().expect("reset succeeds");

    let stats = service.activity_stats(ActivityKind::Focus).expect("tracked kind");
    assert_eq!(stats.sessions, 0);
    assert_eq!(stats.extras, KindExtras::Focus { high_score: 0, total_score: 0 });
    assert_eq!(service.daily_streak(), 0);
    assert_eq!(service.mood_stats().entries, 0);

    let persisted = repo.last_saved().expect("reset is persisted");
    assert_eq!(persisted.stats.total_sessions, 0);
}

#[test]
fn every_mutation_is_written_back() {
    let (service, repo) = service_with_mock();

    service
        .log_activity_at(ActivityKind::Breathing, &minutes(5), at(2024, 3, 4, 9))
        .expect("first log");
    service
        .log_activity_at(ActivityKind::Mood, &minutes(0), at(2024, 3, 4, 10))
        .expect("second log");

    assert_eq!(repo.save_count(), 2);
    let persisted = repo.last_saved().expect("state saved");
    assert_eq!(persisted.stats.total_sessions, 2);
}

#[test]
fn service_resumes_from_persisted_state() {
    let repo = Arc::new(MockStateRepository::new());
    {
        let service = EngagementService::load(Arc::clone(&repo) as Arc<dyn StateRepository>)
            .expect("first service");
        service
            .log_activity_at(ActivityKind::Breathing, &minutes(5), at(2024, 3, 4, 9))
            .expect("log succeeds");
    }

    let service = EngagementService::load(Arc::clone(&repo) as Arc<dyn StateRepository>)
        .expect("second service");
    assert_eq!(service.daily_streak(), 1);
    let stats = service.activity_stats(ActivityKind::Breathing).expect("tracked kind");
    assert_eq!(stats.sessions, 1);
}

#[test]
fn service_loads_seeded_state() {
    let seeded = haven_domain::EngagementState {
        daily_streak: 7,
        ..haven_domain::EngagementState::default()
    };
    let repo = Arc::new(MockStateRepository::seeded(seeded));

    let service = EngagementService::load(Arc::clone(&repo) as Arc<dyn StateRepository>)
        .expect("service loads");
    assert_eq!(service.daily_streak(), 7);
    assert_eq!(repo.save_count(), 0);
}

#[test]
fn persistence_failure_surfaces_to_the_caller() {
    let service = EngagementService::load(Arc::new(FailingStateRepository))
        .expect("service loads");

    let err = service
        .log_activity_at(ActivityKind::Breathing, &minutes(5), at(2024, 3, 4, 9))
        .expect_err("write fails");
    assert!(matches!(err, HavenError::Database(_)));
}

#[test]
fn has_completed_on_matches_calendar_days() {
    let (service, _repo) = service_with_mock();

    service
        .log_activity_at(ActivityKind::Breathing, &minutes(5), at(2024, 3, 4, 23))
        .expect("log succeeds");

    assert!(service.has_completed_on(ActivityKind::Breathing, date(2024, 3, 4)));
    assert!(!service.has_completed_on(ActivityKind::Breathing, date(2024, 3, 5)));
    assert!(!service.has_completed_on(ActivityKind::Mood, date(2024, 3, 4)));
}
