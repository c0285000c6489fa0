//! Engagement service - core business logic
//!
//! The single writer over the wellness engagement state: every mutation goes
//! through [`EngagementService::log_activity`], which applies one in-memory
//! transition and then writes the state back through the repository port.
//! Read accessors clone out of the same guarded state.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use haven_domain::types::{
    ActivityKind, ActivityStats, DaySummary, EngagementState, KindExtras, MoodStats, OverallStats,
    SessionEntry, SessionInput, WeekSummary,
};
use haven_domain::utils::day::{week_days, week_start};
use haven_domain::Result;
use parking_lot::Mutex;
use rand::seq::SliceRandom;
use tracing::info;

use super::ports::StateRepository;
use super::streak;

/// Engagement tracking service
///
/// Owns the in-memory [`EngagementState`] and the repository it is written
/// back to. The mutex makes the service safely shareable across UI threads
/// while preserving the single-writer contract.
pub struct EngagementService {
    repository: Arc<dyn StateRepository>,
    state: Mutex<EngagementState>,
}

impl EngagementService {
    /// Create a service primed from previously persisted state, or defaults
    /// when nothing usable is stored.
    pub fn load(repository: Arc<dyn StateRepository>) -> Result<Self> {
        let state = repository.load()?.unwrap_or_default();
        Ok(Self { repository, state: Mutex::new(state) })
    }

    /// Record a completed session for `kind`.
    ///
    /// The single mutation entrypoint: streak counters, history, kind
    /// extras, overall aggregates, and the global daily streak are all
    /// updated in one transition, then the state is persisted. A persistence
    /// failure is returned after the in-memory transition has applied.
    pub fn log_activity(&self, kind: ActivityKind, input: &SessionInput) -> Result<()> {
        self.log_activity_at(kind, input, Utc::now())
    }

    /// Record a completed session at an explicit instant.
    ///
    /// `log_activity` is the production path; this seam lets tests and
    /// backfills pin the clock.
    pub fn log_activity_at(
        &self,
        kind: ActivityKind,
        input: &SessionInput,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let today = now.date_naive();
        let mut state = self.state.lock();

        match kind {
            ActivityKind::Mood => log_mood(&mut state.activities.mood, input, now),
            tracked => {
                if let Some(stats) = state.activities.tracked_mut(tracked) {
                    log_session(stats, input, now, today);
                }
            }
        }

        update_overall(&mut state.stats, kind, input.minutes, now, today);

        let step = streak::classify(state.last_used_date, today);
        state.daily_streak = streak::next_count(state.daily_streak, step);
        state.last_used_date = Some(today);

        self.repository.save(&state)?;
        info!(
            kind = %kind,
            minutes = input.minutes,
            daily_streak = state.daily_streak,
            "activity logged"
        );
        Ok(())
    }

    /// Stats for a tracked kind, in its zeroed kind-shaped default until the
    /// kind is first used. Returns `None` for mood, which is served by
    /// [`Self::mood_stats`] (its record has a different shape).
    #[must_use]
    pub fn activity_stats(&self, kind: ActivityKind) -> Option<ActivityStats> {
        self.state.lock().activities.tracked(kind).cloned()
    }

    /// The mood check-in record.
    #[must_use]
    pub fn mood_stats(&self) -> MoodStats {
        self.state.lock().activities.mood.clone()
    }

    /// The aggregate record spanning all kinds, verbatim.
    #[must_use]
    pub fn overall_stats(&self) -> OverallStats {
        self.state.lock().stats.clone()
    }

    /// Current global consecutive-day count.
    #[must_use]
    pub fn daily_streak(&self) -> u32 {
        self.state.lock().daily_streak
    }

    /// Whether `kind` was logged on today's calendar date.
    #[must_use]
    pub fn has_completed_today(&self, kind: ActivityKind) -> bool {
        self.has_completed_on(kind, Utc::now().date_naive())
    }

    /// Whether `kind` was logged on the given calendar date.
    #[must_use]
    pub fn has_completed_on(&self, kind: ActivityKind, day: NaiveDate) -> bool {
        let state = self.state.lock();
        match kind {
            ActivityKind::Mood => state.activities.mood.last_logged_day() == Some(day),
            tracked => {
                state.activities.tracked(tracked).and_then(ActivityStats::last_used_day)
                    == Some(day)
            }
        }
    }

    /// Sunday-through-Saturday summary of the week containing today.
    #[must_use]
    pub fn week_summary(&self) -> WeekSummary {
        self.week_summary_at(Utc::now().date_naive())
    }

    /// Weekly summary for the week containing `today`.
    ///
    /// Scans every kind's history (mood included) and buckets entries whose
    /// calendar day falls inside the week.
    #[must_use]
    pub fn week_summary_at(&self, today: NaiveDate) -> WeekSummary {
        let state = self.state.lock();
        let mut days: Vec<DaySummary> = week_days(today)
            .into_iter()
            .map(|date| DaySummary { date, minutes: 0, sessions: 0 })
            .collect();

        for entry in state.activities.all_history() {
            let day = entry.day();
            if let Some(bucket) = days.iter_mut().find(|bucket| bucket.date == day) {
                bucket.minutes = bucket.minutes.saturating_add(entry.minutes);
                bucket.sessions = bucket.sessions.saturating_add(1);
            }
        }

        WeekSummary { week_start: week_start(today), days }
    }

    /// Pick the next tracked activity to recommend.
    ///
    /// A uniformly random kind not yet completed today when one exists,
    /// otherwise the least-practised kind. Mood is never suggested.
    #[must_use]
    pub fn suggested_activity(&self) -> ActivityKind {
        self.suggested_activity_on(Utc::now().date_naive())
    }

    /// Suggestion relative to the given calendar date.
    #[must_use]
    pub fn suggested_activity_on(&self, today: NaiveDate) -> ActivityKind {
        let state = self.state.lock();

        let pending: Vec<ActivityKind> = ActivityKind::TRACKED
            .iter()
            .copied()
            .filter(|kind| {
                state.activities.tracked(*kind).and_then(ActivityStats::last_used_day)
                    != Some(today)
            })
            .collect();

        if let Some(kind) = pending.choose(&mut rand::thread_rng()) {
            return *kind;
        }

        ActivityKind::TRACKED
            .iter()
            .copied()
            .filter_map(|kind| state.activities.tracked(kind).map(|stats| (kind, stats.sessions)))
            .min_by_key(|(_, sessions)| *sessions)
            .map_or(ActivityKind::Breathing, |(kind, _)| kind)
    }

    /// Restore every record to its zeroed default and persist. Irreversible.
    pub fn reset_all(&self) -> Result<()> {
        let mut state = self.state.lock();
        *state = EngagementState::default();
        self.repository.save(&state)?;
        info!("engagement state reset to defaults");
        Ok(())
    }
}

fn log_session(
    stats: &mut ActivityStats,
    input: &SessionInput,
    now: DateTime<Utc>,
    today: NaiveDate,
) {
    // Streak classification reads the previous use day, so it runs first
    streak::advance(stats, today);
    stats.last_used = Some(now);
    stats.total_minutes = stats.total_minutes.saturating_add(input.minutes);
    stats.sessions = stats.sessions.saturating_add(1);
    stats.history.push(SessionEntry::from_input(input, now));
    update_extras(stats, input);
}

fn log_mood(mood: &mut MoodStats, input: &SessionInput, now: DateTime<Utc>) {
    mood.entries = mood.entries.saturating_add(1);
    mood.history.push(SessionEntry::from_input(input, now));
}

fn update_overall(
    stats: &mut OverallStats,
    kind: ActivityKind,
    minutes: u32,
    now: DateTime<Utc>,
    today: NaiveDate,
) {
    stats.total_minutes = stats.total_minutes.saturating_add(minutes);
    stats.total_sessions = stats.total_sessions.saturating_add(1);
    stats.last_activity = Some(kind);
    stats.active_days.insert(today);
    stats.last_used = Some(now);
}

fn update_extras(stats: &mut ActivityStats, input: &SessionInput) {
    match &mut stats.extras {
        KindExtras::Practice { favorite_exercise } => {
            *favorite_exercise = favorite_of(&stats.history);
        }
        KindExtras::Focus { high_score, total_score } => {
            if let Some(score) = input.score {
                *high_score = (*high_score).max(score);
                *total_score = total_score.saturating_add(u64::from(score));
            }
        }
        KindExtras::Journal { total_entries } => {
            *total_entries = total_entries.saturating_add(1);
        }
    }
}

/// Most frequent exercise name across history; earliest-seen wins ties.
fn favorite_of(history: &[SessionEntry]) -> Option<String> {
    let mut counts: Vec<(&str, u32)> = Vec::new();
    for name in history.iter().filter_map(|entry| entry.exercise.as_deref()) {
        match counts.iter_mut().find(|(seen, _)| *seen == name) {
            Some((_, count)) => *count += 1,
            None => counts.push((name, 1)),
        }
    }

    let mut best: Option<(&str, u32)> = None;
    for (name, count) in counts {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((name, count));
        }
    }
    best.map(|(name, _)| name.to_string())
}
