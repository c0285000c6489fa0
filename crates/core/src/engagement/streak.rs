//! Streak transitions as pure calendar-day derivations
//!
//! Separated from the service so the increment/reset rules can be tested
//! without a storage backend or a real clock. The same transition drives
//! per-activity streaks and the global daily streak.

use chrono::NaiveDate;
use haven_domain::types::ActivityStats;
use haven_domain::utils::day::is_previous_day;

/// How a new log relates to the previous one for streak purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakStep {
    /// No prior use recorded
    First,
    /// Logged again on the same calendar day
    SameDay,
    /// Logged on the calendar day immediately after the previous use
    Consecutive,
    /// More than one calendar day elapsed since the previous use
    Broken,
}

/// Classify a log on `today` against the previous use day.
#[must_use]
pub fn classify(previous: Option<NaiveDate>, today: NaiveDate) -> StreakStep {
    match previous {
        None => StreakStep::First,
        Some(day) if day == today => StreakStep::SameDay,
        Some(day) if is_previous_day(day, today) => StreakStep::Consecutive,
        Some(_) => StreakStep::Broken,
    }
}

/// Next value of a consecutive-day counter after a step.
#[must_use]
pub const fn next_count(current: u32, step: StreakStep) -> u32 {
    match step {
        StreakStep::First | StreakStep::Broken => 1,
        StreakStep::SameDay => current,
        StreakStep::Consecutive => current.saturating_add(1),
    }
}

/// Advance the streak counters of a tracked record for a log on `today`.
///
/// Must run before `last_used` is overwritten: the classification reads the
/// previous use day. A broken streak is archived into `last_streak` before
/// the counter resets, and `best_streak` never decreases.
pub fn advance(stats: &mut ActivityStats, today: NaiveDate) {
    let step = classify(stats.last_used_day(), today);
    if step == StreakStep::Broken {
        stats.last_streak = stats.streak;
    }
    stats.streak = next_count(stats.streak, step);
    stats.best_streak = stats.best_streak.max(stats.streak);
}
