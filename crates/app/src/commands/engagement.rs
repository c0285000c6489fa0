//! Engagement commands
//!
//! Thin wrappers over the engagement service: parse string kinds at the
//! boundary, invoke the service, and log execution outcome uniformly.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

use haven_domain::types::{
    ActivityKind, ActivityStats, MoodStats, OverallStats, SessionInput, WeekSummary,
};
use haven_domain::{HavenError, Result};
use tracing::info;

use crate::utils::logging::{error_label, log_command_execution};
use crate::AppContext;

/// Record a completed wellness session.
pub fn log_activity(ctx: &Arc<AppContext>, kind: &str, input: &SessionInput) -> Result<()> {
    let command_name = "engagement::log_activity";
    let start = Instant::now();

    info!(command = command_name, kind, minutes = input.minutes, "logging activity");
    let result =
        ActivityKind::from_str(kind).and_then(|kind| ctx.engagement.log_activity(kind, input));

    finish(command_name, start, &result);
    result
}

/// Get stats for a tracked activity kind.
///
/// Mood has a different record shape and is served by [`get_mood_stats`].
pub fn get_activity_stats(ctx: &Arc<AppContext>, kind: &str) -> Result<ActivityStats> {
    let command_name = "engagement::get_activity_stats";
    let start = Instant::now();

    let result = ActivityKind::from_str(kind).and_then(|kind| {
        ctx.engagement.activity_stats(kind).ok_or_else(|| {
            HavenError::InvalidInput("mood stats are served by get_mood_stats".into())
        })
    });

    finish(command_name, start, &result);
    result
}

/// Get the mood check-in record.
pub fn get_mood_stats(ctx: &Arc<AppContext>) -> Result<MoodStats> {
    let command_name = "engagement::get_mood_stats";
    let start = Instant::now();

    let result = Ok(ctx.engagement.mood_stats());

    finish(command_name, start, &result);
    result
}

/// Get the aggregate record spanning all activity kinds.
pub fn get_overall_stats(ctx: &Arc<AppContext>) -> Result<OverallStats> {
    let command_name = "engagement::get_overall_stats";
    let start = Instant::now();

    let result = Ok(ctx.engagement.overall_stats());

    finish(command_name, start, &result);
    result
}

/// Get the current global consecutive-day count.
pub fn get_daily_streak(ctx: &Arc<AppContext>) -> Result<u32> {
    let command_name = "engagement::get_daily_streak";
    let start = Instant::now();

    let result = Ok(ctx.engagement.daily_streak());

    finish(command_name, start, &result);
    result
}

/// Check whether `kind` was logged on today's calendar date.
pub fn has_completed_today(ctx: &Arc<AppContext>, kind: &str) -> Result<bool> {
    let command_name = "engagement::has_completed_today";
    let start = Instant::now();

    let result =
        ActivityKind::from_str(kind).map(|kind| ctx.engagement.has_completed_today(kind));

    finish(command_name, start, &result);
    result
}

/// Get the Sunday-through-Saturday summary of the current week.
pub fn get_week_summary(ctx: &Arc<AppContext>) -> Result<WeekSummary> {
    let command_name = "engagement::get_week_summary";
    let start = Instant::now();

    let result = Ok(ctx.engagement.week_summary());

    finish(command_name, start, &result);
    result
}

/// Get the next suggested tracked activity (never mood).
pub fn get_suggested_activity(ctx: &Arc<AppContext>) -> Result<ActivityKind> {
    let command_name = "engagement::get_suggested_activity";
    let start = Instant::now();

    let result = Ok(ctx.engagement.suggested_activity());

    finish(command_name, start, &result);
    result
}

/// Restore every record to its zeroed default. Irreversible.
pub fn reset_all_data(ctx: &Arc<AppContext>) -> Result<()> {
    let command_name = "engagement::reset_all_data";
    let start = Instant::now();

    info!(command = command_name, "resetting engagement data");
    let result = ctx.engagement.reset_all();

    finish(command_name, start, &result);
    result
}

fn finish<T>(command_name: &str, start: Instant, result: &Result<T>) {
    let elapsed = start.elapsed();
    let success = result.is_ok();
    let error_type = result.as_ref().err().map(error_label);

    log_command_execution(command_name, elapsed, success, error_type);
}
