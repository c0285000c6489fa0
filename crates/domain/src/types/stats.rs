//! Aggregate statistics and the persisted engagement state
//!
//! This module centralizes the cross-activity records:
//! - Overall aggregates spanning every activity kind
//! - Weekly summary buckets for dashboard rendering
//! - The versioned state blob written to durable storage

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::activity::{ActivityBook, ActivityKind};

/* -------------------------------------------------------------------------- */
/* Overall Statistics */
/* -------------------------------------------------------------------------- */

/// Aggregate counters spanning all activity kinds.
///
/// Every counter is monotonically non-decreasing; no decrement operation
/// exists anywhere in the mutation path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OverallStats {
    /// Total minutes across all kinds
    pub total_minutes: u32,

    /// Total logged sessions across all kinds
    pub total_sessions: u32,

    /// Kind of the most recently logged session
    pub last_activity: Option<ActivityKind>,

    /// Distinct calendar days with at least one logged session
    pub active_days: BTreeSet<NaiveDate>,

    /// Instant of the most recent session of any kind
    pub last_used: Option<DateTime<Utc>>,
}

/* -------------------------------------------------------------------------- */
/* Weekly Summary */
/* -------------------------------------------------------------------------- */

/// One day of the weekly summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySummary {
    /// Calendar date of the bucket
    pub date: NaiveDate,

    /// Total minutes logged on this day
    pub minutes: u32,

    /// Number of sessions logged on this day
    pub sessions: u32,
}

/// Sunday-through-Saturday summary of one week.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekSummary {
    /// Sunday that starts the summarized week
    pub week_start: NaiveDate,

    /// Exactly seven buckets, Sunday first
    pub days: Vec<DaySummary>,
}

impl WeekSummary {
    /// Total minutes across the week.
    #[must_use]
    pub fn total_minutes(&self) -> u32 {
        self.days.iter().map(|day| day.minutes).sum()
    }
}

/* -------------------------------------------------------------------------- */
/* Persisted State */
/* -------------------------------------------------------------------------- */

/// The engagement state blob persisted under a fixed store name.
///
/// Written back in full after every mutation; the schema version tag lives
/// alongside the blob in storage, and a mismatched version is discarded on
/// load rather than migrated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngagementState {
    /// Per-kind records, mood included
    pub activities: ActivityBook,

    /// Aggregates spanning all kinds
    pub stats: OverallStats,

    /// Global consecutive-day count across any activity
    pub daily_streak: u32,

    /// Calendar day of the most recent session of any kind
    pub last_used_date: Option<NaiveDate>,
}
