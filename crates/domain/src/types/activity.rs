//! Activity kinds and per-kind engagement records

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::HavenError;

/* -------------------------------------------------------------------------- */
/* Activity Kinds */
/* -------------------------------------------------------------------------- */

/// The fixed set of self-guided wellness activity kinds.
///
/// Mood check-ins are a kind of their own but never participate in streak
/// arithmetic; see [`MoodStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Breathing,
    Meditation,
    Focus,
    Gratitude,
    Journaling,
    Mood,
}

impl ActivityKind {
    /// All six kinds, mood included.
    pub const ALL: [Self; 6] = [
        Self::Breathing,
        Self::Meditation,
        Self::Focus,
        Self::Gratitude,
        Self::Journaling,
        Self::Mood,
    ];

    /// Kinds that participate in streak arithmetic (everything but mood).
    pub const TRACKED: [Self; 5] =
        [Self::Breathing, Self::Meditation, Self::Focus, Self::Gratitude, Self::Journaling];

    /// Stable snake_case name used on the wire and in storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Breathing => "breathing",
            Self::Meditation => "meditation",
            Self::Focus => "focus",
            Self::Gratitude => "gratitude",
            Self::Journaling => "journaling",
            Self::Mood => "mood",
        }
    }

    /// Whether this kind participates in streak arithmetic.
    #[must_use]
    pub const fn is_tracked(self) -> bool {
        !matches!(self, Self::Mood)
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityKind {
    type Err = HavenError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "breathing" => Ok(Self::Breathing),
            "meditation" => Ok(Self::Meditation),
            "focus" => Ok(Self::Focus),
            "gratitude" => Ok(Self::Gratitude),
            "journaling" => Ok(Self::Journaling),
            "mood" => Ok(Self::Mood),
            other => Err(HavenError::InvalidInput(format!("unknown activity kind: {other}"))),
        }
    }
}

/* -------------------------------------------------------------------------- */
/* Session Payloads & History */
/* -------------------------------------------------------------------------- */

/// Session payload supplied by the caller when a wellness exercise completes.
///
/// Only `minutes` is meaningful for every kind; the remaining fields are
/// kind-specific and default to absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionInput {
    /// Duration of the completed session in minutes
    #[serde(default)]
    pub minutes: u32,

    /// Exercise name (breathing and meditation sessions)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercise: Option<String>,

    /// Game score (focus sessions)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,

    /// Entry length in characters (gratitude and journaling sessions)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_length: Option<u32>,

    /// Mood or entry category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// One immutable record of a completed session.
///
/// History is append-only: entries are never mutated or removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEntry {
    /// Unique entry identifier
    pub id: String,

    /// Instant the session was logged
    pub timestamp: DateTime<Utc>,

    /// Session duration in minutes
    pub minutes: u32,

    /// Exercise name, when supplied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercise: Option<String>,

    /// Game score, when supplied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,

    /// Entry length in characters, when supplied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_length: Option<u32>,

    /// Mood or entry category, when supplied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl SessionEntry {
    /// Build a history entry from a session payload at the given instant.
    #[must_use]
    pub fn from_input(input: &SessionInput, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp,
            minutes: input.minutes,
            exercise: input.exercise.clone(),
            score: input.score,
            entry_length: input.entry_length,
            category: input.category.clone(),
        }
    }

    /// Calendar day the session was logged on.
    #[must_use]
    pub fn day(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }
}

/* -------------------------------------------------------------------------- */
/* Kind-Specific Derived Fields */
/* -------------------------------------------------------------------------- */

/// Derived fields whose shape depends on the activity kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum KindExtras {
    /// Breathing and meditation: most frequent exercise across history
    Practice {
        /// Mode of the `exercise` values in history, if any were supplied
        favorite_exercise: Option<String>,
    },

    /// Focus games: best single score and lifetime total
    Focus {
        /// Highest score ever achieved
        high_score: u32,
        /// Sum of all scores across sessions
        total_score: u64,
    },

    /// Gratitude and journaling: number of entries written
    Journal {
        /// Count of completed entries
        total_entries: u32,
    },
}

impl KindExtras {
    /// Zeroed extras for breathing and meditation records.
    #[must_use]
    pub const fn practice() -> Self {
        Self::Practice { favorite_exercise: None }
    }

    /// Zeroed extras for focus records.
    #[must_use]
    pub const fn focus() -> Self {
        Self::Focus { high_score: 0, total_score: 0 }
    }

    /// Zeroed extras for gratitude and journaling records.
    #[must_use]
    pub const fn journal() -> Self {
        Self::Journal { total_entries: 0 }
    }
}

/* -------------------------------------------------------------------------- */
/* Per-Kind Records */
/* -------------------------------------------------------------------------- */

/// Per-kind engagement statistics for a tracked activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityStats {
    /// Instant of the most recent session, if the kind was ever used
    pub last_used: Option<DateTime<Utc>>,

    /// Cumulative duration across all sessions
    pub total_minutes: u32,

    /// Count of logged sessions
    pub sessions: u32,

    /// Current consecutive-day count
    pub streak: u32,

    /// Maximum streak ever achieved
    pub best_streak: u32,

    /// Streak length immediately before it last broke
    pub last_streak: u32,

    /// Append-only session log, oldest first
    pub history: Vec<SessionEntry>,

    /// Kind-specific derived fields
    pub extras: KindExtras,
}

impl ActivityStats {
    /// Zeroed record with extras of the shape appropriate for the kind.
    #[must_use]
    pub const fn new(extras: KindExtras) -> Self {
        Self {
            last_used: None,
            total_minutes: 0,
            sessions: 0,
            streak: 0,
            best_streak: 0,
            last_streak: 0,
            history: Vec::new(),
            extras,
        }
    }

    /// Calendar day of the most recent session.
    #[must_use]
    pub fn last_used_day(&self) -> Option<NaiveDate> {
        self.last_used.map(|ts| ts.date_naive())
    }
}

/// Mood check-in record.
///
/// Mood never participates in streak arithmetic, so no streak fields exist
/// on this type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MoodStats {
    /// Count of logged check-ins
    pub entries: u32,

    /// Append-only check-in log, oldest first
    pub history: Vec<SessionEntry>,
}

impl MoodStats {
    /// Calendar day of the most recent check-in.
    #[must_use]
    pub fn last_logged_day(&self) -> Option<NaiveDate> {
        self.history.last().map(SessionEntry::day)
    }
}

/* -------------------------------------------------------------------------- */
/* Activity Book */
/* -------------------------------------------------------------------------- */

/// The full set of per-kind records: five tracked activities plus mood.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityBook {
    /// Breathing exercise record
    pub breathing: ActivityStats,
    /// Meditation record
    pub meditation: ActivityStats,
    /// Focus game record
    pub focus: ActivityStats,
    /// Gratitude entry record
    pub gratitude: ActivityStats,
    /// Journaling record
    pub journaling: ActivityStats,
    /// Mood check-in record
    pub mood: MoodStats,
}

impl Default for ActivityBook {
    fn default() -> Self {
        Self {
            breathing: ActivityStats::new(KindExtras::practice()),
            meditation: ActivityStats::new(KindExtras::practice()),
            focus: ActivityStats::new(KindExtras::focus()),
            gratitude: ActivityStats::new(KindExtras::journal()),
            journaling: ActivityStats::new(KindExtras::journal()),
            mood: MoodStats::default(),
        }
    }
}

impl ActivityBook {
    /// Record for a tracked kind; `None` for mood.
    #[must_use]
    pub const fn tracked(&self, kind: ActivityKind) -> Option<&ActivityStats> {
        match kind {
            ActivityKind::Breathing => Some(&self.breathing),
            ActivityKind::Meditation => Some(&self.meditation),
            ActivityKind::Focus => Some(&self.focus),
            ActivityKind::Gratitude => Some(&self.gratitude),
            ActivityKind::Journaling => Some(&self.journaling),
            ActivityKind::Mood => None,
        }
    }

    /// Mutable record for a tracked kind; `None` for mood.
    pub fn tracked_mut(&mut self, kind: ActivityKind) -> Option<&mut ActivityStats> {
        match kind {
            ActivityKind::Breathing => Some(&mut self.breathing),
            ActivityKind::Meditation => Some(&mut self.meditation),
            ActivityKind::Focus => Some(&mut self.focus),
            ActivityKind::Gratitude => Some(&mut self.gratitude),
            ActivityKind::Journaling => Some(&mut self.journaling),
            ActivityKind::Mood => None,
        }
    }

    /// Every history entry across all kinds, mood included.
    pub fn all_history(&self) -> impl Iterator<Item = &SessionEntry> {
        ActivityKind::TRACKED
            .iter()
            .filter_map(|kind| self.tracked(*kind))
            .flat_map(|stats| stats.history.iter())
            .chain(self.mood.history.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_strings() {
        for kind in ActivityKind::ALL {
            let parsed: ActivityKind = kind.as_str().parse().expect("known kind parses");
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = "yoga".parse::<ActivityKind>().expect_err("unknown kind");
        assert!(matches!(err, HavenError::InvalidInput(_)));
    }

    #[test]
    fn tracked_excludes_mood() {
        assert!(!ActivityKind::TRACKED.contains(&ActivityKind::Mood));
        assert!(!ActivityKind::Mood.is_tracked());
        assert!(ActivityKind::Breathing.is_tracked());
    }

    #[test]
    fn default_book_has_kind_shaped_extras() {
        let book = ActivityBook::default();

        assert_eq!(book.breathing.extras, KindExtras::practice());
        assert_eq!(book.meditation.extras, KindExtras::practice());
        assert_eq!(book.focus.extras, KindExtras::focus());
        assert_eq!(book.gratitude.extras, KindExtras::journal());
        assert_eq!(book.journaling.extras, KindExtras::journal());
        assert_eq!(book.mood.entries, 0);
    }

    #[test]
    fn book_routes_mood_away_from_tracked_records() {
        let mut book = ActivityBook::default();
        assert!(book.tracked(ActivityKind::Mood).is_none());
        assert!(book.tracked_mut(ActivityKind::Mood).is_none());
        assert!(book.tracked(ActivityKind::Focus).is_some());
    }

    #[test]
    fn session_entry_serializes_without_absent_fields() {
        let input = SessionInput { minutes: 5, ..SessionInput::default() };
        let entry = SessionEntry::from_input(&input, Utc::now());

        let json = serde_json::to_string(&entry).expect("entry serializes");
        assert!(!json.contains("exercise"));
        assert!(!json.contains("score"));
    }
}
