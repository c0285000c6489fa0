//! Command layer - the in-process interface consumed by UI bindings

pub mod engagement;

pub use engagement::{
    get_activity_stats, get_daily_streak, get_mood_stats, get_overall_stats,
    get_suggested_activity, get_week_summary, has_completed_today, log_activity, reset_all_data,
};
