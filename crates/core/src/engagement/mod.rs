//! Engagement tracking: the logger, streak calculator, and read accessors

pub mod ports;
pub mod service;
pub mod streak;

pub use service::EngagementService;
