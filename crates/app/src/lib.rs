//! # Haven App
//!
//! Composition root and the in-process command layer consumed by UI
//! bindings.
//!
//! This crate contains:
//! - `AppContext`: the dependency injection container
//! - Command functions wrapping the engagement service
//! - Structured command-execution logging helpers

pub mod commands;
pub mod context;
pub mod utils;

pub use context::AppContext;
