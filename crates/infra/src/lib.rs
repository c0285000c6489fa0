//! # Haven Infra
//!
//! Infrastructure layer - adapters binding the core ports to real storage.
//!
//! This crate contains:
//! - The SQLite-backed engagement state repository
//! - Database connection management and schema migrations
//! - Configuration loading (environment variables and files)
//! - Conversions from external errors into domain errors

pub mod config;
pub mod database;
pub mod errors;

pub use database::{DbManager, SqliteStateRepository};
pub use errors::InfraError;
