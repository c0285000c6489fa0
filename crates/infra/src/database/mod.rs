//! Database adapters: connection management and the state repository

pub mod manager;
pub mod state_repository;

pub use manager::{DbConnection, DbManager};
pub use state_repository::SqliteStateRepository;
