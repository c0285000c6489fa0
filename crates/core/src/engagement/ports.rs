//! Port interfaces for engagement state persistence
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations. The port is synchronous: every
//! mutation is one in-memory transition followed by a blocking write-back,
//! matching the pooled-SQLite design on the infrastructure side.

use haven_domain::{EngagementState, Result};

/// Trait for persisting the engagement state blob
pub trait StateRepository: Send + Sync {
    /// Load the persisted state, or `None` when nothing usable is stored
    fn load(&self) -> Result<Option<EngagementState>>;

    /// Persist the full state, replacing any previous value
    fn save(&self, state: &EngagementState) -> Result<()>;
}
