//! Mock repository implementations for testing
//!
//! Provides in-memory mocks for the state repository port, enabling
//! deterministic unit tests without database dependencies.

use haven_core::engagement::ports::StateRepository;
use haven_domain::{EngagementState, HavenError, Result as DomainResult};
use parking_lot::Mutex;

/// In-memory mock for `StateRepository`.
///
/// Remembers the most recently saved state and counts writes, so tests can
/// assert on write-back behaviour as well as contents.
#[derive(Default)]
pub struct MockStateRepository {
    saved: Mutex<Option<EngagementState>>,
    save_count: Mutex<u32>,
}

impl MockStateRepository {
    /// Create an empty mock (no persisted state).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock seeded with previously "persisted" state.
    pub fn seeded(state: EngagementState) -> Self {
        Self { saved: Mutex::new(Some(state)), save_count: Mutex::new(0) }
    }

    /// Number of times `save` was called.
    pub fn save_count(&self) -> u32 {
        *self.save_count.lock()
    }

    /// The most recently saved state, if any.
    pub fn last_saved(&self) -> Option<EngagementState> {
        self.saved.lock().clone()
    }
}

impl StateRepository for MockStateRepository {
    fn load(&self) -> DomainResult<Option<EngagementState>> {
        Ok(self.saved.lock().clone())
    }

    fn save(&self, state: &EngagementState) -> DomainResult<()> {
        *self.saved.lock() = Some(state.clone());
        *self.save_count.lock() += 1;
        Ok(())
    }
}

/// Mock repository whose writes always fail.
///
/// Loads succeed (empty), so a service can be constructed; used to verify
/// that persistence failures surface to the caller.
#[derive(Default)]
pub struct FailingStateRepository;

impl StateRepository for FailingStateRepository {
    fn load(&self) -> DomainResult<Option<EngagementState>> {
        Ok(None)
    }

    fn save(&self, _state: &EngagementState) -> DomainResult<()> {
        Err(HavenError::Database("write failed".into()))
    }
}
