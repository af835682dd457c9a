//! Domain service for picking and creating head-to-head comparisons.

use crate::models::comparison::{Comparison, ComparisonView};
use crate::services::error::VotingError;

#[async_trait::async_trait]
pub trait ComparisonService: Send + Sync {
    /// Returns an active comparison with both sets resolved, creating one
    /// when none is live.
    ///
    /// Vote tallies come from the in-process cache when it holds the
    /// comparison; otherwise the durable counters are used and the cache is
    /// hydrated for the remaining lifetime.
    ///
    /// # Errors
    ///
    /// Returns [`VotingError::InsufficientData`] when fewer than two sets
    /// exist and nothing is active, or [`VotingError::Transient`] when the
    /// store is slow or busy.
    async fn select_active(&self) -> Result<ComparisonView, VotingError>;

    /// Pairs two distinct random sets, persists the comparison with zeroed
    /// counters and seeds the cache.
    ///
    /// # Errors
    ///
    /// Returns [`VotingError::InsufficientData`] when fewer than two sets
    /// exist.
    async fn create_comparison(&self) -> Result<Comparison, VotingError>;

    /// Creates a comparison only when none is active. Returns whether one
    /// was created.
    async fn ensure_active(&self) -> Result<bool, VotingError>;
}
