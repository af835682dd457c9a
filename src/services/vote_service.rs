//! Domain service for recording votes.

use crate::models::comparison::VoteReceipt;
use crate::services::error::VotingError;

/// Who cast a vote. Authentication lives upstream; every vote that reaches
/// this service is attributed to the shared anonymous user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Voter {
    #[default]
    Anonymous,
}

#[async_trait::async_trait]
pub trait VoteService: Send + Sync {
    /// Records one vote for `winner_set_id` in `comparison_id`.
    ///
    /// The vote row and the matching counter bump commit together. Once
    /// durable, the cached tallies are refreshed and a new comparison is
    /// created in the background; a failure there never fails the vote.
    ///
    /// # Errors
    ///
    /// - [`VotingError::NotFound`] if the comparison does not exist
    /// - [`VotingError::InvalidWinner`] if the set is not one of its two sides
    /// - [`VotingError::Transient`] if the store is slow or busy; nothing
    ///   has been persisted in that case unless the commit itself raced the
    ///   deadline
    async fn record_vote(
        &self,
        comparison_id: i32,
        winner_set_id: i32,
        voter: Voter,
    ) -> Result<VoteReceipt, VotingError>;
}
