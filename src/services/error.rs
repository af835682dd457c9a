//! Error taxonomy shared by the comparison, vote and leaderboard services.

use sea_orm::DbErr;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VotingError {
    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: i32 },

    #[error("Set {winner_set_id} is not part of comparison {comparison_id}")]
    InvalidWinner {
        comparison_id: i32,
        winner_set_id: i32,
    },

    #[error("At least two top-4 sets are required to build a comparison")]
    InsufficientData,

    /// Reserved for optimistic-concurrency checks.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Store temporarily unavailable: {0}")]
    Transient(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl VotingError {
    #[must_use]
    pub const fn comparison_not_found(id: i32) -> Self {
        Self::NotFound {
            resource: "Comparison",
            id,
        }
    }

    /// Whether the caller may simply try again.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Transient(_))
    }
}

fn is_transient_db_error(err: &DbErr) -> bool {
    match err {
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => true,
        other => {
            let msg = other.to_string();
            msg.contains("database is locked") || msg.contains("database is busy")
        }
    }
}

impl From<DbErr> for VotingError {
    fn from(err: DbErr) -> Self {
        if is_transient_db_error(&err) {
            Self::Transient(err.to_string())
        } else {
            Self::Internal(err.to_string())
        }
    }
}

impl From<anyhow::Error> for VotingError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<DbErr>() {
            Ok(db_err) => db_err.into(),
            Err(err) => Self::Internal(format!("{err:#}")),
        }
    }
}

/// Runs a store call under `limit`; running out of time is a retryable
/// failure.
pub async fn with_timeout<T, F>(limit: Duration, fut: F) -> Result<T, VotingError>
where
    F: Future<Output = anyhow::Result<T>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result.map_err(VotingError::from),
        Err(_) => Err(VotingError::Transient(format!(
            "store call timed out after {}ms",
            limit.as_millis()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_errors_are_transient() {
        let err: VotingError = DbErr::Conn(sea_orm::RuntimeErr::Internal("refused".into())).into();
        assert!(err.is_retryable());

        let err: VotingError = DbErr::Custom("boom".into()).into();
        assert!(matches!(err, VotingError::Internal(_)));
    }

    #[test]
    fn anyhow_wrapped_db_errors_keep_their_class() {
        let err = anyhow::Error::new(DbErr::ConnectionAcquire(
            sea_orm::ConnAcquireErr::Timeout,
        ));
        assert!(VotingError::from(err).is_retryable());

        let err = anyhow::anyhow!("something else");
        assert!(matches!(VotingError::from(err), VotingError::Internal(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_store_calls_time_out_as_transient() {
        let result: Result<(), VotingError> = with_timeout(Duration::from_millis(50), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        })
        .await;

        assert!(matches!(result, Err(VotingError::Transient(_))));
    }
}
