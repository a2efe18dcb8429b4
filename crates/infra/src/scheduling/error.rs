//! Scheduler error types

use std::time::Duration;

use fieldlog_domain::FieldLogError;
use thiserror::Error;
use tokio::task::JoinError;

use crate::errors::InfraError;

/// Scheduler-specific errors
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Scheduler is already running
    #[error("Scheduler already running")]
    AlreadyRunning,

    /// Scheduler is not running
    #[error("Scheduler not running")]
    NotRunning,

    /// Shutdown wait exceeded its deadline
    #[error("Scheduler shutdown timed out after {0:?}")]
    ShutdownTimeout(Duration),

    /// Background task panicked or was aborted
    #[error("Task join failed: {0}")]
    TaskJoinFailed(String),
}

impl From<JoinError> for SchedulerError {
    fn from(err: JoinError) -> Self {
        SchedulerError::TaskJoinFailed(err.to_string())
    }
}

impl From<SchedulerError> for InfraError {
    fn from(err: SchedulerError) -> Self {
        let domain_err = match err {
            SchedulerError::AlreadyRunning | SchedulerError::NotRunning => {
                FieldLogError::InvalidInput(err.to_string())
            }
            _ => FieldLogError::Internal(err.to_string()),
        };
        InfraError(domain_err)
    }
}

impl From<SchedulerError> for FieldLogError {
    fn from(err: SchedulerError) -> Self {
        InfraError::from(err).into()
    }
}

/// Convenience type alias for scheduler operations
pub type SchedulerResult<T> = Result<T, SchedulerError>;
