//! Domain service for viewing records.

use thiserror::Error;

use crate::clients::transport::NetworkError;
use crate::domain::{EpisodeId, RecordId};
use crate::models::Record;

/// Domain errors for record operations.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("not signed in to Annict; run `kiroku auth login` first")]
    Unauthorized,

    #[error("failed to create record: {0}")]
    CreateFailed(String),

    #[error("Annict API error: {0}")]
    Api(NetworkError),

    #[error("database error: {0}")]
    Database(String),
}

impl From<NetworkError> for RecordError {
    fn from(err: NetworkError) -> Self {
        match err {
            NetworkError::Unauthorized { .. } => Self::Unauthorized,
            other => Self::Api(other),
        }
    }
}

impl From<crate::auth::AuthError> for RecordError {
    fn from(err: crate::auth::AuthError) -> Self {
        match err {
            crate::auth::AuthError::Api(network) => network.into(),
            other => Self::Database(other.to_string()),
        }
    }
}

/// Domain service trait for viewing records.
///
/// Creation and deletion are at-most-once per call: mutations are never
/// retried, so a flaky network cannot double-log an episode.
#[async_trait::async_trait]
pub trait RecordService: Send + Sync {
    /// Logs a viewing record for an episode.
    ///
    /// # Errors
    ///
    /// - Returns [`RecordError::Unauthorized`] without a stored token
    /// - Returns [`RecordError::CreateFailed`] when the API accepts the
    ///   call but returns no record
    async fn create_record(
        &self,
        episode_id: &EpisodeId,
        comment: Option<String>,
        rating: Option<f64>,
    ) -> Result<Record, RecordError>;

    /// Deletes a record by id.
    async fn delete_record(&self, record_id: &RecordId) -> Result<(), RecordError>;

    /// Recent records, newest first.
    async fn recent_records(&self, limit: i32) -> Result<Vec<Record>, RecordError>;
}
