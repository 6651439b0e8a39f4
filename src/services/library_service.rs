//! Domain service for the viewer's library.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::clients::transport::NetworkError;
use crate::domain::{StatusState, WorkId};
use crate::models::LibraryEntry;

/// Domain errors for library operations.
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("not signed in to Annict; run `kiroku auth login` first")]
    Unauthorized,

    #[error("Annict API error: {0}")]
    Api(NetworkError),

    #[error("database error: {0}")]
    Database(String),
}

impl From<NetworkError> for LibraryError {
    fn from(err: NetworkError) -> Self {
        match err {
            NetworkError::Unauthorized { .. } => Self::Unauthorized,
            other => Self::Api(other),
        }
    }
}

impl From<anyhow::Error> for LibraryError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<crate::auth::AuthError> for LibraryError {
    fn from(err: crate::auth::AuthError) -> Self {
        match err {
            crate::auth::AuthError::Api(network) => network.into(),
            other => Self::Database(other.to_string()),
        }
    }
}

/// Domain service trait for the viewer's library.
#[async_trait::async_trait]
pub trait LibraryService: Send + Sync {
    /// Works the viewer is currently watching, each with its
    /// next-unwatched-episode pointer.
    ///
    /// # Errors
    ///
    /// - Returns [`LibraryError::Unauthorized`] without a stored token
    /// - Returns [`LibraryError::Api`] when Annict cannot be reached
    async fn watching(&self) -> Result<Vec<LibraryEntry>, LibraryError>;

    /// Sets the viewer status of a work.
    async fn update_status(&self, work_id: &WorkId, state: StatusState)
    -> Result<(), LibraryError>;

    /// Stores a per-work custom start date overriding the broadcast
    /// schedule.
    async fn set_custom_start_date(
        &self,
        work_annict_id: i64,
        started_at: DateTime<Utc>,
    ) -> Result<(), LibraryError>;

    /// Removes a previously stored custom start date.
    async fn clear_custom_start_date(&self, work_annict_id: i64) -> Result<(), LibraryError>;
}
