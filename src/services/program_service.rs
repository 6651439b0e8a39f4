//! Domain service for the program timetable.

use thiserror::Error;

use crate::clients::transport::NetworkError;
use crate::filter::{AvailableFilters, FilterState};
use crate::models::ProgramWithWork;

/// Domain errors for program operations.
#[derive(Debug, Error)]
pub enum ProgramError {
    #[error("not signed in to Annict; run `kiroku auth login` first")]
    Unauthorized,

    #[error("Annict API error: {0}")]
    Api(NetworkError),

    #[error("database error: {0}")]
    Database(String),
}

impl From<NetworkError> for ProgramError {
    fn from(err: NetworkError) -> Self {
        match err {
            NetworkError::Unauthorized { .. } => Self::Unauthorized,
            other => Self::Api(other),
        }
    }
}

impl From<anyhow::Error> for ProgramError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<crate::auth::AuthError> for ProgramError {
    fn from(err: crate::auth::AuthError) -> Self {
        match err {
            crate::auth::AuthError::Api(network) => network.into(),
            other => Self::Database(other.to_string()),
        }
    }
}

/// Domain service trait for the program timetable.
#[async_trait::async_trait]
pub trait ProgramService: Send + Sync {
    /// Fetches the viewer's programs, merges local per-work state, and
    /// applies the given filters.
    ///
    /// # Errors
    ///
    /// - Returns [`ProgramError::Unauthorized`] without a stored token
    /// - Returns [`ProgramError::Api`] when Annict cannot be reached
    async fn list_programs(
        &self,
        state: &FilterState,
    ) -> Result<Vec<ProgramWithWork>, ProgramError>;

    /// The facet values present in the viewer's current program list.
    async fn available_filters(&self) -> Result<AvailableFilters, ProgramError>;

    /// The persisted filter state, or defaults when none was saved.
    async fn load_filter_state(&self) -> Result<FilterState, ProgramError>;

    /// Persists the filter state as the new default.
    async fn save_filter_state(&self, state: &FilterState) -> Result<(), ProgramError>;
}
