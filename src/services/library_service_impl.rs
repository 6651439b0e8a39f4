use chrono::{DateTime, Utc};
use tracing::info;

use crate::auth::{Provider, TokenManager};
use crate::clients::AnnictClient;
use crate::db::Store;
use crate::domain::{StatusState, WorkId};
use crate::models::LibraryEntry;
use crate::retry::{self, RetryConfig};
use crate::services::library_service::{LibraryError, LibraryService};

pub struct DefaultLibraryService {
    annict: AnnictClient,
    tokens: TokenManager,
    store: Store,
    retry_config: RetryConfig,
}

impl DefaultLibraryService {
    #[must_use]
    pub const fn new(
        annict: AnnictClient,
        tokens: TokenManager,
        store: Store,
        retry_config: RetryConfig,
    ) -> Self {
        Self {
            annict,
            tokens,
            store,
            retry_config,
        }
    }

    async fn token(&self) -> Result<String, LibraryError> {
        self.tokens
            .get_access_token(Provider::Annict)
            .await?
            .ok_or(LibraryError::Unauthorized)
    }
}

#[async_trait::async_trait]
impl LibraryService for DefaultLibraryService {
    async fn watching(&self) -> Result<Vec<LibraryEntry>, LibraryError> {
        let token = self.token().await?;
        let entries = retry::retry(&self.retry_config, || {
            self.annict.viewer_library(&token, &[StatusState::Watching])
        })
        .await?;
        Ok(entries)
    }

    async fn update_status(
        &self,
        work_id: &WorkId,
        state: StatusState,
    ) -> Result<(), LibraryError> {
        let token = self.token().await?;
        self.annict.update_status(&token, work_id, state).await?;
        info!("Set status of {} to {}", work_id, state);
        Ok(())
    }

    async fn set_custom_start_date(
        &self,
        work_annict_id: i64,
        started_at: DateTime<Utc>,
    ) -> Result<(), LibraryError> {
        self.store
            .set_custom_start_date(work_annict_id, started_at)
            .await?;
        info!(
            "Custom start date for work {} set to {}",
            work_annict_id,
            started_at.to_rfc3339()
        );
        Ok(())
    }

    async fn clear_custom_start_date(&self, work_annict_id: i64) -> Result<(), LibraryError> {
        self.store.clear_custom_start_date(work_annict_id).await?;
        info!("Custom start date for work {} cleared", work_annict_id);
        Ok(())
    }
}
