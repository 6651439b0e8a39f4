use tracing::info;

use crate::auth::{Provider, TokenManager};
use crate::clients::AnnictClient;
use crate::clients::transport::NetworkError;
use crate::domain::{EpisodeId, RecordId};
use crate::models::Record;
use crate::retry::{self, RetryConfig};
use crate::services::record_service::{RecordError, RecordService};

pub struct DefaultRecordService {
    annict: AnnictClient,
    tokens: TokenManager,
    retry_config: RetryConfig,
}

impl DefaultRecordService {
    #[must_use]
    pub const fn new(annict: AnnictClient, tokens: TokenManager, retry_config: RetryConfig) -> Self {
        Self {
            annict,
            tokens,
            retry_config,
        }
    }

    async fn token(&self) -> Result<String, RecordError> {
        self.tokens
            .get_access_token(Provider::Annict)
            .await?
            .ok_or(RecordError::Unauthorized)
    }
}

#[async_trait::async_trait]
impl RecordService for DefaultRecordService {
    async fn create_record(
        &self,
        episode_id: &EpisodeId,
        comment: Option<String>,
        rating: Option<f64>,
    ) -> Result<Record, RecordError> {
        let token = self.token().await?;

        // Mutations run exactly once; retrying a create could double-log
        // the episode.
        let record = self
            .annict
            .create_record(&token, episode_id, comment.as_deref(), rating)
            .await
            .map_err(|err| match err {
                NetworkError::Decode { message, .. } => RecordError::CreateFailed(message),
                other => other.into(),
            })?;

        info!(
            "Recorded {} {}",
            record.work_title,
            record.episode.label()
        );
        Ok(record)
    }

    async fn delete_record(&self, record_id: &RecordId) -> Result<(), RecordError> {
        let token = self.token().await?;
        self.annict.delete_record(&token, record_id).await?;
        info!("Deleted record {}", record_id);
        Ok(())
    }

    async fn recent_records(&self, limit: i32) -> Result<Vec<Record>, RecordError> {
        let token = self.token().await?;
        let records = retry::retry(&self.retry_config, || {
            self.annict.viewer_records(&token, limit)
        })
        .await?;
        Ok(records)
    }
}
