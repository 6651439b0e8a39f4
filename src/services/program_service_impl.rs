use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::auth::{Provider, TokenManager};
use crate::clients::AnnictClient;
use crate::clients::transport::NetworkError;
use crate::db::Store;
use crate::filter::{self, AvailableFilters, FilterState};
use crate::models::ProgramWithWork;
use crate::retry::{self, RetryConfig};
use crate::services::program_service::{ProgramError, ProgramService};

pub struct DefaultProgramService {
    annict: AnnictClient,
    tokens: TokenManager,
    store: Store,
    retry_config: RetryConfig,
    overall_timeout: Option<Duration>,
}

impl DefaultProgramService {
    #[must_use]
    pub const fn new(
        annict: AnnictClient,
        tokens: TokenManager,
        store: Store,
        retry_config: RetryConfig,
        overall_timeout: Option<Duration>,
    ) -> Self {
        Self {
            annict,
            tokens,
            store,
            retry_config,
            overall_timeout,
        }
    }

    async fn fetch_programs(&self) -> Result<Vec<ProgramWithWork>, ProgramError> {
        let token = self
            .tokens
            .get_access_token(Provider::Annict)
            .await?
            .ok_or(ProgramError::Unauthorized)?;

        let op = || self.annict.viewer_programs(&token);
        let mut programs = match self.overall_timeout {
            Some(deadline) => {
                let url = self.annict.graphql_url().to_string();
                retry::retry_with_timeout(
                    &self.retry_config,
                    deadline,
                    || NetworkError::Timeout { url },
                    op,
                )
                .await?
            }
            None => retry::retry(&self.retry_config, op).await?,
        };

        self.merge_local_state(&mut programs).await?;
        Ok(programs)
    }

    /// Overlays persisted per-work state and refreshes the image cache.
    async fn merge_local_state(
        &self,
        programs: &mut [ProgramWithWork],
    ) -> Result<(), ProgramError> {
        let details = self.store.list_work_details().await?;
        let custom_dates: HashMap<i64, DateTime<Utc>> = details
            .into_iter()
            .filter_map(|d| {
                let raw = d.custom_started_at?;
                match DateTime::parse_from_rfc3339(&raw) {
                    Ok(parsed) => Some((d.work_annict_id, parsed.with_timezone(&Utc))),
                    Err(err) => {
                        debug!(
                            "Ignoring unparseable custom start date for work {}: {}",
                            d.work_annict_id, err
                        );
                        None
                    }
                }
            })
            .collect();

        for program in programs.iter_mut() {
            program.custom_started_at = custom_dates.get(&program.work.annict_id).copied();

            if let Some(url) = &program.work.image_url
                && let Err(err) = self.store.cache_image(program.work.annict_id, url).await
            {
                debug!(
                    "Failed to cache image for work {}: {}",
                    program.work.annict_id, err
                );
            }
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl ProgramService for DefaultProgramService {
    async fn list_programs(
        &self,
        state: &FilterState,
    ) -> Result<Vec<ProgramWithWork>, ProgramError> {
        let programs = self.fetch_programs().await?;
        Ok(filter::apply_filters(programs, state, Utc::now()))
    }

    async fn available_filters(&self) -> Result<AvailableFilters, ProgramError> {
        let programs = self.fetch_programs().await?;
        Ok(filter::extract_available_filters(&programs))
    }

    async fn load_filter_state(&self) -> Result<FilterState, ProgramError> {
        Ok(self.store.load_filter_state().await?)
    }

    async fn save_filter_state(&self, state: &FilterState) -> Result<(), ProgramError> {
        Ok(self.store.save_filter_state(state).await?)
    }
}
