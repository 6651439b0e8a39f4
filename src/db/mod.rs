use anyhow::Result;
use chrono::{DateTime, Utc};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::entities::work_details;
use crate::filter::FilterState;

pub mod migrator;
pub mod repositories;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.starts_with(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn token_repo(&self) -> repositories::token::TokenRepository {
        repositories::token::TokenRepository::new(self.conn.clone())
    }

    fn work_repo(&self) -> repositories::work::WorkRepository {
        repositories::work::WorkRepository::new(self.conn.clone())
    }

    fn prefs_repo(&self) -> repositories::prefs::PrefsRepository {
        repositories::prefs::PrefsRepository::new(self.conn.clone())
    }

    pub async fn save_access_token(&self, provider: &str, token: &str) -> Result<()> {
        self.token_repo().save(provider, token).await
    }

    pub async fn get_access_token(&self, provider: &str) -> Result<Option<String>> {
        self.token_repo().get(provider).await
    }

    pub async fn clear_access_token(&self, provider: &str) -> Result<()> {
        self.token_repo().clear(provider).await
    }

    pub async fn get_work_details(&self, work_annict_id: i64) -> Result<Option<work_details::Model>> {
        self.work_repo().get_details(work_annict_id).await
    }

    pub async fn list_work_details(&self) -> Result<Vec<work_details::Model>> {
        self.work_repo().list_details().await
    }

    pub async fn set_custom_start_date(
        &self,
        work_annict_id: i64,
        started_at: DateTime<Utc>,
    ) -> Result<()> {
        self.work_repo()
            .set_custom_start_date(work_annict_id, started_at)
            .await
    }

    pub async fn clear_custom_start_date(&self, work_annict_id: i64) -> Result<()> {
        self.work_repo().clear_custom_start_date(work_annict_id).await
    }

    pub async fn cache_image(&self, work_annict_id: i64, image_url: &str) -> Result<()> {
        self.work_repo().cache_image(work_annict_id, image_url).await
    }

    pub async fn get_cached_image(&self, work_annict_id: i64) -> Result<Option<String>> {
        self.work_repo().get_cached_image(work_annict_id).await
    }

    pub async fn load_filter_state(&self) -> Result<FilterState> {
        self.prefs_repo().load_filter_state().await
    }

    pub async fn save_filter_state(&self, state: &FilterState) -> Result<()> {
        self.prefs_repo().save_filter_state(state).await
    }
}
