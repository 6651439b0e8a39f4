use std::sync::Arc;

use crate::auth::{AnnictAuthManager, TokenManager};
use crate::clients::{AnilistClient, AnnictClient, HttpTransport, MalClient};
use crate::config::Config;
use crate::db::Store;
use crate::retry::RetryConfig;
use crate::services::{
    DefaultLibraryService, DefaultProgramService, DefaultRecordService, LibraryService,
    ProgramService, RecordService,
};

/// Build a shared HTTP client with reasonable defaults for API calls.
/// This client is reused across all HTTP-based services to enable
/// connection pooling and avoid socket exhaustion.
fn build_shared_http_client(timeout_seconds: u64, user_agent: &str) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_seconds))
        .user_agent(user_agent)
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

#[derive(Clone)]
pub struct SharedState {
    pub config: Config,

    pub store: Store,

    pub tokens: TokenManager,

    pub annict_auth: AnnictAuthManager,

    pub anilist: AnilistClient,

    pub mal: MalClient,

    pub programs: Arc<dyn ProgramService>,

    pub records: Arc<dyn RecordService>,

    pub library: Arc<dyn LibraryService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let http_client = build_shared_http_client(
            config.network.request_timeout_seconds,
            &config.network.user_agent,
        )?;
        let transport = HttpTransport::new(http_client);

        let retry_config = RetryConfig::from_settings(&config.retry);
        let overall_timeout = config.retry.overall_timeout();

        let tokens = TokenManager::new(store.clone());
        let annict = AnnictClient::new(transport.clone(), config.annict.graphql_url.clone());
        let anilist = AnilistClient::new(transport.clone(), config.anilist.graphql_url.clone());
        let mal = MalClient::new(
            transport.clone(),
            config.myanimelist.base_url.clone(),
            config.myanimelist.client_id.clone(),
        );

        let annict_auth = AnnictAuthManager::new(
            transport,
            config.annict.clone(),
            tokens.clone(),
            retry_config.clone(),
        );

        let programs = Arc::new(DefaultProgramService::new(
            annict.clone(),
            tokens.clone(),
            store.clone(),
            retry_config.clone(),
            overall_timeout,
        )) as Arc<dyn ProgramService + Send + Sync + 'static>;

        let records = Arc::new(DefaultRecordService::new(
            annict.clone(),
            tokens.clone(),
            retry_config.clone(),
        )) as Arc<dyn RecordService + Send + Sync + 'static>;

        let library = Arc::new(DefaultLibraryService::new(
            annict,
            tokens.clone(),
            store.clone(),
            retry_config,
        )) as Arc<dyn LibraryService + Send + Sync + 'static>;

        Ok(Self {
            config,
            store,
            tokens,
            annict_auth,
            anilist,
            mal,
            programs,
            records,
            library,
        })
    }
}
