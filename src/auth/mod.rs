//! OAuth2 authorization-code flow and persisted token storage.
//!
//! `AnnictAuthManager` builds the authorize URL and exchanges a pasted
//! code for an access token; `TokenManager` fronts the persisted token
//! table. There is no browser automation here: the CLI prints the URL and
//! accepts the redirect's `code` parameter back.

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

use crate::clients::transport::{HttpTransport, NetworkError};
use crate::config::AnnictConfig;
use crate::db::Store;
use crate::retry::{self, RetryConfig};

/// A tracking service we hold credentials for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Annict,
    Anilist,
    MyAnimeList,
}

impl Provider {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Annict => "annict",
            Self::Anilist => "anilist",
            Self::MyAnimeList => "myanimelist",
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("annict.client_id and annict.client_secret must be set in config.toml")]
    MissingCredentials,

    #[error("token exchange failed: {0}")]
    Api(#[from] NetworkError),

    #[error("database error: {0}")]
    Database(String),
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Reads and writes persisted access tokens.
#[derive(Clone)]
pub struct TokenManager {
    store: Store,
}

impl TokenManager {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// Persists a token. Blank tokens are logged and dropped; a previously
    /// saved non-blank token stays untouched.
    pub async fn save_access_token(&self, provider: Provider, token: &str) -> Result<(), AuthError> {
        self.store
            .save_access_token(provider.as_str(), token)
            .await?;
        Ok(())
    }

    pub async fn get_access_token(&self, provider: Provider) -> Result<Option<String>, AuthError> {
        let token = self.store.get_access_token(provider.as_str()).await?;
        Ok(token.filter(|t| !t.trim().is_empty()))
    }

    pub async fn has_valid_token(&self, provider: Provider) -> Result<bool, AuthError> {
        Ok(self.get_access_token(provider).await?.is_some())
    }

    pub async fn clear(&self, provider: Provider) -> Result<(), AuthError> {
        self.store.clear_access_token(provider.as_str()).await?;
        info!("Cleared {} access token", provider.as_str());
        Ok(())
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Drives the Annict OAuth2 authorization-code flow.
#[derive(Clone)]
pub struct AnnictAuthManager {
    transport: HttpTransport,
    settings: AnnictConfig,
    tokens: TokenManager,
    retry_config: RetryConfig,
}

impl AnnictAuthManager {
    #[must_use]
    pub const fn new(
        transport: HttpTransport,
        settings: AnnictConfig,
        tokens: TokenManager,
        retry_config: RetryConfig,
    ) -> Self {
        Self {
            transport,
            settings,
            tokens,
            retry_config,
        }
    }

    /// The URL the user opens in a browser to grant access.
    pub fn authorization_url(&self) -> Result<String, AuthError> {
        if self.settings.client_id.trim().is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let base = format!("{}/oauth/authorize", self.settings.oauth_base_url);
        let url = Url::parse_with_params(
            &base,
            &[
                ("client_id", self.settings.client_id.as_str()),
                ("redirect_uri", self.settings.redirect_uri.as_str()),
                ("response_type", "code"),
                ("scope", self.settings.scope.as_str()),
            ],
        )
        .map_err(|e| AuthError::Database(format!("invalid oauth base url: {e}")))?;

        Ok(url.to_string())
    }

    /// Exchanges an authorization code for an access token and persists
    /// it. Transient exchange failures are retried.
    pub async fn handle_authorization_code(&self, code: &str) -> Result<(), AuthError> {
        if self.settings.client_id.trim().is_empty() || self.settings.client_secret.trim().is_empty()
        {
            return Err(AuthError::MissingCredentials);
        }

        let token_url = format!("{}/oauth/token", self.settings.oauth_base_url);
        debug!("Exchanging authorization code at {}", token_url);

        let response: TokenResponse = retry::retry(&self.retry_config, || {
            let form = [
                ("client_id", self.settings.client_id.as_str()),
                ("client_secret", self.settings.client_secret.as_str()),
                ("grant_type", "authorization_code"),
                ("redirect_uri", self.settings.redirect_uri.as_str()),
                ("code", code),
            ];
            self.transport
                .send_json(self.transport.post(&token_url).form(&form))
        })
        .await?;

        self.tokens
            .save_access_token(Provider::Annict, &response.access_token)
            .await?;
        info!("Annict access token saved");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> AnnictConfig {
        AnnictConfig {
            client_id: "abc123".to_string(),
            client_secret: "s3cret".to_string(),
            ..AnnictConfig::default()
        }
    }

    fn manager(settings: AnnictConfig) -> AnnictAuthManager {
        let transport = HttpTransport::new(reqwest::Client::new());
        // The store is only needed for the exchange path; URL construction
        // never touches it.
        let store = Store {
            conn: sea_orm::DatabaseConnection::default(),
        };
        AnnictAuthManager::new(
            transport,
            settings,
            TokenManager::new(store),
            RetryConfig::default(),
        )
    }

    #[test]
    fn authorization_url_contains_oauth_params() {
        let url = manager(settings()).authorization_url().unwrap();
        assert!(url.starts_with("https://api.annict.com/oauth/authorize?"));
        assert!(url.contains("client_id=abc123"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("scope=read+write"));
        assert!(url.contains("redirect_uri=kiroku%3A%2F%2Foauth%2Fcallback"));
    }

    #[test]
    fn authorization_url_requires_client_id() {
        let result = manager(AnnictConfig::default()).authorization_url();
        assert!(matches!(result, Err(AuthError::MissingCredentials)));
    }

    #[test]
    fn provider_keys_are_stable() {
        assert_eq!(Provider::Annict.as_str(), "annict");
        assert_eq!(Provider::Anilist.as_str(), "anilist");
        assert_eq!(Provider::MyAnimeList.as_str(), "myanimelist");
    }
}
