//! HTTP transport with typed failure classification.
//!
//! Every outbound request goes through [`HttpTransport::send`], which maps
//! transport-level failures (timeout, unreachable host, TLS, reset) and
//! non-2xx responses into the [`NetworkError`] taxonomy so upper layers
//! branch on error kind instead of parsing messages. Error bodies are read
//! as a bounded prefix for diagnostics.

use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::constants::limits::ERROR_BODY_LIMIT;
use crate::retry::Retryable;

#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("could not reach {url}")]
    NoConnection { url: String },

    #[error("TLS failure talking to {url}")]
    Tls { url: String },

    #[error("connection to {url} was reset")]
    ConnectionReset { url: String },

    #[error("unauthorized (401) by {url}")]
    Unauthorized { url: String, body: String },

    #[error("forbidden (403) by {url}")]
    Forbidden { url: String, body: String },

    #[error("not found (404): {url}")]
    NotFound { url: String, body: String },

    #[error("rate limited (429) by {url}")]
    RateLimited { url: String, body: String },

    #[error("server error ({status}) from {url}")]
    Server {
        status: u16,
        url: String,
        body: String,
    },

    #[error("unexpected status {status} from {url}")]
    UnknownStatus {
        status: u16,
        url: String,
        body: String,
    },

    #[error("transport error talking to {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("API error: {message}")]
    Graphql { message: String },

    #[error("malformed response from {url}: {message}")]
    Decode { url: String, message: String },
}

impl NetworkError {
    /// HTTP status code, for status-bucketed variants.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::Forbidden { .. } => Some(403),
            Self::NotFound { .. } => Some(404),
            Self::RateLimited { .. } => Some(429),
            Self::Server { status, .. } | Self::UnknownStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Request URL, where one was known at classification time.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Timeout { url }
            | Self::NoConnection { url }
            | Self::Tls { url }
            | Self::ConnectionReset { url }
            | Self::Unauthorized { url, .. }
            | Self::Forbidden { url, .. }
            | Self::NotFound { url, .. }
            | Self::RateLimited { url, .. }
            | Self::Server { url, .. }
            | Self::UnknownStatus { url, .. }
            | Self::Transport { url, .. }
            | Self::Decode { url, .. } => Some(url),
            Self::Graphql { .. } => None,
        }
    }
}

impl Retryable for NetworkError {
    /// Transient I/O failures are worth retrying; auth and client errors,
    /// TLS failures, GraphQL errors and parse failures are not.
    fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. }
                | Self::NoConnection { .. }
                | Self::ConnectionReset { .. }
                | Self::RateLimited { .. }
                | Self::Server { .. }
                | Self::Transport { .. }
        )
    }
}

/// Maps a reqwest transport failure onto the taxonomy.
#[must_use]
pub fn classify_reqwest(err: reqwest::Error, url: &str) -> NetworkError {
    let url = url.to_string();

    if err.is_timeout() {
        return NetworkError::Timeout { url };
    }

    if chain_has_io_kind(&err, std::io::ErrorKind::ConnectionReset)
        || chain_has_io_kind(&err, std::io::ErrorKind::BrokenPipe)
    {
        return NetworkError::ConnectionReset { url };
    }

    if chain_mentions_tls(&err) {
        return NetworkError::Tls { url };
    }

    if err.is_connect() {
        return NetworkError::NoConnection { url };
    }

    NetworkError::Transport { url, source: err }
}

fn chain_has_io_kind(err: &reqwest::Error, kind: std::io::ErrorKind) -> bool {
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        if let Some(io) = cause.downcast_ref::<std::io::Error>()
            && io.kind() == kind
        {
            return true;
        }
        source = cause.source();
    }
    false
}

fn chain_mentions_tls(err: &reqwest::Error) -> bool {
    let mut messages = err.to_string().to_lowercase();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        messages.push_str(&cause.to_string().to_lowercase());
        source = cause.source();
    }
    ["tls", "certificate", "handshake"]
        .iter()
        .any(|needle| messages.contains(needle))
}

/// Maps a non-2xx status onto the taxonomy.
#[must_use]
pub fn status_error(status: u16, url: &str, body: String) -> NetworkError {
    let url = url.to_string();
    match status {
        401 => NetworkError::Unauthorized { url, body },
        403 => NetworkError::Forbidden { url, body },
        404 => NetworkError::NotFound { url, body },
        429 => NetworkError::RateLimited { url, body },
        500..=599 => NetworkError::Server { status, url, body },
        _ => NetworkError::UnknownStatus { status, url, body },
    }
}

/// Passes 2xx responses through; classifies everything else, keeping a
/// bounded body prefix for diagnostics.
pub async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, NetworkError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    let body = read_body_prefix(response).await;
    Err(status_error(status.as_u16(), &url, body))
}

async fn read_body_prefix(mut response: reqwest::Response) -> String {
    let mut buf: Vec<u8> = Vec::new();
    while buf.len() < ERROR_BODY_LIMIT {
        match response.chunk().await {
            Ok(Some(chunk)) => {
                let take = (ERROR_BODY_LIMIT - buf.len()).min(chunk.len());
                buf.extend_from_slice(&chunk[..take]);
            }
            Ok(None) | Err(_) => break,
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// Thin wrapper over a shared pooled [`reqwest::Client`] that applies the
/// failure classification to every call.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self { client }
    }

    #[must_use]
    pub fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.client.get(url)
    }

    #[must_use]
    pub fn post(&self, url: &str) -> reqwest::RequestBuilder {
        self.client.post(url)
    }

    /// Executes a built request, classifying transport failures and
    /// non-2xx statuses.
    pub async fn send(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, NetworkError> {
        let request = request.build().map_err(|source| NetworkError::Transport {
            url: String::new(),
            source,
        })?;
        let url = request.url().to_string();

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|err| classify_reqwest(err, &url))?;

        check_status(response).await
    }

    /// Executes and decodes a JSON body, mapping decode failures to
    /// [`NetworkError::Decode`].
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, NetworkError> {
        let response = self.send(request).await?;
        let url = response.url().to_string();
        response
            .json::<T>()
            .await
            .map_err(|err| NetworkError::Decode {
                url,
                message: err.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_buckets() {
        let err = status_error(401, "https://api.example/a", String::new());
        assert!(matches!(err, NetworkError::Unauthorized { .. }));
        assert_eq!(err.status(), Some(401));

        let err = status_error(403, "https://api.example/a", String::new());
        assert!(matches!(err, NetworkError::Forbidden { .. }));

        let err = status_error(429, "https://api.example/a", String::new());
        assert!(matches!(err, NetworkError::RateLimited { .. }));

        let err = status_error(503, "https://api.example/a", String::new());
        assert!(matches!(err, NetworkError::Server { status: 503, .. }));

        let err = status_error(418, "https://api.example/a", String::new());
        assert!(matches!(
            err,
            NetworkError::UnknownStatus { status: 418, .. }
        ));
    }

    #[test]
    fn not_found_carries_code_and_url() {
        let err = status_error(404, "https://api.annict.com/graphql", "missing".to_string());
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.url(), Some("https://api.annict.com/graphql"));
        match err {
            NetworkError::NotFound { body, .. } => assert_eq!(body, "missing"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn retryable_classification() {
        let retryable = [
            NetworkError::Timeout { url: "u".into() },
            NetworkError::NoConnection { url: "u".into() },
            NetworkError::ConnectionReset { url: "u".into() },
            status_error(429, "u", String::new()),
            status_error(500, "u", String::new()),
        ];
        for err in retryable {
            assert!(err.is_retryable(), "{err} should be retryable");
        }

        let terminal = [
            NetworkError::Tls { url: "u".into() },
            status_error(401, "u", String::new()),
            status_error(404, "u", String::new()),
            NetworkError::Graphql {
                message: "bad query".into(),
            },
            NetworkError::Decode {
                url: "u".into(),
                message: "eof".into(),
            },
        ];
        for err in terminal {
            assert!(!err.is_retryable(), "{err} should not be retryable");
        }
    }

    #[tokio::test]
    async fn check_status_maps_simulated_404() {
        let http_response = http::Response::builder()
            .status(404)
            .body("{\"message\":\"not found\"}")
            .unwrap();
        let response = reqwest::Response::from(http_response);

        let err = check_status(response).await.unwrap_err();
        assert_eq!(err.status(), Some(404));
        match err {
            NetworkError::NotFound { body, .. } => {
                assert!(body.contains("not found"));
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn check_status_passes_success_through() {
        let http_response = http::Response::builder()
            .status(200)
            .body("ok")
            .unwrap();
        let response = reqwest::Response::from(http_response);
        assert!(check_status(response).await.is_ok());
    }

    #[tokio::test]
    async fn error_body_is_bounded() {
        let big = "x".repeat(ERROR_BODY_LIMIT * 2);
        let http_response = http::Response::builder().status(500).body(big).unwrap();
        let response = reqwest::Response::from(http_response);

        match check_status(response).await.unwrap_err() {
            NetworkError::Server { body, .. } => assert_eq!(body.len(), ERROR_BODY_LIMIT),
            other => panic!("expected Server, got {other:?}"),
        }
    }
}
