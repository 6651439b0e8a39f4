//! MyAnimeList REST v2 client.
//!
//! Authenticates with the fixed `X-MAL-CLIENT-ID` API key header.

use serde::Deserialize;

use crate::clients::transport::{HttpTransport, NetworkError};

const FIELDS: &str = "id,title,alternative_titles,num_episodes,status,mean,start_season,synopsis";

#[derive(Debug, Deserialize)]
pub struct MalAnime {
    pub id: i32,
    pub title: String,
    pub alternative_titles: Option<AlternativeTitles>,
    pub num_episodes: Option<i32>,
    pub status: Option<String>,
    pub mean: Option<f32>,
    pub start_season: Option<StartSeason>,
    pub synopsis: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AlternativeTitles {
    pub en: Option<String>,
    pub ja: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StartSeason {
    pub year: i32,
    pub season: String,
}

#[derive(Clone)]
pub struct MalClient {
    transport: HttpTransport,
    base_url: String,
    client_id: String,
}

impl MalClient {
    #[must_use]
    pub const fn new(transport: HttpTransport, base_url: String, client_id: String) -> Self {
        Self {
            transport,
            base_url,
            client_id,
        }
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.client_id.trim().is_empty()
    }

    /// Fetches an anime by MAL id; a 404 means the id is unknown.
    pub async fn get_anime(&self, id: i32) -> Result<Option<MalAnime>, NetworkError> {
        let url = format!("{}/anime/{}?fields={}", self.base_url, id, FIELDS);

        let request = self
            .transport
            .get(&url)
            .header("X-MAL-CLIENT-ID", &self.client_id);

        match self.transport.send_json::<MalAnime>(request).await {
            Ok(anime) => Ok(Some(anime)),
            Err(NetworkError::NotFound { .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }
}
