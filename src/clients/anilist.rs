//! AniList GraphQL client for metadata search and lookup.

use serde::{Deserialize, Serialize};

use crate::clients::transport::{HttpTransport, NetworkError};
use crate::domain::SeasonName;

#[derive(Serialize)]
struct GraphQlRequest<'a, V: Serialize> {
    query: &'a str,
    variables: V,
}

#[derive(Deserialize)]
struct GraphQlEnvelope<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQlErrorItem>>,
}

#[derive(Deserialize)]
struct GraphQlErrorItem {
    message: String,
}

#[derive(Deserialize)]
struct Media {
    id: i32,
    title: Title,
    format: Option<String>,
    season: Option<String>,
    #[serde(rename = "seasonYear")]
    season_year: Option<i32>,
    episodes: Option<i32>,
    status: Option<String>,
    #[serde(rename = "averageScore")]
    average_score: Option<i32>,
    description: Option<String>,
}

#[derive(Deserialize)]
struct Title {
    romaji: Option<String>,
    english: Option<String>,
    native: Option<String>,
}

const MEDIA_FIELDS: &str = r"
    id
    title { romaji english native }
    format
    season
    seasonYear
    episodes
    status
    averageScore
    description(asHtml: false)
";

/// A search hit or lookup result from AniList.
#[derive(Debug, Clone)]
pub struct AnilistMedia {
    pub id: i32,
    pub title_romaji: String,
    pub title_english: Option<String>,
    pub title_native: Option<String>,
    pub format: Option<String>,
    pub season: Option<SeasonName>,
    pub season_year: Option<i32>,
    pub episodes: Option<i32>,
    pub status: Option<String>,
    pub average_score: Option<i32>,
    pub description: Option<String>,
}

#[derive(Clone)]
pub struct AnilistClient {
    transport: HttpTransport,
    graphql_url: String,
}

impl AnilistClient {
    #[must_use]
    pub const fn new(transport: HttpTransport, graphql_url: String) -> Self {
        Self {
            transport,
            graphql_url,
        }
    }

    pub async fn search(&self, search: &str) -> Result<Vec<AnilistMedia>, NetworkError> {
        let query = format!(
            r"
            query ($search: String) {{
                Page(page: 1, perPage: 10) {{
                    media(search: $search, type: ANIME) {{ {MEDIA_FIELDS} }}
                }}
            }}
            "
        );

        #[derive(Serialize)]
        struct Vars<'a> {
            search: &'a str,
        }

        #[derive(Deserialize)]
        struct Data {
            #[serde(rename = "Page")]
            page: Page,
        }

        #[derive(Deserialize)]
        struct Page {
            media: Vec<Media>,
        }

        let data: Data = self.execute(&query, Vars { search }).await?;

        Ok(data.page.media.into_iter().map(map_media).collect())
    }

    pub async fn media_by_id(&self, id: i32) -> Result<Option<AnilistMedia>, NetworkError> {
        let query = format!(
            r"
            query ($id: Int) {{
                Media(id: $id, type: ANIME) {{ {MEDIA_FIELDS} }}
            }}
            "
        );

        #[derive(Serialize)]
        struct Vars {
            id: i32,
        }

        #[derive(Deserialize)]
        struct Data {
            #[serde(rename = "Media")]
            media: Option<Media>,
        }

        match self.execute::<_, Data>(&query, Vars { id }).await {
            Ok(data) => Ok(data.media.map(map_media)),
            // AniList answers a miss with a 404 that still carries errors[].
            Err(NetworkError::NotFound { .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn execute<V: Serialize, T: serde::de::DeserializeOwned>(
        &self,
        query: &str,
        variables: V,
    ) -> Result<T, NetworkError> {
        let body = GraphQlRequest { query, variables };

        let envelope: GraphQlEnvelope<T> = self
            .transport
            .send_json(self.transport.post(&self.graphql_url).json(&body))
            .await?;

        if let Some(errors) = envelope.errors
            && !errors.is_empty()
        {
            let message = errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(NetworkError::Graphql { message });
        }

        envelope.data.ok_or_else(|| NetworkError::Decode {
            url: self.graphql_url.clone(),
            message: "response carried neither data nor errors".to_string(),
        })
    }
}

fn map_media(m: Media) -> AnilistMedia {
    AnilistMedia {
        id: m.id,
        title_romaji: m.title.romaji.unwrap_or_default(),
        title_english: m.title.english,
        title_native: m.title.native,
        format: m.format,
        season: m.season.and_then(|s| s.parse().ok()),
        season_year: m.season_year,
        episodes: m.episodes,
        status: m.status,
        average_score: m.average_score,
        description: m.description,
    }
}
