//! Annict GraphQL client.
//!
//! Authenticated with the user's OAuth bearer token. Queries are
//! hand-written strings with per-query serde structs mapped into the
//! domain models; GraphQL-level errors (`errors[]` in an otherwise-200
//! response) surface as [`NetworkError::Graphql`] and are never retried.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::transport::{HttpTransport, NetworkError};
use crate::constants::limits;
use crate::domain::{EpisodeId, ProgramId, RecordId, StatusState, WorkId, WorkMedia};
use crate::models::{Channel, Episode, LibraryEntry, Program, ProgramWithWork, Record, Work};

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
struct ChannelNode {
    #[serde(rename = "annictId")]
    annict_id: i64,
    name: String,
}

#[derive(Deserialize)]
struct EpisodeNode {
    id: String,
    number: Option<i32>,
    #[serde(rename = "numberText")]
    number_text: Option<String>,
    title: Option<String>,
}

#[derive(Deserialize)]
struct WorkNode {
    id: String,
    #[serde(rename = "annictId")]
    annict_id: i64,
    title: String,
    media: Option<String>,
    #[serde(rename = "seasonName")]
    season_name: Option<String>,
    #[serde(rename = "seasonYear")]
    season_year: Option<i32>,
    #[serde(rename = "viewerStatusState")]
    viewer_status_state: Option<String>,
    #[serde(rename = "episodesCount")]
    episodes_count: Option<i32>,
    image: Option<WorkImage>,
}

#[derive(Deserialize)]
struct WorkImage {
    #[serde(rename = "recommendedImageUrl")]
    recommended_image_url: Option<String>,
}

const WORK_FIELDS: &str = r"
    id
    annictId
    title
    media
    seasonName
    seasonYear
    viewerStatusState
    episodesCount
    image { recommendedImageUrl }
";

const EPISODE_FIELDS: &str = r"
    id
    number
    numberText
    title
";

#[derive(Clone)]
pub struct AnnictClient {
    transport: HttpTransport,
    graphql_url: String,
}

impl AnnictClient {
    #[must_use]
    pub const fn new(transport: HttpTransport, graphql_url: String) -> Self {
        Self {
            transport,
            graphql_url,
        }
    }

    #[must_use]
    pub fn graphql_url(&self) -> &str {
        &self.graphql_url
    }

    /// Programs for the viewer's watching works, grouped per work.
    pub async fn viewer_programs(
        &self,
        token: &str,
    ) -> Result<Vec<ProgramWithWork>, NetworkError> {
        let query = format!(
            r"
            query ($first: Int!) {{
                viewer {{
                    programs(first: $first, orderBy: {{ field: STARTED_AT, direction: ASC }}) {{
                        nodes {{
                            annictId
                            startedAt
                            channel {{ annictId name }}
                            episode {{ {EPISODE_FIELDS} }}
                            work {{ {WORK_FIELDS} }}
                        }}
                    }}
                }}
            }}
            "
        );

        #[derive(Serialize)]
        struct Vars {
            first: i32,
        }

        #[derive(Deserialize)]
        struct Data {
            viewer: Option<Viewer>,
        }

        #[derive(Deserialize)]
        struct Viewer {
            programs: Connection,
        }

        #[derive(Deserialize)]
        struct Connection {
            nodes: Vec<Option<ProgramNode>>,
        }

        #[derive(Deserialize)]
        struct ProgramNode {
            #[serde(rename = "annictId")]
            annict_id: i64,
            #[serde(rename = "startedAt")]
            started_at: DateTime<Utc>,
            channel: ChannelNode,
            episode: EpisodeNode,
            work: WorkNode,
        }

        let data: Data = self
            .execute(
                token,
                &query,
                Vars {
                    first: limits::PROGRAMS_PAGE_SIZE,
                },
            )
            .await?;

        let nodes = data
            .viewer
            .map(|v| v.programs.nodes)
            .unwrap_or_default()
            .into_iter()
            .flatten();

        // Group programs under their work; a program belongs to exactly
        // one work, and input order (started_at asc) fixes group order.
        let mut order: Vec<i64> = Vec::new();
        let mut grouped: HashMap<i64, (Work, Vec<Program>)> = HashMap::new();

        for node in nodes {
            let work_key = node.work.annict_id;
            let program = Program {
                id: ProgramId::new(node.annict_id.to_string()),
                started_at: node.started_at,
                channel: Channel {
                    annict_id: node.channel.annict_id,
                    name: node.channel.name,
                },
                episode: map_episode(node.episode),
            };

            if let Some((_, programs)) = grouped.get_mut(&work_key) {
                programs.push(program);
            } else {
                order.push(work_key);
                grouped.insert(work_key, (map_work(node.work), vec![program]));
            }
        }

        Ok(order
            .into_iter()
            .filter_map(|key| grouped.remove(&key))
            .map(|(work, programs)| ProgramWithWork::new(work, programs))
            .collect())
    }

    /// Library entries for the given viewer statuses, with the next
    /// unwatched episode per work.
    pub async fn viewer_library(
        &self,
        token: &str,
        states: &[StatusState],
    ) -> Result<Vec<LibraryEntry>, NetworkError> {
        let query = format!(
            r"
            query ($states: [StatusState!], $first: Int!) {{
                viewer {{
                    libraryEntries(states: $states, first: $first) {{
                        nodes {{
                            work {{ {WORK_FIELDS} }}
                            nextEpisode {{ {EPISODE_FIELDS} }}
                        }}
                    }}
                }}
            }}
            "
        );

        #[derive(Serialize)]
        struct Vars<'a> {
            states: &'a [StatusState],
            first: i32,
        }

        #[derive(Deserialize)]
        struct Data {
            viewer: Option<Viewer>,
        }

        #[derive(Deserialize)]
        struct Viewer {
            #[serde(rename = "libraryEntries")]
            library_entries: Connection,
        }

        #[derive(Deserialize)]
        struct Connection {
            nodes: Vec<Option<EntryNode>>,
        }

        #[derive(Deserialize)]
        struct EntryNode {
            work: WorkNode,
            #[serde(rename = "nextEpisode")]
            next_episode: Option<EpisodeNode>,
        }

        let data: Data = self
            .execute(
                token,
                &query,
                Vars {
                    states,
                    first: limits::LIBRARY_PAGE_SIZE,
                },
            )
            .await?;

        Ok(data
            .viewer
            .map(|v| v.library_entries.nodes)
            .unwrap_or_default()
            .into_iter()
            .flatten()
            .map(|node| LibraryEntry {
                work: map_work(node.work),
                next_episode: node.next_episode.map(map_episode),
            })
            .collect())
    }

    /// Recent viewing records, newest first.
    pub async fn viewer_records(
        &self,
        token: &str,
        limit: i32,
    ) -> Result<Vec<Record>, NetworkError> {
        let query = format!(
            r"
            query ($last: Int!) {{
                viewer {{
                    records(last: $last) {{
                        nodes {{
                            id
                            comment
                            rating
                            createdAt
                            work {{ title }}
                            episode {{ {EPISODE_FIELDS} }}
                        }}
                    }}
                }}
            }}
            "
        );

        #[derive(Serialize)]
        struct Vars {
            last: i32,
        }

        #[derive(Deserialize)]
        struct Data {
            viewer: Option<Viewer>,
        }

        #[derive(Deserialize)]
        struct Viewer {
            records: Connection,
        }

        #[derive(Deserialize)]
        struct Connection {
            nodes: Vec<Option<RecordNode>>,
        }

        #[derive(Deserialize)]
        struct RecordWork {
            title: String,
        }

        #[derive(Deserialize)]
        struct RecordNode {
            id: String,
            comment: Option<String>,
            rating: Option<f64>,
            #[serde(rename = "createdAt")]
            created_at: DateTime<Utc>,
            work: RecordWork,
            episode: EpisodeNode,
        }

        let data: Data = self.execute(token, &query, Vars { last: limit }).await?;

        let mut records: Vec<Record> = data
            .viewer
            .map(|v| v.records.nodes)
            .unwrap_or_default()
            .into_iter()
            .flatten()
            .map(|node| Record {
                id: RecordId::new(node.id),
                work_title: node.work.title,
                episode: map_episode(node.episode),
                created_at: node.created_at,
                comment: node.comment.filter(|c| !c.is_empty()),
                rating: node.rating,
            })
            .collect();

        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    /// Creates a viewing record for an episode.
    pub async fn create_record(
        &self,
        token: &str,
        episode_id: &EpisodeId,
        comment: Option<&str>,
        rating: Option<f64>,
    ) -> Result<Record, NetworkError> {
        let query = format!(
            r"
            mutation ($episodeId: ID!, $comment: String, $rating: Float) {{
                createRecord(
                    input: {{ episodeId: $episodeId, comment: $comment, rating: $rating }}
                ) {{
                    record {{
                        id
                        comment
                        rating
                        createdAt
                        work {{ title }}
                        episode {{ {EPISODE_FIELDS} }}
                    }}
                }}
            }}
            "
        );

        #[derive(Serialize)]
        struct Vars<'a> {
            #[serde(rename = "episodeId")]
            episode_id: &'a str,
            comment: Option<&'a str>,
            rating: Option<f64>,
        }

        #[derive(Deserialize)]
        struct Data {
            #[serde(rename = "createRecord")]
            create_record: Option<CreateRecord>,
        }

        #[derive(Deserialize)]
        struct CreateRecord {
            record: Option<RecordNode>,
        }

        #[derive(Deserialize)]
        struct RecordWork {
            title: String,
        }

        #[derive(Deserialize)]
        struct RecordNode {
            id: String,
            comment: Option<String>,
            rating: Option<f64>,
            #[serde(rename = "createdAt")]
            created_at: DateTime<Utc>,
            work: RecordWork,
            episode: EpisodeNode,
        }

        let data: Data = self
            .execute(
                token,
                &query,
                Vars {
                    episode_id: episode_id.as_str(),
                    comment,
                    rating,
                },
            )
            .await?;

        let node = data
            .create_record
            .and_then(|c| c.record)
            .ok_or_else(|| NetworkError::Decode {
                url: self.graphql_url.clone(),
                message: "createRecord returned no record".to_string(),
            })?;

        Ok(Record {
            id: RecordId::new(node.id),
            work_title: node.work.title,
            episode: map_episode(node.episode),
            created_at: node.created_at,
            comment: node.comment.filter(|c| !c.is_empty()),
            rating: node.rating,
        })
    }

    /// Deletes a viewing record by id.
    pub async fn delete_record(
        &self,
        token: &str,
        record_id: &RecordId,
    ) -> Result<(), NetworkError> {
        let query = r"
            mutation ($recordId: ID!) {
                deleteRecord(input: { recordId: $recordId }) {
                    episode { id }
                }
            }
        ";

        #[derive(Serialize)]
        struct Vars<'a> {
            #[serde(rename = "recordId")]
            record_id: &'a str,
        }

        #[derive(Deserialize)]
        struct Data {
            #[serde(rename = "deleteRecord")]
            _delete_record: Option<serde_json::Value>,
        }

        let _: Data = self
            .execute(
                token,
                query,
                Vars {
                    record_id: record_id.as_str(),
                },
            )
            .await?;

        Ok(())
    }

    /// Sets the viewer status of a work.
    pub async fn update_status(
        &self,
        token: &str,
        work_id: &WorkId,
        state: StatusState,
    ) -> Result<(), NetworkError> {
        let query = r"
            mutation ($workId: ID!, $state: StatusState!) {
                updateStatus(input: { workId: $workId, state: $state }) {
                    work { id viewerStatusState }
                }
            }
        ";

        #[derive(Serialize)]
        struct Vars<'a> {
            #[serde(rename = "workId")]
            work_id: &'a str,
            state: StatusState,
        }

        #[derive(Deserialize)]
        struct Data {
            #[serde(rename = "updateStatus")]
            _update_status: Option<serde_json::Value>,
        }

        let _: Data = self
            .execute(
                token,
                query,
                Vars {
                    work_id: work_id.as_str(),
                    state,
                },
            )
            .await?;

        Ok(())
    }

    async fn execute<V: Serialize, T: serde::de::DeserializeOwned>(
        &self,
        token: &str,
        query: &str,
        variables: V,
    ) -> Result<T, NetworkError> {
        let body = GraphQlRequest { query, variables };

        let envelope: GraphQlEnvelope<T> = self
            .transport
            .send_json(
                self.transport
                    .post(&self.graphql_url)
                    .bearer_auth(token)
                    .json(&body),
            )
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

fn map_work(node: WorkNode) -> Work {
    Work {
        id: WorkId::new(node.id),
        annict_id: node.annict_id,
        title: node.title,
        media: node
            .media
            .and_then(|m| m.parse().ok())
            .unwrap_or(WorkMedia::Other),
        season_name: node.season_name.and_then(|s| s.parse().ok()),
        season_year: node.season_year,
        viewer_status: node
            .viewer_status_state
            .and_then(|s| s.parse().ok())
            .unwrap_or_default(),
        episodes_count: node.episodes_count,
        image_url: node.image.and_then(|i| i.recommended_image_url),
    }
}

fn map_episode(node: EpisodeNode) -> Episode {
    Episode {
        id: EpisodeId::new(node.id),
        number: node.number,
        number_text: node.number_text,
        title: node.title.filter(|t| !t.is_empty()),
    }
}
