use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::RecordId;
use crate::models::program::Episode;

/// A logged viewing event for an episode. Immutable once created,
/// deletable by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub work_title: String,
    pub episode: Episode,
    pub created_at: DateTime<Utc>,
    pub comment: Option<String>,
    pub rating: Option<f64>,
}
