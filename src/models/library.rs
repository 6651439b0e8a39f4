use serde::{Deserialize, Serialize};

use crate::models::program::Episode;
use crate::models::work::Work;

/// A work with its next-unwatched-episode pointer, for the watching list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryEntry {
    pub work: Work,
    /// The next episode without a viewing record, if any remain.
    pub next_episode: Option<Episode>,
}

impl LibraryEntry {
    /// True when every released episode has been recorded.
    #[must_use]
    pub const fn is_up_to_date(&self) -> bool {
        self.next_episode.is_none()
    }
}
