use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{EpisodeId, ProgramId};
use crate::models::work::Work;

/// A broadcast channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Channel {
    pub annict_id: i64,
    pub name: String,
}

/// An episode of a work.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Episode {
    pub id: EpisodeId,
    pub number: Option<i32>,
    pub number_text: Option<String>,
    pub title: Option<String>,
}

impl Episode {
    /// Human label, preferring the API's formatted number text.
    #[must_use]
    pub fn label(&self) -> String {
        let number = self
            .number_text
            .clone()
            .or_else(|| self.number.map(|n| format!("#{n}")))
            .unwrap_or_else(|| "?".to_string());

        match &self.title {
            Some(title) if !title.is_empty() => format!("{number} {title}"),
            _ => number,
        }
    }
}

/// A scheduled broadcast instance of an episode.
///
/// A program always belongs to exactly one work.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Program {
    pub id: ProgramId,
    pub started_at: DateTime<Utc>,
    pub channel: Channel,
    pub episode: Episode,
}

/// A work paired with its scheduled programs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramWithWork {
    pub work: Work,
    /// Non-empty, ordered by `started_at` ascending.
    pub programs: Vec<Program>,
    /// User-set start date overriding the broadcast time for sorting and
    /// the aired cutoff.
    pub custom_started_at: Option<DateTime<Utc>>,
}

impl ProgramWithWork {
    #[must_use]
    pub fn new(work: Work, mut programs: Vec<Program>) -> Self {
        programs.sort_by_key(|p| p.started_at);
        Self {
            work,
            programs,
            custom_started_at: None,
        }
    }

    /// The earliest scheduled program.
    #[must_use]
    pub fn first_program(&self) -> &Program {
        // Constructor sorts and callers never hand over an empty list.
        &self.programs[0]
    }

    /// Start time used for sorting and the aired cutoff; the user's custom
    /// start date takes precedence over the broadcast schedule.
    #[must_use]
    pub fn effective_started_at(&self) -> DateTime<Utc> {
        self.custom_started_at
            .unwrap_or_else(|| self.first_program().started_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{StatusState, WorkId, WorkMedia};
    use chrono::TimeZone;

    fn program(id: &str, hour: u32) -> Program {
        Program {
            id: ProgramId::new(id),
            started_at: Utc.with_ymd_and_hms(2024, 4, 1, hour, 0, 0).unwrap(),
            channel: Channel {
                annict_id: 1,
                name: "Tokyo MX".to_string(),
            },
            episode: Episode {
                id: EpisodeId::new("ep"),
                number: Some(1),
                number_text: Some("#1".to_string()),
                title: Some("First".to_string()),
            },
        }
    }

    fn work() -> Work {
        Work {
            id: WorkId::new("w"),
            annict_id: 1,
            title: "Test".to_string(),
            media: WorkMedia::Tv,
            season_name: None,
            season_year: None,
            viewer_status: StatusState::Watching,
            episodes_count: None,
            image_url: None,
        }
    }

    #[test]
    fn first_program_is_earliest() {
        let pw = ProgramWithWork::new(work(), vec![program("b", 12), program("a", 9)]);
        assert_eq!(pw.first_program().id.as_str(), "a");
    }

    #[test]
    fn custom_start_date_overrides_schedule() {
        let mut pw = ProgramWithWork::new(work(), vec![program("a", 9)]);
        assert_eq!(pw.effective_started_at(), pw.first_program().started_at);

        let custom = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        pw.custom_started_at = Some(custom);
        assert_eq!(pw.effective_started_at(), custom);
    }

    #[test]
    fn episode_label_prefers_number_text() {
        let ep = Episode {
            id: EpisodeId::new("e"),
            number: Some(3),
            number_text: Some("第3話".to_string()),
            title: Some("タイトル".to_string()),
        };
        assert_eq!(ep.label(), "第3話 タイトル");

        let bare = Episode {
            id: EpisodeId::new("e"),
            number: Some(3),
            number_text: None,
            title: None,
        };
        assert_eq!(bare.label(), "#3");
    }
}
