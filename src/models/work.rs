use serde::{Deserialize, Serialize};

use crate::domain::{SeasonName, StatusState, WorkId, WorkMedia};

/// An anime title tracked by the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Work {
    pub id: WorkId,
    /// Numeric Annict id, used for display and to key local tables.
    pub annict_id: i64,
    pub title: String,
    pub media: WorkMedia,
    pub season_name: Option<SeasonName>,
    pub season_year: Option<i32>,
    pub viewer_status: StatusState,
    pub episodes_count: Option<i32>,
    pub image_url: Option<String>,
}

impl Work {
    /// Season label like "2024 SPRING", if the work carries season info.
    #[must_use]
    pub fn season_label(&self) -> Option<String> {
        match (self.season_year, self.season_name) {
            (Some(year), Some(season)) => Some(format!("{year} {season}")),
            (Some(year), None) => Some(year.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn work() -> Work {
        Work {
            id: WorkId::new("V29yaw=="),
            annict_id: 100,
            title: "Test".to_string(),
            media: WorkMedia::Tv,
            season_name: Some(SeasonName::Spring),
            season_year: Some(2024),
            viewer_status: StatusState::Watching,
            episodes_count: Some(12),
            image_url: None,
        }
    }

    #[test]
    fn season_label_combines_year_and_season() {
        assert_eq!(work().season_label().as_deref(), Some("2024 SPRING"));
    }

    #[test]
    fn season_label_year_only() {
        let mut w = work();
        w.season_name = None;
        assert_eq!(w.season_label().as_deref(), Some("2024"));
        w.season_year = None;
        assert_eq!(w.season_label(), None);
    }
}
