use anyhow::Result;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait};

use crate::entities::filter_prefs;
use crate::filter::FilterState;

const ROW_ID: i32 = 1;

pub struct PrefsRepository {
    conn: DatabaseConnection,
}

impl PrefsRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// The persisted filter state, or the default when none was saved.
    pub async fn load_filter_state(&self) -> Result<FilterState> {
        let model = filter_prefs::Entity::find_by_id(ROW_ID)
            .one(&self.conn)
            .await?;

        match model {
            Some(m) => Ok(serde_json::from_str(&m.state_json)?),
            None => Ok(FilterState::default()),
        }
    }

    pub async fn save_filter_state(&self, state: &FilterState) -> Result<()> {
        let state_json = serde_json::to_string(state)?;
        let now = Utc::now().to_rfc3339();

        let existing = filter_prefs::Entity::find_by_id(ROW_ID)
            .one(&self.conn)
            .await?;

        if let Some(model) = existing {
            let mut active: filter_prefs::ActiveModel = model.into();
            active.state_json = Set(state_json);
            active.updated_at = Set(now);
            active.update(&self.conn).await?;
        } else {
            let active = filter_prefs::ActiveModel {
                id: Set(ROW_ID),
                state_json: Set(state_json),
                updated_at: Set(now),
            };
            active.insert(&self.conn).await?;
        }

        Ok(())
    }
}
