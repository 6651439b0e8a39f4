use anyhow::Result;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait, ModelTrait};

use crate::entities::{cached_images, work_details};

pub struct WorkRepository {
    conn: DatabaseConnection,
}

impl WorkRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get_details(&self, work_annict_id: i64) -> Result<Option<work_details::Model>> {
        let model = work_details::Entity::find_by_id(work_annict_id)
            .one(&self.conn)
            .await?;
        Ok(model)
    }

    pub async fn list_details(&self) -> Result<Vec<work_details::Model>> {
        let models = work_details::Entity::find().all(&self.conn).await?;
        Ok(models)
    }

    pub async fn set_custom_start_date(
        &self,
        work_annict_id: i64,
        started_at: DateTime<Utc>,
    ) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        let existing = self.get_details(work_annict_id).await?;

        if let Some(model) = existing {
            let mut active: work_details::ActiveModel = model.into();
            active.custom_started_at = Set(Some(started_at.to_rfc3339()));
            active.updated_at = Set(now);
            active.update(&self.conn).await?;
        } else {
            let active = work_details::ActiveModel {
                work_annict_id: Set(work_annict_id),
                custom_started_at: Set(Some(started_at.to_rfc3339())),
                note: Set(None),
                updated_at: Set(now),
            };
            active.insert(&self.conn).await?;
        }

        Ok(())
    }

    pub async fn clear_custom_start_date(&self, work_annict_id: i64) -> Result<()> {
        if let Some(model) = self.get_details(work_annict_id).await? {
            let mut active: work_details::ActiveModel = model.into();
            active.custom_started_at = Set(None);
            active.updated_at = Set(Utc::now().to_rfc3339());
            active.update(&self.conn).await?;
        }
        Ok(())
    }

    pub async fn cache_image(&self, work_annict_id: i64, image_url: &str) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        let existing = cached_images::Entity::find_by_id(work_annict_id)
            .one(&self.conn)
            .await?;

        if let Some(model) = existing {
            let mut active: cached_images::ActiveModel = model.into();
            active.image_url = Set(image_url.to_string());
            active.fetched_at = Set(now);
            active.update(&self.conn).await?;
        } else {
            let active = cached_images::ActiveModel {
                work_annict_id: Set(work_annict_id),
                image_url: Set(image_url.to_string()),
                fetched_at: Set(now),
            };
            active.insert(&self.conn).await?;
        }

        Ok(())
    }

    pub async fn get_cached_image(&self, work_annict_id: i64) -> Result<Option<String>> {
        let model = cached_images::Entity::find_by_id(work_annict_id)
            .one(&self.conn)
            .await?;
        Ok(model.map(|m| m.image_url))
    }

    pub async fn remove_details(&self, work_annict_id: i64) -> Result<()> {
        if let Some(model) = self.get_details(work_annict_id).await? {
            model.delete(&self.conn).await?;
        }
        Ok(())
    }
}
