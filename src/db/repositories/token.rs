use anyhow::Result;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait, ModelTrait};
use tracing::warn;

use crate::entities::auth_tokens;

pub struct TokenRepository {
    conn: DatabaseConnection,
}

impl TokenRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Persists an access token. A blank token is a logged no-op so a
    /// misbehaving caller can never wipe a previously saved credential.
    pub async fn save(&self, provider: &str, access_token: &str) -> Result<()> {
        if access_token.trim().is_empty() {
            warn!("Ignoring attempt to save a blank {} token", provider);
            return Ok(());
        }

        let existing = auth_tokens::Entity::find_by_id(provider.to_string())
            .one(&self.conn)
            .await?;

        let now = Utc::now().to_rfc3339();

        if let Some(model) = existing {
            let mut active: auth_tokens::ActiveModel = model.into();
            active.access_token = Set(access_token.to_string());
            active.updated_at = Set(now);
            active.update(&self.conn).await?;
        } else {
            let active = auth_tokens::ActiveModel {
                provider: Set(provider.to_string()),
                access_token: Set(access_token.to_string()),
                updated_at: Set(now),
            };
            active.insert(&self.conn).await?;
        }

        Ok(())
    }

    pub async fn get(&self, provider: &str) -> Result<Option<String>> {
        let model = auth_tokens::Entity::find_by_id(provider.to_string())
            .one(&self.conn)
            .await?;
        Ok(model.map(|m| m.access_token))
    }

    pub async fn clear(&self, provider: &str) -> Result<()> {
        if let Some(model) = auth_tokens::Entity::find_by_id(provider.to_string())
            .one(&self.conn)
            .await?
        {
            model.delete(&self.conn).await?;
        }
        Ok(())
    }
}
