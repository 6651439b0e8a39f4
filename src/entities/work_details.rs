use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "work_details")]
pub struct Model {
    /// Numeric Annict work id.
    #[sea_orm(primary_key, auto_increment = false)]
    pub work_annict_id: i64,
    /// RFC3339; overrides the broadcast schedule when set.
    pub custom_started_at: Option<String>,
    pub note: Option<String>,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
