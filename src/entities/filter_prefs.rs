use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "filter_prefs")]
pub struct Model {
    /// Single-row table; always 1.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    /// Serialized `FilterState`.
    pub state_json: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
