use crate::db::types::Provider;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ai_configs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub provider: Provider,
    /// Sensitive, never logged
    #[serde(skip_serializing)]
    pub api_key: String,
    pub model: String,
    /// Sampling temperature, 0-1
    pub temperature: f32,
    pub max_tokens: i32,
    /// The most recently created row is the active config
    #[sea_orm(indexed)]
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
