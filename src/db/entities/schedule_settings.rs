use crate::db::types::{Frequency, Keywords, PublishStatus};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "schedule_settings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub wordpress_config_id: i32,
    /// Inactive schedules are never evaluated
    pub is_active: bool,
    pub frequency: Frequency,
    /// Wall-clock "HH:MM" in the operational timezone
    pub time: String,
    /// Keyword pool the rotation selector draws from
    pub target_keywords: Keywords,
    pub publish_status: PublishStatus,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::wordpress_configs::Entity",
        from = "Column::WordpressConfigId",
        to = "super::wordpress_configs::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    WordpressConfig,
    #[sea_orm(has_many = "super::execution_history::Entity")]
    ExecutionHistory,
}

impl Related<super::wordpress_configs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WordpressConfig.def()
    }
}

impl Related<super::execution_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExecutionHistory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
