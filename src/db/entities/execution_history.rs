use crate::db::types::ExecutionStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Append-only execution log. Drives both the due-time frequency gate
/// (latest row per schedule) and keyword rotation (distinct keywords used).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "execution_history")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(indexed)]
    pub schedule_id: i32,
    pub wordpress_config_id: i32,
    pub executed_at: DateTimeUtc,
    /// None when the attempt failed before a keyword was selected
    pub keyword_used: Option<String>,
    pub article_title: Option<String>,
    pub wordpress_post_id: Option<String>,
    pub status: ExecutionStatus,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::schedule_settings::Entity",
        from = "Column::ScheduleId",
        to = "super::schedule_settings::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    ScheduleSetting,
}

impl Related<super::schedule_settings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ScheduleSetting.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
