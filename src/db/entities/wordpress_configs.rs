use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "wordpress_configs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    /// Base site URL, e.g. "https://blog.example.com"
    pub url: String,
    pub username: String,
    /// WordPress application password; sensitive, never logged
    #[serde(skip_serializing)]
    pub application_password: String,
    /// Category slug or display name; resolved to an id at publish time
    pub category: String,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::schedule_settings::Entity")]
    ScheduleSettings,
}

impl Related<super::schedule_settings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ScheduleSettings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
