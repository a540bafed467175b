use crate::db::types::{ArticleStatus, Keywords};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A generated article, kept independently of its WordPress copy so
/// operators can inspect and manually retry failed publishes.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "articles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    #[sea_orm(column_type = "Text")]
    pub excerpt: String,
    pub keywords: Keywords,
    pub category: String,
    pub status: ArticleStatus,
    pub seo_score: i32,
    /// Estimated reading time in minutes
    pub reading_time: i32,
    pub wordpress_config_id: Option<i32>,
    /// Set once the article has been published
    pub wordpress_post_id: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
