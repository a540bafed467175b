use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use super::entities::{ai_configs, articles, execution_history, schedule_settings, wordpress_configs};
use crate::db::types::{
    ArticleStatus, ExecutionStatus, Frequency, Keywords, Provider, PublishStatus,
};

/// Fields for one execution-history append. The log is append-only; rows are
/// never updated or deleted.
pub struct NewExecutionRecord {
    pub schedule_id: i32,
    pub wordpress_config_id: i32,
    pub executed_at: DateTime<Utc>,
    pub keyword_used: Option<String>,
    pub article_title: Option<String>,
    pub wordpress_post_id: Option<String>,
    pub status: ExecutionStatus,
}

/// Fields for a freshly generated article; stored as a draft.
pub struct NewArticle {
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub keywords: Keywords,
    pub category: String,
    pub seo_score: i32,
    pub reading_time: i32,
    pub wordpress_config_id: Option<i32>,
}

pub struct Repo {
    db: DatabaseConnection,
}

impl Repo {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn ping(&self) -> Result<()> {
        self.db.ping().await.context("Database ping failed")
    }

    // ==================== AI configs ====================

    /// The active AI config is the most recently created row.
    pub async fn active_ai_config(&self) -> Result<Option<ai_configs::Model>> {
        ai_configs::Entity::find()
            .order_by_desc(ai_configs::Column::CreatedAt)
            .order_by_desc(ai_configs::Column::Id)
            .one(&self.db)
            .await
            .context("Failed to get active AI config")
    }

    pub async fn insert_ai_config(
        &self,
        provider: Provider,
        api_key: String,
        model: String,
        temperature: f32,
        max_tokens: i32,
    ) -> Result<ai_configs::Model> {
        let new_config = ai_configs::ActiveModel {
            provider: Set(provider),
            api_key: Set(api_key),
            model: Set(model),
            temperature: Set(temperature),
            max_tokens: Set(max_tokens),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        new_config
            .insert(&self.db)
            .await
            .context("Failed to insert AI config")
    }

    // ==================== WordPress configs ====================

    pub async fn wordpress_config(&self, id: i32) -> Result<Option<wordpress_configs::Model>> {
        wordpress_configs::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("Failed to get WordPress config")
    }

    pub async fn insert_wordpress_config(
        &self,
        name: String,
        url: String,
        username: String,
        application_password: String,
        category: String,
    ) -> Result<wordpress_configs::Model> {
        let new_config = wordpress_configs::ActiveModel {
            name: Set(name),
            url: Set(url),
            username: Set(username),
            application_password: Set(application_password),
            category: Set(category),
            is_active: Set(true),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        new_config
            .insert(&self.db)
            .await
            .context("Failed to insert WordPress config")
    }

    // ==================== Schedules ====================

    /// Schedules eligible for evaluation; inactive ones never reach the
    /// due-time evaluator.
    pub async fn list_active_schedules(&self) -> Result<Vec<schedule_settings::Model>> {
        schedule_settings::Entity::find()
            .filter(schedule_settings::Column::IsActive.eq(true))
            .order_by_asc(schedule_settings::Column::Id)
            .all(&self.db)
            .await
            .context("Failed to list active schedules")
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn insert_schedule(
        &self,
        wordpress_config_id: i32,
        is_active: bool,
        frequency: Frequency,
        time: String,
        target_keywords: Keywords,
        publish_status: PublishStatus,
    ) -> Result<schedule_settings::Model> {
        let new_schedule = schedule_settings::ActiveModel {
            wordpress_config_id: Set(wordpress_config_id),
            is_active: Set(is_active),
            frequency: Set(frequency),
            time: Set(time),
            target_keywords: Set(target_keywords),
            publish_status: Set(publish_status),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        new_schedule
            .insert(&self.db)
            .await
            .context("Failed to insert schedule")
    }

    // ==================== Execution history ====================

    /// Latest history row for a schedule, regardless of status.
    pub async fn last_execution(
        &self,
        schedule_id: i32,
    ) -> Result<Option<execution_history::Model>> {
        execution_history::Entity::find()
            .filter(execution_history::Column::ScheduleId.eq(schedule_id))
            .order_by_desc(execution_history::Column::ExecutedAt)
            .order_by_desc(execution_history::Column::Id)
            .one(&self.db)
            .await
            .context("Failed to get last execution")
    }

    pub async fn history_for_schedule(
        &self,
        schedule_id: i32,
    ) -> Result<Vec<execution_history::Model>> {
        execution_history::Entity::find()
            .filter(execution_history::Column::ScheduleId.eq(schedule_id))
            .order_by_asc(execution_history::Column::ExecutedAt)
            .all(&self.db)
            .await
            .context("Failed to get execution history")
    }

    pub async fn append_history(
        &self,
        record: NewExecutionRecord,
    ) -> Result<execution_history::Model> {
        let new_record = execution_history::ActiveModel {
            schedule_id: Set(record.schedule_id),
            wordpress_config_id: Set(record.wordpress_config_id),
            executed_at: Set(record.executed_at),
            keyword_used: Set(record.keyword_used),
            article_title: Set(record.article_title),
            wordpress_post_id: Set(record.wordpress_post_id),
            status: Set(record.status),
            ..Default::default()
        };

        new_record
            .insert(&self.db)
            .await
            .context("Failed to append execution history")
    }

    // ==================== Articles ====================

    pub async fn insert_article_draft(&self, article: NewArticle) -> Result<articles::Model> {
        let now = Utc::now();

        let new_article = articles::ActiveModel {
            title: Set(article.title),
            content: Set(article.content),
            excerpt: Set(article.excerpt),
            keywords: Set(article.keywords),
            category: Set(article.category),
            status: Set(ArticleStatus::Draft),
            seo_score: Set(article.seo_score),
            reading_time: Set(article.reading_time),
            wordpress_config_id: Set(article.wordpress_config_id),
            wordpress_post_id: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        new_article
            .insert(&self.db)
            .await
            .context("Failed to insert article")
    }

    pub async fn mark_article_published(
        &self,
        article_id: i32,
        wordpress_post_id: String,
    ) -> Result<articles::Model> {
        let article = articles::Entity::find_by_id(article_id)
            .one(&self.db)
            .await
            .context("Failed to query article")?
            .ok_or_else(|| anyhow::anyhow!("Article {} not found", article_id))?;

        let mut active: articles::ActiveModel = article.into_active_model();
        active.status = Set(ArticleStatus::Published);
        active.wordpress_post_id = Set(Some(wordpress_post_id));
        active.updated_at = Set(Utc::now());
        active
            .update(&self.db)
            .await
            .context("Failed to mark article published")
    }

    /// Failed articles are kept so operators can retry manually.
    pub async fn mark_article_failed(&self, article_id: i32) -> Result<articles::Model> {
        let article = articles::Entity::find_by_id(article_id)
            .one(&self.db)
            .await
            .context("Failed to query article")?
            .ok_or_else(|| anyhow::anyhow!("Article {} not found", article_id))?;

        let mut active: articles::ActiveModel = article.into_active_model();
        active.status = Set(ArticleStatus::Failed);
        active.updated_at = Set(Utc::now());
        active
            .update(&self.db)
            .await
            .context("Failed to mark article failed")
    }

    pub async fn list_articles(&self, limit: u64) -> Result<Vec<articles::Model>> {
        articles::Entity::find()
            .order_by_desc(articles::Column::CreatedAt)
            .order_by_desc(articles::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .context("Failed to list articles")
    }
}
