use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::{due, keywords, Generator, Publisher};
use crate::db::entities::{ai_configs, schedule_settings};
use crate::db::repo::{NewArticle, NewExecutionRecord, Repo};
use crate::db::types::ExecutionStatus;
use crate::error::{AppError, AppResult};
use crate::generation::metadata;

/// Per-invocation orchestrator.
///
/// Walks every active schedule sequentially and, for each one that is due,
/// drives keyword selection, generation, the article draft, the publish and
/// the history append. A failure inside one schedule's pipeline is recorded
/// and never aborts the remaining schedules; the invocation as a whole only
/// fails when the active AI config cannot be loaded.
pub struct Executor {
    repo: Arc<Repo>,
    generator: Arc<dyn Generator>,
    publisher: Arc<dyn Publisher>,
    window_minutes: i64,
    timezone: FixedOffset,
}

/// JSON body returned to the external trigger.
#[derive(Debug, Serialize)]
pub struct InvocationReport {
    pub success: bool,
    /// Number of schedules that published successfully
    pub executed: usize,
    pub results: Vec<ScheduleOutcome>,
    pub timestamp: DateTime<Utc>,
}

/// One entry per attempted (due) schedule; skipped schedules are omitted.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleOutcome {
    pub schedule_id: i32,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

enum Attempt {
    Skipped,
    Published {
        keyword: String,
        article_title: String,
        post_id: String,
    },
}

/// Pipeline failure plus however much progress had been made; the keyword
/// and title (when present) still go into the history record.
struct AttemptFailure {
    keyword: Option<String>,
    article_title: Option<String>,
    error: AppError,
}

impl AttemptFailure {
    fn new(error: AppError) -> Self {
        Self {
            keyword: None,
            article_title: None,
            error,
        }
    }

    fn with_keyword(keyword: &str, error: AppError) -> Self {
        Self {
            keyword: Some(keyword.to_string()),
            article_title: None,
            error,
        }
    }
}

impl Executor {
    pub fn new(
        repo: Arc<Repo>,
        generator: Arc<dyn Generator>,
        publisher: Arc<dyn Publisher>,
        window_minutes: i64,
        timezone: FixedOffset,
    ) -> Self {
        Self {
            repo,
            generator,
            publisher,
            window_minutes,
            timezone,
        }
    }

    pub async fn run_once(&self, force: bool) -> AppResult<InvocationReport> {
        self.run_at(Utc::now(), force).await
    }

    pub async fn run_at(&self, now: DateTime<Utc>, force: bool) -> AppResult<InvocationReport> {
        // Precondition for the whole run; the only error that escapes
        let ai = self
            .repo
            .active_ai_config()
            .await?
            .ok_or(AppError::NoActiveAiConfig)?;

        let schedules = self.repo.list_active_schedules().await?;
        info!(
            "Evaluating {} active schedule(s), provider {}",
            schedules.len(),
            ai.provider
        );

        let mut results = Vec::new();
        for schedule in &schedules {
            match self.attempt(&ai, schedule, now, force).await {
                Ok(Attempt::Skipped) => {
                    debug!("Schedule {} not due, skipping", schedule.id);
                }
                Ok(Attempt::Published {
                    keyword,
                    article_title,
                    post_id,
                }) => {
                    self.record(
                        schedule,
                        now,
                        Some(keyword.clone()),
                        Some(article_title.clone()),
                        Some(post_id.clone()),
                        ExecutionStatus::Success,
                    )
                    .await;

                    results.push(ScheduleOutcome {
                        schedule_id: schedule.id,
                        success: true,
                        keyword: Some(keyword),
                        article_title: Some(article_title),
                        post_id: Some(post_id),
                        error: None,
                    });
                }
                Err(failure) => {
                    error!("Schedule {} failed: {}", schedule.id, failure.error);
                    self.record(
                        schedule,
                        now,
                        failure.keyword.clone(),
                        failure.article_title.clone(),
                        None,
                        ExecutionStatus::Error,
                    )
                    .await;

                    results.push(ScheduleOutcome {
                        schedule_id: schedule.id,
                        success: false,
                        keyword: failure.keyword,
                        article_title: failure.article_title,
                        post_id: None,
                        error: Some(failure.error.to_string()),
                    });
                }
            }
        }

        let executed = results.iter().filter(|r| r.success).count();
        Ok(InvocationReport {
            success: true,
            executed,
            results,
            timestamp: now,
        })
    }

    /// One schedule's pipeline. Returns `Skipped` when the schedule is not
    /// due; any error carries the progress made so far for the history row.
    async fn attempt(
        &self,
        ai: &ai_configs::Model,
        schedule: &schedule_settings::Model,
        now: DateTime<Utc>,
        force: bool,
    ) -> Result<Attempt, AttemptFailure> {
        let last = self
            .repo
            .last_execution(schedule.id)
            .await
            .map_err(|e| AttemptFailure::new(e.into()))?;

        let is_due = due::is_due(
            &schedule.time,
            schedule.frequency,
            now.with_timezone(&self.timezone),
            last.map(|l| l.executed_at),
            self.window_minutes,
            force,
        )
        .map_err(AttemptFailure::new)?;

        if !is_due {
            return Ok(Attempt::Skipped);
        }

        info!(
            "Schedule {} is due (time {}, frequency {})",
            schedule.id, schedule.time, schedule.frequency
        );

        let history = self
            .repo
            .history_for_schedule(schedule.id)
            .await
            .map_err(|e| AttemptFailure::new(e.into()))?;
        let used = keywords::used_keywords(&history);
        let keyword = keywords::select_keyword(&schedule.target_keywords, &used)
            .map_err(AttemptFailure::new)?;

        let site = self
            .repo
            .wordpress_config(schedule.wordpress_config_id)
            .await
            .map_err(|e| AttemptFailure::with_keyword(&keyword, e.into()))?
            .ok_or_else(|| {
                AttemptFailure::with_keyword(
                    &keyword,
                    AppError::WordPressConfigNotFound(schedule.wordpress_config_id),
                )
            })?;

        let generated = self
            .generator
            .generate(ai, &keyword)
            .await
            .map_err(|e| AttemptFailure::with_keyword(&keyword, e))?;

        let content_keywords = metadata::extract_keywords(&generated.content);
        let article = self
            .repo
            .insert_article_draft(NewArticle {
                title: generated.title.clone(),
                content: generated.content.clone(),
                excerpt: metadata::excerpt(&generated.content),
                keywords: content_keywords.clone().into(),
                category: site.category.clone(),
                seo_score: metadata::seo_score(
                    &generated.title,
                    &generated.content,
                    &content_keywords,
                ),
                reading_time: metadata::reading_time_minutes(&generated.content),
                wordpress_config_id: Some(site.id),
            })
            .await
            .map_err(|e| AttemptFailure::with_keyword(&keyword, e.into()))?;

        match self
            .publisher
            .publish(&site, &article, schedule.publish_status)
            .await
        {
            Ok(post) => {
                if let Err(e) = self
                    .repo
                    .mark_article_published(article.id, post.post_id.clone())
                    .await
                {
                    warn!(
                        "Article {} published but status update failed: {:#}",
                        article.id, e
                    );
                }

                info!(
                    "Schedule {} published post {} for keyword {:?}",
                    schedule.id, post.post_id, keyword
                );

                Ok(Attempt::Published {
                    keyword,
                    article_title: article.title,
                    post_id: post.post_id,
                })
            }
            Err(e) => {
                // Keep the article for manual retry
                if let Err(mark_err) = self.repo.mark_article_failed(article.id).await {
                    warn!("Failed to mark article {} failed: {:#}", article.id, mark_err);
                }

                Err(AttemptFailure {
                    keyword: Some(keyword),
                    article_title: Some(article.title),
                    error: e,
                })
            }
        }
    }

    /// Append the history row; the log is the source of truth for the next
    /// invocation's due check, so an append failure is loud but not fatal to
    /// the rest of the run.
    async fn record(
        &self,
        schedule: &schedule_settings::Model,
        now: DateTime<Utc>,
        keyword_used: Option<String>,
        article_title: Option<String>,
        wordpress_post_id: Option<String>,
        status: ExecutionStatus,
    ) {
        let record = NewExecutionRecord {
            schedule_id: schedule.id,
            wordpress_config_id: schedule.wordpress_config_id,
            executed_at: now,
            keyword_used,
            article_title,
            wordpress_post_id,
            status,
        };

        if let Err(e) = self.repo.append_history(record).await {
            error!(
                "Failed to append execution history for schedule {}: {:#}",
                schedule.id, e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::entities::{articles, wordpress_configs};
    use crate::db::test_connection;
    use crate::db::types::{ArticleStatus, Frequency, Keywords, Provider, PublishStatus};
    use crate::generation::GeneratedArticle;
    use crate::scheduler::PublishedPost;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockGenerator {
        calls: AtomicUsize,
    }

    impl MockGenerator {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl Generator for MockGenerator {
        async fn generate(
            &self,
            _ai: &ai_configs::Model,
            keyword: &str,
        ) -> AppResult<GeneratedArticle> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(GeneratedArticle {
                title: format!("Article about {}", keyword),
                content: format!("## Overview\n\nEverything about {}.", keyword),
            })
        }
    }

    struct MockPublisher {
        calls: AtomicUsize,
        fail_for_config: Option<i32>,
    }

    impl MockPublisher {
        fn new(fail_for_config: Option<i32>) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail_for_config,
            })
        }
    }

    #[async_trait]
    impl Publisher for MockPublisher {
        async fn publish(
            &self,
            site: &wordpress_configs::Model,
            _article: &articles::Model,
            _status: PublishStatus,
        ) -> AppResult<PublishedPost> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_for_config == Some(site.id) {
                return Err(AppError::Publish(wordpress_client::Error::Api {
                    status: 500,
                    body: "internal server error".to_string(),
                }));
            }
            Ok(PublishedPost {
                post_id: "101".to_string(),
                link: Some("https://blog.example.com/?p=101".to_string()),
            })
        }
    }

    struct Ctx {
        repo: Arc<Repo>,
        generator: Arc<MockGenerator>,
        publisher: Arc<MockPublisher>,
        executor: Executor,
    }

    fn tokyo() -> FixedOffset {
        FixedOffset::east_opt(9 * 3600).unwrap()
    }

    /// 2026-08-06 at the given Tokyo wall-clock time, as UTC
    fn at_tokyo(hour: u32, minute: u32) -> DateTime<Utc> {
        tokyo()
            .with_ymd_and_hms(2026, 8, 6, hour, minute, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    async fn setup(fail_for_config: Option<i32>, with_ai_config: bool) -> Ctx {
        let repo = Arc::new(Repo::new(test_connection().await.unwrap()));

        if with_ai_config {
            repo.insert_ai_config(
                Provider::OpenAi,
                "test-key".to_string(),
                "gpt-4o-mini".to_string(),
                0.7,
                2048,
            )
            .await
            .unwrap();
        }

        let generator = MockGenerator::new();
        let publisher = MockPublisher::new(fail_for_config);
        let executor = Executor::new(
            repo.clone(),
            generator.clone(),
            publisher.clone(),
            5,
            tokyo(),
        );

        Ctx {
            repo,
            generator,
            publisher,
            executor,
        }
    }

    async fn seed_schedule(
        repo: &Repo,
        name: &str,
        time: &str,
        keywords: Vec<&str>,
    ) -> (wordpress_configs::Model, schedule_settings::Model) {
        let site = repo
            .insert_wordpress_config(
                name.to_string(),
                "https://blog.example.com".to_string(),
                "admin".to_string(),
                "abcd efgh".to_string(),
                "technology".to_string(),
            )
            .await
            .unwrap();

        let schedule = repo
            .insert_schedule(
                site.id,
                true,
                Frequency::Daily,
                time.to_string(),
                Keywords::from(keywords),
                PublishStatus::Publish,
            )
            .await
            .unwrap();

        (site, schedule)
    }

    #[tokio::test]
    async fn test_due_schedule_runs_end_to_end() {
        let ctx = setup(None, true).await;
        let (_, schedule) = seed_schedule(&ctx.repo, "Blog", "09:00", vec!["rust", "tokio"]).await;

        let report = ctx.executor.run_at(at_tokyo(9, 2), false).await.unwrap();

        assert!(report.success);
        assert_eq!(report.executed, 1);
        assert_eq!(report.results.len(), 1);

        let outcome = &report.results[0];
        assert!(outcome.success);
        let keyword = outcome.keyword.clone().unwrap();
        assert!(["rust", "tokio"].contains(&keyword.as_str()));
        assert_eq!(outcome.post_id.as_deref(), Some("101"));

        assert_eq!(ctx.generator.calls.load(Ordering::SeqCst), 1);
        assert_eq!(ctx.publisher.calls.load(Ordering::SeqCst), 1);

        // Exactly one success row, carrying the chosen keyword
        let history = ctx.repo.history_for_schedule(schedule.id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].status, ExecutionStatus::Success);
        assert_eq!(history[0].keyword_used.as_deref(), Some(keyword.as_str()));
        assert_eq!(history[0].wordpress_post_id.as_deref(), Some("101"));

        // The stored article moved to published
        let articles = ctx.repo.list_articles(10).await.unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].status, ArticleStatus::Published);
        assert_eq!(articles[0].wordpress_post_id.as_deref(), Some("101"));
        assert!(articles[0].reading_time >= 1);
    }

    #[tokio::test]
    async fn test_outside_window_is_skipped() {
        let ctx = setup(None, true).await;
        seed_schedule(&ctx.repo, "Blog", "09:00", vec!["rust"]).await;

        let report = ctx.executor.run_at(at_tokyo(15, 0), false).await.unwrap();

        assert_eq!(report.executed, 0);
        assert!(report.results.is_empty());
        assert_eq!(ctx.generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_force_execute_bypasses_window() {
        let ctx = setup(None, true).await;
        seed_schedule(&ctx.repo, "Blog", "09:00", vec!["rust"]).await;

        let report = ctx.executor.run_at(at_tokyo(15, 0), true).await.unwrap();

        assert_eq!(report.executed, 1);
        assert_eq!(ctx.publisher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_second_invocation_in_same_window_is_gated() {
        let ctx = setup(None, true).await;
        seed_schedule(&ctx.repo, "Blog", "09:00", vec!["rust", "tokio"]).await;

        let first = ctx.executor.run_at(at_tokyo(9, 0), false).await.unwrap();
        assert_eq!(first.executed, 1);

        // Two minutes later, still in the window: frequency gate blocks
        let second = ctx.executor.run_at(at_tokyo(9, 2), false).await.unwrap();
        assert_eq!(second.executed, 0);
        assert!(second.results.is_empty());
        assert_eq!(ctx.generator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_publish_failure_does_not_abort_other_schedules() {
        let ctx = setup(None, true).await;
        let (failing_site, failing_schedule) =
            seed_schedule(&ctx.repo, "Failing", "09:00", vec!["rust"]).await;
        let (_, ok_schedule) = seed_schedule(&ctx.repo, "Healthy", "09:00", vec!["tokio"]).await;

        // Recreate the publisher to fail only for the first site
        let publisher = MockPublisher::new(Some(failing_site.id));
        let executor = Executor::new(
            ctx.repo.clone(),
            ctx.generator.clone(),
            publisher.clone(),
            5,
            tokyo(),
        );

        let report = executor.run_at(at_tokyo(9, 2), false).await.unwrap();

        assert_eq!(report.results.len(), 2);
        assert_eq!(report.executed, 1);

        let failed = &report.results[0];
        assert_eq!(failed.schedule_id, failing_schedule.id);
        assert!(!failed.success);
        assert!(failed.error.as_deref().unwrap().contains("500"));

        let succeeded = &report.results[1];
        assert_eq!(succeeded.schedule_id, ok_schedule.id);
        assert!(succeeded.success);

        // Both attempts were recorded
        let failed_history = ctx
            .repo
            .history_for_schedule(failing_schedule.id)
            .await
            .unwrap();
        assert_eq!(failed_history.len(), 1);
        assert_eq!(failed_history[0].status, ExecutionStatus::Error);
        assert_eq!(failed_history[0].keyword_used.as_deref(), Some("rust"));

        let ok_history = ctx.repo.history_for_schedule(ok_schedule.id).await.unwrap();
        assert_eq!(ok_history.len(), 1);
        assert_eq!(ok_history[0].status, ExecutionStatus::Success);

        // The failed article is kept for manual retry
        let articles = ctx.repo.list_articles(10).await.unwrap();
        let failed_article = articles
            .iter()
            .find(|a| a.wordpress_config_id == Some(failing_site.id))
            .unwrap();
        assert_eq!(failed_article.status, ArticleStatus::Failed);
        assert!(failed_article.wordpress_post_id.is_none());
    }

    #[tokio::test]
    async fn test_empty_keyword_pool_is_recorded_as_error() {
        let ctx = setup(None, true).await;
        let (_, schedule) = seed_schedule(&ctx.repo, "Blog", "09:00", vec![]).await;

        let report = ctx.executor.run_at(at_tokyo(9, 0), false).await.unwrap();

        assert_eq!(report.executed, 0);
        assert_eq!(report.results.len(), 1);
        assert!(!report.results[0].success);
        assert!(report.results[0]
            .error
            .as_deref()
            .unwrap()
            .contains("keywords"));

        let history = ctx.repo.history_for_schedule(schedule.id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].status, ExecutionStatus::Error);
        assert!(history[0].keyword_used.is_none());
    }

    #[tokio::test]
    async fn test_invalid_schedule_time_is_recorded_as_error() {
        let ctx = setup(None, true).await;
        seed_schedule(&ctx.repo, "Blog", "25:99", vec!["rust"]).await;

        let report = ctx.executor.run_at(at_tokyo(9, 0), false).await.unwrap();

        assert_eq!(report.results.len(), 1);
        assert!(!report.results[0].success);
        assert!(report.results[0]
            .error
            .as_deref()
            .unwrap()
            .contains("Invalid schedule time"));
    }

    #[tokio::test]
    async fn test_missing_ai_config_fails_whole_invocation() {
        let ctx = setup(None, false).await;
        seed_schedule(&ctx.repo, "Blog", "09:00", vec!["rust"]).await;

        let result = ctx.executor.run_at(at_tokyo(9, 0), false).await;
        assert!(matches!(result, Err(AppError::NoActiveAiConfig)));
        assert_eq!(ctx.generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_rotation_avoids_used_keyword() {
        let ctx = setup(None, true).await;
        let (site, schedule) =
            seed_schedule(&ctx.repo, "Blog", "09:00", vec!["rust", "tokio"]).await;

        // "rust" was consumed two days ago
        ctx.repo
            .append_history(NewExecutionRecord {
                schedule_id: schedule.id,
                wordpress_config_id: site.id,
                executed_at: at_tokyo(9, 0) - chrono::Duration::hours(48),
                keyword_used: Some("rust".to_string()),
                article_title: Some("Old article".to_string()),
                wordpress_post_id: Some("55".to_string()),
                status: ExecutionStatus::Success,
            })
            .await
            .unwrap();

        let report = ctx.executor.run_at(at_tokyo(9, 0), false).await.unwrap();

        assert_eq!(report.executed, 1);
        assert_eq!(report.results[0].keyword.as_deref(), Some("tokio"));
    }
}
