//! Scheduling and execution.
//!
//! `due` and `keywords` are pure decision functions; `executor` drives the
//! per-invocation pipeline. The `Generator` and `Publisher` traits are the
//! seams to the LLM and WordPress adapters, kept as trait objects so the
//! orchestration logic is testable without the network.

pub mod due;
pub mod executor;
pub mod keywords;

use async_trait::async_trait;

use crate::db::entities::{ai_configs, articles, wordpress_configs};
use crate::db::types::PublishStatus;
use crate::error::AppResult;
use crate::generation::GeneratedArticle;

pub use executor::{Executor, InvocationReport, ScheduleOutcome};

/// Produces an article for a keyword using the active AI config.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, ai: &ai_configs::Model, keyword: &str) -> AppResult<GeneratedArticle>;
}

/// Pushes a stored article to a WordPress site.
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(
        &self,
        site: &wordpress_configs::Model,
        article: &articles::Model,
        status: PublishStatus,
    ) -> AppResult<PublishedPost>;
}

/// Result of a successful publish.
#[derive(Debug, Clone)]
pub struct PublishedPost {
    pub post_id: String,
    pub link: Option<String>,
}
