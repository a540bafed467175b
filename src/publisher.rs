//! WordPress publish adapter.

use async_trait::async_trait;
use wordpress_client::{NewPost, SeoMeta};

use crate::db::entities::{articles, wordpress_configs};
use crate::db::types::PublishStatus;
use crate::error::AppResult;
use crate::scheduler::{PublishedPost, Publisher};

/// Production [`Publisher`]: resolves the site's configured category and
/// creates the post over the WordPress REST API. No retries; a failed
/// publish is reported to the orchestrator and the article stays stored.
pub struct WordPressPublisher {
    http: reqwest::Client,
}

impl WordPressPublisher {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Publisher for WordPressPublisher {
    async fn publish(
        &self,
        site: &wordpress_configs::Model,
        article: &articles::Model,
        status: PublishStatus,
    ) -> AppResult<PublishedPost> {
        let client = wordpress_client::Client::new(
            self.http.clone(),
            &site.url,
            &site.username,
            &site.application_password,
        )?;

        // Unresolvable categories fall through to the site's default
        let categories = client.resolve_category_ids(&site.category).await;

        let post = NewPost {
            title: article.title.clone(),
            content: article.content.clone(),
            excerpt: article.excerpt.clone(),
            status: status.as_str().to_string(),
            categories,
            meta: SeoMeta {
                focus_keyword: article.keywords.join(", "),
                meta_description: article.excerpt.clone(),
                seo_title: article.title.clone(),
            },
        };

        let created = client.create_post(&post).await?;

        tracing::info!(
            site = %site.name,
            post_id = created.id,
            status = status.as_str(),
            "created WordPress post"
        );

        Ok(PublishedPost {
            post_id: created.id.to_string(),
            link: created.link,
        })
    }
}
