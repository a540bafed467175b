use crate::error::{Error, Result};
use crate::models::*;
use url::Url;

/// Slug tried when the configured category cannot be resolved.
const FALLBACK_CATEGORY_SLUG: &str = "uncategorized";

/// Client for one WordPress site.
///
/// Every request carries HTTP Basic auth built from the username and an
/// application password.
#[derive(Debug)]
pub struct Client {
    http: reqwest::Client,
    base: Url,
    username: String,
    application_password: String,
}

impl Client {
    pub fn new(
        http: reqwest::Client,
        base_url: &str,
        username: &str,
        application_password: &str,
    ) -> Result<Self> {
        let base = Url::parse(base_url).map_err(|_| Error::InvalidUrl(base_url.to_string()))?;

        Ok(Self {
            http,
            base,
            username: username.to_string(),
            application_password: application_password.to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/wp-json/wp/v2/{}",
            self.base.as_str().trim_end_matches('/'),
            path
        )
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let response = self
            .http
            .get(self.endpoint(path))
            .basic_auth(&self.username, Some(&self.application_password))
            .query(query)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        let value: T = serde_json::from_str(&text)?;
        Ok(value)
    }

    /// Exact slug lookup; the categories endpoint returns a list even for
    /// slug filters, so take the first entry.
    pub async fn category_by_slug(&self, slug: &str) -> Result<Option<Category>> {
        let categories: Vec<Category> = self.get_json("categories", &[("slug", slug)]).await?;
        Ok(categories.into_iter().next())
    }

    /// Free-text category search.
    pub async fn search_categories(&self, term: &str) -> Result<Vec<Category>> {
        self.get_json("categories", &[("search", term)]).await
    }

    /// Resolve a human-entered category string (slug or display name) to
    /// existing category ids. Never creates categories.
    ///
    /// Resolution order: slug lookup, free-text search (preferring an exact
    /// case-insensitive name match), then the literal "uncategorized" slug.
    /// Lookup failures degrade to the next step; an empty result means the
    /// post is created without a category filter and the site applies its
    /// own default.
    pub async fn resolve_category_ids(&self, category: &str) -> Vec<u64> {
        let category = category.trim();
        if category.is_empty() {
            return Vec::new();
        }

        match self.category_by_slug(category).await {
            Ok(Some(found)) => return vec![found.id],
            Ok(None) => {}
            Err(e) => tracing::warn!("category slug lookup failed: {}", e),
        }

        match self.search_categories(category).await {
            Ok(results) => {
                if let Some(id) = pick_from_search(&results, category) {
                    return vec![id];
                }
            }
            Err(e) => tracing::warn!("category search failed: {}", e),
        }

        match self.category_by_slug(FALLBACK_CATEGORY_SLUG).await {
            Ok(Some(found)) => vec![found.id],
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("fallback category lookup failed: {}", e);
                Vec::new()
            }
        }
    }

    /// Create a post. The REST API answers 201 with the stored post.
    pub async fn create_post(&self, post: &NewPost) -> Result<CreatedPost> {
        let response = self
            .http
            .post(self.endpoint("posts"))
            .basic_auth(&self.username, Some(&self.application_password))
            .json(post)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        let created: CreatedPost = serde_json::from_str(&text)?;
        Ok(created)
    }

    /// List the site's most recent posts.
    pub async fn list_posts(&self, per_page: u32) -> Result<Vec<Post>> {
        let per_page = per_page.to_string();
        self.get_json("posts", &[("per_page", per_page.as_str())])
            .await
    }

    /// Delete a post, bypassing the trash.
    pub async fn delete_post(&self, post_id: u64) -> Result<()> {
        let response = self
            .http
            .delete(self.endpoint(&format!("posts/{}", post_id)))
            .basic_auth(&self.username, Some(&self.application_password))
            .query(&[("force", "true")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

/// Pick a category id from search results: an exact case-insensitive name
/// match wins, otherwise the first result.
fn pick_from_search(results: &[Category], requested: &str) -> Option<u64> {
    let requested_lower = requested.to_lowercase();
    results
        .iter()
        .find(|c| c.name.to_lowercase() == requested_lower)
        .or_else(|| results.first())
        .map(|c| c.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: u64, name: &str, slug: &str) -> Category {
        Category {
            id,
            name: name.to_string(),
            slug: slug.to_string(),
        }
    }

    #[test]
    fn test_pick_from_search_prefers_exact_name_match() {
        let results = vec![
            category(10, "Technology News", "technology-news"),
            category(11, "Technology", "technology"),
        ];
        assert_eq!(pick_from_search(&results, "technology"), Some(11));
    }

    #[test]
    fn test_pick_from_search_name_match_is_case_insensitive() {
        let results = vec![category(5, "Marketing", "marketing")];
        assert_eq!(pick_from_search(&results, "MARKETING"), Some(5));
    }

    #[test]
    fn test_pick_from_search_falls_back_to_first_result() {
        let results = vec![
            category(3, "SEO Basics", "seo-basics"),
            category(4, "SEO Advanced", "seo-advanced"),
        ];
        assert_eq!(pick_from_search(&results, "seo"), Some(3));
    }

    #[test]
    fn test_pick_from_search_empty_results() {
        assert_eq!(pick_from_search(&[], "anything"), None);
    }

    #[test]
    fn test_endpoint_joins_base_with_and_without_trailing_slash() {
        let http = reqwest::Client::new();
        let a = Client::new(http.clone(), "https://blog.example.com", "u", "p").unwrap();
        let b = Client::new(http, "https://blog.example.com/", "u", "p").unwrap();
        assert_eq!(a.endpoint("posts"), "https://blog.example.com/wp-json/wp/v2/posts");
        assert_eq!(b.endpoint("posts"), "https://blog.example.com/wp-json/wp/v2/posts");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let err = Client::new(reqwest::Client::new(), "not a url", "u", "p").unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }
}
