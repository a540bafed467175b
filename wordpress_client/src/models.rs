use serde::{Deserialize, Serialize};

/// A category as returned by `/wp-json/wp/v2/categories`.
#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    pub id: u64,
    pub name: String,
    pub slug: String,
}

/// Rendered field wrapper used throughout the WordPress REST API.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Rendered {
    #[serde(default)]
    pub rendered: String,
}

/// A post summary as returned by `/wp-json/wp/v2/posts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub title: Rendered,
}

/// SEO plugin metadata, sent best-effort inside the post `meta` object.
/// Sites without the plugin ignore unknown meta keys.
#[derive(Debug, Clone, Serialize)]
pub struct SeoMeta {
    #[serde(rename = "yoast_wpseo_focuskw")]
    pub focus_keyword: String,
    #[serde(rename = "yoast_wpseo_metadesc")]
    pub meta_description: String,
    #[serde(rename = "yoast_wpseo_title")]
    pub seo_title: String,
}

/// Payload for `POST /wp-json/wp/v2/posts`.
#[derive(Debug, Clone, Serialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub excerpt: String,
    /// "publish" or "draft"
    pub status: String,
    /// Resolved category ids; omitted entirely when empty so the site
    /// applies its own default category.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<u64>,
    pub meta: SeoMeta,
}

/// Fields read back from a successful post creation (HTTP 201).
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedPost {
    pub id: u64,
    #[serde(default)]
    pub link: Option<String>,
}
