//! WordPress REST API client.
//!
//! Covers the small surface this service needs: creating posts, listing and
//! deleting posts, and resolving a human-entered category string to numeric
//! category ids without ever creating categories. All requests authenticate
//! with HTTP Basic auth using an application password.

mod client;
mod error;
mod models;

pub use client::Client;
pub use error::{Error, Result};
pub use models::{Category, CreatedPost, NewPost, Post, SeoMeta};
