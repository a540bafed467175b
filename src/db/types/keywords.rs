use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};

/// Ordered keyword pool, stored as a JSON array column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct Keywords(pub Vec<String>);

impl Deref for Keywords {
    type Target = Vec<String>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Keywords {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Vec<String>> for Keywords {
    fn from(keywords: Vec<String>) -> Self {
        Keywords(keywords)
    }
}

impl From<Vec<&str>> for Keywords {
    fn from(keywords: Vec<&str>) -> Self {
        Keywords(keywords.into_iter().map(str::to_string).collect())
    }
}
