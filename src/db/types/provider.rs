use core::fmt;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Supported LLM backends. Closed set; an unknown value in the store fails
/// at row decode instead of reaching the dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[sea_orm(string_value = "openai")]
    OpenAi,
    #[sea_orm(string_value = "gemini")]
    Gemini,
    #[sea_orm(string_value = "claude")]
    Claude,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Gemini => "gemini",
            Provider::Claude => "claude",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
