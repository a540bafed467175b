use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("No active AI configuration found")]
    NoActiveAiConfig,

    #[error("WordPress config {0} not found")]
    WordPressConfigNotFound(i32),

    #[error("No target keywords configured")]
    NoKeywordsConfigured,

    #[error("Invalid schedule time {0:?}, expected HH:MM")]
    InvalidScheduleTime(String),

    #[error("Article generation failed: {0}")]
    Generation(#[from] llm_client::Error),

    #[error("Publish failed: {0}")]
    Publish(#[from] wordpress_client::Error),

    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

pub type AppResult<T> = std::result::Result<T, AppError>;
