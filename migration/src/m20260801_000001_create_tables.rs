use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create wordpress_configs table
        manager
            .create_table(
                Table::create()
                    .table(WordpressConfigs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WordpressConfigs::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(WordpressConfigs::Name).string().not_null())
                    .col(ColumnDef::new(WordpressConfigs::Url).string().not_null())
                    .col(
                        ColumnDef::new(WordpressConfigs::Username)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WordpressConfigs::ApplicationPassword)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WordpressConfigs::Category)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(WordpressConfigs::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(WordpressConfigs::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create ai_configs table
        manager
            .create_table(
                Table::create()
                    .table(AiConfigs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AiConfigs::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AiConfigs::Provider).string().not_null())
                    .col(ColumnDef::new(AiConfigs::ApiKey).string().not_null())
                    .col(ColumnDef::new(AiConfigs::Model).string().not_null())
                    .col(
                        ColumnDef::new(AiConfigs::Temperature)
                            .float()
                            .not_null()
                            .default(0.7),
                    )
                    .col(
                        ColumnDef::new(AiConfigs::MaxTokens)
                            .integer()
                            .not_null()
                            .default(2048),
                    )
                    .col(
                        ColumnDef::new(AiConfigs::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // The active config is resolved by recency
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_ai_configs_created_at")
                    .table(AiConfigs::Table)
                    .col(AiConfigs::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Create schedule_settings table
        manager
            .create_table(
                Table::create()
                    .table(ScheduleSettings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ScheduleSettings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ScheduleSettings::WordpressConfigId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ScheduleSettings::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(ScheduleSettings::Frequency)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ScheduleSettings::Time).string().not_null())
                    .col(
                        ColumnDef::new(ScheduleSettings::TargetKeywords)
                            .json()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ScheduleSettings::PublishStatus)
                            .string()
                            .not_null()
                            .default("draft"),
                    )
                    .col(
                        ColumnDef::new(ScheduleSettings::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_schedule_settings_wordpress_config")
                            .from(ScheduleSettings::Table, ScheduleSettings::WordpressConfigId)
                            .to(WordpressConfigs::Table, WordpressConfigs::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create execution_history table (append-only)
        manager
            .create_table(
                Table::create()
                    .table(ExecutionHistory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ExecutionHistory::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ExecutionHistory::ScheduleId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ExecutionHistory::WordpressConfigId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ExecutionHistory::ExecutedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ExecutionHistory::KeywordUsed).string())
                    .col(ColumnDef::new(ExecutionHistory::ArticleTitle).string())
                    .col(ColumnDef::new(ExecutionHistory::WordpressPostId).string())
                    .col(ColumnDef::new(ExecutionHistory::Status).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_execution_history_schedule")
                            .from(ExecutionHistory::Table, ExecutionHistory::ScheduleId)
                            .to(ScheduleSettings::Table, ScheduleSettings::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index for last-execution and used-keyword lookups
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_execution_history_schedule_executed_at")
                    .table(ExecutionHistory::Table)
                    .col(ExecutionHistory::ScheduleId)
                    .col(ExecutionHistory::ExecutedAt)
                    .to_owned(),
            )
            .await?;

        // Create articles table
        manager
            .create_table(
                Table::create()
                    .table(Articles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Articles::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Articles::Title).string().not_null())
                    .col(ColumnDef::new(Articles::Content).text().not_null())
                    .col(ColumnDef::new(Articles::Excerpt).text().not_null())
                    .col(ColumnDef::new(Articles::Keywords).json().not_null())
                    .col(
                        ColumnDef::new(Articles::Category)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Articles::Status).string().not_null())
                    .col(
                        ColumnDef::new(Articles::SeoScore)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Articles::ReadingTime)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(ColumnDef::new(Articles::WordpressConfigId).integer())
                    .col(ColumnDef::new(Articles::WordpressPostId).string())
                    .col(
                        ColumnDef::new(Articles::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Articles::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Articles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ExecutionHistory::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ScheduleSettings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AiConfigs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(WordpressConfigs::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum WordpressConfigs {
    Table,
    Id,
    Name,
    Url,
    Username,
    ApplicationPassword,
    Category,
    IsActive,
    CreatedAt,
}

#[derive(DeriveIden)]
enum AiConfigs {
    Table,
    Id,
    Provider,
    ApiKey,
    Model,
    Temperature,
    MaxTokens,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ScheduleSettings {
    Table,
    Id,
    WordpressConfigId,
    IsActive,
    Frequency,
    Time,
    TargetKeywords,
    PublishStatus,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ExecutionHistory {
    Table,
    Id,
    ScheduleId,
    WordpressConfigId,
    ExecutedAt,
    KeywordUsed,
    ArticleTitle,
    WordpressPostId,
    Status,
}

#[derive(DeriveIden)]
enum Articles {
    Table,
    Id,
    Title,
    Content,
    Excerpt,
    Keywords,
    Category,
    Status,
    SeoScore,
    ReadingTime,
    WordpressConfigId,
    WordpressPostId,
    CreatedAt,
    UpdatedAt,
}
