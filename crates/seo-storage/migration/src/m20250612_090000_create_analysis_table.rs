use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Analysis::Table)
                    .if_not_exists()
                    .col(string(Analysis::Key).primary_key())
                    .col(json(Analysis::Payload))
                    .col(
                        ColumnDef::new(Analysis::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Analysis::Table).to_owned())
            .await
    }
}

/// Cached responses keyed by domain or URL.
#[derive(DeriveIden)]
pub enum Analysis {
    Table,
    Key,
    Payload,
    CreatedAt,
}
