use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Todos::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Todos::Id).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Todos::Uuid).string().not_null().unique_key())
                    .col(ColumnDef::new(Todos::Title).text().not_null())
                    .col(ColumnDef::new(Todos::Description).text().not_null())
                    .col(ColumnDef::new(Todos::Completed).boolean().not_null().default(false))
                    .col(ColumnDef::new(Todos::FilePath).text())
                    .col(ColumnDef::new(Todos::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Todos::UpdatedAt).timestamp_with_time_zone().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Todos::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Todos {
    Table,
    Id,
    Uuid,
    Title,
    Description,
    Completed,
    FilePath,
    CreatedAt,
    UpdatedAt,
}
