use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AuthTokens::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AuthTokens::Provider)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AuthTokens::AccessToken).string().not_null())
                    .col(ColumnDef::new(AuthTokens::UpdatedAt).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(WorkDetails::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WorkDetails::WorkAnnictId)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(WorkDetails::CustomStartedAt).string())
                    .col(ColumnDef::new(WorkDetails::Note).string())
                    .col(ColumnDef::new(WorkDetails::UpdatedAt).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CachedImages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CachedImages::WorkAnnictId)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CachedImages::ImageUrl).string().not_null())
                    .col(ColumnDef::new(CachedImages::FetchedAt).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FilterPrefs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FilterPrefs::Id)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FilterPrefs::StateJson).text().not_null())
                    .col(ColumnDef::new(FilterPrefs::UpdatedAt).string().not_null())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FilterPrefs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CachedImages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(WorkDetails::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AuthTokens::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AuthTokens {
    Table,
    Provider,
    AccessToken,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum WorkDetails {
    Table,
    WorkAnnictId,
    CustomStartedAt,
    Note,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum CachedImages {
    Table,
    WorkAnnictId,
    ImageUrl,
    FetchedAt,
}

#[derive(DeriveIden)]
enum FilterPrefs {
    Table,
    Id,
    StateJson,
    UpdatedAt,
}
