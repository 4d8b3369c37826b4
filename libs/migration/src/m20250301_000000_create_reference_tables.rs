use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Categorias::Table)
                    .if_not_exists()
                    .col(pk_auto(Categorias::Id))
                    .col(string(Categorias::Nombre))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Proveedores::Table)
                    .if_not_exists()
                    .col(pk_auto(Proveedores::Id))
                    .col(string(Proveedores::Nombre))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Proveedores::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Categorias::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub(crate) enum Categorias {
    Table,
    Id,
    Nombre,
}

#[derive(DeriveIden)]
pub(crate) enum Proveedores {
    Table,
    Id,
    Nombre,
}
