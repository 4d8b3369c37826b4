use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250301_000000_create_reference_tables::{Categorias, Proveedores};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Productos::Table)
                    .if_not_exists()
                    .col(pk_auto(Productos::Id))
                    .col(string(Productos::Nombre))
                    .col(text_null(Productos::Descripcion))
                    .col(decimal(Productos::Precio))
                    .col(integer(Productos::CategoriaId))
                    .col(integer(Productos::ProveedorId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_productos_categoria_id")
                            .from(Productos::Table, Productos::CategoriaId)
                            .to(Categorias::Table, Categorias::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_productos_proveedor_id")
                            .from(Productos::Table, Productos::ProveedorId)
                            .to(Proveedores::Table, Proveedores::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Reject blank names at the store as well as in request validation
        manager
            .get_connection()
            .execute_unprepared(
                "ALTER TABLE productos ADD CONSTRAINT productos_nombre_not_empty CHECK (char_length(nombre) > 0)",
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_productos_categoria_id")
                    .table(Productos::Table)
                    .col(Productos::CategoriaId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_productos_proveedor_id")
                    .table(Productos::Table)
                    .col(Productos::ProveedorId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_productos_precio")
                    .table(Productos::Table)
                    .col(Productos::Precio)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Productos::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Productos {
    Table,
    Id,
    Nombre,
    Descripcion,
    Precio,
    CategoriaId,
    ProveedorId,
}
