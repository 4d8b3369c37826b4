use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(
            r#"
            INSERT INTO categorias (id, nombre)
            VALUES
                (1, 'General'),
                (2, 'Perifericos')
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .await?;

        db.execute_unprepared(
            r#"
            INSERT INTO proveedores (id, nombre)
            VALUES
                (1, 'Distribuidora Central'),
                (2, 'Importadora del Norte')
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .await?;

        // Explicit ids above bypass the serial sequences
        db.execute_unprepared(
            "SELECT setval(pg_get_serial_sequence('categorias', 'id'), (SELECT MAX(id) FROM categorias))",
        )
        .await?;

        db.execute_unprepared(
            "SELECT setval(pg_get_serial_sequence('proveedores', 'id'), (SELECT MAX(id) FROM proveedores))",
        )
        .await?;

        Ok(())
    }

    // Seeded rows are dropped together with their tables
    async fn down(&self, _manager: &SchemaManager) -> Result<(), DbErr> {
        Ok(())
    }
}
