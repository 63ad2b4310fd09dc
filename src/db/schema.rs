//! Table creation from the SeaORM entities.

use sea_orm::{ConnectionTrait, DbErr, EntityTrait, Schema};

use crate::entities::prelude::*;

/// Create the departments, employees and customers tables if they are missing.
///
/// Departments come first because employees reference them.
pub async fn create_schema<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    let schema = Schema::new(db.get_database_backend());

    create_table(db, &schema, Departments).await?;
    create_table(db, &schema, Employees).await?;
    create_table(db, &schema, Customers).await?;

    tracing::info!("Database schema ready");
    Ok(())
}

async fn create_table<C, E>(db: &C, schema: &Schema, entity: E) -> Result<(), DbErr>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(db.get_database_backend().build(&statement)).await?;
    Ok(())
}
