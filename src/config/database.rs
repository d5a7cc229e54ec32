//! Database configuration module for `FieldMate`.
//!
//! This module handles `SQLite` database connection and table creation using
//! `SeaORM`. Tables are generated from the entity definitions via
//! `Schema::create_table_from_entity`, so the database schema always matches
//! the Rust struct definitions without manual SQL.

use crate::entities::{
    EmployeeProfile, ExpenseClaim, ExpenseItem, LeaveRequest, LocationDistance, LocationOverride,
    MonthlyTarget, SalesOrder, SystemSetting, VisitReport,
};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Gets the database URL from environment variable or returns default `SQLite` path.
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://data/fieldmate.sqlite".to_string())
}

/// Establishes a connection to the `SQLite` database using the `DATABASE_URL`
/// environment variable, falling back to a default local `SQLite` file.
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url()).await.map_err(Into::into)
}

/// Creates all necessary database tables using `SeaORM`'s schema generation
/// from entity definitions.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    db.execute(builder.build(&schema.create_table_from_entity(VisitReport)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(LeaveRequest)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(ExpenseClaim)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(ExpenseItem)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(SalesOrder)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(EmployeeProfile)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(LocationDistance)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(LocationOverride)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(MonthlyTarget)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(SystemSetting)))
        .await?;

    Ok(())
}
