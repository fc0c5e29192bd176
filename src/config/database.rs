//! Database configuration module for `Tallybook`.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! It provides functions for establishing database connections and creating all necessary tables
//! based on the entity definitions. The module uses `SeaORM`'s `Schema::create_table_from_entity`
//! method to automatically generate SQL statements from the entity models, ensuring that the
//! database schema matches the Rust struct definitions without requiring manual SQL.

use crate::entities::{Balance, BalanceColumn, ScheduledTransaction, Transaction, WishlistItem};
use crate::errors::Result;
use sea_orm::sea_query::Index;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Gets the database URL from environment variable or returns default `SQLite` path.
///
/// This function looks for `DATABASE_URL` in the environment and falls back to
/// a default local `SQLite` file if not found.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://data/tallybook.sqlite".to_string())
}

/// Establishes a connection to the `SQLite` database using the `DATABASE_URL` environment variable.
///
/// Falls back to a default local `SQLite` file if no environment variable is set.
/// This function handles connection errors and provides a clean interface for database access
/// throughout the application.
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url()).await.map_err(Into::into)
}

/// Creates all necessary database tables using `SeaORM`'s schema generation from entity definitions.
///
/// This function uses the `DeriveEntityModel` macros to automatically generate proper SQL
/// statements for table creation, ensuring the database schema matches the Rust struct definitions.
/// It creates tables for transactions, balances, scheduled transactions, and wishlist items, plus
/// the unique (owner, currency) index that backs the one-balance-per-currency rule.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    // Use SeaORM's proper table creation using Schema::create_table_from_entity
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    // Create tables using SeaORM's schema generation
    let mut transaction_table = schema.create_table_from_entity(Transaction);
    transaction_table.if_not_exists();
    let mut balance_table = schema.create_table_from_entity(Balance);
    balance_table.if_not_exists();
    let mut scheduled_table = schema.create_table_from_entity(ScheduledTransaction);
    scheduled_table.if_not_exists();
    let mut wishlist_table = schema.create_table_from_entity(WishlistItem);
    wishlist_table.if_not_exists();

    db.execute(builder.build(&transaction_table)).await?;
    db.execute(builder.build(&balance_table)).await?;
    db.execute(builder.build(&scheduled_table)).await?;
    db.execute(builder.build(&wishlist_table)).await?;

    // One balance row per owner and currency; the mutator relies on this
    let balance_index = Index::create()
        .name("idx_balances_owner_currency")
        .table(Balance)
        .col(BalanceColumn::Owner)
        .col(BalanceColumn::Currency)
        .unique()
        .if_not_exists()
        .to_owned();
    db.execute(builder.build(&balance_index)).await?;

    Ok(())
}
