//! Shared test utilities for `Tallybook`.
//!
//! This module provides common helper functions for setting up test databases
//! and building transaction inputs with sensible defaults.

use crate::core::transaction::NewTransaction;
use crate::errors::Result;
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Builds a deposit input with no category, details, or explicit date.
#[must_use]
pub fn deposit_input(amount: Decimal, currency: &str) -> NewTransaction {
    NewTransaction {
        amount,
        currency: currency.to_string(),
        direction: "deposit".to_string(),
        category: None,
        details: None,
        date: None,
    }
}

/// Builds a withdraw input with no category, details, or explicit date.
#[must_use]
pub fn withdraw_input(amount: Decimal, currency: &str) -> NewTransaction {
    NewTransaction {
        amount,
        currency: currency.to_string(),
        direction: "withdraw".to_string(),
        category: None,
        details: None,
        date: None,
    }
}
