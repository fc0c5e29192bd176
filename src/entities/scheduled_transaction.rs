//! Scheduled transaction entity - A monthly recurring transaction template.
//!
//! Each template synthesizes one transaction per elapsed calendar month when the
//! replay engine runs. `last_applied` is the watermark: the date of the most
//! recently synthesized occurrence, used to resume replay without duplicating
//! months.

use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Scheduled transaction template database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "scheduled_transactions")]
pub struct Model {
    /// Unique identifier for the template
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owner of the template; every query is scoped by this field
    pub owner: String,
    /// Day of month (1-31) the occurrence falls on, clamped to the month length
    pub day_of_month: i32,
    /// Amount of each synthesized transaction, always strictly positive
    pub amount: Decimal,
    /// Three-letter currency code, uppercase
    pub currency: String,
    /// Canonical direction: `"deposit"` or `"withdraw"`
    pub direction: String,
    /// Optional free-text description copied onto each occurrence
    pub details: Option<String>,
    /// Optional free-text category copied onto each occurrence
    pub category: Option<String>,
    /// Whether the replay engine processes this template
    pub active: bool,
    /// Watermark: date of the most recently synthesized occurrence, if any
    pub last_applied: Option<Date>,
    /// When the template row was created
    pub created_at: DateTimeUtc,
}

/// Templates have no entity relationships; occurrences are ordinary transactions
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
