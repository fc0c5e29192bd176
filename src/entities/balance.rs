//! Balance entity - The running per-currency total for one owner.
//!
//! One row exists per (owner, currency) pair, created lazily by the first
//! transaction in that currency and never deleted; deleting every transaction
//! leaves a balance of zero. The invariant maintained by the core is
//! `total == sum(amount if deposit else -amount)` over the owner's transactions
//! in that currency.

use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Balance database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "balances")]
pub struct Model {
    /// Unique identifier for the balance row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owner of the balance; unique together with `currency`
    pub owner: String,
    /// Three-letter currency code, uppercase
    pub currency: String,
    /// Running total; updated only through the balance mutator
    pub total: Decimal,
    /// When the total was last changed
    pub updated_at: DateTimeUtc,
}

/// Balances have no entity relationships; they are addressed by (owner, currency)
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
