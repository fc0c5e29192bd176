//! Transaction entity - Represents a single ledger entry.
//!
//! Each transaction belongs to exactly one owner and carries a strictly positive
//! amount; the sign of its effect on the balance is encoded by `direction`
//! (`"deposit"` or `"withdraw"`, stored canonically in lowercase), never by a
//! negative amount.

use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Transaction database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    /// Unique identifier for the transaction
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owner of the transaction; every query is scoped by this field
    pub owner: String,
    /// Calendar date the transaction applies to
    pub date: Date,
    /// Transaction amount, always strictly positive
    pub amount: Decimal,
    /// Three-letter currency code, uppercase
    pub currency: String,
    /// Canonical direction: `"deposit"` or `"withdraw"`
    pub direction: String,
    /// Optional free-text description
    pub details: Option<String>,
    /// Optional free-text category (e.g. `"Wishes"` for fulfilled wishlist items)
    pub category: Option<String>,
    /// When the transaction row was created; immutable after insert
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Transaction and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// A fulfilled wishlist item links back to the transaction it synthesized
    #[sea_orm(has_many = "super::wishlist_item::Entity")]
    WishlistItems,
}

impl Related<super::wishlist_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WishlistItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
