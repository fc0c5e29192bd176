//! Wishlist item entity - A planned purchase that can be fulfilled.
//!
//! `purchased` and `transaction_id` move together: fulfilling a wish creates a
//! withdraw transaction and stores its id here, un-fulfilling deletes that
//! transaction and clears the link. The invariant is
//! `purchased == transaction_id.is_some()`.

use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Wishlist item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "wishlist_items")]
pub struct Model {
    /// Unique identifier for the wishlist item
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owner of the item; every query is scoped by this field
    pub owner: String,
    /// Price of the wished item, always strictly positive
    pub price: Decimal,
    /// Three-letter currency code, uppercase
    pub currency: String,
    /// Optional free-text description, copied onto the synthesized transaction
    pub details: Option<String>,
    /// Optional link to the item online
    pub link: Option<String>,
    /// Year the purchase is planned for
    pub year: i32,
    /// Whether the wish has been fulfilled
    pub purchased: bool,
    /// Id of the synthesized transaction; present iff `purchased`
    pub transaction_id: Option<i64>,
    /// When the item row was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between WishlistItem and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The transaction synthesized when this wish was fulfilled
    #[sea_orm(
        belongs_to = "super::transaction::Entity",
        from = "Column::TransactionId",
        to = "super::transaction::Column::Id"
    )]
    Transaction,
}

impl Related<super::transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transaction.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
