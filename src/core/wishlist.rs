//! Wishlist items and fulfillment through the ledger.
//!
//! A wishlist item is a planned purchase. Fulfilling it synthesizes a withdraw
//! transaction of category `"Wishes"` through the transaction lifecycle (never
//! around it), links the transaction to the item, and marks it purchased;
//! toggling again deletes the linked transaction and restores the pending state.
//! The wish update and the ledger write share one database transaction.

use crate::core::currency::CurrencyRegistry;
use crate::core::reporting::{self, ReportingNotifier};
use crate::core::transaction::{self, NewTransaction};
use crate::entities::{WishlistItem, wishlist_item};
use crate::errors::{Error, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, DatabaseConnection, QueryFilter, QueryOrder, Set, TransactionTrait,
    prelude::*};

/// Category stamped on every transaction synthesized by wishlist fulfillment.
pub const WISH_CATEGORY: &str = "Wishes";

/// Creates a new wishlist item in the pending state.
///
/// # Arguments
/// * `db` - Database connection
/// * `owner` - Owner of the item
/// * `price` - Price of the wished item, must be strictly positive
/// * `currency` - Three-letter currency code, normalized to uppercase
/// * `details` - Optional description
/// * `link` - Optional link to the item online
/// * `year` - Year the purchase is planned for
pub async fn create_wish(
    db: &DatabaseConnection,
    owner: &str,
    price: Decimal,
    currency: &str,
    details: Option<String>,
    link: Option<String>,
    year: i32,
) -> Result<wishlist_item::Model> {
    if owner.trim().is_empty() {
        return Err(Error::AuthenticationRequired);
    }

    if price <= Decimal::ZERO {
        return Err(Error::InvalidAmount { amount: price });
    }

    let wish = wishlist_item::ActiveModel {
        owner: Set(owner.to_string()),
        price: Set(price),
        currency: Set(currency.trim().to_ascii_uppercase()),
        details: Set(details),
        link: Set(link),
        year: Set(year),
        purchased: Set(false),
        transaction_id: Set(None),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    wish.insert(db).await.map_err(Into::into)
}

/// Retrieves a wishlist item by id, scoped to its owner.
pub async fn get_wish(
    db: &DatabaseConnection,
    owner: &str,
    wish_id: i64,
) -> Result<Option<wishlist_item::Model>> {
    WishlistItem::find_by_id(wish_id)
        .filter(wishlist_item::Column::Owner.eq(owner))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all wishlist items for an owner, newest first.
pub async fn list_wishes(
    db: &DatabaseConnection,
    owner: &str,
) -> Result<Vec<wishlist_item::Model>> {
    WishlistItem::find()
        .filter(wishlist_item::Column::Owner.eq(owner))
        .order_by_desc(wishlist_item::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Toggles a wishlist item between pending and purchased.
///
/// Pending → purchased: creates a withdraw transaction for the item's price on
/// `today`, links it, and sets `purchased`. An [`Error::InsufficientFunds`] from
/// the ledger propagates verbatim and leaves the item untouched.
///
/// Purchased → pending: deletes the linked transaction and clears the link. An
/// [`Error::NegativeBalance`] from the reversal propagates verbatim, blocking an
/// un-fulfillment that other withdrawals already depend on.
pub async fn toggle_status(
    db: &DatabaseConnection,
    currencies: &dyn CurrencyRegistry,
    notifier: &dyn ReportingNotifier,
    owner: &str,
    wish_id: i64,
    today: NaiveDate,
) -> Result<wishlist_item::Model> {
    if owner.trim().is_empty() {
        return Err(Error::AuthenticationRequired);
    }

    // One database transaction covers the ledger write and the wish update
    let txn = db.begin().await?;

    let wish = WishlistItem::find_by_id(wish_id)
        .filter(wishlist_item::Column::Owner.eq(owner))
        .one(&txn)
        .await?
        .ok_or(Error::NotFound {
            entity: "wishlist item",
            id: wish_id,
        })?;

    if wish.purchased {
        let linked_id = wish.transaction_id.ok_or_else(|| Error::Config {
            message: format!(
                "wishlist item {} is marked purchased but has no linked transaction",
                wish.id
            ),
        })?;

        let (deleted, _new_total) = transaction::delete_on(&txn, owner, linked_id).await?;

        let mut active: wishlist_item::ActiveModel = wish.into();
        active.purchased = Set(false);
        active.transaction_id = Set(None);
        let updated = active.update(&txn).await?;

        txn.commit().await?;

        reporting::notify("record_deletion", notifier.record_deletion(owner, &deleted));

        Ok(updated)
    } else {
        let created = transaction::create_on(
            &txn,
            currencies,
            owner,
            NewTransaction {
                amount: wish.price,
                currency: wish.currency.clone(),
                direction: "withdraw".to_string(),
                category: Some(WISH_CATEGORY.to_string()),
                details: wish.details.clone(),
                date: Some(today),
            },
        )
        .await?;

        let mut active: wishlist_item::ActiveModel = wish.into();
        active.purchased = Set(true);
        active.transaction_id = Set(Some(created.id));
        let updated = active.update(&txn).await?;

        txn.commit().await?;

        reporting::notify("record", notifier.record(owner, created.date, &created));

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::currency::SupportedCurrencies;
    use crate::core::reporting::NoopReporter;
    use crate::core::{balance, transaction::create_transaction};
    use crate::test_utils::{deposit_input, setup_test_db, withdraw_input};

    fn apr(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 4, day).unwrap()
    }

    #[tokio::test]
    async fn test_create_wish_validation() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_wish(&db, "", Decimal::from(10), "USD", None, None, 2026).await;
        assert!(matches!(result.unwrap_err(), Error::AuthenticationRequired));

        let result = create_wish(&db, "alice", Decimal::ZERO, "USD", None, None, 2026).await;
        assert!(matches!(result.unwrap_err(), Error::InvalidAmount { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_toggle_round_trip_restores_everything() -> Result<()> {
        let db = setup_test_db().await?;
        let currencies = SupportedCurrencies::default();

        create_transaction(
            &db,
            &currencies,
            &NoopReporter,
            "alice",
            deposit_input(Decimal::from(1000), "USD"),
        )
        .await?;
        let wish = create_wish(
            &db,
            "alice",
            Decimal::from(200),
            "USD",
            Some("Mechanical keyboard".to_string()),
            None,
            2026,
        )
        .await?;

        // Fulfill: balance drops by the price, a "Wishes" withdraw appears
        let purchased =
            toggle_status(&db, &currencies, &NoopReporter, "alice", wish.id, apr(10)).await?;
        assert!(purchased.purchased);
        let linked_id = purchased.transaction_id.unwrap();
        assert_eq!(
            balance::amount_available(&db, "alice", "USD").await?,
            Decimal::from(800)
        );

        let linked = crate::core::transaction::get_transaction(&db, "alice", linked_id)
            .await?
            .unwrap();
        assert_eq!(linked.category.as_deref(), Some(WISH_CATEGORY));
        assert_eq!(linked.direction, "withdraw");
        assert_eq!(linked.amount, Decimal::from(200));
        assert_eq!(linked.date, apr(10));
        assert_eq!(linked.details.as_deref(), Some("Mechanical keyboard"));

        // Un-fulfill: the item and the balance return to the pre-toggle state
        let pending =
            toggle_status(&db, &currencies, &NoopReporter, "alice", wish.id, apr(11)).await?;
        assert!(!pending.purchased);
        assert!(pending.transaction_id.is_none());
        assert_eq!(
            balance::amount_available(&db, "alice", "USD").await?,
            Decimal::from(1000)
        );
        assert!(
            crate::core::transaction::get_transaction(&db, "alice", linked_id)
                .await?
                .is_none()
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_toggle_insufficient_funds_leaves_wish_pending() -> Result<()> {
        let db = setup_test_db().await?;
        let currencies = SupportedCurrencies::default();

        create_transaction(
            &db,
            &currencies,
            &NoopReporter,
            "alice",
            deposit_input(Decimal::from(100), "USD"),
        )
        .await?;
        let wish =
            create_wish(&db, "alice", Decimal::from(200), "USD", None, None, 2026).await?;

        let result =
            toggle_status(&db, &currencies, &NoopReporter, "alice", wish.id, apr(10)).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InsufficientFunds { available, currency }
                if available == Decimal::from(100) && currency == "USD"
        ));

        // Nothing changed: item pending, balance intact, no transaction written
        let unchanged = get_wish(&db, "alice", wish.id).await?.unwrap();
        assert!(!unchanged.purchased);
        assert!(unchanged.transaction_id.is_none());
        assert_eq!(
            balance::amount_available(&db, "alice", "USD").await?,
            Decimal::from(100)
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_unfulfillment_blocked_by_negative_balance() -> Result<()> {
        let db = setup_test_db().await?;
        let currencies = SupportedCurrencies::default();

        create_transaction(
            &db,
            &currencies,
            &NoopReporter,
            "alice",
            deposit_input(Decimal::from(1000), "USD"),
        )
        .await?;
        let wish =
            create_wish(&db, "alice", Decimal::from(200), "USD", None, None, 2026).await?;
        let purchased =
            toggle_status(&db, &currencies, &NoopReporter, "alice", wish.id, apr(10)).await?;
        let linked_id = purchased.transaction_id.unwrap();

        // The linked transaction gets edited into a deposit the balance then leans on
        crate::core::transaction::update_transaction(
            &db,
            &currencies,
            &NoopReporter,
            "alice",
            linked_id,
            deposit_input(Decimal::from(300), "USD"),
        )
        .await?;
        create_transaction(
            &db,
            &currencies,
            &NoopReporter,
            "alice",
            withdraw_input(Decimal::from(1250), "USD"),
        )
        .await?;

        // Un-fulfilling would reverse the deposit and go negative
        let result =
            toggle_status(&db, &currencies, &NoopReporter, "alice", wish.id, apr(12)).await;
        assert!(matches!(result.unwrap_err(), Error::NegativeBalance { .. }));

        // The wish stays purchased and linked
        let unchanged = get_wish(&db, "alice", wish.id).await?.unwrap();
        assert!(unchanged.purchased);
        assert_eq!(unchanged.transaction_id, Some(linked_id));

        Ok(())
    }

    #[tokio::test]
    async fn test_toggle_not_found_for_foreign_owner() -> Result<()> {
        let db = setup_test_db().await?;
        let currencies = SupportedCurrencies::default();

        let wish =
            create_wish(&db, "alice", Decimal::from(50), "USD", None, None, 2026).await?;

        let result =
            toggle_status(&db, &currencies, &NoopReporter, "mallory", wish.id, apr(10)).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::NotFound { entity: "wishlist item", .. }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_list_wishes_scoped_by_owner() -> Result<()> {
        let db = setup_test_db().await?;

        create_wish(&db, "alice", Decimal::from(10), "USD", None, None, 2026).await?;
        create_wish(&db, "bob", Decimal::from(20), "USD", None, None, 2026).await?;

        let wishes = list_wishes(&db, "alice").await?;
        assert_eq!(wishes.len(), 1);
        assert_eq!(wishes[0].price, Decimal::from(10));

        Ok(())
    }
}
