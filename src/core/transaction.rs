//! Transaction lifecycle - Handles all transaction-related operations.
//!
//! This module provides functions for creating, retrieving, updating, and deleting
//! ledger transactions. Every mutation updates the owner's per-currency balance in
//! the same database transaction as the transaction-row write, so a caller never
//! observes a transaction without its balance effect or vice versa. Validation
//! follows one canonical order on every path: owner, then amount, then currency,
//! then direction.

use crate::core::currency::CurrencyRegistry;
use crate::core::direction::Direction;
use crate::core::reporting::{self, ReportingNotifier};
use crate::core::balance;
use crate::entities::{Transaction, transaction};
use crate::errors::{Error, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, ConnectionTrait, DatabaseConnection, QueryFilter, QueryOrder, Set,
    TransactionTrait, prelude::*};

/// Input for creating or replacing a transaction.
///
/// `direction` is accepted as raw text and parsed case-insensitively; `currency`
/// is normalized to uppercase. A missing `date` defaults to today on create and
/// keeps the stored date on update.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    /// Transaction amount, must be strictly positive
    pub amount: Decimal,
    /// Three-letter currency code
    pub currency: String,
    /// Direction as supplied by the caller, e.g. `"Deposit"` or `"withdraw"`
    pub direction: String,
    /// Optional free-text category
    pub category: Option<String>,
    /// Optional free-text description
    pub details: Option<String>,
    /// Calendar date the transaction applies to
    pub date: Option<NaiveDate>,
}

/// Validates input in the canonical order: owner, amount, currency, direction.
///
/// Returns the parsed direction; the currency still needs normalizing with
/// [`normalize_currency`] before storage.
fn validate_input(
    currencies: &dyn CurrencyRegistry,
    owner: &str,
    input: &NewTransaction,
) -> Result<Direction> {
    if owner.trim().is_empty() {
        return Err(Error::AuthenticationRequired);
    }

    if input.amount <= Decimal::ZERO {
        return Err(Error::InvalidAmount {
            amount: input.amount,
        });
    }

    if !currencies.is_supported(&input.currency) {
        return Err(Error::UnsupportedCurrency {
            code: input.currency.clone(),
        });
    }

    input.direction.parse()
}

/// Canonical storage form of a currency code.
fn normalize_currency(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

/// Creates a transaction on an already-open connection or database transaction.
///
/// Shared by [`create_transaction`], wishlist fulfillment, and the scheduled
/// replay engine so each can bundle the insert with its own extra writes inside
/// one atomic unit. Performs validation, the insufficient-funds check for
/// withdrawals, the row insert, and the balance delta - but neither commits nor
/// notifies reporting; that stays with the caller.
pub(crate) async fn create_on<C>(
    conn: &C,
    currencies: &dyn CurrencyRegistry,
    owner: &str,
    input: NewTransaction,
) -> Result<transaction::Model>
where
    C: ConnectionTrait,
{
    let direction = validate_input(currencies, owner, &input)?;
    let currency = normalize_currency(&input.currency);

    if direction == Direction::Withdraw {
        let available = balance::amount_available(conn, owner, &currency).await?;
        if input.amount > available {
            return Err(Error::InsufficientFunds {
                available,
                currency,
            });
        }
    }

    let date = input
        .date
        .unwrap_or_else(|| chrono::Utc::now().date_naive());

    let transaction_model = transaction::ActiveModel {
        owner: Set(owner.to_string()),
        date: Set(date),
        amount: Set(input.amount),
        currency: Set(currency.clone()),
        direction: Set(direction.as_str().to_string()),
        details: Set(input.details),
        category: Set(input.category),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let created = transaction_model.insert(conn).await?;

    balance::apply_delta(conn, owner, &currency, direction.signed(input.amount)).await?;

    Ok(created)
}

/// Creates a new transaction and applies its effect to the owner's balance.
///
/// A withdrawal that exceeds the available balance fails with
/// [`Error::InsufficientFunds`] and performs no writes. On success the reporting
/// subsystem is notified best-effort; a failed notification is logged and never
/// fails the creation.
pub async fn create_transaction(
    db: &DatabaseConnection,
    currencies: &dyn CurrencyRegistry,
    notifier: &dyn ReportingNotifier,
    owner: &str,
    input: NewTransaction,
) -> Result<transaction::Model> {
    // Use a transaction to ensure atomicity
    let txn = db.begin().await?;
    let created = create_on(&txn, currencies, owner, input).await?;
    txn.commit().await?;

    reporting::notify("record", notifier.record(owner, created.date, &created));

    Ok(created)
}

/// Replaces a transaction's fields and rebalances the affected currencies.
///
/// The old transaction's effect is reversed on its currency and the new values
/// are applied to the (possibly different) target currency; both deltas and the
/// field update share one database transaction. If the target currency's
/// resulting total would be negative, the whole operation rolls back with
/// [`Error::InsufficientFunds`]. When the currency is unchanged both deltas net
/// against the same balance row.
pub async fn update_transaction(
    db: &DatabaseConnection,
    currencies: &dyn CurrencyRegistry,
    notifier: &dyn ReportingNotifier,
    owner: &str,
    transaction_id: i64,
    input: NewTransaction,
) -> Result<transaction::Model> {
    let direction = validate_input(currencies, owner, &input)?;
    let currency = normalize_currency(&input.currency);

    let txn = db.begin().await?;

    let old = Transaction::find_by_id(transaction_id)
        .filter(transaction::Column::Owner.eq(owner))
        .one(&txn)
        .await?
        .ok_or(Error::NotFound {
            entity: "transaction",
            id: transaction_id,
        })?;

    let old_direction: Direction = old.direction.parse()?;

    // Undo the old transaction's effect on its currency
    balance::apply_delta(&txn, owner, &old.currency, -old_direction.signed(old.amount)).await?;

    // Forward check: the target currency must not end up negative
    let available = balance::amount_available(&txn, owner, &currency).await?;
    let forward = direction.signed(input.amount);
    if available + forward < Decimal::ZERO {
        return Err(Error::InsufficientFunds {
            available,
            currency,
        });
    }

    balance::apply_delta(&txn, owner, &currency, forward).await?;

    let date = input.date.unwrap_or(old.date);
    let mut active: transaction::ActiveModel = old.clone().into();
    active.date = Set(date);
    active.amount = Set(input.amount);
    active.currency = Set(currency);
    active.direction = Set(direction.as_str().to_string());
    active.details = Set(input.details);
    active.category = Set(input.category);
    let updated = active.update(&txn).await?;

    txn.commit().await?;

    reporting::notify(
        "record_update",
        notifier.record_update(owner, &old, &updated),
    );

    Ok(updated)
}

/// Deletes a transaction on an already-open connection or database transaction.
///
/// Shared by [`delete_transaction`] and wishlist un-fulfillment. Returns the
/// deleted row and the currency's new total. Reversing a deposit that later
/// withdrawals already spent fails with [`Error::NegativeBalance`] and performs
/// no writes.
pub(crate) async fn delete_on<C>(
    conn: &C,
    owner: &str,
    transaction_id: i64,
) -> Result<(transaction::Model, Decimal)>
where
    C: ConnectionTrait,
{
    if owner.trim().is_empty() {
        return Err(Error::AuthenticationRequired);
    }

    let existing = Transaction::find_by_id(transaction_id)
        .filter(transaction::Column::Owner.eq(owner))
        .one(conn)
        .await?
        .ok_or(Error::NotFound {
            entity: "transaction",
            id: transaction_id,
        })?;

    let direction: Direction = existing.direction.parse()?;
    let reversal = -direction.signed(existing.amount);

    let available = balance::amount_available(conn, owner, &existing.currency).await?;
    let resulting = available + reversal;
    if resulting < Decimal::ZERO {
        return Err(Error::NegativeBalance {
            total: resulting,
            currency: existing.currency.clone(),
        });
    }

    existing.clone().delete(conn).await?;
    let new_total = balance::apply_delta(conn, owner, &existing.currency, reversal).await?;

    Ok((existing, new_total))
}

/// Deletes a transaction and reverses its effect on the owner's balance.
///
/// Returns the new total of the transaction's currency.
pub async fn delete_transaction(
    db: &DatabaseConnection,
    notifier: &dyn ReportingNotifier,
    owner: &str,
    transaction_id: i64,
) -> Result<Decimal> {
    // Use a transaction to ensure atomicity
    let txn = db.begin().await?;
    let (deleted, new_total) = delete_on(&txn, owner, transaction_id).await?;
    txn.commit().await?;

    reporting::notify("record_deletion", notifier.record_deletion(owner, &deleted));

    Ok(new_total)
}

/// Retrieves a transaction by id, scoped to its owner.
///
/// Returns `None` both when the id does not exist and when it belongs to a
/// different owner; the two cases are indistinguishable to the caller.
pub async fn get_transaction(
    db: &DatabaseConnection,
    owner: &str,
    transaction_id: i64,
) -> Result<Option<transaction::Model>> {
    Transaction::find_by_id(transaction_id)
        .filter(transaction::Column::Owner.eq(owner))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all transactions for an owner, newest date first.
pub async fn list_transactions(
    db: &DatabaseConnection,
    owner: &str,
) -> Result<Vec<transaction::Model>> {
    Transaction::find()
        .filter(transaction::Column::Owner.eq(owner))
        .order_by_desc(transaction::Column::Date)
        .order_by_desc(transaction::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}
