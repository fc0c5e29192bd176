//! Balance mutator - the only code path that changes a balance total.
//!
//! Every (owner, currency) pair has at most one balance row, created lazily at
//! zero by the first delta applied to it. [`apply_delta`] is generic over
//! `ConnectionTrait` so it always runs on the caller's database transaction:
//! the balance write commits or rolls back together with the transaction write
//! that triggered it. Sign policing is deliberately not done here - the
//! lifecycle service checks before committing, because reversals may pass
//! through negative intermediate values legitimately.

use crate::entities::{Balance, balance};
use crate::errors::{Error, Result};
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, QueryFilter, QueryOrder,
    Set, prelude::*};

/// Applies a signed delta to the (owner, currency) balance and returns the new total.
///
/// The row is created at zero if it does not exist yet. The delta is applied with
/// a single database-level update (`total = total + delta`) rather than a
/// read-modify-write in application code, so concurrent mutations serialize on
/// the row instead of losing updates.
///
/// # Arguments
/// * `conn` - Database connection or transaction; pass the transaction that
///   carries the triggering transaction-row write
/// * `owner` - Owner of the balance
/// * `currency` - Three-letter currency code
/// * `delta` - Signed amount to add (negative for withdrawals and reversals)
///
/// # Returns
/// The total after the delta has been applied.
pub async fn apply_delta<C>(conn: &C, owner: &str, currency: &str, delta: Decimal) -> Result<Decimal>
where
    C: ConnectionTrait,
{
    let now = chrono::Utc::now();

    let existing = Balance::find()
        .filter(balance::Column::Owner.eq(owner))
        .filter(balance::Column::Currency.eq(currency))
        .one(conn)
        .await?;

    if existing.is_none() {
        let row = balance::ActiveModel {
            owner: Set(owner.to_string()),
            currency: Set(currency.to_string()),
            total: Set(Decimal::ZERO),
            updated_at: Set(now),
            ..Default::default()
        };
        row.insert(conn).await?;
    }

    // Perform atomic update: total = total + delta
    Balance::update_many()
        .col_expr(
            balance::Column::Total,
            Expr::col(balance::Column::Total).add(delta),
        )
        .col_expr(balance::Column::UpdatedAt, Expr::value(now))
        .filter(balance::Column::Owner.eq(owner))
        .filter(balance::Column::Currency.eq(currency))
        .exec(conn)
        .await?;

    // Return the updated total
    let updated = Balance::find()
        .filter(balance::Column::Owner.eq(owner))
        .filter(balance::Column::Currency.eq(currency))
        .one(conn)
        .await?
        .ok_or(Error::Database(DbErr::RecordNotFound(
            "balance row vanished during update".to_string(),
        )))?;

    Ok(updated.total)
}

/// Returns the current total for (owner, currency), zero when no row exists.
///
/// Used by the lifecycle service for the pre-commit negativity checks; run it on
/// the same transaction as the mutation it guards.
pub async fn amount_available<C>(conn: &C, owner: &str, currency: &str) -> Result<Decimal>
where
    C: ConnectionTrait,
{
    let row = Balance::find()
        .filter(balance::Column::Owner.eq(owner))
        .filter(balance::Column::Currency.eq(currency))
        .one(conn)
        .await?;

    Ok(row.map_or(Decimal::ZERO, |balance| balance.total))
}

/// Retrieves all balance rows for an owner, ordered by currency code.
pub async fn get_balances(db: &DatabaseConnection, owner: &str) -> Result<Vec<balance::Model>> {
    Balance::find()
        .filter(balance::Column::Owner.eq(owner))
        .order_by_asc(balance::Column::Currency)
        .all(db)
        .await
        .map_err(Into::into)
}
