//! Scheduled recurring transactions and catch-up replay.
//!
//! A template describes one transaction per calendar month on a fixed day of
//! month. The replay engine walks the months between a template's watermark
//! (`last_applied`) and the injected current date, synthesizing one transaction
//! per elapsed month through the transaction lifecycle. Each occurrence commits
//! the transaction row, the balance delta, and the advanced watermark as one
//! atomic unit before the next month is attempted, so an interrupted run resumes
//! instead of re-applying months. Templates fail independently: one template
//! running out of funds never blocks its siblings.

use crate::core::currency::CurrencyRegistry;
use crate::core::direction::Direction;
use crate::core::reporting::{self, ReportingNotifier};
use crate::core::transaction::{self, NewTransaction};
use crate::entities::{ScheduledTransaction, scheduled_transaction};
use crate::errors::{Error, Result};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, DatabaseConnection, QueryFilter, QueryOrder, Set, TransactionTrait,
    prelude::*};
use tracing::error;

/// Error message reported when a whole replay run is aborted by an
/// engine-level failure. Detail is logged server-side only.
const UNEXPECTED_RUN_ERROR: &str = "Unexpected server error";

/// The outcome of one replay run across all of an owner's active templates.
#[derive(Debug, Clone)]
pub struct ScheduleRunResult {
    /// Number of transactions synthesized in this run
    pub applied_count: usize,
    /// One message per template that stopped early, in template order
    pub errors: Vec<String>,
}

/// Creates a new scheduled-transaction template.
///
/// The direction is parsed case-insensitively and stored canonically; the
/// day of month must be within 1-31 (it is additionally clamped to the target
/// month's length at replay time).
pub async fn create_template(
    db: &DatabaseConnection,
    owner: &str,
    day_of_month: i32,
    amount: Decimal,
    currency: &str,
    direction: &str,
    category: Option<String>,
    details: Option<String>,
) -> Result<scheduled_transaction::Model> {
    if owner.trim().is_empty() {
        return Err(Error::AuthenticationRequired);
    }

    if amount <= Decimal::ZERO {
        return Err(Error::InvalidAmount { amount });
    }

    if !(1..=31).contains(&day_of_month) {
        return Err(Error::InvalidDayOfMonth { day: day_of_month });
    }

    let parsed: Direction = direction.parse()?;

    let template = scheduled_transaction::ActiveModel {
        owner: Set(owner.to_string()),
        day_of_month: Set(day_of_month),
        amount: Set(amount),
        currency: Set(currency.trim().to_ascii_uppercase()),
        direction: Set(parsed.as_str().to_string()),
        details: Set(details),
        category: Set(category),
        active: Set(true),
        last_applied: Set(None),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    template.insert(db).await.map_err(Into::into)
}

/// Enables or disables a template; inactive templates are skipped by replay.
pub async fn set_template_active(
    db: &DatabaseConnection,
    owner: &str,
    template_id: i64,
    active: bool,
) -> Result<scheduled_transaction::Model> {
    let template = ScheduledTransaction::find_by_id(template_id)
        .filter(scheduled_transaction::Column::Owner.eq(owner))
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "scheduled transaction",
            id: template_id,
        })?;

    let mut model: scheduled_transaction::ActiveModel = template.into();
    model.active = Set(active);
    model.update(db).await.map_err(Into::into)
}

/// Retrieves all templates for an owner, oldest first.
pub async fn list_templates(
    db: &DatabaseConnection,
    owner: &str,
) -> Result<Vec<scheduled_transaction::Model>> {
    ScheduledTransaction::find()
        .filter(scheduled_transaction::Column::Owner.eq(owner))
        .order_by_asc(scheduled_transaction::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Replays every active template owned by `owner` up to `today`.
///
/// `today` is the injected clock: callers pass the current date (or a fixed one
/// in tests). Business failures are collected per template in the result and
/// never abort sibling templates; any engine-level failure aborts the run and
/// is reported as a single generic error with `applied_count` 0, with detail
/// logged server-side. Occurrences committed before an abort stay committed and
/// are not re-applied on the next invocation.
pub async fn apply_all(
    db: &DatabaseConnection,
    currencies: &dyn CurrencyRegistry,
    notifier: &dyn ReportingNotifier,
    owner: &str,
    today: NaiveDate,
) -> Result<ScheduleRunResult> {
    if owner.trim().is_empty() {
        return Err(Error::AuthenticationRequired);
    }

    match run(db, currencies, notifier, owner, today).await {
        Ok(result) => Ok(result),
        Err(err) => {
            error!(error = %err, owner, "scheduled-transaction replay aborted");
            Ok(ScheduleRunResult {
                applied_count: 0,
                errors: vec![UNEXPECTED_RUN_ERROR.to_string()],
            })
        }
    }
}

/// The fallible body of [`apply_all`]; engine-level errors bubble up from here.
async fn run(
    db: &DatabaseConnection,
    currencies: &dyn CurrencyRegistry,
    notifier: &dyn ReportingNotifier,
    owner: &str,
    today: NaiveDate,
) -> Result<ScheduleRunResult> {
    let templates = ScheduledTransaction::find()
        .filter(scheduled_transaction::Column::Owner.eq(owner))
        .filter(scheduled_transaction::Column::Active.eq(true))
        .order_by_asc(scheduled_transaction::Column::Id)
        .all(db)
        .await?;

    let mut applied_count = 0;
    let mut errors = Vec::new();

    for template in templates {
        let (applied, stop_reason) =
            replay_template(db, currencies, notifier, owner, &template, today).await?;
        applied_count += applied;
        if let Some(message) = stop_reason {
            errors.push(message);
        }
    }

    Ok(ScheduleRunResult {
        applied_count,
        errors,
    })
}

/// Replays a single template, returning the number of occurrences applied and
/// the reason it stopped early, if any.
async fn replay_template(
    db: &DatabaseConnection,
    currencies: &dyn CurrencyRegistry,
    notifier: &dyn ReportingNotifier,
    owner: &str,
    template: &scheduled_transaction::Model,
    today: NaiveDate,
) -> Result<(usize, Option<String>)> {
    // Stored template values are re-checked here; rows predating stricter
    // validation must not crash the run
    if template.amount <= Decimal::ZERO {
        return Ok((0, Some("Invalid amount".to_string())));
    }
    if template.direction.parse::<Direction>().is_err() {
        return Ok((
            0,
            Some(format!("Invalid direction: {}", template.direction)),
        ));
    }

    // A never-applied template starts from the current month, not from the past
    let (mut year, mut month) = match template.last_applied {
        Some(last) => next_month(last.year(), last.month()),
        None => (today.year(), today.month()),
    };

    let mut applied = 0;

    while (year, month) <= (today.year(), today.month()) {
        let occurrence = occurrence_date(year, month, template.day_of_month)?;
        if occurrence > today {
            break;
        }

        // One atomic unit per occurrence: transaction row, balance delta,
        // and advanced watermark commit together
        let txn = db.begin().await?;

        let created = match transaction::create_on(
            &txn,
            currencies,
            owner,
            NewTransaction {
                amount: template.amount,
                currency: template.currency.clone(),
                direction: template.direction.clone(),
                category: template.category.clone(),
                details: template.details.clone(),
                date: Some(occurrence),
            },
        )
        .await
        {
            Ok(created) => created,
            Err(Error::InsufficientFunds { .. }) => {
                return Ok((applied, Some("Insufficient funds".to_string())));
            }
            Err(err) if err.is_business() => return Ok((applied, Some(err.to_string()))),
            Err(err) => return Err(err),
        };

        let mut model: scheduled_transaction::ActiveModel = template.clone().into();
        model.last_applied = Set(Some(occurrence));
        model.update(&txn).await?;

        txn.commit().await?;

        reporting::notify("record", notifier.record(owner, occurrence, &created));

        applied += 1;
        (year, month) = next_month(year, month);
    }

    Ok((applied, None))
}

/// The calendar month after (year, month).
const fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month >= 12 { (year + 1, 1) } else { (year, month + 1) }
}

/// The occurrence date for a template day within a month, clamped to the
/// month's length (day 31 in February becomes the 28th or 29th).
fn occurrence_date(year: i32, month: u32, day_of_month: i32) -> Result<NaiveDate> {
    let day = day_of_month.clamp(1, 31).unsigned_abs();
    (1..=day)
        .rev()
        .find_map(|candidate| NaiveDate::from_ymd_opt(year, month, candidate))
        .ok_or_else(|| Error::Config {
            message: format!("invalid occurrence month {year}-{month:02}"),
        })
}
