//! Reporting notifications for ledger mutations.
//!
//! The reporting subsystem (monthly/yearly breakdowns) lives outside the ledger
//! core; the core only tells it what changed. Notifications are strictly
//! best-effort: the mutation paths invoke them after commit and log a warning on
//! failure, so a broken reporting pipeline can never fail or roll back a ledger
//! write.

use crate::entities::transaction;
use crate::errors::Result;
use chrono::NaiveDate;
use tracing::{debug, warn};

/// Receiver for ledger-mutation events, implemented by the reporting subsystem.
pub trait ReportingNotifier: Send + Sync {
    /// A transaction was created on `date`.
    fn record(&self, owner: &str, date: NaiveDate, transaction: &transaction::Model)
    -> Result<()>;

    /// A transaction was updated from `old` to `new`.
    fn record_update(
        &self,
        owner: &str,
        old: &transaction::Model,
        new: &transaction::Model,
    ) -> Result<()>;

    /// A transaction was deleted.
    fn record_deletion(&self, owner: &str, transaction: &transaction::Model) -> Result<()>;
}

/// Logs every event through `tracing`; the default notifier for the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl ReportingNotifier for TracingReporter {
    fn record(
        &self,
        owner: &str,
        date: NaiveDate,
        transaction: &transaction::Model,
    ) -> Result<()> {
        debug!(
            owner,
            %date,
            transaction_id = transaction.id,
            amount = %transaction.amount,
            currency = %transaction.currency,
            direction = %transaction.direction,
            "transaction recorded"
        );
        Ok(())
    }

    fn record_update(
        &self,
        owner: &str,
        old: &transaction::Model,
        new: &transaction::Model,
    ) -> Result<()> {
        debug!(
            owner,
            transaction_id = new.id,
            old_amount = %old.amount,
            new_amount = %new.amount,
            old_currency = %old.currency,
            new_currency = %new.currency,
            "transaction updated"
        );
        Ok(())
    }

    fn record_deletion(&self, owner: &str, transaction: &transaction::Model) -> Result<()> {
        debug!(
            owner,
            transaction_id = transaction.id,
            amount = %transaction.amount,
            currency = %transaction.currency,
            "transaction deleted"
        );
        Ok(())
    }
}

/// Swallows every event; used by tests and callers without a reporting pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl ReportingNotifier for NoopReporter {
    fn record(&self, _: &str, _: NaiveDate, _: &transaction::Model) -> Result<()> {
        Ok(())
    }

    fn record_update(&self, _: &str, _: &transaction::Model, _: &transaction::Model) -> Result<()> {
        Ok(())
    }

    fn record_deletion(&self, _: &str, _: &transaction::Model) -> Result<()> {
        Ok(())
    }
}

/// Logs and discards a failed notification; reporting must never fail a mutation.
pub(crate) fn notify(operation: &'static str, result: Result<()>) {
    if let Err(error) = result {
        warn!(%error, operation, "reporting notification failed");
    }
}
