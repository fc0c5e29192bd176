//! Unified error types for the ledger core.
//!
//! Validation failures (invalid input, unsupported currency, insufficient funds,
//! missing rows) are expected business outcomes: callers receive them as typed
//! variants and no partial writes are left behind. Database and I/O failures are
//! engine-level: they abort the surrounding database transaction entirely and
//! carry detail that is logged server-side, never shown to end users.

use rust_decimal::Decimal;
use thiserror::Error;

/// All errors the ledger core can produce.
#[derive(Debug, Error)]
pub enum Error {
    /// No owner context was supplied for an operation that requires one.
    #[error("Authentication required")]
    AuthenticationRequired,

    /// An amount was zero or negative where a strictly positive amount is required.
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
    },

    /// A currency code is not in the supported-currency registry.
    #[error("Unsupported currency: {code}")]
    UnsupportedCurrency {
        /// The rejected currency code, as supplied
        code: String,
    },

    /// A direction value was neither deposit nor withdraw (case-insensitive).
    #[error("Invalid direction: {value}")]
    InvalidDirection {
        /// The rejected direction value, as supplied
        value: String,
    },

    /// A withdrawal-class mutation would drive a balance negative.
    #[error("Insufficient funds: available {available} {currency}")]
    InsufficientFunds {
        /// Balance available before the rejected mutation
        available: Decimal,
        /// Currency of the balance that would go negative
        currency: String,
    },

    /// Reversing a transaction would drive a balance negative.
    ///
    /// Distinct from [`Error::InsufficientFunds`]: this guards the reversal path
    /// (deleting a deposit that later withdrawals already depend on).
    #[error("Deletion would leave a negative balance: {total} {currency}")]
    NegativeBalance {
        /// The balance that the reversal would produce
        total: Decimal,
        /// Currency of the balance that would go negative
        currency: String,
    },

    /// The referenced row does not exist for this owner.
    ///
    /// A row owned by another user produces the same error, so existence of
    /// other users' data is never leaked.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Entity kind, e.g. `"transaction"`
        entity: &'static str,
        /// The requested id
        id: i64,
    },

    /// A scheduled-transaction day of month outside 1..=31.
    #[error("Day of month must be between 1 and 31, got {day}")]
    InvalidDayOfMonth {
        /// The rejected day
        day: i32,
    },

    /// Configuration file or environment problem.
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description
        message: String,
    },

    /// I/O error, e.g. while reading `config.toml`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Database error from SeaORM.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl Error {
    /// Whether this error is an expected business outcome rather than an
    /// engine-level failure.
    ///
    /// The scheduled-transaction replay engine records business failures per
    /// template and keeps going; anything else aborts the whole run with a
    /// generic message.
    #[must_use]
    pub const fn is_business(&self) -> bool {
        matches!(
            self,
            Self::AuthenticationRequired
                | Self::InvalidAmount { .. }
                | Self::UnsupportedCurrency { .. }
                | Self::InvalidDirection { .. }
                | Self::InsufficientFunds { .. }
                | Self::NegativeBalance { .. }
                | Self::NotFound { .. }
                | Self::InvalidDayOfMonth { .. }
        )
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
