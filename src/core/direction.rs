//! Transaction direction - the sign of a ledger entry.
//!
//! Amounts are always positive; whether a transaction raises or lowers the
//! balance is encoded here. Input is parsed case-insensitively (`"Deposit"`,
//! `"deposit"`, `"WITHDRAW"`, ...) and stored canonically in lowercase.

use crate::errors::{Error, Result};
use rust_decimal::Decimal;
use std::str::FromStr;

/// The two ways a transaction can move a balance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Raises the balance by the transaction amount
    Deposit,
    /// Lowers the balance by the transaction amount
    Withdraw,
}

impl Direction {
    /// Canonical storage form, always lowercase.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::Withdraw => "withdraw",
        }
    }

    /// The signed effect of `amount` on a balance: positive for deposits,
    /// negative for withdrawals.
    #[must_use]
    pub fn signed(self, amount: Decimal) -> Decimal {
        match self {
            Self::Deposit => amount,
            Self::Withdraw => -amount,
        }
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "deposit" => Ok(Self::Deposit),
            "withdraw" => Ok(Self::Withdraw),
            _ => Err(Error::InvalidDirection {
                value: value.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
