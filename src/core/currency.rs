//! Currency registry seam.
//!
//! The ledger treats the set of acceptable currencies as an external
//! collaborator: transaction validation only asks whether a code is supported.
//! [`SupportedCurrencies`] is the standard implementation, seeded from
//! config.toml or the built-in default set. Codes are normalized to uppercase;
//! lookups are case-insensitive.

use std::collections::HashSet;

/// Currency codes accepted when no configuration file overrides them.
const DEFAULT_CODES: &[&str] = &[
    "AUD", "BGN", "BRL", "CAD", "CHF", "CNY", "CZK", "DKK", "EUR", "GBP", "HUF", "INR", "JPY",
    "MXN", "NOK", "NZD", "PLN", "RON", "SEK", "TRY", "USD",
];

/// The currency registry consulted on every transaction create/update.
pub trait CurrencyRegistry: Send + Sync {
    /// Whether `code` names a currency the ledger accepts.
    fn is_supported(&self, code: &str) -> bool;
}

/// A fixed allow-list of currency codes.
#[derive(Debug, Clone)]
pub struct SupportedCurrencies {
    codes: HashSet<String>,
}

impl SupportedCurrencies {
    /// Builds a registry from the given codes, normalizing each to uppercase.
    #[must_use]
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            codes: codes
                .into_iter()
                .map(|code| code.as_ref().trim().to_ascii_uppercase())
                .collect(),
        }
    }
}

impl Default for SupportedCurrencies {
    fn default() -> Self {
        Self::new(DEFAULT_CODES)
    }
}

impl CurrencyRegistry for SupportedCurrencies {
    fn is_supported(&self, code: &str) -> bool {
        self.codes.contains(&code.trim().to_ascii_uppercase())
    }
}
