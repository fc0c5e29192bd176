//! Core business logic for the ledger.
//!
//! The modules here form the only code paths allowed to mutate ledger state:
//! [`balance`] owns the incremental balance updates, [`transaction`] wraps them
//! in validated create/update/delete operations, [`wishlist`] and [`schedule`]
//! synthesize transactions through [`transaction`] rather than writing to the
//! ledger directly. [`currency`] and [`reporting`] define the seams to the
//! external currency registry and reporting subsystem.

/// Balance mutator and balance queries
pub mod balance;
/// Currency registry seam and the supported-currency set
pub mod currency;
/// Deposit/withdraw direction parsing and sign handling
pub mod direction;
/// Best-effort reporting notifications for ledger mutations
pub mod reporting;
/// Scheduled recurring transactions and catch-up replay
pub mod schedule;
/// Transaction lifecycle: create, update, delete
pub mod transaction;
/// Wishlist items and fulfillment through the ledger
pub mod wishlist;
