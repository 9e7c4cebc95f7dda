//! # stepwise-store
//!
//! SQLite backend for `stepwise-core`.
//!
//! [`Database`] wraps a `rusqlite::Connection`, implements the core
//! [`Executor`](stepwise_core::Executor) capability on top of it, and offers a
//! typed read of the `db_version` ledger.

pub mod config;
pub mod database;
pub mod ledger;

mod error;

pub use config::StoreConfig;
pub use database::Database;
pub use error::{Result, StoreError};
pub use ledger::LedgerEntry;
