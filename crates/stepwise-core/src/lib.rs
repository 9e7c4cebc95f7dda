//! # stepwise-core
//!
//! Linear, apply-once schema migrations.
//!
//! Application code declares scripts on a [`Registry`] at startup, then hands
//! the registry and a connected [`Executor`] to a [`Runner`].  The runner keeps
//! a `db_version` ledger table in the target database and applies every
//! script whose version has no ledger row yet, in registration order, stopping
//! at the first failure.
//!
//! The crate never talks to a database driver directly; see
//! `stepwise-store` for the SQLite implementation of [`Executor`].

pub mod events;
pub mod executor;
pub mod ledger;
pub mod registry;
pub mod runner;

mod error;

pub use error::{BoxError, MigrationError, RegistryError};
pub use events::{Observer, Progress};
pub use executor::Executor;
pub use registry::{Migration, Registry, Version};
pub use runner::{MigrateReport, Runner};
