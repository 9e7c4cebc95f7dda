//! The boundary between the runner and a database.

use crate::registry::Version;

/// Runs command text against the target database.
///
/// Implementations block until the database answers.  The runner only ever
/// sends the command shapes found in [`ledger`](crate::ledger) plus the raw
/// migration scripts, and only ever binds version numbers as parameters.
/// Placeholders are written `$1`, `$2`, ...
pub trait Executor {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Run a single parameterized statement and return the rows affected.
    fn execute(&mut self, command: &str, params: &[Version]) -> Result<u64, Self::Error>;

    /// Run a single parameterized `SELECT COUNT(*)` and return the count.
    fn count(&mut self, command: &str, params: &[Version]) -> Result<u64, Self::Error>;

    /// Run opaque, possibly multi-statement text as one all-or-nothing unit.
    ///
    /// If any statement fails, none of the script's effects may persist.
    fn execute_atomic(&mut self, script: &str) -> Result<(), Self::Error>;
}

impl<E: Executor + ?Sized> Executor for &mut E {
    type Error = E::Error;

    fn execute(&mut self, command: &str, params: &[Version]) -> Result<u64, Self::Error> {
        (**self).execute(command, params)
    }

    fn count(&mut self, command: &str, params: &[Version]) -> Result<u64, Self::Error> {
        (**self).count(command, params)
    }

    fn execute_atomic(&mut self, script: &str) -> Result<(), Self::Error> {
        (**self).execute_atomic(script)
    }
}
