//! Ordered, append-only list of migrations.
//!
//! A [`Registry`] is filled once at startup and then only read.  Entries keep
//! the order they were declared in, and that order is the order the
//! [`Runner`](crate::Runner) applies them in, whatever their version numbers.

use std::collections::HashMap;

use crate::error::{MigrationError, RegistryError};
use crate::executor::Executor;
use crate::runner::{MigrateReport, Runner};

/// Migration version number.  0 is reserved for the ledger sentinel.
pub type Version = u32;

/// A numbered script.  Immutable once registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    version: Version,
    script: String,
}

impl Migration {
    pub fn version(&self) -> Version {
        self.version
    }

    /// The raw script text, sent to the database verbatim.
    pub fn script(&self) -> &str {
        &self.script
    }
}

/// Migrations in registration order.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    migrations: Vec<Migration>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a script under the next automatic version.
    ///
    /// The version is `len() + 1`, i.e. it counts entries rather than looking
    /// at the highest version so far:
    ///
    /// ```
    /// # use stepwise_core::Registry;
    /// let mut registry = Registry::new();
    /// registry.define("create table foo (id integer);");
    /// registry.define_version(10, "create table bar (id integer);");
    /// registry.define("alter table foo add column bar text;");
    ///
    /// let versions: Vec<_> = registry.iter().map(|m| m.version()).collect();
    /// assert_eq!(versions, [1, 10, 3]);
    /// ```
    pub fn define(&mut self, script: impl Into<String>) {
        let version = self.migrations.len() as Version + 1;
        self.define_version(version, script);
    }

    /// Register a script under an explicit version.
    ///
    /// Nothing is validated here: gaps, out-of-order and duplicate versions
    /// are all accepted.  Use [`Registry::check`] to lint a registry.
    pub fn define_version(&mut self, version: Version, script: impl Into<String>) {
        self.migrations.push(Migration {
            version,
            script: script.into(),
        });
    }

    pub fn len(&self) -> usize {
        self.migrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.migrations.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Migration> {
        self.migrations.get(index)
    }

    /// Iterate in registration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Migration> {
        self.migrations.iter()
    }

    /// Report the first reserved or duplicated version, if any.
    ///
    /// This is opt-in.  The runner does not call it and will happily skip a
    /// duplicate whose version is already in the ledger.
    pub fn check(&self) -> Result<(), RegistryError> {
        let mut seen: HashMap<Version, usize> = HashMap::with_capacity(self.migrations.len());

        for (index, migration) in self.migrations.iter().enumerate() {
            if migration.version == 0 {
                return Err(RegistryError::ReservedVersion { index });
            }
            if let Some(&first) = seen.get(&migration.version) {
                return Err(RegistryError::DuplicateVersion {
                    version: migration.version,
                    first,
                    second: index,
                });
            }
            seen.insert(migration.version, index);
        }

        Ok(())
    }

    /// Shorthand for `Runner::new(self).migrate(executor)`.
    pub fn migrate<E: Executor>(&self, executor: &mut E) -> Result<MigrateReport, MigrationError> {
        Runner::new(self).migrate(executor)
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a Migration;
    type IntoIter = std::slice::Iter<'a, Migration>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn versions(registry: &Registry) -> Vec<Version> {
        registry.iter().map(Migration::version).collect()
    }

    #[test]
    fn define_numbers_from_one() {
        let mut registry = Registry::new();
        registry.define("a");
        registry.define("b");
        registry.define("c");

        assert_eq!(versions(&registry), vec![1, 2, 3]);
        assert_eq!(registry.get(1).map(Migration::script), Some("b"));
    }

    #[test]
    fn auto_numbering_counts_entries_not_max_version() {
        let mut registry = Registry::new();
        registry.define("a");
        registry.define("b");
        registry.define("c");
        registry.define_version(10, "d");
        registry.define("e");

        assert_eq!(versions(&registry), vec![1, 2, 3, 10, 5]);
    }

    #[test]
    fn define_version_accepts_anything() {
        let mut registry = Registry::new();
        registry.define_version(7, "a");
        registry.define_version(3, "b");
        registry.define_version(3, "c");
        registry.define_version(0, "d");

        assert_eq!(versions(&registry), vec![7, 3, 3, 0]);
    }

    #[test]
    fn check_passes_on_unique_positive_versions() {
        let mut registry = Registry::new();
        registry.define("a");
        registry.define_version(10, "b");
        registry.define("c");

        assert_eq!(registry.check(), Ok(()));
    }

    #[test]
    fn check_flags_reserved_version() {
        let mut registry = Registry::new();
        registry.define("a");
        registry.define_version(0, "b");

        assert_eq!(
            registry.check(),
            Err(RegistryError::ReservedVersion { index: 1 })
        );
    }

    #[test]
    fn check_flags_duplicates() {
        let mut registry = Registry::new();
        registry.define("a");
        registry.define("b");
        registry.define_version(1, "c");

        assert_eq!(
            registry.check(),
            Err(RegistryError::DuplicateVersion {
                version: 1,
                first: 0,
                second: 2,
            })
        );
    }

    #[test]
    fn empty_registry() {
        let registry = Registry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.check(), Ok(()));
    }
}
