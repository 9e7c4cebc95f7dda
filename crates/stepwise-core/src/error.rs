use thiserror::Error;

use crate::registry::Version;

/// Type-erased executor failure carried inside a [`MigrationError`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Returned when a run aborts.
///
/// `version` is the migration being processed when the failure happened.
/// Version 0 means the ledger bootstrap itself failed and no migration was
/// looked at.
#[derive(Error, Debug)]
#[error("error migrating #{version}: {cause}")]
pub struct MigrationError {
    pub version: Version,
    #[source]
    pub cause: BoxError,
}

impl MigrationError {
    pub fn new(version: Version, cause: impl Into<BoxError>) -> Self {
        Self {
            version,
            cause: cause.into(),
        }
    }

    /// `true` if the failure happened while creating the ledger.
    pub fn is_bootstrap(&self) -> bool {
        self.version == 0
    }
}

/// Problems found by [`Registry::check`](crate::Registry::check).
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
    /// Version 0 is the ledger sentinel and can never be applied.
    #[error("migration at position {index} uses reserved version 0")]
    ReservedVersion { index: usize },

    /// The same version was registered twice; only the first would ever run.
    #[error("version {version} registered at positions {first} and {second}")]
    DuplicateVersion {
        version: Version,
        first: usize,
        second: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_version_and_cause() {
        let e = MigrationError::new(2, "no such table: foo");
        assert_eq!(e.to_string(), "error migrating #2: no such table: foo");
        assert!(!e.is_bootstrap());
    }

    #[test]
    fn source_is_the_cause() {
        use std::error::Error as _;

        let e = MigrationError::new(0, "disk full");
        assert!(e.is_bootstrap());
        assert_eq!(e.source().map(|s| s.to_string()).as_deref(), Some("disk full"));
    }
}
