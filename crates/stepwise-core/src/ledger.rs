//! Command text for the `db_version` ledger table.
//!
//! Table and column names are fixed.  The text sticks to SQL that SQLite and
//! PostgreSQL both accept, including `$1` placeholders.

use crate::registry::Version;

pub const TABLE: &str = "db_version";

/// Version of the row written when the ledger is first created.
pub const SENTINEL_VERSION: Version = 0;

/// Creates the ledger and its sentinel row if either is missing.
///
/// Sent as a single atomic unit; running it again is a no-op.
pub const BOOTSTRAP: &str = r#"
CREATE TABLE IF NOT EXISTS db_version (
    version    INTEGER   NOT NULL UNIQUE,
    applied_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
);

INSERT INTO db_version (version)
SELECT 0
WHERE NOT EXISTS (SELECT 1 FROM db_version WHERE version = 0);
"#;

/// Number of ledger rows for `$1`; 0 or 1.
pub const COUNT_VERSION: &str = "SELECT COUNT(*) FROM db_version WHERE version = $1";

/// Record `$1` as applied.
pub const INSERT_VERSION: &str = "INSERT INTO db_version (version) VALUES ($1)";
