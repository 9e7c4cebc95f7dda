//! Typed read access to the `db_version` ledger.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use stepwise_core::{ledger, Version};

use crate::database::Database;
use crate::error::Result;

/// Format SQLite uses for `CURRENT_TIMESTAMP`.
const SQLITE_TIMESTAMP: &str = "%Y-%m-%d %H:%M:%S";

/// One row of the ledger.  Version 0 is the bootstrap sentinel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LedgerEntry {
    pub version: Version,
    pub applied_at: DateTime<Utc>,
}

impl LedgerEntry {
    pub fn is_sentinel(&self) -> bool {
        self.version == ledger::SENTINEL_VERSION
    }
}

impl Database {
    /// All ledger rows, ordered by version.  Empty if the ledger was never
    /// bootstrapped.
    pub fn ledger(&self) -> Result<Vec<LedgerEntry>> {
        if !self.table_exists(ledger::TABLE)? {
            return Ok(Vec::new());
        }

        let mut stmt = self.conn().prepare(
            "SELECT version, applied_at
             FROM db_version
             ORDER BY version ASC",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, Version>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut entries = Vec::new();
        for row in rows {
            let (version, applied_at) = row?;
            entries.push(LedgerEntry {
                version,
                applied_at: parse_timestamp(&applied_at)?,
            });
        }
        Ok(entries)
    }

    /// Highest recorded version, or `None` before bootstrap.
    pub fn current_version(&self) -> Result<Option<Version>> {
        Ok(self.ledger()?.last().map(|entry| entry.version))
    }
}

fn parse_timestamp(text: &str) -> Result<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(text, SQLITE_TIMESTAMP)?;
    Ok(Utc.from_utc_datetime(&naive))
}
