//! The apply-once loop.
//!
//! A run has two phases:
//!
//! 1. **Bootstrap.**  [`ledger::BOOTSTRAP`] is sent as one atomic unit.  It
//!    creates `db_version` and its version-0 sentinel row when missing.  A
//!    failure here aborts with version 0 before any migration is looked at.
//! 2. **Walk.**  For every migration, in registration order: count its ledger
//!    rows; if there is one, skip it; otherwise execute the script atomically,
//!    then insert its ledger row.  The first failure of any of these steps
//!    aborts the run with that migration's version.
//!
//! Nothing is rolled back on abort.  Migrations recorded before the failure
//! stay recorded, so re-running the whole thing is always safe.  The one
//! hazard is a script that succeeded whose ledger insert then failed: the
//! script's effects are in place but unrecorded, and the next run will
//! execute it again.
//!
//! The count-then-apply-then-insert sequence is not atomic as a whole.  Two
//! runners against the same database at once may both apply the same
//! migration, so callers must make sure only one process migrates at a time.

use crate::error::MigrationError;
use crate::events::{self, Observer, Progress};
use crate::executor::Executor;
use crate::ledger;
use crate::registry::{Registry, Version};

/// What a successful run did, in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrateReport {
    pub applied: Vec<Version>,
    pub skipped: Vec<Version>,
}

/// Brings the ledger in line with a [`Registry`].
pub struct Runner<'r> {
    registry: &'r Registry,
    observer: Option<Box<dyn Observer + 'r>>,
}

impl<'r> Runner<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            observer: None,
        }
    }

    /// Also deliver progress to `observer`, in addition to the tracing log.
    pub fn with_observer(mut self, observer: impl Observer + 'r) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Apply every migration that has no ledger row yet.
    pub fn migrate<E: Executor>(&mut self, executor: &mut E) -> Result<MigrateReport, MigrationError> {
        self.emit(Progress::Started);

        executor
            .execute_atomic(ledger::BOOTSTRAP)
            .map_err(|e| fail(ledger::SENTINEL_VERSION, e))?;

        let mut report = MigrateReport::default();

        for migration in self.registry {
            let version = migration.version();

            if version == ledger::SENTINEL_VERSION {
                tracing::warn!("migration registered with reserved version 0 will never run");
            }

            let recorded = executor
                .count(ledger::COUNT_VERSION, &[version])
                .map_err(|e| fail(version, e))?;

            if recorded > 0 {
                self.emit(Progress::Skipped(version));
                report.skipped.push(version);
                continue;
            }

            self.emit(Progress::Applying(version));

            executor
                .execute_atomic(migration.script())
                .map_err(|e| fail(version, e))?;

            executor
                .execute(ledger::INSERT_VERSION, &[version])
                .map_err(|e| fail(version, e))?;

            self.emit(Progress::Applied(version));
            report.applied.push(version);
        }

        self.emit(Progress::Finished);
        Ok(report)
    }

    fn emit(&mut self, progress: Progress) {
        events::log(progress);
        if let Some(observer) = self.observer.as_mut() {
            observer.notify(progress);
        }
    }
}

fn fail<C>(version: Version, cause: C) -> MigrationError
where
    C: std::error::Error + Send + Sync + 'static,
{
    tracing::error!(version, error = %cause, "migration run aborted");
    MigrationError::new(version, cause)
}
