//! Progress notifications emitted during a run.

use crate::registry::Version;

/// One step of a run, reported in the order it actually happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// The run began; the ledger is about to be bootstrapped.
    Started,
    /// The script for this version is about to be executed.
    Applying(Version),
    /// The script ran and its ledger row was written.
    Applied(Version),
    /// The ledger already had a row for this version.
    Skipped(Version),
    /// Every registered migration was applied or skipped.
    Finished,
}

/// Receives [`Progress`] notifications synchronously on the runner's thread.
pub trait Observer {
    fn notify(&mut self, progress: Progress);
}

impl<F: FnMut(Progress)> Observer for F {
    fn notify(&mut self, progress: Progress) {
        self(progress)
    }
}

/// Mirror a notification into the tracing log.
pub(crate) fn log(progress: Progress) {
    match progress {
        Progress::Started => tracing::info!("running migrations"),
        Progress::Applying(version) => tracing::info!(version, "executing migration"),
        Progress::Applied(version) => tracing::info!(version, "migration applied"),
        Progress::Skipped(version) => tracing::debug!(version, "skipping migration, already run"),
        Progress::Finished => tracing::info!("migration complete"),
    }
}
