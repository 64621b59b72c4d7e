//! Single-slot store for the latest reconciliation report.
//!
//! The report lives in `reconciliation_report.json` inside a directory.
//! Writes go through a temporary file in the same directory that is renamed
//! over the report, so readers see either the previous report or the new
//! one, never a partial file.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use serde::{Serialize, Serializer, ser::SerializeMap};
use tempfile::NamedTempFile;

use crate::{ReconciliationReport, ResultEngine};

pub const REPORT_FILE_NAME: &str = "reconciliation_report.json";

/// Status string returned when no report was ever written.
pub const NO_REPORT_STATUS: &str = "no report";

/// What [`ReportStore::read`] found.
#[derive(Clone, Debug, PartialEq)]
pub enum LatestReport {
    Available(ReconciliationReport),
    /// Nothing written yet. Serialized as `{"status": "no report"}`.
    NoReport,
}

impl Serialize for LatestReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Available(report) => report.serialize(serializer),
            Self::NoReport => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("status", NO_REPORT_STATUS)?;
                map.end()
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct ReportStore {
    dir: PathBuf,
}

impl ReportStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(REPORT_FILE_NAME)
    }

    /// Replace the stored report with `report`.
    pub fn write(&self, report: &ReconciliationReport) -> ResultEngine<()> {
        fs::create_dir_all(&self.dir)?;

        let mut file = NamedTempFile::new_in(&self.dir)?;
        serde_json::to_writer_pretty(&mut file, report)?;
        file.write_all(b"\n")?;
        file.as_file().sync_all()?;
        file.persist(self.path()).map_err(|err| err.error)?;

        tracing::debug!("reconciliation report written to {}", self.path().display());
        Ok(())
    }

    /// Return the latest report.
    ///
    /// A missing file is [`LatestReport::NoReport`]; any other I/O failure is
    /// an error.
    pub fn read(&self) -> ResultEngine<LatestReport> {
        let bytes = match fs::read(self.path()) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("no reconciliation report in {}", self.dir.display());
                return Ok(LatestReport::NoReport);
            }
            Err(err) => return Err(err.into()),
        };

        Ok(LatestReport::Available(serde_json::from_slice(&bytes)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DonationRecord, EngineError, reconcile};

    fn report(amount: &str) -> ReconciliationReport {
        reconcile(&[DonationRecord::new(amount, Some("Education"))], &[]).unwrap()
    }

    #[test]
    fn read_without_write_is_no_report() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReportStore::new(dir.path());

        let latest = store.read().unwrap();
        assert_eq!(latest, LatestReport::NoReport);
        assert_eq!(
            serde_json::to_value(&latest).unwrap(),
            serde_json::json!({"status": "no report"})
        );
    }

    #[test]
    fn missing_directory_is_no_report() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReportStore::new(dir.path().join("not").join("there"));

        assert_eq!(store.read().unwrap(), LatestReport::NoReport);
    }

    #[test]
    fn last_write_wins() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReportStore::new(dir.path().join("reports"));
        let first = report("10");
        let second = report("20");

        store.write(&first).unwrap();
        store.write(&second).unwrap();

        assert_eq!(store.read().unwrap(), LatestReport::Available(second.clone()));
        assert_eq!(store.read().unwrap(), store.read().unwrap());

        let leftovers: Vec<_> = fs::read_dir(store.dir()).unwrap().collect();
        assert_eq!(leftovers.len(), 1);
    }

    #[test]
    fn written_file_uses_report_field_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReportStore::new(dir.path());
        store.write(&report("12.5")).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw["square"]["total"], "12.50");
        assert_eq!(raw["square"]["by_designation"]["Education"], "12.50");
        assert_eq!(raw["internal"]["total"], "0.00");
        assert_eq!(raw["variance_total"], "12.50");
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReportStore::new(dir.path());
        fs::write(store.path(), "{\"square\": ").unwrap();

        assert!(matches!(store.read(), Err(EngineError::Serialization(_))));
    }

    #[test]
    fn unreadable_location_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(REPORT_FILE_NAME)).unwrap();
        let store = ReportStore::new(dir.path());

        assert!(matches!(store.read(), Err(EngineError::Storage(_))));
        assert!(matches!(
            store.write(&report("1")),
            Err(EngineError::Storage(_))
        ));
    }

    #[test]
    fn concurrent_writers_leave_one_complete_report() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReportStore::new(dir.path().join("reports"));
        let reports: Vec<_> = (1..=8).map(|n| report(&n.to_string())).collect();

        std::thread::scope(|scope| {
            for written in &reports {
                let store = &store;
                scope.spawn(move || {
                    for _ in 0..10 {
                        store.write(written).unwrap();
                    }
                });
            }
            for _ in 0..4 {
                let (store, reports) = (&store, &reports);
                scope.spawn(move || {
                    for _ in 0..50 {
                        match store.read().unwrap() {
                            LatestReport::NoReport => {}
                            LatestReport::Available(seen) => assert!(reports.contains(&seen)),
                        }
                    }
                });
            }
        });

        let LatestReport::Available(last) = store.read().unwrap() else {
            panic!("no report after concurrent writes");
        };
        assert!(reports.contains(&last));

        let files: Vec<_> = fs::read_dir(store.dir())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(files, vec![std::ffi::OsString::from(REPORT_FILE_NAME)]);
    }
}
