use std::path::PathBuf;

use sea_orm::DatabaseConnection;

use crate::{EngineError, ReportStore, ResultEngine, SecondarySource};

mod donations;
mod donors;
mod receipts;
mod reconciliation;
mod statements;

/// Default location of the reconciliation report.
pub const DEFAULT_DATA_DIR: &str = "./data";

/// Entry point of the donation backend.
///
/// The engine holds no mutable state: every operation reads what it needs
/// from the database, so a shared `Engine` can serve concurrent requests.
#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
    reports: ReportStore,
    secondary: SecondarySource,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// The configured report store.
    pub fn report_store(&self) -> &ReportStore {
        &self.reports
    }

    pub fn secondary_source(&self) -> &SecondarySource {
        &self.secondary
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
    data_dir: Option<PathBuf>,
    secondary: SecondarySource,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Directory holding the latest reconciliation report.
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> EngineBuilder {
        self.data_dir = Some(dir.into());
        self
    }

    pub fn secondary_source(mut self, source: SecondarySource) -> EngineBuilder {
        self.secondary = source;
        self
    }

    /// Construct `Engine`
    ///
    /// Fails with `InvalidInput` when the report directory is empty.
    pub fn build(self) -> ResultEngine<Engine> {
        let data_dir = self
            .data_dir
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        if data_dir.as_os_str().is_empty() {
            return Err(EngineError::InvalidInput(
                "empty reconciliation data directory".to_string(),
            ));
        }
        tracing::debug!("reconciliation reports stored in {}", data_dir.display());

        Ok(Engine {
            database: self.database,
            reports: ReportStore::new(data_dir),
            secondary: self.secondary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_data_dir() {
        let engine = Engine::builder().build().unwrap();
        assert_eq!(engine.report_store().dir(), std::path::Path::new(DEFAULT_DATA_DIR));
        assert_eq!(engine.secondary_source(), &SecondarySource::None);
    }

    #[test]
    fn empty_data_dir_is_rejected() {
        let err = Engine::builder().data_dir("").build().unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
    }
}
