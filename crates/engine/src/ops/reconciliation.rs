use std::path::Path;

use crate::{
    EngineError, LatestReport, ReconciliationReport, ReportStore, ResultEngine, reconcile,
};

use super::Engine;

/// Run filesystem work on the blocking pool.
async fn blocking<T, F>(task: F) -> ResultEngine<T>
where
    F: FnOnce() -> ResultEngine<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|err| EngineError::Task(err.to_string()))?
}

impl Engine {
    /// Reconcile the donation table against the secondary source and store
    /// the result as the latest report.
    ///
    /// `data_dir` overrides the configured report location for this run.
    /// Nothing is written unless the whole run succeeds.
    pub async fn run_reconciliation(
        &self,
        data_dir: Option<&Path>,
    ) -> ResultEngine<ReconciliationReport> {
        let primary = self.donation_records().await?;
        let source = self.secondary.clone();
        let secondary = blocking(move || source.load()).await?;
        let report = reconcile(&primary, &secondary)?;

        let store = self.store_for(data_dir);
        let written = report.clone();
        blocking(move || store.write(&written)).await?;

        tracing::info!(
            primary_records = primary.len(),
            secondary_records = secondary.len(),
            "reconciliation completed, variance {}",
            report
                .variance_total
                .map_or_else(|| "unavailable".to_string(), |v| v.to_string())
        );
        Ok(report)
    }

    /// Latest stored report, or [`LatestReport::NoReport`].
    pub async fn latest_report(&self, data_dir: Option<&Path>) -> ResultEngine<LatestReport> {
        let store = self.store_for(data_dir);
        blocking(move || store.read()).await
    }

    fn store_for(&self, data_dir: Option<&Path>) -> ReportStore {
        match data_dir {
            Some(dir) => ReportStore::new(dir),
            None => self.reports.clone(),
        }
    }
}
