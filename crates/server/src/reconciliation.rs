//! Reconciliation API endpoints

use std::path::{Component, Path, PathBuf};

use api_types::reconciliation::ReportLocation;
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use engine::{LatestReport, ReconciliationReport};

use crate::{ServerError, server::ServerState};

/// Resolve `?data_dir=` to a subdirectory of the configured report location.
///
/// Only a single plain directory name is accepted, so requests can never
/// reach outside the configured location.
fn report_dir(state: &ServerState, location: &ReportLocation) -> Result<Option<PathBuf>, ServerError> {
    let Some(name) = location
        .data_dir
        .as_deref()
        .filter(|dir| !dir.trim().is_empty())
    else {
        return Ok(None);
    };

    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(child)), None) => {
            Ok(Some(state.engine.report_store().dir().join(child)))
        }
        _ => Err(ServerError::Generic(format!(
            "invalid data_dir \"{name}\": expected a directory name"
        ))),
    }
}

/// Handle requests for a new reconciliation run
pub async fn run(
    State(state): State<ServerState>,
    query: Result<Query<ReportLocation>, QueryRejection>,
) -> Result<Json<ReconciliationReport>, ServerError> {
    let Query(location) = query?;
    let dir = report_dir(&state, &location)?;
    let report = state.engine.run_reconciliation(dir.as_deref()).await?;
    state.counters.reconciliation_run();

    Ok(Json(report))
}

/// Handle requests for the last stored report
pub async fn latest(
    State(state): State<ServerState>,
    query: Result<Query<ReportLocation>, QueryRejection>,
) -> Result<Json<LatestReport>, ServerError> {
    let Query(location) = query?;
    let dir = report_dir(&state, &location)?;

    Ok(Json(state.engine.latest_report(dir.as_deref()).await?))
}
