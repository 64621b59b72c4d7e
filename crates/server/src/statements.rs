//! Donor statement API endpoints

use api_types::statement::{YearEndParams, YearEndSummary};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
};
use engine::DonorStatement;

use crate::{ServerError, server::ServerState};

/// Handle requests for the annual statement of a donor
pub async fn get(
    State(state): State<ServerState>,
    path: Result<Path<(String, i32)>, PathRejection>,
) -> Result<Json<DonorStatement>, ServerError> {
    let Path((donor_id, year)) = path?;
    let statement = state
        .engine
        .donor_statement(&donor_id, year)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("no donations for {donor_id} in {year}")))?;
    state.counters.statement_generated();

    Ok(Json(statement))
}

/// Handle requests for the year-end statement batch
pub async fn year_end(
    State(state): State<ServerState>,
    query: Result<Query<YearEndParams>, QueryRejection>,
) -> Result<Json<YearEndSummary>, ServerError> {
    let Query(params) = query?;
    let statements = state.engine.year_end_statements(params.year).await?;
    state.counters.statements_generated_by(statements.len() as u64);

    Ok(Json(YearEndSummary {
        generated: statements.len(),
    }))
}
