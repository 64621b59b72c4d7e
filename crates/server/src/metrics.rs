//! Metrics API endpoints

use api_types::metrics::{DesignationFunds, ProcessMetrics, ReviewerMetrics, format_uptime};
use axum::{Json, extract::State};
use chrono::Utc;

use crate::{ServerError, server::ServerState};

/// Handle requests for the reviewer dashboard
pub async fn reviewer(State(state): State<ServerState>) -> Result<Json<ReviewerMetrics>, ServerError> {
    let donation_count = state.engine.donation_count().await?;
    let funds_by_designation = state
        .engine
        .funds_by_designation()
        .await?
        .into_iter()
        .map(|line| DesignationFunds {
            name: line.designation,
            value: line.amount,
        })
        .collect();

    Ok(Json(ReviewerMetrics {
        donation_count,
        funds_by_designation,
    }))
}

/// Handle requests for process counters
pub async fn process(State(state): State<ServerState>) -> Json<ProcessMetrics> {
    let uptime_seconds = state.counters.uptime_seconds();

    Json(ProcessMetrics {
        timestamp: Utc::now(),
        uptime_seconds,
        uptime_human: format_uptime(uptime_seconds),
        reconciliations_run: state.counters.reconciliations_run(),
        statements_generated: state.counters.statements_generated(),
        receipts_generated: state.counters.receipts_generated(),
    })
}
