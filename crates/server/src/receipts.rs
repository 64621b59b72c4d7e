//! Receipt API endpoints

use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};
use engine::DonationReceipt;

use crate::{ServerError, server::ServerState};

/// Handle requests for the receipt data of a donation
pub async fn get(
    State(state): State<ServerState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<DonationReceipt>, ServerError> {
    let Path(donation_id) = path?;
    let receipt = state.engine.donation_receipt(&donation_id).await?;
    state.counters.receipt_generated();

    Ok(Json(receipt))
}
