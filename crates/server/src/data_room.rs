//! Data room index endpoint

use api_types::data_room::DataRoomFolder;
use axum::{Json, extract::State};

use crate::server::ServerState;

pub async fn index(State(state): State<ServerState>) -> Json<Vec<DataRoomFolder>> {
    Json(state.organization.data_room.clone())
}
