use axum::{
    Json,
    extract::rejection::{PathRejection, QueryRejection},
    http::StatusCode,
    response::IntoResponse,
};
use engine::EngineError;

use serde::Serialize;
pub use counters::Counters;
pub use organization::{Organization, default_data_room};
pub use server::{ServerState, router, run_with_listener, spawn_with_listener};

mod counters;
mod data_room;
mod health;
mod metrics;
mod organization;
mod receipts;
mod reconciliation;
mod server;
mod statements;

pub mod types {
    pub mod reconciliation {
        pub use api_types::reconciliation::ReportLocation;
        pub use engine::{LatestReport, ReconciliationReport};
    }

    pub mod statement {
        pub use api_types::statement::{YearEndParams, YearEndSummary};
        pub use engine::DonorStatement;
    }

    pub mod receipt {
        pub use engine::DonationReceipt;
    }

    pub mod data_room {
        pub use api_types::data_room::DataRoomFolder;
    }

    pub mod metrics {
        pub use api_types::metrics::{DesignationFunds, ProcessMetrics, ReviewerMetrics};
    }

    pub mod health {
        pub use api_types::health::{Health, HealthChecks, RequiredSettings};
    }
}

pub enum ServerError {
    Engine(EngineError),
    Generic(String),
    NotFound(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::ExistingKey(_) => StatusCode::CONFLICT,
        EngineError::InvalidAmount(_) | EngineError::InvalidInput(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        EngineError::Storage(_)
        | EngineError::Serialization(_)
        | EngineError::Import(_)
        | EngineError::Task(_)
        | EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        err @ (EngineError::Storage(_)
        | EngineError::Serialization(_)
        | EngineError::Import(_)
        | EngineError::Task(_)) => {
            tracing::error!("{err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), message_for_engine_error(err)),
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
            ServerError::NotFound(err) => (StatusCode::NOT_FOUND, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl From<PathRejection> for ServerError {
    fn from(value: PathRejection) -> Self {
        Self::Generic(value.body_text())
    }
}

impl From<QueryRejection> for ServerError {
    fn from(value: QueryRejection) -> Self {
        Self::Generic(value.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_not_found_maps_to_404() {
        let res = ServerError::from(EngineError::KeyNotFound("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn engine_conflict_maps_to_409() {
        let res = ServerError::from(EngineError::ExistingKey("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn engine_validation_maps_to_422() {
        let res = ServerError::from(EngineError::InvalidAmount("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let res = ServerError::from(EngineError::InvalidInput("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn storage_failure_maps_to_500() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let res = ServerError::from(EngineError::Storage(io)).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let res = ServerError::from(EngineError::Import("bad csv".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn storage_detail_is_hidden() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "/secret/path");
        assert_eq!(
            message_for_engine_error(EngineError::Storage(io)),
            "internal server error"
        );
        assert_eq!(
            message_for_engine_error(EngineError::KeyNotFound("d1".to_string())),
            "\"d1\" key not found!"
        );
    }

    #[test]
    fn generic_maps_to_400() {
        let res = ServerError::Generic("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        let res = ServerError::NotFound("nothing".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
