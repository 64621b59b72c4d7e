//! Liveness endpoint

use api_types::health::{DEGRADED, HEALTHY, Health, HealthChecks, NOT_SET, RequiredSettings};
use axum::{Json, extract::State};
use chrono::Utc;

use crate::{organization::is_set, server::ServerState};

/// Report `healthy` when documents can be produced, `degraded` otherwise.
pub async fn get(State(state): State<ServerState>) -> Json<Health> {
    let organization = &state.organization;
    let logo_exists = match &organization.logo_path {
        Some(path) => tokio::fs::try_exists(path).await.unwrap_or(false),
        None => false,
    };
    let checks = HealthChecks {
        email_provider: organization
            .email_provider
            .clone()
            .filter(|provider| is_set(Some(provider.as_str())))
            .unwrap_or_else(|| NOT_SET.to_string()),
        logo_exists,
        required_settings: RequiredSettings {
            organization_name: is_set(organization.name.as_deref()),
            ein: is_set(organization.ein.as_deref()),
            address: is_set(organization.address.as_deref()),
        },
    };

    let status = if checks.all_healthy() { HEALTHY } else { DEGRADED };
    tracing::debug!("health check performed: {status}");

    Json(Health {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
        checks,
    })
}
