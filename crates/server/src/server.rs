use axum::{
    Router,
    routing::{get, post},
};

use std::sync::Arc;

use crate::{
    Counters, Organization, data_room, health, metrics, receipts, reconciliation, statements,
};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub counters: Arc<Counters>,
    pub organization: Arc<Organization>,
}

impl ServerState {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine: Arc::new(engine),
            counters: Arc::new(Counters::new()),
            organization: Arc::new(Organization::default()),
        }
    }

    pub fn with_organization(mut self, organization: Organization) -> Self {
        self.organization = Arc::new(organization);
        self
    }
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/health", get(health::get))
        .route("/metrics", get(metrics::process))
        .route("/api/v1/reconciliation/run", post(reconciliation::run))
        .route("/api/v1/reconciliation/latest", get(reconciliation::latest))
        .route(
            "/api/v1/donors/{donor_id}/statement/{year}",
            get(statements::get),
        )
        .route(
            "/api/v1/tasks/year-end-statements",
            post(statements::year_end),
        )
        .route(
            "/api/v1/donations/{donation_id}/receipt",
            get(receipts::get),
        )
        .route("/api/v1/metrics/reviewer", get(metrics::reviewer))
        .route("/api/v1/data-room", get(data_room::index))
        .with_state(state)
}

pub async fn run_with_listener(
    state: ServerState,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    state: ServerState,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(state, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
