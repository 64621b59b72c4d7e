use engine::{DEFAULT_DATA_DIR, SecondarySource};
use migration::{Migrator, MigratorTrait};
use settings::Database;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "donations={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let Some(server) = settings.server else {
        tracing::warn!("no server settings found, nothing to run");
        return Ok(());
    };

    tracing::info!("Found server settings...");
    let db = parse_database(&server.database).await?;

    let data_dir = settings
        .reconciliation
        .data_dir
        .unwrap_or_else(|| DEFAULT_DATA_DIR.into());
    let secondary = settings
        .reconciliation
        .secondary_csv
        .map_or(SecondarySource::None, SecondarySource::Csv);

    let engine = engine::Engine::builder()
        .database(db)
        .data_dir(data_dir)
        .secondary_source(secondary)
        .build()?;

    let bind = server.bind.unwrap_or_else(|| "127.0.0.1".to_string());
    let addr = format!("{}:{}", bind, server.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let state = server::ServerState::new(engine).with_organization(settings.organization);
    server::run_with_listener(state, listener).await?;

    Ok(())
}

async fn parse_database(
    config: &settings::Database,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let url = match config {
        Database::Memory => String::from("sqlite::memory:"),
        Database::Sqlite(path) => format!("sqlite:{}?mode=rwc", path),
    };

    let database = sea_orm::Database::connect(url).await?;
    Migrator::up(&database, None).await?;
    Ok(database)
}
