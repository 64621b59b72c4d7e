use std::{error::Error, path::PathBuf};

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use engine::{DEFAULT_DATA_DIR, Donor, Engine, EngineError, NewDonation, SecondarySource};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};
use serde_json::json;

#[derive(Parser, Debug)]
#[command(name = "donations_admin")]
#[command(about = "Admin utilities for donations (donors, gifts, reconciliation)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./donations.db?mode=rwc"
    )]
    database_url: String,

    /// Directory holding the reconciliation report (also read from `DATA_DIR`).
    #[arg(long, env = "DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Donor(DonorArgs),
    Donation(DonationArgs),
    Reconcile(ReconcileArgs),
}

#[derive(Args, Debug)]
struct DonorArgs {
    #[command(subcommand)]
    command: DonorCommand,
}

#[derive(Subcommand, Debug)]
enum DonorCommand {
    Create(DonorCreateArgs),
}

#[derive(Args, Debug)]
struct DonorCreateArgs {
    #[arg(long)]
    donor_id: String,
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    country: Option<String>,
    #[arg(long)]
    donor_type: Option<String>,
}

#[derive(Args, Debug)]
struct DonationArgs {
    #[command(subcommand)]
    command: DonationCommand,
}

#[derive(Subcommand, Debug)]
enum DonationCommand {
    Create(DonationCreateArgs),
}

#[derive(Args, Debug)]
struct DonationCreateArgs {
    #[arg(long)]
    donation_id: Option<String>,
    #[arg(long)]
    donor_id: String,
    /// Decimal amount, e.g. `25.00`.
    #[arg(long)]
    amount: String,
    #[arg(long)]
    designation: Option<String>,
    /// RFC 3339 timestamp; defaults to now.
    #[arg(long)]
    received_at: Option<DateTime<Utc>>,
    #[arg(long)]
    method: Option<String>,
    #[arg(long)]
    restricted: bool,
}

#[derive(Args, Debug)]
struct ReconcileArgs {
    #[command(subcommand)]
    command: ReconcileCommand,
}

#[derive(Subcommand, Debug)]
enum ReconcileCommand {
    /// Run a reconciliation and store the report.
    Run {
        /// CSV export of the internal records (also read from
        /// `SECONDARY_CSV`, so runs match the server's configured source).
        #[arg(long, env = "SECONDARY_CSV")]
        secondary_csv: Option<PathBuf>,
    },
    /// Print the last stored report.
    Latest,
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

/// Exit with a readable message for errors caused by the arguments.
fn exit_on_user_error(err: EngineError) -> Box<dyn Error + Send + Sync> {
    match err {
        EngineError::KeyNotFound(_)
        | EngineError::ExistingKey(_)
        | EngineError::InvalidAmount(_)
        | EngineError::InvalidInput(_) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
        other => other.into(),
    }
}

fn secondary_source(command: &Command) -> SecondarySource {
    match command {
        Command::Reconcile(ReconcileArgs {
            command:
                ReconcileCommand::Run {
                    secondary_csv: Some(path),
                },
        }) => SecondarySource::Csv(path.clone()),
        _ => SecondarySource::None,
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let db = connect_db(&cli.database_url).await?;
    let secondary = secondary_source(&cli.command);
    let engine = Engine::builder()
        .database(db)
        .data_dir(cli.data_dir)
        .secondary_source(secondary)
        .build()?;

    let output = match cli.command {
        Command::Donor(DonorArgs {
            command: DonorCommand::Create(args),
        }) => {
            let donor = Donor {
                phone: args.phone,
                country: args.country,
                donor_type: args.donor_type,
                ..Donor::new(&args.donor_id, &args.name, &args.email)
            };
            let donor_id = engine.new_donor(&donor).await.map_err(exit_on_user_error)?;
            json!({ "created": "donor", "donor_id": donor_id })
        }
        Command::Donation(DonationArgs {
            command: DonationCommand::Create(args),
        }) => {
            let mut donation = NewDonation::new(&args.donor_id, args.amount);
            donation.donation_id = args.donation_id;
            donation.designation = args.designation;
            donation.method = args.method;
            donation.restricted = args.restricted;
            if let Some(received_at) = args.received_at {
                donation = donation.received_at(received_at);
            }
            let donation_id = engine
                .new_donation(donation)
                .await
                .map_err(exit_on_user_error)?;
            let stored = engine.donation(&donation_id).await?;
            json!({
                "created": "donation",
                "donation_id": stored.donation_id,
                "receipt_id": stored.receipt_id,
                "amount": stored.amount,
                "designation": stored.designation,
            })
        }
        Command::Reconcile(ReconcileArgs {
            command: ReconcileCommand::Run { .. },
        }) => serde_json::to_value(engine.run_reconciliation(None).await?)?,
        Command::Reconcile(ReconcileArgs {
            command: ReconcileCommand::Latest,
        }) => serde_json::to_value(engine.latest_report(None).await?)?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
