//! lightbnb CLI - operator access to the LightBnB store
//!
//! Every command opens a lazily connected pool, runs one repository call and
//! prints the result as JSON on stdout. Errors go to stderr with a non-zero
//! exit status.
//!
//! ```bash
//! lightbnb migrate
//! lightbnb search --city Vancouver --min-rating 4 --limit 5
//! lightbnb user get --email tristanjacobs@gmail.com
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lightbnb_db::{Database, DbConfig};
use tracing::debug;

mod commands;
mod tracing_setup;

use commands::{PropertyArgs, ReservationsArgs, SearchArgs, UserArgs};

#[derive(Parser, Debug)]
#[command(
    name = "lightbnb",
    author,
    version,
    about = "Query and manage the LightBnB rental store"
)]
struct Cli {
    /// Config file (default: ~/.lightbnb/config.toml)
    #[arg(long, global = true, value_name = "PATH", env = "LIGHTBNB_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging, including statement text
    #[arg(long, global = true)]
    debug: bool,

    /// Export traces over OTLP (needs the telemetry feature)
    #[arg(long, global = true)]
    otel: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Apply pending schema migrations
    Migrate,
    /// Search properties by city, owner, price range and rating
    Search(SearchArgs),
    /// Look up or add users
    User(UserArgs),
    /// List a guest's reservations
    Reservations(ReservationsArgs),
    /// Add properties
    Property(PropertyArgs),
}

fn load_config(path: Option<&PathBuf>) -> Result<DbConfig> {
    match path {
        Some(path) => DbConfig::load(path),
        None => DbConfig::load_or_default(),
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_ref()).context("failed to load configuration")?;
    debug!(url = %config.redacted_url(), "configuration loaded");

    let db = Database::connect_lazy(&config).context("invalid database url")?;

    let outcome = match cli.command {
        Commands::Migrate => commands::run_migrate(&db).await,
        Commands::Search(args) => commands::run_search(&db, args).await,
        Commands::User(args) => commands::run_user(&db, args).await,
        Commands::Reservations(args) => commands::run_reservations(&db, args).await,
        Commands::Property(args) => commands::run_property(&db, args).await,
    };

    db.close().await;
    outcome
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let tracing_config = tracing_setup::TracingConfig {
        debug: cli.debug,
        otel: cli.otel,
    };
    if let Err(err) = tracing_setup::init(&tracing_config) {
        eprintln!("warning: logging disabled: {err:#}");
    }

    let result = run(cli).await;
    tracing_setup::shutdown_otel();
    result
}
