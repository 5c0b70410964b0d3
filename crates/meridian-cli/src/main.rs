//! Meridian CRM — terminal entry point.

use clap::Parser;
use meridian_auth::{AuthConfig, AuthService};
use meridian_core::error::{CrmError, CrmResult};
use meridian_db::repository::{
    SurrealClientRepository, SurrealContractRepository, SurrealEventRepository,
    SurrealStaffRepository,
};
use meridian_db::{DbConfig, DbManager, run_migrations};
use tracing_subscriber::EnvFilter;

mod menu;
mod output;
mod prompt;
mod session;
mod validate;

/// Terminal CRM for the Meridian events company.
#[derive(Debug, Parser)]
#[command(name = "meridian", version, about)]
struct Cli {}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let _cli = Cli::parse();

    if let Err(e) = run().await {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run() -> CrmResult<()> {
    tracing::info!("Starting Meridian CRM");

    // Configuration is validated up front; a missing key aborts here,
    // before any prompt is shown.
    let auth_config = AuthConfig::from_env()?;
    let db_config = DbConfig::from_env()?;

    let db = DbManager::connect(&db_config)
        .await
        .map_err(|e| CrmError::Database(e.to_string()))?;
    run_migrations(db.client()).await?;

    let client = db.client().clone();
    let staff = SurrealStaffRepository::new(client.clone());
    let app = menu::App {
        auth: AuthService::new(staff.clone(), auth_config),
        staff,
        clients: SurrealClientRepository::new(client.clone()),
        contracts: SurrealContractRepository::new(client.clone()),
        events: SurrealEventRepository::new(client),
    };

    menu::run(&app).await
}
