//! Service bootstrap for the `FieldMate` reconciliation core.
//!
//! Initializes logging, loads configuration, opens the database, and seeds
//! reference data. The core itself is invoked by the presentation layer via
//! direct function calls; there is no CLI surface here.

use dotenvy::dotenv;
use fieldmate::{config, errors::Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; non-fatal, env vars can be set externally
    dotenv().ok();

    // 3. Initialize database
    let db = config::database::create_connection().await?;
    config::database::create_tables(&db).await?;
    info!("Database initialized successfully.");

    // 4. Seed reference data if a config.toml is present
    match config::reference::load_default_config() {
        Ok(reference) => config::reference::seed_reference_data(&db, &reference).await?,
        Err(e) => warn!("No reference configuration loaded: {e}"),
    }

    info!("FieldMate core ready.");
    Ok(())
}
