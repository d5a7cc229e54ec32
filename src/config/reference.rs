//! Reference-data configuration loading from config.toml
//!
//! This module loads the admin-maintained reference data used by fare
//! pricing - the location→distance table and the global fare rate - from a
//! TOML file, and seeds the database with it on startup. Seeding is
//! idempotent: existing rows and an already-set rate are left untouched, so
//! admin edits made at runtime survive restarts.

use crate::entities::{LocationDistance, LocationDistanceModel, location_distance};
use crate::errors::{Error, Result};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct ReferenceConfig {
    /// Global fare rate applied per kilometre
    pub fare_per_distance: f64,
    /// Location→distance entries to seed
    #[serde(default)]
    pub locations: Vec<LocationConfig>,
}

/// Configuration for a single location-distance entry
#[derive(Debug, Deserialize, Clone)]
pub struct LocationConfig {
    /// Location name (key)
    pub name: String,
    /// One-way distance from headquarters in kilometres
    pub distance_km: f64,
}

/// Loads reference configuration from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read, the TOML syntax is invalid,
/// or required fields are missing.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ReferenceConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads reference configuration from the default location (./config.toml)
pub fn load_default_config() -> Result<ReferenceConfig> {
    load_config("config.toml")
}

/// Seeds the database with reference data from the configuration.
///
/// Locations already present are left untouched, and the fare rate is only
/// written when no rate has been set yet.
pub async fn seed_reference_data(
    db: &DatabaseConnection,
    config: &ReferenceConfig,
) -> Result<()> {
    let existing: Vec<LocationDistanceModel> = LocationDistance::find().all(db).await?;
    let mut seeded = 0usize;

    for location in &config.locations {
        if existing.iter().any(|l| l.name == location.name) {
            continue;
        }
        let entry = location_distance::ActiveModel {
            name: Set(location.name.clone()),
            distance_km: Set(location.distance_km),
        };
        entry.insert(db).await?;
        seeded += 1;
    }

    if crate::core::fare::get_fare_rate(db).await?.is_none() {
        crate::core::fare::set_fare_rate(db, config.fare_per_distance).await?;
    }

    info!(
        seeded,
        total = config.locations.len(),
        "Seeded location-distance reference data"
    );
    Ok(())
}
