//! Fare pricing - the global rate setting and the fare computation.
//!
//! The fare rate is process-wide admin state in the original system; here it
//! is always read into an explicit [`FareSnapshot`] first and the
//! computation itself is a pure function of its inputs. Callers that want to
//! observe a later rate change must take a fresh snapshot; a fare already
//! written into a submitted claim is never recomputed.

use crate::entities::{SystemSetting, system_setting};
use crate::errors::{Error, Result};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait};

const FARE_RATE_KEY: &str = "fare_per_distance";

/// Point-in-time copy of the fare configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FareSnapshot {
    /// Fare charged per kilometre
    pub fare_per_distance: f64,
}

impl FareSnapshot {
    /// Reads the current global rate into a snapshot. An unset rate reads
    /// as zero; a stored value that fails to parse is a configuration error.
    pub async fn load(db: &DatabaseConnection) -> Result<Self> {
        let fare_per_distance = get_fare_rate(db).await?.unwrap_or(0.0);
        Ok(Self { fare_per_distance })
    }
}

/// Computes the fare for a distance under a configuration snapshot,
/// rounded to two decimal places. Deterministic; no side effects.
#[must_use]
pub fn calculate_fare(distance_km: f64, snapshot: &FareSnapshot) -> f64 {
    round_currency(distance_km * snapshot.fare_per_distance)
}

/// Rounds a monetary value to two decimal places.
#[must_use]
pub fn round_currency(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Retrieves the stored global fare rate, or `None` if it has never been set.
pub async fn get_fare_rate(db: &DatabaseConnection) -> Result<Option<f64>> {
    let setting = SystemSetting::find_by_id(FARE_RATE_KEY).one(db).await?;

    match setting {
        Some(s) => s
            .value
            .parse::<f64>()
            .map(Some)
            .map_err(|e| Error::Config {
                message: format!("Stored fare rate is not numeric: {e}"),
            }),
        None => Ok(None),
    }
}

/// Writes the global fare rate, overwriting any previous value.
/// No history is retained.
pub async fn set_fare_rate(db: &DatabaseConnection, rate: f64) -> Result<()> {
    if !rate.is_finite() || rate < 0.0 {
        return Err(Error::InvalidAmount { amount: rate });
    }

    let now = chrono::Utc::now().naive_utc();
    let existing = SystemSetting::find_by_id(FARE_RATE_KEY).one(db).await?;

    if let Some(setting) = existing {
        let mut active_model: system_setting::ActiveModel = setting.into();
        active_model.value = Set(rate.to_string());
        active_model.updated_at = Set(now);
        active_model.update(db).await?;
    } else {
        let setting = system_setting::ActiveModel {
            key: Set(FARE_RATE_KEY.to_string()),
            value: Set(rate.to_string()),
            updated_at: Set(now),
        };
        setting.insert(db).await?;
    }

    Ok(())
}
