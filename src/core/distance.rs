//! Location-distance resolution and maintenance.
//!
//! Distances come from two admin-owned tables: the shared
//! `location_distances` table and per-employee `location_overrides` entries.
//! Resolution checks the employee's override first, then the global table,
//! and falls back to zero for unknown locations.

use crate::entities::{
    LocationDistance, LocationOverride, location_distance, location_override,
};
use crate::errors::{Error, Result};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder,
};

/// Resolves the distance for a location as seen by one employee:
/// their override entry if present, else the global table, else 0.
pub async fn resolve_distance(
    db: &DatabaseConnection,
    user_id: &str,
    location: &str,
) -> Result<f64> {
    let override_entry = LocationOverride::find()
        .filter(location_override::Column::UserId.eq(user_id))
        .filter(location_override::Column::Name.eq(location))
        .one(db)
        .await?;

    if let Some(entry) = override_entry {
        return Ok(entry.distance_km);
    }

    let global = LocationDistance::find_by_id(location).one(db).await?;
    Ok(global.map_or(0.0, |entry| entry.distance_km))
}

/// Inserts or updates a global location-distance entry.
pub async fn upsert_location(
    db: &DatabaseConnection,
    name: &str,
    distance_km: f64,
) -> Result<location_distance::Model> {
    validate_entry(name, distance_km)?;
    let name = name.trim();

    let existing = LocationDistance::find_by_id(name).one(db).await?;
    if let Some(entry) = existing {
        let mut active_model: location_distance::ActiveModel = entry.into();
        active_model.distance_km = Set(distance_km);
        return active_model.update(db).await.map_err(Into::into);
    }

    let entry = location_distance::ActiveModel {
        name: Set(name.to_string()),
        distance_km: Set(distance_km),
    };
    entry.insert(db).await.map_err(Into::into)
}

/// Removes a global location-distance entry.
pub async fn remove_location(db: &DatabaseConnection, name: &str) -> Result<()> {
    let entry = LocationDistance::find_by_id(name)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            kind: "location",
            id: name.to_string(),
        })?;

    entry.delete(db).await?;
    Ok(())
}

/// Adds (or replaces) one entry in an employee's override map.
///
/// Uniqueness per (employee, name) is checked by read-then-write; the store
/// itself does not enforce it across concurrent writers.
pub async fn add_override(
    db: &DatabaseConnection,
    user_id: &str,
    name: &str,
    distance_km: f64,
) -> Result<location_override::Model> {
    validate_entry(name, distance_km)?;
    let name = name.trim();

    let existing = LocationOverride::find()
        .filter(location_override::Column::UserId.eq(user_id))
        .filter(location_override::Column::Name.eq(name))
        .one(db)
        .await?;

    if let Some(entry) = existing {
        let mut active_model: location_override::ActiveModel = entry.into();
        active_model.distance_km = Set(distance_km);
        return active_model.update(db).await.map_err(Into::into);
    }

    let entry = location_override::ActiveModel {
        user_id: Set(user_id.to_string()),
        name: Set(name.to_string()),
        distance_km: Set(distance_km),
        ..Default::default()
    };
    entry.insert(db).await.map_err(Into::into)
}

/// Removes one entry from an employee's override map.
pub async fn remove_override(db: &DatabaseConnection, user_id: &str, name: &str) -> Result<()> {
    let entry = LocationOverride::find()
        .filter(location_override::Column::UserId.eq(user_id))
        .filter(location_override::Column::Name.eq(name))
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            kind: "location override",
            id: format!("{user_id}/{name}"),
        })?;

    entry.delete(db).await?;
    Ok(())
}

/// Lists an employee's override entries, ordered by location name.
pub async fn list_overrides(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<Vec<location_override::Model>> {
    LocationOverride::find()
        .filter(location_override::Column::UserId.eq(user_id))
        .order_by_asc(location_override::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

fn validate_entry(name: &str, distance_km: f64) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Location name cannot be empty".to_string(),
        });
    }
    if !distance_km.is_finite() || distance_km < 0.0 {
        return Err(Error::InvalidAmount {
            amount: distance_km,
        });
    }
    Ok(())
}
