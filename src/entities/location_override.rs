//! Location override entity - per-employee distance overrides.
//!
//! Overrides shadow the global [`super::location_distance`] table during
//! distance resolution. They are a first-class keyed entity with explicit
//! add/remove operations rather than a partial map patched in place.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Location override database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "location_overrides")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier for the override entry
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Employee the override applies to
    pub user_id: String,
    /// Location name, unique per employee
    pub name: String,
    /// Overriding distance in kilometres
    pub distance_km: f64,
}

/// No modeled relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
