//! Location distance entity - the admin-owned global location→km table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Location distance database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "location_distances")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Location name, unique key
    #[sea_orm(primary_key, auto_increment = false)]
    pub name: String,
    /// One-way distance from headquarters in kilometres
    pub distance_km: f64,
}

/// No modeled relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
