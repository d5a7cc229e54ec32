//! Employee profile entity - per-worker compensation parameters.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Employee profile database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employee_profiles")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Worker this profile belongs to
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    /// Base salary credited per worked (non-leave) claim day
    pub daily_salary: f64,
    /// Daily allowance copied onto derived claims
    pub allowance_amount: f64,
    /// Home station used for HQ/INT classification
    pub headquarters: String,
}

/// Per-employee distance overrides live in
/// [`super::location_override`], keyed by `user_id`.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
