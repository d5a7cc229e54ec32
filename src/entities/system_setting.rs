//! System setting entity - admin-owned key-value settings.
//!
//! Holds the single global fare-per-distance rate under the
//! `fare_per_distance` key. Values are versionless; updates overwrite in
//! place and no history is retained.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// System setting database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "system_settings")]
pub struct Model {
    /// Setting key
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    /// Setting value, stored as text and parsed by the consumer
    pub value: String,
    /// When the value was last written
    pub updated_at: DateTime,
}

/// No modeled relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
