//! Monthly target entity - per-worker sales targets by month key.
//!
//! A row with `month_key = None` is the worker's default target, used when
//! no explicit row exists for the month being resolved.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Monthly sales target database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "monthly_targets")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier for the target row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Worker the target applies to
    pub user_id: String,
    /// Month key in "{year}_{month}" form; None marks the default row
    pub month_key: Option<String>,
    /// Target sales amount for the month
    pub target_amount: f64,
}

/// No modeled relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
