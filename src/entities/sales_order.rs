//! Sales order entity - one product order placed by a worker.
//!
//! Pricing may arrive as a `total_amount`, as a `unit_price` to multiply by
//! quantity, or not at all on legacy records; the sales target tracker
//! resolves the effective amount. Approved orders are immutable.

use super::status::ReviewStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sales order database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sales_orders")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier for the order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Worker who placed the order
    pub user_id: String,
    /// Ordered product
    pub product_id: String,
    /// Units ordered
    pub quantity: i32,
    /// Per-unit price, when priced that way
    pub unit_price: Option<f64>,
    /// Pre-computed order total, when present
    pub total_amount: Option<f64>,
    /// Approval lifecycle state
    pub status: ReviewStatus,
    /// When the order was placed; buckets the order into a sales month
    pub created_at: DateTimeUtc,
    /// Administrator who decided the order
    pub reviewer: Option<String>,
    /// When the decision was made
    pub reviewed_at: Option<DateTimeUtc>,
    /// Reason supplied on rejection
    pub rejection_reason: Option<String>,
}

/// Orders relate to targets only through `user_id` and time window.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
