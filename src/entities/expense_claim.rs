//! Expense claim entity - one worker-day of reconciled travel compensation.
//!
//! A claim starts life as a `draft` kept in sync with that day's visit
//! reports by claim derivation, and is submitted into the approval workflow
//! by the worker. At most one draft may exist per (`user_id`, `report_date`);
//! approved and rejected claims are terminal and immutable. The ad-hoc
//! expense lines attached to a claim live in [`super::expense_item`].

use super::status::{ClaimStatus, TravelType};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Expense claim database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "expense_claims")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier for the claim
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Worker the claim belongs to
    pub user_id: String,
    /// Day the claim covers; unique per user while status is draft
    #[serde(rename = "reportDateKey")]
    pub report_date: Date,
    /// Claim category: "Travel" for derived claims, "Leave" for leave-linked
    pub expense_type: String,
    /// HQ/INT classification taken from the day's first visit report
    pub travel_type: Option<TravelType>,
    /// Count of doctor visits on the day
    pub doctor_visits: i32,
    /// Count of chemist visits on the day
    pub chemist_visits: i32,
    /// Location taken from the day's first visit report
    pub location: String,
    /// Distance resolved from the location tables at derivation time
    pub distance_km: f64,
    /// Fare computed once per draft version; never recomputed after submit
    pub fare_amount: f64,
    /// Daily allowance copied from the employee profile
    pub allowance_amount: f64,
    /// Claim lifecycle state
    pub status: ClaimStatus,
    /// False for drafts and leave-linked claims created implicitly
    pub requires_approval: bool,
    /// Administrator who decided the claim
    pub reviewer: Option<String>,
    /// When the decision was made
    pub reviewed_at: Option<DateTimeUtc>,
    /// Reason supplied on rejection
    pub rejection_reason: Option<String>,
}

/// Defines relationships between `ExpenseClaim` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One claim has many ad-hoc expense line items
    #[sea_orm(has_many = "super::expense_item::Entity")]
    ExpenseItems,
}

impl Related<super::expense_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExpenseItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
