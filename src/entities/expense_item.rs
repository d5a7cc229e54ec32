//! Expense item entity - one ad-hoc expense line attached to a claim.
//!
//! Items form an ordered list under their claim (ascending id = entry
//! order) and are summed wholesale by the monthly aggregator.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Expense line item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "expense_items")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier for the line item
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Claim this line belongs to
    pub claim_id: i64,
    /// Expense category (food, lodging, ...)
    #[serde(rename = "type")]
    pub item_type: String,
    /// Day the expense was incurred
    pub date: Date,
    /// Free-form note
    pub remark: String,
    /// Amount claimed
    pub amount: f64,
}

/// Defines relationships between `ExpenseItem` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each line item belongs to one expense claim
    #[sea_orm(
        belongs_to = "super::expense_claim::Entity",
        from = "Column::ClaimId",
        to = "super::expense_claim::Column::Id"
    )]
    ExpenseClaim,
}

impl Related<super::expense_claim::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExpenseClaim.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
