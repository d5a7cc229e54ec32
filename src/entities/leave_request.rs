//! Leave request entity - an inclusive date interval a worker asks off.

use super::status::ReviewStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Leave request database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "leave_requests")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier for the request
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Worker requesting leave
    pub user_id: String,
    /// Kind of leave (casual, sick, ...); free-form, admin-interpreted
    #[serde(rename = "type")]
    pub leave_type: String,
    /// First day of leave (inclusive)
    pub start_date: Date,
    /// Last day of leave (inclusive)
    pub end_date: Date,
    /// Worker-supplied justification
    pub reason: String,
    /// Approval lifecycle state
    pub status: ReviewStatus,
    /// Administrator who decided the request
    pub reviewer: Option<String>,
    /// When the decision was made
    pub reviewed_at: Option<DateTimeUtc>,
    /// Reason supplied on rejection
    pub rejection_reason: Option<String>,
}

/// Leave requests link to leave-typed expense claims by (user, date) reads;
/// the store enforces no foreign key.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
