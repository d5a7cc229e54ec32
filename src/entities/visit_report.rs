//! Visit report entity - one worker visit to a doctor, chemist, or stockiest.
//!
//! Reports are created `pending` by worker submission, mutated only by the
//! approval workflow, and never deleted by the core. The optional
//! `selfie_ref` points at an asset owned by the asset-store collaborator.

use super::status::{HospitalType, ReviewStatus, TravelType};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Visit report database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "visit_reports")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier for the report
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Worker who filed the report
    pub user_id: String,
    /// Calendar date of the visit
    pub date: Date,
    /// HQ (local) or INT (outstation) travel
    pub travel_type: TravelType,
    /// Kind of establishment visited
    pub hospital_type: HospitalType,
    /// Visited location name, resolved against the distance table
    pub location: String,
    /// Approval lifecycle state
    pub status: ReviewStatus,
    /// Reference to the check-in selfie asset, if one was uploaded
    pub selfie_ref: Option<String>,
    /// Administrator who decided the report
    pub reviewer: Option<String>,
    /// When the decision was made
    pub reviewed_at: Option<DateTimeUtc>,
    /// Reason supplied on rejection
    pub rejection_reason: Option<String>,
}

/// Visit reports correlate with expense claims by (user, date) reads only;
/// no foreign keys are enforced by the store.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
