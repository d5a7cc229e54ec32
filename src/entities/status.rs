//! Closed status and classification enums shared across entities.
//!
//! The original system carried these as free strings; here every lifecycle
//! state and visit classification is a string-backed `DeriveActiveEnum`, so
//! an out-of-range value cannot enter the database through typed code.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle of records created directly in `pending`
/// (visit reports, leave requests, sales orders).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    /// Awaiting an administrator decision
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Accepted; terminal and immutable
    #[sea_orm(string_value = "approved")]
    Approved,
    /// Declined with a reason; terminal and immutable
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// Lifecycle of expense claims, which start as editable drafts.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum ClaimStatus {
    /// Unsubmitted and mutable; at most one per (user, date)
    #[sea_orm(string_value = "draft")]
    Draft,
    /// Submitted, awaiting an administrator decision
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Accepted; terminal and immutable
    #[sea_orm(string_value = "approved")]
    Approved,
    /// Declined with a reason; terminal and immutable
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// Travel classification of a visit: headquarters (local) or interior
/// (outstation).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(8))")]
pub enum TravelType {
    /// Headquarters - local travel
    #[sea_orm(string_value = "HQ")]
    #[serde(rename = "HQ")]
    Hq,
    /// Interior - outstation travel
    #[sea_orm(string_value = "INT")]
    #[serde(rename = "INT")]
    Int,
}

/// Kind of establishment visited.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum HospitalType {
    /// Prescribing doctor
    #[sea_orm(string_value = "Doctor")]
    Doctor,
    /// Chemist / pharmacy
    #[sea_orm(string_value = "Chemist")]
    Chemist,
    /// Stockiest / wholesale distributor
    #[sea_orm(string_value = "Stockiest")]
    Stockiest,
}
