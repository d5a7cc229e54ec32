//! Core business logic - framework-agnostic reconciliation operations.
//!
//! Each submodule owns one component of the engine: worker submissions,
//! fare pricing, distance resolution, daily claim derivation, monthly
//! aggregation, the approval state machine, and sales-target tracking.

/// Approval workflow state machine across the four record kinds
pub mod approval;
/// Daily expense-claim derivation from visit reports
pub mod claim;
/// Location-distance tables and per-employee overrides
pub mod distance;
/// Fare snapshot and computation
pub mod fare;
/// Monthly compensation aggregation
pub mod monthly;
/// Worker submission operations for the primary record kinds
pub mod records;
/// Sales-target resolution and achievement
pub mod target;
