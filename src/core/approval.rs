//! Approval workflow across the four record kinds.
//!
//! One state machine governs visit reports, expense claims, leave requests,
//! and sales orders: `pending → approved` or `pending → rejected`, with
//! expense claims additionally starting as `draft` until submitted.
//! Approved and rejected are terminal. Submitted items arrive carrying a
//! human-readable type label which is dispatched through [`RecordKind`];
//! labels outside the mapping table are a validation error, never a silent
//! no-op.
//!
//! Approving a leave request propagates the decision onto the leave-linked
//! expense claims covered by its interval. The two writes are sequential
//! and non-transactional, leave first: a crash in between leaves the
//! request decided while its claims stay pending, an accepted
//! inconsistency window of the store model.

use crate::core::claim::LEAVE_EXPENSE_TYPE;
use crate::entities::{
    ClaimStatus, ExpenseClaim, LeaveRequest, ReviewStatus, SalesOrder, VisitReport, expense_claim,
    leave_request, sales_order, visit_report,
};
use crate::errors::{Error, Result};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
};
use tracing::warn;

/// Best-effort collaborator owning binary assets referenced by records.
///
/// Deletion is advisory cleanup: callers log failures and carry on.
#[allow(async_fn_in_trait)]
pub trait AssetStore {
    /// Deletes the asset behind a reference.
    async fn delete_asset(&self, asset_ref: &str) -> Result<()>;
}

/// Default collaborator for deployments without an asset store.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAssetStore;

impl AssetStore for NoopAssetStore {
    async fn delete_asset(&self, asset_ref: &str) -> Result<()> {
        tracing::debug!(asset_ref, "no asset store configured, skipping deletion");
        Ok(())
    }
}

/// The four record kinds the workflow can decide on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// Daily visit report
    VisitReport,
    /// Expense claim
    ExpenseClaim,
    /// Leave request
    LeaveRequest,
    /// Sales order
    SalesOrder,
}

impl RecordKind {
    /// Maps a submitted item's human-readable type label onto a record
    /// kind. The table is exhaustive; anything else is a validation error.
    pub fn from_label(label: &str) -> Result<Self> {
        match label.trim() {
            "Travel" | "Expense" => Ok(Self::ExpenseClaim),
            "Daily Call Report" | "Visit Report" => Ok(Self::VisitReport),
            "Leave" | "Leave Request" => Ok(Self::LeaveRequest),
            "Order" | "Sales Order" => Ok(Self::SalesOrder),
            other => Err(Error::UnknownSubmissionType {
                label: other.to_string(),
            }),
        }
    }

    /// Display label for error messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::VisitReport => "visit report",
            Self::ExpenseClaim => "expense claim",
            Self::LeaveRequest => "leave request",
            Self::SalesOrder => "sales order",
        }
    }
}

/// Submits a draft expense claim into the approval queue.
///
/// Only expense claims have a draft stage; the other kinds are created
/// directly in pending.
pub async fn submit_expense_claim(
    db: &DatabaseConnection,
    claim_id: i64,
) -> Result<expense_claim::Model> {
    let claim = ExpenseClaim::find_by_id(claim_id)
        .one(db)
        .await?
        .ok_or_else(|| not_found(RecordKind::ExpenseClaim, claim_id))?;

    if claim.status != ClaimStatus::Draft {
        return Err(Error::Validation {
            message: format!("Expense claim {claim_id} is not a draft and cannot be submitted"),
        });
    }

    let mut active_model: expense_claim::ActiveModel = claim.into();
    active_model.status = Set(ClaimStatus::Pending);
    active_model.requires_approval = Set(true);
    active_model.update(db).await.map_err(Into::into)
}

/// Approves a pending record, stamping approver and timestamp.
pub async fn approve<A: AssetStore>(
    db: &DatabaseConnection,
    assets: &A,
    kind: RecordKind,
    id: i64,
    approver: &str,
) -> Result<()> {
    require_reviewer(approver)?;
    match kind {
        RecordKind::VisitReport => approve_visit_report(db, assets, id, approver).await,
        RecordKind::ExpenseClaim => approve_expense_claim(db, id, approver).await,
        RecordKind::LeaveRequest => approve_leave_request(db, id, approver).await,
        RecordKind::SalesOrder => approve_sales_order(db, id, approver).await,
    }
}

/// Rejects a pending record. A non-empty reason is required and validated
/// before any write; rejection is terminal.
pub async fn reject(
    db: &DatabaseConnection,
    kind: RecordKind,
    id: i64,
    approver: &str,
    reason: &str,
) -> Result<()> {
    require_reviewer(approver)?;
    if reason.trim().is_empty() {
        return Err(Error::Validation {
            message: "Rejection requires a reason".to_string(),
        });
    }
    let reason = reason.trim();

    match kind {
        RecordKind::VisitReport => reject_visit_report(db, id, approver, reason).await,
        RecordKind::ExpenseClaim => reject_expense_claim(db, id, approver, reason).await,
        RecordKind::LeaveRequest => reject_leave_request(db, id, approver, reason).await,
        RecordKind::SalesOrder => reject_sales_order(db, id, approver, reason).await,
    }
}

async fn approve_visit_report<A: AssetStore>(
    db: &DatabaseConnection,
    assets: &A,
    id: i64,
    approver: &str,
) -> Result<()> {
    let report = VisitReport::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| not_found(RecordKind::VisitReport, id))?;
    ensure_pending(report.status, RecordKind::VisitReport, id)?;

    let selfie_ref = report.selfie_ref.clone();
    let mut active_model: visit_report::ActiveModel = report.into();
    active_model.status = Set(ReviewStatus::Approved);
    stamp_review(&mut active_model.reviewer, &mut active_model.reviewed_at, approver);
    active_model.update(db).await?;

    // Deferred cleanup: deletion failure must not undo the approval
    if let Some(asset_ref) = selfie_ref {
        if let Err(e) = assets.delete_asset(&asset_ref).await {
            warn!(asset_ref, error = %e, "selfie deletion failed after visit approval");
        }
    }

    Ok(())
}

async fn reject_visit_report(
    db: &DatabaseConnection,
    id: i64,
    approver: &str,
    reason: &str,
) -> Result<()> {
    let report = VisitReport::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| not_found(RecordKind::VisitReport, id))?;
    ensure_pending(report.status, RecordKind::VisitReport, id)?;

    let mut active_model: visit_report::ActiveModel = report.into();
    active_model.status = Set(ReviewStatus::Rejected);
    active_model.rejection_reason = Set(Some(reason.to_string()));
    stamp_review(&mut active_model.reviewer, &mut active_model.reviewed_at, approver);
    active_model.update(db).await?;
    Ok(())
}

async fn approve_expense_claim(db: &DatabaseConnection, id: i64, approver: &str) -> Result<()> {
    let claim = ExpenseClaim::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| not_found(RecordKind::ExpenseClaim, id))?;
    ensure_claim_pending(claim.status, id)?;

    let mut active_model: expense_claim::ActiveModel = claim.into();
    active_model.status = Set(ClaimStatus::Approved);
    stamp_review(&mut active_model.reviewer, &mut active_model.reviewed_at, approver);
    active_model.update(db).await?;
    Ok(())
}

async fn reject_expense_claim(
    db: &DatabaseConnection,
    id: i64,
    approver: &str,
    reason: &str,
) -> Result<()> {
    let claim = ExpenseClaim::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| not_found(RecordKind::ExpenseClaim, id))?;
    ensure_claim_pending(claim.status, id)?;

    let mut active_model: expense_claim::ActiveModel = claim.into();
    active_model.status = Set(ClaimStatus::Rejected);
    active_model.rejection_reason = Set(Some(reason.to_string()));
    stamp_review(&mut active_model.reviewer, &mut active_model.reviewed_at, approver);
    active_model.update(db).await?;
    Ok(())
}

async fn approve_leave_request(db: &DatabaseConnection, id: i64, approver: &str) -> Result<()> {
    let leave = LeaveRequest::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| not_found(RecordKind::LeaveRequest, id))?;
    ensure_pending(leave.status, RecordKind::LeaveRequest, id)?;

    // Leave first, linked claims second; not atomic across the two
    let snapshot = leave.clone();
    let mut active_model: leave_request::ActiveModel = leave.into();
    active_model.status = Set(ReviewStatus::Approved);
    stamp_review(&mut active_model.reviewer, &mut active_model.reviewed_at, approver);
    active_model.update(db).await?;

    propagate_leave_decision(db, &snapshot, ClaimStatus::Approved, approver, None).await
}

async fn reject_leave_request(
    db: &DatabaseConnection,
    id: i64,
    approver: &str,
    reason: &str,
) -> Result<()> {
    let leave = LeaveRequest::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| not_found(RecordKind::LeaveRequest, id))?;
    ensure_pending(leave.status, RecordKind::LeaveRequest, id)?;

    let snapshot = leave.clone();
    let mut active_model: leave_request::ActiveModel = leave.into();
    active_model.status = Set(ReviewStatus::Rejected);
    active_model.rejection_reason = Set(Some(reason.to_string()));
    stamp_review(&mut active_model.reviewer, &mut active_model.reviewed_at, approver);
    active_model.update(db).await?;

    propagate_leave_decision(db, &snapshot, ClaimStatus::Rejected, approver, Some(reason)).await
}

async fn approve_sales_order(db: &DatabaseConnection, id: i64, approver: &str) -> Result<()> {
    let order = SalesOrder::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| not_found(RecordKind::SalesOrder, id))?;
    ensure_pending(order.status, RecordKind::SalesOrder, id)?;

    let mut active_model: sales_order::ActiveModel = order.into();
    active_model.status = Set(ReviewStatus::Approved);
    stamp_review(&mut active_model.reviewer, &mut active_model.reviewed_at, approver);
    active_model.update(db).await?;
    Ok(())
}

async fn reject_sales_order(
    db: &DatabaseConnection,
    id: i64,
    approver: &str,
    reason: &str,
) -> Result<()> {
    let order = SalesOrder::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| not_found(RecordKind::SalesOrder, id))?;
    ensure_pending(order.status, RecordKind::SalesOrder, id)?;

    let mut active_model: sales_order::ActiveModel = order.into();
    active_model.status = Set(ReviewStatus::Rejected);
    active_model.rejection_reason = Set(Some(reason.to_string()));
    stamp_review(&mut active_model.reviewer, &mut active_model.reviewed_at, approver);
    active_model.update(db).await?;
    Ok(())
}

/// Applies a leave decision to the pending leave-linked claims covered by
/// the request's interval.
async fn propagate_leave_decision(
    db: &DatabaseConnection,
    leave: &leave_request::Model,
    status: ClaimStatus,
    approver: &str,
    reason: Option<&str>,
) -> Result<()> {
    let linked = ExpenseClaim::find()
        .filter(expense_claim::Column::UserId.eq(&leave.user_id))
        .filter(expense_claim::Column::ExpenseType.eq(LEAVE_EXPENSE_TYPE))
        .filter(expense_claim::Column::Status.eq(ClaimStatus::Pending))
        .filter(expense_claim::Column::ReportDate.gte(leave.start_date))
        .filter(expense_claim::Column::ReportDate.lte(leave.end_date))
        .all(db)
        .await?;

    for claim in linked {
        let mut active_model: expense_claim::ActiveModel = claim.into();
        active_model.status = Set(status);
        active_model.rejection_reason = Set(reason.map(ToString::to_string));
        stamp_review(&mut active_model.reviewer, &mut active_model.reviewed_at, approver);
        active_model.update(db).await?;
    }
    Ok(())
}

fn stamp_review(
    reviewer: &mut sea_orm::ActiveValue<Option<String>>,
    reviewed_at: &mut sea_orm::ActiveValue<Option<chrono::DateTime<chrono::Utc>>>,
    approver: &str,
) {
    *reviewer = Set(Some(approver.to_string()));
    *reviewed_at = Set(Some(chrono::Utc::now()));
}

fn require_reviewer(approver: &str) -> Result<()> {
    if approver.trim().is_empty() {
        return Err(Error::Validation {
            message: "Missing required field: approver".to_string(),
        });
    }
    Ok(())
}

fn ensure_pending(status: ReviewStatus, kind: RecordKind, id: i64) -> Result<()> {
    if status == ReviewStatus::Pending {
        return Ok(());
    }
    Err(Error::Validation {
        message: format!("{} {id} is not pending and cannot be decided", kind.label()),
    })
}

fn ensure_claim_pending(status: ClaimStatus, id: i64) -> Result<()> {
    if status == ClaimStatus::Pending {
        return Ok(());
    }
    Err(Error::Validation {
        message: format!("expense claim {id} is not pending and cannot be decided"),
    })
}

fn not_found(kind: RecordKind, id: i64) -> Error {
    Error::NotFound {
        kind: kind.label(),
        id: id.to_string(),
    }
}
