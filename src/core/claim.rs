//! Daily expense-claim derivation.
//!
//! A worker's day of visit reports is reconciled into a single expense-claim
//! draft: visit counts by establishment kind, travel classification and
//! location from the day's first report, distance from the location tables,
//! fare from the rate snapshot, and allowance from the employee profile.
//! Re-running derivation refreshes the existing draft in place, so at most
//! one draft exists per (worker, day). Submission into the approval
//! workflow happens in [`crate::core::approval`], not here.

use crate::core::distance::resolve_distance;
use crate::core::fare::{FareSnapshot, calculate_fare};
use crate::entities::{
    ClaimStatus, EmployeeProfile, ExpenseClaim, ExpenseItem, HospitalType, expense_claim,
    expense_item, leave_request, visit_report,
};
use crate::errors::{Error, Result};
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder,
};

/// Expense type carried by claims derived from visit reports.
pub const TRAVEL_EXPENSE_TYPE: &str = "Travel";
/// Expense type carried by claims created implicitly for leave days.
pub const LEAVE_EXPENSE_TYPE: &str = "Leave";

/// Builds or refreshes the expense-claim draft for one worker and day from
/// that day's visit reports.
///
/// Reports are read in ascending id order, so when several reports disagree
/// on travel type or location the earliest submission wins. A day with no
/// reports still keeps its draft, with every derived field reset to
/// zero/empty.
pub async fn derive_daily_claim(
    db: &DatabaseConnection,
    user_id: &str,
    report_date: NaiveDate,
) -> Result<expense_claim::Model> {
    let reports = visit_report::Entity::find()
        .filter(visit_report::Column::UserId.eq(user_id))
        .filter(visit_report::Column::Date.eq(report_date))
        .order_by_asc(visit_report::Column::Id)
        .all(db)
        .await?;

    let mut doctor_visits = 0;
    let mut chemist_visits = 0;
    for report in &reports {
        match report.hospital_type {
            HospitalType::Doctor => doctor_visits += 1,
            HospitalType::Chemist => chemist_visits += 1,
            HospitalType::Stockiest => {}
        }
    }

    let (travel_type, location) = reports
        .first()
        .map_or((None, String::new()), |first| {
            (Some(first.travel_type), first.location.clone())
        });

    let (distance_km, fare_amount, allowance_amount) = if reports.is_empty() {
        (0.0, 0.0, 0.0)
    } else {
        let distance_km = resolve_distance(db, user_id, &location).await?;
        // Snapshot taken at call time; a later rate change needs a re-derive
        let snapshot = FareSnapshot::load(db).await?;
        let allowance = EmployeeProfile::find_by_id(user_id)
            .one(db)
            .await?
            .map_or(0.0, |profile| profile.allowance_amount);
        (distance_km, calculate_fare(distance_km, &snapshot), allowance)
    };

    let existing = find_draft(db, user_id, report_date).await?;

    if let Some(draft) = existing {
        let mut active_model: expense_claim::ActiveModel = draft.into();
        active_model.expense_type = Set(TRAVEL_EXPENSE_TYPE.to_string());
        active_model.travel_type = Set(travel_type);
        active_model.doctor_visits = Set(doctor_visits);
        active_model.chemist_visits = Set(chemist_visits);
        active_model.location = Set(location);
        active_model.distance_km = Set(distance_km);
        active_model.fare_amount = Set(fare_amount);
        active_model.allowance_amount = Set(allowance_amount);
        active_model.update(db).await.map_err(Into::into)
    } else {
        let draft = expense_claim::ActiveModel {
            user_id: Set(user_id.to_string()),
            report_date: Set(report_date),
            expense_type: Set(TRAVEL_EXPENSE_TYPE.to_string()),
            travel_type: Set(travel_type),
            doctor_visits: Set(doctor_visits),
            chemist_visits: Set(chemist_visits),
            location: Set(location),
            distance_km: Set(distance_km),
            fare_amount: Set(fare_amount),
            allowance_amount: Set(allowance_amount),
            status: Set(ClaimStatus::Draft),
            requires_approval: Set(false),
            reviewer: Set(None),
            reviewed_at: Set(None),
            rejection_reason: Set(None),
            ..Default::default()
        };
        draft.insert(db).await.map_err(Into::into)
    }
}

/// Finds the draft claim for one worker and day, if any.
///
/// The one-draft invariant is writer-checked (read-then-write); the store
/// does not enforce it against concurrent writers.
pub async fn find_draft(
    db: &DatabaseConnection,
    user_id: &str,
    report_date: NaiveDate,
) -> Result<Option<expense_claim::Model>> {
    ExpenseClaim::find()
        .filter(expense_claim::Column::UserId.eq(user_id))
        .filter(expense_claim::Column::ReportDate.eq(report_date))
        .filter(expense_claim::Column::Status.eq(ClaimStatus::Draft))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates the leave-linked expense claims for each day of a leave interval.
///
/// Each covered day gets a pending claim of type "Leave" with zero amounts
/// and `requires_approval = false`, unless one already exists. These are the
/// claims the approval workflow propagates the leave decision onto.
pub async fn ensure_leave_claims(
    db: &DatabaseConnection,
    leave: &leave_request::Model,
) -> Result<Vec<expense_claim::Model>> {
    let mut created = Vec::new();
    let mut day = leave.start_date;

    while day <= leave.end_date {
        let existing = ExpenseClaim::find()
            .filter(expense_claim::Column::UserId.eq(&leave.user_id))
            .filter(expense_claim::Column::ReportDate.eq(day))
            .filter(expense_claim::Column::ExpenseType.eq(LEAVE_EXPENSE_TYPE))
            .one(db)
            .await?;

        if existing.is_none() {
            let claim = expense_claim::ActiveModel {
                user_id: Set(leave.user_id.clone()),
                report_date: Set(day),
                expense_type: Set(LEAVE_EXPENSE_TYPE.to_string()),
                travel_type: Set(None),
                doctor_visits: Set(0),
                chemist_visits: Set(0),
                location: Set(String::new()),
                distance_km: Set(0.0),
                fare_amount: Set(0.0),
                allowance_amount: Set(0.0),
                status: Set(ClaimStatus::Pending),
                requires_approval: Set(false),
                reviewer: Set(None),
                reviewed_at: Set(None),
                rejection_reason: Set(None),
                ..Default::default()
            };
            created.push(claim.insert(db).await?);
        }

        let Some(next) = day.succ_opt() else { break };
        day = next;
    }

    Ok(created)
}

/// Adds an ad-hoc expense line to a draft claim. Claims past draft are no
/// longer editable.
pub async fn add_expense_item(
    db: &DatabaseConnection,
    claim_id: i64,
    item_type: &str,
    item_date: NaiveDate,
    remark: &str,
    amount: f64,
) -> Result<expense_item::Model> {
    if item_type.trim().is_empty() {
        return Err(Error::Validation {
            message: "Missing required field: expense type".to_string(),
        });
    }
    if !amount.is_finite() || amount <= 0.0 {
        return Err(Error::InvalidAmount { amount });
    }

    let claim = ExpenseClaim::find_by_id(claim_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            kind: "expense claim",
            id: claim_id.to_string(),
        })?;
    if claim.status != ClaimStatus::Draft {
        return Err(Error::Validation {
            message: format!("Expense claim {claim_id} is no longer a draft"),
        });
    }

    let item = expense_item::ActiveModel {
        claim_id: Set(claim_id),
        item_type: Set(item_type.trim().to_string()),
        date: Set(item_date),
        remark: Set(remark.trim().to_string()),
        amount: Set(amount),
        ..Default::default()
    };
    item.insert(db).await.map_err(Into::into)
}

/// Lists a claim's expense lines in entry order.
pub async fn list_expense_items(
    db: &DatabaseConnection,
    claim_id: i64,
) -> Result<Vec<expense_item::Model>> {
    ExpenseItem::find()
        .filter(expense_item::Column::ClaimId.eq(claim_id))
        .order_by_asc(expense_item::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Removes an expense line from a draft claim.
pub async fn remove_expense_item(db: &DatabaseConnection, item_id: i64) -> Result<()> {
    let item = ExpenseItem::find_by_id(item_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            kind: "expense item",
            id: item_id.to_string(),
        })?;

    let claim = ExpenseClaim::find_by_id(item.claim_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            kind: "expense claim",
            id: item.claim_id.to_string(),
        })?;
    if claim.status != ClaimStatus::Draft {
        return Err(Error::Validation {
            message: format!("Expense claim {} is no longer a draft", claim.id),
        });
    }

    item.delete(db).await?;
    Ok(())
}
