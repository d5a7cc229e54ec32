//! Worker submission operations.
//!
//! Thin create operations for the record kinds a mobile worker files
//! directly: visit reports, leave requests, and sales orders. All inputs are
//! validated before any write; records enter the lifecycle in `pending`
//! (expense-claim drafts are produced by derivation instead, see
//! [`crate::core::claim`]).

use crate::entities::{
    HospitalType, ReviewStatus, TravelType, leave_request, sales_order, visit_report,
};
use crate::errors::{Error, Result};
use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection};

/// Files a visit report for one establishment visit.
pub async fn file_visit_report(
    db: &DatabaseConnection,
    user_id: &str,
    visit_date: NaiveDate,
    travel_type: TravelType,
    hospital_type: HospitalType,
    location: &str,
    selfie_ref: Option<&str>,
) -> Result<visit_report::Model> {
    require_non_empty(user_id, "user id")?;
    require_non_empty(location, "location")?;

    let report = visit_report::ActiveModel {
        user_id: Set(user_id.to_string()),
        date: Set(visit_date),
        travel_type: Set(travel_type),
        hospital_type: Set(hospital_type),
        location: Set(location.trim().to_string()),
        status: Set(ReviewStatus::Pending),
        selfie_ref: Set(selfie_ref.map(ToString::to_string)),
        reviewer: Set(None),
        reviewed_at: Set(None),
        rejection_reason: Set(None),
        ..Default::default()
    };
    report.insert(db).await.map_err(Into::into)
}

/// Files a leave request over an inclusive date interval.
///
/// Also creates the leave-linked expense claims for each covered day, so the
/// approval decision on the request has claims to propagate onto. The
/// request is written first; claim creation is a separate set of writes.
pub async fn file_leave_request(
    db: &DatabaseConnection,
    user_id: &str,
    leave_type: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
    reason: &str,
) -> Result<leave_request::Model> {
    require_non_empty(user_id, "user id")?;
    require_non_empty(leave_type, "leave type")?;
    require_non_empty(reason, "reason")?;
    if end_date < start_date {
        return Err(Error::Validation {
            message: format!("Leave interval ends before it starts: {start_date} > {end_date}"),
        });
    }

    let leave = leave_request::ActiveModel {
        user_id: Set(user_id.to_string()),
        leave_type: Set(leave_type.trim().to_string()),
        start_date: Set(start_date),
        end_date: Set(end_date),
        reason: Set(reason.trim().to_string()),
        status: Set(ReviewStatus::Pending),
        reviewer: Set(None),
        reviewed_at: Set(None),
        rejection_reason: Set(None),
        ..Default::default()
    };
    let leave = leave.insert(db).await?;

    crate::core::claim::ensure_leave_claims(db, &leave).await?;

    Ok(leave)
}

/// Places a sales order. Pricing may be a pre-computed total, a unit price,
/// or both; at least the quantity must be a positive count.
pub async fn place_sales_order(
    db: &DatabaseConnection,
    user_id: &str,
    product_id: &str,
    quantity: i32,
    unit_price: Option<f64>,
    total_amount: Option<f64>,
) -> Result<sales_order::Model> {
    require_non_empty(user_id, "user id")?;
    require_non_empty(product_id, "product id")?;
    if quantity <= 0 {
        return Err(Error::Validation {
            message: format!("Order quantity must be positive, got {quantity}"),
        });
    }
    for amount in [unit_price, total_amount].into_iter().flatten() {
        if !amount.is_finite() || amount < 0.0 {
            return Err(Error::InvalidAmount { amount });
        }
    }

    let order = sales_order::ActiveModel {
        user_id: Set(user_id.to_string()),
        product_id: Set(product_id.trim().to_string()),
        quantity: Set(quantity),
        unit_price: Set(unit_price),
        total_amount: Set(total_amount),
        status: Set(ReviewStatus::Pending),
        created_at: Set(chrono::Utc::now()),
        reviewer: Set(None),
        reviewed_at: Set(None),
        rejection_reason: Set(None),
        ..Default::default()
    };
    order.insert(db).await.map_err(Into::into)
}

fn require_non_empty(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Validation {
            message: format!("Missing required field: {field}"),
        });
    }
    Ok(())
}
