//! Shared test utilities for `FieldMate`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test records with sensible defaults. Factories insert rows
//! directly so tests can stage records in arbitrary lifecycle states.

#![allow(clippy::unwrap_used)]

use crate::entities::{
    ClaimStatus, HospitalType, ReviewStatus, TravelType, employee_profile, expense_claim,
    expense_item, leave_request, sales_order, visit_report,
};
use crate::errors::Result;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Shorthand for building a calendar date in tests.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Shorthand for building a midday UTC timestamp in tests.
pub fn midday(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

/// Creates an employee profile with sensible defaults.
///
/// # Defaults
/// * `daily_salary`: 500.0
/// * `allowance_amount`: 150.0
/// * `headquarters`: "VIDISHA"
pub async fn create_test_profile(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<employee_profile::Model> {
    create_custom_profile(db, user_id, 500.0, 150.0).await
}

/// Creates an employee profile with custom compensation parameters.
pub async fn create_custom_profile(
    db: &DatabaseConnection,
    user_id: &str,
    daily_salary: f64,
    allowance_amount: f64,
) -> Result<employee_profile::Model> {
    let profile = employee_profile::ActiveModel {
        user_id: Set(user_id.to_string()),
        daily_salary: Set(daily_salary),
        allowance_amount: Set(allowance_amount),
        headquarters: Set("VIDISHA".to_string()),
    };
    profile.insert(db).await.map_err(Into::into)
}

/// Creates a pending visit report with HQ travel and no selfie.
pub async fn create_test_visit(
    db: &DatabaseConnection,
    user_id: &str,
    visit_date: NaiveDate,
    hospital_type: HospitalType,
    location: &str,
) -> Result<visit_report::Model> {
    create_custom_visit(db, user_id, visit_date, hospital_type, location, None).await
}

/// Creates a pending visit report with an optional selfie reference.
pub async fn create_custom_visit(
    db: &DatabaseConnection,
    user_id: &str,
    visit_date: NaiveDate,
    hospital_type: HospitalType,
    location: &str,
    selfie_ref: Option<&str>,
) -> Result<visit_report::Model> {
    let report = visit_report::ActiveModel {
        user_id: Set(user_id.to_string()),
        date: Set(visit_date),
        travel_type: Set(TravelType::Hq),
        hospital_type: Set(hospital_type),
        location: Set(location.to_string()),
        status: Set(ReviewStatus::Pending),
        selfie_ref: Set(selfie_ref.map(ToString::to_string)),
        reviewer: Set(None),
        reviewed_at: Set(None),
        rejection_reason: Set(None),
        ..Default::default()
    };
    report.insert(db).await.map_err(Into::into)
}

/// Creates a leave request in the given lifecycle state, without any
/// leave-linked expense claims.
pub async fn create_custom_leave(
    db: &DatabaseConnection,
    user_id: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
    status: ReviewStatus,
) -> Result<leave_request::Model> {
    let leave = leave_request::ActiveModel {
        user_id: Set(user_id.to_string()),
        leave_type: Set("Casual".to_string()),
        start_date: Set(start_date),
        end_date: Set(end_date),
        reason: Set("Test leave".to_string()),
        status: Set(status),
        reviewer: Set(None),
        reviewed_at: Set(None),
        rejection_reason: Set(None),
        ..Default::default()
    };
    leave.insert(db).await.map_err(Into::into)
}

/// Creates a travel expense claim with default amounts.
///
/// # Defaults
/// * `expense_type`: "Travel"
/// * `fare_amount`: 100.0
/// * `allowance_amount`: 150.0
pub async fn create_test_claim(
    db: &DatabaseConnection,
    user_id: &str,
    report_date: NaiveDate,
    status: ClaimStatus,
) -> Result<expense_claim::Model> {
    create_custom_claim(db, user_id, report_date, status, "Travel", 100.0, 150.0).await
}

/// Creates an expense claim with custom type and amounts.
pub async fn create_custom_claim(
    db: &DatabaseConnection,
    user_id: &str,
    report_date: NaiveDate,
    status: ClaimStatus,
    expense_type: &str,
    fare_amount: f64,
    allowance_amount: f64,
) -> Result<expense_claim::Model> {
    let claim = expense_claim::ActiveModel {
        user_id: Set(user_id.to_string()),
        report_date: Set(report_date),
        expense_type: Set(expense_type.to_string()),
        travel_type: Set(None),
        doctor_visits: Set(0),
        chemist_visits: Set(0),
        location: Set(String::new()),
        distance_km: Set(0.0),
        fare_amount: Set(fare_amount),
        allowance_amount: Set(allowance_amount),
        status: Set(status),
        requires_approval: Set(false),
        reviewer: Set(None),
        reviewed_at: Set(None),
        rejection_reason: Set(None),
        ..Default::default()
    };
    claim.insert(db).await.map_err(Into::into)
}

/// Attaches an ad-hoc expense line to a claim.
pub async fn create_test_item(
    db: &DatabaseConnection,
    claim_id: i64,
    item_date: NaiveDate,
    amount: f64,
) -> Result<expense_item::Model> {
    let item = expense_item::ActiveModel {
        claim_id: Set(claim_id),
        item_type: Set("Misc".to_string()),
        date: Set(item_date),
        remark: Set("Test expense".to_string()),
        amount: Set(amount),
        ..Default::default()
    };
    item.insert(db).await.map_err(Into::into)
}

/// Creates a sales order in the given lifecycle state.
pub async fn create_custom_order(
    db: &DatabaseConnection,
    user_id: &str,
    status: ReviewStatus,
    created_at: DateTime<Utc>,
    quantity: i32,
    unit_price: Option<f64>,
    total_amount: Option<f64>,
) -> Result<sales_order::Model> {
    let order = sales_order::ActiveModel {
        user_id: Set(user_id.to_string()),
        product_id: Set("PROD-1".to_string()),
        quantity: Set(quantity),
        unit_price: Set(unit_price),
        total_amount: Set(total_amount),
        status: Set(status),
        created_at: Set(created_at),
        reviewer: Set(None),
        reviewed_at: Set(None),
        rejection_reason: Set(None),
        ..Default::default()
    };
    order.insert(db).await.map_err(Into::into)
}

/// Creates an approved order carrying a pre-computed total.
pub async fn create_approved_order(
    db: &DatabaseConnection,
    user_id: &str,
    created_at: DateTime<Utc>,
    total_amount: f64,
) -> Result<sales_order::Model> {
    create_custom_order(
        db,
        user_id,
        ReviewStatus::Approved,
        created_at,
        1,
        None,
        Some(total_amount),
    )
    .await
}
