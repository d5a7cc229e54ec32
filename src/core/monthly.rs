//! Monthly compensation aggregation.
//!
//! Rolls one worker's expense claims for a month into compensation totals:
//! one day of base salary per claimed day not covered by leave, plus summed
//! allowances, fares, and ad-hoc expenses. The arithmetic lives in a pure
//! function over the supplied record set, so re-running it over unchanged
//! records yields identical totals; the async wrapper only performs the
//! filtered scans. Totals are a derived read model and are never persisted.

use crate::core::target::TargetAchievement;
use crate::entities::{
    ClaimStatus, EmployeeProfile, ExpenseClaim, ExpenseItem, LeaveRequest, ReviewStatus,
    expense_claim, expense_item, leave_request,
};
use crate::errors::{Error, Result};
use chrono::NaiveDate;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use std::collections::BTreeSet;

/// Compensation totals for one worker and month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyCompensation {
    /// Year aggregated over
    pub year: i32,
    /// Month aggregated over (1-based)
    pub month: u32,
    /// Distinct claimed days not covered by leave
    pub working_days: u32,
    /// `working_days` × the worker's daily salary
    pub total_base_salary: f64,
    /// Sum of claim allowances
    pub total_allowance: f64,
    /// Sum of claim fares
    pub total_fare: f64,
    /// Sum of ad-hoc expense lines on qualifying claims
    pub total_other_expense: f64,
    /// Sum of the four totals above
    pub grand_total: f64,
}

/// One month of a trailing series: compensation plus the month's sales
/// performance.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyPerformance {
    /// Compensation totals for the month
    pub compensation: MonthlyCompensation,
    /// Sales target vs. achieved for the same month
    pub sales: TargetAchievement,
}

/// Half-open `[first-of-month, first-of-next-month)` date window.
pub fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate)> {
    let invalid = || Error::Validation {
        message: format!("Invalid month: {year}-{month}"),
    };
    let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let end = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(invalid)?;
    Ok((start, end))
}

/// Computes compensation totals from an already-fetched record set.
///
/// Claims count when their status is pending or approved and their date
/// falls in the month; leave intervals count under the same statuses. A
/// claimed day inside a leave interval earns no base salary and is not a
/// working day, but its allowance, fare, and expense lines still sum.
pub fn compute_monthly_totals(
    daily_salary: f64,
    claims: &[expense_claim::Model],
    items: &[expense_item::Model],
    leaves: &[leave_request::Model],
    year: i32,
    month: u32,
) -> Result<MonthlyCompensation> {
    let (start, end) = month_bounds(year, month)?;

    let qualifying: Vec<&expense_claim::Model> = claims
        .iter()
        .filter(|c| {
            matches!(c.status, ClaimStatus::Pending | ClaimStatus::Approved)
                && c.report_date >= start
                && c.report_date < end
        })
        .collect();

    let leave_dates = leave_date_set(leaves, start, end);

    let mut claim_dates = BTreeSet::new();
    let mut claim_ids = BTreeSet::new();
    let mut total_allowance = 0.0;
    let mut total_fare = 0.0;
    for claim in &qualifying {
        claim_dates.insert(claim.report_date);
        claim_ids.insert(claim.id);
        total_allowance += claim.allowance_amount;
        total_fare += claim.fare_amount;
    }

    let mut working_days = 0u32;
    for day in &claim_dates {
        if !leave_dates.contains(day) {
            working_days += 1;
        }
    }
    let total_base_salary = f64::from(working_days) * daily_salary;

    let total_other_expense: f64 = items
        .iter()
        .filter(|item| claim_ids.contains(&item.claim_id))
        .map(|item| item.amount)
        .sum();

    let grand_total = total_base_salary + total_allowance + total_fare + total_other_expense;

    Ok(MonthlyCompensation {
        year,
        month,
        working_days,
        total_base_salary,
        total_allowance,
        total_fare,
        total_other_expense,
        grand_total,
    })
}

/// Aggregates one worker's month by scanning the store and delegating to
/// [`compute_monthly_totals`].
pub async fn monthly_compensation(
    db: &DatabaseConnection,
    user_id: &str,
    year: i32,
    month: u32,
) -> Result<MonthlyCompensation> {
    let (start, end) = month_bounds(year, month)?;

    let daily_salary = EmployeeProfile::find_by_id(user_id)
        .one(db)
        .await?
        .map_or(0.0, |profile| profile.daily_salary);

    let claims = ExpenseClaim::find()
        .filter(expense_claim::Column::UserId.eq(user_id))
        .filter(
            expense_claim::Column::Status.is_in([ClaimStatus::Pending, ClaimStatus::Approved]),
        )
        .filter(expense_claim::Column::ReportDate.gte(start))
        .filter(expense_claim::Column::ReportDate.lt(end))
        .all(db)
        .await?;

    let claim_ids: Vec<i64> = claims.iter().map(|c| c.id).collect();
    let items = if claim_ids.is_empty() {
        Vec::new()
    } else {
        ExpenseItem::find()
            .filter(expense_item::Column::ClaimId.is_in(claim_ids))
            .all(db)
            .await?
    };

    let leaves = LeaveRequest::find()
        .filter(leave_request::Column::UserId.eq(user_id))
        .filter(
            leave_request::Column::Status.is_in([ReviewStatus::Pending, ReviewStatus::Approved]),
        )
        .filter(leave_request::Column::StartDate.lt(end))
        .filter(leave_request::Column::EndDate.gte(start))
        .all(db)
        .await?;

    compute_monthly_totals(daily_salary, &claims, &items, &leaves, year, month)
}

/// Produces the trailing six-month series ending at the given month,
/// oldest first, each entry resolving its own sales target.
pub async fn trailing_six_months(
    db: &DatabaseConnection,
    user_id: &str,
    year: i32,
    month: u32,
) -> Result<Vec<MonthlyPerformance>> {
    let mut months = Vec::with_capacity(6);
    let (mut y, mut m) = (year, month);
    for _ in 0..6 {
        months.push((y, m));
        (y, m) = previous_month(y, m);
    }
    months.reverse();

    let mut series = Vec::with_capacity(6);
    for (y, m) in months {
        let compensation = monthly_compensation(db, user_id, y, m).await?;
        let sales = crate::core::target::track_achievement(db, user_id, y, m).await?;
        series.push(MonthlyPerformance {
            compensation,
            sales,
        });
    }
    Ok(series)
}

/// All calendar dates inside the window that are covered by a pending or
/// approved leave interval.
fn leave_date_set(
    leaves: &[leave_request::Model],
    start: NaiveDate,
    end: NaiveDate,
) -> BTreeSet<NaiveDate> {
    let mut dates = BTreeSet::new();
    for leave in leaves {
        if !matches!(leave.status, ReviewStatus::Pending | ReviewStatus::Approved) {
            continue;
        }
        let mut day = leave.start_date.max(start);
        while day <= leave.end_date && day < end {
            dates.insert(day);
            let Some(next) = day.succ_opt() else { break };
            day = next;
        }
    }
    dates
}

const fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 { (year - 1, 12) } else { (year, month - 1) }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::{
        create_approved_order, create_custom_claim, create_custom_leave, create_test_claim,
        create_test_item, create_test_profile, date, midday, setup_test_db,
    };

    #[tokio::test]
    async fn test_working_days_exclude_leave_dates() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_profile(&db, "u1").await?; // daily 500, allowance 150

        create_test_claim(&db, "u1", date(2024, 3, 4), ClaimStatus::Approved).await?;
        create_test_claim(&db, "u1", date(2024, 3, 5), ClaimStatus::Pending).await?;
        create_test_claim(&db, "u1", date(2024, 3, 6), ClaimStatus::Pending).await?;
        // Leave covers the 5th
        create_custom_leave(
            &db,
            "u1",
            date(2024, 3, 5),
            date(2024, 3, 5),
            ReviewStatus::Approved,
        )
        .await?;

        let totals = monthly_compensation(&db, "u1", 2024, 3).await?;

        assert_eq!(totals.working_days, 2);
        assert_eq!(totals.total_base_salary, 1000.0);
        // Allowance and fare still sum over all three claims
        assert_eq!(totals.total_allowance, 450.0);
        assert_eq!(totals.total_fare, 300.0);
        assert_eq!(totals.grand_total, 1000.0 + 450.0 + 300.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_aggregation_is_idempotent() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_profile(&db, "u1").await?;

        let claim = create_test_claim(&db, "u1", date(2024, 3, 4), ClaimStatus::Pending).await?;
        create_test_item(&db, claim.id, date(2024, 3, 4), 75.5).await?;
        create_custom_leave(
            &db,
            "u1",
            date(2024, 3, 10),
            date(2024, 3, 12),
            ReviewStatus::Pending,
        )
        .await?;

        let first = monthly_compensation(&db, "u1", 2024, 3).await?;
        let second = monthly_compensation(&db, "u1", 2024, 3).await?;
        assert_eq!(first, second);

        Ok(())
    }

    #[tokio::test]
    async fn test_draft_and_rejected_claims_do_not_count() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_profile(&db, "u1").await?;

        create_test_claim(&db, "u1", date(2024, 3, 4), ClaimStatus::Draft).await?;
        create_test_claim(&db, "u1", date(2024, 3, 5), ClaimStatus::Rejected).await?;

        let totals = monthly_compensation(&db, "u1", 2024, 3).await?;
        assert_eq!(totals.working_days, 0);
        assert_eq!(totals.grand_total, 0.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_other_expenses_sum_per_item() -> Result<()> {
        let db = setup_test_db().await?;
        crate::test_utils::create_custom_profile(&db, "u1", 0.0, 0.0).await?;

        let claim =
            create_custom_claim(&db, "u1", date(2024, 3, 4), ClaimStatus::Pending, "Travel", 0.0, 0.0)
                .await?;
        create_test_item(&db, claim.id, date(2024, 3, 4), 120.0).await?;
        create_test_item(&db, claim.id, date(2024, 3, 4), 80.0).await?;

        // An unrelated user's items must not bleed in
        let other =
            create_custom_claim(&db, "u2", date(2024, 3, 4), ClaimStatus::Pending, "Travel", 0.0, 0.0)
                .await?;
        create_test_item(&db, other.id, date(2024, 3, 4), 999.0).await?;

        let totals = monthly_compensation(&db, "u1", 2024, 3).await?;
        assert_eq!(totals.total_other_expense, 200.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_claim_dates_count_one_working_day() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_profile(&db, "u1").await?;

        // A travel claim and a leave-typed claim on the same date
        create_test_claim(&db, "u1", date(2024, 3, 4), ClaimStatus::Pending).await?;
        create_custom_claim(&db, "u1", date(2024, 3, 4), ClaimStatus::Pending, "Leave", 0.0, 0.0)
            .await?;

        let totals = monthly_compensation(&db, "u1", 2024, 3).await?;
        assert_eq!(totals.working_days, 1);
        assert_eq!(totals.total_base_salary, 500.0);
        // Amounts still sum per claim
        assert_eq!(totals.total_allowance, 150.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_leave_overlapping_month_edge_is_clipped() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_profile(&db, "u1").await?;

        // Leave runs from late February into early March
        create_custom_leave(
            &db,
            "u1",
            date(2024, 2, 27),
            date(2024, 3, 2),
            ReviewStatus::Approved,
        )
        .await?;
        create_test_claim(&db, "u1", date(2024, 3, 1), ClaimStatus::Pending).await?;
        create_test_claim(&db, "u1", date(2024, 3, 4), ClaimStatus::Pending).await?;

        let totals = monthly_compensation(&db, "u1", 2024, 3).await?;
        assert_eq!(totals.working_days, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_profile_earns_no_base_salary() -> Result<()> {
        let db = setup_test_db().await?;

        create_test_claim(&db, "u1", date(2024, 3, 4), ClaimStatus::Pending).await?;

        let totals = monthly_compensation(&db, "u1", 2024, 3).await?;
        assert_eq!(totals.working_days, 1);
        assert_eq!(totals.total_base_salary, 0.0);
        assert_eq!(totals.total_allowance, 150.0);

        Ok(())
    }

    #[test]
    fn test_compute_is_pure_over_supplied_records() {
        let claims = vec![];
        let items = vec![];
        let leaves = vec![];

        let first = compute_monthly_totals(500.0, &claims, &items, &leaves, 2024, 3).unwrap();
        let second = compute_monthly_totals(500.0, &claims, &items, &leaves, 2024, 3).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.working_days, 0);
    }

    #[test]
    fn test_month_bounds() {
        assert_eq!(
            month_bounds(2024, 3).unwrap(),
            (date(2024, 3, 1), date(2024, 4, 1))
        );
        assert_eq!(
            month_bounds(2024, 12).unwrap(),
            (date(2024, 12, 1), date(2025, 1, 1))
        );
        assert!(month_bounds(2024, 13).is_err());
    }

    #[tokio::test]
    async fn test_trailing_six_months_series() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_profile(&db, "u1").await?;

        create_test_claim(&db, "u1", date(2024, 3, 4), ClaimStatus::Approved).await?;
        create_test_claim(&db, "u1", date(2024, 1, 10), ClaimStatus::Approved).await?;
        crate::core::target::set_monthly_target(&db, "u1", Some("2024_3"), 50000.0).await?;
        create_approved_order(&db, "u1", midday(2024, 3, 10), 62500.0).await?;

        let series = trailing_six_months(&db, "u1", 2024, 3).await?;

        assert_eq!(series.len(), 6);
        // Oldest first: Oct 2023 through Mar 2024
        assert_eq!(
            (series[0].compensation.year, series[0].compensation.month),
            (2023, 10)
        );
        assert_eq!(
            (series[5].compensation.year, series[5].compensation.month),
            (2024, 3)
        );

        assert_eq!(series[3].compensation.working_days, 1); // Jan 2024
        assert_eq!(series[5].compensation.working_days, 1); // Mar 2024
        assert_eq!(series[5].sales.achievement_percent, Some(125.0));
        // A month with no explicit or default target uses the hard fallback
        assert_eq!(
            series[4].sales.target,
            crate::core::target::DEFAULT_MONTHLY_TARGET
        );

        Ok(())
    }
}
