//! Sales-target resolution and achievement tracking.
//!
//! Targets are kept per worker as explicit month rows plus an optional
//! default row; resolution falls through explicit → default → a hard
//! constant. Achieved sales are a full filtered scan over approved orders
//! in the month window - a derived read model, never persisted.

use crate::entities::{MonthlyTarget, ReviewStatus, SalesOrder, monthly_target, sales_order};
use crate::errors::{Error, Result};
use chrono::{NaiveDate, TimeZone, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    QueryFilter,
};

/// Hard fallback when a worker has neither an explicit nor a default target.
pub const DEFAULT_MONTHLY_TARGET: f64 = 1000.0;

/// A month's resolved target against achieved sales.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetAchievement {
    /// Resolved target for the month
    pub target: f64,
    /// Sum of approved order amounts in the month
    pub achieved: f64,
    /// achieved/target as a percentage; `None` when the target is not positive
    pub achievement_percent: Option<f64>,
}

/// Builds the month key for target lookups: `"{year}_{month}"`, 1-based month.
#[must_use]
pub fn month_key(year: i32, month: u32) -> String {
    format!("{year}_{month}")
}

/// Resolves a worker's target for a month: explicit month row, else the
/// worker's default row, else [`DEFAULT_MONTHLY_TARGET`].
pub async fn resolve_target(
    db: &DatabaseConnection,
    user_id: &str,
    year: i32,
    month: u32,
) -> Result<f64> {
    let key = month_key(year, month);

    let explicit = MonthlyTarget::find()
        .filter(monthly_target::Column::UserId.eq(user_id))
        .filter(monthly_target::Column::MonthKey.eq(&key))
        .one(db)
        .await?;
    if let Some(row) = explicit {
        return Ok(row.target_amount);
    }

    let default = MonthlyTarget::find()
        .filter(monthly_target::Column::UserId.eq(user_id))
        .filter(monthly_target::Column::MonthKey.is_null())
        .one(db)
        .await?;
    Ok(default.map_or(DEFAULT_MONTHLY_TARGET, |row| row.target_amount))
}

/// Writes a worker's target row: `Some(key)` for an explicit month,
/// `None` for the default row. Existing rows are overwritten.
pub async fn set_monthly_target(
    db: &DatabaseConnection,
    user_id: &str,
    key: Option<&str>,
    target_amount: f64,
) -> Result<monthly_target::Model> {
    if !target_amount.is_finite() || target_amount < 0.0 {
        return Err(Error::InvalidAmount {
            amount: target_amount,
        });
    }

    let key_condition = key.map_or_else(
        || Condition::all().add(monthly_target::Column::MonthKey.is_null()),
        |k| Condition::all().add(monthly_target::Column::MonthKey.eq(k)),
    );
    let existing = MonthlyTarget::find()
        .filter(monthly_target::Column::UserId.eq(user_id))
        .filter(key_condition)
        .one(db)
        .await?;

    if let Some(row) = existing {
        let mut active_model: monthly_target::ActiveModel = row.into();
        active_model.target_amount = Set(target_amount);
        return active_model.update(db).await.map_err(Into::into);
    }

    let row = monthly_target::ActiveModel {
        user_id: Set(user_id.to_string()),
        month_key: Set(key.map(ToString::to_string)),
        target_amount: Set(target_amount),
        ..Default::default()
    };
    row.insert(db).await.map_err(Into::into)
}

/// Sums a worker's approved sales in `[monthStart, monthEnd)`.
pub async fn achieved_sales(
    db: &DatabaseConnection,
    user_id: &str,
    year: i32,
    month: u32,
) -> Result<f64> {
    let (start, end) = month_window(year, month)?;

    let orders = SalesOrder::find()
        .filter(sales_order::Column::UserId.eq(user_id))
        .filter(sales_order::Column::Status.eq(ReviewStatus::Approved))
        .filter(sales_order::Column::CreatedAt.gte(start))
        .filter(sales_order::Column::CreatedAt.lt(end))
        .all(db)
        .await?;

    Ok(orders.iter().map(order_amount).sum())
}

/// Resolves the effective amount of one order: the pre-computed total when
/// present, else unit price × quantity, else zero.
#[must_use]
pub fn order_amount(order: &sales_order::Model) -> f64 {
    if let Some(total) = order.total_amount {
        return total;
    }
    order
        .unit_price
        .map_or(0.0, |price| price * f64::from(order.quantity))
}

/// Computes achieved/target as a percentage, or `None` for a non-positive
/// target.
#[must_use]
pub fn achievement_percent(achieved: f64, target: f64) -> Option<f64> {
    (target > 0.0).then(|| achieved / target * 100.0)
}

/// Resolves a worker's full target picture for a month.
pub async fn track_achievement(
    db: &DatabaseConnection,
    user_id: &str,
    year: i32,
    month: u32,
) -> Result<TargetAchievement> {
    let target = resolve_target(db, user_id, year, month).await?;
    let achieved = achieved_sales(db, user_id, year, month).await?;
    Ok(TargetAchievement {
        target,
        achieved,
        achievement_percent: achievement_percent(achieved, target),
    })
}

fn month_window(
    year: i32,
    month: u32,
) -> Result<(chrono::DateTime<Utc>, chrono::DateTime<Utc>)> {
    let (start, end) = crate::core::monthly::month_bounds(year, month)?;
    Ok((start_of_day(start), start_of_day(end)))
}

fn start_of_day(day: NaiveDate) -> chrono::DateTime<Utc> {
    Utc.from_utc_datetime(&day.and_time(chrono::NaiveTime::MIN))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::{create_approved_order, create_custom_order, midday, setup_test_db};

    #[test]
    fn test_month_key_is_one_based_unpadded() {
        assert_eq!(month_key(2024, 3), "2024_3");
        assert_eq!(month_key(2024, 12), "2024_12");
    }

    #[test]
    fn test_achievement_percent_example() {
        // target=50000, achieved=62500
        assert_eq!(achievement_percent(62500.0, 50000.0), Some(125.0));
    }

    #[test]
    fn test_achievement_percent_undefined_for_zero_target() {
        assert_eq!(achievement_percent(100.0, 0.0), None);
    }

    #[tokio::test]
    async fn test_target_fallback_chain() -> Result<()> {
        let db = setup_test_db().await?;

        // Nothing configured: hard fallback
        assert_eq!(
            resolve_target(&db, "u1", 2024, 3).await?,
            DEFAULT_MONTHLY_TARGET
        );

        // Default row configured
        set_monthly_target(&db, "u1", None, 40000.0).await?;
        assert_eq!(resolve_target(&db, "u1", 2024, 3).await?, 40000.0);

        // Explicit month row wins over the default
        set_monthly_target(&db, "u1", Some("2024_3"), 50000.0).await?;
        assert_eq!(resolve_target(&db, "u1", 2024, 3).await?, 50000.0);
        // Other months still fall back to the default
        assert_eq!(resolve_target(&db, "u1", 2024, 4).await?, 40000.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_set_target_overwrites_existing_row() -> Result<()> {
        let db = setup_test_db().await?;

        set_monthly_target(&db, "u1", Some("2024_3"), 50000.0).await?;
        set_monthly_target(&db, "u1", Some("2024_3"), 55000.0).await?;

        let rows = MonthlyTarget::find().all(&db).await?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].target_amount, 55000.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_achieved_sales_amount_resolution() -> Result<()> {
        let db = setup_test_db().await?;

        // Pre-computed total wins
        create_custom_order(
            &db,
            "u1",
            ReviewStatus::Approved,
            midday(2024, 3, 5),
            3,
            Some(100.0),
            Some(250.0),
        )
        .await?;
        // Unit price × quantity
        create_custom_order(
            &db,
            "u1",
            ReviewStatus::Approved,
            midday(2024, 3, 6),
            4,
            Some(50.0),
            None,
        )
        .await?;
        // No pricing at all resolves to zero
        create_custom_order(
            &db,
            "u1",
            ReviewStatus::Approved,
            midday(2024, 3, 7),
            2,
            None,
            None,
        )
        .await?;

        assert_eq!(achieved_sales(&db, "u1", 2024, 3).await?, 450.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_achieved_sales_window_and_status() -> Result<()> {
        let db = setup_test_db().await?;

        create_approved_order(&db, "u1", midday(2024, 3, 1), 100.0).await?;
        create_approved_order(&db, "u1", midday(2024, 3, 31), 200.0).await?;
        // Outside the window
        create_approved_order(&db, "u1", midday(2024, 2, 29), 400.0).await?;
        create_approved_order(&db, "u1", midday(2024, 4, 1), 800.0).await?;
        // Wrong status
        create_custom_order(
            &db,
            "u1",
            ReviewStatus::Pending,
            midday(2024, 3, 15),
            1,
            None,
            Some(1600.0),
        )
        .await?;
        // Wrong user
        create_approved_order(&db, "u2", midday(2024, 3, 15), 3200.0).await?;

        assert_eq!(achieved_sales(&db, "u1", 2024, 3).await?, 300.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_track_achievement() -> Result<()> {
        let db = setup_test_db().await?;

        set_monthly_target(&db, "u1", Some("2024_3"), 50000.0).await?;
        create_approved_order(&db, "u1", midday(2024, 3, 10), 62500.0).await?;

        let achievement = track_achievement(&db, "u1", 2024, 3).await?;
        assert_eq!(achievement.target, 50000.0);
        assert_eq!(achievement.achieved, 62500.0);
        assert_eq!(achievement.achievement_percent, Some(125.0));

        Ok(())
    }
}
