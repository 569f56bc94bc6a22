//! Time-bucketed series and the category breakdown for the dashboard charts.

use std::collections::BTreeMap;

use serde::Serialize;
use time::{Date, Duration};

use crate::{
    dashboard::{PeriodPoint, is_settled},
    database_id::CategoryId,
    dates::{WEEKDAY_LABELS, in_rolling_window, month_label, weekday_slot},
    models::{Transaction, TransactionStatus},
};

/// One slice of the expense-by-category breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySlice {
    /// The category the expenses were grouped under, if the transactions had
    /// one.
    pub category_id: Option<CategoryId>,
    /// The total spent in the category, as a positive number.
    pub value: f64,
}

/// Settled transactions bucketed by calendar month, oldest first, capped at
/// the seven most recent months that have any data.
pub fn monthly_series(transactions: &[Transaction]) -> Vec<PeriodPoint> {
    let mut buckets: BTreeMap<(i32, u8), PeriodPoint> = BTreeMap::new();

    for transaction in transactions.iter().filter(|t| is_settled(t)) {
        let year = transaction.date.year();
        let month = transaction.date.month();
        let point = buckets
            .entry((year, u8::from(month)))
            .or_insert_with(|| PeriodPoint {
                name: month_label(year, month),
                income: 0.0,
                expenses: 0.0,
            });

        add_to_point(point, transaction.amount);
    }

    let points: Vec<_> = buckets.into_values().collect();
    let skip = points.len().saturating_sub(7);

    points.into_iter().skip(skip).collect()
}

/// Settled transactions within a week of `today` (either side, inclusive)
/// bucketed by weekday, Sunday first.
pub fn weekly_series(transactions: &[Transaction], today: Date) -> Vec<PeriodPoint> {
    let mut points: Vec<PeriodPoint> = WEEKDAY_LABELS
        .iter()
        .map(|label| PeriodPoint {
            name: (*label).to_owned(),
            income: 0.0,
            expenses: 0.0,
        })
        .collect();

    for transaction in transactions.iter().filter(|transaction| {
        is_settled(transaction) && in_rolling_window(transaction.date, today, 7, 7)
    }) {
        add_to_point(&mut points[weekday_slot(transaction.date)], transaction.amount);
    }

    points
}

/// The slot scheduled payments and transactions without a creation hour land
/// in on the hourly chart.
const MIDDAY_SLOT: usize = 12;

/// Today's settled transactions bucketed by the hour they were recorded, plus
/// scheduled payments pending within the next seven days in the midday slot.
///
/// A settled transaction backdated to today (recorded on a later day) has no
/// meaningful hour and also lands in the midday slot.
pub fn daily_series(transactions: &[Transaction], today: Date) -> Vec<PeriodPoint> {
    let mut points: Vec<PeriodPoint> = (0..24)
        .map(|hour| PeriodPoint {
            name: format!("{hour:02}:00"),
            income: 0.0,
            expenses: 0.0,
        })
        .collect();

    let horizon = today.saturating_add(Duration::days(7));

    for transaction in transactions {
        if is_settled(transaction) && transaction.date == today {
            let slot = if transaction.created_at.date() == today {
                transaction.created_at.hour() as usize
            } else {
                MIDDAY_SLOT
            };
            add_to_point(&mut points[slot], transaction.amount);
        } else if transaction.is_scheduled
            && transaction.status == TransactionStatus::Pending
            && transaction.date > today
            && transaction.date <= horizon
        {
            add_to_point(&mut points[MIDDAY_SLOT], transaction.amount);
        }
    }

    points
}

/// Settled expenses grouped by category.
///
/// Slices appear in the order their category is first encountered so that a
/// stable transaction order yields a stable chart.
pub fn category_breakdown(transactions: &[Transaction]) -> Vec<CategorySlice> {
    let mut slices: Vec<CategorySlice> = Vec::new();

    for transaction in transactions
        .iter()
        .filter(|transaction| is_settled(transaction) && transaction.amount < 0.0)
    {
        let value = transaction.amount.abs();

        match slices
            .iter_mut()
            .find(|slice| slice.category_id == transaction.category_id)
        {
            Some(slice) => slice.value += value,
            None => slices.push(CategorySlice {
                category_id: transaction.category_id,
                value,
            }),
        }
    }

    slices
}

fn add_to_point(point: &mut PeriodPoint, amount: f64) {
    if amount > 0.0 {
        point.income += amount;
    } else {
        point.expenses += amount.abs();
    }
}
