//! Longer-horizon figures for the analysis page: period averages, the top
//! expense category, and month-over-month category movements.

use serde::Serialize;
use time::Date;

use crate::{
    dashboard::is_settled,
    database_id::CategoryId,
    dates::{in_month_of, in_rolling_window, months_back, previous_month},
    models::Transaction,
};

/// Average income, expenses, and balance per period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodAverages {
    /// Average income per period.
    pub income: f64,
    /// Average expenses per period, as a positive number.
    pub expenses: f64,
    /// Average balance (income minus expenses) per period.
    pub balance: f64,
}

/// Averages over three fixed look-back horizons.
///
/// The divisors are fixed (six months, four weeks, thirty days) rather than
/// derived from the data, so a user with two months of history sees their
/// spending diluted over the full horizon, matching how the figures read on
/// the analysis page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisAverages {
    /// Per-month averages over the last six calendar months.
    pub monthly: PeriodAverages,
    /// Per-week averages over the last four weeks.
    pub weekly: PeriodAverages,
    /// Per-day averages over the last thirty days.
    pub daily: PeriodAverages,
}

/// The category a user spent the most on this month.
#[derive(Debug, Clone, PartialEq)]
pub struct TopExpense {
    /// The category the expenses were grouped under, if any.
    pub category_id: Option<CategoryId>,
    /// The total spent in the category this month, as a positive number.
    pub total: f64,
    /// The category's share of this month's expenses, as a percentage.
    pub percentage: f64,
}

/// A month-over-month movement in a single category's spending.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryDelta {
    /// The category the expenses were grouped under, if any.
    pub category_id: Option<CategoryId>,
    /// The size of the movement as a positive percentage.
    pub percentage: f64,
}

/// The settled income and expense totals (expenses as a positive number)
/// between `start` and `end`, inclusive.
fn window_totals(transactions: &[Transaction], start: Date, end: Date) -> (f64, f64) {
    transactions
        .iter()
        .filter(|transaction| {
            is_settled(transaction) && transaction.date >= start && transaction.date <= end
        })
        .fold((0.0, 0.0), |(income, expenses), transaction| {
            if transaction.amount > 0.0 {
                (income + transaction.amount, expenses)
            } else {
                (income, expenses + transaction.amount.abs())
            }
        })
}

fn averages_over(income: f64, expenses: f64, periods: f64) -> PeriodAverages {
    PeriodAverages {
        income: income / periods,
        expenses: expenses / periods,
        balance: (income - expenses) / periods,
    }
}

/// Compute the per-month, per-week, and per-day averages as of `today`.
pub fn averages(transactions: &[Transaction], today: Date) -> AnalysisAverages {
    let (monthly_income, monthly_expenses) =
        window_totals(transactions, months_back(today, 6), today);
    let (weekly_income, weekly_expenses) = window_totals(
        transactions,
        today.saturating_sub(time::Duration::days(28)),
        today,
    );
    let (daily_income, daily_expenses) = window_totals(
        transactions,
        today.saturating_sub(time::Duration::days(30)),
        today,
    );

    AnalysisAverages {
        monthly: averages_over(monthly_income, monthly_expenses, 6.0),
        weekly: averages_over(weekly_income, weekly_expenses, 4.0),
        daily: averages_over(daily_income, daily_expenses, 30.0),
    }
}

/// Settled expenses in the calendar month containing `reference`, grouped by
/// category in first-encounter order, as positive totals.
fn expenses_by_category(
    transactions: &[Transaction],
    reference: Date,
) -> Vec<(Option<CategoryId>, f64)> {
    let mut totals: Vec<(Option<CategoryId>, f64)> = Vec::new();

    for transaction in transactions.iter().filter(|transaction| {
        is_settled(transaction)
            && transaction.amount < 0.0
            && in_month_of(transaction.date, reference)
    }) {
        let value = transaction.amount.abs();

        match totals
            .iter_mut()
            .find(|(category_id, _)| *category_id == transaction.category_id)
        {
            Some((_, total)) => *total += value,
            None => totals.push((transaction.category_id, value)),
        }
    }

    totals
}

/// The category with the highest settled expenses in the calendar month
/// containing `today`, or `None` if nothing was spent.
///
/// Ties go to the category encountered first, so a stable transaction order
/// yields a stable answer.
pub fn top_expense_category(transactions: &[Transaction], today: Date) -> Option<TopExpense> {
    let totals = expenses_by_category(transactions, today);
    let month_expenses: f64 = totals.iter().map(|(_, total)| total).sum();

    let mut top: Option<(Option<CategoryId>, f64)> = None;
    for (category_id, total) in totals {
        if top.is_none_or(|(_, top_total)| total > top_total) {
            top = Some((category_id, total));
        }
    }

    top.map(|(category_id, total)| TopExpense {
        category_id,
        total,
        percentage: total / month_expenses * 100.0,
    })
}

/// The biggest month-over-month saving and the biggest increase across
/// expense categories, as of `today`.
///
/// Movements are measured relative to the previous month's total, so only
/// categories with spending last month produce a ratio. A category that only
/// appeared this month counts as a 100% increase, but never displaces a
/// measured increase of 100% or more.
pub fn category_deltas(
    transactions: &[Transaction],
    today: Date,
) -> (Option<CategoryDelta>, Option<CategoryDelta>) {
    let current = expenses_by_category(transactions, today);
    let previous = expenses_by_category(transactions, previous_month(today));

    let current_total = |category_id: Option<CategoryId>| {
        current
            .iter()
            .find(|(id, _)| *id == category_id)
            .map_or(0.0, |(_, total)| *total)
    };

    let mut biggest_saving: Option<CategoryDelta> = None;
    let mut biggest_increase: Option<CategoryDelta> = None;

    for (category_id, previous_total) in &previous {
        if *previous_total <= 0.0 {
            continue;
        }

        let change = (current_total(*category_id) - previous_total) / previous_total;

        if change < 0.0
            && biggest_saving
                .as_ref()
                .is_none_or(|saving| -change * 100.0 > saving.percentage)
        {
            biggest_saving = Some(CategoryDelta {
                category_id: *category_id,
                percentage: -change * 100.0,
            });
        }

        if change > 0.0
            && biggest_increase
                .as_ref()
                .is_none_or(|increase| change * 100.0 > increase.percentage)
        {
            biggest_increase = Some(CategoryDelta {
                category_id: *category_id,
                percentage: change * 100.0,
            });
        }
    }

    let measured_increase_dominates = biggest_increase
        .as_ref()
        .is_some_and(|increase| increase.percentage >= 100.0);

    if !measured_increase_dominates {
        let brand_new = current.iter().find(|(category_id, total)| {
            *total > 0.0 && !previous.iter().any(|(id, _)| id == category_id)
        });

        if let Some((category_id, _)) = brand_new {
            biggest_increase = Some(CategoryDelta {
                category_id: *category_id,
                percentage: 100.0,
            });
        }
    }

    (biggest_saving, biggest_increase)
}
