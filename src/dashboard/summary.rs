//! Month-to-date totals and period-over-period changes.

use time::{Date, Duration};

use crate::{
    dashboard::is_settled,
    dates::{in_month_of, previous_month},
    models::{Transaction, TransactionStatus},
};

/// The headline figures for the calendar month containing the reference date,
/// compared against the month before it.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthSummary {
    /// Income minus expenses for the current month.
    pub balance: f64,
    /// The total income for the current month.
    pub income: f64,
    /// The total expenses for the current month, as a positive number.
    pub expenses: f64,
    /// The percentage change in balance versus the previous month.
    pub balance_change: f64,
    /// The percentage change in income versus the previous month.
    pub income_change: f64,
    /// The percentage change in expenses versus the previous month.
    pub expenses_change: f64,
}

/// The percentage change from `previous` to `current`.
///
/// A zero baseline yields zero rather than an infinite change, so a first
/// month of data shows no movement instead of a meaningless spike.
pub fn percentage_change(previous: f64, current: f64) -> f64 {
    if previous == 0.0 {
        0.0
    } else {
        (current - previous) / previous.abs() * 100.0
    }
}

/// The settled income and expense totals (expenses as a positive number) for
/// the calendar month containing `reference`.
fn month_totals(transactions: &[Transaction], reference: Date) -> (f64, f64) {
    transactions
        .iter()
        .filter(|transaction| is_settled(transaction) && in_month_of(transaction.date, reference))
        .fold((0.0, 0.0), |(income, expenses), transaction| {
            if transaction.amount > 0.0 {
                (income + transaction.amount, expenses)
            } else {
                (income, expenses + transaction.amount.abs())
            }
        })
}

/// Summarize the calendar month containing `today` against the month before.
pub fn month_summary(transactions: &[Transaction], today: Date) -> MonthSummary {
    let (income, expenses) = month_totals(transactions, today);
    let (previous_income, previous_expenses) = month_totals(transactions, previous_month(today));

    let balance = income - expenses;
    let previous_balance = previous_income - previous_expenses;

    MonthSummary {
        balance,
        income,
        expenses,
        balance_change: percentage_change(previous_balance, balance),
        income_change: percentage_change(previous_income, income),
        expenses_change: percentage_change(previous_expenses, expenses),
    }
}

/// The number of scheduled payments still pending and due within the next
/// seven days.
///
/// There is no lower bound on the date, so overdue pending payments keep
/// counting until they are paid or cancelled.
pub fn pending_count(transactions: &[Transaction], today: Date) -> usize {
    let horizon = today.saturating_add(Duration::days(7));

    transactions
        .iter()
        .filter(|transaction| {
            transaction.is_scheduled
                && transaction.status == TransactionStatus::Pending
                && transaction.date <= horizon
        })
        .count()
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{dashboard::tests::test_transaction, models::TransactionStatus};

    use super::{month_summary, pending_count, percentage_change};

    #[test]
    fn percentage_change_handles_zero_baseline() {
        assert_eq!(percentage_change(0.0, 500.0), 0.0);
        assert_eq!(percentage_change(0.0, 0.0), 0.0);
    }

    #[test]
    fn percentage_change_is_signed() {
        assert_eq!(percentage_change(100.0, 150.0), 50.0);
        assert_eq!(percentage_change(100.0, 50.0), -50.0);
    }

    #[test]
    fn month_summary_of_no_transactions_is_all_zeros() {
        let summary = month_summary(&[], date!(2024 - 03 - 15));

        assert_eq!(summary.balance, 0.0);
        assert_eq!(summary.income, 0.0);
        assert_eq!(summary.expenses, 0.0);
        assert_eq!(summary.income_change, 0.0);
    }

    #[test]
    fn month_summary_balance_is_income_minus_expenses() {
        let today = date!(2024 - 03 - 15);
        let transactions = [
            test_transaction(3000.0, date!(2024 - 03 - 05), false, TransactionStatus::Paid),
            test_transaction(-1200.0, date!(2024 - 03 - 10), false, TransactionStatus::Paid),
            test_transaction(-300.0, date!(2024 - 03 - 12), false, TransactionStatus::Paid),
        ];

        let summary = month_summary(&transactions, today);

        assert_eq!(summary.income, 3000.0);
        assert_eq!(summary.expenses, 1500.0);
        assert_eq!(summary.balance, summary.income - summary.expenses);
    }

    #[test]
    fn month_summary_compares_against_previous_calendar_month() {
        let today = date!(2024 - 03 - 15);
        let transactions = [
            test_transaction(1000.0, date!(2024 - 02 - 10), false, TransactionStatus::Paid),
            test_transaction(1500.0, date!(2024 - 03 - 10), false, TransactionStatus::Paid),
        ];

        let summary = month_summary(&transactions, today);

        assert_eq!(summary.income_change, 50.0);
        assert_eq!(summary.expenses_change, 0.0);
    }

    #[test]
    fn month_summary_ignores_pending_and_cancelled_payments() {
        let today = date!(2024 - 03 - 15);
        let transactions = [
            test_transaction(500.0, date!(2024 - 03 - 05), false, TransactionStatus::Paid),
            test_transaction(-900.0, date!(2024 - 03 - 20), true, TransactionStatus::Pending),
            test_transaction(-400.0, date!(2024 - 03 - 08), true, TransactionStatus::Cancelled),
            test_transaction(-100.0, date!(2024 - 03 - 02), true, TransactionStatus::Paid),
        ];

        let summary = month_summary(&transactions, today);

        assert_eq!(summary.income, 500.0);
        assert_eq!(summary.expenses, 100.0);
    }

    #[test]
    fn pending_count_looks_seven_days_ahead_and_counts_overdue() {
        let today = date!(2024 - 03 - 15);
        let transactions = [
            // Due within the window.
            test_transaction(-100.0, date!(2024 - 03 - 20), true, TransactionStatus::Pending),
            // Due exactly at the horizon.
            test_transaction(-100.0, date!(2024 - 03 - 22), true, TransactionStatus::Pending),
            // Overdue, still pending.
            test_transaction(-100.0, date!(2024 - 02 - 01), true, TransactionStatus::Pending),
            // Beyond the horizon.
            test_transaction(-100.0, date!(2024 - 03 - 23), true, TransactionStatus::Pending),
            // In the window but already paid.
            test_transaction(-100.0, date!(2024 - 03 - 18), true, TransactionStatus::Paid),
            // Not a scheduled payment.
            test_transaction(-100.0, date!(2024 - 03 - 18), false, TransactionStatus::Paid),
        ];

        assert_eq!(pending_count(&transactions, today), 3);
    }
}
