//! The aggregation engine behind the dashboard and analysis endpoints.
//!
//! Everything in this module except the HTTP handlers is a pure function over
//! a slice of transactions and an explicit reference date, so that every
//! figure the dashboard shows can be tested without a clock or a database.
//!
//! Scheduled payments that are still pending or were cancelled are planning
//! data, not money that moved: only settled transactions (see [is_settled])
//! feed balances, series, and averages.

mod analysis;
mod handlers;
mod series;
mod summary;

pub use analysis::{
    AnalysisAverages, CategoryDelta, PeriodAverages, TopExpense, averages, category_deltas,
    top_expense_category,
};
pub use handlers::{SummaryView, build_summary_view, get_analysis, get_dashboard};
pub(crate) use handlers::refreshed_summary;
pub use series::{
    CategorySlice, category_breakdown, daily_series, monthly_series, weekly_series,
};
pub use summary::{MonthSummary, month_summary, pending_count, percentage_change};

use serde::Serialize;

use crate::models::{Transaction, TransactionStatus};

/// Whether money actually moved for this transaction.
///
/// Non-scheduled transactions always count; scheduled payments count once
/// they are paid.
pub fn is_settled(transaction: &Transaction) -> bool {
    !transaction.is_scheduled || transaction.status == TransactionStatus::Paid
}

/// One bucket of a dashboard time series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodPoint {
    /// The bucket label, e.g. "Mar 2024", "Seg" or "14:00".
    pub name: String,
    /// The total income in the bucket.
    pub income: f64,
    /// The total expenses in the bucket, as a positive number.
    pub expenses: f64,
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::models::{Transaction, TransactionStatus, UserId};

    use super::is_settled;

    #[test]
    fn scheduled_payments_only_settle_once_paid() {
        let mut transaction =
            test_transaction(-100.0, date!(2024 - 03 - 15), true, TransactionStatus::Pending);
        assert!(!is_settled(&transaction));

        transaction.status = TransactionStatus::Cancelled;
        assert!(!is_settled(&transaction));

        transaction.status = TransactionStatus::Paid;
        assert!(is_settled(&transaction));
    }

    #[test]
    fn ordinary_transactions_are_always_settled() {
        let transaction =
            test_transaction(-100.0, date!(2024 - 03 - 15), false, TransactionStatus::Paid);

        assert!(is_settled(&transaction));
    }

    pub(super) fn test_transaction(
        amount: f64,
        date: time::Date,
        is_scheduled: bool,
        status: TransactionStatus,
    ) -> Transaction {
        Transaction {
            id: 0,
            user_id: UserId::new(1),
            name: "test".to_owned(),
            description: String::new(),
            amount,
            date,
            category_id: None,
            payment_method: crate::models::PaymentMethod::Cash,
            is_scheduled,
            status,
            created_at: crate::dates::noon_utc(date),
            updated_at: crate::dates::noon_utc(date),
        }
    }
}
