//! The handlers for the dashboard and analysis endpoints.
//!
//! These glue the pure aggregation functions to the stores: load the user's
//! transactions and categories, aggregate as of today, and resolve category
//! references into display fields.

use axum::{Extension, Json, extract::State};
use serde::Serialize;
use time::{Date, OffsetDateTime};

use crate::{
    Error,
    dashboard::{
        AnalysisAverages, CategoryDelta, PeriodPoint, TopExpense, averages, category_breakdown,
        category_deltas, daily_series, month_summary, monthly_series, pending_count,
        top_expense_category, weekly_series,
    },
    models::{Transaction, UserId},
    registry::{CategoryRegistry, ResolvedCategory},
    state::AppState,
    stores::TransactionStore,
};

/// Load the user's transactions for an aggregate read, degrading to an empty
/// set on a store failure.
///
/// The read endpoints report zeros instead of failing outright, so a store
/// hiccup never produces a half-populated dashboard.
fn transactions_or_empty(state: &AppState, user_id: UserId) -> Vec<Transaction> {
    state
        .transaction_store
        .get_by_user(user_id)
        .unwrap_or_else(|error| {
            tracing::error!("Could not load transactions for aggregation: {error}");
            Vec::new()
        })
}

/// The headline figures returned with the dashboard and echoed back by every
/// transaction mutation, so clients never render stale totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryView {
    /// Income minus expenses for the current month.
    pub balance: f64,
    /// The total income for the current month.
    pub monthly_income: f64,
    /// The total expenses for the current month, as a positive number.
    pub monthly_expenses: f64,
    /// The percentage change in balance versus the previous month.
    pub balance_change: f64,
    /// The percentage change in income versus the previous month.
    pub income_change: f64,
    /// The percentage change in expenses versus the previous month.
    pub expenses_change: f64,
    /// Scheduled payments still pending and due within the next seven days.
    pub pending_count: usize,
}

/// Build the summary block for `transactions` as of `today`.
pub fn build_summary_view(transactions: &[Transaction], today: Date) -> SummaryView {
    let summary = month_summary(transactions, today);

    SummaryView {
        balance: summary.balance,
        monthly_income: summary.income,
        monthly_expenses: summary.expenses,
        balance_change: summary.balance_change,
        income_change: summary.income_change,
        expenses_change: summary.expenses_change,
        pending_count: pending_count(transactions, today),
    }
}

/// One slice of the expense-by-category chart, with display fields resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
struct CategorySliceView {
    id: String,
    name: String,
    color: String,
    value: f64,
}

/// The full dashboard payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    summary: SummaryView,
    monthly_series: Vec<PeriodPoint>,
    weekly_series: Vec<PeriodPoint>,
    daily_series: Vec<PeriodPoint>,
    category_breakdown: Vec<CategorySliceView>,
}

/// The top expense category, with display fields resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
struct TopExpenseView {
    category: ResolvedCategory,
    total: f64,
    percentage: f64,
}

/// A month-over-month category movement, with display fields resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
struct CategoryDeltaView {
    category: ResolvedCategory,
    percentage: f64,
}

/// The full analysis payload.
///
/// Every field is always present: when no category qualifies for a slot, the
/// slot carries the fallback category and a percentage of zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisView {
    averages: AnalysisAverages,
    top_expense_category: TopExpenseView,
    biggest_saving: CategoryDeltaView,
    biggest_increase: CategoryDeltaView,
}

/// A handler for getting the aggregated dashboard data for the current user.
pub async fn get_dashboard(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserId>,
) -> Result<Json<DashboardView>, Error> {
    let transactions = transactions_or_empty(&state, user_id);
    let registry = CategoryRegistry::load(&state.category_store, user_id)?;
    let today = OffsetDateTime::now_utc().date();

    let category_breakdown = category_breakdown(&transactions)
        .into_iter()
        .map(|slice| {
            let category = registry.lookup(slice.category_id);
            CategorySliceView {
                id: category.id,
                name: category.name,
                color: category.color,
                value: slice.value,
            }
        })
        .collect();

    Ok(Json(DashboardView {
        summary: build_summary_view(&transactions, today),
        monthly_series: monthly_series(&transactions),
        weekly_series: weekly_series(&transactions, today),
        daily_series: daily_series(&transactions, today),
        category_breakdown,
    }))
}

/// A handler for getting the longer-horizon analysis data for the current
/// user.
pub async fn get_analysis(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserId>,
) -> Result<Json<AnalysisView>, Error> {
    let transactions = transactions_or_empty(&state, user_id);
    let registry = CategoryRegistry::load(&state.category_store, user_id)?;
    let today = OffsetDateTime::now_utc().date();

    let resolve_delta = |delta: Option<CategoryDelta>| {
        let delta = delta.unwrap_or(CategoryDelta {
            category_id: None,
            percentage: 0.0,
        });

        CategoryDeltaView {
            category: registry.lookup(delta.category_id),
            percentage: delta.percentage,
        }
    };

    let top = top_expense_category(&transactions, today).unwrap_or(TopExpense {
        category_id: None,
        total: 0.0,
        percentage: 0.0,
    });

    let (biggest_saving, biggest_increase) = category_deltas(&transactions, today);

    Ok(Json(AnalysisView {
        averages: averages(&transactions, today),
        top_expense_category: TopExpenseView {
            category: registry.lookup(top.category_id),
            total: top.total,
            percentage: top.percentage,
        },
        biggest_saving: resolve_delta(biggest_saving),
        biggest_increase: resolve_delta(biggest_increase),
    }))
}

/// Load a user's transactions and build a fresh summary block as of today.
///
/// Used by the transaction mutation handlers.
pub(crate) fn refreshed_summary(state: &AppState, user_id: UserId) -> Result<SummaryView, Error> {
    let transactions = state.transaction_store.get_by_user(user_id)?;

    Ok(build_summary_view(
        &transactions,
        OffsetDateTime::now_utc().date(),
    ))
}
