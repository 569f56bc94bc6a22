//! The handlers for the transaction endpoints.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;
use time::{Date, OffsetDateTime};

use crate::{
    Error,
    dashboard::{SummaryView, refreshed_summary},
    database_id::TransactionId,
    models::{
        NewNotification, PaymentMethod, Transaction, TransactionKind, TransactionStatus,
        TransactionUpdate, UserId,
    },
    registry::{CategoryRegistry, ResolvedCategory},
    state::AppState,
    stores::{NotificationStore, TransactionStore},
    transaction::form::{StatusForm, TransactionForm},
};

/// A transaction as rendered for clients, with its category resolved into
/// display fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionView {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// A short label for the transaction.
    pub name: String,
    /// Free text describing the transaction. Empty when unset.
    pub description: String,
    /// The signed monetary amount.
    pub value: f64,
    /// Whether the transaction is income or an expense.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// The date when the transaction occurred.
    pub date: Date,
    /// The resolved category display fields.
    pub category: ResolvedCategory,
    /// How the money moved.
    pub payment_method: PaymentMethod,
    /// Whether this is a planned future payment.
    pub is_scheduled: bool,
    /// The lifecycle status.
    pub status: TransactionStatus,
    /// When the transaction was recorded.
    pub created_at: OffsetDateTime,
}

impl TransactionView {
    fn new(transaction: &Transaction, registry: &CategoryRegistry) -> Self {
        Self {
            id: transaction.id,
            name: transaction.name.clone(),
            description: transaction.description.clone(),
            value: transaction.amount,
            kind: transaction.kind(),
            date: transaction.date,
            category: registry.lookup(transaction.category_id),
            payment_method: transaction.payment_method,
            is_scheduled: transaction.is_scheduled,
            status: transaction.status,
            created_at: transaction.created_at,
        }
    }
}

/// The response to a transaction create, update, or status change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionMutationView {
    /// The transaction after the write.
    pub transaction: TransactionView,
    /// The summary block recomputed after the write.
    pub summary: SummaryView,
}

/// The response to a transaction deletion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionDeletionView {
    /// The summary block recomputed after the deletion.
    pub summary: SummaryView,
}

/// A handler for listing all of the user's transactions, most recent first.
pub async fn get_transactions(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserId>,
) -> Result<Json<Vec<TransactionView>>, Error> {
    let transactions = state.transaction_store.get_by_user(user_id)?;
    let registry = CategoryRegistry::load(&state.category_store, user_id)?;

    Ok(Json(
        transactions
            .iter()
            .map(|transaction| TransactionView::new(transaction, &registry))
            .collect(),
    ))
}

/// A handler for creating a transaction.
///
/// Creating a scheduled payment that starts out pending also appends a
/// reminder to the user's notification feed.
pub async fn create_transaction(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserId>,
    Json(form): Json<TransactionForm>,
) -> Result<(StatusCode, Json<TransactionMutationView>), Error> {
    form.validate()?;

    let mut builder = Transaction::build(user_id, form.value, form.date, form.name.trim())
        .description(&form.description)
        .category_id(form.category_id)
        .payment_method(form.payment_method)
        .scheduled(form.is_scheduled);
    if let Some(status) = form.status {
        builder = builder.status(status);
    }

    let transaction = state.transaction_store.create(builder)?;

    if transaction.is_scheduled && transaction.status == TransactionStatus::Pending {
        state.notification_store.create(NewNotification {
            user_id,
            title: "Pagamento agendado".to_owned(),
            message: format!("{} em {}", transaction.name, transaction.date),
            kind: "scheduled".to_owned(),
            related_id: Some(transaction.id),
        })?;
    }

    let registry = CategoryRegistry::load(&state.category_store, user_id)?;
    let view = TransactionMutationView {
        transaction: TransactionView::new(&transaction, &registry),
        summary: refreshed_summary(&state, user_id)?,
    };

    Ok((StatusCode::CREATED, Json(view)))
}

/// A handler for replacing the user-editable fields of a transaction.
pub async fn put_transaction(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserId>,
    Path(transaction_id): Path<TransactionId>,
    Json(form): Json<TransactionForm>,
) -> Result<Json<TransactionMutationView>, Error> {
    form.validate()?;

    // Also proves ownership before anything is written.
    let existing = state.transaction_store.get(transaction_id, user_id)?;

    let status = match form.status {
        Some(status) => status,
        None if form.is_scheduled && existing.is_scheduled => existing.status,
        None if form.is_scheduled => TransactionStatus::Pending,
        None => TransactionStatus::Paid,
    };

    let transaction = state.transaction_store.update(TransactionUpdate {
        id: transaction_id,
        user_id,
        name: form.name.trim().to_owned(),
        description: form.description,
        amount: form.value,
        date: form.date,
        category_id: form.category_id,
        payment_method: form.payment_method,
        is_scheduled: form.is_scheduled,
        status,
    })?;

    let registry = CategoryRegistry::load(&state.category_store, user_id)?;
    Ok(Json(TransactionMutationView {
        transaction: TransactionView::new(&transaction, &registry),
        summary: refreshed_summary(&state, user_id)?,
    }))
}

/// A handler for moving a scheduled payment between statuses.
///
/// Transitions between paid, pending, and cancelled are unrestricted; only
/// transactions that are not scheduled payments are refused.
pub async fn put_transaction_status(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserId>,
    Path(transaction_id): Path<TransactionId>,
    Json(form): Json<StatusForm>,
) -> Result<Json<TransactionMutationView>, Error> {
    let existing = state.transaction_store.get(transaction_id, user_id)?;

    if !existing.is_scheduled {
        return Err(Error::NotScheduled);
    }

    let transaction = state
        .transaction_store
        .set_status(transaction_id, user_id, form.status)?;

    let registry = CategoryRegistry::load(&state.category_store, user_id)?;
    Ok(Json(TransactionMutationView {
        transaction: TransactionView::new(&transaction, &registry),
        summary: refreshed_summary(&state, user_id)?,
    }))
}

/// A handler for deleting a transaction.
pub async fn delete_transaction(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserId>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<Json<TransactionDeletionView>, Error> {
    state.transaction_store.delete(transaction_id, user_id)?;

    Ok(Json(TransactionDeletionView {
        summary: refreshed_summary(&state, user_id)?,
    }))
}

#[cfg(test)]
mod tests {
    use axum::{
        Extension, Json,
        extract::{Path, State},
        http::StatusCode,
    };
    use rusqlite::Connection;
    use time::OffsetDateTime;
    use time::macros::date;

    use crate::{
        Error,
        models::{
            FALLBACK_CATEGORY_SLUG, PasswordHash, PaymentMethod, Transaction, TransactionKind,
            TransactionStatus, UserId,
        },
        state::AppState,
        stores::{NotificationStore, ProfileStore, TransactionStore},
        transaction::form::{StatusForm, TransactionForm},
    };

    use super::{
        create_transaction, delete_transaction, get_transactions, put_transaction,
        put_transaction_status,
    };

    fn get_test_state() -> (AppState, UserId) {
        let state = AppState::new(Connection::open_in_memory().unwrap(), "42").unwrap();
        let profile = state
            .profile_store
            .create(
                "test@test.com",
                "Test",
                PasswordHash::new_unchecked("notarealhash"),
            )
            .unwrap();

        (state, profile.id)
    }

    fn expense_form(value: f64) -> TransactionForm {
        TransactionForm {
            name: "Mercado".to_owned(),
            description: String::new(),
            value,
            kind: TransactionKind::Expense,
            date: OffsetDateTime::now_utc().date(),
            category_id: None,
            payment_method: PaymentMethod::Pix,
            is_scheduled: false,
            status: None,
        }
    }

    #[tokio::test]
    async fn create_returns_transaction_and_fresh_summary() {
        let (state, user_id) = get_test_state();

        let (status, Json(view)) = create_transaction(
            State(state),
            Extension(user_id),
            Json(expense_form(-45.9)),
        )
        .await
        .expect("Could not create transaction");

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(view.transaction.value, -45.9);
        assert_eq!(view.transaction.kind, TransactionKind::Expense);
        assert_eq!(view.transaction.category.id, FALLBACK_CATEGORY_SLUG);
        assert_eq!(view.summary.monthly_expenses, 45.9);
    }

    #[tokio::test]
    async fn create_rejects_sign_mismatch() {
        let (state, user_id) = get_test_state();
        let mut form = expense_form(-45.9);
        form.value = 45.9;

        let result =
            create_transaction(State(state), Extension(user_id), Json(form)).await;

        assert!(matches!(result.err(), Some(Error::InvalidAmount(_))));
    }

    #[tokio::test]
    async fn creating_pending_scheduled_payment_appends_notification() {
        let (state, user_id) = get_test_state();
        let mut form = expense_form(-1200.0);
        form.name = "Aluguel".to_owned();
        form.is_scheduled = true;

        create_transaction(State(state.clone()), Extension(user_id), Json(form))
            .await
            .expect("Could not create transaction");

        let feed = state.notification_store.get_by_user(user_id).unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].title, "Pagamento agendado");
        assert!(feed[0].message.contains("Aluguel"));
        assert!(!feed[0].is_read);
    }

    #[tokio::test]
    async fn creating_settled_transaction_appends_no_notification() {
        let (state, user_id) = get_test_state();

        create_transaction(
            State(state.clone()),
            Extension(user_id),
            Json(expense_form(-45.9)),
        )
        .await
        .expect("Could not create transaction");

        assert!(state.notification_store.get_by_user(user_id).unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_returns_transactions_with_resolved_categories() {
        let (state, user_id) = get_test_state();
        create_transaction(
            State(state.clone()),
            Extension(user_id),
            Json(expense_form(-45.9)),
        )
        .await
        .unwrap();

        let Json(views) = get_transactions(State(state), Extension(user_id))
            .await
            .expect("Could not list transactions");

        assert_eq!(views.len(), 1);
        assert_eq!(views[0].category.id, FALLBACK_CATEGORY_SLUG);
    }

    #[tokio::test]
    async fn put_replaces_fields_and_returns_fresh_summary() {
        let (state, user_id) = get_test_state();
        let transaction = state
            .transaction_store
            .create(Transaction::build(
                user_id,
                -45.9,
                OffsetDateTime::now_utc().date(),
                "Mercado",
            ))
            .unwrap();

        let mut form = expense_form(-60.0);
        form.name = "Feira".to_owned();
        let Json(view) = put_transaction(
            State(state),
            Extension(user_id),
            Path(transaction.id),
            Json(form),
        )
        .await
        .expect("Could not update transaction");

        assert_eq!(view.transaction.name, "Feira");
        assert_eq!(view.transaction.value, -60.0);
        assert_eq!(view.summary.monthly_expenses, 60.0);
    }

    #[tokio::test]
    async fn put_on_another_users_transaction_is_not_found() {
        let (state, user_id) = get_test_state();
        let other = state
            .profile_store
            .create(
                "other@test.com",
                "Other",
                PasswordHash::new_unchecked("notarealhash"),
            )
            .unwrap();
        let transaction = state
            .transaction_store
            .create(Transaction::build(
                other.id,
                -45.9,
                date!(2024 - 03 - 15),
                "Mercado",
            ))
            .unwrap();

        let result = put_transaction(
            State(state),
            Extension(user_id),
            Path(transaction.id),
            Json(expense_form(-60.0)),
        )
        .await;

        assert_eq!(result.err(), Some(Error::NotFound));
    }

    #[tokio::test]
    async fn status_change_settles_scheduled_payment() {
        let (state, user_id) = get_test_state();
        let transaction = state
            .transaction_store
            .create(
                Transaction::build(
                    user_id,
                    -1200.0,
                    OffsetDateTime::now_utc().date(),
                    "Aluguel",
                )
                .scheduled(true),
            )
            .unwrap();
        assert_eq!(transaction.status, TransactionStatus::Pending);

        let Json(view) = put_transaction_status(
            State(state),
            Extension(user_id),
            Path(transaction.id),
            Json(StatusForm {
                status: TransactionStatus::Paid,
            }),
        )
        .await
        .expect("Could not change status");

        assert_eq!(view.transaction.status, TransactionStatus::Paid);
        // Now settled, the payment shows up in the totals and is no longer
        // counted as pending.
        assert_eq!(view.summary.monthly_expenses, 1200.0);
        assert_eq!(view.summary.pending_count, 0);
    }

    #[tokio::test]
    async fn status_change_on_ordinary_transaction_is_refused() {
        let (state, user_id) = get_test_state();
        let transaction = state
            .transaction_store
            .create(Transaction::build(
                user_id,
                -45.9,
                date!(2024 - 03 - 15),
                "Mercado",
            ))
            .unwrap();

        let result = put_transaction_status(
            State(state),
            Extension(user_id),
            Path(transaction.id),
            Json(StatusForm {
                status: TransactionStatus::Cancelled,
            }),
        )
        .await;

        assert_eq!(result.err(), Some(Error::NotScheduled));
    }

    #[tokio::test]
    async fn delete_returns_fresh_summary() {
        let (state, user_id) = get_test_state();
        let transaction = state
            .transaction_store
            .create(Transaction::build(
                user_id,
                -45.9,
                OffsetDateTime::now_utc().date(),
                "Mercado",
            ))
            .unwrap();

        let Json(view) = delete_transaction(State(state), Extension(user_id), Path(transaction.id))
            .await
            .expect("Could not delete transaction");

        assert_eq!(view.summary.monthly_expenses, 0.0);
        assert_eq!(view.summary.balance, 0.0);
    }
}
