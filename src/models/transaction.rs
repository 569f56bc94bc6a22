//! This file defines the transaction model: an expense or income, possibly a
//! scheduled payment, and its supporting enums.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::database_id::{CategoryId, TransactionId};
use crate::models::UserId;

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// The sign of `amount` carries the direction: positive amounts are income,
/// negative amounts are expenses (see [Transaction::kind]).
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The ID of the user who owns the transaction.
    pub user_id: UserId,
    /// A short label for the transaction, e.g. "Aluguel".
    pub name: String,
    /// Optional free text describing the transaction. Empty when unset.
    pub description: String,
    /// The amount of money spent or earned in this transaction.
    pub amount: f64,
    /// When the transaction happened (a calendar date, no time component).
    pub date: Date,
    /// The ID of the category the transaction belongs to, if any.
    pub category_id: Option<CategoryId>,
    /// How the money moved.
    pub payment_method: PaymentMethod,
    /// Whether this is a planned future payment rather than a settled one.
    pub is_scheduled: bool,
    /// The lifecycle status. Non-scheduled transactions are always paid.
    pub status: TransactionStatus,
    /// When the row was created, assigned by the store.
    pub created_at: OffsetDateTime,
    /// When the row was last written, assigned by the store.
    pub updated_at: OffsetDateTime,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(user_id: UserId, amount: f64, date: Date, name: &str) -> TransactionBuilder {
        TransactionBuilder {
            user_id,
            amount,
            date,
            name: name.to_owned(),
            description: String::new(),
            category_id: None,
            payment_method: PaymentMethod::Cash,
            is_scheduled: false,
            status: None,
        }
    }

    /// Whether the transaction is income or an expense, derived from the sign
    /// of the amount.
    pub fn kind(&self) -> TransactionKind {
        if self.amount > 0.0 {
            TransactionKind::Income
        } else {
            TransactionKind::Expense
        }
    }
}

/// A builder for creating [Transaction] instances.
///
/// Call [Transaction::build] to create one, chain the setters for the
/// optional fields, then pass it to the transaction store.
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    /// The ID of the user who will own the transaction.
    pub user_id: UserId,
    /// The signed monetary amount. Positive is income, negative an expense.
    pub amount: f64,
    /// The date when the transaction occurred.
    pub date: Date,
    /// A short label for the transaction.
    pub name: String,
    /// Optional free text describing the transaction.
    pub description: String,
    /// The category of the transaction, e.g. "Alimentação", "Transporte".
    pub category_id: Option<CategoryId>,
    /// How the money moved.
    pub payment_method: PaymentMethod,
    /// Whether this is a planned future payment.
    pub is_scheduled: bool,
    /// The initial status. When `None`, the store applies the default:
    /// pending for scheduled payments, paid for everything else.
    pub status: Option<TransactionStatus>,
}

impl TransactionBuilder {
    /// Set the description for the transaction.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_owned();
        self
    }

    /// Set the category ID for the transaction.
    pub fn category_id(mut self, category_id: Option<CategoryId>) -> Self {
        self.category_id = category_id;
        self
    }

    /// Set the payment method for the transaction.
    pub fn payment_method(mut self, payment_method: PaymentMethod) -> Self {
        self.payment_method = payment_method;
        self
    }

    /// Mark the transaction as a scheduled payment.
    pub fn scheduled(mut self, is_scheduled: bool) -> Self {
        self.is_scheduled = is_scheduled;
        self
    }

    /// Set an explicit initial status.
    pub fn status(mut self, status: TransactionStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// The status the transaction will be created with: the explicit status
    /// when one was set, otherwise pending for scheduled payments and paid
    /// for everything else.
    pub fn initial_status(&self) -> TransactionStatus {
        match self.status {
            Some(status) => status,
            None if self.is_scheduled => TransactionStatus::Pending,
            None => TransactionStatus::Paid,
        }
    }
}

/// The user-editable fields written by a transaction update.
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionUpdate {
    /// The ID of the transaction to update.
    pub id: TransactionId,
    /// The ID of the owning user. Updates never cross user boundaries.
    pub user_id: UserId,
    /// The new label.
    pub name: String,
    /// The new description.
    pub description: String,
    /// The new signed amount.
    pub amount: f64,
    /// The new date.
    pub date: Date,
    /// The new category.
    pub category_id: Option<CategoryId>,
    /// The new payment method.
    pub payment_method: PaymentMethod,
    /// Whether the transaction is a scheduled payment.
    pub is_scheduled: bool,
    /// The new status.
    pub status: TransactionStatus,
}

/// Whether a transaction is income or an expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money earned: the amount must not be negative.
    Income,
    /// Money spent: the amount must not be positive.
    Expense,
}

impl TransactionKind {
    /// Whether `amount` has a sign that agrees with this kind.
    ///
    /// Zero agrees with both kinds.
    pub fn agrees_with(&self, amount: f64) -> bool {
        match self {
            TransactionKind::Income => amount >= 0.0,
            TransactionKind::Expense => amount <= 0.0,
        }
    }
}

/// The lifecycle status of a transaction.
///
/// Only scheduled payments move between states; a transaction that is not
/// scheduled is permanently [TransactionStatus::Paid]. Transitions between
/// the three states are otherwise unrestricted: a cancelled payment may be
/// reinstated and a paid one reverted to pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// The payment has been settled.
    Paid,
    /// The scheduled payment has not been settled yet.
    Pending,
    /// The scheduled payment was withdrawn.
    Cancelled,
}

impl TransactionStatus {
    /// The status as its wire and database string.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Paid => "paid",
            TransactionStatus::Pending => "pending",
            TransactionStatus::Cancelled => "cancelled",
        }
    }
}

impl Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The error returned when parsing an unknown status string.
#[derive(Debug, thiserror::Error)]
#[error("unknown transaction status: {0}")]
pub struct ParseStatusError(String);

impl FromStr for TransactionStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "paid" => Ok(TransactionStatus::Paid),
            "pending" => Ok(TransactionStatus::Pending),
            "cancelled" => Ok(TransactionStatus::Cancelled),
            other => Err(ParseStatusError(other.to_owned())),
        }
    }
}

/// How the money in a transaction moved.
///
/// The wire names (`credit_card`, `pix`, `boleto`, ...) match the payment
/// method tags the client applications already use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Paid by credit card.
    CreditCard,
    /// Paid by debit card.
    DebitCard,
    /// Paid in cash.
    Cash,
    /// Paid by PIX instant transfer.
    Pix,
    /// Paid by bank transfer.
    Transfer,
    /// Paid by bank slip.
    #[serde(rename = "boleto")]
    BankSlip,
}

impl PaymentMethod {
    /// The payment method as its wire and database string.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "credit_card",
            PaymentMethod::DebitCard => "debit_card",
            PaymentMethod::Cash => "cash",
            PaymentMethod::Pix => "pix",
            PaymentMethod::Transfer => "transfer",
            PaymentMethod::BankSlip => "boleto",
        }
    }
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The error returned when parsing an unknown payment method string.
#[derive(Debug, thiserror::Error)]
#[error("unknown payment method: {0}")]
pub struct ParsePaymentMethodError(String);

impl FromStr for PaymentMethod {
    type Err = ParsePaymentMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "credit_card" => Ok(PaymentMethod::CreditCard),
            "debit_card" => Ok(PaymentMethod::DebitCard),
            "cash" => Ok(PaymentMethod::Cash),
            "pix" => Ok(PaymentMethod::Pix),
            "transfer" => Ok(PaymentMethod::Transfer),
            "boleto" => Ok(PaymentMethod::BankSlip),
            other => Err(ParsePaymentMethodError(other.to_owned())),
        }
    }
}
