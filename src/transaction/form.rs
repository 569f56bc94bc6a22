//! The wire forms for creating and updating transactions.

use serde::Deserialize;
use time::Date;

use crate::{
    Error,
    database_id::CategoryId,
    models::{PaymentMethod, TransactionKind, TransactionStatus},
};

/// The fields a client submits to create or replace a transaction.
///
/// The amount is signed (income positive, expenses negative) and must agree
/// with the declared type; the redundancy catches client-side sign bugs
/// before they corrupt a user's balance.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionForm {
    /// A short label for the transaction.
    pub name: String,
    /// Optional free text describing the transaction.
    #[serde(default)]
    pub description: String,
    /// The signed monetary amount.
    pub value: f64,
    /// Whether the transaction is income or an expense.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// The date when the transaction occurred.
    pub date: Date,
    /// The category of the transaction, if any.
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    /// How the money moved.
    #[serde(default = "default_payment_method")]
    pub payment_method: PaymentMethod,
    /// Whether this is a planned future payment.
    #[serde(default)]
    pub is_scheduled: bool,
    /// An explicit status. Only meaningful for scheduled payments; when
    /// omitted, the store applies the default.
    #[serde(default)]
    pub status: Option<TransactionStatus>,
}

fn default_payment_method() -> PaymentMethod {
    PaymentMethod::Cash
}

impl TransactionForm {
    /// Check the form's invariants.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - [Error::EmptyName] if the name is blank.
    /// - [Error::InvalidAmount] if the amount is not finite or its sign does not agree with the declared type.
    /// - [Error::NotScheduled] if a status other than paid is given for a transaction that is not a scheduled payment.
    pub fn validate(&self) -> Result<(), Error> {
        if self.name.trim().is_empty() {
            return Err(Error::EmptyName);
        }

        if !self.value.is_finite() {
            return Err(Error::InvalidAmount(format!(
                "{} is not a finite number",
                self.value
            )));
        }

        if !self.kind.agrees_with(self.value) {
            return Err(Error::InvalidAmount(format!(
                "the sign of {} does not match the transaction type",
                self.value
            )));
        }

        if !self.is_scheduled
            && matches!(
                self.status,
                Some(TransactionStatus::Pending) | Some(TransactionStatus::Cancelled)
            )
        {
            return Err(Error::NotScheduled);
        }

        Ok(())
    }
}

/// The body of a status transition request.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct StatusForm {
    /// The status to move the scheduled payment to.
    pub status: TransactionStatus,
}
