//! The transaction endpoints: CRUD over a user's transactions plus the status
//! transition for scheduled payments.
//!
//! Every mutation response carries a freshly computed summary block, so a
//! client that just wrote a transaction never renders totals from before the
//! write.

mod endpoints;
mod form;

pub use endpoints::{
    create_transaction, delete_transaction, get_transactions, put_transaction,
    put_transaction_status,
};
pub use form::{StatusForm, TransactionForm};
