//! The pure feed logic: generating payment reminders and merging them into
//! an existing feed without disturbing what the user has already seen.

use time::{Date, Duration};

use crate::models::{NewNotification, Notification, Transaction, TransactionStatus};

/// The kind tag for reminders about scheduled payments coming due.
pub(crate) const KIND_UPCOMING: &str = "upcoming";

/// Build reminders for scheduled payments that are pending and due within the
/// next seven days of `today` (overdue ones included).
pub fn upcoming_payment_reminders(
    transactions: &[Transaction],
    today: Date,
) -> Vec<NewNotification> {
    let horizon = today.saturating_add(Duration::days(7));

    transactions
        .iter()
        .filter(|transaction| {
            transaction.is_scheduled
                && transaction.status == TransactionStatus::Pending
                && transaction.date <= horizon
        })
        .map(|transaction| NewNotification {
            user_id: transaction.user_id,
            title: "Pagamento próximo".to_owned(),
            message: format!("{} em {}", transaction.name, transaction.date),
            kind: KIND_UPCOMING.to_owned(),
            related_id: Some(transaction.id),
        })
        .collect()
}

/// Keep only the pushed entries the feed has not seen yet.
///
/// An entry counts as seen when the feed already holds a notification with
/// the same kind and related transaction, read or not. A reminder the user
/// has read (or deleted and re-triggered under a new ID) is therefore never
/// resurrected as unread.
pub fn merge_pushed(feed: &[Notification], pushed: Vec<NewNotification>) -> Vec<NewNotification> {
    pushed
        .into_iter()
        .filter(|new| {
            !feed
                .iter()
                .any(|existing| existing.kind == new.kind && existing.related_id == new.related_id)
        })
        .collect()
}

/// The number of unread notifications in the feed.
pub fn unread_count(feed: &[Notification]) -> usize {
    feed.iter().filter(|notification| !notification.is_read).count()
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{
        dates::noon_utc,
        models::{NewNotification, Notification, Transaction, TransactionStatus, UserId},
    };

    use super::{KIND_UPCOMING, merge_pushed, unread_count, upcoming_payment_reminders};

    fn scheduled_payment(id: i64, date: time::Date, status: TransactionStatus) -> Transaction {
        Transaction {
            id,
            user_id: UserId::new(1),
            name: "Aluguel".to_owned(),
            description: String::new(),
            amount: -1200.0,
            date,
            category_id: None,
            payment_method: crate::models::PaymentMethod::BankSlip,
            is_scheduled: true,
            status,
            created_at: noon_utc(date),
            updated_at: noon_utc(date),
        }
    }

    fn feed_entry(kind: &str, related_id: Option<i64>, is_read: bool) -> Notification {
        Notification {
            id: 1,
            user_id: UserId::new(1),
            title: "Pagamento próximo".to_owned(),
            message: "Aluguel".to_owned(),
            kind: kind.to_owned(),
            is_read,
            related_id,
            created_at: noon_utc(date!(2024 - 06 - 10)),
        }
    }

    fn reminder(related_id: Option<i64>) -> NewNotification {
        NewNotification {
            user_id: UserId::new(1),
            title: "Pagamento próximo".to_owned(),
            message: "Aluguel em 2024-06-20".to_owned(),
            kind: KIND_UPCOMING.to_owned(),
            related_id,
        }
    }

    #[test]
    fn reminders_cover_the_next_seven_days_and_overdue_payments() {
        let today = date!(2024 - 06 - 15);
        let transactions = [
            scheduled_payment(1, date!(2024 - 06 - 20), TransactionStatus::Pending),
            // Overdue.
            scheduled_payment(2, date!(2024 - 06 - 01), TransactionStatus::Pending),
            // Beyond the horizon.
            scheduled_payment(3, date!(2024 - 07 - 01), TransactionStatus::Pending),
            // Already settled.
            scheduled_payment(4, date!(2024 - 06 - 18), TransactionStatus::Paid),
        ];

        let reminders = upcoming_payment_reminders(&transactions, today);

        let related: Vec<_> = reminders.iter().map(|r| r.related_id).collect();
        assert_eq!(related, vec![Some(1), Some(2)]);
    }

    #[test]
    fn merge_keeps_only_unseen_entries() {
        let feed = [feed_entry(KIND_UPCOMING, Some(1), false)];

        let merged = merge_pushed(&feed, vec![reminder(Some(1)), reminder(Some(2))]);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].related_id, Some(2));
    }

    #[test]
    fn merge_never_resurrects_a_read_entry() {
        let feed = [feed_entry(KIND_UPCOMING, Some(1), true)];

        let merged = merge_pushed(&feed, vec![reminder(Some(1))]);

        assert!(merged.is_empty());
    }

    #[test]
    fn merge_distinguishes_kinds() {
        let feed = [feed_entry("scheduled", Some(1), false)];

        let merged = merge_pushed(&feed, vec![reminder(Some(1))]);

        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn unread_count_ignores_read_entries() {
        let feed = [
            feed_entry(KIND_UPCOMING, Some(1), false),
            feed_entry(KIND_UPCOMING, Some(2), true),
        ];

        assert_eq!(unread_count(&feed), 1);
    }
}
