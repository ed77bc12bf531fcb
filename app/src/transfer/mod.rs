//! Moves money from the session user to another user, identified by email.
//!
//! The backend has no notion of a transfer, so one is assembled from plain collection calls:
//! - look up the recipient by email,
//! - check the amount against the sender's last known balance,
//! - record a `sent` transaction for the sender (the recipient gets no record),
//! - patch the sender's balance down,
//! - patch the recipient's balance up.
//!
//! Nothing here is atomic and nothing is compensated. If crediting the recipient fails after
//! the sender was debited, the amount is gone; the returned [`Error::Failed`] names the step so
//! that the log shows it. Balances are computed from the values read by this client, so two
//! clients transferring against the same account overwrite each other's updates.

use crate::backend::{self, Backend};
use crate::transaction::{self, NewTransaction};
use crate::user::{self, User};

mod entities;

pub use entities::{Error, Receipt, Step, TransferRequest};

pub const NOTE: &str = "Sent via dashboard";

fn failed(step: Step) -> impl FnOnce(backend::Error) -> Error {
    move |source| {
        if step.after_debit() {
            log::error!(
                "transfer failed at step {:?} after debiting the sender: {}",
                step, source
            );
        } else {
            log::error!("transfer failed at step {:?}: {}", step, source);
        }
        Error::Failed { step, source }
    }
}

/// Runs the transfer against the backend. `sender` is the session copy of the user; its
/// balance is the one checked, and it is not modified here.
pub async fn send(
    backend: &dyn Backend,
    sender: &User,
    request: &TransferRequest,
) -> Result<Receipt, Error> {
    let recipient_email = request.check()?;
    if recipient_email == sender.email {
        return Err(Error::SelfTransfer);
    }
    let amount = request.amount;

    let recipient = user::find_by_email(backend, &recipient_email)
        .await
        .map_err(failed(Step::LookupRecipient))?
        .ok_or_else(|| {
            log::warn!("transfer rejected, no user with email {}", recipient_email);
            Error::RecipientNotFound
        })?;
    if amount > sender.balance {
        log::warn!(
            "transfer rejected, {} exceeds the balance {} of user {}",
            amount,
            sender.balance,
            sender.id
        );
        return Err(Error::InsufficientBalance);
    }

    let transaction = transaction::record(
        backend,
        &NewTransaction::sent(sender.id.clone(), amount, recipient.email.clone(), NOTE),
    )
    .await
    .map_err(failed(Step::RecordTransaction))?;

    let sender_balance = sender.balance - amount;
    user::set_balance(backend, &sender.id, sender_balance)
        .await
        .map_err(failed(Step::DebitSender))?;

    let recipient = user::set_balance(backend, &recipient.id, recipient.balance + amount)
        .await
        .map_err(failed(Step::CreditRecipient))?;

    log::info!(
        "user {} sent {} to user {}",
        sender.id,
        amount,
        recipient.id
    );
    Ok(Receipt {
        transaction,
        sender_balance,
        recipient,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::money::Money;
    use crate::transaction::{Direction, Transaction, TransactionQuery};
    use crate::user::{Email, NewUser, UserPatch, UserQuery};
    use async_trait::async_trait;

    async fn seed(backend: &MemoryBackend, email: &str, balance: f64) -> User {
        backend
            .create_user(&NewUser {
                name: None,
                email: Email(email.to_owned()),
                password: "pw".to_owned(),
                balance: Money(balance),
            })
            .await
            .unwrap()
    }

    async fn balance_of(backend: &MemoryBackend, user: &User) -> Money {
        backend
            .users()
            .await
            .into_iter()
            .find(|u| u.id == user.id)
            .unwrap()
            .balance
    }

    #[tokio::test]
    async fn test_successful_transfer() {
        let backend = MemoryBackend::new();
        let ann = seed(&backend, "ann@example.com", 100.0).await;
        let bob = seed(&backend, "bob@example.com", 5.0).await;

        let receipt = send(&backend, &ann, &TransferRequest::new("bob@example.com", 30.0))
            .await
            .unwrap();

        assert_eq!(receipt.sender_balance, Money(70.0));
        assert_eq!(receipt.recipient.balance, Money(35.0));
        assert_eq!(balance_of(&backend, &ann).await, Money(70.0));
        assert_eq!(balance_of(&backend, &bob).await, Money(35.0));

        let transactions = backend.transactions().await;
        assert_eq!(transactions.len(), 1);
        let record = &transactions[0];
        assert_eq!(record.user_id, ann.id);
        assert_eq!(record.direction, Direction::Sent);
        assert_eq!(record.amount, Money(30.0));
        assert_eq!(record.to, Some(bob.email.clone()));
        assert_eq!(record.note.as_deref(), Some(NOTE));
    }

    #[tokio::test]
    async fn test_whole_balance_can_be_sent() {
        let backend = MemoryBackend::new();
        let ann = seed(&backend, "ann@example.com", 20.0).await;
        seed(&backend, "bob@example.com", 0.0).await;

        let receipt = send(&backend, &ann, &TransferRequest::new("bob@example.com", 20.0))
            .await
            .unwrap();
        assert_eq!(receipt.sender_balance, Money::ZERO);
    }

    #[tokio::test]
    async fn test_form_checks() {
        let backend = MemoryBackend::new();
        let ann = seed(&backend, "ann@example.com", 100.0).await;
        seed(&backend, "bob@example.com", 0.0).await;

        for (recipient, amount, message) in [
            ("", 10.0, "Please fill in all fields"),
            ("bob@example.com", 0.0, "Please fill in all fields"),
            ("bob@example.com", f64::NAN, "Please fill in all fields"),
            ("bob@example.com", -5.0, "Amount must be greater than 0"),
        ] {
            let err = send(&backend, &ann, &TransferRequest::new(recipient, amount))
                .await
                .unwrap_err();
            assert_eq!(err.to_string(), message);
        }
        assert!(backend.transactions().await.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_recipient() {
        let backend = MemoryBackend::new();
        let ann = seed(&backend, "ann@example.com", 100.0).await;
        seed(&backend, "joann@example.com", 0.0).await;

        let result = send(&backend, &ann, &TransferRequest::new("oann@example.com", 10.0)).await;
        assert!(matches!(result, Err(Error::RecipientNotFound)));
        assert_eq!(balance_of(&backend, &ann).await, Money(100.0));
    }

    #[tokio::test]
    async fn test_insufficient_cached_balance() {
        let backend = MemoryBackend::new();
        let mut ann = seed(&backend, "ann@example.com", 100.0).await;
        seed(&backend, "bob@example.com", 0.0).await;
        // The check trusts the session copy, not the backend.
        ann.balance = Money(10.0);

        let result = send(&backend, &ann, &TransferRequest::new("bob@example.com", 50.0)).await;
        assert!(matches!(result, Err(Error::InsufficientBalance)));
        assert!(backend.transactions().await.is_empty());
        assert_eq!(balance_of(&backend, &ann).await, Money(100.0));
    }

    #[tokio::test]
    async fn test_self_transfer() {
        let backend = MemoryBackend::new();
        let ann = seed(&backend, "ann@example.com", 100.0).await;

        let result = send(&backend, &ann, &TransferRequest::new("ann@example.com", 10.0)).await;
        assert!(matches!(result, Err(Error::SelfTransfer)));
        assert_eq!(balance_of(&backend, &ann).await, Money(100.0));
    }

    #[tokio::test]
    async fn test_self_transfer_with_shared_email() {
        let backend = MemoryBackend::new();
        // The backend does not enforce unique emails.
        let ann = seed(&backend, "ann@example.com", 100.0).await;
        let other = seed(&backend, "ann@example.com", 0.0).await;

        let result = send(&backend, &ann, &TransferRequest::new("ann@example.com", 10.0)).await;
        assert!(matches!(result, Err(Error::SelfTransfer)));
        assert_eq!(balance_of(&backend, &ann).await, Money(100.0));
        assert_eq!(balance_of(&backend, &other).await, Money::ZERO);
        assert!(backend.transactions().await.is_empty());
    }

    /// Delegates to a [`MemoryBackend`] but fails every patch of one user.
    struct FailingPatch {
        inner: MemoryBackend,
        fail_for: user::Id,
    }

    #[async_trait]
    impl Backend for FailingPatch {
        async fn list_users(&self, query: &UserQuery) -> Result<Vec<User>, backend::Error> {
            self.inner.list_users(query).await
        }

        async fn create_user(&self, user: &NewUser) -> Result<User, backend::Error> {
            self.inner.create_user(user).await
        }

        async fn patch_user(&self, id: &user::Id, patch: &UserPatch) -> Result<User, backend::Error> {
            if *id == self.fail_for {
                return Err(backend::Error::Status(500));
            }
            self.inner.patch_user(id, patch).await
        }

        async fn list_transactions(
            &self,
            query: &TransactionQuery,
        ) -> Result<Vec<Transaction>, backend::Error> {
            self.inner.list_transactions(query).await
        }

        async fn create_transaction(
            &self,
            transaction: &NewTransaction,
        ) -> Result<Transaction, backend::Error> {
            self.inner.create_transaction(transaction).await
        }
    }

    #[tokio::test]
    async fn test_failed_credit_is_not_compensated() {
        let inner = MemoryBackend::new();
        let ann = seed(&inner, "ann@example.com", 100.0).await;
        let bob = seed(&inner, "bob@example.com", 5.0).await;
        let backend = FailingPatch {
            inner,
            fail_for: bob.id.clone(),
        };

        let err = send(&backend, &ann, &TransferRequest::new("bob@example.com", 30.0))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Something went wrong. Try again.");
        match err {
            Error::Failed { step, .. } => {
                assert_eq!(step, Step::CreditRecipient);
                assert!(step.after_debit());
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert_eq!(balance_of(&backend.inner, &ann).await, Money(70.0));
        assert_eq!(balance_of(&backend.inner, &bob).await, Money(5.0));
        assert_eq!(backend.inner.transactions().await.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_debit_leaves_record() {
        let inner = MemoryBackend::new();
        let ann = seed(&inner, "ann@example.com", 100.0).await;
        let bob = seed(&inner, "bob@example.com", 5.0).await;
        let backend = FailingPatch {
            inner,
            fail_for: ann.id.clone(),
        };

        let err = send(&backend, &ann, &TransferRequest::new("bob@example.com", 30.0))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Failed {
                step: Step::DebitSender,
                ..
            }
        ));
        assert_eq!(balance_of(&backend.inner, &ann).await, Money(100.0));
        assert_eq!(balance_of(&backend.inner, &bob).await, Money(5.0));
        assert_eq!(backend.inner.transactions().await.len(), 1);
    }
}
