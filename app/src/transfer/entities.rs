use crate::money::Money;
use crate::transaction::Transaction;
use crate::user::{self, User};
use crate::{backend, session};
use thiserror::Error;

/// Every variant displays as the message shown to the user. Backend failures all read the
/// same; the step that failed is kept for the log.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Please fill in all fields")]
    MissingFields,
    #[error("Amount must be greater than 0")]
    NonPositiveAmount,
    #[error("Recipient not found")]
    RecipientNotFound,
    #[error("You cannot send money to yourself")]
    SelfTransfer,
    #[error("Insufficient balance")]
    InsufficientBalance,
    #[error("Something went wrong. Try again.")]
    Failed {
        step: Step,
        #[source]
        source: backend::Error,
    },
    #[error("Something went wrong. Try again.")]
    Session(#[from] session::Error),
}

/// The backend calls of a transfer, in order. None of them is undone when a later one fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    LookupRecipient,
    RecordTransaction,
    DebitSender,
    CreditRecipient,
    RefreshHistory,
}

impl Step {
    /// Whether the sender's balance had already been debited when this step ran.
    pub fn after_debit(&self) -> bool {
        matches!(self, Step::CreditRecipient | Step::RefreshHistory)
    }
}

#[derive(Debug, Clone)]
pub struct TransferRequest {
    pub recipient: String,
    pub amount: Money,
}

impl TransferRequest {
    pub fn new(recipient: impl Into<String>, amount: f64) -> Self {
        Self {
            recipient: recipient.into(),
            amount: Money(amount),
        }
    }

    /// Form-level checks, done before any backend call.
    pub(crate) fn check(&self) -> Result<user::Email, Error> {
        if self.recipient.is_empty() || self.amount.is_blank() {
            Err(Error::MissingFields)
        } else if !self.amount.is_positive() {
            Err(Error::NonPositiveAmount)
        } else {
            Ok(user::Email(self.recipient.clone()))
        }
    }
}

/// Outcome of a completed transfer.
#[derive(Debug, Clone)]
pub struct Receipt {
    /// The `sent` record created for the sender.
    pub transaction: Transaction,
    /// The sender's balance as patched on the backend.
    pub sender_balance: Money,
    /// The recipient as returned by the credit patch.
    pub recipient: User,
}
