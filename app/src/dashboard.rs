//! The logged-in view: the session user with their transaction history, and sending money
//! from it.
//!
//! The balance shown is the session copy. It is only changed by transfers made through this
//! client, so money received from others shows up after the next login.

use crate::backend::{self, Backend};
use crate::money::Money;
use crate::session;
use crate::transaction::{self, Transaction};
use crate::transfer::{self, Receipt, Step, TransferRequest};
use crate::user::User;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Please log in first")]
    NotLoggedIn,
    #[error("Something went wrong. Try again.")]
    Backend(#[from] backend::Error),
    #[error("Something went wrong. Try again.")]
    Session(#[from] session::Error),
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    pub user: User,
    pub transactions: Vec<Transaction>,
}

impl Dashboard {
    pub async fn load(backend: &dyn Backend, store: &session::Store) -> Result<Self, Error> {
        let user = store.load()?.ok_or(Error::NotLoggedIn)?;
        let transactions = transaction::history(backend, &user.id).await?;
        Ok(Self { user, transactions })
    }

    pub fn balance(&self) -> Money {
        self.user.balance
    }

    /// Sends money and brings the dashboard up to date: the session balance is lowered by the
    /// amount and the history is fetched again.
    pub async fn send_money(
        &mut self,
        backend: &dyn Backend,
        store: &session::Store,
        request: &TransferRequest,
    ) -> Result<Receipt, transfer::Error> {
        let receipt = transfer::send(backend, &self.user, request).await?;

        self.user.balance = receipt.sender_balance;
        store.save(&self.user)?;

        self.transactions = transaction::history(backend, &self.user.id)
            .await
            .map_err(|source| {
                log::error!("could not refresh history after transfer: {}", source);
                transfer::Error::Failed {
                    step: Step::RefreshHistory,
                    source,
                }
            })?;
        Ok(receipt)
    }
}
