//! An in-process stand-in for the mock REST API.
//!
//! Ids are handed out sequentially per collection, starting at "1". List filters match by
//! substring, as the hosted service does, so callers must narrow results down themselves.

use super::{Backend, Error};
use crate::transaction::{self, NewTransaction, Transaction, TransactionQuery};
use crate::user::{self, NewUser, User, UserPatch, UserQuery};
use async_trait::async_trait;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
pub struct MemoryBackend {
    state: Mutex<State>,
}

#[derive(Debug, Default)]
struct State {
    users: Vec<User>,
    transactions: Vec<Transaction>,
    next_user_id: u64,
    next_transaction_id: u64,
}

impl State {
    fn user_id(&mut self) -> user::Id {
        self.next_user_id += 1;
        user::Id(self.next_user_id.to_string())
    }

    fn transaction_id(&mut self) -> transaction::Id {
        self.next_transaction_id += 1;
        transaction::Id(self.next_transaction_id.to_string())
    }
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the `users` collection.
    pub async fn users(&self) -> Vec<User> {
        self.state.lock().await.users.clone()
    }

    /// Snapshot of the `transactions` collection.
    pub async fn transactions(&self) -> Vec<Transaction> {
        self.state.lock().await.transactions.clone()
    }
}

fn contains(field: &str, filter: Option<&str>) -> bool {
    filter.map_or(true, |filter| field.contains(filter))
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn list_users(&self, query: &UserQuery) -> Result<Vec<User>, Error> {
        let state = self.state.lock().await;
        Ok(state
            .users
            .iter()
            .filter(|user| {
                contains(user.email.as_str(), query.email.as_ref().map(|e| e.as_str()))
                    && contains(&user.password, query.password.as_deref())
            })
            .cloned()
            .collect())
    }

    async fn create_user(&self, user: &NewUser) -> Result<User, Error> {
        let mut state = self.state.lock().await;
        let created = User {
            id: state.user_id(),
            name: user.name.clone(),
            email: user.email.clone(),
            password: user.password.clone(),
            balance: user.balance,
        };
        state.users.push(created.clone());
        Ok(created)
    }

    async fn patch_user(&self, id: &user::Id, patch: &UserPatch) -> Result<User, Error> {
        let mut state = self.state.lock().await;
        let user = state
            .users
            .iter_mut()
            .find(|user| user.id == *id)
            .ok_or_else(|| Error::NotFound {
                collection: "users",
                id: id.0.clone(),
            })?;
        if let Some(balance) = patch.balance {
            user.balance = balance;
        }
        Ok(user.clone())
    }

    async fn list_transactions(&self, query: &TransactionQuery) -> Result<Vec<Transaction>, Error> {
        let state = self.state.lock().await;
        Ok(state
            .transactions
            .iter()
            .filter(|transaction| {
                contains(&transaction.user_id.0, query.user_id.as_ref().map(|id| id.0.as_str()))
            })
            .cloned()
            .collect())
    }

    async fn create_transaction(&self, transaction: &NewTransaction) -> Result<Transaction, Error> {
        let mut state = self.state.lock().await;
        let id = state.transaction_id();
        let created = transaction.clone().into_transaction(id);
        state.transactions.push(created.clone());
        Ok(created)
    }
}
