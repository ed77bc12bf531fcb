//! The seam between the flows and the mock REST API. The API exposes two collections, `users`
//! and `transactions`, with generic CRUD semantics; [`Backend`] mirrors exactly the calls the
//! flows make against them. The HTTP implementation lives in the `api` crate, and
//! [`MemoryBackend`] stands in for the service in tests.

use crate::transaction::{NewTransaction, Transaction, TransactionQuery};
use crate::user::{self, NewUser, User, UserPatch, UserQuery};
use async_trait::async_trait;
use thiserror::Error;

mod memory;

pub use memory::MemoryBackend;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{collection} record {id} not found")]
    NotFound { collection: &'static str, id: String },
    #[error("backend responded with status {0}")]
    Status(u16),
    #[error("request to the backend failed")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("malformed backend response")]
    Decode(#[source] Box<dyn std::error::Error + Send + Sync>),
}

#[async_trait]
pub trait Backend: Send + Sync {
    /// `GET /users`, filtered by the set query fields.
    async fn list_users(&self, query: &UserQuery) -> Result<Vec<User>, Error>;

    /// `POST /users`. Returns the record with its assigned id.
    async fn create_user(&self, user: &NewUser) -> Result<User, Error>;

    /// `PATCH /users/{id}`. Returns the updated record.
    async fn patch_user(&self, id: &user::Id, patch: &UserPatch) -> Result<User, Error>;

    /// `GET /transactions`, filtered by the set query fields.
    async fn list_transactions(&self, query: &TransactionQuery) -> Result<Vec<Transaction>, Error>;

    /// `POST /transactions`. Returns the record with its assigned id.
    async fn create_transaction(&self, transaction: &NewTransaction) -> Result<Transaction, Error>;
}
