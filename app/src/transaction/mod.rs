use crate::backend::{self, Backend};
use crate::user;

mod entities;

pub use entities::{Direction, Id, NewTransaction, Transaction, TransactionQuery};

/// Transactions owned by a user, in the order the backend returns them.
pub async fn history(backend: &dyn Backend, user_id: &user::Id) -> Result<Vec<Transaction>, backend::Error> {
    let query = TransactionQuery::for_user(user_id.clone());
    let mut transactions = backend.list_transactions(&query).await?;
    transactions.retain(|transaction| query.matches(transaction));
    log::debug!("{} transaction(s) for user {}", transactions.len(), user_id);
    Ok(transactions)
}

pub async fn record(backend: &dyn Backend, transaction: &NewTransaction) -> Result<Transaction, backend::Error> {
    let created = backend.create_transaction(transaction).await?;
    log::debug!(
        "recorded {} transaction {:?} of {} for user {}",
        created.direction,
        created.id,
        created.amount,
        created.user_id
    );
    Ok(created)
}
