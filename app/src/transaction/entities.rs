use crate::money::Money;
use crate::user;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Id(pub String);

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        crate::id::string_or_number(deserializer).map(Self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Sent,
    Received,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Sent => "sent",
            Direction::Received => "received",
        })
    }
}

/// A transaction record. Records are immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Id,
    #[serde(rename = "userId")]
    pub user_id: user::Id,
    #[serde(rename = "type")]
    pub direction: Direction,
    pub amount: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<user::Email>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<user::Email>,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Transaction {
    /// The other side of the transaction: `to` for sent money, `from` for received money.
    pub fn counterparty(&self) -> Option<&user::Email> {
        match self.direction {
            Direction::Sent => self.to.as_ref(),
            Direction::Received => self.from.as_ref(),
        }
    }
}

/// Body of `POST /transactions`.
#[derive(Debug, Clone, Serialize)]
pub struct NewTransaction {
    #[serde(rename = "userId")]
    pub user_id: user::Id,
    #[serde(rename = "type")]
    pub direction: Direction,
    pub amount: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<user::Email>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<user::Email>,
    pub date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl NewTransaction {
    pub fn sent(user_id: user::Id, amount: Money, to: user::Email, note: &str) -> Self {
        Self {
            user_id,
            direction: Direction::Sent,
            amount,
            to: Some(to),
            from: None,
            date: Utc::now(),
            note: Some(note.to_owned()),
        }
    }

    pub(crate) fn into_transaction(self, id: Id) -> Transaction {
        Transaction {
            id,
            user_id: self.user_id,
            direction: self.direction,
            amount: self.amount,
            to: self.to,
            from: self.from,
            date: self.date,
            note: self.note,
        }
    }
}

/// Query parameters of `GET /transactions`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TransactionQuery {
    #[serde(rename = "userId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<user::Id>,
}

impl TransactionQuery {
    pub fn for_user(user_id: user::Id) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }

    pub fn matches(&self, transaction: &Transaction) -> bool {
        self.user_id
            .as_ref()
            .map_or(true, |user_id| *user_id == transaction.user_id)
    }
}
