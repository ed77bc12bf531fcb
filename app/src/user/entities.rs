use crate::money::Money;
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

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The email address doubles as the lookup key for users.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(pub String);

impl Email {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A user record as stored by the mock API. The same record is kept as the session.
///
/// The password is stored and compared in plain text, which is what the backend contract
/// requires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Id,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub email: Email,
    pub password: String,
    #[serde(default)]
    pub balance: Money,
}

impl User {
    /// The name shown on the dashboard, falling back to the email.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(self.email.as_str())
    }
}

/// Body of `POST /users`.
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub email: Email,
    pub password: String,
    pub balance: Money,
}

/// Body of `PATCH /users/{id}`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<Money>,
}

impl UserPatch {
    pub fn balance(balance: Money) -> Self {
        Self {
            balance: Some(balance),
        }
    }
}

/// Query parameters of `GET /users`. Empty fields are left out, so the default query lists
/// every user.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<Email>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl UserQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_email(email: Email) -> Self {
        Self {
            email: Some(email),
            password: None,
        }
    }

    /// Exact match on every field that is set. The hosted backend filters by substring, so
    /// results are always passed through this as well.
    pub fn matches(&self, user: &User) -> bool {
        self.email.as_ref().map_or(true, |email| *email == user.email)
            && self
                .password
                .as_ref()
                .map_or(true, |password| *password == user.password)
    }
}
