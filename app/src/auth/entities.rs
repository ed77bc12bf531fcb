use crate::{backend, session, user};
use thiserror::Error;

/// Every variant displays as the message shown to the user.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Please fill in all fields")]
    MissingFields,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("User with this email already exists")]
    UserAlreadyExists,
    #[error("Something went wrong. Try again.")]
    Backend(#[from] backend::Error),
    #[error("Something went wrong. Try again.")]
    Session(#[from] session::Error),
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub(crate) fn check(&self) -> Result<user::Email, Error> {
        if self.email.is_empty() || self.password.is_empty() {
            return Err(Error::MissingFields);
        }
        Ok(user::Email(self.email.clone()))
    }
}

#[derive(Debug, Clone)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupForm {
    pub(crate) fn check(&self) -> Result<user::Email, Error> {
        if self.name.is_empty()
            || self.email.is_empty()
            || self.password.is_empty()
            || self.confirm_password.is_empty()
        {
            Err(Error::MissingFields)
        } else if self.password != self.confirm_password {
            Err(Error::PasswordMismatch)
        } else {
            Ok(user::Email(self.email.clone()))
        }
    }
}
