//! Login and signup. There are no tokens: being logged in means having the user record in the
//! session store, and the stored record is what every later flow trusts.

use crate::backend::Backend;
use crate::money::Money;
use crate::session;
use crate::user::{self, NewUser, User};

mod entities;

pub use entities::{Credentials, Error, SignupForm};

pub async fn login(
    backend: &dyn Backend,
    store: &session::Store,
    credentials: &Credentials,
) -> Result<User, Error> {
    let email = credentials.check()?;
    let user = user::find_by_credentials(backend, &email, &credentials.password)
        .await?
        .ok_or(Error::InvalidCredentials)?;
    store.save(&user)?;
    log::info!("user {} logged in", user.id);
    Ok(user)
}

/// Creates a user with a zero balance and logs them in.
pub async fn signup(
    backend: &dyn Backend,
    store: &session::Store,
    form: &SignupForm,
) -> Result<User, Error> {
    let email = form.check()?;
    if user::find_by_credentials(backend, &email, &form.password)
        .await?
        .is_some()
    {
        log::warn!("signup rejected, {} is already registered", email);
        return Err(Error::UserAlreadyExists);
    }
    let user = backend
        .create_user(&NewUser {
            name: Some(form.name.clone()),
            email,
            password: form.password.clone(),
            balance: Money::ZERO,
        })
        .await?;
    store.save(&user)?;
    log::info!("user {} signed up", user.id);
    Ok(user)
}

/// Returns whether a session existed.
pub fn logout(store: &session::Store) -> Result<bool, Error> {
    Ok(store.clear()?)
}
