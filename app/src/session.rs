//! The session is the logged-in user record, persisted between invocations under the
//! `ks_user` key. Each key is one JSON file in the session directory.

use crate::user::User;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

pub const SESSION_KEY: &str = "ks_user";

#[derive(Debug, Error)]
pub enum Error {
    #[error("session storage is not accessible")]
    Io(#[from] std::io::Error),
    #[error("stored session is corrupt")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct Store {
    dir: PathBuf,
}

impl Store {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", SESSION_KEY))
    }

    /// Returns the stored user, or `None` if nobody is logged in.
    pub fn load(&self) -> Result<Option<User>, Error> {
        match fs::read(self.path()) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, user: &User) -> Result<(), Error> {
        fs::create_dir_all(&self.dir)?;
        let tmp = self.dir.join(format!("{}.json.tmp", SESSION_KEY));
        fs::write(&tmp, serde_json::to_vec_pretty(user)?)?;
        fs::rename(&tmp, self.path())?;
        log::debug!("session for user {} saved to {}", user.id, self.dir.display());
        Ok(())
    }

    /// Removes the stored user. Returns whether there was one.
    pub fn clear(&self) -> Result<bool, Error> {
        match fs::remove_file(self.path()) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
