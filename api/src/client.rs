use crate::error::Error;
use app::backend::{self, Backend};
use app::transaction::{NewTransaction, Transaction, TransactionQuery};
use app::user::{self, NewUser, User, UserPatch, UserQuery};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

const USERS: &str = "users";
const TRANSACTIONS: &str = "transactions";

pub struct HttpBackend {
    client: Client,
    base: Url,
}

impl HttpBackend {
    pub fn new(base: Url, timeout: Option<Duration>) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base: with_trailing_slash(base),
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base.join(path)?)
    }
}

/// `Url::join` replaces the last path segment unless the base ends with a slash.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

async fn read<T: DeserializeOwned>(response: Response) -> Result<T, Error> {
    let status = response.status();
    if !status.is_success() {
        return Err(Error::Status(status));
    }
    Ok(response.json().await?)
}

/// The hosted mock API answers a filter without matches with `404 Not found` instead of `[]`.
async fn read_list<T: DeserializeOwned>(response: Response) -> Result<Vec<T>, Error> {
    if response.status() == StatusCode::NOT_FOUND {
        log::debug!("no records matched {}", response.url());
        return Ok(Vec::new());
    }
    read(response).await
}

#[async_trait]
impl Backend for HttpBackend {
    async fn list_users(&self, query: &UserQuery) -> Result<Vec<User>, backend::Error> {
        let url = self.endpoint(USERS)?;
        log::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(Error::from)?;
        Ok(read_list(response).await?)
    }

    async fn create_user(&self, user: &NewUser) -> Result<User, backend::Error> {
        let url = self.endpoint(USERS)?;
        log::debug!("POST {}", url);
        let response = self
            .client
            .post(url)
            .json(user)
            .send()
            .await
            .map_err(Error::from)?;
        Ok(read(response).await?)
    }

    async fn patch_user(&self, id: &user::Id, patch: &UserPatch) -> Result<User, backend::Error> {
        let url = self.endpoint(&format!("{}/{}", USERS, id))?;
        log::debug!("PATCH {}", url);
        let response = self
            .client
            .patch(url)
            .json(patch)
            .send()
            .await
            .map_err(Error::from)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(backend::Error::NotFound {
                collection: USERS,
                id: id.0.clone(),
            });
        }
        Ok(read(response).await?)
    }

    async fn list_transactions(
        &self,
        query: &TransactionQuery,
    ) -> Result<Vec<Transaction>, backend::Error> {
        let url = self.endpoint(TRANSACTIONS)?;
        log::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(Error::from)?;
        Ok(read_list(response).await?)
    }

    async fn create_transaction(
        &self,
        transaction: &NewTransaction,
    ) -> Result<Transaction, backend::Error> {
        let url = self.endpoint(TRANSACTIONS)?;
        log::debug!("POST {}", url);
        let response = self
            .client
            .post(url)
            .json(transaction)
            .send()
            .await
            .map_err(Error::from)?;
        Ok(read(response).await?)
    }
}
