use crate::backend::{self, Backend};

mod entities;

pub use entities::{Email, Id, NewUser, User, UserPatch, UserQuery};

/// Looks up the user with exactly this email.
pub async fn find_by_email(backend: &dyn Backend, email: &Email) -> Result<Option<User>, backend::Error> {
    let query = UserQuery::by_email(email.clone());
    let users = backend.list_users(&query).await?;
    log::debug!("{} user(s) returned for email {}", users.len(), email);
    Ok(users.into_iter().find(|user| query.matches(user)))
}

/// Fetches every user and picks the exact email and password match.
pub async fn find_by_credentials(
    backend: &dyn Backend,
    email: &Email,
    password: &str,
) -> Result<Option<User>, backend::Error> {
    let query = UserQuery {
        email: Some(email.clone()),
        password: Some(password.to_owned()),
    };
    Ok(backend
        .list_users(&UserQuery::all())
        .await?
        .into_iter()
        .find(|user| query.matches(user)))
}

pub async fn set_balance(
    backend: &dyn Backend,
    id: &Id,
    balance: crate::money::Money,
) -> Result<User, backend::Error> {
    log::debug!("setting balance of user {} to {}", id, balance);
    backend.patch_user(id, &UserPatch::balance(balance)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::money::Money;

    fn new_user(email: &str, password: &str) -> NewUser {
        NewUser {
            name: None,
            email: Email(email.to_owned()),
            password: password.to_owned(),
            balance: Money::ZERO,
        }
    }

    #[tokio::test]
    async fn test_find_by_email_is_exact() {
        let backend = MemoryBackend::new();
        backend.create_user(&new_user("ann@example.com", "pw")).await.unwrap();
        backend.create_user(&new_user("joann@example.com", "pw")).await.unwrap();

        let found = find_by_email(&backend, &Email("ann@example.com".to_owned()))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.email.as_str(), "ann@example.com");

        let missing = find_by_email(&backend, &Email("nn@example".to_owned())).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_find_by_credentials() {
        let backend = MemoryBackend::new();
        backend.create_user(&new_user("ann@example.com", "secret")).await.unwrap();
        let email = Email("ann@example.com".to_owned());

        assert!(find_by_credentials(&backend, &email, "secret").await.unwrap().is_some());
        assert!(find_by_credentials(&backend, &email, "secre").await.unwrap().is_none());
        assert!(find_by_credentials(&backend, &Email("bob@example.com".to_owned()), "secret")
            .await
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_decode_user_with_numeric_id() {
        let user: User = serde_json::from_str(
            r#"{"id": 7, "name": "Ann", "email": "ann@example.com", "password": "pw", "balance": 25}"#,
        )
        .unwrap();
        assert_eq!(user.id, Id("7".to_owned()));
        assert_eq!(user.balance, Money(25.0));
        assert_eq!(user.display_name(), "Ann");
    }

    #[test]
    fn test_decode_user_without_name_or_balance() {
        let user: User =
            serde_json::from_str(r#"{"id": "3", "email": "bob@example.com", "password": "pw"}"#)
                .unwrap();
        assert_eq!(user.name, None);
        assert_eq!(user.balance, Money::ZERO);
        assert_eq!(user.display_name(), "bob@example.com");
    }

    #[test]
    fn test_patch_serializes_only_set_fields() {
        let json = serde_json::to_string(&UserPatch::balance(Money(12.5))).unwrap();
        assert_eq!(json, r#"{"balance":12.5}"#);
        assert_eq!(serde_json::to_string(&UserPatch::default()).unwrap(), "{}");
    }
}
