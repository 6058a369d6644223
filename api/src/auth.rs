//! Mock identity provider.
//!
//! Stands in for the hosted auth service: accounts and bearer tokens live in
//! process memory on the server. The demo credential pair
//! `demo@example.com` / `demo123` is always available.

use dioxus::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
}

/// A signed-in session: opaque bearer token plus the user it resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

#[server]
pub async fn signup(email: String, password: String, name: String) -> Result<Session, ServerFnError> {
    provider::signup(email, password, name).map_err(ServerFnError::ServerError)
}

#[server]
pub async fn login(email: String, password: String) -> Result<Session, ServerFnError> {
    provider::login(&email, &password).map_err(ServerFnError::ServerError)
}

/// Resolve a bearer token. Unknown or expired tokens are simply `None`; the
/// caller decides whether that is a fault.
#[server]
pub async fn current_user(token: String) -> Result<Option<User>, ServerFnError> {
    Ok(provider::resolve(&token))
}

#[server]
pub async fn logout(token: String) -> Result<(), ServerFnError> {
    provider::revoke(&token);
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) mod provider {
    use super::{Session, User};
    use once_cell::sync::Lazy;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct Account {
        user: User,
        password: String,
    }

    static ACCOUNTS: Lazy<Mutex<HashMap<String, Account>>> = Lazy::new(|| {
        let mut accounts = HashMap::new();
        accounts.insert(
            "demo@example.com".to_string(),
            Account {
                user: User {
                    id: "demo-user".into(),
                    email: "demo@example.com".into(),
                    name: "Demo User".into(),
                },
                password: "demo123".into(),
            },
        );
        Mutex::new(accounts)
    });

    static SESSIONS: Lazy<Mutex<HashMap<String, User>>> = Lazy::new(|| Mutex::new(HashMap::new()));

    const BAD_CREDENTIALS: &str = "Invalid credentials. Try demo@example.com / demo123";

    fn issue_session(user: User) -> Session {
        let token = format!("mock-jwt-token-{}", uuid::Uuid::new_v4());
        if let Ok(mut sessions) = SESSIONS.lock() {
            sessions.insert(token.clone(), user.clone());
        }
        Session { token, user }
    }

    pub fn signup(email: String, password: String, name: String) -> Result<Session, String> {
        let mut accounts = ACCOUNTS
            .lock()
            .map_err(|_| "identity provider unavailable".to_string())?;
        if accounts.contains_key(&email) {
            return Err("An account with this email already exists".to_string());
        }
        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            email: email.clone(),
            name,
        };
        accounts.insert(
            email,
            Account {
                user: user.clone(),
                password,
            },
        );
        drop(accounts);
        Ok(issue_session(user))
    }

    pub fn login(email: &str, password: &str) -> Result<Session, String> {
        let accounts = ACCOUNTS
            .lock()
            .map_err(|_| "identity provider unavailable".to_string())?;
        let account = accounts.get(email).ok_or_else(|| BAD_CREDENTIALS.to_string())?;
        if account.password != password {
            return Err(BAD_CREDENTIALS.to_string());
        }
        let user = account.user.clone();
        drop(accounts);
        Ok(issue_session(user))
    }

    pub fn resolve(token: &str) -> Option<User> {
        SESSIONS.lock().ok()?.get(token).cloned()
    }

    pub fn revoke(token: &str) {
        if let Ok(mut sessions) = SESSIONS.lock() {
            sessions.remove(token);
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::provider;

    #[test]
    fn demo_account_signs_in() {
        let session = provider::login("demo@example.com", "demo123").expect("demo login");
        assert_eq!(session.user.email, "demo@example.com");
        assert_eq!(
            provider::resolve(&session.token).map(|u| u.id),
            Some(session.user.id)
        );
    }

    #[test]
    fn wrong_password_is_rejected() {
        assert!(provider::login("demo@example.com", "nope").is_err());
        assert!(provider::login("nobody@example.com", "demo123").is_err());
    }

    #[test]
    fn revoked_tokens_stop_resolving() {
        let session = provider::login("demo@example.com", "demo123").expect("demo login");
        provider::revoke(&session.token);
        assert!(provider::resolve(&session.token).is_none());
    }

    #[test]
    fn signup_rejects_duplicate_email() {
        provider::signup("grower@example.com".into(), "pw".into(), "Grower".into())
            .expect("first signup");
        assert!(
            provider::signup("grower@example.com".into(), "pw2".into(), "Grower".into()).is_err()
        );
    }
}
