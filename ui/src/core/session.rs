//! Session persistence: the signed-in user and bearer token survive reloads.
//!
//! On the web the session lives in `localStorage` under the same keys the
//! previous frontend used, so existing sign-ins carry over. Corrupted payloads
//! are cleared and treated as signed out. Off-web (unit tests, future native
//! shells) a process-local slot stands in.

use api::{Session, User};

const TOKEN_KEY: &str = "auth_token";
const USER_KEY: &str = "auth_user";

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

#[cfg(target_arch = "wasm32")]
pub fn stored_session() -> Option<Session> {
    let storage = local_storage()?;
    let token = storage.get_item(TOKEN_KEY).ok()??;
    let raw_user = storage.get_item(USER_KEY).ok()??;
    match serde_json::from_str::<User>(&raw_user) {
        Ok(user) => Some(Session { token, user }),
        Err(err) => {
            tracing::warn!("stored session is corrupted, clearing: {err}");
            clear_session();
            None
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub fn store_session(session: &Session) {
    let Some(storage) = local_storage() else {
        tracing::warn!("localStorage unavailable, session will not persist");
        return;
    };
    let _ = storage.set_item(TOKEN_KEY, &session.token);
    if let Ok(raw) = serde_json::to_string(&session.user) {
        let _ = storage.set_item(USER_KEY, &raw);
    }
}

#[cfg(target_arch = "wasm32")]
pub fn clear_session() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(TOKEN_KEY);
        let _ = storage.remove_item(USER_KEY);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use super::*;
    use once_cell::sync::Lazy;
    use std::sync::Mutex;

    // Keyed storage so the wasm and native paths share serialization quirks.
    static SLOT: Lazy<Mutex<std::collections::HashMap<String, String>>> =
        Lazy::new(|| Mutex::new(std::collections::HashMap::new()));

    pub fn stored_session() -> Option<Session> {
        let slot = SLOT.lock().ok()?;
        let token = slot.get(TOKEN_KEY)?.clone();
        let raw_user = slot.get(USER_KEY)?.clone();
        drop(slot);
        match serde_json::from_str::<User>(&raw_user) {
            Ok(user) => Some(Session { token, user }),
            Err(_) => {
                clear_session();
                None
            }
        }
    }

    pub fn store_session(session: &Session) {
        if let Ok(mut slot) = SLOT.lock() {
            slot.insert(TOKEN_KEY.to_string(), session.token.clone());
            if let Ok(raw) = serde_json::to_string(&session.user) {
                slot.insert(USER_KEY.to_string(), raw);
            }
        }
    }

    pub fn clear_session() {
        if let Ok(mut slot) = SLOT.lock() {
            slot.remove(TOKEN_KEY);
            slot.remove(USER_KEY);
        }
    }

    #[cfg(test)]
    pub fn store_raw_user(raw: &str) {
        if let Ok(mut slot) = SLOT.lock() {
            slot.insert(TOKEN_KEY.to_string(), "token".to_string());
            slot.insert(USER_KEY.to_string(), raw.to_string());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::{clear_session, store_session, stored_session};

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    // Shared process state, so exercise the lifecycle in one test.
    #[test]
    fn session_lifecycle_round_trips_and_recovers() {
        let session = Session {
            token: "mock-jwt-token-1".into(),
            user: User {
                id: "u1".into(),
                email: "demo@example.com".into(),
                name: "Demo User".into(),
            },
        };

        store_session(&session);
        assert_eq!(stored_session(), Some(session));

        // A corrupted user payload reads as signed out and self-heals.
        native::store_raw_user("{not json");
        assert_eq!(stored_session(), None);
        assert_eq!(stored_session(), None);

        clear_session();
        assert_eq!(stored_session(), None);
    }
}
