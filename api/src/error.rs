//! Fault taxonomy for owner-scoped backend operations.
//!
//! Faults cross the server-function boundary as the string form of the
//! variant; [`Fault::from_message`] recovers the variant at the call site so
//! the UI can distinguish "sign in first" from "the store misbehaved".

use dioxus::prelude::ServerFnError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum Fault {
    /// No current user for an owner-scoped operation.
    #[error("authentication required")]
    AuthenticationRequired,
    /// The record exists but belongs to someone else. Fails closed.
    #[error("not authorized for this record")]
    NotAuthorized,
    /// The hosted store rejected or dropped the call.
    #[error("store fault: {0}")]
    Store(String),
}

impl Fault {
    /// Recover a fault from a server-function error message, if it carries one.
    pub fn from_message(message: &str) -> Option<Self> {
        match message {
            "authentication required" => Some(Self::AuthenticationRequired),
            "not authorized for this record" => Some(Self::NotAuthorized),
            _ => message
                .strip_prefix("store fault: ")
                .map(|rest| Self::Store(rest.to_string())),
        }
    }

    /// Classify an arbitrary server-function failure.
    ///
    /// Transport-level errors (server unreachable, codec trouble) map to
    /// [`Fault::Store`] so callers have a single degraded path.
    pub fn from_server_error(err: &ServerFnError) -> Self {
        match err {
            ServerFnError::ServerError(message) => Self::from_message(message)
                .unwrap_or_else(|| Self::Store(message.clone())),
            other => Self::Store(other.to_string()),
        }
    }
}

// `server_fn` provides a blanket `impl<E: StdError> From<E> for ServerFnError`
// that yields `ServerError(e.to_string())`, so `Fault` converts via `?` already.

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn faults_round_trip_through_messages() {
        for fault in [
            Fault::AuthenticationRequired,
            Fault::NotAuthorized,
            Fault::Store("insert failed".into()),
        ] {
            let message = fault.to_string();
            assert_eq!(Fault::from_message(&message), Some(fault));
        }
    }

    #[test]
    fn unknown_messages_are_not_faults() {
        assert_eq!(Fault::from_message("connection reset"), None);
    }

    #[test]
    fn transport_errors_degrade_to_store_faults() {
        let err = ServerFnError::ServerError("connection reset".into());
        assert_eq!(
            Fault::from_server_error(&err),
            Fault::Store("connection reset".into())
        );
    }
}
