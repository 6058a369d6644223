//! Shared data model and hosted-backend boundary for LeafGuard.
//!
//! Everything the browser exchanges with the backend lives here: the analysis
//! record model, the fault taxonomy, the recommendation generator, and the
//! server functions standing in for the hosted identity provider, row store,
//! and classification service (all mocked per the current product stage).

pub mod advice;
pub mod auth;
pub mod classify;
pub mod error;
pub mod records;
pub mod store;

pub use auth::{current_user, login, logout, signup, Session, User};
pub use dioxus::prelude::ServerFnError;
pub use classify::{classify_image, ClassificationOutcome};
pub use error::Fault;
pub use records::{AnalysisRecord, Recommendations};
pub use store::{delete_analysis, list_analyses, save_analysis, NewAnalysis};
