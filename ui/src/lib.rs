//! Shared UI crate for LeafGuard. Cross-platform logic and views live here.

pub mod analysis;
pub mod core;
pub mod history;
pub mod report;
pub mod summary;
pub mod views;

pub mod components {
    // Application header with session display (components/app_navbar.rs)
    pub mod app_navbar;
    pub use app_navbar::register_nav;
    pub use app_navbar::AppNavbar;
    pub use app_navbar::NavBuilder;

    // Sign-in / sign-up modal (components/auth_modal.rs)
    pub mod auth_modal;
    pub use auth_modal::AuthModal;
}
