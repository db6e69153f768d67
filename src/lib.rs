//! Switch Concierge Telegram Bot
//!
//! A conversational storefront for the Switch wellness-retreat brand.
//! This library provides the retreat catalog with duration/theme filtering,
//! the experience cart and checkout flow, the markdown-lite renderer used for
//! oracle replies and dynamic pages, and thin services around the three
//! external collaborators (mailer, content, oracle).

pub mod cart;
pub mod catalog;
pub mod config;
pub mod handlers;
pub mod markdown;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{ConciergeError, Result};

// Re-export main components for easy access
pub use services::ServiceFactory;
pub use state::{SessionContext, SessionStore, ViewState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
