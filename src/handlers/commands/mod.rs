//! Command handlers

pub mod cart;
pub mod events;
pub mod help;
pub mod oracle;
pub mod start;

pub use cart::{handle_cart, send_addons_view, send_cart_view};
pub use events::{handle_events, send_catalog_view};
pub use help::handle_help;
pub use oracle::{handle_ask, handle_journey};
pub use start::{handle_start, send_home_view};
