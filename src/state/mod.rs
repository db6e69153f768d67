//! State management module
//!
//! This module handles per-chat session state: the active view, cart,
//! checkout scenario progress and oracle transcript.

pub mod context;
pub mod scenarios;
pub mod storage;

// Re-export commonly used state components
pub use context::{ConversationTurn, JourneyProgress, SessionContext, TurnRole, ViewState};
pub use scenarios::CheckoutStep;
pub use storage::SessionStore;
