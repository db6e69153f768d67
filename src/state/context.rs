//! Per-chat session context
//!
//! This module holds the full conversational state for one chat: the active
//! view, the catalog filter, the cart, the checkout scenario progress, the
//! oracle transcript and the visitor's journey progress. Sessions are
//! in-memory only and reset when the process restarts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::{Cart, ContactForm};
use crate::catalog::{self, CatalogFilter};
use crate::services::content::ExternalPageData;
use crate::state::scenarios::CheckoutStep;

/// Which section is mounted for this chat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ViewState {
    /// Catalog and hero
    Standard,
    /// An externally fetched page mounted in place of the catalog
    Dynamic { page: ExternalPageData },
    /// A single selected event, with its oracle commentary once loaded
    Detail {
        event_id: String,
        commentary: Option<String>,
    },
}

impl ViewState {
    pub fn name(&self) -> &'static str {
        match self {
            ViewState::Standard => "standard",
            ViewState::Dynamic { .. } => "dynamic",
            ViewState::Detail { .. } => "detail",
        }
    }
}

/// Role of a transcript turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    Visitor,
    Oracle,
}

/// One turn of the oracle conversation; turns are never edited or deleted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: TurnRole,
    pub text: String,
}

/// Journey progress counters fed into oracle context and the journey
/// synthesis prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JourneyProgress {
    pub trips_booked: u32,
    pub trips_completed: u32,
    pub streak: u32,
    pub next_journey: Option<String>,
}

impl Default for JourneyProgress {
    fn default() -> Self {
        Self {
            trips_booked: 2,
            trips_completed: 12,
            streak: 8,
            next_journey: Some("Arctic Soul Bath".to_string()),
        }
    }
}

impl JourneyProgress {
    pub fn summary(&self) -> String {
        format!(
            "Trips booked: {}. Trips completed: {}. Streak: {} weeks. Next journey: {}.",
            self.trips_booked,
            self.trips_completed,
            self.streak,
            self.next_journey.as_deref().unwrap_or("none")
        )
    }
}

/// Full session state for one chat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionContext {
    pub chat_id: i64,
    pub view: ViewState,
    pub filter: CatalogFilter,
    pub cart: Cart,
    pub contact: ContactForm,
    /// Active checkout step, `None` when no checkout is open
    pub checkout_step: Option<CheckoutStep>,
    pub transcript: Vec<ConversationTurn>,
    /// An oracle call is in flight for this chat
    pub oracle_busy: bool,
    pub journey: JourneyProgress,
    /// Generation counter for the transient cart confirmation; a scheduled
    /// dismissal only fires if the generation it captured is still current.
    pub cart_notice_seq: u64,
    /// Telegram message id of the currently visible cart notice, if any
    pub cart_notice_msg: Option<i32>,
    pub updated_at: DateTime<Utc>,
}

impl SessionContext {
    pub fn new(chat_id: i64) -> Self {
        Self {
            chat_id,
            view: ViewState::Standard,
            filter: CatalogFilter::default(),
            cart: Cart::new(),
            contact: ContactForm::default(),
            checkout_step: None,
            transcript: Vec::new(),
            oracle_busy: false,
            journey: JourneyProgress::default(),
            cart_notice_seq: 0,
            cart_notice_msg: None,
            updated_at: Utc::now(),
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Append a transcript turn
    pub fn push_turn(&mut self, role: TurnRole, text: impl Into<String>) {
        self.transcript.push(ConversationTurn {
            role,
            text: text.into(),
        });
        self.touch();
    }

    /// Title of the selected event while in the detail view
    pub fn selected_event_title(&self) -> Option<&'static str> {
        match &self.view {
            ViewState::Detail { event_id, .. } => {
                catalog::find_event(event_id).map(|e| e.title.as_str())
            }
            _ => None,
        }
    }

    /// Short context string handed to the oracle with every question
    pub fn oracle_context(&self) -> String {
        let mut context = format!("Current view: {}.", self.view.name());
        if let Some(title) = self.selected_event_title() {
            context.push_str(&format!(" Selected event: {}.", title));
        }
        context.push(' ');
        context.push_str(&self.journey.summary());
        context
    }

    /// Open the checkout scenario; the previous form draft is discarded and
    /// the intention may be pre-filled from an event inquiry.
    pub fn start_checkout(&mut self, prefill_intention: Option<String>) {
        self.contact.clear();
        if let Some(intention) = prefill_intention {
            self.contact.intention = intention;
        }
        self.checkout_step = Some(CheckoutStep::first());
        self.touch();
    }

    /// Abandon the checkout; the draft is discarded
    pub fn cancel_checkout(&mut self) {
        self.checkout_step = None;
        self.contact.clear();
        self.touch();
    }

    /// Successful transmission: clear cart, clear form, close the checkout
    pub fn complete_checkout(&mut self) {
        self.cart.clear();
        self.contact.clear();
        self.checkout_step = None;
        self.touch();
    }

    pub fn is_in_checkout(&self) -> bool {
        self.checkout_step.is_some()
    }

    /// Return to the standard view, discarding any dynamic page or selected
    /// event.
    pub fn go_standard(&mut self) {
        self.view = ViewState::Standard;
        self.touch();
    }

    pub fn open_dynamic(&mut self, page: ExternalPageData) {
        self.view = ViewState::Dynamic { page };
        self.touch();
    }

    pub fn open_detail(&mut self, event_id: impl Into<String>) {
        self.view = ViewState::Detail {
            event_id: event_id.into(),
            commentary: None,
        };
        self.touch();
    }

    /// Store the loaded oracle commentary if the same event is still
    /// selected; a stale result for another event is dropped.
    pub fn set_commentary(&mut self, event_id: &str, text: String) {
        if let ViewState::Detail {
            event_id: current,
            commentary,
        } = &mut self.view
        {
            if current == event_id {
                *commentary = Some(text);
                self.touch();
            }
        }
    }

    /// Bump the cart-notice generation and return the new value
    pub fn begin_cart_notice(&mut self) -> u64 {
        self.cart_notice_seq += 1;
        self.touch();
        self.cart_notice_seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartLine;
    use crate::catalog::find_event;

    #[test]
    fn test_new_session() {
        let session = SessionContext::new(42);
        assert_eq!(session.chat_id, 42);
        assert_eq!(session.view, ViewState::Standard);
        assert!(session.cart.is_empty());
        assert!(session.transcript.is_empty());
        assert!(!session.is_in_checkout());
    }

    #[test]
    fn test_checkout_lifecycle() {
        let mut session = SessionContext::new(1);
        session.cart.add(CartLine::Event(find_event("1").unwrap().clone()));

        session.start_checkout(Some("I am inquiring.".to_string()));
        assert!(session.is_in_checkout());
        assert_eq!(session.contact.intention, "I am inquiring.");

        session.contact.name = "Elena".to_string();
        session.contact.email = "elena@example.com".to_string();
        session.complete_checkout();

        assert!(session.cart.is_empty());
        assert_eq!(session.contact, ContactForm::default());
        assert!(!session.is_in_checkout());
    }

    #[test]
    fn test_cancel_discards_draft() {
        let mut session = SessionContext::new(1);
        session.start_checkout(None);
        session.contact.name = "Elena".to_string();
        session.cancel_checkout();
        assert!(session.contact.name.is_empty());
        assert!(!session.is_in_checkout());
    }

    #[test]
    fn test_oracle_context_mentions_selected_event() {
        let mut session = SessionContext::new(1);
        let context = session.oracle_context();
        assert!(context.contains("Current view: standard."));
        assert!(context.contains("Trips completed: 12."));

        session.open_detail("4");
        let context = session.oracle_context();
        assert!(context.contains("Current view: detail."));
        assert!(context.contains("Selected event: Arctic Soul Bath."));
    }

    #[test]
    fn test_stale_commentary_is_dropped() {
        let mut session = SessionContext::new(1);
        session.open_detail("4");
        session.open_detail("5");
        session.set_commentary("4", "stale analysis".to_string());

        match &session.view {
            ViewState::Detail {
                event_id,
                commentary,
            } => {
                assert_eq!(event_id, "5");
                assert!(commentary.is_none());
            }
            other => panic!("unexpected view: {:?}", other),
        }
    }

    #[test]
    fn test_cart_notice_generation() {
        let mut session = SessionContext::new(1);
        let first = session.begin_cart_notice();
        let second = session.begin_cart_notice();
        assert_eq!(second, first + 1);
    }
}
