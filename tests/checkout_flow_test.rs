//! Checkout submission flow tests
//!
//! Exercises the submission step against a wiremock mailer: an incomplete
//! form never reaches the collaborator, a success clears the cart and closes
//! the checkout, a failure leaves everything in place for a retry.

use std::time::Duration;

use teloxide::types::ChatId;
use teloxide::Bot;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use switch_concierge::cart::CartLine;
use switch_concierge::catalog::find_event;
use switch_concierge::config::Settings;
use switch_concierge::handlers::messages::{
    handle_checkout_input, submit_checkout, TRANSMISSION_CONFIRMATION,
};
use switch_concierge::services::{MailerService, ServiceFactory};
use switch_concierge::state::{CheckoutStep, SessionContext, SessionStore};
use switch_concierge::utils::errors::ConciergeError;

fn mailer_settings(uri: &str) -> Settings {
    let mut settings = Settings::default();
    settings.mailer.api_url = uri.to_string();
    settings.mailer.timeout_seconds = 5;
    settings
}

fn session_with_cart() -> SessionContext {
    let mut session = SessionContext::new(1);
    session
        .cart
        .add(CartLine::Event(find_event("1").unwrap().clone()));
    session.start_checkout(None);
    session
}

#[tokio::test]
async fn test_incomplete_form_never_invokes_mailer() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1.0/email/send"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mailer = MailerService::new(mailer_settings(&server.uri())).unwrap();
    let mut session = session_with_cart();
    session.contact.name = "Elena".to_string();
    // email and intention missing

    let err = submit_checkout(&mailer, &mut session).await.unwrap_err();

    match err {
        ConciergeError::InvalidInput(message) => {
            assert_eq!(message, "Please focus and complete all fields.");
        }
        other => panic!("unexpected error: {:?}", other),
    }

    // nothing was consumed
    assert_eq!(session.cart.len(), 1);
    assert!(session.is_in_checkout());
}

#[tokio::test]
async fn test_malformed_email_never_invokes_mailer() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1.0/email/send"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mailer = MailerService::new(mailer_settings(&server.uri())).unwrap();
    let mut session = session_with_cart();
    session.contact.name = "Elena".to_string();
    session.contact.email = "elena-at-example".to_string();
    session.contact.intention = "Reset.".to_string();

    let err = submit_checkout(&mailer, &mut session).await.unwrap_err();

    match err {
        ConciergeError::InvalidInput(message) => {
            assert_eq!(message, "Invalid email format");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_successful_submission_clears_cart_and_closes_checkout() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1.0/email/send"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mailer = MailerService::new(mailer_settings(&server.uri())).unwrap();
    let mut session = session_with_cart();
    session.contact.name = "Elena".to_string();
    session.contact.email = "elena@example.com".to_string();
    session.contact.intention = "Reset my nervous system.".to_string();

    let confirmation = submit_checkout(&mailer, &mut session).await.unwrap();

    assert_eq!(confirmation, TRANSMISSION_CONFIRMATION);
    assert!(session.cart.is_empty());
    assert!(session.contact.name.is_empty());
    assert!(!session.is_in_checkout());
}

/// Telegram API stub; every call is answered with a minimal sendMessage
/// payload, which is enough for the handler's confirmation send.
async fn telegram_stub() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ok": true,
            "result": {
                "message_id": 1,
                "date": 0,
                "chat": {"id": 7, "type": "private"},
                "text": "ok"
            }
        })))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_submission_keeps_session_updates_made_mid_flight() {
    let mailer_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1.0/email/send"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(300)))
        .expect(1)
        .mount(&mailer_server)
        .await;

    let telegram = telegram_stub().await;
    let bot = Bot::new("123:TEST")
        .set_api_url(reqwest::Url::parse(&telegram.uri()).unwrap());
    let services = ServiceFactory::new(mailer_settings(&mailer_server.uri())).unwrap();
    let store = SessionStore::new();

    store
        .update(7, |session| {
            session
                .cart
                .add(CartLine::Event(find_event("1").unwrap().clone()));
            session.start_checkout(None);
            session.contact.name = "Elena".to_string();
            session.contact.email = "elena@example.com".to_string();
            session.checkout_step = Some(CheckoutStep::Intention);
            session.cart_notice_msg = Some(5);
        })
        .await;

    // a scheduled cart-notice dismissal fires while the inquiry is in flight
    let racing_store = store.clone();
    let dismissal = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        racing_store
            .update(7, |session| session.cart_notice_msg = None)
            .await;
    });

    handle_checkout_input(
        bot,
        ChatId(7),
        "Reset my nervous system.",
        services,
        store.clone(),
    )
    .await
    .unwrap();
    dismissal.await.unwrap();

    let session = store.load(7).await.unwrap();
    assert!(session.cart.is_empty());
    assert!(!session.is_in_checkout());
    // the dismissal is not clobbered by the pre-send snapshot
    assert_eq!(session.cart_notice_msg, None);
}

#[tokio::test]
async fn test_failed_submission_preserves_cart_and_checkout() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1.0/email/send"))
        .respond_with(ResponseTemplate::new(503).set_body_string("relay down"))
        .expect(1)
        .mount(&server)
        .await;

    let mailer = MailerService::new(mailer_settings(&server.uri())).unwrap();
    let mut session = session_with_cart();
    session.contact.name = "Elena".to_string();
    session.contact.email = "elena@example.com".to_string();
    session.contact.intention = "Reset my nervous system.".to_string();

    let err = submit_checkout(&mailer, &mut session).await.unwrap_err();

    assert!(matches!(err, ConciergeError::Mailer(_)));
    let diagnostic = err.to_string();
    assert!(diagnostic.contains("503"));

    // state untouched, the visitor can retry
    assert_eq!(session.cart.len(), 1);
    assert_eq!(session.contact.email, "elena@example.com");
    assert!(session.is_in_checkout());
}
