//! Oracle chat handler tests
//!
//! The chat handler trims the incoming question before anything else; a
//! blank submit must not open a session, touch the transcript or reach the
//! completion endpoint.

use teloxide::types::ChatId;
use teloxide::Bot;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use switch_concierge::config::Settings;
use switch_concierge::handlers::messages::ask_oracle;
use switch_concierge::services::ServiceFactory;
use switch_concierge::state::SessionStore;

fn oracle_settings(uri: &str) -> Settings {
    let mut settings = Settings::default();
    settings.oracle.api_url = uri.to_string();
    settings.oracle.api_key = "test-key".to_string();
    settings.oracle.timeout_seconds = 5;
    settings
}

#[tokio::test]
async fn test_blank_question_is_dropped_without_oracle_call() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/complete"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let services = ServiceFactory::new(oracle_settings(&server.uri())).unwrap();
    let store = SessionStore::new();
    // the blank-input guard returns before any Telegram call is made
    let bot = Bot::new("123:TEST");

    ask_oracle(bot, ChatId(7), "   \n\t  ", services, store.clone())
        .await
        .unwrap();

    assert!(store.load(7).await.is_none());
    assert!(server.received_requests().await.unwrap().is_empty());
}
