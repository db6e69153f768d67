//! Oracle command handlers
//!
//! /ask feeds a question into the mentor chat flow; /journey runs the deep
//! neural analysis over the visitor's journey progress. Both calls degrade
//! to fallback sentences inside the oracle service, so these handlers never
//! surface a collaborator error to the visitor.

use teloxide::{
    prelude::*,
    types::{ChatAction, Message, ParseMode},
    Bot,
};
use tracing::debug;

use crate::handlers::messages;
use crate::markdown;
use crate::services::ServiceFactory;
use crate::state::SessionStore;
use crate::utils::errors::Result;
use crate::utils::logging;

/// Handle /ask command
pub async fn handle_ask(
    bot: Bot,
    msg: Message,
    question: String,
    services: ServiceFactory,
    store: SessionStore,
) -> Result<()> {
    let chat_id = msg.chat.id;

    if question.trim().is_empty() {
        bot.send_message(chat_id, "Consult the Oracle with /ask followed by your question.")
            .await?;
        return Ok(());
    }

    messages::ask_oracle(bot, chat_id, &question, services, store).await
}

/// Handle /journey command
pub async fn handle_journey(
    bot: Bot,
    msg: Message,
    services: ServiceFactory,
    store: SessionStore,
) -> Result<()> {
    let chat_id = msg.chat.id;

    debug!(chat_id = ?chat_id, "Processing /journey command");

    if !services.settings.features.deep_analysis {
        bot.send_message(chat_id, "Deep analysis is offline. Trust your own readout for now.")
            .await?;
        return Ok(());
    }

    if let Err(e) = bot.send_chat_action(chat_id, ChatAction::Typing).await {
        debug!(error = %e, "Failed to send typing action");
    }

    let progress = store.load_or_create(chat_id.0).await.journey;
    let analysis = services.oracle_service.analyze_journey(&progress.summary()).await;

    logging::log_visitor_action(chat_id.0, "journey_analysis", None);

    let text = format!(
        "<b>DEEP NEURAL ANALYSIS</b>\n\n{}",
        markdown::to_html(&analysis)
    );
    bot.send_message(chat_id, text)
        .parse_mode(ParseMode::Html)
        .await?;

    Ok(())
}
