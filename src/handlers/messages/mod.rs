//! Message handlers module
//!
//! Routes plain text messages: while a checkout scenario is open the text
//! feeds the active step, otherwise it is a question for the Oracle.

use teloxide::{
    prelude::*,
    types::{ChatAction, ChatId, Message, ParseMode},
    Bot,
};
use tracing::debug;

use crate::markdown;
use crate::services::oracle::{MENTOR_EMPTY_FALLBACK, MENTOR_ERROR_FALLBACK};
use crate::services::{MailerService, ServiceFactory};
use crate::state::{CheckoutStep, SessionContext, SessionStore, TurnRole};
use crate::utils::errors::{ConciergeError, Result};
use crate::utils::logging;

/// Sent after a successful inquiry transmission
pub const TRANSMISSION_CONFIRMATION: &str = "The ritual has been transmitted to the source. \
    Your path is being paved. Expect a resonance within 24 hours.";

/// Main message dispatcher for non-command text
pub async fn handle_message(
    bot: Bot,
    msg: Message,
    services: ServiceFactory,
    store: SessionStore,
) -> Result<()> {
    let chat_id = msg.chat.id;

    // the concierge is a private conversation
    if !chat_id.is_user() {
        return Ok(());
    }

    let Some(text) = msg.text() else {
        return Ok(());
    };
    let text = text.to_string();

    let in_checkout = store.load_or_create(chat_id.0).await.is_in_checkout();
    if in_checkout {
        handle_checkout_input(bot, chat_id, &text, services, store).await
    } else {
        ask_oracle(bot, chat_id, &text, services, store).await
    }
}

/// Feed one message into the active checkout step
pub async fn handle_checkout_input(
    bot: Bot,
    chat_id: ChatId,
    input: &str,
    services: ServiceFactory,
    store: SessionStore,
) -> Result<()> {
    let Some(step) = store.load_or_create(chat_id.0).await.checkout_step else {
        return Ok(());
    };

    debug!(chat_id = ?chat_id, step = step.id(), "Processing checkout input");

    if let Err(ConciergeError::InvalidInput(message)) = step.validate(input) {
        bot.send_message(chat_id, message).await?;
        return Ok(());
    }

    match step.next() {
        Some(next_step) => {
            store
                .update(chat_id.0, |session| {
                    step.apply(&mut session.contact, input);
                    session.checkout_step = Some(next_step);
                })
                .await;

            let mut prompt = next_step.prompt().to_string();
            if next_step == CheckoutStep::Intention {
                let draft = store.load_or_create(chat_id.0).await.contact.intention;
                if !draft.is_empty() {
                    prompt.push_str(&format!("\n\nDraft so far: {}", draft));
                }
            }
            bot.send_message(chat_id, prompt).await?;
        }
        None => {
            // last step collected, transmit the inquiry
            let mut session = store
                .update(chat_id.0, |session| {
                    step.apply(&mut session.contact, input);
                    session.clone()
                })
                .await;

            if let Err(e) = bot.send_chat_action(chat_id, ChatAction::Typing).await {
                debug!(error = %e, "Failed to send typing action");
            }

            let items = session.cart.len();
            let total = session.cart.total();

            match submit_checkout(&services.mailer_service, &mut session).await {
                Ok(confirmation) => {
                    // close the checkout on the live session, not the snapshot;
                    // the store may have moved on while the inquiry was in flight
                    store
                        .update(chat_id.0, |session| session.complete_checkout())
                        .await;
                    logging::log_checkout(chat_id.0, items, total, true);
                    bot.send_message(chat_id, confirmation).await?;
                }
                Err(ConciergeError::InvalidInput(message)) => {
                    bot.send_message(chat_id, message).await?;
                }
                Err(ConciergeError::Mailer(e)) => {
                    // cart, form and step stay as they are; the visitor can
                    // send the intention again to retry
                    logging::log_checkout(chat_id.0, items, total, false);
                    bot.send_message(
                        chat_id,
                        format!(
                            "Ritual Transmission Error: {}\n\n\
                             Your cart and details are preserved. Send your intention again to retry.",
                            e
                        ),
                    )
                    .await?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    Ok(())
}

/// Validate the collected form and transmit the inquiry.
///
/// An incomplete form fails before any collaborator call. On success the
/// cart and form are cleared and the checkout closes; on failure the session
/// is left untouched for a retry.
pub async fn submit_checkout(
    mailer: &MailerService,
    session: &mut SessionContext,
) -> Result<&'static str> {
    session.contact.validate()?;
    mailer.send_inquiry(&session.contact, &session.cart).await?;
    session.complete_checkout();
    Ok(TRANSMISSION_CONFIRMATION)
}

/// One mentor exchange: append the visitor turn, call the oracle, append the
/// reply. At most one call is in flight per chat; a question arriving while
/// the oracle is busy is declined without touching the transcript.
pub async fn ask_oracle(
    bot: Bot,
    chat_id: ChatId,
    question: &str,
    services: ServiceFactory,
    store: SessionStore,
) -> Result<()> {
    let question = question.trim();
    if question.is_empty() {
        return Ok(());
    }

    if !services.settings.features.oracle_chat {
        bot.send_message(chat_id, "The Oracle is resting. Check back soon.")
            .await?;
        return Ok(());
    }

    let accepted = store
        .update(chat_id.0, |session| {
            if session.oracle_busy {
                false
            } else {
                session.push_turn(TurnRole::Visitor, question);
                session.oracle_busy = true;
                true
            }
        })
        .await;

    if !accepted {
        bot.send_message(chat_id, "The Oracle is still weighing your previous question.")
            .await?;
        return Ok(());
    }

    let context = store.load_or_create(chat_id.0).await.oracle_context();

    if let Err(e) = bot.send_chat_action(chat_id, ChatAction::Typing).await {
        debug!(error = %e, "Failed to send typing action");
    }

    let reply = services.oracle_service.ask_mentor(question, &context).await;
    let fallback_used = reply == MENTOR_EMPTY_FALLBACK || reply == MENTOR_ERROR_FALLBACK;

    store
        .update(chat_id.0, |session| {
            session.push_turn(TurnRole::Oracle, reply.clone());
            session.oracle_busy = false;
        })
        .await;

    logging::log_oracle_exchange(chat_id.0, question.len(), fallback_used);

    bot.send_message(chat_id, markdown::to_html(&reply))
        .parse_mode(ParseMode::Html)
        .await?;

    Ok(())
}
