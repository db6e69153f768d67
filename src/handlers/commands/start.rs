//! Start command handler
//!
//! Handles the /start command: resets the chat to the standard view and
//! shows the hero message with the navigation keyboard.

use teloxide::{
    prelude::*,
    types::{ChatId, InlineKeyboardButton, InlineKeyboardMarkup, Message, ParseMode},
    Bot,
};
use tracing::debug;

use crate::state::SessionStore;
use crate::utils::errors::Result;
use crate::utils::logging;

/// Handle /start command
pub async fn handle_start(bot: Bot, msg: Message, store: SessionStore) -> Result<()> {
    let chat_id = msg.chat.id;

    debug!(chat_id = ?chat_id, "Processing /start command");

    if !chat_id.is_user() {
        bot.send_message(chat_id, "The concierge is a private conversation. Message me directly.")
            .await?;
        return Ok(());
    }

    store.update(chat_id.0, |session| session.go_standard()).await;
    logging::log_visitor_action(chat_id.0, "start", None);

    send_home_view(bot, chat_id).await
}

/// Send the hero message with the main navigation keyboard
pub async fn send_home_view(bot: Bot, chat_id: ChatId) -> Result<()> {
    let text = "<b>SWITCH</b>\n\
        <i>Travel. Transform. Thrive.</i>\n\n\
        Welcome to the Switch concierge. Browse the annual collective of curated \
        retreats, fill your experience cart, and bring your questions to the Oracle.\n\n\
        You can also just type a question at any time.";

    let keyboard = InlineKeyboardMarkup::new(vec![
        vec![
            InlineKeyboardButton::callback("🌌 The Collective", "nav:events"),
            InlineKeyboardButton::callback("🧭 Discover", "nav:discover"),
        ],
        vec![
            InlineKeyboardButton::callback("🌐 Community", "nav:community"),
            InlineKeyboardButton::callback("🔮 Vision", "nav:vision"),
        ],
        vec![InlineKeyboardButton::callback("🛒 Experience Cart", "cart:open")],
    ]);

    bot.send_message(chat_id, text)
        .parse_mode(ParseMode::Html)
        .reply_markup(keyboard)
        .await?;

    Ok(())
}
