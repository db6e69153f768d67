//! Experience cart handlers
//!
//! Renders the cart with per-line removal buttons and the marketplace
//! add-on list. Removal buttons carry the line's position, and a stale
//! position is a silent no-op in the cart itself.

use teloxide::{
    prelude::*,
    types::{ChatId, InlineKeyboardButton, InlineKeyboardMarkup, Message, ParseMode},
    Bot,
};
use tracing::debug;

use crate::catalog;
use crate::state::{SessionContext, SessionStore};
use crate::utils::errors::Result;
use crate::utils::helpers::{escape_html, format_price};

/// Handle /cart command
pub async fn handle_cart(bot: Bot, msg: Message, store: SessionStore) -> Result<()> {
    debug!(chat_id = ?msg.chat.id, "Processing /cart command");
    send_cart_view(bot, msg.chat.id, store).await
}

/// Send the current cart contents with removal and checkout buttons
pub async fn send_cart_view(bot: Bot, chat_id: ChatId, store: SessionStore) -> Result<()> {
    let session = store.load_or_create(chat_id.0).await;
    let (text, keyboard) = render_cart(&session);

    bot.send_message(chat_id, text)
        .parse_mode(ParseMode::Html)
        .reply_markup(keyboard)
        .await?;

    Ok(())
}

/// Render the cart text and keyboard from a session snapshot
pub fn render_cart(session: &SessionContext) -> (String, InlineKeyboardMarkup) {
    if session.cart.is_empty() {
        let text = "<b>EXPERIENCE CART</b>\n\nYour cart is empty. The path awaits.".to_string();
        let keyboard = InlineKeyboardMarkup::new(vec![
            vec![InlineKeyboardButton::callback(
                "Browse the Collective",
                "nav:events",
            )],
            vec![InlineKeyboardButton::callback(
                "✨ Marketplace Add-ons",
                "addons:list",
            )],
        ]);
        return (text, keyboard);
    }

    let mut text = String::from("<b>EXPERIENCE CART</b>\n\n");
    for (i, line) in session.cart.lines().iter().enumerate() {
        text.push_str(&format!(
            "{}. {} ({})\n",
            i + 1,
            escape_html(line.title()),
            format_price(line.price())
        ));
    }
    text.push_str(&format!(
        "\nTotal Investment: {}",
        format_price(session.cart.total())
    ));

    let mut rows = Vec::new();
    let remove_buttons: Vec<InlineKeyboardButton> = (0..session.cart.len())
        .map(|i| {
            InlineKeyboardButton::callback(format!("✕ {}", i + 1), format!("cart:remove:{}", i))
        })
        .collect();
    for chunk in remove_buttons.chunks(4) {
        rows.push(chunk.to_vec());
    }
    rows.push(vec![InlineKeyboardButton::callback(
        "✨ Marketplace Add-ons",
        "addons:list",
    )]);
    rows.push(vec![InlineKeyboardButton::callback(
        "INITIATE CHECKOUT",
        "checkout:start",
    )]);

    (text, InlineKeyboardMarkup::new(rows))
}

/// Send the marketplace add-on list
pub async fn send_addons_view(bot: Bot, chat_id: ChatId) -> Result<()> {
    let addons = catalog::addons();

    let mut text = String::from("<b>MARKETPLACE ADD-ONS</b>\n\n");
    for addon in addons {
        text.push_str(&format!(
            "{} <b>{}</b> ({})\n{}\n\n",
            addon.icon,
            escape_html(&addon.title),
            format_price(addon.price),
            escape_html(&addon.description)
        ));
    }

    let mut rows: Vec<Vec<InlineKeyboardButton>> = addons
        .iter()
        .map(|addon| {
            vec![InlineKeyboardButton::callback(
                format!("+ {}", addon.title),
                format!("cart:add:addon:{}", addon.id),
            )]
        })
        .collect();
    rows.push(vec![InlineKeyboardButton::callback(
        "🛒 Back to cart",
        "cart:open",
    )]);

    bot.send_message(chat_id, text)
        .parse_mode(ParseMode::Html)
        .reply_markup(InlineKeyboardMarkup::new(rows))
        .await?;

    Ok(())
}
