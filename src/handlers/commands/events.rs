//! Catalog browsing handlers
//!
//! Renders the annual collective with the duration and theme filter
//! keyboards. The filter selectors live in the session; every change
//! re-renders the list from the full catalog, original order retained.

use teloxide::{
    prelude::*,
    types::{ChatId, InlineKeyboardButton, InlineKeyboardMarkup, Message, ParseMode},
    Bot,
};
use tracing::debug;

use crate::catalog::{self, CatalogFilter, Duration, DurationFilter, Event, ThemeFilter};
use crate::state::SessionStore;
use crate::utils::errors::Result;
use crate::utils::helpers::{escape_html, format_price, truncate_text};

/// Handle /events command
pub async fn handle_events(bot: Bot, msg: Message, store: SessionStore) -> Result<()> {
    let chat_id = msg.chat.id;

    debug!(chat_id = ?chat_id, "Processing /events command");

    store.update(chat_id.0, |session| session.go_standard()).await;
    send_catalog_view(bot, chat_id, store).await
}

/// Send the filtered catalog with the filter and selection keyboards
pub async fn send_catalog_view(bot: Bot, chat_id: ChatId, store: SessionStore) -> Result<()> {
    let filter = store.load_or_create(chat_id.0).await.filter;
    let full_catalog = catalog::events();
    let visible = filter.apply(full_catalog);

    let mut text = format!(
        "<b>THE ANNUAL COLLECTIVE</b>\n{} of {} experiences\n\n",
        visible.len(),
        full_catalog.len()
    );

    if visible.is_empty() {
        text.push_str("No experiences match the current filters. Widen your search.");
    } else {
        for (i, event) in visible.iter().enumerate() {
            text.push_str(&format!(
                "{}. <b>{}</b>\n      {} | {} | {} | {}\n",
                i + 1,
                escape_html(&event.title),
                escape_html(&event.location),
                escape_html(&event.theme),
                event.days,
                format_price(event.price)
            ));
        }
        text.push_str("\nTap a number to open the experience.");
    }

    let keyboard = catalog_keyboard(&filter, &visible);

    bot.send_message(chat_id, text)
        .parse_mode(ParseMode::Html)
        .reply_markup(keyboard)
        .await?;

    Ok(())
}

/// Build the filter and event selection keyboard.
///
/// Theme buttons carry the theme's index in the distinct-themes list rather
/// than the theme text itself, which keeps callback data inside Telegram's
/// 64-byte limit.
fn catalog_keyboard(filter: &CatalogFilter, visible: &[&Event]) -> InlineKeyboardMarkup {
    let mark = |label: &str, active: bool| {
        if active {
            format!("✓ {}", label)
        } else {
            label.to_string()
        }
    };

    let mut rows = vec![vec![
        InlineKeyboardButton::callback(
            mark("All", filter.duration == DurationFilter::All),
            "filter:duration:all",
        ),
        InlineKeyboardButton::callback(
            mark(
                "Micro",
                filter.duration == DurationFilter::Only(Duration::MicroRetreat),
            ),
            "filter:duration:micro",
        ),
        InlineKeyboardButton::callback(
            mark(
                "Macro",
                filter.duration == DurationFilter::Only(Duration::MacroRetreat),
            ),
            "filter:duration:macro",
        ),
    ]];

    let themes = catalog::themes(catalog::events());
    let mut theme_buttons = vec![InlineKeyboardButton::callback(
        mark("All Themes", filter.theme == ThemeFilter::All),
        "filter:theme:all",
    )];
    for (index, theme) in themes.iter().enumerate() {
        let active = matches!(&filter.theme, ThemeFilter::Theme(t) if t == theme);
        theme_buttons.push(InlineKeyboardButton::callback(
            mark(&truncate_text(theme, 16), active),
            format!("filter:theme:{}", index),
        ));
    }
    for chunk in theme_buttons.chunks(3) {
        rows.push(chunk.to_vec());
    }

    let event_buttons: Vec<InlineKeyboardButton> = visible
        .iter()
        .enumerate()
        .map(|(i, event)| {
            InlineKeyboardButton::callback(format!("{}", i + 1), format!("event:{}", event.id))
        })
        .collect();
    for chunk in event_buttons.chunks(6) {
        rows.push(chunk.to_vec());
    }

    rows.push(vec![
        InlineKeyboardButton::callback("🛒 Cart", "cart:open"),
        InlineKeyboardButton::callback("⌂ Home", "nav:home"),
    ]);

    InlineKeyboardMarkup::new(rows)
}
