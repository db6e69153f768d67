//! Callback query handlers module
//!
//! This module contains handlers for all inline keyboard button callbacks.
//! Callback data is a colon-separated path: the first segment selects the
//! concern, the rest are arguments.

pub mod navigation;

use teloxide::{
    prelude::*,
    types::{
        CallbackQuery, ChatId, InlineKeyboardButton, InlineKeyboardMarkup, MessageId, ParseMode,
    },
    Bot,
};
use tracing::{debug, warn};

use crate::cart::CartLine;
use crate::catalog::{self, Duration, DurationFilter, Event, ThemeFilter};
use crate::handlers::commands;
use crate::markdown;
use crate::services::ServiceFactory;
use crate::state::{CheckoutStep, SessionStore, ViewState};
use crate::utils::errors::{ConciergeError, Result};
use crate::utils::helpers::{self, escape_html, format_price};
use crate::utils::logging;

/// How long a cart confirmation stays on screen before it dismisses itself
const CART_NOTICE_TTL: std::time::Duration = std::time::Duration::from_millis(2000);

/// Main callback query dispatcher
pub async fn handle_callback_query(
    bot: Bot,
    query: CallbackQuery,
    services: ServiceFactory,
    store: SessionStore,
) -> Result<()> {
    let user_id = query.from.id.0 as i64;
    let chat_id = query
        .message
        .as_ref()
        .map(|m| m.chat().id)
        .unwrap_or(ChatId(user_id));

    let Some(data) = query.data.clone() else {
        return Ok(());
    };

    debug!(chat_id = ?chat_id, callback_data = %data, "Processing callback query");

    // Answer first to remove the loading state on the button
    if let Err(e) = bot.answer_callback_query(query.id.clone()).await {
        warn!(error = %e, "Failed to answer callback query");
    }

    let parts: Vec<&str> = data.split(':').collect();
    match parts.as_slice() {
        ["nav", slug] => navigation::navigate(bot, chat_id, slug, services, store).await,
        ["filter", "duration", value] => set_duration_filter(bot, chat_id, value, store).await,
        ["filter", "theme", value] => set_theme_filter(bot, chat_id, value, store).await,
        ["event", event_id] => open_event_detail(bot, chat_id, event_id, services, store).await,
        ["cart", "open"] => commands::send_cart_view(bot, chat_id, store).await,
        ["cart", "add", "event", event_id] => {
            add_event_to_cart(bot, chat_id, event_id, store).await
        }
        ["cart", "add", "addon", addon_id] => {
            add_addon_to_cart(bot, chat_id, addon_id, store).await
        }
        ["cart", "remove", index] => remove_from_cart(bot, chat_id, index, store).await,
        ["addons", "list"] => commands::send_addons_view(bot, chat_id).await,
        ["checkout", "start"] => begin_checkout(bot, chat_id, None, store).await,
        ["checkout", "event", event_id] => {
            let event = find_event(event_id)?;
            let prefill = format!("I am inquiring about the \"{}\" ritual. ", event.title);
            begin_checkout(bot, chat_id, Some(prefill), store).await
        }
        ["checkout", "cancel"] => cancel_checkout(bot, chat_id, store).await,
        ["share", event_id] => send_share_menu(bot, chat_id, event_id).await,
        _ => {
            warn!(data = %data, "Unknown callback action");
            Ok(())
        }
    }
}

fn find_event(event_id: &str) -> Result<&'static Event> {
    catalog::find_event(event_id).ok_or_else(|| ConciergeError::EventNotFound {
        event_id: event_id.to_string(),
    })
}

async fn set_duration_filter(
    bot: Bot,
    chat_id: ChatId,
    value: &str,
    store: SessionStore,
) -> Result<()> {
    let selector = match value {
        "all" => DurationFilter::All,
        other => DurationFilter::Only(other.parse::<Duration>()?),
    };

    store
        .update(chat_id.0, |session| session.filter.duration = selector)
        .await;
    logging::log_visitor_action(chat_id.0, "filter_duration", Some(value));

    commands::send_catalog_view(bot, chat_id, store).await
}

async fn set_theme_filter(
    bot: Bot,
    chat_id: ChatId,
    value: &str,
    store: SessionStore,
) -> Result<()> {
    let selector = if value == "all" {
        ThemeFilter::All
    } else {
        let index: usize = value
            .parse()
            .map_err(|_| ConciergeError::InvalidInput(format!("Bad theme index: {}", value)))?;
        let themes = catalog::themes(catalog::events());
        match themes.get(index) {
            Some(theme) => ThemeFilter::Theme(theme.clone()),
            None => {
                warn!(index = index, "Theme index out of range");
                return Ok(());
            }
        }
    };

    store
        .update(chat_id.0, |session| session.filter.theme = selector.clone())
        .await;
    logging::log_visitor_action(chat_id.0, "filter_theme", Some(value));

    commands::send_catalog_view(bot, chat_id, store).await
}

/// Open an experience: mount the detail view, then load the oracle
/// commentary into a placeholder message. A commentary that lands after the
/// visitor has moved to another experience is dropped.
async fn open_event_detail(
    bot: Bot,
    chat_id: ChatId,
    event_id: &str,
    services: ServiceFactory,
    store: SessionStore,
) -> Result<()> {
    let event = find_event(event_id)?;

    store
        .update(chat_id.0, |session| session.open_detail(&event.id))
        .await;
    logging::log_visitor_action(chat_id.0, "open_experience", Some(&event.title));

    let (card, keyboard) = render_event_card(event);
    bot.send_message(chat_id, card)
        .parse_mode(ParseMode::Html)
        .reply_markup(keyboard)
        .await?;

    if !services.settings.features.deep_analysis {
        return Ok(());
    }

    let placeholder = bot
        .send_message(chat_id, "Consulting the ancient and the digital...")
        .await?;

    let commentary = services.oracle_service.deep_answer(event).await;
    let still_selected = store
        .update(chat_id.0, |session| {
            session.set_commentary(&event.id, commentary.clone());
            matches!(&session.view, ViewState::Detail { event_id: current, .. } if current == &event.id)
        })
        .await;

    if still_selected {
        let text = format!(
            "<b><i>ORACLE RESONANCE ANALYSIS</i></b>\n\n{}",
            markdown::to_html(&commentary)
        );
        bot.edit_message_text(chat_id, placeholder.id, text)
            .parse_mode(ParseMode::Html)
            .await?;
    } else {
        debug!(event_id = %event.id, "Dropping stale commentary");
        bot.delete_message(chat_id, placeholder.id).await?;
    }

    Ok(())
}

fn render_event_card(event: &Event) -> (String, InlineKeyboardMarkup) {
    let text = format!(
        "<b>{}</b>\n<i>{}</i>\n\n{}\n\n{} | {} | {}\nGrid: {:.0}% / {:.0}%\n<a href=\"{}\">Poster</a>",
        escape_html(&event.title).to_uppercase(),
        escape_html(&event.location),
        escape_html(&event.description),
        escape_html(&event.theme),
        event.days,
        format_price(event.price),
        event.coordinates.x,
        event.coordinates.y,
        event.poster_url
    );

    let keyboard = InlineKeyboardMarkup::new(vec![
        vec![
            InlineKeyboardButton::callback("🛒 ADD TO CART", format!("cart:add:event:{}", event.id)),
            InlineKeyboardButton::callback("BOOK INQUIRY", format!("checkout:event:{}", event.id)),
        ],
        vec![
            InlineKeyboardButton::callback("⤴ Share", format!("share:{}", event.id)),
            InlineKeyboardButton::callback("← The Collective", "nav:events"),
        ],
    ]);

    (text, keyboard)
}

async fn add_event_to_cart(
    bot: Bot,
    chat_id: ChatId,
    event_id: &str,
    store: SessionStore,
) -> Result<()> {
    let event = find_event(event_id)?;
    add_line_to_cart(bot, chat_id, CartLine::Event(event.clone()), store).await
}

async fn add_addon_to_cart(
    bot: Bot,
    chat_id: ChatId,
    addon_id: &str,
    store: SessionStore,
) -> Result<()> {
    let addon = catalog::find_addon(addon_id).ok_or_else(|| ConciergeError::AddOnNotFound {
        addon_id: addon_id.to_string(),
    })?;
    add_line_to_cart(bot, chat_id, CartLine::AddOn(addon.clone()), store).await
}

/// Append a line and show the transient confirmation. A previous still
/// visible confirmation is superseded immediately; the new one dismisses
/// itself unless another add claims the notice first.
async fn add_line_to_cart(
    bot: Bot,
    chat_id: ChatId,
    line: CartLine,
    store: SessionStore,
) -> Result<()> {
    let title = line.title().to_string();
    let (len, total, seq, superseded) = store
        .update(chat_id.0, |session| {
            let len = session.cart.add(line);
            let seq = session.begin_cart_notice();
            let superseded = session.cart_notice_msg.take();
            (len, session.cart.total(), seq, superseded)
        })
        .await;

    logging::log_visitor_action(chat_id.0, "cart_add", Some(&title));

    if let Some(old_id) = superseded {
        if let Err(e) = bot.delete_message(chat_id, MessageId(old_id)).await {
            debug!(error = %e, "Superseded cart notice already gone");
        }
    }

    let notice = bot
        .send_message(
            chat_id,
            format!(
                "✓ {} added. {} item(s), total {}.",
                title,
                len,
                format_price(total)
            ),
        )
        .await?;

    store
        .update(chat_id.0, |session| {
            if session.cart_notice_seq == seq {
                session.cart_notice_msg = Some(notice.id.0);
            }
        })
        .await;

    tokio::spawn(async move {
        tokio::time::sleep(CART_NOTICE_TTL).await;
        let still_current = store
            .update(chat_id.0, |session| {
                if session.cart_notice_seq == seq {
                    session.cart_notice_msg = None;
                    true
                } else {
                    false
                }
            })
            .await;
        if still_current {
            if let Err(e) = bot.delete_message(chat_id, notice.id).await {
                debug!(error = %e, "Cart notice already gone");
            }
        }
    });

    Ok(())
}

async fn remove_from_cart(
    bot: Bot,
    chat_id: ChatId,
    index: &str,
    store: SessionStore,
) -> Result<()> {
    let Ok(index) = index.parse::<usize>() else {
        warn!(index = %index, "Bad cart removal index");
        return Ok(());
    };

    // a stale index from an outdated keyboard is a no-op in the cart
    let removed = store
        .update(chat_id.0, |session| session.cart.remove(index))
        .await;
    if let Some(line) = &removed {
        logging::log_visitor_action(chat_id.0, "cart_remove", Some(line.title()));
    }

    commands::send_cart_view(bot, chat_id, store).await
}

async fn begin_checkout(
    bot: Bot,
    chat_id: ChatId,
    prefill: Option<String>,
    store: SessionStore,
) -> Result<()> {
    store
        .update(chat_id.0, |session| session.start_checkout(prefill))
        .await;
    logging::log_visitor_action(chat_id.0, "checkout_start", None);

    let keyboard = InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
        "Cancel",
        "checkout:cancel",
    )]]);
    bot.send_message(chat_id, CheckoutStep::first().prompt())
        .reply_markup(keyboard)
        .await?;

    Ok(())
}

async fn cancel_checkout(bot: Bot, chat_id: ChatId, store: SessionStore) -> Result<()> {
    store
        .update(chat_id.0, |session| session.cancel_checkout())
        .await;
    logging::log_visitor_action(chat_id.0, "checkout_cancel", None);

    bot.send_message(
        chat_id,
        "The ritual has been set aside. Your cart remains untouched.",
    )
    .await?;

    Ok(())
}

async fn send_share_menu(bot: Bot, chat_id: ChatId, event_id: &str) -> Result<()> {
    let event = find_event(event_id)?;

    let mut buttons = Vec::new();
    for (platform, label) in [
        ("twitter", "Twitter"),
        ("facebook", "Facebook"),
        ("linkedin", "LinkedIn"),
        ("whatsapp", "WhatsApp"),
    ] {
        if let Some(link) = helpers::share_link(platform, &event.id, &event.title, &event.location)
        {
            buttons.push(InlineKeyboardButton::url(label, url::Url::parse(&link)?));
        }
    }
    let rows: Vec<Vec<InlineKeyboardButton>> = buttons.chunks(2).map(|c| c.to_vec()).collect();

    logging::log_visitor_action(chat_id.0, "share_menu", Some(&event.title));

    bot.send_message(chat_id, format!("Share \"{}\" with your circle:", event.title))
        .reply_markup(InlineKeyboardMarkup::new(rows))
        .await?;

    Ok(())
}
