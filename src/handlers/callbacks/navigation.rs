//! Navigation callback handler
//!
//! Two anchor slugs ("home" and "events") always resolve locally to the
//! standard view, even when a content source is configured under the same
//! name. Any other slug is looked up with the content collaborator: a known
//! slug mounts a dynamic page, an unknown slug or a fetch failure leaves the
//! current view in place without a visitor-facing error.

use teloxide::{
    prelude::*,
    types::{ChatAction, ChatId, InlineKeyboardButton, InlineKeyboardMarkup, ParseMode},
    Bot,
};
use tracing::debug;

use crate::handlers::commands;
use crate::markdown;
use crate::services::content::ExternalPageData;
use crate::services::ServiceFactory;
use crate::state::SessionStore;
use crate::utils::errors::Result;
use crate::utils::helpers::escape_html;
use crate::utils::logging;

/// Resolve a navigation slug and mount the resulting view
pub async fn navigate(
    bot: Bot,
    chat_id: ChatId,
    slug: &str,
    services: ServiceFactory,
    store: SessionStore,
) -> Result<()> {
    match slug {
        "home" => {
            store.update(chat_id.0, |session| session.go_standard()).await;
            logging::log_navigation(chat_id.0, slug, "anchor");
            commands::send_home_view(bot, chat_id).await
        }
        "events" => {
            store.update(chat_id.0, |session| session.go_standard()).await;
            logging::log_navigation(chat_id.0, slug, "anchor");
            commands::send_catalog_view(bot, chat_id, store).await
        }
        _ => {
            if !services.settings.features.dynamic_pages {
                logging::log_navigation(chat_id.0, slug, "disabled");
                return Ok(());
            }

            if let Err(e) = bot.send_chat_action(chat_id, ChatAction::Typing).await {
                debug!(error = %e, "Failed to send typing action");
            }

            match services.content_service.fetch(slug).await {
                Ok(Some(page)) => {
                    store
                        .update(chat_id.0, |session| session.open_dynamic(page.clone()))
                        .await;
                    logging::log_navigation(chat_id.0, slug, "dynamic");

                    let (text, keyboard) = render_dynamic_page(&page);
                    bot.send_message(chat_id, text)
                        .parse_mode(ParseMode::Html)
                        .reply_markup(keyboard)
                        .await?;
                    Ok(())
                }
                Ok(None) => {
                    // unknown section, the current view stays mounted
                    logging::log_navigation(chat_id.0, slug, "unknown");
                    Ok(())
                }
                Err(e) => {
                    logging::log_api_error("content", &e.to_string(), Some(slug));
                    logging::log_navigation(chat_id.0, slug, "failed");
                    Ok(())
                }
            }
        }
    }
}

/// Render a fetched page envelope; the body is markdown-lite text
pub fn render_dynamic_page(page: &ExternalPageData) -> (String, InlineKeyboardMarkup) {
    let mut text = String::new();
    if let Some(subtitle) = &page.subtitle {
        text.push_str(&format!("<i>{}</i>\n", escape_html(subtitle)));
    }
    text.push_str(&format!(
        "<b>{}</b>\n\n",
        escape_html(&page.title).to_uppercase()
    ));
    text.push_str(&markdown::to_html(&page.body));
    // the hero URL is collaborator-supplied; parsing percent-encodes anything
    // that would break out of the href attribute, and a non-URL is dropped
    if let Some(hero) = &page.hero_image {
        if let Ok(hero_url) = url::Url::parse(hero) {
            text.push_str(&format!("\n\n<a href=\"{}\">✦</a>", hero_url));
        }
    }

    let cta = page.cta_text.as_deref().unwrap_or("RETURN TO SYSTEM CORE");
    let keyboard = InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
        cta.to_string(),
        "nav:home",
    )]]);

    (text, keyboard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_dynamic_page_renders_body_markdown() {
        let page = ExternalPageData {
            title: "Vision".to_string(),
            subtitle: Some("Dynamic resonance".to_string()),
            body: "### The Path\n- Walk **slowly**".to_string(),
            hero_image: None,
            cta_text: None,
        };

        let (text, keyboard) = render_dynamic_page(&page);
        assert!(text.contains("<b>VISION</b>"));
        assert!(text.contains("<i>Dynamic resonance</i>"));
        assert!(text.contains("<b><i>The Path</i></b>"));
        assert!(text.contains("• Walk **slowly**"));
        assert_eq!(keyboard.inline_keyboard[0][0].text, "RETURN TO SYSTEM CORE");
    }

    #[test]
    fn test_hero_image_cannot_break_out_of_the_link() {
        let page = ExternalPageData {
            title: "Vision".to_string(),
            subtitle: None,
            body: "text".to_string(),
            hero_image: Some("https://x/a\"><b>injected</b>".to_string()),
            cta_text: None,
        };

        let (text, _) = render_dynamic_page(&page);
        assert!(!text.contains("\"><b>injected"));
        assert!(text.contains("<a href=\"https://x/a%22%3E%3Cb%3Einjected%3C/b%3E\">"));
    }

    #[test]
    fn test_unparseable_hero_image_is_dropped() {
        let page = ExternalPageData {
            title: "Vision".to_string(),
            subtitle: None,
            body: "text".to_string(),
            hero_image: Some("not a url".to_string()),
            cta_text: None,
        };

        let (text, _) = render_dynamic_page(&page);
        assert!(!text.contains("<a href"));
    }

    #[test]
    fn test_render_dynamic_page_uses_custom_cta() {
        let page = ExternalPageData {
            title: "Community".to_string(),
            subtitle: None,
            body: "Join us.".to_string(),
            hero_image: None,
            cta_text: Some("BACK TO BASE".to_string()),
        };

        let (_, keyboard) = render_dynamic_page(&page);
        assert_eq!(keyboard.inline_keyboard[0][0].text, "BACK TO BASE");
    }
}
