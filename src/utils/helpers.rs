//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the
//! application.

/// Public site the share links point back at.
const EXPERIENCE_BASE_URL: &str = "https://switch-retreats.com/experience";

/// Escape text for Telegram HTML parse mode
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Format a whole-USD price for display
pub fn format_price(price: u32) -> String {
    format!("${}", price)
}

/// Truncate text to a maximum character length with ellipsis
pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_length.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

/// Build a share link for a retreat experience.
///
/// Mirrors the share surface of the Switch site: Twitter, Facebook, LinkedIn
/// and WhatsApp, each with the brand share text. Unknown platforms yield
/// `None`.
pub fn share_link(platform: &str, event_id: &str, title: &str, location: &str) -> Option<String> {
    let share_url = format!("{}/{}", EXPERIENCE_BASE_URL, event_id);
    let share_text = format!(
        "Explore the transformative journey of \"{}\" in {}. #Switch #TravelTransformThrive",
        title, location
    );

    let url = match platform {
        "twitter" => format!(
            "https://twitter.com/intent/tweet?text={}&url={}",
            urlencoding::encode(&share_text),
            urlencoding::encode(&share_url)
        ),
        "facebook" => format!(
            "https://www.facebook.com/sharer/sharer.php?u={}",
            urlencoding::encode(&share_url)
        ),
        "linkedin" => format!(
            "https://www.linkedin.com/sharing/share-offsite/?url={}",
            urlencoding::encode(&share_url)
        ),
        "whatsapp" => format!(
            "https://api.whatsapp.com/send?text={}",
            urlencoding::encode(&format!("{} {}", share_text, share_url))
        ),
        _ => return None,
    };

    Some(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a <b> & c"), "a &lt;b&gt; &amp; c");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(3400), "$3400");
        assert_eq!(format_price(0), "$0");
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("a longer piece of text", 10), "a longe...");
        // multibyte input must not split a character
        assert_eq!(truncate_text("séance of the étoiles", 10), "séance ...");
    }

    #[test]
    fn test_share_link_platforms() {
        let link = share_link("twitter", "4", "Arctic Soul Bath", "Lofoten, Norway").unwrap();
        assert!(link.starts_with("https://twitter.com/intent/tweet?text="));
        assert!(link.contains("Arctic%20Soul%20Bath"));
        assert!(link.contains(&urlencoding::encode("https://switch-retreats.com/experience/4").into_owned()));

        let link = share_link("whatsapp", "4", "Arctic Soul Bath", "Lofoten, Norway").unwrap();
        assert!(link.starts_with("https://api.whatsapp.com/send?text="));

        assert!(share_link("myspace", "4", "Arctic Soul Bath", "Lofoten, Norway").is_none());
    }
}
