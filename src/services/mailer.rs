//! Mailer (email collaborator) service implementation
//!
//! Transmits the checkout inquiry through an EmailJS-style REST API. Used
//! exactly once per checkout submission; on failure the collaborator's
//! diagnostic text is preserved so the checkout view can surface it and the
//! visitor can retry.

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use tracing::{debug, warn};

use crate::cart::{build_inquiry_message, Cart, ContactForm};
use crate::config::settings::Settings;
use crate::utils::errors::{ConciergeError, MailerError, Result};

/// Fixed subject line for every ritual inquiry
pub const INQUIRY_SUBJECT: &str = "New Ritual Inquiry - Voyage & Veda";

/// Template fields delivered to the mailer
#[derive(Debug, Clone, Serialize)]
pub struct InquiryFields {
    pub from_name: String,
    pub from_email: String,
    pub message: String,
    pub subject: String,
}

/// Full send request: routing metadata plus the template fields
#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a InquiryFields,
}

/// Mailer service for ritual inquiries
#[derive(Debug, Clone)]
pub struct MailerService {
    client: Client,
    settings: Settings,
}

impl MailerService {
    /// Create a new MailerService instance
    pub fn new(settings: Settings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.mailer.timeout_seconds))
            .user_agent("SwitchConcierge/1.0")
            .build()
            .map_err(ConciergeError::Http)?;

        Ok(Self { client, settings })
    }

    /// Serialize the contact form and cart into an inquiry and send it.
    ///
    /// Callers must validate the form first; an incomplete form must never
    /// reach the collaborator.
    pub async fn send_inquiry(
        &self,
        form: &ContactForm,
        cart: &Cart,
    ) -> std::result::Result<(), MailerError> {
        let fields = InquiryFields {
            from_name: form.name.clone(),
            from_email: form.email.clone(),
            message: build_inquiry_message(form, cart),
            subject: INQUIRY_SUBJECT.to_string(),
        };
        self.send(&fields).await
    }

    /// Send prepared fields through the mailer API
    pub async fn send(&self, fields: &InquiryFields) -> std::result::Result<(), MailerError> {
        let url = format!("{}/api/v1.0/email/send", self.settings.mailer.api_url);

        debug!(url = %url, from = %fields.from_email, "Transmitting ritual inquiry");

        let body = SendRequest {
            service_id: &self.settings.mailer.service_id,
            template_id: &self.settings.mailer.template_id,
            user_id: &self.settings.mailer.public_key,
            template_params: fields,
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MailerError::Timeout
                } else if e.is_connect() {
                    MailerError::ServiceUnavailable
                } else {
                    MailerError::SendFailed(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, diagnostic = %error_text, "Mailer rejected the inquiry");
            return Err(MailerError::SendFailed(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        debug!("Ritual inquiry transmitted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_request_serialization() {
        let fields = InquiryFields {
            from_name: "Elena".to_string(),
            from_email: "elena@example.com".to_string(),
            message: "I want to reset.".to_string(),
            subject: INQUIRY_SUBJECT.to_string(),
        };
        let request = SendRequest {
            service_id: "service_x",
            template_id: "template_y",
            user_id: "key_z",
            template_params: &fields,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["service_id"], "service_x");
        assert_eq!(json["user_id"], "key_z");
        assert_eq!(json["template_params"]["from_name"], "Elena");
        assert_eq!(
            json["template_params"]["subject"],
            "New Ritual Inquiry - Voyage & Veda"
        );
    }
}
