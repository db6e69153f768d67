//! Services module
//!
//! Thin clients for the three external collaborators the concierge depends
//! on: the oracle (LLM completions), the mailer (checkout inquiries) and
//! the content source (dynamic pages).

pub mod content;
pub mod mailer;
pub mod oracle;

// Re-export commonly used services
pub use content::{ContentService, ExternalPageData};
pub use mailer::{InquiryFields, MailerService, INQUIRY_SUBJECT};
pub use oracle::OracleService;

use crate::config::settings::Settings;
use crate::utils::errors::Result;

/// Service factory for creating and managing all collaborator services
#[derive(Debug, Clone)]
pub struct ServiceFactory {
    pub oracle_service: OracleService,
    pub mailer_service: MailerService,
    pub content_service: ContentService,
    pub settings: Settings,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(settings: Settings) -> Result<Self> {
        let oracle_service = OracleService::new(settings.clone())?;
        let mailer_service = MailerService::new(settings.clone())?;
        let content_service = ContentService::new(settings.clone())?;

        Ok(Self {
            oracle_service,
            mailer_service,
            content_service,
            settings,
        })
    }
}
