//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging
//! utilities for the Switch Concierge application.

use tracing::{debug, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration.
///
/// The returned guard must stay alive for the lifetime of the process or the
/// file writer stops flushing.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "switch-concierge.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log visitor actions with structured data
pub fn log_visitor_action(chat_id: i64, action: &str, details: Option<&str>) {
    info!(
        chat_id = chat_id,
        action = action,
        details = details,
        "Visitor action performed"
    );
}

/// Log navigation outcomes (anchor scrolls and dynamic page fetches)
pub fn log_navigation(chat_id: i64, slug: &str, outcome: &str) {
    info!(
        chat_id = chat_id,
        slug = slug,
        outcome = outcome,
        "Navigation handled"
    );
}

/// Log a checkout submission attempt
pub fn log_checkout(chat_id: i64, items: usize, total: u32, success: bool) {
    if success {
        info!(
            chat_id = chat_id,
            items = items,
            total = total,
            "Ritual inquiry transmitted"
        );
    } else {
        warn!(
            chat_id = chat_id,
            items = items,
            total = total,
            "Ritual inquiry transmission failed"
        );
    }
}

/// Log oracle exchanges
pub fn log_oracle_exchange(chat_id: i64, question_len: usize, fallback_used: bool) {
    if fallback_used {
        warn!(
            chat_id = chat_id,
            question_len = question_len,
            "Oracle reply substituted with fallback"
        );
    } else {
        debug!(chat_id = chat_id, question_len = question_len, "Oracle reply delivered");
    }
}

/// Log API errors with context
pub fn log_api_error(api: &str, error: &str, context: Option<&str>) {
    error!(
        api = api,
        error = error,
        context = context,
        "API error occurred"
    );
}
