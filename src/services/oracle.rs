//! Oracle (LLM collaborator) service implementation
//!
//! This service wraps the completion API behind the three call shapes the
//! concierge uses: mentor Q&A, per-event deep resonance analysis, and the
//! journey synthesis. Every call degrades to a call-site-specific fallback
//! sentence instead of surfacing an error to the visitor.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog::Event;
use crate::config::settings::Settings;
use crate::utils::errors::{ConciergeError, OracleError, Result};

/// Completion request body
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
}

/// Completion response body
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CompletionResponse {
    pub text: Option<String>,
}

/// Mentor fallbacks: empty completion vs transport failure
pub const MENTOR_EMPTY_FALLBACK: &str =
    "The path is obscured for a moment. Take a breath, and let us try again.";
pub const MENTOR_ERROR_FALLBACK: &str =
    "The winds are shifting. Please try your query again when the spirits are calm.";

/// Deep event analysis fallbacks
pub const DEEP_ANSWER_EMPTY_FALLBACK: &str = "The Oracle is silent. Your resonance is sufficient.";
pub const DEEP_ANSWER_ERROR_FALLBACK: &str =
    "The connection to the Oracle has been interrupted. Trust your intuition.";

/// Journey synthesis fallbacks
pub const JOURNEY_EMPTY_FALLBACK: &str = "Analysis failed to materialize. Focus your intention.";
pub const JOURNEY_ERROR_FALLBACK: &str = "Neural pathways are congested. Re-sync in a few moments.";

/// Oracle service for LLM completions
#[derive(Debug, Clone)]
pub struct OracleService {
    client: Client,
    settings: Settings,
}

impl OracleService {
    /// Create a new OracleService instance
    pub fn new(settings: Settings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.oracle.timeout_seconds))
            .user_agent("SwitchConcierge/1.0")
            .build()
            .map_err(ConciergeError::Http)?;

        Ok(Self { client, settings })
    }

    /// General wisdom and quick Q&A
    pub async fn ask_mentor(&self, question: &str, user_context: &str) -> String {
        let prompt = format!(
            "You are the Switch Oracle, a high-intelligence guide for the Switch platform.\n\
             The user is asking: \"{}\".\n\
             User context: {}.\n\
             Provide a wise, cinematic, and grounding response in under 100 words.\n\
             Use a calm, premium tone that blends shamanic depth with elite travel confidence.",
            question, user_context
        );

        self.complete_with_fallback(
            &self.settings.oracle.fast_model,
            &prompt,
            MENTOR_EMPTY_FALLBACK,
            MENTOR_ERROR_FALLBACK,
        )
        .await
    }

    /// Deep resonance analysis for a single selected event
    pub async fn deep_answer(&self, event: &Event) -> String {
        let prompt = format!(
            "Perform a \"Deep Resonance Analysis\" for the following retreat:\n\
             Event: {}\n\
             Location: {}\n\
             Theme: {}\n\
             Core Intent: {}\n\n\
             Act as a synthesized consciousness of a World-Class Trip Advisor, a Senior Life Coach, and a Somatic Therapist.\n\n\
             Structure your response with these specific sections:\n\
             ### The Program Resonance\n\
             Explain the deep 'why' behind this specific program and how the location amplifies the theme.\n\n\
             ### The Descent (Preparation)\n\
             Advice on what to do 7 days before to prepare the body, mind, and spirit.\n\n\
             ### The Rebirth (Integration)\n\
             How to return to daily life without losing the frequency shift.\n\n\
             ### Coaching Insight\n\
             A powerful, challenging question for the user to contemplate before booking.\n\n\
             Tone: Premium, cinematic, mystical yet practical. Use the 'Switch' brand voice: shamanic depth meets elite travel confidence.\n\
             Max 300 words. Markdown format.",
            event.title, event.location, event.theme, event.description
        );

        self.complete_with_fallback(
            &self.settings.oracle.fast_model,
            &prompt,
            DEEP_ANSWER_EMPTY_FALLBACK,
            DEEP_ANSWER_ERROR_FALLBACK,
        )
        .await
    }

    /// Deep neural analysis of the visitor's transformation journey
    pub async fn analyze_journey(&self, progress: &str) -> String {
        let prompt = format!(
            "Perform a \"Big Brain\" Deep Neural Analysis on this user's transformation journey:\n\
             Progress: {}.\n\n\
             Requirements:\n\
             1. Synthesize their achievements and current momentum.\n\
             2. Identify a \"Shadow Pattern\" based on their journey type.\n\
             3. Recommend a \"Radical Pivot\" for their next experience to maximize growth.\n\
             4. Provide a \"Mantra of Power\".\n\n\
             Tone: Extremely sophisticated, slightly mystical but highly analytical.\n\
             Format: Markdown with distinct headers. Keep it under 250 words.",
            progress
        );

        self.complete_with_fallback(
            &self.settings.oracle.deep_model,
            &prompt,
            JOURNEY_EMPTY_FALLBACK,
            JOURNEY_ERROR_FALLBACK,
        )
        .await
    }

    async fn complete_with_fallback(
        &self,
        model: &str,
        prompt: &str,
        empty_fallback: &str,
        error_fallback: &str,
    ) -> String {
        match self.complete(model, prompt).await {
            Ok(text) => text,
            Err(OracleError::EmptyCompletion) => {
                debug!(model = model, "Oracle returned an empty completion");
                empty_fallback.to_string()
            }
            Err(e) => {
                warn!(model = model, error = %e, "Oracle request failed");
                error_fallback.to_string()
            }
        }
    }

    /// Make the actual completion request
    async fn complete(&self, model: &str, prompt: &str) -> std::result::Result<String, OracleError> {
        let url = format!("{}/v1/complete", self.settings.oracle.api_url);

        debug!(model = model, url = %url, "Making oracle completion request");

        let body = CompletionRequest {
            model: model.to_string(),
            prompt: prompt.to_string(),
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.settings.oracle.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    OracleError::Timeout
                } else if e.is_connect() {
                    OracleError::ServiceUnavailable
                } else {
                    OracleError::RequestFailed(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(OracleError::RequestFailed(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| OracleError::InvalidResponse(e.to_string()))?;

        match completion.text {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => Err(OracleError::EmptyCompletion),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_response_deserialization() {
        let json = r#"{"text": "Walk slowly. **Breathe.**"}"#;
        let response: CompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text.as_deref(), Some("Walk slowly. **Breathe.**"));
    }

    #[test]
    fn test_completion_response_null_text() {
        let json = r#"{"text": null}"#;
        let response: CompletionResponse = serde_json::from_str(json).unwrap();
        assert!(response.text.is_none());
    }

    #[test]
    fn test_fallbacks_are_distinct_per_call_site() {
        let all = [
            MENTOR_EMPTY_FALLBACK,
            MENTOR_ERROR_FALLBACK,
            DEEP_ANSWER_EMPTY_FALLBACK,
            DEEP_ANSWER_ERROR_FALLBACK,
            JOURNEY_EMPTY_FALLBACK,
            JOURNEY_ERROR_FALLBACK,
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
