//! Checkout conversation scenario
//!
//! The checkout form is collected as a three-step conversation: name, email,
//! intention. Each step validates its input before the form field is applied
//! and the scenario advances.

use serde::{Deserialize, Serialize};

use crate::cart::ContactForm;
use crate::utils::errors::{ConciergeError, Result};

/// Steps of the checkout scenario, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckoutStep {
    Name,
    Email,
    Intention,
}

impl CheckoutStep {
    /// Initial step when the checkout opens
    pub fn first() -> Self {
        CheckoutStep::Name
    }

    /// The step after this one; `None` once the intention is collected
    pub fn next(self) -> Option<Self> {
        match self {
            CheckoutStep::Name => Some(CheckoutStep::Email),
            CheckoutStep::Email => Some(CheckoutStep::Intention),
            CheckoutStep::Intention => None,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            CheckoutStep::Name => "name",
            CheckoutStep::Email => "email",
            CheckoutStep::Intention => "intention",
        }
    }

    /// Prompt shown when this step becomes active
    pub fn prompt(&self) -> &'static str {
        match self {
            CheckoutStep::Name => "Ritual Initiation. What name should the inquiry be held under?",
            CheckoutStep::Email => "Where should the resonance reach you? Share your email.",
            CheckoutStep::Intention => {
                "Speak your intention. What are you seeking from this journey?"
            }
        }
    }

    /// Validate user input for this step
    pub fn validate(&self, input: &str) -> Result<()> {
        let input = input.trim();
        match self {
            CheckoutStep::Name => {
                if input.is_empty() {
                    return Err(ConciergeError::InvalidInput(
                        "Please share a name for the inquiry.".to_string(),
                    ));
                }
            }
            CheckoutStep::Email => {
                if !input.contains('@') || !input.contains('.') {
                    return Err(ConciergeError::InvalidInput(
                        "Invalid email format".to_string(),
                    ));
                }
            }
            CheckoutStep::Intention => {
                if input.is_empty() {
                    return Err(ConciergeError::InvalidInput(
                        "Your intention cannot be empty.".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Apply validated input to the contact form
    pub fn apply(&self, form: &mut ContactForm, input: &str) {
        let input = input.trim();
        match self {
            CheckoutStep::Name => form.name = input.to_string(),
            CheckoutStep::Email => form.email = input.to_string(),
            CheckoutStep::Intention => form.intention = input.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_order() {
        assert_eq!(CheckoutStep::first(), CheckoutStep::Name);
        assert_eq!(CheckoutStep::Name.next(), Some(CheckoutStep::Email));
        assert_eq!(CheckoutStep::Email.next(), Some(CheckoutStep::Intention));
        assert_eq!(CheckoutStep::Intention.next(), None);
    }

    #[test]
    fn test_step_validation() {
        assert!(CheckoutStep::Name.validate("Elena").is_ok());
        // single-character names are accepted, only blank input is not
        assert!(CheckoutStep::Name.validate(" E ").is_ok());
        assert!(CheckoutStep::Name.validate("   ").is_err());
        assert!(CheckoutStep::Email.validate("elena@example.com").is_ok());
        assert!(CheckoutStep::Email.validate("elena-example").is_err());
        assert!(CheckoutStep::Intention.validate("I seek stillness").is_ok());
        assert!(CheckoutStep::Intention.validate("   ").is_err());
    }

    #[test]
    fn test_apply_fills_form_in_sequence() {
        let mut form = ContactForm::default();
        CheckoutStep::Name.apply(&mut form, " Elena ");
        CheckoutStep::Email.apply(&mut form, "elena@example.com");
        CheckoutStep::Intention.apply(&mut form, "Reset my nervous system.");

        assert_eq!(form.name, "Elena");
        assert!(form.is_complete());
    }
}
