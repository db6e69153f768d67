//! Experience cart and checkout form
//!
//! The cart is an ordered sequence of lines (insertion order is display
//! order, duplicates allowed, removal by position). A line is a tagged
//! variant over the two purchasable kinds rather than a structural union, so
//! every consumer goes through the uniform `title`/`price` accessors.

use serde::{Deserialize, Serialize};

use crate::catalog::{AddOn, Event};
use crate::utils::errors::{ConciergeError, Result};

/// One slot in the cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CartLine {
    Event(Event),
    AddOn(AddOn),
}

impl CartLine {
    pub fn title(&self) -> &str {
        match self {
            CartLine::Event(event) => &event.title,
            CartLine::AddOn(addon) => &addon.title,
        }
    }

    pub fn price(&self) -> u32 {
        match self {
            CartLine::Event(event) => event.price,
            CartLine::AddOn(addon) => addon.price,
        }
    }
}

/// Ordered cart of selected experiences and add-ons
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line; returns the new length
    pub fn add(&mut self, line: CartLine) -> usize {
        self.lines.push(line);
        self.lines.len()
    }

    /// Remove the line at `index`. Out-of-range indices are a no-op; the
    /// rendered index on a button can be stale by the time it is tapped.
    pub fn remove(&mut self, index: usize) -> Option<CartLine> {
        if index < self.lines.len() {
            Some(self.lines.remove(index))
        } else {
            None
        }
    }

    /// Sum of member prices; 0 for an empty cart
    pub fn total(&self) -> u32 {
        self.lines.iter().map(CartLine::price).sum()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

/// Transient checkout contact form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub intention: String,
}

impl ContactForm {
    /// All three fields are required; the email only needs to be
    /// superficially well-formed.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty()
            || self.email.trim().is_empty()
            || self.intention.trim().is_empty()
        {
            return Err(ConciergeError::InvalidInput(
                "Please focus and complete all fields.".to_string(),
            ));
        }

        if !self.email.contains('@') || !self.email.contains('.') {
            return Err(ConciergeError::InvalidInput(
                "Invalid email format".to_string(),
            ));
        }

        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Serialize the intention and cart contents into the mailer message body.
pub fn build_inquiry_message(form: &ContactForm, cart: &Cart) -> String {
    let cart_details = if !cart.is_empty() {
        let items = cart
            .lines()
            .iter()
            .map(|line| format!("- {} (${})", line.title(), line.price()))
            .collect::<Vec<_>>()
            .join("\n");
        format!(
            "\n\n--- CART ITEMS ---\n{}\nTotal Investment: ${}",
            items,
            cart.total()
        )
    } else {
        "\n\nNo specific items in cart.".to_string()
    };

    format!("{}{}", form.intention, cart_details)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::catalog::{find_addon, find_event};

    fn event_line(id: &str) -> CartLine {
        CartLine::Event(find_event(id).expect("catalog event").clone())
    }

    fn addon_line(id: &str) -> CartLine {
        CartLine::AddOn(find_addon(id).expect("catalog addon").clone())
    }

    #[test]
    fn test_total_is_sum_of_member_prices() {
        let mut cart = Cart::new();
        assert_eq!(cart.total(), 0);
        cart.add(event_line("2")); // $1200
        cart.add(addon_line("1")); // $150
        assert_eq!(cart.total(), 1350);
    }

    #[test]
    fn test_total_is_order_invariant() {
        let mut forward = Cart::new();
        forward.add(event_line("1"));
        forward.add(event_line("2"));

        let mut reverse = Cart::new();
        reverse.add(event_line("2"));
        reverse.add(event_line("1"));

        assert_eq!(forward.total(), reverse.total());
    }

    #[test]
    fn test_duplicates_occupy_separate_slots() {
        let mut cart = Cart::new();
        cart.add(event_line("4"));
        cart.add(event_line("4"));
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total(), 3600);
    }

    #[test]
    fn test_remove_targets_exact_slot() {
        let mut cart = Cart::new();
        cart.add(event_line("1"));
        cart.add(event_line("2"));
        cart.add(event_line("3"));

        let removed = cart.remove(1).unwrap();
        assert_eq!(removed.title(), "Desert Drum Ritual");
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.lines()[0].title(), "Heart-Center Healing");
        assert_eq!(cart.lines()[1].title(), "Misty Forest Awakening");
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut cart = Cart::new();
        cart.add(event_line("1"));
        assert!(cart.remove(5).is_none());
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_contact_form_validation() {
        let mut form = ContactForm::default();
        assert_matches!(form.validate(), Err(ConciergeError::InvalidInput(_)));

        form.name = "Elena".to_string();
        form.email = "elena@example.com".to_string();
        form.intention = "Seeking stillness.".to_string();
        assert!(form.validate().is_ok());

        form.email = "not-an-email".to_string();
        assert_matches!(form.validate(), Err(ConciergeError::InvalidInput(msg)) => {
            assert_eq!(msg, "Invalid email format");
        });
    }

    #[test]
    fn test_inquiry_message_with_items() {
        let mut cart = Cart::new();
        cart.add(event_line("2")); // $1200
        cart.add(addon_line("2")); // $45

        let form = ContactForm {
            name: "Elena".to_string(),
            email: "elena@example.com".to_string(),
            intention: "I want to reset.".to_string(),
        };

        let message = build_inquiry_message(&form, &cart);
        assert!(message.starts_with("I want to reset."));
        assert!(message.contains("--- CART ITEMS ---"));
        assert!(message.contains("- Desert Drum Ritual ($1200)"));
        assert!(message.contains("- Carbon Offset (Double) ($45)"));
        assert!(message.ends_with("Total Investment: $1245"));
    }

    #[test]
    fn test_inquiry_message_empty_cart() {
        let form = ContactForm {
            intention: "Just curious.".to_string(),
            ..Default::default()
        };
        let message = build_inquiry_message(&form, &Cart::new());
        assert_eq!(message, "Just curious.\n\nNo specific items in cart.");
    }
}
