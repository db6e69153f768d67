//! Retreat catalog module
//!
//! Static in-memory catalog of curated retreat experiences and marketplace
//! add-ons, plus the duration/theme filtering layer. Records are immutable
//! once constructed and live for the lifetime of the process.

pub mod data;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::utils::errors::ConciergeError;

pub use data::{addons, events, find_addon, find_event};

/// Retreat duration class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Duration {
    MicroRetreat,
    MacroRetreat,
}

impl Duration {
    pub fn as_str(&self) -> &'static str {
        match self {
            Duration::MicroRetreat => "micro-retreat",
            Duration::MacroRetreat => "macro-retreat",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Duration::MicroRetreat => "Micro",
            Duration::MacroRetreat => "Macro",
        }
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Duration {
    type Err = ConciergeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "micro-retreat" | "micro" => Ok(Duration::MicroRetreat),
            "macro-retreat" | "macro" => Ok(Duration::MacroRetreat),
            other => Err(ConciergeError::InvalidInput(format!(
                "Unknown duration: {}",
                other
            ))),
        }
    }
}

/// Marker position on the 2-D map canvas, as percentages of the container
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub x: f32,
    pub y: f32,
}

/// A purchasable retreat experience
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub theme: String,
    pub location: String,
    pub duration: Duration,
    /// Free-text duration label, e.g. "10 Days"
    pub days: String,
    /// Whole USD
    pub price: u32,
    pub thumbnail: String,
    pub poster_url: String,
    pub description: String,
    pub coordinates: Coordinates,
}

/// A purchasable supplementary item unrelated to a specific event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddOn {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: u32,
    pub icon: String,
}

/// Duration selector: `All` is always-true
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DurationFilter {
    #[default]
    All,
    Only(Duration),
}

/// Theme selector: `All` is always-true
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ThemeFilter {
    #[default]
    All,
    Theme(String),
}

/// The two independent filter selectors; the visible set is the logical AND
/// of both predicates, original catalog order retained among matches.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CatalogFilter {
    pub duration: DurationFilter,
    pub theme: ThemeFilter,
}

impl CatalogFilter {
    pub fn matches(&self, event: &Event) -> bool {
        let duration_match = match self.duration {
            DurationFilter::All => true,
            DurationFilter::Only(duration) => event.duration == duration,
        };
        let theme_match = match &self.theme {
            ThemeFilter::All => true,
            ThemeFilter::Theme(theme) => &event.theme == theme,
        };
        duration_match && theme_match
    }

    pub fn apply<'a>(&self, catalog: &'a [Event]) -> Vec<&'a Event> {
        catalog.iter().filter(|e| self.matches(e)).collect()
    }

    pub fn is_unfiltered(&self) -> bool {
        self.duration == DurationFilter::All && self.theme == ThemeFilter::All
    }
}

/// Distinct themes in first-occurrence order
pub fn themes(catalog: &[Event]) -> Vec<String> {
    let mut seen = Vec::new();
    for event in catalog {
        if !seen.contains(&event.theme) {
            seen.push(event.theme.clone());
        }
    }
    seen
}
