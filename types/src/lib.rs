//! Core domain types for billet.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory

mod content;
mod ui;

pub use content::{
    CAROUSEL_ADVANCE_LABEL, CAROUSEL_FINAL_LABEL, EVADER_LABEL, EVADER_TAUNTS,
    REASON_SLIDE_COUNT, ReasonSlide, YES_LABEL, reason_slides,
};
pub use ui::UiOptions;

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use thiserror::Error;

// ============================================================================
// Deck positions and classification
// ============================================================================

/// Direction of a page turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnDirection {
    Next,
    Prev,
}

/// A page's position relative to the deck's current index.
///
/// Exactly one page is `Active` at any time; everything below the current
/// index is `Flipped`, everything above is `Upcoming`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Active,
    Flipped,
    Upcoming,
}

impl Classification {
    /// Classify the page at `position` against the deck's `current` index.
    #[must_use]
    pub fn of(position: usize, current: usize) -> Self {
        match position.cmp(&current) {
            Ordering::Equal => Classification::Active,
            Ordering::Less => Classification::Flipped,
            Ordering::Greater => Classification::Upcoming,
        }
    }

    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, Classification::Active)
    }
}

/// The five pages of the card, in deck order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Cover,
    Letter,
    Reasons,
    Question,
    Finale,
}

impl PageKind {
    /// Deck order. Position in this array is the page's index.
    pub const ALL: [PageKind; 5] = [
        PageKind::Cover,
        PageKind::Letter,
        PageKind::Reasons,
        PageKind::Question,
        PageKind::Finale,
    ];

    #[must_use]
    pub fn position(self) -> usize {
        Self::ALL
            .iter()
            .position(|kind| *kind == self)
            .unwrap_or_default()
    }

    /// Whether this page hosts the reason carousel (arrow keys route there).
    #[must_use]
    pub fn hosts_carousel(self) -> bool {
        matches!(self, PageKind::Reasons)
    }
}

// ============================================================================
// Recipient
// ============================================================================

/// The card's addressee, guaranteed non-empty (after trimming).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Recipient(String);

#[derive(Debug, Error)]
#[error("recipient must not be empty")]
pub struct EmptyRecipientError;

impl Recipient {
    pub fn new(value: impl Into<String>) -> Result<Self, EmptyRecipientError> {
        let value = value.into();
        if value.trim().is_empty() {
            Err(EmptyRecipientError)
        } else {
            Ok(Self(value))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Recipient {
    fn default() -> Self {
        Self("my favorite person".to_string())
    }
}

impl TryFrom<String> for Recipient {
    type Error = EmptyRecipientError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Recipient> for String {
    fn from(value: Recipient) -> Self {
        value.0
    }
}

impl std::fmt::Display for Recipient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{Classification, PageKind, Recipient};

    #[test]
    fn classification_partitions_around_current() {
        assert_eq!(Classification::of(2, 2), Classification::Active);
        assert_eq!(Classification::of(0, 2), Classification::Flipped);
        assert_eq!(Classification::of(4, 2), Classification::Upcoming);
    }

    #[test]
    fn page_positions_follow_deck_order() {
        for (index, kind) in PageKind::ALL.iter().enumerate() {
            assert_eq!(kind.position(), index);
        }
    }

    #[test]
    fn only_reasons_page_hosts_carousel() {
        let hosts: Vec<_> = PageKind::ALL
            .iter()
            .filter(|kind| kind.hosts_carousel())
            .collect();
        assert_eq!(hosts, vec![&PageKind::Reasons]);
    }

    #[test]
    fn recipient_rejects_blank_input() {
        assert!(Recipient::new("   ").is_err());
        assert_eq!(Recipient::new("Sam").unwrap().as_str(), "Sam");
    }
}
