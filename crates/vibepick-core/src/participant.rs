#![forbid(unsafe_code)]

//! Participant identity and winner classification.

use std::fmt;

/// Commands worth scanning for at startup. Add more here, PRs welcome.
pub const KNOWN_VIBERS: [&str; 8] = [
    "kimi", "claude", "gemini", "codex", "code", "cursor", "amp", "opencode",
];

/// Display-only sentinels used to pad a roster. Never dispatched.
pub const SPECIAL_PARTICIPANTS: [&str; 2] = ["lucky", "handy"];

/// Alternating filler cycle used when a roster is short.
pub(crate) const FILLERS: [&str; 2] = ["lucky", "handy"];

/// Name used for every slot of the fallback roster.
pub const FALLBACK_NAME: &str = "handy";

/// A candidate identifier that can become a round's winner.
///
/// Always non-empty and trimmed; equality is plain string equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Participant(String);

impl Participant {
    /// Build a participant from raw input, trimming surrounding whitespace.
    ///
    /// Returns `None` when nothing but whitespace remains.
    pub fn new(name: &str) -> Option<Self> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Constructor for compile-time known names (fillers, fallback).
    pub(crate) fn from_trusted(name: &str) -> Self {
        Self(name.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this participant is in the fixed special set
    /// (`lucky`, `handy`). Special participants are never executed.
    pub fn is_special(&self) -> bool {
        SPECIAL_PARTICIPANTS.contains(&self.0.as_str())
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Participant {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// How a winner was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Ordinary wheel or flip-card winner.
    Normal,
    /// All three slot reels agreed.
    Jackpot,
    /// Exactly two slot reels agreed.
    Pair,
    /// All three slot reels differed; no dispatchable value.
    NoMatch,
    /// The value is a display-only sentinel (`lucky`, `handy`).
    Special,
}

/// A resolved winner together with how it was won.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinnerResult {
    pub value: Participant,
    pub classification: Classification,
}

impl WinnerResult {
    /// Pair a value with its classification. Special values always
    /// classify as [`Classification::Special`] regardless of the game
    /// that produced them.
    pub fn new(value: Participant, classification: Classification) -> Self {
        let classification = if value.is_special() {
            Classification::Special
        } else {
            classification
        };
        Self {
            value,
            classification,
        }
    }

    /// Whether this winner may be handed to the dispatcher.
    pub fn dispatchable(&self) -> bool {
        !matches!(
            self.classification,
            Classification::Special | Classification::NoMatch
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_rejects_empty() {
        assert_eq!(Participant::new("  claude \n").unwrap().as_str(), "claude");
        assert!(Participant::new("   ").is_none());
        assert!(Participant::new("").is_none());
    }

    #[test]
    fn special_set() {
        assert!(Participant::new("lucky").unwrap().is_special());
        assert!(Participant::new("handy").unwrap().is_special());
        assert!(!Participant::new("claude").unwrap().is_special());
    }

    #[test]
    fn special_value_overrides_classification() {
        let w = WinnerResult::new(
            Participant::new("lucky").unwrap(),
            Classification::Jackpot,
        );
        assert_eq!(w.classification, Classification::Special);
        assert!(!w.dispatchable());

        let w = WinnerResult::new(
            Participant::new("codex").unwrap(),
            Classification::Jackpot,
        );
        assert_eq!(w.classification, Classification::Jackpot);
        assert!(w.dispatchable());
    }
}
