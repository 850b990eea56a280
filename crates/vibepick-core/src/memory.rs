#![forbid(unsafe_code)]

//! Memory-match engine: a 4×4 grid of face-down cards, eight values with
//! two cards each.
//!
//! At most two cards are ever face-up and unmatched. If a third card is
//! flipped while a mismatched pair is still showing, the pair is turned
//! face-down immediately rather than waiting for the usual delay; the
//! delayed turn-down itself is the caller's job (schedule
//! [`MatchSession::unflip_pending`] about a second after a
//! [`FlipOutcome::Mismatch`], cancelling it if a new flip preempts it).

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;

use crate::participant::Participant;

/// Distinct values on the board.
pub const PAIR_VALUES: usize = 8;
/// Total cards: each value appears twice.
pub const CARD_COUNT: usize = PAIR_VALUES * 2;

/// One card on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    value: Participant,
    flipped: bool,
    matched: bool,
}

impl Card {
    pub fn value(&self) -> &Participant {
        &self.value
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn is_matched(&self) -> bool {
        self.matched
    }
}

/// What a flip did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlipOutcome {
    /// Matched, already face-up, or out of range: nothing changed.
    Ignored,
    /// First card of a pair turned face-up.
    Flipped,
    /// Second card turned face-up and the values differ. The caller
    /// should schedule [`MatchSession::unflip_pending`].
    Mismatch,
    /// Second card matched the first; both stay face-up for good.
    PairMatched { value: Participant },
    /// The final pair matched; the board is complete.
    AllMatched { winner: Participant },
}

/// One game of memory-match.
pub struct MatchSession {
    rng: StdRng,
    cards: Vec<Card>,
    flipped: Vec<usize>,
    matched_count: usize,
}

impl MatchSession {
    /// Deal a fresh shuffled board from eight values.
    pub fn new(values: [Participant; PAIR_VALUES]) -> Self {
        Self::build(values, StdRng::from_os_rng())
    }

    /// Deterministic session for tests.
    pub fn with_seed(values: [Participant; PAIR_VALUES], seed: u64) -> Self {
        Self::build(values, StdRng::seed_from_u64(seed))
    }

    fn build(values: [Participant; PAIR_VALUES], mut rng: StdRng) -> Self {
        let mut deck: Vec<Participant> = values.iter().chain(values.iter()).cloned().collect();
        deck.shuffle(&mut rng);
        let cards = deck
            .into_iter()
            .map(|value| Card {
                value,
                flipped: false,
                matched: false,
            })
            .collect();
        Self {
            rng,
            cards,
            flipped: Vec::with_capacity(2),
            matched_count: 0,
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, card_id: usize) -> Option<&Card> {
        self.cards.get(card_id)
    }

    pub fn matched_count(&self) -> usize {
        self.matched_count
    }

    /// Indices of face-up, unmatched cards. Never more than two.
    pub fn flipped_buffer(&self) -> &[usize] {
        &self.flipped
    }

    pub fn is_complete(&self) -> bool {
        self.matched_count == self.cards.len()
    }

    /// Flip a card face-up and evaluate the pair when two are showing.
    pub fn flip(&mut self, card_id: usize) -> FlipOutcome {
        let Some(card) = self.cards.get(card_id) else {
            return FlipOutcome::Ignored;
        };
        if card.matched || card.flipped {
            return FlipOutcome::Ignored;
        }

        // A mismatched pair still on display gets turned down right away;
        // this is what keeps the buffer at two cards under rapid clicking.
        if self.flipped.len() >= 2 {
            self.unflip_pending();
        }

        self.cards[card_id].flipped = true;
        self.flipped.push(card_id);

        if self.flipped.len() < 2 {
            return FlipOutcome::Flipped;
        }

        let (first, second) = (self.flipped[0], self.flipped[1]);
        if self.cards[first].value != self.cards[second].value {
            return FlipOutcome::Mismatch;
        }

        self.cards[first].matched = true;
        self.cards[second].matched = true;
        self.matched_count += 2;
        self.flipped.clear();
        let value = self.cards[first].value.clone();
        debug!(value = %value, matched = self.matched_count, "pair matched");

        if self.is_complete() {
            FlipOutcome::AllMatched { winner: value }
        } else {
            FlipOutcome::PairMatched { value }
        }
    }

    /// Turn any face-up, unmatched cards back down.
    pub fn unflip_pending(&mut self) {
        for card_id in self.flipped.drain(..) {
            if let Some(card) = self.cards.get_mut(card_id) {
                if !card.matched {
                    card.flipped = false;
                }
            }
        }
    }

    /// Reshuffle the same values in place and clear all flip/match state.
    pub fn reset(&mut self) {
        let mut deck: Vec<Participant> =
            self.cards.iter().map(|card| card.value.clone()).collect();
        deck.shuffle(&mut self.rng);
        for (card, value) in self.cards.iter_mut().zip(deck) {
            card.value = value;
            card.flipped = false;
            card.matched = false;
        }
        self.flipped.clear();
        self.matched_count = 0;
        debug!("board reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn values() -> [Participant; PAIR_VALUES] {
        ["kimi", "claude", "gemini", "codex", "code", "cursor", "amp", "opencode"]
            .map(|n| Participant::new(n).unwrap())
    }

    /// Map from value to its two card positions.
    fn pairs(session: &MatchSession) -> Vec<(usize, usize)> {
        let mut seen: HashMap<&str, usize> = HashMap::new();
        let mut out = Vec::new();
        for (i, card) in session.cards().iter().enumerate() {
            match seen.remove(card.value().as_str()) {
                Some(first) => out.push((first, i)),
                None => {
                    seen.insert(card.value().as_str(), i);
                }
            }
        }
        out
    }

    #[test]
    fn deck_holds_every_value_twice() {
        let session = MatchSession::with_seed(values(), 1);
        assert_eq!(session.cards().len(), CARD_COUNT);
        assert_eq!(pairs(&session).len(), PAIR_VALUES);
    }

    #[test]
    fn matching_all_pairs_completes_exactly_once() {
        let mut session = MatchSession::with_seed(values(), 2);
        let pairs = pairs(&session);
        let mut all_matched = 0;
        for (i, (a, b)) in pairs.iter().enumerate() {
            assert_eq!(session.flip(*a), FlipOutcome::Flipped);
            match session.flip(*b) {
                FlipOutcome::PairMatched { .. } => assert!(i < pairs.len() - 1),
                FlipOutcome::AllMatched { winner } => {
                    all_matched += 1;
                    assert_eq!(&winner, session.card(*a).unwrap().value());
                }
                other => panic!("unexpected outcome {other:?}"),
            }
        }
        assert_eq!(all_matched, 1);
        assert_eq!(session.matched_count(), CARD_COUNT);
        assert!(session.is_complete());
        // Nothing left to flip.
        for id in 0..CARD_COUNT {
            assert_eq!(session.flip(id), FlipOutcome::Ignored);
        }
    }

    #[test]
    fn mismatch_waits_and_third_flip_preempts() {
        let mut session = MatchSession::with_seed(values(), 3);
        let pairs = pairs(&session);
        let (a, _) = pairs[0];
        let (b, b2) = pairs[1];
        assert_eq!(session.flip(a), FlipOutcome::Flipped);
        assert_eq!(session.flip(b), FlipOutcome::Mismatch);
        assert_eq!(session.flipped_buffer(), &[a, b]);

        // Third flip turns the stale pair down before flipping.
        assert_eq!(session.flip(b2), FlipOutcome::Flipped);
        assert_eq!(session.flipped_buffer(), &[b2]);
        assert!(!session.card(a).unwrap().is_flipped());
        assert!(!session.card(b).unwrap().is_flipped());

        // Completing the pair still works.
        assert!(matches!(
            session.flip(b),
            FlipOutcome::PairMatched { .. }
        ));
        assert_eq!(session.matched_count(), 2);
    }

    #[test]
    fn redundant_flips_are_ignored() {
        let mut session = MatchSession::with_seed(values(), 4);
        let (a, b) = pairs(&session)[0];
        assert_eq!(session.flip(a), FlipOutcome::Flipped);
        assert_eq!(session.flip(a), FlipOutcome::Ignored);
        assert_eq!(session.flip(CARD_COUNT + 5), FlipOutcome::Ignored);
        assert!(matches!(session.flip(b), FlipOutcome::PairMatched { .. }));
        assert_eq!(session.flip(a), FlipOutcome::Ignored);
        assert_eq!(session.flip(b), FlipOutcome::Ignored);
    }

    #[test]
    fn unflip_only_touches_unmatched_cards() {
        let mut session = MatchSession::with_seed(values(), 5);
        let pairs = pairs(&session);
        let (a, b) = pairs[0];
        session.flip(a);
        session.flip(b);
        session.unflip_pending();
        assert!(session.card(a).unwrap().is_matched());
        assert!(session.card(a).unwrap().is_flipped());

        let (c, _) = pairs[1];
        let (d, _) = pairs[2];
        session.flip(c);
        session.flip(d);
        session.unflip_pending();
        assert!(!session.card(c).unwrap().is_flipped());
        assert!(session.flipped_buffer().is_empty());
    }

    #[test]
    fn reset_clears_state_and_keeps_the_value_multiset() {
        let mut session = MatchSession::with_seed(values(), 6);
        let (a, b) = pairs(&session)[0];
        session.flip(a);
        session.flip(b);
        session.reset();
        assert_eq!(session.matched_count(), 0);
        assert!(session.flipped_buffer().is_empty());
        assert!(session.cards().iter().all(|c| !c.is_flipped() && !c.is_matched()));
        assert_eq!(pairs(&session).len(), PAIR_VALUES);
    }
}
