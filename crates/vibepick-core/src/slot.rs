#![forbid(unsafe_code)]

//! Three-reel slot machine engine.
//!
//! Each reel steps through the shared item list on its own schedule and
//! snaps to a pre-chosen target when its step budget runs out. Budgets are
//! staggered (`[30, 50)` plus twenty per reel index) so the reels stop left
//! to right. Once the third reel stops the results classify as jackpot
//! (all equal), pair (exactly one value twice) or no match.
//!
//! The reel count is an architectural constant: the pair rule is only
//! well-defined for three reels.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::debug;

use crate::participant::Participant;

/// Number of reels. Fixed; the classification rules assume three.
pub const REEL_COUNT: usize = 3;

/// Base delay between reel ticks, in seconds.
const DELAY_FLOOR: f64 = 0.03;
/// Additional delay at full deceleration, in seconds.
const DELAY_GAIN: f64 = 0.15;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlotError {
    #[error("slot machine needs at least one item")]
    NoItems,
}

/// Outcome of a completed slot round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// All three reels agree.
    Jackpot(Participant),
    /// Exactly one value appears twice.
    Pair(Participant),
    /// All three values are distinct; nothing to dispatch.
    NoMatch,
}

impl Outcome {
    /// The dispatchable winner, when the round produced one.
    pub fn winner(&self) -> Option<&Participant> {
        match self {
            Self::Jackpot(p) | Self::Pair(p) => Some(p),
            Self::NoMatch => None,
        }
    }
}

/// Events emitted while ticking a reel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotEvent {
    /// A reel advanced one item.
    ReelTick { reel: usize, value: Participant },
    /// A reel snapped to its target and stopped.
    ReelStopped { reel: usize, value: Participant },
    /// The third reel stopped; the round is classified.
    AllStopped {
        results: [Participant; REEL_COUNT],
        outcome: Outcome,
    },
}

/// One reel's progress through a spin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReelState {
    current_index: usize,
    target_index: usize,
    step_count: u32,
    total_steps: u32,
    spinning: bool,
}

impl ReelState {
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_spinning(&self) -> bool {
        self.spinning
    }

    /// Delay before this reel's next tick: quadratic ease-out from 30 ms
    /// toward 180 ms as the step budget is consumed.
    pub fn delay(&self) -> Duration {
        let progress = if self.total_steps == 0 {
            1.0
        } else {
            f64::from(self.step_count) / f64::from(self.total_steps)
        };
        Duration::from_secs_f64(DELAY_FLOOR + progress * progress * DELAY_GAIN)
    }
}

/// The complete machine: three reels over one shared item list.
pub struct SlotMachine {
    rng: StdRng,
    items: Vec<Participant>,
    reels: [ReelState; REEL_COUNT],
    stopped_count: usize,
    results: [Option<Participant>; REEL_COUNT],
}

impl SlotMachine {
    pub fn new(items: Vec<Participant>) -> Result<Self, SlotError> {
        Self::build(items, StdRng::from_os_rng())
    }

    /// Deterministic machine for tests.
    pub fn with_seed(items: Vec<Participant>, seed: u64) -> Result<Self, SlotError> {
        Self::build(items, StdRng::seed_from_u64(seed))
    }

    fn build(items: Vec<Participant>, mut rng: StdRng) -> Result<Self, SlotError> {
        if items.is_empty() {
            return Err(SlotError::NoItems);
        }
        let reels = std::array::from_fn(|_| ReelState {
            current_index: rng.random_range(0..items.len()),
            target_index: 0,
            step_count: 0,
            total_steps: 0,
            spinning: false,
        });
        Ok(Self {
            rng,
            items,
            reels,
            stopped_count: 0,
            results: std::array::from_fn(|_| None),
        })
    }

    pub fn items(&self) -> &[Participant] {
        &self.items
    }

    pub fn reel(&self, reel: usize) -> Option<&ReelState> {
        self.reels.get(reel)
    }

    /// The item currently under a reel's payline.
    pub fn reel_value(&self, reel: usize) -> Option<&Participant> {
        self.reels
            .get(reel)
            .and_then(|r| self.items.get(r.current_index))
    }

    pub fn is_spinning(&self) -> bool {
        self.reels.iter().any(ReelState::is_spinning)
    }

    /// Final values once all reels have stopped, in reel order.
    pub fn results(&self) -> Option<[&Participant; REEL_COUNT]> {
        match &self.results {
            [Some(a), Some(b), Some(c)] => Some([a, b, c]),
            _ => None,
        }
    }

    /// Start all three reels with staggered step budgets.
    ///
    /// Returns `false` (leaving every reel untouched) while any reel is
    /// still spinning.
    pub fn start_spin(&mut self) -> bool {
        if self.is_spinning() {
            return false;
        }
        self.stopped_count = 0;
        self.results = std::array::from_fn(|_| None);
        for (i, reel) in self.reels.iter_mut().enumerate() {
            reel.target_index = self.rng.random_range(0..self.items.len());
            reel.total_steps = self.rng.random_range(30..50) + i as u32 * 20;
            reel.step_count = 0;
            reel.spinning = true;
        }
        debug!(
            totals = ?self.reels.iter().map(|r| r.total_steps).collect::<Vec<_>>(),
            "slot spin started"
        );
        true
    }

    /// Advance one reel by one step.
    ///
    /// Returns nothing for an idle or out-of-range reel. A stopping reel
    /// yields `ReelStopped`, plus `AllStopped` when it was the last one.
    pub fn tick_reel(&mut self, reel: usize) -> Vec<SlotEvent> {
        let Some(state) = self.reels.get_mut(reel) else {
            return Vec::new();
        };
        if !state.spinning {
            return Vec::new();
        }

        state.step_count += 1;
        state.current_index = (state.current_index + 1) % self.items.len();

        if state.step_count < state.total_steps {
            let value = self.items[state.current_index].clone();
            return vec![SlotEvent::ReelTick { reel, value }];
        }

        state.spinning = false;
        state.current_index = state.target_index;
        let value = self.items[state.target_index].clone();
        self.results[reel] = Some(value.clone());
        self.stopped_count += 1;
        debug!(reel, value = %value, "reel stopped");

        let mut events = vec![SlotEvent::ReelStopped { reel, value }];
        if self.stopped_count == REEL_COUNT {
            if let [Some(a), Some(b), Some(c)] = &self.results {
                let results = [a.clone(), b.clone(), c.clone()];
                let outcome = classify(&results);
                debug!(?outcome, "all reels stopped");
                events.push(SlotEvent::AllStopped { results, outcome });
            }
        }
        events
    }
}

/// Classify a completed round.
///
/// With three values, "exactly one value occurs exactly twice" uniquely
/// identifies the pair, so no tie-break is needed.
pub fn classify(results: &[Participant; REEL_COUNT]) -> Outcome {
    let [a, b, c] = results;
    if a == b && b == c {
        Outcome::Jackpot(a.clone())
    } else if a == b || a == c {
        Outcome::Pair(a.clone())
    } else if b == c {
        Outcome::Pair(b.clone())
    } else {
        Outcome::NoMatch
    }
}
