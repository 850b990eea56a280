#![forbid(unsafe_code)]

//! Wheel spin engine.
//!
//! The wheel advances a single highlight index one slot per tick. The
//! landing slot is chosen up front: the engine draws a whole number of
//! laps plus the offset to the target, so ticking the state down to zero
//! steps always leaves the highlight on the pre-chosen slot.
//!
//! Tick pacing is quadratic ease-out: 50 ms at the start, slowing toward
//! 300 ms as the remaining steps run out. The caller reads the delay off
//! the state after each tick and schedules the next one itself.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::debug;

use crate::participant::Participant;
use crate::roster::{ROSTER_MIN, Roster};

/// The six die faces shown while the wheel is spinning.
pub const DIE_FACES: [char; 6] = ['⚀', '⚁', '⚂', '⚃', '⚄', '⚅'];

/// Base delay between ticks, in seconds.
const DELAY_FLOOR: f64 = 0.05;
/// Additional delay at full deceleration, in seconds.
const DELAY_GAIN: f64 = 0.25;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpinError {
    #[error("need at least 4 participants to spin, got {0}")]
    InsufficientParticipants(usize),
}

/// Per-tick output of the wheel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpinEvent {
    /// The highlight advanced one slot; `face` is a decorative die face.
    Tick { face: char },
    /// The wheel landed. `winner` is the participant under the highlight.
    Finished { winner: Participant },
}

/// Mutable wheel state, advanced tick by tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpinState {
    current_index: usize,
    target_index: usize,
    steps_remaining: u32,
    initial_steps: u32,
    delay: Duration,
    spinning: bool,
}

impl SpinState {
    /// Idle state with the highlight on `start_index`.
    pub fn idle(start_index: usize) -> Self {
        Self {
            current_index: start_index,
            target_index: start_index,
            steps_remaining: 0,
            initial_steps: 0,
            delay: Duration::from_secs_f64(DELAY_FLOOR),
            spinning: false,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_spinning(&self) -> bool {
        self.spinning
    }

    /// Delay to wait before feeding the next tick.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

/// Drives [`SpinState`] transitions. Owns the randomness.
pub struct SpinEngine {
    rng: StdRng,
}

impl SpinEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic engine for tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Begin a spin. No-op while one is already running.
    ///
    /// Picks a uniform target slot, then walks 4–6 whole laps plus the
    /// offset from the current slot to the target, so the final tick lands
    /// exactly on the target.
    pub fn start(&mut self, state: &mut SpinState, roster: &Roster) -> Result<(), SpinError> {
        if state.spinning {
            return Ok(());
        }
        let n = roster.len();
        if n < ROSTER_MIN {
            return Err(SpinError::InsufficientParticipants(n));
        }

        state.current_index %= n;
        state.target_index = self.rng.random_range(0..n);
        let laps = self.rng.random_range(4..7) as u32;
        let offset = (state.target_index + n - state.current_index) % n;
        state.initial_steps = laps * n as u32 + offset as u32;
        state.steps_remaining = state.initial_steps;
        state.delay = Duration::from_secs_f64(DELAY_FLOOR);
        state.spinning = true;

        debug!(
            target_index = state.target_index,
            steps = state.initial_steps,
            "spin started"
        );
        Ok(())
    }

    /// Advance the wheel one slot. Returns `None` when the wheel is idle.
    pub fn tick(&mut self, state: &mut SpinState, roster: &Roster) -> Option<SpinEvent> {
        if !state.spinning || roster.is_empty() {
            return None;
        }
        let n = roster.len();
        state.current_index = (state.current_index + 1) % n;
        state.steps_remaining = state.steps_remaining.saturating_sub(1);

        if state.steps_remaining == 0 {
            state.spinning = false;
            let winner = roster.participants()[state.current_index].clone();
            debug!(winner = %winner, "spin finished");
            return Some(SpinEvent::Finished { winner });
        }

        let progress = 1.0 - f64::from(state.steps_remaining) / f64::from(state.initial_steps);
        state.delay = Duration::from_secs_f64(DELAY_FLOOR + progress * progress * DELAY_GAIN);

        let face = DIE_FACES[self.rng.random_range(0..DIE_FACES.len())];
        Some(SpinEvent::Tick { face })
    }
}

impl Default for SpinEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::Roster;

    fn roster(n: usize) -> Roster {
        let names: Vec<String> = (0..n).map(|i| format!("p{i}")).collect();
        Roster::from_names(&names).unwrap()
    }

    #[test]
    fn too_small_roster_is_rejected() {
        let small = Roster {
            participants: vec![Participant::new("a").unwrap(); 3],
            truncated: false,
            extra_count: 0,
        };
        let mut engine = SpinEngine::with_seed(1);
        let mut state = SpinState::idle(0);
        assert_eq!(
            engine.start(&mut state, &small),
            Err(SpinError::InsufficientParticipants(3))
        );
        assert!(!state.is_spinning());
    }

    #[test]
    fn lands_on_the_chosen_target() {
        for n in 4..=8 {
            for start in 0..n {
                let roster = roster(n);
                let mut engine = SpinEngine::with_seed(n as u64 * 31 + start as u64);
                let mut state = SpinState::idle(start);
                engine.start(&mut state, &roster).unwrap();
                let target = state.target_index;

                let winner = loop {
                    match engine.tick(&mut state, &roster) {
                        Some(SpinEvent::Tick { .. }) => {}
                        Some(SpinEvent::Finished { winner }) => break winner,
                        None => panic!("wheel went idle before finishing"),
                    }
                };

                assert_eq!(state.current_index(), target);
                assert_eq!(&winner, &roster.participants()[target]);
                assert!(!state.is_spinning());
            }
        }
    }

    #[test]
    fn step_budget_is_whole_laps_plus_offset() {
        let roster = roster(6);
        let mut engine = SpinEngine::with_seed(5);
        let mut state = SpinState::idle(2);
        engine.start(&mut state, &roster).unwrap();
        let offset = (state.target_index + 6 - 2) % 6;
        let laps = (state.initial_steps as usize - offset) / 6;
        assert_eq!(state.initial_steps as usize, laps * 6 + offset);
        assert!((4..7).contains(&laps));
    }

    #[test]
    fn restart_while_spinning_is_a_no_op() {
        let roster = roster(5);
        let mut engine = SpinEngine::with_seed(9);
        let mut state = SpinState::idle(0);
        engine.start(&mut state, &roster).unwrap();
        let snapshot = state.clone();
        engine.start(&mut state, &roster).unwrap();
        assert_eq!(state, snapshot);
    }

    #[test]
    fn ticking_an_idle_wheel_is_a_no_op() {
        let roster = roster(4);
        let mut engine = SpinEngine::with_seed(2);
        let mut state = SpinState::idle(1);
        assert_eq!(engine.tick(&mut state, &roster), None);
        assert_eq!(state.current_index(), 1);
    }

    #[test]
    fn delay_never_decreases_during_a_spin() {
        let roster = roster(8);
        let mut engine = SpinEngine::with_seed(3);
        let mut state = SpinState::idle(0);
        engine.start(&mut state, &roster).unwrap();
        let mut last = state.delay();
        while let Some(SpinEvent::Tick { .. }) = engine.tick(&mut state, &roster) {
            assert!(state.delay() >= last);
            last = state.delay();
        }
        assert!(last >= Duration::from_secs_f64(DELAY_FLOOR));
        assert!(last <= Duration::from_secs_f64(DELAY_FLOOR + DELAY_GAIN));
    }
}
