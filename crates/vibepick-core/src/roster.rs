#![forbid(unsafe_code)]

//! Roster construction.
//!
//! A roster is the bounded, ordered participant set a round draws from.
//! Detection scans [`KNOWN_VIBERS`] for commands resolvable on PATH,
//! shuffles the survivors and normalizes the count to exactly 4 or 8,
//! padding with the alternating `lucky`/`handy` filler cycle or
//! down-sampling when the list overflows.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::debug;

use crate::participant::{FALLBACK_NAME, FILLERS, KNOWN_VIBERS, Participant};

/// Smallest roster a game will accept.
pub const ROSTER_MIN: usize = 4;
/// Largest roster a game will display.
pub const ROSTER_MAX: usize = 8;

/// Roster construction failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    /// No candidate command resolved on PATH. Recovered locally by
    /// substituting [`Roster::fallback`]; never shown to the user.
    #[error("no viber commands found on PATH")]
    NoCandidates,
    /// Fewer than four names were supplied explicitly. Fatal.
    #[error("need at least 4 participants, got {0}")]
    InsufficientParticipants(usize),
}

/// The fixed-size ordered participant list for one round.
///
/// Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    pub(crate) participants: Vec<Participant>,
    pub(crate) truncated: bool,
    pub(crate) extra_count: usize,
}

impl Roster {
    /// Roster used when detection finds nothing: four `handy` slots.
    pub fn fallback() -> Self {
        Self {
            participants: (0..ROSTER_MIN)
                .map(|_| Participant::from_trusted(FALLBACK_NAME))
                .collect(),
            truncated: false,
            extra_count: 0,
        }
    }

    /// Build a roster from explicitly supplied names (the CLI path).
    ///
    /// Names are trimmed and blanks dropped. Fewer than four surviving
    /// names is fatal; more than eight keeps the first eight and flags
    /// the truncation. No PATH filtering, shuffling or padding happens
    /// here — the user asked for exactly these names.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, RosterError> {
        let mut participants: Vec<Participant> = names
            .iter()
            .filter_map(|name| Participant::new(name.as_ref()))
            .collect();

        if participants.len() < ROSTER_MIN {
            return Err(RosterError::InsufficientParticipants(participants.len()));
        }

        let extra_count = participants.len().saturating_sub(ROSTER_MAX);
        participants.truncate(ROSTER_MAX);

        Ok(Self {
            participants,
            truncated: extra_count > 0,
            extra_count,
        })
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Participant> {
        self.participants.get(index)
    }

    /// Whether names were dropped because the source list overflowed.
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    /// How many names were dropped.
    pub fn extra_count(&self) -> usize {
        self.extra_count
    }

    /// True when every slot holds the same special fallback name.
    pub fn all_handy(&self) -> bool {
        self.participants.iter().all(|p| p.as_str() == FALLBACK_NAME)
    }
}

/// Builds rosters from candidate command names.
///
/// The probe decides PATH resolvability, keeping tests independent of the
/// host system; [`RosterBuilder::new`] wires in a real `which` lookup.
pub struct RosterBuilder<F> {
    probe: F,
    rng: StdRng,
}

impl RosterBuilder<fn(&str) -> bool> {
    /// Builder backed by a real PATH lookup.
    pub fn new() -> Self {
        Self {
            probe: |cmd| which::which(cmd).is_ok(),
            rng: StdRng::from_os_rng(),
        }
    }
}

impl Default for RosterBuilder<fn(&str) -> bool> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Fn(&str) -> bool> RosterBuilder<F> {
    /// Builder with a custom availability probe.
    pub fn with_probe(probe: F) -> Self {
        Self {
            probe,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic builder for tests.
    pub fn seeded(probe: F, seed: u64) -> Self {
        Self {
            probe,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Scan [`KNOWN_VIBERS`] and build a roster from whatever is installed.
    pub fn detect(&mut self) -> Result<Roster, RosterError> {
        self.build(&KNOWN_VIBERS)
    }

    /// Build a roster from `candidates`.
    ///
    /// Filters by the probe (preserving source order), shuffles, then
    /// normalizes the count: under four pads to four, five through seven
    /// pads to eight, over eight down-samples to eight. Exactly four or
    /// eight pass through unchanged. Padding draws from the alternating
    /// `lucky`/`handy` cycle.
    pub fn build(&mut self, candidates: &[&str]) -> Result<Roster, RosterError> {
        let mut found: Vec<Participant> = candidates
            .iter()
            .filter(|cmd| (self.probe)(cmd))
            .filter_map(|cmd| Participant::new(cmd))
            .collect();

        if found.is_empty() {
            return Err(RosterError::NoCandidates);
        }

        found.shuffle(&mut self.rng);

        let mut truncated = false;
        let mut extra_count = 0;

        if found.len() < ROSTER_MIN {
            pad_with_fillers(&mut found, ROSTER_MIN);
        } else if found.len() > ROSTER_MIN && found.len() < ROSTER_MAX {
            pad_with_fillers(&mut found, ROSTER_MAX);
        } else if found.len() > ROSTER_MAX {
            extra_count = found.len() - ROSTER_MAX;
            truncated = true;
            // Uniform down-sample: partial Fisher-Yates over the first
            // ROSTER_MAX positions, then drop the tail.
            for i in 0..ROSTER_MAX {
                let j = self.rng.random_range(i..found.len());
                found.swap(i, j);
            }
            found.truncate(ROSTER_MAX);
        }

        debug!(
            size = found.len(),
            truncated, extra_count, "roster built"
        );

        Ok(Roster {
            participants: found,
            truncated,
            extra_count,
        })
    }
}

fn pad_with_fillers(participants: &mut Vec<Participant>, target: usize) {
    let mut filler_index = 0;
    while participants.len() < target {
        participants.push(Participant::from_trusted(FILLERS[filler_index % 2]));
        filler_index += 1;
    }
}
