use crate::clock::{Clock, SystemClock};
use crate::dictionary::Dictionary;
use crate::input::{process_key, Key, Outcome};
use crate::metrics;
use crate::sentence::{GenerationError, LengthPolicy, SentenceGenerator};
use crate::session::SessionState;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Live numbers shown next to the sentence.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Snapshot {
    pub wpm: u32,
    pub accuracy: f64,
}

/// Owns the dictionary, the random source, and the current session.
///
/// The dictionary may arrive after construction; until it does there is no
/// session and keys are ignored.
#[derive(Debug)]
pub struct Game<R: Rng = StdRng, C: Clock = SystemClock> {
    dictionary: Option<Dictionary>,
    generator: SentenceGenerator,
    max_attempts: usize,
    rng: R,
    clock: C,
    session: Option<SessionState>,
}

impl Game {
    pub fn new(policy: LengthPolicy, max_attempts: usize, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self::with_parts(policy, max_attempts, rng, SystemClock)
    }
}

impl<R: Rng, C: Clock> Game<R, C> {
    pub fn with_parts(policy: LengthPolicy, max_attempts: usize, rng: R, clock: C) -> Self {
        Self {
            dictionary: None,
            generator: SentenceGenerator::new(policy),
            max_attempts: max_attempts.max(1),
            rng,
            clock,
            session: None,
        }
    }

    /// Installs the dictionary and starts the first session.
    pub fn set_dictionary(&mut self, dictionary: Dictionary) -> Result<(), GenerationError> {
        info!(
            "using dictionary '{}' with {} words",
            dictionary.name,
            dictionary.len()
        );
        self.dictionary = Some(dictionary);
        self.new_sentence()
    }

    pub fn dictionary(&self) -> Option<&Dictionary> {
        self.dictionary.as_ref()
    }

    pub fn is_ready(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&SessionState> {
        self.session.as_ref()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Replaces the current session with one for a freshly generated sentence.
    ///
    /// Transient generation failures are retried; the previous session is
    /// kept only if every attempt fails.
    pub fn new_sentence(&mut self) -> Result<(), GenerationError> {
        let Some(dictionary) = self.dictionary.as_ref() else {
            debug!("no dictionary yet, deferring sentence generation");
            return Ok(());
        };

        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.generator.generate(dictionary.words(), &mut self.rng) {
                Ok(sentence) => {
                    self.session = Some(SessionState::new(sentence));
                    return Ok(());
                }
                Err(e) if e.is_retryable() && attempt < self.max_attempts => {
                    debug!("generation attempt {attempt} failed: {e}");
                }
                Err(e) => {
                    warn!("sentence generation failed after {attempt} attempt(s): {e}");
                    return Err(e);
                }
            }
        }
    }

    pub fn handle_key(&mut self, key: &Key) -> Outcome {
        let now = self.clock.now();
        match self.session.as_mut() {
            Some(state) => process_key(state, key, now),
            None => Outcome::Ignored,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        match &self.session {
            Some(state) => Snapshot {
                wpm: metrics::wpm(state, self.clock.now()),
                accuracy: metrics::accuracy(state),
            },
            None => Snapshot {
                wpm: 0,
                accuracy: 100.0,
            },
        }
    }
}
