use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("dictionary has no words")]
    EmptyDictionary,

    #[error("no word fits after {len} characters")]
    NoCandidate { len: usize },

    #[error("sentence grew to {len} characters, over the limit of {max}")]
    Overshoot { len: usize, max: usize },

    #[error("invalid length policy: {0}")]
    InvalidPolicy(String),
}

impl GenerationError {
    /// Whether another attempt with fresh random picks may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::NoCandidate { .. } | Self::Overshoot { .. })
    }
}

/// Length bounds for generated sentences, in characters.
///
/// Words are drawn freely until the sentence reaches `restrict_at`; from then
/// on only words that keep it within `max` are eligible. Generation stops once
/// the length reaches `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthPolicy {
    pub restrict_at: usize,
    pub target: usize,
    pub max: usize,
}

impl Default for LengthPolicy {
    fn default() -> Self {
        Self {
            restrict_at: 110,
            target: 115,
            max: 125,
        }
    }
}

impl LengthPolicy {
    pub fn new(restrict_at: usize, target: usize, max: usize) -> Result<Self, GenerationError> {
        let policy = Self {
            restrict_at,
            target,
            max,
        };
        policy.validate()?;
        Ok(policy)
    }

    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.target == 0 {
            return Err(GenerationError::InvalidPolicy(
                "target must be positive".to_string(),
            ));
        }
        if self.restrict_at > self.target || self.target > self.max {
            return Err(GenerationError::InvalidPolicy(format!(
                "expected restrict_at <= target <= max, got {} / {} / {}",
                self.restrict_at, self.target, self.max
            )));
        }
        Ok(())
    }
}

/// A practice sentence: words joined by single spaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    text: String,
    chars: Vec<char>,
}

impl Sentence {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let chars = text.chars().collect();
        Self { text, chars }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn char_at(&self, idx: usize) -> Option<char> {
        self.chars.get(idx).copied()
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.text.split(' ')
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Builds sentences from a word list under a [`LengthPolicy`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SentenceGenerator {
    policy: LengthPolicy,
}

impl SentenceGenerator {
    pub fn new(policy: LengthPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &LengthPolicy {
        &self.policy
    }

    pub fn generate<R: Rng + ?Sized>(
        &self,
        words: &[String],
        rng: &mut R,
    ) -> Result<Sentence, GenerationError> {
        generate(words, &self.policy, rng)
    }
}

pub fn generate<R: Rng + ?Sized>(
    words: &[String],
    policy: &LengthPolicy,
    rng: &mut R,
) -> Result<Sentence, GenerationError> {
    policy.validate()?;

    // empty strings would never grow the sentence
    let candidates: Vec<(&str, usize)> = words
        .iter()
        .filter(|w| !w.is_empty())
        .map(|w| (w.as_str(), w.chars().count()))
        .collect();
    if candidates.is_empty() {
        return Err(GenerationError::EmptyDictionary);
    }

    let mut text = String::new();
    let mut len = 0;

    while len < policy.target {
        let sep = usize::from(len > 0);
        let (word, word_len) = if len >= policy.restrict_at {
            let fitting: Vec<(&str, usize)> = candidates
                .iter()
                .copied()
                .filter(|&(_, wl)| len + sep + wl <= policy.max)
                .collect();
            *fitting
                .choose(rng)
                .ok_or(GenerationError::NoCandidate { len })?
        } else {
            *candidates
                .choose(rng)
                .ok_or(GenerationError::EmptyDictionary)?
        };

        if sep == 1 {
            text.push(' ');
        }
        text.push_str(word);
        len += sep + word_len;
    }

    if len > policy.max {
        return Err(GenerationError::Overshoot {
            len,
            max: policy.max,
        });
    }

    debug!("generated sentence of {len} characters");
    Ok(Sentence::new(text))
}
