use crate::sentence::Sentence;
use std::time::SystemTime;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    InProgress,
    Completed,
}

/// How a single character of the target should be displayed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharState {
    Correct,
    Incorrect,
    Cursor,
    Pending,
}

/// The mutable record of one attempt at one sentence.
///
/// A new sentence always gets a fresh `SessionState`; nothing is carried
/// over. Fields are private so `cursor_pos` can never drift from `input`.
#[derive(Debug, Clone)]
pub struct SessionState {
    target: Sentence,
    input: String,
    pub(crate) cursor_pos: usize,
    pub(crate) started_at: Option<SystemTime>,
    pub(crate) finished_at: Option<SystemTime>,
    pub(crate) mistakes: usize,
    pub(crate) words_completed: usize,
}

impl SessionState {
    pub fn new(target: Sentence) -> Self {
        Self {
            target,
            input: String::new(),
            cursor_pos: 0,
            started_at: None,
            finished_at: None,
            mistakes: 0,
            words_completed: 0,
        }
    }

    pub fn target(&self) -> &Sentence {
        &self.target
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn cursor_pos(&self) -> usize {
        self.cursor_pos
    }

    pub fn started_at(&self) -> Option<SystemTime> {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<SystemTime> {
        self.finished_at
    }

    pub fn mistakes(&self) -> usize {
        self.mistakes
    }

    pub fn words_completed(&self) -> usize {
        self.words_completed
    }

    pub fn expected_char(&self) -> Option<char> {
        self.target.char_at(self.cursor_pos)
    }

    pub fn phase(&self) -> Phase {
        match (self.started_at, self.finished_at) {
            (_, Some(_)) => Phase::Completed,
            (Some(_), None) => Phase::InProgress,
            (None, None) => Phase::Idle,
        }
    }

    pub fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn has_finished(&self) -> bool {
        self.finished_at.is_some()
    }

    pub(crate) fn accept(&mut self, c: char) {
        self.input.push(c);
        self.cursor_pos += 1;
    }

    /// Display classification for every character of the target.
    pub fn char_states(&self) -> Vec<CharState> {
        let typed = self.input.chars().chain(std::iter::repeat('\0'));
        self.target
            .chars()
            .iter()
            .zip(typed)
            .enumerate()
            .map(|(idx, (&expected, typed))| {
                if idx < self.cursor_pos {
                    if typed == expected {
                        CharState::Correct
                    } else {
                        CharState::Incorrect
                    }
                } else if idx == self.cursor_pos {
                    CharState::Cursor
                } else {
                    CharState::Pending
                }
            })
            .collect()
    }
}
