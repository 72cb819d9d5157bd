use crate::session::SessionState;
use log::debug;
use std::time::SystemTime;

/// A logical key as delivered by the keystroke source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    /// Modifiers and other keys that produce no character, e.g. "Shift".
    Named(String),
}

impl Key {
    /// Maps a key name to a `Key`: a single character is a `Char`,
    /// anything longer is `Named`.
    pub fn from_name(name: &str) -> Self {
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Key::Char(c),
            _ => Key::Named(name.to_string()),
        }
    }

    /// The character this key types, if it types one.
    pub fn printable(&self) -> Option<char> {
        match self {
            Key::Char(c) if !c.is_control() => Some(*c),
            _ => None,
        }
    }
}

impl From<char> for Key {
    fn from(c: char) -> Self {
        Key::Char(c)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
    Ignored,
}

/// Applies one keystroke to the session.
///
/// A matching character is appended and advances the cursor; a mismatch
/// only counts a mistake. The clock starts on the first character key either
/// way. Non-character keys and any key after completion change nothing.
pub fn process_key(state: &mut SessionState, key: &Key, now: SystemTime) -> Outcome {
    if state.has_finished() {
        return Outcome::Ignored;
    }
    let Some(c) = key.printable() else {
        return Outcome::Ignored;
    };
    let Some(expected) = state.expected_char() else {
        return Outcome::Ignored;
    };

    let outcome = if c == expected {
        state.accept(c);
        if c == ' ' {
            state.words_completed += 1;
        }
        if state.cursor_pos == state.target().len() && state.finished_at.is_none() {
            state.finished_at = Some(now);
        }
        Outcome::Correct
    } else {
        state.mistakes += 1;
        debug!("expected {expected:?}, got {c:?}");
        Outcome::Incorrect
    };

    if state.started_at.is_none() {
        state.started_at = Some(now);
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentence::Sentence;
    use crate::session::Phase;
    use std::time::Duration;

    fn at(secs: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
    }

    #[test]
    fn test_key_from_name() {
        assert_eq!(Key::from_name("a"), Key::Char('a'));
        assert_eq!(Key::from_name(" "), Key::Char(' '));
        assert_eq!(Key::from_name("é"), Key::Char('é'));
        assert_eq!(Key::from_name("Shift"), Key::Named("Shift".into()));
        assert_eq!(Key::from_name(""), Key::Named(String::new()));
    }

    #[test]
    fn test_printable() {
        assert_eq!(Key::Char('x').printable(), Some('x'));
        assert_eq!(Key::Char('\t').printable(), None);
        assert_eq!(Key::Named("Control".into()).printable(), None);
    }

    #[test]
    fn test_correct_key_advances() {
        let mut state = SessionState::new(Sentence::new("test"));
        let outcome = process_key(&mut state, &Key::Char('t'), at(1));

        assert_eq!(outcome, Outcome::Correct);
        assert_eq!(state.cursor_pos(), 1);
        assert_eq!(state.input(), "t");
        assert_eq!(state.started_at(), Some(at(1)));
        assert_eq!(state.phase(), Phase::InProgress);
    }

    #[test]
    fn test_wrong_key_counts_mistake_without_advancing() {
        let mut state = SessionState::new(Sentence::new("test"));
        let outcome = process_key(&mut state, &Key::Char('x'), at(1));

        assert_eq!(outcome, Outcome::Incorrect);
        assert_eq!(state.cursor_pos(), 0);
        assert_eq!(state.input(), "");
        assert_eq!(state.mistakes(), 1);
        // the clock starts on a mistake too
        assert_eq!(state.started_at(), Some(at(1)));
    }

    #[test]
    fn test_named_key_is_ignored() {
        let mut state = SessionState::new(Sentence::new("test"));
        let outcome = process_key(&mut state, &Key::Named("Shift".into()), at(1));

        assert_eq!(outcome, Outcome::Ignored);
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.mistakes(), 0);
    }

    #[test]
    fn test_control_char_is_ignored() {
        let mut state = SessionState::new(Sentence::new("test"));
        assert_eq!(process_key(&mut state, &Key::Char('\u{8}'), at(1)), Outcome::Ignored);
        assert!(!state.has_started());
    }

    #[test]
    fn test_start_time_is_not_reset() {
        let mut state = SessionState::new(Sentence::new("ab"));
        process_key(&mut state, &'a'.into(), at(1));
        process_key(&mut state, &'z'.into(), at(2));
        assert_eq!(state.started_at(), Some(at(1)));
    }

    #[test]
    fn test_mistype_scenario() {
        let mut state = SessionState::new(Sentence::new("ab"));

        process_key(&mut state, &'a'.into(), at(0));
        assert_eq!((state.cursor_pos(), state.mistakes()), (1, 0));

        process_key(&mut state, &'x'.into(), at(1));
        assert_eq!((state.cursor_pos(), state.mistakes()), (1, 1));

        process_key(&mut state, &'b'.into(), at(2));
        assert_eq!((state.cursor_pos(), state.mistakes()), (2, 1));
        assert_eq!(state.finished_at(), Some(at(2)));
    }

    #[test]
    fn test_words_counted_on_space_only() {
        let mut state = SessionState::new(Sentence::new("a b"));

        process_key(&mut state, &'a'.into(), at(0));
        assert_eq!(state.words_completed(), 0);
        process_key(&mut state, &' '.into(), at(0));
        assert_eq!(state.words_completed(), 1);
        process_key(&mut state, &'b'.into(), at(0));
        assert_eq!(state.words_completed(), 1);
        assert!(state.has_finished());
    }

    #[test]
    fn test_input_after_completion_is_ignored() {
        let mut state = SessionState::new(Sentence::new("a"));
        process_key(&mut state, &'a'.into(), at(5));
        assert_eq!(state.phase(), Phase::Completed);

        assert_eq!(process_key(&mut state, &'a'.into(), at(6)), Outcome::Ignored);
        assert_eq!(process_key(&mut state, &'q'.into(), at(7)), Outcome::Ignored);
        assert_eq!(state.finished_at(), Some(at(5)));
        assert_eq!(state.mistakes(), 0);
        assert_eq!(state.cursor_pos(), 1);
    }

    #[test]
    fn test_single_key_sentence_starts_and_finishes_together() {
        let mut state = SessionState::new(Sentence::new("x"));
        process_key(&mut state, &'x'.into(), at(3));
        assert_eq!(state.started_at(), Some(at(3)));
        assert_eq!(state.finished_at(), Some(at(3)));
    }
}
