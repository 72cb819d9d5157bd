//! Property tests for sentence generation, keystroke handling and metrics.

use std::time::{Duration, SystemTime};

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sentype::metrics::{accuracy, wpm};
use sentype::sentence::generate;
use sentype::{process_key, Key, LengthPolicy, Sentence, SessionState};

// Words of 1..=10 letters always fit the default policy.
fn arb_dictionary() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{1,10}", 1..40)
}

fn arb_key() -> impl Strategy<Value = Key> {
    prop_oneof![
        4 => "[a-c ]".prop_map(|s| Key::from_name(&s)),
        1 => prop::sample::select(vec!["Shift", "Control", "Alt", "Enter"])
            .prop_map(Key::from_name),
    ]
}

fn at_ms(ms: u64) -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_millis(ms)
}

proptest! {
    #[test]
    fn generated_sentences_stay_in_range(words in arb_dictionary(), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let sentence = generate(&words, &LengthPolicy::default(), &mut rng).unwrap();

        prop_assert!((110..=125).contains(&sentence.len()), "len {}", sentence.len());
        prop_assert!(!sentence.as_str().starts_with(' '));
        prop_assert!(!sentence.as_str().contains("  "));
        for word in sentence.words() {
            prop_assert!(words.iter().any(|w| w == word), "{} not in dictionary", word);
        }
    }

    #[test]
    fn cursor_tracks_input_prefix(keys in prop::collection::vec(arb_key(), 0..60)) {
        let target = Sentence::new("abc cab bca");
        let mut state = SessionState::new(target.clone());

        for (i, key) in keys.iter().enumerate() {
            process_key(&mut state, key, at_ms(i as u64 * 100));

            prop_assert_eq!(state.cursor_pos(), state.input().chars().count());
            prop_assert!(target.as_str().starts_with(state.input()));
            prop_assert!(state.cursor_pos() <= target.len());
            prop_assert!(wpm(&state, at_ms(i as u64 * 100 + 50)) < u32::MAX);
            let acc = accuracy(&state);
            prop_assert!((0.0..=100.0).contains(&acc));
        }
    }

    #[test]
    fn exact_typing_finishes_once(gap_ms in 1u64..500, extra in prop::collection::vec(arb_key(), 0..10)) {
        let target = Sentence::new("bad cab");
        let mut state = SessionState::new(target.clone());

        let mut t = 0;
        for (i, c) in target.as_str().chars().enumerate() {
            t += gap_ms;
            process_key(&mut state, &Key::Char(c), at_ms(t));
            if i + 1 < target.len() {
                prop_assert!(state.finished_at().is_none());
            }
        }
        let finished = state.finished_at();
        prop_assert_eq!(finished, Some(at_ms(t)));

        for key in &extra {
            t += gap_ms;
            process_key(&mut state, key, at_ms(t));
        }
        prop_assert_eq!(state.finished_at(), finished);
        prop_assert_eq!(accuracy(&state), 100.0);
    }

    #[test]
    fn accuracy_falls_as_mistakes_grow(typed in 1usize..5, mistakes in 1usize..20) {
        let mut state = SessionState::new(Sentence::new("aaaaaa"));
        for _ in 0..typed {
            process_key(&mut state, &Key::Char('a'), at_ms(0));
        }
        let mut last = accuracy(&state);
        prop_assert_eq!(last, 100.0);
        for _ in 0..mistakes {
            process_key(&mut state, &Key::Char('z'), at_ms(0));
            let now = accuracy(&state);
            prop_assert!(now < last);
            last = now;
        }
    }
}
