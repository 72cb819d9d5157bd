use crate::session::SessionState;
use std::time::SystemTime;

/// Words per minute, counting accepted spaces as completed words.
///
/// The clock stops at completion; before that `now` is used. Returns 0
/// before the first keystroke or when no time has elapsed.
pub fn wpm(state: &SessionState, now: SystemTime) -> u32 {
    let Some(started_at) = state.started_at() else {
        return 0;
    };
    let until = state.finished_at().unwrap_or(now);
    let elapsed_ms = match until.duration_since(started_at) {
        Ok(d) => d.as_millis() as f64,
        Err(_) => return 0,
    };

    let elapsed_minutes = elapsed_ms / 60_000.0;
    let words_per_minute = state.words_completed() as f64 / elapsed_minutes;

    if words_per_minute.is_finite() {
        words_per_minute.round() as u32
    } else {
        0
    }
}

/// Share of keystrokes that were correct, as a percentage with two decimals.
pub fn accuracy(state: &SessionState) -> f64 {
    let correct = state.cursor_pos();
    let total = correct + state.mistakes();
    if total == 0 {
        return 100.0;
    }
    round_to(correct as f64 / total as f64 * 100.0, 2)
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}
