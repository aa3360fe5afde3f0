//! The input state machine: turns one action into the next session value.
//!
//! Every function here takes the previous state by reference and returns a
//! fresh one. Randomness and time come in through [`Env`], so a fixed
//! [`SequenceSource`](crate::operation::SequenceSource) and
//! [`FixedClock`](crate::clock::FixedClock) make every transition
//! reproducible.

use crate::clock::Clock;
use crate::command::Command;
use crate::key::Key;
use crate::operation::RandomSource;
use crate::session::{draw_session, Mode, SessionState, TargetSize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Input(Key),
    Reset,
    Config(TargetSize),
}

/// Capabilities a transition may draw on.
pub struct Env<'a> {
    pub rng: &'a mut dyn RandomSource,
    pub clock: &'a dyn Clock,
}

impl<'a> Env<'a> {
    pub fn new(rng: &'a mut dyn RandomSource, clock: &'a dyn Clock) -> Self {
        Self { rng, clock }
    }
}

pub fn reduce(state: &SessionState, action: &Action, env: &mut Env<'_>) -> SessionState {
    match action {
        Action::Input(key) => match state.mode {
            Mode::Normal => apply_normal(state, key),
            Mode::Command => apply_command(state, key, env),
        },
        Action::Reset => reset(state, env),
        Action::Config(size) => config(state, *size, env),
    }
}

/// Scores one key against the current operation.
pub fn apply_normal(state: &SessionState, key: &Key) -> SessionState {
    if key.is_char(':') {
        return SessionState {
            mode: Mode::Command,
            ..state.clone()
        };
    }
    if *key == Key::Shift || state.is_finished() {
        return state.clone();
    }

    let mut next = state.clone();
    let expected = state.remaining.chars().next();
    let matched = match key {
        Key::Char(c) => Some(*c) == expected,
        _ => false,
    };

    if !matched {
        // Escape lands here too: it always counts as a miss.
        next.wrong_count += 1;
        next.remaining = format!("{}{}", state.typed_prefix, state.remaining);
        next.typed_prefix.clear();
        return next;
    }

    next.correct_count += 1;
    let mut rest = state.remaining.chars();
    let head = rest.next();
    if rest.as_str().is_empty() {
        next.remaining = next
            .queued
            .pop_front()
            .map(|op| op.as_str().to_string())
            .unwrap_or_default();
        next.typed_prefix.clear();
        if next.is_finished() {
            tracing::info!(
                correct = next.correct_count,
                wrong = next.wrong_count,
                "session finished"
            );
        }
    } else {
        next.typed_prefix.extend(head);
        next.remaining = rest.as_str().to_string();
    }
    next
}

/// Edits or submits the command line.
pub fn apply_command(state: &SessionState, key: &Key, env: &mut Env<'_>) -> SessionState {
    match key {
        Key::Escape => SessionState {
            mode: Mode::Normal,
            command_buffer: String::new(),
            ..state.clone()
        },
        Key::Backspace => {
            let mut next = state.clone();
            next.command_buffer.pop();
            next
        }
        Key::Enter => {
            let line = state.command_buffer.as_str();
            let mut next = match Command::parse(line) {
                Command::Edit => reset(state, env),
                Command::Config(size) => config(state, size, env),
                Command::Unrecognized => {
                    tracing::debug!(line, "ignoring unrecognized command");
                    state.clone()
                }
            };
            next.command_buffer.clear();
            next.mode = Mode::Normal;
            next
        }
        other => {
            let mut next = state.clone();
            next.command_buffer.push_str(&other.to_string());
            next
        }
    }
}

/// Redraws the session at its current size and zeroes the counters.
/// Mode and command buffer are left as they are.
pub fn reset(state: &SessionState, env: &mut Env<'_>) -> SessionState {
    let (remaining, queued) = draw_session(state.target_size, &mut *env.rng);
    tracing::info!(size = %state.target_size, "session reset");
    SessionState {
        remaining,
        queued,
        typed_prefix: String::new(),
        correct_count: 0,
        wrong_count: 0,
        started_at: env.clock.now(),
        ..state.clone()
    }
}

pub fn config(state: &SessionState, size: TargetSize, env: &mut Env<'_>) -> SessionState {
    if size == TargetSize::Invalid {
        tracing::warn!("session size is not a number; starting an empty session");
    }
    let resized = SessionState {
        target_size: size,
        ..state.clone()
    };
    reset(&resized, env)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::operation::{Operation, SequenceSource};
    use std::collections::VecDeque;
    use std::time::{Duration, UNIX_EPOCH};

    fn key(name: &str) -> Key {
        Key::from_name(name).unwrap()
    }

    fn state_with(remaining: &str, queued: &[(&str, &str)]) -> SessionState {
        SessionState {
            mode: Mode::Normal,
            remaining: remaining.to_string(),
            queued: queued
                .iter()
                .map(|(op, motion)| Operation::new(op, motion))
                .collect::<VecDeque<_>>(),
            typed_prefix: String::new(),
            correct_count: 0,
            wrong_count: 0,
            started_at: UNIX_EPOCH,
            target_size: TargetSize::Count(queued.len() + 1),
            command_buffer: String::new(),
        }
    }

    fn type_keys(state: &SessionState, keys: &[&str]) -> SessionState {
        keys.iter()
            .fold(state.clone(), |s, k| apply_normal(&s, &key(k)))
    }

    #[test]
    fn test_match_advances_within_operation() {
        let state = state_with("dw", &[("y", "j")]);
        let next = apply_normal(&state, &key("d"));

        assert_eq!(next.typed_prefix, "d");
        assert_eq!(next.remaining, "w");
        assert_eq!(next.correct_count, 1);
        assert_eq!(next.queued.len(), 1);
        // previous value untouched
        assert_eq!(state.remaining, "dw");
    }

    #[test]
    fn test_completing_operation_loads_next() {
        let state = state_with("dw", &[("y", "j"), ("<", "G")]);
        let next = type_keys(&state, &["d", "w"]);

        assert_eq!(next.typed_prefix, "");
        assert_eq!(next.remaining, "yj");
        assert_eq!(next.correct_count, 2);
        assert_eq!(next.queued.len(), 1);
    }

    #[test]
    fn test_mismatch_restores_operation() {
        let state = state_with("gqgE", &[]);
        let next = type_keys(&state, &["g", "q", "x"]);

        assert_eq!(next.typed_prefix, "");
        assert_eq!(next.remaining, "gqgE");
        assert_eq!(next.correct_count, 2);
        assert_eq!(next.wrong_count, 1);
    }

    #[test]
    fn test_escape_counts_as_mismatch() {
        let state = state_with("dw", &[]);
        let next = type_keys(&state, &["d", "Escape"]);

        assert_eq!(next.wrong_count, 1);
        assert_eq!(next.remaining, "dw");
        assert_eq!(next.typed_prefix, "");
    }

    #[test]
    fn test_named_key_is_a_mismatch() {
        let state = state_with("dw", &[]);
        let next = apply_normal(&state, &key("ArrowLeft"));
        assert_eq!(next.wrong_count, 1);
    }

    #[test]
    fn test_case_sensitive_match() {
        let state = state_with("dW", &[]);
        let next = type_keys(&state, &["d", "w"]);
        assert_eq!(next.wrong_count, 1);
        assert_eq!(next.remaining, "dW");
    }

    #[test]
    fn test_shift_is_ignored() {
        let state = state_with("dW", &[]);
        let next = type_keys(&state, &["d", "Shift", "W"]);
        assert_eq!(next.correct_count, 2);
        assert_eq!(next.wrong_count, 0);
    }

    #[test]
    fn test_colon_enters_command_mode_without_scoring() {
        let state = type_keys(&state_with("dw", &[]), &["d"]);
        let next = apply_normal(&state, &key(":"));

        assert_eq!(next.mode, Mode::Command);
        assert_eq!(next.command_buffer, "");
        assert_eq!(next.typed_prefix, "d");
        assert_eq!(next.remaining, "w");
        assert_eq!(next.correct_count, 1);
        assert_eq!(next.wrong_count, 0);
    }

    #[test]
    fn test_keys_after_finish_are_ignored() {
        let state = type_keys(&state_with("dw", &[]), &["d", "w"]);
        assert!(state.is_finished());

        let next = type_keys(&state, &["x", "Escape", "d"]);
        assert_eq!(next, state);
    }

    #[test]
    fn test_command_buffer_editing() {
        let mut rng = SequenceSource::new(vec![0]);
        let clock = FixedClock::new(UNIX_EPOCH);
        let mut env = Env::new(&mut rng, &clock);

        let mut state = apply_normal(&state_with("dw", &[]), &key(":"));
        for k in ["e", "d", "x", "Backspace", "i", "t"] {
            state = apply_command(&state, &key(k), &mut env);
        }
        assert_eq!(state.command_buffer, "edit");
        assert_eq!(state.mode, Mode::Command);
    }

    #[test]
    fn test_backspace_on_empty_buffer() {
        let mut rng = SequenceSource::new(vec![0]);
        let clock = FixedClock::new(UNIX_EPOCH);
        let mut env = Env::new(&mut rng, &clock);

        let state = apply_normal(&state_with("dw", &[]), &key(":"));
        let next = apply_command(&state, &key("Backspace"), &mut env);
        assert_eq!(next, state);
    }

    #[test]
    fn test_command_appends_key_names_verbatim() {
        let mut rng = SequenceSource::new(vec![0]);
        let clock = FixedClock::new(UNIX_EPOCH);
        let mut env = Env::new(&mut rng, &clock);

        let state = apply_normal(&state_with("dw", &[]), &key(":"));
        let next = apply_command(&state, &key("Tab"), &mut env);
        assert_eq!(next.command_buffer, "Tab");
    }

    #[test]
    fn test_escape_leaves_command_mode() {
        let mut rng = SequenceSource::new(vec![0]);
        let clock = FixedClock::new(UNIX_EPOCH);
        let mut env = Env::new(&mut rng, &clock);

        let mut state = apply_normal(&state_with("dw", &[]), &key(":"));
        state = apply_command(&state, &key("e"), &mut env);
        let next = apply_command(&state, &key("Escape"), &mut env);

        assert_eq!(next.mode, Mode::Normal);
        assert_eq!(next.command_buffer, "");
        assert_eq!(next.wrong_count, 0);
    }

    #[test]
    fn test_enter_edit_resets_at_current_size() {
        let mut rng = SequenceSource::new(vec![1, 14]);
        let mut clock = FixedClock::new(UNIX_EPOCH);
        clock.advance(Duration::from_secs(5));
        let mut env = Env::new(&mut rng, &clock);

        let mut state = type_keys(&state_with("yj", &[("d", "w"), ("d", "w")]), &["y", "x"]);
        state.mode = Mode::Command;
        state.command_buffer = "edit".to_string();

        let next = apply_command(&state, &key("Enter"), &mut env);
        assert_eq!(next.mode, Mode::Normal);
        assert_eq!(next.command_buffer, "");
        assert_eq!(next.remaining, "dw");
        assert_eq!(next.queued.len(), 2);
        assert_eq!(next.correct_count, 0);
        assert_eq!(next.wrong_count, 0);
        assert_eq!(next.target_size, TargetSize::Count(3));
        assert_eq!(next.started_at, UNIX_EPOCH + Duration::from_secs(5));
    }

    #[test]
    fn test_enter_unrecognized_only_leaves_command_mode() {
        let mut rng = SequenceSource::new(vec![0]);
        let clock = FixedClock::new(UNIX_EPOCH);
        let mut env = Env::new(&mut rng, &clock);

        let mut state = type_keys(&state_with("dw", &[]), &["d"]);
        state.mode = Mode::Command;
        state.command_buffer = "wq".to_string();

        let next = apply_command(&state, &key("Enter"), &mut env);
        assert_eq!(next.mode, Mode::Normal);
        assert_eq!(next.command_buffer, "");
        assert_eq!(next.typed_prefix, "d");
        assert_eq!(next.correct_count, 1);
    }

    #[test]
    fn test_reset_keeps_mode_and_buffer() {
        let mut rng = SequenceSource::new(vec![0]);
        let clock = FixedClock::new(UNIX_EPOCH);
        let mut env = Env::new(&mut rng, &clock);

        let mut state = state_with("dw", &[]);
        state.mode = Mode::Command;
        state.command_buffer = "con".to_string();

        let next = reset(&state, &mut env);
        assert_eq!(next.mode, Mode::Command);
        assert_eq!(next.command_buffer, "con");
        assert_eq!(next.remaining, "yh");
    }

    #[test]
    fn test_config_zero_is_empty_session() {
        let mut rng = SequenceSource::new(vec![0]);
        let clock = FixedClock::new(UNIX_EPOCH);
        let mut env = Env::new(&mut rng, &clock);

        let next = config(&state_with("dw", &[("y", "j")]), TargetSize::Count(0), &mut env);
        assert!(next.remaining.is_empty());
        assert!(next.queued.is_empty());
        assert_eq!(next.target_size, TargetSize::Count(0));
    }

    #[test]
    fn test_reduce_dispatches_on_mode() {
        let mut rng = SequenceSource::new(vec![0]);
        let clock = FixedClock::new(UNIX_EPOCH);
        let mut env = Env::new(&mut rng, &clock);

        let state = state_with("dw", &[]);
        let command = reduce(&state, &Action::Input(key(":")), &mut env);
        assert_eq!(command.mode, Mode::Command);

        let typed = reduce(&command, &Action::Input(key("d")), &mut env);
        assert_eq!(typed.command_buffer, "d");
        assert_eq!(typed.correct_count, 0);

        let resized = reduce(&typed, &Action::Config(TargetSize::Count(4)), &mut env);
        assert_eq!(resized.queued.len(), 3);
        assert_eq!(resized.mode, Mode::Command);

        let reset = reduce(&resized, &Action::Reset, &mut env);
        assert_eq!(reset.target_size, TargetSize::Count(4));
    }
}
