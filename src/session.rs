use crate::clock::elapsed_ms;
use crate::operation::{generate, generate_batch, Operation, RandomSource};
use std::collections::VecDeque;
use std::fmt;
use std::time::SystemTime;

pub const DEFAULT_TARGET_SIZE: usize = 50;
pub const MAX_TARGET_SIZE: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum_macros::Display)]
pub enum Mode {
    #[default]
    #[strum(serialize = "NORMAL")]
    Normal,
    #[strum(serialize = "COMMAND")]
    Command,
}

/// Number of operations in a session. `Invalid` stands for a size that
/// failed to parse and behaves as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetSize {
    Count(usize),
    Invalid,
}

impl TargetSize {
    pub fn effective(self) -> usize {
        match self {
            TargetSize::Count(n) => n,
            TargetSize::Invalid => 0,
        }
    }
}

impl Default for TargetSize {
    fn default() -> Self {
        TargetSize::Count(DEFAULT_TARGET_SIZE)
    }
}

impl From<usize> for TargetSize {
    fn from(n: usize) -> Self {
        TargetSize::Count(n)
    }
}

impl fmt::Display for TargetSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetSize::Count(n) => write!(f, "{n}"),
            TargetSize::Invalid => f.write_str("NaN"),
        }
    }
}

/// One practice session. Every keystroke produces a new value; the
/// previous one is left untouched.
///
/// `typed_prefix + remaining` is always the operation drawn for the current
/// slot. `remaining` is only empty once the queue has run dry.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub mode: Mode,
    pub remaining: String,
    pub queued: VecDeque<Operation>,
    pub typed_prefix: String,
    pub correct_count: u64,
    pub wrong_count: u64,
    pub started_at: SystemTime,
    pub target_size: TargetSize,
    pub command_buffer: String,
}

impl SessionState {
    pub fn new(target_size: TargetSize, rng: &mut dyn RandomSource, now: SystemTime) -> Self {
        let (remaining, queued) = draw_session(target_size, rng);
        Self {
            mode: Mode::Normal,
            remaining,
            queued,
            typed_prefix: String::new(),
            correct_count: 0,
            wrong_count: 0,
            started_at: now,
            target_size,
            command_buffer: String::new(),
        }
    }

    /// Nothing left to type.
    pub fn is_finished(&self) -> bool {
        self.remaining.is_empty()
    }

    /// The operation occupying the current slot.
    pub fn current_operation(&self) -> String {
        format!("{}{}", self.typed_prefix, self.remaining)
    }

    pub fn stats(&self) -> Stats {
        Stats {
            correct: self.correct_count,
            wrong: self.wrong_count,
            started_at: self.started_at,
        }
    }
}

/// Fills the current slot and the queue for a session of `target_size`.
pub(crate) fn draw_session(
    target_size: TargetSize,
    rng: &mut dyn RandomSource,
) -> (String, VecDeque<Operation>) {
    match target_size.effective() {
        0 => (String::new(), VecDeque::new()),
        size => {
            let first = generate(rng);
            let rest = generate_batch(rng, size - 1);
            (first.as_str().to_string(), rest.into())
        }
    }
}

/// Accuracy and speed derived from a session's counters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats {
    pub correct: u64,
    pub wrong: u64,
    pub started_at: SystemTime,
}

impl Stats {
    /// Share of correct keystrokes, `None` before anything was typed.
    pub fn accuracy(&self) -> Option<f64> {
        let total = self.correct + self.wrong;
        if total == 0 {
            return None;
        }
        Some(self.correct as f64 / total as f64)
    }

    /// Correct keystrokes per minute since the session started.
    pub fn actions_per_minute(&self, now: SystemTime) -> Option<f64> {
        let elapsed = elapsed_ms(self.started_at, now);
        if elapsed == 0 {
            return None;
        }
        Some(self.correct as f64 / elapsed as f64 * 60_000.0)
    }
}
