use rand::Rng;
use std::fmt;

pub const OPERATORS: [&str; 7] = ["y", "d", "=", "gq", "g?", ">", "<"];

pub const MOTIONS: [&str; 22] = [
    "h", "l", "0", "^", "$", "g_", ";", ",", "k", "j", "gk", "gj", "G", "gg", "w", "W", "e", "E",
    "b", "B", "ge", "gE",
];

/// Source of uniform picks used to draw operators and motions.
pub trait RandomSource {
    /// Returns an index in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

/// Production random source backed by any `rand::Rng`
#[derive(Debug, Clone)]
pub struct RngSource<R: Rng> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<rand::rngs::ThreadRng> {
    pub fn thread() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Replays a fixed cycle of indices, each reduced modulo the table length.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    indices: Vec<usize>,
    next: usize,
}

impl SequenceSource {
    pub fn new(indices: Vec<usize>) -> Self {
        Self { indices, next: 0 }
    }
}

impl RandomSource for SequenceSource {
    fn pick(&mut self, len: usize) -> usize {
        if self.indices.is_empty() {
            return 0;
        }
        let idx = self.indices[self.next % self.indices.len()];
        self.next += 1;
        idx % len
    }
}

/// A single operator+motion token the user has to type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Operation {
    text: String,
    operator_len: usize,
}

impl Operation {
    pub fn new(operator: &str, motion: &str) -> Self {
        Self {
            text: format!("{operator}{motion}"),
            operator_len: operator.len(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn operator(&self) -> &str {
        &self.text[..self.operator_len]
    }

    pub fn motion(&self) -> &str {
        &self.text[self.operator_len..]
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for Operation {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

pub fn generate(rng: &mut dyn RandomSource) -> Operation {
    let operator = OPERATORS[rng.pick(OPERATORS.len())];
    let motion = MOTIONS[rng.pick(MOTIONS.len())];
    Operation::new(operator, motion)
}

/// Draws `n` operations independently, with replacement, in generation order.
pub fn generate_batch(rng: &mut dyn RandomSource, n: usize) -> Vec<Operation> {
    (0..n).map(|_| generate(rng)).collect()
}
