use crate::session::{TargetSize, MAX_TARGET_SIZE};

/// A submitted command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `edit`: restart at the current size
    Edit,
    /// `config <n>`: resize, then restart
    Config(TargetSize),
    Unrecognized,
}

impl Command {
    /// Interprets a command line. Tokens are separated by runs of
    /// whitespace, and leading or trailing whitespace produces an empty
    /// edge token, so `" edit"` is not recognized.
    pub fn parse(line: &str) -> Self {
        let args = split_args(line);
        match args.as_slice() {
            ["edit"] => Command::Edit,
            ["config", size] => Command::Config(parse_size(size)),
            _ => Command::Unrecognized,
        }
    }
}

fn split_args(line: &str) -> Vec<&str> {
    let mut args = Vec::new();
    let mut start = 0;
    let mut in_gap = false;
    for (idx, c) in line.char_indices() {
        if c.is_whitespace() {
            if !in_gap {
                args.push(&line[start..idx]);
                in_gap = true;
            }
        } else if in_gap {
            start = idx;
            in_gap = false;
        }
    }
    args.push(if in_gap { "" } else { &line[start..] });
    args
}

/// Leading-integer parse: optional sign, an optional `0x`/`0X` hex prefix,
/// then at least one digit in that radix. Anything after the digits is
/// ignored; no digits at all is `Invalid`. Negative sizes clamp to zero,
/// oversized ones to `MAX_TARGET_SIZE`.
pub fn parse_size(token: &str) -> TargetSize {
    let trimmed = token.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let (radix, rest) = match rest.get(..2) {
        Some("0x" | "0X") => (16, &rest[2..]),
        _ => (10, rest),
    };
    let digits: &str = {
        let end = rest
            .char_indices()
            .find(|(_, c)| !c.is_digit(radix))
            .map_or(rest.len(), |(idx, _)| idx);
        &rest[..end]
    };
    if digits.is_empty() {
        return TargetSize::Invalid;
    }
    if negative {
        return TargetSize::Count(0);
    }
    TargetSize::Count(
        usize::from_str_radix(digits, radix)
            .map_or(MAX_TARGET_SIZE, |n| n.min(MAX_TARGET_SIZE)),
    )
}
