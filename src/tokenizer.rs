use std::ffi::CString;
use std::ops::Deref;

use crate::error::ShellError;

/// Default token cap. One slot of the classic 64-entry argv is the terminator.
pub const DEFAULT_MAX_ARGS: usize = 63;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overflow {
    /// Keep the first `max` tokens and record how many were dropped.
    Drop,
    /// Reject the line.
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLimit {
    /// Zero means unlimited.
    pub max: usize,
    pub overflow: Overflow,
}

impl Default for TokenLimit {
    fn default() -> Self {
        TokenLimit { max: DEFAULT_MAX_ARGS, overflow: Overflow::Drop }
    }
}

/// Command name followed by its arguments.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArgumentVector {
    args: Vec<String>,
    dropped: usize,
}

impl ArgumentVector {
    pub fn command(&self) -> Option<&str> {
        self.args.first().map(|s| s.as_str())
    }

    pub fn args(&self) -> &[String] {
        self.args.get(1..).unwrap_or(&[])
    }

    /// Number of tokens discarded by the token cap.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Converts to the NUL-terminated strings handed to `execv`.
    pub fn to_cstrings(&self) -> Result<Vec<CString>, ShellError> {
        self.args
            .iter()
            .map(|a| CString::new(a.as_str()).map_err(|_| ShellError::InvalidArgument(a.clone())))
            .collect()
    }
}

impl Deref for ArgumentVector {
    type Target = [String];

    fn deref(&self) -> &[String] {
        &self.args
    }
}

impl<S: Into<String>> FromIterator<S> for ArgumentVector {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        ArgumentVector { args: iter.into_iter().map(Into::into).collect(), dropped: 0 }
    }
}

/// Splits a line on single spaces. Runs of spaces never produce empty tokens,
/// and tabs are part of a word.
pub fn tokenize(line: &str, limit: TokenLimit) -> Result<ArgumentVector, ShellError> {
    let line = line.strip_suffix('\n').unwrap_or(line);
    let line = line.strip_suffix('\r').unwrap_or(line);

    let mut args = Vec::new();
    let mut dropped = 0;

    for word in line.split(' ').filter(|w| !w.is_empty()) {
        if limit.max != 0 && args.len() == limit.max {
            dropped += 1;
        } else {
            args.push(word.to_string());
        }
    }

    if dropped > 0 {
        match limit.overflow {
            Overflow::Error => {
                return Err(ShellError::TooManyArguments {
                    limit: limit.max,
                    found: limit.max + dropped,
                });
            }
            Overflow::Drop => {
                tracing::warn!(limit = limit.max, dropped, "argument list truncated");
            }
        }
    }

    Ok(ArgumentVector { args, dropped })
}
