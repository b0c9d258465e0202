use std::ops::Range;
use std::path::Path;

use crate::error::ConfigError;

/// Number of arities to generate, `0..count`.
///
/// The bound file holds the highest arity N, so `count` is always `N + 1` and never zero.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub struct ArityBound {
    count: usize,
}

impl ArityBound {
    /// Bound whose highest generated arity is `max_arity`.
    pub fn new(max_arity: usize) -> Self {
        ArityBound {
            count: max_arity + 1,
        }
    }

    pub fn read(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|source| ConfigError::UnreadableBound {
                path: path.to_path_buf(),
                source,
            })?;

        Self::parse(&content).ok_or_else(|| ConfigError::InvalidBound {
            path: path.to_path_buf(),
            content: content.trim().to_string(),
        })
    }

    /// Parses the trimmed text as a base-10 non-negative integer.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let max_arity: usize = text.parse().ok()?;
        max_arity.checked_add(1).map(|count| ArityBound { count })
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn max_arity(&self) -> usize {
        self.count - 1
    }

    pub fn arities(&self) -> Range<usize> {
        0..self.count
    }
}
