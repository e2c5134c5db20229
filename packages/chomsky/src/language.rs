use std::fmt::Display;

use derive_more::Display;
use itertools::Itertools;

pub const EPSILON: &str = "ε";

#[derive(Debug, Display, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(s: impl Into<String>) -> Self {
        let s = s.into();
        assert!(!s.is_empty(), "symbols cannot be empty");
        Symbol(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A finite sequence of symbols. The empty word stands for ε.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Word<S>(pub Vec<S>);

impl<S> Word<S> {
    pub fn new(symbols: impl IntoIterator<Item = S>) -> Self {
        Word(symbols.into_iter().collect())
    }

    pub fn empty() -> Self {
        Word(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, S> {
        self.0.iter()
    }
}

impl<S> FromIterator<S> for Word<S> {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Word::new(iter)
    }
}

impl<S: Display> Display for Word<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            return write!(f, "{EPSILON}");
        }

        let symbols = self.0.iter().map(ToString::to_string).collect::<Vec<_>>();

        // Single-character symbols are written back to back, anything longer
        // needs separators to stay readable.
        if symbols.iter().all(|s| s.chars().count() == 1) {
            write!(f, "{}", symbols.concat())
        } else {
            write!(f, "{}", symbols.iter().join(" "))
        }
    }
}
