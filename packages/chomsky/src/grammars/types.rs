use std::{borrow::Cow, fmt::Display, hash::Hash};

use derive_more::Display;
use indexmap::{IndexMap, IndexSet};
use itertools::Itertools;

use crate::language::{Symbol, Word, EPSILON};

#[derive(Debug, Display, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Terminal(pub Symbol);

impl Terminal {
    pub fn new(name: impl Into<String>) -> Self {
        Terminal(Symbol::new(name))
    }
}

#[derive(Debug, Display, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NonTerminal(pub Symbol);

impl NonTerminal {
    pub fn new(name: impl Into<String>) -> Self {
        NonTerminal(Symbol::new(name))
    }
}

#[derive(Debug, Display, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProductionSymbol {
    Terminal(Terminal),
    NonTerminal(NonTerminal),
}

impl ProductionSymbol {
    pub fn symbol(&self) -> &Symbol {
        match self {
            ProductionSymbol::Terminal(t) => &t.0,
            ProductionSymbol::NonTerminal(nt) => &nt.0,
        }
    }

    pub fn as_non_terminal(&self) -> Option<&NonTerminal> {
        match self {
            ProductionSymbol::NonTerminal(nt) => Some(nt),
            ProductionSymbol::Terminal(_) => None,
        }
    }

    pub fn as_terminal(&self) -> Option<&Terminal> {
        match self {
            ProductionSymbol::Terminal(t) => Some(t),
            ProductionSymbol::NonTerminal(_) => None,
        }
    }
}

impl From<Terminal> for ProductionSymbol {
    fn from(t: Terminal) -> Self {
        ProductionSymbol::Terminal(t)
    }
}

impl From<NonTerminal> for ProductionSymbol {
    fn from(nt: NonTerminal) -> Self {
        ProductionSymbol::NonTerminal(nt)
    }
}

impl Word<ProductionSymbol> {
    /// Returns the nonterminal if this body is a unit production body.
    pub fn as_unit(&self) -> Option<&NonTerminal> {
        match self.0.as_slice() {
            [ProductionSymbol::NonTerminal(nt)] => Some(nt),
            _ => None,
        }
    }

    pub fn non_terminals(&self) -> impl Iterator<Item = &NonTerminal> {
        self.0.iter().filter_map(ProductionSymbol::as_non_terminal)
    }

    pub fn terminals(&self) -> impl Iterator<Item = &Terminal> {
        self.0.iter().filter_map(ProductionSymbol::as_terminal)
    }
}

/// Reads each character of `word` as a terminal.
impl From<&str> for Word<Terminal> {
    fn from(word: &str) -> Self {
        word.chars().map(Terminal::new).collect()
    }
}

pub trait ProductionWord: Display + Clone {
    fn to_word(&self) -> Word<ProductionSymbol>;
}

impl ProductionWord for Word<ProductionSymbol> {
    fn to_word(&self) -> Word<ProductionSymbol> {
        self.clone()
    }
}

pub trait Grammar<R: ProductionWord> {
    fn start_symbol(&self) -> &NonTerminal;
    fn non_terminals(&self) -> Cow<'_, IndexSet<NonTerminal>>;
    fn terminals(&self) -> Cow<'_, IndexSet<Terminal>>;
    fn erasing_productions(&self) -> Cow<'_, IndexSet<NonTerminal>>;
    fn productions(&self) -> &IndexMap<NonTerminal, IndexSet<R>>;

    fn definition(&self) -> String {
        let start_symbol = self.start_symbol();
        let erasing_productions = self.erasing_productions();
        let productions = self.productions();

        let mut string_productions =
            IndexMap::with_capacity(productions.len() + erasing_productions.len());

        for (lhs, rhs) in productions {
            string_productions
                .entry(lhs.clone())
                .or_insert_with(Vec::new)
                .extend(
                    rhs.iter()
                        .filter(|word| !word.to_word().is_empty())
                        .map(ToString::to_string),
                );
        }

        for lhs in erasing_productions.as_ref() {
            string_productions
                .entry(lhs.clone())
                .or_insert_with(Vec::new)
                .push(EPSILON.to_owned());
        }

        string_productions.retain(|_, rhs| !rhs.is_empty());

        let mut non_terminals = self.non_terminals().into_owned();
        non_terminals.sort_by(|a, b| {
            if a == start_symbol {
                return std::cmp::Ordering::Less;
            }
            if b == start_symbol {
                return std::cmp::Ordering::Greater;
            }
            a.cmp(b)
        });

        let mut terminals = self.terminals().into_owned();
        terminals.sort();

        string_productions.sort_by(|lhs1, _, lhs2, _| {
            (lhs1 != start_symbol)
                .cmp(&(lhs2 != start_symbol))
                .then_with(|| lhs1.cmp(lhs2))
        });

        let mut definition = format!(
            "G = ({{{}}}, {{{}}}, P, {})\n\n",
            non_terminals.iter().join(", "),
            terminals.iter().join(", "),
            start_symbol
        );

        definition += "P = {\n";

        for (lhs, rhs) in string_productions {
            definition += &format!("  {} → {}\n", lhs, rhs.join(" | "));
        }

        definition += "}\n";

        definition
    }
}
