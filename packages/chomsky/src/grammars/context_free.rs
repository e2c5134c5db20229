use std::{borrow::Cow, fmt::Display};

use indexmap::{indexset, IndexMap, IndexSet};
use itertools::Itertools;

use crate::{
    error::ValidationError,
    grammars::types::{Grammar, NonTerminal, ProductionSymbol, Terminal},
    language::{Symbol, Word},
};

/// A context-free grammar. An empty body stands for an erasing production.
///
/// Equality compares symbol and production sets, ignoring insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextFreeGrammar {
    pub(crate) start_symbol: NonTerminal,
    pub(crate) non_terminals: IndexSet<NonTerminal>,
    pub(crate) terminals: IndexSet<Terminal>,
    pub(crate) productions: IndexMap<NonTerminal, IndexSet<Word<ProductionSymbol>>>,
}

impl Grammar<Word<ProductionSymbol>> for ContextFreeGrammar {
    fn start_symbol(&self) -> &NonTerminal {
        &self.start_symbol
    }

    fn non_terminals(&self) -> Cow<'_, IndexSet<NonTerminal>> {
        Cow::Borrowed(&self.non_terminals)
    }

    fn terminals(&self) -> Cow<'_, IndexSet<Terminal>> {
        Cow::Borrowed(&self.terminals)
    }

    fn erasing_productions(&self) -> Cow<'_, IndexSet<NonTerminal>> {
        Cow::Owned(
            self.productions
                .iter()
                .filter(|(_, rhs)| rhs.iter().any(Word::is_empty))
                .map(|(lhs, _)| lhs.clone())
                .collect(),
        )
    }

    fn productions(&self) -> &IndexMap<NonTerminal, IndexSet<Word<ProductionSymbol>>> {
        &self.productions
    }
}

impl ContextFreeGrammar {
    pub fn new(start_symbol: NonTerminal) -> Self {
        Self {
            non_terminals: indexset! {start_symbol.clone()},
            start_symbol,
            terminals: IndexSet::new(),
            productions: IndexMap::new(),
        }
    }

    /// Assembles a grammar from its four components without declaring
    /// anything on the caller's behalf. Use [`ContextFreeGrammar::validate`]
    /// to check the result.
    pub fn from_parts(
        non_terminals: impl IntoIterator<Item = NonTerminal>,
        terminals: impl IntoIterator<Item = Terminal>,
        productions: impl IntoIterator<Item = (NonTerminal, Word<ProductionSymbol>)>,
        start_symbol: NonTerminal,
    ) -> Self {
        let mut grammar = Self {
            start_symbol,
            non_terminals: non_terminals.into_iter().collect(),
            terminals: terminals.into_iter().collect(),
            productions: IndexMap::new(),
        };

        for (lhs, rhs) in productions {
            grammar.insert_production(lhs, rhs);
        }

        grammar
    }

    /// Adds `lhs → rhs`, declaring every symbol it mentions.
    pub fn add_production(&mut self, lhs: NonTerminal, rhs: Word<ProductionSymbol>) {
        for symbol in rhs.iter() {
            match symbol {
                ProductionSymbol::Terminal(t) => {
                    self.terminals.insert(t.clone());
                }
                ProductionSymbol::NonTerminal(nt) => {
                    self.non_terminals.insert(nt.clone());
                }
            }
        }

        self.non_terminals.insert(lhs.clone());
        self.insert_production(lhs, rhs);
    }

    pub fn add_erasing_production(&mut self, lhs: NonTerminal) {
        self.add_production(lhs, Word::empty());
    }

    pub(crate) fn insert_production(&mut self, lhs: NonTerminal, rhs: Word<ProductionSymbol>) {
        self.productions
            .entry(lhs)
            .or_insert_with(IndexSet::new)
            .insert(rhs);
    }

    pub fn rules(&self, lhs: &NonTerminal) -> Option<&IndexSet<Word<ProductionSymbol>>> {
        self.productions.get(lhs)
    }

    /// Whether `symbol` is already in use as a terminal or a nonterminal name.
    pub fn declares(&self, symbol: &Symbol) -> bool {
        self.non_terminals.contains(&NonTerminal(symbol.clone()))
            || self.terminals.contains(&Terminal(symbol.clone()))
    }

    pub fn production_count(&self) -> usize {
        self.productions.values().map(IndexSet::len).sum()
    }

    pub fn is_empty_language(&self) -> bool {
        self.productions
            .get(&self.start_symbol)
            .map_or(true, IndexSet::is_empty)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.non_terminals.contains(&self.start_symbol) {
            return Err(ValidationError::UndeclaredStartSymbol {
                start_symbol: self.start_symbol.clone(),
            });
        }

        if let Some(t) = self
            .terminals
            .iter()
            .find(|t| self.non_terminals.contains(&NonTerminal(t.0.clone())))
        {
            return Err(ValidationError::AmbiguousSymbol {
                symbol: t.0.clone(),
            });
        }

        for (lhs, rhs) in &self.productions {
            if !self.non_terminals.contains(lhs) {
                return Err(ValidationError::UndeclaredProductionOwner { lhs: lhs.clone() });
            }

            for word in rhs {
                for symbol in word.iter() {
                    match symbol {
                        ProductionSymbol::Terminal(t) if !self.terminals.contains(t) => {
                            return Err(ValidationError::UndeclaredTerminal {
                                lhs: lhs.clone(),
                                body: word.clone(),
                                symbol: t.clone(),
                            });
                        }
                        ProductionSymbol::NonTerminal(nt) if !self.non_terminals.contains(nt) => {
                            return Err(ValidationError::UndeclaredNonTerminal {
                                lhs: lhs.clone(),
                                body: word.clone(),
                                symbol: nt.clone(),
                            });
                        }
                        _ => {}
                    }
                }
            }
        }

        Ok(())
    }

    /// Drops declared terminals that no production body mentions anymore.
    pub(crate) fn retain_used_terminals(&mut self) {
        let used = self
            .productions
            .values()
            .flatten()
            .flat_map(|word| word.terminals())
            .cloned()
            .collect::<IndexSet<_>>();

        self.terminals.retain(|t| used.contains(t));
    }

    /// Every terminal word of length at most `max_len` derivable from the
    /// start symbol.
    ///
    /// Computed bottom-up: each nonterminal's set of short words grows until
    /// no body contributes anything new, so erasing and unit cycles are fine.
    pub fn words_up_to(&self, max_len: usize) -> IndexSet<Word<Terminal>> {
        let mut languages: IndexMap<&NonTerminal, IndexSet<Vec<Terminal>>> = IndexMap::new();

        loop {
            let mut changed = false;

            for (lhs, rhs) in &self.productions {
                for body in rhs {
                    let derived = body.iter().fold(
                        indexset! {Vec::new()},
                        |prefixes: IndexSet<Vec<Terminal>>, symbol| {
                            let suffixes: Cow<'_, IndexSet<Vec<Terminal>>> = match symbol {
                                ProductionSymbol::Terminal(t) => {
                                    Cow::Owned(indexset! {vec![t.clone()]})
                                }
                                ProductionSymbol::NonTerminal(nt) => languages
                                    .get(nt)
                                    .map(Cow::Borrowed)
                                    .unwrap_or_default(),
                            };

                            prefixes
                                .iter()
                                .cartesian_product(suffixes.iter())
                                .filter(|(prefix, suffix)| prefix.len() + suffix.len() <= max_len)
                                .map(|(prefix, suffix)| [prefix.as_slice(), suffix.as_slice()].concat())
                                .collect()
                        },
                    );

                    let language = languages.entry(lhs).or_default();
                    for word in derived {
                        changed |= language.insert(word);
                    }
                }
            }

            if !changed {
                break;
            }
        }

        languages
            .get(&self.start_symbol)
            .map(|words| words.iter().cloned().map(Word).collect())
            .unwrap_or_default()
    }
}

impl Display for ContextFreeGrammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.definition())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nt(name: &str) -> NonTerminal {
        NonTerminal::new(name)
    }

    fn t(name: &str) -> Terminal {
        Terminal::new(name)
    }

    fn word(symbols: &[&str]) -> Word<ProductionSymbol> {
        symbols
            .iter()
            .map(|&s| {
                if s.starts_with(|c: char| c.is_ascii_uppercase()) {
                    ProductionSymbol::NonTerminal(nt(s))
                } else {
                    ProductionSymbol::Terminal(t(s))
                }
            })
            .collect()
    }

    #[test]
    fn add_production_declares_symbols() {
        let mut grammar = ContextFreeGrammar::new(nt("S"));
        grammar.add_production(nt("S"), word(&["a", "A"]));

        assert!(grammar.non_terminals.contains(&nt("A")));
        assert!(grammar.terminals.contains(&t("a")));
        assert!(grammar.validate().is_ok());
    }

    #[test]
    fn rejects_undeclared_start_symbol() {
        let grammar =
            ContextFreeGrammar::from_parts([nt("A")], [t("a")], [(nt("A"), word(&["a"]))], nt("S"));

        assert_eq!(
            grammar.validate(),
            Err(ValidationError::UndeclaredStartSymbol {
                start_symbol: nt("S")
            })
        );
    }

    #[test]
    fn rejects_undeclared_body_symbols() {
        let grammar = ContextFreeGrammar::from_parts(
            [nt("S")],
            [t("a")],
            [(nt("S"), word(&["a", "B"]))],
            nt("S"),
        );

        assert_eq!(
            grammar.validate(),
            Err(ValidationError::UndeclaredNonTerminal {
                lhs: nt("S"),
                body: word(&["a", "B"]),
                symbol: nt("B"),
            })
        );

        let grammar =
            ContextFreeGrammar::from_parts([nt("S")], [t("a")], [(nt("S"), word(&["c"]))], nt("S"));

        assert_eq!(
            grammar.validate(),
            Err(ValidationError::UndeclaredTerminal {
                lhs: nt("S"),
                body: word(&["c"]),
                symbol: t("c"),
            })
        );
    }

    #[test]
    fn rejects_symbols_used_as_both_kinds() {
        let grammar = ContextFreeGrammar::from_parts([nt("S"), nt("a")], [t("a")], [], nt("S"));

        assert!(matches!(
            grammar.validate(),
            Err(ValidationError::AmbiguousSymbol { .. })
        ));
    }

    #[test]
    fn rejects_productions_of_undeclared_owner() {
        let grammar =
            ContextFreeGrammar::from_parts([nt("S")], [t("a")], [(nt("Q"), word(&["a"]))], nt("S"));

        assert_eq!(
            grammar.validate(),
            Err(ValidationError::UndeclaredProductionOwner { lhs: nt("Q") })
        );
    }

    #[test]
    fn words_up_to_handles_erasing_and_unit_cycles() {
        // S → aSb | T, T → S | ε
        let mut grammar = ContextFreeGrammar::new(nt("S"));
        grammar.add_production(nt("S"), word(&["a", "S", "b"]));
        grammar.add_production(nt("S"), word(&["T"]));
        grammar.add_production(nt("T"), word(&["S"]));
        grammar.add_erasing_production(nt("T"));

        let words = grammar
            .words_up_to(4)
            .into_iter()
            .map(|word| word.to_string())
            .sorted()
            .collect::<Vec<_>>();

        assert_eq!(words, ["aabb", "ab", "ε"]);
    }

    #[test]
    fn definition_lists_start_symbol_first() {
        let mut grammar = ContextFreeGrammar::new(nt("S"));
        grammar.add_production(nt("A"), word(&["a"]));
        grammar.add_production(nt("S"), word(&["A", "A"]));
        grammar.add_erasing_production(nt("S"));

        assert_eq!(
            grammar.definition(),
            "G = ({S, A}, {a}, P, S)\n\nP = {\n  S → AA | ε\n  A → a\n}\n"
        );
    }
}
