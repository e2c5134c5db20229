use std::collections::VecDeque;

use indexmap::{indexset, IndexSet};
use itertools::Itertools;
use log::{debug, trace};

use crate::grammars::{context_free::ContextFreeGrammar, types::NonTerminal};

impl ContextFreeGrammar {
    /// Nonterminals reachable from the start symbol, in breadth-first order.
    pub fn accessible_non_terminals(&self) -> IndexSet<NonTerminal> {
        let mut accessible = indexset! {self.start_symbol.clone()};
        let mut queue = VecDeque::from([&self.start_symbol]);

        while let Some(current) = queue.pop_front() {
            for word in self.productions.get(current).into_iter().flatten() {
                for nt in word.non_terminals() {
                    if accessible.insert(nt.clone()) {
                        queue.push_back(nt);
                    }
                }
            }
        }

        accessible
    }

    /// Removes every nonterminal the start symbol cannot reach, together with
    /// its productions and any terminal only those productions used.
    pub fn remove_inaccessible_symbols(&self) -> Self {
        debug!("Removing inaccessible symbols");

        let accessible = self.accessible_non_terminals();
        trace!("Accessible non-terminals: {{{}}}", accessible.iter().join(", "));

        let inaccessible = self
            .non_terminals
            .iter()
            .filter(|nt| !accessible.contains(*nt))
            .collect::<Vec<_>>();
        if !inaccessible.is_empty() {
            debug!("Removing {}", inaccessible.iter().join(", "));
        }

        let mut grammar = Self {
            start_symbol: self.start_symbol.clone(),
            non_terminals: self
                .non_terminals
                .iter()
                .filter(|nt| accessible.contains(*nt))
                .cloned()
                .collect(),
            terminals: self.terminals.clone(),
            productions: self
                .productions
                .iter()
                .filter(|(lhs, _)| accessible.contains(*lhs))
                .map(|(lhs, rhs)| (lhs.clone(), rhs.clone()))
                .collect(),
        };
        grammar.retain_used_terminals();

        grammar
    }
}

#[cfg(test)]
mod tests {
    use indexmap::indexset;

    use crate::grammars::{
        context_free::ContextFreeGrammar,
        types::{Grammar, NonTerminal, Terminal},
    };

    fn nt(name: &str) -> NonTerminal {
        NonTerminal::new(name)
    }

    #[test]
    fn follows_bodies_from_the_start_symbol() {
        let grammar = ContextFreeGrammar::from_productions(
            "S",
            &["S → aA", "A → Bb | a", "B → b", "C → cS"],
        )
        .unwrap();

        assert_eq!(
            grammar.accessible_non_terminals(),
            indexset! {nt("S"), nt("A"), nt("B")}
        );
    }

    #[test]
    fn drops_unreachable_productions_and_terminals() {
        let grammar = ContextFreeGrammar::from_productions(
            "S",
            &["S → aA", "A → a", "C → cS", "D → d"],
        )
        .unwrap();

        let result = grammar.remove_inaccessible_symbols();

        assert_eq!(result.non_terminals().into_owned(), indexset! {nt("S"), nt("A")});
        assert_eq!(result.terminals().into_owned(), indexset! {Terminal::new("a")});
        assert!(result.rules(&nt("C")).is_none());
        assert!(result
            .non_terminals()
            .is_subset(grammar.non_terminals().as_ref()));
    }

    #[test]
    fn keeps_start_symbol_without_productions() {
        let grammar = ContextFreeGrammar::from_productions("S", &["A → a"]).unwrap();

        let result = grammar.remove_inaccessible_symbols();

        assert_eq!(result.non_terminals().into_owned(), indexset! {nt("S")});
        assert!(result.productions().is_empty());
        assert!(result.validate().is_ok());
    }
}
