use indexmap::{IndexMap, IndexSet};
use itertools::Itertools;
use log::{debug, trace};

use super::saturate;
use crate::grammars::{
    context_free::ContextFreeGrammar,
    types::{NonTerminal, ProductionSymbol},
};

impl ContextFreeGrammar {
    /// Nonterminals that derive at least one terminal word.
    pub fn productive_non_terminals(&self) -> IndexSet<NonTerminal> {
        self.productive_fixpoint().0
    }

    pub(crate) fn productive_fixpoint(&self) -> (IndexSet<NonTerminal>, usize) {
        saturate(&self.productions, |symbol, productive| match symbol {
            ProductionSymbol::Terminal(_) => true,
            ProductionSymbol::NonTerminal(nt) => productive.contains(nt),
        })
    }

    /// Removes every nonterminal that cannot derive a terminal word, and every
    /// production mentioning one.
    ///
    /// A non-productive start symbol leaves a grammar without productions,
    /// which describes the empty language. The start symbol itself stays
    /// declared.
    pub fn remove_non_productive_symbols(&self) -> Self {
        debug!("Removing non-productive symbols");

        let (productive, rounds) = self.productive_fixpoint();
        trace!(
            "Productive non-terminals after {} rounds: {{{}}}",
            rounds,
            productive.iter().join(", ")
        );

        let non_productive = self
            .non_terminals
            .iter()
            .filter(|nt| !productive.contains(*nt))
            .collect::<Vec<_>>();
        if !non_productive.is_empty() {
            debug!("Removing {}", non_productive.iter().join(", "));
        }

        if !productive.contains(&self.start_symbol) {
            debug!(
                "Start symbol {} is not productive, the language is empty",
                self.start_symbol
            );
        }

        let productions = self
            .productions
            .iter()
            .filter(|(lhs, _)| productive.contains(*lhs))
            .filter_map(|(lhs, rhs)| {
                let rhs = rhs
                    .iter()
                    .filter(|word| word.non_terminals().all(|nt| productive.contains(nt)))
                    .cloned()
                    .collect::<IndexSet<_>>();

                (!rhs.is_empty()).then(|| (lhs.clone(), rhs))
            })
            .collect::<IndexMap<_, _>>();

        let mut grammar = Self {
            start_symbol: self.start_symbol.clone(),
            non_terminals: self
                .non_terminals
                .iter()
                .filter(|nt| productive.contains(*nt) || **nt == self.start_symbol)
                .cloned()
                .collect(),
            terminals: self.terminals.clone(),
            productions,
        };
        grammar.retain_used_terminals();

        grammar
    }
}

#[cfg(test)]
mod tests {
    use indexmap::indexset;

    use crate::{
        grammars::{
            context_free::ContextFreeGrammar,
            types::{Grammar, NonTerminal},
        },
        notation::parse_body,
    };

    fn nt(name: &str) -> NonTerminal {
        NonTerminal::new(name)
    }

    #[test]
    fn finds_productive_non_terminals() {
        let grammar = ContextFreeGrammar::from_productions(
            "S",
            &["S → AB | a", "A → aA", "B → b | BC", "C → c"],
        )
        .unwrap();

        assert_eq!(
            grammar.productive_non_terminals(),
            indexset! {nt("S"), nt("B"), nt("C")}
        );
    }

    #[test]
    fn productive_fixpoint_is_bounded_by_non_terminals() {
        let grammar = ContextFreeGrammar::from_productions(
            "S",
            &["S → aA", "A → aB", "B → aC", "C → c"],
        )
        .unwrap();

        let (productive, rounds) = grammar.productive_fixpoint();

        assert_eq!(productive.len(), 4);
        assert!(rounds <= grammar.non_terminals().len() + 1);
    }

    #[test]
    fn drops_productions_using_dead_symbols() {
        let grammar = ContextFreeGrammar::from_productions(
            "S",
            &["S → AB | a", "A → aA | d", "B → bB"],
        )
        .unwrap();

        let result = grammar.remove_non_productive_symbols();

        assert_eq!(result.non_terminals().into_owned(), indexset! {nt("S"), nt("A")});
        assert_eq!(result.rules(&nt("S")).unwrap(), &indexset! {parse_body("a").unwrap()});
        assert!(result.rules(&nt("B")).is_none());
        assert!(!result.terminals().iter().any(|t| t.0.as_str() == "b"));
        assert!(result
            .non_terminals()
            .is_subset(grammar.non_terminals().as_ref()));
    }

    #[test]
    fn empty_language_is_not_an_error() {
        let grammar = ContextFreeGrammar::from_productions("S", &["S → aS | A", "A → bA"]).unwrap();

        let result = grammar.remove_non_productive_symbols();

        assert!(result.productions().is_empty());
        assert!(result.is_empty_language());
        assert!(result.validate().is_ok());
        assert!(result.words_up_to(4).is_empty());
    }
}
