use indexmap::{IndexMap, IndexSet};
use itertools::Itertools;
use log::{debug, trace};

use super::saturate;
use crate::{
    grammars::{
        context_free::ContextFreeGrammar,
        types::{NonTerminal, ProductionSymbol},
    },
    language::Word,
};

impl ContextFreeGrammar {
    /// Nonterminals that can derive the empty word.
    pub fn nullable_non_terminals(&self) -> IndexSet<NonTerminal> {
        self.nullable_fixpoint().0
    }

    pub(crate) fn nullable_fixpoint(&self) -> (IndexSet<NonTerminal>, usize) {
        saturate(&self.productions, |symbol, nullable| match symbol {
            ProductionSymbol::NonTerminal(nt) => nullable.contains(nt),
            ProductionSymbol::Terminal(_) => false,
        })
    }

    /// Removes every erasing production. Each body is replaced by all the
    /// variants obtained by dropping any subset of its nullable symbols. If the
    /// start symbol is nullable it keeps a single `S → ε`.
    pub fn eliminate_epsilon_productions(&self) -> Self {
        debug!("Eliminating ε-productions");

        let (nullable, rounds) = self.nullable_fixpoint();
        trace!(
            "Nullable non-terminals after {} rounds: {{{}}}",
            rounds,
            nullable.iter().join(", ")
        );

        let mut productions = IndexMap::with_capacity(self.productions.len());

        for (lhs, rhs) in &self.productions {
            let mut next_productions = IndexSet::new();

            for word in rhs {
                let words = word
                    .iter()
                    .cloned()
                    .map(|symbol| {
                        let erasable = symbol
                            .as_non_terminal()
                            .is_some_and(|nt| nullable.contains(nt));

                        if erasable {
                            vec![Some(symbol), None]
                        } else {
                            vec![Some(symbol)]
                        }
                    })
                    .multi_cartesian_product()
                    .filter_map(|word| {
                        let word = word.into_iter().flatten().collect::<Word<_>>();
                        if word.is_empty() {
                            None
                        } else {
                            Some(word)
                        }
                    });

                next_productions.extend(words);
            }

            if next_productions.is_empty() {
                debug!("{} has no productions left", lhs);
            } else {
                productions.insert(lhs.clone(), next_productions);
            }
        }

        if nullable.contains(&self.start_symbol) {
            trace!("Keeping {} → ε", self.start_symbol);
            productions
                .entry(self.start_symbol.clone())
                .or_insert_with(IndexSet::new)
                .insert(Word::empty());
        }

        Self {
            start_symbol: self.start_symbol.clone(),
            non_terminals: self.non_terminals.clone(),
            terminals: self.terminals.clone(),
            productions,
        }
    }
}
