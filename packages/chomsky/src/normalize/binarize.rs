use log::{debug, trace};

use super::NameSupply;
use crate::{grammars::context_free::ContextFreeGrammar, language::Word};

impl ContextFreeGrammar {
    /// Splits every body longer than two symbols into a right-branching chain
    /// of binary productions: `A → s1 s2 … sk` becomes `A → s1 X1`,
    /// `X1 → s2 X2`, …, `X(k-2) → s(k-1) sk`.
    pub fn binarize(&self, names: &mut NameSupply) -> Self {
        debug!("Binarizing productions");

        let mut grammar = Self {
            start_symbol: self.start_symbol.clone(),
            non_terminals: self.non_terminals.clone(),
            terminals: self.terminals.clone(),
            productions: Default::default(),
        };

        for (lhs, rhs) in &self.productions {
            for word in rhs {
                if word.len() <= 2 {
                    grammar.insert_production(lhs.clone(), word.clone());
                    continue;
                }

                let (head, tail) = word.0.split_at(word.len() - 2);
                let mut owner = lhs.clone();

                for symbol in head {
                    let next = names.fresh(&grammar);
                    grammar.non_terminals.insert(next.clone());

                    grammar.insert_production(owner, Word(vec![symbol.clone(), next.clone().into()]));
                    owner = next;
                }

                trace!("Split {} → {} ending in {}", lhs, word, owner);
                grammar.insert_production(owner, Word(tail.to_vec()));
            }
        }

        grammar
    }
}
