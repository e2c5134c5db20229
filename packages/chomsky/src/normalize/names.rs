use crate::{
    grammars::{
        context_free::ContextFreeGrammar,
        types::{NonTerminal, Terminal},
    },
    language::Symbol,
};

/// Source of fresh nonterminal names for one normalization run.
///
/// The counter only ever grows, and every candidate is checked against the
/// grammar it is meant for, so generated names never collide with existing
/// symbols or with each other.
#[derive(Debug, Clone)]
pub struct NameSupply {
    next: usize,
}

impl NameSupply {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Returns the next free `X{n}`.
    pub fn fresh(&mut self, grammar: &ContextFreeGrammar) -> NonTerminal {
        loop {
            let symbol = Symbol::new(format!("X{}", self.next));
            self.next += 1;

            if !grammar.declares(&symbol) {
                return NonTerminal(symbol);
            }
        }
    }

    /// Returns `T_{terminal}`, or a numbered variant of it when that name is
    /// already taken.
    pub fn terminal_proxy(
        &mut self,
        terminal: &Terminal,
        grammar: &ContextFreeGrammar,
    ) -> NonTerminal {
        let symbol = Symbol::new(format!("T_{}", terminal));
        if !grammar.declares(&symbol) {
            return NonTerminal(symbol);
        }

        loop {
            let symbol = Symbol::new(format!("T_{}_{}", terminal, self.next));
            self.next += 1;

            if !grammar.declares(&symbol) {
                return NonTerminal(symbol);
            }
        }
    }
}

impl Default for NameSupply {
    fn default() -> Self {
        Self::new()
    }
}
