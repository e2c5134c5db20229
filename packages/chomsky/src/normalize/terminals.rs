use indexmap::IndexMap;
use log::{debug, trace};

use super::NameSupply;
use crate::{
    grammars::{
        context_free::ContextFreeGrammar,
        types::{NonTerminal, ProductionSymbol, Terminal},
    },
    language::Word,
};

impl ContextFreeGrammar {
    /// Replaces the terminals of two-symbol bodies with dedicated nonterminals
    /// `T_a → a`, created once per terminal. Single-symbol bodies are left
    /// alone.
    pub fn isolate_terminals(&self, names: &mut NameSupply) -> Self {
        debug!("Isolating terminals in binary productions");

        let mut grammar = Self {
            start_symbol: self.start_symbol.clone(),
            non_terminals: self.non_terminals.clone(),
            terminals: self.terminals.clone(),
            productions: Default::default(),
        };
        let mut proxies: IndexMap<Terminal, NonTerminal> = IndexMap::new();

        for (lhs, rhs) in &self.productions {
            for word in rhs {
                if word.len() != 2 {
                    grammar.insert_production(lhs.clone(), word.clone());
                    continue;
                }

                let mut symbols = Vec::with_capacity(2);

                for symbol in word.iter() {
                    match symbol {
                        ProductionSymbol::Terminal(t) => {
                            let proxy = match proxies.get(t) {
                                Some(proxy) => proxy.clone(),
                                None => {
                                    let proxy = names.terminal_proxy(t, &grammar);
                                    trace!("Introducing {} → {}", proxy, t);

                                    grammar.non_terminals.insert(proxy.clone());
                                    proxies.insert(t.clone(), proxy.clone());
                                    proxy
                                }
                            };

                            symbols.push(ProductionSymbol::NonTerminal(proxy));
                        }
                        ProductionSymbol::NonTerminal(_) => symbols.push(symbol.clone()),
                    }
                }

                grammar.insert_production(lhs.clone(), Word(symbols));
            }
        }

        for (terminal, proxy) in proxies {
            grammar.insert_production(proxy, Word(vec![ProductionSymbol::Terminal(terminal)]));
        }

        grammar
    }
}
