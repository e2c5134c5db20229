#![allow(dead_code)]

use chomsky::grammar::{ContextFreeGrammar, Grammar, ProductionSymbol, Terminal, Word};
use itertools::Itertools;

/// Reads a grammar written in production notation.
pub fn grammar(start: &str, productions: &[&str]) -> ContextFreeGrammar {
    ContextFreeGrammar::from_productions(start, productions)
        .unwrap_or_else(|e| panic!("test grammar should parse: {e}"))
}

/// The grammar of the worked example: `C` is unreachable and `D` is nullable.
pub fn variant_13() -> ContextFreeGrammar {
    grammar(
        "S",
        &[
            "S → aB | DA",
            "A → a | BD | bDAB",
            "B → b | BA",
            "D → ε | BA",
            "C → BA",
        ],
    )
}

/// Asserts every production is `A → a`, `A → BC`, or the start symbol's `S → ε`.
pub fn assert_chomsky_shape(grammar: &ContextFreeGrammar) {
    for (lhs, rhs) in grammar.productions() {
        for word in rhs {
            match word.0.as_slice() {
                [] => assert_eq!(lhs, grammar.start_symbol(), "{lhs} → ε is not allowed"),
                [ProductionSymbol::Terminal(_)] => {}
                [ProductionSymbol::NonTerminal(_), ProductionSymbol::NonTerminal(_)] => {}
                _ => panic!("{lhs} → {word} is not in Chomsky normal form"),
            }
        }
    }
}

/// Every word over `alphabet` with length at most `max_len`, the empty word included.
pub fn all_words(alphabet: &[&str], max_len: usize) -> Vec<Word<Terminal>> {
    (0..=max_len)
        .flat_map(|len| {
            (0..len)
                .map(|_| alphabet.iter().map(|&t| Terminal::new(t)))
                .multi_cartesian_product()
                .map(Word)
                .collect::<Vec<_>>()
        })
        .chain(std::iter::once(Word::empty()))
        .unique()
        .collect()
}
