//! Reader for the usual production notation, one line per nonterminal:
//!
//! ```text
//! S → aB | DA
//! D → ε | BA
//! ```
//!
//! A symbol is an ASCII letter followed by any number of digits or primes,
//! so `bDAB` is four symbols and `X12 a` is two. Symbols starting with an
//! uppercase letter are nonterminals, everything else is a terminal.

use winnow::{
    ascii::space0,
    combinator::{alt, delimited, preceded, repeat, separated, terminated},
    prelude::*,
    token::{one_of, take_while},
    ModalResult,
};

use crate::{
    error::NotationError,
    grammars::{
        context_free::ContextFreeGrammar,
        types::{NonTerminal, ProductionSymbol, Terminal},
    },
    language::{Word, EPSILON},
};

fn symbol(input: &mut &str) -> ModalResult<ProductionSymbol> {
    (
        one_of(|c: char| c.is_ascii_alphabetic()),
        take_while(0.., |c: char| c.is_ascii_digit() || c == '\''),
    )
        .take()
        .map(|name: &str| {
            if name.starts_with(|c: char| c.is_ascii_uppercase()) {
                ProductionSymbol::NonTerminal(NonTerminal::new(name))
            } else {
                ProductionSymbol::Terminal(Terminal::new(name))
            }
        })
        .parse_next(input)
}

fn non_terminal(input: &mut &str) -> ModalResult<NonTerminal> {
    symbol
        .verify_map(|symbol| match symbol {
            ProductionSymbol::NonTerminal(nt) => Some(nt),
            ProductionSymbol::Terminal(_) => None,
        })
        .parse_next(input)
}

fn body(input: &mut &str) -> ModalResult<Word<ProductionSymbol>> {
    delimited(
        space0,
        alt((
            alt((EPSILON, "epsilon")).value(Word::empty()),
            repeat(1.., terminated(symbol, space0)).map(Word),
        )),
        space0,
    )
    .parse_next(input)
}

fn production(input: &mut &str) -> ModalResult<(NonTerminal, Vec<Word<ProductionSymbol>>)> {
    (
        delimited(space0, non_terminal, space0),
        preceded(alt(("→", "->")), separated(1.., body, '|')),
    )
        .parse_next(input)
}

/// Reads a single production body such as `aB`, `X1 T_a` or `ε`.
pub fn parse_body(text: &str) -> Result<Word<ProductionSymbol>, NotationError> {
    body.parse(text).map_err(|e| NotationError {
        line: text.to_owned(),
        message: e.to_string(),
    })
}

impl ContextFreeGrammar {
    /// Builds a grammar from production lines, declaring every symbol that
    /// appears in them.
    pub fn from_productions<S: AsRef<str>>(
        start_symbol: S,
        productions: &[impl AsRef<str>],
    ) -> Result<Self, NotationError> {
        let start_symbol = delimited(space0, non_terminal, space0)
            .parse(start_symbol.as_ref())
            .map_err(|e| NotationError {
                line: start_symbol.as_ref().to_owned(),
                message: e.to_string(),
            })?;

        let mut grammar = Self::new(start_symbol);

        for line in productions {
            let line = line.as_ref();
            let (lhs, bodies) = production.parse(line).map_err(|e| NotationError {
                line: line.to_owned(),
                message: e.to_string(),
            })?;

            for body in bodies {
                grammar.add_production(lhs.clone(), body);
            }
        }

        Ok(grammar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammars::types::Grammar;

    #[test]
    fn splits_single_letter_symbols() {
        let word = parse_body("bDAB").unwrap();

        assert_eq!(word.len(), 4);
        assert_eq!(
            word.0[1],
            ProductionSymbol::NonTerminal(NonTerminal::new("D"))
        );
        assert_eq!(word.0[0], ProductionSymbol::Terminal(Terminal::new("b")));
    }

    #[test]
    fn reads_numbered_and_primed_symbols() {
        let word = parse_body(" X12 a S' ").unwrap();

        assert_eq!(
            word.0,
            vec![
                ProductionSymbol::NonTerminal(NonTerminal::new("X12")),
                ProductionSymbol::Terminal(Terminal::new("a")),
                ProductionSymbol::NonTerminal(NonTerminal::new("S'")),
            ]
        );
    }

    #[test]
    fn reads_epsilon_spellings() {
        assert!(parse_body("ε").unwrap().is_empty());
        assert!(parse_body("epsilon").unwrap().is_empty());
    }

    #[test]
    fn reads_productions() {
        let grammar =
            ContextFreeGrammar::from_productions("S", &["S → aB | DA", "D -> ε | BA"]).unwrap();

        assert_eq!(grammar.productions().len(), 2);
        assert_eq!(grammar.production_count(), 4);
        assert_eq!(grammar.erasing_productions().len(), 1);
        assert!(grammar.validate().is_ok());
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(ContextFreeGrammar::from_productions("S", &["S aB"]).is_err());
        assert!(ContextFreeGrammar::from_productions("S", &["a → b"]).is_err());
        assert!(ContextFreeGrammar::from_productions("S", &["S → a |"]).is_err());
        assert!(ContextFreeGrammar::from_productions("s", &["S → a"]).is_err());
    }
}
