use derive_more::{Display, Error, From};

use crate::{
    grammars::types::{NonTerminal, ProductionSymbol, Terminal},
    language::{Symbol, Word},
};

/// A grammar value breaks one of the structural invariants every stage relies on.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[display("start symbol {start_symbol} is not a declared non-terminal")]
    UndeclaredStartSymbol { start_symbol: NonTerminal },

    #[display("productions are given for {lhs}, which is not a declared non-terminal")]
    UndeclaredProductionOwner { lhs: NonTerminal },

    #[display("production {lhs} → {body} uses undeclared non-terminal {symbol}")]
    UndeclaredNonTerminal {
        lhs: NonTerminal,
        body: Word<ProductionSymbol>,
        symbol: NonTerminal,
    },

    #[display("production {lhs} → {body} uses undeclared terminal {symbol}")]
    UndeclaredTerminal {
        lhs: NonTerminal,
        body: Word<ProductionSymbol>,
        symbol: Terminal,
    },

    #[display("symbol {symbol} is declared both as a terminal and as a non-terminal")]
    AmbiguousSymbol { symbol: Symbol },
}

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
#[display("production {lhs} → {body} is not in Chomsky normal form: {reason}")]
pub struct NormalFormError {
    pub lhs: NonTerminal,
    pub body: Word<ProductionSymbol>,
    pub reason: String,
}

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
#[display("cannot read production \"{line}\": {message}")]
pub struct NotationError {
    pub line: String,
    pub message: String,
}

#[derive(Debug, Display, Error, From)]
pub enum Error {
    Validation(ValidationError),
    NormalForm(NormalFormError),
    Notation(NotationError),
}
