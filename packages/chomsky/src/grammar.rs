pub use crate::{
    grammars::{
        chomsky_normal_form::{ChomskyNormalFormGrammar, CnfWord, CykTable},
        context_free::ContextFreeGrammar,
        types::{Grammar, NonTerminal, ProductionSymbol, ProductionWord, Terminal},
    },
    language::{Symbol, Word, EPSILON},
    normalize::{NameSupply, Pipeline, Stage},
};
