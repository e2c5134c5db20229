use std::{borrow::Cow, fmt::Display};

use indexmap::{indexset, IndexMap, IndexSet};
use itertools::Itertools;
use tabled::{builder::Builder, settings::Style};

use crate::{
    error::NormalFormError,
    grammars::{
        context_free::ContextFreeGrammar,
        types::{Grammar, NonTerminal, ProductionSymbol, ProductionWord, Terminal},
    },
    language::Word,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CnfWord {
    Terminal(Terminal),
    NonTerminals(NonTerminal, NonTerminal),
}

impl Display for CnfWord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_word())
    }
}

impl TryFrom<Word<ProductionSymbol>> for CnfWord {
    type Error = String;

    fn try_from(value: Word<ProductionSymbol>) -> Result<Self, Self::Error> {
        match value.0.as_slice() {
            [ProductionSymbol::Terminal(t)] => Ok(CnfWord::Terminal(t.clone())),
            [ProductionSymbol::NonTerminal(_)] => Err("Expected a terminal".to_string()),
            [ProductionSymbol::NonTerminal(nt1), ProductionSymbol::NonTerminal(nt2)] => {
                Ok(CnfWord::NonTerminals(nt1.clone(), nt2.clone()))
            }
            [_, _] => Err("Expected two non-terminals".to_string()),
            _ => Err(
                "CnfWord can only be created from a word with one terminal or two non-terminals"
                    .to_string(),
            ),
        }
    }
}

impl ProductionWord for CnfWord {
    fn to_word(&self) -> Word<ProductionSymbol> {
        match self {
            CnfWord::Terminal(t) => Word(vec![ProductionSymbol::Terminal(t.clone())]),
            CnfWord::NonTerminals(nt1, nt2) => Word(vec![
                ProductionSymbol::NonTerminal(nt1.clone()),
                ProductionSymbol::NonTerminal(nt2.clone()),
            ]),
        }
    }
}

/// A grammar whose productions are all `A → a` or `A → BC`, plus possibly
/// `S → ε` for the start symbol.
#[derive(Debug, Clone)]
pub struct ChomskyNormalFormGrammar {
    pub(super) start_symbol: NonTerminal,
    pub(super) is_start_symbol_erasable: bool,
    pub(super) productions: IndexMap<NonTerminal, IndexSet<CnfWord>>,
}

impl Grammar<CnfWord> for ChomskyNormalFormGrammar {
    fn start_symbol(&self) -> &NonTerminal {
        &self.start_symbol
    }

    fn non_terminals(&self) -> Cow<'_, IndexSet<NonTerminal>> {
        let mut non_terminals = indexset! {self.start_symbol.clone()};

        for (lhs, rhs) in &self.productions {
            non_terminals.insert(lhs.clone());
            for word in rhs {
                if let CnfWord::NonTerminals(nt1, nt2) = word {
                    non_terminals.insert(nt1.clone());
                    non_terminals.insert(nt2.clone());
                }
            }
        }

        Cow::Owned(non_terminals)
    }

    fn terminals(&self) -> Cow<'_, IndexSet<Terminal>> {
        Cow::Owned(
            self.productions
                .values()
                .flatten()
                .filter_map(|word| match word {
                    CnfWord::Terminal(t) => Some(t.clone()),
                    CnfWord::NonTerminals(..) => None,
                })
                .collect(),
        )
    }

    fn erasing_productions(&self) -> Cow<'_, IndexSet<NonTerminal>> {
        Cow::Owned(if self.is_start_symbol_erasable {
            indexset! {self.start_symbol.clone()}
        } else {
            IndexSet::new()
        })
    }

    fn productions(&self) -> &IndexMap<NonTerminal, IndexSet<CnfWord>> {
        &self.productions
    }
}

impl TryFrom<&ContextFreeGrammar> for ChomskyNormalFormGrammar {
    type Error = NormalFormError;

    fn try_from(cfg: &ContextFreeGrammar) -> Result<Self, Self::Error> {
        let mut cnf = Self {
            start_symbol: cfg.start_symbol.clone(),
            is_start_symbol_erasable: false,
            productions: IndexMap::new(),
        };

        for (lhs, rhs) in &cfg.productions {
            for word in rhs {
                if word.is_empty() {
                    if lhs != &cfg.start_symbol {
                        return Err(NormalFormError {
                            lhs: lhs.clone(),
                            body: word.clone(),
                            reason: "only the start symbol may be erasable".to_string(),
                        });
                    }

                    cnf.is_start_symbol_erasable = true;
                    continue;
                }

                let cnf_word = CnfWord::try_from(word.clone()).map_err(|reason| NormalFormError {
                    lhs: lhs.clone(),
                    body: word.clone(),
                    reason,
                })?;

                cnf.productions
                    .entry(lhs.clone())
                    .or_insert_with(IndexSet::new)
                    .insert(cnf_word);
            }
        }

        Ok(cnf)
    }
}

impl From<&ChomskyNormalFormGrammar> for ContextFreeGrammar {
    fn from(cnf: &ChomskyNormalFormGrammar) -> Self {
        let mut grammar = ContextFreeGrammar::new(cnf.start_symbol.clone());

        for (lhs, rhs) in &cnf.productions {
            for word in rhs {
                grammar.add_production(lhs.clone(), word.to_word());
            }
        }

        if cnf.is_start_symbol_erasable {
            grammar.add_erasing_production(cnf.start_symbol.clone());
        }

        grammar
    }
}

impl Display for ChomskyNormalFormGrammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.definition())
    }
}

#[derive(Debug)]
pub struct CykTable {
    table: Vec<Vec<IndexSet<NonTerminal>>>,
    word: Word<Terminal>,
    start_symbol: NonTerminal,
    is_start_symbol_erasable: bool,
}

impl CykTable {
    fn new(word: Word<Terminal>, cnf: &ChomskyNormalFormGrammar) -> Self {
        let size = word.len();

        CykTable {
            table: vec![vec![IndexSet::new(); size]; size],
            word,
            start_symbol: cnf.start_symbol.clone(),
            is_start_symbol_erasable: cnf.is_start_symbol_erasable,
        }
    }

    pub fn contains(&self, i: usize, j: usize, value: &NonTerminal) -> bool {
        self.table[i][j].contains(value)
    }

    pub fn get(&self, i: usize, j: usize) -> &IndexSet<NonTerminal> {
        &self.table[i][j]
    }

    fn insert(&mut self, i: usize, j: usize, value: NonTerminal) {
        self.table[i][j].insert(value);
    }

    pub fn is_word_in_language(&self) -> bool {
        match self.table.len() {
            0 => self.is_start_symbol_erasable,
            n => self.table[0][n - 1].contains(&self.start_symbol),
        }
    }
}

impl Display for CykTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "CYK Table for word \"{}\":", self.word)?;

        if !self.table.is_empty() {
            let mut builder = Builder::default();

            for (i, row) in self.table.iter().enumerate() {
                builder.push_record(row.iter().enumerate().map(|(j, s)| {
                    if j >= i {
                        format!(
                            "V_{},{} = {}",
                            i + 1,
                            j + 1,
                            if s.is_empty() {
                                "∅".to_string()
                            } else {
                                format!("{{{}}}", s.iter().join(", "))
                            }
                        )
                    } else {
                        String::new()
                    }
                }));
            }

            builder.insert_record(0, (1..=self.table.len()).map(|j| format!("j = {}", j)));
            builder.insert_column(
                0,
                std::iter::once(String::new())
                    .chain((1..=self.table.len()).map(|i| format!("i = {}", i))),
            );

            let mut table = builder.build();
            table.with(Style::rounded());

            writeln!(f, "{}", table)?;
        }

        writeln!(
            f,
            "The word \"{}\" is {} in the language defined by the grammar.",
            self.word,
            if self.is_word_in_language() {
                "accepted"
            } else {
                "not accepted"
            },
        )?;

        Ok(())
    }
}

impl ChomskyNormalFormGrammar {
    pub fn is_start_symbol_erasable(&self) -> bool {
        self.is_start_symbol_erasable
    }

    /// Fills the CYK table of `word`: cell `(i, j)` holds every nonterminal
    /// deriving the terminals `i..=j`.
    pub fn cyk(&self, word: impl Into<Word<Terminal>>) -> CykTable {
        let word = word.into();
        let n = word.len();
        let terminals = word.0.clone();
        let mut table = CykTable::new(word, self);

        for (lhs, rhs) in &self.productions {
            for cnf_word in rhs {
                if let CnfWord::Terminal(t) = cnf_word {
                    for i in terminals.iter().positions(|terminal| terminal == t) {
                        table.insert(i, i, lhs.clone());
                    }
                }
            }
        }

        for d in 1..n {
            for i in 0..n - d {
                let j = i + d;

                for k in i..j {
                    for (lhs, rhs) in &self.productions {
                        for cnf_word in rhs {
                            if let CnfWord::NonTerminals(nt1, nt2) = cnf_word {
                                if table.contains(i, k, nt1) && table.contains(k + 1, j, nt2) {
                                    table.insert(i, j, lhs.clone());
                                }
                            }
                        }
                    }
                }
            }
        }

        table
    }

    pub fn accepts(&self, word: impl Into<Word<Terminal>>) -> bool {
        self.cyk(word).is_word_in_language()
    }
}
