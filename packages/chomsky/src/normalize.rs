//! Conversion of arbitrary context-free grammars into Chomsky normal form.
//!
//! Every stage is a method on [`ContextFreeGrammar`] that takes the grammar
//! by reference and returns a new one, so each can be run and inspected on
//! its own. [`Pipeline`] chains them in the required order.

mod accessible;
mod binarize;
mod epsilon;
mod names;
mod pipeline;
mod productive;
mod terminals;
mod unit;

use indexmap::{IndexMap, IndexSet};

pub use self::{
    names::NameSupply,
    pipeline::{Pipeline, Stage},
};
use crate::{
    grammars::types::{NonTerminal, ProductionSymbol},
    language::Word,
};

/// Marks every nonterminal that owns a body whose symbols are all admitted,
/// repeating until a full round marks nothing new. Returns the marked set and
/// the number of rounds it took.
fn saturate(
    productions: &IndexMap<NonTerminal, IndexSet<Word<ProductionSymbol>>>,
    admits: impl Fn(&ProductionSymbol, &IndexSet<NonTerminal>) -> bool,
) -> (IndexSet<NonTerminal>, usize) {
    let mut marked = IndexSet::new();
    let mut rounds = 0;

    loop {
        rounds += 1;
        let mut changed = false;

        'outer: for (lhs, rhs) in productions {
            if marked.contains(lhs) {
                continue;
            }

            for word in rhs {
                if word.iter().all(|symbol| admits(symbol, &marked)) {
                    marked.insert(lhs.clone());

                    changed = true;
                    continue 'outer;
                }
            }
        }

        if !changed {
            break;
        }
    }

    (marked, rounds)
}
