use indexmap::{indexset, IndexMap, IndexSet};
use itertools::Itertools;
use log::{debug, trace};

use crate::{
    grammars::{context_free::ContextFreeGrammar, types::NonTerminal},
    language::Word,
};

impl ContextFreeGrammar {
    /// For every nonterminal `A`, the nonterminals `B` with `A ⇒* B` using
    /// only unit productions (including `A` itself).
    pub fn unit_pairs(&self) -> IndexMap<NonTerminal, IndexSet<NonTerminal>> {
        self.unit_pairs_fixpoint().0
    }

    pub(crate) fn unit_pairs_fixpoint(&self) -> (IndexMap<NonTerminal, IndexSet<NonTerminal>>, usize) {
        let mut pairs = self
            .non_terminals
            .iter()
            .map(|nt| (nt.clone(), indexset! {nt.clone()}))
            .collect::<IndexMap<_, _>>();
        let mut rounds = 0;

        loop {
            rounds += 1;
            let mut changed = false;

            for nt in &self.non_terminals {
                let reachable = pairs[nt]
                    .iter()
                    .filter_map(|member| self.productions.get(member))
                    .flatten()
                    .filter_map(Word::as_unit)
                    .flat_map(|target| pairs.get(target).into_iter().flatten())
                    .cloned()
                    .collect::<Vec<_>>();

                let closure = &mut pairs[nt];
                for target in reachable {
                    changed |= closure.insert(target);
                }
            }

            if !changed {
                break;
            }
        }

        (pairs, rounds)
    }

    /// Replaces unit productions `A → B` by the non-unit bodies of everything
    /// `A` reaches through unit productions.
    pub fn eliminate_unit_productions(&self) -> Self {
        debug!("Eliminating unit productions");

        let (pairs, rounds) = self.unit_pairs_fixpoint();

        let mut productions = IndexMap::with_capacity(self.productions.len());

        for (nt, closure) in &pairs {
            trace!("Unit pairs of {}: {{{}}}", nt, closure.iter().join(", "));

            let rhs = closure
                .iter()
                .filter_map(|member| self.productions.get(member).map(|rhs| (member, rhs)))
                .flat_map(|(member, rhs)| {
                    rhs.iter()
                        .filter(move |word| word.as_unit().is_none())
                        // ε stays with its owner so only the start symbol ever carries it.
                        .filter(move |word| !word.is_empty() || member == nt)
                })
                .cloned()
                .collect::<IndexSet<_>>();

            if rhs.is_empty() {
                debug!("{} has no productions left", nt);
            } else {
                productions.insert(nt.clone(), rhs);
            }
        }

        trace!("Unit pair closure took {} rounds", rounds);

        Self {
            start_symbol: self.start_symbol.clone(),
            non_terminals: self.non_terminals.clone(),
            terminals: self.terminals.clone(),
            productions,
        }
    }
}

#[cfg(test)]
mod tests {
    use indexmap::indexset;

    use crate::{
        grammars::{
            context_free::ContextFreeGrammar,
            types::{Grammar, NonTerminal},
        },
        notation::parse_body,
    };

    fn nt(name: &str) -> NonTerminal {
        NonTerminal::new(name)
    }

    #[test]
    fn unit_pairs_are_transitive_and_reflexive() {
        let grammar =
            ContextFreeGrammar::from_productions("S", &["S → A | a", "A → B", "B → S | b"])
                .unwrap();

        let pairs = grammar.unit_pairs();

        assert_eq!(pairs[&nt("S")], indexset! {nt("S"), nt("A"), nt("B")});
        assert_eq!(pairs[&nt("A")], indexset! {nt("S"), nt("A"), nt("B")});
        assert_eq!(pairs[&nt("B")], indexset! {nt("S"), nt("A"), nt("B")});
    }

    #[test]
    fn unit_pair_fixpoint_is_bounded_by_non_terminals() {
        let grammar = ContextFreeGrammar::from_productions(
            "E",
            &["E → D", "D → C", "C → B", "B → A", "A → a"],
        )
        .unwrap();

        let (pairs, rounds) = grammar.unit_pairs_fixpoint();

        assert_eq!(pairs[&nt("E")].len(), 5);
        assert!(rounds <= grammar.non_terminals().len() + 1);
    }

    #[test]
    fn replaces_unit_bodies() {
        let grammar = ContextFreeGrammar::from_productions(
            "S",
            &["S → aB | A", "A → a | BD | B", "B → b | BA", "D → BA"],
        )
        .unwrap();

        let result = grammar.eliminate_unit_productions();

        assert_eq!(
            result.rules(&nt("S")).unwrap(),
            &indexset! {
                parse_body("aB").unwrap(),
                parse_body("a").unwrap(),
                parse_body("BD").unwrap(),
                parse_body("b").unwrap(),
                parse_body("BA").unwrap(),
            }
        );
        assert_eq!(
            result.rules(&nt("A")).unwrap(),
            &indexset! {
                parse_body("a").unwrap(),
                parse_body("BD").unwrap(),
                parse_body("b").unwrap(),
                parse_body("BA").unwrap(),
            }
        );
        assert_eq!(grammar.words_up_to(5), result.words_up_to(5));
    }

    #[test]
    fn unit_cycles_disappear() {
        let grammar =
            ContextFreeGrammar::from_productions("S", &["S → A", "A → S | B", "B → S"]).unwrap();

        let result = grammar.eliminate_unit_productions();

        assert!(result.productions().is_empty());
    }

    #[test]
    fn erasing_body_stays_on_start_symbol() {
        let grammar = ContextFreeGrammar::from_productions("S", &["S → aS | ε", "A → S"])
            .unwrap()
            .eliminate_epsilon_productions();

        let result = grammar.eliminate_unit_productions();

        assert_eq!(result.erasing_productions().into_owned(), indexset! {nt("S")});
        assert_eq!(
            result.rules(&nt("A")).unwrap(),
            &indexset! {parse_body("aS").unwrap(), parse_body("a").unwrap()}
        );
    }
}
