use derive_more::Display;
use log::{debug, info, trace};

use super::NameSupply;
use crate::{
    error::{Error, ValidationError},
    grammars::{chomsky_normal_form::ChomskyNormalFormGrammar, context_free::ContextFreeGrammar},
};

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    #[display("ε-production elimination")]
    EpsilonElimination,
    #[display("unit production elimination")]
    UnitElimination,
    #[display("inaccessible symbol removal")]
    Accessibility,
    #[display("non-productive symbol removal")]
    Productivity,
    #[display("binarization")]
    Binarization,
    #[display("terminal isolation")]
    TerminalIsolation,
}

impl Stage {
    /// The stages in the order a [`Pipeline`] applies them.
    pub const ALL: [Stage; 6] = [
        Stage::EpsilonElimination,
        Stage::UnitElimination,
        Stage::Accessibility,
        Stage::Productivity,
        Stage::Binarization,
        Stage::TerminalIsolation,
    ];

    pub fn apply(self, grammar: &ContextFreeGrammar, names: &mut NameSupply) -> ContextFreeGrammar {
        match self {
            Stage::EpsilonElimination => grammar.eliminate_epsilon_productions(),
            Stage::UnitElimination => grammar.eliminate_unit_productions(),
            Stage::Accessibility => grammar.remove_inaccessible_symbols(),
            Stage::Productivity => grammar.remove_non_productive_symbols(),
            Stage::Binarization => grammar.binarize(names),
            Stage::TerminalIsolation => grammar.isolate_terminals(names),
        }
    }
}

type Observer<'a> = Box<dyn FnMut(Stage, &ContextFreeGrammar) + 'a>;

/// Runs every normalization stage in order, reporting each intermediate
/// grammar to the registered observers.
///
/// Each call to [`Pipeline::run`] uses its own [`NameSupply`], so separate
/// runs never share generated names.
#[derive(Default)]
pub struct Pipeline<'a> {
    observers: Vec<Observer<'a>>,
}

impl<'a> Pipeline<'a> {
    pub fn new() -> Self {
        Self {
            observers: Vec::new(),
        }
    }

    /// Registers a callback invoked with every stage and the grammar it produced.
    pub fn observe(mut self, observer: impl FnMut(Stage, &ContextFreeGrammar) + 'a) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    pub fn run(&mut self, grammar: &ContextFreeGrammar) -> Result<ContextFreeGrammar, ValidationError> {
        grammar.validate()?;

        info!(
            "Normalizing grammar with {} non-terminals, {} terminals and {} productions",
            grammar.non_terminals.len(),
            grammar.terminals.len(),
            grammar.production_count()
        );

        let mut names = NameSupply::new();
        let mut grammar = grammar.clone();

        for stage in Stage::ALL {
            let next = self.apply(stage, &grammar, &mut names);

            // Pruning dead symbols can orphan others that were only reachable
            // through them.
            grammar = if stage == Stage::Productivity && next != grammar {
                self.apply(Stage::Accessibility, &next, &mut names)
            } else {
                next
            };
        }

        if grammar.is_empty_language() {
            info!("Grammar generates the empty language");
        }

        Ok(grammar)
    }

    fn apply(
        &mut self,
        stage: Stage,
        grammar: &ContextFreeGrammar,
        names: &mut NameSupply,
    ) -> ContextFreeGrammar {
        let grammar = stage.apply(grammar, names);

        debug_assert!(
            grammar.validate().is_ok(),
            "{} broke a grammar invariant",
            stage
        );
        debug!(
            "After {}: {} non-terminals, {} productions",
            stage,
            grammar.non_terminals.len(),
            grammar.production_count()
        );
        trace!("{}", grammar);

        for observer in &mut self.observers {
            observer(stage, &grammar);
        }

        grammar
    }
}

impl ContextFreeGrammar {
    pub fn to_chomsky_normal_form(&self) -> Result<ChomskyNormalFormGrammar, Error> {
        let grammar = Pipeline::new().run(self)?;

        Ok(ChomskyNormalFormGrammar::try_from(&grammar)?)
    }
}
