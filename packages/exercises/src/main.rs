use std::process::ExitCode;

use chomsky::{
    error::Error,
    grammar::{ChomskyNormalFormGrammar, ContextFreeGrammar, Grammar, Pipeline},
};
use log::{error, info};

fn normalize(name: &str, cfg: &ContextFreeGrammar) -> Result<ChomskyNormalFormGrammar, Error> {
    println!("{}:\n{}", name, cfg.definition());

    let grammar = Pipeline::new()
        .observe(|stage, grammar| println!("After {}:\n{}", stage, grammar.definition()))
        .run(cfg)?;

    let cnf = ChomskyNormalFormGrammar::try_from(&grammar)?;
    println!("Chomsky Normal Form:\n{}", cnf.definition());

    Ok(cnf)
}

fn variant_13() -> Result<(), Error> {
    let cfg = ContextFreeGrammar::from_productions(
        "S",
        &[
            "S → aB | DA",
            "A → a | BD | bDAB",
            "B → b | BA",
            "D → ε | BA",
            "C → BA",
        ],
    )?;

    let cnf = normalize("Variant 13", &cfg)?;

    for word in ["ab", "ba", "bab", "abab"] {
        println!("{}", cnf.cyk(word));
    }

    Ok(())
}

fn balanced() -> Result<(), Error> {
    let cfg = ContextFreeGrammar::from_productions("S", &["S → aSb | SS | ε"])?;

    let cnf = normalize("Balanced words", &cfg)?;

    for word in ["", "aabb", "abab", "aab"] {
        println!("{}", cnf.cyk(word));
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_default_env()
        .format_timestamp(None)
        .init();

    for (name, exercise) in [
        ("variant 13", variant_13 as fn() -> Result<(), Error>),
        ("balanced words", balanced),
    ] {
        info!("Running {}", name);

        if let Err(e) = exercise() {
            error!("{} failed: {}", name, e);
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
