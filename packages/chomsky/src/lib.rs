//! Context-free grammars and their conversion to Chomsky normal form.
//!
//! ```
//! use chomsky::grammar::{ContextFreeGrammar, Grammar};
//!
//! let cfg = ContextFreeGrammar::from_productions("S", &["S → aSb | ε"]).unwrap();
//! let cnf = cfg.to_chomsky_normal_form().unwrap();
//!
//! assert!(cnf.accepts("aabb"));
//! assert!(cnf.accepts(""));
//! assert!(!cnf.accepts("aab"));
//! println!("{}", cnf.definition());
//! ```

pub mod error;
pub mod grammar;
pub mod grammars;
pub mod language;
pub mod normalize;
pub mod notation;
