//! Context-free parsing over token sequences.
//!
//! The centerpiece is [`EarleyParser`], which recognizes an input and, in the
//! same pass, builds a shared packed parse forest ([`Forest`]) of every
//! derivation of it. [`Forest::derivations`] enumerates the derivation trees
//! packed in a forest, and [`Derivation::to_dot`] renders one as a dot graph.
//!
//! Alongside sit a boolean [`EarleyRecognizer`] that classifies tokens through
//! a [`Lexicon`], and a naive [`TopDownParser`] built on [`search`].
//! All three answer the [`Recognizer`] question.
//!
//! ```
//! use silva::{EarleyParser, Grammar};
//!
//! let grammar: Grammar = "S -> S S | b".parse().unwrap();
//! let forest = EarleyParser::new(&grammar).parse(&["b", "b", "b"]).unwrap();
//! assert_eq!(forest.derivations().len(), 2);
//! ```

#[macro_use] extern crate lalrpop_util;

pub type Spanned<Tok, Loc, Error> = Result<(Loc, Tok, Loc), Error>;

pub mod derivation;
pub mod earley;
pub mod forest;
pub mod grammar;
pub mod lexer;
pub mod loader;
pub mod recognizer;
pub mod rendering;
pub mod search;
pub mod top_down;

mod display;
mod trace;

lalrpop_mod!(pub bnf); // synthesized by LALRPOP

pub use derivation::{Derivation, Derivations, Edge, Vertex};
pub use earley::{EarleyParser, Item, ParseForest};
pub use forest::{Family, Forest, Label, Node, NodeId};
pub use grammar::{Grammar, Lexicon, Rule, Symbol};
pub use loader::LoadError;
pub use recognizer::{EarleyRecognizer, RecognizerChart};
pub use rendering::Rendered;
pub use search::Strategy;
pub use top_down::TopDownParser;
pub use trace::Verbosity;

/// Answers whether a token sequence is in a grammar's language.
pub trait Recognizer {
    fn accepts(&self, tokens: &[&str]) -> bool;
    fn rejects(&self, tokens: &[&str]) -> bool { !self.accepts(tokens) }
}
