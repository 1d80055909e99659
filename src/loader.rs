//! Loading grammars and lexicons from text.
//!
//! ```text
//! # comment
//! S  -> NP VP
//! NP -> Det N | N
//! B  ->              # ε-production
//! ```
//!
//! Each line holds one left-hand side and one or more `|`-separated
//! alternatives; `;` may stand in for a newline. See [`crate::lexer`] for what
//! counts as a symbol.

use std::path::Path;

use lalrpop_util::ParseError;
use thiserror::Error;

use crate::bnf;
use crate::grammar::{Grammar, Lexicon, Rule, DEFAULT_START};
use crate::lexer::{LexicalError, Lexer, Tok};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Lex(#[from] LexicalError),
    #[error("unexpected {found} at byte {location}; expected one of {}", .expected.join(", "))]
    Syntax { location: usize, found: String, expected: Vec<String> },
    #[error("malformed rule line `{0}`; expected `lhs -> symbols...`")]
    RuleLine(String),
    #[error("lexicon entry for `{category}` has {len} words in one alternative; expected exactly one")]
    LexiconEntry { category: String, len: usize },
}

impl<'input> From<ParseError<usize, Tok<'input>, LexicalError>> for LoadError {
    fn from(e: ParseError<usize, Tok<'input>, LexicalError>) -> Self {
        match e {
            ParseError::InvalidToken { location } => LoadError::Syntax {
                location, found: "invalid token".to_string(), expected: vec![],
            },
            ParseError::UnrecognizedEOF { location, expected } => LoadError::Syntax {
                location, found: "end of input".to_string(), expected,
            },
            ParseError::UnrecognizedToken { token: (location, tok, _), expected } => LoadError::Syntax {
                location, found: tok.to_string(), expected,
            },
            ParseError::ExtraToken { token: (location, tok, _) } => LoadError::Syntax {
                location, found: tok.to_string(), expected: vec![],
            },
            ParseError::User { error } => LoadError::Lex(error),
        }
    }
}

/// Parses grammar text into its rules, in the order written.
pub fn parse_rules(text: &str) -> Result<Vec<Rule>, LoadError> {
    let lex = Lexer::new(text);
    Ok(bnf::RulesParser::new().parse(text, lex)?)
}

impl Grammar {
    /// Builds a grammar with start symbol [`DEFAULT_START`] from rule text.
    /// Duplicate rules are dropped.
    pub fn from_text(text: &str) -> Result<Grammar, LoadError> {
        Ok(Grammar::with_rules(DEFAULT_START, parse_rules(text)?))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Grammar, LoadError> {
        Grammar::from_text(&fs_err::read_to_string(path.as_ref())?)
    }
}

impl std::str::FromStr for Grammar {
    type Err = LoadError;
    fn from_str(s: &str) -> Result<Grammar, LoadError> { Grammar::from_text(s) }
}

impl Lexicon {
    /// Lexicon text uses the grammar syntax with one word per alternative,
    /// e.g. `Det -> the | a`.
    pub fn from_text(text: &str) -> Result<Lexicon, LoadError> {
        let mut lexicon = Lexicon::new();
        for rule in parse_rules(text)? {
            match rule.rhs() {
                [word] => lexicon.insert(rule.lhs().clone(), word.as_str()),
                words => return Err(LoadError::LexiconEntry {
                    category: rule.lhs().to_string(),
                    len: words.len(),
                }),
            }
        }
        Ok(lexicon)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Lexicon, LoadError> {
        Lexicon::from_text(&fs_err::read_to_string(path.as_ref())?)
    }
}

#[cfg(test)]
#[path = "tests/loader.rs"]
mod tests_for_loader;
