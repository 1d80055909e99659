//! The grammar-text lexer is very simple-minded. There are five categories
//! of raw lexemes:
//!
//! 1. whitespace: a run of whitespace characters; a run that contains a newline
//! ends the current rule line
//!
//! 2. word: a run of alphanumeric or underscore characters
//!
//! 3. operative word: a run of non-whitespace, non-alphanumeric characters
//! (excluding brackets and quotes); `->`, `|` and `;` are the metasyntax, every
//! other operative word is an ordinary symbol
//!
//! 4. bracket: every open or close bracket is its own symbol, so `(NP)` lexes as
//! three symbols
//!
//! 5. quotation: `'...'` or `"..."`, yielding a symbol with arbitrary content
//! (this is how a grammar mentions `->` or `|` as a terminal)
//!
//! A `#` at the start of a lexeme begins a comment that runs to the end of
//! the line.

use std::iter::Peekable;
use std::str::CharIndices;

use thiserror::Error;
use unicode_brackets::UnicodeBrackets;

use crate::Spanned;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tok<'input> {
    // "->"
    Arrow,
    // "|"
    Bar,
    // newline or ";"
    Eol,
    // anything else
    Symbol(&'input str),
}

impl std::fmt::Display for Tok<'_> {
    fn fmt(&self, w: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Tok::Arrow => write!(w, "`->`"),
            Tok::Bar => write!(w, "`|`"),
            Tok::Eol => write!(w, "end of line"),
            Tok::Symbol(s) => write!(w, "symbol `{}`", s),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum LexicalError {
    #[error("unterminated quotation starting at byte {0}")]
    UnterminatedQuote(usize),
}

trait IsOperative { fn is_operative(self) -> bool; }
impl IsOperative for char {
    fn is_operative(self) -> bool {
        !self.is_alphanumeric() && self != '_' && !self.is_whitespace()
            && !self.is_open_bracket() && !self.is_close_bracket()
            && self != '\'' && self != '"' && self != '#'
    }
}

/// Very regular lexeme matching (no extra context needed)
enum R {
    Word,
    Op,
    Bracket,
    Space,
}

enum RegAction { Complete, Continue, }

impl R {
    fn from_start_char(c: char) -> Self {
        if c.is_alphanumeric() || c == '_' { R::Word }
        else if c.is_whitespace() { R::Space }
        else if c.is_open_bracket() || c.is_close_bracket() { R::Bracket }
        else { R::Op }
    }
    fn action(&self, p: char) -> RegAction {
        match self {
            // every bracket is its own token; we don't merge sequences of brackets into one token.
            R::Bracket => RegAction::Complete,
            R::Word => if p.is_alphanumeric() || p == '_' { RegAction::Continue } else { RegAction::Complete },
            R::Op => if p.is_operative() { RegAction::Continue } else { RegAction::Complete },
            R::Space => if p.is_whitespace() { RegAction::Continue } else { RegAction::Complete },
        }
    }
}

pub struct Lexer<'input> {
    input: &'input str,
    chars: Peekable<CharIndices<'input>>,
    // whether the last token handed out was an `Eol`; lets us close a final
    // line that lacks a trailing newline.
    at_line_start: bool,
    done: bool,
}

impl<'input> Lexer<'input> {
    pub fn new(input: &'input str) -> Self {
        Lexer { input, chars: input.char_indices().peekable(), at_line_start: true, done: false }
    }

    /// Reads a run of the class selected by `c`; returns the exclusive end.
    fn read_regular(&mut self, r: &R, (i, c): (usize, char)) -> usize {
        let mut end = i + c.len_utf8();
        while let Some(&(j, p)) = self.chars.peek() {
            match r.action(p) {
                RegAction::Continue => {
                    self.chars.next();
                    end = j + p.len_utf8();
                }
                RegAction::Complete => break,
            }
        }
        end
    }

    fn read_quotation(&mut self, (i, delim): (usize, char)) -> Result<(usize, Tok<'input>, usize), LexicalError> {
        let content_start = i + delim.len_utf8();
        for (j, c) in self.chars.by_ref() {
            if c == delim {
                let tok = Tok::Symbol(&self.input[content_start..j]);
                return Ok((i, tok, j + c.len_utf8()));
            }
            if c == '\n' {
                break;
            }
        }
        Err(LexicalError::UnterminatedQuote(i))
    }

    fn skip_comment(&mut self) {
        while let Some(&(_, p)) = self.chars.peek() {
            if p == '\n' { return; }
            self.chars.next();
        }
    }

    fn emit(&mut self, item: (usize, Tok<'input>, usize)) -> Option<<Self as Iterator>::Item> {
        self.at_line_start = item.1 == Tok::Eol;
        Some(Ok(item))
    }
}

impl<'input> Iterator for Lexer<'input> {
    type Item = Spanned<Tok<'input>, usize, LexicalError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (i, c) = match self.chars.next() {
                Some(ic) => ic,
                None => {
                    // End of file: close the last line if it is still open.
                    if self.done || self.at_line_start { return None; }
                    self.done = true;
                    let n = self.input.len();
                    return self.emit((n, Tok::Eol, n));
                }
            };

            if c == '#' {
                self.skip_comment();
                continue;
            }
            if c == '\'' || c == '"' {
                let item = self.read_quotation((i, c));
                return match item {
                    Ok(item) => self.emit(item),
                    Err(e) => Some(Err(e)),
                };
            }

            let r = R::from_start_char(c);
            let j = self.read_regular(&r, (i, c));
            let s = &self.input[i..j];
            let tok = match r {
                R::Space if s.contains('\n') && !self.at_line_start => Tok::Eol,
                // skip the space and grab next token.
                R::Space => continue,
                R::Op if s == "->" => Tok::Arrow,
                R::Op if s == "|" => Tok::Bar,
                R::Op if s == ";" => Tok::Eol,
                R::Word | R::Op | R::Bracket => Tok::Symbol(s),
            };
            return self.emit((i, tok, j));
        }
    }
}

#[cfg(test)]
#[path = "tests/lexer.rs"]
mod tests_for_lexer;
