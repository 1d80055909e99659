use std::fmt;

use crate::derivation::Vertex;
use crate::earley::Item;
use crate::forest::{Label, EPSILON_LABEL};
use crate::grammar::{Grammar, Rule, Symbol};

fn write_symbols(w: &mut fmt::Formatter, symbols: &[Symbol]) -> fmt::Result {
    for (i, s) in symbols.iter().enumerate() {
        if i > 0 { write!(w, " ")?; }
        write!(w, "{}", s)?;
    }
    Ok(())
}

impl fmt::Display for Rule {
    fn fmt(&self, w: &mut fmt::Formatter) -> fmt::Result {
        write!(w, "{} -> ", self.lhs)?;
        write_symbols(w, &self.rhs)
    }
}

/// `T -> b b . b`
impl fmt::Display for Item<'_> {
    fn fmt(&self, w: &mut fmt::Formatter) -> fmt::Result {
        let (before, after) = self.rule().rhs().split_at(self.dot());
        write!(w, "{} ->", self.lhs())?;
        for s in before { write!(w, " {}", s)?; }
        write!(w, " .")?;
        for s in after { write!(w, " {}", s)?; }
        Ok(())
    }
}

impl fmt::Display for Label<'_> {
    fn fmt(&self, w: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Label::Symbol(s) => write!(w, "{}", s),
            Label::Item(item) => write!(w, "{}", item),
            Label::Epsilon => write!(w, "{}", EPSILON_LABEL),
        }
    }
}

/// `S [0,3]`
impl fmt::Display for Vertex {
    fn fmt(&self, w: &mut fmt::Formatter) -> fmt::Result {
        write!(w, "{} [{},{}]", self.label(), self.start(), self.end())
    }
}

/// One line per left-hand side, alternatives joined by `|`, in the loader's
/// syntax.
impl fmt::Display for Grammar {
    fn fmt(&self, w: &mut fmt::Formatter) -> fmt::Result {
        let mut lhs: Option<&Symbol> = None;
        for rule in self.rules() {
            if lhs == Some(rule.lhs()) {
                write!(w, " |")?;
            } else {
                if lhs.is_some() { writeln!(w)?; }
                write!(w, "{} ->", rule.lhs())?;
                lhs = Some(rule.lhs());
            }
            if !rule.is_epsilon() {
                write!(w, " ")?;
                write_symbols(w, rule.rhs())?;
            }
        }
        if lhs.is_some() { writeln!(w)?; }
        Ok(())
    }
}
