//! Dot text for derivations: a `digraph` block with one
//! `"parent [s,e]" -> "child [s,e]";` line per edge, in edge order.

use std::io;
use std::path::Path;

use crate::derivation::{Derivation, Edge, Vertex};

pub trait Rendered {
    fn rendered(&self) -> String;
}

impl Rendered for Vertex {
    fn rendered(&self) -> String {
        format!("\"{}\"", self)
    }
}

impl Rendered for Edge {
    fn rendered(&self) -> String {
        format!("{} -> {};", self.parent.rendered(), self.child.rendered())
    }
}

impl Derivation {
    /// The closing brace ends the text; there is no newline after it.
    pub fn to_dot(&self, name: &str) -> String {
        let mut lines = vec![format!("digraph {} {{", name)];
        lines.extend(self.sorted().into_iter().map(|edge| format!("\t{}", edge.rendered())));
        lines.push("}".to_string());
        lines.join("\n")
    }

    /// Writes [`Derivation::to_dot`] to `path`.
    pub fn write_dot(&self, name: &str, path: impl AsRef<Path>) -> io::Result<()> {
        fs_err::write(path.as_ref(), self.to_dot(name))
    }
}

#[cfg(test)]
#[path = "tests/rendering.rs"]
mod tests_for_rendering;
