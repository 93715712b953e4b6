//! Source text ownership and exact-text lookup for parsed nodes.
use std::{fmt, sync::Arc};

use crate::{ParseError, ast::Node, parser::parse_expression};

/// Text a tree was parsed from. Cheap to clone; all expressions parsed from the same
/// decorator share one allocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Source(Arc<str>);

impl Source {
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Exact original spelling of `node`, including inner whitespace and line breaks.
    ///
    /// A node that was not parsed from this source yields an empty string.
    pub fn text_of(&self, node: &Node) -> &str {
        self.0.get(node.span.clone()).unwrap_or("")
    }
}

impl From<&str> for Source {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Source {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

/// An immutable parsed node together with the source it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    source: Source,
    node: Node,
}

impl Expression {
    pub fn new(source: Source, node: Node) -> Self {
        Self { source, node }
    }

    /// Parse a standalone expression.
    pub fn parse(text: impl Into<Arc<str>>) -> Result<Self, Vec<ParseError>> {
        let source = Source::new(text);
        let node = parse_expression(source.as_str())?;
        Ok(Self { source, node })
    }

    pub fn node(&self) -> &Node {
        &self.node
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    /// Exact source text of the whole expression.
    pub fn text(&self) -> &str {
        self.source.text_of(&self.node)
    }

    /// Exact source text of a node inside this expression.
    pub fn text_of<'a>(&'a self, node: &Node) -> &'a str {
        self.source.text_of(node)
    }

    /// Re-root at a descendant node, sharing the same source.
    pub fn child(&self, node: &Node) -> Expression {
        Self {
            source: self.source.clone(),
            node: node.clone(),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}
