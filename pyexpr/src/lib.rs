//! Pyexpr: spanned parsing of single Python expressions.
//!
//! The crate answers one question for documentation tooling: given the text of a
//! decorator or an expression, what is the exact original source text of any node
//! inside it?
//!
//! - [`parse_expression`] lexes and parses with chumsky into a [`Node`] tree whose
//!   spans are byte offsets into the input.
//! - [`Source`] owns the text and slices it back out with [`Source::text_of`].
//! - [`Expression`] bundles a node with its source; [`DecoratorCall`] exposes the
//!   arguments of a decorator call as expressions.
//!
//! Nothing is ever evaluated; the tree only supports read-only structural inspection.
//!
//! Examples
//! ```
//! use pyexpr::{DecoratorCall, ExprKind};
//!
//! let call = DecoratorCall::parse("@icontract.require(lambda x: x > 0, 'positive')").unwrap();
//! assert_eq!(call.target(), "icontract.require");
//!
//! let condition = call.positional(0).unwrap();
//! let (params, body) = condition.node().as_lambda().unwrap();
//! assert_eq!(params[0].name, "x");
//! assert_eq!(condition.text_of(body), "x > 0");
//! assert!(matches!(body.kind, ExprKind::Compare { .. }));
//!
//! let description = call.positional(1).unwrap();
//! assert_eq!(description.node().as_str_literal(), Some("positive"));
//! ```

pub mod ast;
pub mod decorator;
pub mod error;
pub mod lexer;
mod literal;
pub mod parser;
pub mod source;

pub use ast::*;
pub use decorator::DecoratorCall;
pub use error::ParseError;
pub use parser::parse_expression;
pub use source::{Expression, Source};
