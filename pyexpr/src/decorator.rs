//! Inspection of decorator calls such as `@icontract.require(lambda x: x > 0, "positive")`.
use std::sync::Arc;

use crate::{
    ParseError,
    ast::{ExprKind, Keyword, Node},
    parser::parse_expression,
    source::{Expression, Source},
};

/// A parsed decorator call. Arguments are exposed as [`Expression`]s sharing the
/// decorator's source, so their text is sliced from the decorator as written.
#[derive(Debug, Clone, PartialEq)]
pub struct DecoratorCall {
    source: Source,
    call: Node,
}

impl DecoratorCall {
    /// Parse decorator text. A leading `@` is optional.
    ///
    /// The `@` is blanked out rather than stripped so that node spans stay valid offsets
    /// into the text as given, which keeps continuation-line indentation intact.
    pub fn parse(text: &str) -> Result<Self, Vec<ParseError>> {
        let body: Arc<str> = match text.trim_start().strip_prefix('@') {
            Some(_) => text.replacen('@', " ", 1).into(),
            None => text.into(),
        };
        let source = Source::new(body);
        let call = parse_expression(source.as_str())?;

        if !matches!(call.kind, ExprKind::Call { .. }) {
            return Err(vec![ParseError::new(
                format!(
                    "decorator must be a call expression, found {}",
                    call.type_()
                ),
                call.span,
            )]);
        }

        Ok(Self { source, call })
    }

    fn parts(&self) -> (&Node, &[Node], &[Keyword]) {
        match &self.call.kind {
            ExprKind::Call {
                func,
                args,
                keywords,
            } => (func.as_ref(), args.as_slice(), keywords.as_slice()),
            // `parse` only ever builds call nodes.
            _ => (&self.call, &[][..], &[][..]),
        }
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    /// Text of the called target, e.g. `icontract.require`.
    pub fn target(&self) -> &str {
        self.source.text_of(self.parts().0)
    }

    /// Last component of the called target, e.g. `require` for `icontract.require`.
    pub fn target_name(&self) -> Option<&str> {
        match &self.parts().0.kind {
            ExprKind::Name(name) => Some(name),
            ExprKind::Attribute { attr, .. } => Some(attr),
            _ => None,
        }
    }

    pub fn positional(&self, index: usize) -> Option<Expression> {
        self.parts()
            .1
            .get(index)
            .map(|node| Expression::new(self.source.clone(), node.clone()))
    }

    pub fn keyword(&self, name: &str) -> Option<Expression> {
        self.parts()
            .2
            .iter()
            .find(|keyword| keyword.arg.as_deref() == Some(name))
            .map(|keyword| Expression::new(self.source.clone(), keyword.value.clone()))
    }

    /// Argument passed either at position `index` or as keyword `name`.
    pub fn argument(&self, index: usize, name: &str) -> Option<Expression> {
        self.positional(index).or_else(|| self.keyword(name))
    }
}
