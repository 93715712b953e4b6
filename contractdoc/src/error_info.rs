//! Error type and message inference from a contract's `error` argument.
use pyexpr::{ExprKind, Expression};

use crate::{markup::Markup, model::ErrorSpec};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorInfo {
    pub type_name: Option<String>,
    pub message: Option<String>,
}

/// Infer what a violated contract raises.
///
/// Only literal messages are picked up. A message built by any computation is left
/// unknown rather than guessed.
pub fn infer_error(spec: Option<&ErrorSpec>) -> ErrorInfo {
    match spec {
        None | Some(ErrorSpec::Opaque) => ErrorInfo::default(),
        Some(ErrorSpec::Type(name)) => ErrorInfo {
            type_name: Some(name.clone()),
            message: None,
        },
        Some(ErrorSpec::Callable(expr)) => from_callable(expr).unwrap_or_default(),
    }
}

/// `lambda: Type("message")` or `lambda x: Type(msg="message")`.
fn from_callable(expr: &Expression) -> Option<ErrorInfo> {
    let (params, body) = expr.node().as_lambda()?;
    if params.len() > 1 {
        return None;
    }

    let ExprKind::Call {
        func,
        args,
        keywords,
    } = &body.kind
    else {
        return None;
    };

    let message = match (args.as_slice(), keywords.as_slice()) {
        ([arg], []) => arg.as_str_literal(),
        ([], [keyword]) => keyword.value.as_str_literal(),
        _ => None,
    };

    Some(ErrorInfo {
        type_name: Some(expr.text_of(func).to_string()),
        message: message.map(str::to_string),
    })
}

/// Text shown in parentheses after a condition, if any.
///
/// An explicit description wins over an inferred message. The error type is joined
/// according to how the description ends: `Raise` after `.`, `!` or `?`, `raise` after
/// `,` or `;`, and `; raise` otherwise.
pub fn compose_suffix(description: Option<&str>, info: &ErrorInfo, markup: Markup) -> Option<String> {
    let description = description
        .filter(|d| !d.trim().is_empty())
        .or(info.message.as_deref().filter(|m| !m.trim().is_empty()));
    let type_ref = info.type_name.as_deref().map(|name| markup.class_ref(name));

    match (description, type_ref) {
        (None, None) => None,
        (Some(description), None) => Some(description.to_string()),
        (None, Some(type_ref)) => Some(format!("Raise {type_ref}")),
        (Some(description), Some(type_ref)) => {
            let description = description.trim_end();
            Some(match description.chars().last() {
                Some('.' | '!' | '?') => format!("{description} Raise {type_ref}"),
                Some(',' | ';') => format!("{description} raise {type_ref}"),
                _ => format!("{description}; raise {type_ref}"),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn callable(src: &str) -> ErrorSpec {
        ErrorSpec::Callable(Expression::parse(src).unwrap())
    }

    fn info(type_name: Option<&str>, message: Option<&str>) -> ErrorInfo {
        ErrorInfo {
            type_name: type_name.map(str::to_string),
            message: message.map(str::to_string),
        }
    }

    #[test]
    fn inference() {
        assert_eq!(infer_error(None), ErrorInfo::default());
        assert_eq!(infer_error(Some(&ErrorSpec::Opaque)), ErrorInfo::default());
        assert_eq!(
            infer_error(Some(&ErrorSpec::Type("errors.Invalid".into()))),
            info(Some("errors.Invalid"), None)
        );
        assert_eq!(
            infer_error(Some(&callable("lambda: ValueError(\"x positive\")"))),
            info(Some("ValueError"), Some("x positive"))
        );
        assert_eq!(
            infer_error(Some(&callable("lambda x: errors.Invalid(msg='bad')"))),
            info(Some("errors.Invalid"), Some("bad"))
        );
    }

    #[test]
    fn computed_messages_are_not_inferred() {
        assert_eq!(
            infer_error(Some(&callable("lambda x: ValueError(f'x={x}')"))),
            info(Some("ValueError"), None)
        );
        assert_eq!(
            infer_error(Some(&callable("lambda x: ValueError('a', x)"))),
            info(Some("ValueError"), None)
        );
        assert_eq!(
            infer_error(Some(&callable("lambda x, y: ValueError('a')"))),
            ErrorInfo::default()
        );
        assert_eq!(
            infer_error(Some(&callable("lambda x: x"))),
            ErrorInfo::default()
        );
    }

    #[test]
    fn suffix_punctuation() {
        let value_error = info(Some("ValueError"), None);
        let suffix = |d: &str| compose_suffix(Some(d), &value_error, Markup::Plain);

        assert_eq!(suffix("x positive").as_deref(), Some("x positive; raise ValueError"));
        assert_eq!(suffix("x positive.").as_deref(), Some("x positive. Raise ValueError"));
        assert_eq!(suffix("x positive? ").as_deref(), Some("x positive? Raise ValueError"));
        assert_eq!(suffix("x positive,").as_deref(), Some("x positive, raise ValueError"));
        assert_eq!(suffix("x positive;").as_deref(), Some("x positive; raise ValueError"));
    }

    #[test]
    fn suffix_sources() {
        assert_eq!(
            compose_suffix(None, &info(Some("ValueError"), Some("x positive")), Markup::Plain)
                .as_deref(),
            Some("x positive; raise ValueError")
        );
        assert_eq!(
            compose_suffix(
                Some("explicit"),
                &info(Some("ValueError"), Some("inferred")),
                Markup::Rest
            )
            .as_deref(),
            Some("explicit; raise :py:class:`ValueError`")
        );
        assert_eq!(
            compose_suffix(None, &info(Some("ValueError"), None), Markup::Rest).as_deref(),
            Some("Raise :py:class:`ValueError`")
        );
        assert_eq!(
            compose_suffix(Some("only text"), &ErrorInfo::default(), Markup::Rest).as_deref(),
            Some("only text")
        );
        assert_eq!(compose_suffix(None, &ErrorInfo::default(), Markup::Rest), None);
    }
}
