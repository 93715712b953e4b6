//! Building model objects from the source text of contract decorators.
use log::debug;
use pyexpr::{DecoratorCall, Expression};
use strum::{Display, EnumString};

use crate::{
    error::{Error, Result},
    model::{Condition, Contract, ErrorSpec, NamedCallableRef, Snapshot, SnapshotCapture},
};

fn malformed(decorator: &str, reason: &str) -> Error {
    Error::MalformedDecorator {
        decorator: decorator.to_string(),
        reason: reason.to_string(),
    }
}

/// The decorator a call declares, from the last component of its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum DecoratorKind {
    Require,
    Ensure,
    Invariant,
    Snapshot,
}

pub fn parse_decorator(text: &str) -> Result<DecoratorCall> {
    DecoratorCall::parse(text).map_err(|errors| Error::DecoratorParseError {
        decorator: text.to_string(),
        errors,
    })
}

pub fn decorator_kind(call: &DecoratorCall, text: &str) -> Result<DecoratorKind> {
    call.target_name()
        .and_then(|name| name.parse::<DecoratorKind>().ok())
        .ok_or_else(|| {
            malformed(
                text,
                &format!("unrecognized decorator `{}`", call.target()),
            )
        })
}

fn named(expr: &Expression, params: &[String]) -> NamedCallableRef {
    NamedCallableRef {
        name: expr.text().to_string(),
        params: params.to_vec(),
    }
}

fn error_spec(expr: Expression) -> ErrorSpec {
    let node = expr.node();
    if node.as_lambda().is_some() {
        ErrorSpec::Callable(expr)
    } else if node.is_dotted_name() {
        ErrorSpec::Type(expr.text().to_string())
    } else {
        ErrorSpec::Opaque
    }
}

/// Contract from a `require`, `ensure` or `invariant` decorator.
///
/// The condition is the first positional argument or `condition=`; the description the
/// second positional argument or `description=`, when it is a string literal; the error
/// comes from `error=`.
pub fn contract_from_decorator(text: &str) -> Result<Contract> {
    let call = parse_decorator(text)?;
    match decorator_kind(&call, text)? {
        DecoratorKind::Snapshot => Err(malformed(text, "a snapshot does not declare a contract")),
        _ => build_contract(&call, text),
    }
}

/// Like [`contract_from_decorator`], but the decorator must be of kind `expected`.
pub fn contract_of_kind(text: &str, expected: DecoratorKind) -> Result<Contract> {
    let call = parse_decorator(text)?;
    let kind = decorator_kind(&call, text)?;
    if kind != expected {
        return Err(malformed(
            text,
            &format!("expected a `{expected}` decorator, found `{kind}`"),
        ));
    }
    build_contract(&call, text)
}

fn build_contract(call: &DecoratorCall, text: &str) -> Result<Contract> {
    let condition = call
        .argument(0, "condition")
        .ok_or_else(|| malformed(text, "missing condition argument"))?;
    let condition = if condition.node().is_dotted_name() {
        Condition::Named(named(&condition, &[]))
    } else {
        Condition::Inline(condition)
    };

    let description = call.argument(1, "description").and_then(|description| {
        let literal = description.node().as_str_literal().map(str::to_string);
        if literal.is_none() {
            debug!(
                "ignoring description `{}` of {text}: not a string literal",
                description.text()
            );
        }
        literal
    });

    Ok(Contract {
        condition,
        description,
        error: call.keyword("error").map(error_spec),
    })
}

/// Snapshot from a `snapshot` decorator.
///
/// `params` are the parameter names of a capture function referenced by name; they are
/// not recoverable from the decorator text alone.
pub fn snapshot_from_decorator(text: &str, params: &[String]) -> Result<Snapshot> {
    let call = parse_decorator(text)?;
    let kind = decorator_kind(&call, text)?;
    if kind != DecoratorKind::Snapshot {
        return Err(malformed(
            text,
            &format!("expected a `snapshot` decorator, found `{kind}`"),
        ));
    }

    let capture = call
        .argument(0, "capture")
        .ok_or_else(|| malformed(text, "missing capture argument"))?;

    let explicit_name = match call.argument(1, "name") {
        Some(name) => Some(
            name.node()
                .as_str_literal()
                .map(str::to_string)
                .ok_or_else(|| malformed(text, "snapshot name must be a string literal"))?,
        ),
        None => None,
    };

    let (capture, arguments) = if let Some((lambda_params, _)) = capture.node().as_lambda() {
        let arguments: Vec<String> = lambda_params.iter().map(|p| p.name.clone()).collect();
        (SnapshotCapture::Inline(capture), arguments)
    } else if capture.node().is_dotted_name() {
        (SnapshotCapture::Named(named(&capture, params)), params.to_vec())
    } else {
        return Err(malformed(
            text,
            "snapshot capture must be a lambda or a function name",
        ));
    };

    let name = match (explicit_name, arguments.as_slice()) {
        (Some(name), _) => name,
        (None, [single]) => single.clone(),
        (None, _) => {
            return Err(malformed(
                text,
                "snapshot name is required unless the capture takes exactly one argument",
            ));
        }
    };

    Ok(Snapshot { name, capture })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contract_arguments() {
        let contract = contract_from_decorator(
            "@icontract.require(lambda x: x > 0, \"positive\", error=ValueError)",
        )
        .unwrap();
        assert!(matches!(contract.condition, Condition::Inline(_)));
        assert_eq!(contract.description.as_deref(), Some("positive"));
        assert_eq!(contract.error, Some(ErrorSpec::Type("ValueError".into())));

        let contract = contract_from_decorator(
            "@icontract.ensure(condition=lambda result: result, description=DESCRIPTION, error=make_error())",
        )
        .unwrap();
        assert_eq!(contract.description, None);
        assert_eq!(contract.error, Some(ErrorSpec::Opaque));
    }

    #[test]
    fn named_condition() {
        let contract = contract_from_decorator("@icontract.require(checks.is_sorted)").unwrap();
        assert_eq!(
            contract.condition,
            Condition::Named(NamedCallableRef {
                name: "checks.is_sorted".into(),
                params: vec![],
            })
        );
    }

    #[test]
    fn callable_error() {
        let contract =
            contract_from_decorator("@icontract.require(lambda x: x > 0, error=lambda x: ValueError('x'))")
                .unwrap();
        assert!(matches!(contract.error, Some(ErrorSpec::Callable(_))));
    }

    #[test]
    fn malformed_contracts() {
        assert!(contract_from_decorator("@icontract.require()").unwrap_err().is_malformed_decorator());
        assert!(contract_from_decorator("@icontract.require").unwrap_err().is_decorator_parse_error());
        assert!(contract_from_decorator("@icontract.require(lambda x: )").unwrap_err().is_decorator_parse_error());
    }

    #[test]
    fn decorator_kinds() {
        let contract = contract_of_kind("@ensure(lambda result: result)", DecoratorKind::Ensure);
        assert!(contract.is_ok());

        let error = contract_of_kind("@icontract.ensure(lambda x: x > 0)", DecoratorKind::Require)
            .unwrap_err();
        assert!(error.is_malformed_decorator());
        assert!(error.to_string().contains("expected a `require` decorator, found `ensure`"));

        for text in [
            "@icontract.snapshot(lambda lst: lst[:])",
            "@icontract.checked(lambda x: x > 0)",
            "@make_contract()(lambda x: x > 0)",
        ] {
            assert!(contract_from_decorator(text).unwrap_err().is_malformed_decorator(), "{text}");
        }
        assert!(
            snapshot_from_decorator("@icontract.require(lambda lst: lst[:])", &[])
                .unwrap_err()
                .is_malformed_decorator()
        );
    }

    #[test]
    fn non_literal_description_is_dropped() {
        let contract =
            contract_from_decorator("@icontract.require(lambda x: x > 0, MESSAGES['positive'])")
                .unwrap();
        assert_eq!(contract.description, None);
    }

    #[test]
    fn snapshot_names() {
        let snapshot = snapshot_from_decorator("@icontract.snapshot(lambda lst: lst[:])", &[]).unwrap();
        assert_eq!(snapshot.name, "lst");

        let snapshot = snapshot_from_decorator(
            "@icontract.snapshot(lambda lst, other: lst + other, name='both')",
            &[],
        )
        .unwrap();
        assert_eq!(snapshot.name, "both");

        let snapshot = snapshot_from_decorator(
            "@icontract.snapshot(capture=copy_items, name=\"items\")",
            &["self".to_string(), "limit".to_string()],
        )
        .unwrap();
        assert_eq!(snapshot.name, "items");
        assert_eq!(
            snapshot.capture,
            SnapshotCapture::Named(NamedCallableRef {
                name: "copy_items".into(),
                params: vec!["self".into(), "limit".into()],
            })
        );
    }

    #[test]
    fn malformed_snapshots() {
        for text in [
            "@icontract.snapshot()",
            "@icontract.snapshot(lambda a, b: a + b)",
            "@icontract.snapshot(lambda a: a, name=NAME)",
            "@icontract.snapshot(copy_items)",
            "@icontract.snapshot([1, 2])",
        ] {
            assert!(
                snapshot_from_decorator(text, &[]).unwrap_err().is_malformed_decorator(),
                "{text}"
            );
        }
    }
}
