//! Rendering of a single condition.
use log::debug;
use pyexpr::Expression;

use crate::{
    config::RenderConfig,
    implication::{Implication, match_implication},
    model::Condition,
    multiline::code_block,
};

/// The expression that is actually documented: the body of a lambda, or the expression
/// itself otherwise.
pub fn condition_body(expr: &Expression) -> Expression {
    match expr.node().as_lambda() {
        Some((_, body)) => expr.child(body),
        None => expr.clone(),
    }
}

/// Render a condition as a block of lines.
///
/// A single-line condition is one line: either `A ⇒ B` for an implication or the verbatim
/// text as inline code. A condition spanning several lines is a literal code block and is
/// never pattern-matched.
pub fn render_condition(condition: &Condition, config: &RenderConfig) -> Vec<String> {
    match condition {
        Condition::Named(callable) => vec![config.markup.func_ref(&callable.name)],
        Condition::Inline(expr) => render_expression(&condition_body(expr), config),
    }
}

pub fn render_expression(expr: &Expression, config: &RenderConfig) -> Vec<String> {
    let text = expr.text();
    if text.contains('\n') {
        debug!("rendering multi-line condition as a code block");
        return code_block(text, config.code_block_indent);
    }

    let markup = config.markup;
    match match_implication(expr) {
        Some(Implication {
            antecedent,
            consequent,
        }) => vec![format!(
            "{} ⇒ {}",
            markup.code(&antecedent),
            markup.code(&consequent)
        )],
        None => vec![markup.code(text)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{markup::Markup, model::NamedCallableRef};

    fn render(src: &str, markup: Markup) -> Vec<String> {
        let condition = Condition::Inline(Expression::parse(src).unwrap());
        render_condition(&condition, &RenderConfig::default().with_markup(markup))
    }

    #[test]
    fn verbatim_inline_code() {
        assert_eq!(render("lambda x: x > 0", Markup::Rest), vec![":code:`x > 0`"]);
        assert_eq!(
            render("lambda self: self.some_getter() > 0", Markup::Rest),
            vec![":code:`self.some_getter() > 0`"]
        );
    }

    #[test]
    fn implications() {
        assert_eq!(
            render("lambda x: not (x > 0) or x < 100", Markup::Plain),
            vec!["x > 0 ⇒ x < 100"]
        );
        assert_eq!(
            render("lambda x, y: x == 0 or x % 2 == 0", Markup::Plain),
            vec!["x != 0 ⇒ x % 2 == 0"]
        );
        assert_eq!(
            render("lambda x, y: y == 1 if x in [1, 2] else True", Markup::Plain),
            vec!["x in [1, 2] ⇒ y == 1"]
        );
        assert_eq!(
            render("lambda x: not (x > 0) or x < 100", Markup::Rest),
            vec![":code:`x > 0` ⇒ :code:`x < 100`"]
        );
    }

    #[test]
    fn rendering_is_repeatable() {
        let condition = Condition::Inline(Expression::parse("lambda x: x == 0 or x > 3").unwrap());
        let config = RenderConfig::default();
        assert_eq!(
            render_condition(&condition, &config),
            render_condition(&condition, &config)
        );
    }

    #[test]
    fn multi_line_condition_is_a_code_block() {
        let lines = render(
            "lambda lst: not lst or all(\n        item > 0\n        for item in lst)",
            Markup::Rest,
        );
        assert_eq!(
            lines,
            vec![
                "::",
                "",
                "    not lst or all(",
                "    item > 0",
                "    for item in lst)",
                "",
            ]
        );
    }

    #[test]
    fn named_condition_is_a_function_reference() {
        let condition = Condition::Named(NamedCallableRef {
            name: "some_func".into(),
            params: vec![],
        });
        assert_eq!(
            render_condition(&condition, &RenderConfig::default()),
            vec![":py:func:`some_func`"]
        );
    }
}
