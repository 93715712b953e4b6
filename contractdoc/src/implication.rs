//! Recognition of conditions that encode a logical implication.
//!
//! Two shapes are recognized:
//! - `not A or B`, and more generally a two-operand disjunction whose left operand can be
//!   negated textually without changing its meaning;
//! - `B if A else True`.
//!
//! Both become `A ⇒ B`. Anything else, including disjunctions of three or more operands,
//! is left alone.
use log::trace;
use pyexpr::{BoolOp, ExprKind, Expression, Node, UnaryOp};

use crate::negation::negate_comparison;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Implication {
    pub antecedent: String,
    pub consequent: String,
}

/// Match the root of `expr` against the implication shapes.
pub fn match_implication(expr: &Expression) -> Option<Implication> {
    match &expr.node().kind {
        ExprKind::BoolOp {
            op: BoolOp::Or,
            values,
        } => {
            let [left, right] = values.as_slice() else {
                return None;
            };
            Some(Implication {
                antecedent: antecedent_of(expr, left)?,
                consequent: expr.text_of(right).to_string(),
            })
        }
        ExprKind::IfExp { test, body, orelse } if orelse.is_true_literal() => Some(Implication {
            antecedent: guard_text(expr, test),
            consequent: expr.text_of(body).to_string(),
        }),
        _ => None,
    }
}

/// Text of `node` placed before `⇒`. Lambdas and conditionals would otherwise swallow
/// the arrow.
fn guard_text(expr: &Expression, node: &Node) -> String {
    let text = expr.text_of(node);
    match node.kind {
        ExprKind::Lambda { .. } | ExprKind::IfExp { .. } => format!("({text})"),
        _ => text.to_string(),
    }
}

/// The positive guard encoded by the left operand of `left or right`.
fn antecedent_of(expr: &Expression, left: &Node) -> Option<String> {
    let text = expr.text_of(left);
    let antecedent = match &left.kind {
        ExprKind::UnaryOp {
            op: UnaryOp::Not,
            operand,
        } => guard_text(expr, operand),

        // A bare `not` prefix would bind to part of these shapes only.
        ExprKind::UnaryOp { .. }
        | ExprKind::BinOp { .. }
        | ExprKind::GeneratorExp { .. }
        | ExprKind::IfExp { .. } => format!("not ({text})"),

        ExprKind::Compare { .. } => negate_comparison(expr, left)?,

        ExprKind::Call { .. }
        | ExprKind::Attribute { .. }
        | ExprKind::Name(_)
        | ExprKind::Subscript { .. }
        | ExprKind::Slice { .. }
        | ExprKind::ListComp { .. }
        | ExprKind::SetComp { .. }
        | ExprKind::DictComp { .. } => format!("not {text}"),

        _ => {
            trace!("no implication for left operand of type {}", left.type_());
            return None;
        }
    };
    Some(antecedent)
}
