//! Logical negation of comparison operators.
use pyexpr::{CmpOp, ExprKind, Expression, Node, UnaryOp};

/// The operator `op'` such that `a op' b` is `not (a op b)`.
pub fn negate(op: CmpOp) -> CmpOp {
    match op {
        CmpOp::Eq => CmpOp::NotEq,
        CmpOp::NotEq => CmpOp::Eq,
        CmpOp::Lt => CmpOp::GtE,
        CmpOp::GtE => CmpOp::Lt,
        CmpOp::LtE => CmpOp::Gt,
        CmpOp::Gt => CmpOp::LtE,
        CmpOp::Is => CmpOp::IsNot,
        CmpOp::IsNot => CmpOp::Is,
        CmpOp::In => CmpOp::NotIn,
        CmpOp::NotIn => CmpOp::In,
    }
}

/// Whether `node` binds no tighter than a comparison, so that its text needs parentheses
/// when it is embedded as a comparison operand.
fn binds_loosely(node: &Node) -> bool {
    matches!(
        node.kind,
        ExprKind::BoolOp { .. }
            | ExprKind::IfExp { .. }
            | ExprKind::Lambda { .. }
            | ExprKind::Compare { .. }
            | ExprKind::UnaryOp {
                op: UnaryOp::Not,
                ..
            }
    )
}

/// Text of `node` as an operand of a comparison.
fn operand_text(expr: &Expression, node: &Node) -> String {
    let text = expr.text_of(node);
    if binds_loosely(node) {
        format!("({text})")
    } else {
        text.to_string()
    }
}

/// Text of the negated comparison, operands copied verbatim.
///
/// Operands looser than a comparison are parenthesized. Only single-operator
/// comparisons are negated; chained ones such as `a < b < c` and non-comparisons
/// yield `None`.
pub fn negate_comparison(expr: &Expression, node: &Node) -> Option<String> {
    let ExprKind::Compare {
        left,
        ops,
        comparators,
    } = &node.kind
    else {
        return None;
    };

    match (ops.as_slice(), comparators.as_slice()) {
        ([op], [right]) => Some(format!(
            "{} {} {}",
            operand_text(expr, left),
            negate(*op),
            operand_text(expr, right)
        )),
        _ => None,
    }
}
