//! Parser for Python expressions using chumsky.
//!
//! Two stages:
//! 1) Tokenisation from input string to a spanned `Token` stream (see [`crate::lexer`]).
//! 2) Parsing tokens into a spanned [`Node`] tree.
//!
//! Precedence follows the Python grammar, loosest first:
//! lambda < conditional < `or` < `and` < `not` < comparison < `|` < `^` < `&` <
//! shifts < `+ -` < `* / // % @` < unary `- + ~` < `**` < call/attribute/subscript < atoms.
//!
//! Spans
//! - A parenthesized expression keeps the span of its inner node (parentheses excluded).
//! - Tuples and generator expressions written with parentheses include them.
//! - Operator nodes span from the start of their first operand to the end of their last.
use chumsky::{input::ValueInput, prelude::*};

use crate::ParseError;
use crate::ast::{
    BinOp, BoolOp, CmpOp, Comprehension, Constant, ExprKind, Keyword, Node, Param, ParamKind, Span,
    UnaryOp,
};
use crate::lexer::{Keyword as Kw, Token, lexer};
use crate::literal;

type ParserExtra<'tokens, 'src> = extra::Err<Rich<'tokens, Token<'src>, SimpleSpan>>;

#[inline]
fn range(span: SimpleSpan) -> Span {
    span.start..span.end
}

#[inline]
fn join(start: &Span, end: &Span) -> Span {
    start.start..end.end
}

fn binary(op: BinOp, left: Node, right: Node) -> Node {
    let span = join(&left.span, &right.span);
    Node::new(
        ExprKind::BinOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
        span,
    )
}

fn unary(op: UnaryOp, op_span: Span, operand: Node) -> Node {
    let span = join(&op_span, &operand.span);
    Node::new(
        ExprKind::UnaryOp {
            op,
            operand: Box::new(operand),
        },
        span,
    )
}

fn bool_op(op: BoolOp, mut values: Vec<Node>) -> Node {
    if values.len() == 1 {
        if let Some(single) = values.pop() {
            return single;
        }
    }
    let span = match (values.first(), values.last()) {
        (Some(first), Some(last)) => join(&first.span, &last.span),
        _ => 0..0,
    };
    Node::new(ExprKind::BoolOp { op, values }, span)
}

fn compare(left: Node, rest: Vec<(CmpOp, Node)>) -> Node {
    let Some(end) = rest.last().map(|(_, last)| last.span.clone()) else {
        return left;
    };
    let span = join(&left.span, &end);
    let (ops, comparators) = rest.into_iter().unzip();
    Node::new(
        ExprKind::Compare {
            left: Box::new(left),
            ops,
            comparators,
        },
        span,
    )
}

/// Unwrap a one-element list, otherwise build a container node from all elements.
fn single_or(mut nodes: Vec<Node>, wrap: impl FnOnce(Vec<Node>) -> Node) -> Node {
    if nodes.len() == 1 {
        if let Some(single) = nodes.pop() {
            return single;
        }
    }
    wrap(nodes)
}

/// What follows the first element of a parenthesized group, a list or a set.
enum ItemTail {
    Comprehension(Vec<Comprehension>),
    /// Further elements, `None` when no comma follows the first one.
    Items(Option<Vec<Node>>),
}

enum DictTail {
    Comprehension(Vec<Comprehension>),
    Entries(Vec<(Option<Node>, Node)>),
}

/// What follows the first key or element inside braces.
enum BraceTail {
    Dict(Node, DictTail),
    Set(ItemTail),
}

fn elements(first: Node, rest: Option<Vec<Node>>) -> Vec<Node> {
    let mut items = vec![first];
    items.extend(rest.unwrap_or_default());
    items
}

enum Argument {
    Positional(Node),
    Keyword(Keyword),
}

enum Trailer {
    Call(Vec<Argument>),
    Attribute(String),
    Index(Node),
}

fn binary_level<'tokens, 'src: 'tokens, I, P, O>(
    operand: P,
    operator: O,
) -> impl Parser<'tokens, I, Node, ParserExtra<'tokens, 'src>> + Clone
where
    I: ValueInput<'tokens, Token = Token<'src>, Span = SimpleSpan>,
    P: Parser<'tokens, I, Node, ParserExtra<'tokens, 'src>> + Clone,
    O: Parser<'tokens, I, BinOp, ParserExtra<'tokens, 'src>> + Clone,
{
    operand
        .clone()
        .foldl(operator.then(operand).repeated(), |left, (op, right)| {
            binary(op, left, right)
        })
}

pub(crate) fn expr_parser<'tokens, 'src: 'tokens, I>()
-> impl Parser<'tokens, I, Node, ParserExtra<'tokens, 'src>> + Clone
where
    I: ValueInput<'tokens, Token = Token<'src>, Span = SimpleSpan>,
{
    recursive(|expr| {
        let ident = select! { Token::Name(n) => n.to_string() }.labelled("identifier");
        let comma = just(Token::Ctrl(','));

        // ---------------- Atoms ----------------

        let name = ident
            .clone()
            .map_with(|n, e| Node::new(ExprKind::Name(n), range(e.span())));

        let constant = select! {
            Token::Int(s) => Constant::Int(s.to_string()),
            Token::Float(s) => Constant::Float(s.to_string()),
            Token::Kw(Kw::True) => Constant::True,
            Token::Kw(Kw::False) => Constant::False,
            Token::Kw(Kw::None) => Constant::None,
            Token::Op("...") => Constant::Ellipsis,
        }
        .map_with(|c, e| Node::new(ExprKind::Constant(c), range(e.span())))
        .labelled("constant");

        let strings = select! { Token::Str(s) => s }
            .repeated()
            .at_least(1)
            .collect::<Vec<_>>()
            .map_with(|parts, e| Node::new(literal::concat(&parts), range(e.span())))
            .labelled("string");

        // Comprehension targets: names and (nested) tuples/lists of names.
        let target = recursive(|target| {
            let items = target
                .separated_by(just(Token::Ctrl(',')))
                .allow_trailing()
                .collect::<Vec<Node>>();

            choice((
                name.clone(),
                items
                    .clone()
                    .delimited_by(just(Token::Ctrl('(')), just(Token::Ctrl(')')))
                    .map_with(|items, e| Node::new(ExprKind::Tuple(items), range(e.span()))),
                items
                    .delimited_by(just(Token::Ctrl('[')), just(Token::Ctrl(']')))
                    .map_with(|items, e| Node::new(ExprKind::List(items), range(e.span()))),
            ))
        });

        let target_list = target
            .separated_by(comma.clone())
            .at_least(1)
            .collect::<Vec<_>>()
            .map_with(|targets, e| {
                let span = range(e.span());
                single_or(targets, |targets| Node::new(ExprKind::Tuple(targets), span))
            });

        let comprehension = just(Token::Kw(Kw::For))
            .ignore_then(target_list)
            .then_ignore(just(Token::Kw(Kw::In)))
            .then(expr.clone())
            .then(
                just(Token::Kw(Kw::If))
                    .ignore_then(expr.clone())
                    .repeated()
                    .collect::<Vec<_>>(),
            )
            .map(|((target, iter), ifs)| Comprehension { target, iter, ifs })
            .repeated()
            .at_least(1)
            .collect::<Vec<_>>()
            .labelled("comprehension")
            .boxed();

        let starred = just(Token::Op("*"))
            .map_with(|_, e| range(e.span()))
            .then(expr.clone())
            .map(|(star, value): (Span, Node)| {
                let span = join(&star, &value.span);
                Node::new(ExprKind::Starred(Box::new(value)), span)
            });

        let item = starred.clone().or(expr.clone()).boxed();

        // The first element is parsed once; its tail picks the construct.
        let item_tail = choice((
            comprehension.clone().map(ItemTail::Comprehension),
            comma
                .clone()
                .ignore_then(
                    item.clone()
                        .separated_by(comma.clone())
                        .allow_trailing()
                        .collect::<Vec<_>>(),
                )
                .or_not()
                .map(ItemTail::Items),
        ))
        .boxed();

        let group = item
            .clone()
            .then(item_tail.clone())
            .or_not()
            .delimited_by(just(Token::Ctrl('(')), just(Token::Ctrl(')')))
            .map_with(|group, e| {
                let span = range(e.span());
                match group {
                    None => Node::new(ExprKind::Tuple(Vec::new()), span),
                    Some((inner, ItemTail::Items(None))) => inner,
                    Some((first, ItemTail::Items(rest))) => {
                        Node::new(ExprKind::Tuple(elements(first, rest)), span)
                    }
                    Some((elt, ItemTail::Comprehension(generators))) => Node::new(
                        ExprKind::GeneratorExp {
                            elt: Box::new(elt),
                            generators,
                        },
                        span,
                    ),
                }
            })
            .labelled("parentheses");

        let list = item
            .clone()
            .then(item_tail.clone())
            .or_not()
            .delimited_by(just(Token::Ctrl('[')), just(Token::Ctrl(']')))
            .map_with(|list, e| {
                let kind = match list {
                    None => ExprKind::List(Vec::new()),
                    Some((first, ItemTail::Items(rest))) => ExprKind::List(elements(first, rest)),
                    Some((elt, ItemTail::Comprehension(generators))) => ExprKind::ListComp {
                        elt: Box::new(elt),
                        generators,
                    },
                };
                Node::new(kind, range(e.span()))
            })
            .labelled("list");

        let dict_entry = choice((
            just(Token::Op("**"))
                .ignore_then(expr.clone())
                .map(|value| (None, value)),
            expr.clone()
                .then_ignore(just(Token::Ctrl(':')))
                .then(expr.clone())
                .map(|(key, value)| (Some(key), value)),
        ));

        let dict_entries = comma
            .clone()
            .ignore_then(
                dict_entry
                    .separated_by(comma.clone())
                    .allow_trailing()
                    .collect::<Vec<_>>(),
            )
            .or_not()
            .map(Option::unwrap_or_default)
            .boxed();

        let brace_tail = choice((
            just(Token::Ctrl(':'))
                .ignore_then(expr.clone())
                .then(choice((
                    comprehension.clone().map(DictTail::Comprehension),
                    dict_entries.clone().map(DictTail::Entries),
                )))
                .map(|(value, tail)| BraceTail::Dict(value, tail)),
            item_tail.map(BraceTail::Set),
        ));

        let brace = choice((
            just(Token::Op("**"))
                .ignore_then(expr.clone())
                .then(dict_entries)
                .map(|(value, rest)| {
                    let mut entries = vec![(None, value)];
                    entries.extend(rest);
                    ExprKind::Dict(entries)
                }),
            item.clone()
                .then(brace_tail)
                .map(|(first, tail)| match tail {
                    BraceTail::Dict(value, DictTail::Comprehension(generators)) => {
                        ExprKind::DictComp {
                            key: Box::new(first),
                            value: Box::new(value),
                            generators,
                        }
                    }
                    BraceTail::Dict(value, DictTail::Entries(rest)) => {
                        let mut entries = vec![(Some(first), value)];
                        entries.extend(rest);
                        ExprKind::Dict(entries)
                    }
                    BraceTail::Set(ItemTail::Comprehension(generators)) => ExprKind::SetComp {
                        elt: Box::new(first),
                        generators,
                    },
                    BraceTail::Set(ItemTail::Items(rest)) => ExprKind::Set(elements(first, rest)),
                }),
        ))
        .or_not()
        .delimited_by(just(Token::Ctrl('{')), just(Token::Ctrl('}')))
        .map_with(|kind, e| {
            Node::new(
                kind.unwrap_or(ExprKind::Dict(Vec::new())),
                range(e.span()),
            )
        })
        .labelled("dict or set");

        let atom = choice((name, constant, strings, group, list, brace))
            .labelled("atom")
            .boxed();

        // ---------------- Trailers: calls, attributes, subscripts ----------------

        let argument = choice((
            ident
                .clone()
                .then_ignore(just(Token::Op("=")))
                .then(expr.clone())
                .map_with(|(arg, value), e| {
                    Argument::Keyword(Keyword {
                        arg: Some(arg),
                        value,
                        span: range(e.span()),
                    })
                }),
            just(Token::Op("**"))
                .ignore_then(expr.clone())
                .map_with(|value, e| {
                    Argument::Keyword(Keyword {
                        arg: None,
                        value,
                        span: range(e.span()),
                    })
                }),
            starred.map(Argument::Positional),
            expr.clone()
                .then(comprehension.clone().or_not())
                .map_with(|(elt, generators), e| {
                    Argument::Positional(match generators {
                        None => elt,
                        Some(generators) => Node::new(
                            ExprKind::GeneratorExp {
                                elt: Box::new(elt),
                                generators,
                            },
                            range(e.span()),
                        ),
                    })
                }),
        ));

        let call = argument
            .separated_by(comma.clone())
            .allow_trailing()
            .collect::<Vec<_>>()
            .delimited_by(just(Token::Ctrl('(')), just(Token::Ctrl(')')))
            .map(Trailer::Call)
            .labelled("call arguments");

        let attribute = just(Token::Ctrl('.'))
            .ignore_then(ident.clone())
            .map(Trailer::Attribute);

        let bound = expr.clone().or_not();
        let slice_tail = just(Token::Ctrl(':'))
            .ignore_then(bound.clone())
            .then(just(Token::Ctrl(':')).ignore_then(bound).or_not());

        // A subscript element is an expression, optionally continued into a slice.
        let subscript_item = item
            .clone()
            .or_not()
            .then(slice_tail.or_not())
            .try_map(|(lower, slice), span: SimpleSpan| match slice {
                None => lower.ok_or_else(|| Rich::custom(span, "expected subscript")),
                Some((upper, step)) => Ok(Node::new(
                    ExprKind::Slice {
                        lower: lower.map(Box::new),
                        upper: upper.map(Box::new),
                        step: step.flatten().map(Box::new),
                    },
                    range(span),
                )),
            })
            .boxed();

        let index = subscript_item
            .separated_by(comma.clone())
            .allow_trailing()
            .at_least(1)
            .collect::<Vec<_>>()
            .map_with(|items, e| {
                let span = range(e.span());
                single_or(items, |items| Node::new(ExprKind::Tuple(items), span))
            })
            .delimited_by(just(Token::Ctrl('[')), just(Token::Ctrl(']')))
            .map(Trailer::Index)
            .labelled("subscript");

        let trailer = choice((call, attribute, index)).map_with(|t, e| (t, range(e.span())));

        let primary = atom
            .foldl(trailer.repeated(), |value, (trailer, trailer_span)| {
                let span = join(&value.span, &trailer_span);
                let kind = match trailer {
                    Trailer::Call(arguments) => {
                        let mut args = Vec::new();
                        let mut keywords = Vec::new();
                        for argument in arguments {
                            match argument {
                                Argument::Positional(node) => args.push(node),
                                Argument::Keyword(keyword) => keywords.push(keyword),
                            }
                        }
                        ExprKind::Call {
                            func: Box::new(value),
                            args,
                            keywords,
                        }
                    }
                    Trailer::Attribute(attr) => ExprKind::Attribute {
                        value: Box::new(value),
                        attr,
                    },
                    Trailer::Index(index) => ExprKind::Subscript {
                        value: Box::new(value),
                        index: Box::new(index),
                    },
                };
                Node::new(kind, span)
            })
            .boxed();

        // ---------------- Arithmetic ----------------

        // `-x ** y` is `-(x ** y)` and `x ** -y` is `x ** (-y)`.
        let factor = recursive(|factor| {
            let power = primary
                .clone()
                .then(just(Token::Op("**")).ignore_then(factor).or_not())
                .map(|(base, exponent)| match exponent {
                    None => base,
                    Some(exponent) => binary(BinOp::Pow, base, exponent),
                });

            let prefix = select! {
                Token::Op("-") => UnaryOp::USub,
                Token::Op("+") => UnaryOp::UAdd,
                Token::Op("~") => UnaryOp::Invert,
            }
            .map_with(|op, e| (op, range(e.span())));

            prefix
                .repeated()
                .foldr(power, |(op, span), operand| unary(op, span, operand))
        })
        .boxed();

        let term = binary_level(
            factor,
            select! {
                Token::Op("*") => BinOp::Mult,
                Token::Op("/") => BinOp::Div,
                Token::Op("//") => BinOp::FloorDiv,
                Token::Op("%") => BinOp::Mod,
                Token::Op("@") => BinOp::MatMult,
            },
        )
        .boxed();
        let sum = binary_level(
            term,
            select! {
                Token::Op("+") => BinOp::Add,
                Token::Op("-") => BinOp::Sub,
            },
        )
        .boxed();
        let shift = binary_level(
            sum,
            select! {
                Token::Op("<<") => BinOp::LShift,
                Token::Op(">>") => BinOp::RShift,
            },
        )
        .boxed();
        let bitand = binary_level(shift, just(Token::Op("&")).to(BinOp::BitAnd)).boxed();
        let bitxor = binary_level(bitand, just(Token::Op("^")).to(BinOp::BitXor)).boxed();
        let bitor = binary_level(bitxor, just(Token::Op("|")).to(BinOp::BitOr)).boxed();

        // ---------------- Logic ----------------

        let cmp_op = choice((
            select! {
                Token::Op("==") => CmpOp::Eq,
                Token::Op("!=") => CmpOp::NotEq,
                Token::Op("<") => CmpOp::Lt,
                Token::Op("<=") => CmpOp::LtE,
                Token::Op(">") => CmpOp::Gt,
                Token::Op(">=") => CmpOp::GtE,
            },
            just(Token::Kw(Kw::Is))
                .then(just(Token::Kw(Kw::Not)))
                .to(CmpOp::IsNot),
            just(Token::Kw(Kw::Is)).to(CmpOp::Is),
            just(Token::Kw(Kw::Not))
                .then(just(Token::Kw(Kw::In)))
                .to(CmpOp::NotIn),
            just(Token::Kw(Kw::In)).to(CmpOp::In),
        ))
        .labelled("comparison operator");

        let comparison = bitor
            .clone()
            .then(cmp_op.then(bitor).repeated().collect::<Vec<_>>())
            .map(|(left, rest)| compare(left, rest))
            .boxed();

        let inversion = just(Token::Kw(Kw::Not))
            .map_with(|_, e| range(e.span()))
            .repeated()
            .foldr(comparison, |span, operand| {
                unary(UnaryOp::Not, span, operand)
            })
            .boxed();

        let conjunction = inversion
            .separated_by(just(Token::Kw(Kw::And)))
            .at_least(1)
            .collect::<Vec<_>>()
            .map(|values| bool_op(BoolOp::And, values))
            .boxed();

        let disjunction = conjunction
            .separated_by(just(Token::Kw(Kw::Or)))
            .at_least(1)
            .collect::<Vec<_>>()
            .map(|values| bool_op(BoolOp::Or, values))
            .boxed();

        let conditional = disjunction
            .clone()
            .then(
                just(Token::Kw(Kw::If))
                    .ignore_then(disjunction)
                    .then_ignore(just(Token::Kw(Kw::Else)))
                    .then(expr.clone())
                    .or_not(),
            )
            .map(|(body, branch)| match branch {
                None => body,
                Some((test, orelse)) => {
                    let span = join(&body.span, &orelse.span);
                    Node::new(
                        ExprKind::IfExp {
                            test: Box::new(test),
                            body: Box::new(body),
                            orelse: Box::new(orelse),
                        },
                        span,
                    )
                }
            })
            .labelled("conditional expression");

        // ---------------- Lambda ----------------

        let param = choice((
            just(Token::Op("**"))
                .ignore_then(ident.clone())
                .map(|name| {
                    Some(Param {
                        name,
                        kind: ParamKind::VarKeyword,
                        default: None,
                    })
                }),
            just(Token::Op("*"))
                .ignore_then(ident.clone().or_not())
                .map(|name| {
                    name.map(|name| Param {
                        name,
                        kind: ParamKind::VarPositional,
                        default: None,
                    })
                }),
            // Positional-only marker.
            just(Token::Op("/")).to(None),
            ident
                .then(just(Token::Op("=")).ignore_then(expr.clone()).or_not())
                .map(|(name, default)| {
                    Some(Param {
                        name,
                        kind: ParamKind::Regular,
                        default,
                    })
                }),
        ));

        let lambda = just(Token::Kw(Kw::Lambda))
            .map_with(|_, e| range(e.span()))
            .then(
                param
                    .separated_by(comma)
                    .allow_trailing()
                    .collect::<Vec<_>>(),
            )
            .then_ignore(just(Token::Ctrl(':')))
            .then(expr)
            .map(|((start, params), body): ((Span, Vec<Option<Param>>), Node)| {
                let span = join(&start, &body.span);
                Node::new(
                    ExprKind::Lambda {
                        params: params.into_iter().flatten().collect(),
                        body: Box::new(body),
                    },
                    span,
                )
            })
            .labelled("lambda");

        lambda.or(conditional)
    })
}

/// Parse a single Python expression.
///
/// Returns the root [`Node`] on success, or every lexing/parsing diagnostic on failure.
/// Node spans are byte offsets into `src`.
///
/// Example
/// ```
/// use pyexpr::{ExprKind, parse_expression};
/// let node = parse_expression("lambda x: x > 0").unwrap();
/// assert!(matches!(node.kind, ExprKind::Lambda { .. }));
/// ```
pub fn parse_expression(src: &str) -> Result<Node, Vec<ParseError>> {
    // 1) Lexing
    let (tokens, lex_errs) = lexer().parse(src).into_output_errors();
    if !lex_errs.is_empty() {
        return Err(lex_errs
            .iter()
            .map(|e| ParseError::new(format!("lexing error: {e}"), range(*e.span())))
            .collect());
    }
    let tokens = tokens.unwrap_or_default();

    // 2) Parsing over the spanned token stream
    let eoi = SimpleSpan::from(src.len()..src.len());
    let (node, parse_errs) = expr_parser()
        .then_ignore(end())
        .parse(tokens.as_slice().map(eoi, |(t, s)| (t, s)))
        .into_output_errors();

    let mut errors: Vec<ParseError> = parse_errs
        .iter()
        .map(|e| ParseError::new(format!("parse error: {e}"), range(*e.span())))
        .collect();

    match node {
        Some(node) if errors.is_empty() => Ok(node),
        _ => {
            if errors.is_empty() {
                errors.push(ParseError::new(
                    "parse error: no expression found".to_string(),
                    0..src.len(),
                ));
            }
            Err(errors)
        }
    }
}
