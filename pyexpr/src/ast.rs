//! Spanned, immutable expression tree.
//!
//! Role
//! - Mirror the shape of Python expressions closely enough that structural inspection
//!   (operator kind, arity, literal values) can be done by pattern matching.
//! - Every node carries the byte range of the source text it was parsed from, so the
//!   exact original spelling can be recovered with [`Source::text_of`](crate::Source::text_of).
//!
//! Nodes are never mutated once built; there is no evaluator.

use std::ops::Range;

use strum::{Display, EnumIter, EnumString};

/// Byte range into the text a node was parsed from.
pub type Span = Range<usize>;

/// One expression node together with its source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: ExprKind,
    pub span: Span,
}

/// Literal constants. Numbers are kept as written; nothing here is ever evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constant {
    Int(String),
    Float(String),
    /// Decoded value of one or more adjacent string literals.
    Str(String),
    /// Decoded value of one or more adjacent bytes literals.
    Bytes(String),
    True,
    False,
    None,
    Ellipsis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum UnaryOp {
    #[strum(serialize = "not")]
    Not,
    #[strum(serialize = "-")]
    USub,
    #[strum(serialize = "+")]
    UAdd,
    #[strum(serialize = "~")]
    Invert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum BinOp {
    #[strum(serialize = "+")]
    Add,
    #[strum(serialize = "-")]
    Sub,
    #[strum(serialize = "*")]
    Mult,
    #[strum(serialize = "@")]
    MatMult,
    #[strum(serialize = "/")]
    Div,
    #[strum(serialize = "//")]
    FloorDiv,
    #[strum(serialize = "%")]
    Mod,
    #[strum(serialize = "**")]
    Pow,
    #[strum(serialize = "<<")]
    LShift,
    #[strum(serialize = ">>")]
    RShift,
    #[strum(serialize = "|")]
    BitOr,
    #[strum(serialize = "^")]
    BitXor,
    #[strum(serialize = "&")]
    BitAnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum BoolOp {
    #[strum(serialize = "and")]
    And,
    #[strum(serialize = "or")]
    Or,
}

/// Comparison operators, displayed with their Python spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum CmpOp {
    #[strum(serialize = "==")]
    Eq,
    #[strum(serialize = "!=")]
    NotEq,
    #[strum(serialize = "<")]
    Lt,
    #[strum(serialize = "<=")]
    LtE,
    #[strum(serialize = ">")]
    Gt,
    #[strum(serialize = ">=")]
    GtE,
    #[strum(serialize = "is")]
    Is,
    #[strum(serialize = "is not")]
    IsNot,
    #[strum(serialize = "in")]
    In,
    #[strum(serialize = "not in")]
    NotIn,
}

/// How a lambda parameter binds its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    Regular,
    /// `*args`
    VarPositional,
    /// `**kwargs`
    VarKeyword,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub kind: ParamKind,
    pub default: Option<Node>,
}

/// A keyword argument of a call. `arg` is `None` for `**mapping` unpacking.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyword {
    pub arg: Option<String>,
    pub value: Node,
    pub span: Span,
}

/// One `for target in iter if cond...` clause of a comprehension.
#[derive(Debug, Clone, PartialEq)]
pub struct Comprehension {
    pub target: Node,
    pub iter: Node,
    pub ifs: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Name(String),
    Constant(Constant),
    /// f-string, kept as its raw literal text.
    JoinedStr(String),
    Attribute {
        value: Box<Node>,
        attr: String,
    },
    Subscript {
        value: Box<Node>,
        index: Box<Node>,
    },
    Slice {
        lower: Option<Box<Node>>,
        upper: Option<Box<Node>>,
        step: Option<Box<Node>>,
    },
    Call {
        func: Box<Node>,
        args: Vec<Node>,
        keywords: Vec<Keyword>,
    },
    UnaryOp {
        op: UnaryOp,
        operand: Box<Node>,
    },
    BinOp {
        op: BinOp,
        left: Box<Node>,
        right: Box<Node>,
    },
    /// N-ary like Python: `a or b or c` is one node with three values.
    BoolOp {
        op: BoolOp,
        values: Vec<Node>,
    },
    /// Chained like Python: `a < b < c` has two operators and two comparators.
    Compare {
        left: Box<Node>,
        ops: Vec<CmpOp>,
        comparators: Vec<Node>,
    },
    /// `body if test else orelse`
    IfExp {
        test: Box<Node>,
        body: Box<Node>,
        orelse: Box<Node>,
    },
    Lambda {
        params: Vec<Param>,
        body: Box<Node>,
    },
    List(Vec<Node>),
    Tuple(Vec<Node>),
    Set(Vec<Node>),
    /// Entries with a `None` key are `**mapping` unpackings.
    Dict(Vec<(Option<Node>, Node)>),
    ListComp {
        elt: Box<Node>,
        generators: Vec<Comprehension>,
    },
    SetComp {
        elt: Box<Node>,
        generators: Vec<Comprehension>,
    },
    DictComp {
        key: Box<Node>,
        value: Box<Node>,
        generators: Vec<Comprehension>,
    },
    GeneratorExp {
        elt: Box<Node>,
        generators: Vec<Comprehension>,
    },
    Starred(Box<Node>),
}

/// Payload-free tag of an [`ExprKind`], handy for shape classification and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum ExprType {
    // Atoms
    Name,
    Constant,
    JoinedStr,

    // Access
    Attribute,
    Subscript,
    Slice,
    Call,

    // Operators
    UnaryOp,
    BinOp,
    BoolOp,
    Compare,
    IfExp,
    Lambda,

    // Displays
    List,
    Tuple,
    Set,
    Dict,
    ListComp,
    SetComp,
    DictComp,
    GeneratorExp,
    Starred,
}

impl Node {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn type_(&self) -> ExprType {
        match &self.kind {
            ExprKind::Name(_) => ExprType::Name,
            ExprKind::Constant(_) => ExprType::Constant,
            ExprKind::JoinedStr(_) => ExprType::JoinedStr,
            ExprKind::Attribute { .. } => ExprType::Attribute,
            ExprKind::Subscript { .. } => ExprType::Subscript,
            ExprKind::Slice { .. } => ExprType::Slice,
            ExprKind::Call { .. } => ExprType::Call,
            ExprKind::UnaryOp { .. } => ExprType::UnaryOp,
            ExprKind::BinOp { .. } => ExprType::BinOp,
            ExprKind::BoolOp { .. } => ExprType::BoolOp,
            ExprKind::Compare { .. } => ExprType::Compare,
            ExprKind::IfExp { .. } => ExprType::IfExp,
            ExprKind::Lambda { .. } => ExprType::Lambda,
            ExprKind::List(_) => ExprType::List,
            ExprKind::Tuple(_) => ExprType::Tuple,
            ExprKind::Set(_) => ExprType::Set,
            ExprKind::Dict(_) => ExprType::Dict,
            ExprKind::ListComp { .. } => ExprType::ListComp,
            ExprKind::SetComp { .. } => ExprType::SetComp,
            ExprKind::DictComp { .. } => ExprType::DictComp,
            ExprKind::GeneratorExp { .. } => ExprType::GeneratorExp,
            ExprKind::Starred(_) => ExprType::Starred,
        }
    }

    /// Decoded value if this node is a (non-bytes, non-f) string literal.
    pub fn as_str_literal(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Constant(Constant::Str(value)) => Some(value),
            _ => None,
        }
    }

    pub fn is_true_literal(&self) -> bool {
        matches!(self.kind, ExprKind::Constant(Constant::True))
    }

    /// Parameters and body if this node is a lambda.
    pub fn as_lambda(&self) -> Option<(&[Param], &Node)> {
        match &self.kind {
            ExprKind::Lambda { params, body } => Some((params, body)),
            _ => None,
        }
    }

    /// `true` for a plain name or a dotted attribute chain such as `errors.ValueError`.
    pub fn is_dotted_name(&self) -> bool {
        match &self.kind {
            ExprKind::Name(_) => true,
            ExprKind::Attribute { value, .. } => value.is_dotted_name(),
            _ => false,
        }
    }
}
