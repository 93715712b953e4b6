//! Typed contract metadata handed over by whoever inspects the decorated entities.
//!
//! Every collection keeps the order it was given in. Precondition groups and snapshots
//! arrive innermost-decorator first and are documented in that same order.
use pyexpr::Expression;
use strum::{Display, EnumIter, IntoEnumIterator};

/// A function referenced by name instead of an inline lambda. Only the parameter names
/// are known; there is no body to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedCallableRef {
    pub name: String,
    pub params: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Usually a lambda; its body is what gets rendered.
    Inline(Expression),
    Named(NamedCallableRef),
}

/// What a contract raises when violated.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorSpec {
    /// A (possibly qualified) exception type name.
    Type(String),
    /// An inline callable constructing the exception.
    Callable(Expression),
    /// Anything else; nothing is inferred from it.
    Opaque,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Contract {
    pub condition: Condition,
    pub description: Option<String>,
    pub error: Option<ErrorSpec>,
}

impl Contract {
    pub fn new(condition: Condition) -> Self {
        Self {
            condition,
            description: None,
            error: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_error(mut self, error: ErrorSpec) -> Self {
        self.error = Some(error);
        self
    }
}

/// One alternative of a precondition chain.
pub type ContractGroup = Vec<Contract>;

#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotCapture {
    Inline(Expression),
    Named(NamedCallableRef),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub name: String,
    pub capture: SnapshotCapture,
}

/// Contracts of one function-like entity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContractSet {
    /// Index 0 is the primary `requires` group, the rest are `requires else` alternatives.
    pub preconditions: Vec<ContractGroup>,
    pub snapshots: Vec<Snapshot>,
    pub postconditions: Vec<Contract>,
}

impl ContractSet {
    pub fn is_empty(&self) -> bool {
        self.preconditions.iter().all(Vec::is_empty)
            && self.snapshots.is_empty()
            && self.postconditions.is_empty()
    }

    /// Drop empty precondition groups; they carry no documentation obligation.
    pub fn normalized(mut self) -> Self {
        self.preconditions.retain(|group| !group.is_empty());
        self
    }
}

/// Invariants of one type, base-most type first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvariantSet {
    pub invariants: Vec<Contract>,
}

impl InvariantSet {
    /// Concatenate per-type invariant lists given base-most first.
    pub fn from_hierarchy<L>(layers: L) -> Self
    where
        L: IntoIterator<Item = Vec<Contract>>,
    {
        Self {
            invariants: layers.into_iter().flatten().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.invariants.is_empty()
    }
}

/// Property accessor kinds, in documentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Accessor {
    Get,
    Set,
    Del,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyContractBundle {
    pub get: Option<ContractSet>,
    pub set: Option<ContractSet>,
    pub del: Option<ContractSet>,
}

impl PropertyContractBundle {
    pub fn accessor(&self, accessor: Accessor) -> Option<&ContractSet> {
        match accessor {
            Accessor::Get => self.get.as_ref(),
            Accessor::Set => self.set.as_ref(),
            Accessor::Del => self.del.as_ref(),
        }
    }

    /// Present accessors in `get`, `set`, `del` order.
    pub fn iter(&self) -> impl Iterator<Item = (Accessor, &ContractSet)> {
        Accessor::iter().filter_map(|accessor| Some((accessor, self.accessor(accessor)?)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().all(|(_, set)| set.is_empty())
    }
}
