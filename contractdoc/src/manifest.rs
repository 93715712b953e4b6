//! Contract manifests: TOML files listing entities and the decorators attached to them.
//!
//! ```toml
//! [[entity]]
//! name = "some_func"
//! kind = "function"
//! requires = [["@icontract.require(lambda x: x > 0)"]]
//! snapshots = ["@icontract.snapshot(lambda lst: lst[:])"]
//! ensures = ["@icontract.ensure(lambda result: result > 0)"]
//!
//! [[entity]]
//! name = "SomeClass.value"
//! kind = "attribute"
//! [entity.get]
//! ensures = ["@icontract.ensure(lambda result: result > 0)"]
//! ```
//!
//! Decorators are kept as text; they are inspected every time an entity is asked for its
//! contracts.
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    hook::ContractProvider,
    inspect::{DecoratorKind, contract_of_kind, snapshot_from_decorator},
    model::{ContractSet, InvariantSet, PropertyContractBundle, Snapshot},
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default, rename = "entity")]
    pub entities: Vec<EntityManifest>,
}

/// A snapshot decorator, optionally with the parameter names of a capture function
/// referenced by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SnapshotEntry {
    Decorator(String),
    Detailed {
        decorator: String,
        #[serde(default)]
        params: Vec<String>,
    },
}

/// Decorators of one function or accessor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessorManifest {
    /// Precondition groups, innermost first.
    #[serde(default)]
    pub requires: Vec<Vec<String>>,
    #[serde(default)]
    pub snapshots: Vec<SnapshotEntry>,
    #[serde(default)]
    pub ensures: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityManifest {
    pub name: String,
    /// Classification tag passed to the documentation hook.
    pub kind: String,
    #[serde(flatten)]
    pub contracts: AccessorManifest,
    /// Invariant decorators per class of the hierarchy, base-most first.
    #[serde(default)]
    pub invariants: Vec<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get: Option<AccessorManifest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set: Option<AccessorManifest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub del: Option<AccessorManifest>,
}

impl Manifest {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|source| Error::ManifestParseError { source })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::IoError {
            source,
            path: path.to_path_buf(),
        })?;
        Self::from_toml_str(&text)
    }

    pub fn entity(&self, name: &str) -> Result<&EntityManifest> {
        self.entities
            .iter()
            .find(|entity| entity.name == name)
            .ok_or_else(|| Error::EntityNotFound(name.to_string()))
    }
}

impl SnapshotEntry {
    fn build(&self) -> Result<Snapshot> {
        match self {
            SnapshotEntry::Decorator(decorator) => snapshot_from_decorator(decorator, &[]),
            SnapshotEntry::Detailed { decorator, params } => {
                snapshot_from_decorator(decorator, params)
            }
        }
    }
}

impl AccessorManifest {
    fn build(&self) -> Result<ContractSet> {
        let preconditions = self
            .requires
            .iter()
            .map(|group| {
                group
                    .iter()
                    .map(|decorator| contract_of_kind(decorator, DecoratorKind::Require))
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        let snapshots = self
            .snapshots
            .iter()
            .map(SnapshotEntry::build)
            .collect::<Result<Vec<_>>>()?;

        let postconditions = self
            .ensures
            .iter()
            .map(|decorator| contract_of_kind(decorator, DecoratorKind::Ensure))
            .collect::<Result<Vec<_>>>()?;

        Ok(ContractSet {
            preconditions,
            snapshots,
            postconditions,
        })
    }
}

impl ContractProvider for EntityManifest {
    fn contracts(&self) -> Result<Option<ContractSet>> {
        self.contracts.build().map(Some)
    }

    fn invariants(&self) -> Result<Option<InvariantSet>> {
        let layers = self
            .invariants
            .iter()
            .map(|layer| {
                layer
                    .iter()
                    .map(|decorator| contract_of_kind(decorator, DecoratorKind::Invariant))
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Some(InvariantSet::from_hierarchy(layers)))
    }

    fn property_contracts(&self) -> Result<Option<PropertyContractBundle>> {
        let build = |accessor: &Option<AccessorManifest>| {
            accessor.as_ref().map(AccessorManifest::build).transpose()
        };
        Ok(Some(PropertyContractBundle {
            get: build(&self.get)?,
            set: build(&self.set)?,
            del: build(&self.del)?,
        }))
    }
}
