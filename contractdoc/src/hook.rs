//! The callback surface exposed to a documentation host.
use log::debug;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::{
    compose::{format_contract_set, format_invariants, format_property_contracts},
    config::RenderConfig,
    error::Result,
    model::{ContractSet, InvariantSet, PropertyContractBundle},
};

/// Classification of a documented entity, as reported by the host.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Function,
    Method,
    Attribute,
    Class,
}

/// Source of contract metadata for one entity.
///
/// Implementors build fresh model objects on every call; nothing is cached across
/// documentation requests. A malformed decorator is reported as an error and aborts
/// rendering of that entity.
pub trait ContractProvider {
    /// Contracts of a function or method.
    fn contracts(&self) -> Result<Option<ContractSet>> {
        Ok(None)
    }

    /// Invariants of a class, base-most first.
    fn invariants(&self) -> Result<Option<InvariantSet>> {
        Ok(None)
    }

    /// Contracts of a property's accessors.
    fn property_contracts(&self) -> Result<Option<PropertyContractBundle>> {
        Ok(None)
    }
}

/// Documentation lines for `entity`.
///
/// Unsupported classifications and entities without contracts yield no lines.
pub fn format_contracts(
    what: &str,
    entity: &dyn ContractProvider,
    config: &RenderConfig,
) -> Result<Vec<String>> {
    let Ok(kind) = what.parse::<EntityKind>() else {
        debug!("entities of kind '{what}' carry no contracts");
        return Ok(Vec::new());
    };

    let lines = match kind {
        EntityKind::Function | EntityKind::Method => entity
            .contracts()?
            .map(|set| format_contract_set(&set.normalized(), None, config)),
        EntityKind::Class => entity
            .invariants()?
            .map(|invariants| format_invariants(&invariants, config)),
        EntityKind::Attribute => entity
            .property_contracts()?
            .map(|bundle| format_property_contracts(&bundle, config)),
    };

    Ok(lines.unwrap_or_default())
}

/// Append the documentation lines for `entity` to the host's existing `lines`.
pub fn process_docstring(
    what: &str,
    entity: &dyn ContractProvider,
    config: &RenderConfig,
    lines: &mut Vec<String>,
) -> Result<()> {
    lines.extend(format_contracts(what, entity, config)?);
    Ok(())
}
