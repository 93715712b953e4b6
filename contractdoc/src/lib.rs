//! Contractdoc: documentation lines for design-by-contract decorators.
//!
//! Given the preconditions, snapshots, postconditions and invariants of an entity, the
//! crate renders them into an ordered list of documentation lines:
//!
//! ```text
//! :requires:
//!     * :code:`x > 0` ⇒ :code:`x < 100`
//!     * :code:`lst` (not empty; raise :py:class:`ValueError`)
//! :ensures:
//!     * :code:`result >= x`
//! ```
//!
//! Pipeline
//! - [`inspect`] turns decorator source text into the typed [`model`].
//! - [`condition`] renders each condition, using [`implication`] and [`negation`] to spot
//!   `not A or B` shapes and [`multiline`] for conditions spanning several lines.
//! - [`error_info`] infers what a violated contract raises.
//! - [`compose`] assembles headed blocks; [`bullet`] indents each entry.
//! - [`hook`] is the entry point for a documentation host; [`manifest`] provides entities
//!   from a TOML file.
//!
//! Examples
//! ```
//! use contractdoc::prelude::*;
//!
//! let contract = contract_from_decorator("@icontract.require(lambda x: not (x > 0) or x < 100)").unwrap();
//! let set = ContractSet { preconditions: vec![vec![contract]], ..Default::default() };
//! let config = RenderConfig::default().with_markup(Markup::Plain);
//! assert_eq!(format_contract_set(&set, None, &config), vec!["requires:", "    * x > 0 ⇒ x < 100"]);
//! ```

pub mod bullet;
pub mod compose;
pub mod condition;
pub mod config;
pub mod error;
pub mod error_info;
pub mod hook;
pub mod implication;
pub mod inspect;
pub mod manifest;
pub mod markup;
pub mod model;
pub mod multiline;
pub mod negation;

pub use error::{Error, Result};

pub mod prelude {
    pub use crate::compose::{
        format_contract, format_contract_set, format_invariants, format_postconditions,
        format_preconditions, format_property_contracts, format_snapshots,
    };
    pub use crate::config::RenderConfig;
    pub use crate::error::{Error, Result};
    pub use crate::hook::{ContractProvider, EntityKind, format_contracts, process_docstring};
    pub use crate::inspect::{
        DecoratorKind, contract_from_decorator, contract_of_kind, snapshot_from_decorator,
    };
    pub use crate::manifest::Manifest;
    pub use crate::markup::Markup;
    pub use crate::model::*;
}
