//! Output vocabulary: inline code, cross-references and section headings.
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::model::Accessor;

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
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
pub enum Markup {
    /// reStructuredText roles and field-list headings.
    #[default]
    Rest,
    /// Bare text.
    Plain,
}

/// Heading keywords, in the order sections of one contract set are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Section {
    #[strum(serialize = "requires")]
    Requires,
    #[strum(serialize = "requires else")]
    RequiresElse,
    #[strum(serialize = "OLD")]
    Old,
    #[strum(serialize = "ensures")]
    Ensures,
    #[strum(serialize = "establishes")]
    Establishes,
}

impl Markup {
    pub fn code(self, text: &str) -> String {
        match self {
            Markup::Rest => format!(":code:`{text}`"),
            Markup::Plain => text.to_string(),
        }
    }

    pub fn class_ref(self, name: &str) -> String {
        match self {
            Markup::Rest => format!(":py:class:`{name}`"),
            Markup::Plain => name.to_string(),
        }
    }

    pub fn func_ref(self, name: &str) -> String {
        match self {
            Markup::Rest => format!(":py:func:`{name}`"),
            Markup::Plain => name.to_string(),
        }
    }

    /// Heading line such as `:requires:` or `:get requires else:`.
    pub fn heading(self, prefix: Option<Accessor>, section: Section) -> String {
        let label = match prefix {
            Some(accessor) => format!("{accessor} {section}"),
            None => section.to_string(),
        };
        match self {
            Markup::Rest => format!(":{label}:"),
            Markup::Plain => format!("{label}:"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headings() {
        assert_eq!(Markup::Rest.heading(None, Section::Requires), ":requires:");
        assert_eq!(
            Markup::Rest.heading(Some(Accessor::Get), Section::RequiresElse),
            ":get requires else:"
        );
        assert_eq!(Markup::Plain.heading(Some(Accessor::Del), Section::Old), "del OLD:");
    }

    #[test]
    fn references() {
        assert_eq!(Markup::Rest.class_ref("ValueError"), ":py:class:`ValueError`");
        assert_eq!(Markup::Rest.func_ref("is_sorted"), ":py:func:`is_sorted`");
        assert_eq!(Markup::Plain.code("x > 0"), "x > 0");
        assert_eq!("plain".parse::<Markup>().ok(), Some(Markup::Plain));
    }
}
