//! Rendering options, loadable from TOML.
//!
//! ```toml
//! markup = "plain"
//! bullet_indent = 2
//! ```
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    markup::Markup,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub markup: Markup,
    /// Spaces before the `*` marker of every bullet.
    pub bullet_indent: usize,
    /// Spaces added in front of every line of a literal code block.
    pub code_block_indent: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            markup: Markup::Rest,
            bullet_indent: 4,
            code_block_indent: 4,
        }
    }
}

impl RenderConfig {
    pub fn with_markup(self, markup: Markup) -> Self {
        Self { markup, ..self }
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|source| Error::ConfigParseError { source })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::IoError {
            source,
            path: path.to_path_buf(),
        })?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_take_defaults() {
        let config = RenderConfig::from_toml_str("markup = \"plain\"").unwrap();
        assert_eq!(config.markup, Markup::Plain);
        assert_eq!(config.bullet_indent, 4);
        assert_eq!(config.code_block_indent, 4);
        assert_eq!(RenderConfig::from_toml_str("").unwrap(), RenderConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let error = RenderConfig::from_toml_str("indent = 2").unwrap_err();
        assert!(error.is_config_parse_error());
    }
}
