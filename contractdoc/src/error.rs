use std::path::PathBuf;

use pyexpr::ParseError;
use strum::EnumIs;
use thiserror::Error;

fn summarize(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, EnumIs, Error)]
pub enum Error {
    #[error("I/O error on '{path}': {source}")]
    IoError {
        source: std::io::Error,
        path: PathBuf,
    },

    /// The render configuration is not valid TOML or has unknown keys.
    #[error("Failed to parse render configuration: {source}")]
    ConfigParseError { source: toml::de::Error },

    #[error("Failed to parse contract manifest: {source}")]
    ManifestParseError { source: toml::de::Error },

    /// A decorator's text is not a valid Python call expression.
    #[error("Failed to parse decorator `{decorator}`: {}", summarize(.errors))]
    DecoratorParseError {
        decorator: String,
        errors: Vec<ParseError>,
    },

    /// The decorator parsed but does not have the shape a contract requires.
    #[error("Malformed decorator `{decorator}`: {reason}")]
    MalformedDecorator { decorator: String, reason: String },

    #[error("Entity '{0}' not found in manifest")]
    EntityNotFound(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
