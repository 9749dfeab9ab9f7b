//! Error types for the dijit-forms glue layer.
//!
//! The mapping and attribute-mixing code is permissive by design and never
//! fails; errors only arise at the configuration boundary (malformed version
//! strings, unreadable TOML).

use thiserror::Error;

/// The error type for the dijit-forms crates.
#[derive(Error, Debug)]
pub enum DijitError {
    /// The glue layer is misconfigured (e.g. an unparsable Dojo version).
    #[error("Improperly configured: {0}")]
    ImproperlyConfigured(String),

    /// An error occurred while serializing widget attributes.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A configuration file could not be parsed.
    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// An I/O error occurred while reading configuration.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenience type alias for `Result<T, DijitError>`.
pub type DijitResult<T> = Result<T, DijitError>;
