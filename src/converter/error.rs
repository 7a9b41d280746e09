use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error raised when an adapter is constructed over a source descriptor that
/// is empty, blank, or otherwise structurally unusable.
///
/// Raised synchronously at construction so a misconfigured adapter is
/// detected before any tree walk or document parse is paid for; result access
/// never raises. Malformed but non-empty input is not an error: unrecognized
/// constructs are skipped during conversion and the remaining routes are
/// still reported on.
#[derive(Debug, Error)]
pub enum EndpointConverterError {
    /// The source descriptor is empty or contains only whitespace.
    #[error("source descriptor is empty or blank")]
    EmptySource,

    /// The specification file could not be read.
    #[error("failed to read specification from {path:?}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The document is not syntactically valid YAML.
    #[error("specification document is not valid YAML")]
    InvalidYaml(#[from] serde_yaml::Error),

    /// The document is not syntactically valid JSON, or does not describe an
    /// OpenAPI specification at all.
    #[error("specification document is not a valid OpenAPI document")]
    InvalidDocument(#[from] serde_json::Error),
}
