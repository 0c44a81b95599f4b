//! Error types for the input boundary.
//!
//! The engine itself never fails once documents are decoded; these errors
//! surface only when loading skeletons and schema documents.

use thiserror::Error;

/// Errors raised while decoding caller-supplied documents.
#[derive(Debug, Error)]
pub enum InputError {
    /// Document is not decodable JSON
    #[error("input is not valid JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),

    /// Schema document is not decodable YAML
    #[error("schema document is not valid YAML: {0}")]
    MalformedYaml(#[from] serde_yaml::Error),

    /// File could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
