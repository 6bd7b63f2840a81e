// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types.
//!
//! Every error here is a configuration or code-generation defect; none is
//! retried internally.

use crate::types::TypeIdentifier;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while synthesizing a specialized normalizer.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("generated normalizers directory (\"{}\") is not writable", path.display())]
    DirectoryUnwritable { path: PathBuf },

    #[error("no getter or isser for object \"{type_id}\" attribute \"{attribute}\"")]
    MissingAccessor {
        type_id: TypeIdentifier,
        attribute: String,
    },

    #[error("generated normalizer \"{normalizer}\" violates the specialized normalizer contract: {reason}")]
    ContractViolation { normalizer: String, reason: String },

    #[error("failed to render template {template}: {message}")]
    Render { template: String, message: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while normalizing data.
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("value of kind {found} cannot be emitted as a scalar")]
    NotScalar { found: &'static str },

    #[error("accessor \"{accessor}\" of \"{type_id}\" returned no value")]
    AccessorFailed {
        type_id: TypeIdentifier,
        accessor: String,
    },

    #[error("no normalizer attached for recursive normalization")]
    NormalizerUnavailable,
}

/// Errors raised by metadata providers.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("attribute \"{attribute}\" declared twice on \"{type_id}\"")]
    DuplicateAttribute {
        type_id: TypeIdentifier,
        attribute: String,
    },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("metadata parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_accessor_message() {
        let err = GenerationError::MissingAccessor {
            type_id: TypeIdentifier::new("app::Person"),
            attribute: "age".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("app::Person"));
        assert!(msg.contains("age"));
    }

    #[test]
    fn test_generation_error_is_transparent() {
        let err = NormalizeError::from(GenerationError::DirectoryUnwritable {
            path: PathBuf::from("/cache/serializer"),
        });
        assert!(err.to_string().contains("/cache/serializer"));
    }
}
