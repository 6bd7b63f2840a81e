// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! File-based type metadata.
//!
//! A manifest lists type descriptors in YAML (JSON is valid YAML):
//!
//! ```yaml
//! types:
//!   - type: app::model::Person
//!     attributes:
//!       - name: name
//!         kind: !scalar string
//!       - name: address
//!         groups: [detail]
//!         kind: composite
//!     accessors: [get_name, get_address]
//! ```

use crate::error::MetadataError;
use crate::types::{TypeDescriptor, TypeRegistry};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A set of type descriptors loaded from a file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypeManifest {
    #[serde(default)]
    pub types: Vec<TypeDescriptor>,
}

impl TypeManifest {
    pub fn from_yaml_str(content: &str) -> Result<Self, MetadataError> {
        serde_yaml::from_str(content).map_err(|e| MetadataError::Parse(e.to_string()))
    }

    /// Load a manifest from a YAML or JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, MetadataError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| MetadataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Register every descriptor into a fresh registry.
    pub fn into_registry(self) -> Result<TypeRegistry, MetadataError> {
        let registry = TypeRegistry::new();
        for descriptor in self.types {
            registry.register(descriptor)?;
        }
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MetadataProvider, TypeIdentifier};

    const MANIFEST: &str = r#"
types:
  - type: app::model::Person
    attributes:
      - name: name
        kind: !scalar string
      - name: address
        groups: [detail]
        kind: composite
    accessors: [get_name, get_address]
  - type: app::model::Tag
"#;

    #[test]
    fn test_manifest_into_registry() {
        let manifest = TypeManifest::from_yaml_str(MANIFEST).expect("parse manifest");
        assert_eq!(manifest.types.len(), 2);

        let registry = manifest.into_registry().expect("registry");
        let person = registry
            .metadata_for(&TypeIdentifier::new("app::model::Person"))
            .expect("person registered");
        assert_eq!(person.attributes.len(), 2);
        assert!(registry
            .metadata_for(&TypeIdentifier::new("app::model::Tag"))
            .is_some_and(|d| d.is_empty()));
    }

    #[test]
    fn test_manifest_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("types.yaml");
        fs::write(&path, MANIFEST).expect("write manifest");

        let manifest = TypeManifest::from_file(&path).expect("load manifest");
        assert_eq!(manifest.types[0].type_id.as_str(), "app::model::Person");
    }

    #[test]
    fn test_manifest_parse_error() {
        let err = TypeManifest::from_yaml_str("types: [ {").expect_err("invalid yaml");
        assert!(matches!(err, MetadataError::Parse(_)));
    }
}
