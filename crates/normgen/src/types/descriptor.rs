// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Declared attribute metadata for normalizable types.

use crate::naming::camel_to_snake;
use crate::types::TypeIdentifier;
use serde::{Deserialize, Serialize};

/// Primitive value kinds emitted verbatim by generated normalizers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarKind {
    String,
    Integer,
    Float,
    Decimal,
    Boolean,
}

impl ScalarKind {
    /// Map a declared type name (`string`, `int`, `bool`, ...) to a kind.
    pub fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "string" | "str" | "String" => Some(Self::String),
            "int" | "integer" | "i8" | "i16" | "i32" | "i64" | "isize" | "u8" | "u16"
            | "u32" | "u64" | "usize" => Some(Self::Integer),
            "float" | "f32" | "f64" => Some(Self::Float),
            "decimal" => Some(Self::Decimal),
            "bool" | "boolean" => Some(Self::Boolean),
            _ => None,
        }
    }
}

/// Declared value kind of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// Primitive, emitted as-is.
    Scalar(ScalarKind),
    /// Nested object or collection, normalized recursively.
    Composite,
}

impl ValueKind {
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }
}

/// One declared serializable attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeMetadata {
    /// Declared field name.
    pub name: String,
    /// Serialization groups the attribute belongs to.
    #[serde(default)]
    pub groups: Vec<String>,
    /// Declared value kind.
    pub kind: ValueKind,
}

impl AttributeMetadata {
    pub fn new(name: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            name: name.into(),
            groups: Vec::new(),
            kind,
        }
    }

    #[must_use]
    pub fn with_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups = groups.into_iter().map(Into::into).collect();
        self
    }
}

/// Metadata of a normalizable type: its attributes in declaration order and
/// the zero-argument read accessors it exposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    #[serde(rename = "type")]
    pub type_id: TypeIdentifier,
    #[serde(default)]
    pub attributes: Vec<AttributeMetadata>,
    #[serde(default)]
    pub accessors: Vec<String>,
}

impl TypeDescriptor {
    pub fn new(type_id: impl Into<TypeIdentifier>) -> Self {
        Self {
            type_id: type_id.into(),
            attributes: Vec::new(),
            accessors: Vec::new(),
        }
    }

    /// Get attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&AttributeMetadata> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn has_accessor(&self, name: &str) -> bool {
        self.accessors.iter().any(|a| a == name)
    }

    /// Resolve the read accessor of an attribute: `get_<attr>`, then `is_<attr>`.
    pub fn accessor_for(&self, attribute: &str) -> Option<&str> {
        let field = camel_to_snake(attribute);
        let getter = format!("get_{field}");
        let query = format!("is_{field}");
        [getter, query]
            .iter()
            .find_map(|candidate| self.accessors.iter().find(|a| *a == candidate))
            .map(String::as_str)
    }

    /// Check if the type declares no serializable attributes.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// First attribute name declared more than once, if any.
    pub fn duplicate_attribute(&self) -> Option<&str> {
        self.attributes.iter().enumerate().find_map(|(idx, attr)| {
            self.attributes[..idx]
                .iter()
                .any(|earlier| earlier.name == attr.name)
                .then_some(attr.name.as_str())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_kind_from_type_name() {
        assert_eq!(ScalarKind::from_type_name("int"), Some(ScalarKind::Integer));
        assert_eq!(ScalarKind::from_type_name("boolean"), Some(ScalarKind::Boolean));
        assert_eq!(ScalarKind::from_type_name("decimal"), Some(ScalarKind::Decimal));
        assert_eq!(ScalarKind::from_type_name("Address"), None);
    }

    #[test]
    fn test_duplicate_attribute() {
        let mut desc = TypeDescriptor::new("app::Point");
        desc.attributes
            .push(AttributeMetadata::new("x", ValueKind::Scalar(ScalarKind::Float)));
        desc.attributes
            .push(AttributeMetadata::new("y", ValueKind::Scalar(ScalarKind::Float)));
        assert_eq!(desc.duplicate_attribute(), None);

        desc.attributes.push(AttributeMetadata::new("x", ValueKind::Composite));
        assert_eq!(desc.duplicate_attribute(), Some("x"));
    }

    #[test]
    fn test_accessor_probe() {
        let mut desc = TypeDescriptor::new("app::Person");
        desc.accessors = vec!["is_active".into(), "get_first_name".into(), "age".into()];

        assert_eq!(desc.accessor_for("firstName"), Some("get_first_name"));
        assert_eq!(desc.accessor_for("active"), Some("is_active"));
        assert_eq!(desc.accessor_for("age"), None);
    }

    #[test]
    fn test_getter_preferred_over_query() {
        let mut desc = TypeDescriptor::new("app::Flag");
        desc.accessors = vec!["is_enabled".into(), "get_enabled".into()];
        assert_eq!(desc.accessor_for("enabled"), Some("get_enabled"));
    }

    #[test]
    fn test_descriptor_yaml_shape() {
        let yaml = "type: app::Person\nattributes:\n  - name: name\n    kind: !scalar string\n  - name: address\n    groups: [detail]\n    kind: composite\naccessors: [get_name, get_address]\n";
        let desc: TypeDescriptor = serde_yaml::from_str(yaml).expect("parse descriptor");
        assert_eq!(desc.type_id.as_str(), "app::Person");
        assert_eq!(desc.attributes.len(), 2);
        assert_eq!(
            desc.attribute("name").map(|a| a.kind),
            Some(ValueKind::Scalar(ScalarKind::String))
        );
        assert_eq!(desc.attribute("address").map(|a| a.groups.len()), Some(1));
        assert!(desc.has_accessor("get_address"));
    }
}
