// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fluent builder API for TypeDescriptor.

use crate::naming::camel_to_snake;
use crate::types::{AttributeMetadata, ScalarKind, TypeDescriptor, TypeIdentifier, ValueKind};

/// Builder for creating TypeDescriptor instances.
#[derive(Debug)]
pub struct TypeDescriptorBuilder {
    type_id: TypeIdentifier,
    attributes: Vec<AttributeMetadata>,
    accessors: Vec<String>,
    default_accessors: bool,
}

impl TypeDescriptorBuilder {
    /// Create a new builder for the given type.
    pub fn new(type_id: impl Into<TypeIdentifier>) -> Self {
        Self {
            type_id: type_id.into(),
            attributes: Vec::new(),
            accessors: Vec::new(),
            default_accessors: false,
        }
    }

    /// Add a scalar attribute.
    pub fn scalar(self, name: impl Into<String>, kind: ScalarKind) -> Self {
        self.attribute(AttributeMetadata::new(name, ValueKind::Scalar(kind)))
    }

    /// Add a string attribute.
    pub fn string(self, name: impl Into<String>) -> Self {
        self.scalar(name, ScalarKind::String)
    }

    /// Add a nested object or collection attribute.
    pub fn composite(self, name: impl Into<String>) -> Self {
        self.attribute(AttributeMetadata::new(name, ValueKind::Composite))
    }

    /// Add a fully specified attribute.
    pub fn attribute(mut self, attribute: AttributeMetadata) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Set the groups of the most recently added attribute.
    pub fn groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let Some(last) = self.attributes.pop() {
            self.attributes.push(last.with_groups(groups));
        }
        self
    }

    /// Declare a zero-argument read accessor.
    pub fn accessor(mut self, name: impl Into<String>) -> Self {
        self.accessors.push(name.into());
        self
    }

    /// Declare `get_<attr>` (or `is_<attr>` for booleans) for every attribute
    /// that has no accessor yet.
    pub fn with_default_accessors(mut self) -> Self {
        self.default_accessors = true;
        self
    }

    /// Build the TypeDescriptor.
    pub fn build(self) -> TypeDescriptor {
        let mut accessors = self.accessors;
        if self.default_accessors {
            for attr in &self.attributes {
                let field = camel_to_snake(&attr.name);
                let prefix = match attr.kind {
                    ValueKind::Scalar(ScalarKind::Boolean) => "is",
                    _ => "get",
                };
                let getter = format!("get_{field}");
                let query = format!("is_{field}");
                if !accessors.contains(&getter) && !accessors.contains(&query) {
                    accessors.push(format!("{prefix}_{field}"));
                }
            }
        }

        TypeDescriptor {
            type_id: self.type_id,
            attributes: self.attributes,
            accessors,
        }
    }
}
