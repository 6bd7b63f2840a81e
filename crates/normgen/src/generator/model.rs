// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Render model handed to the normalizer template.

use crate::error::GenerationError;
use crate::naming::{camel_to_snake, GeneratedNames};
use crate::types::{TypeDescriptor, TypeIdentifier};
use serde::Serialize;

/// Attribute resolved against the type's accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDescriptor {
    pub name: String,
    pub groups: Vec<String>,
    pub accessor_name: String,
    pub is_scalar: bool,
}

/// Resolve every declared attribute of `descriptor` to its read accessor.
///
/// Declaration order is preserved. The first attribute without a `get_` or
/// `is_` accessor aborts resolution.
pub fn resolve_attributes(
    descriptor: &TypeDescriptor,
) -> Result<Vec<AttributeDescriptor>, GenerationError> {
    descriptor
        .attributes
        .iter()
        .map(|attribute| {
            let accessor = descriptor.accessor_for(&attribute.name).ok_or_else(|| {
                GenerationError::MissingAccessor {
                    type_id: descriptor.type_id.clone(),
                    attribute: attribute.name.clone(),
                }
            })?;
            Ok(AttributeDescriptor {
                name: attribute.name.clone(),
                groups: attribute.groups.clone(),
                accessor_name: accessor.to_string(),
                is_scalar: attribute.kind.is_scalar(),
            })
        })
        .collect()
}

/// One attribute as seen by the template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeModel {
    /// Output key (snake_case).
    pub name: String,
    pub method_name: String,
    pub groups: Vec<String>,
    pub scalar: bool,
    /// Rust string literals, escaped for direct interpolation.
    pub name_literal: String,
    pub method_literal: String,
    pub group_literals: Vec<String>,
}

impl AttributeModel {
    fn from_descriptor(attribute: &AttributeDescriptor) -> Self {
        let name = camel_to_snake(&attribute.name);
        Self {
            name_literal: format!("{:?}", name),
            method_literal: format!("{:?}", attribute.accessor_name),
            group_literals: attribute.groups.iter().map(|g| format!("{:?}", g)).collect(),
            name,
            method_name: attribute.accessor_name.clone(),
            groups: attribute.groups.clone(),
            scalar: attribute.is_scalar,
        }
    }
}

/// Everything the template needs to render one normalizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderModel {
    pub object_class_name: String,
    pub object_full_class_name: String,
    pub object_full_class_name_literal: String,
    pub normalizer_namespace: String,
    pub normalizer_class_name: String,
    pub normalizer_full_class_name: String,
    pub normalizer_full_class_name_literal: String,
    pub attributes: Vec<AttributeModel>,
}

impl RenderModel {
    pub fn new(
        type_id: &TypeIdentifier,
        names: &GeneratedNames,
        attributes: &[AttributeDescriptor],
    ) -> Self {
        Self {
            object_class_name: type_id.short_name().to_string(),
            object_full_class_name: type_id.to_string(),
            object_full_class_name_literal: format!("{:?}", type_id.as_str()),
            normalizer_namespace: names.namespace.clone(),
            normalizer_class_name: names.class_name.clone(),
            normalizer_full_class_name: names.full_name.clone(),
            normalizer_full_class_name_literal: format!("{:?}", names.full_name),
            attributes: attributes.iter().map(AttributeModel::from_descriptor).collect(),
        }
    }

    pub fn type_id(&self) -> TypeIdentifier {
        TypeIdentifier::new(&self.object_full_class_name)
    }
}
