// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Generic, metadata-driven normalizer.
//!
//! Used for every value a specialized normalizer does not handle: scalars,
//! collections, and objects of types without declared attributes. It looks
//! metadata and accessors up on every call.

use super::{Normalizer, NormalizerAware, NormalizerSlot};
use crate::context::NormalizationContext;
use crate::data::{Data, Object};
use crate::error::NormalizeError;
use crate::naming::camel_to_snake;
use crate::types::MetadataProvider;
use serde_json::{Map, Value};
use std::sync::{Arc, Weak};

/// Introspection-based fallback normalizer.
pub struct ObjectNormalizer {
    metadata: Arc<dyn MetadataProvider>,
    root: NormalizerSlot,
}

impl ObjectNormalizer {
    pub fn new(metadata: Arc<dyn MetadataProvider>) -> Self {
        Self {
            metadata,
            root: NormalizerSlot::new(),
        }
    }

    /// Nested values go through the owning normalizer when one is attached.
    fn normalize_nested(
        &self,
        data: &Data,
        format: Option<&str>,
        context: &NormalizationContext,
    ) -> Result<Value, NormalizeError> {
        match self.root.get() {
            Ok(root) => root.normalize(data, format, context),
            Err(_) => self.normalize(data, format, context),
        }
    }

    fn normalize_object(
        &self,
        object: &dyn Object,
        format: Option<&str>,
        context: &NormalizationContext,
    ) -> Result<Value, NormalizeError> {
        let type_id = object
            .real_type()
            .unwrap_or_else(|| object.type_identifier());
        let mut out = Map::new();

        let Some(descriptor) = self.metadata.metadata_for(&type_id) else {
            log::trace!("[fallback] {} has no metadata", type_id);
            return Ok(Value::Object(out));
        };

        if descriptor.is_empty() {
            // No declared attributes: every get_/is_ accessor is an attribute.
            for accessor in &descriptor.accessors {
                let Some(field) = accessor
                    .strip_prefix("get_")
                    .or_else(|| accessor.strip_prefix("is_"))
                else {
                    continue;
                };
                let value = object.call(accessor).unwrap_or(Data::Null);
                out.insert(
                    field.to_string(),
                    self.normalize_nested(&value, format, context)?,
                );
            }
            return Ok(Value::Object(out));
        }

        for attribute in &descriptor.attributes {
            if !context.allows(attribute.groups.as_slice()) {
                continue;
            }
            let value = descriptor
                .accessor_for(&attribute.name)
                .and_then(|accessor| object.call(accessor))
                .unwrap_or(Data::Null);
            out.insert(
                camel_to_snake(&attribute.name),
                self.normalize_nested(&value, format, context)?,
            );
        }

        Ok(Value::Object(out))
    }
}

impl Normalizer for ObjectNormalizer {
    fn normalize(
        &self,
        data: &Data,
        format: Option<&str>,
        context: &NormalizationContext,
    ) -> Result<Value, NormalizeError> {
        match data {
            Data::List(items) => Ok(Value::Array(
                items
                    .iter()
                    .map(|item| self.normalize_nested(item, format, context))
                    .collect::<Result<_, _>>()?,
            )),
            Data::Map(entries) => {
                let mut out = Map::new();
                for (key, value) in entries {
                    out.insert(key.clone(), self.normalize_nested(value, format, context)?);
                }
                Ok(Value::Object(out))
            }
            Data::Object(object) => self.normalize_object(object.as_ref(), format, context),
            scalar => scalar.to_scalar_value(),
        }
    }

    fn as_normalizer_aware(&self) -> Option<&dyn NormalizerAware> {
        Some(self)
    }
}

impl NormalizerAware for ObjectNormalizer {
    fn set_normalizer(&self, normalizer: Weak<dyn Normalizer>) {
        self.root.set(normalizer);
    }
}
