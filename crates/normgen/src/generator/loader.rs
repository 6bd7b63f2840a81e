// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Loading of generated normalizers into the running process.
//!
//! A materialized source becomes usable in one of two ways:
//!
//! - its compiled form was linked into the binary (the rendered source
//!   submits a [`CompiledNormalizer`] through `inventory`), or
//! - the loader plans a normalizer from the same render model the source was
//!   rendered from.
//!
//! Both honor the same contract. Each generator owns its loader, so the
//! namespace of loaded normalizers is per generator and loading a name twice
//! is a no-op.

use super::model::{AttributeModel, RenderModel};
use super::GeneratedSerializerRecord;
use crate::context::NormalizationContext;
use crate::data::Object;
use crate::error::{GenerationError, NormalizeError};
use crate::normalizer::{
    call_accessor, Normalizer, NormalizerAware, NormalizerSlot, SpecializedNormalizer,
};
use crate::types::TypeIdentifier;
use parking_lot::RwLock;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::{Arc, Weak};

/// A generated normalizer compiled into the binary.
pub struct CompiledNormalizer {
    name: &'static str,
    factory: fn() -> Box<dyn SpecializedNormalizer>,
}

inventory::collect!(CompiledNormalizer);

impl CompiledNormalizer {
    /// `name` is the fully-qualified generated normalizer name.
    pub const fn new(name: &'static str, factory: fn() -> Box<dyn SpecializedNormalizer>) -> Self {
        Self { name, factory }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn instantiate(&self) -> Box<dyn SpecializedNormalizer> {
        (self.factory)()
    }

    /// Look a compiled normalizer up by its generated name.
    pub fn find(name: &str) -> Option<&'static CompiledNormalizer> {
        inventory::iter::<CompiledNormalizer>
            .into_iter()
            .find(|compiled| compiled.name == name)
    }
}

impl std::fmt::Debug for CompiledNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledNormalizer")
            .field("name", &self.name)
            .finish()
    }
}

/// Normalizer executing the plan a render model describes.
#[derive(Debug)]
pub struct PlannedNormalizer {
    type_id: TypeIdentifier,
    attributes: Arc<[AttributeModel]>,
    normalizer: NormalizerSlot,
}

impl PlannedNormalizer {
    pub fn new(model: &RenderModel) -> Self {
        Self {
            type_id: model.type_id(),
            attributes: model.attributes.clone().into(),
            normalizer: NormalizerSlot::new(),
        }
    }

    fn shared(type_id: TypeIdentifier, attributes: Arc<[AttributeModel]>) -> Self {
        Self {
            type_id,
            attributes,
            normalizer: NormalizerSlot::new(),
        }
    }
}

impl NormalizerAware for PlannedNormalizer {
    fn set_normalizer(&self, normalizer: Weak<dyn Normalizer>) {
        self.normalizer.set(normalizer);
    }
}

impl SpecializedNormalizer for PlannedNormalizer {
    fn normalized_type(&self) -> TypeIdentifier {
        self.type_id.clone()
    }

    fn normalize(
        &self,
        object: &dyn Object,
        format: Option<&str>,
        context: &NormalizationContext,
    ) -> Result<Value, NormalizeError> {
        let mut data = Map::new();
        for attribute in self.attributes.iter() {
            if !context.allows(attribute.groups.as_slice()) {
                continue;
            }
            let value = call_accessor(object, &attribute.method_name)?;
            let value = if attribute.scalar {
                value.to_scalar_value()?
            } else {
                self.normalizer.get()?.normalize(&value, format, context)?
            };
            data.insert(attribute.name.clone(), value);
        }
        Ok(Value::Object(data))
    }

    fn as_normalizer_aware(&self) -> Option<&dyn NormalizerAware> {
        Some(self)
    }
}

enum LoadedType {
    Compiled(&'static CompiledNormalizer),
    Planned {
        type_id: TypeIdentifier,
        attributes: Arc<[AttributeModel]>,
        declares_contract: bool,
    },
}

/// Process-wide namespace of loaded normalizer types.
#[derive(Default)]
pub struct TypeLoader {
    loaded: RwLock<HashMap<String, LoadedType>>,
}

impl TypeLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the normalizer described by `record` available.
    ///
    /// Loading a name that is already loaded does nothing.
    pub fn load(&self, record: &GeneratedSerializerRecord) -> Result<(), GenerationError> {
        let full_name = &record.names.full_name;
        if self.loaded.read().contains_key(full_name) {
            log::trace!("[loader] {} already loaded", full_name);
            return Ok(());
        }

        let source = std::fs::read_to_string(&record.path).map_err(|source| {
            GenerationError::Io {
                path: record.path.clone(),
                source,
            }
        })?;

        let entry = match CompiledNormalizer::find(full_name) {
            Some(compiled) => {
                log::debug!("[loader] {} linked in", full_name);
                LoadedType::Compiled(compiled)
            }
            None => {
                log::debug!("[loader] {} planned from {}", full_name, record.path.display());
                let declaration = format!("impl SpecializedNormalizer for {}", record.names.class_name);
                LoadedType::Planned {
                    type_id: record.model.type_id(),
                    attributes: record.model.attributes.clone().into(),
                    declares_contract: source.contains(&declaration),
                }
            }
        };

        self.loaded
            .write()
            .entry(full_name.clone())
            .or_insert(entry);
        Ok(())
    }

    /// Create an instance of a loaded normalizer.
    pub fn instantiate(
        &self,
        full_name: &str,
    ) -> Result<Arc<dyn SpecializedNormalizer>, GenerationError> {
        let loaded = self.loaded.read();
        match loaded.get(full_name) {
            Some(LoadedType::Compiled(compiled)) => Ok(Arc::from(compiled.instantiate())),
            Some(LoadedType::Planned {
                type_id,
                attributes,
                declares_contract: true,
            }) => Ok(Arc::new(PlannedNormalizer::shared(
                type_id.clone(),
                Arc::clone(attributes),
            ))),
            Some(LoadedType::Planned { .. }) => Err(GenerationError::ContractViolation {
                normalizer: full_name.to_string(),
                reason: "generated source does not implement SpecializedNormalizer".into(),
            }),
            None => Err(GenerationError::ContractViolation {
                normalizer: full_name.to_string(),
                reason: "normalizer was never loaded".into(),
            }),
        }
    }

    pub fn is_loaded(&self, full_name: &str) -> bool {
        self.loaded.read().contains_key(full_name)
    }

    pub fn len(&self) -> usize {
        self.loaded.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaded.read().is_empty()
    }
}
