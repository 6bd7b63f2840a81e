// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type metadata providers.

use crate::error::MetadataError;
use crate::types::{TypeDescriptor, TypeIdentifier};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Source of declared attribute metadata.
///
/// Must be deterministic and side-effect free for a given type within one
/// process lifetime. `None` means the type is unknown, which the generator
/// treats like a type without attributes.
pub trait MetadataProvider: Send + Sync {
    fn metadata_for(&self, type_id: &TypeIdentifier) -> Option<Arc<TypeDescriptor>>;
}

impl<P: MetadataProvider + ?Sized> MetadataProvider for Arc<P> {
    fn metadata_for(&self, type_id: &TypeIdentifier) -> Option<Arc<TypeDescriptor>> {
        (**self).metadata_for(type_id)
    }
}

/// Types that describe their own metadata (see `#[derive(Normalize)]`).
pub trait Describe {
    fn type_descriptor() -> TypeDescriptor;
}

/// In-memory metadata registry keyed by type identifier.
#[derive(Default)]
pub struct TypeRegistry {
    types: RwLock<HashMap<TypeIdentifier, Arc<TypeDescriptor>>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a descriptor.
    pub fn register(&self, descriptor: TypeDescriptor) -> Result<(), MetadataError> {
        if let Some(attribute) = descriptor.duplicate_attribute() {
            return Err(MetadataError::DuplicateAttribute {
                type_id: descriptor.type_id.clone(),
                attribute: attribute.to_string(),
            });
        }

        log::debug!(
            "[registry] {} ({} attributes)",
            descriptor.type_id,
            descriptor.attributes.len()
        );
        self.types
            .write()
            .insert(descriptor.type_id.clone(), Arc::new(descriptor));
        Ok(())
    }

    /// Register a type through its [`Describe`] impl.
    pub fn register_type<T: Describe>(&self) -> Result<(), MetadataError> {
        self.register(T::type_descriptor())
    }

    pub fn contains(&self, type_id: &TypeIdentifier) -> bool {
        self.types.read().contains_key(type_id)
    }

    pub fn len(&self) -> usize {
        self.types.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.read().is_empty()
    }
}

impl MetadataProvider for TypeRegistry {
    fn metadata_for(&self, type_id: &TypeIdentifier) -> Option<Arc<TypeDescriptor>> {
        self.types.read().get(type_id).cloned()
    }
}
