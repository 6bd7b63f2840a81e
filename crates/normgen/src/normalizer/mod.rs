// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Normalizer capabilities.
//!
//! - [`Normalizer`]: generic entry point, any [`Data`] in, JSON tree out.
//! - [`SpecializedNormalizer`]: generated, handles objects of exactly one type.
//! - [`NormalizerAware`]: accepts a back-reference to the owning normalizer,
//!   used to normalize nested values through the full dispatch path.

mod object;

pub use object::ObjectNormalizer;

use crate::context::NormalizationContext;
use crate::data::{Data, Object};
use crate::error::NormalizeError;
use crate::types::TypeIdentifier;
use parking_lot::RwLock;
use serde_json::Value;
use std::sync::{Arc, Weak};

/// Generic normalization entry point.
pub trait Normalizer: Send + Sync {
    fn normalize(
        &self,
        data: &Data,
        format: Option<&str>,
        context: &NormalizationContext,
    ) -> Result<Value, NormalizeError>;

    fn as_normalizer_aware(&self) -> Option<&dyn NormalizerAware> {
        None
    }
}

/// Accepts a back-reference to the normalizer that owns it.
pub trait NormalizerAware {
    fn set_normalizer(&self, normalizer: Weak<dyn Normalizer>);
}

/// Normalizer specialized for one type.
pub trait SpecializedNormalizer: Send + Sync {
    /// Type this normalizer was generated for.
    fn normalized_type(&self) -> TypeIdentifier;

    fn normalize(
        &self,
        object: &dyn Object,
        format: Option<&str>,
        context: &NormalizationContext,
    ) -> Result<Value, NormalizeError>;

    fn as_normalizer_aware(&self) -> Option<&dyn NormalizerAware> {
        None
    }
}

/// Holder for an injected back-reference.
///
/// Keeps a `Weak` so the owner and its memoized normalizers do not form a
/// reference cycle.
#[derive(Default)]
pub struct NormalizerSlot {
    inner: RwLock<Option<Weak<dyn Normalizer>>>,
}

impl NormalizerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, normalizer: Weak<dyn Normalizer>) {
        *self.inner.write() = Some(normalizer);
    }

    pub fn is_set(&self) -> bool {
        self.inner.read().is_some()
    }

    /// Upgrade the back-reference.
    pub fn get(&self) -> Result<Arc<dyn Normalizer>, NormalizeError> {
        self.inner
            .read()
            .as_ref()
            .and_then(Weak::upgrade)
            .ok_or(NormalizeError::NormalizerUnavailable)
    }
}

impl std::fmt::Debug for NormalizerSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NormalizerSlot")
            .field("attached", &self.get().is_ok())
            .finish()
    }
}

/// Read an attribute through its accessor.
pub fn call_accessor(object: &dyn Object, accessor: &str) -> Result<Data, NormalizeError> {
    object
        .call(accessor)
        .ok_or_else(|| NormalizeError::AccessorFailed {
            type_id: object.type_identifier(),
            accessor: accessor.to_string(),
        })
}
