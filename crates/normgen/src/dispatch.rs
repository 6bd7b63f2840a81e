// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Memoizing dispatcher.
//!
//! [`DispatchingNormalizer`] is the public entry point. Objects are routed to
//! the specialized normalizer of their type, synthesized on the first request
//! and memoized for the lifetime of the dispatcher. Everything else, and
//! objects of types without declared attributes, goes to the generic
//! fallback.
//!
//! The memo table is never evicted: it grows with the number of distinct
//! types normalized.

use crate::context::NormalizationContext;
use crate::data::{Data, Object};
use crate::error::{GenerationError, NormalizeError};
use crate::generator::NormalizerGenerator;
use crate::normalizer::{Normalizer, SpecializedNormalizer};
use crate::types::TypeIdentifier;
use dashmap::DashMap;
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

/// Memoized outcome of resolving one type.
#[derive(Clone)]
pub enum Resolution {
    /// Normalize through this specialized normalizer.
    Specialized(Arc<dyn SpecializedNormalizer>),
    /// The type has no declared attributes; use the fallback.
    Generic,
}

impl Resolution {
    pub fn is_specialized(&self) -> bool {
        matches!(self, Self::Specialized(_))
    }
}

impl std::fmt::Debug for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Specialized(normalizer) => f
                .debug_tuple("Specialized")
                .field(&normalizer.normalized_type())
                .finish(),
            Self::Generic => f.write_str("Generic"),
        }
    }
}

/// Dispatch counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    /// Resolutions served from the memo table.
    pub hits: u64,
    /// Resolutions that consulted the generator.
    pub misses: u64,
    /// Memoized types with a specialized normalizer.
    pub specialized: usize,
    /// Memoized types using the fallback.
    pub generic: usize,
}

/// Normalizer front-end memoizing one resolution per type.
pub struct DispatchingNormalizer {
    fallback: Arc<dyn Normalizer>,
    generator: Arc<dyn NormalizerGenerator>,
    memo: DashMap<TypeIdentifier, Resolution>,
    pending: DashMap<TypeIdentifier, Arc<Mutex<()>>>,
    this: Weak<dyn Normalizer>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl DispatchingNormalizer {
    /// Build a dispatcher over `fallback` and `generator`.
    ///
    /// The fallback receives a back-reference to the dispatcher when it is
    /// [`NormalizerAware`](crate::NormalizerAware), as does every specialized
    /// normalizer once synthesized.
    pub fn new(
        fallback: Arc<dyn Normalizer>,
        generator: Arc<dyn NormalizerGenerator>,
    ) -> Arc<Self> {
        Arc::new_cyclic(|weak: &Weak<Self>| {
            let this: Weak<dyn Normalizer> = weak.clone();
            if let Some(aware) = fallback.as_normalizer_aware() {
                aware.set_normalizer(this.clone());
            }
            Self {
                fallback,
                generator,
                memo: DashMap::new(),
                pending: DashMap::new(),
                this,
                hits: AtomicU64::new(0),
                misses: AtomicU64::new(0),
            }
        })
    }

    /// Resolve `type_id`, synthesizing its normalizer on the first request.
    ///
    /// Concurrent first requests for one type consult the generator once.
    /// Failures are returned to the caller and not memoized.
    pub fn resolve(&self, type_id: &TypeIdentifier) -> Result<Resolution, GenerationError> {
        if let Some(resolution) = self.memoized(type_id) {
            return Ok(resolution);
        }

        let lock = Arc::clone(self.pending.entry(type_id.clone()).or_default().value());
        let _guard = lock.lock();
        if let Some(resolution) = self.memoized(type_id) {
            return Ok(resolution);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let resolution = match self.generator.generate(type_id)? {
            Some(normalizer) => {
                if let Some(aware) = normalizer.as_normalizer_aware() {
                    aware.set_normalizer(self.this.clone());
                }
                log::debug!("[dispatch] {} -> specialized", type_id);
                Resolution::Specialized(normalizer)
            }
            None => {
                log::debug!("[dispatch] {} -> generic", type_id);
                Resolution::Generic
            }
        };

        self.memo.insert(type_id.clone(), resolution.clone());
        self.pending.remove(type_id);
        Ok(resolution)
    }

    fn memoized(&self, type_id: &TypeIdentifier) -> Option<Resolution> {
        let resolution = self.memo.get(type_id).map(|entry| entry.value().clone())?;
        self.hits.fetch_add(1, Ordering::Relaxed);
        log::trace!("[dispatch] {} memoized", type_id);
        Some(resolution)
    }

    /// Memoized types, sorted.
    pub fn resolved_types(&self) -> Vec<TypeIdentifier> {
        let mut types: Vec<_> = self.memo.iter().map(|entry| entry.key().clone()).collect();
        types.sort();
        types
    }

    pub fn stats(&self) -> DispatchStats {
        let specialized = self
            .memo
            .iter()
            .filter(|entry| entry.value().is_specialized())
            .count();
        DispatchStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            specialized,
            generic: self.memo.len() - specialized,
        }
    }
}

/// Type used for dispatch: the real type behind a lazy-loading placeholder,
/// the declared type otherwise.
fn effective_type(object: &dyn Object) -> TypeIdentifier {
    object
        .real_type()
        .unwrap_or_else(|| object.type_identifier())
}

impl Normalizer for DispatchingNormalizer {
    fn normalize(
        &self,
        data: &Data,
        format: Option<&str>,
        context: &NormalizationContext,
    ) -> Result<Value, NormalizeError> {
        let Data::Object(object) = data else {
            return self.fallback.normalize(data, format, context);
        };

        match self.resolve(&effective_type(object.as_ref()))? {
            Resolution::Specialized(normalizer) => {
                normalizer.normalize(object.as_ref(), format, context)
            }
            Resolution::Generic => self.fallback.normalize(data, format, context),
        }
    }
}

impl std::fmt::Debug for DispatchingNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatchingNormalizer")
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}
