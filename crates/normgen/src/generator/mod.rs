// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Synthesis of specialized normalizers.
//!
//! [`CodeGenerator::generate`] turns the metadata of one type into a
//! normalizer:
//!
//! 1. fetch the type's metadata; no attributes means no normalizer
//! 2. resolve every attribute to its `get_`/`is_` accessor
//! 3. derive the generated names and the cache file path
//! 4. render the source through the [`TemplateRenderer`]
//! 5. write it atomically under `<cache>/serializer/generated-normalizers/`
//! 6. load it and instantiate it, checking the normalized type
//!
//! Steps 5 and 6 run under a per-type lock, so concurrent first requests
//! for the same type materialize it once.

mod loader;
mod materialize;
pub mod model;
mod template;

pub use loader::{CompiledNormalizer, PlannedNormalizer, TypeLoader};
pub use materialize::{ensure_writable_dir, write_atomic};
pub use model::{resolve_attributes, AttributeDescriptor, AttributeModel, RenderModel};
pub use template::{TemplateRenderer, TeraRenderer, NORMALIZER_TEMPLATE};

use crate::config::GeneratorConfig;
use crate::error::GenerationError;
use crate::naming::{cache_file_path, cache_subdir, GeneratedNames};
use crate::normalizer::SpecializedNormalizer;
use crate::types::{MetadataProvider, TypeIdentifier};
use dashmap::DashMap;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Produces specialized normalizers on demand.
pub trait NormalizerGenerator: Send + Sync {
    /// Normalizer for `type_id`, or `None` when the type declares no
    /// serializable attributes.
    fn generate(
        &self,
        type_id: &TypeIdentifier,
    ) -> Result<Option<Arc<dyn SpecializedNormalizer>>, GenerationError>;
}

/// Outcome of materializing one normalizer source.
#[derive(Debug, Clone)]
pub struct GeneratedSerializerRecord {
    pub type_id: TypeIdentifier,
    pub names: GeneratedNames,
    /// Cache file holding the rendered source.
    pub path: PathBuf,
    /// Model the source was rendered from.
    pub model: RenderModel,
}

/// Rendered, not yet materialized, normalizer source.
struct Rendered {
    names: GeneratedNames,
    path: PathBuf,
    model: RenderModel,
    source: String,
}

/// Template-driven [`NormalizerGenerator`] backed by a file cache.
pub struct CodeGenerator {
    renderer: Arc<dyn TemplateRenderer>,
    metadata: Arc<dyn MetadataProvider>,
    cache_dir: PathBuf,
    file_mode: u32,
    dir_mode: u32,
    loader: TypeLoader,
    locks: DashMap<TypeIdentifier, Arc<Mutex<()>>>,
}

impl CodeGenerator {
    pub fn new(
        renderer: Arc<dyn TemplateRenderer>,
        cache_dir: impl Into<PathBuf>,
        metadata: Arc<dyn MetadataProvider>,
    ) -> Self {
        let defaults = GeneratorConfig::default();
        Self {
            renderer,
            metadata,
            cache_dir: cache_dir.into(),
            file_mode: defaults.file_mode,
            dir_mode: defaults.dir_mode,
            loader: TypeLoader::new(),
            locks: DashMap::new(),
        }
    }

    /// Generator using the configured cache root, modes and template.
    pub fn from_config(
        config: &GeneratorConfig,
        metadata: Arc<dyn MetadataProvider>,
    ) -> Result<Self, GenerationError> {
        let renderer = TeraRenderer::from_config(config)?;
        let mut generator = Self::new(Arc::new(renderer), config.cache_dir.clone(), metadata);
        generator.file_mode = config.file_mode;
        generator.dir_mode = config.dir_mode;
        Ok(generator)
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Directory holding the generated sources.
    pub fn output_dir(&self) -> PathBuf {
        cache_subdir(&self.cache_dir)
    }

    /// Cache path of the normalizer for `type_id`. Pure.
    pub fn file_path(&self, type_id: &TypeIdentifier) -> PathBuf {
        cache_file_path(&self.cache_dir, type_id)
    }

    /// Generated names for `type_id`. Pure.
    pub fn names(&self, type_id: &TypeIdentifier) -> GeneratedNames {
        GeneratedNames::derive(type_id)
    }

    pub fn loader(&self) -> &TypeLoader {
        &self.loader
    }

    /// Render the normalizer source for `type_id` without touching the
    /// filesystem. `None` when the type declares no attributes.
    pub fn render_source(
        &self,
        type_id: &TypeIdentifier,
    ) -> Result<Option<String>, GenerationError> {
        Ok(self.render(type_id)?.map(|rendered| rendered.source))
    }

    /// Render and materialize the normalizer source for `type_id`, without
    /// loading it.
    pub fn write_source(
        &self,
        type_id: &TypeIdentifier,
    ) -> Result<Option<GeneratedSerializerRecord>, GenerationError> {
        let Some(rendered) = self.render(type_id)? else {
            return Ok(None);
        };
        let lock = self.lock_for(type_id);
        let _guard = lock.lock();
        self.materialize(type_id, rendered).map(Some)
    }

    fn render(&self, type_id: &TypeIdentifier) -> Result<Option<Rendered>, GenerationError> {
        let descriptor = match self.metadata.metadata_for(type_id) {
            Some(descriptor) if !descriptor.is_empty() => descriptor,
            _ => {
                log::debug!("[generator] {} has no serializable attributes", type_id);
                return Ok(None);
            }
        };

        let attributes = resolve_attributes(&descriptor)?;
        let names = self.names(type_id);
        let path = self.file_path(type_id);
        let model = RenderModel::new(type_id, &names, &attributes);
        let source = self.renderer.render(NORMALIZER_TEMPLATE, &model)?;

        Ok(Some(Rendered {
            names,
            path,
            model,
            source,
        }))
    }

    fn materialize(
        &self,
        type_id: &TypeIdentifier,
        rendered: Rendered,
    ) -> Result<GeneratedSerializerRecord, GenerationError> {
        let Rendered {
            names,
            path,
            model,
            source,
        } = rendered;

        let cached = std::fs::read_to_string(&path).is_ok_and(|existing| existing == source);
        if cached {
            log::debug!("[generator] {} reusing {}", type_id, path.display());
        } else {
            let dir = path.parent().map_or_else(|| self.output_dir(), Path::to_path_buf);
            ensure_writable_dir(&dir, self.dir_mode)?;
            write_atomic(&path, &source, self.file_mode)?;
            log::info!("[generator] {} -> {}", type_id, path.display());
        }

        Ok(GeneratedSerializerRecord {
            type_id: type_id.clone(),
            names,
            path,
            model,
        })
    }

    fn lock_for(&self, type_id: &TypeIdentifier) -> Arc<Mutex<()>> {
        Arc::clone(self.locks.entry(type_id.clone()).or_default().value())
    }
}

impl NormalizerGenerator for CodeGenerator {
    fn generate(
        &self,
        type_id: &TypeIdentifier,
    ) -> Result<Option<Arc<dyn SpecializedNormalizer>>, GenerationError> {
        let Some(rendered) = self.render(type_id)? else {
            return Ok(None);
        };

        let lock = self.lock_for(type_id);
        let _guard = lock.lock();

        let record = self.materialize(type_id, rendered)?;
        self.loader.load(&record)?;
        let normalizer = self.loader.instantiate(&record.names.full_name)?;

        let normalized = normalizer.normalized_type();
        if &normalized != type_id {
            return Err(GenerationError::ContractViolation {
                normalizer: record.names.full_name,
                reason: format!("normalizes \"{}\" instead of \"{}\"", normalized, type_id),
            });
        }

        Ok(Some(normalizer))
    }
}

impl std::fmt::Debug for CodeGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodeGenerator")
            .field("cache_dir", &self.cache_dir)
            .field("loaded", &self.loader.len())
            .finish_non_exhaustive()
    }
}
