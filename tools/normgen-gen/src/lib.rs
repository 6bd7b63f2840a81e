// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! normgen-gen library: the operations behind the CLI.
//!
//! Pre-rendering fills the normalizer cache ahead of the first request, so a
//! deployment can ship warm sources or inspect what will be generated.

use anyhow::{Context, Result};
use normgen::generator::CodeGenerator;
use normgen::naming::{cache_file_path, cache_subdir};
use normgen::{GeneratorConfig, TypeIdentifier, TypeManifest};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Outcome for one manifest type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RenderOutcome {
    Written {
        #[serde(rename = "type")]
        type_id: String,
        normalizer: String,
        path: PathBuf,
    },
    /// The type declares no attributes and keeps using the generic path.
    Skipped {
        #[serde(rename = "type")]
        type_id: String,
    },
}

/// Result of pre-rendering a manifest.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RenderReport {
    pub outcomes: Vec<RenderOutcome>,
}

impl RenderReport {
    pub fn written(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, RenderOutcome::Written { .. }))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes.len() - self.written()
    }
}

/// Render and write the normalizer source of every type in `manifest`.
///
/// Stops at the first type that cannot be generated.
pub fn render_manifest(manifest: &Path, config: &GeneratorConfig) -> Result<RenderReport> {
    let manifest = TypeManifest::from_file(manifest)
        .with_context(|| format!("Failed to load manifest {}", manifest.display()))?;
    let type_ids: Vec<TypeIdentifier> = manifest.types.iter().map(|t| t.type_id.clone()).collect();
    let registry = Arc::new(
        manifest
            .into_registry()
            .context("Invalid type metadata in manifest")?,
    );

    let generator = CodeGenerator::from_config(config, registry)
        .context("Failed to set up the normalizer generator")?;

    let mut report = RenderReport::default();
    for type_id in type_ids {
        let outcome = match generator
            .write_source(&type_id)
            .with_context(|| format!("Failed to generate normalizer for {}", type_id))?
        {
            Some(record) => {
                tracing::info!("{} -> {}", type_id, record.path.display());
                RenderOutcome::Written {
                    type_id: type_id.to_string(),
                    normalizer: record.names.full_name,
                    path: record.path,
                }
            }
            None => {
                tracing::info!("{} has no serializable attributes, skipped", type_id);
                RenderOutcome::Skipped {
                    type_id: type_id.to_string(),
                }
            }
        };
        report.outcomes.push(outcome);
    }
    Ok(report)
}

/// Cache path of the normalizer for `type_name`.
pub fn normalizer_path(cache_dir: &Path, type_name: &str) -> PathBuf {
    cache_file_path(cache_dir, &TypeIdentifier::new(type_name))
}

/// Remove every generated source under `cache_dir`. Returns whether there
/// was anything to remove.
pub fn clear_cache(cache_dir: &Path) -> Result<bool> {
    let dir = cache_subdir(cache_dir);
    if !dir.exists() {
        return Ok(false);
    }
    std::fs::remove_dir_all(&dir)
        .with_context(|| format!("Failed to remove {}", dir.display()))?;
    tracing::info!("Removed {}", dir.display());
    Ok(true)
}
