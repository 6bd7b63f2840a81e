// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Names and cache paths of generated normalizers.
//!
//! Every derivation here is a pure function of the [`TypeIdentifier`], so the
//! same type always maps to the same generated name and the same file.

use crate::types::TypeIdentifier;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Token interposed in generated names so they never collide with hand-written types.
pub const MARKER: &str = "__CG__";

/// Top-level namespace of every generated normalizer.
pub const GENERATED_ROOT: &str = "generated_normalizer";

pub const NORMALIZER_SUFFIX: &str = "Normalizer";

/// Cache subtree holding generated sources, relative to the cache root.
pub const CACHE_SUBDIR: &str = "serializer/generated-normalizers";

pub const SOURCE_EXTENSION: &str = "rs";

/// Convert a camelCase name to snake_case (`firstName` -> `first_name`).
pub fn camel_to_snake(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (idx, ch) in name.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if idx > 0 {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Identifiers of the normalizer generated for one type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedNames {
    /// `generated_normalizer::__CG__[::<original namespace>]`
    pub namespace: String,
    /// `<short name>Normalizer`
    pub class_name: String,
    /// `namespace::class_name`
    pub full_name: String,
    /// Cache file name, e.g. `__CG__appmodelPersonNormalizer.rs`.
    pub file_name: String,
}

impl GeneratedNames {
    pub fn derive(type_id: &TypeIdentifier) -> Self {
        let namespace = match type_id.namespace() {
            Some(ns) => format!("{GENERATED_ROOT}::{MARKER}::{ns}"),
            None => format!("{GENERATED_ROOT}::{MARKER}"),
        };
        let class_name = format!(
            "{}{NORMALIZER_SUFFIX}",
            identifier_chars(type_id.short_name().chars())
        );
        let full_name = format!("{namespace}::{class_name}");

        let flattened = identifier_chars(type_id.segments().flat_map(str::chars));
        let file_name = format!("{MARKER}{flattened}{NORMALIZER_SUFFIX}.{SOURCE_EXTENSION}");

        Self {
            namespace,
            class_name,
            full_name,
            file_name,
        }
    }
}

fn identifier_chars(chars: impl Iterator<Item = char>) -> String {
    chars
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Directory holding generated sources under `cache_dir`.
pub fn cache_subdir(cache_dir: &Path) -> PathBuf {
    CACHE_SUBDIR
        .split('/')
        .fold(cache_dir.to_path_buf(), |path, part| path.join(part))
}

/// Canonical cache path of the normalizer source for `type_id`.
pub fn cache_file_path(cache_dir: &Path, type_id: &TypeIdentifier) -> PathBuf {
    cache_subdir(cache_dir).join(GeneratedNames::derive(type_id).file_name)
}
