// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # normgen - generated, cached normalizers
//!
//! Replaces generic, introspection-driven normalization with specialized
//! normalizers synthesized once per type. The first time an object of a type
//! is normalized, its metadata is turned into normalizer source, the source is
//! written to a deterministic cache path, loaded into the process and
//! memoized. Types without declared attributes keep using the generic path.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use normgen::prelude::*;
//! use std::sync::Arc;
//!
//! #[derive(Clone, Debug, normgen::Normalize)]
//! #[normalize(type_path = "app::Person")]
//! struct Person {
//!     name: String,
//!     age: u32,
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = Arc::new(TypeRegistry::new());
//! registry.register_type::<Person>()?;
//!
//! let generator = CodeGenerator::new(
//!     Arc::new(TeraRenderer::new()?),
//!     "var/cache",
//!     registry.clone(),
//! );
//! let normalizer = DispatchingNormalizer::new(
//!     Arc::new(ObjectNormalizer::new(registry)),
//!     Arc::new(generator),
//! );
//!
//! let person = Person { name: "Ann".into(), age: 36 };
//! let value = normalizer.normalize(&person.to_data(), None, &NormalizationContext::new())?;
//! assert_eq!(value["name"], "Ann");
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! caller -> DispatchingNormalizer --hit--> memoized SpecializedNormalizer
//!                 |
//!                 +--miss--> CodeGenerator -> MetadataProvider
//!                 |                 |-> TemplateRenderer (Tera)
//!                 |                 |-> cache dir (temp file + rename)
//!                 |                 `-> TypeLoader -> instance
//!                 `--none--> ObjectNormalizer (generic fallback)
//! ```
//!
//! ## Modules Overview
//!
//! - [`types`] - type identifiers, descriptors and the metadata registry
//! - [`data`] - input values and the [`Object`] capability
//! - [`generator`] - metadata to source synthesis, materialization, loading
//! - [`dispatch`] - memoizing dispatcher
//! - [`normalizer`] - normalizer traits and the generic fallback

extern crate self as normgen;

pub mod config;
pub mod context;
pub mod data;
pub mod dispatch;
pub mod error;
pub mod generator;
pub mod naming;
pub mod normalizer;
pub mod prelude;
pub mod types;

pub use config::{ConfigError, GeneratorConfig};
pub use context::NormalizationContext;
pub use data::{Data, Object, ToData};
pub use dispatch::{DispatchStats, DispatchingNormalizer, Resolution};
pub use error::{GenerationError, MetadataError, NormalizeError};
pub use generator::{
    CodeGenerator, CompiledNormalizer, GeneratedSerializerRecord, NormalizerGenerator,
    TemplateRenderer, TeraRenderer,
};
pub use naming::GeneratedNames;
pub use normalizer::{
    NormalizerAware, NormalizerSlot, Normalizer, ObjectNormalizer, SpecializedNormalizer,
};
pub use types::{
    AttributeMetadata, Describe, MetadataProvider, ScalarKind, TypeDescriptor,
    TypeDescriptorBuilder, TypeIdentifier, TypeManifest, TypeRegistry, ValueKind,
};

#[cfg(feature = "derive")]
pub use normgen_codegen::Normalize;

// Rendered normalizer sources submit themselves through this re-export.
pub use inventory;
pub use serde_json::{Map, Value};
