// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Convenient re-exports.
//!
//! Rendered normalizer sources rely on this module only.
//!
//! ```rust
//! use normgen::prelude::*;
//! ```

pub use crate::context::NormalizationContext;
pub use crate::data::{Data, Object, ToData};
pub use crate::dispatch::{DispatchingNormalizer, Resolution};
pub use crate::error::{GenerationError, NormalizeError};
pub use crate::generator::{
    CodeGenerator, CompiledNormalizer, NormalizerGenerator, TemplateRenderer, TeraRenderer,
};
pub use crate::normalizer::{
    call_accessor, Normalizer, NormalizerAware, NormalizerSlot, ObjectNormalizer,
    SpecializedNormalizer,
};
pub use crate::types::{Describe, MetadataProvider, TypeIdentifier, TypeRegistry};
pub use serde_json::{Map, Value};

#[cfg(feature = "derive")]
pub use normgen_codegen::Normalize;
