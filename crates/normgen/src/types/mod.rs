// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type metadata: identifiers, declared attributes and the providers that
//! hand them to the generator.

mod builder;
mod descriptor;
mod identifier;
pub mod manifest;
mod registry;

pub use builder::TypeDescriptorBuilder;
pub use descriptor::{AttributeMetadata, ScalarKind, TypeDescriptor, ValueKind};
pub use identifier::TypeIdentifier;
pub use manifest::TypeManifest;
pub use registry::{Describe, MetadataProvider, TypeRegistry};
