// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Template rendering of normalizer sources.

use super::model::RenderModel;
use crate::config::GeneratorConfig;
use crate::error::GenerationError;
use std::path::Path;
use tera::{Context, Tera};

/// Name of the normalizer template.
pub const NORMALIZER_TEMPLATE: &str = "normalizer.rs.tera";

const BUILTIN_TEMPLATE: &str = include_str!("../../templates/normalizer.rs.tera");

/// Renders a named template with a [`RenderModel`].
///
/// Must be deterministic: the same model always yields the same text.
pub trait TemplateRenderer: Send + Sync {
    fn render(&self, template: &str, model: &RenderModel) -> Result<String, GenerationError>;
}

/// Tera-backed renderer.
pub struct TeraRenderer {
    tera: Tera,
}

impl TeraRenderer {
    /// Renderer with the built-in normalizer template.
    pub fn new() -> Result<Self, GenerationError> {
        Self::with_template(BUILTIN_TEMPLATE)
    }

    /// Renderer whose normalizer template is `content`.
    pub fn with_template(content: &str) -> Result<Self, GenerationError> {
        let mut tera = Tera::default();
        // Output is Rust source, not HTML.
        tera.autoescape_on(vec![]);
        tera.add_raw_template(NORMALIZER_TEMPLATE, content)
            .map_err(|e| render_error(NORMALIZER_TEMPLATE, &e))?;
        Ok(Self { tera })
    }

    /// Renderer whose normalizer template is read from `path`.
    pub fn from_file(path: &Path) -> Result<Self, GenerationError> {
        let content = std::fs::read_to_string(path).map_err(|source| GenerationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("[template] loaded {}", path.display());
        Self::with_template(&content)
    }

    /// Built-in template, or the override named by the configuration.
    pub fn from_config(config: &GeneratorConfig) -> Result<Self, GenerationError> {
        match &config.template {
            Some(path) => Self::from_file(path),
            None => Self::new(),
        }
    }
}

impl TemplateRenderer for TeraRenderer {
    fn render(&self, template: &str, model: &RenderModel) -> Result<String, GenerationError> {
        let context = Context::from_serialize(model).map_err(|e| render_error(template, &e))?;
        self.tera
            .render(template, &context)
            .map_err(|e| render_error(template, &e))
    }
}

/// Tera nests the useful message in the source chain.
fn render_error(template: &str, err: &tera::Error) -> GenerationError {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    GenerationError::Render {
        template: template.to_string(),
        message,
    }
}
