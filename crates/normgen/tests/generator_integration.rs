// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::uninlined_format_args)] // Test code readability over pedantic
#![allow(clippy::missing_panics_doc)] // Tests panic on failure

//! Generator integration tests: cache layout, determinism, failure modes and
//! normalizers compiled into the binary.

use normgen::generator::RenderModel;
use normgen::prelude::*;
use normgen::{GeneratorConfig, ScalarKind, TypeDescriptorBuilder};
use serde_json::json;
use std::any::Any;
use std::fs;
use std::sync::{Arc, Weak};

#[derive(Debug)]
struct Widget {
    id: i64,
    label: &'static str,
}

impl Object for Widget {
    fn type_identifier(&self) -> TypeIdentifier {
        TypeIdentifier::new("compiled::Widget")
    }

    fn call(&self, accessor: &str) -> Option<Data> {
        match accessor {
            "get_id" => Some(Data::Int(self.id)),
            "get_label" => Some(Data::from(self.label)),
            _ => None,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Hand-compiled normalizer standing in for a rendered source linked into
/// the binary. Tags its output so tests can tell it apart.
#[derive(Debug, Default)]
struct WidgetNormalizer {
    normalizer: NormalizerSlot,
}

impl NormalizerAware for WidgetNormalizer {
    fn set_normalizer(&self, normalizer: Weak<dyn Normalizer>) {
        self.normalizer.set(normalizer);
    }
}

impl SpecializedNormalizer for WidgetNormalizer {
    fn normalized_type(&self) -> TypeIdentifier {
        TypeIdentifier::new("compiled::Widget")
    }

    fn normalize(
        &self,
        object: &dyn Object,
        _format: Option<&str>,
        _context: &NormalizationContext,
    ) -> Result<Value, NormalizeError> {
        let mut data = Map::new();
        data.insert("id".into(), call_accessor(object, "get_id")?.to_scalar_value()?);
        data.insert("compiled".into(), Value::Bool(true));
        Ok(Value::Object(data))
    }

    fn as_normalizer_aware(&self) -> Option<&dyn NormalizerAware> {
        Some(self)
    }
}

fn new_widget_normalizer() -> Box<dyn SpecializedNormalizer> {
    Box::new(WidgetNormalizer::default())
}

normgen::inventory::submit! {
    CompiledNormalizer::new(
        "generated_normalizer::__CG__::compiled::WidgetNormalizer",
        new_widget_normalizer
    )
}

/// Registered under the name generated for `compiled::Gizmo` but normalizes
/// another type.
fn new_mislabelled_normalizer() -> Box<dyn SpecializedNormalizer> {
    Box::new(WidgetNormalizer::default())
}

normgen::inventory::submit! {
    CompiledNormalizer::new(
        "generated_normalizer::__CG__::compiled::GizmoNormalizer",
        new_mislabelled_normalizer
    )
}

fn registry() -> Arc<TypeRegistry> {
    let registry = Arc::new(TypeRegistry::new());
    for type_name in ["compiled::Widget", "compiled::Gizmo", "plain::Widget"] {
        registry
            .register(
                TypeDescriptorBuilder::new(type_name)
                    .scalar("id", ScalarKind::Integer)
                    .string("label")
                    .with_default_accessors()
                    .build(),
            )
            .unwrap();
    }
    registry
}

fn generator(cache: &std::path::Path) -> CodeGenerator {
    CodeGenerator::new(Arc::new(TeraRenderer::new().unwrap()), cache, registry())
}

#[test]
fn test_compiled_normalizer_preferred() {
    let cache = tempfile::tempdir().unwrap();
    let generator = Arc::new(generator(cache.path()));
    let dispatcher = DispatchingNormalizer::new(
        Arc::new(ObjectNormalizer::new(registry())),
        generator.clone(),
    );

    let widget = Data::from(Arc::new(Widget { id: 9, label: "knob" }));
    let value = dispatcher
        .normalize(&widget, None, &NormalizationContext::new())
        .unwrap();
    assert_eq!(value, json!({"id": 9, "compiled": true}));

    // The source is still materialized at its canonical path.
    let source = fs::read_to_string(generator.file_path(&TypeIdentifier::new("compiled::Widget")))
        .unwrap();
    assert!(source.contains("pub struct WidgetNormalizer"));
}

#[test]
fn test_compiled_normalizer_for_wrong_type() {
    let cache = tempfile::tempdir().unwrap();
    let generator = generator(cache.path());

    match generator.generate(&TypeIdentifier::new("compiled::Gizmo")) {
        Err(GenerationError::ContractViolation { normalizer, reason }) => {
            assert_eq!(normalizer, "generated_normalizer::__CG__::compiled::GizmoNormalizer");
            assert!(reason.contains("compiled::Widget"));
        }
        Ok(_) => panic!("expected ContractViolation, got a normalizer"),
        Err(other) => panic!("expected ContractViolation, got {:?}", other),
    }
}

#[test]
fn test_planned_normalizer_without_compiled_form() {
    let cache = tempfile::tempdir().unwrap();
    let generator = generator(cache.path());

    let normalizer = generator
        .generate(&TypeIdentifier::new("plain::Widget"))
        .unwrap()
        .unwrap();
    let value = normalizer
        .normalize(
            &Widget { id: 3, label: "dial" },
            None,
            &NormalizationContext::new(),
        )
        .unwrap();
    assert_eq!(value, json!({"id": 3, "label": "dial"}));
}

#[test]
fn test_path_and_content_stable_across_generators() {
    let cache = tempfile::tempdir().unwrap();
    let type_id = TypeIdentifier::new("plain::Widget");

    let first = generator(cache.path()).write_source(&type_id).unwrap().unwrap();
    let content = fs::read_to_string(&first.path).unwrap();

    // A fresh generator over the same cache stands in for a restart.
    let restarted = generator(cache.path());
    let second = restarted.write_source(&type_id).unwrap().unwrap();
    assert_eq!(first.path, second.path);
    assert_eq!(first.names, second.names);
    assert_eq!(fs::read_to_string(&second.path).unwrap(), content);
    assert_eq!(
        first.path,
        cache
            .path()
            .join("serializer")
            .join("generated-normalizers")
            .join("__CG__plainWidgetNormalizer.rs")
    );
}

#[test]
fn test_missing_accessor_through_dispatch() {
    let cache = tempfile::tempdir().unwrap();
    let registry = Arc::new(TypeRegistry::new());
    registry
        .register(
            TypeDescriptorBuilder::new("app::Person")
                .string("name")
                .scalar("age", ScalarKind::Integer)
                .accessor("get_name")
                .accessor("age")
                .build(),
        )
        .unwrap();
    let generator = Arc::new(CodeGenerator::new(
        Arc::new(TeraRenderer::new().unwrap()),
        cache.path(),
        registry.clone(),
    ));
    let dispatcher = DispatchingNormalizer::new(Arc::new(ObjectNormalizer::new(registry)), generator);

    #[derive(Debug)]
    struct Person;

    impl Object for Person {
        fn type_identifier(&self) -> TypeIdentifier {
            TypeIdentifier::new("app::Person")
        }

        fn call(&self, _accessor: &str) -> Option<Data> {
            None
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    let err = dispatcher
        .normalize(&Data::from(Arc::new(Person)), None, &NormalizationContext::new())
        .unwrap_err();
    match err {
        NormalizeError::Generation(GenerationError::MissingAccessor { type_id, attribute }) => {
            assert_eq!(type_id.as_str(), "app::Person");
            assert_eq!(attribute, "age");
        }
        other => panic!("expected MissingAccessor, got {:?}", other),
    }
    assert!(dispatcher.resolved_types().is_empty());
    assert!(!cache.path().join("serializer").exists());
}

#[test]
fn test_unwritable_cache_directory() {
    let root = tempfile::tempdir().unwrap();
    // A regular file where the cache subtree should go.
    fs::write(root.path().join("serializer"), b"").unwrap();
    let generator = generator(root.path());

    match generator.generate(&TypeIdentifier::new("plain::Widget")) {
        Err(GenerationError::DirectoryUnwritable { path }) => {
            assert_eq!(path, generator.output_dir());
        }
        Ok(_) => panic!("expected DirectoryUnwritable, got a normalizer"),
        Err(other) => panic!("expected DirectoryUnwritable, got {:?}", other),
    }
}

/// Renders sources that never declare the normalizer contract.
struct BrokenRenderer;

impl TemplateRenderer for BrokenRenderer {
    fn render(&self, _template: &str, model: &RenderModel) -> Result<String, GenerationError> {
        Ok(format!("pub struct {};\n", model.normalizer_class_name))
    }
}

#[test]
fn test_source_without_contract_rejected() {
    let cache = tempfile::tempdir().unwrap();
    let generator = CodeGenerator::new(Arc::new(BrokenRenderer), cache.path(), registry());

    assert!(matches!(
        generator.generate(&TypeIdentifier::new("plain::Widget")),
        Err(GenerationError::ContractViolation { .. })
    ));
}

#[test]
fn test_template_override_from_config() {
    let root = tempfile::tempdir().unwrap();
    let template = root.path().join("custom.rs.tera");
    fs::write(
        &template,
        "// custom\nimpl SpecializedNormalizer for {{ normalizer_class_name }} {}\n",
    )
    .unwrap();
    let config = GeneratorConfig {
        template: Some(template),
        ..GeneratorConfig::with_cache_dir(root.path().join("cache"))
    };

    let generator = CodeGenerator::from_config(&config, registry()).unwrap();
    let record = generator
        .write_source(&TypeIdentifier::new("plain::Widget"))
        .unwrap()
        .unwrap();
    assert_eq!(
        fs::read_to_string(record.path).unwrap(),
        "// custom\nimpl SpecializedNormalizer for WidgetNormalizer {}\n"
    );
}
