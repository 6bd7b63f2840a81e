// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![cfg(feature = "derive")]

//! `#[derive(Normalize)]` tests.

use normgen::prelude::*;
use normgen::{AttributeMetadata, ScalarKind, ValueKind};

#[derive(Clone, Debug, Normalize)]
#[normalize(type_path = "shop::Product")]
struct Product {
    sku: String,
    price: f64,
    #[normalize(groups("stock"))]
    quantity: Option<u32>,
    available: bool,
    #[normalize(groups("detail", "admin"))]
    tags: Vec<String>,
    #[normalize(skip)]
    cache_key: u64,
    #[normalize(scalar)]
    dimensions: Vec<f64>,
}

#[derive(Clone, Debug, Normalize)]
struct Untagged {
    value: i32,
}

#[derive(Clone, Debug, Normalize)]
#[normalize(type_path = "shop::Legacy")]
struct Legacy {
    #[normalize(getter = "fetch_code")]
    code: String,
}

impl Legacy {
    fn fetch_code(&self) -> String {
        self.code.to_uppercase()
    }
}

#[derive(Clone, Debug, Normalize)]
#[normalize(type_path = "shop::Label")]
struct Label {
    #[normalize(getter = "get_text")]
    raw: String,
    #[normalize(skip)]
    prefix: String,
}

impl Label {
    fn get_text(&self) -> String {
        format!("{}{}", self.prefix, self.raw)
    }
}

#[derive(Clone, Debug, Normalize)]
#[normalize(type_path = "shop::Counter")]
struct Counter {
    hits: usize,
    delta: isize,
}

fn product() -> Product {
    Product {
        sku: "A-1".into(),
        price: 9.5,
        quantity: Some(3),
        available: true,
        tags: vec!["new".into()],
        cache_key: 42,
        dimensions: vec![1.0, 2.5],
    }
}

#[test]
fn test_describe() {
    let descriptor = Product::type_descriptor();
    assert_eq!(descriptor.type_id.as_str(), "shop::Product");
    assert_eq!(
        descriptor.attributes,
        vec![
            AttributeMetadata::new("sku", ValueKind::Scalar(ScalarKind::String)),
            AttributeMetadata::new("price", ValueKind::Scalar(ScalarKind::Float)),
            AttributeMetadata::new("quantity", ValueKind::Scalar(ScalarKind::Integer))
                .with_groups(["stock"]),
            AttributeMetadata::new("available", ValueKind::Scalar(ScalarKind::Boolean)),
            AttributeMetadata::new("tags", ValueKind::Composite).with_groups(["detail", "admin"]),
            AttributeMetadata::new("dimensions", ValueKind::Scalar(ScalarKind::String)),
        ]
    );
    assert_eq!(
        descriptor.accessors,
        vec![
            "get_sku",
            "get_price",
            "get_quantity",
            "is_available",
            "get_tags",
            "get_dimensions"
        ]
    );
}

#[test]
fn test_object_accessors() {
    let product = product();
    assert_eq!(product.type_identifier().as_str(), "shop::Product");
    assert!(matches!(product.call("get_sku"), Some(Data::String(s)) if s == "A-1"));
    assert!(matches!(product.call("is_available"), Some(Data::Bool(true))));
    assert!(matches!(product.call("get_tags"), Some(Data::List(items)) if items.len() == 1));
    assert!(product.call("get_cache_key").is_none());
    assert!(product.call("sku").is_none());
    assert!(product.real_type().is_none());

    let data = product.to_data();
    let object = data.as_object().unwrap();
    assert!(object.as_any().downcast_ref::<Product>().is_some());
}

#[test]
fn test_default_type_path() {
    let type_id = Untagged::type_descriptor().type_id;
    assert_eq!(type_id.short_name(), "Untagged");
    assert!(type_id.as_str().ends_with("derive::Untagged"));
    assert_eq!(Untagged { value: 1 }.type_identifier(), type_id);
}

#[test]
fn test_custom_getter_is_not_specializable() {
    let cache = tempfile::tempdir().unwrap();
    let registry = std::sync::Arc::new(TypeRegistry::new());
    registry.register_type::<Legacy>().unwrap();
    let generator = CodeGenerator::new(
        std::sync::Arc::new(TeraRenderer::new().unwrap()),
        cache.path(),
        registry,
    );

    assert!(matches!(
        Legacy { code: "x".into() }.call("fetch_code"),
        Some(Data::String(code)) if code == "X"
    ));
    assert!(matches!(
        generator.generate(&TypeIdentifier::new("shop::Legacy")),
        Err(GenerationError::MissingAccessor { .. })
    ));
}

#[test]
fn test_getter_method() {
    let label = Label {
        raw: "sale".into(),
        prefix: "#".into(),
    };
    assert!(matches!(label.call("get_text"), Some(Data::String(text)) if text == "#sale"));
    assert!(label.call("get_raw").is_none());
    assert_eq!(Label::type_descriptor().accessors, vec!["get_text"]);
}

#[test]
fn test_pointer_sized_fields() {
    assert_eq!(
        Counter::type_descriptor().attributes,
        vec![
            AttributeMetadata::new("hits", ValueKind::Scalar(ScalarKind::Integer)),
            AttributeMetadata::new("delta", ValueKind::Scalar(ScalarKind::Integer)),
        ]
    );

    let counter = Counter { hits: 7, delta: -2 };
    assert!(matches!(counter.call("get_hits"), Some(Data::UInt(7))));
    assert!(matches!(counter.call("get_delta"), Some(Data::Int(-2))));
}
