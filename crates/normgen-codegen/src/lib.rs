// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

extern crate proc_macro;

use proc_macro::TokenStream;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::{
    parse_macro_input, Data, DeriveInput, Fields, GenericArgument, LitStr, PathArguments, Token,
    Type,
};

/// Scalar kinds a field type can map to.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Scalar {
    String,
    Integer,
    Float,
    Boolean,
}

impl Scalar {
    fn tokens(self) -> proc_macro2::TokenStream {
        match self {
            Self::String => quote! { ::normgen::ScalarKind::String },
            Self::Integer => quote! { ::normgen::ScalarKind::Integer },
            Self::Float => quote! { ::normgen::ScalarKind::Float },
            Self::Boolean => quote! { ::normgen::ScalarKind::Boolean },
        }
    }
}

/// Declared value kind of a field.
#[derive(Clone, Copy)]
enum FieldKind {
    /// Primitive, emitted as-is
    Scalar(Scalar),
    /// Nested object or collection
    Composite,
}

#[derive(Default)]
struct FieldOptions {
    groups: Vec<String>,
    getter: Option<LitStr>,
    scalar: bool,
    composite: bool,
    skip: bool,
}

struct FieldInfo {
    name: syn::Ident,
    kind: FieldKind,
    groups: Vec<String>,
    accessor: String,
    /// Method read instead of the field
    getter: Option<syn::Ident>,
}

/// `#[derive(Normalize)]` macro: generates `Describe`, `Object` and `ToData` impls
///
/// Container attribute:
/// - `#[normalize(type_path = "app::Person")]`: type identifier, defaults to
///   `module_path!()::Name`
///
/// Field attributes:
/// - `#[normalize(groups("a", "b"))]`: serialization groups
/// - `#[normalize(scalar)]` / `#[normalize(composite)]`: override the inferred kind
/// - `#[normalize(getter = "get_name")]`: read through this method instead of
///   the field. The default accessor is `get_<field>` (`is_<field>` for
///   `bool`). Attributes whose accessor is neither `get_<field>` nor
///   `is_<field>` cannot be specialized.
/// - `#[normalize(skip)]`: not an attribute, no accessor
///
/// Primitives, `String`, `char` and `Option`s of those are scalars; every
/// other field type is composite and must implement `ToData`. The type must
/// be `Clone`.
///
/// Example:
/// ```ignore
/// use normgen::Normalize;
///
/// #[derive(Clone, Debug, Normalize)]
/// #[normalize(type_path = "app::Person")]
/// struct Person {
///     name: String,
///     #[normalize(groups("detail"))]
///     address: Address,
///     active: bool,
/// }
/// ```
#[proc_macro_derive(Normalize, attributes(normalize))]
pub fn derive_normalize(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let type_path = container_type_path(input)?;
    let type_path = match type_path {
        Some(path) => quote! { #path },
        None => {
            let short = name.to_string();
            quote! { concat!(module_path!(), "::", #short) }
        }
    };

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(f) => &f.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Only named fields are supported",
                ))
            }
        },
        _ => return Err(syn::Error::new_spanned(input, "Only structs are supported")),
    };

    let mut field_infos = Vec::new();
    for field in fields {
        let Some(field_name) = field.ident.as_ref() else {
            return Err(syn::Error::new_spanned(field, "Field must have a name"));
        };
        let options = field_options(field)?;
        if options.skip {
            continue;
        }
        if options.scalar && options.composite {
            return Err(syn::Error::new_spanned(
                field,
                "a field cannot be both scalar and composite",
            ));
        }

        let kind = if options.composite {
            FieldKind::Composite
        } else {
            match (get_scalar_kind(&field.ty), options.scalar) {
                (Some(kind), _) => FieldKind::Scalar(kind),
                (None, true) => FieldKind::Scalar(Scalar::String),
                (None, false) => FieldKind::Composite,
            }
        };

        let getter = match &options.getter {
            Some(method) => Some(method.parse::<syn::Ident>()?),
            None => None,
        };
        let accessor = match &getter {
            Some(method) => method.to_string(),
            None => {
                let prefix = match kind {
                    FieldKind::Scalar(Scalar::Boolean) => "is",
                    _ => "get",
                };
                format!("{prefix}_{field_name}")
            }
        };

        field_infos.push(FieldInfo {
            name: field_name.clone(),
            kind,
            groups: options.groups,
            accessor,
            getter,
        });
    }

    let attributes: Vec<_> = field_infos
        .iter()
        .map(|f| {
            let name_str = f.name.to_string();
            let groups = &f.groups;
            let count = groups.len();
            let kind = match &f.kind {
                FieldKind::Scalar(scalar) => {
                    let scalar = scalar.tokens();
                    quote! { ::normgen::ValueKind::Scalar(#scalar) }
                }
                FieldKind::Composite => quote! { ::normgen::ValueKind::Composite },
            };
            quote! {
                .attribute(
                    ::normgen::AttributeMetadata::new(#name_str, #kind)
                        .with_groups::<[&str; #count], &str>([#(#groups),*])
                )
            }
        })
        .collect();

    let accessors: Vec<_> = field_infos.iter().map(|f| &f.accessor).collect();

    let call_arms: Vec<_> = field_infos
        .iter()
        .map(|f| {
            let accessor = &f.accessor;
            let value = match &f.getter {
                Some(method) => quote! { &self.#method() },
                None => {
                    let field = &f.name;
                    quote! { &self.#field }
                }
            };
            quote! {
                #accessor => Some(::normgen::ToData::to_data(#value)),
            }
        })
        .collect();

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::normgen::Describe for #name #ty_generics #where_clause {
            fn type_descriptor() -> ::normgen::TypeDescriptor {
                ::normgen::TypeDescriptorBuilder::new(#type_path)
                    #(#attributes)*
                    #(.accessor(#accessors))*
                    .build()
            }
        }

        impl #impl_generics ::normgen::Object for #name #ty_generics #where_clause {
            fn type_identifier(&self) -> ::normgen::TypeIdentifier {
                ::normgen::TypeIdentifier::new(#type_path)
            }

            fn call(&self, accessor: &str) -> Option<::normgen::Data> {
                match accessor {
                    #(#call_arms)*
                    _ => None,
                }
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }
        }

        impl #impl_generics ::normgen::ToData for #name #ty_generics #where_clause {
            fn to_data(&self) -> ::normgen::Data {
                ::normgen::Data::Object(::std::sync::Arc::new(::std::clone::Clone::clone(self)))
            }
        }
    })
}

/// `type_path` from `#[normalize(...)]` on the container
fn container_type_path(input: &DeriveInput) -> syn::Result<Option<LitStr>> {
    let mut type_path = None;
    for attr in input.attrs.iter().filter(|a| a.path().is_ident("normalize")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("type_path") {
                type_path = Some(meta.value()?.parse::<LitStr>()?);
                Ok(())
            } else {
                Err(meta.error("unsupported normalize attribute, expected `type_path`"))
            }
        })?;
    }
    Ok(type_path)
}

/// Options from `#[normalize(...)]` on a field
fn field_options(field: &syn::Field) -> syn::Result<FieldOptions> {
    let mut options = FieldOptions::default();
    for attr in field.attrs.iter().filter(|a| a.path().is_ident("normalize")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("groups") {
                let content;
                syn::parenthesized!(content in meta.input);
                let groups = Punctuated::<LitStr, Token![,]>::parse_terminated(&content)?;
                options.groups.extend(groups.iter().map(LitStr::value));
            } else if meta.path.is_ident("getter") {
                options.getter = Some(meta.value()?.parse::<LitStr>()?);
            } else if meta.path.is_ident("scalar") {
                options.scalar = true;
            } else if meta.path.is_ident("composite") {
                options.composite = true;
            } else if meta.path.is_ident("skip") {
                options.skip = true;
            } else {
                return Err(meta.error(
                    "unsupported normalize attribute, expected one of `groups`, `getter`, `scalar`, `composite`, `skip`",
                ));
            }
            Ok(())
        })?;
    }
    Ok(options)
}

/// Get the scalar kind of a Rust type, `None` for composite types
///
/// `Option<T>` has the kind of `T`.
fn get_scalar_kind(ty: &Type) -> Option<Scalar> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;

    match segment.ident.to_string().as_str() {
        "i8" | "i16" | "i32" | "i64" | "isize" | "u8" | "u16" | "u32" | "u64" | "usize" => {
            Some(Scalar::Integer)
        }
        "f32" | "f64" => Some(Scalar::Float),
        "bool" => Some(Scalar::Boolean),
        "String" | "str" | "char" => Some(Scalar::String),
        "Option" => {
            let PathArguments::AngleBracketed(args) = &segment.arguments else {
                return None;
            };
            match args.args.first() {
                Some(GenericArgument::Type(inner)) => get_scalar_kind(inner),
                _ => None,
            }
        }
        _ => None,
    }
}
