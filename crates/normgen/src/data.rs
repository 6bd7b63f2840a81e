// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Input values handed to normalizers.

use crate::error::NormalizeError;
use crate::types::TypeIdentifier;
use serde_json::{Map, Number, Value};
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// An object whose attributes are read through named zero-argument accessors.
pub trait Object: Send + Sync + fmt::Debug {
    /// Declared type of this instance.
    fn type_identifier(&self) -> TypeIdentifier;

    /// Invoke a zero-argument read accessor; `None` if there is no such accessor.
    fn call(&self, accessor: &str) -> Option<Data>;

    /// Real type behind a lazy-loading placeholder; `None` for ordinary objects.
    fn real_type(&self) -> Option<TypeIdentifier> {
        None
    }

    fn as_any(&self) -> &dyn Any;
}

/// A value to normalize.
#[derive(Debug, Clone)]
pub enum Data {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    /// Arbitrary-precision decimal, kept as its textual form.
    Decimal(String),
    String(String),
    List(Vec<Data>),
    Map(BTreeMap<String, Data>),
    Object(Arc<dyn Object>),
}

impl Data {
    /// Try to get as object.
    pub fn as_object(&self) -> Option<&Arc<dyn Object>> {
        match self {
            Self::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Short kind name, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) | Self::UInt(_) => "integer",
            Self::Float(_) => "float",
            Self::Decimal(_) => "decimal",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Object(_) => "object",
        }
    }

    /// Emit the value verbatim.
    ///
    /// Lists and maps of scalars are emitted as-is; an object anywhere in the
    /// value is rejected.
    pub fn to_scalar_value(&self) -> Result<Value, NormalizeError> {
        Ok(match self {
            Self::Null => Value::Null,
            Self::Bool(v) => Value::Bool(*v),
            Self::Int(v) => Value::from(*v),
            Self::UInt(v) => Value::from(*v),
            Self::Float(v) => Number::from_f64(*v).map_or(Value::Null, Value::Number),
            Self::Decimal(v) | Self::String(v) => Value::String(v.clone()),
            Self::List(items) => Value::Array(
                items
                    .iter()
                    .map(Self::to_scalar_value)
                    .collect::<Result<_, _>>()?,
            ),
            Self::Map(entries) => {
                let mut map = Map::new();
                for (key, value) in entries {
                    map.insert(key.clone(), value.to_scalar_value()?);
                }
                Value::Object(map)
            }
            Self::Object(_) => return Err(NormalizeError::NotScalar { found: "object" }),
        })
    }
}

/// Conversion of host values into [`Data`].
pub trait ToData {
    fn to_data(&self) -> Data;
}

macro_rules! to_data_via {
    ($variant:ident, $cast:ty; $($ty:ty),*) => {
        $(
            impl ToData for $ty {
                fn to_data(&self) -> Data {
                    Data::$variant(<$cast>::from(*self))
                }
            }
        )*
    };
}

to_data_via!(Int, i64; i8, i16, i32, i64);
to_data_via!(UInt, u64; u8, u16, u32, u64);
to_data_via!(Float, f64; f32, f64);

impl ToData for isize {
    fn to_data(&self) -> Data {
        i64::try_from(*self).map_or(Data::Float(*self as f64), Data::Int)
    }
}

impl ToData for usize {
    fn to_data(&self) -> Data {
        u64::try_from(*self).map_or(Data::Float(*self as f64), Data::UInt)
    }
}

impl ToData for bool {
    fn to_data(&self) -> Data {
        Data::Bool(*self)
    }
}

impl ToData for String {
    fn to_data(&self) -> Data {
        Data::String(self.clone())
    }
}

impl ToData for str {
    fn to_data(&self) -> Data {
        Data::String(self.to_string())
    }
}

impl ToData for char {
    fn to_data(&self) -> Data {
        Data::String(self.to_string())
    }
}

impl<T: ToData + ?Sized> ToData for &T {
    fn to_data(&self) -> Data {
        (**self).to_data()
    }
}

impl<T: ToData> ToData for Option<T> {
    fn to_data(&self) -> Data {
        self.as_ref().map_or(Data::Null, ToData::to_data)
    }
}

impl<T: ToData> ToData for Vec<T> {
    fn to_data(&self) -> Data {
        Data::List(self.iter().map(ToData::to_data).collect())
    }
}

impl<T: ToData> ToData for [T] {
    fn to_data(&self) -> Data {
        Data::List(self.iter().map(ToData::to_data).collect())
    }
}

impl<T: ToData> ToData for BTreeMap<String, T> {
    fn to_data(&self) -> Data {
        Data::Map(self.iter().map(|(k, v)| (k.clone(), v.to_data())).collect())
    }
}

impl<T: ToData + ?Sized> ToData for Box<T> {
    fn to_data(&self) -> Data {
        (**self).to_data()
    }
}

impl ToData for Arc<dyn Object> {
    fn to_data(&self) -> Data {
        Data::Object(Arc::clone(self))
    }
}

impl ToData for Data {
    fn to_data(&self) -> Data {
        self.clone()
    }
}

impl From<&str> for Data {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Data {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<i64> for Data {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<bool> for Data {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<f64> for Data {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl<O: Object + 'static> From<Arc<O>> for Data {
    fn from(obj: Arc<O>) -> Self {
        Self::Object(obj)
    }
}
