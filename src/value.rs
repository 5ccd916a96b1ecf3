// Copyright (C) 2024 Parity Technologies (UK) Ltd. (admin@parity.io)
// This file is a part of the scale-object crate.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//         http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! This module provides [`ScaleValue`], which is what SCALE bytes are decoded into, and
//! what is handed in to be SCALE encoded.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

/// A decoded value. Values own everything nested inside them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScaleValue {
    /// An unsigned integer, along with the bit width of the type it came from.
    Int(u128, u16),
    /// A signed integer, along with the bit width of the type it came from.
    SignedInt(i128, u16),
    /// A boolean.
    Bool(bool),
    /// A string.
    Str(String),
    /// An ordered sequence of values; from a vector, fixed length array or tuple.
    Seq(Vec<ScaleValue>),
    /// Struct fields in their declared order.
    Struct(Vec<(String, ScaleValue)>),
    /// A single enum variant and the value it carries. Variants that carry nothing
    /// hold an empty [`ScaleValue::Seq`].
    Variant(String, Box<ScaleValue>),
    /// An optional value.
    Maybe(Option<Box<ScaleValue>>),
    /// The outcome of a `Result<T, E>`.
    Outcome(Result<Box<ScaleValue>, Box<ScaleValue>>),
}

impl ScaleValue {
    /// The empty value, `()`.
    pub fn unit() -> ScaleValue {
        ScaleValue::Seq(Vec::new())
    }

    /// Construct a struct value from some field names and values.
    pub fn named<S: Into<String>>(fields: impl IntoIterator<Item = (S, ScaleValue)>) -> ScaleValue {
        ScaleValue::Struct(fields.into_iter().map(|(name, value)| (name.into(), value)).collect())
    }

    /// Construct a sequence value.
    pub fn seq(values: impl IntoIterator<Item = ScaleValue>) -> ScaleValue {
        ScaleValue::Seq(values.into_iter().collect())
    }

    /// Construct an enum variant value.
    pub fn variant(name: impl Into<String>, value: ScaleValue) -> ScaleValue {
        ScaleValue::Variant(name.into(), Box::new(value))
    }

    /// Construct a present optional value.
    pub fn some(value: ScaleValue) -> ScaleValue {
        ScaleValue::Maybe(Some(Box::new(value)))
    }

    /// Construct an absent optional value.
    pub fn none() -> ScaleValue {
        ScaleValue::Maybe(None)
    }

    /// Construct a successful outcome.
    pub fn ok(value: ScaleValue) -> ScaleValue {
        ScaleValue::Outcome(Ok(Box::new(value)))
    }

    /// Construct a failed outcome.
    pub fn err(value: ScaleValue) -> ScaleValue {
        ScaleValue::Outcome(Err(Box::new(value)))
    }

    /// What kind of value is this?
    pub fn kind(&self) -> Kind {
        match self {
            ScaleValue::Int(..) => Kind::Int,
            ScaleValue::SignedInt(..) => Kind::SignedInt,
            ScaleValue::Bool(_) => Kind::Bool,
            ScaleValue::Str(_) => Kind::Str,
            ScaleValue::Seq(_) => Kind::Seq,
            ScaleValue::Struct(_) => Kind::Struct,
            ScaleValue::Variant(..) => Kind::Variant,
            ScaleValue::Maybe(_) => Kind::Maybe,
            ScaleValue::Outcome(_) => Kind::Outcome,
        }
    }

    /// Look up a struct field by name.
    pub fn field(&self, name: &str) -> Option<&ScaleValue> {
        match self {
            ScaleValue::Struct(fields) => fields.iter().find(|(n, _)| n == name).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Return the number, if this is an unsigned integer.
    pub fn as_u128(&self) -> Option<u128> {
        match self {
            ScaleValue::Int(n, _) => Some(*n),
            ScaleValue::SignedInt(n, _) => u128::try_from(*n).ok(),
            _ => None,
        }
    }

    /// Return the string, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ScaleValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Return the boolean, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ScaleValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// The kind of a [`ScaleValue`].
#[allow(missing_docs)]
#[derive(Copy, Clone, PartialEq, Eq, Debug, derive_more::Display)]
pub enum Kind {
    #[display(fmt = "unsigned integer")]
    Int,
    #[display(fmt = "signed integer")]
    SignedInt,
    #[display(fmt = "bool")]
    Bool,
    #[display(fmt = "string")]
    Str,
    #[display(fmt = "sequence")]
    Seq,
    #[display(fmt = "struct")]
    Struct,
    #[display(fmt = "variant")]
    Variant,
    #[display(fmt = "optional")]
    Maybe,
    #[display(fmt = "result")]
    Outcome,
}

macro_rules! impl_from_int {
    ($variant:ident: $($ty:ty => $bits:literal),*) => {$(
        impl From<$ty> for ScaleValue {
            fn from(n: $ty) -> Self {
                ScaleValue::$variant(n.into(), $bits)
            }
        }
    )*}
}

impl_from_int!(Int: u8 => 8, u16 => 16, u32 => 32, u64 => 64, u128 => 128);
impl_from_int!(SignedInt: i8 => 8, i16 => 16, i32 => 32, i64 => 64, i128 => 128);

impl From<bool> for ScaleValue {
    fn from(b: bool) -> Self {
        ScaleValue::Bool(b)
    }
}

impl From<&str> for ScaleValue {
    fn from(s: &str) -> Self {
        ScaleValue::Str(s.into())
    }
}

impl From<String> for ScaleValue {
    fn from(s: String) -> Self {
        ScaleValue::Str(s)
    }
}

impl<T: Into<ScaleValue>> From<Vec<T>> for ScaleValue {
    fn from(values: Vec<T>) -> Self {
        ScaleValue::Seq(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<ScaleValue>> From<Option<T>> for ScaleValue {
    fn from(value: Option<T>) -> Self {
        ScaleValue::Maybe(value.map(|v| Box::new(v.into())))
    }
}

// Serializing gives back roughly the JSON shape that the value would be written in
// by hand: structs become maps, variants become single entry maps (or just the name,
// if they carry nothing), and optional values become null or the value itself.
impl serde::Serialize for ScaleValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::{SerializeMap, SerializeSeq};

        match self {
            ScaleValue::Int(n, _) => match u64::try_from(*n) {
                Ok(n) => serializer.serialize_u64(n),
                Err(_) => serializer.serialize_u128(*n),
            },
            ScaleValue::SignedInt(n, _) => match i64::try_from(*n) {
                Ok(n) => serializer.serialize_i64(n),
                Err(_) => serializer.serialize_i128(*n),
            },
            ScaleValue::Bool(b) => serializer.serialize_bool(*b),
            ScaleValue::Str(s) => serializer.serialize_str(s),
            ScaleValue::Seq(values) => {
                let mut seq = serializer.serialize_seq(Some(values.len()))?;
                for value in values {
                    seq.serialize_element(value)?;
                }
                seq.end()
            }
            ScaleValue::Struct(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (name, value) in fields {
                    map.serialize_entry(name, value)?;
                }
                map.end()
            }
            ScaleValue::Variant(name, value) => {
                if matches!(&**value, ScaleValue::Seq(v) if v.is_empty()) {
                    return serializer.serialize_str(name);
                }
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(name, value)?;
                map.end()
            }
            ScaleValue::Maybe(None) => serializer.serialize_none(),
            ScaleValue::Maybe(Some(value)) => serializer.serialize_some(value),
            ScaleValue::Outcome(outcome) => {
                let mut map = serializer.serialize_map(Some(1))?;
                match outcome {
                    Ok(value) => map.serialize_entry("Ok", value)?,
                    Err(value) => map.serialize_entry("Err", value)?,
                }
                map.end()
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use alloc::vec;

    #[test]
    fn conversions_keep_the_bit_width() {
        assert_eq!(ScaleValue::from(10u32), ScaleValue::Int(10, 32));
        assert_eq!(ScaleValue::from(1u8), ScaleValue::Int(1, 8));
        assert_eq!(ScaleValue::from(-1i16), ScaleValue::SignedInt(-1, 16));
        assert_eq!(
            ScaleValue::from(vec![1u32, 2]),
            ScaleValue::Seq(vec![ScaleValue::Int(1, 32), ScaleValue::Int(2, 32)])
        );
        assert_eq!(ScaleValue::from(Some(true)), ScaleValue::some(ScaleValue::Bool(true)));
    }

    #[test]
    fn accessors_work() {
        let value = ScaleValue::named([("data", 10u32.into()), ("other", 1u8.into())]);
        assert_eq!(value.field("data").and_then(|v| v.as_u128()), Some(10));
        assert_eq!(value.field("nope"), None);
        assert_eq!(value.kind(), Kind::Struct);
        assert_eq!(ScaleValue::from("Hamlet").as_str(), Some("Hamlet"));
        assert_eq!(ScaleValue::from(false).as_bool(), Some(false));
    }

    #[test]
    fn serializes_to_json_shapes() {
        let value = ScaleValue::seq([
            ScaleValue::named([("data", 10u32.into()), ("other", 1u8.into())]),
            ScaleValue::variant("a", 1u32.into()),
            ScaleValue::variant("Unit", ScaleValue::unit()),
            ScaleValue::some(true.into()),
            ScaleValue::none(),
            ScaleValue::ok(2u32.into()),
            ScaleValue::err("nope".into()),
            (-5i8).into(),
        ]);

        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                { "data": 10, "other": 1 },
                { "a": 1 },
                "Unit",
                true,
                null,
                { "Ok": 2 },
                { "Err": "nope" },
                -5
            ])
        );
    }
}
