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

//! This module provides [`TypeDefinitions`], a batch of named type definitions which is
//! constructed by deserializing some data into it. JSON is the expected input format, though
//! in theory others can be used too.
//!
//! # Example
//!
//! ```rust
//! use scale_object::{TypeDefinitions, TypeRegistry};
//!
//! let json = r#"{
//!     "types": {
//!         "Balance": "u128",
//!         "Pair": ["u32", "bool"],
//!         "Account": { "free": "Balance", "nonce": "Compact<u32>" },
//!         "Status": { "_enum": ["Active", "Inactive"] },
//!         "Event": {
//!             "type": "enum",
//!             "type_mapping": [["Transfer", "(u32, u32)"], ["Deposit", "u128"]]
//!         }
//!     }
//! }"#;
//!
//! let defs: TypeDefinitions = serde_json::from_str(json).unwrap();
//!
//! let mut types = TypeRegistry::basic();
//! defs.register_into(&mut types).unwrap();
//! assert!(types.contains("Event"));
//! ```

use crate::error::Error;
use crate::type_def::{Field, TypeDef, Variant};
use crate::type_expr::TypeExpr;
use crate::type_registry::TypeRegistry;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use serde::de::Error as _;

/// A batch of named type definitions, in the order that they were given. Use [`serde`]
/// to deserialize something into this struct (the deserialization logic is tuned to work
/// best with `serde_json`, but any self describing format should work so long as it's the
/// right shape).
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
pub struct TypeDefinitions {
    #[serde(default, deserialize_with = "deserialize_types")]
    types: Vec<(String, TypeDef)>,
}

impl TypeDefinitions {
    /// The number of type definitions.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Are there no type definitions?
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Iterate over the names and definitions, in the order they were given.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &TypeDef)> {
        self.types.iter().map(|(name, def)| (name.as_str(), def))
    }

    /// Register these definitions into the given registry as a single batch. If any
    /// definition is invalid, nothing is registered.
    pub fn register_into(self, registry: &mut TypeRegistry) -> Result<(), Error> {
        registry.register(self.types)
    }

    /// Build a new [`TypeRegistry`] containing only these definitions.
    pub fn into_type_registry(self) -> Result<TypeRegistry, Error> {
        let mut registry = TypeRegistry::empty();
        self.register_into(&mut registry)?;
        Ok(registry)
    }
}

impl IntoIterator for TypeDefinitions {
    type Item = (String, TypeDef);
    type IntoIter = alloc::vec::IntoIter<(String, TypeDef)>;
    fn into_iter(self) -> Self::IntoIter {
        self.types.into_iter()
    }
}

// Dev note: Everything below relates to deserializing into the above type. Look at the tests to
// see exactly how each part of the deserializing code works.

fn deserialize_types<'de, D: serde::Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<(String, TypeDef)>, D::Error> {
    struct TypesVisitor;
    impl<'de> serde::de::Visitor<'de> for TypesVisitor {
        type Value = Vec<(String, TypeDef)>;

        fn expecting(&self, formatter: &mut core::fmt::Formatter) -> core::fmt::Result {
            formatter.write_str("a map of type names to type definitions")
        }

        // Collect entries ourselves so that the order they were written in is kept.
        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: serde::de::MapAccess<'de>,
        {
            let mut types = Vec::new();
            while let Some((name, def)) = map.next_entry::<String, DeserializableDef>()? {
                types.push((name, def.0));
            }
            Ok(types)
        }
    }

    deserializer.deserialize_map(TypesVisitor)
}

/// The definition of a single type.
#[derive(Debug, PartialEq)]
struct DeserializableDef(TypeDef);

impl<'de> serde::Deserialize<'de> for DeserializableDef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct DeserializableDefVisitor;
        impl<'de> serde::de::Visitor<'de> for DeserializableDefVisitor {
            type Value = DeserializableDef;

            fn expecting(&self, formatter: &mut core::fmt::Formatter) -> core::fmt::Result {
                formatter.write_str("a string, map, array or null")
            }

            // A simple alias type name like 'Vec<u8>', '(u64, bool)' or 'Foo'.
            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(DeserializableDef(TypeDef::AliasOf(parse_type_expr(v)?)))
            }

            // An array like '["Vec<u8>", "bool"]'. Ultimately similar to writing
            // '(Vec<u8>, bool)' to alias to a tuple.
            fn visit_seq<A>(self, seq: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                Ok(DeserializableDef(TypeDef::AliasOf(tuple_from_seq(seq)?)))
            }

            // 'null' values are equivalent to '()'.
            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(DeserializableDef(TypeDef::AliasOf(TypeExpr::unit())))
            }

            // One of:
            // - '{ "_enum": ... }' for enums.
            // - '{ "type": "struct" | "enum", "type_mapping": ..., "value_list": ... }'.
            // - '{ "a": "T", "b": "U" }' for structs.
            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::MapAccess<'de>,
            {
                let Some(name) = map.next_key::<String>()? else {
                    // Empty map; treat it as an empty struct then:
                    return Ok(DeserializableDef(TypeDef::StructOf(Vec::new())));
                };

                if name == "_enum" {
                    let variants: DeserializableEnum = map.next_value()?;
                    return Ok(DeserializableDef(TypeDef::EnumOf(variants.0)));
                }

                let first_value: String = map.next_value()?;
                if name == "type" && (first_value == "struct" || first_value == "enum") {
                    return tagged_def(&first_value, map).map(DeserializableDef);
                }

                // Otherwise, treat as a struct and deserialize each field, remembering
                // to keep the field we've already deserialized.
                let mut fields = Vec::new();
                fields.push(Field::new(name, parse_type_expr(&first_value)?));
                while let Some((name, ty)) = map.next_entry::<String, TypeExpr>()? {
                    fields.push(Field::new(name, ty));
                }
                Ok(DeserializableDef(TypeDef::StructOf(fields)))
            }
        }

        deserializer.deserialize_any(DeserializableDefVisitor)
    }
}

// The remainder of a '{ "type": "struct" | "enum", ... }' definition, after "type".
fn tagged_def<'de, A>(kind: &str, mut map: A) -> Result<TypeDef, A::Error>
where
    A: serde::de::MapAccess<'de>,
{
    let mut type_mapping: Option<Vec<(String, TypeExpr)>> = None;
    let mut value_list: Option<Vec<String>> = None;

    while let Some(key) = map.next_key::<String>()? {
        match key.as_str() {
            "type_mapping" => type_mapping = Some(map.next_value()?),
            "value_list" => value_list = Some(map.next_value()?),
            other => {
                return Err(A::Error::custom(format!(
                    "field '{other}' not expected. Expecting 'type_mapping' or 'value_list'"
                )))
            }
        }
    }

    let def = match (kind, type_mapping, value_list) {
        ("struct", Some(mapping), None) => TypeDef::struct_of(mapping),
        ("struct", None, None) => TypeDef::StructOf(Vec::new()),
        ("enum", Some(mapping), None) => TypeDef::enum_of(mapping),
        ("enum", None, Some(names)) => TypeDef::unit_enum_of(names),
        ("enum", None, None) => TypeDef::EnumOf(Vec::new()),
        _ => {
            return Err(A::Error::custom(format!(
                "a '{kind}' definition expects exactly one of 'type_mapping' or 'value_list'"
            )))
        }
    };
    Ok(def)
}

struct DeserializableEnum(Vec<Variant>);

impl<'de> serde::Deserialize<'de> for DeserializableEnum {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct DeserializableEnumVisitor;
        impl<'de> serde::de::Visitor<'de> for DeserializableEnumVisitor {
            type Value = DeserializableEnum;

            fn expecting(&self, formatter: &mut core::fmt::Formatter) -> core::fmt::Result {
                formatter.write_str("a map or array of enum variants")
            }

            // '{ "A": "u32", "B": null, "C": ["u8", "bool"] }'
            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::MapAccess<'de>,
            {
                let mut variants = Vec::new();
                while let Some((name, ty)) = map.next_entry::<String, VariantType>()? {
                    variants.push(Variant::new(name, ty.0));
                }
                Ok(DeserializableEnum(variants))
            }

            // '["A", "B", "C"]'
            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                let mut variants = Vec::new();
                while let Some(name) = seq.next_element::<String>()? {
                    variants.push(Variant::unit(name));
                }
                Ok(DeserializableEnum(variants))
            }
        }

        deserializer.deserialize_any(DeserializableEnumVisitor)
    }
}

// The type carried by an enum variant. Variants carry a single type expression, so
// unlike top level definitions, these can't be inline structs.
struct VariantType(TypeExpr);

impl<'de> serde::Deserialize<'de> for VariantType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        match <DeserializableDef as serde::Deserialize>::deserialize(deserializer)?.0 {
            TypeDef::AliasOf(ty) => Ok(VariantType(ty)),
            _ => Err(D::Error::custom(
                "enum variants must be given a type name, array of type names or null",
            )),
        }
    }
}

fn parse_type_expr<E: serde::de::Error>(s: &str) -> Result<TypeExpr, E> {
    TypeExpr::parse(s).map_err(|e| E::custom(format!("Could not parse '{s}': {e}")))
}

fn tuple_from_seq<'de, A: serde::de::SeqAccess<'de>>(mut seq: A) -> Result<TypeExpr, A::Error> {
    let mut members = Vec::new();
    while let Some(ty) = seq.next_element::<TypeExpr>()? {
        members.push(ty);
    }
    Ok(TypeExpr::Tuple(members))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::ErrorKind;
    use alloc::vec;

    fn n(name: &str) -> TypeExpr {
        TypeExpr::named(name)
    }

    fn unit_variants(names: &[&str]) -> TypeDef {
        TypeDef::unit_enum_of(names.iter().copied())
    }

    #[test]
    fn deserializable_def_works() {
        let examples = [
            // Basic alias to some type
            (r#""Vec<u8>""#, TypeDef::alias_of(TypeExpr::vector(n("u8")))),
            // Tuples of types
            (
                r#"["Vec<u8>", "bool"]"#,
                TypeDef::alias_of(TypeExpr::tuple(vec![TypeExpr::vector(n("u8")), n("bool")])),
            ),
            // Null
            ("null", TypeDef::alias_of(TypeExpr::unit())),
            // Structs of types
            (
                r#"{ "a": "Vec<u8>", "b": "bool" }"#,
                TypeDef::struct_of([("a", TypeExpr::vector(n("u8"))), ("b", n("bool"))]),
            ),
            // A struct with a field that happens to be called "type"
            (r#"{ "type": "u8", "b": "bool" }"#, TypeDef::struct_of([("type", n("u8")), ("b", n("bool"))])),
            // Enum variants without data
            (r#"{ "_enum": ["One", "Two", "Three"] }"#, unit_variants(&["One", "Two", "Three"])),
            // Enum variants with data
            (
                r#"{ "_enum": {"One": ["u32", "bool"], "Two": null, "Three": "Vec<u8>" } }"#,
                TypeDef::enum_of([
                    ("One", TypeExpr::tuple(vec![n("u32"), n("bool")])),
                    ("Two", TypeExpr::unit()),
                    ("Three", TypeExpr::vector(n("u8"))),
                ]),
            ),
            // Explicitly tagged structs
            (
                r#"{ "type": "struct", "type_mapping": [["data", "u32"], ["other", "u8"]] }"#,
                TypeDef::struct_of([("data", n("u32")), ("other", n("u8"))]),
            ),
            // Explicitly tagged enums
            (
                r#"{ "type": "enum", "type_mapping": [["a", "u32"], ["b", "u32"]] }"#,
                TypeDef::enum_of([("a", n("u32")), ("b", n("u32"))]),
            ),
            (r#"{ "type": "enum", "value_list": ["X", "Y"] }"#, unit_variants(&["X", "Y"])),
            // Empty maps are empty structs
            ("{}", TypeDef::StructOf(vec![])),
        ];

        for (json, expected) in examples {
            let actual: DeserializableDef = serde_json::from_str(json)
                .unwrap_or_else(|e| panic!("{json} should deserialize: {e}"));
            assert_eq!(actual.0, expected, "{json}");
        }
    }

    #[test]
    fn bad_definitions_fail_to_deserialize() {
        let examples = [
            r#""Vec<""#,
            r#"{ "a": "(u8" }"#,
            r#"{ "type": "struct", "value_list": ["A"] }"#,
            r#"{ "type": "enum", "type_mapping": [], "value_list": [] }"#,
            r#"{ "type": "enum", "other": [] }"#,
            r#"{ "_enum": { "A": { "x": "u8" } } }"#,
            "12",
        ];

        for json in examples {
            assert!(serde_json::from_str::<DeserializableDef>(json).is_err(), "{json}");
        }
    }

    #[test]
    fn can_deserialize_from_json_in_order() {
        let json = serde_json::json!({
            "types": {
                "Zed": "u8",
                "Tuple": ["bool", "Vec<String>"],
                "MyBasicEnum": {
                    "_enum": ["One", "Two", "Three"]
                },
                "EnumWithData": {
                    "_enum": {
                        "A": "u64",
                        "B": ["bool", "u8"],
                    }
                },
                "Alpha": { "field_a": "String", "field_b": "bool" }
            }
        });

        // serde_json::Value maps are sorted, so go via a string to check ordering.
        let defs: TypeDefinitions = serde_json::from_str(&json.to_string()).unwrap();
        assert_eq!(defs.len(), 5);

        let raw = r#"{ "types": { "Zed": "u8", "Alpha": "u16", "Mid": "u32" } }"#;
        let defs: TypeDefinitions = serde_json::from_str(raw).unwrap();
        let names: Vec<_> = defs.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Zed", "Alpha", "Mid"]);

        let types = defs.into_type_registry().unwrap();
        assert_eq!(types.get("Alpha"), Some(&TypeDef::alias_of(n("u16"))));
    }

    #[test]
    fn missing_types_key_is_empty() {
        let defs: TypeDefinitions = serde_json::from_str("{}").unwrap();
        assert!(defs.is_empty());
    }

    #[test]
    fn invalid_definitions_are_rejected_on_registration() {
        let raw = r#"{ "types": { "Foo": { "a": "u8", "a": "u16" } } }"#;
        let defs: TypeDefinitions = serde_json::from_str(raw).unwrap();

        let mut types = TypeRegistry::basic();
        let before = types.len();
        let err = defs.register_into(&mut types).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::DuplicateOrInvalidDefinition(_)));
        assert_eq!(types.len(), before);
    }
}
