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

//! This module provides a [`TypeRegistry`], which can be used to store and resolve
//! type definitions based on their names.
//!
//! # Example
//!
//! ```rust
//! use scale_object::{TypeDef, TypeExpr, TypeRegistry};
//!
//! let mut types = TypeRegistry::basic();
//! types.register([
//!     ("Balance", TypeDef::alias_of_str("u128").unwrap()),
//!     ("Status", TypeDef::unit_enum_of(["Active", "Inactive"])),
//!     ("Account", TypeDef::struct_of([
//!         ("free", TypeExpr::named("Balance")),
//!         ("status", TypeExpr::named("Status")),
//!     ])),
//! ]).unwrap();
//!
//! assert!(types.contains("Account"));
//! assert!(types.resolve("Nope").is_err());
//! ```

use crate::error::{Error, ErrorKind};
use crate::type_def::TypeDef;
use crate::type_expr::{Primitive, TypeExpr};
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use hashbrown::{HashMap, HashSet};

/// Enums are encoded with a single tag byte, and so can't have more variants than this.
pub const MAX_VARIANTS: usize = 256;

/// Something that can hand back the definition of a named type. The codec is generic
/// over this, so that a [`TypeRegistry`], a [`crate::TypeRegistrySet`] or a shared
/// snapshot of either can be used to resolve types.
pub trait TypeLookup {
    /// Look up the definition of the named type.
    fn lookup(&self, name: &str) -> Option<&TypeDef>;
}

impl<T: TypeLookup + ?Sized> TypeLookup for &T {
    fn lookup(&self, name: &str) -> Option<&TypeDef> {
        (**self).lookup(name)
    }
}

impl<T: TypeLookup + ?Sized> TypeLookup for Arc<T> {
    fn lookup(&self, name: &str) -> Option<&TypeDef> {
        (**self).lookup(name)
    }
}

/// A registry of named type definitions. Definitions are kept in the order that they
/// were first registered.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    entries: Vec<Entry>,
    // Index into `entries` for each name.
    positions: HashMap<String, usize>,
}

#[derive(Debug, Clone)]
struct Entry {
    name: String,
    def: TypeDef,
}

impl TypeRegistry {
    /// Create a new empty type registry.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a new type registry containing the built in types:
    ///
    /// - the primitives `u8`, `u16`, `u32`, `u64`, `u128`, `i8`, `i16`, `i32`, `i64`,
    ///   `i128`, `bool` (also as `Bool`) and `str` (also as `string`, `String` and `Text`).
    /// - the aliases `Null` (to `()`) and `Bytes` (to `Vec<u8>`).
    pub fn basic() -> Self {
        let primitives = [
            ("u8", Primitive::U8),
            ("u16", Primitive::U16),
            ("u32", Primitive::U32),
            ("u64", Primitive::U64),
            ("u128", Primitive::U128),
            ("i8", Primitive::I8),
            ("i16", Primitive::I16),
            ("i32", Primitive::I32),
            ("i64", Primitive::I64),
            ("i128", Primitive::I128),
            ("bool", Primitive::Bool),
            ("Bool", Primitive::Bool),
            ("str", Primitive::Str),
            ("string", Primitive::Str),
            ("String", Primitive::Str),
            ("Text", Primitive::Str),
        ];

        let mut registry = TypeRegistry::empty();
        for (name, primitive) in primitives {
            registry.insert_unchecked(name.into(), TypeDef::Primitive(primitive));
        }
        registry.insert_unchecked("Null".into(), TypeDef::AliasOf(TypeExpr::unit()));
        registry.insert_unchecked(
            "Bytes".into(),
            TypeDef::AliasOf(TypeExpr::vector(TypeExpr::named("u8"))),
        );
        registry
    }

    /// Register a batch of type definitions. Every definition in the batch is checked first,
    /// and if any of them are invalid then nothing is registered and an error is returned.
    /// Otherwise, all of them are registered, replacing any existing definitions with the
    /// same names.
    ///
    /// Definitions may refer to themselves or to types that are not registered yet; such
    /// names are only looked up when encoding or decoding.
    pub fn register<N: Into<String>>(
        &mut self,
        batch: impl IntoIterator<Item = (N, TypeDef)>,
    ) -> Result<(), Error> {
        let batch: Vec<(String, TypeDef)> =
            batch.into_iter().map(|(name, def)| (name.into(), def)).collect();

        validate_batch(&batch)?;
        for (name, def) in batch {
            self.insert_unchecked(name, def);
        }
        Ok(())
    }

    /// Add the definitions from another registry to this one. Where names clash, the
    /// definitions in the other registry win.
    pub fn extend(&mut self, other: TypeRegistry) {
        for Entry { name, def } in other.entries {
            self.insert_unchecked(name, def);
        }
    }

    /// Look up a type definition by name, returning an error if it doesn't exist.
    pub fn resolve(&self, name: &str) -> Result<&TypeDef, Error> {
        self.get(name).ok_or_else(|| Error::new(ErrorKind::UnknownType(name.to_string())))
    }

    /// Look up a type definition by name.
    pub fn get(&self, name: &str) -> Option<&TypeDef> {
        self.positions.get(name).map(|&idx| &self.entries[idx].def)
    }

    /// Is there a type with the given name in the registry?
    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    /// The number of types in the registry.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Is the registry empty?
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the names and definitions of all types in the registry, in the order
    /// that they were first registered.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &TypeDef)> {
        self.entries.iter().map(|e| (e.name.as_str(), &e.def))
    }

    fn insert_unchecked(&mut self, name: String, def: TypeDef) {
        match self.positions.get(&name) {
            Some(&idx) => self.entries[idx].def = def,
            None => {
                self.positions.insert(name.clone(), self.entries.len());
                self.entries.push(Entry { name, def });
            }
        }
    }
}

impl TypeLookup for TypeRegistry {
    fn lookup(&self, name: &str) -> Option<&TypeDef> {
        self.get(name)
    }
}

impl<'a> From<TypeRegistry> for alloc::borrow::Cow<'a, TypeRegistry> {
    fn from(value: TypeRegistry) -> Self {
        alloc::borrow::Cow::Owned(value)
    }
}

impl<'a> From<&'a TypeRegistry> for alloc::borrow::Cow<'a, TypeRegistry> {
    fn from(value: &'a TypeRegistry) -> Self {
        alloc::borrow::Cow::Borrowed(value)
    }
}

/// The reason that a batch of type definitions could not be registered.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum DefinitionError {
    #[display(fmt = "'{_0}' is not a valid type name")]
    InvalidName(String),
    #[display(fmt = "Type '{_0}' is defined more than once in the same batch")]
    DuplicateName(String),
    #[display(fmt = "Struct '{ty}' has more than one field called '{field}'")]
    DuplicateField { ty: String, field: String },
    #[display(fmt = "Enum '{ty}' has more than one variant called '{variant}'")]
    DuplicateVariant { ty: String, variant: String },
    #[display(fmt = "Enum '{ty}' has {count} variants, but at most 256 are allowed")]
    TooManyVariants { ty: String, count: usize },
}

#[cfg(feature = "std")]
impl std::error::Error for DefinitionError {}

// Check every definition in a batch, and that no name appears in it twice.
fn validate_batch(batch: &[(String, TypeDef)]) -> Result<(), DefinitionError> {
    let mut seen = HashSet::with_capacity(batch.len());
    for (name, def) in batch {
        validate_definition(name, def)?;
        if !seen.insert(name.as_str()) {
            return Err(DefinitionError::DuplicateName(name.clone()));
        }
    }
    Ok(())
}

fn validate_definition(name: &str, def: &TypeDef) -> Result<(), DefinitionError> {
    if !is_valid_name(name) {
        return Err(DefinitionError::InvalidName(name.to_string()));
    }

    match def {
        TypeDef::StructOf(fields) => {
            let mut seen = HashSet::with_capacity(fields.len());
            for field in fields {
                if !seen.insert(field.name.as_str()) {
                    return Err(DefinitionError::DuplicateField {
                        ty: name.to_string(),
                        field: field.name.clone(),
                    });
                }
            }
        }
        TypeDef::EnumOf(variants) => {
            if variants.len() > MAX_VARIANTS {
                return Err(DefinitionError::TooManyVariants {
                    ty: name.to_string(),
                    count: variants.len(),
                });
            }
            let mut seen = HashSet::with_capacity(variants.len());
            for variant in variants {
                if !seen.insert(variant.name.as_str()) {
                    return Err(DefinitionError::DuplicateVariant {
                        ty: name.to_string(),
                        variant: variant.name.clone(),
                    });
                }
            }
        }
        TypeDef::Primitive(_) | TypeDef::AliasOf(_) => {}
    }
    Ok(())
}

// Names are identifiers, optionally joined into paths with `::`, like `Foo` or `a::b::Foo`.
fn is_valid_name(name: &str) -> bool {
    name.split("::").all(|segment| {
        let mut chars = segment.chars();
        let Some(first) = chars.next() else {
            return false;
        };
        (first.is_alphabetic() || first == '_') && chars.all(|c| c.is_alphanumeric() || c == '_')
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::type_def::{Field, Variant};
    use alloc::vec;

    fn n(name: &str) -> TypeExpr {
        TypeExpr::named(name)
    }

    fn definition_error(err: Error) -> DefinitionError {
        match err.kind() {
            ErrorKind::DuplicateOrInvalidDefinition(e) => e.clone(),
            other => panic!("expected a definition error, got {other:?}"),
        }
    }

    #[test]
    fn basic_types_are_present() {
        let types = TypeRegistry::basic();
        for name in ["u8", "u128", "i64", "bool", "Bool", "str", "string", "String", "Text"] {
            assert!(matches!(types.get(name), Some(TypeDef::Primitive(_))), "{name} missing");
        }
        assert_eq!(types.get("Null"), Some(&TypeDef::AliasOf(TypeExpr::unit())));
        assert_eq!(types.get("Bytes"), Some(&TypeDef::AliasOf(TypeExpr::vector(n("u8")))));
        assert!(TypeRegistry::empty().is_empty());
    }

    #[test]
    fn registered_types_can_be_resolved() {
        let mut types = TypeRegistry::empty();
        types
            .register([
                ("Foo", TypeDef::struct_of([("data", n("u32")), ("other", n("u8"))])),
                ("Bar", TypeDef::alias_of(n("Foo"))),
            ])
            .unwrap();

        assert_eq!(types.len(), 2);
        assert_eq!(
            types.resolve("Foo").unwrap(),
            &TypeDef::StructOf(vec![Field::new("data", n("u32")), Field::new("other", n("u8"))])
        );
        assert_eq!(
            types.resolve("Baz").unwrap_err().kind(),
            &ErrorKind::UnknownType("Baz".into())
        );
    }

    #[test]
    fn iteration_is_in_insertion_order_and_replacement_keeps_position() {
        let mut types = TypeRegistry::empty();
        types.register([("B", TypeDef::alias_of(n("u8"))), ("A", TypeDef::alias_of(n("u8")))]).unwrap();
        types.register([("C", TypeDef::alias_of(n("u8"))), ("B", TypeDef::alias_of(n("u16")))]).unwrap();

        let names: Vec<_> = types.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
        assert_eq!(types.get("B"), Some(&TypeDef::alias_of(n("u16"))));
    }

    #[test]
    fn invalid_batches_register_nothing() {
        let mut types = TypeRegistry::empty();

        let err = types
            .register([("Good", TypeDef::alias_of(n("u8"))), ("3bad", TypeDef::alias_of(n("u8")))])
            .unwrap_err();
        assert_eq!(definition_error(err), DefinitionError::InvalidName("3bad".into()));
        assert!(!types.contains("Good"));

        let err = types
            .register([("A", TypeDef::alias_of(n("u8"))), ("A", TypeDef::alias_of(n("u16")))])
            .unwrap_err();
        assert_eq!(definition_error(err), DefinitionError::DuplicateName("A".into()));

        let err = types
            .register([("S", TypeDef::struct_of([("a", n("u8")), ("a", n("u16"))]))])
            .unwrap_err();
        assert_eq!(
            definition_error(err),
            DefinitionError::DuplicateField { ty: "S".into(), field: "a".into() }
        );

        let err = types.register([("E", TypeDef::unit_enum_of(["X", "Y", "X"]))]).unwrap_err();
        assert_eq!(
            definition_error(err),
            DefinitionError::DuplicateVariant { ty: "E".into(), variant: "X".into() }
        );

        let too_many: Vec<Variant> =
            (0..=MAX_VARIANTS).map(|i| Variant::unit(alloc::format!("V{i}"))).collect();
        let err = types.register([("Big", TypeDef::EnumOf(too_many))]).unwrap_err();
        assert_eq!(
            definition_error(err),
            DefinitionError::TooManyVariants { ty: "Big".into(), count: 257 }
        );

        assert!(types.is_empty());
    }

    #[test]
    fn names_can_be_paths_and_definitions_can_recurse() {
        let mut types = TypeRegistry::empty();
        types
            .register([
                ("a::b::Foo", TypeDef::alias_of(n("u8"))),
                ("_private", TypeDef::alias_of(n("u8"))),
                (
                    "List",
                    TypeDef::enum_of([
                        ("Nil", TypeExpr::unit()),
                        ("Cons", TypeExpr::tuple(vec![n("u8"), n("List")])),
                    ]),
                ),
            ])
            .unwrap();
        assert!(types.contains("a::b::Foo"));
        assert!(types.contains("List"));

        for bad in ["", "a::", "::a", "Foo<T>", "a b", "[u8; 2]"] {
            assert!(types.register([(bad, TypeDef::alias_of(n("u8")))]).is_err(), "{bad:?}");
        }
    }

    #[test]
    fn extend_overrides_existing_types() {
        let mut a = TypeRegistry::basic();
        let mut b = TypeRegistry::empty();
        b.register([("u8", TypeDef::alias_of(n("u16"))), ("New", TypeDef::alias_of(n("u8")))])
            .unwrap();

        let len_before = a.len();
        a.extend(b);
        assert_eq!(a.len(), len_before + 1);
        assert_eq!(a.get("u8"), Some(&TypeDef::alias_of(n("u16"))));
        assert_eq!(a.lookup("New"), Some(&TypeDef::alias_of(n("u8"))));
    }
}
