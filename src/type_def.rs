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

//! This module provides a [`TypeDef`] enum, which describes what a named type in a
//! [`crate::TypeRegistry`] is, or in other words, how it should be SCALE encoded/decoded.

use crate::type_expr::{ParseError, Primitive, TypeExpr};
use alloc::string::String;
use alloc::vec::Vec;

/// The definition of a named type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDef {
    /// One of the built in primitive types.
    Primitive(Primitive),
    /// A struct. Fields are encoded one after the other in the order given here.
    StructOf(Vec<Field>),
    /// An enum. The position of each variant is the tag byte used to encode it.
    EnumOf(Vec<Variant>),
    /// An alias to some other type expression, like `Vec<u8>` or `Foo`.
    AliasOf(TypeExpr),
}

impl TypeDef {
    /// Define a struct from some field names and types.
    pub fn struct_of<N: Into<String>>(fields: impl IntoIterator<Item = (N, TypeExpr)>) -> TypeDef {
        TypeDef::StructOf(fields.into_iter().map(|(name, ty)| Field::new(name, ty)).collect())
    }

    /// Define an enum from some variant names and the type that each variant carries.
    pub fn enum_of<N: Into<String>>(variants: impl IntoIterator<Item = (N, TypeExpr)>) -> TypeDef {
        TypeDef::EnumOf(variants.into_iter().map(|(name, ty)| Variant::new(name, ty)).collect())
    }

    /// Define an enum whose variants carry no data.
    pub fn unit_enum_of<N: Into<String>>(names: impl IntoIterator<Item = N>) -> TypeDef {
        TypeDef::EnumOf(names.into_iter().map(Variant::unit).collect())
    }

    /// Define an alias to some type expression.
    pub fn alias_of(ty: TypeExpr) -> TypeDef {
        TypeDef::AliasOf(ty)
    }

    /// Parse the given string into a [`TypeExpr`] and define an alias to it.
    pub fn alias_of_str(ty: &str) -> Result<TypeDef, ParseError> {
        Ok(TypeDef::AliasOf(TypeExpr::parse(ty)?))
    }
}

/// A struct field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// The struct field name.
    pub name: String,
    /// The type of the field value.
    pub ty: TypeExpr,
}

impl Field {
    /// Construct a new field.
    pub fn new(name: impl Into<String>, ty: TypeExpr) -> Field {
        Field { name: name.into(), ty }
    }

    /// Construct a new field, parsing the type from a string.
    pub fn parse(name: impl Into<String>, ty: &str) -> Result<Field, ParseError> {
        Ok(Field { name: name.into(), ty: TypeExpr::parse(ty)? })
    }
}

/// An enum variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    /// The variant name.
    pub name: String,
    /// The type of the value this variant carries. Variants carrying
    /// nothing have the type `()`.
    pub ty: TypeExpr,
}

impl Variant {
    /// Construct a new variant.
    pub fn new(name: impl Into<String>, ty: TypeExpr) -> Variant {
        Variant { name: name.into(), ty }
    }

    /// Construct a new variant, parsing the type from a string.
    pub fn parse(name: impl Into<String>, ty: &str) -> Result<Variant, ParseError> {
        Ok(Variant { name: name.into(), ty: TypeExpr::parse(ty)? })
    }

    /// Construct a variant that carries no data.
    pub fn unit(name: impl Into<String>) -> Variant {
        Variant { name: name.into(), ty: TypeExpr::unit() }
    }

    /// Does this variant carry no data?
    pub fn is_unit(&self) -> bool {
        self.ty.is_unit()
    }
}
