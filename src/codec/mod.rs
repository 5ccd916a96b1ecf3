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

//! This module provides a [`Codec`], which SCALE decodes bytes into [`crate::ScaleValue`]s
//! and encodes [`crate::ScaleValue`]s into bytes, given a [`TypeExpr`] describing the shape
//! of the data and something implementing [`TypeLookup`] to resolve any named types.
//!
//! # Example
//!
//! ```rust
//! use scale_object::{ByteCursor, Codec, ScaleValue, TypeExpr, TypeRegistry};
//!
//! let types = TypeRegistry::basic();
//! let codec = Codec::new(&types);
//! let ty = TypeExpr::parse("(u32, Compact<u64>)").unwrap();
//!
//! let value = ScaleValue::seq([10u32.into(), ScaleValue::Int(2, 64)]);
//! let bytes = codec.encode(&value, &ty).unwrap();
//! assert_eq!(bytes, vec![10, 0, 0, 0, 8]);
//!
//! let decoded = codec.decode(&ty, &mut ByteCursor::new(&bytes)).unwrap();
//! assert_eq!(decoded, value);
//! ```

mod decode;
mod encode;

use crate::error::{Error, ErrorKind};
use crate::type_def::{Field, TypeDef, Variant};
use crate::type_expr::{Primitive, TypeExpr};
use crate::type_registry::TypeLookup;
use alloc::string::ToString;

/// The default limit on how deeply types can be nested, counting each alias that is
/// followed as one level.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// The most items that a vector of zero sized things (like `Vec<()>`) can decode into.
/// The input doesn't limit these, since they take up no bytes.
pub const MAX_ZERO_SIZED_ITEMS: usize = 1 << 16;

/// SCALE encode and decode values according to some type expression. Named types
/// are resolved using the [`TypeLookup`] given.
#[derive(Debug)]
pub struct Codec<'r, R: ?Sized> {
    types: &'r R,
    max_depth: usize,
}

impl<'r, R: ?Sized> Clone for Codec<'r, R> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<'r, R: ?Sized> Copy for Codec<'r, R> {}

impl<'r, R: TypeLookup + ?Sized> Codec<'r, R> {
    /// Create a new codec which resolves named types using the given types.
    pub fn new(types: &'r R) -> Self {
        Codec { types, max_depth: DEFAULT_MAX_DEPTH }
    }

    /// Configure how deeply nested types can be before encoding or decoding gives up
    /// with [`ErrorKind::RecursionLimitExceeded`]. Defaults to [`DEFAULT_MAX_DEPTH`].
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The configured maximum depth.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    fn check_depth(&self, depth: usize) -> Result<(), Error> {
        if depth > self.max_depth {
            Err(Error::new(ErrorKind::RecursionLimitExceeded(self.max_depth)))
        } else {
            Ok(())
        }
    }

    // Work out the shape of some type, following any aliases. Each alias followed
    // counts towards the depth.
    fn resolve<'a>(&self, mut ty: &'a TypeExpr, depth: &mut usize) -> Result<Shape<'a>, Error>
    where
        'r: 'a,
    {
        let types: &'r R = self.types;
        loop {
            self.check_depth(*depth)?;
            let shape = match ty {
                TypeExpr::Primitive(p) => Shape::Primitive(*p),
                TypeExpr::Compact(inner) => Shape::Compact(inner),
                TypeExpr::Option(inner) => Shape::Option(inner),
                TypeExpr::Vector(inner) => Shape::Vector(inner),
                TypeExpr::FixedArray(inner, len) => Shape::FixedArray(inner, *len),
                TypeExpr::Tuple(members) => Shape::Tuple(members),
                TypeExpr::Result(ok, err) => Shape::Result(ok, err),
                TypeExpr::Named(name) => match types.lookup(name) {
                    None => return Err(Error::new(ErrorKind::UnknownType(name.to_string()))),
                    Some(TypeDef::Primitive(p)) => Shape::Primitive(*p),
                    Some(TypeDef::StructOf(fields)) => Shape::Struct(fields),
                    Some(TypeDef::EnumOf(variants)) => Shape::Enum(variants),
                    Some(TypeDef::AliasOf(alias)) => {
                        tracing::trace!(name = name.as_str(), alias = %alias, "following type alias");
                        ty = alias;
                        *depth += 1;
                        continue;
                    }
                },
            };
            return Ok(shape);
        }
    }

    // Compact encoding only works for unsigned integers; find out which one.
    fn compact_target(&self, inner: &TypeExpr, depth: &mut usize) -> Result<Primitive, Error> {
        match self.resolve(inner, depth)? {
            Shape::Primitive(p) if p.is_unsigned() => Ok(p),
            _ => Err(Error::new(ErrorKind::UnsupportedCompactTarget(inner.to_string()))),
        }
    }
}

// The resolved shape of a type, one level deep.
#[derive(Debug, Clone, Copy)]
enum Shape<'a> {
    Primitive(Primitive),
    Compact(&'a TypeExpr),
    Option(&'a TypeExpr),
    Vector(&'a TypeExpr),
    FixedArray(&'a TypeExpr, usize),
    Tuple(&'a [TypeExpr]),
    Result(&'a TypeExpr, &'a TypeExpr),
    Struct(&'a [Field]),
    Enum(&'a [Variant]),
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::cursor::ByteCursor;
    use crate::test_utils::{bytes, types_with};
    use crate::value::ScaleValue;
    use alloc::vec;

    fn n(name: &str) -> TypeExpr {
        TypeExpr::named(name)
    }

    #[test]
    fn aliases_are_followed() {
        let types = types_with([
            ("A", TypeDef::alias_of(n("B"))),
            ("B", TypeDef::alias_of(TypeExpr::vector(n("Balance")))),
            ("Balance", TypeDef::alias_of(n("u16"))),
        ]);
        let codec = Codec::new(&types);

        let value = codec.decode(&n("A"), &mut ByteCursor::new(&bytes("080100ffff"))).unwrap();
        assert_eq!(value, ScaleValue::seq([1u16.into(), u16::MAX.into()]));
    }

    #[test]
    fn unknown_types_are_reported() {
        let types = types_with([("Foo", TypeDef::struct_of([("inner", n("Missing"))]))]);
        let codec = Codec::new(&types);

        let err = codec.decode(&n("Foo"), &mut ByteCursor::new(&[0])).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::UnknownType("Missing".into()));
        assert_eq!(err.context().to_string(), "inner");

        let err = codec.encode(&ScaleValue::Bool(true), &n("Nope")).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::UnknownType("Nope".into()));
    }

    #[test]
    fn recursive_aliases_hit_the_depth_limit() {
        let types = types_with([
            ("Loop", TypeDef::alias_of(n("Pool"))),
            ("Pool", TypeDef::alias_of(n("Loop"))),
        ]);
        let codec = Codec::new(&types).with_max_depth(16);

        let err = codec.decode(&n("Loop"), &mut ByteCursor::new(&[0])).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::RecursionLimitExceeded(16));

        let err = codec.encode(&ScaleValue::Bool(true), &n("Loop")).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::RecursionLimitExceeded(16));
    }

    #[test]
    fn recursive_types_decode_until_the_depth_limit() {
        let types = types_with([(
            "List",
            TypeDef::enum_of([
                ("Nil", TypeExpr::unit()),
                ("Cons", TypeExpr::tuple(vec![n("u8"), n("List")])),
            ]),
        )]);

        // Cons(1, Cons(2, Nil))
        let input = bytes("0101010200");
        let value = Codec::new(&types).decode(&n("List"), &mut ByteCursor::new(&input)).unwrap();
        let nil = ScaleValue::variant("Nil", ScaleValue::unit());
        let two = ScaleValue::variant("Cons", ScaleValue::seq([2u8.into(), nil]));
        let one = ScaleValue::variant("Cons", ScaleValue::seq([1u8.into(), two]));
        assert_eq!(value, one);

        // Each Cons nests the next list two levels deeper, so a small limit trips.
        let deep: alloc::vec::Vec<u8> = [1u8, 0].repeat(20).into_iter().chain([0]).collect();
        let codec = Codec::new(&types).with_max_depth(10);
        let err = codec.decode(&n("List"), &mut ByteCursor::new(&deep)).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::RecursionLimitExceeded(10));
    }

    #[test]
    fn compact_needs_an_unsigned_integer() {
        let types = types_with([("Balance", TypeDef::alias_of(n("u128")))]);
        let codec = Codec::new(&types);

        let value =
            codec.decode(&TypeExpr::compact(n("Balance")), &mut ByteCursor::new(&[8])).unwrap();
        assert_eq!(value, ScaleValue::Int(2, 128));

        for bad in ["Compact<bool>", "Compact<i32>", "Compact<(u8, u8)>", "Compact<Vec<u8>>"] {
            let ty = TypeExpr::parse(bad).unwrap();
            let err = codec.decode(&ty, &mut ByteCursor::new(&[8])).unwrap_err();
            assert!(matches!(err.kind(), ErrorKind::UnsupportedCompactTarget(_)), "{bad}");
            let err = codec.encode(&ScaleValue::Int(2, 8), &ty).unwrap_err();
            assert!(matches!(err.kind(), ErrorKind::UnsupportedCompactTarget(_)), "{bad}");
        }
    }
}
