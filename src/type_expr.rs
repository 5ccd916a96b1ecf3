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

//! This module provides a [`TypeExpr`], which can be parsed from a type descriptor string like
//! `"Vec<u32>"` or `"(bool, [u8; 32])"` via [`TypeExpr::parse()`], and describes the type that
//! some bytes should be SCALE encoded or decoded as.

use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use smallstr::SmallString;

// Re-export errors in our public interface:
pub use parser::{ParseError, ParseErrorKind};

/// The names of types that we look up in a registry are generally short.
pub(crate) type NameStr = SmallString<[u8; 16]>;

/// A primitive type; every other type is eventually built up from these.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Bool,
    Str,
    U8,
    U16,
    U32,
    U64,
    U128,
    I8,
    I16,
    I32,
    I64,
    I128,
}

impl Primitive {
    /// The canonical name of this primitive.
    pub fn name(&self) -> &'static str {
        match self {
            Primitive::Bool => "bool",
            Primitive::Str => "str",
            Primitive::U8 => "u8",
            Primitive::U16 => "u16",
            Primitive::U32 => "u32",
            Primitive::U64 => "u64",
            Primitive::U128 => "u128",
            Primitive::I8 => "i8",
            Primitive::I16 => "i16",
            Primitive::I32 => "i32",
            Primitive::I64 => "i64",
            Primitive::I128 => "i128",
        }
    }

    /// The number of bits used to store this primitive, if it's an integer.
    pub fn bits(&self) -> Option<u16> {
        match self {
            Primitive::Bool | Primitive::Str => None,
            Primitive::U8 | Primitive::I8 => Some(8),
            Primitive::U16 | Primitive::I16 => Some(16),
            Primitive::U32 | Primitive::I32 => Some(32),
            Primitive::U64 | Primitive::I64 => Some(64),
            Primitive::U128 | Primitive::I128 => Some(128),
        }
    }

    /// Is this an unsigned integer type?
    pub fn is_unsigned(&self) -> bool {
        matches!(
            self,
            Primitive::U8 | Primitive::U16 | Primitive::U32 | Primitive::U64 | Primitive::U128
        )
    }

    /// Is this a signed integer type?
    pub fn is_signed(&self) -> bool {
        matches!(
            self,
            Primitive::I8 | Primitive::I16 | Primitive::I32 | Primitive::I64 | Primitive::I128
        )
    }
}

impl core::fmt::Display for Primitive {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// A parsed type descriptor. Use [`TypeExpr::parse()`] to parse a string into one.
///
/// # Example
///
/// ```rust
/// use scale_object::TypeExpr;
///
/// let sequence = TypeExpr::parse("vec<(bool, u32)>").unwrap();
/// let array = TypeExpr::parse("[u8; 32]").unwrap();
/// let option = TypeExpr::parse("Option<Compact<u64>>").unwrap();
/// let named = TypeExpr::parse("path::to::Foo").unwrap();
///
/// assert_eq!(array, TypeExpr::array(TypeExpr::named("u8"), 32));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeExpr {
    /// A primitive type. The parser never produces this; bare names like `u32` are
    /// [`TypeExpr::Named`] and resolve to primitives via the registry.
    Primitive(Primitive),
    /// A compact encoded unsigned integer, like `Compact<u32>`.
    Compact(Box<TypeExpr>),
    /// An optional value, like `Option<T>`.
    Option(Box<TypeExpr>),
    /// A length prefixed sequence of values, like `Vec<T>`.
    Vector(Box<TypeExpr>),
    /// A fixed length array of values, like `[T; 32]`.
    FixedArray(Box<TypeExpr>, usize),
    /// A tuple of values, like `(A, B, C)`. `()` is the empty tuple.
    Tuple(Vec<TypeExpr>),
    /// A type to look up by name in a registry, like `Foo` or `path::to::Bar`.
    Named(NameStr),
    /// A two armed outcome, like `Result<T, E>`.
    Result(Box<TypeExpr>, Box<TypeExpr>),
}

impl TypeExpr {
    /// Parse an input string into a [`TypeExpr`].
    pub fn parse(input: &str) -> Result<TypeExpr, ParseError> {
        use yap::{IntoTokens, TokenLocation, Tokens};
        let mut tokens = input.into_tokens();

        parser::skip_whitespace(&mut tokens);
        let expr = parser::parse_type_expr(&mut tokens)?;
        parser::skip_whitespace(&mut tokens);

        if tokens.peek().is_some() {
            let loc = tokens.location().offset();
            return Err(ParseError::new_at(ParseErrorKind::TrailingInput, loc));
        }
        Ok(expr)
    }

    /// Create a [`TypeExpr::Named`].
    pub fn named(name: &str) -> TypeExpr {
        TypeExpr::Named(NameStr::from_str(name))
    }

    /// Create a [`TypeExpr::Vector`].
    pub fn vector(inner: TypeExpr) -> TypeExpr {
        TypeExpr::Vector(Box::new(inner))
    }

    /// Create a [`TypeExpr::Option`].
    pub fn option(inner: TypeExpr) -> TypeExpr {
        TypeExpr::Option(Box::new(inner))
    }

    /// Create a [`TypeExpr::Compact`].
    pub fn compact(inner: TypeExpr) -> TypeExpr {
        TypeExpr::Compact(Box::new(inner))
    }

    /// Create a [`TypeExpr::FixedArray`].
    pub fn array(inner: TypeExpr, len: usize) -> TypeExpr {
        TypeExpr::FixedArray(Box::new(inner), len)
    }

    /// Create a [`TypeExpr::Tuple`].
    pub fn tuple(members: Vec<TypeExpr>) -> TypeExpr {
        TypeExpr::Tuple(members)
    }

    /// Create a [`TypeExpr::Result`].
    pub fn result(ok: TypeExpr, err: TypeExpr) -> TypeExpr {
        TypeExpr::Result(Box::new(ok), Box::new(err))
    }

    /// The empty tuple, `()`.
    pub fn unit() -> TypeExpr {
        TypeExpr::Tuple(Vec::new())
    }

    /// Is this the empty tuple, `()`?
    pub fn is_unit(&self) -> bool {
        matches!(self, TypeExpr::Tuple(members) if members.is_empty())
    }

    /// If this is a [`TypeExpr::Named`], return the name.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            TypeExpr::Named(name) => Some(name.as_str()),
            _ => None,
        }
    }
}

impl core::fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TypeExpr::Primitive(p) => write!(f, "{p}"),
            TypeExpr::Compact(inner) => write!(f, "Compact<{inner}>"),
            TypeExpr::Option(inner) => write!(f, "Option<{inner}>"),
            TypeExpr::Vector(inner) => write!(f, "Vec<{inner}>"),
            TypeExpr::FixedArray(inner, len) => write!(f, "[{inner}; {len}]"),
            TypeExpr::Tuple(members) => {
                f.write_str("(")?;
                for (idx, member) in members.iter().enumerate() {
                    if idx != 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{member}")?;
                }
                f.write_str(")")
            }
            TypeExpr::Named(name) => f.write_str(name),
            TypeExpr::Result(ok, err) => write!(f, "Result<{ok}, {err}>"),
        }
    }
}

impl core::str::FromStr for TypeExpr {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl core::convert::TryFrom<&str> for TypeExpr {
    type Error = ParseError;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl core::convert::TryFrom<String> for TypeExpr {
    type Error = ParseError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Primitive> for TypeExpr {
    fn from(p: Primitive) -> Self {
        TypeExpr::Primitive(p)
    }
}

impl serde::Serialize for TypeExpr {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for TypeExpr {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;
        let s = <Cow<'de, str>>::deserialize(deserializer)?;
        TypeExpr::parse(&s)
            .map_err(|e| D::Error::custom(format!("Could not deserialize into TypeExpr: {e}")))
    }
}

// Logic for parsing strings into type expressions.
mod parser {
    use super::*;
    use alloc::vec;
    use yap::{types::StrTokens, TokenLocation, Tokens};

    /// An error that can be emitted as the result of trying to parse a string into a [`TypeExpr`].
    #[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
    #[display(fmt = "Error parsing string into type expression at character {loc}: {err}")]
    pub struct ParseError {
        /// Index into the string denoting the position of the error.
        pub loc: usize,
        /// More information about the error.
        pub err: ParseErrorKind,
    }

    #[cfg(feature = "std")]
    impl std::error::Error for ParseError {}

    impl ParseError {
        /// Construct a new `ParseError` for tokens at the given location.
        pub fn new_at<E: Into<ParseErrorKind>>(err: E, loc: usize) -> Self {
            Self { loc, err: err.into() }
        }
    }

    /// The kind of error that happened attempting to parse a string into a [`TypeExpr`].
    #[allow(missing_docs)]
    #[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
    pub enum ParseErrorKind {
        #[display(fmt = "The string did not look like a type expression at all.")]
        InvalidName,
        #[display(fmt = "A closing `)` was missing when attempting to parse a tuple type.")]
        ClosingParenMissing,
        #[display(
            fmt = "A closing `>` was missing when attempting to parse the generics of a named type."
        )]
        ClosingAngleBracketMissing,
        #[display(fmt = "A closing `]` was missing when attempting to parse an array type.")]
        ClosingSquareBracketMissing,
        #[display(fmt = "A `;` was missing between the type and length of an array type.")]
        SemicolonMissing,
        #[display(fmt = "The length of the array is invalid; expecting an unsigned integer.")]
        InvalidUnsignedInt,
        #[display(fmt = "The length of the array must be greater than zero.")]
        ZeroLengthArray,
        #[display(fmt = "The type '{name}' does not accept generic parameters.")]
        UnexpectedParams { name: String },
        #[display(fmt = "The type '{name}' expects {expected} generic parameter(s) but got {actual}.")]
        WrongNumberOfParams { name: String, expected: usize, actual: usize },
        #[display(fmt = "Unexpected characters found after the type expression.")]
        TrailingInput,
    }

    pub fn parse_type_expr(input: &mut StrTokens<'_>) -> Result<TypeExpr, ParseError> {
        let loc = input.location();
        try_parse_type_expr(input)
            .unwrap_or_else(|| Err(ParseError::new_at(ParseErrorKind::InvalidName, loc.offset())))
    }

    fn try_parse_type_expr(input: &mut StrTokens<'_>) -> Option<Result<TypeExpr, ParseError>> {
        yap::one_of!(input;
            parse_tuple(input),
            parse_array(input),
            parse_named(input),
        )
    }

    // Parse a named type like vec<bool>, i32, Option<Foo>, path::to::Bar.
    fn parse_named(input: &mut StrTokens<'_>) -> Option<Result<TypeExpr, ParseError>> {
        let loc = input.location().offset();
        let name = parse_path(input);
        if name.is_empty() {
            return None;
        }

        skip_whitespace(input);
        if !input.token('<') {
            // No generics; this is just a name to look up later.
            return Some(Ok(TypeExpr::named(name)));
        }

        let params = match parse_comma_separated_type_exprs(input) {
            Ok(params) => params,
            Err(err) => return Some(Err(err)),
        };

        if !input.token('>') {
            let loc = input.location().offset();
            return Some(Err(ParseError::new_at(ParseErrorKind::ClosingAngleBracketMissing, loc)));
        }

        Some(apply_generic_params(name, params).map_err(|e| ParseError::new_at(e, loc)))
    }

    // Parse a tuple type like () or (bool, Foo, Vec<T>).
    fn parse_tuple(input: &mut StrTokens<'_>) -> Option<Result<TypeExpr, ParseError>> {
        if !input.token('(') {
            return None;
        }

        let members = match parse_comma_separated_type_exprs(input) {
            Ok(members) => members,
            Err(err) => return Some(Err(err)),
        };

        if !input.token(')') {
            let loc = input.location().offset();
            Some(Err(ParseError::new_at(ParseErrorKind::ClosingParenMissing, loc)))
        } else {
            Some(Ok(TypeExpr::Tuple(members)))
        }
    }

    // Parse a fixed length array like [Foo; 32].
    fn parse_array(input: &mut StrTokens<'_>) -> Option<Result<TypeExpr, ParseError>> {
        if !input.token('[') {
            return None;
        }

        skip_whitespace(input);
        let param = match parse_type_expr(input) {
            Ok(param) => param,
            Err(e) => return Some(Err(e)),
        };

        skip_whitespace(input);
        if !input.token(';') {
            let loc = input.location().offset();
            return Some(Err(ParseError::new_at(ParseErrorKind::SemicolonMissing, loc)));
        }
        skip_whitespace(input);

        let loc = input.location().offset();
        let length: usize =
            match input.take_while(|toks| toks.is_numeric()).parse::<usize, String>() {
                Ok(n) => n,
                Err(_) => {
                    return Some(Err(ParseError::new_at(ParseErrorKind::InvalidUnsignedInt, loc)))
                }
            };
        if length == 0 {
            return Some(Err(ParseError::new_at(ParseErrorKind::ZeroLengthArray, loc)));
        }

        skip_whitespace(input);
        if !input.token(']') {
            let loc = input.location().offset();
            Some(Err(ParseError::new_at(ParseErrorKind::ClosingSquareBracketMissing, loc)))
        } else {
            Some(Ok(TypeExpr::array(param, length)))
        }
    }

    // Parse a list of type expressions like Foo,Bar,usize. An empty list is allowed.
    fn parse_comma_separated_type_exprs(
        input: &mut StrTokens<'_>,
    ) -> Result<Vec<TypeExpr>, ParseError> {
        skip_whitespace(input);

        let mut params_iter = input.sep_by(
            |toks| try_parse_type_expr(toks),
            |toks| toks.surrounded_by(|toks| toks.token(','), |toks| skip_whitespace(toks)),
        );

        let mut params = Vec::new();
        for res in params_iter.as_iter() {
            params.push(res?);
        }

        skip_whitespace(input);
        // A trailing comma is allowed, but only after at least one type.
        if !params.is_empty() && input.token(',') {
            skip_whitespace(input);
        }

        Ok(params)
    }

    // The generic names we know how to turn into type expressions.
    enum Generic {
        Vec,
        Option,
        Compact,
        Result,
        Box,
        Map,
    }

    impl Generic {
        fn from_name(name: &str) -> Option<Generic> {
            let generic = match name {
                n if n.eq_ignore_ascii_case("vec") || n.eq_ignore_ascii_case("btreeset") => {
                    Generic::Vec
                }
                n if n.eq_ignore_ascii_case("option") => Generic::Option,
                n if n.eq_ignore_ascii_case("compact") => Generic::Compact,
                n if n.eq_ignore_ascii_case("result") || n.eq_ignore_ascii_case("results") => {
                    Generic::Result
                }
                n if n.eq_ignore_ascii_case("box") => Generic::Box,
                n if n.eq_ignore_ascii_case("btreemap") => Generic::Map,
                _ => return None,
            };
            Some(generic)
        }

        fn num_params(&self) -> usize {
            match self {
                Generic::Result | Generic::Map => 2,
                _ => 1,
            }
        }
    }

    // Turn something like `Vec` + `[u32]` into `TypeExpr::Vector(u32)`.
    fn apply_generic_params(
        name: &str,
        params: Vec<TypeExpr>,
    ) -> Result<TypeExpr, ParseErrorKind> {
        let Some(generic) = Generic::from_name(name) else {
            // Something like `Foo<>` is just a name, but `Foo<A>` is not something we know about.
            return if params.is_empty() {
                Ok(TypeExpr::named(name))
            } else {
                Err(ParseErrorKind::UnexpectedParams { name: name.to_string() })
            };
        };

        if params.len() != generic.num_params() {
            return Err(ParseErrorKind::WrongNumberOfParams {
                name: name.to_string(),
                expected: generic.num_params(),
                actual: params.len(),
            });
        }

        let mut params = params.into_iter();
        let mut next = || params.next().unwrap_or_else(TypeExpr::unit);

        let expr = match generic {
            Generic::Vec => TypeExpr::vector(next()),
            Generic::Option => TypeExpr::option(next()),
            Generic::Compact => TypeExpr::compact(next()),
            Generic::Box => next(),
            Generic::Result => {
                let ok = next();
                let err = next();
                TypeExpr::result(ok, err)
            }
            Generic::Map => {
                let key = next();
                let value = next();
                TypeExpr::vector(TypeExpr::Tuple(vec![key, value]))
            }
        };
        Ok(expr)
    }

    // Parse the name/path of a type like `Foo`` or `a::b::Foo`.
    fn parse_path<'a>(input: &mut StrTokens<'a>) -> &'a str {
        str_slice_from(input, |toks| {
            toks.sep_by(
                |t| {
                    // First char should exist and be a letter or underscore.
                    let first = t.peek()?;
                    if !first.is_alphabetic() && first != '_' {
                        return None;
                    }
                    // Rest can be letters, numbers or underscores.
                    t.skip_while(|c| c.is_alphanumeric() || *c == '_');
                    Some(())
                },
                |t| {
                    // Our separator is `::`.
                    t.tokens("::".chars())
                },
            )
            .consume();
        })
    }

    // Skip over any whitespace, ignoring it.
    pub fn skip_whitespace(input: &mut StrTokens<'_>) {
        input.skip_while(|t| t.is_whitespace());
    }

    // Return the string slice that encompasses the provided parsing function given.
    fn str_slice_from<'a, F>(input: &mut StrTokens<'a>, f: F) -> &'a str
    where
        F: FnOnce(&mut StrTokens<'a>),
    {
        let before = input.remaining();
        f(input);
        let leftover = input.remaining().len();

        &before[..before.len() - leftover]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use alloc::vec;

    fn expect_parse(input: &str) -> TypeExpr {
        match TypeExpr::parse(input) {
            Ok(expr) => expr,
            Err(e) => panic!("parsing '{input}' failed: {e}"),
        }
    }

    fn expect_parse_fail(input: &str) -> ParseErrorKind {
        match TypeExpr::parse(input) {
            Ok(expr) => panic!("parsing '{input}' is expected to have failed, but got {expr:?}"),
            Err(e) => e.err,
        }
    }

    fn n(name: &str) -> TypeExpr {
        TypeExpr::named(name)
    }

    #[test]
    fn parse_succeeds() {
        expect_parse("()");
        expect_parse("(Foo)");
        expect_parse("(Foo,)");
        expect_parse("(Foo, usize,    i32)");
        expect_parse("(a,b,c,)");

        expect_parse("path::to::Foo");
        expect_parse("Foo");
        expect_parse("Foo<>");
        expect_parse("my_type");
        expect_parse("  u32  ");

        expect_parse("[usize;32]");
        expect_parse("[a::b::Foo ;32]");
        expect_parse("[bool;    32]");
    }

    #[test]
    fn parse_fails() {
        // Numbers can't come first in identifiers.
        assert_eq!(expect_parse_fail("3thing"), ParseErrorKind::InvalidName);
        expect_parse_fail("(bool,3)");

        // Arrays need a positive number second.
        assert_eq!(expect_parse_fail("[usize; Foo]"), ParseErrorKind::InvalidUnsignedInt);
        assert_eq!(expect_parse_fail("[usize; 0]"), ParseErrorKind::ZeroLengthArray);
        assert_eq!(expect_parse_fail("[usize 3]"), ParseErrorKind::SemicolonMissing);

        // Brackets must be closed
        assert_eq!(expect_parse_fail("(Foo, Bar"), ParseErrorKind::ClosingParenMissing);
        assert_eq!(expect_parse_fail("[Foo; 32"), ParseErrorKind::ClosingSquareBracketMissing);
        assert_eq!(expect_parse_fail("Vec<A, B"), ParseErrorKind::ClosingAngleBracketMissing);

        // A lone comma isn't a list.
        assert_eq!(expect_parse_fail("(,)"), ParseErrorKind::ClosingParenMissing);
        assert_eq!(expect_parse_fail("Foo<,>"), ParseErrorKind::ClosingAngleBracketMissing);

        // Nothing may follow the type.
        assert_eq!(expect_parse_fail("u32 u64"), ParseErrorKind::TrailingInput);
        assert_eq!(expect_parse_fail(""), ParseErrorKind::InvalidName);
    }

    #[test]
    fn generic_params_are_checked() {
        assert_eq!(
            expect_parse_fail("Foo<u32>"),
            ParseErrorKind::UnexpectedParams { name: "Foo".into() }
        );
        assert_eq!(
            expect_parse_fail("Vec<u32, u64>"),
            ParseErrorKind::WrongNumberOfParams { name: "Vec".into(), expected: 1, actual: 2 }
        );
        assert_eq!(
            expect_parse_fail("Result<u32>"),
            ParseErrorKind::WrongNumberOfParams { name: "Result".into(), expected: 2, actual: 1 }
        );
    }

    #[test]
    fn keywords_are_case_insensitive() {
        assert_eq!(expect_parse("vec<u32>"), TypeExpr::vector(n("u32")));
        assert_eq!(expect_parse("Vec<u32>"), TypeExpr::vector(n("u32")));
        assert_eq!(expect_parse("option<Bool>"), TypeExpr::option(n("Bool")));
        assert_eq!(expect_parse("Compact<u32>"), TypeExpr::compact(n("u32")));
        assert_eq!(expect_parse("compact<u32>"), TypeExpr::compact(n("u32")));
        assert_eq!(
            expect_parse("Results<u32,string>"),
            TypeExpr::result(n("u32"), n("string"))
        );
    }

    #[test]
    fn parses_into_expected_shape() {
        assert_eq!(expect_parse("Foo"), n("Foo"));
        assert_eq!(expect_parse("Foo<>"), n("Foo"));
        assert_eq!(expect_parse("my_type_2"), n("my_type_2"));
        assert_eq!(expect_parse("_private::Inner_1"), n("_private::Inner_1"));
        assert_eq!(expect_parse("()"), TypeExpr::unit());
        assert_eq!(expect_parse("(u32, )"), TypeExpr::tuple(vec![n("u32")]));
        assert_eq!(expect_parse("(u32,u32)"), TypeExpr::tuple(vec![n("u32"), n("u32")]));
        assert_eq!(expect_parse("[u32; 6]"), TypeExpr::array(n("u32"), 6));
        assert_eq!(expect_parse("Box<Foo>"), n("Foo"));
        assert_eq!(
            expect_parse("BTreeMap<u8, string>"),
            TypeExpr::vector(TypeExpr::tuple(vec![n("u8"), n("string")]))
        );
    }

    #[test]
    fn parsing_complex_nested_type_works() {
        let expr = expect_parse("Vec<(Option<Result<[(u8, Bar);12],Compact<u64>>>,bool)>");
        let expected = TypeExpr::vector(TypeExpr::tuple(vec![
            TypeExpr::option(TypeExpr::result(
                TypeExpr::array(TypeExpr::tuple(vec![n("u8"), n("Bar")]), 12),
                TypeExpr::compact(n("u64")),
            )),
            n("bool"),
        ]));
        assert_eq!(expr, expected);
    }

    #[test]
    fn displaying_types_works() {
        let type_strs = [
            "u32",
            "Foo",
            "a::b::Foo",
            "Vec<u32>",
            "Option<Compact<u64>>",
            "Result<u32, String>",
            "[u8; 32]",
            "[Vec<A>; 32]",
            "()",
            "(A, B, C)",
            "Vec<(A, [u8; 32], Option<T>)>",
        ];

        for type_str in type_strs {
            let expr = TypeExpr::parse(type_str).unwrap();
            assert_eq!(expr.to_string(), type_str);
        }
    }

    #[test]
    fn serde_uses_the_string_form() {
        let expr: TypeExpr = serde_json::from_str(r#""vec<(u8, bool)>""#).unwrap();
        assert_eq!(expr, TypeExpr::vector(TypeExpr::tuple(vec![n("u8"), n("bool")])));
        assert_eq!(serde_json::to_string(&expr).unwrap(), r#""Vec<(u8, bool)>""#);

        let err = serde_json::from_str::<TypeExpr>(r#""Vec<""#);
        assert!(err.is_err());
    }
}
