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

//! An error that is emitted whenever some encoding, decoding or type registration fails.

use crate::type_expr::{ParseError, Primitive};
use crate::type_registry::DefinitionError;
use crate::value::Kind;
use alloc::string::String;
use alloc::vec::Vec;
use smallvec::SmallVec;

/// An error produced while attempting to encode or decode some value, or register some types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    context: Context,
    kind: ErrorKind,
}

impl Error {
    /// Construct a new error given an error kind.
    pub fn new(kind: ErrorKind) -> Error {
        Error { context: Context::new(), kind }
    }
    /// Retrieve more information about what went wrong.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
    /// Retrieve details about where the error occurred.
    pub fn context(&self) -> &Context {
        &self.context
    }
    /// Give some context to the error.
    pub fn at(mut self, loc: Location) -> Self {
        self.context.push(loc);
        self
    }
    /// Note which sequence index the error occurred in.
    pub fn at_idx(self, idx: usize) -> Self {
        self.at(Location::Index(idx))
    }
    /// Note which field the error occurred in.
    pub fn at_field(self, field: impl Into<String>) -> Self {
        self.at(Location::Field(field.into()))
    }
    /// Note which variant the error occurred in.
    pub fn at_variant(self, variant: impl Into<String>) -> Self {
        self.at(Location::Variant(variant.into()))
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error::new(kind)
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Error::new(ErrorKind::UnknownSyntax(err))
    }
}

impl From<DefinitionError> for Error {
    fn from(err: DefinitionError) -> Self {
        Error::new(ErrorKind::DuplicateOrInvalidDefinition(err))
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let kind = &self.kind;
        if self.context.is_empty() {
            write!(f, "{kind}")
        } else {
            let path = &self.context;
            write!(f, "Error at {path}: {kind}")
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// The underlying nature of the error.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ErrorKind {
    /// The input ran out before a value could be fully read.
    #[display(fmt = "Not enough data: needed {needed} byte(s) but only {remaining} remain")]
    OutOfData {
        /// Number of bytes that we tried to read.
        needed: usize,
        /// Number of bytes that were left in the input.
        remaining: usize,
    },
    /// The bytes are not a valid encoding of the expected type.
    #[display(fmt = "Invalid encoding: {_0}")]
    InvalidEncoding(InvalidEncoding),
    /// An enum or result tag doesn't correspond to any known variant.
    #[display(fmt = "Variant tag {tag} is out of range; the type has {variants} variant(s)")]
    UnknownVariantTag {
        /// The tag byte that was read.
        tag: u8,
        /// How many variants the type has.
        variants: usize,
    },
    /// The number of values given doesn't line up with the tuple or array length.
    #[display(fmt = "Expected {expected} value(s) but got {actual}")]
    ArityMismatch {
        /// Length of the target type.
        expected: usize,
        /// Length of the value provided.
        actual: usize,
    },
    /// A struct field was not provided in the value being encoded.
    #[display(fmt = "Field '{_0}' is missing from the value being encoded")]
    MissingField(String),
    /// The value being encoded as an enum did not name exactly one known variant.
    #[display(fmt = "Expected exactly one known variant name but got {names:?}")]
    AmbiguousOrMissingVariant {
        /// The variant names that were provided.
        names: Vec<String>,
    },
    /// The named type could not be found in the registry.
    #[display(fmt = "Type '{_0}' not found")]
    UnknownType(String),
    /// The type descriptor string could not be parsed.
    #[display(fmt = "{_0}")]
    UnknownSyntax(ParseError),
    /// A number cannot be represented by the target type.
    #[display(fmt = "Number {value} is out of range for type {ty}")]
    ValueOutOfRange {
        /// A string representation of the numeric value that was out of range.
        value: String,
        /// The type we tried to fit the number into.
        ty: Primitive,
    },
    /// A string did not contain valid UTF-8.
    #[display(fmt = "String bytes are not valid UTF-8")]
    InvalidUtf8,
    /// `Compact<T>` was used with a type that is not an unsigned integer.
    #[display(fmt = "Cannot compact encode type '{_0}'; expected an unsigned integer")]
    UnsupportedCompactTarget(String),
    /// The type is nested (or aliased) too deeply, which is usually down to a recursive definition.
    #[display(fmt = "Type nesting exceeded the maximum depth of {_0}")]
    RecursionLimitExceeded(usize),
    /// A batch of type definitions could not be registered.
    #[display(fmt = "Cannot register types: {_0}")]
    DuplicateOrInvalidDefinition(DefinitionError),
    /// The value being encoded does not have the shape that the type expects.
    #[display(fmt = "Cannot encode {actual} value into type '{expected}'")]
    WrongShape {
        /// The kind of value we were given.
        actual: Kind,
        /// The type we tried to encode it as.
        expected: String,
    },
    /// Bytes were left over after decoding a value.
    #[display(fmt = "{_0} byte(s) were left over after decoding")]
    TrailingBytes(usize),
}

/// More detail about why some bytes are not a valid encoding.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum InvalidEncoding {
    #[display(fmt = "bool must be 0x00 or 0x01 but got {_0:#04x}")]
    Bool(u8),
    #[display(fmt = "Option tag must be 0x00 or 0x01 but got {_0:#04x}")]
    OptionTag(u8),
    #[display(fmt = "Option<bool> must be 0x00, 0x01 or 0x02 but got {_0:#04x}")]
    OptionBool(u8),
    #[display(fmt = "compact integer is not in its smallest form")]
    NonCanonicalCompact,
    #[display(fmt = "compact integer of {_0} bytes is too large")]
    CompactTooLarge(usize),
    #[display(fmt = "sequence of {_0} zero sized items is longer than the limit of {_1}")]
    TooManyZeroSizedItems(u128, usize),
}

/// Tracks the location (field, index or variant) at which an error occurred.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct Context {
    // Locations are pushed as the error bubbles up, so the innermost comes first.
    path: SmallVec<[Location; 4]>,
}

impl Context {
    /// Construct a new, empty context.
    pub fn new() -> Context {
        Default::default()
    }
    /// Add a location to the context. This should be the location enclosing any
    /// locations already added.
    pub fn push(&mut self, loc: Location) {
        self.path.push(loc);
    }
    /// Is this context empty?
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
    /// Return each location visited, outermost first.
    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.path.iter().rev()
    }
}

impl core::fmt::Display for Context {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for (idx, loc) in self.locations().enumerate() {
            if idx != 0 {
                f.write_str(".")?;
            }
            match loc {
                Location::Field(name) => f.write_str(name)?,
                Location::Index(i) => write!(f, "[{i}]")?,
                Location::Variant(name) => write!(f, "({name})")?,
            }
        }
        Ok(())
    }
}

/// Some location, like a field, variant or index in an array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// A struct field.
    Field(String),
    /// A tuple, array or sequence index.
    Index(usize),
    /// An enum variant.
    Variant(String),
}

#[cfg(test)]
mod test {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    #[test]
    fn display_includes_path_outermost_first() {
        let err = Error::new(ErrorKind::MissingField("other".into()))
            .at_idx(2)
            .at_variant("Foo")
            .at_field("data");

        let locs: Vec<_> = err.context().locations().cloned().collect();
        assert_eq!(
            locs,
            vec![
                Location::Field("data".into()),
                Location::Variant("Foo".into()),
                Location::Index(2)
            ]
        );
        assert_eq!(
            err.to_string(),
            "Error at data.(Foo).[2]: Field 'other' is missing from the value being encoded"
        );
    }

    #[test]
    fn display_without_path_is_just_the_kind() {
        let err = Error::new(ErrorKind::TrailingBytes(3));
        assert_eq!(err.to_string(), "3 byte(s) were left over after decoding");
    }
}
