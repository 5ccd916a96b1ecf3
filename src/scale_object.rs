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

//! This module provides a [`ScaleObject`], which ties together a type, some SCALE bytes
//! and the types needed to make sense of them.
//!
//! # Example
//!
//! ```rust
//! use scale_object::{ScaleObject, ScaleValue, TypeRegistry};
//!
//! let types = TypeRegistry::basic();
//! let bytes = [0x18, 0x48, 0x61, 0x6d, 0x6c, 0x65, 0x74];
//!
//! let mut obj = ScaleObject::new("String", &bytes[..], &types).unwrap();
//! assert_eq!(obj.decode().unwrap(), ScaleValue::Str("Hamlet".into()));
//! assert_eq!(obj.remaining(), 0);
//!
//! let encoded = obj.encode(&ScaleValue::Str("Hamlet".into())).unwrap();
//! assert_eq!(encoded, bytes);
//! ```

use crate::codec::{Codec, DEFAULT_MAX_DEPTH};
use crate::cursor::ByteCursor;
use crate::error::{Error, ErrorKind};
use crate::type_expr::TypeExpr;
use crate::type_registry::TypeLookup;
use crate::value::ScaleValue;
use alloc::borrow::Cow;
use alloc::vec::Vec;

/// A type and some bytes to decode as that type, along with the types used to resolve
/// any named types along the way. Each call to [`ScaleObject::decode()`] decodes the next
/// value from the bytes.
#[derive(Debug, Clone)]
pub struct ScaleObject<'b, R> {
    ty: TypeExpr,
    bytes: Cow<'b, [u8]>,
    offset: usize,
    types: R,
    max_depth: usize,
}

impl<'b, R: TypeLookup> ScaleObject<'b, R> {
    /// Parse the type name given and construct a new [`ScaleObject`] from it.
    /// Fails with [`ErrorKind::UnknownSyntax`] if the type name can't be parsed.
    /// Named types are only looked up when decoding or encoding.
    pub fn new(
        type_name: &str,
        bytes: impl Into<Cow<'b, [u8]>>,
        types: R,
    ) -> Result<Self, Error> {
        let ty = TypeExpr::parse(type_name)?;
        Ok(Self::from_type(ty, bytes, types))
    }

    /// Construct a new [`ScaleObject`] from an already parsed type.
    pub fn from_type(ty: TypeExpr, bytes: impl Into<Cow<'b, [u8]>>, types: R) -> Self {
        ScaleObject { ty, bytes: bytes.into(), offset: 0, types, max_depth: DEFAULT_MAX_DEPTH }
    }

    /// Configure how deeply nested types can be. See [`Codec::with_max_depth()`].
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The type that this object decodes and encodes.
    pub fn type_expr(&self) -> &TypeExpr {
        &self.ty
    }

    /// All of the bytes, including any that have already been decoded.
    pub fn data(&self) -> &[u8] {
        &self.bytes
    }

    /// The number of bytes that have not been decoded yet.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.offset
    }

    /// Go back to the start of the bytes.
    pub fn reset(&mut self) {
        self.offset = 0;
    }

    /// Decode the next value from the bytes. If this succeeds, the next call will carry on
    /// from where this one finished. If it fails, nothing is consumed.
    pub fn decode(&mut self) -> Result<ScaleValue, Error> {
        let bytes: &[u8] = &self.bytes;
        let mut cursor = ByteCursor::new(&bytes[self.offset..]);

        match self.codec().decode(&self.ty, &mut cursor) {
            Ok(value) => {
                self.offset += cursor.offset();
                Ok(value)
            }
            Err(e) => {
                tracing::debug!(ty = %self.ty, offset = self.offset, error = %e, "decoding failed");
                Err(e)
            }
        }
    }

    /// Decode the next value from the bytes, and fail with [`ErrorKind::TrailingBytes`]
    /// if any bytes are left over afterwards. If it fails, nothing is consumed.
    pub fn decode_all(&mut self) -> Result<ScaleValue, Error> {
        let offset = self.offset;
        let value = self.decode()?;

        let remaining = self.remaining();
        if remaining != 0 {
            self.offset = offset;
            return Err(Error::new(ErrorKind::TrailingBytes(remaining)));
        }
        Ok(value)
    }

    /// SCALE encode the given value as this object's type. The bytes and position of
    /// this object are left untouched.
    pub fn encode(&self, value: &ScaleValue) -> Result<Vec<u8>, Error> {
        self.codec().encode(value, &self.ty)
    }

    fn codec(&self) -> Codec<'_, R> {
        Codec::new(&self.types).with_max_depth(self.max_depth)
    }
}
