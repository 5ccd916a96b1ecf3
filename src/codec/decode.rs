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

use super::{Codec, Shape, MAX_ZERO_SIZED_ITEMS};
use crate::compact::decode_compact;
use crate::cursor::ByteCursor;
use crate::error::{Error, ErrorKind, InvalidEncoding};
use crate::type_def::{Field, Variant};
use crate::type_expr::{Primitive, TypeExpr};
use crate::type_registry::TypeLookup;
use crate::value::ScaleValue;
use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

impl<'r, R: TypeLookup + ?Sized> Codec<'r, R> {
    /// Decode a value of the given type from the cursor.
    ///
    /// On success, the cursor is left pointing just after the decoded value. On failure, it
    /// may have been advanced part of the way through the value.
    pub fn decode(&self, ty: &TypeExpr, input: &mut ByteCursor<'_>) -> Result<ScaleValue, Error> {
        self.decode_value(ty, input, 0)
    }

    fn decode_value(
        &self,
        ty: &TypeExpr,
        input: &mut ByteCursor<'_>,
        mut depth: usize,
    ) -> Result<ScaleValue, Error> {
        let shape = self.resolve(ty, &mut depth)?;
        self.decode_shape(shape, input, depth)
    }

    fn decode_shape(
        &self,
        shape: Shape<'_>,
        input: &mut ByteCursor<'_>,
        mut depth: usize,
    ) -> Result<ScaleValue, Error> {
        match shape {
            Shape::Primitive(p) => decode_primitive(p, input),
            Shape::Compact(inner) => {
                let target = self.compact_target(inner, &mut depth)?;
                let value = decode_compact(input)?;
                let bits = target.bits().unwrap_or(128);
                if bits < 128 && value >> bits != 0 {
                    return Err(Error::new(ErrorKind::ValueOutOfRange {
                        value: value.to_string(),
                        ty: target,
                    }));
                }
                Ok(ScaleValue::Int(value, bits))
            }
            Shape::Option(inner) => {
                let inner_shape = self.resolve(inner, &mut depth)?;
                let tag = input.take_byte()?;

                // Option<bool> packs the bool into the tag byte.
                if let Shape::Primitive(Primitive::Bool) = inner_shape {
                    return match tag {
                        0 => Ok(ScaleValue::none()),
                        1 => Ok(ScaleValue::some(ScaleValue::Bool(true))),
                        2 => Ok(ScaleValue::some(ScaleValue::Bool(false))),
                        b => Err(Error::new(ErrorKind::InvalidEncoding(
                            InvalidEncoding::OptionBool(b),
                        ))),
                    };
                }

                match tag {
                    0 => Ok(ScaleValue::none()),
                    1 => Ok(ScaleValue::some(self.decode_shape(inner_shape, input, depth + 1)?)),
                    b => Err(Error::new(ErrorKind::InvalidEncoding(InvalidEncoding::OptionTag(b)))),
                }
            }
            Shape::Vector(inner) => {
                let len = decode_compact(input)?;
                let len = if self.is_zero_sized(inner, depth + 1)? {
                    // Nothing in the input bounds these, so a fixed limit applies.
                    match usize::try_from(len) {
                        Ok(len) if len <= MAX_ZERO_SIZED_ITEMS => len,
                        _ => {
                            return Err(Error::new(ErrorKind::InvalidEncoding(
                                InvalidEncoding::TooManyZeroSizedItems(len, MAX_ZERO_SIZED_ITEMS),
                            )))
                        }
                    }
                } else {
                    // Every item takes at least one byte.
                    let remaining = input.remaining();
                    match usize::try_from(len) {
                        Ok(len) if len <= remaining => len,
                        _ => {
                            let needed = usize::try_from(len).unwrap_or(usize::MAX);
                            return Err(Error::new(ErrorKind::OutOfData { needed, remaining }));
                        }
                    }
                };
                self.decode_sequence(core::iter::repeat(inner), len, input, depth)
            }
            Shape::FixedArray(inner, len) => {
                self.decode_sequence(core::iter::repeat(inner), len, input, depth)
            }
            Shape::Tuple(members) => {
                self.decode_sequence(members.iter(), members.len(), input, depth)
            }
            Shape::Struct(fields) => self.decode_struct(fields, input, depth),
            Shape::Enum(variants) => self.decode_enum(variants, input, depth),
            Shape::Result(ok, err) => {
                let tag = input.take_byte()?;
                match tag {
                    0 => {
                        let value = self
                            .decode_value(ok, input, depth + 1)
                            .map_err(|e| e.at_variant("Ok"))?;
                        Ok(ScaleValue::ok(value))
                    }
                    1 => {
                        let value = self
                            .decode_value(err, input, depth + 1)
                            .map_err(|e| e.at_variant("Err"))?;
                        Ok(ScaleValue::err(value))
                    }
                    tag => Err(Error::new(ErrorKind::UnknownVariantTag { tag, variants: 2 })),
                }
            }
        }
    }

    // Zero sized types encode to no bytes at all: unit tuples, structs with only zero
    // sized fields and arrays of zero sized things.
    fn is_zero_sized(&self, ty: &TypeExpr, mut depth: usize) -> Result<bool, Error> {
        let zero_sized = match self.resolve(ty, &mut depth)? {
            Shape::FixedArray(inner, _) => self.is_zero_sized(inner, depth + 1)?,
            Shape::Tuple(members) => {
                for member in members {
                    if !self.is_zero_sized(member, depth + 1)? {
                        return Ok(false);
                    }
                }
                true
            }
            Shape::Struct(fields) => {
                for field in fields {
                    if !self.is_zero_sized(&field.ty, depth + 1)? {
                        return Ok(false);
                    }
                }
                true
            }
            _ => false,
        };
        Ok(zero_sized)
    }

    // Decode `len` values, one of each type handed back by `tys`.
    fn decode_sequence<'t>(
        &self,
        tys: impl Iterator<Item = &'t TypeExpr>,
        len: usize,
        input: &mut ByteCursor<'_>,
        depth: usize,
    ) -> Result<ScaleValue, Error> {
        // The capacity is capped by the input, since the length can't be trusted.
        let mut values = Vec::with_capacity(len.min(input.remaining()));
        for (idx, ty) in tys.take(len).enumerate() {
            let value = self.decode_value(ty, input, depth + 1).map_err(|e| e.at_idx(idx))?;
            values.push(value);
        }
        Ok(ScaleValue::Seq(values))
    }

    fn decode_struct(
        &self,
        fields: &[Field],
        input: &mut ByteCursor<'_>,
        depth: usize,
    ) -> Result<ScaleValue, Error> {
        let mut values = Vec::with_capacity(fields.len());
        for field in fields {
            let value = self
                .decode_value(&field.ty, input, depth + 1)
                .map_err(|e| e.at_field(field.name.as_str()))?;
            values.push((field.name.clone(), value));
        }
        Ok(ScaleValue::Struct(values))
    }

    fn decode_enum(
        &self,
        variants: &[Variant],
        input: &mut ByteCursor<'_>,
        depth: usize,
    ) -> Result<ScaleValue, Error> {
        let tag = input.take_byte()?;
        let Some(variant) = variants.get(usize::from(tag)) else {
            return Err(Error::new(ErrorKind::UnknownVariantTag { tag, variants: variants.len() }));
        };
        let value = self
            .decode_value(&variant.ty, input, depth + 1)
            .map_err(|e| e.at_variant(variant.name.as_str()))?;
        Ok(ScaleValue::Variant(variant.name.clone(), Box::new(value)))
    }
}

fn decode_primitive(p: Primitive, input: &mut ByteCursor<'_>) -> Result<ScaleValue, Error> {
    macro_rules! int {
        ($variant:ident, $ty:ty) => {{
            let n = <$ty>::from_le_bytes(input.take_array()?);
            ScaleValue::$variant(n.into(), <$ty>::BITS as u16)
        }};
    }

    let value = match p {
        Primitive::Bool => match input.take_byte()? {
            0 => ScaleValue::Bool(false),
            1 => ScaleValue::Bool(true),
            b => return Err(Error::new(ErrorKind::InvalidEncoding(InvalidEncoding::Bool(b)))),
        },
        Primitive::Str => ScaleValue::Str(decode_str(input)?),
        Primitive::U8 => int!(Int, u8),
        Primitive::U16 => int!(Int, u16),
        Primitive::U32 => int!(Int, u32),
        Primitive::U64 => int!(Int, u64),
        Primitive::U128 => int!(Int, u128),
        Primitive::I8 => int!(SignedInt, i8),
        Primitive::I16 => int!(SignedInt, i16),
        Primitive::I32 => int!(SignedInt, i32),
        Primitive::I64 => int!(SignedInt, i64),
        Primitive::I128 => int!(SignedInt, i128),
    };
    Ok(value)
}

fn decode_str(input: &mut ByteCursor<'_>) -> Result<String, Error> {
    let len = decode_compact(input)?;
    let remaining = input.remaining();
    let len = usize::try_from(len)
        .map_err(|_| Error::new(ErrorKind::OutOfData { needed: usize::MAX, remaining }))?;
    let bytes = input.take_bytes(len)?;
    let s = core::str::from_utf8(bytes).map_err(|_| Error::new(ErrorKind::InvalidUtf8))?;
    Ok(s.to_string())
}
