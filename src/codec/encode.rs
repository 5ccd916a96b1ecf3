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

use super::{Codec, Shape};
use crate::compact::encode_compact;
use crate::cursor::ByteBuffer;
use crate::error::{Error, ErrorKind};
use crate::type_def::{Field, Variant};
use crate::type_expr::{Primitive, TypeExpr};
use crate::type_registry::TypeLookup;
use crate::value::ScaleValue;
use alloc::string::ToString;
use alloc::vec;
use alloc::vec::Vec;

impl<'r, R: TypeLookup + ?Sized> Codec<'r, R> {
    /// SCALE encode a value as the given type, handing back the bytes.
    pub fn encode(&self, value: &ScaleValue, ty: &TypeExpr) -> Result<Vec<u8>, Error> {
        let mut out = ByteBuffer::new();
        self.encode_to(value, ty, &mut out)?;
        Ok(out.into_inner())
    }

    /// SCALE encode a value as the given type, appending the bytes to the buffer given.
    /// If this fails, some bytes may have been written to the buffer already.
    pub fn encode_to(
        &self,
        value: &ScaleValue,
        ty: &TypeExpr,
        out: &mut ByteBuffer,
    ) -> Result<(), Error> {
        self.encode_value(value, ty, out, 0)
    }

    fn encode_value(
        &self,
        value: &ScaleValue,
        ty: &TypeExpr,
        out: &mut ByteBuffer,
        mut depth: usize,
    ) -> Result<(), Error> {
        let shape = self.resolve(ty, &mut depth)?;
        self.encode_shape(value, shape, ty, out, depth)
    }

    // `ty` is the type that `shape` was resolved from, for error messages.
    fn encode_shape(
        &self,
        value: &ScaleValue,
        shape: Shape<'_>,
        ty: &TypeExpr,
        out: &mut ByteBuffer,
        mut depth: usize,
    ) -> Result<(), Error> {
        match shape {
            Shape::Primitive(p) => encode_primitive(value, p, ty, out),
            Shape::Compact(inner) => {
                let target = self.compact_target(inner, &mut depth)?;
                encode_compact(unsigned_value(value, target, ty)?, out);
                Ok(())
            }
            Shape::Option(inner) => {
                let ScaleValue::Maybe(maybe) = value else {
                    return Err(wrong_shape(value, ty));
                };
                let inner_shape = self.resolve(inner, &mut depth)?;
                match (maybe, inner_shape) {
                    (None, _) => out.push_byte(0),
                    // Option<bool> packs the bool into the tag byte.
                    (Some(v), Shape::Primitive(Primitive::Bool)) => match &**v {
                        ScaleValue::Bool(true) => out.push_byte(1),
                        ScaleValue::Bool(false) => out.push_byte(2),
                        other => return Err(wrong_shape(other, inner)),
                    },
                    (Some(v), inner_shape) => {
                        out.push_byte(1);
                        self.encode_shape(v, inner_shape, inner, out, depth + 1)?;
                    }
                }
                Ok(())
            }
            Shape::Vector(inner) => {
                let ScaleValue::Seq(values) = value else {
                    return Err(wrong_shape(value, ty));
                };
                encode_compact(values.len() as u128, out);
                self.encode_sequence(values, core::iter::repeat(inner), out, depth)
            }
            Shape::FixedArray(inner, len) => {
                let ScaleValue::Seq(values) = value else {
                    return Err(wrong_shape(value, ty));
                };
                check_arity(len, values.len())?;
                self.encode_sequence(values, core::iter::repeat(inner), out, depth)
            }
            Shape::Tuple(members) => {
                let ScaleValue::Seq(values) = value else {
                    return Err(wrong_shape(value, ty));
                };
                check_arity(members.len(), values.len())?;
                self.encode_sequence(values, members.iter(), out, depth)
            }
            Shape::Struct(fields) => self.encode_struct(value, fields, ty, out, depth),
            Shape::Enum(variants) => self.encode_enum(value, variants, ty, out, depth),
            Shape::Result(ok, err) => {
                let (is_ok, payload) = match value {
                    ScaleValue::Outcome(Ok(v)) => (true, &**v),
                    ScaleValue::Outcome(Err(v)) => (false, &**v),
                    ScaleValue::Variant(name, v) if name == "Ok" => (true, &**v),
                    ScaleValue::Variant(name, v) if name == "Err" => (false, &**v),
                    ScaleValue::Variant(name, _) => {
                        return Err(Error::new(ErrorKind::AmbiguousOrMissingVariant {
                            names: vec![name.clone()],
                        }))
                    }
                    _ => return Err(wrong_shape(value, ty)),
                };

                if is_ok {
                    out.push_byte(0);
                    self.encode_value(payload, ok, out, depth + 1).map_err(|e| e.at_variant("Ok"))
                } else {
                    out.push_byte(1);
                    self.encode_value(payload, err, out, depth + 1).map_err(|e| e.at_variant("Err"))
                }
            }
        }
    }

    fn encode_sequence<'t>(
        &self,
        values: &[ScaleValue],
        tys: impl Iterator<Item = &'t TypeExpr>,
        out: &mut ByteBuffer,
        depth: usize,
    ) -> Result<(), Error> {
        for (idx, (value, ty)) in values.iter().zip(tys).enumerate() {
            self.encode_value(value, ty, out, depth + 1).map_err(|e| e.at_idx(idx))?;
        }
        Ok(())
    }

    fn encode_struct(
        &self,
        value: &ScaleValue,
        fields: &[Field],
        ty: &TypeExpr,
        out: &mut ByteBuffer,
        depth: usize,
    ) -> Result<(), Error> {
        let ScaleValue::Struct(entries) = value else {
            return Err(wrong_shape(value, ty));
        };

        // Fields are written in the declared order; any extra entries are ignored.
        for field in fields {
            let Some((_, field_value)) = entries.iter().find(|(name, _)| *name == field.name)
            else {
                return Err(Error::new(ErrorKind::MissingField(field.name.clone())));
            };
            self.encode_value(field_value, &field.ty, out, depth + 1)
                .map_err(|e| e.at_field(field.name.as_str()))?;
        }
        Ok(())
    }

    fn encode_enum(
        &self,
        value: &ScaleValue,
        variants: &[Variant],
        ty: &TypeExpr,
        out: &mut ByteBuffer,
        depth: usize,
    ) -> Result<(), Error> {
        let unit = ScaleValue::unit();
        let (name, payload) = match value {
            ScaleValue::Variant(name, payload) => (name, &**payload),
            ScaleValue::Str(name) => (name, &unit),
            ScaleValue::Struct(entries) => match entries.as_slice() {
                [(name, payload)] => (name, payload),
                _ => {
                    let names = entries.iter().map(|(name, _)| name.clone()).collect();
                    return Err(Error::new(ErrorKind::AmbiguousOrMissingVariant { names }));
                }
            },
            _ => return Err(wrong_shape(value, ty)),
        };

        let Some(idx) = variants.iter().position(|v| v.name == *name) else {
            return Err(Error::new(ErrorKind::AmbiguousOrMissingVariant {
                names: vec![name.clone()],
            }));
        };

        // Registration limits enums to 256 variants, so the index fits in the tag byte.
        out.push_byte(idx as u8);
        self.encode_value(payload, &variants[idx].ty, out, depth + 1)
            .map_err(|e| e.at_variant(name.as_str()))
    }
}

fn encode_primitive(
    value: &ScaleValue,
    p: Primitive,
    ty: &TypeExpr,
    out: &mut ByteBuffer,
) -> Result<(), Error> {
    match (p, value) {
        (Primitive::Bool, ScaleValue::Bool(b)) => out.push_byte(u8::from(*b)),
        (Primitive::Str, ScaleValue::Str(s)) => {
            encode_compact(s.len() as u128, out);
            out.push_bytes(s.as_bytes());
        }
        (Primitive::Bool | Primitive::Str, _) => return Err(wrong_shape(value, ty)),
        (p, _) => {
            let len = usize::from(p.bits().unwrap_or(128) / 8);
            if p.is_unsigned() {
                out.push_bytes(&unsigned_value(value, p, ty)?.to_le_bytes()[..len]);
            } else {
                out.push_bytes(&signed_value(value, p, ty)?.to_le_bytes()[..len]);
            }
        }
    }
    Ok(())
}

// The value as an unsigned number which fits into the given primitive.
fn unsigned_value(value: &ScaleValue, p: Primitive, ty: &TypeExpr) -> Result<u128, Error> {
    let n = match value {
        ScaleValue::Int(n, _) => *n,
        ScaleValue::SignedInt(n, _) => u128::try_from(*n).map_err(|_| out_of_range(n, p))?,
        _ => return Err(wrong_shape(value, ty)),
    };
    let bits = p.bits().unwrap_or(128);
    if bits < 128 && n >> bits != 0 {
        return Err(out_of_range(n, p));
    }
    Ok(n)
}

// The value as a signed number which fits into the given primitive.
fn signed_value(value: &ScaleValue, p: Primitive, ty: &TypeExpr) -> Result<i128, Error> {
    let n = match value {
        ScaleValue::SignedInt(n, _) => *n,
        ScaleValue::Int(n, _) => i128::try_from(*n).map_err(|_| out_of_range(n, p))?,
        _ => return Err(wrong_shape(value, ty)),
    };
    let bits = p.bits().unwrap_or(128);
    if bits < 128 {
        let max = (1i128 << (bits - 1)) - 1;
        let min = -max - 1;
        if n < min || n > max {
            return Err(out_of_range(n, p));
        }
    }
    Ok(n)
}

fn check_arity(expected: usize, actual: usize) -> Result<(), Error> {
    if expected == actual {
        Ok(())
    } else {
        Err(Error::new(ErrorKind::ArityMismatch { expected, actual }))
    }
}

fn out_of_range(n: impl ToString, ty: Primitive) -> Error {
    Error::new(ErrorKind::ValueOutOfRange { value: n.to_string(), ty })
}

fn wrong_shape(value: &ScaleValue, ty: &TypeExpr) -> Error {
    Error::new(ErrorKind::WrongShape { actual: value.kind(), expected: ty.to_string() })
}
