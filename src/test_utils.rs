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

use crate::codec::Codec;
use crate::cursor::ByteCursor;
use crate::error::Error;
use crate::type_def::TypeDef;
use crate::type_expr::TypeExpr;
use crate::type_registry::TypeRegistry;
use crate::value::ScaleValue;
use alloc::string::String;
use alloc::vec::Vec;

/// Turn a hex string like "0a000000" into bytes.
pub fn bytes(hex_str: &str) -> Vec<u8> {
    hex::decode(hex_str).expect("test hex should be valid")
}

/// The basic types, plus the definitions given.
pub fn types_with(defs: impl IntoIterator<Item = (&'static str, TypeDef)>) -> TypeRegistry {
    let mut types = TypeRegistry::basic();
    types.register(defs).expect("test types should be valid");
    types
}

/// Decode some hex encoded bytes as the given type, expecting every byte to be used.
pub fn decode_hex(types: &TypeRegistry, ty: &str, hex_str: &str) -> Result<ScaleValue, Error> {
    let ty = TypeExpr::parse(ty).expect("test type should parse");
    let input = bytes(hex_str);
    let mut cursor = ByteCursor::new(&input);
    let value = Codec::new(types).decode(&ty, &mut cursor)?;
    assert_eq!(cursor.remaining(), 0, "decoding {hex_str} as {ty} left bytes over");
    Ok(value)
}

/// Encode a value as the given type, handing back hex encoded bytes.
pub fn encode_hex(types: &TypeRegistry, ty: &str, value: &ScaleValue) -> Result<String, Error> {
    let ty = TypeExpr::parse(ty).expect("test type should parse");
    let bytes = Codec::new(types).encode(value, &ty)?;
    Ok(hex::encode(bytes))
}

/// Check that some hex decodes to the given value as the given type, and that encoding
/// the value hands back the same hex.
pub fn assert_round_trip(types: &TypeRegistry, ty: &str, hex_str: &str, value: ScaleValue) {
    let decoded = decode_hex(types, ty, hex_str)
        .unwrap_or_else(|e| panic!("decoding {hex_str} as {ty} failed: {e}"));
    assert_eq!(decoded, value, "decoding {hex_str} as {ty}");

    let encoded =
        encode_hex(types, ty, &value).unwrap_or_else(|e| panic!("encoding as {ty} failed: {e}"));
    assert_eq!(encoded, hex_str, "encoding {value:?} as {ty}");
}
