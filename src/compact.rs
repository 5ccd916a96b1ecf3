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

//! Compact encoding and decoding of unsigned integers.
//!
//! The two lowest bits of the first byte describe the mode:
//!
//! - `0b00`: single byte, values `0..=63`.
//! - `0b01`: two bytes, values `64..=16_383`.
//! - `0b10`: four bytes, values `16_384..=1_073_741_823`.
//! - `0b11`: the upper six bits of the first byte, plus 4, are the number of
//!   little endian bytes that follow and hold the value.
//!
//! Compact encoding is used for `Compact<T>` values and for the length prefix of
//! every sequence and string.

use crate::cursor::{ByteBuffer, ByteCursor};
use crate::error::{Error, ErrorKind, InvalidEncoding};

const MAX_SINGLE_BYTE: u128 = 0b0011_1111;
const MAX_TWO_BYTE: u128 = 0b0011_1111_1111_1111;
const MAX_FOUR_BYTE: u128 = 0b0011_1111_1111_1111_1111_1111_1111_1111;

/// The number of bytes that the value will take up once compact encoded.
pub fn compact_encoded_len(value: u128) -> usize {
    match value {
        0..=MAX_SINGLE_BYTE => 1,
        0..=MAX_TWO_BYTE => 2,
        0..=MAX_FOUR_BYTE => 4,
        _ => 1 + big_len(value),
    }
}

/// Compact encode a value to the given buffer.
pub fn encode_compact(value: u128, out: &mut ByteBuffer) {
    match value {
        0..=MAX_SINGLE_BYTE => out.push_byte((value as u8) << 2),
        0..=MAX_TWO_BYTE => out.push_bytes(&(((value as u16) << 2) | 0b01).to_le_bytes()),
        0..=MAX_FOUR_BYTE => out.push_bytes(&(((value as u32) << 2) | 0b10).to_le_bytes()),
        _ => {
            let len = big_len(value);
            out.push_byte((((len - 4) as u8) << 2) | 0b11);
            out.push_bytes(&value.to_le_bytes()[..len]);
        }
    }
}

/// Decode a compact encoded value from the given cursor. Encodings which are not
/// the smallest possible for the value they hold are rejected.
pub fn decode_compact(input: &mut ByteCursor<'_>) -> Result<u128, Error> {
    let first = input.peek_byte()?;

    let value = match first & 0b11 {
        0b00 => {
            input.take_byte()?;
            u128::from(first >> 2)
        }
        0b01 => {
            let value = u128::from(u16::from_le_bytes(input.take_array()?) >> 2);
            ensure_canonical(value > MAX_SINGLE_BYTE)?;
            value
        }
        0b10 => {
            let value = u128::from(u32::from_le_bytes(input.take_array()?) >> 2);
            ensure_canonical(value > MAX_TWO_BYTE)?;
            value
        }
        _ => {
            let len = usize::from(first >> 2) + 4;
            if len > 16 {
                return Err(Error::new(ErrorKind::InvalidEncoding(
                    InvalidEncoding::CompactTooLarge(len),
                )));
            }
            // Only consume the prefix once we know the length is usable.
            input.take_byte()?;
            let bytes = input.take_bytes(len)?;

            let mut buf = [0u8; 16];
            buf[..len].copy_from_slice(bytes);
            let value = u128::from_le_bytes(buf);

            // The value needs this mode, and the last byte can't be redundant.
            ensure_canonical(value > MAX_FOUR_BYTE && big_len(value) == len)?;
            value
        }
    };

    Ok(value)
}

// The number of bytes needed to store a value in the big integer mode; at least 4.
fn big_len(value: u128) -> usize {
    let bits = 128 - value.leading_zeros() as usize;
    bits.div_ceil(8).max(4)
}

fn ensure_canonical(is_canonical: bool) -> Result<(), Error> {
    if is_canonical {
        Ok(())
    } else {
        Err(Error::new(ErrorKind::InvalidEncoding(InvalidEncoding::NonCanonicalCompact)))
    }
}
