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

//! This module provides a [`ByteCursor`] to read SCALE bytes from, and a [`ByteBuffer`]
//! to write SCALE bytes to.

use crate::error::{Error, ErrorKind};
use alloc::vec::Vec;

/// A forward-only view over some bytes. Reading never goes backwards, and trying to
/// read more bytes than remain is an error rather than a short read.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> ByteCursor<'a> {
    /// Create a new cursor positioned at the start of the given bytes.
    pub fn new(bytes: &'a [u8]) -> Self {
        ByteCursor { bytes, offset: 0 }
    }

    /// Return the next `n` bytes, advancing the cursor past them.
    pub fn take_bytes(&mut self, n: usize) -> Result<&'a [u8], Error> {
        let remaining = self.remaining();
        if n > remaining {
            return Err(Error::new(ErrorKind::OutOfData { needed: n, remaining }));
        }
        let bytes: &'a [u8] = self.bytes;
        let taken = &bytes[self.offset..self.offset + n];
        self.offset += n;
        Ok(taken)
    }

    /// Return the next `N` bytes as an array, advancing the cursor past them.
    pub fn take_array<const N: usize>(&mut self) -> Result<[u8; N], Error> {
        let mut arr = [0u8; N];
        arr.copy_from_slice(self.take_bytes(N)?);
        Ok(arr)
    }

    /// Return the next byte, advancing the cursor past it.
    pub fn take_byte(&mut self) -> Result<u8, Error> {
        let [byte] = self.take_array::<1>()?;
        Ok(byte)
    }

    /// Return the next byte without advancing the cursor.
    pub fn peek_byte(&self) -> Result<u8, Error> {
        self.bytes
            .get(self.offset)
            .copied()
            .ok_or_else(|| Error::new(ErrorKind::OutOfData { needed: 1, remaining: 0 }))
    }

    /// The number of bytes that have not been read yet.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.offset
    }

    /// The number of bytes that have been read so far.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The bytes that have not been read yet.
    pub fn remaining_bytes(&self) -> &'a [u8] {
        let bytes: &'a [u8] = self.bytes;
        &bytes[self.offset..]
    }
}

/// An append-only buffer that SCALE bytes are written to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ByteBuffer {
    bytes: Vec<u8>,
}

impl ByteBuffer {
    /// Create a new, empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a single byte.
    pub fn push_byte(&mut self, byte: u8) {
        self.bytes.push(byte);
    }

    /// Append some bytes.
    pub fn push_bytes(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    /// The number of bytes written so far.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Has nothing been written yet?
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The bytes written so far.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Hand back the written bytes.
    pub fn into_inner(self) -> Vec<u8> {
        self.bytes
    }
}

impl From<ByteBuffer> for Vec<u8> {
    fn from(buf: ByteBuffer) -> Self {
        buf.into_inner()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn take_advances_and_fails_past_the_end() {
        let mut cursor = ByteCursor::new(&[1, 2, 3, 4, 5]);

        assert_eq!(cursor.peek_byte().unwrap(), 1);
        assert_eq!(cursor.take_byte().unwrap(), 1);
        assert_eq!(cursor.take_array::<2>().unwrap(), [2, 3]);
        assert_eq!(cursor.remaining(), 2);
        assert_eq!(cursor.offset(), 3);

        let err = cursor.take_bytes(3).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::OutOfData { needed: 3, remaining: 2 });
        // A failed read doesn't consume anything.
        assert_eq!(cursor.remaining_bytes(), &[4, 5]);

        assert_eq!(cursor.take_bytes(2).unwrap(), &[4, 5]);
        assert!(matches!(cursor.peek_byte().unwrap_err().kind(), ErrorKind::OutOfData { .. }));
        assert_eq!(cursor.take_bytes(0).unwrap(), &[] as &[u8]);
    }

    #[test]
    fn buffer_appends() {
        let mut buf = ByteBuffer::new();
        assert!(buf.is_empty());
        buf.push_byte(0x18);
        buf.push_bytes(b"Hamlet");
        assert_eq!(buf.len(), 7);
        assert_eq!(buf.into_inner(), b"\x18Hamlet".to_vec());
    }
}
