// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! ROS-style length-prefixed wire codec.
//!
//! [`RosBuffer`] moves raw little-endian scalars, strings with a 4-byte
//! length prefix, sequences with a 4-byte count prefix, and fixed-size
//! arrays with no prefix at all. Nested messages are written inline
//! without framing; their fixed composition defines their extent.
//!
//! The wire format is little-endian. All scalar moves go through
//! little-endian conversions, so big-endian hosts byte-swap
//! transparently.

use byteorder::{ByteOrder, LittleEndian};

use crate::core::{CodecError, Result};
use crate::encoding::arena::{Arena, MIN_OWNED_CAPACITY};
use crate::encoding::scalar::Scalar;

/// Width of the length/count prefix on strings and sequences.
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Byte arena plus ROS wire primitives.
///
/// # Example
///
/// ```
/// use rosproto::encoding::ros::RosBuffer;
///
/// # fn main() -> rosproto::Result<()> {
/// let mut buf = RosBuffer::new();
/// buf.write_scalar(1234i32)?;
/// buf.write_string(b"hi")?;
/// assert_eq!(buf.as_slice(), &[0xd2, 0x04, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00, b'h', b'i']);
/// # Ok(())
/// # }
/// ```
pub struct RosBuffer<'a> {
    arena: Arena<'a>,
    /// Read/write cursor.
    pos: usize,
    /// End of valid data.
    limit: usize,
}

impl Default for RosBuffer<'static> {
    fn default() -> Self {
        RosBuffer::new()
    }
}

impl<'a> RosBuffer<'a> {
    /// Create an owned, growable buffer.
    pub fn new() -> RosBuffer<'static> {
        RosBuffer::with_capacity(MIN_OWNED_CAPACITY)
    }

    /// Create an owned buffer with the given initial capacity (clamped to
    /// the minimum).
    pub fn with_capacity(capacity: usize) -> RosBuffer<'static> {
        RosBuffer {
            arena: Arena::owned(capacity),
            pos: 0,
            limit: 0,
        }
    }

    /// Create a bounded buffer over caller-provided storage.
    pub fn with_fixed(storage: &'a mut [u8]) -> RosBuffer<'a> {
        RosBuffer {
            arena: Arena::Fixed(storage),
            pos: 0,
            limit: 0,
        }
    }

    /// Create a read-only buffer over received bytes.
    pub fn from_slice(data: &'a [u8]) -> RosBuffer<'a> {
        let limit = data.len();
        RosBuffer {
            arena: Arena::View(data),
            pos: 0,
            limit,
        }
    }

    /// Bytes written so far (or total valid bytes for a parse source).
    pub fn len(&self) -> usize {
        self.limit
    }

    /// Whether any valid data exists.
    pub fn is_empty(&self) -> bool {
        self.limit == 0
    }

    /// Whether the cursor has reached the end of valid data.
    pub fn eof(&self) -> bool {
        self.pos >= self.limit
    }

    /// Remaining valid bytes after the cursor.
    pub fn remaining(&self) -> usize {
        self.limit.saturating_sub(self.pos)
    }

    /// Move the cursor back to the start, keeping the data.
    pub fn rewind(&mut self) {
        self.pos = 0;
    }

    /// Drop all data and reset the cursor.
    pub fn clear(&mut self) {
        self.pos = 0;
        self.limit = 0;
    }

    /// Borrow the valid data.
    pub fn as_slice(&self) -> &[u8] {
        &self.arena.data()[..self.limit]
    }

    /// Consume the buffer, returning the written bytes. Fixed and view
    /// buffers return a copy of their valid prefix.
    pub fn into_vec(self) -> Vec<u8> {
        match self.arena {
            Arena::Owned(mut v) => {
                v.truncate(self.limit);
                v
            }
            Arena::Fixed(s) => s[..self.limit].to_vec(),
            Arena::View(s) => s[..self.limit].to_vec(),
        }
    }

    /// Fail unless the cursor sits exactly at the end of valid data.
    pub fn check_at_end(&self) -> Result<()> {
        if self.pos != self.limit {
            return Err(CodecError::parse(
                "ros buffer",
                format!("extra data: cursor at {}, end at {}", self.pos, self.limit),
            ));
        }
        Ok(())
    }

    /// Write raw bytes with no prefix.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.arena.write_at(self.pos, bytes)?;
        self.pos += bytes.len();
        self.limit = self.limit.max(self.pos);
        Ok(())
    }

    /// Read `n` raw bytes.
    pub fn read_bytes(&mut self, n: usize) -> Result<&[u8]> {
        let data = self.arena.slice(self.pos, n, self.limit)?;
        self.pos += n;
        Ok(data)
    }

    /// Advance the cursor `n` bytes, failing if it would cross the end.
    pub fn skip(&mut self, n: usize) -> Result<()> {
        if self.pos + n > self.limit {
            return Err(CodecError::buffer_too_short(n, self.remaining(), self.pos));
        }
        self.pos += n;
        Ok(())
    }

    /// Write one scalar as raw little-endian bytes.
    pub fn write_scalar<T: Scalar>(&mut self, v: T) -> Result<()> {
        let mut scratch = [0u8; 8];
        v.write_le(&mut scratch);
        self.write_bytes(&scratch[..T::WIRE_SIZE])
    }

    /// Read one scalar from raw little-endian bytes.
    pub fn read_scalar<T: Scalar>(&mut self) -> Result<T> {
        let data = self.read_bytes(T::WIRE_SIZE)?;
        Ok(T::read_le(data))
    }

    /// Write a string/bytes payload: 4-byte length prefix then the bytes.
    pub fn write_string(&mut self, data: &[u8]) -> Result<()> {
        self.write_count(data.len())?;
        self.write_bytes(data)
    }

    /// Read a string/bytes payload into an owning buffer.
    pub fn read_string(&mut self) -> Result<Vec<u8>> {
        let len = self.read_count()? as usize;
        Ok(self.read_bytes(len)?.to_vec())
    }

    /// Write a sequence length/count prefix.
    pub fn write_count(&mut self, count: usize) -> Result<()> {
        let mut scratch = [0u8; LENGTH_PREFIX_SIZE];
        LittleEndian::write_u32(&mut scratch, count as u32);
        self.write_bytes(&scratch)
    }

    /// Read a sequence length/count prefix.
    pub fn read_count(&mut self) -> Result<u32> {
        let data = self.read_bytes(LENGTH_PREFIX_SIZE)?;
        Ok(LittleEndian::read_u32(data))
    }

    /// Write a sequence: 4-byte count then each element.
    pub fn write_sequence<T: Scalar>(&mut self, values: &[T]) -> Result<()> {
        self.write_count(values.len())?;
        for &v in values {
            self.write_scalar(v)?;
        }
        Ok(())
    }

    /// Read a sequence written by [`RosBuffer::write_sequence`].
    pub fn read_sequence<T: Scalar>(&mut self) -> Result<Vec<T>> {
        let count = self.read_count()? as usize;
        // Bound the allocation by what the buffer can actually hold.
        if count * T::WIRE_SIZE > self.remaining() {
            return Err(CodecError::buffer_too_short(
                count * T::WIRE_SIZE,
                self.remaining(),
                self.pos,
            ));
        }
        let mut values = Vec::with_capacity(count);
        for _ in 0..count {
            values.push(self.read_scalar()?);
        }
        Ok(values)
    }

    /// Write a fixed-size array: elements back-to-back, no prefix.
    pub fn write_array<T: Scalar, const N: usize>(&mut self, values: &[T; N]) -> Result<()> {
        for &v in values {
            self.write_scalar(v)?;
        }
        Ok(())
    }

    /// Read a fixed-size array written by [`RosBuffer::write_array`].
    pub fn read_array<T: Scalar, const N: usize>(&mut self) -> Result<[T; N]> {
        let mut values = [T::default(); N];
        for v in values.iter_mut() {
            *v = self.read_scalar()?;
        }
        Ok(values)
    }
}
