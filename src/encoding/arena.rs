// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Byte arena shared by the wire codecs.
//!
//! An [`Arena`] backs both [`ProtoBuffer`](crate::encoding::proto::ProtoBuffer)
//! and [`RosBuffer`](crate::encoding::ros::RosBuffer). It comes in three
//! modes:
//!
//! - `Owned` - heap storage that grows by doubling when a write overflows
//! - `Fixed` - a caller-provided span; writes past the end fail
//! - `View` - a read-only parse source; all writes fail
//!
//! Growth of an owned arena is not a recoverable condition: allocation
//! failure aborts through the global allocator, which matches the
//! contract of the wire formats this crate serves.

use crate::core::{CodecError, Result};

/// Minimum capacity for an owned arena.
pub const MIN_OWNED_CAPACITY: usize = 16;

/// Backing storage for a codec buffer.
pub enum Arena<'a> {
    /// Growable heap storage.
    Owned(Vec<u8>),
    /// Bounded caller-provided write target.
    Fixed(&'a mut [u8]),
    /// Read-only parse source.
    View(&'a [u8]),
}

impl<'a> Arena<'a> {
    /// Create an owned arena with at least [`MIN_OWNED_CAPACITY`] bytes.
    pub fn owned(initial_capacity: usize) -> Self {
        Arena::Owned(Vec::with_capacity(initial_capacity.max(MIN_OWNED_CAPACITY)))
    }

    /// The full extent of the backing storage.
    pub fn capacity(&self) -> usize {
        match self {
            Arena::Owned(v) => v.len(),
            Arena::Fixed(s) => s.len(),
            Arena::View(s) => s.len(),
        }
    }

    /// Borrow the backing bytes.
    pub fn data(&self) -> &[u8] {
        match self {
            Arena::Owned(v) => v,
            Arena::Fixed(s) => s,
            Arena::View(s) => s,
        }
    }

    /// Copy `bytes` into the arena at `pos`, growing an owned arena as
    /// needed. Fails on a fixed arena without space and on any view.
    pub fn write_at(&mut self, pos: usize, bytes: &[u8]) -> Result<()> {
        let needed = pos + bytes.len();
        match self {
            Arena::Owned(v) => {
                if needed > v.len() {
                    let new_len = needed.max(v.len() * 2).max(MIN_OWNED_CAPACITY);
                    v.resize(new_len, 0);
                }
                v[pos..needed].copy_from_slice(bytes);
                Ok(())
            }
            Arena::Fixed(s) => {
                if needed > s.len() {
                    return Err(CodecError::buffer_exhausted(needed, s.len()));
                }
                s[pos..needed].copy_from_slice(bytes);
                Ok(())
            }
            Arena::View(_) => Err(CodecError::invariant_violation(
                "write into a read-only buffer view",
            )),
        }
    }

    /// Borrow `n` bytes starting at `pos`, bounded by `limit`.
    pub fn slice(&self, pos: usize, n: usize, limit: usize) -> Result<&[u8]> {
        if pos + n > limit {
            return Err(CodecError::buffer_too_short(
                n,
                limit.saturating_sub(pos),
                pos,
            ));
        }
        Ok(&self.data()[pos..pos + n])
    }
}
