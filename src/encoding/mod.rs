// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Wire codec implementations.
//!
//! Two encodings share one arena abstraction:
//!
//! - [`proto`] - Protocol Buffers binary format (tags, varints, zigzag,
//!   fixed-width, length-delimited)
//! - [`ros`] - ROS-style length-prefixed binary format (raw little-endian
//!   scalars, 4-byte length/count prefixes)
//!
//! The [`scalar::Scalar`] trait supplies the per-type hooks both codecs
//! dispatch through.

pub mod arena;
pub mod proto;
pub mod ros;
pub mod scalar;

pub use proto::{ProtoBuffer, WireType, FIELD_ID_SHIFT};
pub use ros::RosBuffer;
pub use scalar::Scalar;
