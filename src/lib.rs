// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Rosproto
//!
//! Bridge between Protocol Buffers wire format and ROS-style
//! length-prefixed binary serialization.
//!
//! This library provides:
//! - **Wire codecs** in [`encoding`]: [`ProtoBuffer`] (varint, zigzag,
//!   fixed-width, length-delimited) and [`RosBuffer`] (raw little-endian
//!   scalars, 4-byte length/count prefixes)
//! - **Typed field library** in [`runtime`]: primitive, string, nested
//!   message, repeated, oneof and `Any` fields that compose into
//!   generated message structs
//! - **Multiplexer** in [`runtime::mux`]: a process-wide registry from
//!   fully-qualified type names to parse/write/size/create vtables
//! - **Code generator** in [`generator`]: consumes Protocol Buffers
//!   descriptors and emits typed message structs plus a zip bundle of
//!   ROS `.msg` schemas
//!
//! ## Architecture
//!
//! There is no shared in-memory representation of a field across the two
//! formats: each message holds a typed field graph; `parse_proto` /
//! `parse_ros` populate it, `write_proto` / `write_ros` emit it. A
//! populated message converts with `proto_to_ros` / `ros_to_proto`.
//!
//! ## Example: runtime fields
//!
//! ```
//! use rosproto::encoding::{ProtoBuffer, RosBuffer};
//! use rosproto::runtime::PrimitiveField;
//!
//! # fn main() -> rosproto::Result<()> {
//! let mut x: PrimitiveField<i32, false, false> = PrimitiveField::new(1);
//! x.set(1234);
//!
//! let mut proto = ProtoBuffer::new();
//! x.write_proto(&mut proto)?;
//! assert_eq!(proto.as_slice(), &[0x08, 0xd2, 0x09]);
//!
//! let mut ros = RosBuffer::new();
//! x.write_ros(&mut ros)?;
//! assert_eq!(ros.as_slice(), &[0xd2, 0x04, 0x00, 0x00]);
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

// Re-export core types for convenience
pub use core::{CodecError, Result};

// Wire codecs
pub mod encoding;

pub use encoding::{ProtoBuffer, RosBuffer, WireType};

// Typed field library, message trait, multiplexer, Any
pub mod runtime;

pub use runtime::{AnyField, AnyMessage, Message, MultiplexerInfo};

// Descriptor-driven code generation
pub mod generator;

pub use generator::{generate_file, GeneratedFile, Generator, GeneratorOptions};
