// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! The typed field library and message runtime.
//!
//! Generated messages compose the field objects in this module: each
//! field carries its proto tag number, a presence flag and typed
//! storage, and sizes/writes/parses itself in both wire formats. The
//! [`mux`] registry resolves dynamic type names to vtables; [`any`]
//! builds `google.protobuf.Any` support on top of it.

pub mod any;
pub mod fields;
pub mod message;
pub mod mux;
pub mod union;
pub mod vectors;

pub use any::{AnyField, AnyMessage};
pub use fields::{MessageField, PrimitiveField, StringField};
pub use message::Message;
pub use mux::MultiplexerInfo;
pub use union::{OneofField, OneofMembers, UnionMessageField};
pub use vectors::{MessageVectorField, PrimitiveVectorField, StringVectorField};
