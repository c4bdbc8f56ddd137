// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! The message capability trait.
//!
//! Every generated message (and the hand-coded
//! [`AnyMessage`](crate::runtime::any::AnyMessage)) exposes the same six
//! size/parse/write operations in both wire formats. The trait is
//! object-safe so the multiplexer can hand out `Box<dyn Message>` and
//! dispatch through its vtable; `as_any` lets generated vtable thunks
//! recover the concrete type.

use std::any::Any;

use crate::core::Result;
use crate::encoding::proto::ProtoBuffer;
use crate::encoding::ros::RosBuffer;

/// Uniform capability set of a generated message.
///
/// A message may be populated at most once: calling `parse_proto` or
/// `parse_ros` on an already-populated message fails. A message whose
/// parse failed is in an indeterminate state and must be discarded.
pub trait Message: Any {
    /// Simple type name (e.g. `TestMessage`).
    fn name(&self) -> &'static str;

    /// Fully-qualified protobuf name (e.g. `foo.bar.TestMessage`).
    fn full_name(&self) -> &'static str;

    /// Exact number of bytes `write_proto` will produce.
    fn serialized_proto_size(&self) -> usize;

    /// Exact number of bytes `write_ros` will produce.
    fn serialized_ros_size(&self) -> usize;

    /// Serialize to the protobuf wire format.
    fn write_proto(&self, buf: &mut ProtoBuffer<'_>) -> Result<()>;

    /// Serialize to the ROS wire format.
    fn write_ros(&self, buf: &mut RosBuffer<'_>) -> Result<()>;

    /// Populate from the protobuf wire format.
    fn parse_proto(&mut self, buf: &mut ProtoBuffer<'_>) -> Result<()>;

    /// Populate from the ROS wire format.
    fn parse_ros(&mut self, buf: &mut RosBuffer<'_>) -> Result<()>;

    /// Upcast for concrete-type recovery in vtable thunks.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for concrete-type recovery in vtable thunks.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
