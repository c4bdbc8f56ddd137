// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Shared test fixtures.
//!
//! `InnerMessage` and `TestMessage` are written exactly as the
//! generator emits them for this schema:
//!
//! ```proto
//! package foo.bar;
//!
//! message InnerMessage {
//!   string str = 1;
//!   sfixed32 f = 2;
//! }
//!
//! message TestMessage {
//!   int32 x = 1;
//!   sint32 y = 2;
//!   string s = 3;
//!   uint64 big = 4;
//!   repeated int32 vi32 = 5;
//!   repeated sfixed32 vf32 = 6;
//!   repeated string vs = 7;
//!   InnerMessage m = 8;
//!   repeated InnerMessage vm = 9;
//!   google.protobuf.Any any = 10;
//!   oneof u1 {
//!     uint32 u1a = 100;
//!     string u1b = 101;
//!   }
//! }
//! ```

#![allow(dead_code)]
#![allow(non_camel_case_types)]

/// Generated from message `foo.bar.InnerMessage`.
pub struct InnerMessage {
    populated: bool,
    pub str: ::rosproto::runtime::StringField,
    pub f: ::rosproto::runtime::PrimitiveField<i32, true, false>,
}

impl Default for InnerMessage {
    fn default() -> Self {
        Self::new()
    }
}

impl InnerMessage {
    pub const NAME: &'static str = "InnerMessage";
    pub const FULL_NAME: &'static str = "foo.bar.InnerMessage";

    pub fn new() -> Self {
        Self {
            populated: false,
            str: ::rosproto::runtime::StringField::new(1),
            f: ::rosproto::runtime::PrimitiveField::new(2),
        }
    }

    pub fn serialized_proto_size(&self) -> usize {
        let mut size = 0;
        if self.str.is_present() {
            size += self.str.serialized_proto_size();
        }
        if self.f.is_present() {
            size += self.f.serialized_proto_size();
        }
        size
    }

    pub fn serialized_ros_size(&self) -> usize {
        let mut size = 0;
        size += self.str.serialized_ros_size();
        size += self.f.serialized_ros_size();
        size
    }

    pub fn write_proto(&self, buf: &mut ::rosproto::ProtoBuffer<'_>) -> ::rosproto::Result<()> {
        if self.str.is_present() {
            self.str.write_proto(buf)?;
        }
        if self.f.is_present() {
            self.f.write_proto(buf)?;
        }
        Ok(())
    }

    pub fn parse_proto(&mut self, buf: &mut ::rosproto::ProtoBuffer<'_>) -> ::rosproto::Result<()> {
        if self.populated {
            return Err(::rosproto::CodecError::already_populated(Self::NAME));
        }
        self.populated = true;
        while !buf.eof() {
            let tag = buf.deserialize_tag()?;
            let field_number = tag >> ::rosproto::encoding::FIELD_ID_SHIFT;
            match field_number {
                1 => self.str.parse_proto(buf)?,
                2 => self.f.parse_proto(buf)?,
                _ => buf.skip_tag(tag)?,
            }
        }
        Ok(())
    }

    pub fn write_ros(&self, buf: &mut ::rosproto::RosBuffer<'_>) -> ::rosproto::Result<()> {
        self.str.write_ros(buf)?;
        self.f.write_ros(buf)?;
        Ok(())
    }

    pub fn parse_ros(&mut self, buf: &mut ::rosproto::RosBuffer<'_>) -> ::rosproto::Result<()> {
        if self.populated {
            return Err(::rosproto::CodecError::already_populated(Self::NAME));
        }
        self.populated = true;
        self.str.parse_ros(buf)?;
        self.f.parse_ros(buf)?;
        Ok(())
    }

    pub fn ros_to_proto(
        &mut self,
        ros: &mut ::rosproto::RosBuffer<'_>,
        proto: &mut ::rosproto::ProtoBuffer<'_>,
    ) -> ::rosproto::Result<()> {
        self.parse_ros(ros)?;
        self.write_proto(proto)
    }

    pub fn proto_to_ros(
        &mut self,
        proto: &mut ::rosproto::ProtoBuffer<'_>,
        ros: &mut ::rosproto::RosBuffer<'_>,
    ) -> ::rosproto::Result<()> {
        self.parse_proto(proto)?;
        self.write_ros(ros)
    }

    pub fn register() {
        ::rosproto::runtime::mux::register_message(Self::FULL_NAME, INNER_MESSAGE_MULTIPLEXER);
    }
}

impl ::rosproto::runtime::Message for InnerMessage {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn full_name(&self) -> &'static str {
        Self::FULL_NAME
    }

    fn serialized_proto_size(&self) -> usize {
        InnerMessage::serialized_proto_size(self)
    }

    fn serialized_ros_size(&self) -> usize {
        InnerMessage::serialized_ros_size(self)
    }

    fn write_proto(&self, buf: &mut ::rosproto::ProtoBuffer<'_>) -> ::rosproto::Result<()> {
        InnerMessage::write_proto(self, buf)
    }

    fn write_ros(&self, buf: &mut ::rosproto::RosBuffer<'_>) -> ::rosproto::Result<()> {
        InnerMessage::write_ros(self, buf)
    }

    fn parse_proto(&mut self, buf: &mut ::rosproto::ProtoBuffer<'_>) -> ::rosproto::Result<()> {
        InnerMessage::parse_proto(self, buf)
    }

    fn parse_ros(&mut self, buf: &mut ::rosproto::RosBuffer<'_>) -> ::rosproto::Result<()> {
        InnerMessage::parse_ros(self, buf)
    }

    fn as_any(&self) -> &dyn ::std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
        self
    }
}

fn inner_message_create() -> Box<dyn ::rosproto::runtime::Message> {
    Box::new(InnerMessage::new())
}

fn inner_message_parse_proto(
    msg: &mut dyn ::rosproto::runtime::Message,
    buf: &mut ::rosproto::ProtoBuffer<'_>,
) -> ::rosproto::Result<()> {
    match msg.as_any_mut().downcast_mut::<InnerMessage>() {
        Some(m) => m.parse_proto(buf),
        None => Err(::rosproto::CodecError::invariant_violation(
            "InnerMessage vtable type mismatch",
        )),
    }
}

fn inner_message_parse_ros(
    msg: &mut dyn ::rosproto::runtime::Message,
    buf: &mut ::rosproto::RosBuffer<'_>,
) -> ::rosproto::Result<()> {
    match msg.as_any_mut().downcast_mut::<InnerMessage>() {
        Some(m) => m.parse_ros(buf),
        None => Err(::rosproto::CodecError::invariant_violation(
            "InnerMessage vtable type mismatch",
        )),
    }
}

fn inner_message_write_proto(
    msg: &dyn ::rosproto::runtime::Message,
    buf: &mut ::rosproto::ProtoBuffer<'_>,
) -> ::rosproto::Result<()> {
    match msg.as_any().downcast_ref::<InnerMessage>() {
        Some(m) => m.write_proto(buf),
        None => Err(::rosproto::CodecError::invariant_violation(
            "InnerMessage vtable type mismatch",
        )),
    }
}

fn inner_message_write_ros(
    msg: &dyn ::rosproto::runtime::Message,
    buf: &mut ::rosproto::RosBuffer<'_>,
) -> ::rosproto::Result<()> {
    match msg.as_any().downcast_ref::<InnerMessage>() {
        Some(m) => m.write_ros(buf),
        None => Err(::rosproto::CodecError::invariant_violation(
            "InnerMessage vtable type mismatch",
        )),
    }
}

fn inner_message_serialized_proto_size(msg: &dyn ::rosproto::runtime::Message) -> usize {
    msg.serialized_proto_size()
}

fn inner_message_serialized_ros_size(msg: &dyn ::rosproto::runtime::Message) -> usize {
    msg.serialized_ros_size()
}

pub const INNER_MESSAGE_MULTIPLEXER: ::rosproto::runtime::MultiplexerInfo =
    ::rosproto::runtime::MultiplexerInfo {
        create: inner_message_create,
        parse_proto: inner_message_parse_proto,
        parse_ros: inner_message_parse_ros,
        write_proto: inner_message_write_proto,
        write_ros: inner_message_write_ros,
        serialized_proto_size: inner_message_serialized_proto_size,
        serialized_ros_size: inner_message_serialized_ros_size,
    };

/// Member storage of the `u1` oneof.
pub struct TestMessage_U1 {
    pub u1a: ::rosproto::runtime::PrimitiveField<u32, false, false>,
    pub u1b: ::rosproto::runtime::StringField,
}

impl Default for TestMessage_U1 {
    fn default() -> Self {
        Self {
            u1a: ::rosproto::runtime::PrimitiveField::new(100),
            u1b: ::rosproto::runtime::StringField::new(101),
        }
    }
}

impl ::rosproto::runtime::OneofMembers for TestMessage_U1 {
    fn member_numbers() -> &'static [i32] {
        &[100, 101]
    }

    fn serialized_proto_size(&self, discriminator: i32) -> usize {
        match discriminator {
            100 => self.u1a.serialized_proto_size(),
            101 => self.u1b.serialized_proto_size(),
            _ => 0,
        }
    }

    fn write_proto(
        &self,
        discriminator: i32,
        buf: &mut ::rosproto::ProtoBuffer<'_>,
    ) -> ::rosproto::Result<()> {
        match discriminator {
            100 => self.u1a.write_proto(buf),
            101 => self.u1b.write_proto(buf),
            _ => Ok(()),
        }
    }

    fn parse_proto(
        &mut self,
        field_number: u32,
        buf: &mut ::rosproto::ProtoBuffer<'_>,
    ) -> ::rosproto::Result<i32> {
        match field_number {
            100 => {
                self.u1a.parse_proto(buf)?;
                Ok(100)
            }
            101 => {
                self.u1b.parse_proto(buf)?;
                Ok(101)
            }
            _ => Err(::rosproto::CodecError::parse(
                "oneof",
                format!("field {field_number} is not a member of u1"),
            )),
        }
    }

    fn serialized_ros_size(&self) -> usize {
        self.u1a.serialized_ros_size() + self.u1b.serialized_ros_size()
    }

    fn write_ros(&self, buf: &mut ::rosproto::RosBuffer<'_>) -> ::rosproto::Result<()> {
        self.u1a.write_ros(buf)?;
        self.u1b.write_ros(buf)?;
        Ok(())
    }

    fn parse_ros(&mut self, buf: &mut ::rosproto::RosBuffer<'_>) -> ::rosproto::Result<()> {
        self.u1a.parse_ros(buf)?;
        self.u1b.parse_ros(buf)?;
        Ok(())
    }
}

/// Generated from message `foo.bar.TestMessage`.
pub struct TestMessage {
    populated: bool,
    pub x: ::rosproto::runtime::PrimitiveField<i32, false, false>,
    pub y: ::rosproto::runtime::PrimitiveField<i32, false, true>,
    pub s: ::rosproto::runtime::StringField,
    pub big: ::rosproto::runtime::PrimitiveField<u64, false, false>,
    pub vi32: ::rosproto::runtime::PrimitiveVectorField<i32, false, false, true>,
    pub vf32: ::rosproto::runtime::PrimitiveVectorField<i32, true, false, true>,
    pub vs: ::rosproto::runtime::StringVectorField,
    pub m: ::rosproto::runtime::MessageField<InnerMessage>,
    pub vm: ::rosproto::runtime::MessageVectorField<InnerMessage>,
    pub any: ::rosproto::runtime::AnyField,
    pub u1: ::rosproto::runtime::OneofField<TestMessage_U1>,
}

impl Default for TestMessage {
    fn default() -> Self {
        Self::new()
    }
}

impl TestMessage {
    pub const NAME: &'static str = "TestMessage";
    pub const FULL_NAME: &'static str = "foo.bar.TestMessage";

    pub fn new() -> Self {
        Self {
            populated: false,
            x: ::rosproto::runtime::PrimitiveField::new(1),
            y: ::rosproto::runtime::PrimitiveField::new(2),
            s: ::rosproto::runtime::StringField::new(3),
            big: ::rosproto::runtime::PrimitiveField::new(4),
            vi32: ::rosproto::runtime::PrimitiveVectorField::new(5),
            vf32: ::rosproto::runtime::PrimitiveVectorField::new(6),
            vs: ::rosproto::runtime::StringVectorField::new(7),
            m: ::rosproto::runtime::MessageField::new(8),
            vm: ::rosproto::runtime::MessageVectorField::new(9),
            any: ::rosproto::runtime::AnyField::new(10),
            u1: ::rosproto::runtime::OneofField::new(),
        }
    }

    pub fn serialized_proto_size(&self) -> usize {
        let mut size = 0;
        if self.x.is_present() {
            size += self.x.serialized_proto_size();
        }
        if self.y.is_present() {
            size += self.y.serialized_proto_size();
        }
        if self.s.is_present() {
            size += self.s.serialized_proto_size();
        }
        if self.big.is_present() {
            size += self.big.serialized_proto_size();
        }
        size += self.vi32.serialized_proto_size();
        size += self.vf32.serialized_proto_size();
        size += self.vs.serialized_proto_size();
        if self.m.is_present() {
            size += self.m.serialized_proto_size();
        }
        size += self.vm.serialized_proto_size();
        if self.any.is_present() {
            size += self.any.serialized_proto_size();
        }
        size += self.u1.serialized_proto_size();
        size
    }

    pub fn serialized_ros_size(&self) -> usize {
        let mut size = 0;
        size += self.x.serialized_ros_size();
        size += self.y.serialized_ros_size();
        size += self.s.serialized_ros_size();
        size += self.big.serialized_ros_size();
        size += self.vi32.serialized_ros_size();
        size += self.vf32.serialized_ros_size();
        size += self.vs.serialized_ros_size();
        size += self.m.serialized_ros_size();
        size += self.vm.serialized_ros_size();
        size += self.any.serialized_ros_size();
        size += self.u1.serialized_ros_size();
        size
    }

    pub fn write_proto(&self, buf: &mut ::rosproto::ProtoBuffer<'_>) -> ::rosproto::Result<()> {
        if self.x.is_present() {
            self.x.write_proto(buf)?;
        }
        if self.y.is_present() {
            self.y.write_proto(buf)?;
        }
        if self.s.is_present() {
            self.s.write_proto(buf)?;
        }
        if self.big.is_present() {
            self.big.write_proto(buf)?;
        }
        self.vi32.write_proto(buf)?;
        self.vf32.write_proto(buf)?;
        self.vs.write_proto(buf)?;
        if self.m.is_present() {
            self.m.write_proto(buf)?;
        }
        self.vm.write_proto(buf)?;
        if self.any.is_present() {
            self.any.write_proto(buf)?;
        }
        self.u1.write_proto(buf)?;
        Ok(())
    }

    pub fn parse_proto(&mut self, buf: &mut ::rosproto::ProtoBuffer<'_>) -> ::rosproto::Result<()> {
        if self.populated {
            return Err(::rosproto::CodecError::already_populated(Self::NAME));
        }
        self.populated = true;
        while !buf.eof() {
            let tag = buf.deserialize_tag()?;
            let field_number = tag >> ::rosproto::encoding::FIELD_ID_SHIFT;
            match field_number {
                1 => self.x.parse_proto(buf)?,
                2 => self.y.parse_proto(buf)?,
                3 => self.s.parse_proto(buf)?,
                4 => self.big.parse_proto(buf)?,
                5 => self.vi32.parse_proto(buf)?,
                6 => self.vf32.parse_proto(buf)?,
                7 => self.vs.parse_proto(buf)?,
                8 => self.m.parse_proto(buf)?,
                9 => self.vm.parse_proto(buf)?,
                10 => self.any.parse_proto(buf)?,
                100 => self.u1.parse_proto(field_number, buf)?,
                101 => self.u1.parse_proto(field_number, buf)?,
                _ => buf.skip_tag(tag)?,
            }
        }
        Ok(())
    }

    pub fn write_ros(&self, buf: &mut ::rosproto::RosBuffer<'_>) -> ::rosproto::Result<()> {
        self.x.write_ros(buf)?;
        self.y.write_ros(buf)?;
        self.s.write_ros(buf)?;
        self.big.write_ros(buf)?;
        self.vi32.write_ros(buf)?;
        self.vf32.write_ros(buf)?;
        self.vs.write_ros(buf)?;
        self.m.write_ros(buf)?;
        self.vm.write_ros(buf)?;
        self.any.write_ros(buf)?;
        self.u1.write_ros(buf)?;
        Ok(())
    }

    pub fn parse_ros(&mut self, buf: &mut ::rosproto::RosBuffer<'_>) -> ::rosproto::Result<()> {
        if self.populated {
            return Err(::rosproto::CodecError::already_populated(Self::NAME));
        }
        self.populated = true;
        self.x.parse_ros(buf)?;
        self.y.parse_ros(buf)?;
        self.s.parse_ros(buf)?;
        self.big.parse_ros(buf)?;
        self.vi32.parse_ros(buf)?;
        self.vf32.parse_ros(buf)?;
        self.vs.parse_ros(buf)?;
        self.m.parse_ros(buf)?;
        self.vm.parse_ros(buf)?;
        self.any.parse_ros(buf)?;
        self.u1.parse_ros(buf)?;
        Ok(())
    }

    pub fn ros_to_proto(
        &mut self,
        ros: &mut ::rosproto::RosBuffer<'_>,
        proto: &mut ::rosproto::ProtoBuffer<'_>,
    ) -> ::rosproto::Result<()> {
        self.parse_ros(ros)?;
        self.write_proto(proto)
    }

    pub fn proto_to_ros(
        &mut self,
        proto: &mut ::rosproto::ProtoBuffer<'_>,
        ros: &mut ::rosproto::RosBuffer<'_>,
    ) -> ::rosproto::Result<()> {
        self.parse_proto(proto)?;
        self.write_ros(ros)
    }

    pub fn register() {
        ::rosproto::runtime::mux::register_message(Self::FULL_NAME, TEST_MESSAGE_MULTIPLEXER);
    }
}

impl ::rosproto::runtime::Message for TestMessage {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn full_name(&self) -> &'static str {
        Self::FULL_NAME
    }

    fn serialized_proto_size(&self) -> usize {
        TestMessage::serialized_proto_size(self)
    }

    fn serialized_ros_size(&self) -> usize {
        TestMessage::serialized_ros_size(self)
    }

    fn write_proto(&self, buf: &mut ::rosproto::ProtoBuffer<'_>) -> ::rosproto::Result<()> {
        TestMessage::write_proto(self, buf)
    }

    fn write_ros(&self, buf: &mut ::rosproto::RosBuffer<'_>) -> ::rosproto::Result<()> {
        TestMessage::write_ros(self, buf)
    }

    fn parse_proto(&mut self, buf: &mut ::rosproto::ProtoBuffer<'_>) -> ::rosproto::Result<()> {
        TestMessage::parse_proto(self, buf)
    }

    fn parse_ros(&mut self, buf: &mut ::rosproto::RosBuffer<'_>) -> ::rosproto::Result<()> {
        TestMessage::parse_ros(self, buf)
    }

    fn as_any(&self) -> &dyn ::std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
        self
    }
}

fn test_message_create() -> Box<dyn ::rosproto::runtime::Message> {
    Box::new(TestMessage::new())
}

fn test_message_parse_proto(
    msg: &mut dyn ::rosproto::runtime::Message,
    buf: &mut ::rosproto::ProtoBuffer<'_>,
) -> ::rosproto::Result<()> {
    match msg.as_any_mut().downcast_mut::<TestMessage>() {
        Some(m) => m.parse_proto(buf),
        None => Err(::rosproto::CodecError::invariant_violation(
            "TestMessage vtable type mismatch",
        )),
    }
}

fn test_message_parse_ros(
    msg: &mut dyn ::rosproto::runtime::Message,
    buf: &mut ::rosproto::RosBuffer<'_>,
) -> ::rosproto::Result<()> {
    match msg.as_any_mut().downcast_mut::<TestMessage>() {
        Some(m) => m.parse_ros(buf),
        None => Err(::rosproto::CodecError::invariant_violation(
            "TestMessage vtable type mismatch",
        )),
    }
}

fn test_message_write_proto(
    msg: &dyn ::rosproto::runtime::Message,
    buf: &mut ::rosproto::ProtoBuffer<'_>,
) -> ::rosproto::Result<()> {
    match msg.as_any().downcast_ref::<TestMessage>() {
        Some(m) => m.write_proto(buf),
        None => Err(::rosproto::CodecError::invariant_violation(
            "TestMessage vtable type mismatch",
        )),
    }
}

fn test_message_write_ros(
    msg: &dyn ::rosproto::runtime::Message,
    buf: &mut ::rosproto::RosBuffer<'_>,
) -> ::rosproto::Result<()> {
    match msg.as_any().downcast_ref::<TestMessage>() {
        Some(m) => m.write_ros(buf),
        None => Err(::rosproto::CodecError::invariant_violation(
            "TestMessage vtable type mismatch",
        )),
    }
}

fn test_message_serialized_proto_size(msg: &dyn ::rosproto::runtime::Message) -> usize {
    msg.serialized_proto_size()
}

fn test_message_serialized_ros_size(msg: &dyn ::rosproto::runtime::Message) -> usize {
    msg.serialized_ros_size()
}

pub const TEST_MESSAGE_MULTIPLEXER: ::rosproto::runtime::MultiplexerInfo =
    ::rosproto::runtime::MultiplexerInfo {
        create: test_message_create,
        parse_proto: test_message_parse_proto,
        parse_ros: test_message_parse_ros,
        write_proto: test_message_write_proto,
        write_ros: test_message_write_ros,
        serialized_proto_size: test_message_serialized_proto_size,
        serialized_ros_size: test_message_serialized_ros_size,
    };

/// Install every fixture message in the multiplexer.
pub fn register_all() {
    InnerMessage::register();
    TestMessage::register();
    ::rosproto::AnyMessage::register();
}
