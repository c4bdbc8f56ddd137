// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Message code generation.
//!
//! For every message in the input schema this module emits:
//!
//! - a struct composing runtime field objects, one per declared field
//!   and one [`OneofField`](crate::runtime::union::OneofField) per oneof
//! - the six size/parse/write methods plus the `ros_to_proto` /
//!   `proto_to_ros` drivers
//! - the multiplexer vtable thunks, the vtable const and a `register()`
//! - the ROS `.msg` text for the message
//!
//! Compilation runs in two passes over the declared fields: the first
//! classifies plain and repeated fields and inserts a single placeholder
//! at the first member of each oneof (keeping the oneof at its declared
//! position), the second appends each oneof member to its union.

use std::fmt::Write;

use prost_types::field_descriptor_proto::{Label, Type};
use prost_types::{DescriptorProto, FieldDescriptorProto};
use tracing::debug;

use crate::core::{CodecError, Result};
use crate::generator::enum_gen::EnumGenerator;
use crate::generator::names::{escape_member_name, to_camel_case, to_shouty_snake_case, to_snake_case};
use crate::generator::zip_utils::MsgBundle;

/// Runtime module path used by generated code.
const RT: &str = "::rosproto::runtime";

/// One compiled non-oneof field (or one oneof member).
pub(crate) struct FieldInfo {
    /// Declared proto field name (used in `.msg` output).
    name: String,
    /// Escaped Rust member name.
    member: String,
    /// Proto tag number.
    number: i32,
    /// Runtime field type instantiation.
    rust_type: String,
    /// ROS `.msg` type name.
    ros_type: String,
    repeated: bool,
    is_message: bool,
}

/// One compiled oneof.
pub(crate) struct UnionInfo {
    oneof_index: i32,
    /// Escaped Rust member name of the oneof field.
    member: String,
    /// Original oneof name (for the `.msg` discriminator line).
    name: String,
    /// Name of the generated member-storage struct.
    storage_name: String,
    members: Vec<FieldInfo>,
}

/// Declaration-order entry: a plain field or a oneof placeholder.
enum CompiledField {
    Field(usize),
    Union(usize),
}

/// Generator for one message type (and, recursively, its nested types).
pub(crate) struct MessageGenerator<'a> {
    message: &'a DescriptorProto,
    package: String,
    /// Flattened simple name (`Outer_Inner` for nested messages).
    rust_name: String,
    /// Fully-qualified protobuf name (the registry key).
    full_name: String,
    nested: Vec<MessageGenerator<'a>>,
    enums: Vec<EnumGenerator<'a>>,
    fields: Vec<FieldInfo>,
    unions: Vec<UnionInfo>,
    in_order: Vec<CompiledField>,
}

fn is_any_field(field: &FieldDescriptorProto) -> bool {
    field.r#type() == Type::Message && field.type_name() == ".google.protobuf.Any"
}

/// Whether a repeated field uses the packed encoding. Explicit options
/// win; otherwise numeric scalars pack by default (proto3).
fn is_packed(field: &FieldDescriptorProto) -> bool {
    if let Some(options) = &field.options {
        if let Some(packed) = options.packed {
            return packed;
        }
    }
    !matches!(
        field.r#type(),
        Type::String | Type::Bytes | Type::Message | Type::Group
    )
}

impl<'a> MessageGenerator<'a> {
    pub fn new(
        message: &'a DescriptorProto,
        package: &str,
        containing_type: Option<(&str, &str)>,
    ) -> Self {
        // `containing_type` carries the outer type's flattened Rust name
        // and its package-relative protobuf path.
        let (rust_name, proto_path) = match containing_type {
            Some((outer_rust, outer_path)) => (
                format!("{}_{}", outer_rust, message.name()),
                format!("{}.{}", outer_path, message.name()),
            ),
            None => (message.name().to_string(), message.name().to_string()),
        };
        // The registry key keeps the protobuf dot-path for nested types.
        let full_name = if package.is_empty() {
            proto_path.clone()
        } else {
            format!("{package}.{proto_path}")
        };

        let nested = message
            .nested_type
            .iter()
            .map(|n| MessageGenerator::new(n, package, Some((rust_name.as_str(), proto_path.as_str()))))
            .collect();
        let enums = message
            .enum_type
            .iter()
            .map(|e| EnumGenerator::new(e, package, Some(&rust_name)))
            .collect();

        Self {
            message,
            package: package.to_string(),
            rust_name,
            full_name,
            nested,
            enums,
            fields: Vec::new(),
            unions: Vec::new(),
            in_order: Vec::new(),
        }
    }

    pub fn rust_name(&self) -> &str {
        &self.rust_name
    }

    // ------------------------------------------------------------------
    // Type mapping
    // ------------------------------------------------------------------

    /// Resolve a message type reference to the flattened generated name.
    fn message_rust_name(&self, type_name: &str) -> String {
        let name = type_name.strip_prefix('.').unwrap_or(type_name);
        let prefix = format!("{}.", self.package);
        match name.strip_prefix(&prefix) {
            Some(rest) => rest.replace('.', "_"),
            None => name.replace('.', "_"),
        }
    }

    /// Runtime field type for a singular field.
    fn field_rust_type(&self, field: &FieldDescriptorProto) -> Result<String> {
        let t = match field.r#type() {
            Type::Int32 => format!("{RT}::PrimitiveField<i32, false, false>"),
            Type::Sint32 => format!("{RT}::PrimitiveField<i32, false, true>"),
            Type::Sfixed32 => format!("{RT}::PrimitiveField<i32, true, false>"),
            Type::Int64 => format!("{RT}::PrimitiveField<i64, false, false>"),
            Type::Sint64 => format!("{RT}::PrimitiveField<i64, false, true>"),
            Type::Sfixed64 => format!("{RT}::PrimitiveField<i64, true, false>"),
            Type::Uint32 => format!("{RT}::PrimitiveField<u32, false, false>"),
            Type::Fixed32 => format!("{RT}::PrimitiveField<u32, true, false>"),
            Type::Uint64 => format!("{RT}::PrimitiveField<u64, false, false>"),
            Type::Fixed64 => format!("{RT}::PrimitiveField<u64, true, false>"),
            Type::Double => format!("{RT}::PrimitiveField<f64, true, false>"),
            Type::Float => format!("{RT}::PrimitiveField<f32, true, false>"),
            Type::Bool => format!("{RT}::PrimitiveField<bool, false, false>"),
            // Enum values travel as plain varints.
            Type::Enum => format!("{RT}::PrimitiveField<u32, false, false>"),
            Type::String | Type::Bytes => format!("{RT}::StringField"),
            Type::Message => {
                if is_any_field(field) {
                    format!("{RT}::AnyField")
                } else {
                    format!(
                        "{RT}::MessageField<{}>",
                        self.message_rust_name(field.type_name())
                    )
                }
            }
            Type::Group => {
                return Err(CodecError::unsupported(format!(
                    "proto groups (field '{}')",
                    field.name()
                )))
            }
        };
        Ok(t)
    }

    /// Runtime field type for a repeated field.
    fn field_repeated_rust_type(&self, field: &FieldDescriptorProto) -> Result<String> {
        let packed = is_packed(field);
        let vector = |elem: &str, fixed: bool, signed: bool| {
            format!("{RT}::PrimitiveVectorField<{elem}, {fixed}, {signed}, {packed}>")
        };
        let t = match field.r#type() {
            Type::Int32 => vector("i32", false, false),
            Type::Sint32 => vector("i32", false, true),
            Type::Sfixed32 => vector("i32", true, false),
            Type::Int64 => vector("i64", false, false),
            Type::Sint64 => vector("i64", false, true),
            Type::Sfixed64 => vector("i64", true, false),
            Type::Uint32 => vector("u32", false, false),
            Type::Fixed32 => vector("u32", true, false),
            Type::Uint64 => vector("u64", false, false),
            Type::Fixed64 => vector("u64", true, false),
            Type::Double => vector("f64", true, false),
            Type::Float => vector("f32", true, false),
            Type::Bool => vector("bool", false, false),
            Type::Enum => vector("u32", false, false),
            Type::String | Type::Bytes => format!("{RT}::StringVectorField"),
            Type::Message => {
                if is_any_field(field) {
                    format!("{RT}::MessageVectorField<{RT}::AnyMessage>")
                } else {
                    format!(
                        "{RT}::MessageVectorField<{}>",
                        self.message_rust_name(field.type_name())
                    )
                }
            }
            Type::Group => {
                return Err(CodecError::unsupported(format!(
                    "proto groups (field '{}')",
                    field.name()
                )))
            }
        };
        Ok(t)
    }

    /// Runtime field type for a oneof member. Submessage members use the
    /// union wrapper so absence is representable in ROS.
    fn field_union_rust_type(&self, field: &FieldDescriptorProto) -> Result<String> {
        if field.r#type() == Type::Message {
            if is_any_field(field) {
                return Ok(format!("{RT}::UnionMessageField<{RT}::AnyMessage>"));
            }
            return Ok(format!(
                "{RT}::UnionMessageField<{}>",
                self.message_rust_name(field.type_name())
            ));
        }
        self.field_rust_type(field)
    }

    /// ROS `.msg` type name for a field.
    fn field_ros_type(&self, field: &FieldDescriptorProto) -> Result<String> {
        let t = match field.r#type() {
            Type::Int32 | Type::Sint32 | Type::Sfixed32 => "int32".to_string(),
            Type::Int64 | Type::Sint64 | Type::Sfixed64 => "int64".to_string(),
            Type::Uint32 | Type::Fixed32 => "uint32".to_string(),
            Type::Uint64 | Type::Fixed64 => "uint64".to_string(),
            Type::Double => "float64".to_string(),
            Type::Float => "float32".to_string(),
            Type::Bool => "bool".to_string(),
            Type::Enum => "int32".to_string(),
            Type::String | Type::Bytes => "string".to_string(),
            Type::Message => {
                if is_any_field(field) {
                    "Any".to_string()
                } else {
                    self.message_rust_name(field.type_name())
                }
            }
            Type::Group => {
                return Err(CodecError::unsupported(format!(
                    "proto groups (field '{}')",
                    field.name()
                )))
            }
        };
        Ok(t)
    }

    fn compile_field_info(
        &self,
        field: &FieldDescriptorProto,
        rust_type: String,
    ) -> Result<FieldInfo> {
        Ok(FieldInfo {
            name: field.name().to_string(),
            member: escape_member_name(field.name()),
            number: field.number(),
            rust_type,
            ros_type: self.field_ros_type(field)?,
            repeated: field.label() == Label::Repeated,
            is_message: field.r#type() == Type::Message,
        })
    }

    // ------------------------------------------------------------------
    // Compilation
    // ------------------------------------------------------------------

    pub fn compile(&mut self) -> Result<()> {
        for nested in &mut self.nested {
            nested.compile()?;
        }
        self.compile_fields()?;
        self.compile_unions()?;
        debug!(
            message = %self.full_name,
            fields = self.fields.len(),
            oneofs = self.unions.len(),
            "compiled message"
        );
        Ok(())
    }

    fn compile_fields(&mut self) -> Result<()> {
        let message = self.message;
        for field in &message.field {
            // proto3 optional fields sit in synthetic oneofs; they are
            // plain fields here.
            if let (Some(index), false) = (field.oneof_index, field.proto3_optional()) {
                // Insert one placeholder at the first member so the
                // oneof keeps its declared position.
                if !self.unions.iter().any(|u| u.oneof_index == index) {
                    let oneof_name = message
                        .oneof_decl
                        .get(index as usize)
                        .map(|o| o.name().to_string())
                        .unwrap_or_else(|| format!("oneof_{index}"));
                    self.unions.push(UnionInfo {
                        oneof_index: index,
                        member: escape_member_name(&oneof_name),
                        name: oneof_name.clone(),
                        storage_name: format!("{}_{}", self.rust_name, to_camel_case(&oneof_name)),
                        members: Vec::new(),
                    });
                    self.in_order.push(CompiledField::Union(self.unions.len() - 1));
                }
                continue;
            }

            let rust_type = if field.label() == Label::Repeated {
                self.field_repeated_rust_type(field)?
            } else {
                self.field_rust_type(field)?
            };
            let info = self.compile_field_info(field, rust_type)?;
            self.fields.push(info);
            self.in_order.push(CompiledField::Field(self.fields.len() - 1));
        }
        Ok(())
    }

    fn compile_unions(&mut self) -> Result<()> {
        let message = self.message;
        for field in &message.field {
            let (Some(index), false) = (field.oneof_index, field.proto3_optional()) else {
                continue;
            };
            let rust_type = self.field_union_rust_type(field)?;
            let info = self.compile_field_info(field, rust_type)?;
            let union = self
                .unions
                .iter_mut()
                .find(|u| u.oneof_index == index)
                .expect("union created during field compilation");
            union.members.push(info);
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Rust emission
    // ------------------------------------------------------------------

    pub fn generate_rust(&self, out: &mut String) {
        for nested in &self.nested {
            nested.generate_rust(out);
        }
        for enum_gen in &self.enums {
            enum_gen.generate_rust(out);
        }
        for union in &self.unions {
            self.generate_oneof_storage(out, union);
        }
        self.generate_struct(out);
        self.generate_impl(out);
        self.generate_message_impl(out);
        self.generate_multiplexer(out);
    }

    fn generate_oneof_storage(&self, out: &mut String, union: &UnionInfo) {
        let name = &union.storage_name;

        writeln!(out, "/// Member storage of the `{}` oneof.", union.name).unwrap();
        writeln!(out, "#[allow(non_camel_case_types)]").unwrap();
        writeln!(out, "pub struct {name} {{").unwrap();
        for m in &union.members {
            writeln!(out, "    pub {}: {},", m.member, m.rust_type).unwrap();
        }
        writeln!(out, "}}").unwrap();
        writeln!(out).unwrap();

        writeln!(out, "impl Default for {name} {{").unwrap();
        writeln!(out, "    fn default() -> Self {{").unwrap();
        writeln!(out, "        Self {{").unwrap();
        for m in &union.members {
            let constructor = m
                .rust_type
                .split('<')
                .next()
                .unwrap_or(&m.rust_type)
                .to_string();
            writeln!(out, "            {}: {}::new({}),", m.member, constructor, m.number).unwrap();
        }
        writeln!(out, "        }}").unwrap();
        writeln!(out, "    }}").unwrap();
        writeln!(out, "}}").unwrap();
        writeln!(out).unwrap();

        writeln!(out, "impl {RT}::OneofMembers for {name} {{").unwrap();

        let numbers: Vec<String> = union.members.iter().map(|m| m.number.to_string()).collect();
        writeln!(out, "    fn member_numbers() -> &'static [i32] {{").unwrap();
        writeln!(out, "        &[{}]", numbers.join(", ")).unwrap();
        writeln!(out, "    }}").unwrap();
        writeln!(out).unwrap();

        writeln!(
            out,
            "    fn serialized_proto_size(&self, discriminator: i32) -> usize {{"
        )
        .unwrap();
        writeln!(out, "        match discriminator {{").unwrap();
        for m in &union.members {
            writeln!(
                out,
                "            {} => self.{}.serialized_proto_size(),",
                m.number, m.member
            )
            .unwrap();
        }
        writeln!(out, "            _ => 0,").unwrap();
        writeln!(out, "        }}").unwrap();
        writeln!(out, "    }}").unwrap();
        writeln!(out).unwrap();

        writeln!(
            out,
            "    fn write_proto(&self, discriminator: i32, buf: &mut ::rosproto::ProtoBuffer<'_>) -> ::rosproto::Result<()> {{"
        )
        .unwrap();
        writeln!(out, "        match discriminator {{").unwrap();
        for m in &union.members {
            writeln!(
                out,
                "            {} => self.{}.write_proto(buf),",
                m.number, m.member
            )
            .unwrap();
        }
        writeln!(out, "            _ => Ok(()),").unwrap();
        writeln!(out, "        }}").unwrap();
        writeln!(out, "    }}").unwrap();
        writeln!(out).unwrap();

        writeln!(
            out,
            "    fn parse_proto(&mut self, field_number: u32, buf: &mut ::rosproto::ProtoBuffer<'_>) -> ::rosproto::Result<i32> {{"
        )
        .unwrap();
        writeln!(out, "        match field_number {{").unwrap();
        for m in &union.members {
            writeln!(out, "            {} => {{", m.number).unwrap();
            writeln!(out, "                self.{}.parse_proto(buf)?;", m.member).unwrap();
            writeln!(out, "                Ok({})", m.number).unwrap();
            writeln!(out, "            }}").unwrap();
        }
        writeln!(out, "            _ => Err(::rosproto::CodecError::parse(").unwrap();
        writeln!(out, "                \"oneof\",").unwrap();
        writeln!(
            out,
            "                format!(\"field {{field_number}} is not a member of {}\"),",
            union.name
        )
        .unwrap();
        writeln!(out, "            )),").unwrap();
        writeln!(out, "        }}").unwrap();
        writeln!(out, "    }}").unwrap();
        writeln!(out).unwrap();

        writeln!(out, "    fn serialized_ros_size(&self) -> usize {{").unwrap();
        let sizes: Vec<String> = union
            .members
            .iter()
            .map(|m| format!("self.{}.serialized_ros_size()", m.member))
            .collect();
        writeln!(out, "        {}", sizes.join(" + ")).unwrap();
        writeln!(out, "    }}").unwrap();
        writeln!(out).unwrap();

        writeln!(
            out,
            "    fn write_ros(&self, buf: &mut ::rosproto::RosBuffer<'_>) -> ::rosproto::Result<()> {{"
        )
        .unwrap();
        for m in &union.members {
            writeln!(out, "        self.{}.write_ros(buf)?;", m.member).unwrap();
        }
        writeln!(out, "        Ok(())").unwrap();
        writeln!(out, "    }}").unwrap();
        writeln!(out).unwrap();

        writeln!(
            out,
            "    fn parse_ros(&mut self, buf: &mut ::rosproto::RosBuffer<'_>) -> ::rosproto::Result<()> {{"
        )
        .unwrap();
        for m in &union.members {
            writeln!(out, "        self.{}.parse_ros(buf)?;", m.member).unwrap();
        }
        writeln!(out, "        Ok(())").unwrap();
        writeln!(out, "    }}").unwrap();
        writeln!(out, "}}").unwrap();
        writeln!(out).unwrap();
    }

    fn generate_struct(&self, out: &mut String) {
        writeln!(out, "/// Generated from message `{}`.", self.full_name).unwrap();
        if self.rust_name.contains('_') {
            writeln!(out, "#[allow(non_camel_case_types)]").unwrap();
        }
        writeln!(out, "pub struct {} {{", self.rust_name).unwrap();
        writeln!(out, "    populated: bool,").unwrap();
        for entry in &self.in_order {
            match entry {
                CompiledField::Field(i) => {
                    let f = &self.fields[*i];
                    writeln!(out, "    pub {}: {},", f.member, f.rust_type).unwrap();
                }
                CompiledField::Union(i) => {
                    let u = &self.unions[*i];
                    writeln!(
                        out,
                        "    pub {}: {RT}::OneofField<{}>,",
                        u.member, u.storage_name
                    )
                    .unwrap();
                }
            }
        }
        writeln!(out, "}}").unwrap();
        writeln!(out).unwrap();

        writeln!(out, "impl Default for {} {{", self.rust_name).unwrap();
        writeln!(out, "    fn default() -> Self {{").unwrap();
        writeln!(out, "        Self::new()").unwrap();
        writeln!(out, "    }}").unwrap();
        writeln!(out, "}}").unwrap();
        writeln!(out).unwrap();
    }

    fn generate_impl(&self, out: &mut String) {
        let name = &self.rust_name;
        writeln!(out, "impl {name} {{").unwrap();
        writeln!(out, "    pub const NAME: &'static str = \"{name}\";").unwrap();
        writeln!(
            out,
            "    pub const FULL_NAME: &'static str = \"{}\";",
            self.full_name
        )
        .unwrap();
        writeln!(out).unwrap();

        // new()
        writeln!(out, "    pub fn new() -> Self {{").unwrap();
        writeln!(out, "        Self {{").unwrap();
        writeln!(out, "            populated: false,").unwrap();
        for entry in &self.in_order {
            match entry {
                CompiledField::Field(i) => {
                    let f = &self.fields[*i];
                    let constructor = f.rust_type.split('<').next().unwrap_or(&f.rust_type);
                    writeln!(
                        out,
                        "            {}: {}::new({}),",
                        f.member, constructor, f.number
                    )
                    .unwrap();
                }
                CompiledField::Union(i) => {
                    let u = &self.unions[*i];
                    writeln!(out, "            {}: {RT}::OneofField::new(),", u.member).unwrap();
                }
            }
        }
        writeln!(out, "        }}").unwrap();
        writeln!(out, "    }}").unwrap();
        writeln!(out).unwrap();

        // serialized_proto_size()
        writeln!(out, "    pub fn serialized_proto_size(&self) -> usize {{").unwrap();
        writeln!(out, "        let mut size = 0;").unwrap();
        for f in &self.fields {
            if f.repeated {
                writeln!(
                    out,
                    "        size += self.{}.serialized_proto_size();",
                    f.member
                )
                .unwrap();
            } else {
                writeln!(out, "        if self.{}.is_present() {{", f.member).unwrap();
                writeln!(
                    out,
                    "            size += self.{}.serialized_proto_size();",
                    f.member
                )
                .unwrap();
                writeln!(out, "        }}").unwrap();
            }
        }
        for u in &self.unions {
            writeln!(
                out,
                "        size += self.{}.serialized_proto_size();",
                u.member
            )
            .unwrap();
        }
        writeln!(out, "        size").unwrap();
        writeln!(out, "    }}").unwrap();
        writeln!(out).unwrap();

        // serialized_ros_size()
        writeln!(out, "    pub fn serialized_ros_size(&self) -> usize {{").unwrap();
        writeln!(out, "        let mut size = 0;").unwrap();
        for entry in &self.in_order {
            let member = match entry {
                CompiledField::Field(i) => &self.fields[*i].member,
                CompiledField::Union(i) => &self.unions[*i].member,
            };
            writeln!(out, "        size += self.{member}.serialized_ros_size();").unwrap();
        }
        writeln!(out, "        size").unwrap();
        writeln!(out, "    }}").unwrap();
        writeln!(out).unwrap();

        // write_proto()
        writeln!(
            out,
            "    pub fn write_proto(&self, buf: &mut ::rosproto::ProtoBuffer<'_>) -> ::rosproto::Result<()> {{"
        )
        .unwrap();
        for entry in &self.in_order {
            match entry {
                CompiledField::Field(i) => {
                    let f = &self.fields[*i];
                    if f.repeated {
                        writeln!(out, "        self.{}.write_proto(buf)?;", f.member).unwrap();
                    } else {
                        writeln!(out, "        if self.{}.is_present() {{", f.member).unwrap();
                        writeln!(out, "            self.{}.write_proto(buf)?;", f.member).unwrap();
                        writeln!(out, "        }}").unwrap();
                    }
                }
                CompiledField::Union(i) => {
                    let u = &self.unions[*i];
                    writeln!(out, "        self.{}.write_proto(buf)?;", u.member).unwrap();
                }
            }
        }
        writeln!(out, "        Ok(())").unwrap();
        writeln!(out, "    }}").unwrap();
        writeln!(out).unwrap();

        // parse_proto()
        writeln!(
            out,
            "    pub fn parse_proto(&mut self, buf: &mut ::rosproto::ProtoBuffer<'_>) -> ::rosproto::Result<()> {{"
        )
        .unwrap();
        writeln!(out, "        if self.populated {{").unwrap();
        writeln!(
            out,
            "            return Err(::rosproto::CodecError::already_populated(Self::NAME));"
        )
        .unwrap();
        writeln!(out, "        }}").unwrap();
        writeln!(out, "        self.populated = true;").unwrap();
        writeln!(out, "        while !buf.eof() {{").unwrap();
        writeln!(out, "            let tag = buf.deserialize_tag()?;").unwrap();
        writeln!(
            out,
            "            let field_number = tag >> ::rosproto::encoding::FIELD_ID_SHIFT;"
        )
        .unwrap();
        writeln!(out, "            match field_number {{").unwrap();
        for f in &self.fields {
            writeln!(
                out,
                "                {} => self.{}.parse_proto(buf)?,",
                f.number, f.member
            )
            .unwrap();
        }
        for u in &self.unions {
            for m in &u.members {
                writeln!(
                    out,
                    "                {} => self.{}.parse_proto(field_number, buf)?,",
                    m.number, u.member
                )
                .unwrap();
            }
        }
        writeln!(out, "                _ => buf.skip_tag(tag)?,").unwrap();
        writeln!(out, "            }}").unwrap();
        writeln!(out, "        }}").unwrap();
        writeln!(out, "        Ok(())").unwrap();
        writeln!(out, "    }}").unwrap();
        writeln!(out).unwrap();

        // write_ros()
        writeln!(
            out,
            "    pub fn write_ros(&self, buf: &mut ::rosproto::RosBuffer<'_>) -> ::rosproto::Result<()> {{"
        )
        .unwrap();
        for entry in &self.in_order {
            let member = match entry {
                CompiledField::Field(i) => &self.fields[*i].member,
                CompiledField::Union(i) => &self.unions[*i].member,
            };
            writeln!(out, "        self.{member}.write_ros(buf)?;").unwrap();
        }
        writeln!(out, "        Ok(())").unwrap();
        writeln!(out, "    }}").unwrap();
        writeln!(out).unwrap();

        // parse_ros()
        writeln!(
            out,
            "    pub fn parse_ros(&mut self, buf: &mut ::rosproto::RosBuffer<'_>) -> ::rosproto::Result<()> {{"
        )
        .unwrap();
        writeln!(out, "        if self.populated {{").unwrap();
        writeln!(
            out,
            "            return Err(::rosproto::CodecError::already_populated(Self::NAME));"
        )
        .unwrap();
        writeln!(out, "        }}").unwrap();
        writeln!(out, "        self.populated = true;").unwrap();
        for entry in &self.in_order {
            let member = match entry {
                CompiledField::Field(i) => &self.fields[*i].member,
                CompiledField::Union(i) => &self.unions[*i].member,
            };
            writeln!(out, "        self.{member}.parse_ros(buf)?;").unwrap();
        }
        writeln!(out, "        Ok(())").unwrap();
        writeln!(out, "    }}").unwrap();
        writeln!(out).unwrap();

        // ros_to_proto() / proto_to_ros()
        writeln!(
            out,
            "    pub fn ros_to_proto(&mut self, ros: &mut ::rosproto::RosBuffer<'_>, proto: &mut ::rosproto::ProtoBuffer<'_>) -> ::rosproto::Result<()> {{"
        )
        .unwrap();
        writeln!(out, "        self.parse_ros(ros)?;").unwrap();
        writeln!(out, "        self.write_proto(proto)").unwrap();
        writeln!(out, "    }}").unwrap();
        writeln!(out).unwrap();
        writeln!(
            out,
            "    pub fn proto_to_ros(&mut self, proto: &mut ::rosproto::ProtoBuffer<'_>, ros: &mut ::rosproto::RosBuffer<'_>) -> ::rosproto::Result<()> {{"
        )
        .unwrap();
        writeln!(out, "        self.parse_proto(proto)?;").unwrap();
        writeln!(out, "        self.write_ros(ros)").unwrap();
        writeln!(out, "    }}").unwrap();
        writeln!(out).unwrap();

        // register()
        writeln!(out, "    pub fn register() {{").unwrap();
        writeln!(
            out,
            "        {RT}::mux::register_message(Self::FULL_NAME, {});",
            self.multiplexer_const_name()
        )
        .unwrap();
        writeln!(out, "    }}").unwrap();
        writeln!(out, "}}").unwrap();
        writeln!(out).unwrap();
    }

    fn generate_message_impl(&self, out: &mut String) {
        let name = &self.rust_name;
        writeln!(out, "impl {RT}::Message for {name} {{").unwrap();
        writeln!(out, "    fn name(&self) -> &'static str {{").unwrap();
        writeln!(out, "        Self::NAME").unwrap();
        writeln!(out, "    }}").unwrap();
        writeln!(out).unwrap();
        writeln!(out, "    fn full_name(&self) -> &'static str {{").unwrap();
        writeln!(out, "        Self::FULL_NAME").unwrap();
        writeln!(out, "    }}").unwrap();
        writeln!(out).unwrap();
        writeln!(out, "    fn serialized_proto_size(&self) -> usize {{").unwrap();
        writeln!(out, "        {name}::serialized_proto_size(self)").unwrap();
        writeln!(out, "    }}").unwrap();
        writeln!(out).unwrap();
        writeln!(out, "    fn serialized_ros_size(&self) -> usize {{").unwrap();
        writeln!(out, "        {name}::serialized_ros_size(self)").unwrap();
        writeln!(out, "    }}").unwrap();
        writeln!(out).unwrap();
        writeln!(
            out,
            "    fn write_proto(&self, buf: &mut ::rosproto::ProtoBuffer<'_>) -> ::rosproto::Result<()> {{"
        )
        .unwrap();
        writeln!(out, "        {name}::write_proto(self, buf)").unwrap();
        writeln!(out, "    }}").unwrap();
        writeln!(out).unwrap();
        writeln!(
            out,
            "    fn write_ros(&self, buf: &mut ::rosproto::RosBuffer<'_>) -> ::rosproto::Result<()> {{"
        )
        .unwrap();
        writeln!(out, "        {name}::write_ros(self, buf)").unwrap();
        writeln!(out, "    }}").unwrap();
        writeln!(out).unwrap();
        writeln!(
            out,
            "    fn parse_proto(&mut self, buf: &mut ::rosproto::ProtoBuffer<'_>) -> ::rosproto::Result<()> {{"
        )
        .unwrap();
        writeln!(out, "        {name}::parse_proto(self, buf)").unwrap();
        writeln!(out, "    }}").unwrap();
        writeln!(out).unwrap();
        writeln!(
            out,
            "    fn parse_ros(&mut self, buf: &mut ::rosproto::RosBuffer<'_>) -> ::rosproto::Result<()> {{"
        )
        .unwrap();
        writeln!(out, "        {name}::parse_ros(self, buf)").unwrap();
        writeln!(out, "    }}").unwrap();
        writeln!(out).unwrap();
        writeln!(out, "    fn as_any(&self) -> &dyn ::std::any::Any {{").unwrap();
        writeln!(out, "        self").unwrap();
        writeln!(out, "    }}").unwrap();
        writeln!(out).unwrap();
        writeln!(out, "    fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {{").unwrap();
        writeln!(out, "        self").unwrap();
        writeln!(out, "    }}").unwrap();
        writeln!(out, "}}").unwrap();
        writeln!(out).unwrap();
    }

    fn multiplexer_const_name(&self) -> String {
        format!("{}_MULTIPLEXER", to_shouty_snake_case(&self.rust_name))
    }

    fn generate_multiplexer(&self, out: &mut String) {
        let name = &self.rust_name;
        let snake = to_snake_case(name);

        writeln!(out, "fn {snake}_create() -> Box<dyn {RT}::Message> {{").unwrap();
        writeln!(out, "    Box::new({name}::new())").unwrap();
        writeln!(out, "}}").unwrap();
        writeln!(out).unwrap();

        let thunk = |out: &mut String, op: &str, mutable: bool, buf_type: &str, ret: &str| {
            let (msg_arg, downcast) = if mutable {
                ("msg: &mut dyn {RT}::Message", "as_any_mut().downcast_mut")
            } else {
                ("msg: &dyn {RT}::Message", "as_any().downcast_ref")
            };
            let msg_arg = msg_arg.replace("{RT}", RT);
            writeln!(
                out,
                "fn {snake}_{op}({msg_arg}, buf: &mut {buf_type}<'_>) -> {ret} {{"
            )
            .unwrap();
            writeln!(out, "    match msg.{downcast}::<{name}>() {{").unwrap();
            writeln!(out, "        Some(m) => m.{op}(buf),").unwrap();
            writeln!(
                out,
                "        None => Err(::rosproto::CodecError::invariant_violation(\"{name} vtable type mismatch\")),"
            )
            .unwrap();
            writeln!(out, "    }}").unwrap();
            writeln!(out, "}}").unwrap();
            writeln!(out).unwrap();
        };

        thunk(
            out,
            "parse_proto",
            true,
            "::rosproto::ProtoBuffer",
            "::rosproto::Result<()>",
        );
        thunk(
            out,
            "parse_ros",
            true,
            "::rosproto::RosBuffer",
            "::rosproto::Result<()>",
        );
        thunk(
            out,
            "write_proto",
            false,
            "::rosproto::ProtoBuffer",
            "::rosproto::Result<()>",
        );
        thunk(
            out,
            "write_ros",
            false,
            "::rosproto::RosBuffer",
            "::rosproto::Result<()>",
        );

        writeln!(
            out,
            "fn {snake}_serialized_proto_size(msg: &dyn {RT}::Message) -> usize {{"
        )
        .unwrap();
        writeln!(out, "    msg.serialized_proto_size()").unwrap();
        writeln!(out, "}}").unwrap();
        writeln!(out).unwrap();

        writeln!(
            out,
            "fn {snake}_serialized_ros_size(msg: &dyn {RT}::Message) -> usize {{"
        )
        .unwrap();
        writeln!(out, "    msg.serialized_ros_size()").unwrap();
        writeln!(out, "}}").unwrap();
        writeln!(out).unwrap();

        writeln!(
            out,
            "pub const {}: {RT}::MultiplexerInfo = {RT}::MultiplexerInfo {{",
            self.multiplexer_const_name()
        )
        .unwrap();
        writeln!(out, "    create: {snake}_create,").unwrap();
        writeln!(out, "    parse_proto: {snake}_parse_proto,").unwrap();
        writeln!(out, "    parse_ros: {snake}_parse_ros,").unwrap();
        writeln!(out, "    write_proto: {snake}_write_proto,").unwrap();
        writeln!(out, "    write_ros: {snake}_write_ros,").unwrap();
        writeln!(
            out,
            "    serialized_proto_size: {snake}_serialized_proto_size,"
        )
        .unwrap();
        writeln!(out, "    serialized_ros_size: {snake}_serialized_ros_size,").unwrap();
        writeln!(out, "}};").unwrap();
        writeln!(out).unwrap();
    }

    // ------------------------------------------------------------------
    // ROS .msg emission
    // ------------------------------------------------------------------

    /// The `.msg` text: one field per line in declaration order. Oneofs
    /// expand as a leading discriminator followed by every member;
    /// submessage members become arrays so they stay optional.
    pub fn generate_ros_message(&self) -> String {
        let mut out = String::new();
        for entry in &self.in_order {
            match entry {
                CompiledField::Field(i) => {
                    let f = &self.fields[*i];
                    if f.repeated {
                        writeln!(out, "{}[] {}", f.ros_type, f.name).unwrap();
                    } else {
                        writeln!(out, "{} {}", f.ros_type, f.name).unwrap();
                    }
                }
                CompiledField::Union(i) => {
                    let u = &self.unions[*i];
                    writeln!(out, "int32 {}_discriminator", u.name).unwrap();
                    for m in &u.members {
                        if m.is_message {
                            writeln!(out, "{}[] {}", m.ros_type, m.name).unwrap();
                        } else {
                            writeln!(out, "{} {}", m.ros_type, m.name).unwrap();
                        }
                    }
                }
            }
        }
        out
    }

    /// Add this message's `.msg` (and its nested types') to the bundle.
    pub fn add_ros_messages(&self, bundle: &mut MsgBundle) -> Result<()> {
        for nested in &self.nested {
            nested.add_ros_messages(bundle)?;
        }
        for enum_gen in &self.enums {
            bundle.add_message(enum_gen.full_name(), &enum_gen.generate_ros_message())?;
        }
        let full = if self.package.is_empty() {
            self.rust_name.clone()
        } else {
            format!("{}.{}", self.package, self.rust_name)
        };
        bundle.add_message(&full, &self.generate_ros_message())
    }

    /// Collect the registration calls of this message and its nested
    /// messages.
    pub fn collect_register_calls(&self, calls: &mut Vec<String>) {
        for nested in &self.nested {
            nested.collect_register_calls(calls);
        }
        calls.push(format!("{}::register();", self.rust_name));
    }
}
