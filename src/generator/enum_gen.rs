// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Enum code generation.
//!
//! Proto enums emit as integer constant sets (enum-typed fields store
//! the raw integer on both wires) and as ROS `.msg` constant files.
//! Nested enums flatten their outer type's simple name into their own
//! with an underscore.

use std::fmt::Write;

use prost_types::EnumDescriptorProto;

use crate::generator::names::to_snake_case;

/// Generator for one enum type.
pub(crate) struct EnumGenerator<'a> {
    desc: &'a EnumDescriptorProto,
    /// Flattened simple name (`Outer_Status` for nested enums).
    rust_name: String,
    /// Fully-qualified protobuf name.
    full_name: String,
}

impl<'a> EnumGenerator<'a> {
    pub fn new(
        desc: &'a EnumDescriptorProto,
        package: &str,
        containing_type: Option<&str>,
    ) -> Self {
        let rust_name = match containing_type {
            Some(outer) => format!("{}_{}", outer, desc.name()),
            None => desc.name().to_string(),
        };
        let full_name = if package.is_empty() {
            rust_name.clone()
        } else {
            format!("{package}.{rust_name}")
        };
        Self {
            desc,
            rust_name,
            full_name,
        }
    }

    pub fn rust_name(&self) -> &str {
        &self.rust_name
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Emit the constant-set module.
    pub fn generate_rust(&self, out: &mut String) {
        let module = to_snake_case(&self.rust_name);
        writeln!(out, "/// Constants of the `{}` enum.", self.desc.name()).unwrap();
        writeln!(out, "pub mod {module} {{").unwrap();
        for value in &self.desc.value {
            writeln!(
                out,
                "    pub const {}: i32 = {};",
                value.name(),
                value.number()
            )
            .unwrap();
        }
        writeln!(out, "}}").unwrap();
        writeln!(out).unwrap();
    }

    /// Emit the `.msg` constant lines. Nested enums prefix their
    /// flattened name onto each constant.
    pub fn generate_ros_message(&self) -> String {
        let mut out = String::new();
        let nested = self.rust_name != self.desc.name();
        for value in &self.desc.value {
            let const_name = if nested {
                format!("{}_{}", self.rust_name, value.name())
            } else {
                value.name().to_string()
            };
            writeln!(out, "int32  {} = {}", const_name, value.number()).unwrap();
        }
        out
    }
}
