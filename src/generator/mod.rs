// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema-driven code generation.
//!
//! The generator consumes Protocol Buffers descriptors
//! (`prost_types::FileDescriptorProto`) and emits, per input file:
//!
//! - one Rust source unit containing, for every message, a struct
//!   composed of runtime field objects with its six size/parse/write
//!   methods and a multiplexer registration, plus enum constant sets
//!   and a file-level `register_all()`
//! - one zip archive bundling a ROS `.msg` text schema for every
//!   message and enum
//!
//! The schema's package path becomes nested Rust modules, with an
//! optional extra namespace segment inserted innermost.

pub mod enum_gen;
pub mod message_gen;
pub mod names;
pub mod zip_utils;

use std::fmt::Write;

use prost_types::FileDescriptorProto;
use tracing::debug;

use crate::core::Result;
use enum_gen::EnumGenerator;
use message_gen::MessageGenerator;
use zip_utils::MsgBundle;

/// Options accepted by the generator (the `key=value` pairs of the
/// original plugin invocation).
#[derive(Debug, Clone, Default)]
pub struct GeneratorOptions {
    /// Extra module segment inserted inside the package modules.
    pub add_namespace: Option<String>,
    /// Package name prefixed onto output paths.
    pub package_name: Option<String>,
    /// Target name prefixed onto output paths.
    pub target_name: Option<String>,
}

/// The artifacts generated from one input schema file.
#[derive(Debug)]
pub struct GeneratedFile {
    /// Rust source unit (declarations and definitions).
    pub rust_source: String,
    /// Zip archive of `.msg` schemas.
    pub msg_bundle: Vec<u8>,
}

/// Generator for one schema file.
pub struct Generator<'a> {
    file: &'a FileDescriptorProto,
    options: GeneratorOptions,
    messages: Vec<MessageGenerator<'a>>,
    enums: Vec<EnumGenerator<'a>>,
}

impl<'a> Generator<'a> {
    pub fn new(file: &'a FileDescriptorProto, options: GeneratorOptions) -> Self {
        let package = file.package();
        let messages = file
            .message_type
            .iter()
            .map(|m| MessageGenerator::new(m, package, None))
            .collect();
        let enums = file
            .enum_type
            .iter()
            .map(|e| EnumGenerator::new(e, package, None))
            .collect();
        Self {
            file,
            options,
            messages,
            enums,
        }
    }

    /// Run field and union compilation for every message.
    pub fn compile(&mut self) -> Result<()> {
        for msg in &mut self.messages {
            msg.compile()?;
        }
        Ok(())
    }

    fn namespace_parts(&self) -> Vec<String> {
        let mut parts: Vec<String> = self
            .file
            .package()
            .split('.')
            .filter(|p| !p.is_empty())
            .map(String::from)
            .collect();
        if let Some(ns) = &self.options.add_namespace {
            parts.push(ns.clone());
        }
        parts
    }

    fn generate_rust(&self) -> String {
        let mut out = String::new();
        writeln!(out, "// Generated by rosproto from {}.", self.file.name()).unwrap();
        writeln!(out, "// Do not edit.").unwrap();
        writeln!(out).unwrap();

        let parts = self.namespace_parts();
        for part in &parts {
            writeln!(out, "pub mod {part} {{").unwrap();
        }
        if !parts.is_empty() {
            writeln!(out).unwrap();
        }

        for enum_gen in &self.enums {
            enum_gen.generate_rust(&mut out);
        }
        for msg in &self.messages {
            msg.generate_rust(&mut out);
        }

        // One declarative init point installing every message.
        let mut calls = Vec::new();
        for msg in &self.messages {
            msg.collect_register_calls(&mut calls);
        }
        writeln!(
            out,
            "/// Install every message of this file in the multiplexer."
        )
        .unwrap();
        writeln!(out, "pub fn register_all() {{").unwrap();
        for call in &calls {
            writeln!(out, "    {call}").unwrap();
        }
        writeln!(out, "}}").unwrap();

        for part in parts.iter().rev() {
            writeln!(out, "}} // mod {part}").unwrap();
        }
        out
    }

    fn generate_msg_bundle(&self) -> Result<Vec<u8>> {
        let mut bundle = MsgBundle::new();
        for enum_gen in &self.enums {
            bundle.add_message(enum_gen.full_name(), &enum_gen.generate_ros_message())?;
        }
        for msg in &self.messages {
            msg.add_ros_messages(&mut bundle)?;
        }
        bundle.finish()
    }

    /// Emit both artifacts. [`Generator::compile`] must have run.
    pub fn generate(&self) -> Result<GeneratedFile> {
        debug!(
            file = self.file.name(),
            messages = self.messages.len(),
            enums = self.enums.len(),
            "generating"
        );
        Ok(GeneratedFile {
            rust_source: self.generate_rust(),
            msg_bundle: self.generate_msg_bundle()?,
        })
    }
}

/// Compile and generate one schema file in a single call.
pub fn generate_file(
    file: &FileDescriptorProto,
    options: GeneratorOptions,
) -> Result<GeneratedFile> {
    let mut generator = Generator::new(file, options);
    generator.compile()?;
    generator.generate()
}
