// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Rosproto CLI
//!
//! Generate typed message code and ROS `.msg` bundles from Protocol
//! Buffers descriptors.
//!
//! ## Usage
//!
//! ```sh
//! # Produce the descriptor set with protoc
//! protoc --descriptor_set_out=test.desc test.proto
//!
//! # Generate test.rs and test.zip
//! rosproto generate test.desc --out-dir generated/
//!
//! # Insert an extra namespace segment and output path prefixes
//! rosproto generate test.desc --add-namespace bridge \
//!     --package-name myrobot --target-name messages
//! ```

use std::fs;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use prost::Message;
use prost_types::FileDescriptorSet;
use tracing::info;

use rosproto::generator::{generate_file, GeneratorOptions};
use rosproto::{CodecError, Result};

/// Rosproto - Protobuf/ROS message bridge generator
#[derive(Parser, Clone)]
#[command(name = "rosproto")]
#[command(about = "Generate Proto/ROS bridge message code from protobuf descriptors", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "ArcheBase")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// Generate Rust message code and a .msg zip bundle
    Generate(GenerateCmd),
}

#[derive(Args, Clone)]
struct GenerateCmd {
    /// Serialized FileDescriptorSet (protoc --descriptor_set_out)
    descriptor_set: PathBuf,

    /// Directory for the generated artifacts
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Extra namespace segment inserted inside the package modules
    #[arg(long)]
    add_namespace: Option<String>,

    /// Package name prefixed onto output paths
    #[arg(long)]
    package_name: Option<String>,

    /// Target name prefixed onto output paths
    #[arg(long)]
    target_name: Option<String>,
}

impl GenerateCmd {
    fn run(&self) -> Result<()> {
        let bytes = fs::read(&self.descriptor_set)?;
        let descriptor_set = FileDescriptorSet::decode(bytes.as_slice()).map_err(|e| {
            CodecError::parse(
                "descriptor set",
                format!("{}: {e}", self.descriptor_set.display()),
            )
        })?;

        let options = GeneratorOptions {
            add_namespace: self.add_namespace.clone(),
            package_name: self.package_name.clone(),
            target_name: self.target_name.clone(),
        };

        let mut out_dir = self.out_dir.clone();
        if let Some(package) = &options.package_name {
            out_dir = out_dir.join(package);
        }
        if let Some(target) = &options.target_name {
            out_dir = out_dir.join(target);
        }
        fs::create_dir_all(&out_dir)?;

        for file in &descriptor_set.file {
            let generated = generate_file(file, options.clone())?;

            let stem = PathBuf::from(file.name())
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "generated".to_string());

            let rust_path = out_dir.join(format!("{stem}.rs"));
            let zip_path = out_dir.join(format!("{stem}.zip"));

            fs::write(&rust_path, &generated.rust_source)?;
            fs::write(&zip_path, &generated.msg_bundle)?;

            info!(
                input = file.name(),
                rust = %rust_path.display(),
                msgs = %zip_path.display(),
                "generated"
            );
        }
        Ok(())
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(cmd) => cmd.run(),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
