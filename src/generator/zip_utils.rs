// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Zip packaging for generated ROS `.msg` schemas.
//!
//! One archive aggregates every `.msg` file produced from an input
//! schema. Entry paths follow the ROS package layout:
//! `<package_with_dots_to_underscores>/msg/<SimpleName>.msg`.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::core::{CodecError, Result};

/// In-memory zip archive of `.msg` files.
pub struct MsgBundle {
    writer: ZipWriter<Cursor<Vec<u8>>>,
}

impl Default for MsgBundle {
    fn default() -> Self {
        Self::new()
    }
}

impl MsgBundle {
    /// Create an empty bundle.
    pub fn new() -> Self {
        Self {
            writer: ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    /// Add the `.msg` text for a fully-qualified message or enum name.
    ///
    /// `full_name` is split at its last dot: the leading portion (dots
    /// replaced by underscores) becomes the package directory, the
    /// trailing portion the file stem.
    pub fn add_message(&mut self, full_name: &str, content: &str) -> Result<()> {
        let (dirname, base_name) = match full_name.rfind('.') {
            Some(pos) => (&full_name[..pos], &full_name[pos + 1..]),
            None => ("", full_name),
        };
        let dirname = dirname.replace('.', "_");
        let entry = if dirname.is_empty() {
            format!("msg/{base_name}.msg")
        } else {
            format!("{dirname}/msg/{base_name}.msg")
        };

        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        self.writer
            .start_file(entry.as_str(), options)
            .map_err(|e| CodecError::encode("zip", format!("failed to add {entry}: {e}")))?;
        self.writer
            .write_all(content.as_bytes())
            .map_err(|e| CodecError::encode("zip", format!("failed to write {entry}: {e}")))?;
        Ok(())
    }

    /// Finalize the archive and return its bytes.
    pub fn finish(self) -> Result<Vec<u8>> {
        let cursor = self
            .writer
            .finish()
            .map_err(|e| CodecError::encode("zip", format!("failed to finalize archive: {e}")))?;
        Ok(cursor.into_inner())
    }
}
