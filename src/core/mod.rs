// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types shared by the codecs, the runtime field library and the
//! generator.

pub mod error;

pub use error::{CodecError, Result};
